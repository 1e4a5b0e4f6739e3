pub mod acquisition;
pub mod cli;
pub mod error;
pub mod matching;
pub mod models;
pub mod readers;
pub mod settings;
pub mod utils;
pub mod writers;

pub use error::{ProcessingError, Result};
