pub mod atomic;
pub mod csv_writer;

pub use atomic::write_csv_atomically;
pub use csv_writer::MatchedTableWriter;
