use aqs_zip_matcher::cli::{run, Cli};
use aqs_zip_matcher::error::Result;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli).await
}
