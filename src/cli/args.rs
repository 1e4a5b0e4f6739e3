use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "aqs-zip-matcher")]
#[command(about = "EPA air-quality monitor acquisition and nearest ZIP-code centroid matching")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log file path (truncated on start)")]
    pub log_file: Option<PathBuf>,

    #[arg(long, global = true, help = "Settings file [default: aqzip.toml if present]")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Assign each monitor site to its nearest ZIP-code centroid
    Match {
        #[arg(help = "Centroid CSV with 'ZIP Code', 'Latitude', 'Longitude' columns")]
        centroids_file: PathBuf,

        #[arg(help = "EPA monitor CSV export")]
        monitors_file: PathBuf,

        #[arg(help = "Output CSV path")]
        output_file: PathBuf,

        #[arg(short, long, help = "Hide the progress bar")]
        quiet: bool,
    },

    /// Geocode ZIP codes to centroids, resuming from an existing output file
    Geocode {
        #[arg(long, help = "File with ZIP codes (CSV first column, or one per line)")]
        zips: PathBuf,

        #[arg(long, help = "Google Maps Geocoding API key")]
        api_key: Option<String>,

        #[arg(short, long, help = "Output centroid CSV [default: ZIP_Code_Centroids.csv]")]
        output: Option<PathBuf>,

        #[arg(long, help = "Delay between API requests in seconds [default: 0.25]")]
        sleep: Option<f64>,
    },

    /// Download AirNow daily CSV exports from the EPA and combine them
    Download {
        #[arg(long, help = "Five-digit state+county FIPS code")]
        county: Option<String>,

        #[arg(long)]
        start_year: Option<i32>,

        #[arg(long)]
        end_year: Option<i32>,

        #[arg(short, long, help = "Directory for per-pollutant files")]
        output_dir: Option<PathBuf>,

        #[arg(long, help = "Combined CSV path")]
        combined_file: Option<PathBuf>,
    },

    /// Concatenate every CSV in a directory into one file
    Combine {
        #[arg(short, long)]
        input_dir: PathBuf,

        #[arg(short, long)]
        output_file: PathBuf,
    },
}
