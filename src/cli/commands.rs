use crate::acquisition::{
    combine_csv_files, load_zip_codes, EpaDownloader, GeocodeRun, GoogleGeocoder, ReqwestFetcher,
};
use crate::cli::args::{Cli, Commands};
use crate::error::{ProcessingError, Result};
use crate::matching::assign_nearest_centroids;
use crate::settings::Settings;
use crate::utils::logging::init_logging;
use crate::utils::progress::ProgressReporter;
use std::time::Duration;
use tracing::info;

pub async fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose, cli.log_file.as_deref())?;

    match cli.command {
        Commands::Match {
            centroids_file,
            monitors_file,
            output_file,
            quiet,
        } => {
            let stats =
                assign_nearest_centroids(&centroids_file, &monitors_file, &output_file, quiet)?;
            println!("\n{}", stats.summary());
        }

        Commands::Geocode {
            zips,
            api_key,
            output,
            sleep,
        } => {
            let settings = Settings::load(cli.config.as_deref())?.geocode;

            let api_key = api_key.or(settings.api_key).ok_or_else(|| {
                ProcessingError::Config(
                    "a Google Maps API key is required (--api-key or AQZIP_GEOCODE__API_KEY)"
                        .to_string(),
                )
            })?;
            let output = output.unwrap_or(settings.output);
            let delay_secs = sleep.unwrap_or(settings.delay_secs);
            if !delay_secs.is_finite() || delay_secs < 0.0 {
                return Err(ProcessingError::Config(format!(
                    "sleep must be a non-negative number of seconds, got {}",
                    delay_secs
                )));
            }

            let zip_codes = load_zip_codes(&zips)?;
            info!("Loaded {} ZIP codes from {}", zip_codes.len(), zips.display());

            let geocoder = GoogleGeocoder::new(ReqwestFetcher::new()?, &settings.endpoint, &api_key);
            let report = GeocodeRun::new(&geocoder, &output)
                .with_batch_size(settings.batch_size)
                .with_delay(Duration::from_secs_f64(delay_secs))
                .run(&zip_codes)
                .await?;

            println!("{}", report.summary());
            println!("Done.");
        }

        Commands::Download {
            county,
            start_year,
            end_year,
            output_dir,
            combined_file,
        } => {
            let mut settings = Settings::load(cli.config.as_deref())?.download;
            if let Some(county) = county {
                settings.county_code = county;
            }
            if let Some(year) = start_year {
                settings.start_year = year;
            }
            if let Some(year) = end_year {
                settings.end_year = year;
            }
            if let Some(dir) = output_dir {
                settings.output_dir = dir;
            }
            if let Some(file) = combined_file {
                settings.combined_file = file;
            }
            settings.validate_years()?;

            let fetcher = ReqwestFetcher::new()?;
            let progress = ProgressReporter::new_spinner("Downloading EPA exports...", false);
            let report = EpaDownloader::new(&fetcher, &settings)?.run().await?;
            progress.finish_with_message(&report.summary());

            combine_csv_files(&settings.output_dir, &settings.combined_file)?;
        }

        Commands::Combine {
            input_dir,
            output_file,
        } => match combine_csv_files(&input_dir, &output_file)? {
            Some(rows) => println!("Combined {} rows into {}", rows, output_file.display()),
            None => println!("No files to combine."),
        },
    }

    Ok(())
}
