use crate::acquisition::fetch::HttpFetch;
use crate::error::Result;
use crate::settings::{DownloadSettings, PollutantCode};
use crate::utils::constants::EPA_DAILY_PROGRAM;
use crate::utils::filename::pollutant_year_filename;
use regex::Regex;
use std::path::PathBuf;
use tracing::{info, warn};

/// Outcome of one downloader run
#[derive(Debug, Clone, Default)]
pub struct DownloadReport {
    pub saved: Vec<PathBuf>,
    pub missing_links: Vec<(String, i32)>,
    pub failed_fetches: Vec<(String, i32)>,
    pub empty_exports: Vec<(String, i32)>,
}

impl DownloadReport {
    pub fn summary(&self) -> String {
        format!(
            "Saved {} file(s); {} request(s) without a download link; {} failed fetch(es); {} empty export(s)",
            self.saved.len(),
            self.missing_links.len(),
            self.failed_fetches.len(),
            self.empty_exports.len()
        )
    }
}

/// Scrapes AirNow daily CSV exports from the EPA data broker.
///
/// The broker answers a query with an HTML page; the CSV itself sits behind
/// the first `https://www3.epa.gov` link on that page.
pub struct EpaDownloader<'a, F: HttpFetch> {
    fetcher: &'a F,
    settings: &'a DownloadSettings,
    link_pattern: Regex,
}

impl<'a, F: HttpFetch> EpaDownloader<'a, F> {
    pub fn new(fetcher: &'a F, settings: &'a DownloadSettings) -> Result<Self> {
        Ok(Self {
            fetcher,
            settings,
            link_pattern: Regex::new(r#"href="(https://www3\.epa\.gov[^"]+)""#)?,
        })
    }

    /// Broker query URL for one pollutant and year
    pub fn query_url(&self, pollutant: &PollutantCode, year: i32) -> String {
        format!(
            "{}?_service=data&_debug=0&_program={}&poll={}&year={}&state=-1&cbsa=-1&county={}&site=-1",
            self.settings.base_url, EPA_DAILY_PROGRAM, pollutant.code, year, self.settings.county_code
        )
    }

    /// First EPA download link in a broker response, if any
    pub fn extract_download_link<'t>(&self, html: &'t str) -> Option<&'t str> {
        self.link_pattern
            .captures(html)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    /// Fetch the CSV body for one pollutant and year
    pub async fn download(&self, pollutant: &PollutantCode, year: i32, report: &mut DownloadReport) -> Result<Option<String>> {
        let url = self.query_url(pollutant, year);
        info!("Fetching data from {}", url);

        let Some(page) = self.fetcher.fetch_text(&url).await? else {
            warn!("Failed to fetch data for {}, year {}", pollutant.name, year);
            report.failed_fetches.push((pollutant.name.clone(), year));
            return Ok(None);
        };

        let Some(link) = self.extract_download_link(&page) else {
            warn!("No download link found for {}, year {}", pollutant.name, year);
            report.missing_links.push((pollutant.name.clone(), year));
            return Ok(None);
        };
        info!("Found download link: {}", link);

        match self.fetcher.fetch_text(link).await? {
            None => {
                report.failed_fetches.push((pollutant.name.clone(), year));
                Ok(None)
            }
            Some(data) if data.is_empty() => {
                warn!("Empty export for {}, year {}", pollutant.name, year);
                report.empty_exports.push((pollutant.name.clone(), year));
                Ok(None)
            }
            Some(data) => Ok(Some(data)),
        }
    }

    /// Download every configured pollutant for every configured year
    pub async fn run(&self) -> Result<DownloadReport> {
        let mut report = DownloadReport::default();
        std::fs::create_dir_all(&self.settings.output_dir)?;

        for pollutant in &self.settings.pollutants {
            info!("Processing pollutant: {}", pollutant.name);
            for year in self.settings.start_year..=self.settings.end_year {
                info!("Fetching data for year {}", year);
                if let Some(data) = self.download(pollutant, year, &mut report).await? {
                    let path = pollutant_year_filename(&self.settings.output_dir, &pollutant.name, year);
                    std::fs::write(&path, data)?;
                    info!("Saved data for {}, year {} to {}", pollutant.name, year, path.display());
                    report.saved.push(path);
                }
            }
        }

        Ok(report)
    }
}
