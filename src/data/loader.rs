use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use super::error::LoadError;
use super::model::Dataset;
use super::sanitize::sanitize_table;
use super::schema::{RawTable, Schema, validate};
use crate::config::DashboardConfig;

// ---------------------------------------------------------------------------
// Data source
// ---------------------------------------------------------------------------

/// Where the salary CSV comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Remote(String),
    File(PathBuf),
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Remote(url) => write!(f, "{url}"),
            DataSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

// ---------------------------------------------------------------------------
// DataLoader – fetch once, hand out a shared read-only handle
// ---------------------------------------------------------------------------

/// Loads and caches one dataset.
///
/// The first successful [`load`](Self::load) is kept; later calls return the
/// same `Arc` without touching the source. Failures are never cached.
#[derive(Debug)]
pub struct DataLoader {
    source: DataSource,
    timeout: Duration,
    max_text_len: usize,
    cached: Option<Arc<Dataset>>,
}

impl DataLoader {
    pub fn new(source: DataSource, config: &DashboardConfig) -> Self {
        Self {
            source,
            timeout: config.fetch_timeout,
            max_text_len: config.max_text_len,
            cached: None,
        }
    }

    /// Loader for the configured remote URL.
    pub fn remote(config: &DashboardConfig) -> Self {
        Self::new(DataSource::Remote(config.source_url.clone()), config)
    }

    pub fn source(&self) -> &DataSource {
        &self.source
    }

    #[cfg(test)]
    pub fn cached(&self) -> Option<Arc<Dataset>> {
        self.cached.clone()
    }

    /// Return the cached dataset, fetching it on first use.
    pub fn load(&mut self) -> Result<Arc<Dataset>, LoadError> {
        if let Some(ds) = &self.cached {
            log::debug!("Dataset cache hit for {}", self.source);
            return Ok(Arc::clone(ds));
        }

        let dataset = Arc::new(self.fetch_and_build()?);
        log::info!(
            "Loaded {} salary records from {}",
            dataset.len(),
            self.source
        );
        self.cached = Some(Arc::clone(&dataset));
        Ok(dataset)
    }

    /// Drop the cached dataset and load again, returning a fresh handle.
    /// Handles returned earlier stay valid and unchanged.
    pub fn reload(&mut self) -> Result<Arc<Dataset>, LoadError> {
        log::info!("Reloading dataset from {}", self.source);
        self.cached = None;
        self.load()
    }

    fn fetch_and_build(&self) -> Result<Dataset, LoadError> {
        let fetch_err = |source: Box<dyn std::error::Error + Send + Sync>| LoadError::Fetch {
            location: self.source.to_string(),
            source,
        };

        match &self.source {
            DataSource::Remote(url) => {
                let body = fetch_remote(url, self.timeout).map_err(|e| fetch_err(e.into()))?;
                load_from_reader(body.as_slice(), self.max_text_len)
            }
            DataSource::File(path) => {
                let file = File::open(path).map_err(|e| fetch_err(e.into()))?;
                load_from_reader(file, self.max_text_len)
            }
        }
    }
}

/// Download the whole body before any parsing starts.
fn fetch_remote(url: &str, timeout: Duration) -> Result<Vec<u8>, reqwest::Error> {
    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()?;
    let response = client.get(url).send()?.error_for_status()?;
    Ok(response.bytes()?.to_vec())
}

// ---------------------------------------------------------------------------
// Parse → validate → sanitize
// ---------------------------------------------------------------------------

/// Read CSV text into a [`RawTable`]. Rows must all have the header's width.
pub fn parse_csv<R: Read>(reader: R) -> Result<RawTable, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(reader);

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(record.iter().map(|c| c.to_string()).collect());
    }

    Ok(RawTable { headers, rows })
}

/// Run the full pipeline on CSV bytes from any reader.
pub fn load_from_reader<R: Read>(reader: R, max_text_len: usize) -> Result<Dataset, LoadError> {
    let schema = Schema::salary();
    let raw = parse_csv(reader)?;
    let table = validate(&raw, &schema)?;
    let table = sanitize_table(table, &schema.text_columns(), max_text_len);
    Dataset::from_table(&table)
}
