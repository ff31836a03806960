//! CSV persistence for sampled observations.
//!
//! Each analysis run is written to its own timestamped file so saved runs can
//! be listed and re-analyzed later.

use crate::error::{AppError, Result};
use crate::types::{sort_by_schedule, Observation, SampleRequest, SampledObservation};
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Stores an ordered run of observations and returns a reference to it.
pub trait ObservationStore: Send + Sync {
    fn save(&self, samples: &[SampledObservation]) -> Result<String>;
}

/// One CSV row.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ObservationRow {
    timestamp: DateTime<Utc>,
    symbol: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
    window_index: usize,
    sample_index: usize,
    percentage: f64,
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
}

impl From<&SampledObservation> for ObservationRow {
    fn from(sample: &SampledObservation) -> Self {
        let request = &sample.request;
        let obs = &sample.observation;
        Self {
            timestamp: obs.timestamp,
            symbol: request.symbol.clone(),
            open: obs.open,
            high: obs.high,
            low: obs.low,
            close: obs.close,
            volume: obs.volume,
            window_index: request.window_index,
            sample_index: request.sample_index,
            percentage: request.percentage,
            window_start: request.window_start,
            window_end: request.window_end,
        }
    }
}

impl From<ObservationRow> for SampledObservation {
    fn from(row: ObservationRow) -> Self {
        Self {
            request: SampleRequest {
                window_index: row.window_index,
                sample_index: row.sample_index,
                timestamp: row.timestamp,
                percentage: row.percentage,
                symbol: row.symbol,
                window_start: row.window_start,
                window_end: row.window_end,
            },
            observation: Observation {
                timestamp: row.timestamp,
                open: row.open,
                high: row.high,
                low: row.low,
                close: row.close,
                volume: row.volume,
            },
        }
    }
}

/// Writes one CSV file per run into a data directory.
#[derive(Debug, Clone)]
pub struct CsvStore {
    dir: PathBuf,
}

impl CsvStore {
    /// Create a store over `dir`. The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Saved CSV file names, newest first.
    pub fn list(&self) -> Result<Vec<String>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut files: Vec<String> = fs::read_dir(&self.dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "csv"))
            .filter_map(|path| path.file_name().map(|n| n.to_string_lossy().into_owned()))
            .collect();
        files.sort_unstable_by(|a, b| list_key(b).cmp(&list_key(a)));
        Ok(files)
    }

    /// Resolve a saved file name inside the data directory.
    pub fn path_of(&self, file_name: &str) -> PathBuf {
        self.dir.join(file_name)
    }

    /// Load a saved run, in schedule order.
    pub fn load(&self, path: &Path) -> Result<Vec<SampledObservation>> {
        let mut reader = csv::Reader::from_path(path)?;
        let mut samples = reader
            .deserialize::<ObservationRow>()
            .map(|row| row.map(SampledObservation::from))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        sort_by_schedule(&mut samples);
        debug!("Loaded {} observations from {}", samples.len(), path.display());
        Ok(samples)
    }

    /// Pick `<timestamp>.csv`, adding a counter if a file of that name exists.
    fn next_path(&self) -> PathBuf {
        let stem = Local::now().format("%Y-%m-%d_%H-%M-%S").to_string();
        let mut path = self.dir.join(format!("{}.csv", stem));
        let mut counter = 1;
        while path.exists() {
            path = self.dir.join(format!("{}_{}.csv", stem, counter));
            counter += 1;
        }
        path
    }
}

/// Ordering key for a saved file name: timestamp stem, then collision counter.
fn list_key(file_name: &str) -> (&str, u64) {
    let stem = file_name.strip_suffix(".csv").unwrap_or(file_name);
    match stem.rsplit_once('_') {
        Some((base, counter)) if is_counter(counter) => {
            (base, counter.parse().unwrap_or(u64::MAX))
        }
        _ => (stem, 0),
    }
}

fn is_counter(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

impl ObservationStore for CsvStore {
    fn save(&self, samples: &[SampledObservation]) -> Result<String> {
        let mut ordered = samples.to_vec();
        sort_by_schedule(&mut ordered);

        fs::create_dir_all(&self.dir).map_err(|e| {
            AppError::Storage(format!("Failed to create {}: {}", self.dir.display(), e))
        })?;

        let path = self.next_path();
        let mut writer = csv::Writer::from_path(&path)?;
        for sample in &ordered {
            writer.serialize(ObservationRow::from(sample))?;
        }
        writer.flush()?;

        info!("Saved {} observations to {}", ordered.len(), path.display());
        Ok(path.display().to_string())
    }
}
