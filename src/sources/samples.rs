//! Bundled Alpha Vantage responses on disk.

use std::io::ErrorKind;
use std::path::PathBuf;

use tracing::debug;

use crate::error::{AppError, Result};
use crate::types::{Granularity, Interval};

use super::alphavantage;

/// Reads `{dir}/{symbol}-{granularity}.json` files.
#[derive(Debug, Clone)]
pub struct SampleFiles {
    dir: PathBuf,
}

impl SampleFiles {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the sample file for a symbol, lower-cased.
    pub fn path_for(&self, symbol: &str, granularity: Granularity) -> PathBuf {
        self.dir
            .join(format!("{}-{}.json", symbol.to_lowercase(), granularity))
    }

    pub async fn fetch(&self, symbol: &str, granularity: Granularity) -> Result<Vec<Interval>> {
        let path = self.path_for(symbol, granularity);
        debug!("Reading sample data from {}", path.display());

        let body = tokio::fs::read_to_string(&path).await.map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                AppError::NotFound(format!("No {} data for {}", granularity, symbol.to_uppercase()))
            } else {
                AppError::Io(e)
            }
        })?;

        alphavantage::translate(&body)
    }

    /// Symbols with at least one sample file, upper-cased and sorted.
    pub async fn symbols(&self) -> Result<Vec<String>> {
        let mut entries = tokio::fs::read_dir(&self.dir).await?;
        let mut symbols = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name();
            let Some(stem) = name.to_str().and_then(|n| n.strip_suffix(".json")) else {
                continue;
            };
            if let Some((symbol, _)) = stem.rsplit_once('-') {
                symbols.push(symbol.to_uppercase());
            }
        }

        symbols.sort();
        symbols.dedup();
        Ok(symbols)
    }
}
