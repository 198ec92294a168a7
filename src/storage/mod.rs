//! Filesystem data directory operations.
//!
//! One tournament's data lives in flat files under the data directory:
//! - `tournament-<id>-matches.json`: provider rounds (input)
//! - `tournament-<id>-player-decks.json`: player -> archetype map
//! - `tournament-<id>-stats.json`: finalized statistics
//! - `tournament-<id>-report.json`: data-quality counters of the last run

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::calculate::AggregationReport;
use crate::models::TournamentStats;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),
}

/// Files kept per tournament.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFile {
    Matches,
    PlayerDecks,
    Stats,
    Report,
}

impl DataFile {
    fn suffix(&self) -> &'static str {
        match self {
            DataFile::Matches => "matches",
            DataFile::PlayerDecks => "player-decks",
            DataFile::Stats => "stats",
            DataFile::Report => "report",
        }
    }

    /// File name for a tournament.
    pub fn filename(&self, tournament_id: &str) -> String {
        format!("tournament-{}-{}.json", tournament_id, self.suffix())
    }
}

/// Finalized statistics with run metadata, as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsReport {
    pub tournament_id: String,
    pub computed_at: DateTime<Utc>,
    pub rounds: Vec<u32>,

    #[serde(flatten)]
    pub stats: TournamentStats,
}

impl StatsReport {
    pub fn new(tournament_id: impl Into<String>, rounds: Vec<u32>, stats: TournamentStats) -> Self {
        Self {
            tournament_id: tournament_id.into(),
            computed_at: Utc::now(),
            rounds,
            stats,
        }
    }
}

/// Configuration for storage paths.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Path of one tournament file.
    pub fn path(&self, file: DataFile, tournament_id: &str) -> PathBuf {
        self.data_dir.join(file.filename(tournament_id))
    }

    /// Read and deserialize a tournament file.
    pub fn read<T: DeserializeOwned>(
        &self,
        file: DataFile,
        tournament_id: &str,
    ) -> Result<T, StorageError> {
        read_json(&self.path(file, tournament_id))
    }

    /// Serialize and write a tournament file, replacing it.
    pub fn write<T: Serialize>(
        &self,
        file: DataFile,
        tournament_id: &str,
        value: &T,
    ) -> Result<PathBuf, StorageError> {
        let path = self.path(file, tournament_id);
        write_json(&path, value)?;
        info!("Saved {:?} to {:?}", file, path);
        Ok(path)
    }

    pub fn read_stats(&self, tournament_id: &str) -> Result<StatsReport, StorageError> {
        self.read(DataFile::Stats, tournament_id)
    }

    pub fn write_stats(&self, report: &StatsReport) -> Result<PathBuf, StorageError> {
        self.write(DataFile::Stats, &report.tournament_id, report)
    }

    pub fn write_report(
        &self,
        tournament_id: &str,
        report: &AggregationReport,
    ) -> Result<PathBuf, StorageError> {
        self.write(DataFile::Report, tournament_id, report)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("./data"))
    }
}

/// Read a JSON file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, StorageError> {
    if !path.exists() {
        return Err(StorageError::PathNotFound(path.to_path_buf()));
    }

    let file = File::open(path)?;
    let value = serde_json::from_reader(BufReader::new(file))?;
    debug!("Read {:?}", path);
    Ok(value)
}

/// Write a value as indented JSON, creating parent directories.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
