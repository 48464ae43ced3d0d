//! Cache manager for persisting daily menu snapshots to disk
//!
//! Provides a `MenuCache` that keeps one JSON file per calendar day and prunes
//! files older than the retention window whenever the directory is scanned.

use chrono::NaiveDate;
use directories::ProjectDirs;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::schema::{self, CacheDecodeError};
use crate::data::MenuSnapshot;

/// File name prefix of cache entries
const ENTRY_PREFIX: &str = "menu-";

/// File name suffix of cache entries
const ENTRY_SUFFIX: &str = ".json";

/// Date format embedded in entry file names
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Number of days a snapshot is kept before pruning
pub const DEFAULT_RETENTION_DAYS: i64 = 7;

/// Manages reading and writing menu snapshots
///
/// Snapshots are stored as `menu-YYYY-MM-DD.json` files in the per-user
/// configuration directory (`~/.config/ruokalista/` on Linux). At most one
/// file exists per date.
#[derive(Debug, Clone)]
pub struct MenuCache {
    /// Directory where cache files are stored
    cache_dir: PathBuf,
    /// Snapshots more than this many days before `today` are pruned
    retention_days: i64,
    /// The current calendar day
    today: NaiveDate,
}

impl MenuCache {
    /// Creates a new MenuCache using the XDG-compliant configuration directory
    ///
    /// Returns `None` if the directory cannot be determined (e.g., no home directory).
    pub fn new(today: NaiveDate) -> Option<Self> {
        let project_dirs = ProjectDirs::from("", "", "ruokalista")?;
        let cache_dir = project_dirs.config_dir().to_path_buf();
        Some(Self::with_dir(cache_dir, today))
    }

    /// Creates a new MenuCache with a custom cache directory
    pub fn with_dir(cache_dir: PathBuf, today: NaiveDate) -> Self {
        Self {
            cache_dir,
            retention_days: DEFAULT_RETENTION_DAYS,
            today,
        }
    }

    /// Overrides the retention window
    pub fn with_retention_days(mut self, retention_days: i64) -> Self {
        self.retention_days = retention_days;
        self
    }

    /// Directory holding the cache files
    pub fn dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Returns the path of the entry for `date`
    pub fn entry_path(&self, date: NaiveDate) -> PathBuf {
        self.cache_dir.join(entry_file_name(date))
    }

    /// Ensures the cache directory exists
    fn ensure_dir(&self) -> io::Result<()> {
        fs::create_dir_all(&self.cache_dir)
    }

    /// Whether a snapshot dated `date` is past the retention window
    fn is_stale(&self, date: NaiveDate) -> bool {
        (self.today - date).num_days() > self.retention_days
    }

    /// Reads the snapshot for `date`
    ///
    /// Scanning the directory prunes every entry older than the retention
    /// window, whichever date is requested. Missing, stale or undecodable
    /// entries all read as `None`.
    pub fn read(&self, date: NaiveDate) -> Option<MenuSnapshot> {
        let entries = match fs::read_dir(&self.cache_dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::debug!("cache directory {} not readable: {}", self.cache_dir.display(), e);
                return None;
            }
        };

        let mut found = None;
        for entry in entries.flatten() {
            let path = entry.path();
            let Some(entry_date) = path
                .file_name()
                .and_then(|name| name.to_str())
                .and_then(parse_entry_date)
            else {
                continue;
            };

            if self.is_stale(entry_date) {
                tracing::debug!("pruning stale cache entry {}", path.display());
                if let Err(e) = fs::remove_file(&path) {
                    tracing::warn!("Failed to prune cache entry {}: {}", path.display(), e);
                }
            } else if entry_date == date {
                found = Some(path);
            }
        }

        let path = found?;
        match load_entry(&path, date) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                tracing::warn!("Ignoring cache entry {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Writes a snapshot, replacing any entry for the same date
    ///
    /// # Returns
    /// * `Ok(())` on success
    /// * `Err` if directory creation, removal or file writing fails
    pub fn write(&self, snapshot: &MenuSnapshot) -> io::Result<()> {
        self.ensure_dir()?;

        let path = self.entry_path(snapshot.date);
        match fs::remove_file(&path) {
            Ok(()) => tracing::debug!("replaced cache entry {}", path.display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e),
        }

        let json = schema::encode(snapshot)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        fs::write(path, json)
    }
}

/// Reads and decodes the entry at `path`, which must hold the menu of `date`
fn load_entry(path: &Path, date: NaiveDate) -> Result<MenuSnapshot, CacheDecodeError> {
    let content = fs::read_to_string(path)?;
    let snapshot = schema::decode(&content)?;
    if snapshot.date != date {
        return Err(CacheDecodeError::DateMismatch {
            expected: date,
            found: snapshot.date,
        });
    }
    Ok(snapshot)
}

/// File name for the entry of `date`
pub fn entry_file_name(date: NaiveDate) -> String {
    format!("{}{}{}", ENTRY_PREFIX, date.format(DATE_FORMAT), ENTRY_SUFFIX)
}

/// Extracts the date from an entry file name, if it is one
pub fn parse_entry_date(file_name: &str) -> Option<NaiveDate> {
    let date = file_name
        .strip_prefix(ENTRY_PREFIX)?
        .strip_suffix(ENTRY_SUFFIX)?;
    NaiveDate::parse_from_str(date, DATE_FORMAT).ok()
}
