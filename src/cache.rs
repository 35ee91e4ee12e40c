//! Persisted dataset snapshot and the seven-day freshness gate.
//!
//! The snapshot is a single JSON document replaced wholesale on refresh;
//! there is no merging, versioning, or checksumming. A snapshot that is
//! missing, unreadable, or structurally wrong behaves exactly like an
//! absent one: the only externally observable outcome is the staleness
//! boolean.

use crate::error::Result;
use crate::models::TorahDatabase;
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Snapshots older than this many days are refetched.
pub const CACHE_TTL_DAYS: i64 = 7;

/// The persisted dataset bundle: payload plus its write timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheSnapshot {
    pub payload: TorahDatabase,
    /// ISO-8601 timestamp stamped at write time. Optional so a snapshot
    /// missing the field still parses and is simply treated as stale.
    #[serde(default)]
    pub last_updated: Option<String>,
}

/// Decides whether a snapshot must be refetched.
///
/// `None`, a missing timestamp, or an unparseable timestamp are always
/// stale. Otherwise the snapshot is stale once `now - last_updated` reaches
/// `threshold_days`; the boundary at exactly the threshold counts as stale.
/// Pure decision function: the caller performs any refetch and overwrite.
pub fn is_stale(
    snapshot: Option<&CacheSnapshot>,
    now: DateTime<Utc>,
    threshold_days: i64,
) -> bool {
    let Some(snapshot) = snapshot else {
        return true;
    };
    let Some(raw) = snapshot.last_updated.as_deref() else {
        debug!("Snapshot has no lastUpdated timestamp; treating as stale.");
        return true;
    };
    match DateTime::parse_from_rfc3339(raw) {
        Ok(written) => {
            let age = now.signed_duration_since(written.with_timezone(&Utc));
            age.num_days() >= threshold_days
        }
        Err(e) => {
            debug!("Unparseable lastUpdated {raw:?} ({e}); treating as stale.");
            true
        }
    }
}

/// Reads a snapshot from disk. Missing or corrupt files yield `None`; parse
/// failures are logged and swallowed, never propagated.
pub fn load_snapshot(path: &Path) -> Option<CacheSnapshot> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => {
            debug!("No readable snapshot at {path:?}: {e}");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(snapshot) => Some(snapshot),
        Err(e) => {
            warn!("Snapshot at {path:?} is corrupt ({e}); treating as absent.");
            None
        }
    }
}

/// Writes a fresh snapshot, stamping `last_updated` with the current time.
/// The file is replaced as a whole; partial updates never occur.
pub fn write_snapshot(path: &Path, payload: &TorahDatabase) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let snapshot = CacheSnapshot {
        payload: payload.clone(),
        last_updated: Some(Utc::now().to_rfc3339()),
    };
    fs::write(path, serde_json::to_vec(&snapshot)?)?;
    info!("Wrote dataset snapshot to {path:?}");
    Ok(())
}

/// Deletes the snapshot file for a forced refresh. An absent file is not an
/// error.
pub fn clear_snapshot(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path)?;
        info!("Deleted dataset snapshot at {path:?}");
    } else {
        info!("No snapshot to delete at {path:?}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Metadata;
    use chrono::Duration;
    use tempfile::tempdir;

    fn empty_database() -> TorahDatabase {
        TorahDatabase {
            books: Vec::new(),
            lexicon: crate::lexicon::Lexicon::default(),
            commentaries: Vec::new(),
            metadata: Metadata {
                total_words: 0,
                unique_words: 0,
                last_updated: None,
                sources: Vec::new(),
                version: None,
            },
        }
    }

    fn snapshot_written_at(written: DateTime<Utc>) -> CacheSnapshot {
        CacheSnapshot {
            payload: empty_database(),
            last_updated: Some(written.to_rfc3339()),
        }
    }

    #[test]
    fn absent_snapshot_is_always_stale() {
        assert!(is_stale(None, Utc::now(), CACHE_TTL_DAYS));
    }

    #[test]
    fn fresh_snapshot_is_not_stale() {
        let now = Utc::now();
        let snap = snapshot_written_at(now - Duration::days(3));
        assert!(!is_stale(Some(&snap), now, CACHE_TTL_DAYS));
    }

    #[test]
    fn eight_day_old_snapshot_is_stale() {
        let now = Utc::now();
        let snap = snapshot_written_at(now - Duration::days(8));
        assert!(is_stale(Some(&snap), now, CACHE_TTL_DAYS));
    }

    #[test]
    fn boundary_at_exactly_seven_days_is_stale() {
        let now = Utc::now();
        let snap = snapshot_written_at(now - Duration::days(7));
        assert!(is_stale(Some(&snap), now, CACHE_TTL_DAYS));
        // One second short of the threshold is still fresh.
        let almost = snapshot_written_at(now - Duration::days(7) + Duration::seconds(1));
        assert!(!is_stale(Some(&almost), now, CACHE_TTL_DAYS));
    }

    #[test]
    fn missing_timestamp_is_stale() {
        let snap = CacheSnapshot {
            payload: empty_database(),
            last_updated: None,
        };
        assert!(is_stale(Some(&snap), Utc::now(), CACHE_TTL_DAYS));
    }

    #[test]
    fn garbage_timestamp_is_stale_without_panicking() {
        let snap = CacheSnapshot {
            payload: empty_database(),
            last_updated: Some("not-a-date".into()),
        };
        assert!(is_stale(Some(&snap), Utc::now(), CACHE_TTL_DAYS));
    }

    #[test]
    fn load_snapshot_missing_file_is_none() {
        let dir = tempdir().unwrap();
        assert!(load_snapshot(&dir.path().join("nope.json")).is_none());
    }

    #[test]
    fn load_snapshot_corrupt_file_is_none() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        fs::write(&path, "{ this is not json").unwrap();
        assert!(load_snapshot(&path).is_none());
        fs::write(&path, r#"{"wrong": "shape"}"#).unwrap();
        assert!(load_snapshot(&path).is_none());
    }

    #[test]
    fn write_then_load_roundtrip_is_fresh() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        write_snapshot(&path, &empty_database()).unwrap();
        let snap = load_snapshot(&path).expect("snapshot should load back");
        assert!(!is_stale(Some(&snap), Utc::now(), CACHE_TTL_DAYS));
        assert_eq!(snap.payload, empty_database());
    }

    #[test]
    fn write_overwrites_wholesale() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        fs::write(&path, "old garbage").unwrap();
        write_snapshot(&path, &empty_database()).unwrap();
        assert!(load_snapshot(&path).is_some());
    }

    #[test]
    fn clear_snapshot_tolerates_absent_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        assert!(clear_snapshot(&path).is_ok());
        write_snapshot(&path, &empty_database()).unwrap();
        assert!(clear_snapshot(&path).is_ok());
        assert!(!path.exists());
    }
}
