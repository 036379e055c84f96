//! SQLite save-slot store.
//!
//! Snapshots are serialised to JSON and stored in a single table of slots:
//!
//! ```sql
//! CREATE TABLE IF NOT EXISTS save_slots (
//!     slot         TEXT PRIMARY KEY,
//!     name         TEXT,
//!     session_id   TEXT NOT NULL,
//!     turn         INTEGER NOT NULL,
//!     room         TEXT NOT NULL,
//!     play_time_ms INTEGER NOT NULL,
//!     data         BLOB NOT NULL,
//!     saved_at     TEXT NOT NULL,
//!     checksum     TEXT
//! );
//! ```
//!
//! The metadata columns exist so slot listings never decode full blobs.
//! JSON inside a BLOB keeps the schema stable across snapshot-field
//! changes; an optional CRC-32 checksum detects save corruption (mismatch
//! logs a warning but the data still loads); backups go through SQLite's
//! online-backup API.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::Utc;
use rusqlite::{params, Connection, OpenFlags};
use tracing::{debug, info, warn};

use crate::config::PersistenceConfig;
use crate::error::{Result, SynapseError};
use crate::snapshot::Snapshot;

// ---------------------------------------------------------------------------
// CRC-32 checksum helper
// ---------------------------------------------------------------------------

/// CRC-32 of `data` as a lowercase hex string.
fn crc32_hex(data: &[u8]) -> String {
    let crc = crc32_compute(data);
    format!("{crc:08x}")
}

/// Basic CRC-32 (ISO 3309 / ITU-T V.42) computation.
fn crc32_compute(data: &[u8]) -> u32 {
    const POLY: u32 = 0xEDB8_8320;
    let mut crc: u32 = 0xFFFF_FFFF;
    for &byte in data {
        crc ^= u32::from(byte);
        for _ in 0..8 {
            if crc & 1 == 1 {
                crc = (crc >> 1) ^ POLY;
            } else {
                crc >>= 1;
            }
        }
    }
    !crc
}

// ---------------------------------------------------------------------------
// Slots
// ---------------------------------------------------------------------------

/// Address of one save slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveSlot {
    /// Player-managed slot, `0..max_slots`.
    Numbered(u8),
    /// Reserved slot written by the quicksave action.
    Quicksave,
    /// Reserved slot written by the autosave timer.
    Autosave,
}

impl SaveSlot {
    fn key(self) -> String {
        match self {
            SaveSlot::Numbered(n) => format!("slot_{n}"),
            SaveSlot::Quicksave => "quicksave".to_string(),
            SaveSlot::Autosave => "autosave".to_string(),
        }
    }

    fn parse(key: &str) -> Option<Self> {
        match key {
            "quicksave" => Some(SaveSlot::Quicksave),
            "autosave" => Some(SaveSlot::Autosave),
            _ => key
                .strip_prefix("slot_")
                .and_then(|n| n.parse().ok())
                .map(SaveSlot::Numbered),
        }
    }
}

impl std::fmt::Display for SaveSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaveSlot::Numbered(n) => write!(f, "slot {n}"),
            SaveSlot::Quicksave => f.write_str("quicksave"),
            SaveSlot::Autosave => f.write_str("autosave"),
        }
    }
}

/// What a slot listing shows without decoding the snapshot blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotMetadata {
    /// Player-facing save name, if one was given.
    pub name: Option<String>,
    /// Session the save belongs to.
    pub session_id: String,
    /// Turn counter at save time.
    pub turn: u64,
    /// Room the player was in.
    pub room: String,
    /// Accumulated play time in milliseconds.
    pub play_time_ms: u64,
    /// RFC-3339 save timestamp.
    pub saved_at: String,
}

/// Usage summary across all slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveStats {
    /// Occupied slots, reserved ones included.
    pub used: usize,
    /// Configured numbered-slot count.
    pub numbered_slots: u8,
    /// Timestamp of the oldest save, if any.
    pub oldest: Option<String>,
    /// Timestamp of the newest save, if any.
    pub newest: Option<String>,
}

// ---------------------------------------------------------------------------
// SaveStore
// ---------------------------------------------------------------------------

/// Handle to an open SQLite database of save slots.
///
/// # Usage
///
/// ```no_run
/// # use synapse_core::persistence::{SaveStore, SaveSlot};
/// # use synapse_core::config::PersistenceConfig;
/// let store = SaveStore::open("saves.db", &PersistenceConfig::default())?;
/// if let Some(snapshot) = store.load_slot(SaveSlot::Quicksave)? {
///     println!("turn {}", snapshot.state.turn_counter);
/// }
/// # Ok::<(), synapse_core::error::SynapseError>(())
/// ```
pub struct SaveStore {
    conn: Connection,
    config: PersistenceConfig,
    db_path: PathBuf,
}

impl std::fmt::Debug for SaveStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SaveStore")
            .field("db_path", &self.db_path)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS save_slots (
    slot         TEXT PRIMARY KEY,
    name         TEXT,
    session_id   TEXT NOT NULL,
    turn         INTEGER NOT NULL,
    room         TEXT NOT NULL,
    play_time_ms INTEGER NOT NULL,
    data         BLOB NOT NULL,
    saved_at     TEXT NOT NULL,
    checksum     TEXT
);";

impl SaveStore {
    /// Open (or create) the save database at `path`.
    ///
    /// # Errors
    /// Returns [`SynapseError::Database`] on SQLite failures.
    pub fn open<P: AsRef<Path>>(path: P, config: &PersistenceConfig) -> Result<Self> {
        let db_path = path.as_ref().to_path_buf();
        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_CREATE
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;

        let conn = Connection::open_with_flags(&db_path, flags)?;

        conn.execute_batch("PRAGMA journal_mode = WAL;")?;
        conn.execute_batch("PRAGMA synchronous = NORMAL;")?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.execute_batch("PRAGMA busy_timeout = 5000;")?;
        conn.execute_batch(SCHEMA)?;

        info!(
            path = %db_path.display(),
            slots = config.max_slots,
            "save store opened"
        );

        Ok(Self {
            conn,
            config: config.clone(),
            db_path,
        })
    }

    /// Open an in-memory database (useful for tests).
    ///
    /// # Errors
    /// Returns [`SynapseError::Database`] on SQLite failures.
    pub fn open_in_memory(config: &PersistenceConfig) -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn,
            config: config.clone(),
            db_path: PathBuf::from(":memory:"),
        })
    }

    fn check_slot(&self, slot: SaveSlot) -> Result<()> {
        if let SaveSlot::Numbered(n) = slot {
            if n >= self.config.max_slots {
                return Err(SynapseError::SlotOutOfRange {
                    slot: n,
                    max: self.config.max_slots,
                });
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Core CRUD
    // ------------------------------------------------------------------

    /// Save (upsert) a snapshot into a slot.
    ///
    /// The snapshot is serialised to JSON; if `config.verify_checksums` is
    /// set, a CRC-32 of the bytes is stored alongside.
    ///
    /// # Errors
    /// [`SynapseError::SlotOutOfRange`] for a numbered slot past the limit,
    /// [`SynapseError::Serialization`] if encoding fails, or
    /// [`SynapseError::Database`] on SQLite failures.
    pub fn save_slot(&self, slot: SaveSlot, snapshot: &Snapshot) -> Result<()> {
        self.check_slot(slot)?;
        let start = Instant::now();

        let json =
            serde_json::to_vec(snapshot).map_err(|e| SynapseError::Serialization(e.to_string()))?;
        let checksum = if self.config.verify_checksums {
            Some(crc32_hex(&json))
        } else {
            None
        };
        let now = Utc::now().to_rfc3339();

        self.conn.execute(
            "INSERT INTO save_slots
                (slot, name, session_id, turn, room, play_time_ms, data, saved_at, checksum)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
             ON CONFLICT(slot) DO UPDATE SET
                name = excluded.name,
                session_id = excluded.session_id,
                turn = excluded.turn,
                room = excluded.room,
                play_time_ms = excluded.play_time_ms,
                data = excluded.data,
                saved_at = excluded.saved_at,
                checksum = excluded.checksum",
            params![
                slot.key(),
                snapshot.name,
                snapshot.state.session.to_string(),
                snapshot.state.turn_counter as i64,
                snapshot.state.current_room.as_str(),
                snapshot.state.play_time_ms as i64,
                json,
                now,
                checksum
            ],
        )?;

        debug!(
            %slot,
            turn = snapshot.state.turn_counter,
            bytes = json.len(),
            elapsed_us = start.elapsed().as_micros(),
            "snapshot saved"
        );
        Ok(())
    }

    /// Load the snapshot in a slot, or `None` for an empty slot.
    ///
    /// A checksum mismatch logs a warning but the data still loads; the
    /// snapshot is validated before it is returned.
    ///
    /// # Errors
    /// [`SynapseError::Serialization`] on a decode failure,
    /// [`SynapseError::Database`] on SQLite failures, plus anything
    /// [`Snapshot::validate`] rejects.
    pub fn load_slot(&self, slot: SaveSlot) -> Result<Option<Snapshot>> {
        self.check_slot(slot)?;
        let start = Instant::now();

        let mut stmt = self
            .conn
            .prepare_cached("SELECT data, checksum FROM save_slots WHERE slot = ?1")?;
        let row: Option<(Vec<u8>, Option<String>)> = stmt
            .query_row(params![slot.key()], |row| Ok((row.get(0)?, row.get(1)?)))
            .optional()?;

        let Some((data, stored_checksum)) = row else {
            return Ok(None);
        };

        if self.config.verify_checksums {
            if let Some(ref expected) = stored_checksum {
                let actual = crc32_hex(&data);
                if *expected != actual {
                    warn!(
                        %slot,
                        expected = %expected,
                        actual = %actual,
                        "checksum mismatch, possible save corruption"
                    );
                }
            }
        }

        let snapshot: Snapshot = serde_json::from_slice(&data)
            .map_err(|e| SynapseError::Serialization(e.to_string()))?;
        snapshot.validate()?;

        debug!(
            %slot,
            turn = snapshot.state.turn_counter,
            elapsed_us = start.elapsed().as_micros(),
            "snapshot loaded"
        );
        Ok(Some(snapshot))
    }

    /// Autosave into the reserved slot. No-op returning `false` when the
    /// autosave interval is configured to zero.
    ///
    /// # Errors
    /// Same as [`SaveStore::save_slot`].
    pub fn autosave(&self, snapshot: &Snapshot) -> Result<bool> {
        if self.config.autosave_interval_secs == 0 {
            debug!("autosave disabled, skipping");
            return Ok(false);
        }
        self.save_slot(SaveSlot::Autosave, snapshot)?;
        Ok(true)
    }

    /// Delete a slot. Returns `true` if a save was actually removed.
    ///
    /// # Errors
    /// Returns [`SynapseError::Database`] on SQLite failures.
    pub fn delete_slot(&self, slot: SaveSlot) -> Result<bool> {
        self.check_slot(slot)?;
        let deleted = self
            .conn
            .execute("DELETE FROM save_slots WHERE slot = ?1", params![slot.key()])?;
        Ok(deleted > 0)
    }

    /// Delete every save, reserved slots included.
    ///
    /// # Errors
    /// Returns [`SynapseError::Database`] on SQLite failures.
    pub fn clear_all(&self) -> Result<usize> {
        let deleted = self.conn.execute("DELETE FROM save_slots", [])?;
        info!(deleted, "all save slots cleared");
        Ok(deleted)
    }

    /// Number of occupied slots.
    ///
    /// # Errors
    /// Returns [`SynapseError::Database`] on SQLite failures.
    pub fn used_count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM save_slots", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    // ------------------------------------------------------------------
    // Listings
    // ------------------------------------------------------------------

    /// Metadata for every slot, empty ones marked with `None`. Numbered
    /// slots come first in order, then quicksave, then autosave.
    ///
    /// # Errors
    /// Returns [`SynapseError::Database`] on SQLite failures.
    pub fn list_slots(&self) -> Result<Vec<(SaveSlot, Option<SlotMetadata>)>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT slot, name, session_id, turn, room, play_time_ms, saved_at FROM save_slots",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                SlotMetadata {
                    name: row.get(1)?,
                    session_id: row.get(2)?,
                    turn: row.get::<_, i64>(3)? as u64,
                    room: row.get(4)?,
                    play_time_ms: row.get::<_, i64>(5)? as u64,
                    saved_at: row.get(6)?,
                },
            ))
        })?;

        let mut by_key = BTreeMap::new();
        for row in rows {
            let (key, metadata) = row?;
            if SaveSlot::parse(&key).is_some() {
                by_key.insert(key, metadata);
            } else {
                warn!(key = %key, "skipping row with unrecognized slot key");
            }
        }

        let mut listing = Vec::with_capacity(usize::from(self.config.max_slots) + 2);
        for n in 0..self.config.max_slots {
            let slot = SaveSlot::Numbered(n);
            listing.push((slot, by_key.remove(&slot.key())));
        }
        for slot in [SaveSlot::Quicksave, SaveSlot::Autosave] {
            listing.push((slot, by_key.remove(&slot.key())));
        }
        Ok(listing)
    }

    /// Load the most recently written save, wherever it lives.
    ///
    /// # Errors
    /// Same as [`SaveStore::load_slot`].
    pub fn load_latest(&self) -> Result<Option<(SaveSlot, Snapshot)>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT slot FROM save_slots ORDER BY saved_at DESC, rowid DESC LIMIT 1",
        )?;
        let key: Option<String> = stmt.query_row([], |row| row.get(0)).optional()?;
        let Some(key) = key else {
            return Ok(None);
        };
        let Some(slot) = SaveSlot::parse(&key) else {
            warn!(key = %key, "latest save has an unrecognized slot key");
            return Ok(None);
        };
        Ok(self.load_slot(slot)?.map(|snapshot| (slot, snapshot)))
    }

    /// Usage summary: occupied count plus oldest/newest timestamps.
    ///
    /// # Errors
    /// Returns [`SynapseError::Database`] on SQLite failures.
    pub fn save_stats(&self) -> Result<SaveStats> {
        let (used, oldest, newest): (i64, Option<String>, Option<String>) = self.conn.query_row(
            "SELECT COUNT(*), MIN(saved_at), MAX(saved_at) FROM save_slots",
            [],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )?;
        Ok(SaveStats {
            used: used as usize,
            numbered_slots: self.config.max_slots,
            oldest,
            newest,
        })
    }

    // ------------------------------------------------------------------
    // Backup
    // ------------------------------------------------------------------

    /// Back up the database to `dest_path` with SQLite's online-backup
    /// API; safe while the database is in use.
    ///
    /// # Errors
    /// Returns [`SynapseError::Database`] on SQLite failures, or
    /// [`SynapseError::Io`] if the destination is not writable.
    pub fn backup<P: AsRef<Path>>(&self, dest_path: P) -> Result<()> {
        let start = Instant::now();
        let mut dest = Connection::open(dest_path.as_ref())?;
        let backup = rusqlite::backup::Backup::new(&self.conn, &mut dest)?;
        backup.run_to_completion(256, std::time::Duration::from_millis(50), None)?;

        info!(
            dest = %dest_path.as_ref().display(),
            elapsed_ms = start.elapsed().as_millis(),
            "save database backup completed"
        );
        Ok(())
    }

    /// Create a numbered backup alongside the database file, rotating old
    /// backups so that at most `config.backup_count` are kept.
    ///
    /// # Errors
    /// Returns [`SynapseError::Database`] or [`SynapseError::Io`] on failure.
    pub fn create_rotating_backup(&self) -> Result<()> {
        if self.db_path.as_os_str() == ":memory:" {
            return Ok(());
        }
        let max = self.config.backup_count;
        if max == 0 {
            return Ok(());
        }

        // Rotate existing backups, highest first so nothing is overwritten.
        for i in (1..max).rev() {
            let src = self.backup_path(i);
            let dst = self.backup_path(i + 1);
            if src.exists() {
                std::fs::rename(&src, &dst)?;
            }
        }
        let oldest = self.backup_path(max + 1);
        if oldest.exists() {
            std::fs::remove_file(&oldest)?;
        }
        self.backup(self.backup_path(1))?;

        info!(max_backups = max, "rotating backup created");
        Ok(())
    }

    /// Path to a numbered backup file (e.g. `saves.db.bak.1`).
    fn backup_path(&self, n: u32) -> PathBuf {
        let mut p = self.db_path.clone();
        let ext = format!(
            "{}.bak.{n}",
            p.extension()
                .map_or(String::new(), |e| e.to_string_lossy().into_owned())
        );
        p.set_extension(ext);
        p
    }

    // ------------------------------------------------------------------
    // Utility
    // ------------------------------------------------------------------

    /// Path to the database file (`:memory:` for in-memory stores).
    #[must_use]
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Run SQLite's integrity check. `Ok(false)` means corruption.
    ///
    /// # Errors
    /// Returns [`SynapseError::Database`] if the check itself fails.
    pub fn integrity_check(&self) -> Result<bool> {
        let result: String = self
            .conn
            .query_row("PRAGMA integrity_check", [], |row| row.get(0))?;
        Ok(result == "ok")
    }

    /// Reclaim unused space by running `VACUUM`.
    ///
    /// # Errors
    /// Returns [`SynapseError::Database`] on SQLite failures.
    pub fn vacuum(&self) -> Result<()> {
        self.conn.execute_batch("VACUUM;")?;
        Ok(())
    }
}

/// Extension trait that adds an `.optional()` combinator to `rusqlite::Result`,
/// converting `Err(QueryReturnedNoRows)` into `Ok(None)`.
trait OptionalExt<T> {
    /// Convert `QueryReturnedNoRows` into `Ok(None)`.
    fn optional(self) -> std::result::Result<Option<T>, rusqlite::Error>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> std::result::Result<Option<T>, rusqlite::Error> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::achievements::AchievementEngine;
    use crate::narrative::NarrativeEngine;
    use crate::personality::PersonalityState;
    use crate::snapshot::{ResponsePacing, SNAPSHOT_VERSION};
    use crate::state::GameState;
    use crate::stats::Statistics;
    use crate::types::{ItemId, RoomId, SessionId};

    fn test_config() -> PersistenceConfig {
        PersistenceConfig {
            verify_checksums: true,
            ..PersistenceConfig::default()
        }
    }

    fn sample_snapshot(turn: u64) -> Snapshot {
        let mut state = GameState::new(SessionId::new(), RoomId::new("entrance"));
        state.turn_counter = turn;
        state.sanity = 70;
        state.awareness = 35;
        state.add_item(ItemId::new("security_keycard"));
        Snapshot {
            version: SNAPSHOT_VERSION,
            saved_at: Utc::now().to_rfc3339(),
            name: Some(format!("turn {turn}")),
            state,
            personality: PersonalityState::new(),
            statistics: Statistics::new(),
            narrative: NarrativeEngine::new(),
            achievements: AchievementEngine::new(),
            response: ResponsePacing::default(),
        }
    }

    #[test]
    fn round_trip_save_load() {
        let store = SaveStore::open_in_memory(&test_config()).expect("open");
        let snapshot = sample_snapshot(12);

        store.save_slot(SaveSlot::Numbered(0), &snapshot).expect("save");
        let loaded = store
            .load_slot(SaveSlot::Numbered(0))
            .expect("load")
            .expect("Some");
        assert_eq!(loaded, snapshot);
    }

    #[test]
    fn load_empty_slot_returns_none() {
        let store = SaveStore::open_in_memory(&test_config()).expect("open");
        assert!(store.load_slot(SaveSlot::Numbered(3)).expect("load").is_none());
    }

    #[test]
    fn upsert_overwrites_the_slot() {
        let store = SaveStore::open_in_memory(&test_config()).expect("open");
        store
            .save_slot(SaveSlot::Numbered(0), &sample_snapshot(5))
            .expect("save1");
        store
            .save_slot(SaveSlot::Numbered(0), &sample_snapshot(9))
            .expect("save2");

        let loaded = store
            .load_slot(SaveSlot::Numbered(0))
            .expect("load")
            .expect("Some");
        assert_eq!(loaded.state.turn_counter, 9, "reflects the second save");
        assert_eq!(store.used_count().expect("count"), 1);
    }

    #[test]
    fn reserved_slots_are_separate_from_numbered() {
        let store = SaveStore::open_in_memory(&test_config()).expect("open");
        store
            .save_slot(SaveSlot::Numbered(0), &sample_snapshot(1))
            .expect("save");
        store
            .save_slot(SaveSlot::Quicksave, &sample_snapshot(2))
            .expect("quicksave");
        store.autosave(&sample_snapshot(3)).expect("autosave");

        assert_eq!(store.used_count().expect("count"), 3);
        let quick = store
            .load_slot(SaveSlot::Quicksave)
            .expect("load")
            .expect("Some");
        assert_eq!(quick.state.turn_counter, 2);
    }

    #[test]
    fn slot_past_the_limit_is_rejected() {
        let store = SaveStore::open_in_memory(&test_config()).expect("open");
        let err = store
            .save_slot(SaveSlot::Numbered(10), &sample_snapshot(1))
            .expect_err("must fail");
        assert!(matches!(
            err,
            SynapseError::SlotOutOfRange { slot: 10, max: 10 }
        ));
    }

    #[test]
    fn autosave_is_a_noop_when_disabled() {
        let mut config = test_config();
        config.autosave_interval_secs = 0;
        let store = SaveStore::open_in_memory(&config).expect("open");
        assert!(!store.autosave(&sample_snapshot(1)).expect("autosave"));
        assert_eq!(store.used_count().expect("count"), 0);
    }

    #[test]
    fn listing_marks_empty_slots() {
        let store = SaveStore::open_in_memory(&test_config()).expect("open");
        store
            .save_slot(SaveSlot::Numbered(2), &sample_snapshot(7))
            .expect("save");

        let listing = store.list_slots().expect("list");
        // 10 numbered plus quicksave and autosave.
        assert_eq!(listing.len(), 12);
        assert!(listing[0].1.is_none());
        let occupied = listing[2].1.as_ref().expect("slot 2 occupied");
        assert_eq!(occupied.turn, 7);
        assert_eq!(occupied.room, "entrance");
        assert_eq!(occupied.name.as_deref(), Some("turn 7"));
        assert!(listing[10].1.is_none(), "quicksave empty");
        assert!(listing[11].1.is_none(), "autosave empty");
    }

    #[test]
    fn load_latest_picks_the_newest_save() {
        let store = SaveStore::open_in_memory(&test_config()).expect("open");
        store
            .save_slot(SaveSlot::Numbered(0), &sample_snapshot(5))
            .expect("save");
        store
            .save_slot(SaveSlot::Quicksave, &sample_snapshot(8))
            .expect("save");

        let (slot, snapshot) = store.load_latest().expect("load").expect("Some");
        assert_eq!(slot, SaveSlot::Quicksave);
        assert_eq!(snapshot.state.turn_counter, 8);
    }

    #[test]
    fn load_latest_on_empty_store_is_none() {
        let store = SaveStore::open_in_memory(&test_config()).expect("open");
        assert!(store.load_latest().expect("load").is_none());
    }

    #[test]
    fn checksum_mismatch_still_loads() {
        let store = SaveStore::open_in_memory(&test_config()).expect("open");
        store
            .save_slot(SaveSlot::Numbered(0), &sample_snapshot(4))
            .expect("save");

        store
            .conn
            .execute(
                "UPDATE save_slots SET checksum = 'deadbeef' WHERE slot = 'slot_0'",
                [],
            )
            .expect("corrupt checksum");

        // Load succeeds; the mismatch only logs a warning.
        let loaded = store
            .load_slot(SaveSlot::Numbered(0))
            .expect("load")
            .expect("Some");
        assert_eq!(loaded.state.turn_counter, 4);
    }

    #[test]
    fn corrupt_blob_is_a_serialization_error() {
        let store = SaveStore::open_in_memory(&test_config()).expect("open");
        store
            .save_slot(SaveSlot::Numbered(0), &sample_snapshot(4))
            .expect("save");
        store
            .conn
            .execute(
                "UPDATE save_slots SET data = x'00ff00ff' WHERE slot = 'slot_0'",
                [],
            )
            .expect("corrupt blob");

        let err = store.load_slot(SaveSlot::Numbered(0)).expect_err("must fail");
        assert!(matches!(err, SynapseError::Serialization(_)));
    }

    #[test]
    fn delete_and_clear_all() {
        let store = SaveStore::open_in_memory(&test_config()).expect("open");
        store
            .save_slot(SaveSlot::Numbered(0), &sample_snapshot(1))
            .expect("save");
        store
            .save_slot(SaveSlot::Numbered(1), &sample_snapshot(2))
            .expect("save");

        assert!(store.delete_slot(SaveSlot::Numbered(0)).expect("delete"));
        assert!(!store.delete_slot(SaveSlot::Numbered(0)).expect("delete again"));
        assert_eq!(store.clear_all().expect("clear"), 1);
        assert_eq!(store.used_count().expect("count"), 0);
    }

    #[test]
    fn save_stats_reports_usage() {
        let store = SaveStore::open_in_memory(&test_config()).expect("open");
        let empty = store.save_stats().expect("stats");
        assert_eq!(empty.used, 0);
        assert!(empty.oldest.is_none());

        store
            .save_slot(SaveSlot::Numbered(0), &sample_snapshot(1))
            .expect("save");
        store
            .save_slot(SaveSlot::Numbered(1), &sample_snapshot(2))
            .expect("save");
        let stats = store.save_stats().expect("stats");
        assert_eq!(stats.used, 2);
        assert_eq!(stats.numbered_slots, 10);
        assert!(stats.oldest.is_some());
        assert!(stats.newest.is_some());
    }

    #[test]
    fn file_based_open_and_backup() {
        let dir = tempfile::tempdir().expect("tempdir");
        let db_path = dir.path().join("saves.db");
        let config = test_config();

        let store = SaveStore::open(&db_path, &config).expect("open");
        store
            .save_slot(SaveSlot::Numbered(0), &sample_snapshot(21))
            .expect("save");

        let backup_path = dir.path().join("saves_backup.db");
        store.backup(&backup_path).expect("backup");

        let restored = SaveStore::open(&backup_path, &config).expect("open backup");
        let loaded = restored
            .load_slot(SaveSlot::Numbered(0))
            .expect("load from backup")
            .expect("Some");
        assert_eq!(loaded.state.turn_counter, 21);
    }

    #[test]
    fn rotating_backups_keep_at_most_the_limit() {
        let dir = tempfile::tempdir().expect("tempdir");
        let db_path = dir.path().join("saves.db");
        let mut config = test_config();
        config.backup_count = 2;

        let store = SaveStore::open(&db_path, &config).expect("open");
        store
            .save_slot(SaveSlot::Numbered(0), &sample_snapshot(1))
            .expect("save");

        store.create_rotating_backup().expect("backup 1");
        store.create_rotating_backup().expect("backup 2");
        store.create_rotating_backup().expect("backup 3");

        assert!(dir.path().join("saves.db.bak.1").exists());
        assert!(dir.path().join("saves.db.bak.2").exists());
        assert!(!dir.path().join("saves.db.bak.3").exists());
    }

    #[test]
    fn integrity_check_passes() {
        let store = SaveStore::open_in_memory(&test_config()).expect("open");
        assert!(store.integrity_check().expect("check"));
    }

    #[test]
    fn slot_keys_round_trip() {
        for slot in [
            SaveSlot::Numbered(0),
            SaveSlot::Numbered(9),
            SaveSlot::Quicksave,
            SaveSlot::Autosave,
        ] {
            assert_eq!(SaveSlot::parse(&slot.key()), Some(slot));
        }
        assert_eq!(SaveSlot::parse("slot_x"), None);
        assert_eq!(SaveSlot::parse("bogus"), None);
    }
}
