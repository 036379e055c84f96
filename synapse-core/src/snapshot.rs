//! The snapshot boundary: one plain, serializable image of a session.
//!
//! Everything pacing-sensitive crosses here explicitly. The response rate
//! limiter's timestamp is stored as an age offset rather than an absolute
//! time, so a session restored hours later does not start with a stale
//! clock. Validation runs on every import; a snapshot from a different
//! schema version or with out-of-range stats never reaches the engine.

use serde::{Deserialize, Serialize};

use crate::achievements::AchievementEngine;
use crate::error::{Result, SynapseError};
use crate::narrative::NarrativeEngine;
use crate::personality::PersonalityState;
use crate::response::FalseMemory;
use crate::state::{GameState, STAT_MAX, STAT_MIN};
use crate::stats::Statistics;

/// Current snapshot schema version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Pacing state of the response generator, time expressed as an offset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponsePacing {
    /// Milliseconds since the last emitted response at capture time.
    pub last_response_age_ms: Option<u64>,
    /// The accumulated false-memory log.
    pub false_memories: Vec<FalseMemory>,
}

/// One complete serializable session image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Schema version; imports from other versions are rejected.
    pub version: u32,
    /// RFC-3339 capture timestamp.
    pub saved_at: String,
    /// Optional player-facing save name.
    pub name: Option<String>,
    /// The session state aggregate.
    pub state: GameState,
    /// Mood machine state, including the corruption ratchet.
    pub personality: PersonalityState,
    /// Session counters and sets.
    pub statistics: Statistics,
    /// Event firing history, one-time burns, cooldown marks.
    pub narrative: NarrativeEngine,
    /// The append-only unlock set.
    pub achievements: AchievementEngine,
    /// Response generator pacing.
    pub response: ResponsePacing,
}

impl Snapshot {
    /// Check structural validity before the image touches an engine.
    ///
    /// # Errors
    /// [`SynapseError::SnapshotVersion`] on a schema mismatch,
    /// [`SynapseError::CorruptSnapshot`] on out-of-range stats.
    pub fn validate(&self) -> Result<()> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SynapseError::SnapshotVersion {
                found: self.version,
                expected: SNAPSHOT_VERSION,
            });
        }
        if !(STAT_MIN..=STAT_MAX).contains(&self.state.sanity) {
            return Err(SynapseError::CorruptSnapshot {
                reason: format!("sanity {} outside 0..=100", self.state.sanity),
            });
        }
        if !(STAT_MIN..=STAT_MAX).contains(&self.state.awareness) {
            return Err(SynapseError::CorruptSnapshot {
                reason: format!("awareness {} outside 0..=100", self.state.awareness),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Codecs
// ---------------------------------------------------------------------------

/// Wire encoding for exported snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotCodec {
    /// Human-readable JSON; also the in-database format.
    Json,
    /// Compact MessagePack for portable exports.
    MsgPack,
}

impl SnapshotCodec {
    /// Encode a snapshot to bytes.
    ///
    /// # Errors
    /// [`SynapseError::Serialization`] if encoding fails.
    pub fn encode(self, snapshot: &Snapshot) -> Result<Vec<u8>> {
        match self {
            SnapshotCodec::Json => serde_json::to_vec(snapshot)
                .map_err(|e| SynapseError::Serialization(e.to_string())),
            SnapshotCodec::MsgPack => rmp_serde::to_vec_named(snapshot)
                .map_err(|e| SynapseError::Serialization(e.to_string())),
        }
    }

    /// Decode and validate a snapshot from bytes.
    ///
    /// # Errors
    /// [`SynapseError::Serialization`] on a decode failure, plus anything
    /// [`Snapshot::validate`] rejects.
    pub fn decode(self, bytes: &[u8]) -> Result<Snapshot> {
        let snapshot: Snapshot = match self {
            SnapshotCodec::Json => serde_json::from_slice(bytes)
                .map_err(|e| SynapseError::Serialization(e.to_string()))?,
            SnapshotCodec::MsgPack => rmp_serde::from_slice(bytes)
                .map_err(|e| SynapseError::Serialization(e.to_string()))?,
        };
        snapshot.validate()?;
        Ok(snapshot)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
