//! # SYNAPSE Core Library
//!
//! Game-agnostic narrative state engine for an AI-driven horror game.
//!
//! One [`SynapseEngine`] owns a whole play session. Each player command is
//! processed as an atomic turn through a fixed pipeline:
//!
//! - **Personality**: a four-mood machine (Friendly, Ambiguous, Sinister,
//!   Malicious) driven by the player's awareness stat, with a one-way
//!   corruption ratchet
//! - **Response generation**: weighted strategies (contextual, canned,
//!   memory corruption, foreknowledge, gaslighting) with mood-scaled pacing
//! - **Narrative events**: data-driven conditional events with one-time
//!   burns and cooldowns
//! - **Statistics and achievements**: an independent observer unlocking
//!   achievements from declarative predicates
//! - **Persistence**: SQLite-backed save slots with checksums and rotating
//!   backups, plus portable JSON/MessagePack snapshot exports
//!
//! All game data (rooms, items, characters, events, response pools) lives in
//! a [`ContentRegistry`]; the engine hardcodes none of it.
//!
//! ## Performance Contract
//!
//! All operations are designed for an interactive frontend:
//! - Full turn pipeline: < 5ms
//! - Snapshot capture: < 2ms
//! - Slot save (JSON + SQLite): < 20ms

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod achievements;
pub mod clock;
pub mod config;
pub mod content;
pub mod effects;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod narrative;
pub mod persistence;
pub mod personality;
pub mod response;
pub mod scheduler;
pub mod snapshot;
pub mod state;
pub mod stats;
pub mod types;

pub use config::SynapseConfig;
pub use content::ContentRegistry;
pub use engine::{OutputEvent, OutputTag, SynapseEngine, TurnOutput};
pub use error::{Result, SynapseError};
pub use persistence::{SaveSlot, SaveStore};
pub use snapshot::{Snapshot, SnapshotCodec};
pub use state::GameState;
pub use types::*;
