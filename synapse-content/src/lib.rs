//! # SYNAPSE Content
//!
//! The complete Nexus Corporation facility: fifteen rooms, the items
//! scattered through them, ten playable characters with their personal
//! effects, the narrative event script, the achievement catalog, and every
//! line the AI can speak.
//!
//! All of it is plain data handed to a [`ContentRegistry`]; nothing in this
//! crate executes game logic. [`build_registry`] assembles the whole
//! facility and is the one entry point a host needs:
//!
//! ```rust
//! use synapse_core::{SynapseConfig, SynapseEngine};
//!
//! let engine = SynapseEngine::new(SynapseConfig::default(), synapse_content::build_registry());
//! assert!(engine.is_ok());
//! ```

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::too_many_lines)]

use synapse_core::ContentRegistry;
use synapse_core::types::RoomId;

pub mod achievements;
pub mod characters;
pub mod events;
pub mod items;
pub mod pools;
pub mod rooms;

/// Assemble the full facility into a validated-shape registry.
///
/// Registration order matters for events and achievements: both are swept
/// in definition order, and the catalogs here are arranged so cheap,
/// early-game entries land first.
#[must_use]
pub fn build_registry() -> ContentRegistry {
    let mut registry = ContentRegistry::new(RoomId::new(rooms::STARTING_ROOM), pools::pools());
    rooms::register(&mut registry);
    items::register(&mut registry);
    characters::register(&mut registry);
    events::register(&mut registry);
    achievements::register(&mut registry);
    registry
}
