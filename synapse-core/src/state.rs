//! The per-session game state aggregate.
//!
//! [`GameState`] is deliberately dumb: plain data, no game rules. Stat
//! clamping lives in [`crate::stats`], mood logic in [`crate::personality`],
//! and effect application in [`crate::effects`]. Collections are ordered so
//! serialized snapshots are byte-stable for identical states.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::types::{CharacterId, FlagValue, ItemId, RoomId, SessionId};

/// Stat floor shared by sanity and awareness.
pub const STAT_MIN: i32 = 0;
/// Stat ceiling shared by sanity and awareness.
pub const STAT_MAX: i32 = 100;

/// Everything that defines one running play session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Unique session identifier, minted at new-game time.
    pub session: SessionId,
    /// Selected character profile, if any.
    pub character: Option<CharacterId>,
    /// Room the player currently occupies.
    pub current_room: RoomId,
    /// Number of completed turns.
    pub turn_counter: u64,
    /// Player mental stability, clamped to 0–100.
    pub sanity: i32,
    /// How much the AI has noticed the player, clamped to 0–100.
    pub awareness: i32,
    /// Items the player carries.
    pub inventory: Vec<ItemId>,
    /// Every room the player has entered at least once.
    pub visited_rooms: BTreeSet<RoomId>,
    /// Story gates, hidden stats, and markers.
    pub flags: BTreeMap<String, FlagValue>,
    /// Set to the terminal cause once the session ends.
    pub game_over: Option<String>,
    /// Accumulated play time in milliseconds.
    pub play_time_ms: u64,
    /// Item used this turn; cleared when the turn completes.
    pub recently_used_item: Option<ItemId>,
    /// Difficulty label, carried through save metadata.
    pub difficulty: String,
}

impl GameState {
    /// Start a fresh session in the given room with stock stats.
    #[must_use]
    pub fn new(session: SessionId, starting_room: RoomId) -> Self {
        let mut visited_rooms = BTreeSet::new();
        visited_rooms.insert(starting_room.clone());
        Self {
            session,
            character: None,
            current_room: starting_room,
            turn_counter: 0,
            sanity: STAT_MAX,
            awareness: STAT_MIN,
            inventory: Vec::new(),
            visited_rooms,
            flags: BTreeMap::new(),
            game_over: None,
            play_time_ms: 0,
            recently_used_item: None,
            difficulty: "normal".to_string(),
        }
    }

    /// Whether the session has reached a terminal state.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.game_over.is_some()
    }

    /// Move to a room, recording the visit. Returns `true` on first visit.
    pub fn enter_room(&mut self, room: RoomId) -> bool {
        let first_visit = self.visited_rooms.insert(room.clone());
        self.current_room = room;
        first_visit
    }

    /// Whether the player carries the given item.
    #[must_use]
    pub fn has_item(&self, item: &ItemId) -> bool {
        self.inventory.contains(item)
    }

    /// Add an item to the inventory. Duplicates are allowed.
    pub fn add_item(&mut self, item: ItemId) {
        self.inventory.push(item);
    }

    /// Remove one instance of an item. Returns `true` if one was removed.
    pub fn remove_item(&mut self, item: &ItemId) -> bool {
        if let Some(pos) = self.inventory.iter().position(|i| i == item) {
            self.inventory.remove(pos);
            true
        } else {
            false
        }
    }

    /// Read a flag, if set.
    #[must_use]
    pub fn flag(&self, key: &str) -> Option<&FlagValue> {
        self.flags.get(key)
    }

    /// Read a flag as a boolean; unset reads as `false`.
    #[must_use]
    pub fn flag_bool(&self, key: &str) -> bool {
        self.flags.get(key).is_some_and(FlagValue::as_bool)
    }

    /// Read a flag as an integer; unset reads as 0.
    #[must_use]
    pub fn flag_int(&self, key: &str) -> i64 {
        self.flags.get(key).map_or(0, FlagValue::as_int)
    }

    /// Set or overwrite a flag.
    pub fn set_flag(&mut self, key: impl Into<String>, value: impl Into<FlagValue>) {
        self.flags.insert(key.into(), value.into());
    }

    /// Add `delta` to an integer flag, treating unset or non-integer as 0.
    pub fn bump_flag(&mut self, key: &str, delta: i64) {
        let current = self.flag_int(key);
        self.flags
            .insert(key.to_string(), FlagValue::Int(current + delta));
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
