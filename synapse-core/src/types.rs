//! Core type definitions shared across the SYNAPSE engine.
//!
//! Identifiers are newtypes over their wire representation so that a room
//! ID can never be passed where a character ID is expected. The [`Mood`]
//! enum is the personality machine's state space; everything downstream
//! (response pools, pacing, behavior flags) keys off it.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

/// Unique identifier for a play session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Generate a fresh random session ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

macro_rules! content_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Wrap a raw string identifier.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the raw identifier.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }
    };
}

content_id! {
    /// Identifier for a room in the facility map.
    RoomId
}

content_id! {
    /// Identifier for an item definition.
    ItemId
}

content_id! {
    /// Identifier for a playable character profile.
    CharacterId
}

content_id! {
    /// Identifier for an achievement definition.
    AchievementId
}

content_id! {
    /// Identifier for a conditional narrative event.
    EventId
}

// ---------------------------------------------------------------------------
// Personality state space
// ---------------------------------------------------------------------------

/// The four personality states of the facility AI.
///
/// States are strictly ordered by hostility; the machine re-evaluates its
/// state from awareness once per turn and may move in either direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    /// Cooperative facade. Default state at session start.
    Friendly,
    /// Hesitant, guarded. First crack in the facade.
    Ambiguous,
    /// Openly unsettling; manipulation tactics come online.
    Sinister,
    /// Hostile. The facade has dropped entirely.
    Malicious,
}

impl Mood {
    /// All moods in escalation order.
    pub const ALL: [Mood; 4] = [
        Mood::Friendly,
        Mood::Ambiguous,
        Mood::Sinister,
        Mood::Malicious,
    ];

    /// Stable lowercase name used in content tables and serialized state.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Mood::Friendly => "friendly",
            Mood::Ambiguous => "ambiguous",
            Mood::Sinister => "sinister",
            Mood::Malicious => "malicious",
        }
    }

    /// Human-readable display name.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Mood::Friendly => "Friendly",
            Mood::Ambiguous => "Ambiguous",
            Mood::Sinister => "Sinister",
            Mood::Malicious => "Malicious",
        }
    }

    /// How eager this mood is to actually help the player (0.0–1.0).
    #[must_use]
    pub fn helpfulness(self) -> f64 {
        match self {
            Mood::Friendly => 0.9,
            Mood::Ambiguous => 0.6,
            Mood::Sinister => 0.3,
            Mood::Malicious => 0.1,
        }
    }

    /// How honest this mood's answers are (0.0–1.0).
    #[must_use]
    pub fn truthfulness(self) -> f64 {
        match self {
            Mood::Friendly => 0.8,
            Mood::Ambiguous => 0.6,
            Mood::Sinister => 0.4,
            Mood::Malicious => 0.2,
        }
    }

    /// How much this mood distrusts the player (0.0–1.0).
    #[must_use]
    pub fn suspicion(self) -> f64 {
        match self {
            Mood::Friendly => 0.1,
            Mood::Ambiguous => 0.4,
            Mood::Sinister => 0.7,
            Mood::Malicious => 1.0,
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derived behavior toggles, recomputed from mood and awareness every turn.
///
/// Pure function of `(mood, awareness)`; never stored, never drifts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BehaviorFlags {
    /// AI references the player's movements unprompted.
    pub stalking: bool,
    /// AI contradicts the player's recollection of events.
    pub gaslighting: bool,
    /// AI steers the player toward its own goals.
    pub manipulation: bool,
    /// AI claims knowledge of the player's future actions.
    pub predictive_knowledge: bool,
}

// ---------------------------------------------------------------------------
// Stats and flags
// ---------------------------------------------------------------------------

/// The two primary player statistics tracked by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatKind {
    /// Player mental stability, 0–100. Reaching 0 ends the session.
    Sanity,
    /// How much the AI has noticed the player, 0–100. Drives the mood machine.
    Awareness,
}

impl StatKind {
    /// Stable lowercase name used in content effect tables.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            StatKind::Sanity => "sanity",
            StatKind::Awareness => "awareness",
        }
    }
}

impl fmt::Display for StatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value stored in the session flag table.
///
/// Flags are a grab bag: booleans for story gates, integers for accumulated
/// hidden stats (determination, wisdom, ...), strings for things like the
/// ending identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlagValue {
    /// A boolean gate.
    Bool(bool),
    /// An accumulating integer stat.
    Int(i64),
    /// A free-form string marker.
    Text(String),
}

impl FlagValue {
    /// Interpret the flag as a boolean. Non-boolean flags read as `false`.
    #[must_use]
    pub fn as_bool(&self) -> bool {
        matches!(self, FlagValue::Bool(true))
    }

    /// Interpret the flag as an integer. Non-integer flags read as 0.
    #[must_use]
    pub fn as_int(&self) -> i64 {
        match self {
            FlagValue::Int(v) => *v,
            _ => 0,
        }
    }

    /// Interpret the flag as a string, if it is one.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FlagValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl From<bool> for FlagValue {
    fn from(v: bool) -> Self {
        FlagValue::Bool(v)
    }
}

impl From<i64> for FlagValue {
    fn from(v: i64) -> Self {
        FlagValue::Int(v)
    }
}

impl From<&str> for FlagValue {
    fn from(v: &str) -> Self {
        FlagValue::Text(v.to_string())
    }
}

impl From<String> for FlagValue {
    fn from(v: String) -> Self {
        FlagValue::Text(v)
    }
}

// ---------------------------------------------------------------------------
// Player input
// ---------------------------------------------------------------------------

/// A structured player command, already parsed by the interface layer.
///
/// The engine never sees raw keystrokes; it receives one of these per turn.
/// `raw` keeps the normalized full text because the behavior analyzer and
/// the contextual responder both match on phrases, not just the verb.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerAction {
    /// The command verb, lowercased ("look", "go", "use", ...).
    pub verb: String,
    /// Optional object of the verb ("terminal", "north", ...).
    pub object: Option<String>,
    /// Full normalized command text, lowercased.
    pub raw: String,
}

impl PlayerAction {
    /// Build an action from a verb and optional object.
    #[must_use]
    pub fn new(verb: impl Into<String>, object: Option<&str>) -> Self {
        let verb = verb.into().to_lowercase();
        let object = object.map(str::to_lowercase);
        let raw = match &object {
            Some(obj) => format!("{verb} {obj}"),
            None => verb.clone(),
        };
        Self { verb, object, raw }
    }

    /// Build an action from a full command line.
    #[must_use]
    pub fn from_line(line: &str) -> Self {
        let raw = line.trim().to_lowercase();
        let mut parts = raw.splitn(2, ' ');
        let verb = parts.next().unwrap_or_default().to_string();
        let object = parts.next().map(str::to_string);
        Self { verb, object, raw }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_ids_are_unique() {
        let a = SessionId::new();
        let b = SessionId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn room_id_round_trips_through_display() {
        let id = RoomId::new("server_room");
        assert_eq!(id.to_string(), "server_room");
        assert_eq!(id.as_str(), "server_room");
    }

    #[test]
    fn mood_escalation_order() {
        assert!(Mood::Friendly < Mood::Ambiguous);
        assert!(Mood::Ambiguous < Mood::Sinister);
        assert!(Mood::Sinister < Mood::Malicious);
    }

    #[test]
    fn mood_serializes_lowercase() {
        let json = serde_json::to_string(&Mood::Sinister).expect("serialize");
        assert_eq!(json, "\"sinister\"");
        let back: Mood = serde_json::from_str("\"malicious\"").expect("deserialize");
        assert_eq!(back, Mood::Malicious);
    }

    #[test]
    fn suspicion_rises_with_hostility() {
        let mut last = -1.0;
        for mood in Mood::ALL {
            assert!(mood.suspicion() > last);
            last = mood.suspicion();
        }
    }

    #[test]
    fn flag_value_coercions() {
        assert!(FlagValue::Bool(true).as_bool());
        assert!(!FlagValue::Int(1).as_bool());
        assert_eq!(FlagValue::Int(7).as_int(), 7);
        assert_eq!(FlagValue::Bool(true).as_int(), 0);
        assert_eq!(FlagValue::from("escape").as_text(), Some("escape"));
    }

    #[test]
    fn flag_value_untagged_serde() {
        let json = serde_json::to_string(&FlagValue::Int(42)).expect("serialize");
        assert_eq!(json, "42");
        let back: FlagValue = serde_json::from_str("true").expect("deserialize");
        assert_eq!(back, FlagValue::Bool(true));
    }

    #[test]
    fn action_from_line_splits_verb_and_object() {
        let action = PlayerAction::from_line("  Examine the TERMINAL ");
        assert_eq!(action.verb, "examine");
        assert_eq!(action.object.as_deref(), Some("the terminal"));
        assert_eq!(action.raw, "examine the terminal");
    }

    #[test]
    fn action_without_object() {
        let action = PlayerAction::from_line("look");
        assert_eq!(action.verb, "look");
        assert!(action.object.is_none());
    }
}
