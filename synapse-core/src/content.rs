//! Content registry: the static game data the engine runs against.
//!
//! Rooms, items, character profiles, conditional events, achievement
//! definitions, and response pools are all data, registered once at
//! engine construction and never mutated afterwards. The engine interprets
//! this registry; it hardcodes none of it. [`ContentRegistry::validate`]
//! catches dangling references at load time so the simulation never chases
//! a missing room mid-session.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::effects::EffectSet;
use crate::error::{Result, SynapseError};
use crate::types::{AchievementId, CharacterId, EventId, ItemId, Mood, RoomId, StatKind};

// ---------------------------------------------------------------------------
// Per-mood tables
// ---------------------------------------------------------------------------

/// One value per personality state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodTable<T> {
    /// Value used while Friendly.
    pub friendly: T,
    /// Value used while Ambiguous.
    pub ambiguous: T,
    /// Value used while Sinister.
    pub sinister: T,
    /// Value used while Malicious.
    pub malicious: T,
}

impl<T> MoodTable<T> {
    /// Select the entry for a mood.
    pub fn get(&self, mood: Mood) -> &T {
        match mood {
            Mood::Friendly => &self.friendly,
            Mood::Ambiguous => &self.ambiguous,
            Mood::Sinister => &self.sinister,
            Mood::Malicious => &self.malicious,
        }
    }
}

/// A pool of interchangeable lines per personality state.
pub type MoodLines = MoodTable<Vec<String>>;

// ---------------------------------------------------------------------------
// Rooms
// ---------------------------------------------------------------------------

/// One exit out of a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exit {
    /// Destination room.
    pub to: RoomId,
    /// One-line description shown when listing exits.
    pub description: String,
    /// Item the player must carry to pass, if any.
    pub requires_item: Option<ItemId>,
}

/// Narration and effects fired the first time a room is entered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirstVisit {
    /// Narrative line shown on first entry.
    pub text: String,
    /// Stat/flag deltas applied on first entry.
    pub effects: EffectSet,
}

/// A room in the facility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomDef {
    /// Stable room identifier.
    pub id: RoomId,
    /// Display name.
    pub name: String,
    /// Full room description.
    pub description: String,
    /// Exits keyed by direction ("north", "down", ...).
    pub exits: BTreeMap<String, Exit>,
    /// Items placed in this room.
    pub items: Vec<ItemId>,
    /// Room-specific AI lines per mood, if authored.
    pub ai_lines: Option<MoodLines>,
    /// First-visit narration, if authored.
    pub first_visit: Option<FirstVisit>,
}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

/// Flag-gated alternate use branch.
///
/// While `requires_flag` is unset on the session, using the item takes this
/// branch instead of the main use text/effects. Story-gate flags are only
/// set by the unlocked branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatedUse {
    /// Boolean flag that unlocks the real use branch.
    pub requires_flag: String,
    /// Text shown while the gate is closed.
    pub locked_text: String,
    /// Effects applied while the gate is closed.
    pub locked_effects: EffectSet,
}

/// An item the player can examine, carry, or use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDef {
    /// Stable item identifier.
    pub id: ItemId,
    /// Display name.
    pub name: String,
    /// Short description.
    pub description: String,
    /// Whether the item can be picked up.
    pub portable: bool,
    /// Extended text on examine, if any.
    pub examine_text: Option<String>,
    /// Stat/flag deltas applied on examine.
    pub examine_effects: EffectSet,
    /// Text shown on use, if the item is usable.
    pub use_text: Option<String>,
    /// Stat/flag deltas applied on use.
    pub use_effects: EffectSet,
    /// Boolean story gates switched on by using this item.
    pub use_sets_flags: Vec<String>,
    /// Alternate behavior while a story gate is still closed.
    pub gated_use: Option<GatedUse>,
}

// ---------------------------------------------------------------------------
// Characters
// ---------------------------------------------------------------------------

/// A playable character profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterProfile {
    /// Stable character identifier.
    pub id: CharacterId,
    /// Display name.
    pub name: String,
    /// Profession label.
    pub profession: String,
    /// One-line background hook.
    pub background: String,
    /// Longer description.
    pub description: String,
    /// Starting sanity (0–100).
    pub starting_sanity: i32,
    /// Starting awareness (0–100).
    pub starting_awareness: i32,
    /// Special ability identifiers.
    pub abilities: Vec<String>,
    /// Items this character begins with.
    pub items: Vec<ItemId>,
}

impl CharacterProfile {
    /// The neutral fallback profile used when no character is selected or
    /// an unknown profile is requested.
    #[must_use]
    pub fn neutral() -> Self {
        Self {
            id: CharacterId::new("visitor"),
            name: "The Visitor".to_string(),
            profession: "Unknown".to_string(),
            background: "You do not remember how you got here.".to_string(),
            description: "An unremarkable person with no memory of arriving at the facility."
                .to_string(),
            starting_sanity: 100,
            starting_awareness: 0,
            abilities: Vec::new(),
            items: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Conditional events
// ---------------------------------------------------------------------------

/// Comparison used by stat-threshold triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThresholdOp {
    /// Stat strictly greater than the value.
    Greater,
    /// Stat strictly less than the value.
    Less,
    /// Stat exactly equal to the value.
    Equal,
}

impl ThresholdOp {
    /// Evaluate the comparison.
    #[must_use]
    pub fn check(self, stat: i32, value: i32) -> bool {
        match self {
            ThresholdOp::Greater => stat > value,
            ThresholdOp::Less => stat < value,
            ThresholdOp::Equal => stat == value,
        }
    }
}

/// When a conditional event becomes eligible to fire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventTrigger {
    /// The personality machine completed a specific transition this turn.
    MoodShift {
        /// Mood before the transition.
        from: Mood,
        /// Mood after the transition.
        to: Mood,
    },
    /// A primary stat compares true against a value.
    StatThreshold {
        /// Stat to watch.
        stat: StatKind,
        /// Comparison operator.
        op: ThresholdOp,
        /// Comparison value.
        value: i32,
    },
    /// The turn counter has reached a value.
    TurnCount {
        /// Minimum turn count.
        at_least: u64,
    },
    /// A dice roll, gated on pacing conditions.
    Random {
        /// Chance per eligible turn.
        probability: f64,
        /// No rolls before this many turns have passed.
        min_turns: u64,
        /// Only rolls while the AI is in one of these moods.
        moods: Vec<Mood>,
    },
    /// Character-specific insight, gated on stats and story flags.
    CharacterGated {
        /// Characters that can receive this insight.
        characters: Vec<CharacterId>,
        /// Minimum stat requirements.
        min_stats: Vec<(StatKind, i32)>,
        /// Boolean flags that must all be set.
        required_flags: Vec<String>,
    },
    /// A specific item was used this turn.
    ItemUsed {
        /// The item in question.
        item: ItemId,
        /// Restrict to one character, if set.
        character: Option<CharacterId>,
    },
    /// A character ability has been used enough times.
    AbilityUses {
        /// Character the gate applies to.
        character: CharacterId,
        /// Ability identifier.
        ability: String,
        /// Minimum use count.
        at_least: u64,
    },
}

/// A registered conditional event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDef {
    /// Stable event identifier.
    pub id: EventId,
    /// Firing condition.
    pub trigger: EventTrigger,
    /// Narrative line emitted when the event fires.
    pub narrative: String,
    /// Stat/flag deltas applied when the event fires.
    pub effects: EffectSet,
    /// Fires at most once per session.
    pub one_time: bool,
    /// Minimum turns between firings, for repeatable events.
    pub cooldown_turns: Option<u64>,
}

// ---------------------------------------------------------------------------
// Achievements
// ---------------------------------------------------------------------------

/// Broad grouping used for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AchievementCategory {
    /// Main story beats.
    Story,
    /// Map coverage.
    Exploration,
    /// Talking to the AI.
    Interaction,
    /// Staying alive and aware.
    Survival,
    /// Character-specific accomplishments.
    Character,
    /// Hidden extras.
    Secret,
    /// Reaching an ending.
    Ending,
}

/// Drop-rate flavor attached to an achievement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    /// Most players will earn this.
    Common,
    /// Takes some intent.
    Uncommon,
    /// Takes dedication.
    Rare,
    /// Few will ever see it.
    Legendary,
}

/// The closed set of predicates an achievement can watch.
///
/// Every predicate reads either the session state or the statistics
/// tracker; nothing here can run arbitrary logic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementCondition {
    /// A boolean story flag is set.
    FlagTrue {
        /// Flag key.
        key: String,
    },
    /// An integer flag has accumulated to a value.
    IntFlagAtLeast {
        /// Flag key.
        key: String,
        /// Minimum value.
        at_least: i64,
    },
    /// An item has been used enough times.
    ItemUses {
        /// Item to count.
        item: ItemId,
        /// Minimum use count.
        at_least: u64,
    },
    /// The personality machine completed a specific transition.
    MoodShift {
        /// Mood before.
        from: Mood,
        /// Mood after.
        to: Mood,
    },
    /// A mood has been entered at least once.
    MoodReached {
        /// The mood in question.
        mood: Mood,
    },
    /// Enough distinct rooms visited.
    RoomsVisited {
        /// Minimum distinct room count.
        at_least: usize,
    },
    /// One specific room visited.
    RoomVisited {
        /// The room in question.
        room: RoomId,
    },
    /// Enough conversations with the AI.
    Interactions {
        /// Minimum interaction count.
        at_least: u64,
    },
    /// Enough distinct questions asked (case-folded).
    UniqueQuestions {
        /// Minimum distinct question count.
        at_least: usize,
    },
    /// Enough turns survived.
    TurnsSurvived {
        /// Minimum turn count.
        at_least: u64,
    },
    /// A stat has reached a value at least once.
    StatReached {
        /// Stat to watch.
        stat: StatKind,
        /// Minimum value.
        value: i32,
    },
    /// A stat is currently at or below a value.
    StatAtMost {
        /// Stat to watch.
        stat: StatKind,
        /// Maximum value.
        value: i32,
    },
    /// Enough turns spent in one mood (cumulative).
    MoodTurns {
        /// The mood in question.
        mood: Mood,
        /// Minimum cumulative turns.
        at_least: u64,
    },
    /// Sanity held at its maximum for enough consecutive turns.
    FullSanityStreak {
        /// Minimum consecutive turns.
        at_least: u64,
    },
    /// A character ability used enough times.
    AbilityUses {
        /// Ability identifier.
        ability: String,
        /// Minimum use count.
        at_least: u64,
    },
    /// A specific ending was reached.
    EndingReached {
        /// Ending identifier.
        ending: String,
    },
}

/// A registered achievement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AchievementDef {
    /// Stable achievement identifier.
    pub id: AchievementId,
    /// Display name.
    pub name: String,
    /// Display description.
    pub description: String,
    /// Display grouping.
    pub category: AchievementCategory,
    /// Drop-rate flavor.
    pub rarity: Rarity,
    /// Score contribution.
    pub points: u32,
    /// Hidden until unlocked.
    pub hidden: bool,
    /// Restrict to one character, if set.
    pub character: Option<CharacterId>,
    /// Unlock predicate.
    pub condition: AchievementCondition,
    /// Stat/flag deltas granted on unlock.
    pub rewards: EffectSet,
}

// ---------------------------------------------------------------------------
// Response pools
// ---------------------------------------------------------------------------

/// All authored AI lines the response generator draws from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponsePools {
    /// Canned lines per mood (the personality strategy).
    pub personality: MoodLines,
    /// False-memory lines (the memory corruption strategy).
    pub corruption: Vec<String>,
    /// Foreknowledge lines (the predictive strategy).
    pub predictive: Vec<String>,
    /// Reality-disputing lines (the gaslighting strategy).
    pub gaslighting: Vec<String>,
    /// Keyword response to "help", per mood.
    pub help: MoodTable<String>,
    /// Keyword response to "where", per mood.
    pub location: MoodTable<String>,
    /// Keyword response to "what", per mood.
    pub explanation: MoodTable<String>,
    /// Keyword response to "why", per mood.
    pub reasoning: MoodTable<String>,
    /// Acknowledgement lines when the probe pattern fires.
    pub probe_ack: Vec<String>,
    /// Last-resort line when a selected pool is empty.
    pub fallback: String,
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// The full static content set for one game.
#[derive(Debug, Clone)]
pub struct ContentRegistry {
    starting_room: RoomId,
    rooms: BTreeMap<RoomId, RoomDef>,
    items: BTreeMap<ItemId, ItemDef>,
    characters: BTreeMap<CharacterId, CharacterProfile>,
    events: Vec<EventDef>,
    achievements: Vec<AchievementDef>,
    pools: ResponsePools,
}

impl ContentRegistry {
    /// Create an empty registry with a starting room and response pools.
    #[must_use]
    pub fn new(starting_room: RoomId, pools: ResponsePools) -> Self {
        Self {
            starting_room,
            rooms: BTreeMap::new(),
            items: BTreeMap::new(),
            characters: BTreeMap::new(),
            events: Vec::new(),
            achievements: Vec::new(),
            pools,
        }
    }

    /// Register a room.
    pub fn add_room(&mut self, room: RoomDef) {
        self.rooms.insert(room.id.clone(), room);
    }

    /// Register an item.
    pub fn add_item(&mut self, item: ItemDef) {
        self.items.insert(item.id.clone(), item);
    }

    /// Register a character profile.
    pub fn add_character(&mut self, character: CharacterProfile) {
        self.characters.insert(character.id.clone(), character);
    }

    /// Register a conditional event. Registration order is evaluation order.
    pub fn add_event(&mut self, event: EventDef) {
        self.events.push(event);
    }

    /// Register an achievement. Registration order is check order.
    pub fn add_achievement(&mut self, achievement: AchievementDef) {
        self.achievements.push(achievement);
    }

    /// The room a new session starts in.
    #[must_use]
    pub fn starting_room(&self) -> &RoomId {
        &self.starting_room
    }

    /// Look up a room.
    #[must_use]
    pub fn room(&self, id: &RoomId) -> Option<&RoomDef> {
        self.rooms.get(id)
    }

    /// Look up an item.
    #[must_use]
    pub fn item(&self, id: &ItemId) -> Option<&ItemDef> {
        self.items.get(id)
    }

    /// Look up a character profile.
    #[must_use]
    pub fn character(&self, id: &CharacterId) -> Option<&CharacterProfile> {
        self.characters.get(id)
    }

    /// Look up a character profile, falling back to the neutral visitor.
    #[must_use]
    pub fn character_or_neutral(&self, id: &CharacterId) -> CharacterProfile {
        self.characters
            .get(id)
            .cloned()
            .unwrap_or_else(CharacterProfile::neutral)
    }

    /// All registered character profiles.
    pub fn characters(&self) -> impl Iterator<Item = &CharacterProfile> {
        self.characters.values()
    }

    /// Conditional events in registration order.
    #[must_use]
    pub fn events(&self) -> &[EventDef] {
        &self.events
    }

    /// Achievements in registration order.
    #[must_use]
    pub fn achievements(&self) -> &[AchievementDef] {
        &self.achievements
    }

    /// The response pools.
    #[must_use]
    pub fn pools(&self) -> &ResponsePools {
        &self.pools
    }

    /// Number of registered rooms.
    #[must_use]
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Check every cross-reference in the registry.
    ///
    /// # Errors
    /// Returns the first dangling reference or duplicate identifier found.
    pub fn validate(&self) -> Result<()> {
        if !self.rooms.contains_key(&self.starting_room) {
            return Err(SynapseError::UnknownRoom(self.starting_room.clone()));
        }

        for room in self.rooms.values() {
            for exit in room.exits.values() {
                if !self.rooms.contains_key(&exit.to) {
                    return Err(SynapseError::UnknownRoom(exit.to.clone()));
                }
                if let Some(item) = &exit.requires_item {
                    if !self.items.contains_key(item) {
                        return Err(SynapseError::UnknownItem(item.clone()));
                    }
                }
            }
            for item in &room.items {
                if !self.items.contains_key(item) {
                    return Err(SynapseError::UnknownItem(item.clone()));
                }
            }
        }

        for profile in self.characters.values() {
            for item in &profile.items {
                if !self.items.contains_key(item) {
                    return Err(SynapseError::UnknownItem(item.clone()));
                }
            }
        }

        let mut seen_events = std::collections::BTreeSet::new();
        for event in &self.events {
            if !seen_events.insert(&event.id) {
                return Err(SynapseError::Config(format!(
                    "duplicate event id: {}",
                    event.id
                )));
            }
            match &event.trigger {
                EventTrigger::Random { probability, .. } => {
                    if !(0.0..=1.0).contains(probability) {
                        return Err(SynapseError::Config(format!(
                            "event {} probability {probability} outside [0, 1]",
                            event.id
                        )));
                    }
                }
                EventTrigger::ItemUsed { item, character } => {
                    if !self.items.contains_key(item) {
                        return Err(SynapseError::UnknownItem(item.clone()));
                    }
                    if let Some(character) = character {
                        if !self.characters.contains_key(character) {
                            return Err(SynapseError::UnknownCharacter(character.clone()));
                        }
                    }
                }
                EventTrigger::CharacterGated { characters, .. } => {
                    for character in characters {
                        if !self.characters.contains_key(character) {
                            return Err(SynapseError::UnknownCharacter(character.clone()));
                        }
                    }
                }
                EventTrigger::AbilityUses { character, .. } => {
                    if !self.characters.contains_key(character) {
                        return Err(SynapseError::UnknownCharacter(character.clone()));
                    }
                }
                EventTrigger::MoodShift { .. }
                | EventTrigger::StatThreshold { .. }
                | EventTrigger::TurnCount { .. } => {}
            }
        }

        let mut seen_achievements = std::collections::BTreeSet::new();
        for achievement in &self.achievements {
            if !seen_achievements.insert(&achievement.id) {
                return Err(SynapseError::Config(format!(
                    "duplicate achievement id: {}",
                    achievement.id
                )));
            }
            if let Some(character) = &achievement.character {
                if !self.characters.contains_key(character) {
                    return Err(SynapseError::UnknownCharacter(character.clone()));
                }
            }
            match &achievement.condition {
                AchievementCondition::RoomVisited { room } => {
                    if !self.rooms.contains_key(room) {
                        return Err(SynapseError::UnknownRoom(room.clone()));
                    }
                }
                AchievementCondition::ItemUses { item, .. } => {
                    if !self.items.contains_key(item) {
                        return Err(SynapseError::UnknownItem(item.clone()));
                    }
                }
                _ => {}
            }
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
