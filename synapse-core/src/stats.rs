//! Clamped stat writes, threshold crossing detection, and the session
//! statistics tracker.
//!
//! Every sanity/awareness mutation in the engine funnels through
//! [`modify_sanity`] / [`modify_awareness`] so clamping, crossing signals,
//! and the terminal sanity latch cannot be bypassed. Crossings fire on the
//! transition only; holding a stat past a threshold stays silent.
//!
//! [`Statistics`] accumulates everything achievements and character-gated
//! events need to know about a session: counters, case-folded question sets,
//! per-item and per-ability use counts, observed maxima.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::StatsConfig;
use crate::state::{GameState, STAT_MAX, STAT_MIN};
use crate::types::{ItemId, Mood, RoomId, StatKind};

/// Terminal cause recorded when sanity reaches zero.
pub const CAUSE_SANITY_LOSS: &str = "sanity_loss";

/// A threshold crossing produced by a clamped stat write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatCrossing {
    /// Sanity fell below the breakdown threshold.
    Breakdown,
    /// Sanity rose above the clarity threshold.
    Recovery,
    /// Awareness rose above the watched threshold.
    Watched,
}

impl StatCrossing {
    /// System line shown to the player when this crossing fires.
    #[must_use]
    pub fn system_line(self) -> &'static str {
        match self {
            StatCrossing::Breakdown => {
                "Your mind feels like it's fracturing. Reality seems to shift and blur at the edges."
            }
            StatCrossing::Recovery => {
                "You feel a moment of clarity. Your thoughts begin to stabilize."
            }
            StatCrossing::Watched => {
                "You sense that something is watching you. Every shadow seems to hide a presence."
            }
        }
    }

    /// Audio cue identifier for the presentation layer.
    #[must_use]
    pub fn audio_cue(self) -> &'static str {
        match self {
            StatCrossing::Breakdown => "sanity_break",
            StatCrossing::Recovery => "sanity_recover",
            StatCrossing::Watched => "awareness_spike",
        }
    }
}

/// Outcome of one clamped stat write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatChange {
    /// Which stat was written.
    pub stat: StatKind,
    /// The delta the caller asked for.
    pub requested: i32,
    /// Value before the write.
    pub previous: i32,
    /// Value after clamping.
    pub value: i32,
    /// Threshold crossings this write produced.
    pub crossings: Vec<StatCrossing>,
    /// Whether this write ended the session (sanity reached zero).
    pub ended_session: bool,
}

impl StatChange {
    /// The delta that actually landed after clamping.
    #[must_use]
    pub fn applied(&self) -> i32 {
        self.value - self.previous
    }
}

/// Apply a sanity delta, clamping to 0–100.
///
/// Detects breakdown/recovery crossings and latches the session terminal
/// state the first time sanity reaches zero.
pub fn modify_sanity(state: &mut GameState, delta: i32, config: &StatsConfig) -> StatChange {
    let previous = state.sanity;
    state.sanity = (previous + delta).clamp(STAT_MIN, STAT_MAX);

    let mut crossings = Vec::new();
    if previous >= config.breakdown_threshold && state.sanity < config.breakdown_threshold {
        crossings.push(StatCrossing::Breakdown);
    }
    if previous <= config.clarity_threshold && state.sanity > config.clarity_threshold {
        crossings.push(StatCrossing::Recovery);
    }

    let mut ended_session = false;
    if state.sanity <= STAT_MIN && state.game_over.is_none() {
        state.game_over = Some(CAUSE_SANITY_LOSS.to_string());
        ended_session = true;
        debug!(turn = state.turn_counter, "sanity depleted, session over");
    }

    StatChange {
        stat: StatKind::Sanity,
        requested: delta,
        previous,
        value: state.sanity,
        crossings,
        ended_session,
    }
}

/// Apply an awareness delta, clamping to 0–100.
///
/// Detects the watched crossing. Never ends the session on its own.
pub fn modify_awareness(state: &mut GameState, delta: i32, config: &StatsConfig) -> StatChange {
    let previous = state.awareness;
    state.awareness = (previous + delta).clamp(STAT_MIN, STAT_MAX);

    let mut crossings = Vec::new();
    if previous <= config.watched_threshold && state.awareness > config.watched_threshold {
        crossings.push(StatCrossing::Watched);
    }

    StatChange {
        stat: StatKind::Awareness,
        requested: delta,
        previous,
        value: state.awareness,
        crossings,
        ended_session: false,
    }
}

// ---------------------------------------------------------------------------
// Session statistics
// ---------------------------------------------------------------------------

/// One trackable gameplay occurrence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrackEvent<'a> {
    /// The player addressed the AI with this raw text.
    Interaction {
        /// Unparsed question text; de-duplicated case-insensitively.
        question: &'a str,
    },
    /// The AI actually answered.
    ResponseReceived,
    /// The player entered a room.
    RoomVisited(&'a RoomId),
    /// One turn finished with these readings.
    TurnCompleted {
        /// Sanity at end of turn.
        sanity: i32,
        /// Awareness at end of turn.
        awareness: i32,
        /// Mood in effect at end of turn.
        mood: Mood,
    },
    /// An item was used.
    ItemUsed(&'a ItemId),
    /// A character ability was used.
    AbilityUsed(&'a str),
    /// A command matched the suspicious-verb list.
    SuspiciousCommand,
    /// The personality machine completed a transition.
    MoodChanged {
        /// Mood before.
        from: Mood,
        /// Mood after.
        to: Mood,
    },
    /// The session reached a terminal state.
    Death,
    /// A saved session was loaded over this one.
    Reload,
}

/// Accumulated session counters, sets, and observed maxima.
///
/// Reset only at new-game time; crosses the snapshot boundary wholesale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    /// Conversations held with the AI.
    pub interactions: u64,
    /// Responses the AI actually emitted.
    pub responses_received: u64,
    /// Distinct questions asked, case-folded.
    pub unique_questions: BTreeSet<String>,
    /// Distinct rooms entered.
    pub rooms_visited: BTreeSet<RoomId>,
    /// Completed turns.
    pub turns_survived: u64,
    /// Use count per item.
    pub items_used: BTreeMap<ItemId, u64>,
    /// Use count per ability.
    pub abilities_used: BTreeMap<String, u64>,
    /// Commands that matched the suspicious-verb list.
    pub suspicious_commands: u64,
    /// Highest sanity observed at any turn end.
    pub max_sanity: i32,
    /// Highest awareness observed at any turn end.
    pub max_awareness: i32,
    /// Completed personality transitions.
    pub personality_changes: u64,
    /// Turns spent in each mood.
    pub mood_turns: BTreeMap<Mood, u64>,
    /// Every mood entered at least once.
    pub moods_seen: BTreeSet<Mood>,
    /// Every `(from, to)` transition observed.
    pub mood_shifts: BTreeSet<(Mood, Mood)>,
    /// Consecutive turns ended at full sanity; resets on any dip.
    pub full_sanity_streak: u64,
    /// Terminal states reached.
    pub deaths: u64,
    /// Saves loaded over this session.
    pub reloads: u64,
}

impl Statistics {
    /// Fresh tracker for a new session. The AI starts Friendly, so that
    /// mood counts as seen from turn zero.
    #[must_use]
    pub fn new() -> Self {
        let mut stats = Self::default();
        stats.moods_seen.insert(Mood::Friendly);
        stats
    }

    /// Record one occurrence. Every call counts; idempotency is the
    /// caller's problem.
    pub fn track(&mut self, event: TrackEvent<'_>) {
        match event {
            TrackEvent::Interaction { question } => {
                self.interactions += 1;
                self.unique_questions.insert(question.trim().to_lowercase());
            }
            TrackEvent::ResponseReceived => self.responses_received += 1,
            TrackEvent::RoomVisited(room) => {
                self.rooms_visited.insert(room.clone());
            }
            TrackEvent::TurnCompleted {
                sanity,
                awareness,
                mood,
            } => {
                self.turns_survived += 1;
                self.max_sanity = self.max_sanity.max(sanity);
                self.max_awareness = self.max_awareness.max(awareness);
                *self.mood_turns.entry(mood).or_insert(0) += 1;
                if sanity >= STAT_MAX {
                    self.full_sanity_streak += 1;
                } else {
                    self.full_sanity_streak = 0;
                }
            }
            TrackEvent::ItemUsed(item) => {
                *self.items_used.entry(item.clone()).or_insert(0) += 1;
            }
            TrackEvent::AbilityUsed(ability) => {
                *self.abilities_used.entry(ability.to_string()).or_insert(0) += 1;
            }
            TrackEvent::SuspiciousCommand => self.suspicious_commands += 1,
            TrackEvent::MoodChanged { from, to } => {
                self.personality_changes += 1;
                self.moods_seen.insert(to);
                self.mood_shifts.insert((from, to));
            }
            TrackEvent::Death => self.deaths += 1,
            TrackEvent::Reload => self.reloads += 1,
        }
    }

    /// Times one item has been used.
    #[must_use]
    pub fn item_uses(&self, item: &ItemId) -> u64 {
        self.items_used.get(item).copied().unwrap_or(0)
    }

    /// Times one ability has been used.
    #[must_use]
    pub fn ability_uses(&self, ability: &str) -> u64 {
        self.abilities_used.get(ability).copied().unwrap_or(0)
    }

    /// Turns spent in one mood.
    #[must_use]
    pub fn turns_in_mood(&self, mood: Mood) -> u64 {
        self.mood_turns.get(&mood).copied().unwrap_or(0)
    }

    /// Whether a specific transition has ever completed.
    #[must_use]
    pub fn has_seen_shift(&self, from: Mood, to: Mood) -> bool {
        self.mood_shifts.contains(&(from, to))
    }

    /// Whether a mood has ever been entered.
    #[must_use]
    pub fn has_seen_mood(&self, mood: Mood) -> bool {
        self.moods_seen.contains(&mood)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
