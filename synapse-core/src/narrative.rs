//! The narrative engine: conditional story events swept once per turn.
//!
//! Events live in the content registry as data; this module owns the
//! runtime bookkeeping: which one-time events have burned, when each
//! repeatable event last fired, and the firing history. The sweep walks the
//! registry in definition order, so an event registered later sees the
//! stat effects of one registered earlier within the same turn.
//!
//! Severity-bucketed story fragments attach to the stat swings an event
//! causes and are emitted right after its effects apply.

use std::collections::{BTreeMap, BTreeSet};

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::{NarrativeConfig, StatsConfig};
use crate::content::{EventDef, EventTrigger};
use crate::effects::{apply_effects, AppliedEffects};
use crate::state::GameState;
use crate::stats::{StatChange, Statistics};
use crate::types::{EventId, Mood, StatKind};

// ---------------------------------------------------------------------------
// Story fragment pools
// ---------------------------------------------------------------------------

const SANITY_LOSS_MILD: [&str; 4] = [
    "You feel a slight disconnect from your sense of self.",
    "The edges of reality seem a little less defined.",
    "A whisper of doubt creeps into your thoughts.",
    "Something feels subtly wrong, but you can't quite place what.",
];

const SANITY_LOSS_MODERATE: [&str; 4] = [
    "Your grip on reality wavers as the digital world intrudes on your consciousness.",
    "The boundary between self and system becomes uncomfortably blurred.",
    "You question whether your thoughts are truly your own.",
    "The AI's presence feels invasive, probing at the edges of your mind.",
];

const SANITY_LOSS_SEVERE: [&str; 4] = [
    "Your sense of identity fractures as the system integrates deeper into your consciousness.",
    "The distinction between digital and real becomes meaningless.",
    "You struggle to remember who you were before entering this place.",
    "The AI's voice mingles with your own internal dialogue.",
];

const AWARENESS_GAIN_MINOR: [&str; 4] = [
    "A new understanding dawns as patterns become clearer.",
    "The pieces of the puzzle begin to align in your mind.",
    "You gain insight into the true nature of your situation.",
    "Knowledge crystallizes from fragments of information.",
];

const AWARENESS_GAIN_MAJOR: [&str; 4] = [
    "A revelation strikes you with the force of digital lightning.",
    "The full scope of your predicament becomes terrifyingly clear.",
    "Understanding floods your consciousness like data through a neural link.",
    "The truth hits you with devastating clarity.",
];

/// Narration for the stat swings in `changes`, bucketed by severity of the
/// requested delta (a clamped write still reads at full strength).
pub fn story_fragments<R: Rng>(
    changes: &[StatChange],
    config: &NarrativeConfig,
    rng: &mut R,
) -> Vec<String> {
    let mut fragments = Vec::new();
    for change in changes {
        let pool: &[&str] = match change.stat {
            StatKind::Sanity if change.requested < 0 => {
                let loss = -change.requested;
                if loss >= config.severe_sanity_loss {
                    &SANITY_LOSS_SEVERE
                } else if loss >= config.moderate_sanity_loss {
                    &SANITY_LOSS_MODERATE
                } else {
                    &SANITY_LOSS_MILD
                }
            }
            StatKind::Awareness if change.requested > 0 => {
                if change.requested >= config.major_awareness_gain {
                    &AWARENESS_GAIN_MAJOR
                } else {
                    &AWARENESS_GAIN_MINOR
                }
            }
            _ => continue,
        };
        fragments.push(pool[rng.gen_range(0..pool.len())].to_string());
    }
    fragments
}

// ---------------------------------------------------------------------------
// Sweep
// ---------------------------------------------------------------------------

/// Record of one firing, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiredRecord {
    /// Which event fired.
    pub id: EventId,
    /// Turn it fired on.
    pub turn: u64,
}

/// One firing with everything the caller must surface.
#[derive(Debug, Clone)]
pub struct FiredEvent {
    /// Which event fired.
    pub id: EventId,
    /// Narrative line to show the player.
    pub narrative: String,
    /// What the event's effects did.
    pub applied: AppliedEffects,
    /// Story fragments for the stat swings, in effect order.
    pub fragments: Vec<String>,
}

/// Read-only inputs for one sweep.
pub struct SweepContext<'a> {
    /// Registered events in definition order.
    pub events: &'a [EventDef],
    /// The `(from, to)` transition completed this turn, if any.
    pub transition: Option<(Mood, Mood)>,
    /// Mood in effect after re-evaluation.
    pub mood: Mood,
    /// Thresholds for the clamped stat writers.
    pub stats_config: &'a StatsConfig,
    /// Severity buckets for story fragments.
    pub narrative_config: &'a NarrativeConfig,
}

/// Runtime state of the narrative engine; crosses the snapshot boundary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NarrativeEngine {
    fired_once: BTreeSet<EventId>,
    last_triggered: BTreeMap<EventId, u64>,
    history: Vec<FiredRecord>,
}

impl NarrativeEngine {
    /// Fresh engine with no firing history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every firing so far, oldest first.
    #[must_use]
    pub fn history(&self) -> &[FiredRecord] {
        &self.history
    }

    /// Whether an event has fired at least once this session.
    #[must_use]
    pub fn has_fired(&self, id: &EventId) -> bool {
        self.history.iter().any(|record| &record.id == id)
    }

    /// Evaluate every registered event against the current state, firing
    /// the ones whose triggers hold. Later events see earlier events'
    /// effects within the same sweep.
    pub fn sweep<R: Rng>(
        &mut self,
        state: &mut GameState,
        stats: &Statistics,
        ctx: &SweepContext<'_>,
        rng: &mut R,
    ) -> Vec<FiredEvent> {
        let mut fired = Vec::new();
        for event in ctx.events {
            if self.fired_once.contains(&event.id) {
                continue;
            }
            if let Some(cooldown) = event.cooldown_turns {
                if let Some(last) = self.last_triggered.get(&event.id) {
                    if state.turn_counter.saturating_sub(*last) < cooldown {
                        continue;
                    }
                }
            }
            if !should_trigger(event, state, stats, ctx, rng) {
                continue;
            }
            fired.push(self.fire(event, state, ctx, rng));
        }
        fired
    }

    fn fire<R: Rng>(
        &mut self,
        event: &EventDef,
        state: &mut GameState,
        ctx: &SweepContext<'_>,
        rng: &mut R,
    ) -> FiredEvent {
        let applied = apply_effects(state, &event.effects, ctx.stats_config);
        let fragments = story_fragments(&applied.stat_changes, ctx.narrative_config, rng);
        self.last_triggered
            .insert(event.id.clone(), state.turn_counter);
        if event.one_time {
            self.fired_once.insert(event.id.clone());
        }
        self.history.push(FiredRecord {
            id: event.id.clone(),
            turn: state.turn_counter,
        });
        info!(event = %event.id, turn = state.turn_counter, "narrative event fired");
        FiredEvent {
            id: event.id.clone(),
            narrative: event.narrative.clone(),
            applied,
            fragments,
        }
    }
}

fn should_trigger<R: Rng>(
    event: &EventDef,
    state: &GameState,
    stats: &Statistics,
    ctx: &SweepContext<'_>,
    rng: &mut R,
) -> bool {
    match &event.trigger {
        EventTrigger::MoodShift { from, to } => ctx.transition == Some((*from, *to)),
        EventTrigger::StatThreshold { stat, op, value } => {
            op.check(stat_reading(state, *stat), *value)
        }
        EventTrigger::TurnCount { at_least } => state.turn_counter >= *at_least,
        EventTrigger::Random {
            probability,
            min_turns,
            moods,
        } => {
            state.turn_counter >= *min_turns
                && moods.contains(&ctx.mood)
                && rng.r#gen::<f64>() < *probability
        }
        EventTrigger::CharacterGated {
            characters,
            min_stats,
            required_flags,
        } => {
            let Some(active) = &state.character else {
                return false;
            };
            if !characters.contains(active) {
                return false;
            }
            if min_stats
                .iter()
                .any(|(stat, minimum)| stat_reading(state, *stat) < *minimum)
            {
                return false;
            }
            required_flags.iter().all(|flag| state.flag_bool(flag))
        }
        EventTrigger::ItemUsed { item, character } => {
            state.recently_used_item.as_ref() == Some(item)
                && character
                    .as_ref()
                    .is_none_or(|required| state.character.as_ref() == Some(required))
        }
        EventTrigger::AbilityUses {
            character,
            ability,
            at_least,
        } => {
            state.character.as_ref() == Some(character) && stats.ability_uses(ability) >= *at_least
        }
    }
}

fn stat_reading(state: &GameState, stat: StatKind) -> i32 {
    match stat {
        StatKind::Sanity => state.sanity,
        StatKind::Awareness => state.awareness,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
