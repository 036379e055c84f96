//! Achievement evaluation: an independent observer of session state.
//!
//! Runs after every turn, walking the registered definitions and unlocking
//! any whose condition now holds. The unlocked set is append-only for the
//! life of a session: re-checking with unchanged state unlocks nothing and
//! never double-applies a reward.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::StatsConfig;
use crate::content::{AchievementCondition, AchievementDef};
use crate::effects::{apply_effects, AppliedEffects};
use crate::state::GameState;
use crate::stats::Statistics;
use crate::types::{AchievementId, StatKind};

/// One unlock, with everything the caller must surface.
#[derive(Debug, Clone)]
pub struct UnlockedAchievement {
    /// Which achievement unlocked.
    pub id: AchievementId,
    /// Display name for the notification.
    pub name: String,
    /// Score contribution.
    pub points: u32,
    /// What the reward effects did.
    pub applied: AppliedEffects,
}

/// Runtime unlock set; crosses the snapshot boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementEngine {
    unlocked: BTreeSet<AchievementId>,
}

impl AchievementEngine {
    /// Fresh engine with nothing unlocked.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an achievement has unlocked this session.
    #[must_use]
    pub fn is_unlocked(&self, id: &AchievementId) -> bool {
        self.unlocked.contains(id)
    }

    /// Every unlocked achievement id.
    #[must_use]
    pub fn unlocked(&self) -> &BTreeSet<AchievementId> {
        &self.unlocked
    }

    /// `(unlocked, total)` against a definition set.
    #[must_use]
    pub fn progress(&self, defs: &[AchievementDef]) -> (usize, usize) {
        let done = defs
            .iter()
            .filter(|def| self.unlocked.contains(&def.id))
            .count();
        (done, defs.len())
    }

    /// Total points earned against a definition set.
    #[must_use]
    pub fn total_points(&self, defs: &[AchievementDef]) -> u32 {
        defs.iter()
            .filter(|def| self.unlocked.contains(&def.id))
            .map(|def| def.points)
            .sum()
    }

    /// Force an unlock by id, applying no rewards. Used by transition
    /// announcements that carry their own achievement grants.
    pub fn grant(&mut self, id: AchievementId) -> bool {
        let fresh = self.unlocked.insert(id.clone());
        if fresh {
            info!(achievement = %id, "achievement granted");
        }
        fresh
    }

    /// Evaluate every definition, unlocking the ones whose condition holds.
    ///
    /// Rewards apply through the shared effect resolver as each unlock
    /// lands, so a later definition can see an earlier one's reward within
    /// the same pass.
    pub fn check_all(
        &mut self,
        state: &mut GameState,
        stats: &Statistics,
        defs: &[AchievementDef],
        stats_config: &StatsConfig,
    ) -> Vec<UnlockedAchievement> {
        let mut unlocked = Vec::new();
        for def in defs {
            if self.unlocked.contains(&def.id) {
                continue;
            }
            if let Some(required) = &def.character {
                if state.character.as_ref() != Some(required) {
                    continue;
                }
            }
            if !condition_met(&def.condition, state, stats) {
                continue;
            }
            self.unlocked.insert(def.id.clone());
            let applied = apply_effects(state, &def.rewards, stats_config);
            info!(achievement = %def.id, points = def.points, "achievement unlocked");
            unlocked.push(UnlockedAchievement {
                id: def.id.clone(),
                name: def.name.clone(),
                points: def.points,
                applied,
            });
        }
        unlocked
    }
}

fn condition_met(condition: &AchievementCondition, state: &GameState, stats: &Statistics) -> bool {
    match condition {
        AchievementCondition::FlagTrue { key } => state.flag_bool(key),
        AchievementCondition::IntFlagAtLeast { key, at_least } => state.flag_int(key) >= *at_least,
        AchievementCondition::ItemUses { item, at_least } => stats.item_uses(item) >= *at_least,
        AchievementCondition::MoodShift { from, to } => stats.has_seen_shift(*from, *to),
        AchievementCondition::MoodReached { mood } => stats.has_seen_mood(*mood),
        AchievementCondition::RoomsVisited { at_least } => stats.rooms_visited.len() >= *at_least,
        AchievementCondition::RoomVisited { room } => stats.rooms_visited.contains(room),
        AchievementCondition::Interactions { at_least } => stats.interactions >= *at_least,
        AchievementCondition::UniqueQuestions { at_least } => {
            stats.unique_questions.len() >= *at_least
        }
        AchievementCondition::TurnsSurvived { at_least } => stats.turns_survived >= *at_least,
        AchievementCondition::StatReached { stat, value } => match stat {
            StatKind::Sanity => stats.max_sanity >= *value,
            StatKind::Awareness => stats.max_awareness >= *value,
        },
        AchievementCondition::StatAtMost { stat, value } => match stat {
            StatKind::Sanity => state.sanity <= *value,
            StatKind::Awareness => state.awareness <= *value,
        },
        AchievementCondition::MoodTurns { mood, at_least } => {
            stats.turns_in_mood(*mood) >= *at_least
        }
        AchievementCondition::FullSanityStreak { at_least } => {
            stats.full_sanity_streak >= *at_least
        }
        AchievementCondition::AbilityUses { ability, at_least } => {
            stats.ability_uses(ability) >= *at_least
        }
        AchievementCondition::EndingReached { ending } => state
            .flag("ending")
            .and_then(crate::types::FlagValue::as_text)
            == Some(ending.as_str()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{AchievementCategory, Rarity};
    use crate::effects::EffectSet;
    use crate::stats::TrackEvent;
    use crate::types::{CharacterId, ItemId, Mood, RoomId, SessionId};

    fn fresh() -> GameState {
        GameState::new(SessionId::new(), RoomId::new("entrance"))
    }

    fn def(id: &str, condition: AchievementCondition, rewards: EffectSet) -> AchievementDef {
        AchievementDef {
            id: AchievementId::new(id),
            name: id.to_string(),
            description: format!("unlock {id}"),
            category: AchievementCategory::Story,
            rarity: Rarity::Common,
            points: 10,
            hidden: false,
            character: None,
            condition,
            rewards,
        }
    }

    #[test]
    fn unlock_applies_rewards_exactly_once() {
        let defs = vec![def(
            "first_contact",
            AchievementCondition::Interactions { at_least: 1 },
            EffectSet::new().with("awareness", 10),
        )];
        let mut engine = AchievementEngine::new();
        let mut state = fresh();
        let mut stats = Statistics::new();
        let config = StatsConfig::default();

        stats.track(TrackEvent::Interaction { question: "hello?" });
        let unlocked = engine.check_all(&mut state, &stats, &defs, &config);
        assert_eq!(unlocked.len(), 1);
        assert_eq!(unlocked[0].points, 10);
        assert_eq!(state.awareness, 10);

        // Re-check with unchanged state: nothing new, reward not re-applied.
        let again = engine.check_all(&mut state, &stats, &defs, &config);
        assert!(again.is_empty());
        assert_eq!(state.awareness, 10);
    }

    #[test]
    fn character_restricted_definition_needs_that_character() {
        let mut base = def(
            "guardian",
            AchievementCondition::AbilityUses {
                ability: "protective_instinct".to_string(),
                at_least: 1,
            },
            EffectSet::new(),
        );
        base.character = Some(CharacterId::new("security-guard"));
        let defs = vec![base];
        let mut engine = AchievementEngine::new();
        let mut stats = Statistics::new();
        stats.track(TrackEvent::AbilityUsed("protective_instinct"));
        let config = StatsConfig::default();

        let mut state = fresh();
        state.character = Some(CharacterId::new("intern"));
        assert!(engine.check_all(&mut state, &stats, &defs, &config).is_empty());

        state.character = Some(CharacterId::new("security-guard"));
        assert_eq!(engine.check_all(&mut state, &stats, &defs, &config).len(), 1);
    }

    #[test]
    fn stat_reached_uses_the_observed_maximum() {
        let defs = vec![def(
            "enlightenment",
            AchievementCondition::StatReached {
                stat: StatKind::Awareness,
                value: 100,
            },
            EffectSet::new(),
        )];
        let mut engine = AchievementEngine::new();
        let mut state = fresh();
        let mut stats = Statistics::new();
        let config = StatsConfig::default();

        // Awareness peaked at 100 on an earlier turn, then dropped.
        stats.track(TrackEvent::TurnCompleted {
            sanity: 50,
            awareness: 100,
            mood: Mood::Malicious,
        });
        state.awareness = 40;
        assert_eq!(engine.check_all(&mut state, &stats, &defs, &config).len(), 1);
    }

    #[test]
    fn stat_at_most_reads_the_current_value() {
        let defs = vec![def(
            "death_defier",
            AchievementCondition::StatAtMost {
                stat: StatKind::Sanity,
                value: 5,
            },
            EffectSet::new().with("courage", 30),
        )];
        let mut engine = AchievementEngine::new();
        let mut state = fresh();
        let stats = Statistics::new();
        let config = StatsConfig::default();

        state.sanity = 6;
        assert!(engine.check_all(&mut state, &stats, &defs, &config).is_empty());
        state.sanity = 5;
        assert_eq!(engine.check_all(&mut state, &stats, &defs, &config).len(), 1);
        assert_eq!(state.flag_int("courage"), 30);
    }

    #[test]
    fn mood_shift_condition_reads_the_transition_history() {
        let defs = vec![def(
            "changing_faces",
            AchievementCondition::MoodShift {
                from: Mood::Friendly,
                to: Mood::Ambiguous,
            },
            EffectSet::new(),
        )];
        let mut engine = AchievementEngine::new();
        let mut state = fresh();
        let mut stats = Statistics::new();
        let config = StatsConfig::default();

        assert!(engine.check_all(&mut state, &stats, &defs, &config).is_empty());
        stats.track(TrackEvent::MoodChanged {
            from: Mood::Friendly,
            to: Mood::Ambiguous,
        });
        assert_eq!(engine.check_all(&mut state, &stats, &defs, &config).len(), 1);
    }

    #[test]
    fn ending_condition_matches_the_ending_flag() {
        let defs = vec![def(
            "escape_artist",
            AchievementCondition::EndingReached {
                ending: "successful_escape".to_string(),
            },
            EffectSet::new(),
        )];
        let mut engine = AchievementEngine::new();
        let mut state = fresh();
        let stats = Statistics::new();
        let config = StatsConfig::default();

        state.set_flag("ending", "digital_transcendence");
        assert!(engine.check_all(&mut state, &stats, &defs, &config).is_empty());
        state.set_flag("ending", "successful_escape");
        assert_eq!(engine.check_all(&mut state, &stats, &defs, &config).len(), 1);
    }

    #[test]
    fn full_sanity_streak_condition() {
        let defs = vec![def(
            "mental_fortress",
            AchievementCondition::FullSanityStreak { at_least: 3 },
            EffectSet::new(),
        )];
        let mut engine = AchievementEngine::new();
        let mut state = fresh();
        let mut stats = Statistics::new();
        let config = StatsConfig::default();

        for _ in 0..2 {
            stats.track(TrackEvent::TurnCompleted {
                sanity: 100,
                awareness: 0,
                mood: Mood::Friendly,
            });
        }
        assert!(engine.check_all(&mut state, &stats, &defs, &config).is_empty());
        stats.track(TrackEvent::TurnCompleted {
            sanity: 100,
            awareness: 0,
            mood: Mood::Friendly,
        });
        assert_eq!(engine.check_all(&mut state, &stats, &defs, &config).len(), 1);
    }

    #[test]
    fn grant_is_idempotent() {
        let mut engine = AchievementEngine::new();
        assert!(engine.grant(AchievementId::new("first_doubt")));
        assert!(!engine.grant(AchievementId::new("first_doubt")));
        assert!(engine.is_unlocked(&AchievementId::new("first_doubt")));
    }

    #[test]
    fn rooms_visited_counts_through_statistics() {
        let defs = vec![def(
            "digital_wanderer",
            AchievementCondition::RoomsVisited { at_least: 3 },
            EffectSet::new(),
        )];
        let mut engine = AchievementEngine::new();
        let mut state = fresh();
        let mut stats = Statistics::new();
        let config = StatsConfig::default();

        for room in ["entrance", "hallway_main", "security_office"] {
            stats.track(TrackEvent::RoomVisited(&RoomId::new(room)));
        }
        assert_eq!(engine.check_all(&mut state, &stats, &defs, &config).len(), 1);
    }

    #[test]
    fn item_use_condition_counts_uses_not_possession() {
        let defs = vec![def(
            "memory_recovery",
            AchievementCondition::ItemUses {
                item: ItemId::new("memory_fragment"),
                at_least: 1,
            },
            EffectSet::new().with("sanity", 10),
        )];
        let mut engine = AchievementEngine::new();
        let mut state = fresh();
        state.sanity = 50;
        let mut stats = Statistics::new();
        let config = StatsConfig::default();

        state.add_item(ItemId::new("memory_fragment"));
        assert!(engine.check_all(&mut state, &stats, &defs, &config).is_empty());

        stats.track(TrackEvent::ItemUsed(&ItemId::new("memory_fragment")));
        let unlocked = engine.check_all(&mut state, &stats, &defs, &config);
        assert_eq!(unlocked.len(), 1);
        assert_eq!(state.sanity, 60);
    }

    #[test]
    fn unlock_set_round_trips_through_serde() {
        let mut engine = AchievementEngine::new();
        engine.grant(AchievementId::new("first_awakening"));
        engine.grant(AchievementId::new("first_doubt"));

        let json = serde_json::to_string(&engine).expect("serialize");
        let back: AchievementEngine = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(engine, back);
    }
}
