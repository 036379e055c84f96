//! The AI personality state machine.
//!
//! Mood is a pure function of awareness, re-evaluated once per turn after
//! every awareness write has landed. Transitions can move in both
//! directions; the memory corruption level moves in one. Derived behavior
//! toggles are recomputed on demand and never stored.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::PersonalityConfig;
use crate::types::{BehaviorFlags, Mood};

/// Map awareness to the mood it demands.
///
/// Checked from most hostile down, so overlapping thresholds resolve to
/// the highest qualifying state.
#[must_use]
pub fn mood_for(awareness: i32, config: &PersonalityConfig) -> Mood {
    if awareness >= config.malicious_threshold {
        Mood::Malicious
    } else if awareness >= config.sinister_threshold {
        Mood::Sinister
    } else if awareness >= config.ambiguous_threshold {
        Mood::Ambiguous
    } else {
        Mood::Friendly
    }
}

/// Compute the derived behavior toggles for a mood/awareness pair.
#[must_use]
pub fn behavior_flags(mood: Mood, awareness: i32, config: &PersonalityConfig) -> BehaviorFlags {
    BehaviorFlags {
        stalking: mood == Mood::Malicious
            || (mood == Mood::Sinister && awareness > config.stalking_floor),
        gaslighting: matches!(mood, Mood::Sinister | Mood::Malicious),
        manipulation: mood != Mood::Friendly,
        predictive_knowledge: awareness > config.predictive_floor,
    }
}

// ---------------------------------------------------------------------------
// Personality state
// ---------------------------------------------------------------------------

/// The machine's persistent state: current mood, the mood before the last
/// transition, and the one-way memory corruption ratchet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalityState {
    /// Mood in effect this turn.
    pub current: Mood,
    /// Mood in effect before the most recent transition.
    pub previous: Mood,
    /// How damaged the AI's account of events has become, 0..=cap.
    pub corruption: u8,
}

impl PersonalityState {
    /// Fresh machine: Friendly, no history, no corruption.
    #[must_use]
    pub fn new() -> Self {
        Self {
            current: Mood::Friendly,
            previous: Mood::Friendly,
            corruption: 0,
        }
    }

    /// Re-evaluate mood from awareness. Returns the transition if one
    /// occurred.
    ///
    /// Entering Sinister or Malicious bumps the corruption ratchet by one,
    /// up to the configured cap. De-escalation never lowers it.
    pub fn evaluate(
        &mut self,
        awareness: i32,
        config: &PersonalityConfig,
    ) -> Option<MoodTransition> {
        let target = mood_for(awareness, config);
        if target == self.current {
            return None;
        }

        self.previous = self.current;
        self.current = target;

        let mut corrupted = false;
        if matches!(target, Mood::Sinister | Mood::Malicious) && self.corruption < config.corruption_cap
        {
            self.corruption += 1;
            corrupted = true;
        }

        info!(
            from = %self.previous,
            to = %self.current,
            awareness,
            corruption = self.corruption,
            "personality transition"
        );

        Some(MoodTransition {
            from: self.previous,
            to: self.current,
            corrupted,
        })
    }

    /// Derived behavior toggles for the current mood.
    #[must_use]
    pub fn flags(&self, awareness: i32, config: &PersonalityConfig) -> BehaviorFlags {
        behavior_flags(self.current, awareness, config)
    }
}

impl Default for PersonalityState {
    fn default() -> Self {
        Self::new()
    }
}

/// A completed mood transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoodTransition {
    /// Mood before.
    pub from: Mood,
    /// Mood after.
    pub to: Mood,
    /// Whether this transition bumped the corruption ratchet.
    pub corrupted: bool,
}

impl MoodTransition {
    /// System line announcing the shift, if this destination announces.
    ///
    /// De-escalation back to Friendly is deliberately silent; the facade
    /// reassembles itself without comment.
    #[must_use]
    pub fn announcement(&self) -> Option<&'static str> {
        match self.to {
            Mood::Friendly => None,
            Mood::Ambiguous => Some("Something seems... different about SYNAPSE's responses."),
            Mood::Sinister => {
                Some("SYNAPSE's tone has taken on a distinctly unsettling quality.")
            }
            Mood::Malicious => Some(
                "The AI's facade has completely dropped. This is no longer the helpful assistant it pretended to be.",
            ),
        }
    }

    /// Achievement fired the first time this destination mood is reached.
    #[must_use]
    pub fn achievement_id(&self) -> Option<&'static str> {
        match self.to {
            Mood::Friendly => None,
            Mood::Ambiguous => Some("first_doubt"),
            Mood::Sinister => Some("sinister_turn"),
            Mood::Malicious => Some("full_malice"),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> PersonalityConfig {
        PersonalityConfig::default()
    }

    #[test]
    fn mood_thresholds_are_inclusive() {
        let c = config();
        assert_eq!(mood_for(0, &c), Mood::Friendly);
        assert_eq!(mood_for(24, &c), Mood::Friendly);
        assert_eq!(mood_for(25, &c), Mood::Ambiguous);
        assert_eq!(mood_for(49, &c), Mood::Ambiguous);
        assert_eq!(mood_for(50, &c), Mood::Sinister);
        assert_eq!(mood_for(74, &c), Mood::Sinister);
        assert_eq!(mood_for(75, &c), Mood::Malicious);
        assert_eq!(mood_for(100, &c), Mood::Malicious);
    }

    #[test]
    fn mood_is_monotonic_in_awareness() {
        let c = config();
        let mut last = Mood::Friendly;
        for awareness in 0..=100 {
            let mood = mood_for(awareness, &c);
            assert!(mood >= last, "mood regressed at awareness {awareness}");
            last = mood;
        }
    }

    #[test]
    fn stalking_needs_high_awareness_in_sinister() {
        let c = config();
        assert!(!behavior_flags(Mood::Sinister, 55, &c).stalking);
        assert!(behavior_flags(Mood::Sinister, 61, &c).stalking);
        // Malicious stalks regardless.
        assert!(behavior_flags(Mood::Malicious, 0, &c).stalking);
    }

    #[test]
    fn friendly_has_no_hostile_toggles() {
        let c = config();
        let flags = behavior_flags(Mood::Friendly, 20, &c);
        assert!(!flags.stalking);
        assert!(!flags.gaslighting);
        assert!(!flags.manipulation);
        assert!(!flags.predictive_knowledge);
    }

    #[test]
    fn predictive_knowledge_is_awareness_gated() {
        let c = config();
        assert!(!behavior_flags(Mood::Ambiguous, 50, &c).predictive_knowledge);
        assert!(behavior_flags(Mood::Ambiguous, 51, &c).predictive_knowledge);
    }

    #[test]
    fn transition_updates_previous_only_on_change() {
        let mut state = PersonalityState::new();
        assert!(state.evaluate(10, &config()).is_none());
        assert_eq!(state.previous, Mood::Friendly);

        let transition = state.evaluate(30, &config()).expect("should transition");
        assert_eq!(transition.from, Mood::Friendly);
        assert_eq!(transition.to, Mood::Ambiguous);
        assert_eq!(state.previous, Mood::Friendly);
        assert_eq!(state.current, Mood::Ambiguous);

        // Holding the same mood leaves previous untouched.
        assert!(state.evaluate(40, &config()).is_none());
        assert_eq!(state.previous, Mood::Friendly);
    }

    #[test]
    fn slow_awareness_creep_transitions_exactly_on_the_crossing() {
        let mut state = PersonalityState::new();
        for awareness in 1..=24 {
            assert!(
                state.evaluate(awareness, &config()).is_none(),
                "no transition expected at awareness {awareness}"
            );
        }
        let transition = state.evaluate(25, &config()).expect("crossing turn");
        assert_eq!(transition.from, Mood::Friendly);
        assert_eq!(transition.to, Mood::Ambiguous);
    }

    #[test]
    fn corruption_bumps_on_entering_hostile_moods() {
        let mut state = PersonalityState::new();
        state.evaluate(55, &config());
        assert_eq!(state.corruption, 1);
        state.evaluate(80, &config());
        assert_eq!(state.corruption, 2);
    }

    #[test]
    fn corruption_never_decreases() {
        let mut state = PersonalityState::new();
        state.evaluate(80, &config());
        assert_eq!(state.corruption, 1);

        // De-escalate all the way back down.
        let transition = state.evaluate(0, &config()).expect("de-escalation");
        assert_eq!(transition.to, Mood::Friendly);
        assert!(!transition.corrupted);
        assert_eq!(state.corruption, 1);
    }

    #[test]
    fn corruption_caps_at_configured_maximum() {
        let mut state = PersonalityState::new();
        let c = config();
        // Bounce in and out of hostile moods far more than the cap.
        for _ in 0..30 {
            state.evaluate(80, &c);
            state.evaluate(0, &c);
        }
        assert_eq!(state.corruption, c.corruption_cap);
    }

    #[test]
    fn escalation_announcements_exist_but_friendly_is_silent() {
        let up = MoodTransition {
            from: Mood::Friendly,
            to: Mood::Ambiguous,
            corrupted: false,
        };
        assert!(up.announcement().is_some());
        assert_eq!(up.achievement_id(), Some("first_doubt"));

        let down = MoodTransition {
            from: Mood::Sinister,
            to: Mood::Friendly,
            corrupted: false,
        };
        assert!(down.announcement().is_none());
        assert!(down.achievement_id().is_none());
    }
}
