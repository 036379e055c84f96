//! Shared effect application for events and achievement rewards.
//!
//! Conditional events and achievement rewards both express their impact as
//! a keyed delta set. Known stats (sanity, awareness) route through the
//! clamped writers in [`crate::stats`]; every other key accumulates in the
//! session flag table as a hidden integer stat. One primitive, one set of
//! clamping rules, no drift between the two callers.

use serde::{Deserialize, Serialize};

use crate::config::StatsConfig;
use crate::state::GameState;
use crate::stats::{self, StatChange};

/// An ordered set of keyed deltas, applied first to last.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EffectSet(pub Vec<(String, i64)>);

impl EffectSet {
    /// An empty effect set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: append one keyed delta.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, delta: i64) -> Self {
        self.0.push((key.into(), delta));
        self
    }

    /// Whether this set carries no deltas at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// What applying an [`EffectSet`] did to the session.
#[derive(Debug, Clone, Default)]
pub struct AppliedEffects {
    /// Clamped writes to the primary stats, in application order.
    pub stat_changes: Vec<StatChange>,
    /// Whether any write ended the session.
    pub ended_session: bool,
}

/// Apply every delta in the set to the session state.
///
/// `sanity` and `awareness` go through the clamped stat writers; unknown
/// keys accumulate as integer flags. Later entries see the writes of
/// earlier ones.
pub fn apply_effects(
    state: &mut GameState,
    effects: &EffectSet,
    config: &StatsConfig,
) -> AppliedEffects {
    let mut applied = AppliedEffects::default();
    for (key, delta) in &effects.0 {
        let delta_i32 = i32::try_from(*delta).unwrap_or(if *delta > 0 { i32::MAX } else { i32::MIN });
        match key.as_str() {
            "sanity" => {
                let change = stats::modify_sanity(state, delta_i32, config);
                applied.ended_session |= change.ended_session;
                applied.stat_changes.push(change);
            }
            "awareness" => {
                let change = stats::modify_awareness(state, delta_i32, config);
                applied.stat_changes.push(change);
            }
            _ => state.bump_flag(key, *delta),
        }
    }
    applied
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
