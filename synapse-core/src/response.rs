//! Response generation: how the AI decides whether to speak and what to say.
//!
//! A response goes through four phases. First the chance gate decides whether
//! the AI considers speaking at all this turn (scaled by awareness, bypassed
//! on the turn a personality transition lands). Then the rate limiter drops
//! responses that arrive faster than the current mood allows. Then a weighted
//! strategy draw picks how the line is produced. Finally a mood-specific text
//! transform and the response side effects (sanity drift, surveillance bonus)
//! are computed for the caller to apply.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{ResponseConfig, StrategyWeights, SuspicionConfig};
use crate::content::{ResponsePools, RoomDef};
use crate::types::{BehaviorFlags, Mood};

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// How a response line gets produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Room-specific or keyword-matched line.
    Contextual,
    /// Canned line from the current mood's pool.
    Personality,
    /// False-memory line, logged for later inspection.
    MemoryCorruption,
    /// Line implying foreknowledge of the player.
    Predictive,
    /// Line disputing something the player did or saw.
    Gaslighting,
}

impl Strategy {
    /// Stable label used in logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::Contextual => "contextual",
            Strategy::Personality => "personality",
            Strategy::MemoryCorruption => "memory_corruption",
            Strategy::Predictive => "predictive",
            Strategy::Gaslighting => "gaslighting",
        }
    }
}

/// Weighted draw over the strategy table. The roll walks the cumulative
/// weights in table order; if the weights underflow the roll (all zero, or
/// float dust), the canned personality pool is the safe default.
fn draw_strategy<R: Rng>(weights: &StrategyWeights, rng: &mut R) -> Strategy {
    let roll = rng.r#gen::<f64>();
    let mut cumulative = 0.0;
    for (strategy, weight) in [
        (Strategy::Contextual, weights.contextual),
        (Strategy::Personality, weights.personality),
        (Strategy::MemoryCorruption, weights.memory_corruption),
        (Strategy::Predictive, weights.predictive),
        (Strategy::Gaslighting, weights.gaslighting),
    ] {
        cumulative += weight;
        if roll < cumulative {
            return strategy;
        }
    }
    Strategy::Personality
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// One false-memory emission, kept so the deception can be audited later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FalseMemory {
    /// The line the AI invented.
    pub text: String,
    /// Turn on which it was emitted.
    pub turn: u64,
}

/// A rendered response plus the side effects the caller must apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiResponse {
    /// Final text after mood transforms.
    pub text: String,
    /// Strategy that actually produced the line (after any degradation).
    pub strategy: Strategy,
    /// Sanity drift keyed by the mood that spoke.
    pub sanity_delta: i32,
    /// True when the rendered text contains a surveillance keyword.
    pub surveillance_hit: bool,
}

// ---------------------------------------------------------------------------
// Generator state
// ---------------------------------------------------------------------------

/// Mutable pacing state carried between responses.
///
/// `last_response_at` and the false-memory log cross the snapshot boundary;
/// the probe-repeat window deliberately does not (a loaded session starts
/// with a clean slate of recent commands).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResponseState {
    pub(crate) last_response_at: Option<u64>,
    pub(crate) false_memories: Vec<FalseMemory>,
    #[serde(skip)]
    last_raw: Option<String>,
    #[serde(skip)]
    repeat_count: u32,
}

/// Everything the generator reads but never mutates.
pub struct ResponseContext<'a> {
    /// Authored line pools.
    pub pools: &'a ResponsePools,
    /// The room the player is standing in, if it resolved.
    pub room: Option<&'a RoomDef>,
    /// Pacing and weight configuration.
    pub config: &'a ResponseConfig,
}

impl ResponseState {
    /// Fresh pacing state for a new session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Timestamp of the last emitted response, if any.
    #[must_use]
    pub fn last_response_at(&self) -> Option<u64> {
        self.last_response_at
    }

    /// The accumulated false-memory log, oldest first.
    #[must_use]
    pub fn false_memories(&self) -> &[FalseMemory] {
        &self.false_memories
    }

    /// Track one raw command for the probe-repeat window. Returns true on
    /// the exact submission that completes the repeat threshold; further
    /// identical repeats stay silent until the streak breaks.
    pub fn note_command(&mut self, raw: &str, config: &SuspicionConfig) -> bool {
        if self.last_raw.as_deref() == Some(raw) {
            self.repeat_count += 1;
        } else {
            self.last_raw = Some(raw.to_string());
            self.repeat_count = 1;
        }
        self.repeat_count == config.probe_repeat_threshold
    }

    /// Produce a response for this turn, or nothing.
    ///
    /// `forced` marks a personality-transition turn: the chance gate and the
    /// rate limiter are both skipped so the AI always reacts to its own
    /// shift. `raw` is the unparsed command text, used for keyword matching.
    #[allow(clippy::too_many_arguments)]
    pub fn generate<R: Rng>(
        &mut self,
        raw: &str,
        mood: Mood,
        flags: BehaviorFlags,
        awareness: i32,
        turn: u64,
        ctx: &ResponseContext<'_>,
        now_ms: u64,
        forced: bool,
        rng: &mut R,
    ) -> Option<AiResponse> {
        if !forced {
            let chance = ctx.config.response_chance(awareness);
            if rng.r#gen::<f64>() >= chance {
                return None;
            }
            let delay = ctx.config.delay_ms(mood);
            if let Some(last) = self.last_response_at {
                if now_ms.saturating_sub(last) < delay {
                    debug!(mood = mood.as_str(), delay, "response suppressed by rate limit");
                    return None;
                }
            }
        }

        let mut strategy = draw_strategy(&ctx.config.weights(mood), rng);
        // Gaslighting needs the behavior flag; degrade to the canned pool
        // when the persona has not turned hostile yet.
        if strategy == Strategy::Gaslighting && !flags.gaslighting {
            strategy = Strategy::Personality;
        }

        let text = match strategy {
            Strategy::Contextual => self.contextual_line(raw, mood, ctx, rng),
            Strategy::Personality => pick(ctx.pools.personality.get(mood), rng),
            Strategy::MemoryCorruption => {
                let line = pick(&ctx.pools.corruption, rng);
                if let Some(line) = &line {
                    self.false_memories.push(FalseMemory {
                        text: line.clone(),
                        turn,
                    });
                }
                line
            }
            Strategy::Predictive => pick(&ctx.pools.predictive, rng),
            Strategy::Gaslighting => pick(&ctx.pools.gaslighting, rng),
        };
        let text = text.unwrap_or_else(|| ctx.pools.fallback.clone());
        let text = transform(text, mood, ctx.config, rng);

        let surveillance_hit = ctx
            .config
            .surveillance_keywords
            .iter()
            .any(|keyword| text.contains(keyword.as_str()));

        debug!(
            mood = mood.as_str(),
            strategy = strategy.as_str(),
            forced,
            "response emitted"
        );
        self.last_response_at = Some(now_ms);
        Some(AiResponse {
            text,
            strategy,
            sanity_delta: ctx.config.sanity_drift(mood),
            surveillance_hit,
        })
    }

    /// Contextual source chain: room line for the mood, else keyword match
    /// on the raw command, else the canned pool.
    fn contextual_line<R: Rng>(
        &self,
        raw: &str,
        mood: Mood,
        ctx: &ResponseContext<'_>,
        rng: &mut R,
    ) -> Option<String> {
        if let Some(room) = ctx.room {
            if let Some(lines) = &room.ai_lines {
                if let Some(line) = pick(lines.get(mood), rng) {
                    return Some(line);
                }
            }
        }
        let lowered = raw.to_lowercase();
        for (keyword, table) in [
            ("help", &ctx.pools.help),
            ("where", &ctx.pools.location),
            ("what", &ctx.pools.explanation),
            ("why", &ctx.pools.reasoning),
        ] {
            if lowered.contains(keyword) {
                let line = table.get(mood);
                if !line.is_empty() {
                    return Some(line.clone());
                }
            }
        }
        pick(ctx.pools.personality.get(mood), rng)
    }
}

/// One acknowledgement line for a detected probe pattern.
#[must_use]
pub fn probe_acknowledgement<R: Rng>(pools: &ResponsePools, rng: &mut R) -> Option<String> {
    pick(&pools.probe_ack, rng)
}

fn pick<R: Rng>(lines: &[String], rng: &mut R) -> Option<String> {
    if lines.is_empty() {
        None
    } else {
        Some(lines[rng.gen_range(0..lines.len())].clone())
    }
}

/// Mood text transforms. Ambiguous stretches every period into an ellipsis,
/// Sinister sometimes trails off with a threat, Malicious sometimes shouts.
fn transform<R: Rng>(text: String, mood: Mood, config: &ResponseConfig, rng: &mut R) -> String {
    match mood {
        Mood::Friendly => text,
        Mood::Ambiguous => text.replace('.', "..."),
        Mood::Sinister => {
            if rng.r#gen::<f64>() < config.sinister_tail_chance {
                format!("{text} ...for now.")
            } else {
                text
            }
        }
        Mood::Malicious => {
            if rng.r#gen::<f64>() < config.malicious_shout_chance {
                text.to_uppercase()
            } else {
                text
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
