//! Configuration for the SYNAPSE engine.
//!
//! All sections are optional in TOML; missing fields fall back to the
//! shipped tuning values, so an empty config file yields the stock game
//! balance. Deserialized once at engine construction and treated as
//! immutable afterwards.

use serde::{Deserialize, Serialize};

use crate::types::Mood;

/// Top-level SYNAPSE configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SynapseConfig {
    /// Personality state machine tuning.
    #[serde(default)]
    pub personality: PersonalityConfig,
    /// Response generator tuning.
    #[serde(default)]
    pub response: ResponseConfig,
    /// Suspicious-activity tracking.
    #[serde(default)]
    pub suspicion: SuspicionConfig,
    /// Stat clamping and threshold crossings.
    #[serde(default)]
    pub stats: StatsConfig,
    /// Narrative fragment severity cutoffs.
    #[serde(default)]
    pub narrative: NarrativeConfig,
    /// Ambient event scheduling.
    #[serde(default)]
    pub ambient: AmbientConfig,
    /// Save-slot persistence settings.
    #[serde(default)]
    pub persistence: PersistenceConfig,
    /// Telemetry and turn budget monitoring.
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl SynapseConfig {
    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    /// Returns an error if the TOML is malformed.
    pub fn from_toml(toml_str: &str) -> crate::error::Result<Self> {
        let config: Self =
            toml::from_str(toml_str).map_err(|e| crate::SynapseError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Check cross-field consistency.
    ///
    /// # Errors
    /// Returns a [`SynapseError::Config`](crate::SynapseError::Config) naming
    /// the first violated constraint.
    pub fn validate(&self) -> crate::error::Result<()> {
        let p = &self.personality;
        if !(p.ambiguous_threshold < p.sinister_threshold
            && p.sinister_threshold < p.malicious_threshold)
        {
            return Err(crate::SynapseError::Config(format!(
                "mood thresholds must be strictly increasing, got {}/{}/{}",
                p.ambiguous_threshold, p.sinister_threshold, p.malicious_threshold
            )));
        }
        if p.corruption_cap == 0 {
            return Err(crate::SynapseError::Config(
                "corruption_cap must be at least 1".to_string(),
            ));
        }
        for mood in Mood::ALL {
            let weights = self.response.weights(mood);
            if !weights.is_normalized(WEIGHT_EPSILON) {
                return Err(crate::SynapseError::Config(format!(
                    "strategy weights for {mood} sum to {}, expected 1.0",
                    weights.sum()
                )));
            }
        }
        for (name, value) in [
            ("response.chance_cap", self.response.chance_cap),
            (
                "response.chance_awareness_factor",
                self.response.chance_awareness_factor,
            ),
            ("response.sinister_tail_chance", self.response.sinister_tail_chance),
            (
                "response.malicious_shout_chance",
                self.response.malicious_shout_chance,
            ),
            ("ambient.event_chance", self.ambient.event_chance),
            ("ambient.text_chance", self.ambient.text_chance),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(crate::SynapseError::Config(format!(
                    "{name} must be a probability in [0, 1], got {value}"
                )));
            }
        }
        if self.persistence.max_slots == 0 {
            return Err(crate::SynapseError::Config(
                "persistence.max_slots must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Tolerance when checking that strategy weights sum to 1.
pub const WEIGHT_EPSILON: f64 = 1e-6;

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// Personality state machine tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonalityConfig {
    /// Awareness at or above this puts the AI in at least Ambiguous.
    #[serde(default = "default_25")]
    pub ambiguous_threshold: i32,
    /// Awareness at or above this puts the AI in at least Sinister.
    #[serde(default = "default_50")]
    pub sinister_threshold: i32,
    /// Awareness at or above this puts the AI in Malicious.
    #[serde(default = "default_75")]
    pub malicious_threshold: i32,
    /// In Sinister, stalking only turns on above this awareness.
    #[serde(default = "default_60")]
    pub stalking_floor: i32,
    /// Predictive knowledge turns on above this awareness in any mood.
    #[serde(default = "default_50")]
    pub predictive_floor: i32,
    /// Memory corruption level never exceeds this.
    #[serde(default = "default_corruption_cap")]
    pub corruption_cap: u8,
}

impl Default for PersonalityConfig {
    fn default() -> Self {
        Self {
            ambiguous_threshold: default_25(),
            sinister_threshold: default_50(),
            malicious_threshold: default_75(),
            stalking_floor: default_60(),
            predictive_floor: default_50(),
            corruption_cap: default_corruption_cap(),
        }
    }
}

/// Per-mood weighting over the five response strategies.
///
/// Each table must sum to 1.0 (within [`WEIGHT_EPSILON`]); the generator
/// draws one strategy per response by walking the cumulative distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrategyWeights {
    /// Room- and keyword-aware responses.
    pub contextual: f64,
    /// Canned lines from the current mood's pool.
    pub personality: f64,
    /// False-memory lines that contradict the session record.
    pub memory_corruption: f64,
    /// Lines claiming foreknowledge of the player's plans.
    pub predictive: f64,
    /// Lines disputing what the player just experienced.
    pub gaslighting: f64,
}

impl StrategyWeights {
    /// Sum of all five weights.
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.contextual + self.personality + self.memory_corruption + self.predictive + self.gaslighting
    }

    /// Whether the weights form a probability distribution.
    #[must_use]
    pub fn is_normalized(&self, epsilon: f64) -> bool {
        (self.sum() - 1.0).abs() <= epsilon
            && [
                self.contextual,
                self.personality,
                self.memory_corruption,
                self.predictive,
                self.gaslighting,
            ]
            .iter()
            .all(|w| *w >= 0.0)
    }
}

/// Response generator tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseConfig {
    /// Minimum ms between responses while Friendly.
    #[serde(default = "default_1000")]
    pub delay_friendly_ms: u64,
    /// Minimum ms between responses while Ambiguous.
    #[serde(default = "default_2000")]
    pub delay_ambiguous_ms: u64,
    /// Minimum ms between responses while Sinister.
    #[serde(default = "default_3000")]
    pub delay_sinister_ms: u64,
    /// Minimum ms between responses while Malicious.
    #[serde(default = "default_5000")]
    pub delay_malicious_ms: u64,
    /// Upper bound on the per-turn response chance.
    #[serde(default = "default_chance_cap")]
    pub chance_cap: f64,
    /// Awareness-to-chance conversion factor.
    #[serde(default = "default_chance_factor")]
    pub chance_awareness_factor: f64,
    /// Chance a Sinister response gains a trailing " ...for now.".
    #[serde(default = "default_tail_chance")]
    pub sinister_tail_chance: f64,
    /// Chance a Malicious response is rendered in full uppercase.
    #[serde(default = "default_shout_chance")]
    pub malicious_shout_chance: f64,
    /// Sanity drift applied when a Friendly response lands.
    #[serde(default = "default_drift_friendly")]
    pub sanity_drift_friendly: i32,
    /// Sanity drift applied when an Ambiguous response lands.
    #[serde(default = "default_drift_ambiguous")]
    pub sanity_drift_ambiguous: i32,
    /// Sanity drift applied when a Sinister response lands.
    #[serde(default = "default_drift_sinister")]
    pub sanity_drift_sinister: i32,
    /// Sanity drift applied when a Malicious response lands.
    #[serde(default = "default_drift_malicious")]
    pub sanity_drift_malicious: i32,
    /// Awareness gained when a rendered response betrays surveillance.
    #[serde(default = "default_2")]
    pub surveillance_bonus: i32,
    /// Substrings that mark a response as betraying surveillance.
    #[serde(default = "default_surveillance_keywords")]
    pub surveillance_keywords: Vec<String>,
    /// Strategy weights while Friendly.
    #[serde(default = "default_weights_friendly")]
    pub weights_friendly: StrategyWeights,
    /// Strategy weights while Ambiguous.
    #[serde(default = "default_weights_ambiguous")]
    pub weights_ambiguous: StrategyWeights,
    /// Strategy weights while Sinister.
    #[serde(default = "default_weights_sinister")]
    pub weights_sinister: StrategyWeights,
    /// Strategy weights while Malicious.
    #[serde(default = "default_weights_malicious")]
    pub weights_malicious: StrategyWeights,
}

impl ResponseConfig {
    /// Rate-limit window for the given mood.
    #[must_use]
    pub fn delay_ms(&self, mood: Mood) -> u64 {
        match mood {
            Mood::Friendly => self.delay_friendly_ms,
            Mood::Ambiguous => self.delay_ambiguous_ms,
            Mood::Sinister => self.delay_sinister_ms,
            Mood::Malicious => self.delay_malicious_ms,
        }
    }

    /// Sanity drift a delivered response applies in the given mood.
    #[must_use]
    pub fn sanity_drift(&self, mood: Mood) -> i32 {
        match mood {
            Mood::Friendly => self.sanity_drift_friendly,
            Mood::Ambiguous => self.sanity_drift_ambiguous,
            Mood::Sinister => self.sanity_drift_sinister,
            Mood::Malicious => self.sanity_drift_malicious,
        }
    }

    /// Strategy weight table for the given mood.
    #[must_use]
    pub fn weights(&self, mood: Mood) -> StrategyWeights {
        match mood {
            Mood::Friendly => self.weights_friendly,
            Mood::Ambiguous => self.weights_ambiguous,
            Mood::Sinister => self.weights_sinister,
            Mood::Malicious => self.weights_malicious,
        }
    }

    /// Per-turn probability that the AI responds, given current awareness.
    #[must_use]
    pub fn response_chance(&self, awareness: i32) -> f64 {
        let scaled = f64::from(awareness.clamp(0, 100)) / 100.0 * self.chance_awareness_factor;
        scaled.min(self.chance_cap)
    }
}

impl Default for ResponseConfig {
    fn default() -> Self {
        Self {
            delay_friendly_ms: default_1000(),
            delay_ambiguous_ms: default_2000(),
            delay_sinister_ms: default_3000(),
            delay_malicious_ms: default_5000(),
            chance_cap: default_chance_cap(),
            chance_awareness_factor: default_chance_factor(),
            sinister_tail_chance: default_tail_chance(),
            malicious_shout_chance: default_shout_chance(),
            sanity_drift_friendly: default_drift_friendly(),
            sanity_drift_ambiguous: default_drift_ambiguous(),
            sanity_drift_sinister: default_drift_sinister(),
            sanity_drift_malicious: default_drift_malicious(),
            surveillance_bonus: default_2(),
            surveillance_keywords: default_surveillance_keywords(),
            weights_friendly: default_weights_friendly(),
            weights_ambiguous: default_weights_ambiguous(),
            weights_sinister: default_weights_sinister(),
            weights_malicious: default_weights_malicious(),
        }
    }
}

/// Suspicious-activity tracking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuspicionConfig {
    /// Verbs that count as probing the system.
    #[serde(default = "default_suspicious_verbs")]
    pub suspicious_verbs: Vec<String>,
    /// Awareness gained per suspicious verb use.
    #[serde(default = "default_2")]
    pub awareness_per_hit: i32,
    /// Identical commands in a row before the probe pattern fires.
    #[serde(default = "default_probe_threshold")]
    pub probe_repeat_threshold: u32,
    /// Awareness gained when the probe pattern fires.
    #[serde(default = "default_1")]
    pub probe_awareness_bonus: i32,
}

impl Default for SuspicionConfig {
    fn default() -> Self {
        Self {
            suspicious_verbs: default_suspicious_verbs(),
            awareness_per_hit: default_2(),
            probe_repeat_threshold: default_probe_threshold(),
            probe_awareness_bonus: default_1(),
        }
    }
}

/// Stat threshold crossings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsConfig {
    /// Sanity dropping below this emits the breakdown signal.
    #[serde(default = "default_25")]
    pub breakdown_threshold: i32,
    /// Sanity rising above this emits the recovery signal.
    #[serde(default = "default_75")]
    pub clarity_threshold: i32,
    /// Awareness rising above this emits the watched signal.
    #[serde(default = "default_80")]
    pub watched_threshold: i32,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            breakdown_threshold: default_25(),
            clarity_threshold: default_75(),
            watched_threshold: default_80(),
        }
    }
}

/// Narrative fragment severity cutoffs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NarrativeConfig {
    /// Sanity loss at or above this reads as severe.
    #[serde(default = "default_15")]
    pub severe_sanity_loss: i32,
    /// Sanity loss at or above this reads as moderate.
    #[serde(default = "default_8")]
    pub moderate_sanity_loss: i32,
    /// Awareness gain at or above this reads as major.
    #[serde(default = "default_10")]
    pub major_awareness_gain: i32,
}

impl Default for NarrativeConfig {
    fn default() -> Self {
        Self {
            severe_sanity_loss: default_15(),
            moderate_sanity_loss: default_8(),
            major_awareness_gain: default_10(),
        }
    }
}

/// Ambient event scheduling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmbientConfig {
    /// Chance per timer tick that an ambient event fires.
    #[serde(default = "default_ambient_chance")]
    pub event_chance: f64,
    /// Chance that a fired event also prints its text line.
    #[serde(default = "default_text_chance")]
    pub text_chance: f64,
}

impl Default for AmbientConfig {
    fn default() -> Self {
        Self {
            event_chance: default_ambient_chance(),
            text_chance: default_text_chance(),
        }
    }
}

/// Save-slot persistence settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistenceConfig {
    /// Number of numbered save slots.
    #[serde(default = "default_max_slots")]
    pub max_slots: u8,
    /// Number of rotating database backups to keep.
    #[serde(default = "default_3")]
    pub backup_count: u32,
    /// Auto-save interval in seconds. Zero disables auto-save.
    #[serde(default = "default_30")]
    pub autosave_interval_secs: u32,
    /// Detect save corruption via checksums.
    #[serde(default = "default_true")]
    pub verify_checksums: bool,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            max_slots: default_max_slots(),
            backup_count: default_3(),
            autosave_interval_secs: default_30(),
            verify_checksums: default_true(),
        }
    }
}

/// Telemetry and turn budget monitoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Whether counters and turn timing are recorded.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Soft budget for one full turn, in milliseconds.
    #[serde(default = "default_turn_budget_ms")]
    pub turn_budget_ms: f64,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            turn_budget_ms: default_turn_budget_ms(),
        }
    }
}

// ---------------------------------------------------------------------------
// Serde default helpers
// ---------------------------------------------------------------------------

fn default_true() -> bool {
    true
}

fn default_1() -> i32 {
    1
}

fn default_2() -> i32 {
    2
}

fn default_8() -> i32 {
    8
}

fn default_10() -> i32 {
    10
}

fn default_15() -> i32 {
    15
}

fn default_25() -> i32 {
    25
}

fn default_30() -> u32 {
    30
}

fn default_50() -> i32 {
    50
}

fn default_60() -> i32 {
    60
}

fn default_75() -> i32 {
    75
}

fn default_80() -> i32 {
    80
}

fn default_3() -> u32 {
    3
}

fn default_corruption_cap() -> u8 {
    10
}

fn default_1000() -> u64 {
    1000
}

fn default_2000() -> u64 {
    2000
}

fn default_3000() -> u64 {
    3000
}

fn default_5000() -> u64 {
    5000
}

fn default_chance_cap() -> f64 {
    0.3
}

fn default_chance_factor() -> f64 {
    0.5
}

fn default_tail_chance() -> f64 {
    0.3
}

fn default_shout_chance() -> f64 {
    0.2
}

fn default_drift_friendly() -> i32 {
    1
}

fn default_drift_ambiguous() -> i32 {
    -1
}

fn default_drift_sinister() -> i32 {
    -2
}

fn default_drift_malicious() -> i32 {
    -3
}

fn default_surveillance_keywords() -> Vec<String> {
    vec!["watching".to_string(), "know".to_string()]
}

fn default_weights_friendly() -> StrategyWeights {
    StrategyWeights {
        contextual: 0.6,
        personality: 0.4,
        memory_corruption: 0.0,
        predictive: 0.0,
        gaslighting: 0.0,
    }
}

fn default_weights_ambiguous() -> StrategyWeights {
    StrategyWeights {
        contextual: 0.4,
        personality: 0.3,
        memory_corruption: 0.1,
        predictive: 0.1,
        gaslighting: 0.1,
    }
}

fn default_weights_sinister() -> StrategyWeights {
    StrategyWeights {
        contextual: 0.2,
        personality: 0.3,
        memory_corruption: 0.2,
        predictive: 0.2,
        gaslighting: 0.1,
    }
}

fn default_weights_malicious() -> StrategyWeights {
    StrategyWeights {
        contextual: 0.1,
        personality: 0.2,
        memory_corruption: 0.3,
        predictive: 0.2,
        gaslighting: 0.2,
    }
}

fn default_suspicious_verbs() -> Vec<String> {
    ["hack", "break", "force", "probe", "decrypt", "override"]
        .iter()
        .map(ToString::to_string)
        .collect()
}

fn default_probe_threshold() -> u32 {
    3
}

fn default_ambient_chance() -> f64 {
    0.001
}

fn default_text_chance() -> f64 {
    0.3
}

fn default_max_slots() -> u8 {
    10
}

fn default_turn_budget_ms() -> f64 {
    5.0
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
