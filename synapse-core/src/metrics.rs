//! Runtime counters and turn-budget instrumentation.
//!
//! The engine must stay responsive inside a chat loop, so every turn is
//! timed against a configurable budget and high-frequency events bump
//! lock-free `AtomicU64` counters. Timing history lives behind a
//! `parking_lot::Mutex` that is only locked to record one float or to
//! export percentiles.
//!
//! Counters can be rendered as Prometheus-compatible text for whatever
//! dashboard the host process runs.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use parking_lot::Mutex;

// ---------------------------------------------------------------------------
// Counters (lock-free)
// ---------------------------------------------------------------------------

/// Atomic counters for high-frequency engine events.
/// Incremented in the hot path, read on dashboard export.
pub struct EngineCounters {
    /// Turns fully processed since startup.
    pub turns_completed: AtomicU64,
    /// AI responses actually emitted.
    pub responses_emitted: AtomicU64,
    /// Responses suppressed by the chance gate or rate limiter.
    pub responses_suppressed: AtomicU64,
    /// Narrative events fired.
    pub events_fired: AtomicU64,
    /// Achievements unlocked.
    pub achievements_unlocked: AtomicU64,
    /// Ambient atmosphere events rolled in.
    pub ambient_events: AtomicU64,
    /// Commands that tripped the suspicion heuristics.
    pub suspicious_commands: AtomicU64,
    /// Save operations completed.
    pub saves_completed: AtomicU64,
    /// Load operations completed.
    pub loads_completed: AtomicU64,
}

impl EngineCounters {
    /// Create a new set of zeroed counters.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            turns_completed: AtomicU64::new(0),
            responses_emitted: AtomicU64::new(0),
            responses_suppressed: AtomicU64::new(0),
            events_fired: AtomicU64::new(0),
            achievements_unlocked: AtomicU64::new(0),
            ambient_events: AtomicU64::new(0),
            suspicious_commands: AtomicU64::new(0),
            saves_completed: AtomicU64::new(0),
            loads_completed: AtomicU64::new(0),
        }
    }

    /// Snapshot all counters for export.
    #[must_use]
    pub fn snapshot(&self) -> CounterSnapshot {
        CounterSnapshot {
            turns_completed: self.turns_completed.load(Ordering::Relaxed),
            responses_emitted: self.responses_emitted.load(Ordering::Relaxed),
            responses_suppressed: self.responses_suppressed.load(Ordering::Relaxed),
            events_fired: self.events_fired.load(Ordering::Relaxed),
            achievements_unlocked: self.achievements_unlocked.load(Ordering::Relaxed),
            ambient_events: self.ambient_events.load(Ordering::Relaxed),
            suspicious_commands: self.suspicious_commands.load(Ordering::Relaxed),
            saves_completed: self.saves_completed.load(Ordering::Relaxed),
            loads_completed: self.loads_completed.load(Ordering::Relaxed),
        }
    }
}

impl Default for EngineCounters {
    fn default() -> Self {
        Self::new()
    }
}

/// A snapshot of counter values at a point in time.
#[derive(Debug, Clone)]
pub struct CounterSnapshot {
    /// Turns fully processed.
    pub turns_completed: u64,
    /// Responses emitted.
    pub responses_emitted: u64,
    /// Responses suppressed.
    pub responses_suppressed: u64,
    /// Narrative events fired.
    pub events_fired: u64,
    /// Achievements unlocked.
    pub achievements_unlocked: u64,
    /// Ambient events rolled in.
    pub ambient_events: u64,
    /// Suspicious commands detected.
    pub suspicious_commands: u64,
    /// Completed save operations.
    pub saves_completed: u64,
    /// Completed load operations.
    pub loads_completed: u64,
}

impl CounterSnapshot {
    /// Format as Prometheus-compatible text.
    #[must_use]
    pub fn to_prometheus(&self) -> String {
        format!(
            "# HELP synapse_turns_completed_total Turns fully processed\n\
             # TYPE synapse_turns_completed_total counter\n\
             synapse_turns_completed_total {}\n\
             # HELP synapse_responses_emitted_total AI responses emitted\n\
             # TYPE synapse_responses_emitted_total counter\n\
             synapse_responses_emitted_total {}\n\
             # HELP synapse_responses_suppressed_total Responses suppressed by gate or rate limit\n\
             # TYPE synapse_responses_suppressed_total counter\n\
             synapse_responses_suppressed_total {}\n\
             # HELP synapse_events_fired_total Narrative events fired\n\
             # TYPE synapse_events_fired_total counter\n\
             synapse_events_fired_total {}\n\
             # HELP synapse_achievements_unlocked_total Achievements unlocked\n\
             # TYPE synapse_achievements_unlocked_total counter\n\
             synapse_achievements_unlocked_total {}\n\
             # HELP synapse_ambient_events_total Ambient atmosphere events\n\
             # TYPE synapse_ambient_events_total counter\n\
             synapse_ambient_events_total {}\n\
             # HELP synapse_suspicious_commands_total Commands flagged as suspicious\n\
             # TYPE synapse_suspicious_commands_total counter\n\
             synapse_suspicious_commands_total {}\n\
             # HELP synapse_saves_completed_total Save operations completed\n\
             # TYPE synapse_saves_completed_total counter\n\
             synapse_saves_completed_total {}\n\
             # HELP synapse_loads_completed_total Load operations completed\n\
             # TYPE synapse_loads_completed_total counter\n\
             synapse_loads_completed_total {}\n",
            self.turns_completed,
            self.responses_emitted,
            self.responses_suppressed,
            self.events_fired,
            self.achievements_unlocked,
            self.ambient_events,
            self.suspicious_commands,
            self.saves_completed,
            self.loads_completed,
        )
    }
}

// ---------------------------------------------------------------------------
// Turn Budget Monitor
// ---------------------------------------------------------------------------

/// Tracks wall time spent processing each player turn.
///
/// Usage:
/// ```rust,no_run
/// # use synapse_core::metrics::TurnBudgetMonitor;
/// let monitor = TurnBudgetMonitor::new(5.0); // 5ms budget
/// let _guard = monitor.begin_turn();
/// // ... process the turn ...
/// drop(_guard);
/// assert!(monitor.last_turn_ms() < 5.0);
/// ```
pub struct TurnBudgetMonitor {
    /// Maximum allowed milliseconds per turn.
    budget_ms: f64,
    /// Timing history (last N turns).
    history: Mutex<TurnHistory>,
}

/// Internal turn timing data.
struct TurnHistory {
    /// Ring buffer of recent turn timings (milliseconds).
    timings: Vec<f64>,
    /// Next write index.
    write_idx: usize,
    /// Number of turns recorded.
    count: u64,
    /// Whether the last turn exceeded the budget.
    last_over_budget: bool,
}

impl TurnBudgetMonitor {
    /// Create a new monitor with the given budget (milliseconds).
    #[must_use]
    pub fn new(budget_ms: f64) -> Self {
        Self {
            budget_ms,
            history: Mutex::new(TurnHistory {
                timings: vec![0.0; 256], // Track last 256 turns
                write_idx: 0,
                count: 0,
                last_over_budget: false,
            }),
        }
    }

    /// Begin timing a turn. Returns a guard that records elapsed time on drop.
    pub fn begin_turn(&self) -> TurnGuard<'_> {
        TurnGuard {
            monitor: self,
            start: Instant::now(),
        }
    }

    /// Record a turn timing manually (milliseconds).
    pub fn record(&self, ms: f64) {
        let mut h = self.history.lock();
        let idx = h.write_idx;
        let len = h.timings.len();
        h.timings[idx] = ms;
        h.write_idx = (idx + 1) % len;
        h.count += 1;
        h.last_over_budget = ms > self.budget_ms;
    }

    /// Get the last turn's timing (milliseconds).
    #[must_use]
    pub fn last_turn_ms(&self) -> f64 {
        let h = self.history.lock();
        if h.count == 0 {
            return 0.0;
        }
        let idx = if h.write_idx == 0 {
            h.timings.len() - 1
        } else {
            h.write_idx - 1
        };
        h.timings[idx]
    }

    /// Whether the last turn exceeded the budget.
    #[must_use]
    pub fn is_over_budget(&self) -> bool {
        self.history.lock().last_over_budget
    }

    /// Get P50, P95, P99 timings from the history buffer (milliseconds).
    #[must_use]
    pub fn percentiles(&self) -> TurnPercentiles {
        let h = self.history.lock();
        let n = (h.count as usize).min(h.timings.len());
        if n == 0 {
            return TurnPercentiles {
                p50: 0.0,
                p95: 0.0,
                p99: 0.0,
                max: 0.0,
                over_budget_ratio: 0.0,
            };
        }

        let mut sorted: Vec<f64> = if h.count as usize <= h.timings.len() {
            h.timings[..n].to_vec()
        } else {
            h.timings.clone()
        };
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let p50 = sorted[n / 2];
        let p95 = sorted[(n as f64 * 0.95) as usize];
        let p99 = sorted[(n as f64 * 0.99) as usize];
        let max = sorted[n - 1];
        let over_count = sorted.iter().filter(|&&t| t > self.budget_ms).count();

        TurnPercentiles {
            p50,
            p95,
            p99,
            max,
            over_budget_ratio: over_count as f64 / n as f64,
        }
    }

    /// Total number of turns recorded.
    #[must_use]
    pub fn turn_count(&self) -> u64 {
        self.history.lock().count
    }

    /// The configured budget in milliseconds.
    #[must_use]
    pub fn budget_ms(&self) -> f64 {
        self.budget_ms
    }
}

/// RAII guard that records elapsed time when dropped.
pub struct TurnGuard<'a> {
    monitor: &'a TurnBudgetMonitor,
    start: Instant,
}

impl Drop for TurnGuard<'_> {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed();
        let ms = elapsed.as_secs_f64() * 1000.0;
        self.monitor.record(ms);
    }
}

/// Percentile statistics for turn timings.
#[derive(Debug, Clone)]
pub struct TurnPercentiles {
    /// 50th percentile (median) in milliseconds.
    pub p50: f64,
    /// 95th percentile in milliseconds.
    pub p95: f64,
    /// 99th percentile in milliseconds.
    pub p99: f64,
    /// Maximum observed timing.
    pub max: f64,
    /// Ratio of turns that exceeded the budget (0.0–1.0).
    pub over_budget_ratio: f64,
}

impl TurnPercentiles {
    /// Format as a human-readable summary.
    #[must_use]
    pub fn summary(&self, budget_ms: f64) -> String {
        format!(
            "P50={:.2}ms  P95={:.2}ms  P99={:.2}ms  Max={:.2}ms  Budget={budget_ms:.1}ms  \
             Over-budget={:.1}%",
            self.p50,
            self.p95,
            self.p99,
            self.max,
            self.over_budget_ratio * 100.0,
        )
    }
}

// ---------------------------------------------------------------------------
// Tracing Span Names
// ---------------------------------------------------------------------------

/// Span names used with `tracing::span!` across the engine.
pub mod spans {
    /// Top-level per-turn span.
    pub const TURN: &str = "synapse::turn";
    /// Action resolution (move, examine, use, talk).
    pub const ACTION: &str = "synapse::action";
    /// Personality re-evaluation.
    pub const PERSONALITY: &str = "synapse::personality";
    /// Narrative event sweep.
    pub const NARRATIVE: &str = "synapse::narrative";
    /// Response generation.
    pub const RESPONSE: &str = "synapse::response";
    /// Achievement pass.
    pub const ACHIEVEMENTS: &str = "synapse::achievements";
    /// Ambient atmosphere roll.
    pub const AMBIENT: &str = "synapse::ambient";
    /// Persistence save.
    pub const PERSIST_SAVE: &str = "synapse::persist::save";
    /// Persistence load.
    pub const PERSIST_LOAD: &str = "synapse::persist::load";
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
