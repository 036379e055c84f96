//! Command scheduling, ambient atmosphere, and the autosave timer.
//!
//! The host loop feeds the engine from two sources: player input and a
//! periodic timer. Both land in a single FIFO queue so a tick can never
//! overtake the command that preceded it, and the engine drains them in
//! arrival order.
//!
//! Timer ticks also drive the ambient layer: a small per-tick chance of an
//! atmospheric event (footsteps, hums, whispers), each carrying an audio
//! cue and sometimes a line of text.

use std::collections::VecDeque;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::AmbientConfig;

// ---------------------------------------------------------------------------
// Command queue
// ---------------------------------------------------------------------------

/// One unit of work for the engine, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueuedCommand {
    /// Raw player input, not yet parsed.
    Player {
        /// The text exactly as typed.
        raw: String,
        /// Wall-clock arrival time in milliseconds.
        received_at_ms: u64,
    },
    /// Periodic timer tick from the host loop.
    Tick {
        /// Wall-clock tick time in milliseconds.
        now_ms: u64,
    },
}

/// FIFO queue serialising player commands and timer ticks.
#[derive(Debug, Default)]
pub struct CommandQueue {
    queue: VecDeque<QueuedCommand>,
}

impl CommandQueue {
    /// An empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue a raw player command.
    pub fn push_player(&mut self, raw: impl Into<String>, received_at_ms: u64) {
        self.queue.push_back(QueuedCommand::Player {
            raw: raw.into(),
            received_at_ms,
        });
    }

    /// Enqueue a timer tick.
    pub fn push_tick(&mut self, now_ms: u64) {
        self.queue.push_back(QueuedCommand::Tick { now_ms });
    }

    /// Dequeue the oldest pending command.
    pub fn pop(&mut self) -> Option<QueuedCommand> {
        self.queue.pop_front()
    }

    /// Number of pending commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// True when nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Drop all pending commands (used when a session ends or reloads).
    pub fn clear(&mut self) {
        self.queue.clear();
    }
}

// ---------------------------------------------------------------------------
// Ambient atmosphere
// ---------------------------------------------------------------------------

/// Text shown when an ambient kind has no authored line.
pub const AMBIENT_FALLBACK: &str = "Something strange happens.";

/// The five kinds of ambient atmosphere event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AmbientKind {
    /// Footsteps from somewhere that should be empty.
    DistantFootsteps,
    /// The facility's electrical systems acting up.
    ElectricalHum,
    /// A door closing out of sight.
    DoorSlam,
    /// Half-heard voices.
    Whispers,
    /// Interference on the comm channels.
    StaticBurst,
}

impl AmbientKind {
    /// Every kind, in roll order.
    pub const ALL: [AmbientKind; 5] = [
        AmbientKind::DistantFootsteps,
        AmbientKind::ElectricalHum,
        AmbientKind::DoorSlam,
        AmbientKind::Whispers,
        AmbientKind::StaticBurst,
    ];

    /// Audio cue name handed to the presentation layer.
    #[must_use]
    pub fn audio_cue(self) -> &'static str {
        match self {
            AmbientKind::DistantFootsteps => "distant_footsteps",
            AmbientKind::ElectricalHum => "electrical_hum",
            AmbientKind::DoorSlam => "door_slam",
            AmbientKind::Whispers => "whispers",
            AmbientKind::StaticBurst => "static_burst",
        }
    }

    /// Authored text variants for this kind.
    #[must_use]
    pub fn texts(self) -> &'static [&'static str] {
        match self {
            AmbientKind::DistantFootsteps => &[
                "You hear distant footsteps echoing through the corridors.",
                "The sound of someone walking can be heard from somewhere far away.",
                "Footsteps... but you're supposed to be alone here.",
            ],
            AmbientKind::ElectricalHum => &[
                "The electrical systems hum with an unsettling frequency.",
                "A low electrical buzz fills the air.",
                "The lights flicker as the electrical system strains.",
            ],
            AmbientKind::DoorSlam => &[
                "A door slams shut somewhere in the distance.",
                "The sound of a heavy door closing echoes through the facility.",
                "Something just sealed itself away from you.",
            ],
            AmbientKind::Whispers => &[
                "You hear faint whispers, too quiet to understand.",
                "Voices seem to drift from the walls themselves.",
                "Someone is speaking, but the words are lost in static.",
            ],
            AmbientKind::StaticBurst => &[
                "A burst of static fills your ears.",
                "The facility's communication system crackles with interference.",
                "Electronic noise pierces the silence.",
            ],
        }
    }
}

/// One rolled ambient event. The audio cue always plays; the text line is
/// present only when the text roll also passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmbientEvent {
    /// Which atmosphere event fired.
    pub kind: AmbientKind,
    /// Audio cue name for the presentation layer.
    pub audio_cue: &'static str,
    /// Optional narration line.
    pub text: Option<String>,
}

/// Roll the per-tick ambient chance. Returns `None` on the vast majority of
/// ticks; callers skip the roll entirely when the session is not in active
/// play.
pub fn roll_ambient<R: Rng>(config: &AmbientConfig, rng: &mut R) -> Option<AmbientEvent> {
    if rng.r#gen::<f64>() >= config.event_chance {
        return None;
    }

    let kind = AmbientKind::ALL[rng.gen_range(0..AmbientKind::ALL.len())];
    let text = if rng.r#gen::<f64>() < config.text_chance {
        Some(
            kind.texts()
                .choose(rng)
                .copied()
                .unwrap_or(AMBIENT_FALLBACK)
                .to_string(),
        )
    } else {
        None
    };

    Some(AmbientEvent {
        kind,
        audio_cue: kind.audio_cue(),
        text,
    })
}

// ---------------------------------------------------------------------------
// Autosave timer
// ---------------------------------------------------------------------------

/// Tracks when the next autosave is due. An interval of zero disables the
/// timer entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutosaveTimer {
    interval_ms: u64,
    last_ms: u64,
}

impl AutosaveTimer {
    /// Start the timer at `now_ms`; the first save is due one full interval
    /// later.
    #[must_use]
    pub fn new(interval_secs: u32, now_ms: u64) -> Self {
        Self {
            interval_ms: u64::from(interval_secs) * 1000,
            last_ms: now_ms,
        }
    }

    /// False when the interval is configured to zero.
    #[must_use]
    pub fn enabled(&self) -> bool {
        self.interval_ms > 0
    }

    /// Whether a full interval has elapsed since the last save.
    #[must_use]
    pub fn is_due(&self, now_ms: u64) -> bool {
        self.enabled() && now_ms.saturating_sub(self.last_ms) >= self.interval_ms
    }

    /// Reset the interval after a successful save (manual saves count too).
    pub fn mark_saved(&mut self, now_ms: u64) {
        self.last_ms = now_ms;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
