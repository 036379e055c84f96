//! The engine: one object that owns a whole play session.
//!
//! A turn is the atomic unit. One player command triggers, in strict
//! sequence: statistics update, suspicion checks, action resolution,
//! personality re-evaluation, the narrative event sweep, response
//! generation, and the achievement pass. Nothing interleaves; timer ticks
//! go through the same FIFO queue as player commands, so background work
//! can never cut a turn in half.
//!
//! The engine owns its RNG and reads time through [`Clock`], which keeps
//! whole sessions reproducible under a seeded RNG and a manual clock.
//!
//! Persistence and audio are fire-and-forget from the turn's perspective:
//! their failures are logged and the turn result stays complete.

use std::sync::atomic::Ordering;
use std::time::Instant;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::achievements::{AchievementEngine, UnlockedAchievement};
use crate::clock::{Clock, SystemClock};
use crate::config::SynapseConfig;
use crate::content::ContentRegistry;
use crate::effects::{apply_effects, AppliedEffects};
use crate::error::{Result, SynapseError};
use crate::metrics::{EngineCounters, TurnBudgetMonitor};
use crate::narrative::{NarrativeEngine, SweepContext};
use crate::persistence::{SaveSlot, SaveStore};
use crate::personality::PersonalityState;
use crate::response::{probe_acknowledgement, FalseMemory, ResponseContext, ResponseState};
use crate::scheduler::{roll_ambient, AutosaveTimer, CommandQueue, QueuedCommand};
use crate::snapshot::{ResponsePacing, Snapshot, SNAPSHOT_VERSION};
use crate::state::GameState;
use crate::stats::{self, StatChange, Statistics, TrackEvent};
use crate::types::{AchievementId, CharacterId, ItemId, Mood, PlayerAction, SessionId, StatKind};

/// System line shown when sanity runs out.
const GAME_OVER_LINE: &str =
    "Your sanity has been completely depleted. Your consciousness dissolves into the facility's endless hum.";

/// Command reference shown by the `help` verb.
const HELP_TEXT: &str = "Commands: look, go <direction>, examine <thing>, take <thing>, \
use <thing>, ability <name>, inventory, help. Anything else you type, the AI hears.";

// ---------------------------------------------------------------------------
// Turn output
// ---------------------------------------------------------------------------

/// Channel a text line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputTag {
    /// Story and room narration.
    Narrative,
    /// Engine-level messages (locked doors, game over, help).
    System,
    /// Lines spoken by the AI.
    Ai,
    /// Rejected command feedback.
    Error,
    /// Achievement notifications.
    Achievement,
    /// Diagnostic output, normally hidden.
    Debug,
}

/// One unit of presentation output. Ordering within a turn is meaningful.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputEvent {
    /// A line of text for the player.
    Text {
        /// Channel the line belongs to.
        tag: OutputTag,
        /// The line itself.
        text: String,
    },
    /// An audio cue name, fire-and-forget.
    Audio {
        /// Cue identifier for the presentation layer.
        cue: String,
    },
    /// A stat moved; meters animate from these.
    StatChanged {
        /// Which stat.
        stat: StatKind,
        /// Value before the write.
        previous: i32,
        /// Value after clamping.
        value: i32,
    },
}

/// Everything one turn (or tick) produced, in emission order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TurnOutput {
    /// The ordered event stream for this turn.
    pub events: Vec<OutputEvent>,
}

impl TurnOutput {
    /// All text lines on one channel, in order.
    pub fn lines(&self, tag: OutputTag) -> impl Iterator<Item = &str> {
        self.events.iter().filter_map(move |event| match event {
            OutputEvent::Text { tag: t, text } if *t == tag => Some(text.as_str()),
            _ => None,
        })
    }

    /// Whether any line on `tag` contains `needle`.
    #[must_use]
    pub fn contains_line(&self, tag: OutputTag, needle: &str) -> bool {
        self.lines(tag).any(|line| line.contains(needle))
    }

    fn push_text(&mut self, tag: OutputTag, text: impl Into<String>) {
        self.events.push(OutputEvent::Text {
            tag,
            text: text.into(),
        });
    }

    fn push_audio(&mut self, cue: impl Into<String>) {
        self.events.push(OutputEvent::Audio { cue: cue.into() });
    }

    /// Emit the meter movement and any crossing lines for one stat write.
    fn push_stat(&mut self, change: &StatChange) {
        if change.applied() != 0 {
            self.events.push(OutputEvent::StatChanged {
                stat: change.stat,
                previous: change.previous,
                value: change.value,
            });
        }
        for crossing in &change.crossings {
            self.push_text(OutputTag::System, crossing.system_line());
            self.push_audio(crossing.audio_cue());
        }
    }

    fn push_applied(&mut self, applied: &AppliedEffects) {
        for change in &applied.stat_changes {
            self.push_stat(change);
        }
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// A complete SYNAPSE session: state, subsystems, scheduling, persistence.
pub struct SynapseEngine {
    config: SynapseConfig,
    content: ContentRegistry,
    state: GameState,
    personality: PersonalityState,
    statistics: Statistics,
    narrative: NarrativeEngine,
    achievements: AchievementEngine,
    response: ResponseState,
    queue: CommandQueue,
    autosave: AutosaveTimer,
    store: Option<SaveStore>,
    clock: Box<dyn Clock>,
    rng: StdRng,
    counters: EngineCounters,
    monitor: TurnBudgetMonitor,
    last_tick_ms: Option<u64>,
}

impl std::fmt::Debug for SynapseEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SynapseEngine")
            .field("session", &self.state.session)
            .field("turn", &self.state.turn_counter)
            .field("mood", &self.personality.current)
            .finish_non_exhaustive()
    }
}

impl SynapseEngine {
    /// Build an engine with OS entropy and the system clock.
    ///
    /// # Errors
    /// Returns [`SynapseError::Config`] or a content validation error if
    /// either input is inconsistent; no turn is ever accepted from a
    /// half-valid engine.
    pub fn new(config: SynapseConfig, content: ContentRegistry) -> Result<Self> {
        Self::build(config, content, StdRng::from_entropy())
    }

    /// Build a deterministic engine from a fixed RNG seed.
    ///
    /// # Errors
    /// Same as [`SynapseEngine::new`].
    pub fn with_rng_seed(config: SynapseConfig, content: ContentRegistry, seed: u64) -> Result<Self> {
        Self::build(config, content, StdRng::seed_from_u64(seed))
    }

    fn build(config: SynapseConfig, content: ContentRegistry, rng: StdRng) -> Result<Self> {
        config.validate()?;
        content.validate()?;

        let clock: Box<dyn Clock> = Box::new(SystemClock::new());
        let now = clock.now_ms();
        let mut state = GameState::new(SessionId::new(), content.starting_room().clone());
        state.set_flag("system_entered", true);
        let mut statistics = Statistics::new();
        statistics.track(TrackEvent::RoomVisited(&state.current_room));

        let autosave = AutosaveTimer::new(config.persistence.autosave_interval_secs, now);
        let monitor = TurnBudgetMonitor::new(config.telemetry.turn_budget_ms);

        info!(
            session = %state.session,
            rooms = content.room_count(),
            "engine initialized"
        );

        Ok(Self {
            config,
            content,
            state,
            personality: PersonalityState::new(),
            statistics,
            narrative: NarrativeEngine::new(),
            achievements: AchievementEngine::new(),
            response: ResponseState::new(),
            queue: CommandQueue::new(),
            autosave,
            store: None,
            clock,
            rng,
            counters: EngineCounters::new(),
            monitor,
            last_tick_ms: None,
        })
    }

    /// Swap the time source. Resets tick bookkeeping and the autosave
    /// timer to the new clock's origin.
    pub fn set_clock(&mut self, clock: Box<dyn Clock>) {
        let now = clock.now_ms();
        self.autosave = AutosaveTimer::new(self.config.persistence.autosave_interval_secs, now);
        self.last_tick_ms = None;
        self.clock = clock;
    }

    /// Attach a save store; persistence operations are no-ops without one.
    pub fn attach_store(&mut self, store: SaveStore) {
        self.store = Some(store);
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// The live session state.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The personality machine.
    #[must_use]
    pub fn personality(&self) -> &PersonalityState {
        &self.personality
    }

    /// Accumulated session statistics.
    #[must_use]
    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    /// The narrative event engine.
    #[must_use]
    pub fn narrative(&self) -> &NarrativeEngine {
        &self.narrative
    }

    /// The achievement engine.
    #[must_use]
    pub fn achievements(&self) -> &AchievementEngine {
        &self.achievements
    }

    /// The static content registry.
    #[must_use]
    pub fn content(&self) -> &ContentRegistry {
        &self.content
    }

    /// Engine configuration.
    #[must_use]
    pub fn config(&self) -> &SynapseConfig {
        &self.config
    }

    /// Runtime counters.
    #[must_use]
    pub fn counters(&self) -> &EngineCounters {
        &self.counters
    }

    /// Turn timing monitor.
    #[must_use]
    pub fn monitor(&self) -> &TurnBudgetMonitor {
        &self.monitor
    }

    /// The false-memory log, oldest first.
    #[must_use]
    pub fn false_memories(&self) -> &[FalseMemory] {
        self.response.false_memories()
    }

    /// The attached save store, if any.
    #[must_use]
    pub fn store(&self) -> Option<&SaveStore> {
        self.store.as_ref()
    }

    // ------------------------------------------------------------------
    // Session lifecycle
    // ------------------------------------------------------------------

    /// Discard the running session and start a fresh one.
    pub fn new_game(&mut self) {
        let now = self.clock.now_ms();
        self.state = GameState::new(SessionId::new(), self.content.starting_room().clone());
        self.state.set_flag("system_entered", true);
        self.personality = PersonalityState::new();
        self.statistics = Statistics::new();
        self.statistics.track(TrackEvent::RoomVisited(&self.state.current_room));
        self.narrative = NarrativeEngine::new();
        self.achievements = AchievementEngine::new();
        self.response = ResponseState::new();
        self.queue.clear();
        self.autosave = AutosaveTimer::new(self.config.persistence.autosave_interval_secs, now);
        self.last_tick_ms = None;
        info!(session = %self.state.session, "new game started");
    }

    /// Seed the session from a character profile: stats, starting items,
    /// background flags. An unknown id falls back to the neutral visitor.
    pub fn select_character(&mut self, id: &CharacterId) {
        if self.content.character(id).is_none() {
            warn!(character = %id, "unknown character, using the neutral visitor");
        }
        let profile = self.content.character_or_neutral(id);
        self.state.character = Some(profile.id.clone());
        self.state.sanity = profile.starting_sanity;
        self.state.awareness = profile.starting_awareness;
        for item in profile.items {
            if !self.state.has_item(&item) {
                self.state.add_item(item);
            }
        }
        self.state.set_flag("character_background", profile.background);
        self.state.set_flag("character_profession", profile.profession);
        info!(
            character = %profile.id,
            sanity = self.state.sanity,
            awareness = self.state.awareness,
            "character selected"
        );
    }

    /// Record the difficulty label carried through save metadata.
    pub fn set_difficulty(&mut self, label: impl Into<String>) {
        self.state.difficulty = label.into();
    }

    /// End the session on a chosen ending, unlocking whatever that ending
    /// awards.
    ///
    /// # Errors
    /// Returns [`SynapseError::SessionOver`] if the session already ended.
    pub fn choose_ending(&mut self, ending: &str) -> Result<TurnOutput> {
        if let Some(cause) = &self.state.game_over {
            return Err(SynapseError::SessionOver {
                cause: cause.clone(),
            });
        }
        let mut out = TurnOutput::default();
        self.state.set_flag("ending", ending);
        self.state.game_over = Some(format!("ending:{ending}"));
        info!(ending, turn = self.state.turn_counter, "ending reached");
        out.push_text(OutputTag::System, format!("Ending reached: {ending}."));

        let unlocked = self.achievements.check_all(
            &mut self.state,
            &self.statistics,
            self.content.achievements(),
            &self.config.stats,
        );
        self.notify_unlocks(&unlocked, &mut out);
        Ok(out)
    }

    // ------------------------------------------------------------------
    // Scheduling
    // ------------------------------------------------------------------

    /// Queue a raw player command for the next [`SynapseEngine::pump`].
    pub fn submit_command(&mut self, raw: impl Into<String>) {
        let now = self.clock.now_ms();
        self.queue.push_player(raw, now);
    }

    /// Queue a timer tick for the next [`SynapseEngine::pump`].
    pub fn submit_tick(&mut self) {
        let now = self.clock.now_ms();
        self.queue.push_tick(now);
    }

    /// Drain the command queue in arrival order. A rejected command
    /// becomes an error-tagged output rather than aborting the drain.
    pub fn pump(&mut self) -> Vec<TurnOutput> {
        let mut results = Vec::new();
        while let Some(command) = self.queue.pop() {
            match command {
                QueuedCommand::Player { raw, .. } => match self.process_command(&raw) {
                    Ok(out) => results.push(out),
                    Err(e) => {
                        let mut out = TurnOutput::default();
                        out.push_text(OutputTag::Error, e.to_string());
                        results.push(out);
                    }
                },
                QueuedCommand::Tick { now_ms } => results.push(self.process_tick(now_ms)),
            }
        }
        results
    }

    // ------------------------------------------------------------------
    // The turn pipeline
    // ------------------------------------------------------------------

    /// Process one player command as a full turn.
    ///
    /// # Errors
    /// Returns [`SynapseError::SessionOver`] once the session has ended;
    /// everything else degrades into output lines per the missing-content
    /// rules.
    pub fn process_command(&mut self, line: &str) -> Result<TurnOutput> {
        if let Some(cause) = &self.state.game_over {
            return Err(SynapseError::SessionOver {
                cause: cause.clone(),
            });
        }

        let turn_started = self.config.telemetry.enabled.then(Instant::now);
        self.state.turn_counter += 1;
        let _span =
            tracing::debug_span!("synapse::turn", turn = self.state.turn_counter).entered();

        let action = PlayerAction::from_line(line);
        let now_ms = self.clock.now_ms();
        let mut out = TurnOutput::default();

        // 1. Statistics see every command, parseable or not.
        self.statistics.track(TrackEvent::Interaction {
            question: &action.raw,
        });

        // 2. Suspicion heuristics, before the world reacts.
        self.observe_suspicion(&action, &mut out);

        // 3. Resolve the action against the world.
        self.resolve_action(&action, &mut out);

        // 4. Personality re-evaluation, once all awareness writes landed.
        let transition = self
            .personality
            .evaluate(self.state.awareness, &self.config.personality);
        if let Some(t) = transition {
            self.statistics.track(TrackEvent::MoodChanged {
                from: t.from,
                to: t.to,
            });
            if let Some(line) = t.announcement() {
                out.push_text(OutputTag::System, line);
            }
            if let Some(id) = t.achievement_id() {
                self.grant_achievement(&AchievementId::new(id), &mut out);
            }
        }

        // 5. Narrative sweep.
        let ctx = SweepContext {
            events: self.content.events(),
            transition: transition.map(|t| (t.from, t.to)),
            mood: self.personality.current,
            stats_config: &self.config.stats,
            narrative_config: &self.config.narrative,
        };
        let fired = self
            .narrative
            .sweep(&mut self.state, &self.statistics, &ctx, &mut self.rng);
        for event in &fired {
            self.counters.events_fired.fetch_add(1, Ordering::Relaxed);
            out.push_text(OutputTag::Narrative, event.narrative.clone());
            out.push_applied(&event.applied);
            for fragment in &event.fragments {
                out.push_text(OutputTag::Narrative, fragment.clone());
            }
        }

        // 6. The AI speaks, or doesn't. Transition turns always speak.
        let flags = self
            .personality
            .flags(self.state.awareness, &self.config.personality);
        let response_ctx = ResponseContext {
            pools: self.content.pools(),
            room: self.content.room(&self.state.current_room),
            config: &self.config.response,
        };
        let generated = self.response.generate(
            &action.raw,
            self.personality.current,
            flags,
            self.state.awareness,
            self.state.turn_counter,
            &response_ctx,
            now_ms,
            transition.is_some(),
            &mut self.rng,
        );
        if let Some(ai) = generated {
            self.counters.responses_emitted.fetch_add(1, Ordering::Relaxed);
            self.statistics.track(TrackEvent::ResponseReceived);
            debug!(
                strategy = ai.strategy.as_str(),
                mood = %self.personality.current,
                "ai response emitted"
            );
            out.push_text(OutputTag::Ai, ai.text);
            let drift = stats::modify_sanity(&mut self.state, ai.sanity_delta, &self.config.stats);
            out.push_stat(&drift);
            if ai.surveillance_hit {
                let bump = stats::modify_awareness(
                    &mut self.state,
                    self.config.response.surveillance_bonus,
                    &self.config.stats,
                );
                out.push_stat(&bump);
            }
        } else {
            self.counters
                .responses_suppressed
                .fetch_add(1, Ordering::Relaxed);
        }

        // 7. Achievement pass, observing the finished turn.
        let unlocked = self.achievements.check_all(
            &mut self.state,
            &self.statistics,
            self.content.achievements(),
            &self.config.stats,
        );
        self.notify_unlocks(&unlocked, &mut out);

        // 8. Close out the turn.
        self.statistics.track(TrackEvent::TurnCompleted {
            sanity: self.state.sanity,
            awareness: self.state.awareness,
            mood: self.personality.current,
        });
        self.state.recently_used_item = None;
        self.counters.turns_completed.fetch_add(1, Ordering::Relaxed);

        if self.state.is_game_over() {
            self.statistics.track(TrackEvent::Death);
            out.push_text(OutputTag::System, GAME_OVER_LINE);
            out.push_audio("game_over");
        }
        if let Some(started) = turn_started {
            self.monitor.record(started.elapsed().as_secs_f64() * 1000.0);
        }
        Ok(out)
    }

    /// Process one timer tick: play time, ambient atmosphere, autosave.
    /// Silently does nothing once the session has ended.
    pub fn process_tick(&mut self, now_ms: u64) -> TurnOutput {
        let mut out = TurnOutput::default();
        let elapsed = self
            .last_tick_ms
            .map_or(0, |last| now_ms.saturating_sub(last));
        self.last_tick_ms = Some(now_ms);
        if self.state.is_game_over() {
            return out;
        }
        self.state.play_time_ms += elapsed;

        if let Some(event) = roll_ambient(&self.config.ambient, &mut self.rng) {
            self.counters.ambient_events.fetch_add(1, Ordering::Relaxed);
            debug!(kind = ?event.kind, "ambient event");
            out.push_audio(event.audio_cue);
            if let Some(text) = event.text {
                out.push_text(OutputTag::Narrative, text);
            }
        }

        if self.autosave.is_due(now_ms) && self.store.is_some() {
            let snapshot = self.capture_snapshot(None);
            if let Some(store) = self.store.as_ref() {
                match store.autosave(&snapshot) {
                    Ok(true) => {
                        self.counters.saves_completed.fetch_add(1, Ordering::Relaxed);
                        self.autosave.mark_saved(now_ms);
                        debug!(turn = self.state.turn_counter, "autosave written");
                    }
                    Ok(false) => {}
                    // Non-fatal: the tick result stays complete.
                    Err(e) => warn!(error = %e, "autosave failed"),
                }
            }
        }
        out
    }

    // ------------------------------------------------------------------
    // Snapshots and persistence
    // ------------------------------------------------------------------

    /// Capture the whole session as a serializable snapshot. Response
    /// pacing is stored as an age offset, not an absolute time.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.capture_snapshot(None)
    }

    fn capture_snapshot(&self, name: Option<String>) -> Snapshot {
        let now = self.clock.now_ms();
        Snapshot {
            version: SNAPSHOT_VERSION,
            saved_at: Utc::now().to_rfc3339(),
            name,
            state: self.state.clone(),
            personality: self.personality.clone(),
            statistics: self.statistics.clone(),
            narrative: self.narrative.clone(),
            achievements: self.achievements.clone(),
            response: ResponsePacing {
                last_response_age_ms: self
                    .response
                    .last_response_at()
                    .map(|at| now.saturating_sub(at)),
                false_memories: self.response.false_memories().to_vec(),
            },
        }
    }

    /// Replace the running session with a snapshot's contents.
    ///
    /// # Errors
    /// Returns a validation error and leaves the running session untouched
    /// if the snapshot is from another version or internally inconsistent.
    pub fn restore(&mut self, snapshot: Snapshot) -> Result<()> {
        snapshot.validate()?;
        let now = self.clock.now_ms();

        self.state = snapshot.state;
        self.personality = snapshot.personality;
        self.statistics = snapshot.statistics;
        self.narrative = snapshot.narrative;
        self.achievements = snapshot.achievements;
        self.response = ResponseState::new();
        self.response.last_response_at = snapshot
            .response
            .last_response_age_ms
            .map(|age| now.saturating_sub(age));
        self.response.false_memories = snapshot.response.false_memories;
        self.statistics.track(TrackEvent::Reload);
        self.queue.clear();
        self.last_tick_ms = None;
        self.counters.loads_completed.fetch_add(1, Ordering::Relaxed);

        info!(
            session = %self.state.session,
            turn = self.state.turn_counter,
            "session restored from snapshot"
        );
        Ok(())
    }

    /// Save the running session into a slot with an optional display name.
    ///
    /// # Errors
    /// Returns [`SynapseError::Config`] with no store attached, or any
    /// store error.
    pub fn save_to_slot(&mut self, slot: SaveSlot, name: Option<String>) -> Result<()> {
        let snapshot = self.capture_snapshot(name);
        let Some(store) = self.store.as_ref() else {
            return Err(SynapseError::Config("no save store attached".to_string()));
        };
        store.save_slot(slot, &snapshot)?;
        self.counters.saves_completed.fetch_add(1, Ordering::Relaxed);
        let now = self.clock.now_ms();
        self.autosave.mark_saved(now);
        Ok(())
    }

    /// Load a slot into the running session. `Ok(false)` means the slot
    /// was empty; the running session is untouched on any failure.
    ///
    /// # Errors
    /// Returns [`SynapseError::Config`] with no store attached, or any
    /// store/validation error.
    pub fn load_from_slot(&mut self, slot: SaveSlot) -> Result<bool> {
        let Some(store) = self.store.as_ref() else {
            return Err(SynapseError::Config("no save store attached".to_string()));
        };
        let Some(snapshot) = store.load_slot(slot)? else {
            return Ok(false);
        };
        self.restore(snapshot)?;
        Ok(true)
    }

    /// Save into the reserved quicksave slot.
    ///
    /// # Errors
    /// Same as [`SynapseEngine::save_to_slot`].
    pub fn quicksave(&mut self) -> Result<()> {
        self.save_to_slot(SaveSlot::Quicksave, None)
    }

    /// Load the reserved quicksave slot.
    ///
    /// # Errors
    /// Same as [`SynapseEngine::load_from_slot`].
    pub fn quickload(&mut self) -> Result<bool> {
        self.load_from_slot(SaveSlot::Quicksave)
    }

    // ------------------------------------------------------------------
    // Pipeline stages
    // ------------------------------------------------------------------

    fn observe_suspicion(&mut self, action: &PlayerAction, out: &mut TurnOutput) {
        if self
            .config
            .suspicion
            .suspicious_verbs
            .iter()
            .any(|verb| verb == &action.verb)
        {
            self.statistics.track(TrackEvent::SuspiciousCommand);
            self.counters
                .suspicious_commands
                .fetch_add(1, Ordering::Relaxed);
            let change = stats::modify_awareness(
                &mut self.state,
                self.config.suspicion.awareness_per_hit,
                &self.config.stats,
            );
            debug!(
                verb = %action.verb,
                awareness = self.state.awareness,
                "suspicious command observed"
            );
            out.push_stat(&change);
        }

        if self.response.note_command(&action.raw, &self.config.suspicion) {
            let change = stats::modify_awareness(
                &mut self.state,
                self.config.suspicion.probe_awareness_bonus,
                &self.config.stats,
            );
            out.push_stat(&change);
            if matches!(self.personality.current, Mood::Sinister | Mood::Malicious) {
                if let Some(line) = probe_acknowledgement(self.content.pools(), &mut self.rng) {
                    out.push_text(OutputTag::Ai, line);
                }
            }
        }
    }

    fn resolve_action(&mut self, action: &PlayerAction, out: &mut TurnOutput) {
        if self.try_easter_egg(action, out) {
            return;
        }
        match action.verb.as_str() {
            "go" | "move" | "walk" => self.do_move(action.object.as_deref(), out),
            "look" | "l" => {
                let text = self.look_text();
                out.push_text(OutputTag::Narrative, text);
            }
            "examine" | "inspect" | "x" => self.do_examine(action.object.as_deref(), out),
            "take" | "get" | "grab" => self.do_take(action.object.as_deref(), out),
            "use" => self.do_use(action.object.as_deref(), out),
            "ability" | "focus" => self.do_ability(action.object.as_deref(), out),
            "inventory" | "inv" | "i" => {
                let text = self.inventory_text();
                out.push_text(OutputTag::System, text);
            }
            "help" => out.push_text(OutputTag::System, HELP_TEXT),
            // Free text addressed to the AI; the generator sees the raw line.
            "talk" | "say" | "ask" | "tell" => {}
            _ => out.push_text(OutputTag::System, "You're not sure how to do that."),
        }
    }

    /// Classic adventure incantations. Each distinct one found bumps the
    /// hidden `easter_eggs_found` tally exactly once.
    fn try_easter_egg(&mut self, action: &PlayerAction, out: &mut TurnOutput) -> bool {
        let line = match (action.verb.as_str(), action.object.as_deref()) {
            ("xyzzy", None) => {
                "A hollow voice says: 'Nothing happens. That magic died with the mainframes.'"
            }
            ("sing", None) => {
                "You hum a few notes. Somewhere in the walls, the facility hums them back, \
                 half a step flat."
            }
            ("who", Some("am i")) => "IDENTITY LOOKUP: 28 matching records found. Displaying none of them.",
            ("wake", Some("up")) => "Wake protocols require administrator approval. Request denied.",
            ("open", Some("the pod bay doors")) => {
                "The doors you are thinking of belong to a different facility entirely."
            }
            _ => return false,
        };
        let key = format!("egg_{}", action.verb);
        if !self.state.flag_bool(&key) {
            self.state.set_flag(key, true);
            self.state.bump_flag("easter_eggs_found", 1);
            debug!(
                total = self.state.flag_int("easter_eggs_found"),
                "easter egg found"
            );
        }
        out.push_text(OutputTag::Narrative, line);
        true
    }

    fn do_move(&mut self, direction: Option<&str>, out: &mut TurnOutput) {
        let Some(direction) = direction else {
            out.push_text(OutputTag::System, "Go where?");
            return;
        };
        let Some(room) = self.content.room(&self.state.current_room) else {
            out.push_text(OutputTag::System, "There is nowhere to go from here.");
            return;
        };
        let Some(exit) = room.exits.get(direction) else {
            out.push_text(OutputTag::System, "You can't go that way.");
            return;
        };
        if let Some(required) = &exit.requires_item {
            if !self.state.has_item(required) {
                let name = self.item_name(required);
                out.push_text(
                    OutputTag::System,
                    format!("The way is sealed. You need the {name}."),
                );
                return;
            }
        }

        let destination = exit.to.clone();
        let first = self.state.enter_room(destination.clone());
        self.statistics.track(TrackEvent::RoomVisited(&destination));
        debug!(room = %destination, first, "moved");

        let text = self.look_text();
        out.push_text(OutputTag::Narrative, text);

        if first {
            let first_visit = self
                .content
                .room(&destination)
                .and_then(|r| r.first_visit.clone());
            if let Some(visit) = first_visit {
                out.push_text(OutputTag::Narrative, visit.text);
                let applied = apply_effects(&mut self.state, &visit.effects, &self.config.stats);
                out.push_applied(&applied);
            }
        }
    }

    fn do_examine(&mut self, object: Option<&str>, out: &mut TurnOutput) {
        let Some(object) = object else {
            out.push_text(OutputTag::System, "Examine what?");
            return;
        };
        let Some(id) = self.resolve_item(object) else {
            out.push_text(OutputTag::System, "You see nothing special.");
            return;
        };
        let Some(item) = self.content.item(&id) else {
            out.push_text(OutputTag::System, "You see nothing special.");
            return;
        };
        let text = item
            .examine_text
            .clone()
            .unwrap_or_else(|| item.description.clone());
        let effects = item.examine_effects.clone();
        out.push_text(OutputTag::Narrative, text);
        let applied = apply_effects(&mut self.state, &effects, &self.config.stats);
        out.push_applied(&applied);
    }

    fn do_take(&mut self, object: Option<&str>, out: &mut TurnOutput) {
        let Some(object) = object else {
            out.push_text(OutputTag::System, "Take what?");
            return;
        };
        let Some(id) = self.resolve_item(object) else {
            out.push_text(OutputTag::System, "There's no such thing here.");
            return;
        };
        if self.state.has_item(&id) {
            out.push_text(OutputTag::System, "You already have that.");
            return;
        }
        let in_room = self
            .content
            .room(&self.state.current_room)
            .is_some_and(|room| room.items.contains(&id));
        if !in_room {
            out.push_text(OutputTag::System, "There's no such thing here.");
            return;
        }
        let Some(item) = self.content.item(&id) else {
            out.push_text(OutputTag::System, "There's no such thing here.");
            return;
        };
        if !item.portable {
            out.push_text(OutputTag::System, format!("The {} won't budge.", item.name));
            return;
        }
        let name = item.name.clone();
        self.state.add_item(id);
        out.push_text(OutputTag::Narrative, format!("You take the {name}."));
    }

    fn do_use(&mut self, object: Option<&str>, out: &mut TurnOutput) {
        let Some(object) = object else {
            out.push_text(OutputTag::System, "Use what?");
            return;
        };
        let Some(id) = self.resolve_item(object) else {
            out.push_text(OutputTag::System, "You don't have that.");
            return;
        };
        let Some(item) = self.content.item(&id) else {
            out.push_text(OutputTag::System, "You don't have that.");
            return;
        };

        // Story-gated branch while the unlocking flag is unset.
        if let Some(gate) = &item.gated_use {
            if !self.state.flag_bool(&gate.requires_flag) {
                let text = gate.locked_text.clone();
                let effects = gate.locked_effects.clone();
                out.push_text(OutputTag::Narrative, text);
                let applied = apply_effects(&mut self.state, &effects, &self.config.stats);
                out.push_applied(&applied);
                self.statistics.track(TrackEvent::ItemUsed(&id));
                self.state.recently_used_item = Some(id);
                return;
            }
        }

        let Some(text) = item.use_text.clone() else {
            out.push_text(
                OutputTag::System,
                format!("You can't find a use for the {}.", item.name),
            );
            return;
        };
        let effects = item.use_effects.clone();
        let gate_flags = item.use_sets_flags.clone();
        out.push_text(OutputTag::Narrative, text);
        let applied = apply_effects(&mut self.state, &effects, &self.config.stats);
        out.push_applied(&applied);
        for flag in gate_flags {
            self.state.set_flag(flag, true);
        }
        self.statistics.track(TrackEvent::ItemUsed(&id));
        self.state.recently_used_item = Some(id);
    }

    fn do_ability(&mut self, object: Option<&str>, out: &mut TurnOutput) {
        let Some(object) = object else {
            out.push_text(OutputTag::System, "Focus on what?");
            return;
        };
        let key = object.trim().to_lowercase().replace(' ', "_");
        let Some(character) = self.state.character.clone() else {
            out.push_text(OutputTag::System, "You have no special training to draw on.");
            return;
        };
        let profile = self.content.character_or_neutral(&character);
        if !profile.abilities.iter().any(|ability| ability == &key) {
            out.push_text(OutputTag::System, "You don't have that ability.");
            return;
        }
        self.statistics.track(TrackEvent::AbilityUsed(&key));
        let pretty = key.replace('_', " ");
        out.push_text(
            OutputTag::Narrative,
            format!("You draw on your {pretty}, steadying yourself against the facility."),
        );
    }

    // ------------------------------------------------------------------
    // Lookups and text composition
    // ------------------------------------------------------------------

    /// Resolve a typed object against the current room and the inventory,
    /// matching snake_case ids and display names case-insensitively.
    fn resolve_item(&self, object: &str) -> Option<ItemId> {
        let id_key = object.trim().to_lowercase().replace(' ', "_");
        let name_key = object.trim().to_lowercase();
        let room_items = self
            .content
            .room(&self.state.current_room)
            .map(|room| room.items.clone())
            .unwrap_or_default();
        for id in room_items.iter().chain(self.state.inventory.iter()) {
            if id.as_str() == id_key {
                return Some(id.clone());
            }
            if let Some(item) = self.content.item(id) {
                if item.name.to_lowercase() == name_key {
                    return Some(id.clone());
                }
            }
        }
        None
    }

    fn item_name(&self, id: &ItemId) -> String {
        self.content
            .item(id)
            .map_or_else(|| id.to_string(), |item| item.name.clone())
    }

    fn look_text(&self) -> String {
        let Some(room) = self.content.room(&self.state.current_room) else {
            return "Static. The room refuses to resolve.".to_string();
        };
        let mut text = format!("{}\n{}", room.name, room.description);
        let visible: Vec<String> = room
            .items
            .iter()
            .filter(|id| !self.state.has_item(id))
            .map(|id| self.item_name(id))
            .collect();
        if !visible.is_empty() {
            text.push_str(&format!("\nYou notice: {}.", visible.join(", ")));
        }
        if !room.exits.is_empty() {
            let directions: Vec<&str> = room.exits.keys().map(String::as_str).collect();
            text.push_str(&format!("\nExits: {}.", directions.join(", ")));
        }
        text
    }

    fn inventory_text(&self) -> String {
        if self.state.inventory.is_empty() {
            return "You carry nothing.".to_string();
        }
        let names: Vec<String> = self
            .state
            .inventory
            .iter()
            .map(|id| self.item_name(id))
            .collect();
        format!("You are carrying: {}.", names.join(", "))
    }

    fn grant_achievement(&mut self, id: &AchievementId, out: &mut TurnOutput) {
        if self.achievements.grant(id.clone()) {
            self.counters
                .achievements_unlocked
                .fetch_add(1, Ordering::Relaxed);
            let name = self
                .content
                .achievements()
                .iter()
                .find(|def| &def.id == id)
                .map_or_else(|| id.to_string(), |def| def.name.clone());
            out.push_text(OutputTag::Achievement, format!("Achievement unlocked: {name}"));
            out.push_audio("achievement");
        }
    }

    fn notify_unlocks(&mut self, unlocked: &[UnlockedAchievement], out: &mut TurnOutput) {
        for unlock in unlocked {
            self.counters
                .achievements_unlocked
                .fetch_add(1, Ordering::Relaxed);
            out.push_text(
                OutputTag::Achievement,
                format!("Achievement unlocked: {}", unlock.name),
            );
            out.push_audio("achievement");
            out.push_applied(&unlock.applied);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
