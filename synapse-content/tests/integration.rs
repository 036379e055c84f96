//! Full-session walkthroughs of the Nexus facility.
//!
//! Every test drives a real engine seeded with the complete content set,
//! a fixed RNG, and a hand-cranked clock, then replays a slice of an
//! actual playthrough: the keycard chase, the identity chain down to the
//! core terminal, the guard's photo, a sanity collapse, and the
//! persistence paths a browser host would exercise.

use std::sync::atomic::Ordering;

use synapse_content::build_registry;
use synapse_core::clock::{Clock, ManualClock};
use synapse_core::types::{AchievementId, CharacterId, Mood};
use synapse_core::{
    OutputEvent, OutputTag, SaveSlot, SaveStore, SynapseConfig, SynapseEngine, SynapseError,
    TurnOutput,
};

fn engine() -> (SynapseEngine, ManualClock) {
    // RUST_LOG=synapse_core=debug surfaces the engine's turn traces.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();

    let clock = ManualClock::new();
    let mut engine = SynapseEngine::with_rng_seed(SynapseConfig::default(), build_registry(), 42)
        .expect("full content set validates");
    engine.set_clock(Box::new(clock.clone()));
    engine.new_game();
    (engine, clock)
}

fn run(engine: &mut SynapseEngine, line: &str) -> TurnOutput {
    engine
        .process_command(line)
        .unwrap_or_else(|e| panic!("{line:?} should not end the session: {e}"))
}

fn unlocked(engine: &SynapseEngine, id: &str) -> bool {
    engine.achievements().is_unlocked(&AchievementId::new(id))
}

fn has_audio(out: &TurnOutput, wanted: &str) -> bool {
    out.events
        .iter()
        .any(|event| matches!(event, OutputEvent::Audio { cue } if cue == wanted))
}

#[test]
fn the_front_door_greets_new_sessions() {
    let (mut engine, _clock) = engine();

    let out = run(&mut engine, "look");
    assert!(out.contains_line(OutputTag::Narrative, "sterile entrance hall"));
    assert!(out.contains_line(OutputTag::Narrative, "Exits:"));

    let out = run(&mut engine, "help");
    assert!(out.contains_line(OutputTag::System, "Commands:"));
}

#[test]
fn turn_one_unlocks_the_arrival_achievements() {
    let (mut engine, _clock) = engine();

    let out = run(&mut engine, "look");

    assert!(unlocked(&engine, "first_awakening"));
    assert!(unlocked(&engine, "first_ai_contact"));
    assert!(out.contains_line(
        OutputTag::Achievement,
        "Achievement unlocked: Digital Awakening"
    ));
    assert!(has_audio(&out, "achievement"));
    assert!(
        engine
            .counters()
            .achievements_unlocked
            .load(Ordering::Relaxed)
            >= 2
    );
}

#[test]
fn the_sealed_ladder_names_its_key() {
    let (mut engine, _clock) = engine();

    // 1. Walk to the maintenance area without the keycard.
    run(&mut engine, "go north");
    run(&mut engine, "go west");
    assert_eq!(engine.state().current_room.as_str(), "maintenance_area");

    // 2. The ladder refuses and says what it wants.
    let out = run(&mut engine, "go down");
    assert!(out.contains_line(
        OutputTag::System,
        "The way is sealed. You need the Security Keycard."
    ));
    assert_eq!(engine.state().current_room.as_str(), "maintenance_area");
}

#[test]
fn the_keycard_opens_the_sub_basement() {
    let (mut engine, _clock) = engine();

    // 1. Fetch the keycard from the security office.
    run(&mut engine, "go east");
    let out = run(&mut engine, "take security keycard");
    assert!(out.contains_line(OutputTag::Narrative, "You take the Security Keycard."));

    // 2. Cross the facility and descend.
    run(&mut engine, "go west");
    run(&mut engine, "go north");
    run(&mut engine, "go west");
    let out = run(&mut engine, "go down");

    // 3. The core chamber recognizes the player on first entry.
    assert_eq!(engine.state().current_room.as_str(), "sub_basement");
    assert!(out.contains_line(OutputTag::Narrative, "Welcome back, Creator"));
}

#[test]
fn the_core_terminal_refuses_strangers() {
    let (mut engine, _clock) = engine();

    run(&mut engine, "go east");
    run(&mut engine, "take security keycard");
    run(&mut engine, "go west");
    run(&mut engine, "go north");
    run(&mut engine, "go west");
    run(&mut engine, "go down");

    // Without the identity flag the terminal stays locked and sets nothing.
    let out = run(&mut engine, "use synapse core terminal");
    assert!(out.contains_line(OutputTag::Narrative, "Access denied"));
    assert!(!engine.state().flag_bool("core_accessed"));
    assert!(!engine.state().flag_bool("final_choice_available"));
    assert!(!unlocked(&engine, "puppet_master"));
}

#[test]
fn the_truth_chain_runs_to_an_ending() {
    let (mut engine, _clock) = engine();

    // 1. Keycard first; the descent comes later.
    run(&mut engine, "go east");
    run(&mut engine, "take security keycard");
    run(&mut engine, "go west");

    // 2. Dr. Chen's office: the computer points at the hidden drive.
    run(&mut engine, "go north");
    run(&mut engine, "go east");
    run(&mut engine, "go north");
    let out = run(&mut engine, "use personal computer");
    assert!(out.contains_line(OutputTag::Narrative, "Check the hidden drive"));
    assert!(engine.state().flag_bool("knows_about_memory_wipe"));

    // 3. The drive burns the truth in and unlocks the story gate.
    run(&mut engine, "take hidden drive");
    run(&mut engine, "use hidden drive");
    assert!(engine.state().flag_bool("knows_true_identity"));
    assert!(engine.state().flag_bool("research_data_accessed"));
    assert!(unlocked(&engine, "truth_seeker"));

    // 4. By now awareness has dragged the AI all the way down.
    run(&mut engine, "go south");
    run(&mut engine, "go west");
    assert_eq!(engine.personality().current, Mood::Malicious);
    assert!(unlocked(&engine, "first_doubt"));
    assert!(unlocked(&engine, "sinister_turn"));
    assert!(unlocked(&engine, "full_malice"));
    assert!(unlocked(&engine, "ai_personality_shift"));

    // 5. Down to the core; the terminal opens for its creator.
    run(&mut engine, "go west");
    run(&mut engine, "go down");
    let out = run(&mut engine, "use synapse core terminal");
    assert!(out.contains_line(OutputTag::Narrative, "The choice, this time, is yours"));
    assert!(engine.state().flag_bool("core_accessed"));
    assert!(engine.state().flag_bool("final_choice_available"));
    assert!(unlocked(&engine, "puppet_master"));
    assert!(engine.state().sanity > 0, "the golden path must survive");

    // 6. Choose the escape and the session closes around it.
    let out = engine
        .choose_ending("successful_escape")
        .expect("session still live");
    assert!(out.contains_line(OutputTag::System, "Ending reached: successful_escape."));
    assert!(unlocked(&engine, "escape_artist"));
    assert!(matches!(
        engine.process_command("look"),
        Err(SynapseError::SessionOver { .. })
    ));
}

#[test]
fn the_guards_photo_answers_back() {
    let (mut engine, _clock) = engine();
    engine.select_character(&CharacterId::new("security-guard"));

    let out = run(&mut engine, "use family photo");

    // The photo itself is inert; the conditional event carries the payload.
    assert!(out.contains_line(OutputTag::Narrative, "your daughter's photo"));
    assert_eq!(engine.state().flag_int("determination"), 10);
    assert!(engine.state().sanity >= 95);
    // Starting awareness 70 pulls the AI straight past Ambiguous.
    assert_eq!(engine.personality().current, Mood::Sinister);
    assert!(unlocked(&engine, "sinister_turn"));
    assert!(!unlocked(&engine, "first_doubt"));
}

#[test]
fn five_incantations_fill_the_egg_basket() {
    let (mut engine, _clock) = engine();

    for line in ["xyzzy", "sing", "who am i", "wake up", "open the pod bay doors"] {
        run(&mut engine, line);
    }
    assert_eq!(engine.state().flag_int("easter_eggs_found"), 5);
    assert!(unlocked(&engine, "easter_egg_hunter"));

    // Repeats never double-count.
    run(&mut engine, "xyzzy");
    assert_eq!(engine.state().flag_int("easter_eggs_found"), 5);
}

#[test]
fn sanity_collapse_is_terminal() {
    let (mut engine, _clock) = engine();

    run(&mut engine, "go north");
    run(&mut engine, "go north");
    run(&mut engine, "take neural interface headset");

    // Drain sanity with the headset until the facility wins.
    let mut final_out = None;
    for _ in 0..80 {
        let out = run(&mut engine, "use neural interface headset");
        if engine.state().game_over.is_some() {
            final_out = Some(out);
            break;
        }
    }

    let out = final_out.expect("the headset should end the session");
    assert_eq!(engine.state().sanity, 0);
    assert!(out.contains_line(OutputTag::System, "consciousness dissolves"));
    assert!(has_audio(&out, "game_over"));
    assert_eq!(engine.statistics().deaths, 1);
    assert!(matches!(
        engine.process_command("look"),
        Err(SynapseError::SessionOver { .. })
    ));
}

#[test]
fn snapshots_restore_a_run_in_flight() {
    let (mut engine, _clock) = engine();

    run(&mut engine, "go north");
    run(&mut engine, "go east");
    let snapshot = engine.snapshot();
    let saved_turn = engine.state().turn_counter;
    let saved_room = engine.state().current_room.clone();
    let saved_sanity = engine.state().sanity;
    let saved_awareness = engine.state().awareness;

    // Diverge, then rewind.
    run(&mut engine, "go north");
    run(&mut engine, "use personal computer");
    assert!(engine.state().flag_bool("knows_about_memory_wipe"));

    engine.restore(snapshot).expect("snapshot restores");
    assert_eq!(engine.state().turn_counter, saved_turn);
    assert_eq!(engine.state().current_room, saved_room);
    assert_eq!(engine.state().sanity, saved_sanity);
    assert_eq!(engine.state().awareness, saved_awareness);
    assert!(!engine.state().flag_bool("knows_about_memory_wipe"));
    assert_eq!(engine.statistics().reloads, 1);
}

#[test]
fn sqlite_slots_round_trip_a_session() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = SynapseConfig::default();
    let store =
        SaveStore::open(dir.path().join("saves.db"), &config.persistence).expect("store opens");

    let (mut engine, _clock) = engine();
    engine.attach_store(store);

    // 1. Save a named slot mid-run.
    run(&mut engine, "go north");
    run(&mut engine, "go west");
    let saved_room = engine.state().current_room.clone();
    engine
        .save_to_slot(SaveSlot::Numbered(0), Some("before the descent".to_string()))
        .expect("slot save");

    // 2. Wander off, then load the slot back.
    run(&mut engine, "go east");
    run(&mut engine, "go south");
    assert!(engine.load_from_slot(SaveSlot::Numbered(0)).expect("slot load"));
    assert_eq!(engine.state().current_room, saved_room);

    // 3. Quicksave works the same way through its reserved slot.
    run(&mut engine, "go east");
    let quick_room = engine.state().current_room.clone();
    engine.quicksave().expect("quicksave");
    run(&mut engine, "go west");
    assert!(engine.quickload().expect("quickload"));
    assert_eq!(engine.state().current_room, quick_room);

    // 4. An empty slot reports itself instead of failing.
    assert!(!engine.load_from_slot(SaveSlot::Numbered(7)).expect("empty slot"));
}

#[test]
fn the_autosave_timer_writes_on_schedule() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = SynapseConfig::default();
    let store =
        SaveStore::open(dir.path().join("saves.db"), &config.persistence).expect("store opens");

    let (mut engine, clock) = engine();
    engine.attach_store(store);
    run(&mut engine, "go north");

    // Too early: nothing written yet.
    clock.set(10_000);
    engine.process_tick(clock.now_ms());
    let empty = engine
        .store()
        .expect("store attached")
        .load_slot(SaveSlot::Autosave)
        .expect("slot readable");
    assert!(empty.is_none());

    // Past the 30 second default interval the tick writes the slot.
    clock.set(31_000);
    engine.process_tick(clock.now_ms());
    let written = engine
        .store()
        .expect("store attached")
        .load_slot(SaveSlot::Autosave)
        .expect("slot readable");
    assert!(written.is_some());
}

#[test]
fn telemetry_records_every_turn() {
    let (mut engine, _clock) = engine();

    run(&mut engine, "look");
    run(&mut engine, "go north");
    run(&mut engine, "inventory");

    let monitor = engine.monitor();
    assert_eq!(monitor.turn_count(), 3);
    assert!(monitor.last_turn_ms() >= 0.0);
    assert!(monitor.budget_ms() > 0.0);
}
