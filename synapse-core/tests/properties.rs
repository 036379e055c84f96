//! Property-Based Tests for the SYNAPSE Core
//!
//! Uses `proptest` to verify stat, mood, and snapshot invariants under
//! random inputs: clamping holds for any delta sequence, the corruption
//! ratchet never runs backwards, and a session image survives both wire
//! codecs byte-for-byte.

use proptest::prelude::*;

use std::collections::BTreeSet;

use synapse_core::config::{PersonalityConfig, StatsConfig};
use synapse_core::effects::{apply_effects, EffectSet};
use synapse_core::personality::{mood_for, PersonalityState};
use synapse_core::snapshot::{ResponsePacing, Snapshot, SnapshotCodec, SNAPSHOT_VERSION};
use synapse_core::stats::{modify_awareness, modify_sanity, Statistics, TrackEvent};
use synapse_core::{GameState, ItemId, Mood, RoomId, SessionId};

// ---------------------------------------------------------------------------
// Strategy helpers
// ---------------------------------------------------------------------------

fn fresh_state() -> GameState {
    GameState::new(SessionId::new(), RoomId::new("entrance"))
}

fn arb_deltas() -> impl Strategy<Value = Vec<i32>> {
    prop::collection::vec(-250..250i32, 1..40)
}

fn arb_awareness_walk() -> impl Strategy<Value = Vec<i32>> {
    prop::collection::vec(0..=100i32, 1..60)
}

fn arb_mood() -> impl Strategy<Value = Mood> {
    prop::sample::select(Mood::ALL.to_vec())
}

fn arb_turns() -> impl Strategy<Value = Vec<(i32, i32, Mood)>> {
    prop::collection::vec((0..=100i32, 0..=100i32, arb_mood()), 0..50)
}

fn arb_effect_entries() -> impl Strategy<Value = Vec<(String, i64)>> {
    let key = prop::sample::select(vec![
        "sanity".to_string(),
        "awareness".to_string(),
        "determination".to_string(),
        "wisdom".to_string(),
        "intelligence".to_string(),
    ]);
    prop::collection::vec((key, -50..50i64), 0..30)
}

fn arb_snapshot() -> impl Strategy<Value = Snapshot> {
    (
        0..=100i32,
        0..=100i32,
        0..500u64,
        0..=100i32,
        "[a-z_]{1,16}",
    )
        .prop_map(|(sanity, awareness, turns, streak_seed, flag)| {
            let mut state = fresh_state();
            state.sanity = sanity;
            state.awareness = awareness;
            state.turn_counter = turns;
            state.enter_room(RoomId::new("laboratory_section"));
            state.add_item(ItemId::new("security_keycard"));
            state.set_flag(flag, true);

            let mut personality = PersonalityState::new();
            personality.current = mood_for(awareness, &PersonalityConfig::default());

            let mut statistics = Statistics::new();
            statistics.track(TrackEvent::Interaction {
                question: "what is this place?",
            });
            statistics.track(TrackEvent::TurnCompleted {
                sanity: streak_seed,
                awareness,
                mood: personality.current,
            });

            Snapshot {
                version: SNAPSHOT_VERSION,
                saved_at: "2026-08-25T12:00:00+00:00".to_string(),
                name: Some("property run".to_string()),
                state,
                personality,
                statistics,
                narrative: synapse_core::narrative::NarrativeEngine::new(),
                achievements: synapse_core::achievements::AchievementEngine::new(),
                response: ResponsePacing::default(),
            }
        })
}

// ---------------------------------------------------------------------------
// Property: Sanity stays in 0..=100 for any delta sequence
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn sanity_stays_within_bounds(deltas in arb_deltas()) {
        let mut state = fresh_state();
        let config = StatsConfig::default();

        for delta in deltas {
            let change = modify_sanity(&mut state, delta, &config);
            prop_assert!((0..=100).contains(&state.sanity));
            prop_assert_eq!(change.value, state.sanity);
            prop_assert_eq!(change.applied(), change.value - change.previous);
        }
    }
}

// ---------------------------------------------------------------------------
// Property: Sanity depletion ends the session exactly once
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn sanity_depletion_latches_once(deltas in arb_deltas()) {
        let mut state = fresh_state();
        let config = StatsConfig::default();
        let mut endings = 0usize;

        for delta in deltas {
            let was_over = state.game_over.is_some();
            let change = modify_sanity(&mut state, delta, &config);
            if change.ended_session {
                endings += 1;
                prop_assert!(!was_over);
            }
            if was_over {
                prop_assert!(state.game_over.is_some());
            }
        }

        prop_assert!(endings <= 1);
        prop_assert_eq!(endings, usize::from(state.game_over.is_some()));
    }
}

// ---------------------------------------------------------------------------
// Property: Awareness clamps but never ends the session
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn awareness_never_ends_the_session(deltas in arb_deltas()) {
        let mut state = fresh_state();
        let config = StatsConfig::default();

        for delta in deltas {
            let change = modify_awareness(&mut state, delta, &config);
            prop_assert!((0..=100).contains(&state.awareness));
            prop_assert!(!change.ended_session);
        }

        prop_assert!(state.game_over.is_none());
    }
}

// ---------------------------------------------------------------------------
// Property: Mood is monotone in awareness
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn mood_tracks_awareness_monotonically(a in 0..=100i32, b in 0..=100i32) {
        let config = PersonalityConfig::default();
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(mood_for(lo, &config) <= mood_for(hi, &config));
    }
}

// ---------------------------------------------------------------------------
// Property: Default thresholds partition awareness at 25/50/75
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn default_thresholds_partition_awareness(awareness in 0..=100i32) {
        let expected = match awareness {
            i32::MIN..=24 => Mood::Friendly,
            25..=49 => Mood::Ambiguous,
            50..=74 => Mood::Sinister,
            _ => Mood::Malicious,
        };
        prop_assert_eq!(mood_for(awareness, &PersonalityConfig::default()), expected);
    }
}

// ---------------------------------------------------------------------------
// Property: Corruption only ratchets upward, capped by config
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn corruption_only_ratchets_upward(walk in arb_awareness_walk()) {
        let config = PersonalityConfig::default();
        let mut personality = PersonalityState::new();

        for awareness in walk {
            let before = personality.corruption;
            let transition = personality.evaluate(awareness, &config);
            prop_assert!(personality.corruption >= before);
            prop_assert!(personality.corruption <= config.corruption_cap);

            // The ratchet moves only on an escalating transition.
            if personality.corruption > before {
                let t = transition.unwrap();
                prop_assert!(t.corrupted);
                prop_assert!(matches!(t.to, Mood::Sinister | Mood::Malicious));
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Property: Transitions connect distinct moods and match the machine
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn transitions_connect_distinct_moods(walk in arb_awareness_walk()) {
        let config = PersonalityConfig::default();
        let mut personality = PersonalityState::new();

        for awareness in walk {
            let before = personality.current;
            match personality.evaluate(awareness, &config) {
                Some(transition) => {
                    prop_assert_ne!(transition.from, transition.to);
                    prop_assert_eq!(transition.from, before);
                    prop_assert_eq!(transition.to, personality.current);
                }
                None => prop_assert_eq!(personality.current, before),
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Property: Re-evaluating the same awareness is a no-op
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn repeated_evaluation_settles(awareness in 0..=100i32) {
        let config = PersonalityConfig::default();
        let mut personality = PersonalityState::new();

        personality.evaluate(awareness, &config);
        let settled = personality.current;
        prop_assert!(personality.evaluate(awareness, &config).is_none());
        prop_assert_eq!(personality.current, settled);
    }
}

// ---------------------------------------------------------------------------
// Property: Unique questions fold case and whitespace
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn questions_fold_case_and_whitespace(raw in prop::collection::vec("[ A-Za-z?]{0,16}", 1..30)) {
        let mut statistics = Statistics::new();
        let mut folded = BTreeSet::new();

        for question in &raw {
            statistics.track(TrackEvent::Interaction {
                question: question.as_str(),
            });
            folded.insert(question.trim().to_lowercase());
        }

        prop_assert_eq!(statistics.interactions, raw.len() as u64);
        prop_assert_eq!(statistics.unique_questions.len(), folded.len());
    }
}

// ---------------------------------------------------------------------------
// Property: Mood turns account for every completed turn
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn mood_turns_account_for_every_turn(turns in arb_turns()) {
        let mut statistics = Statistics::new();
        let mut max_sanity = 0;
        let mut streak = 0u64;

        for &(sanity, awareness, mood) in &turns {
            statistics.track(TrackEvent::TurnCompleted { sanity, awareness, mood });
            max_sanity = max_sanity.max(sanity);
            streak = if sanity >= 100 { streak + 1 } else { 0 };
        }

        let total: u64 = Mood::ALL.iter().map(|&m| statistics.turns_in_mood(m)).sum();
        prop_assert_eq!(total, turns.len() as u64);
        prop_assert_eq!(statistics.turns_survived, turns.len() as u64);
        prop_assert_eq!(statistics.max_sanity, max_sanity);
        prop_assert_eq!(statistics.full_sanity_streak, streak);
    }
}

// ---------------------------------------------------------------------------
// Property: Effect keys route to stats or flags, never both
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn effect_keys_route_by_name(entries in arb_effect_entries()) {
        let mut state = fresh_state();
        let mut effects = EffectSet::new();
        for (key, delta) in &entries {
            effects = effects.with(key.clone(), *delta);
        }

        let applied = apply_effects(&mut state, &effects, &StatsConfig::default());

        prop_assert!((0..=100).contains(&state.sanity));
        prop_assert!((0..=100).contains(&state.awareness));

        let stat_entries = entries
            .iter()
            .filter(|(k, _)| k == "sanity" || k == "awareness")
            .count();
        prop_assert_eq!(applied.stat_changes.len(), stat_entries);

        for key in ["determination", "wisdom", "intelligence"] {
            let expected: i64 = entries
                .iter()
                .filter(|(k, _)| k == key)
                .map(|(_, d)| d)
                .sum();
            prop_assert_eq!(state.flag_int(key), expected);
        }
    }
}

// ---------------------------------------------------------------------------
// Property: Snapshots survive both wire codecs intact
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    #[test]
    fn snapshots_survive_both_codecs(snapshot in arb_snapshot()) {
        for codec in [SnapshotCodec::Json, SnapshotCodec::MsgPack] {
            let bytes = codec.encode(&snapshot).unwrap();
            let decoded = codec.decode(&bytes).unwrap();
            prop_assert_eq!(&decoded, &snapshot);
            prop_assert!(decoded.validate().is_ok());
        }
    }
}

// ---------------------------------------------------------------------------
// Property: Out-of-range stats never validate
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn out_of_range_stats_never_validate(
        snapshot in arb_snapshot(),
        bad in prop_oneof![-400..=-1i32, 101..=400i32],
        hit_awareness in any::<bool>(),
    ) {
        let mut snapshot = snapshot;
        if hit_awareness {
            snapshot.state.awareness = bad;
        } else {
            snapshot.state.sanity = bad;
        }

        prop_assert!(snapshot.validate().is_err());

        // The JSON codec re-validates on decode, so the image is rejected
        // even when the bytes themselves parse.
        let bytes = SnapshotCodec::Json.encode(&snapshot).unwrap();
        prop_assert!(SnapshotCodec::Json.decode(&bytes).is_err());
    }
}
