//! SYNAPSE Benchmark Suite
//!
//! CI-enforced performance targets:
//!   full_turn_look ............. < 5ms (the configured turn budget)
//!   full_turn_move ............. < 5ms
//!   personality_evaluate_sweep . < 1μs
//!   snapshot_encode_json ....... < 200μs
//!   snapshot_encode_msgpack .... < 100μs
//!   snapshot_decode_msgpack .... < 150μs
//!   sqlite_slot_save ........... < 5ms

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

use synapse_content::build_registry;
use synapse_core::config::PersonalityConfig;
use synapse_core::personality::PersonalityState;
use synapse_core::{SaveSlot, SaveStore, SnapshotCodec, SynapseConfig, SynapseEngine};

/// A deterministic engine at the front door, one seed for every run.
fn session() -> SynapseEngine {
    let mut engine = SynapseEngine::with_rng_seed(SynapseConfig::default(), build_registry(), 7)
        .expect("engine construction");
    engine.new_game();
    engine
}

/// A session a few turns in, enough to give snapshots realistic weight.
fn mid_session() -> SynapseEngine {
    let mut engine = session();
    for command in ["look", "go north", "inventory", "help"] {
        engine.process_command(command).expect("warmup turn");
    }
    engine
}

/// Benchmark: One observation turn through the full pipeline (target: < 5ms).
///
/// Each iteration starts from a fresh session so escalation never drags a
/// long benchmark run into a game over.
fn bench_full_turn_look(c: &mut Criterion) {
    c.bench_function("full_turn_look", |b| {
        b.iter_batched(
            session,
            |mut engine| {
                let output = engine.process_command(black_box("look")).expect("turn");
                black_box(output);
            },
            BatchSize::SmallInput,
        );
    });
}

/// Benchmark: One movement turn, including room narration (target: < 5ms).
fn bench_full_turn_move(c: &mut Criterion) {
    c.bench_function("full_turn_move", |b| {
        b.iter_batched(
            session,
            |mut engine| {
                let output = engine.process_command(black_box("go north")).expect("turn");
                black_box(output);
            },
            BatchSize::SmallInput,
        );
    });
}

/// Benchmark: Mood re-evaluation across a full awareness arc (target: < 1μs).
fn bench_personality_evaluate(c: &mut Criterion) {
    let config = PersonalityConfig::default();

    c.bench_function("personality_evaluate_sweep", |b| {
        b.iter(|| {
            let mut personality = PersonalityState::new();
            for awareness in [0, 30, 55, 80, 100, 40, 10] {
                black_box(personality.evaluate(black_box(awareness), &config));
            }
        });
    });
}

/// Benchmark: Snapshot export through both codecs.
fn bench_snapshot_codecs(c: &mut Criterion) {
    let engine = mid_session();
    let snapshot = engine.snapshot();
    let msgpack = SnapshotCodec::MsgPack
        .encode(&snapshot)
        .expect("msgpack encode");

    c.bench_function("snapshot_encode_json", |b| {
        b.iter(|| {
            let bytes = SnapshotCodec::Json.encode(black_box(&snapshot)).expect("encode");
            black_box(bytes);
        });
    });

    c.bench_function("snapshot_encode_msgpack", |b| {
        b.iter(|| {
            let bytes = SnapshotCodec::MsgPack
                .encode(black_box(&snapshot))
                .expect("encode");
            black_box(bytes);
        });
    });

    c.bench_function("snapshot_decode_msgpack", |b| {
        b.iter(|| {
            let decoded = SnapshotCodec::MsgPack
                .decode(black_box(&msgpack))
                .expect("decode");
            black_box(decoded);
        });
    });
}

/// Benchmark: One checksummed slot write to SQLite (target: < 5ms).
fn bench_sqlite_slot_save(c: &mut Criterion) {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut engine = mid_session();
    let persistence = engine.config().persistence.clone();
    let store = SaveStore::open(dir.path().join("bench-saves.db"), &persistence).expect("open store");
    engine.attach_store(store);

    c.bench_function("sqlite_slot_save", |b| {
        b.iter(|| {
            engine
                .save_to_slot(black_box(SaveSlot::Quicksave), None)
                .expect("save");
        });
    });
}

criterion_group!(
    benches,
    bench_full_turn_look,
    bench_full_turn_move,
    bench_personality_evaluate,
    bench_snapshot_codecs,
    bench_sqlite_slot_save,
);
criterion_main!(benches);
