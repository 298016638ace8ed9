//! Tick throughput benchmark.
//!
//! Replays a recorded one-minute session; useful for spotting regressions
//! in the per-tick hot path (spawn streams, overlap resolution, hashing is
//! excluded).

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};

use skillet_core::game::input::{Hold, InputFrame};
use skillet_core::game::tick::{replay_session, SessionConfig};

fn session_frames(frame_count: usize) -> Vec<(i64, InputFrame)> {
    let mut frames = vec![(16, InputFrame::with_primary())];
    for i in 0..frame_count {
        let input = match i % 11 {
            0 => InputFrame::with_hold(Hold::Left),
            5 => InputFrame::with_hold(Hold::Right),
            _ => InputFrame::new(),
        };
        frames.push((16, input));
    }
    frames
}

fn bench_replay(c: &mut Criterion) {
    let config = SessionConfig::default();
    // One minute at ~60 Hz
    let frames = session_frames(3600);

    c.bench_function("replay_session_1min", |b| {
        b.iter(|| replay_session(black_box(12345), &frames, &config))
    });
}

criterion_group!(benches, bench_replay);
criterion_main!(benches);
