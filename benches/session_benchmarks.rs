use std::time::{Duration, Instant};

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use keysprint::engine::metrics::{compute_accuracy, compute_wpm};
use keysprint::generator::{ContentMode, TextSupplier, WordBank};
use keysprint::session::{KeyInput, SessionController};

/// Keys for typing `count` tokens with roughly one error per seven keys.
fn make_script(tokens: &[String], count: usize) -> Vec<KeyInput> {
    let mut keys = Vec::new();
    for (i, token) in tokens.iter().take(count).enumerate() {
        for (j, ch) in token.chars().enumerate() {
            if (i + j) % 7 == 0 {
                keys.push(KeyInput::Char('#'));
            } else {
                keys.push(KeyInput::Char(ch));
            }
        }
        keys.push(KeyInput::Space);
    }
    keys
}

fn bench_keystrokes(c: &mut Criterion) {
    c.bench_function("session on_key (60 tokens)", |b| {
        b.iter_batched(
            || {
                let session = SessionController::new(WordBank::seeded(42), ContentMode::Words, 60);
                let script = make_script(session.tokens(), 60);
                (session, script)
            },
            |(mut session, script)| {
                let now = Instant::now();
                for key in script {
                    session.on_key(black_box(key), now);
                }
                session
            },
            criterion::BatchSize::SmallInput,
        )
    });
}

fn bench_full_session(c: &mut Criterion) {
    c.bench_function("session typing + 60 ticks", |b| {
        b.iter_batched(
            || SessionController::new(WordBank::seeded(7), ContentMode::Words, 60),
            |mut session| {
                let t0 = Instant::now();
                let script = make_script(session.tokens(), 40);
                for key in script {
                    session.on_key(key, t0);
                }
                session.poll_clock(t0 + Duration::from_secs(60));
                session
            },
            criterion::BatchSize::SmallInput,
        )
    });
}

fn bench_metrics(c: &mut Criterion) {
    c.bench_function("compute_wpm + compute_accuracy", |b| {
        b.iter(|| {
            (
                compute_wpm(black_box(312), black_box(60), black_box(17)),
                compute_accuracy(black_box(312), black_box(23)),
            )
        })
    });
}

fn bench_generation(c: &mut Criterion) {
    let mut bank = WordBank::seeded(1);
    c.bench_function("WordBank generate 70 words", |b| {
        b.iter(|| bank.generate(black_box(70), ContentMode::Words))
    });
}

criterion_group!(
    benches,
    bench_keystrokes,
    bench_full_session,
    bench_metrics,
    bench_generation
);
criterion_main!(benches);
