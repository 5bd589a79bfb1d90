use std::hint::black_box;
use std::time::{Duration, Instant};

use rand::Rng;
use tracing::info;

fn warmup_op(x: f64, y: f64) -> f64 {
    ((x / (y * y)) * (x + y)).sqrt()
}

fn operand(rng: &mut impl Rng) -> f64 {
    rng.gen::<f64>() * 1000.0 + 10000.0
}

/// Keep the CPU busy with floating-point work for `duration` so that
/// frequency scaling settles before the first sample.
pub fn warmup(duration: Duration) {
    if duration.is_zero() {
        return;
    }

    info!(seconds = duration.as_secs_f64(), "warming up");
    let mut rng = rand::thread_rng();
    let start = Instant::now();
    while start.elapsed() < duration {
        black_box(warmup_op(operand(&mut rng), operand(&mut rng)));
    }
}
