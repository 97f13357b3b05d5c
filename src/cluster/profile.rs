use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::time::Duration;

/// Work done by one `partition` call
///
/// Nested algorithms merge the profiles of their inner runs with `+=`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PartitioningProfile {
    /// Completed assign + update passes
    pub iterations: usize,
    /// Wall-clock time of the call
    pub elapsed: Duration,
}

impl PartitioningProfile {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl AddAssign for PartitioningProfile {
    fn add_assign(&mut self, rhs: Self) {
        self.iterations += rhs.iterations;
        self.elapsed += rhs.elapsed;
    }
}

/// Saturates at zero
impl SubAssign for PartitioningProfile {
    fn sub_assign(&mut self, rhs: Self) {
        self.iterations = self.iterations.saturating_sub(rhs.iterations);
        self.elapsed = self.elapsed.saturating_sub(rhs.elapsed);
    }
}

impl Add for PartitioningProfile {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self {
        self += rhs;
        self
    }
}

impl Sub for PartitioningProfile {
    type Output = Self;

    fn sub(mut self, rhs: Self) -> Self {
        self -= rhs;
        self
    }
}

/// Renders a duration the way the status line shows it
///
/// Microseconds up to 10 ms, milliseconds up to 1 s, seconds above.
pub fn format_elapsed(elapsed: Duration) -> String {
    let micros = elapsed.as_micros();

    if micros > 1_000_000 {
        format!("{:.3}s", elapsed.as_secs_f64())
    } else if micros > 10_000 {
        format!("{:.3}ms", micros as f64 / 1000.0)
    } else {
        format!("{micros}µs")
    }
}
