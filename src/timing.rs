// =====================================================================
// File: timing.rs
//
// Description:
//   Wall clock helpers used to benchmark the two indexes against each
//   other. Durations come from the monotonic `Instant` clock and are
//   reported in microseconds.
// =====================================================================
use std::fmt;
use std::time::{Duration, Instant};

/// Run `f` and return its result together with the elapsed time.
///
/// # Example
/// ```
/// use diseasedb::timing::timed;
/// let (sum, elapsed) = timed(|| (1..=10).sum::<u32>());
/// assert_eq!(sum, 55);
/// assert!(elapsed.as_secs() < 1);
/// ```
pub fn timed<T>(f: impl FnOnce() -> T) -> (T, Duration) {
    let start = Instant::now();
    let out = f();
    (out, start.elapsed())
}


/// Whole microseconds in `elapsed`, saturating at `u64::MAX`.
pub fn saturating_micros(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX)
}


/// Which of two timed runs was faster, and by how much.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Comparison {
    /// What was timed, e.g. "searching" or "building".
    pub operation: &'static str,
    pub faster: &'static str,
    pub slower: &'static str,
    pub margin: Duration,
}


impl Comparison {
    /// Compare two labelled durations. A tie goes to the second entry.
    pub fn between(
        operation: &'static str,
        first: (&'static str, Duration),
        second: (&'static str, Duration),
    ) -> Self {
        let (fast, slow) = if first.1 < second.1 {
            (first, second)
        } else {
            (second, first)
        };
        Self {
            operation,
            faster: fast.0,
            slower: slow.0,
            margin: slow.1 - fast.1,
        }
    }
}


impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} was faster in {} by {} microseconds.",
            self.faster,
            self.operation,
            self.margin.as_micros()
        )
    }
}
