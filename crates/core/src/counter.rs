//! A stepping counter that remembers every value it has held.

use core::fmt;

use crate::error::ErrorKind;

/// Errors raised by [`Counter`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CounterError {
    #[error("counter overflowed adding {increment} to {value}")]
    Overflow { value: i64, increment: i64 },
}

impl CounterError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        ErrorKind::Validation
    }
}

/// Counts in steps and keeps its history, starting with the initial value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Counter {
    initial: i64,
    step: i64,
    history: Vec<i64>,
}

impl Counter {
    #[must_use]
    pub fn new(initial: i64, step: i64) -> Self {
        Self {
            initial,
            step,
            history: vec![initial],
        }
    }

    #[must_use]
    pub fn current(&self) -> i64 {
        self.history.last().copied().unwrap_or(self.initial)
    }

    #[must_use]
    pub const fn step(&self) -> i64 {
        self.step
    }

    /// Advance by the configured step.
    ///
    /// # Errors
    ///
    /// Returns [`CounterError::Overflow`] if the result does not fit in `i64`.
    pub fn tick(&mut self) -> Result<i64, CounterError> {
        self.tick_by(self.step)
    }

    /// Advance by `increment`; the counter is unchanged on overflow.
    ///
    /// # Errors
    ///
    /// Returns [`CounterError::Overflow`] if the result does not fit in `i64`.
    pub fn tick_by(&mut self, increment: i64) -> Result<i64, CounterError> {
        let value = self.current();
        let next = value
            .checked_add(increment)
            .ok_or(CounterError::Overflow { value, increment })?;
        self.history.push(next);
        Ok(next)
    }

    /// Jump straight to `value`. The jump is recorded in the history.
    pub fn set_value(&mut self, value: i64) {
        self.history.push(value);
    }

    /// Go back to the initial value and forget the history.
    pub fn reset(&mut self) {
        self.history.clear();
        self.history.push(self.initial);
    }

    /// Every value held so far, oldest first.
    #[must_use]
    pub fn history(&self) -> &[i64] {
        &self.history
    }

    /// Number of changes since construction or the last reset.
    #[must_use]
    pub fn total_increments(&self) -> usize {
        self.history.len().saturating_sub(1)
    }
}

impl Default for Counter {
    fn default() -> Self {
        Self::new(0, 1)
    }
}

impl fmt::Display for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Counter(value={}, step={})", self.current(), self.step)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_and_history() {
        let mut counter = Counter::new(10, 5);
        assert_eq!(counter.tick().unwrap(), 15);
        assert_eq!(counter.tick_by(3).unwrap(), 18);
        assert_eq!(counter.tick().unwrap(), 23);
        assert_eq!(counter.history(), [10, 15, 18, 23]);
        assert_eq!(counter.total_increments(), 3);
        assert_eq!(counter.to_string(), "Counter(value=23, step=5)");
    }

    #[test]
    fn test_set_value_and_reset() {
        let mut counter = Counter::default();
        counter.tick().unwrap();
        counter.set_value(100);
        assert_eq!(counter.current(), 100);
        assert_eq!(counter.history(), [0, 1, 100]);

        counter.reset();
        assert_eq!(counter.current(), 0);
        assert_eq!(counter.total_increments(), 0);
    }

    #[test]
    fn test_overflow_leaves_counter_unchanged() {
        let mut counter = Counter::new(i64::MAX - 1, 1);
        assert_eq!(counter.tick().unwrap(), i64::MAX);
        let err = counter.tick().unwrap_err();
        assert_eq!(
            err,
            CounterError::Overflow {
                value: i64::MAX,
                increment: 1
            }
        );
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(counter.current(), i64::MAX);
        assert_eq!(counter.total_increments(), 1);
    }
}
