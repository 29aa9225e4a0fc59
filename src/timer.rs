//! The chip8 countdown timers and the frame cadence they run at.
//!
//! Both timers count down once per frame, independent of how many
//! instructions ran during that frame.
use crate::definitions::{cpu, timer};

/// Represents a timer inside of the chip
/// infrastruture, it will count down to
/// zero from what ever number given, once
/// per frame.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    /// will store the value of the timer
    value: u8,
}

impl Timer {
    /// Will create a new timer with the given value.
    pub fn new(value: u8) -> Self {
        Self { value }
    }

    /// Will set the value from which the timer shall count down from.
    pub fn set_value(&mut self, value: u8) {
        self.value = value;
    }

    /// Will get the value that the counter is currently at.
    pub fn get_value(&self) -> u8 {
        self.value
    }

    /// Returns true while the timer is still counting down.
    pub fn is_active(&self) -> bool {
        self.value > 0
    }

    /// Counts down by one, a finished timer stays at zero.
    pub fn tick(&mut self) {
        self.value = self.value.saturating_sub(1);
    }
}

/// The relation between the simulated cpu speed and the refresh rate of the
/// frontend, used to calculate how many instructions run per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cadence {
    /// instructions per second
    pub clock_hertz: u32,
    /// frames per second, this is the rate the timers count down at
    pub refresh_hertz: u32,
    /// the multiplier applied to the cycles while fast forwarding
    pub fast_forward: u32,
}

impl Cadence {
    pub fn new(clock_hertz: u32, refresh_hertz: u32, fast_forward: u32) -> Self {
        Self {
            clock_hertz,
            refresh_hertz,
            fast_forward,
        }
    }

    /// The amount of instructions a single frame shall execute.
    ///
    /// # Example
    /// ```rust
    /// # use chip::timer::Cadence;
    /// let cadence = Cadence::default();
    /// assert_eq!(cadence.cycle_budget(false), 13);
    /// assert_eq!(cadence.cycle_budget(true), 130);
    /// ```
    pub fn cycle_budget(&self, fast_forward: bool) -> usize {
        let base = self.clock_hertz / self.refresh_hertz.max(1);
        let factor = if fast_forward { self.fast_forward } else { 1 };
        base.saturating_mul(factor) as usize
    }
}

impl Default for Cadence {
    fn default() -> Self {
        Self::new(cpu::HERTZ, timer::HERTZ, cpu::FAST_FORWARD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer() {
        let mut timer = Timer::new(2);
        assert!(timer.is_active());

        timer.tick();
        assert_eq!(timer.get_value(), 1);
        timer.tick();
        assert_eq!(timer.get_value(), 0);
        assert!(!timer.is_active());

        // never below zero
        timer.tick();
        assert_eq!(timer.get_value(), 0);

        timer.set_value(60);
        assert_eq!(timer.get_value(), 60);
    }

    #[test]
    fn test_cycle_budget() {
        let cadence = Cadence::new(500, 60, 4);
        assert_eq!(cadence.cycle_budget(false), 8);
        assert_eq!(cadence.cycle_budget(true), 32);

        // a refresh rate of zero must not divide by zero
        let cadence = Cadence::new(500, 0, 1);
        assert_eq!(cadence.cycle_budget(false), 500);
    }
}
