//! Runtime configuration of the interpreter.
//!
//! The historical chip8 interpreters disagree on a handful of instructions,
//! so these behaviours are selected through [`Quirks`](Quirks) instead of being
//! hardcoded. The defaults follow the modern convention.

use crate::{definitions::display::fontset, timer::Cadence};

/// Selects between the behavioural forks of the chip8 ecosystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quirks {
    /// `8XY1`, `8XY2` and `8XY3` set `VF` to `0` after the operation.
    pub reset_flag_on_logic_ops: bool,
    /// `8XY6` and `8XYE` shift `VY` into `VX` instead of shifting `VX` in place.
    pub shift_uses_vy: bool,
    /// `FX55` and `FX65` leave `I` pointing behind the last transferred byte
    /// (`I = I + X + 1`).
    pub increment_index_on_bulk_transfer: bool,
    /// `BNNN` jumps to `VX + NNN` (with `X` being the highest nibble of
    /// `NNN`) instead of `V0 + NNN`.
    pub jump_offset_uses_vx: bool,
    /// Where the hexadecimal font is loaded to and `FX29` points into.
    pub font_base: usize,
}

impl Quirks {
    /// The behaviour of the original COSMAC VIP interpreter.
    pub fn cosmac_vip() -> Self {
        Self {
            reset_flag_on_logic_ops: true,
            shift_uses_vy: true,
            increment_index_on_bulk_transfer: true,
            ..Self::default()
        }
    }
}

impl Default for Quirks {
    fn default() -> Self {
        Self {
            reset_flag_on_logic_ops: false,
            shift_uses_vy: false,
            increment_index_on_bulk_transfer: false,
            jump_offset_uses_vx: false,
            font_base: fontset::LOCATION,
        }
    }
}

/// Everything needed to set up an [`Interpreter`](crate::chip8::Interpreter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Config {
    /// The instruction quirks.
    pub quirks: Quirks,
    /// The relation between cpu clock, refresh rate and fast forward.
    pub cadence: Cadence,
    /// A fixed seed for the random number generator, if none is given the
    /// generator is seeded from the system entropy.
    pub seed: Option<u64>,
}

impl Config {
    /// will create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the quirks.
    pub fn with_quirks(mut self, quirks: Quirks) -> Self {
        self.quirks = quirks;
        self
    }

    /// Replaces the cadence.
    pub fn with_cadence(mut self, cadence: Cadence) -> Self {
        self.cadence = cadence;
        self
    }

    /// Fixes the seed of the random number generator.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_quirks_are_modern() {
        let quirks = Quirks::default();
        assert!(!quirks.reset_flag_on_logic_ops);
        assert!(!quirks.shift_uses_vy);
        assert!(!quirks.increment_index_on_bulk_transfer);
        assert!(!quirks.jump_offset_uses_vx);
        assert_eq!(quirks.font_base, 0x50);
    }

    #[test]
    fn test_cosmac_vip() {
        let quirks = Quirks::cosmac_vip();
        assert!(quirks.reset_flag_on_logic_ops);
        assert!(quirks.shift_uses_vy);
        assert!(quirks.increment_index_on_bulk_transfer);
        assert!(!quirks.jump_offset_uses_vx);
    }

    #[test]
    fn test_builder() {
        let quirks = Quirks {
            font_base: 0x0,
            ..Quirks::default()
        };
        let config = Config::new().with_quirks(quirks).with_seed(69);

        assert_eq!(config.quirks.font_base, 0x0);
        assert_eq!(config.seed, Some(69));
        assert_eq!(config.cadence, Cadence::default());
    }
}
