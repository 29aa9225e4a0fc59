//! The chip8 peripherals: the framebuffer, the hex keyboard and the traits
//! a frontend implements to present them.
use crate::definitions::{display, keyboard};

#[cfg_attr(test, mockall::automock)]
/// The traits responsible for the display based code
pub trait DisplayCommands {
    /// Will clear the display
    fn clear_display(&mut self);
    /// Will display all from the pixels
    fn display(&mut self, pixels: &Framebuffer);
}

#[cfg_attr(test, mockall::automock)]
/// The trait responsible for reading the keyboard data
pub trait KeyboardCommands {
    /// Returns which of the `16` chip8 keys are currently held down.
    fn get_keyboard(&self) -> [bool; keyboard::SIZE];
}

#[cfg_attr(test, mockall::automock)]
/// The trait responsible for the beeper
pub trait SoundCommands {
    /// Will start the beep
    fn start(&mut self);
    /// Will stop the beep
    fn stop(&mut self);
}

/// The graphics of the Chip 8 are black and white and the screen has a total of `2048` pixels
/// `(64 x 32)`, stored row by row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    pixels: [[bool; display::WIDTH]; display::HEIGHT],
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self {
            pixels: [[false; display::WIDTH]; display::HEIGHT],
        }
    }
}

impl Framebuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Turns every pixel off.
    pub fn clear(&mut self) {
        for row in self.pixels.iter_mut() {
            row.fill(false);
        }
    }

    /// Returns the pixel at the given coordinates, coordinates out of the
    /// screen are always off.
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.pixels
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .unwrap_or(false)
    }

    /// Flips the given pixel and returns true if the pixel was turned
    /// off by it (a collision). Out of bound coordinates are ignored.
    pub fn flip(&mut self, x: usize, y: usize) -> bool {
        match self.pixels.get_mut(y).and_then(|row| row.get_mut(x)) {
            Some(pixel) => {
                let collision = *pixel;
                *pixel = !collision;
                collision
            }
            None => false,
        }
    }

    /// All the rows of the display from top to bottom.
    pub fn rows(&self) -> &[[bool; display::WIDTH]] {
        &self.pixels[..]
    }

    /// The amount of pixels that are turned on.
    pub fn lit(&self) -> usize {
        self.pixels
            .iter()
            .map(|row| row.iter().filter(|pixel| **pixel).count())
            .sum()
    }
}

/// Input is done with a hex keyboard that has 16 keys ranging `0-F`. The `8`, `4`, `6`, and
/// `2` keys are typically used for directional input. Three opcodes are used to detect input.
/// One skips an instruction if a specific key is pressed, while another does the same if a
/// specific key is not pressed. The third waits for a key press, and then stores it in one of
/// the data registers.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct Keyboard {
    keys: [bool; keyboard::SIZE],
}

impl Keyboard {
    pub fn new() -> Self {
        Keyboard::default()
    }

    pub fn reset(&mut self) {
        self.keys = [false; keyboard::SIZE];
    }

    /// Will set the value of the given key, the key index is reduced to the
    /// lowest nibble.
    pub fn set_key(&mut self, key: usize, to: bool) {
        self.keys[key & 0xF] = to;
    }

    pub fn toggle_key(&mut self, key: usize) {
        let key = key & 0xF;
        self.set_key(key, !self.keys[key])
    }

    /// Overrides the whole key state.
    pub fn set_mult(&mut self, keys: &[bool; keyboard::SIZE]) {
        self.keys = *keys;
    }

    pub fn get_keys(&self) -> &[bool] {
        &self.keys
    }

    /// Checks the given key, the key index is reduced to the lowest nibble.
    pub fn is_pressed(&self, key: usize) -> bool {
        self.keys[key & 0xF]
    }

    /// The highest key that is held down, if there is any.
    pub fn pressed(&self) -> Option<usize> {
        self.keys.iter().rposition(|key| *key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flip_reports_collision() {
        let mut fb = Framebuffer::new();
        assert!(!fb.flip(3, 4));
        assert!(fb.get(3, 4));
        assert!(fb.flip(3, 4));
        assert!(!fb.get(3, 4));
    }

    #[test]
    fn test_out_of_bounds_is_ignored() {
        let mut fb = Framebuffer::new();
        assert!(!fb.flip(display::WIDTH, 0));
        assert!(!fb.flip(0, display::HEIGHT));
        assert!(!fb.get(display::WIDTH, 0));
        assert_eq!(fb.lit(), 0);
    }

    #[test]
    fn test_clear() {
        let mut fb = Framebuffer::new();
        fb.flip(0, 0);
        fb.flip(63, 31);
        assert_eq!(fb.lit(), 2);
        fb.clear();
        assert_eq!(fb, Framebuffer::default());

        for y in 0..display::HEIGHT {
            for x in 0..display::WIDTH {
                fb.flip(x, y);
            }
        }
        assert_eq!(fb.lit(), display::RESOLUTION);
        fb.clear();
        assert_eq!(fb.rows().len(), display::HEIGHT);
        assert_eq!(fb.rows()[0].len(), display::WIDTH);
    }

    #[test]
    fn test_keyboard() {
        let mut keyboard = Keyboard::new();
        assert_eq!(keyboard.pressed(), None);

        keyboard.set_key(0x3, true);
        keyboard.toggle_key(0xB);
        assert!(keyboard.is_pressed(0x3));
        assert!(keyboard.is_pressed(0x1B));
        assert_eq!(keyboard.pressed(), Some(0xB));

        keyboard.toggle_key(0xB);
        assert_eq!(keyboard.pressed(), Some(0x3));

        keyboard.set_mult(&[true; keyboard::SIZE]);
        assert_eq!(keyboard.get_keys(), &[true; keyboard::SIZE]);

        keyboard.reset();
        assert_eq!(keyboard.pressed(), None);
    }
}
