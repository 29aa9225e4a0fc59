//! Drives an [`Interpreter`](Interpreter) from a frontend, one call per
//! displayed frame.
use crate::{
    chip8::{Frame, Interpreter},
    config::Config,
    devices::{DisplayCommands, KeyboardCommands, SoundCommands},
    resources::Rom,
    timer::Cadence,
};

/// Connects the interpreter to the display, keyboard and sound of a frontend.
pub struct Runner {
    interpreter: Interpreter,
    cadence: Cadence,
    paused: bool,
    fast_forward: bool,
    /// set after a fatal error, cleared by a reset
    halted: bool,
    beeping: bool,
}

impl Runner {
    pub fn new(rom: Rom, config: Config) -> Self {
        Self {
            interpreter: Interpreter::with_config(rom, config),
            cadence: config.cadence,
            paused: false,
            fast_forward: false,
            halted: false,
            beeping: false,
        }
    }

    pub fn interpreter(&self) -> &Interpreter {
        &self.interpreter
    }

    pub fn interpreter_mut(&mut self) -> &mut Interpreter {
        &mut self.interpreter
    }

    pub fn set_paused(&mut self, paused: bool) {
        if self.paused != paused {
            log::debug!("paused: {}", paused);
        }
        self.paused = paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_fast_forward(&mut self, fast_forward: bool) {
        if self.fast_forward != fast_forward {
            log::debug!("fast forward: {}", fast_forward);
        }
        self.fast_forward = fast_forward;
    }

    pub fn is_fast_forward(&self) -> bool {
        self.fast_forward
    }

    /// Returns true once the program counter left the memory, until the
    /// next [`reset`](Runner::reset).
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// The amount of instructions the next frame will run.
    pub fn cycle_budget(&self) -> usize {
        self.cadence.cycle_budget(self.fast_forward)
    }

    /// Runs a single frame.
    ///
    /// The keys are read before any instruction runs, the display is only
    /// updated if an instruction changed it and the beeper follows the
    /// sound timer.
    pub fn frame<K, D, S>(&mut self, keyboard: &K, display: &mut D, sound: &mut S) -> Frame
    where
        K: KeyboardCommands,
        D: DisplayCommands,
        S: SoundCommands,
    {
        self.interpreter.set_keyboard(&keyboard.get_keyboard());

        let frame = if self.paused || self.halted {
            Frame::default()
        } else {
            self.interpreter.run_frame(self.cycle_budget())
        };

        if let Some(err) = &frame.fatal {
            log::error!(
                "halting '{}': {}",
                self.interpreter.chipset().get_name(),
                err
            );
            self.halted = true;
        }

        if frame.draw {
            display.display(self.interpreter.chipset().get_display());
        }

        let beep = !self.paused && self.interpreter.chipset().is_sound_active();
        if beep != self.beeping {
            if beep {
                sound.start();
            } else {
                sound.stop();
            }
            self.beeping = beep;
        }

        frame
    }

    /// Restarts the program and clears the display.
    pub fn reset<D: DisplayCommands, S: SoundCommands>(&mut self, display: &mut D, sound: &mut S) {
        self.interpreter.reset();
        self.halted = false;
        display.clear_display();
        if self.beeping {
            sound.stop();
            self.beeping = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        definitions::keyboard,
        devices::{MockDisplayCommands, MockKeyboardCommands, MockSoundCommands},
    };

    fn runner(opcodes: &[u16]) -> Runner {
        let data: Vec<u8> = opcodes.iter().flat_map(|op| op.to_be_bytes()).collect();
        let rom = Rom::new("RUNNER", data).expect("the program fits into memory");
        Runner::new(rom, Config::new().with_seed(69))
    }

    fn no_keys() -> MockKeyboardCommands {
        let mut input = MockKeyboardCommands::new();
        input
            .expect_get_keyboard()
            .returning(|| [false; keyboard::SIZE]);
        input
    }

    #[test]
    fn test_frame_draws_and_beeps() {
        // V0 = 2, ST = V0, draw the glyph `0`, loop
        let mut runner = runner(&[0x6002, 0xF018, 0xA050, 0xD005, 0x1208]);
        let keyboard = no_keys();

        let mut display = MockDisplayCommands::new();
        display
            .expect_display()
            .withf(|fb| fb.lit() == 14)
            .times(1)
            .return_const(());

        let mut sound = MockSoundCommands::new();
        sound.expect_start().times(1).return_const(());
        sound.expect_stop().times(1).return_const(());

        // sound timer 2 -> 1
        let frame = runner.frame(&keyboard, &mut display, &mut sound);
        assert!(frame.draw);
        assert_eq!(frame.cycles, runner.cycle_budget());

        // sound timer 1 -> 0, nothing drawn anymore
        let frame = runner.frame(&keyboard, &mut display, &mut sound);
        assert!(!frame.draw);
        assert_eq!(runner.interpreter().chipset().get_sound_timer(), 0);

        runner.frame(&keyboard, &mut display, &mut sound);
    }

    #[test]
    fn test_keys_reach_the_interpreter() {
        let mut runner = runner(&[0xF50A, 0x1202]);
        let mut input = MockKeyboardCommands::new();
        let mut pressed = [false; keyboard::SIZE];
        pressed[0x7] = true;
        let mut seq = mockall::Sequence::new();
        input
            .expect_get_keyboard()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| [false; keyboard::SIZE]);
        input
            .expect_get_keyboard()
            .times(1)
            .in_sequence(&mut seq)
            .return_const(pressed);

        let mut display = MockDisplayCommands::new();
        let mut sound = MockSoundCommands::new();

        assert!(runner.frame(&input, &mut display, &mut sound).waiting);
        assert!(!runner.frame(&input, &mut display, &mut sound).waiting);
        assert_eq!(runner.interpreter().chipset().get_registers()[0x5], 0x7);
    }

    #[test]
    fn test_paused_and_fast_forward() {
        let mut runner = runner(&[0x1200]);
        let keyboard = no_keys();
        let mut display = MockDisplayCommands::new();
        let mut sound = MockSoundCommands::new();

        runner.set_paused(true);
        assert!(runner.is_paused());
        let frame = runner.frame(&keyboard, &mut display, &mut sound);
        assert_eq!(frame.cycles, 0);

        runner.set_paused(false);
        runner.set_fast_forward(true);
        assert!(runner.is_fast_forward());
        let frame = runner.frame(&keyboard, &mut display, &mut sound);
        assert_eq!(frame.cycles, 130);

        runner.set_fast_forward(false);
        let frame = runner.frame(&keyboard, &mut display, &mut sound);
        assert_eq!(frame.cycles, 13);
    }

    #[test]
    fn test_fatal_error_halts_until_reset() {
        let mut runner = runner(&[0x1FFF]);
        let keyboard = no_keys();
        let mut sound = MockSoundCommands::new();

        let mut display = MockDisplayCommands::new();
        display.expect_clear_display().times(1).return_const(());

        let frame = runner.frame(&keyboard, &mut display, &mut sound);
        assert!(frame.fatal.is_some());
        assert!(runner.is_halted());

        let frame = runner.frame(&keyboard, &mut display, &mut sound);
        assert_eq!(frame, Frame::default());

        runner.reset(&mut display, &mut sound);
        assert!(!runner.is_halted());
        assert_eq!(
            runner.interpreter().chipset().get_program_counter(),
            crate::definitions::cpu::PROGRAM_COUNTER
        );
    }

    #[test]
    fn test_pause_silences_the_beeper() {
        // V0 = 0xFF, ST = V0, loop
        let mut runner = runner(&[0x60FF, 0xF018, 0x1204]);
        let keyboard = no_keys();
        let mut display = MockDisplayCommands::new();

        let mut sound = MockSoundCommands::new();
        let mut seq = mockall::Sequence::new();
        sound
            .expect_start()
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        sound
            .expect_stop()
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());

        runner.frame(&keyboard, &mut display, &mut sound);
        runner.set_paused(true);
        runner.frame(&keyboard, &mut display, &mut sound);
        runner.frame(&keyboard, &mut display, &mut sound);
    }

    #[test]
    fn test_budget_follows_the_cadence() {
        let rom = Rom::new("CADENCE", vec![0x12, 0x00]).expect("tiny program");
        let config = Config::new().with_cadence(Cadence::new(600, 60, 3));
        let mut runner = Runner::new(rom, config);

        assert_eq!(runner.cycle_budget(), 10);
        runner.set_fast_forward(true);
        assert_eq!(runner.cycle_budget(), 30);
    }
}
