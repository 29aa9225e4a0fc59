use std::ops::Range;

use tinyvec::ArrayVec;

use crate::{
    definitions::{cpu, display::fontset, keyboard, memory},
    devices::{Framebuffer, Keyboard},
    opcode::{self, Opcode},
    resources::Rom,
    timer::Timer,
    MemoryError, OpcodeError, StackError,
};

/// The ChipSet struct represents the current state
/// of the system, it contains all the structures
/// needed for emulating an instant on the
/// Chip8 CPU.
///
/// It is pure data, all the instructions are executed by the
/// [`Interpreter`](super::Interpreter) owning it.
#[derive(Debug, Clone)]
pub struct ChipSet {
    /// the loaded rom, kept for resets
    pub(super) rom: Rom,
    /// the last opcode fetched, all two bytes long and stored big-endian
    pub(super) opcode: Opcode,
    /// - `0x000-0x1FF` - Chip 8 interpreter (contains font set in emu)
    /// - `0x050-0x09F` - Used for the built in `4x5` pixel font set (`0-F`) by default
    /// - `0x200-0xFFF` - Program ROM and work RAM
    pub(super) memory: Vec<u8>,
    /// `8-bit` data registers named `V0` to `VF`. The `VF` register doubles as a flag for some
    /// instructions; thus, it should be avoided. In an addition operation, `VF` is the carry flag,
    /// while in subtraction, it is the "no borrow" flag. In the draw instruction `VF` is set upon
    /// pixel collision.
    pub(super) registers: [u8; cpu::register::SIZE],
    /// The index for the register, this is a special register entry
    /// called index `I`
    pub(super) index_register: u16,
    /// The program counter is a CPU register in the computer processor which has the address of the
    /// next instruction to be executed from memory.
    pub(super) program_counter: usize,
    /// The stack is only used to store return addresses when subroutines are called. The original
    /// [RCA 1802](https://de.wikipedia.org/wiki/RCA1802) version allocated `48` bytes for up to
    /// `12` levels of nesting, which is what is used here.
    pub(super) stack: ArrayVec<[usize; cpu::stack::SIZE]>,
    /// Delay timer: This timer is intended to be used for timing the events of games. Its value
    /// can be set and read.
    /// Counts down once per frame, until it reaches 0.
    pub(super) delay_timer: Timer,
    /// Sound timer: This timer is used for sound effects. When its value is nonzero, a beeping
    /// sound is made.
    /// Counts down once per frame, until it reaches 0.
    pub(super) sound_timer: Timer,
    /// The black and white `64 x 32` screen.
    pub(super) display: Framebuffer,
    /// The state of the hex keyboard, written by the frontend once per frame.
    pub(super) keyboard: Keyboard,
    /// The location of the font in memory.
    pub(super) font_base: usize,
}

impl ChipSet {
    /// will create a new chipset object with the font loaded at `font_base`
    pub fn new(rom: Rom, font_base: usize) -> Self {
        let fits = font_base
            .checked_add(fontset::FONTSET.len())
            .map_or(false, |end| end <= memory::PROGRAM_START);
        let font_base = if fits {
            font_base
        } else {
            log::warn!(
                "font base {:#06X} overlaps the program area, using {:#06X}",
                font_base,
                fontset::LOCATION
            );
            fontset::LOCATION
        };

        let mut chip = Self {
            rom,
            opcode: 0,
            memory: vec![0; memory::SIZE],
            registers: [0; cpu::register::SIZE],
            index_register: 0,
            program_counter: cpu::PROGRAM_COUNTER,
            stack: ArrayVec::new(),
            delay_timer: Timer::default(),
            sound_timer: Timer::default(),
            display: Framebuffer::new(),
            keyboard: Keyboard::new(),
            font_base,
        };
        chip.load_memory();
        chip
    }

    /// Restores the state right after the program was loaded, the
    /// interpreter resets its execution state alongside.
    pub(super) fn reset(&mut self) {
        self.opcode = 0;
        self.memory.fill(0);
        self.load_memory();
        self.registers = [0; cpu::register::SIZE];
        self.index_register = 0;
        self.program_counter = cpu::PROGRAM_COUNTER;
        self.stack.clear();
        self.delay_timer = Timer::default();
        self.sound_timer = Timer::default();
        self.display.clear();
        self.keyboard.reset();
        log::debug!("chipset for '{}' was reset", self.rom.get_name());
    }

    fn load_memory(&mut self) {
        // load fonts
        self.memory[self.font_base..(self.font_base + fontset::FONTSET.len())]
            .copy_from_slice(&fontset::FONTSET);

        // write the rom data into memory, the rom guarantees to fit
        let data = self.rom.get_data();
        self.memory[memory::PROGRAM_START..(memory::PROGRAM_START + data.len())]
            .copy_from_slice(data);
    }

    /// will get the opcode the program counter points to
    pub(super) fn fetch(&self) -> Result<Opcode, OpcodeError> {
        opcode::build_opcode(&self.memory, self.program_counter)
    }

    /// Checks that `len` bytes starting at `from` are part of the memory.
    pub(super) fn memory_range(&self, from: usize, len: usize) -> Result<Range<usize>, MemoryError> {
        let to = from + len;
        if to <= self.memory.len() {
            Ok(from..to)
        } else {
            Err(MemoryError::OutOfBounds { from, to })
        }
    }

    /// Will push the pointer to the stack
    pub(super) fn push_stack(&mut self, pointer: usize) -> Result<(), StackError> {
        match self.stack.try_push(pointer) {
            None => Ok(()),
            Some(_) => Err(StackError::Full),
        }
    }

    /// Will pop from the stack
    pub(super) fn pop_stack(&mut self) -> Result<usize, StackError> {
        self.stack.pop().ok_or(StackError::Empty)
    }

    /// Decrements both timers, called once per frame.
    pub(super) fn tick_timers(&mut self) {
        self.delay_timer.tick();
        self.sound_timer.tick();
    }

    /// Will write keyboard data into interncal keyboard representation.
    pub fn set_keyboard(&mut self, keys: &[bool; keyboard::SIZE]) {
        self.keyboard.set_mult(keys);
    }

    /// Will set the value of the given key
    pub fn set_key(&mut self, key: usize, to: bool) {
        self.keyboard.set_key(key, to)
    }

    /// Will toggle the given key
    pub fn toggle_key(&mut self, key: usize) {
        self.keyboard.toggle_key(key)
    }

    /// Will get the current state of the keyboard
    pub fn get_keyboard(&self) -> &[bool] {
        self.keyboard.get_keys()
    }

    /// will return the name of the loaded rom
    pub fn get_name(&self) -> &str {
        self.rom.get_name()
    }

    /// will return the last fetched opcode
    pub fn get_opcode(&self) -> Opcode {
        self.opcode
    }

    pub fn get_memory(&self) -> &[u8] {
        &self.memory
    }

    pub fn get_registers(&self) -> &[u8] {
        &self.registers
    }

    pub fn get_index_register(&self) -> u16 {
        self.index_register
    }

    pub fn get_program_counter(&self) -> usize {
        self.program_counter
    }

    /// The return addresses, the most recent call last.
    pub fn get_stack(&self) -> &[usize] {
        &self.stack
    }

    /// will return the sound timer
    pub fn get_sound_timer(&self) -> u8 {
        self.sound_timer.get_value()
    }

    /// will return the delay timer
    pub fn get_delay_timer(&self) -> u8 {
        self.delay_timer.get_value()
    }

    /// Returns true while the beeper shall sound.
    pub fn is_sound_active(&self) -> bool {
        self.sound_timer.is_active()
    }

    /// Will return the current display configuration
    pub fn get_display(&self) -> &Framebuffer {
        &self.display
    }

    pub fn get_font_base(&self) -> usize {
        self.font_base
    }
}
