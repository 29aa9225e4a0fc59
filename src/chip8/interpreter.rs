use rand::{rngs::StdRng, RngCore, SeedableRng};

use super::ChipSet;
use crate::{
    config::{Config, Quirks},
    definitions::{keyboard, memory},
    opcode::{ChipOpcodes, Instruction, Operation, ProgramCounter, ProgramCounterStep},
    resources::Rom,
    ProcessError,
};

/// Whether the interpreter executes instructions or polls the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionState {
    /// Fetches and executes the next instruction on every step.
    Running,
    /// An `FX0A` is waiting for a key, the program counter stays on
    /// that instruction until a key is held down.
    AwaitingKey {
        /// the register the key will be stored in
        register: usize,
    },
}

/// What happened during a single [`run_frame`](Interpreter::run_frame).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Frame {
    /// the amount of steps that were executed
    pub cycles: usize,
    /// the display changed and should be redrawn
    pub draw: bool,
    /// the interpreter is waiting for a key at the end of the frame
    pub waiting: bool,
    /// every recoverable error, in the order they occurred
    pub faults: Vec<ProcessError>,
    /// the error that stopped the frame
    pub fatal: Option<ProcessError>,
}

/// The execution engine, it owns the [`ChipSet`](ChipSet) and runs the
/// fetch, decode and execute cycle on it.
pub struct Interpreter {
    pub(super) chipset: ChipSet,
    pub(super) quirks: Quirks,
    /// This stores the random number generator, used by the chipset.
    /// It is boxed, so as to enable simple mocking
    /// of the given type.
    pub(super) rng: Box<dyn RngCore + Send>,
    pub(super) state: ExecutionState,
}

impl Interpreter {
    /// will create a new interpreter with the default configuration
    pub fn new(rom: Rom) -> Self {
        Self::with_config(rom, Config::default())
    }

    /// will create a new interpreter with the given configuration
    pub fn with_config(rom: Rom, config: Config) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        log::debug!(
            "loading '{}' ({} bytes) with {:?}",
            rom.get_name(),
            rom.get_data().len(),
            config.quirks
        );
        Self {
            chipset: ChipSet::new(rom, config.quirks.font_base),
            quirks: config.quirks,
            rng: Box::new(rng),
            state: ExecutionState::Running,
        }
    }

    /// Replaces the random number generator.
    pub fn set_rng<R: RngCore + Send + 'static>(&mut self, rng: R) {
        self.rng = Box::new(rng);
    }

    /// The machine state, read only.
    pub fn chipset(&self) -> &ChipSet {
        &self.chipset
    }

    /// The machine state, used by the frontend for the keys.
    pub fn chipset_mut(&mut self) -> &mut ChipSet {
        &mut self.chipset
    }

    /// The quirks the instructions are executed with.
    pub fn quirks(&self) -> &Quirks {
        &self.quirks
    }

    /// Whether the interpreter runs or waits for a key.
    pub fn state(&self) -> ExecutionState {
        self.state
    }

    /// True while an `FX0A` waits for a key.
    pub fn is_awaiting_key(&self) -> bool {
        matches!(self.state, ExecutionState::AwaitingKey { .. })
    }

    /// Will write keyboard data into the chipset, called by the frontend
    /// before every frame.
    pub fn set_keyboard(&mut self, keys: &[bool; keyboard::SIZE]) {
        self.chipset.set_keyboard(keys);
    }

    /// Restarts the loaded program.
    pub fn reset(&mut self) {
        self.chipset.reset();
        self.state = ExecutionState::Running;
    }

    /// will advance the program by a single step
    ///
    /// All errors besides a program counter outside of the memory are
    /// recoverable, the faulting instruction is simply skipped.
    pub fn step(&mut self) -> Result<Operation, ProcessError> {
        if let ExecutionState::AwaitingKey { register } = self.state {
            return Ok(self.poll_key(register));
        }

        let pointer = self.chipset.program_counter;
        let opcode = self.chipset.fetch().map_err(|err| {
            log::error!("{}", err);
            ProcessError::from(err)
        })?;
        self.chipset.opcode = opcode;
        // move to the next instruction before the execution
        self.chipset.program_counter += memory::opcodes::SIZE;

        let res = Instruction::try_from(opcode)
            .map_err(ProcessError::from)
            .and_then(|instruction| {
                log::trace!("{:#06X}: {:#06X} {}", pointer, opcode, instruction);
                self.calc(instruction)
            });

        if let Err(err) = &res {
            log::warn!("skipping {:#06X} at {:#06X}: {}", opcode, pointer, err);
        }
        res
    }

    /// Executes up to `cycle_budget` steps and counts the timers down once
    /// afterwards.
    pub fn run_frame(&mut self, cycle_budget: usize) -> Frame {
        let mut frame = Frame::default();

        for _ in 0..cycle_budget {
            match self.step() {
                Ok(operation) => {
                    frame.draw |= operation == Operation::Draw;
                }
                Err(err) if err.is_fatal() => {
                    frame.fatal = Some(err);
                    break;
                }
                Err(err) => frame.faults.push(err),
            }
            frame.cycles += 1;
        }

        self.chipset.tick_timers();
        frame.waiting = self.is_awaiting_key();
        frame
    }

    /// Checks for a held down key while waiting.
    fn poll_key(&mut self, register: usize) -> Operation {
        match self.chipset.keyboard.pressed() {
            Some(key) => {
                log::debug!("key {:#X} pressed, stored in V{:X}", key, register);
                self.chipset.registers[register] = key as u8;
                self.apply_step(ProgramCounterStep::Skip);
                self.state = ExecutionState::Running;
                Operation::None
            }
            None => Operation::Wait,
        }
    }
}

impl ProgramCounter for Interpreter {
    fn apply_step(&mut self, step: ProgramCounterStep) {
        self.chipset.program_counter = step.apply(self.chipset.program_counter);
    }
}
