//! Opcode abstractions, functionality and constants.
use std::fmt;

use crate::{definitions::memory, OpcodeError, ProcessError};

/// the base mask used for generating all the other sub masks
pub(crate) const OPCODE_MASK_FFFF: u16 = u16::MAX;

/// the mask for the first twelve bytes
pub(crate) const OPCODE_MASK_FFF0: u16 = OPCODE_MASK_FFFF << 4;

/// the mask for the first eight bytes
pub(crate) const OPCODE_MASK_FF00: u16 = OPCODE_MASK_FFFF << 8;

/// the mask for the first four bytes
pub(crate) const OPCODE_MASK_F000: u16 = OPCODE_MASK_FFFF << 12;

/// the mask for the last four bytes
pub(crate) const OPCODE_MASK_000F: u16 = OPCODE_MASK_FFFF ^ OPCODE_MASK_FFF0;

/// the mask for the last eight bytes
pub(crate) const OPCODE_MASK_00FF: u16 = OPCODE_MASK_FFFF ^ OPCODE_MASK_FF00;

/// the mask for the last four bytes
pub(crate) const OPCODE_MASK_0FFF: u16 = OPCODE_MASK_FFFF ^ OPCODE_MASK_F000;

/// the size of a single byte
const BYTE_SIZE: u16 = 0x8;

/// a wrapper type for u16 to make it clear what is meant to be used
pub type Opcode = u16;

/// will build an opcode from data and the given point
/// # Arguments
///
/// - `data` - A slice of u8 data entries used to generate the opcodes
/// - `pointer` - Where in the data the opcode shall be extracted, so `pointer` and `pointer + 1` make
/// the opcode up
///
/// # Example
/// ```rust
/// # use chip::opcode::*;
/// # use chip::OpcodeError;
///  const OPCODES: [Opcode; 2] = [0x00EE, 0x1EDA];
///  const SPLIT_OPCODE: [u8; 4] = [0x00, 0xEE, 0x1E, 0xDA];
///  for (i, val) in OPCODES.iter().enumerate() {
///      let opcode = build_opcode(&SPLIT_OPCODE, i * 2).expect("This will work.");
///      assert_eq!(opcode, *val);
///  }
/// # let pointer = 3;
/// # let err = OpcodeError::MemoryInvalid {pointer, len: SPLIT_OPCODE.len() };
/// # assert_eq!(
/// #    Err(err),
/// #    build_opcode(&SPLIT_OPCODE, pointer)
/// # );
/// ```
pub fn build_opcode(data: &[u8], pointer: usize) -> Result<Opcode, OpcodeError> {
    // controlling that there is no illegal access here
    if pointer < data.len() && pointer + 1 < data.len() {
        Ok(Opcode::from_be_bytes([data[pointer], data[pointer + 1]]))
    } else {
        Err(OpcodeError::MemoryInvalid {
            pointer,
            len: data.len(),
        })
    }
}

/// These are special traits used to filter out information
/// from opcodes
pub trait OpcodeTrait {
    /// this is an opcode extractor that will return the
    /// opcode number form any opcode
    /// - `T` is the opcode type
    fn t(&self) -> usize;

    /// this is an opcode extractor for the opcode type `TNNN`
    /// - `T` is the opcode type
    /// - `NNN` is an address
    fn nnn(&self) -> usize;

    /// this is an opcode extractor for the opcode type `TXNN`
    /// - `T` is the opcode type
    /// - `X` is a register index
    /// - `NN` is a constant
    fn xnn(&self) -> (usize, u8);

    /// this is an opcode extractor for the opcode type `TXYN`
    /// - `T` is the opcode type
    /// - `X` is a register index
    /// - `Y` is a register index
    /// - `N` is a constant or opcode subtype
    fn xyn(&self) -> (usize, usize, usize);

    /// this is an opcode extractor for the opcode type `TXYT`
    /// - `T` is the opcode type
    /// - `X` is a register index
    /// - `Y` is a register index
    fn xy(&self) -> (usize, usize);

    /// this is an opcode extractor for the opcode type `TXTT`
    /// - `T` is the opcode type
    /// - `X` is a register index
    fn x(&self) -> usize;
}

impl OpcodeTrait for Opcode {
    /// # Example
    /// ```rust
    /// # use chip::opcode::*;
    /// const BASE_OPCODE: Opcode = 0x1EDA;
    /// assert_eq!(BASE_OPCODE.t(), 0x1);
    /// ```
    fn t(&self) -> usize {
        const SHIFT: u16 = 3 * BYTE_SIZE / 2;
        ((self & OPCODE_MASK_F000) >> SHIFT) as usize
    }

    /// # Example
    /// ```rust
    /// # use chip::opcode::*;
    ///  const BASE_OPCODE: Opcode = 0x1EDA;
    ///  assert_eq!(BASE_OPCODE.nnn(), 0xEDA)
    /// ```
    fn nnn(&self) -> usize {
        (self & OPCODE_MASK_0FFF) as usize
    }

    /// # Example
    /// ```rust
    /// # use chip::opcode::*;
    /// const BASE_OPCODE: Opcode = 0x1EDA;
    /// assert_eq!(BASE_OPCODE.xnn(), (0xE, 0xDA));
    /// ```
    fn xnn(&self) -> (usize, u8) {
        let x = self.x();
        let nn = (self & OPCODE_MASK_00FF) as u8;
        (x, nn)
    }

    /// ```rust
    /// # use chip::opcode::*;
    ///  const BASE_OPCODE: Opcode = 0x1EDA;
    ///  assert_eq!(BASE_OPCODE.xyn(), (0xE, 0xD, 0xA));
    /// ```
    fn xyn(&self) -> (usize, usize, usize) {
        let (x, y) = self.xy();
        let n = (self & OPCODE_MASK_000F) as usize;
        (x, y, n)
    }

    /// ```rust
    /// # use chip::opcode::*;
    ///  const BASE_OPCODE: Opcode = 0x1EDA;
    ///  assert_eq!(BASE_OPCODE.xy(), (0xE, 0xD));
    /// ```
    fn xy(&self) -> (usize, usize) {
        let x = self.x();
        const MASK: u16 = OPCODE_MASK_00FF ^ OPCODE_MASK_000F;
        const NIBBLE: u16 = BYTE_SIZE / 2;
        let y = ((self & MASK) >> NIBBLE) as usize;
        (x, y)
    }

    /// ```rust
    /// # use chip::opcode::*;
    ///  const BASE_OPCODE: Opcode = 0x1EDA;
    ///  assert_eq!(BASE_OPCODE.x(), 0xE);
    /// ```
    fn x(&self) -> usize {
        ((self & OPCODE_MASK_0FFF & OPCODE_MASK_FF00) >> BYTE_SIZE) as usize
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
/// Represents how the program counter moves after an instruction ran.
///
/// The counter already points to the next instruction when an instruction
/// is executed.
pub enum ProgramCounterStep {
    /// Will leave the program counter on the following instruction
    Next,
    /// Will skip the following instruction
    Skip,
    /// Will move the program counter back onto the current instruction
    Hold,
    /// Will simply move the program counter to the given location.
    Jump(usize),
}

impl ProgramCounterStep {
    /// Will return a Skip if the condition is true.
    ///
    /// # Example
    /// ```rust
    /// # use chip::opcode::ProgramCounterStep;
    /// assert_eq!(ProgramCounterStep::Next, ProgramCounterStep::cond(false));
    /// assert_eq!(ProgramCounterStep::Skip, ProgramCounterStep::cond(true));
    /// ```
    #[inline]
    pub fn cond(cond: bool) -> Self {
        if cond {
            ProgramCounterStep::Skip
        } else {
            ProgramCounterStep::Next
        }
    }

    /// Calculates the new program counter based of the already advanced one.
    ///
    /// # Example
    /// ```rust
    /// # use chip::opcode::ProgramCounterStep;
    /// assert_eq!(ProgramCounterStep::Next.apply(0x202), 0x202);
    /// assert_eq!(ProgramCounterStep::Skip.apply(0x202), 0x204);
    /// assert_eq!(ProgramCounterStep::Hold.apply(0x202), 0x200);
    /// assert_eq!(ProgramCounterStep::Jump(0x400).apply(0x202), 0x400);
    /// ```
    #[inline]
    pub fn apply(&self, pointer: usize) -> usize {
        match *self {
            ProgramCounterStep::Next => pointer,
            ProgramCounterStep::Skip => pointer + memory::opcodes::SIZE,
            ProgramCounterStep::Hold => pointer.saturating_sub(memory::opcodes::SIZE),
            ProgramCounterStep::Jump(to) => to,
        }
    }
}

/// The trait for anything that owns a program counter.
pub trait ProgramCounter {
    /// will move the program counter according to the step.
    fn apply_step(&mut self, step: ProgramCounterStep);
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
/// Represents a command from the interpreter up to the gui.
pub enum Operation {
    /// If no action has to be taken.
    None,
    /// If the gui shall, wait
    /// for the next key press
    Wait,
    /// The display changed and has to be redrawn
    Draw,
}

/// Generates the conversion from the sub opcode part into the
/// given sub opcode enum.
macro_rules! impl_sub_opcode {
    ($type_name:ty : $type_from:ty : $( $key:literal => $val:expr ),+ $(,)? ) => {
        impl TryFrom<$type_from> for $type_name {
            type Error = ();

            fn try_from(value: $type_from) -> Result<Self, Self::Error> {
                match value {
                    $(
                        $key => Ok($val),
                    )+
                    _ => Err(()),
                }
            }
        }
    };
}

/// The register arithmetic of the `8XYT` opcodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AluOpcode {
    /// `8XY0` - `Vx = Vy`
    Assign,
    /// `8XY1` - `Vx |= Vy`
    Or,
    /// `8XY2` - `Vx &= Vy`
    And,
    /// `8XY3` - `Vx ^= Vy`
    Xor,
    /// `8XY4` - `Vx += Vy` with carry in `VF`
    Add,
    /// `8XY5` - `Vx -= Vy` with no borrow in `VF`
    Sub,
    /// `8XY6` - `Vx >>= 1`
    ShiftRight,
    /// `8XY7` - `Vx = Vy - Vx` with no borrow in `VF`
    SubReverse,
    /// `8XYE` - `Vx <<= 1`
    ShiftLeft,
}

impl_sub_opcode!(AluOpcode : usize :
    0x0 => AluOpcode::Assign,
    0x1 => AluOpcode::Or,
    0x2 => AluOpcode::And,
    0x3 => AluOpcode::Xor,
    0x4 => AluOpcode::Add,
    0x5 => AluOpcode::Sub,
    0x6 => AluOpcode::ShiftRight,
    0x7 => AluOpcode::SubReverse,
    0xE => AluOpcode::ShiftLeft,
);

/// The keyboard conditions of the `EXTT` opcodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOpcode {
    /// `EX9E`
    Pressed,
    /// `EXA1`
    NotPressed,
}

impl_sub_opcode!(KeyOpcode : u8 :
    0x9E => KeyOpcode::Pressed,
    0xA1 => KeyOpcode::NotPressed,
);

/// The timer, keyboard and memory operations of the `FXTT` opcodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MiscOpcode {
    /// `FX07`
    GetDelayTimer,
    /// `FX0A`
    AwaitKeyPress,
    /// `FX15`
    SetDelayTimer,
    /// `FX18`
    SetSoundTimer,
    /// `FX1E`
    AddVxToI,
    /// `FX29`
    SetIToSprite,
    /// `FX33`
    StoreBCD,
    /// `FX55`
    StoreV0ToVx,
    /// `FX65`
    FillV0ToVx,
}

impl_sub_opcode!(MiscOpcode : u8 :
    0x07 => MiscOpcode::GetDelayTimer,
    0x0A => MiscOpcode::AwaitKeyPress,
    0x15 => MiscOpcode::SetDelayTimer,
    0x18 => MiscOpcode::SetSoundTimer,
    0x1E => MiscOpcode::AddVxToI,
    0x29 => MiscOpcode::SetIToSprite,
    0x33 => MiscOpcode::StoreBCD,
    0x55 => MiscOpcode::StoreV0ToVx,
    0x65 => MiscOpcode::FillV0ToVx,
);

/// A fully decoded instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// `00E0`
    ClearScreen,
    /// `00EE`
    Return,
    /// `1NNN`
    Jump { nnn: usize },
    /// `2NNN`
    Call { nnn: usize },
    /// `3XNN`
    SkipEqual { x: usize, nn: u8 },
    /// `4XNN`
    SkipNotEqual { x: usize, nn: u8 },
    /// `5XY0`
    SkipRegistersEqual { x: usize, y: usize },
    /// `6XNN`
    Set { x: usize, nn: u8 },
    /// `7XNN`
    Add { x: usize, nn: u8 },
    /// `8XYT`
    Alu { ops: AluOpcode, x: usize, y: usize },
    /// `9XY0`
    SkipRegistersNotEqual { x: usize, y: usize },
    /// `ANNN`
    SetIndex { nnn: usize },
    /// `BNNN`, `x` is the high nibble of `NNN` and only names the offset
    /// register under the `jump_offset_uses_vx` quirk
    JumpOffset { x: usize, nnn: usize },
    /// `CXNN`
    Random { x: usize, nn: u8 },
    /// `DXYN`
    Draw { x: usize, y: usize, n: usize },
    /// `EXTT`
    Key { ops: KeyOpcode, x: usize },
    /// `FXTT`
    Misc { ops: MiscOpcode, x: usize },
}

impl TryFrom<Opcode> for Instruction {
    type Error = OpcodeError;

    fn try_from(value: Opcode) -> Result<Self, Self::Error> {
        let invalid = |_| OpcodeError::InvalidOpcode(value);
        let res = match value.t() {
            0x0 => match value {
                0x00E0 => Instruction::ClearScreen,
                0x00EE => Instruction::Return,
                _ => return Err(OpcodeError::InvalidOpcode(value)),
            },
            0x1 => Instruction::Jump { nnn: value.nnn() },
            0x2 => Instruction::Call { nnn: value.nnn() },
            0x3 => {
                let (x, nn) = value.xnn();
                Instruction::SkipEqual { x, nn }
            }
            0x4 => {
                let (x, nn) = value.xnn();
                Instruction::SkipNotEqual { x, nn }
            }
            0x5 => match value.xyn() {
                (x, y, 0) => Instruction::SkipRegistersEqual { x, y },
                _ => return Err(OpcodeError::InvalidOpcode(value)),
            },
            0x6 => {
                let (x, nn) = value.xnn();
                Instruction::Set { x, nn }
            }
            0x7 => {
                let (x, nn) = value.xnn();
                Instruction::Add { x, nn }
            }
            0x8 => {
                let (x, y, n) = value.xyn();
                let ops = AluOpcode::try_from(n).map_err(invalid)?;
                Instruction::Alu { ops, x, y }
            }
            0x9 => match value.xyn() {
                (x, y, 0) => Instruction::SkipRegistersNotEqual { x, y },
                _ => return Err(OpcodeError::InvalidOpcode(value)),
            },
            0xA => Instruction::SetIndex { nnn: value.nnn() },
            0xB => Instruction::JumpOffset {
                x: value.x(),
                nnn: value.nnn(),
            },
            0xC => {
                let (x, nn) = value.xnn();
                Instruction::Random { x, nn }
            }
            0xD => {
                let (x, y, n) = value.xyn();
                Instruction::Draw { x, y, n }
            }
            0xE => {
                let (x, nn) = value.xnn();
                let ops = KeyOpcode::try_from(nn).map_err(invalid)?;
                Instruction::Key { ops, x }
            }
            0xF => {
                let (x, nn) = value.xnn();
                let ops = MiscOpcode::try_from(nn).map_err(invalid)?;
                Instruction::Misc { ops, x }
            }
            _ => return Err(OpcodeError::InvalidOpcode(value)),
        };
        Ok(res)
    }
}

/// Disassembles the instruction into the usual chip8 assembly mnemonics.
///
/// The quirks are not known here, `BNNN` is always printed with the default
/// `V0` offset register.
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Instruction::ClearScreen => write!(f, "CLS"),
            Instruction::Return => write!(f, "RET"),
            Instruction::Jump { nnn } => write!(f, "JP {:#05X}", nnn),
            Instruction::Call { nnn } => write!(f, "CALL {:#05X}", nnn),
            Instruction::SkipEqual { x, nn } => write!(f, "SE V{:X}, {:#04X}", x, nn),
            Instruction::SkipNotEqual { x, nn } => write!(f, "SNE V{:X}, {:#04X}", x, nn),
            Instruction::SkipRegistersEqual { x, y } => write!(f, "SE V{:X}, V{:X}", x, y),
            Instruction::Set { x, nn } => write!(f, "LD V{:X}, {:#04X}", x, nn),
            Instruction::Add { x, nn } => write!(f, "ADD V{:X}, {:#04X}", x, nn),
            Instruction::Alu { ops, x, y } => {
                let name = match ops {
                    AluOpcode::Assign => "LD",
                    AluOpcode::Or => "OR",
                    AluOpcode::And => "AND",
                    AluOpcode::Xor => "XOR",
                    AluOpcode::Add => "ADD",
                    AluOpcode::Sub => "SUB",
                    AluOpcode::ShiftRight => "SHR",
                    AluOpcode::SubReverse => "SUBN",
                    AluOpcode::ShiftLeft => "SHL",
                };
                write!(f, "{} V{:X}, V{:X}", name, x, y)
            }
            Instruction::SkipRegistersNotEqual { x, y } => {
                write!(f, "SNE V{:X}, V{:X}", x, y)
            }
            Instruction::SetIndex { nnn } => write!(f, "LD I, {:#05X}", nnn),
            Instruction::JumpOffset { nnn, .. } => write!(f, "JP V0, {:#05X}", nnn),
            Instruction::Random { x, nn } => write!(f, "RND V{:X}, {:#04X}", x, nn),
            Instruction::Draw { x, y, n } => write!(f, "DRW V{:X}, V{:X}, {}", x, y, n),
            Instruction::Key { ops, x } => match ops {
                KeyOpcode::Pressed => write!(f, "SKP V{:X}", x),
                KeyOpcode::NotPressed => write!(f, "SKNP V{:X}", x),
            },
            Instruction::Misc { ops, x } => match ops {
                MiscOpcode::GetDelayTimer => write!(f, "LD V{:X}, DT", x),
                MiscOpcode::AwaitKeyPress => write!(f, "LD V{:X}, K", x),
                MiscOpcode::SetDelayTimer => write!(f, "LD DT, V{:X}", x),
                MiscOpcode::SetSoundTimer => write!(f, "LD ST, V{:X}", x),
                MiscOpcode::AddVxToI => write!(f, "ADD I, V{:X}", x),
                MiscOpcode::SetIToSprite => write!(f, "LD F, V{:X}", x),
                MiscOpcode::StoreBCD => write!(f, "LD B, V{:X}", x),
                MiscOpcode::StoreV0ToVx => write!(f, "LD [I], V{:X}", x),
                MiscOpcode::FillV0ToVx => write!(f, "LD V{:X}, [I]", x),
            },
        }
    }
}

/// These are the traits that have to be full filled for a working opcode
/// table.
///
/// This trait requires the implementation of the [`ProgramCounter`](ProgramCounter) trait, as
/// every instruction reports its movement of the program counter as a
/// [`ProgramCounterStep`](ProgramCounterStep) that [`calc`](ChipOpcodes::calc) applies.
pub trait ChipOpcodes: ProgramCounter {
    /// will execute a single decoded instruction
    fn calc(&mut self, instruction: Instruction) -> Result<Operation, ProcessError> {
        let mut operation = Operation::None;
        let step_op = |(step, op): (ProgramCounterStep, Operation)| {
            operation = op;
            step
        };

        let step = match instruction {
            Instruction::ClearScreen => self.clear_screen().map(step_op),
            Instruction::Return => self.return_from_subroutine(),
            Instruction::Jump { nnn } => Ok(ProgramCounterStep::Jump(nnn)),
            Instruction::Call { nnn } => self.call_subroutine(nnn),
            Instruction::SkipEqual { x, nn } => self.skip_if_immediate(x, nn, true),
            Instruction::SkipNotEqual { x, nn } => self.skip_if_immediate(x, nn, false),
            Instruction::SkipRegistersEqual { x, y } => self.skip_if_registers(x, y, true),
            Instruction::SkipRegistersNotEqual { x, y } => self.skip_if_registers(x, y, false),
            Instruction::Set { x, nn } => self.set_register(x, nn),
            Instruction::Add { x, nn } => self.add_to_register(x, nn),
            Instruction::Alu { ops, x, y } => self.alu(ops, x, y),
            Instruction::SetIndex { nnn } => self.set_index(nnn),
            Instruction::JumpOffset { x, nnn } => self.jump_with_offset(x, nnn),
            Instruction::Random { x, nn } => self.random(x, nn),
            Instruction::Draw { x, y, n } => self.draw(x, y, n).map(step_op),
            Instruction::Key { ops, x } => self.skip_if_key(ops, x),
            Instruction::Misc { ops, x } => self.misc(ops, x).map(step_op),
        }?;

        self.apply_step(step);
        Ok(operation)
    }

    /// - `00E0` - Display  - `disp_clear()`        - Clears the screen.
    fn clear_screen(&mut self) -> Result<(ProgramCounterStep, Operation), ProcessError>;

    /// - `00EE` - Flow     - `return;`             - Returns from a subroutine.
    fn return_from_subroutine(&mut self) -> Result<ProgramCounterStep, ProcessError>;

    /// - `2NNN` - Flow     - `*(0xNNN)()`          - Calls subroutine at `NNN`.
    fn call_subroutine(&mut self, nnn: usize) -> Result<ProgramCounterStep, ProcessError>;

    /// - `3XNN` - Cond     - `if(Vx==NN)`          - Skips the next instruction if `VX` equals `NN`.
    /// - `4XNN` - Cond     - `if(Vx!=NN)`          - Skips the next instruction if `VX` doesn't equal `NN`.
    fn skip_if_immediate(
        &self,
        x: usize,
        nn: u8,
        equal: bool,
    ) -> Result<ProgramCounterStep, ProcessError>;

    /// - `5XY0` - Cond     - `if(Vx==Vy)`          - Skips the next instruction if `VX` equals `VY`.
    /// - `9XY0` - Cond     - `if(Vx!=Vy)`          - Skips the next instruction if `VX` doesn't equal `VY`.
    fn skip_if_registers(
        &self,
        x: usize,
        y: usize,
        equal: bool,
    ) -> Result<ProgramCounterStep, ProcessError>;

    /// - `6XNN` - Const    - `Vx = NN`             - Sets `VX` to `NN`.
    fn set_register(&mut self, x: usize, nn: u8) -> Result<ProgramCounterStep, ProcessError>;

    /// - `7XNN` - Const    - `Vx += NN`            - Adds `NN` to `VX`. (Carry flag is not changed)
    fn add_to_register(&mut self, x: usize, nn: u8) -> Result<ProgramCounterStep, ProcessError>;

    /// - `8XY0` - Assign   - `Vx=Vy`               - Sets `VX` to the value of `VY`.
    /// - `8XY1` - BitOp    - `Vx=Vx|Vy`            - Sets `VX` to `VX` or `VY`.
    /// - `8XY2` - BitOp    - `Vx=Vx&Vy`            - Sets `VX` to `VX` and `VY`.
    /// - `8XY3` - BitOp    - `Vx=Vx^Vy`            - Sets `VX` to `VX` xor `VY`.
    /// - `8XY4` - Math     - `Vx += Vy`            - Adds `VY` to `VX`. `VF` is set to `1` when there's a carry, and to `0` when there isn't.
    /// - `8XY5` - Math     - `Vx -= Vy`            - `VY` is subtracted from `VX`. `VF` is set to `0` when there's a borrow, and `1` when there isn't.
    /// - `8XY6` - BitOp    - `Vx>>=1`              - Stores the least significant bit in `VF` and then shifts to the right by `1`.
    /// - `8XY7` - Math     - `Vx=Vy-Vx`            - Sets `VX` to `VY` minus `VX`. `VF` is set to `0` when there's a borrow, and `1` when there isn't.
    /// - `8XYE` - BitOp    - `Vx<<=1`              - Stores the most significant bit in `VF` and then shifts to the left by `1`.
    fn alu(&mut self, ops: AluOpcode, x: usize, y: usize)
        -> Result<ProgramCounterStep, ProcessError>;

    /// - `ANNN` - MEM      - `I = NNN`             - Sets `I` to the address `NNN`.
    fn set_index(&mut self, nnn: usize) -> Result<ProgramCounterStep, ProcessError>;

    /// - `BNNN` - Flow     - `PC=V0+NNN`           - Jumps to the address `NNN` plus `V0`.
    fn jump_with_offset(&self, x: usize, nnn: usize) -> Result<ProgramCounterStep, ProcessError>;

    /// - `CXNN` - Rand     - `Vx=rand()&NN`        - Sets `VX` to a random number masked by `NN`.
    fn random(&mut self, x: usize, nn: u8) -> Result<ProgramCounterStep, ProcessError>;

    /// - `DXYN` - Disp     - `draw(Vx,Vy,N)`       - Draws a sprite at coordinate `(VX, VY)` that has a width of `8` pixels and a height of `N` pixels. `VF` is set to `1` if any screen pixels are flipped from set to unset.
    fn draw(
        &mut self,
        x: usize,
        y: usize,
        n: usize,
    ) -> Result<(ProgramCounterStep, Operation), ProcessError>;

    /// - `EX9E` - KeyOp    - `if(key()==Vx)`       - Skips the next instruction if the key stored in `VX` is pressed.
    /// - `EXA1` - KeyOp    - `if(key()!=Vx)`       - Skips the next instruction if the key stored in `VX` isn't pressed.
    fn skip_if_key(&self, ops: KeyOpcode, x: usize) -> Result<ProgramCounterStep, ProcessError>;

    /// - `FX07` - Timer    - `Vx = get_delay()`    - Sets `VX` to the value of the delay timer.
    /// - `FX0A` - KeyOp    - `Vx = get_key()`      - A key press is awaited, and then stored in `VX`.
    /// - `FX15` - Timer    - `delay_timer(Vx)`     - Sets the delay timer to `VX`.
    /// - `FX18` - Sound    - `sound_timer(Vx)`     - Sets the sound timer to `VX`.
    /// - `FX1E` - MEM      - `I +=Vx`              - Adds `VX` to `I`. `VF` is not affected.
    /// - `FX29` - MEM      - `I=sprite_addr[Vx]`   - Sets `I` to the location of the sprite for the character in `VX`.
    /// - `FX33` - BCD      - `set_BCD(Vx)`         - Stores the binary-coded decimal representation of `VX` at `I`, `I+1` and `I+2`.
    /// - `FX55` - MEM      - `reg_dump(Vx,&I)`     - Stores `V0` to `VX` (including `VX`) in memory starting at address `I`.
    /// - `FX65` - MEM      - `reg_load(Vx,&I)`     - Fills `V0` to `VX` (including `VX`) with values from memory starting at address `I`.
    fn misc(
        &mut self,
        ops: MiscOpcode,
        x: usize,
    ) -> Result<(ProgramCounterStep, Operation), ProcessError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tryfrom_opcode_simple() {
        let value: Opcode = 0x00E0;
        let conv: Result<Instruction, _> = value.try_into();
        assert_eq!(conv, Ok(Instruction::ClearScreen));
    }

    #[test]
    fn test_tryfrom_opcode_simple_fail() {
        let value: Opcode = 0x00E1;
        let conv: Result<Instruction, _> = value.try_into();
        assert_eq!(conv, Err(OpcodeError::InvalidOpcode(value)));
    }

    #[test]
    fn test_tryfrom_opcode_multiple() {
        let tests = [
            (0x00E0, Some(Instruction::ClearScreen)),
            (0x00EE, Some(Instruction::Return)),
            (0x0123, None),
            (0x1919, Some(Instruction::Jump { nnn: 0x919 })),
            (0x2222, Some(Instruction::Call { nnn: 0x222 })),
            (0x3123, Some(Instruction::SkipEqual { x: 0x1, nn: 0x23 })),
            (0x4123, Some(Instruction::SkipNotEqual { x: 0x1, nn: 0x23 })),
            (0x5120, Some(Instruction::SkipRegistersEqual { x: 0x1, y: 0x2 })),
            (0x5121, None),
            (0x6123, Some(Instruction::Set { x: 0x1, nn: 0x23 })),
            (0x7123, Some(Instruction::Add { x: 0x1, nn: 0x23 })),
            (
                0x8124,
                Some(Instruction::Alu {
                    ops: AluOpcode::Add,
                    x: 0x1,
                    y: 0x2,
                }),
            ),
            (
                0x812E,
                Some(Instruction::Alu {
                    ops: AluOpcode::ShiftLeft,
                    x: 0x1,
                    y: 0x2,
                }),
            ),
            (0x8128, None),
            (0x9120, Some(Instruction::SkipRegistersNotEqual { x: 0x1, y: 0x2 })),
            (0x9121, None),
            (0xA222, Some(Instruction::SetIndex { nnn: 0x222 })),
            (0xB322, Some(Instruction::JumpOffset { x: 0x3, nnn: 0x322 })),
            (0xC123, Some(Instruction::Random { x: 0x1, nn: 0x23 })),
            (0xD123, Some(Instruction::Draw { x: 0x1, y: 0x2, n: 0x3 })),
            (
                0xE19E,
                Some(Instruction::Key {
                    ops: KeyOpcode::Pressed,
                    x: 0x1,
                }),
            ),
            (
                0xE1A1,
                Some(Instruction::Key {
                    ops: KeyOpcode::NotPressed,
                    x: 0x1,
                }),
            ),
            (0xE111, None),
            (
                0xF00A,
                Some(Instruction::Misc {
                    ops: MiscOpcode::AwaitKeyPress,
                    x: 0x0,
                }),
            ),
            (
                0xF265,
                Some(Instruction::Misc {
                    ops: MiscOpcode::FillV0ToVx,
                    x: 0x2,
                }),
            ),
            (0xF0AA, None),
        ];
        for (value, res) in tests {
            let conv: Result<Instruction, _> = Opcode::try_into(value);
            assert_eq!(conv, res.ok_or(OpcodeError::InvalidOpcode(value)));
        }
    }

    #[test]
    fn test_every_alu_sub_opcode() {
        let valid = [0x0, 0x1, 0x2, 0x3, 0x4, 0x5, 0x6, 0x7, 0xE];
        for n in 0..0x10 {
            let decoded = AluOpcode::try_from(n);
            assert_eq!(valid.contains(&n), decoded.is_ok(), "sub opcode {:#X}", n);
        }
    }

    #[test]
    fn test_disassembly() {
        let tests = [
            (0x00E0, "CLS"),
            (0x00EE, "RET"),
            (0x1234, "JP 0x234"),
            (0x2ABC, "CALL 0xABC"),
            (0x3A0F, "SE VA, 0x0F"),
            (0x5120, "SE V1, V2"),
            (0x6C00, "LD VC, 0x00"),
            (0x84E4, "ADD V4, VE"),
            (0x8AB7, "SUBN VA, VB"),
            (0xA2E8, "LD I, 0x2E8"),
            (0xB200, "JP V0, 0x200"),
            (0xB322, "JP V0, 0x322"),
            (0xD235, "DRW V2, V3, 5"),
            (0xEDA1, "SKNP VD"),
            (0xF40A, "LD V4, K"),
            (0xF155, "LD [I], V1"),
            (0xF165, "LD V1, [I]"),
        ];
        for (value, text) in tests {
            let instruction = Instruction::try_from(value).expect("valid opcode");
            assert_eq!(text, format!("{}", instruction));
        }
    }
}
