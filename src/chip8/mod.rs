//! The chip8 virtual machine, the state in [`ChipSet`](ChipSet) and the
//! [`Interpreter`](Interpreter) executing the opcodes on it.
mod chipset;
mod interpreter;
mod opcodes;
mod print;

pub use chipset::*;
pub use interpreter::*;
