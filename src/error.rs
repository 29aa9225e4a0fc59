use thiserror::Error;

use crate::opcode::Opcode;

/// Everything that can go wrong while the interpreter executes a single
/// instruction.
#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum ProcessError {
    #[error("Invalid opcode state '{0}'.")]
    Opcode(#[from] OpcodeError),
    #[error("Invalid memory access '{0}'.")]
    Memory(#[from] MemoryError),
    #[error("Invalid stack state '{0}'.")]
    Stack(#[from] StackError),
}

impl ProcessError {
    /// Returns true if execution can not go on after this error, this is only
    /// the case if the program counter left the memory.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ProcessError::Opcode(OpcodeError::MemoryInvalid { .. }))
    }
}

#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum OpcodeError {
    #[error("An unsupported opcode was used {0:#06X?}.")]
    InvalidOpcode(Opcode),
    #[error("Pointer location invalid there can not be an opcode at {pointer}, if data len is {len}")]
    MemoryInvalid { pointer: usize, len: usize },
}

#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum MemoryError {
    #[error("Memory range {from:#06X} - {to:#06X} is out of bounds.")]
    OutOfBounds { from: usize, to: usize },
}

#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum StackError {
    #[error("Stack is full!")]
    Full,
    #[error("Stack is empty!")]
    Empty,
}

/// Errors raised while a program image is prepared for execution.
#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum LoadError {
    #[error("The program is {size} bytes long, but at most {max} bytes fit into memory.")]
    TooLarge { size: usize, max: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_fetch_errors_are_fatal() {
        let fatal: ProcessError = OpcodeError::MemoryInvalid {
            pointer: 0x1000,
            len: 0x1000,
        }
        .into();
        assert!(fatal.is_fatal());

        let recoverable: [ProcessError; 4] = [
            OpcodeError::InvalidOpcode(0x5121).into(),
            MemoryError::OutOfBounds { from: 0xFFF, to: 0x1001 }.into(),
            StackError::Full.into(),
            StackError::Empty.into(),
        ];
        for err in recoverable {
            assert!(!err.is_fatal(), "{} should be recoverable", err);
        }
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            "Invalid opcode state 'An unsupported opcode was used 0x5121.'.",
            format!("{}", ProcessError::from(OpcodeError::InvalidOpcode(0x5121)))
        );
        assert_eq!(
            "The program is 3585 bytes long, but at most 3584 bytes fit into memory.",
            format!("{}", LoadError::TooLarge { size: 3585, max: 3584 })
        );
    }
}
