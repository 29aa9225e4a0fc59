//! The debug dump of the [`ChipSet`](super::ChipSet), split into its own file
//! as the formatting helpers take up a multitude of lines.

use super::ChipSet;
use crate::definitions::cpu;
use once_cell::sync::Lazy;
use std::fmt;

/// The amount of entries printed per row, has to be bigger then 0.
const HEX_PRINT_STEP: usize = 8;

const END_OF_LINE: char = '\n';
const INDENT_FILLAMENT: char = '\t';
const INDENT_SIZE: usize = 2;

/// Will add an indent to the given text
fn indent_helper(text: &mut String, indent: usize) {
    for _ in 0..indent {
        text.push(INDENT_FILLAMENT);
    }
}

macro_rules! intformat {
    () => {
        // 2 symbols for the prefix (0x) and 4 for the value
        "{:#06X}"
    };
}

static POINTER_LEN: Lazy<usize> =
    Lazy::new(|| format!(concat!(intformat!(), " - ", intformat!(), " :"), 0, 0).len());

static INTEGER_LEN: Lazy<usize> = Lazy::new(|| format!(intformat!(), 0).len());

/// a line length estimate, a bit bigger then the actual line will be
static LENLINE: Lazy<usize> =
    Lazy::new(|| INDENT_SIZE + HEX_PRINT_STEP * (*INTEGER_LEN + 1) + 1 + *POINTER_LEN);

/// Handles all the printing of the pointer values.
mod pointer_print {
    use std::fmt::{self, Write};

    /// will format the address range of a row
    pub(super) fn formatter(line: &mut String, from: usize, to: usize) -> fmt::Result {
        write!(
            line,
            concat!(intformat!(), " - ", intformat!(), " :"),
            from, to
        )
    }
}

/// handles printing of any and all of integers.
mod integer_print {
    use super::{pointer_print, HEX_PRINT_STEP};
    use num_traits::Unsigned;
    use std::fmt::{self, Write};

    /// will format all integer types
    pub(super) fn formatter<T>(line: &mut String, data: T) -> fmt::Result
    where
        T: fmt::UpperHex + Unsigned + Copy,
    {
        write!(line, intformat!(), data)
    }

    /// will pretty print all the integer data given
    pub(super) fn printer<T>(data: &[T], indent: usize) -> Result<String, fmt::Error>
    where
        T: fmt::UpperHex + Unsigned + Copy,
    {
        let mut res = String::with_capacity(*super::LENLINE * (data.len() / HEX_PRINT_STEP + 1));

        for (row, chunk) in data.chunks(HEX_PRINT_STEP).enumerate() {
            let from = row * HEX_PRINT_STEP;
            super::indent_helper(&mut res, indent);
            pointer_print::formatter(&mut res, from, from + chunk.len() - 1)?;

            for entry in chunk {
                res.push(' ');
                formatter(&mut res, *entry)?;
            }
            res.push(super::END_OF_LINE);
        }

        // Remove unneeded new line
        res.pop();
        Ok(res)
    }
}

/// Handles all the opcode prints
mod opcode_print {
    use super::{integer_print, pointer_print, HEX_PRINT_STEP};
    use crate::{definitions::memory, opcode::Opcode};
    use once_cell::sync::Lazy;
    use std::fmt::{self, Write};

    /// The amount of bytes shown in a single row
    const POINTER_INCREMENT: usize = HEX_PRINT_STEP * memory::opcodes::SIZE;
    /// Shown between the first and last value of collapsed zero rows.
    const FILLER_BASE: &str = "...";

    /// The line used for a block of rows that only contain zeros.
    static ZERO_FILLER: Lazy<String> = Lazy::new(|| {
        let formatted = format!(intformat!(), 0);
        let length = formatted.len() * (HEX_PRINT_STEP - 2) + (HEX_PRINT_STEP - 1)
            - FILLER_BASE.len();
        let filler = " ".repeat(length / 2);
        format!(
            "{}{}{}{}{}",
            formatted, filler, FILLER_BASE, filler, formatted
        )
    });

    /// a single row of opcodes (only in this context)
    struct Row {
        from: usize,
        to: usize,
        data: [Opcode; HEX_PRINT_STEP],
        only_null: bool,
    }

    impl fmt::Display for Row {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            let mut res = String::with_capacity(*super::LENLINE);
            pointer_print::formatter(&mut res, self.from, self.to)?;

            if self.only_null {
                res.push(' ');
                res.push_str(&ZERO_FILLER);
            } else {
                for entry in self.data.iter() {
                    res.push(' ');
                    integer_print::formatter(&mut res, *entry)?;
                }
            }
            write!(f, "{}", res)
        }
    }

    /// will pretty print the content of the raw memory, neighbouring rows
    /// of zeros are collapsed into one
    pub(super) fn printer(memory: &[u8], indent: usize) -> Result<String, fmt::Error> {
        let mut rows: Vec<Row> = Vec::with_capacity(memory.len() / POINTER_INCREMENT);

        for (index, chunk) in memory.chunks(POINTER_INCREMENT).enumerate() {
            let from = index * POINTER_INCREMENT;
            let mut data = [0; HEX_PRINT_STEP];
            for (opcode, bytes) in data.iter_mut().zip(chunk.chunks(memory::opcodes::SIZE)) {
                *opcode = bytes
                    .iter()
                    .fold(0, |acc, byte| (acc << 8) | *byte as Opcode);
            }
            let only_null = data.iter().all(|opcode| *opcode == 0);

            let mut row = Row {
                from,
                to: from + chunk.len() - 1,
                data,
                only_null,
            };

            if only_null {
                if let Some(last_row) = rows.last() {
                    if last_row.only_null {
                        row.from = last_row.from;
                        rows.pop();
                    }
                }
            }
            rows.push(row)
        }

        let mut string = String::with_capacity((*super::LENLINE + 1) * rows.len());
        for row in rows {
            super::indent_helper(&mut string, indent);
            write!(string, "{}{}", row, super::END_OF_LINE)?;
        }
        string.pop();
        Ok(string)
    }
}

/// Handles all the boolean data types.
mod bool_print {
    use super::{pointer_print, END_OF_LINE, HEX_PRINT_STEP};
    use once_cell::sync::Lazy;
    use std::fmt;

    /// the prepared true string
    static TRUE: Lazy<String> = Lazy::new(|| formatter("true"));
    /// the prepared false string
    static FALSE: Lazy<String> = Lazy::new(|| formatter("false"));

    /// keeps the booleans as wide as the integers
    fn formatter(message: &str) -> String {
        format!("{:width$}", message, width = *super::INTEGER_LEN)
    }

    /// will pretty print all the boolean data given
    pub(super) fn printer(data: &[bool], indent: usize) -> Result<String, fmt::Error> {
        let mut res = String::with_capacity(*super::LENLINE * (data.len() / HEX_PRINT_STEP + 1));
        let check_type = |val: bool| if val { &*TRUE } else { &*FALSE };

        for (row, chunk) in data.chunks(HEX_PRINT_STEP).enumerate() {
            let from = row * HEX_PRINT_STEP;
            super::indent_helper(&mut res, indent);
            pointer_print::formatter(&mut res, from, from + chunk.len() - 1)?;

            for value in chunk {
                res.push(' ');
                res.push_str(check_type(*value));
            }
            // no padding at the end of the line
            res.truncate(res.trim_end().len());
            res.push(END_OF_LINE);
        }
        res.pop();
        Ok(res)
    }
}

/// Indents a single value
fn single<T: fmt::Display>(value: T) -> String {
    let mut line = String::with_capacity(INDENT_SIZE + *INTEGER_LEN);
    indent_helper(&mut line, INDENT_SIZE);
    line.push_str(&value.to_string());
    line
}

/// Indents a single formatted integer
fn single_hex<T>(value: T) -> Result<String, fmt::Error>
where
    T: fmt::UpperHex + num_traits::Unsigned + Copy,
{
    let mut line = String::with_capacity(INDENT_SIZE + *INTEGER_LEN);
    indent_helper(&mut line, INDENT_SIZE);
    integer_print::formatter(&mut line, value)?;
    Ok(line)
}

impl fmt::Display for ChipSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let nam = single(self.get_name());
        let opc = single_hex(self.opcode)?;
        let prc = single_hex(self.program_counter)?;
        let idx = single_hex(self.index_register)?;

        let mem = opcode_print::printer(&self.memory, INDENT_SIZE)?;
        let key = bool_print::printer(self.keyboard.get_keys(), INDENT_SIZE)?;

        // the stack is filled up, so it always has the same size
        let mut stack = [0; cpu::stack::SIZE];
        stack[..self.stack.len()].copy_from_slice(&self.stack);
        let sta = integer_print::printer(&stack, INDENT_SIZE)?;

        let reg = integer_print::printer(&self.registers, INDENT_SIZE)?;
        let tim = integer_print::printer(
            &[self.delay_timer.get_value(), self.sound_timer.get_value()],
            INDENT_SIZE,
        )?;

        write!(
            f,
            "Chipset {{\n\
                \tProgram Name :\n{}\n\
                \tOpcode :\n{}\n\
                \tProgram Counter :\n{}\n\
                \tIndex Register :\n{}\n\
                \tMemory :\n{}\n\
                \tKeyboard :\n{}\n\
                \tStack :\n{}\n\
                \tRegister :\n{}\n\
                \tTimers (delay, sound) :\n{}\n\
            }}",
            nam, opc, prc, idx, mem, key, sta, reg, tim
        )
    }
}
