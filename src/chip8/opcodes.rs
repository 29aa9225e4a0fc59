use crate::{
    definitions::{
        cpu,
        display::{self, fontset},
    },
    opcode::{AluOpcode, ChipOpcodes, KeyOpcode, MiscOpcode, Operation, ProgramCounterStep},
    ProcessError,
};

use super::{ExecutionState, Interpreter};

/// The width of a single sprite row.
const SPRITE_WIDTH: usize = 8;

impl ChipOpcodes for Interpreter {
    fn clear_screen(&mut self) -> Result<(ProgramCounterStep, Operation), ProcessError> {
        self.chipset.display.clear();
        Ok((ProgramCounterStep::Next, Operation::Draw))
    }

    fn return_from_subroutine(&mut self) -> Result<ProgramCounterStep, ProcessError> {
        let pc = self.chipset.pop_stack()?;
        Ok(ProgramCounterStep::Jump(pc))
    }

    fn call_subroutine(&mut self, nnn: usize) -> Result<ProgramCounterStep, ProcessError> {
        // the program counter already points to the instruction after the call
        self.chipset.push_stack(self.chipset.program_counter)?;
        Ok(ProgramCounterStep::Jump(nnn))
    }

    fn skip_if_immediate(
        &self,
        x: usize,
        nn: u8,
        equal: bool,
    ) -> Result<ProgramCounterStep, ProcessError> {
        Ok(ProgramCounterStep::cond(
            (self.chipset.registers[x] == nn) == equal,
        ))
    }

    fn skip_if_registers(
        &self,
        x: usize,
        y: usize,
        equal: bool,
    ) -> Result<ProgramCounterStep, ProcessError> {
        let registers = &self.chipset.registers;
        Ok(ProgramCounterStep::cond(
            (registers[x] == registers[y]) == equal,
        ))
    }

    fn set_register(&mut self, x: usize, nn: u8) -> Result<ProgramCounterStep, ProcessError> {
        self.chipset.registers[x] = nn;
        Ok(ProgramCounterStep::Next)
    }

    fn add_to_register(&mut self, x: usize, nn: u8) -> Result<ProgramCounterStep, ProcessError> {
        // let VX overflow, but ignore carry
        self.chipset.registers[x] = self.chipset.registers[x].wrapping_add(nn);
        Ok(ProgramCounterStep::Next)
    }

    fn alu(
        &mut self,
        ops: AluOpcode,
        x: usize,
        y: usize,
    ) -> Result<ProgramCounterStep, ProcessError> {
        let vx = self.chipset.registers[x];
        let vy = self.chipset.registers[y];
        let logic_flag = if self.quirks.reset_flag_on_logic_ops {
            Some(0)
        } else {
            None
        };
        let shift_source = if self.quirks.shift_uses_vy { vy } else { vx };

        // both values are read before anything is written, the flag is
        // written last so it wins if `X` is `F`
        let (value, flag) = match ops {
            AluOpcode::Assign => (vy, None),
            AluOpcode::Or => (vx | vy, logic_flag),
            AluOpcode::And => (vx & vy, logic_flag),
            AluOpcode::Xor => (vx ^ vy, logic_flag),
            AluOpcode::Add => {
                let (res, carry) = vx.overflowing_add(vy);
                (res, Some(carry as u8))
            }
            AluOpcode::Sub => (vx.wrapping_sub(vy), Some((vx >= vy) as u8)),
            AluOpcode::SubReverse => (vy.wrapping_sub(vx), Some((vy >= vx) as u8)),
            AluOpcode::ShiftRight => (shift_source >> 1, Some(shift_source & 1)),
            AluOpcode::ShiftLeft => (shift_source << 1, Some(shift_source >> 7)),
        };

        self.chipset.registers[x] = value;
        if let Some(flag) = flag {
            self.chipset.registers[cpu::register::LAST] = flag;
        }
        Ok(ProgramCounterStep::Next)
    }

    fn set_index(&mut self, nnn: usize) -> Result<ProgramCounterStep, ProcessError> {
        self.chipset.index_register = nnn as u16;
        Ok(ProgramCounterStep::Next)
    }

    fn jump_with_offset(&self, x: usize, nnn: usize) -> Result<ProgramCounterStep, ProcessError> {
        let register = if self.quirks.jump_offset_uses_vx { x } else { 0 };
        let offset = self.chipset.registers[register] as usize;
        Ok(ProgramCounterStep::Jump(offset + nnn))
    }

    fn random(&mut self, x: usize, nn: u8) -> Result<ProgramCounterStep, ProcessError> {
        // using a fill bytes call here, as the trait RngCore does not
        // support random u8.
        let mut rand: [u8; 1] = [0];
        self.rng.fill_bytes(&mut rand);
        self.chipset.registers[x] = nn & rand[0];
        Ok(ProgramCounterStep::Next)
    }

    fn draw(
        &mut self,
        x: usize,
        y: usize,
        n: usize,
    ) -> Result<(ProgramCounterStep, Operation), ProcessError> {
        // see https://tobiasvl.github.io/blog/write-a-chip-8-emulator/
        let index = self.chipset.index_register as usize;
        let sprite = self.chipset.memory_range(index, n)?;

        let coorx = self.chipset.registers[x] as usize % display::WIDTH;
        let coory = self.chipset.registers[y] as usize % display::HEIGHT;

        self.chipset.registers[cpu::register::LAST] = 0;

        for (i, row) in self.chipset.memory[sprite].iter().enumerate() {
            let y = coory + i;
            if y >= display::HEIGHT {
                break;
            }

            for j in 0..SPRITE_WIDTH {
                let x = coorx + j;
                if x >= display::WIDTH {
                    break;
                }

                // the most significant bit is the leftmost pixel
                let mask = 0x80 >> j;
                if *row & mask == 0 {
                    continue;
                }

                if self.chipset.display.flip(x, y) {
                    self.chipset.registers[cpu::register::LAST] = 1;
                }
            }
        }

        Ok((ProgramCounterStep::Next, Operation::Draw))
    }

    fn skip_if_key(&self, ops: KeyOpcode, x: usize) -> Result<ProgramCounterStep, ProcessError> {
        let pressed = self
            .chipset
            .keyboard
            .is_pressed(self.chipset.registers[x] as usize);
        let step = match ops {
            KeyOpcode::Pressed => ProgramCounterStep::cond(pressed),
            KeyOpcode::NotPressed => ProgramCounterStep::cond(!pressed),
        };
        Ok(step)
    }

    fn misc(
        &mut self,
        ops: MiscOpcode,
        x: usize,
    ) -> Result<(ProgramCounterStep, Operation), ProcessError> {
        let mut op = Operation::None;
        let mut pcs = ProgramCounterStep::Next;
        let index = self.chipset.index_register as usize;

        match ops {
            MiscOpcode::GetDelayTimer => {
                self.chipset.registers[x] = self.chipset.delay_timer.get_value();
            }
            MiscOpcode::AwaitKeyPress => match self.chipset.keyboard.pressed() {
                Some(key) => self.chipset.registers[x] = key as u8,
                None => {
                    log::debug!("waiting for a key to store in V{:X}", x);
                    self.state = ExecutionState::AwaitingKey { register: x };
                    op = Operation::Wait;
                    pcs = ProgramCounterStep::Hold;
                }
            },
            MiscOpcode::SetDelayTimer => {
                self.chipset.delay_timer.set_value(self.chipset.registers[x]);
            }
            MiscOpcode::SetSoundTimer => {
                self.chipset.sound_timer.set_value(self.chipset.registers[x]);
            }
            MiscOpcode::AddVxToI => {
                let vx = self.chipset.registers[x] as u16;
                self.chipset.index_register = self.chipset.index_register.wrapping_add(vx);
            }
            MiscOpcode::SetIToSprite => {
                let glyph = (self.chipset.registers[x] & 0xF) as usize;
                let location = self.chipset.font_base + glyph * fontset::GLYPH_SIZE;
                self.chipset.index_register = location as u16;
            }
            MiscOpcode::StoreBCD => {
                let range = self.chipset.memory_range(index, 3)?;
                let r = self.chipset.registers[x];
                // 246u8 / 100 => 2, 246u8 / 10 => 24 % 10 => 4, 246u8 % 10 => 6
                self.chipset.memory[range].copy_from_slice(&[r / 100, r / 10 % 10, r % 10]);
            }
            MiscOpcode::StoreV0ToVx => {
                let range = self.chipset.memory_range(index, x + 1)?;
                self.chipset.memory[range].copy_from_slice(&self.chipset.registers[..=x]);
                self.advance_index_after_transfer(x);
            }
            MiscOpcode::FillV0ToVx => {
                let range = self.chipset.memory_range(index, x + 1)?;
                self.chipset.registers[..=x].copy_from_slice(&self.chipset.memory[range]);
                self.advance_index_after_transfer(x);
            }
        }
        Ok((pcs, op))
    }
}

impl Interpreter {
    fn advance_index_after_transfer(&mut self, x: usize) {
        if self.quirks.increment_index_on_bulk_transfer {
            let offset = (x + 1) as u16;
            self.chipset.index_register = self.chipset.index_register.wrapping_add(offset);
        }
    }
}
