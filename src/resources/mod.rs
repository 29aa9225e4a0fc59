//! Program images ready to be loaded into the chipset.
use crate::{definitions::memory, LoadError};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents a single rom with it's information
pub struct Rom {
    /// The rom name
    name: String,
    /// The raw program, stored as a u8 slice on the heap
    data: Box<[u8]>,
}

impl Rom {
    /// Will generate a new rom based of the given data, the data has to fit
    /// into the memory behind the reserved interpreter area.
    ///
    /// # Example
    /// ```rust
    /// # use chip::resources::Rom;
    /// # use chip::definitions::memory;
    /// let rom = Rom::new("CLEAR", vec![0x00, 0xE0]).expect("fits into memory");
    /// assert_eq!(rom.get_data(), &[0x00, 0xE0]);
    ///
    /// assert!(Rom::new("HUGE", vec![0; memory::PROGRAM_MAX_SIZE + 1]).is_err());
    /// ```
    pub fn new<D: Into<Box<[u8]>>>(name: &str, data: D) -> Result<Self, LoadError> {
        let data = data.into();
        if data.len() > memory::PROGRAM_MAX_SIZE {
            log::error!(
                "rom '{}' is {} bytes long and does not fit into memory",
                name,
                data.len()
            );
            return Err(LoadError::TooLarge {
                size: data.len(),
                max: memory::PROGRAM_MAX_SIZE,
            });
        }
        Ok(Rom {
            name: name.to_string(),
            data,
        })
    }

    /// Will return a slice internal values of the given data
    pub fn get_data(&self) -> &[u8] {
        &self.data
    }

    /// Will return the name of the rom.
    pub fn get_name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opcode::{build_opcode, Opcode};

    /// The first instructions of the 15PUZZLE program.
    const RAW_ROM_DATA: [Opcode; 8] = [
        0x00E0, 0x6C00, 0x4C00, 0x6E0F, 0xA203, 0x6020, 0xF055, 0x00E0,
    ];

    #[test]
    fn test_rom_data() {
        let data: Vec<u8> = RAW_ROM_DATA.iter().flat_map(|op| op.to_be_bytes()).collect();
        let rom = Rom::new("15PUZZLE", data).expect("the rom is small enough");

        assert_eq!(rom.get_name(), "15PUZZLE");
        let data = rom.get_data();
        for i in (0..data.len()).step_by(2) {
            let opcode = build_opcode(data, i).expect("there is a full opcode");
            assert_eq!(RAW_ROM_DATA[i / 2], opcode);
        }
    }

    #[test]
    fn test_size_limit() {
        assert!(Rom::new("FULL", vec![0xFF; memory::PROGRAM_MAX_SIZE]).is_ok());
        assert_eq!(
            Rom::new("HUGE", vec![0xFF; memory::PROGRAM_MAX_SIZE + 1]),
            Err(LoadError::TooLarge {
                size: 3585,
                max: 3584
            })
        );
    }

    #[test]
    fn test_empty_rom() {
        let rom = Rom::new("EMPTY", Vec::new()).expect("an empty rom is fine");
        assert!(rom.get_data().is_empty());
    }
}
