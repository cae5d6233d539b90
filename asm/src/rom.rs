use arch::ROM_SIZE;

use crate::error::ErrorKind;

/// The fixed 1024-byte boot ROM image. Unwritten bytes stay zero, which
/// decodes as NOP.
#[derive(Debug)]
pub struct Rom {
    data: [u8; ROM_SIZE],
}

impl Rom {
    pub fn new() -> Self {
        Rom {
            data: [0; ROM_SIZE],
        }
    }

    /// Store one instruction word, high byte first.
    pub fn write_word(&mut self, addr: u16, word: u16) -> Result<(), ErrorKind> {
        if addr % 2 != 0 {
            return Err(ErrorKind::MisalignedAddress(addr));
        }
        let idx = addr as usize;
        if idx + 1 >= ROM_SIZE {
            return Err(ErrorKind::AddressOutOfRange(addr));
        }
        self.data[idx] = (word >> 8) as u8;
        self.data[idx + 1] = (word & 0xFF) as u8;
        Ok(())
    }

    /// Read back one word. Addresses past the image read as zero, like any
    /// other unwritten slot.
    pub fn word(&self, addr: u16) -> u16 {
        let idx = addr as usize;
        if idx + 1 >= ROM_SIZE {
            return 0;
        }
        (self.data[idx] as u16) << 8 | self.data[idx + 1] as u16
    }

    /// Text-hex serialization: one uppercase `%02X%02X` word per line,
    /// ROM_SIZE / 2 lines in total.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(ROM_SIZE / 2 * 5);
        for pair in self.data.chunks_exact(2) {
            out.push_str(&format!("{:02X}{:02X}\n", pair[0], pair[1]));
        }
        out
    }
}
