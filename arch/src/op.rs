use once_cell::sync::Lazy;

/// Operand layout of an encoded instruction word. The opcode always sits in
/// bits 15..9; the format fixes how the low 9 bits are populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// No operands.
    A0,
    /// Three registers: rd<<6 | rs1<<3 | rs2.
    A1,
    /// Register and 4-bit shift amount: rd<<6 | imm4.
    A2,
    /// One register: rd<<6.
    A3,
    /// 9-bit signed branch displacement in words.
    B1,
    /// Register and 6-bit signed immediate: rd<<6 | imm6.
    B2,
    /// 8-bit immediate byte, with the half-select flag in bit 8.
    L1,
    /// Two registers: rd<<6 | rs<<3.
    L2,
}

impl Format {
    pub fn operand_count(self) -> usize {
        match self {
            Format::A0 => 0,
            Format::A1 => 3,
            Format::A2 => 2,
            Format::A3 => 1,
            Format::B1 => 1,
            Format::B2 => 2,
            Format::L1 => 1,
            Format::L2 => 2,
        }
    }
}

/// One entry of the static mnemonic table.
#[derive(Debug, Clone, Copy)]
pub struct OpDesc {
    pub mnemonic: &'static str,
    pub opcode: u16,
    pub format: Format,
    /// Selects the upper half of the target register; only meaningful for
    /// the LOADIMM pair, which shares a single opcode.
    pub upper: bool,
}

const fn op(mnemonic: &'static str, opcode: u16, format: Format) -> OpDesc {
    OpDesc {
        mnemonic,
        opcode,
        format,
        upper: false,
    }
}

/// The closed BX16 vocabulary. Opcode 0 is NOP so that a zeroed ROM word
/// decodes to a no-op.
pub static OPCODES: Lazy<Vec<OpDesc>> = Lazy::new(|| {
    vec![
        op("NOP", 0, Format::A0),
        op("ADD", 1, Format::A1),
        op("SUB", 2, Format::A1),
        op("MUL", 3, Format::A1),
        op("NAND", 4, Format::A1),
        op("SHL", 5, Format::A2),
        op("SHR", 6, Format::A2),
        op("TEST", 7, Format::A3),
        op("MUH", 8, Format::A1),
        op("OUT", 32, Format::A3),
        op("IN", 33, Format::A3),
        op("BRR", 64, Format::B1),
        op("BRR.N", 65, Format::B1),
        op("BRR.Z", 66, Format::B1),
        op("BRR.O", 73, Format::B1),
        op("BR", 67, Format::B2),
        op("BR.N", 68, Format::B2),
        op("BR.Z", 69, Format::B2),
        op("BR.O", 72, Format::B2),
        op("BR.SUB", 70, Format::B2),
        op("RETURN", 71, Format::A0),
        op("LOAD", 16, Format::L2),
        op("STORE", 17, Format::L2),
        op("LOADIMM.LOWER", 18, Format::L1),
        OpDesc {
            mnemonic: "LOADIMM.UPPER",
            opcode: 18,
            format: Format::L1,
            upper: true,
        },
        op("MOV", 19, Format::L2),
    ]
});

/// Case-insensitive linear search of the mnemonic table.
pub fn lookup(mnemonic: &str) -> Option<&'static OpDesc> {
    OPCODES
        .iter()
        .find(|op| op.mnemonic.eq_ignore_ascii_case(mnemonic))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_known() {
        let add = lookup("ADD").unwrap();
        assert_eq!(add.opcode, 1);
        assert_eq!(add.format, Format::A1);

        let brr = lookup("BRR").unwrap();
        assert_eq!(brr.opcode, 64);
        assert_eq!(brr.format, Format::B1);
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(lookup("nop").unwrap().opcode, 0);
        assert_eq!(lookup("Brr.z").unwrap().opcode, 66);
    }

    #[test]
    fn lookup_unknown() {
        assert!(lookup("FROB").is_none());
        assert!(lookup("").is_none());
    }

    #[test]
    fn loadimm_pair_shares_opcode() {
        let lower = lookup("LOADIMM.LOWER").unwrap();
        let upper = lookup("LOADIMM.UPPER").unwrap();
        assert_eq!(lower.opcode, upper.opcode);
        assert!(!lower.upper);
        assert!(upper.upper);
    }

    #[test]
    fn opcodes_fit_the_high_field() {
        for op in OPCODES.iter() {
            assert!(op.opcode < 128, "{} opcode too wide", op.mnemonic);
        }
    }
}
