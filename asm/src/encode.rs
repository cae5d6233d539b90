use arch::op::{Format, OpDesc};
use arch::reg::Reg;

use crate::error::ErrorKind;
use crate::label::Labels;
use crate::lexer::Token;
use crate::num::{self, NumError};

/// Build the 16-bit word for one instruction.
///
/// The mnemonic has already been resolved to its descriptor by the driver,
/// so an unknown mnemonic cannot reach this point. `addr` is the address
/// the instruction will occupy, used for relative branch displacements.
pub fn encode(
    op: &OpDesc,
    args: &[Token],
    labels: &Labels,
    addr: u16,
) -> Result<u16, ErrorKind> {
    let expected = op.format.operand_count();
    if args.len() != expected {
        return Err(ErrorKind::OperandCountMismatch(
            op.mnemonic,
            expected,
            args.len(),
        ));
    }

    let mut word = op.opcode << 9;
    match op.format {
        Format::A0 => {}
        Format::A1 => {
            word |= reg(&args[0])? << 6;
            word |= reg(&args[1])? << 3;
            word |= reg(&args[2])?;
        }
        Format::A2 => {
            word |= reg(&args[0])? << 6;
            word |= number(&args[1], 4)?;
        }
        Format::A3 => {
            word |= reg(&args[0])? << 6;
        }
        Format::B1 => {
            word |= branch_target(&args[0], labels, addr)?;
        }
        Format::B2 => {
            word |= reg(&args[0])? << 6;
            word |= number(&args[1], 6)?;
        }
        Format::L1 => {
            if op.upper {
                word |= 1 << 8;
            }
            word |= number(&args[0], 8)?;
        }
        Format::L2 => {
            word |= reg(&args[0])? << 6;
            word |= reg(&args[1])? << 3;
        }
    }
    Ok(word)
}

fn reg(tok: &Token) -> Result<u16, ErrorKind> {
    match Reg::parse(tok.text) {
        Ok(r) => Ok(r.field()),
        Err(_) => Err(ErrorKind::InvalidRegister(tok.text.to_string())),
    }
}

fn number(tok: &Token, bits: u32) -> Result<u16, ErrorKind> {
    num::parse_number(tok.text, bits).map_err(|e| match e {
        NumError::NotANumber => ErrorKind::MalformedConstant(tok.text.to_string()),
        NumError::OutOfRange => ErrorKind::OperandOutOfRange(tok.text.to_string(), bits),
    })
}

/// B1 operands are a literal displacement, or a label resolved to
/// `(target - addr) / 2` words and range-checked like any literal.
fn branch_target(tok: &Token, labels: &Labels, addr: u16) -> Result<u16, ErrorKind> {
    match num::parse_number(tok.text, 9) {
        Ok(v) => Ok(v),
        Err(NumError::OutOfRange) => Err(ErrorKind::OperandOutOfRange(tok.text.to_string(), 9)),
        Err(NumError::NotANumber) => {
            let target = labels
                .resolve(tok.text)
                .ok_or_else(|| ErrorKind::UnknownLabel(tok.text.to_string()))?;
            let disp = (target as i64 - addr as i64) / 2;
            num::range_check(disp, 9)
                .map_err(|_| ErrorKind::OperandOutOfRange(tok.text.to_string(), 9))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arch::op::lookup;

    fn toks<'a>(texts: &[&'a str]) -> Vec<Token<'a>> {
        texts.iter().map(|&t| Token { text: t, line: 1 }).collect()
    }

    fn enc(mnemonic: &str, args: &[&str], labels: &Labels, addr: u16) -> Result<u16, ErrorKind> {
        encode(lookup(mnemonic).unwrap(), &toks(args), labels, addr)
    }

    #[test]
    fn a1_three_registers() {
        let labels = Labels::new();
        assert_eq!(enc("ADD", &["R1", "R2", "R3"], &labels, 0), Ok(0x0253));
    }

    #[test]
    fn a0_takes_no_operands() {
        let labels = Labels::new();
        assert_eq!(enc("NOP", &[], &labels, 0), Ok(0x0000));
        assert_eq!(enc("RETURN", &[], &labels, 0), Ok(71 << 9));
    }

    #[test]
    fn operand_count_mismatch() {
        let labels = Labels::new();
        assert_eq!(
            enc("ADD", &["R1", "R2"], &labels, 0),
            Err(ErrorKind::OperandCountMismatch("ADD", 3, 2))
        );
        assert_eq!(
            enc("NOP", &["R1"], &labels, 0),
            Err(ErrorKind::OperandCountMismatch("NOP", 0, 1))
        );
    }

    #[test]
    fn a2_register_and_shift_amount() {
        let labels = Labels::new();
        assert_eq!(enc("SHL", &["R2", "3"], &labels, 0), Ok(5 << 9 | 2 << 6 | 3));
        assert_eq!(
            enc("SHL", &["R2", "16"], &labels, 0),
            Err(ErrorKind::OperandOutOfRange("16".to_string(), 4))
        );
    }

    #[test]
    fn invalid_register_forms() {
        let labels = Labels::new();
        assert_eq!(
            enc("TEST", &["R10"], &labels, 0),
            Err(ErrorKind::InvalidRegister("R10".to_string()))
        );
        assert_eq!(
            enc("TEST", &["X1"], &labels, 0),
            Err(ErrorKind::InvalidRegister("X1".to_string()))
        );
    }

    #[test]
    fn b2_signed_immediate() {
        let labels = Labels::new();
        assert_eq!(
            enc("BR", &["R1", "-2"], &labels, 0),
            Ok(67 << 9 | 1 << 6 | 0x3E)
        );
    }

    #[test]
    fn b1_literal_displacement() {
        let labels = Labels::new();
        assert_eq!(enc("BRR", &["4"], &labels, 0), Ok(64 << 9 | 4));
        assert_eq!(enc("BRR", &["-1"], &labels, 0), Ok(64 << 9 | 0x1FF));
    }

    #[test]
    fn b1_label_forward_and_backward() {
        let mut labels = Labels::new();
        labels.define("LOOP", 0x10).unwrap();
        // forward: (0x10 - 0x08) / 2 = 4
        assert_eq!(enc("BRR", &["LOOP"], &labels, 0x08), Ok(64 << 9 | 4));
        // backward: (0x10 - 0x18) / 2 = -4
        assert_eq!(
            enc("BRR", &["LOOP"], &labels, 0x18),
            Ok(64 << 9 | (0x1FF & !3))
        );
        // self: displacement 0
        assert_eq!(enc("BRR", &["LOOP"], &labels, 0x10), Ok(0x8000));
    }

    #[test]
    fn b1_unknown_label() {
        let labels = Labels::new();
        assert_eq!(
            enc("BRR", &["NOWHERE"], &labels, 0),
            Err(ErrorKind::UnknownLabel("NOWHERE".to_string()))
        );
    }

    #[test]
    fn b1_displacement_out_of_range_is_fatal() {
        let mut labels = Labels::new();
        labels.define("START", 0).unwrap();
        // (0 - 2048) / 2 = -1024, beyond the 9-bit field
        assert_eq!(
            enc("BRR", &["START"], &labels, 2048),
            Err(ErrorKind::OperandOutOfRange("START".to_string(), 9))
        );
        // (0 - 1022) / 2 = -511 still fits the field's negative range
        assert_eq!(
            enc("BRR", &["START"], &labels, 1022),
            Ok(64 << 9 | 0x001)
        );
    }

    #[test]
    fn l1_half_select_bit() {
        let labels = Labels::new();
        let lower = enc("LOADIMM.LOWER", &["0XFF"], &labels, 0).unwrap();
        let upper = enc("LOADIMM.UPPER", &["0XFF"], &labels, 0).unwrap();
        assert_eq!(lower, 18 << 9 | 0xFF);
        assert_eq!(upper, 18 << 9 | 1 << 8 | 0xFF);
    }

    #[test]
    fn l2_two_registers() {
        let labels = Labels::new();
        assert_eq!(
            enc("LOAD", &["R4", "R5"], &labels, 0),
            Ok(16 << 9 | 4 << 6 | 5 << 3)
        );
        assert_eq!(
            enc("MOV", &["R1", "R2"], &labels, 0),
            Ok(19 << 9 | 1 << 6 | 2 << 3)
        );
    }

    #[test]
    fn a2_malformed_constant() {
        let labels = Labels::new();
        assert_eq!(
            enc("SHR", &["R1", "0XZZ"], &labels, 0),
            Err(ErrorKind::MalformedConstant("0XZZ".to_string()))
        );
    }
}
