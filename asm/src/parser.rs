use arch::op::{self, OpDesc};
use arch::MAX_INSTR;

use crate::encode;
use crate::error::{Error, ErrorKind};
use crate::label::Labels;
use crate::lexer::{Lexer, Token};
use crate::num::{self, NumError};
use crate::rom::Rom;

/// An instruction recorded during phase 1: its assigned address, the
/// resolved mnemonic descriptor, and the raw operand tokens. Encoded
/// during phase 2, once every label is known.
#[derive(Debug, Clone)]
pub struct Pending<'a> {
    pub addr: u16,
    pub line: u32,
    pub op: &'static OpDesc,
    pub args: Vec<Token<'a>>,
}

/// Phase 1 output: the ordered instruction list and the full label table.
#[derive(Debug)]
pub struct Program<'a> {
    pub insts: Vec<Pending<'a>>,
    pub labels: Labels,
}

/// Phase 1: one pass over the token stream.
///
/// The address cursor starts at 0, is reset by `ORG <value>`, and advances
/// by 2 for each instruction. Label definitions record the cursor without
/// advancing it. Anything else that is not a recognized mnemonic is
/// skipped; the original toolchain tolerated stray text and sources rely
/// on it.
pub fn scan(src: &str) -> Result<Program<'_>, Error> {
    let mut lexer = Lexer::new(src);
    let mut insts: Vec<Pending> = Vec::new();
    let mut labels = Labels::new();
    let mut cursor: u16 = 0;

    while let Some(tok) = lexer.next() {
        if tok.is_newline() {
            continue;
        }

        if tok.text == "ORG" {
            cursor = org_value(&mut lexer, tok.line)?;
        } else if let Some(name) = tok.label_name() {
            labels.define(name, cursor).map_err(|k| k.at(tok.line))?;
        } else if let Some(op) = op::lookup(tok.text) {
            if insts.len() >= MAX_INSTR {
                return Err(ErrorKind::TooManyInstructions.at(tok.line));
            }
            let mut args = Vec::new();
            for arg in lexer.by_ref() {
                if arg.is_newline() {
                    break;
                }
                args.push(arg);
            }
            insts.push(Pending {
                addr: cursor,
                line: tok.line,
                op,
                args,
            });
            cursor = cursor.wrapping_add(2);
        }
    }

    Ok(Program { insts, labels })
}

/// `ORG` consumes the next token on the line as a 16-bit unsigned address.
fn org_value(lexer: &mut Lexer, line: u32) -> Result<u16, Error> {
    let arg = match lexer.next() {
        Some(t) if !t.is_newline() => t,
        _ => return Err(ErrorKind::MalformedConstant("ORG".to_string()).at(line)),
    };
    num::parse_number(arg.text, 16).map_err(|e| {
        match e {
            NumError::NotANumber => ErrorKind::MalformedConstant(arg.text.to_string()),
            NumError::OutOfRange => ErrorKind::OperandOutOfRange(arg.text.to_string(), 16),
        }
        .at(arg.line)
    })
}

/// Phase 2: encode every pending instruction into the ROM image.
pub fn emit(prog: &Program) -> Result<Rom, Error> {
    let mut rom = Rom::new();
    for inst in &prog.insts {
        let word = encode::encode(inst.op, &inst.args, &prog.labels, inst.addr)
            .map_err(|k| k.at(inst.line))?;
        rom.write_word(inst.addr, word).map_err(|k| k.at(inst.line))?;
    }
    Ok(rom)
}

/// Assemble a whole source file. Case folding happens here so the rest of
/// the pipeline only ever sees uppercase text.
pub fn assemble(src: &str) -> Result<Rom, Error> {
    let upper = src.to_ascii_uppercase();
    let prog = scan(&upper)?;
    emit(&prog)
}
