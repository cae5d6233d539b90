use arch::{MAX_INSTR, MAX_LABELS, ROM_SIZE};
use color_print::cprintln;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    #[error("malformed constant: `{0}`")]
    MalformedConstant(String),

    #[error("operand out of range: `{0}` does not fit in {1} bits")]
    OperandOutOfRange(String, u32),

    #[error("unknown label: `{0}`")]
    UnknownLabel(String),

    #[error("duplicate label: `{0}`")]
    DuplicateLabel(String),

    #[error("not a valid register: `{0}`")]
    InvalidRegister(String),

    #[error("`{0}` expects {1} operands, found {2}")]
    OperandCountMismatch(&'static str, usize, usize),

    #[error("too many instructions: the ROM holds at most {MAX_INSTR}")]
    TooManyInstructions,

    #[error("too many labels: at most {MAX_LABELS}")]
    TooManyLabels,

    #[error("instruction address {0:#06X} is not word-aligned")]
    MisalignedAddress(u16),

    #[error("instruction address {0:#06X} is outside the {ROM_SIZE}-byte ROM")]
    AddressOutOfRange(u16),
}

impl ErrorKind {
    pub fn at(self, line: u32) -> Error {
        Error { line, kind: self }
    }
}

/// An assembly error tagged with its 1-based source line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}: {kind}")]
pub struct Error {
    pub line: u32,
    pub kind: ErrorKind,
}

impl Error {
    /// Print the error with a diagnostic excerpt of the offending line.
    pub fn print_diag(&self, path: &str, src: &str) {
        cprintln!("<red,bold>error</>: {}", self.kind);
        cprintln!("     <blue>--></> <underline>{}:{}</>", path, self.line);
        cprintln!("      <blue>|</>");
        let text = src.lines().nth(self.line as usize - 1).unwrap_or("");
        cprintln!(" <blue>{:>4} |</> {}", self.line, text);
        cprintln!("      <blue>|</>");
    }
}
