pub mod op;
pub mod reg;

/// Boot ROM size in bytes.
pub const ROM_SIZE: usize = 1024;

/// Every instruction is one 16-bit word.
pub const MAX_INSTR: usize = ROM_SIZE / 2;

pub const MAX_LABELS: usize = 512;
