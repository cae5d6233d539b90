use num_enum::{FromPrimitive, IntoPrimitive};
use strum::{Display, EnumString};

/// The BX16 register file: ten general-purpose registers, named `R0`..`R9`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    FromPrimitive,
    IntoPrimitive,
    EnumString,
    Display,
)]
#[repr(u8)]
pub enum Reg {
    #[default]
    R0,
    R1,
    R2,
    R3,
    R4,
    R5,
    R6,
    R7,
    R8,
    R9,
}

impl Reg {
    /// Exact match on the register name: `R` followed by a single digit.
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_ascii_uppercase().parse::<Self>() {
            Ok(r) => Ok(r),
            Err(_) => Err(format!("Unknown reg name: {s}")),
        }
    }

    /// Register number as it appears in an instruction field.
    pub fn field(self) -> u16 {
        u8::from(self) as u16
    }
}
