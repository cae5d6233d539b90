/// Why a token failed to parse as a numeric literal.
///
/// `NotANumber` is not fatal by itself: in constant-or-label positions the
/// caller falls back to a symbol table lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumError {
    NotANumber,
    OutOfRange,
}

/// Parse a literal into the low `bits` of an instruction field.
///
/// Syntax: optional `+`/`-`, then `0X` hex, `0B` binary, or plain decimal.
/// The source is uppercased before lexing, so prefixes and hex digits only
/// need their uppercase forms.
pub fn parse_number(text: &str, bits: u32) -> Result<u16, NumError> {
    let (negative, rest) = match text.as_bytes().first() {
        Some(b'+') => (false, &text[1..]),
        Some(b'-') => (true, &text[1..]),
        _ => (false, text),
    };

    let (base, digits) = if let Some(d) = rest.strip_prefix("0X") {
        (16, d)
    } else if let Some(d) = rest.strip_prefix("0B") {
        (2, d)
    } else {
        (10, rest)
    };

    if digits.is_empty() {
        return Err(NumError::NotANumber);
    }
    let valid = digits.bytes().all(|c| match base {
        16 => c.is_ascii_digit() || (b'A'..=b'F').contains(&c),
        2 => c == b'0' || c == b'1',
        _ => c.is_ascii_digit(),
    });
    if !valid {
        return Err(NumError::NotANumber);
    }

    // digits are pre-validated, so the only failure left is overflow
    let magnitude = i64::from_str_radix(digits, base).map_err(|_| NumError::OutOfRange)?;
    let value = if negative { -magnitude } else { magnitude };

    range_check(value, bits)
}

/// Check that `value` fits a `bits`-wide field and mask it down to it.
///
/// Every bit above the field must equal the sign: all zero (which admits
/// the field's full unsigned range for non-negative values) or all one for
/// negatives. Shared with branch displacements after label resolution.
pub fn range_check(value: i64, bits: u32) -> Result<u16, NumError> {
    let high = -1i64 << bits;
    let upper = value & high;
    if upper != 0 && upper != high {
        return Err(NumError::OutOfRange);
    }
    Ok((value & !high) as u16)
}
