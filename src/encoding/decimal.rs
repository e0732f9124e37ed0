//! MySQL binary decimals.
//!
//! A decimal of precision `p` and scale `f` is stored as `p - f` integer
//! digits and `f` fractional digits, each side split into 9-digit words of 4
//! bytes. The leftover digits on the far side of each part are packed into
//! the fewest bytes that hold them (see `DIG_TO_BYTES`). All words are
//! big-endian. Negative values have every byte inverted, and the sign bit of
//! the first byte is flipped so that the encoding sorts bytewise.

use core::fmt;
use core::str::FromStr;

use crate::errors::DecodeError;

/// Digits packed into a full 4-byte word.
const DIGITS_PER_WORD: usize = 9;
/// Bytes needed for a partial word of `n` digits.
const DIG_TO_BYTES: [usize; 10] = [0, 1, 1, 2, 2, 3, 3, 4, 4, 4];
/// Largest precision the target dialect accepts.
pub const MAX_PRECISION: usize = 65;
/// Largest scale the target dialect accepts.
pub const MAX_SCALE: usize = 30;

/// An exact decimal number kept as its digit strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Decimal {
    negative: bool,
    /// Integer digits without leading zeros.
    int_digits: String,
    /// Fractional digits, trailing zeros kept: they carry the scale.
    frac_digits: String,
}

impl Decimal {
    /// Returns the declared precision: total number of digits.
    #[must_use]
    pub fn precision(&self) -> usize {
        (self.int_digits.len() + self.frac_digits.len()).max(1)
    }

    /// Returns the declared scale: number of fractional digits.
    #[must_use]
    pub fn scale(&self) -> usize {
        self.frac_digits.len()
    }

    fn is_zero(&self) -> bool {
        self.int_digits.bytes().chain(self.frac_digits.bytes()).all(|b| b == b'0')
    }

    fn new(negative: bool, int_digits: &str, frac_digits: &str) -> Self {
        let mut decimal = Self {
            negative,
            int_digits: int_digits.trim_start_matches('0').to_owned(),
            frac_digits: frac_digits.to_owned(),
        };
        if decimal.is_zero() {
            decimal.negative = false;
        }
        decimal
    }
}

impl FromStr for Decimal {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (negative, unsigned) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };
        let (int_digits, frac_digits) = unsigned.split_once('.').unwrap_or((unsigned, ""));
        if int_digits.is_empty() && frac_digits.is_empty() {
            return Err(DecodeError::InvalidDecimal("no digits"));
        }
        if !int_digits.bytes().chain(frac_digits.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(DecodeError::InvalidDecimal("non-digit character"));
        }
        let decimal = Self::new(negative, int_digits, frac_digits);
        if decimal.precision() > MAX_PRECISION {
            return Err(DecodeError::InvalidDecimal("precision out of range"));
        }
        if decimal.scale() > MAX_SCALE {
            return Err(DecodeError::InvalidDecimal("scale out of range"));
        }
        Ok(decimal)
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            f.write_str("-")?;
        }
        if self.int_digits.is_empty() {
            f.write_str("0")?;
        } else {
            f.write_str(&self.int_digits)?;
        }
        if !self.frac_digits.is_empty() {
            write!(f, ".{}", self.frac_digits)?;
        }
        Ok(())
    }
}

/// Size in bytes of the binary form for the given precision and scale.
#[must_use]
pub fn bin_size(precision: usize, scale: usize) -> usize {
    let intg = precision - scale;
    (intg / DIGITS_PER_WORD) * 4
        + DIG_TO_BYTES[intg % DIGITS_PER_WORD]
        + (scale / DIGITS_PER_WORD) * 4
        + DIG_TO_BYTES[scale % DIGITS_PER_WORD]
}

/// Reads `n` big-endian bytes as one digit group holding at most `digits` digits.
fn read_group(bin: &[u8], pos: &mut usize, digits: usize) -> Result<u32, DecodeError> {
    let n = DIG_TO_BYTES[digits];
    let value = bin[*pos..*pos + n]
        .iter()
        .fold(0u32, |acc, &b| (acc << 8) | u32::from(b));
    *pos += n;
    if u64::from(value) >= 10u64.pow(u32::try_from(digits).unwrap_or(9)) {
        return Err(DecodeError::InvalidDecimal("digit group out of range"));
    }
    Ok(value)
}

/// Decode a binary decimal prefixed by its precision and scale bytes.
///
/// Returns the decimal and the number of bytes consumed.
///
/// # Errors
///
/// * `Truncated` - If the input is shorter than the declared size.
/// * `InvalidDecimal` - If precision, scale or any digit group is out of range.
pub fn decode_decimal(data: &[u8]) -> Result<(Decimal, usize), DecodeError> {
    let [precision, scale, rest @ ..] = data else {
        return Err(DecodeError::Truncated {
            expected: 2,
            remaining: data.len(),
        });
    };
    let (precision, scale) = (usize::from(*precision), usize::from(*scale));
    if precision == 0 || precision > MAX_PRECISION {
        return Err(DecodeError::InvalidDecimal("precision out of range"));
    }
    if scale > MAX_SCALE || scale > precision {
        return Err(DecodeError::InvalidDecimal("scale out of range"));
    }

    let size = bin_size(precision, scale);
    if rest.len() < size {
        return Err(DecodeError::Truncated {
            expected: size,
            remaining: rest.len(),
        });
    }
    let mut bin = rest[..size].to_vec();
    let negative = bin[0] & 0x80 == 0;
    bin[0] ^= 0x80;
    if negative {
        bin.iter_mut().for_each(|b| *b = !*b);
    }

    let intg = precision - scale;
    let mut pos = 0;
    let mut int_digits = String::with_capacity(intg);
    let leading = intg % DIGITS_PER_WORD;
    if leading > 0 {
        let group = read_group(&bin, &mut pos, leading)?;
        int_digits.push_str(&format!("{group:0leading$}"));
    }
    for _ in 0..intg / DIGITS_PER_WORD {
        let group = read_group(&bin, &mut pos, DIGITS_PER_WORD)?;
        int_digits.push_str(&format!("{group:09}"));
    }

    let mut frac_digits = String::with_capacity(scale);
    for _ in 0..scale / DIGITS_PER_WORD {
        let group = read_group(&bin, &mut pos, DIGITS_PER_WORD)?;
        frac_digits.push_str(&format!("{group:09}"));
    }
    let trailing = scale % DIGITS_PER_WORD;
    if trailing > 0 {
        let group = read_group(&bin, &mut pos, trailing)?;
        frac_digits.push_str(&format!("{group:0trailing$}"));
    }

    Ok((
        Decimal::new(negative, &int_digits, &frac_digits),
        2 + size,
    ))
}

/// Appends `digits` (at most nine) as one big-endian group.
#[allow(clippy::cast_possible_truncation)]
fn write_group(out: &mut Vec<u8>, digits: &str) {
    let value = digits
        .bytes()
        .fold(0u32, |acc, b| acc * 10 + u32::from(b - b'0'));
    let n = DIG_TO_BYTES[digits.len()];
    for i in (0..n).rev() {
        out.push((value >> (8 * i)) as u8);
    }
}

/// Append the precision byte, scale byte and binary form of `decimal`.
#[allow(clippy::cast_possible_truncation)]
pub fn encode_decimal(out: &mut Vec<u8>, decimal: &Decimal) {
    let precision = decimal.precision();
    let scale = decimal.scale();
    let intg = precision - scale;
    let int_digits = format!("{:0>intg$}", decimal.int_digits);

    let mut bin = Vec::with_capacity(bin_size(precision, scale));
    let leading = intg % DIGITS_PER_WORD;
    write_group(&mut bin, &int_digits[..leading]);
    for word in int_digits.as_bytes()[leading..].chunks(DIGITS_PER_WORD) {
        write_group(&mut bin, core::str::from_utf8(word).unwrap_or_default());
    }
    for word in decimal.frac_digits.as_bytes().chunks(DIGITS_PER_WORD) {
        write_group(&mut bin, core::str::from_utf8(word).unwrap_or_default());
    }

    if decimal.negative {
        bin.iter_mut().for_each(|b| *b = !*b);
    }
    bin[0] ^= 0x80;

    // Precision and scale are bounded by MAX_PRECISION and MAX_SCALE.
    out.push(precision as u8);
    out.push(scale as u8);
    out.extend(bin);
}
