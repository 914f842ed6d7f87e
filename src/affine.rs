//! Affine (factor/offset) signal conversion.
//!
//! DBC-style signals map a raw register to an engineering value with
//! `physical = raw * factor + offset`. Encoding inverts this and truncates
//! toward zero.

use crate::bits::{MAX_FIELD_BITS, extract_bits, mask, sign_extend, store_bits};
use crate::error::{Error, Result, log_rejection};
use crate::types::ByteOrder;

/// Apply factor and offset to a raw register.
///
/// `raw` is the register as returned by [`extract_bits`]; with `is_signed` it
/// is interpreted as a sign-extended `i64`.
#[inline]
pub fn to_physical(raw: u64, is_signed: bool, factor: f64, offset: f64) -> f64 {
    let value = if is_signed {
        raw as i64 as f64
    } else {
        raw as f64
    };
    value * factor + offset
}

/// Invert the affine transform, truncating toward zero.
///
/// The result is a raw register; negative values come back as their
/// two's-complement bit pattern.
pub fn from_physical(physical: f64, factor: f64, offset: f64) -> Result<u64> {
    if factor == 0.0 || !factor.is_finite() {
        let err = Error::InvalidFactor(factor);
        log_rejection("affine factor", &err);
        return Err(err);
    }
    if !physical.is_finite() {
        let err = Error::NonFiniteValue(physical);
        log_rejection("physical value", &err);
        return Err(err);
    }

    // Float-to-int casts truncate toward zero and saturate at the type bounds.
    let raw = (physical - offset) / factor;
    if raw < 0.0 {
        Ok(raw as i64 as u64)
    } else {
        Ok(raw as u64)
    }
}

/// Extract a field and convert it to its physical value.
pub fn decode_affine(
    frame: &[u8],
    start_bit: u16,
    length: u16,
    byte_order: ByteOrder,
    is_signed: bool,
    factor: f64,
    offset: f64,
) -> Result<f64> {
    let raw = extract_bits(frame, start_bit, length, byte_order, is_signed)?;
    Ok(to_physical(raw, is_signed, factor, offset))
}

/// Convert a physical value to its raw register and store it in a field.
///
/// Raw values wider than the field keep only their low `length` bits.
pub fn encode_affine(
    frame: &mut [u8],
    physical: f64,
    start_bit: u16,
    length: u16,
    byte_order: ByteOrder,
    factor: f64,
    offset: f64,
) -> Result<()> {
    let raw = from_physical(physical, factor, offset)?;
    store_bits(frame, raw, start_bit, length, byte_order)
}

/// Representable physical range `(min, max)` of a field with the given scale.
///
/// The bounds are swapped for negative factors so that `min <= max`.
pub fn physical_range(length: u16, is_signed: bool, factor: f64, offset: f64) -> Result<(f64, f64)> {
    if length == 0 || length > MAX_FIELD_BITS {
        return Err(Error::InvalidLength { length });
    }

    let (low, high) = if is_signed {
        let min = sign_extend(1u64 << (length - 1), length);
        let max = mask(length - 1);
        (min as f64, max as f64)
    } else {
        (0.0, mask(length) as f64)
    };

    let a = low * factor + offset;
    let b = high * factor + offset;
    Ok(if a <= b { (a, b) } else { (b, a) })
}
