//! Fixed-point (Q-format) signal conversion.
//!
//! A Q-format field of `length` bits is split in two sub-fields:
//!
//! - the low `float_length` bits hold the fractional magnitude, unsigned,
//!   scaled by `2^-float_length`
//! - the remaining `length - float_length` bits above them hold the integer
//!   part, signed or unsigned
//!
//! The sign lives entirely in the integer part, so the decoded value is
//! `sign(int) * (|int| + frac / 2^float_length)`. A negative value whose integer
//! part is zero (e.g. `-0.5`) therefore loses its sign; callers must not rely on
//! encoding such values. A field with `float_length == length` has no integer
//! part and is read as a plain scaled integer instead.
//!
//! Unsigned fields hold non-negative values only. Values that round past the
//! top (or bottom) of a field saturate at its largest representable magnitude.
//!
//! Only little-endian layouts are supported.
//!
//! # Example
//!
//! ```
//! use canbits_rs::{ByteOrder, decode_q, encode_q};
//!
//! let mut frame = [0u8; 8];
//! encode_q(&mut frame, -8.25, 0, 16, 8, ByteOrder::LittleEndian, true)?;
//! assert_eq!(decode_q(&frame, 0, 16, 8, ByteOrder::LittleEndian, true)?, -8.25);
//! # Ok::<(), canbits_rs::Error>(())
//! ```

use crate::affine::to_physical;
use crate::bits::{FieldSpan, extract_bits, mask, store_bits};
use crate::error::{Error, Result, log_rejection};
use crate::types::ByteOrder;

/// 2^64, the scale of a 64-bit purely fractional field.
const TWO_POW_64: f64 = 18_446_744_073_709_551_616.0;

/// Scale factor `2^float_length`.
#[inline]
fn q_scale(float_length: u16) -> f64 {
    if float_length >= 64 {
        TWO_POW_64
    } else {
        (1u64 << float_length) as f64
    }
}

/// Rounds a non-negative value to the nearest integer, halves away from zero.
#[inline]
fn round_magnitude(value: f64) -> u64 {
    (value + 0.5) as u64
}

/// Validated Q-format geometry.
#[derive(Debug, Clone, Copy)]
struct QLayout {
    start_bit: u16,
    float_length: u16,
    int_start: u16,
    int_length: u16,
}

impl QLayout {
    fn resolve(
        frame_len: usize,
        start_bit: u16,
        length: u16,
        float_length: u16,
        byte_order: ByteOrder,
    ) -> Result<Self> {
        Self::try_resolve(frame_len, start_bit, length, float_length, byte_order)
            .inspect_err(|err| log_rejection("Q-format layout", err))
    }

    fn try_resolve(
        frame_len: usize,
        start_bit: u16,
        length: u16,
        float_length: u16,
        byte_order: ByteOrder,
    ) -> Result<Self> {
        if byte_order.is_big_endian() {
            return Err(Error::UnsupportedByteOrder(byte_order));
        }
        FieldSpan::resolve(frame_len, start_bit, length, byte_order)?;
        if float_length > length {
            return Err(Error::InvalidFloatLength {
                length,
                float_length,
            });
        }

        let int_start = start_bit
            .checked_add(float_length)
            .ok_or(Error::OutOfBounds {
                start_bit,
                length,
                byte_order,
                frame_len,
            })?;

        Ok(Self {
            start_bit,
            float_length,
            int_start,
            int_length: length - float_length,
        })
    }
}

/// Decode a Q-format field.
pub fn decode_q(
    frame: &[u8],
    start_bit: u16,
    length: u16,
    float_length: u16,
    byte_order: ByteOrder,
    is_signed: bool,
) -> Result<f64> {
    let layout = QLayout::resolve(frame.len(), start_bit, length, float_length, byte_order)?;
    let scale = q_scale(float_length);

    if layout.int_length == 0 {
        let raw = extract_bits(frame, start_bit, length, ByteOrder::LittleEndian, is_signed)?;
        return Ok(to_physical(raw, is_signed, 1.0, 0.0) / scale);
    }

    let int_raw = extract_bits(
        frame,
        layout.int_start,
        layout.int_length,
        ByteOrder::LittleEndian,
        is_signed,
    )?;
    let int_part = to_physical(int_raw, is_signed, 1.0, 0.0);
    if layout.float_length == 0 {
        return Ok(int_part);
    }

    let frac_raw = extract_bits(
        frame,
        layout.start_bit,
        layout.float_length,
        ByteOrder::LittleEndian,
        false,
    )?;
    let frac_part = frac_raw as f64 / scale;

    Ok(if int_part < 0.0 {
        int_part - frac_part
    } else {
        int_part + frac_part
    })
}

/// Largest magnitude an integer sub-field of `bits` bits can hold for a value
/// of the given sign. `bits` must be in `1..=64`.
#[inline]
fn magnitude_limit(bits: u16, is_signed: bool, negative: bool) -> u64 {
    match (is_signed, negative) {
        (false, _) => mask(bits),
        (true, false) => mask(bits - 1),
        (true, true) => 1u64 << (bits - 1),
    }
}

/// Encode a value into a Q-format field.
///
/// The integer part is truncated toward zero and written with its sign; the
/// fractional magnitude is rounded to the nearest step. A fraction that
/// rounds up to a whole unit is carried into the integer part, unless the
/// integer part is already at its limit, in which case the field saturates at
/// the largest representable magnitude.
///
/// Unsigned fields take non-negative values only; a negative value is
/// rejected with [`Error::NegativeUnsigned`].
pub fn encode_q(
    frame: &mut [u8],
    value: f64,
    start_bit: u16,
    length: u16,
    float_length: u16,
    byte_order: ByteOrder,
    is_signed: bool,
) -> Result<()> {
    let layout = QLayout::resolve(frame.len(), start_bit, length, float_length, byte_order)?;
    if !value.is_finite() {
        let err = Error::NonFiniteValue(value);
        log_rejection("Q-format value", &err);
        return Err(err);
    }

    let negative = value < 0.0;
    if negative && !is_signed {
        let err = Error::NegativeUnsigned(value);
        log_rejection("Q-format value", &err);
        return Err(err);
    }
    let magnitude = if negative { -value } else { value };

    if layout.int_length == 0 {
        let limit = magnitude_limit(length, is_signed, negative);
        let steps = round_magnitude(magnitude * q_scale(float_length)).min(limit);
        let raw = if negative { steps.wrapping_neg() } else { steps };
        return store_bits(frame, raw, start_bit, length, ByteOrder::LittleEndian);
    }

    let mut whole = magnitude as u64;
    let mut frac = 0u64;
    if layout.float_length > 0 {
        frac = round_magnitude((magnitude - whole as f64) * q_scale(float_length));
        if frac >> layout.float_length != 0 {
            if whole < magnitude_limit(layout.int_length, is_signed, negative) {
                whole += 1;
                frac = 0;
            } else {
                frac = mask(layout.float_length);
            }
        }
    }

    let int_raw = if negative { whole.wrapping_neg() } else { whole };
    store_bits(
        frame,
        int_raw,
        layout.int_start,
        layout.int_length,
        ByteOrder::LittleEndian,
    )?;
    if layout.float_length > 0 {
        store_bits(
            frame,
            frac,
            layout.start_bit,
            layout.float_length,
            ByteOrder::LittleEndian,
        )?;
    }

    Ok(())
}

/// A Q-format field descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QFormat {
    /// Start bit of the whole field (the fractional part's LSB)
    pub start_bit: u16,
    /// Total field length in bits (1-64)
    pub length: u16,
    /// Number of fractional bits (0..=length)
    pub float_length: u16,
    /// Whether the integer part is signed
    pub is_signed: bool,
    /// Byte order; only little-endian can be decoded
    pub byte_order: ByteOrder,
}

impl QFormat {
    /// Create an unsigned little-endian Q-format descriptor.
    pub fn new(start_bit: u16, length: u16, float_length: u16) -> Self {
        Self {
            start_bit,
            length,
            float_length,
            is_signed: false,
            byte_order: ByteOrder::LittleEndian,
        }
    }

    /// Set whether the integer part is signed.
    pub fn signed(mut self) -> Self {
        self.is_signed = true;
        self
    }

    /// Set the byte order declared by the frame layout.
    pub fn with_byte_order(mut self, byte_order: ByteOrder) -> Self {
        self.byte_order = byte_order;
        self
    }

    /// Smallest representable step, `2^-float_length`.
    pub fn resolution(&self) -> f64 {
        1.0 / q_scale(self.float_length)
    }

    /// Decode this field from a frame.
    pub fn decode(&self, frame: &[u8]) -> Result<f64> {
        decode_q(
            frame,
            self.start_bit,
            self.length,
            self.float_length,
            self.byte_order,
            self.is_signed,
        )
    }

    /// Encode a value into this field.
    pub fn encode(&self, frame: &mut [u8], value: f64) -> Result<()> {
        encode_q(
            frame,
            value,
            self.start_bit,
            self.length,
            self.float_length,
            self.byte_order,
            self.is_signed,
        )
    }
}
