//! Bit-field engine.
//!
//! Moves an N-bit field (1..=64) between a frame buffer and a 64-bit register.
//! Both byte orders address a field by the index of its least significant bit,
//! `start_bit = byte * 8 + bit_in_byte`:
//!
//! - **Little-endian (Intel)**: the field occupies bits `start_bit..start_bit + length`
//!   and continues into the *following* bytes, each contributing higher-order bits.
//! - **Big-endian (Motorola)**: the field fills the start byte from `bit_in_byte`
//!   up to bit 7, then continues at bit 0 of the *preceding* byte.
//!
//! Every geometry is validated against the buffer before any byte is touched.
//!
//! # Example
//!
//! ```
//! use canbits_rs::{ByteOrder, extract_bits, store_bits};
//!
//! let mut frame = [0u8; 8];
//! store_bits(&mut frame, (-144i64) as u64, 24, 10, ByteOrder::LittleEndian)?;
//! let raw = extract_bits(&frame, 24, 10, ByteOrder::LittleEndian, true)?;
//! assert_eq!(raw as i64, -144);
//! # Ok::<(), canbits_rs::Error>(())
//! ```

use crate::error::{Error, Result, log_rejection};
use crate::types::ByteOrder;

/// Widest field the engine can move, in bits.
pub const MAX_FIELD_BITS: u16 = 64;

/// Returns a mask covering the low `length` bits.
///
/// A length of 64 or more yields `u64::MAX`.
#[inline]
pub const fn mask(length: u16) -> u64 {
    if length >= MAX_FIELD_BITS {
        u64::MAX
    } else {
        (1u64 << length) - 1
    }
}

/// Sign-extends the low `length` bits of `value` to a full `i64`.
///
/// Bits above `length` are ignored. A zero-width field has no bits and
/// extends to 0; lengths of 64 or more keep the whole register.
#[inline]
pub const fn sign_extend(value: u64, length: u16) -> i64 {
    if length == 0 {
        return 0;
    }
    let length = if length > MAX_FIELD_BITS { MAX_FIELD_BITS } else { length };
    let value = value & mask(length);
    let sign_bit = 1u64 << (length - 1);
    (value ^ sign_bit).wrapping_sub(sign_bit) as i64
}

/// The resolved byte range of a field inside a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpan {
    /// Byte holding the field's least significant bit
    pub start_byte: usize,
    /// Byte holding the field's most significant bit
    pub end_byte: usize,
    /// Position of the least significant bit within `start_byte`
    pub bit_in_byte: u8,
    /// Field length in bits
    pub length: u16,
    /// Traversal direction
    pub byte_order: ByteOrder,
}

impl FieldSpan {
    /// Validates a field geometry against a frame of `frame_len` bytes.
    pub fn resolve(
        frame_len: usize,
        start_bit: u16,
        length: u16,
        byte_order: ByteOrder,
    ) -> Result<Self> {
        Self::try_resolve(frame_len, start_bit, length, byte_order)
            .inspect_err(|err| log_rejection("field geometry", err))
    }

    fn try_resolve(
        frame_len: usize,
        start_bit: u16,
        length: u16,
        byte_order: ByteOrder,
    ) -> Result<Self> {
        if length == 0 || length > MAX_FIELD_BITS {
            return Err(Error::InvalidLength { length });
        }

        let out_of_bounds = Error::OutOfBounds {
            start_bit,
            length,
            byte_order,
            frame_len,
        };

        let start_byte = usize::from(start_bit / 8);
        let bit_in_byte = (start_bit % 8) as u8;
        if start_byte >= frame_len {
            return Err(out_of_bounds);
        }

        let length_bits = usize::from(length);
        let end_byte = match byte_order {
            ByteOrder::LittleEndian => {
                let end_byte = (usize::from(start_bit) + length_bits - 1) / 8;
                if end_byte >= frame_len {
                    return Err(out_of_bounds);
                }
                end_byte
            }
            ByteOrder::BigEndian => {
                // Bits available from the start bit down to bit 0 of byte 0.
                let available = start_byte * 8 + 8 - usize::from(bit_in_byte);
                match available.checked_sub(length_bits) {
                    Some(rest) => rest / 8,
                    None => return Err(out_of_bounds),
                }
            }
        };

        Ok(Self {
            start_byte,
            end_byte,
            bit_in_byte,
            length,
            byte_order,
        })
    }

    /// Number of bytes the field touches.
    #[inline]
    pub fn byte_count(&self) -> usize {
        self.start_byte.abs_diff(self.end_byte) + 1
    }

    /// Iterates over the per-byte pieces of the field, least significant first.
    pub fn chunks(&self) -> Chunks {
        Chunks {
            span: *self,
            step: 0,
            done_bits: 0,
        }
    }
}

/// One byte's share of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteChunk {
    /// Index of the byte in the frame
    pub index: usize,
    /// Lowest bit of the byte occupied by the field
    pub bit: u8,
    /// Number of field bits held by this byte
    pub width: u8,
    /// Position of this piece within the value register
    pub shift: u8,
}

impl ByteChunk {
    /// Mask of the occupied bits, positioned within the byte.
    #[inline]
    pub fn byte_mask(&self) -> u8 {
        (mask(u16::from(self.width)) as u8) << self.bit
    }
}

/// Iterator over the [`ByteChunk`]s of a [`FieldSpan`].
#[derive(Debug, Clone)]
pub struct Chunks {
    span: FieldSpan,
    step: usize,
    done_bits: u16,
}

impl Iterator for Chunks {
    type Item = ByteChunk;

    fn next(&mut self) -> Option<ByteChunk> {
        let remaining = self.span.length - self.done_bits;
        if remaining == 0 {
            return None;
        }

        let index = match self.span.byte_order {
            ByteOrder::LittleEndian => self.span.start_byte + self.step,
            ByteOrder::BigEndian => self.span.start_byte - self.step,
        };
        let bit = if self.step == 0 {
            self.span.bit_in_byte
        } else {
            0
        };
        let width = remaining.min(8 - u16::from(bit));

        let chunk = ByteChunk {
            index,
            bit,
            width: width as u8,
            shift: self.done_bits as u8,
        };
        self.step += 1;
        self.done_bits += width;
        Some(chunk)
    }
}

/// Extracts a field as a right-aligned raw register.
///
/// With `is_signed` the result is the two's-complement sign extension of the
/// field to 64 bits (reinterpret with `as i64`).
pub fn extract_bits(
    frame: &[u8],
    start_bit: u16,
    length: u16,
    byte_order: ByteOrder,
    is_signed: bool,
) -> Result<u64> {
    let span = FieldSpan::resolve(frame.len(), start_bit, length, byte_order)?;

    let mut value = 0u64;
    for chunk in span.chunks() {
        let piece = u64::from(frame[chunk.index] >> chunk.bit) & mask(u16::from(chunk.width));
        value |= piece << chunk.shift;
    }
    let value = value & mask(length);

    if is_signed {
        Ok(sign_extend(value, length) as u64)
    } else {
        Ok(value)
    }
}

/// Stores the low `length` bits of `value` into a field.
///
/// Bits outside the field are preserved; bits inside are cleared before the
/// new value is written, so the frame need not be zeroed. Signed values are
/// passed as their two's-complement bit pattern (`value as u64`).
pub fn store_bits(
    frame: &mut [u8],
    value: u64,
    start_bit: u16,
    length: u16,
    byte_order: ByteOrder,
) -> Result<()> {
    let span = FieldSpan::resolve(frame.len(), start_bit, length, byte_order)?;
    let value = value & mask(length);

    for chunk in span.chunks() {
        let byte_mask = chunk.byte_mask();
        let piece = ((value >> chunk.shift) << chunk.bit) as u8;
        let byte = &mut frame[chunk.index];
        *byte = (*byte & !byte_mask) | (piece & byte_mask);
    }

    Ok(())
}

// =============================================================================
// Motorola start-bit conventions
// =============================================================================

/// Position of `bit` in MSB-first stream order (byte 0 bit 7 is 0).
#[inline]
const fn sawtooth(bit: u32) -> u32 {
    (bit / 8) * 8 + 7 - bit % 8
}

/// Converts a Motorola start bit given as the field's MSB (DBC files) to the
/// LSB start bit used by this engine.
///
/// Returns `None` for a zero length or when the result does not fit a `u16`.
pub const fn motorola_msb_to_lsb(msb_start: u16, length: u16) -> Option<u16> {
    if length == 0 {
        return None;
    }
    let lsb = sawtooth(sawtooth(msb_start as u32) + length as u32 - 1);
    if lsb > u16::MAX as u32 {
        None
    } else {
        Some(lsb as u16)
    }
}

/// Converts an LSB Motorola start bit back to the MSB form used by DBC files.
///
/// Returns `None` for a zero length or when the field would start before
/// byte 0.
pub const fn motorola_lsb_to_msb(lsb_start: u16, length: u16) -> Option<u16> {
    if length == 0 {
        return None;
    }
    let lsb = sawtooth(lsb_start as u32);
    if lsb + 1 < length as u32 {
        return None;
    }
    Some(sawtooth(lsb + 1 - length as u32) as u16)
}
