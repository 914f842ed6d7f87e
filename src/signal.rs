//! Named signal descriptors.
//!
//! A [`SignalDefinition`] bundles the already-resolved layout parameters of one
//! signal (position, length, byte order, signedness, factor, offset) so callers
//! can decode and encode it without passing the geometry on every call.

use alloc::string::String;

use crate::affine::{from_physical, physical_range, to_physical};
use crate::bits::{FieldSpan, extract_bits, store_bits};
use crate::error::Result;
use crate::types::ByteOrder;

/// Definition of a signal within a frame.
///
/// This follows the DBC conventions for signal definition, except that
/// big-endian signals are addressed by their least significant bit (see
/// [`crate::bits`]).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SignalDefinition {
    /// Signal name
    pub name: String,
    /// Start bit position within the frame data
    pub start_bit: u16,
    /// Number of bits for this signal (1-64)
    pub bit_length: u16,
    /// Scale factor: physical_value = raw_value * scale + offset
    pub scale: f64,
    /// Offset: physical_value = raw_value * scale + offset
    pub offset: f64,
    /// Whether the signal is signed
    pub is_signed: bool,
    /// Byte order of the signal
    pub byte_order: ByteOrder,
    /// Unit string (optional)
    #[cfg_attr(feature = "serde", serde(default))]
    pub unit: Option<String>,
}

impl SignalDefinition {
    /// Create a new unsigned little-endian signal definition with default
    /// scale (1.0) and offset (0.0).
    pub fn new(name: &str, start_bit: u16, bit_length: u16) -> Self {
        Self {
            name: String::from(name),
            start_bit,
            bit_length,
            scale: 1.0,
            offset: 0.0,
            is_signed: false,
            byte_order: ByteOrder::LittleEndian,
            unit: None,
        }
    }

    /// Set the scale factor.
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Set the offset.
    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    /// Set whether the signal is signed.
    pub fn signed(mut self) -> Self {
        self.is_signed = true;
        self
    }

    /// Set the byte order to big-endian (Motorola).
    pub fn big_endian(mut self) -> Self {
        self.byte_order = ByteOrder::BigEndian;
        self
    }

    /// Set the unit string.
    pub fn with_unit(mut self, unit: &str) -> Self {
        self.unit = Some(String::from(unit));
        self
    }

    /// Check that the signal fits a frame of `frame_len` bytes.
    pub fn validate(&self, frame_len: usize) -> Result<FieldSpan> {
        FieldSpan::resolve(frame_len, self.start_bit, self.bit_length, self.byte_order)
    }

    /// Extract the raw register (sign-extended for signed signals).
    #[inline]
    pub fn decode_raw(&self, data: &[u8]) -> Result<u64> {
        extract_bits(
            data,
            self.start_bit,
            self.bit_length,
            self.byte_order,
            self.is_signed,
        )
    }

    /// Store a raw register, keeping its low `bit_length` bits.
    #[inline]
    pub fn encode_raw(&self, data: &mut [u8], raw: u64) -> Result<()> {
        store_bits(data, raw, self.start_bit, self.bit_length, self.byte_order)
    }

    /// Extract the signal and apply scale and offset.
    pub fn decode(&self, data: &[u8]) -> Result<f64> {
        let raw = self.decode_raw(data)?;
        Ok(to_physical(raw, self.is_signed, self.scale, self.offset))
    }

    /// Convert a physical value and store it in the frame.
    pub fn encode(&self, data: &mut [u8], physical: f64) -> Result<()> {
        let raw = from_physical(physical, self.scale, self.offset)?;
        self.encode_raw(data, raw)
    }

    /// Physical range `(min, max)` this signal can represent.
    pub fn physical_range(&self) -> Result<(f64, f64)> {
        physical_range(self.bit_length, self.is_signed, self.scale, self.offset)
    }
}
