//! Error types for signal codec operations.
//!
//! This module defines the [`Error`] enum which represents every condition the
//! codec refuses to act on: field geometries that do not fit the frame, bad
//! lengths, and numeric parameters that cannot be inverted.
//!
//! # Example
//!
//! ```
//! use canbits_rs::{ByteOrder, Error, extract_bits};
//!
//! let frame = [0u8; 8];
//! match extract_bits(&frame, 60, 8, ByteOrder::LittleEndian, false) {
//!     Err(Error::OutOfBounds { frame_len, .. }) => assert_eq!(frame_len, 8),
//!     other => panic!("unexpected result: {other:?}"),
//! }
//! ```

use core::fmt;

use crate::types::ByteOrder;

/// Errors that can occur while extracting, storing or converting a signal.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// The field length is zero or wider than the 64-bit register.
    InvalidLength {
        /// The rejected length in bits
        length: u16,
    },

    /// The field geometry reaches outside the frame buffer.
    ///
    /// For little-endian fields this means `start_bit + length` exceeds the
    /// frame size in bits. For big-endian fields the field would need bytes
    /// before byte 0.
    OutOfBounds {
        /// Start bit of the rejected field
        start_bit: u16,
        /// Length of the rejected field
        length: u16,
        /// Byte order the field was resolved with
        byte_order: ByteOrder,
        /// Size of the frame buffer in bytes
        frame_len: usize,
    },

    /// A Q-format field declares more fractional bits than it has bits.
    InvalidFloatLength {
        /// Total field length
        length: u16,
        /// Requested fractional bit count
        float_length: u16,
    },

    /// The operation does not support the requested byte order.
    ///
    /// Q-format fields are only defined for little-endian layouts.
    UnsupportedByteOrder(ByteOrder),

    /// The scale factor is zero or not finite, so the affine transform
    /// cannot be inverted.
    InvalidFactor(f64),

    /// The physical value to encode is NaN or infinite.
    NonFiniteValue(f64),

    /// A negative value was given for an unsigned Q-format field.
    NegativeUnsigned(f64),

    /// The CAN frame implementation refused to build a frame from the
    /// encoded payload.
    ///
    /// Only available with the `can` feature.
    #[cfg(feature = "can")]
    FrameConstruction,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidLength { length } => {
                write!(f, "Invalid field length: expected 1..=64 bits, got {length}")
            }
            Error::OutOfBounds {
                start_bit,
                length,
                byte_order,
                frame_len,
            } => write!(
                f,
                "Field out of bounds: {length} bits at start bit {start_bit} ({byte_order}) do not fit a {frame_len}-byte frame"
            ),
            Error::InvalidFloatLength {
                length,
                float_length,
            } => write!(
                f,
                "Invalid Q-format: {float_length} fractional bits exceed the {length}-bit field"
            ),
            Error::UnsupportedByteOrder(order) => {
                write!(f, "Unsupported byte order for this operation: {order}")
            }
            Error::InvalidFactor(factor) => {
                write!(f, "Invalid scale factor {factor}: must be finite and non-zero")
            }
            Error::NonFiniteValue(value) => write!(f, "Cannot encode non-finite value {value}"),
            Error::NegativeUnsigned(value) => {
                write!(f, "Cannot encode negative value {value} into an unsigned field")
            }
            #[cfg(feature = "can")]
            Error::FrameConstruction => write!(f, "CAN frame construction failed"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Records a rejected input before the error is returned to the caller.
#[inline]
pub(crate) fn log_rejection(context: &str, err: &Error) {
    #[cfg(feature = "log")]
    log::debug!("rejected {context}: {err}");
    #[cfg(not(feature = "log"))]
    let _ = (context, err);
}

/// A specialized Result type for codec operations.
///
/// This is defined as `core::result::Result<T, Error>` for convenience.
pub type Result<T> = core::result::Result<T, Error>;
