//! Shared types used across the library.
//!
//! This module contains types that are available without any feature,
//! making them usable in both std and no_std environments.

use core::fmt;

/// Byte order (bit layout convention) of a signal within a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ByteOrder {
    /// Little-endian (Intel) byte order: the field continues into the
    /// following byte.
    #[default]
    LittleEndian,
    /// Big-endian (Motorola) byte order: the field continues into the
    /// preceding byte.
    BigEndian,
}

impl ByteOrder {
    /// Returns true for the Motorola layout.
    #[inline]
    pub const fn is_big_endian(self) -> bool {
        matches!(self, ByteOrder::BigEndian)
    }

    /// Maps a DBC-style `is_big_endian` flag to a byte order.
    #[inline]
    pub const fn from_big_endian_flag(is_big_endian: bool) -> Self {
        if is_big_endian {
            ByteOrder::BigEndian
        } else {
            ByteOrder::LittleEndian
        }
    }
}

impl fmt::Display for ByteOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ByteOrder::LittleEndian => f.write_str("little-endian"),
            ByteOrder::BigEndian => f.write_str("big-endian"),
        }
    }
}
