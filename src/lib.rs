#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

//! # canbits-rs
//!
//! A Rust library for packing and unpacking signals in fixed-layout binary
//! frames, as used by CAN and similar automotive/industrial buses.
//!
//! A signal is a run of 1 to 64 bits somewhere in the frame payload. This crate
//! moves such a field between the payload and a 64-bit register, and converts
//! the register to and from an engineering value.
//!
//! ## Features
//!
//! - **Bit fields**: extract and store fields in Intel (little-endian) or
//!   Motorola (big-endian) layout, with two's-complement sign extension
//! - **Affine scaling**: `physical = raw * factor + offset`, as in DBC files
//! - **Q-format**: fixed-point fields split into integer and fractional bits
//! - **Descriptors**: [`SignalDefinition`] and [`QFormat`] bundle a field's layout
//! - **Ecosystem**: `embedded-can` frames and `dbc-rs` signals (features `can`, `dbc`)
//!
//! Every field geometry is checked against the buffer; nothing is read or
//! written outside it.
//!
//! ## Quick Start
//!
//! ```
//! use canbits_rs::{ByteOrder, Result, decode_affine, encode_affine};
//!
//! fn main() -> Result<()> {
//!     let mut frame = [0u8; 8];
//!
//!     // 12-bit temperature at bit 8, 0.0625 degC per bit
//!     encode_affine(&mut frame, 80.0, 8, 12, ByteOrder::LittleEndian, 0.0625, 0.0)?;
//!     let temp = decode_affine(&frame, 8, 12, ByteOrder::LittleEndian, false, 0.0625, 0.0)?;
//!     assert_eq!(temp, 80.0);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`bits`] | Bit-field engine, masking, sign extension, start-bit conversions |
//! | [`affine`] | Factor/offset conversion |
//! | [`q_format`] | Fixed-point conversion |
//! | `signal` | Named signal descriptors (feature `alloc`) |
//! | `can` | `embedded-can` and `dbc-rs` integration (features `can`, `dbc`) |
//! | [`error`] | Error types and [`Result`] alias |
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T>`], which is an alias for
//! `core::result::Result<T, Error>`. The [`Error`] enum covers invalid field
//! geometry, unsupported byte orders and non-invertible scaling.

#[cfg(any(feature = "alloc", test))]
extern crate alloc;

pub mod affine;
pub mod bits;
pub mod error;
pub mod q_format;
pub mod types;

#[cfg(feature = "alloc")]
mod signal;

#[cfg(any(feature = "can", feature = "dbc"))]
pub mod can;

// Re-export commonly used types at the crate root
pub use affine::{decode_affine, encode_affine};
pub use bits::{extract_bits, store_bits};
pub use error::{Error, Result};
pub use q_format::{QFormat, decode_q, encode_q};
pub use types::ByteOrder;

#[cfg(feature = "alloc")]
pub use signal::SignalDefinition;
