//! CAN bus integration.
//!
//! This module connects the codec to the types of the wider CAN ecosystem:
//! - [`embedded-can`](https://crates.io/crates/embedded-can) frames, read and
//!   rebuilt through [`decode_frame`] and [`encode_frame`] (feature `can`)
//! - [`dbc-rs`](https://crates.io/crates/dbc-rs) signals, converted into
//!   [`SignalDefinition`](crate::SignalDefinition)s by [`dbc_compat`] (feature `dbc`)
//!
//! # Example
//!
//! ```ignore
//! use canbits_rs::SignalDefinition;
//! use canbits_rs::can::{decode_frame, encode_frame};
//!
//! let rpm = SignalDefinition::new("RPM", 0, 16).with_scale(0.25);
//! let frame = encode_frame(&received, &rpm, 2000.0)?;
//! assert_eq!(decode_frame(&frame, &rpm)?, 2000.0);
//! ```

#[cfg(feature = "can")]
mod frame;

#[cfg(feature = "dbc")]
pub mod dbc_compat;

#[cfg(feature = "can")]
pub use frame::{decode_frame, encode_frame};
