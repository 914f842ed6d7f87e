//! DBC to codec type conversion utilities.
//!
//! This module turns already-parsed [`dbc_rs`] signals into
//! [`SignalDefinition`]s. Parsing the DBC text stays with `dbc-rs`; this side
//! only maps the resolved layout parameters.
//!
//! # Start bits
//!
//! DBC files name the *most* significant bit of a Motorola signal, while this
//! codec addresses every field by its least significant bit. Big-endian
//! signals are converted with [`motorola_msb_to_lsb`]; Intel signals are
//! taken as-is.
//!
//! # Example
//!
//! ```ignore
//! use canbits_rs::SignalDefinition;
//!
//! let dbc = dbc_rs::Dbc::parse(dbc_content)?;
//! let msg = dbc.messages().find_by_id(256).unwrap();
//! let rpm = SignalDefinition::from_dbc_signal(msg.signals().find("RPM").unwrap())?;
//! let value = rpm.decode(&payload)?;
//! ```

use alloc::string::String;

use crate::bits::motorola_msb_to_lsb;
use crate::error::{Error, Result};
use crate::signal::SignalDefinition;
use crate::types::ByteOrder;

impl From<dbc_rs::ByteOrder> for ByteOrder {
    fn from(order: dbc_rs::ByteOrder) -> Self {
        match order {
            dbc_rs::ByteOrder::LittleEndian => ByteOrder::LittleEndian,
            dbc_rs::ByteOrder::BigEndian => ByteOrder::BigEndian,
        }
    }
}

impl SignalDefinition {
    /// Create a SignalDefinition from a dbc-rs Signal.
    ///
    /// Fails with [`Error::InvalidLength`] for a zero-length signal, whose
    /// Motorola start bit cannot be converted.
    pub fn from_dbc_signal(signal: &dbc_rs::Signal) -> Result<Self> {
        let byte_order = ByteOrder::from(signal.byte_order());
        let bit_length = signal.length();

        let start_bit = match byte_order {
            ByteOrder::LittleEndian => signal.start_bit(),
            ByteOrder::BigEndian => motorola_msb_to_lsb(signal.start_bit(), bit_length)
                .ok_or(Error::InvalidLength { length: bit_length })?,
        };

        Ok(Self {
            name: String::from(signal.name()),
            start_bit,
            bit_length,
            scale: signal.factor(),
            offset: signal.offset(),
            is_signed: !signal.is_unsigned(),
            byte_order,
            unit: signal.unit().map(String::from),
        })
    }
}
