//! Signal access on `embedded-can` frames.

use embedded_can::Frame;

use crate::error::{Error, Result, log_rejection};
use crate::signal::SignalDefinition;

/// Decode a signal from the payload of a CAN frame.
///
/// Remote frames carry no payload, so any signal is out of bounds for them.
pub fn decode_frame<F: Frame>(frame: &F, signal: &SignalDefinition) -> Result<f64> {
    signal.decode(frame.data())
}

/// Build a copy of `frame` with `signal` set to `physical`.
///
/// The identifier and every other payload bit are kept.
pub fn encode_frame<F: Frame>(frame: &F, signal: &SignalDefinition, physical: f64) -> Result<F> {
    let mut payload = frame.data().to_vec();
    signal.encode(&mut payload, physical)?;

    F::new(frame.id(), &payload).ok_or_else(|| {
        let err = Error::FrameConstruction;
        log_rejection("frame payload", &err);
        err
    })
}
