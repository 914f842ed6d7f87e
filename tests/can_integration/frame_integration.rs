//! Encoding into and decoding from `embedded-can` frames

use canbits_rs::can::{decode_frame, encode_frame};
use canbits_rs::{Error, SignalDefinition};
use embedded_can::Frame;

use super::{FakeVehicleEcu, MockCanFrame, VehicleSignals, assert_close};

#[test]
fn encode_keeps_id_and_length() {
    let frame = MockCanFrame::new_standard(0x123, &[0xFF, 0xFF, 0xFF, 0xFF]);
    let sig = SignalDefinition::new("Low", 4, 8);

    let updated = encode_frame(&frame, &sig, 0.0).unwrap();
    assert_eq!(updated.raw_id(), 0x123);
    assert_eq!(updated.dlc(), 4);
    assert_eq!(updated.data(), &[0x0F, 0xF0, 0xFF, 0xFF]);
    // The source frame is untouched
    assert_eq!(frame.data(), &[0xFF, 0xFF, 0xFF, 0xFF]);
}

#[test]
fn updates_preserve_other_signals() {
    let signals = VehicleSignals::new();
    let ecu = FakeVehicleEcu::new();
    let engine = ecu.generate_engine_frame().unwrap();

    let engine = encode_frame(&engine, &signals.rpm, 6500.0).unwrap();
    assert_eq!(decode_frame(&engine, &signals.rpm), Ok(6500.0));
    assert_eq!(decode_frame(&engine, &signals.coolant_temp), Ok(20.0));
    assert_eq!(decode_frame(&engine, &signals.throttle), Ok(50.0));
}

#[test]
fn chassis_round_trip() {
    let signals = VehicleSignals::new();
    let mut ecu = FakeVehicleEcu::new();

    for (angle, yaw) in [(-780.0, -100.0), (0.0, 0.0), (45.5, 3.25), (780.0, 104.0)] {
        ecu.steering_angle = angle;
        ecu.yaw_rate = yaw;
        let frame = ecu.generate_chassis_frame().unwrap();

        assert_close(
            decode_frame(&frame, &signals.steering_angle).unwrap(),
            angle,
            0.1 + 1e-9,
        );
        assert_close(
            decode_frame(&frame, &signals.yaw_rate).unwrap(),
            yaw,
            0.05 + 1e-9,
        );
    }
}

#[test]
fn short_frame_is_rejected() {
    let frame = MockCanFrame::new_standard(0x100, &[0x40, 0x1F]);
    let signals = VehicleSignals::new();

    assert_eq!(decode_frame(&frame, &signals.rpm), Ok(2000.0));
    assert!(matches!(
        decode_frame(&frame, &signals.coolant_temp),
        Err(Error::OutOfBounds { frame_len: 2, .. })
    ));
    assert!(matches!(
        encode_frame(&frame, &signals.throttle, 10.0),
        Err(Error::OutOfBounds { .. })
    ));
}

#[test]
fn zero_scale_is_rejected() {
    let frame = MockCanFrame::new_standard(0x100, &[0; 8]);
    let sig = SignalDefinition::new("Broken", 0, 8).with_scale(0.0);

    assert_eq!(
        encode_frame(&frame, &sig, 1.0).unwrap_err(),
        Error::InvalidFactor(0.0)
    );
}

#[test]
fn extended_id_is_kept() {
    let frame = MockCanFrame::new_extended(0x18FE_F100, &[0; 8]);
    let sig = SignalDefinition::new("Load", 8, 8).with_scale(0.5);

    let updated = encode_frame(&frame, &sig, 42.5).unwrap();
    assert!(updated.is_extended());
    assert_eq!(updated.raw_id(), 0x18FE_F100);
    assert_eq!(updated.data()[1], 85);
    assert_eq!(decode_frame(&updated, &sig), Ok(42.5));
}

#[test]
fn remote_frame_has_no_signal_bits() {
    let frame =
        MockCanFrame::new_remote(embedded_can::StandardId::new(0x100).unwrap(), 8).unwrap();
    let signals = VehicleSignals::new();

    assert!(matches!(
        decode_frame(&frame, &signals.rpm),
        Err(Error::OutOfBounds { frame_len: 0, .. })
    ));
}
