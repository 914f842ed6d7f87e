//! End-to-end integration test: DBC -> SignalDefinition -> decode ECU frames

use canbits_rs::{ByteOrder, SignalDefinition};
use embedded_can::Frame;

use super::{FakeVehicleEcu, MockCanFrame, VEHICLE_DBC, VehicleSignals, assert_close};

fn dbc_signal(dbc: &dbc_rs::Dbc, id: u32, name: &str) -> SignalDefinition {
    let msg = dbc.messages().find_by_id(id).expect("message missing");
    let signal = msg.signals().find(name).expect("signal missing");
    SignalDefinition::from_dbc_signal(signal).expect("signal conversion failed")
}

#[test]
fn every_dbc_signal_converts() {
    let dbc = dbc_rs::Dbc::parse(VEHICLE_DBC).expect("Failed to parse DBC");

    let mut converted = 0;
    for msg in dbc.messages().iter() {
        for signal in msg.signals().iter() {
            let def = SignalDefinition::from_dbc_signal(signal).unwrap();
            assert!(
                def.validate(usize::from(msg.dlc())).is_ok(),
                "{} does not fit {}",
                def.name,
                msg.name()
            );
            converted += 1;
        }
    }
    assert_eq!(converted, 7);
}

#[test]
fn dbc_layout_matches_hand_written_layout() {
    let dbc = dbc_rs::Dbc::parse(VEHICLE_DBC).expect("Failed to parse DBC");
    let expected = VehicleSignals::new();

    let pairs = [
        (256, &expected.rpm),
        (256, &expected.coolant_temp),
        (256, &expected.throttle),
        (384, &expected.steering_angle),
        (384, &expected.yaw_rate),
        (512, &expected.speed),
        (512, &expected.brake),
    ];

    for (id, want) in pairs {
        let got = dbc_signal(&dbc, id, &want.name);
        assert_eq!(got.start_bit, want.start_bit, "{}", want.name);
        assert_eq!(got.bit_length, want.bit_length, "{}", want.name);
        assert_eq!(got.byte_order, want.byte_order, "{}", want.name);
        assert_eq!(got.is_signed, want.is_signed, "{}", want.name);
        assert_eq!(got.offset, want.offset, "{}", want.name);
    }
}

#[test]
fn decode_ecu_frames_with_dbc_signals() {
    let dbc = dbc_rs::Dbc::parse(VEHICLE_DBC).expect("Failed to parse DBC");
    let ecu = FakeVehicleEcu::new();

    let engine = ecu.generate_engine_frame().unwrap();
    let rpm = dbc_signal(&dbc, engine.raw_id(), "RPM");
    let coolant = dbc_signal(&dbc, engine.raw_id(), "CoolantTemp");
    let throttle = dbc_signal(&dbc, engine.raw_id(), "ThrottlePos");
    assert_eq!(rpm.decode(engine.data()), Ok(2000.0));
    assert_eq!(coolant.decode(engine.data()), Ok(20.0));
    assert_eq!(throttle.decode(engine.data()), Ok(50.0));

    let vehicle = ecu.generate_vehicle_frame().unwrap();
    let speed = dbc_signal(&dbc, vehicle.raw_id(), "Speed");
    assert_close(speed.decode(vehicle.data()).unwrap(), ecu.speed, 0.01 + 1e-9);

    let chassis = ecu.generate_chassis_frame().unwrap();
    let steering = dbc_signal(&dbc, chassis.raw_id(), "SteeringAngle");
    let yaw = dbc_signal(&dbc, chassis.raw_id(), "YawRate");
    assert_eq!(steering.byte_order, ByteOrder::BigEndian);
    assert_close(
        steering.decode(chassis.data()).unwrap(),
        ecu.steering_angle,
        0.1 + 1e-9,
    );
    assert_close(yaw.decode(chassis.data()).unwrap(), ecu.yaw_rate, 0.05 + 1e-9);
}

#[test]
fn motorola_signal_bytes() {
    let dbc = dbc_rs::Dbc::parse(VEHICLE_DBC).expect("Failed to parse DBC");
    let steering = dbc_signal(&dbc, 384, "SteeringAngle");

    // -100.0 deg is raw -1000 = 0xFC18, most significant byte first
    let mut data = [0u8; 8];
    steering.encode(&mut data, -100.0).unwrap();
    assert_eq!(data[..2], [0xFC, 0x18]);

    let frame = MockCanFrame::new_standard(0x180, &data);
    assert_eq!(steering.decode(frame.data()), Ok(-100.0));
}

#[test]
fn units_carried_from_dbc() {
    let dbc = dbc_rs::Dbc::parse(VEHICLE_DBC).expect("Failed to parse DBC");
    let rpm = dbc_signal(&dbc, 256, "RPM");
    assert_eq!(rpm.unit.as_deref(), Some("rpm"));
}
