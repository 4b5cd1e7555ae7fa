//! Tests for malformed input and boundary values

mod common;

use common::*;

/// A valid message with `patch` applied as (offset, value) pairs
fn patched(patch: &[(usize, u8)]) -> Vec<u8> {
    let mut bytes = hex_to_bytes(STATUS_ACTIVE);
    for &(offset, value) in patch {
        bytes[offset] = value;
    }
    bytes
}

#[test]
fn test_wrong_lengths_are_rejected() {
    let valid = hex_to_bytes(STATUS_ACTIVE);
    let mut longer = valid.clone();
    longer.push(0x33);

    let test_cases = [
        (&valid[..0], "Empty message"),
        (&valid[..1], "1 byte message"),
        (&valid[..35], "35 byte message"),
        (longer.as_slice(), "37 byte message"),
    ];

    for (bytes, description) in test_cases {
        match PumpStatus::decode_with(bytes, &Utc) {
            Err(DecodeError::MalformedLength { expected, actual }) => {
                assert_eq!(expected, 36, "{}", description);
                assert_eq!(actual, bytes.len(), "{}", description);
            }
            Ok(_) => panic!("{}: Expected error but got Ok", description),
            Err(other) => panic!("{}: Expected MalformedLength, got: {:?}", description, other),
        }
    }
}

#[test]
fn test_every_trend_byte() {
    for byte in u8::MIN..=u8::MAX {
        let result = PumpStatus::decode_with(&patched(&[(1, byte)]), &Utc);
        match byte & 0b1110 {
            0b0000 => assert_eq!(result.unwrap().glucose_trend(), GlucoseTrend::Flat),
            0b0010 => assert_eq!(result.unwrap().glucose_trend(), GlucoseTrend::Up),
            0b0100 => assert_eq!(result.unwrap().glucose_trend(), GlucoseTrend::UpUp),
            0b0110 => assert_eq!(result.unwrap().glucose_trend(), GlucoseTrend::Down),
            0b1000 => assert_eq!(result.unwrap().glucose_trend(), GlucoseTrend::DownDown),
            bits => assert_eq!(result.unwrap_err(), DecodeError::MalformedTrend(bits)),
        }
    }
}

#[test]
fn test_trend_up() {
    let status = PumpStatus::decode_with(&patched(&[(1, 0b0010)]), &Utc).unwrap();
    assert_eq!(status.glucose_trend(), GlucoseTrend::Up);
}

#[test]
fn test_invalid_pump_date_is_fatal() {
    let cases = [
        (vec![(6, 13)], "month 13"),
        (vec![(6, 0)], "month 0"),
        (vec![(7, 32)], "day 32"),
        (vec![(2, 24)], "hour 24"),
        (vec![(3, 60)], "minute 60"),
        (vec![(4, 60)], "second 60"),
    ];
    for (patch, description) in cases {
        assert_eq!(
            PumpStatus::decode_with(&patched(&patch), &Utc).unwrap_err(),
            DecodeError::MalformedPumpDate,
            "{}",
            description
        );
    }
}

#[test]
fn test_trend_checked_before_pump_date() {
    let bytes = patched(&[(1, 0b1110), (6, 13)]);
    assert_eq!(
        PumpStatus::decode_with(&bytes, &Utc).unwrap_err(),
        DecodeError::MalformedTrend(0b1110)
    );
}

#[test]
fn test_length_checked_first() {
    let bytes = patched(&[(1, 0b1110), (6, 13)]);
    assert!(matches!(
        PumpStatus::decode_with(&bytes[..20], &Utc),
        Err(DecodeError::MalformedLength { actual: 20, .. })
    ));
}

#[test]
fn test_invalid_glucose_date_is_absent() {
    init_tracing();
    // active reading, glucose month 13
    let status = PumpStatus::decode_with(&patched(&[(32, 13)]), &Utc).unwrap();
    assert_eq!(status.glucose(), SensorReading::Active { glucose: 100 });
    assert_eq!(status.glucose_date(), None);
    assert_eq!(status.pump_date(), utc(2015, 9, 4, 9, 44, 30));
}

#[test]
fn test_glucose_date_ignored_when_off() {
    let status = PumpStatus::decode_with(&patched(&[(9, 0), (24, 0)]), &Utc).unwrap();
    assert_eq!(status.glucose(), SensorReading::Off);
    assert_eq!(status.glucose_date(), None);
}

#[test]
fn test_glucose_sentinel_scenarios() {
    // byte 9 supplies the high bits, bit 0 of byte 24 the low bit
    let cases = [
        (10, 0x01, SensorReading::Active { glucose: 21 }),
        (10, 0x00, SensorReading::Lost),
        (4, 0x01, SensorReading::Unknown),
        (7, 0x00, SensorReading::HighBG),
        (1, 0x00, SensorReading::MeterBGNow),
        (4, 0x00, SensorReading::Warmup),
        (0, 0x01, SensorReading::Unknown),
        (0, 0x02, SensorReading::Off),
    ];
    for (low, overflow, expected) in cases {
        let status = PumpStatus::decode_with(&patched(&[(9, low), (24, overflow)]), &Utc).unwrap();
        assert_eq!(status.glucose(), expected, "low {low:#04x}, overflow {overflow:#04x}");
    }
}

#[test]
fn test_previous_glucose_uses_second_overflow_bit() {
    let status = PumpStatus::decode_with(&patched(&[(10, 10), (24, 0x02)]), &Utc).unwrap();
    assert_eq!(status.previous_glucose(), SensorReading::Active { glucose: 21 });
    assert_eq!(status.glucose(), SensorReading::Active { glucose: 100 });

    let status = PumpStatus::decode_with(&patched(&[(10, 10), (24, 0x01)]), &Utc).unwrap();
    assert_eq!(status.previous_glucose(), SensorReading::Lost);
    assert_eq!(status.glucose(), SensorReading::Active { glucose: 101 });
}

#[test]
fn test_battery_percent_is_unclamped() {
    let cases = [(0, 0), (1, 25), (2, 50), (3, 75), (4, 100), (200, 5000), (255, 6375)];
    for (raw, expected) in cases {
        let status = PumpStatus::decode_with(&patched(&[(14, raw)]), &Utc).unwrap();
        assert_eq!(status.battery_remaining_percent(), expected, "raw {raw}");
    }
}

#[test]
fn test_reservoir_scale() {
    let cases = [((0x00, 0x00), 0.0), ((0x00, 0x01), 0.1), ((0xff, 0xff), 6553.5)];
    for ((hi, lo), expected) in cases {
        let status = PumpStatus::decode_with(&patched(&[(12, hi), (13, lo)]), &Utc).unwrap();
        assert_close(status.reservoir_remaining(), expected);
    }
}

#[test]
fn test_iob_scale() {
    let cases = [((0x00, 0x00), 0.0), ((0x00, 0x01), 0.025), ((0xff, 0xff), 1638.375)];
    for ((hi, lo), expected) in cases {
        let status = PumpStatus::decode_with(&patched(&[(22, hi), (23, lo)]), &Utc).unwrap();
        assert_close(status.iob(), expected);
    }
}

#[test]
fn test_next_calibration_boundaries() {
    // pump clock reads 09:44:30
    let cases = [
        (0, Some(utc(2015, 9, 5, 0, 13, 0))),
        (9, Some(utc(2015, 9, 5, 9, 13, 0))),
        (10, Some(utc(2015, 9, 4, 10, 13, 0))),
        (23, Some(utc(2015, 9, 4, 23, 13, 0))),
        (24, None),
    ];
    for (hour, expected) in cases {
        let status = PumpStatus::decode_with(&patched(&[(20, hour)]), &Utc).unwrap();
        assert_eq!(status.next_sensor_calibration(), expected, "hour {hour}");
    }

    // 09:05:00 is before the :13 mark of the same hour
    let status = PumpStatus::decode_with(&patched(&[(3, 5), (4, 0), (20, 9)]), &Utc).unwrap();
    assert_eq!(status.next_sensor_calibration(), Some(utc(2015, 9, 4, 9, 13, 0)));
}

#[test]
fn test_equality_ignores_other_fields() {
    let a = PumpStatus::decode_with(&patched(&[(14, 1), (18, 5)]), &Utc).unwrap();
    let b = PumpStatus::decode_with(&patched(&[(14, 3), (18, 9)]), &Utc).unwrap();
    assert_eq!(a, b);

    let later = PumpStatus::decode_with(&patched(&[(4, 31)]), &Utc).unwrap();
    assert_ne!(a, later);

    let other_glucose_date = PumpStatus::decode_with(&patched(&[(29, 44)]), &Utc).unwrap();
    assert_ne!(a, other_glucose_date);
}

#[test]
fn test_error_messages() {
    assert_eq!(
        DecodeError::MalformedLength { expected: 36, actual: 35 }.to_string(),
        "Malformed length: expected 36 bytes, got 35"
    );
    assert_eq!(
        DecodeError::MalformedTrend(0b1010).to_string(),
        "Malformed glucose trend bits: 0b1010"
    );
}
