mod common;

use common::*;
use padbridge::bridge::{normalize, Encoder};
use padbridge::config::DEFAULT_JOYSTICK_DEADZONE as D;
use padbridge::host::HostGamepad;
use padbridge::layout::BUFFER_SIZE;
use proptest::prelude::*;

proptest! {
    #[test]
    fn deadzone_values_are_exactly_zero(axis in 0usize..4, v in -0.0399f32..0.0399) {
        prop_assert_eq!(normalize::joystick(axis, v, D), 0.0);
    }

    #[test]
    fn stick_output_is_bounded(axis in 0usize..4, v in -1.0f32..=1.0) {
        let out = normalize::joystick(axis, v, D);
        prop_assert!(out.abs() <= 1.0 + 1e-6);
    }

    #[test]
    fn stick_magnitude_is_monotonic(axis in 0usize..4, a in 0.0f32..=1.0, b in 0.0f32..=1.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(normalize::joystick(axis, lo, D).abs() <= normalize::joystick(axis, hi, D).abs());
        prop_assert!(normalize::joystick(axis, -lo, D).abs() <= normalize::joystick(axis, -hi, D).abs());
    }

    #[test]
    fn vertical_axes_are_flipped(v in 0.05f32..=1.0) {
        prop_assert!(normalize::joystick(0, v, D) > 0.0);
        prop_assert!(normalize::joystick(2, v, D) > 0.0);
        prop_assert!(normalize::joystick(1, v, D) < 0.0);
        prop_assert!(normalize::joystick(3, v, D) < 0.0);
        prop_assert_eq!(normalize::joystick(1, v, D), -normalize::joystick(0, v, D));
    }

    #[test]
    fn resting_trigger_is_idempotent(v in -0.0499f32..0.0499, previous in -1.0f32..0.0499) {
        prop_assert_eq!(normalize::trigger(v, previous, 0.05, D), None);
    }

    #[test]
    fn active_trigger_maps_to_unit_range(v in -1.0f32..=1.0, previous in 0.05f32..=1.0) {
        let out = normalize::trigger(v, previous, 0.05, D).unwrap();
        if (v + 1.0).abs() < D {
            prop_assert_eq!(out, 0.0);
        } else {
            prop_assert_eq!(out, (v + 1.0) * 0.5);
        }
        prop_assert!((0.0..=1.0).contains(&out));
    }

    #[test]
    fn pressed_bits_round_trip(pressed in proptest::collection::btree_set(0usize..17, 0..17),
                               extra in proptest::collection::btree_set(17usize..32, 0..4)) {
        let all: Vec<usize> = pressed.iter().chain(extra.iter()).copied().collect();
        let mut encoder = Encoder::default();
        let mut buffer = vec![0u8; BUFFER_SIZE];
        encoder.encode(&[Some(pad_pressing(0, &all))], &mut buffer, 0).unwrap();

        let rec = record(&buffer, 0, 0);
        let decoded: Vec<usize> = (0..32).filter(|&bit| rec.pressed_bits() & (1 << bit) != 0).collect();
        prop_assert_eq!(decoded, pressed.into_iter().collect::<Vec<_>>());
    }

    #[test]
    fn non_standard_mapping_never_connects(pressed in proptest::collection::vec(any::<bool>(), 0..24),
                                           axes in proptest::collection::vec(-1.0f32..=1.0, 0..8)) {
        let mut pad = HostGamepad::standard(0);
        pad.mapping = padbridge::host::MappingType::NonStandard;
        pad.buttons = pressed.into_iter().map(padbridge::host::HostButton::new).collect();
        pad.axes = axes;
        let mut encoder = Encoder::default();
        let mut buffer = vec![0u8; BUFFER_SIZE];
        encoder.encode(&[Some(pad)], &mut buffer, 0).unwrap();
        prop_assert!(!record(&buffer, 0, 0).connected());
    }
}
