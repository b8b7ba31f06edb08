mod common;

use common::*;
use padbridge::bridge::{effects, Bridge};
use padbridge::config::BridgeSettings;
use padbridge::host::{DualRumble, ScriptedHost};

fn rumble() -> DualRumble {
    DualRumble {
        duration_ms: 250,
        start_delay_ms: 10,
        strong_magnitude: 0.8,
        weak_magnitude: 0.3,
    }
}

fn haptic_pad(index: u32) -> padbridge::host::HostGamepad {
    let mut pad = pad(index);
    pad.haptics = true;
    pad
}

#[test]
fn effect_reaches_the_pad_with_matching_host_index() {
    let mut host = ScriptedHost::new(vec![None, Some(haptic_pad(5)), Some(haptic_pad(1))]);
    effects::play_effect(&mut host, 5, rumble());
    assert_eq!(host.effects(), &[(5, rumble())]);
}

#[test]
fn unknown_id_is_a_silent_no_op() {
    let mut host = ScriptedHost::new(vec![Some(haptic_pad(0))]);
    effects::play_effect(&mut host, 3, rumble());
    assert!(host.effects().is_empty());
}

#[test]
fn pad_without_actuator_is_skipped() {
    let mut host = ScriptedHost::new(vec![Some(pad(0))]);
    effects::play_effect(&mut host, 0, rumble());
    assert!(host.effects().is_empty());
}

#[test]
fn host_rejection_is_swallowed() {
    let mut host = ScriptedHost::new(vec![Some(haptic_pad(0))]);
    host.reject_effects(true);
    effects::play_effect(&mut host, 0, rumble());
    assert!(host.effects().is_empty());
}

#[test]
fn bridge_dispatch_does_not_touch_memory() {
    let mut bridge = Bridge::new(
        ScriptedHost::new(vec![Some(haptic_pad(0))]),
        BridgeSettings::default(),
    )
    .unwrap();
    let mut memory = vec![0u8; padbridge::layout::BUFFER_SIZE];
    bridge.encode(&mut memory, 0).unwrap();
    let before = memory.clone();

    bridge.play_effect(7, 100, 0, 1.0, 1.0);
    bridge.play_effect(0, 250, 10, 0.8, 0.3);

    assert_eq!(memory, before);
    assert_eq!(bridge.source().effects(), &[(0, rumble())]);
}

#[test]
fn dispatch_between_polls_keeps_the_frame_queue() {
    let pressing = |button| {
        let mut pad = pad_pressing(0, &[button]);
        pad.haptics = true;
        pad
    };
    let mut host = ScriptedHost::default();
    for button in 0..3 {
        host.push_frame(vec![Some(pressing(button))]);
    }
    let mut bridge = Bridge::new(host, BridgeSettings::default()).unwrap();
    let mut memory = vec![0u8; padbridge::layout::BUFFER_SIZE];

    bridge.encode(&mut memory, 0).unwrap();
    assert_eq!(record(&memory, 0, 0).pressed_bits(), 0b001);

    bridge.play_effect(0, 250, 10, 0.8, 0.3);
    assert_eq!(bridge.source().effects(), &[(0, rumble())]);

    bridge.encode(&mut memory, 0).unwrap();
    assert_eq!(record(&memory, 0, 0).pressed_bits(), 0b010);

    bridge.encode(&mut memory, 0).unwrap();
    assert_eq!(record(&memory, 0, 0).pressed_bits(), 0b100);
}

#[test]
fn dispatch_uses_the_last_polled_frame() {
    let mut host = ScriptedHost::new(vec![Some(pad(0))]);
    host.push_frame(vec![Some(haptic_pad(0))]);
    // Not polled yet, so the pad without an actuator is still current.
    effects::play_effect(&mut host, 0, rumble());
    assert!(host.effects().is_empty());

    let _ = padbridge::host::GamepadSource::gamepads(&mut host);
    effects::play_effect(&mut host, 0, rumble());
    assert_eq!(host.effects(), &[(0, rumble())]);
}
