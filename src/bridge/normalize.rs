//! Analog value normalization
//!
//! Sticks get a per-axis deadzone with the remaining range stretched back to [-1, 1].
//! Triggers are remapped from the host's [-1, 1] onto [0, 1] with a small hysteresis around
//! rest, because some controllers report a resting trigger as a small nonzero value until it
//! is first moved.

use crate::layout::JOYSTICK_AXES;

/// Stick axis `axis` (0..4) with deadzone `deadzone` applied.
///
/// Vertical axes (1 and 3) are flipped so that "up" is positive.
pub fn joystick(axis: usize, value: f32, deadzone: f32) -> f32 {
    if value.abs() < deadzone {
        return 0.0;
    }
    let flip = if axis % 2 == 1 { -1.0 } else { 1.0 };
    flip * (value - value.signum() * deadzone) / (1.0 - deadzone)
}

/// Trigger output for raw value `value`, given the previously written output.
///
/// `None` means the trigger is still at rest and the previous output must be kept.
pub fn trigger(value: f32, previous: f32, rest_threshold: f32, deadzone: f32) -> Option<f32> {
    if value.abs() < rest_threshold && previous < rest_threshold {
        return None;
    }
    let shifted = value + 1.0;
    if shifted.abs() < deadzone {
        Some(0.0)
    } else {
        Some(shifted * 0.5)
    }
}

pub fn is_joystick(axis: usize) -> bool {
    axis < JOYSTICK_AXES
}
