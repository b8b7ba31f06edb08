use crate::host::{DualRumble, GamepadSource};
use tracing::{debug, warn};

/// Play a dual-rumble effect on the controller with host index `gamepad_id`.
///
/// Missing controllers and controllers without a haptic actuator are ignored. Host failures are
/// logged and swallowed; the caller never learns whether the effect played.
pub fn play_effect<S: GamepadSource + ?Sized>(source: &mut S, gamepad_id: u8, effect: DualRumble) {
    let Some(gamepad) = source.gamepad(u32::from(gamepad_id)) else {
        debug!("No controller with index {}, effect dropped", gamepad_id);
        return;
    };
    if !gamepad.haptics {
        debug!("Controller {} has no haptic actuator, effect dropped", gamepad_id);
        return;
    }

    debug!("Requesting dual-rumble on controller {}: {:?}", gamepad_id, effect);
    if let Err(e) = source.play_dual_rumble(gamepad.index, &effect) {
        warn!("Controller {} rejected dual-rumble: {}", gamepad_id, e);
    }
}
