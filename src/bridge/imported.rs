//! Raw memory import binding
//!
//! The embedding page provides `getGamepads` and `playEffect` as module imports. The host-side
//! encoder writes straight into our linear memory using the layout in [`crate::layout`].

use super::Transport;
use crate::error::BridgeError;
use crate::host::DualRumble;
use crate::layout::BUFFER_SIZE;

extern "C" {
    // Host javascript function.
    fn getGamepads(data_ptr: *mut u8);

    // Host javascript function.
    fn playEffect(
        gamepad_id: u8,
        duration_ms: u32,
        start_delay_ms: u32,
        strong_magnitude: f32,
        weak_magnitude: f32,
    );
}

/// Transport backed by the host's `getGamepads`/`playEffect` imports
#[derive(Debug, Default)]
pub struct ImportedHost;

impl Transport for ImportedHost {
    fn fill(&mut self, memory: &mut [u8], offset: usize) -> Result<(), BridgeError> {
        let end = offset
            .checked_add(BUFFER_SIZE)
            .ok_or(BridgeError::OffsetOverflow(offset))?;
        let available = memory.len();
        let region = memory
            .get_mut(offset..end)
            .ok_or(BridgeError::BufferTooSmall {
                required: end,
                available,
            })?;
        // SAFETY: `region` is a live, exclusively borrowed span of BUFFER_SIZE bytes, which is
        // exactly what the host encoder writes.
        unsafe { getGamepads(region.as_mut_ptr()) };
        Ok(())
    }

    fn play_effect(&mut self, gamepad_id: u8, effect: DualRumble) {
        // SAFETY: plain scalar arguments; the host ignores unknown ids.
        unsafe {
            playEffect(
                gamepad_id,
                effect.duration_ms,
                effect.start_delay_ms,
                effect.strong_magnitude,
                effect.weak_magnitude,
            )
        };
    }
}
