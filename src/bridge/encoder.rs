use super::normalize;
use crate::config::{BridgeSettings, TriggerMemory};
use crate::error::BridgeError;
use crate::host::HostGamepad;
use crate::layout::{
    self, AXIS_COUNT_OFFSET, BUFFER_SIZE, BUTTON_COUNT_OFFSET, CONNECTED_OFFSET, JOYSTICK_AXES,
    MAX_AXES, MAX_BUTTONS, MAX_GAMEPADS, PRESSED_BITS_OFFSET, RECORD_SIZE,
};
use tracing::debug;

const TRIGGER_AXES: usize = MAX_AXES - JOYSTICK_AXES;

/// Packs host snapshots into the fixed-layout transfer buffer
///
/// Stateless apart from trigger hysteresis: with [`TriggerMemory::Buffer`] the previous
/// trigger output is read back from the destination, so callers must keep handing in the same
/// region while polling continues.
#[derive(Debug, Clone)]
pub struct Encoder {
    settings: BridgeSettings,
    last_triggers: [[f32; TRIGGER_AXES]; MAX_GAMEPADS],
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new(BridgeSettings::default())
    }
}

impl Encoder {
    pub fn new(settings: BridgeSettings) -> Self {
        Self {
            settings,
            last_triggers: [[0.0; TRIGGER_AXES]; MAX_GAMEPADS],
        }
    }

    pub fn settings(&self) -> &BridgeSettings {
        &self.settings
    }

    pub fn update_settings(&mut self, settings: BridgeSettings) {
        self.settings = settings;
    }

    /// Write one record per host position into `memory[offset..offset + BUFFER_SIZE]`.
    ///
    /// Positions past the first [`MAX_GAMEPADS`] are dropped; slots past the host's list are
    /// left untouched. Nothing is written when the region is too short.
    pub fn encode(
        &mut self,
        gamepads: &[Option<HostGamepad>],
        memory: &mut [u8],
        offset: usize,
    ) -> Result<(), BridgeError> {
        let end = offset
            .checked_add(BUFFER_SIZE)
            .ok_or(BridgeError::OffsetOverflow(offset))?;
        if memory.len() < end {
            return Err(BridgeError::BufferTooSmall {
                required: end,
                available: memory.len(),
            });
        }
        let region = &mut memory[offset..end];

        for (slot, gamepad) in gamepads.iter().take(MAX_GAMEPADS).enumerate() {
            let start = layout::slot_offset(slot);
            let record = &mut region[start..start + RECORD_SIZE];
            match gamepad {
                Some(gamepad) if gamepad.is_encodable() => self.write_record(slot, gamepad, record),
                _ => record[CONNECTED_OFFSET] = 0,
            }
        }
        Ok(())
    }

    fn write_record(&mut self, slot: usize, gamepad: &HostGamepad, record: &mut [u8]) {
        record[CONNECTED_OFFSET] = 1;
        record[BUTTON_COUNT_OFFSET] = gamepad.buttons.len() as u8;
        record[AXIS_COUNT_OFFSET] = gamepad.axes.len() as u8;
        layout::write_u32(record, PRESSED_BITS_OFFSET, pressed_bits(gamepad));

        let deadzone = self.settings.joystick_deadzone;
        for axis in 0..MAX_AXES {
            let raw = gamepad.axes.get(axis).copied().unwrap_or(0.0);
            let at = layout::axis_offset(axis);
            if normalize::is_joystick(axis) {
                layout::write_f32(record, at, normalize::joystick(axis, raw, deadzone));
                continue;
            }

            let trigger = axis - JOYSTICK_AXES;
            let previous = match self.settings.trigger_memory {
                TriggerMemory::Buffer => layout::read_f32(record, at),
                TriggerMemory::Slot => self.last_triggers[slot][trigger],
            };
            match normalize::trigger(
                raw,
                previous,
                self.settings.trigger_rest_threshold,
                deadzone,
            ) {
                Some(value) => {
                    self.last_triggers[slot][trigger] = value;
                    layout::write_f32(record, at, value);
                }
                None if self.settings.trigger_memory == TriggerMemory::Slot => {
                    layout::write_f32(record, at, previous);
                }
                None => {}
            }
        }

        debug!(
            "Encoded pad {} into slot {}: {} buttons, {} axes",
            gamepad.index,
            slot,
            gamepad.buttons.len(),
            gamepad.axes.len()
        );
    }
}

/// Bit `i` set iff button `i` is pressed; buttons past [`MAX_BUTTONS`] are dropped
pub fn pressed_bits(gamepad: &HostGamepad) -> u32 {
    gamepad
        .buttons
        .iter()
        .take(MAX_BUTTONS)
        .enumerate()
        .filter(|(_, button)| button.pressed)
        .fold(0, |bits, (index, _)| bits | (1u32 << index))
}
