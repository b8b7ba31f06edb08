//! Binary layout of the gamepad transfer buffer
//!
//! The buffer is a sequence of [`MAX_GAMEPADS`] fixed-size records, one per controller slot.
//! Producer and consumer agree on it purely through the constants below; there is no header
//! and no schema. Multi-byte fields use native byte order because both sides run inside the
//! same execution environment.
//!
//! ```text
//! offset  0      1          2          3          4..8          8..32           32..36
//!         [id]   [connected][buttons]  [axes]     [pressed u32] [6 x f32 axes]  [pad]
//! ```
//!
//! Every number here is part of the wire contract shared with already-compiled consumers.

/// Number of controller slots in the buffer
pub const MAX_GAMEPADS: usize = 8;

/// Size of one controller record in bytes
pub const RECORD_SIZE: usize = 36;

/// Total number of bytes the encoder needs past the caller's offset
pub const BUFFER_SIZE: usize = MAX_GAMEPADS * RECORD_SIZE;

/// Buttons representable in the pressed-bits word
pub const MAX_BUTTONS: usize = 17;

/// Axis channels carried per record
pub const MAX_AXES: usize = 6;

/// Leading axis channels that hold stick values; the rest are triggers
pub const JOYSTICK_AXES: usize = 4;

pub const ID_OFFSET: usize = 0;
pub const CONNECTED_OFFSET: usize = 1;
pub const BUTTON_COUNT_OFFSET: usize = 2;
pub const AXIS_COUNT_OFFSET: usize = 3;
pub const PRESSED_BITS_OFFSET: usize = 4;
pub const AXES_OFFSET: usize = 8;

const AXIS_SIZE: usize = std::mem::size_of::<f32>();

/// Byte offset of slot `slot` relative to the start of the buffer region
pub const fn slot_offset(slot: usize) -> usize {
    slot * RECORD_SIZE
}

/// Record-local byte offset of axis channel `axis`
pub const fn axis_offset(axis: usize) -> usize {
    AXES_OFFSET + axis * AXIS_SIZE
}

/// Read-only view over one 36-byte record
#[derive(Clone, Copy, Debug)]
pub struct RecordView<'a> {
    bytes: &'a [u8; RECORD_SIZE],
}

impl<'a> RecordView<'a> {
    pub fn new(bytes: &'a [u8; RECORD_SIZE]) -> Self {
        Self { bytes }
    }

    /// View slot `slot` inside a buffer region that starts at the buffer's first byte.
    ///
    /// Returns `None` when the slot is past [`MAX_GAMEPADS`] or the region is too short.
    pub fn from_region(region: &'a [u8], slot: usize) -> Option<Self> {
        if slot >= MAX_GAMEPADS {
            return None;
        }
        let start = slot_offset(slot);
        region
            .get(start..start + RECORD_SIZE)
            .and_then(|bytes| bytes.try_into().ok())
            .map(Self::new)
    }

    pub fn id(&self) -> u8 {
        self.bytes[ID_OFFSET]
    }

    pub fn connected(&self) -> bool {
        self.bytes[CONNECTED_OFFSET] == 1
    }

    pub fn button_count(&self) -> u8 {
        self.bytes[BUTTON_COUNT_OFFSET]
    }

    pub fn axis_count(&self) -> u8 {
        self.bytes[AXIS_COUNT_OFFSET]
    }

    pub fn pressed_bits(&self) -> u32 {
        read_u32(self.bytes, PRESSED_BITS_OFFSET)
    }

    /// Axis channel `axis`, or 0.0 for channels outside the record
    pub fn axis(&self, axis: usize) -> f32 {
        if axis >= MAX_AXES {
            return 0.0;
        }
        read_f32(self.bytes, axis_offset(axis))
    }

    pub fn axes(&self) -> [f32; MAX_AXES] {
        std::array::from_fn(|axis| self.axis(axis))
    }

    pub fn is_pressed(&self, button: usize) -> bool {
        button < MAX_BUTTONS && self.pressed_bits() & (1u32 << button) != 0
    }
}

pub(crate) fn read_u32(bytes: &[u8], at: usize) -> u32 {
    let mut word = [0u8; 4];
    word.copy_from_slice(&bytes[at..at + 4]);
    u32::from_ne_bytes(word)
}

pub(crate) fn read_f32(bytes: &[u8], at: usize) -> f32 {
    let mut word = [0u8; 4];
    word.copy_from_slice(&bytes[at..at + 4]);
    f32::from_ne_bytes(word)
}

pub(crate) fn write_u32(bytes: &mut [u8], at: usize, value: u32) {
    bytes[at..at + 4].copy_from_slice(&value.to_ne_bytes());
}

pub(crate) fn write_f32(bytes: &mut [u8], at: usize, value: f32) {
    bytes[at..at + 4].copy_from_slice(&value.to_ne_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_constants_match_wire_contract() {
        assert_eq!(BUFFER_SIZE, 288);
        assert_eq!(axis_offset(0), 8);
        assert_eq!(axis_offset(MAX_AXES), 32);
        assert!(axis_offset(MAX_AXES) <= RECORD_SIZE);
        assert!(MAX_BUTTONS <= 32);
    }

    #[test]
    fn view_decodes_native_order_fields() {
        let mut region = vec![0u8; BUFFER_SIZE];
        let base = slot_offset(2);
        region[base + CONNECTED_OFFSET] = 1;
        region[base + BUTTON_COUNT_OFFSET] = 17;
        region[base + AXIS_COUNT_OFFSET] = 4;
        write_u32(&mut region[base..], PRESSED_BITS_OFFSET, 0b101);
        write_f32(&mut region[base..], axis_offset(3), -0.25);

        let view = RecordView::from_region(&region, 2).unwrap();
        assert!(view.connected());
        assert_eq!(view.button_count(), 17);
        assert_eq!(view.axis_count(), 4);
        assert!(view.is_pressed(0));
        assert!(!view.is_pressed(1));
        assert!(view.is_pressed(2));
        assert_eq!(view.axis(3), -0.25);
        assert_eq!(view.axis(MAX_AXES), 0.0);
    }

    #[test]
    fn view_rejects_out_of_range_slots() {
        let region = vec![0u8; BUFFER_SIZE];
        assert!(RecordView::from_region(&region, MAX_GAMEPADS).is_none());
        assert!(RecordView::from_region(&region[..RECORD_SIZE * 3], 3).is_none());
    }
}
