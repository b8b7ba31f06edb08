#![allow(dead_code)]

use padbridge::host::{HostButton, HostGamepad, MappingType};
use padbridge::layout::{RecordView, BUFFER_SIZE};

pub fn pad(index: u32) -> HostGamepad {
    HostGamepad::standard(index)
}

pub fn pad_with_axes(index: u32, axes: &[f32]) -> HostGamepad {
    let mut pad = HostGamepad::standard(index);
    pad.axes = axes.to_vec();
    pad
}

pub fn pad_pressing(index: u32, pressed: &[usize]) -> HostGamepad {
    let mut pad = HostGamepad::standard(index);
    for &button in pressed {
        if button >= pad.buttons.len() {
            pad.buttons.resize(button + 1, HostButton::default());
        }
        pad.buttons[button] = HostButton::new(true);
    }
    pad
}

pub fn non_standard(index: u32) -> HostGamepad {
    let mut pad = pad_pressing(index, &[0, 1, 2]);
    pad.mapping = MappingType::NonStandard;
    pad
}

pub fn disconnected(index: u32) -> HostGamepad {
    let mut pad = HostGamepad::standard(index);
    pad.connected = false;
    pad
}

pub fn record(buffer: &[u8], offset: usize, slot: usize) -> RecordView<'_> {
    RecordView::from_region(&buffer[offset..offset + BUFFER_SIZE], slot).unwrap()
}

pub fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}
