//! Browser host backed by the Gamepad API
//!
//! Some browsers leave `navigator.getGamepads()` empty until a `gamepadconnected` event has been
//! dispatched to a listener, so [`WebHost::new`] registers one (once per page) before the first
//! poll.

use super::{DualRumble, GamepadSource, HostButton, HostGamepad, MappingType};
use crate::error::BridgeError;
use std::sync::Once;
use tracing::{debug, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

static CONNECT_LISTENER: Once = Once::new();

fn register_connect_listener(window: &web_sys::Window) {
    CONNECT_LISTENER.call_once(|| {
        let on_connect = Closure::<dyn FnMut(web_sys::Event)>::new(|_event: web_sys::Event| {
            info!("Gamepad connected");
        });
        match window.add_event_listener_with_callback(
            "gamepadconnected",
            on_connect.as_ref().unchecked_ref(),
        ) {
            Ok(()) => info!("Registered gamepadconnected listener"),
            Err(e) => warn!("Failed to register gamepadconnected listener: {:?}", e),
        }
        // The listener lives for the rest of the page.
        on_connect.forget();
    });
}

fn raw_gamepads() -> Vec<Option<web_sys::Gamepad>> {
    let Some(window) = web_sys::window() else {
        warn!("No window available, reporting no gamepads");
        return Vec::new();
    };
    match window.navigator().get_gamepads() {
        Ok(list) => list
            .iter()
            .map(|entry| entry.dyn_into::<web_sys::Gamepad>().ok())
            .collect(),
        Err(e) => {
            warn!("navigator.getGamepads() failed: {:?}", e);
            Vec::new()
        }
    }
}

fn actuator(gamepad: &web_sys::Gamepad) -> Option<JsValue> {
    js_sys::Reflect::get(gamepad, &JsValue::from_str("vibrationActuator"))
        .ok()
        .filter(|actuator| !actuator.is_undefined() && !actuator.is_null())
}

fn snapshot(gamepad: &web_sys::Gamepad) -> HostGamepad {
    let mapping = if gamepad.mapping() == web_sys::GamepadMappingType::Standard {
        MappingType::Standard
    } else {
        MappingType::NonStandard
    };
    let buttons = gamepad
        .buttons()
        .iter()
        .map(|button| {
            let button = web_sys::GamepadButton::from(button);
            HostButton {
                pressed: button.pressed(),
                value: button.value() as f32,
            }
        })
        .collect();
    let axes = gamepad
        .axes()
        .iter()
        .map(|axis| axis.as_f64().unwrap_or_default() as f32)
        .collect();

    HostGamepad {
        index: gamepad.index(),
        connected: gamepad.connected(),
        mapping,
        buttons,
        axes,
        haptics: actuator(gamepad).is_some(),
    }
}

/// [`GamepadSource`] over `navigator.getGamepads()`
#[derive(Debug)]
pub struct WebHost {}

impl WebHost {
    pub fn new() -> Result<Self, BridgeError> {
        let window = web_sys::window()
            .ok_or_else(|| BridgeError::InitializationError("no global `window`".to_string()))?;
        register_connect_listener(&window);
        Ok(Self {})
    }
}

impl GamepadSource for WebHost {
    fn gamepads(&mut self) -> Vec<Option<HostGamepad>> {
        raw_gamepads()
            .iter()
            .map(|gamepad| gamepad.as_ref().map(snapshot))
            .collect()
    }

    fn play_dual_rumble(&mut self, index: u32, effect: &DualRumble) -> Result<(), BridgeError> {
        let gamepad = raw_gamepads()
            .into_iter()
            .flatten()
            .find(|gamepad| gamepad.index() == index)
            .ok_or_else(|| BridgeError::EffectError(format!("no gamepad with index {}", index)))?;
        let actuator = actuator(&gamepad)
            .ok_or_else(|| BridgeError::EffectError("no vibrationActuator".to_string()))?;
        let play = js_sys::Reflect::get(&actuator, &JsValue::from_str("playEffect"))
            .map_err(|e| BridgeError::EffectError(format!("{:?}", e)))?
            .dyn_into::<js_sys::Function>()
            .map_err(|_| BridgeError::EffectError("playEffect is not callable".to_string()))?;

        let params = js_sys::Object::new();
        for (key, value) in [
            ("duration", JsValue::from(effect.duration_ms)),
            ("startDelay", JsValue::from(effect.start_delay_ms)),
            ("strongMagnitude", JsValue::from(effect.strong_magnitude)),
            ("weakMagnitude", JsValue::from(effect.weak_magnitude)),
        ] {
            js_sys::Reflect::set(&params, &JsValue::from_str(key), &value)
                .map_err(|e| BridgeError::EffectError(format!("{:?}", e)))?;
        }

        // The returned promise resolves when playback ends and is dropped unobserved.
        play.call2(&actuator, &JsValue::from_str("dual-rumble"), &params)
            .map_err(|e| BridgeError::EffectError(format!("{:?}", e)))?;
        debug!("Requested dual-rumble on gamepad {}: {:?}", index, effect);
        Ok(())
    }
}

/// Wrapped bridging export: play a dual-rumble effect without owning a bridge
#[wasm_bindgen]
pub fn play_effect(
    gamepad_id: u8,
    duration_ms: u32,
    start_delay_ms: u32,
    strong_magnitude: f32,
    weak_magnitude: f32,
) {
    let mut host = WebHost {};
    crate::bridge::effects::play_effect(
        &mut host,
        gamepad_id,
        DualRumble {
            duration_ms,
            start_delay_ms,
            strong_magnitude,
            weak_magnitude,
        },
    );
}
