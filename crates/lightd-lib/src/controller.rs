//! Light controller — channel dispatch, indicator arbitration, backlight scaling.
//!
//! Two logical light sources (attention, notification) share one physical
//! blink-capable LED. The controller keeps the last-set state of both and
//! re-derives the LED output from scratch on every change: notification
//! overrides attention, both unlit means off. Backlight requests are
//! converted to a luma value and rescaled to the panel's brightness range.

use std::str::FromStr;
use std::sync::{Mutex, PoisonError};

use crate::color::{is_lit, rgb_to_brightness};
use crate::sysfs::LightDevice;

/// Reference brightness scale. Panels whose capability node reports a
/// different maximum get linear rescaling.
pub const DEFAULT_MAX_BRIGHTNESS: u32 = 255;

/// Blink code for "off".
pub const LED_OFF: u32 = 0;
/// Blink code for "blinking".
pub const LED_BLINK: u32 = 10;

// ── Request types ──

/// Logical light channels of the platform interface.
///
/// Only [`Attention`](LightChannel::Attention),
/// [`Backlight`](LightChannel::Backlight) and
/// [`Notifications`](LightChannel::Notifications) are wired to hardware on
/// this device; the rest exist so requests for them can be answered with
/// [`Status::NotSupported`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LightChannel {
    Backlight,
    Keyboard,
    Buttons,
    Battery,
    Notifications,
    Attention,
    Bluetooth,
    Wifi,
}

impl std::fmt::Display for LightChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LightChannel::Backlight => "backlight",
            LightChannel::Keyboard => "keyboard",
            LightChannel::Buttons => "buttons",
            LightChannel::Battery => "battery",
            LightChannel::Notifications => "notifications",
            LightChannel::Attention => "attention",
            LightChannel::Bluetooth => "bluetooth",
            LightChannel::Wifi => "wifi",
        };
        write!(f, "{name}")
    }
}

impl FromStr for LightChannel {
    type Err = crate::LightdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "backlight" => Ok(LightChannel::Backlight),
            "keyboard" => Ok(LightChannel::Keyboard),
            "buttons" => Ok(LightChannel::Buttons),
            "battery" => Ok(LightChannel::Battery),
            "notifications" => Ok(LightChannel::Notifications),
            "attention" => Ok(LightChannel::Attention),
            "bluetooth" => Ok(LightChannel::Bluetooth),
            "wifi" => Ok(LightChannel::Wifi),
            other => Err(crate::LightdError::Request(format!(
                "unknown channel: {other}"
            ))),
        }
    }
}

/// Flash pattern metadata. Carried through but not consulted by this
/// controller — the hardware target has no timed-flash support, so the
/// lit/unlit decision uses only the color payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlashMode {
    #[default]
    None,
    Timed,
    Hardware,
}

/// Brightness metadata. Carried through but not consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BrightnessMode {
    #[default]
    User,
    Sensor,
    LowPersistence,
}

/// A light request: color plus flash/brightness metadata.
///
/// Only the 24-bit RGB payload of `color` drives behavior; see
/// [`FlashMode`] and [`BrightnessMode`] for why the rest is inert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LightState {
    pub color: u32,
    pub flash_mode: FlashMode,
    pub flash_on_ms: u32,
    pub flash_off_ms: u32,
    pub brightness_mode: BrightnessMode,
}

impl LightState {
    /// A steady request with the given color and no flash metadata.
    pub fn with_color(color: u32) -> Self {
        LightState {
            color,
            ..Default::default()
        }
    }

    /// The unlit request (color 0).
    pub const OFF: LightState = LightState {
        color: 0,
        flash_mode: FlashMode::None,
        flash_on_ms: 0,
        flash_off_ms: 0,
        brightness_mode: BrightnessMode::User,
    };
}

/// Result of a [`LightController::set_light`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    NotSupported,
}

/// Channels this controller implements, in registration order.
pub const SUPPORTED_CHANNELS: [LightChannel; 3] = [
    LightChannel::Attention,
    LightChannel::Backlight,
    LightChannel::Notifications,
];

// ── Controller ──

/// Last-set state of the two logical indicator sources.
#[derive(Debug, Default)]
struct IndicatorState {
    attention: LightState,
    notification: LightState,
}

/// Arbitrates light requests onto a [`LightDevice`].
///
/// One mutex serializes all state mutation and device writes; no two
/// `set_light` calls may interleave their sysfs writes.
pub struct LightController<D> {
    device: D,
    panel_max_brightness: u32,
    indicator: Mutex<IndicatorState>,
}

impl<D: LightDevice> LightController<D> {
    /// Read the panel's maximum brightness once and start with both
    /// indicator sources unlit. A missing or malformed capability node
    /// falls back to [`DEFAULT_MAX_BRIGHTNESS`].
    pub fn new(device: D) -> Self {
        let panel_max_brightness = match device.max_brightness() {
            Ok(max) => max,
            Err(e) => {
                log::warn!(
                    "max_brightness unreadable ({e}), assuming {DEFAULT_MAX_BRIGHTNESS}"
                );
                DEFAULT_MAX_BRIGHTNESS
            }
        };
        LightController {
            device,
            panel_max_brightness,
            indicator: Mutex::new(IndicatorState::default()),
        }
    }

    /// Apply a light request to a channel.
    ///
    /// Returns [`Status::NotSupported`] without any side effect for
    /// channels this device does not implement. Device write failures are
    /// logged and dropped — they never surface to the caller.
    pub fn set_light(&self, channel: LightChannel, state: LightState) -> Status {
        let mut indicator = self
            .indicator
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        match channel {
            LightChannel::Backlight => self.apply_backlight(&state),
            LightChannel::Attention => {
                indicator.attention = state;
                self.apply_indicator(&indicator);
            }
            LightChannel::Notifications => {
                indicator.notification = state;
                self.apply_indicator(&indicator);
            }
            _ => return Status::NotSupported,
        }
        Status::Success
    }

    /// The fixed supported channel set, in registration order.
    pub fn supported_channels(&self) -> &'static [LightChannel] {
        &SUPPORTED_CHANNELS
    }

    /// The resolved panel maximum brightness.
    pub fn panel_max_brightness(&self) -> u32 {
        self.panel_max_brightness
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    fn apply_backlight(&self, state: &LightState) {
        let mut brightness = rgb_to_brightness(state.color);
        if self.panel_max_brightness != DEFAULT_MAX_BRIGHTNESS {
            let scaled = brightness * self.panel_max_brightness / DEFAULT_MAX_BRIGHTNESS;
            log::trace!("scaling brightness {brightness} => {scaled}");
            brightness = scaled;
        }
        if let Err(e) = self.device.write_brightness(brightness) {
            log::debug!("brightness write failed (ignored): {e}");
        }
    }

    /// Re-derive the shared LED output from both sources. Level-triggered:
    /// the blink code is recomputed in full, so repeated identical requests
    /// produce identical writes.
    fn apply_indicator(&self, indicator: &IndicatorState) {
        let code = if is_lit(indicator.notification.color) {
            LED_BLINK
        } else if is_lit(indicator.attention.color) {
            LED_BLINK
        } else {
            LED_OFF
        };
        if let Err(e) = self.device.write_blink(code) {
            log::debug!("blink write failed (ignored): {e}");
        }
    }
}
