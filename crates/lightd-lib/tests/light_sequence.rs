//! Integration tests: end-to-end light request sequences using MockLights.
//!
//! These tests drive the controller through the public API only, verifying
//! channel dispatch, indicator arbitration, backlight scaling, and the
//! best-effort write policy against the recorded device writes.

use lightd_lib::controller::{
    LED_BLINK, LED_OFF, LightChannel, LightController, LightState, SUPPORTED_CHANNELS, Status,
};
use lightd_lib::sysfs::mock::MockLights;

const RED: u32 = 0x00FF_0000;
const GREEN: u32 = 0x0000_FF00;
const BLUE: u32 = 0x0000_00FF;
const WHITE: u32 = 0x00FF_FFFF;

fn controller() -> LightController<MockLights> {
    LightController::new(MockLights::new())
}

// ── Test: spec'd luma vectors reach the device ──

#[test]
fn backlight_luma_vectors() {
    for (color, luma) in [(RED, 76), (GREEN, 149), (BLUE, 28), (WHITE, 255)] {
        let ctl = controller();
        let status = ctl.set_light(LightChannel::Backlight, LightState::with_color(color));
        assert_eq!(status, Status::Success);
        assert_eq!(
            ctl.device().last_brightness(),
            Some(luma),
            "color {color:#010X}"
        );
    }
}

#[test]
fn backlight_scaling_4095() {
    let ctl = LightController::new(MockLights::with_max_brightness(4095));
    // luma 128 → 128 * 4095 / 255 = 2055 (integer truncation)
    ctl.set_light(LightChannel::Backlight, LightState::with_color(0x0080_8080));
    assert_eq!(ctl.device().last_brightness(), Some(2055));
}

#[test]
fn capability_fallback_makes_scaling_a_noop() {
    let ctl = LightController::new(MockLights::without_capability());
    assert_eq!(ctl.panel_max_brightness(), 255);
    ctl.set_light(LightChannel::Backlight, LightState::with_color(0x0080_8080));
    assert_eq!(ctl.device().last_brightness(), Some(128));
}

// ── Test: arbitration sequence from the spec ──

#[test]
fn notification_then_attention_clear_sequence() {
    let ctl = controller();

    // Notification lit, attention unlit → BLINK
    ctl.set_light(LightChannel::Notifications, LightState::with_color(RED));
    ctl.set_light(LightChannel::Attention, LightState::OFF);
    assert_eq!(ctl.device().last_blink(), Some(LED_BLINK));

    // Notification cleared with attention still unlit → OFF
    ctl.set_light(LightChannel::Notifications, LightState::OFF);
    assert_eq!(ctl.device().last_blink(), Some(LED_OFF));

    // Attention lit with notification unlit → BLINK
    ctl.set_light(LightChannel::Attention, LightState::with_color(WHITE));
    assert_eq!(ctl.device().last_blink(), Some(LED_BLINK));
}

#[test]
fn rapid_notification_cycles() {
    let ctl = controller();
    for cycle in 0..10 {
        ctl.set_light(LightChannel::Notifications, LightState::with_color(RED));
        assert_eq!(
            ctl.device().last_blink(),
            Some(LED_BLINK),
            "cycle {cycle}: lit"
        );
        ctl.set_light(LightChannel::Notifications, LightState::OFF);
        assert_eq!(
            ctl.device().last_blink(),
            Some(LED_OFF),
            "cycle {cycle}: cleared"
        );
    }
    // One blink write per call, nothing coalesced
    assert_eq!(ctl.device().blink_writes.borrow().len(), 20);
}

#[test]
fn idempotent_repeat_produces_same_writes() {
    let ctl = controller();
    let state = LightState::with_color(RED);

    ctl.set_light(LightChannel::Notifications, state);
    let first = ctl.device().blink_writes.borrow().clone();

    ctl.set_light(LightChannel::Notifications, state);
    let second = ctl.device().blink_writes.borrow().clone();

    assert_eq!(first, vec![LED_BLINK]);
    assert_eq!(
        second,
        vec![LED_BLINK, LED_BLINK],
        "identical request repeats the identical write"
    );
}

// ── Test: unsupported channels across call history ──

#[test]
fn unsupported_channels_never_write() {
    let ctl = controller();
    // Interleave supported and unsupported requests
    ctl.set_light(LightChannel::Notifications, LightState::with_color(RED));
    let before = ctl.device().write_count();

    for channel in [
        LightChannel::Keyboard,
        LightChannel::Buttons,
        LightChannel::Battery,
        LightChannel::Bluetooth,
        LightChannel::Wifi,
    ] {
        assert_eq!(
            ctl.set_light(channel, LightState::with_color(WHITE)),
            Status::NotSupported
        );
    }
    assert_eq!(
        ctl.device().write_count(),
        before,
        "unsupported requests issue no device writes"
    );
}

#[test]
fn supported_set_is_constant_regardless_of_history() {
    let ctl = controller();
    assert_eq!(ctl.supported_channels(), &SUPPORTED_CHANNELS);
    ctl.set_light(LightChannel::Wifi, LightState::with_color(RED));
    ctl.set_light(LightChannel::Backlight, LightState::OFF);
    ctl.set_light(LightChannel::Attention, LightState::with_color(RED));
    assert_eq!(
        ctl.supported_channels(),
        &[
            LightChannel::Attention,
            LightChannel::Backlight,
            LightChannel::Notifications,
        ]
    );
}

// ── Test: backlight and indicator are independent surfaces ──

#[test]
fn backlight_requests_do_not_disturb_indicator() {
    let ctl = controller();
    ctl.set_light(LightChannel::Notifications, LightState::with_color(RED));
    ctl.set_light(LightChannel::Backlight, LightState::OFF);
    ctl.set_light(LightChannel::Backlight, LightState::with_color(WHITE));

    // Only the initial notification touched the blink node
    assert_eq!(*ctl.device().blink_writes.borrow(), vec![LED_BLINK]);
    assert_eq!(*ctl.device().brightness_writes.borrow(), vec![0, 255]);
}

// ── Test: best-effort policy end to end ──

#[test]
fn failed_writes_do_not_break_later_arbitration() {
    let ctl = controller();

    ctl.device().fail_writes.set(true);
    assert_eq!(
        ctl.set_light(LightChannel::Notifications, LightState::with_color(RED)),
        Status::Success
    );
    assert_eq!(
        ctl.set_light(LightChannel::Backlight, LightState::with_color(WHITE)),
        Status::Success
    );
    assert_eq!(ctl.device().write_count(), 0);

    // Recovery: the retained notification state still wins arbitration
    ctl.device().fail_writes.set(false);
    ctl.set_light(LightChannel::Attention, LightState::OFF);
    assert_eq!(ctl.device().last_blink(), Some(LED_BLINK));
}
