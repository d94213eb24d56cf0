//! `set` / `off` subcommands — one-shot light requests.

use std::path::Path;

use lightd_lib::controller::LightChannel;

use super::{LightState, Result, Status, color, load_config, open_controller};

pub(super) fn cmd_set(channel: &str, color_spec: &str, config_path: Option<&Path>) -> Result<()> {
    let channel: LightChannel = channel.parse()?;
    let color = color::parse_color(color_spec)?;

    let config = load_config(config_path);
    let controller = open_controller(&config);

    match controller.set_light(channel, LightState::with_color(color)) {
        Status::Success => {
            println!("{channel}: {}", color::format_color(color));
        }
        Status::NotSupported => {
            println!("{channel}: not supported on this device");
        }
    }
    Ok(())
}

/// Clear both indicator sources. The backlight is untouched; use
/// `set backlight off` to blank the panel.
pub(super) fn cmd_off(config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path);
    let controller = open_controller(&config);

    controller.set_light(LightChannel::Attention, LightState::OFF);
    controller.set_light(LightChannel::Notifications, LightState::OFF);
    println!("attention: off");
    println!("notifications: off");
    Ok(())
}
