//! `status` subcommand — node availability and resolved brightness range.

use std::path::Path;

use super::{
    Config, NodeStatusJson, Result, StatusOutput, kv, kv_indent, kv_width, load_config,
    open_controller,
};

pub(super) fn cmd_status(json: bool, config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path);
    let controller = open_controller(&config);
    let device = controller.device();

    let nodes = [
        ("backlight", device.brightness_path()),
        ("backlight max", device.max_brightness_path()),
        ("led blink", device.blink_path()),
    ];
    let supported: Vec<String> = controller
        .supported_channels()
        .iter()
        .map(|c| c.to_string())
        .collect();

    if json {
        let output = StatusOutput {
            version: env!("CARGO_PKG_VERSION").to_string(),
            config_file: config_path
                .map(|p| p.to_path_buf())
                .or_else(Config::path)
                .map(|p| p.display().to_string()),
            panel_max_brightness: controller.panel_max_brightness(),
            supported_channels: supported,
            nodes: nodes
                .iter()
                .map(|(role, path)| NodeStatusJson {
                    role,
                    path: path.display().to_string(),
                    present: path.exists(),
                })
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&output).unwrap());
        return Ok(());
    }

    let w = kv_width(
        &["lightd version:", "Panel max brightness:", "Channels:"],
        &["backlight:", "backlight max:", "led blink:"],
    );

    kv("lightd version:", env!("CARGO_PKG_VERSION"), w);
    kv("Panel max brightness:", controller.panel_max_brightness(), w);
    kv("Channels:", supported.join(", "), w);
    println!();

    println!("Nodes:");
    for (role, path) in nodes {
        let presence = if path.exists() { "present" } else { "missing" };
        kv_indent(
            &format!("{role}:"),
            format_args!("{} ({presence})", path.display()),
            w,
        );
    }
    Ok(())
}
