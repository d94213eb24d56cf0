//! CLI subcommands — one-shot light requests, dispatcher loop, status.

mod config_cmd;
mod serve;
mod set;
mod status;

use std::path::Path;

use clap::Subcommand;
use serde::Serialize;

pub(super) use crate::RUNNING;
pub(super) use lightd_lib::color;
pub(super) use lightd_lib::config::Config;
pub(super) use lightd_lib::controller::{LightController, LightState, Status};
pub(super) use lightd_lib::error::Result;
pub(super) use lightd_lib::sysfs::SysfsLights;

const PADDING: usize = 2;

/// Compute alignment width for a command's key-value output.
/// Ensures at least PADDING spaces after the longest key in either level,
/// with top-level and indent values aligned to the same column.
pub(super) fn kv_width(top: &[&str], indent: &[&str]) -> usize {
    let top_max = top.iter().map(|k| k.len()).max().unwrap_or(0);
    let indent_max = indent.iter().map(|k| k.len()).max().unwrap_or(0);
    let top_need = if top.is_empty() { 0 } else { top_max + PADDING };
    // Indent keys lose 2 chars of inner width to the "  " prefix
    let indent_need = if indent.is_empty() {
        0
    } else {
        indent_max + PADDING + 2
    };
    top_need.max(indent_need)
}

pub(super) fn kv(key: &str, value: impl std::fmt::Display, w: usize) {
    println!("{key:<width$}{value}", width = w);
}

pub(super) fn kv_indent(key: &str, value: impl std::fmt::Display, w: usize) {
    println!("  {key:<width$}{value}", width = w - 2);
}

/// Load config from the custom path if given, else the platform default.
pub(super) fn load_config(custom_path: Option<&Path>) -> Config {
    match custom_path {
        Some(path) => {
            let (config, warnings) = Config::load_from(path);
            for w in &warnings {
                log::warn!("{w}");
            }
            config
        }
        None => Config::load(),
    }
}

/// Build a controller over the configured sysfs nodes.
pub(super) fn open_controller(config: &Config) -> LightController<SysfsLights> {
    LightController::new(SysfsLights::from_config(config))
}

// ── JSON output structs ──

#[derive(Serialize)]
pub(super) struct StatusOutput {
    pub version: String,
    pub config_file: Option<String>,
    pub panel_max_brightness: u32,
    pub supported_channels: Vec<String>,
    pub nodes: Vec<NodeStatusJson>,
}

#[derive(Serialize)]
pub(super) struct NodeStatusJson {
    pub role: &'static str,
    pub path: String,
    pub present: bool,
}

#[derive(Serialize)]
pub(super) struct ConfigOutput {
    pub config_file: Option<String>,
    pub config_file_exists: bool,
    pub settings: Config,
}

#[derive(Subcommand)]
pub enum Command {
    /// Apply a color to a light channel
    Set {
        /// Channel name (attention, backlight, notifications, ...)
        channel: String,
        /// Color as #RRGGBB or a color name ("off" clears)
        color: String,
    },

    /// Clear the attention and notification lights
    Off,

    /// Read light requests from stdin, one "<channel> <color>" per line
    Serve,

    /// Show node availability and the resolved panel brightness range
    Status,

    /// Show current configuration and file path
    Config,
}

/// Warn if `--json` was passed to a command that doesn't support it.
fn warn_json_unsupported(cmd_name: &str) {
    log::warn!("--json is not supported for `{cmd_name}` (ignored)");
}

pub fn run(cmd: Command, json: bool, config_path: Option<&Path>) -> Result<()> {
    match cmd {
        Command::Set { channel, color } => {
            if json {
                warn_json_unsupported("set");
            }
            set::cmd_set(&channel, &color, config_path)
        }
        Command::Off => {
            if json {
                warn_json_unsupported("off");
            }
            set::cmd_off(config_path)
        }
        Command::Serve => {
            if json {
                warn_json_unsupported("serve");
            }
            serve::cmd_serve(config_path)
        }
        Command::Status => status::cmd_status(json, config_path),
        Command::Config => config_cmd::cmd_config(json, config_path),
    }
}
