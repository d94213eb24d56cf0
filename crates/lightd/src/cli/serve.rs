//! `serve` subcommand — line-based request dispatcher.
//!
//! Stands in for a platform binding layer: callers write one request per
//! line to stdin and read one reply per line from stdout. The controller
//! serializes concurrent writers through its internal lock; this loop only
//! parses and forwards.

use std::io::{BufRead, Write};
use std::path::Path;
use std::sync::atomic::Ordering;

use lightd_lib::controller::LightChannel;

use super::{LightState, RUNNING, Result, Status, color, load_config, open_controller};

/// Parse a request line: `<channel> <color>`.
///
/// Blank lines and `#` comments are skipped (returns `Ok(None)`).
fn parse_request(line: &str) -> Result<Option<(LightChannel, LightState)>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let mut parts = line.split_whitespace();
    let channel: LightChannel = parts
        .next()
        .ok_or_else(|| lightd_lib::LightdError::Request("missing channel".into()))?
        .parse()?;
    let color_spec = parts
        .next()
        .ok_or_else(|| lightd_lib::LightdError::Request("missing color".into()))?;
    if let Some(extra) = parts.next() {
        return Err(lightd_lib::LightdError::Request(format!(
            "unexpected trailing token: {extra}"
        )));
    }
    let state = LightState::with_color(color::parse_color(color_spec)?);
    Ok(Some((channel, state)))
}

pub(super) fn cmd_serve(config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path);
    let controller = open_controller(&config);

    log::info!(
        "serving on stdin (panel max brightness {})",
        controller.panel_max_brightness()
    );

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    for line in stdin.lock().lines() {
        if !RUNNING.load(Ordering::SeqCst) {
            break;
        }
        let line = line?;
        let reply = match parse_request(&line) {
            Ok(None) => continue,
            Ok(Some((channel, state))) => match controller.set_light(channel, state) {
                Status::Success => "ok".to_string(),
                Status::NotSupported => "unsupported".to_string(),
            },
            Err(e) => format!("error: {e}"),
        };
        let mut out = stdout.lock();
        writeln!(out, "{reply}")?;
        out.flush()?;
    }
    Ok(())
}
