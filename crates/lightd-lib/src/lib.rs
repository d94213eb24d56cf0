//! lightd — sysfs light control for a shared indicator LED and panel backlight.

pub mod color;
pub mod config;
pub mod controller;
pub mod error;
pub mod sysfs;

pub use error::LightdError;
