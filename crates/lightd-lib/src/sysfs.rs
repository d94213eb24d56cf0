//! Sysfs device layer — trait, real backend, mock.
//!
//! Sysfs nodes take plain integer text; writes are single one-shot syscalls
//! against non-blocking kernel files, so all I/O here is synchronous.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::Config;

/// Back-end for the two physical light controls.
///
/// The controller treats every method as best-effort: errors are reported
/// through `io::Result` so backends stay honest, but the caller logs and
/// drops them rather than propagating (indicator writes are advisory).
pub trait LightDevice {
    /// Read the backlight's maximum brightness from its capability node.
    fn max_brightness(&self) -> io::Result<u32>;
    /// Write a brightness value to the backlight control node.
    fn write_brightness(&self, value: u32) -> io::Result<()>;
    /// Write a blink code to the LED control node (0 = off, 10 = blink).
    fn write_blink(&self, value: u32) -> io::Result<()>;
}

/// Read a sysfs node containing a single integer value.
///
/// Trailing whitespace/newline is tolerated; non-numeric content maps to
/// `InvalidData`.
pub fn read_sysfs_u32(path: &Path) -> io::Result<u32> {
    let contents = fs::read_to_string(path)?;
    contents
        .trim()
        .parse::<u32>()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Write a single integer value to a sysfs node.
pub fn write_sysfs_u32(path: &Path, value: u32) -> io::Result<()> {
    fs::write(path, value.to_string())
}

// ── Real backend ──

/// Sysfs-backed light device: one backlight node pair plus one LED blink node.
#[derive(Debug, Clone)]
pub struct SysfsLights {
    brightness_path: PathBuf,
    max_brightness_path: PathBuf,
    blink_path: PathBuf,
}

impl SysfsLights {
    pub fn new(
        brightness_path: impl Into<PathBuf>,
        max_brightness_path: impl Into<PathBuf>,
        blink_path: impl Into<PathBuf>,
    ) -> Self {
        SysfsLights {
            brightness_path: brightness_path.into(),
            max_brightness_path: max_brightness_path.into(),
            blink_path: blink_path.into(),
        }
    }

    /// Build from configured node paths.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.backlight_path,
            &config.backlight_max_path,
            &config.led_blink_path,
        )
    }

    pub fn brightness_path(&self) -> &Path {
        &self.brightness_path
    }

    pub fn max_brightness_path(&self) -> &Path {
        &self.max_brightness_path
    }

    pub fn blink_path(&self) -> &Path {
        &self.blink_path
    }
}

impl LightDevice for SysfsLights {
    fn max_brightness(&self) -> io::Result<u32> {
        read_sysfs_u32(&self.max_brightness_path)
    }

    fn write_brightness(&self, value: u32) -> io::Result<()> {
        write_sysfs_u32(&self.brightness_path, value)
    }

    fn write_blink(&self, value: u32) -> io::Result<()> {
        write_sysfs_u32(&self.blink_path, value)
    }
}

// ── Mock device for testing ──

/// In-memory mock device for unit and integration tests.
///
/// Always compiled (zero runtime cost), hidden from public docs.
#[doc(hidden)]
pub mod mock {
    use super::*;
    use std::cell::{Cell, RefCell};

    /// Records every brightness and blink write in order; the capability
    /// read and write failures are injectable per test.
    pub struct MockLights {
        /// Capability node value. `None` simulates a missing/unreadable node.
        pub max_brightness: Cell<Option<u32>>,
        /// Recorded brightness writes, oldest first.
        pub brightness_writes: RefCell<Vec<u32>>,
        /// Recorded blink writes, oldest first.
        pub blink_writes: RefCell<Vec<u32>>,
        /// If true, every write returns an error (after recording nothing).
        pub fail_writes: Cell<bool>,
    }

    impl Default for MockLights {
        fn default() -> Self {
            Self::new()
        }
    }

    impl MockLights {
        pub fn new() -> Self {
            MockLights {
                max_brightness: Cell::new(Some(255)),
                brightness_writes: RefCell::new(Vec::new()),
                blink_writes: RefCell::new(Vec::new()),
                fail_writes: Cell::new(false),
            }
        }

        /// Mock with a specific capability value.
        pub fn with_max_brightness(max: u32) -> Self {
            let dev = Self::new();
            dev.max_brightness.set(Some(max));
            dev
        }

        /// Mock whose capability node is absent.
        pub fn without_capability() -> Self {
            let dev = Self::new();
            dev.max_brightness.set(None);
            dev
        }

        /// Last blink code written, if any.
        pub fn last_blink(&self) -> Option<u32> {
            self.blink_writes.borrow().last().copied()
        }

        /// Last brightness value written, if any.
        pub fn last_brightness(&self) -> Option<u32> {
            self.brightness_writes.borrow().last().copied()
        }

        /// Total writes across both nodes.
        pub fn write_count(&self) -> usize {
            self.brightness_writes.borrow().len() + self.blink_writes.borrow().len()
        }
    }

    impl LightDevice for MockLights {
        fn max_brightness(&self) -> io::Result<u32> {
            self.max_brightness.get().ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, "mock: capability node absent")
            })
        }

        fn write_brightness(&self, value: u32) -> io::Result<()> {
            if self.fail_writes.get() {
                return Err(io::Error::new(
                    io::ErrorKind::PermissionDenied,
                    "mock: write failure injected",
                ));
            }
            self.brightness_writes.borrow_mut().push(value);
            Ok(())
        }

        fn write_blink(&self, value: u32) -> io::Result<()> {
            if self.fail_writes.get() {
                return Err(io::Error::new(
                    io::ErrorKind::PermissionDenied,
                    "mock: write failure injected",
                ));
            }
            self.blink_writes.borrow_mut().push(value);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockLights;
    use super::*;
    use std::io::Write;

    // ── read_sysfs_u32 ──

    #[test]
    fn read_plain_integer() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, "4095").unwrap();
        assert_eq!(read_sysfs_u32(f.path()).unwrap(), 4095);
    }

    #[test]
    fn read_trailing_newline() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "255").unwrap();
        assert_eq!(read_sysfs_u32(f.path()).unwrap(), 255);
    }

    #[test]
    fn read_missing_file_is_err() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_sysfs_u32(&dir.path().join("max_brightness")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn read_non_numeric_is_invalid_data() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, "garbage").unwrap();
        let err = read_sysfs_u32(f.path()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn read_empty_is_invalid_data() {
        let f = tempfile::NamedTempFile::new().unwrap();
        let err = read_sysfs_u32(f.path()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    // ── write_sysfs_u32 ──

    #[test]
    fn write_plain_integer_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("brightness");
        write_sysfs_u32(&path, 2056).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "2056");
    }

    #[test]
    fn write_overwrites_previous_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blink");
        write_sysfs_u32(&path, 10).unwrap();
        write_sysfs_u32(&path, 0).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "0");
    }

    // ── SysfsLights ──

    #[test]
    fn sysfs_lights_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let brightness = dir.path().join("brightness");
        let max = dir.path().join("max_brightness");
        let blink = dir.path().join("blink");
        std::fs::write(&max, "4095\n").unwrap();

        let dev = SysfsLights::new(&brightness, &max, &blink);
        assert_eq!(dev.max_brightness().unwrap(), 4095);

        dev.write_brightness(128).unwrap();
        assert_eq!(std::fs::read_to_string(&brightness).unwrap(), "128");

        dev.write_blink(10).unwrap();
        assert_eq!(std::fs::read_to_string(&blink).unwrap(), "10");
    }

    #[test]
    fn sysfs_lights_missing_capability_is_err() {
        let dir = tempfile::tempdir().unwrap();
        let dev = SysfsLights::new(
            dir.path().join("brightness"),
            dir.path().join("max_brightness"),
            dir.path().join("blink"),
        );
        assert!(dev.max_brightness().is_err());
    }

    // ── MockLights ──

    #[test]
    fn mock_records_writes_in_order() {
        let dev = MockLights::new();
        dev.write_blink(10).unwrap();
        dev.write_blink(0).unwrap();
        dev.write_brightness(76).unwrap();
        assert_eq!(*dev.blink_writes.borrow(), vec![10, 0]);
        assert_eq!(dev.last_brightness(), Some(76));
        assert_eq!(dev.write_count(), 3);
    }

    #[test]
    fn mock_injected_failure() {
        let dev = MockLights::new();
        dev.fail_writes.set(true);
        assert!(dev.write_brightness(1).is_err());
        assert!(dev.write_blink(10).is_err());
        assert_eq!(dev.write_count(), 0, "failed writes must not be recorded");
    }

    #[test]
    fn mock_absent_capability() {
        let dev = MockLights::without_capability();
        assert!(dev.max_brightness().is_err());
    }
}
