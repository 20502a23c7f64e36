//! Linux sysfs GPIO adapter (`/sys/class/gpio`)
//!
//! Implements `GpioController` and `OutputPin`.
//! Opening a pin exports it if the kernel has not already done so, and a
//! pin exported that way is unexported again when dropped. The `value`
//! file is held open so each unit costs one seek and one write.

use std::fs::{File, OpenOptions};
use std::io::{Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use crate::domain::{Level, SwitchError, SwitchResult};
use crate::ports::{GpioController, OutputPin};

/// Default sysfs GPIO root
pub const SYSFS_GPIO_ROOT: &str = "/sys/class/gpio";

/// Hands out pins under a sysfs GPIO root directory.
pub struct SysfsGpio {
    root: PathBuf,
}

impl SysfsGpio {
    pub fn new() -> Self {
        Self::with_root(SYSFS_GPIO_ROOT)
    }

    /// Use a different root (a chroot'ed sysfs, or a scratch directory in tests)
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn export(&self, pin: u32) -> SwitchResult<()> {
        let export = self.root.join("export");
        std::fs::write(&export, pin.to_string())
            .map_err(|e| SwitchError::Gpio(format!("Failed to export pin {pin}: {e}")))
    }
}

impl Default for SysfsGpio {
    fn default() -> Self {
        Self::new()
    }
}

impl GpioController for SysfsGpio {
    fn open_pin(&mut self, pin: u32) -> SwitchResult<Box<dyn OutputPin>> {
        let dir = self.root.join(format!("gpio{pin}"));
        let mut unexport = None;
        if !dir.is_dir() {
            log::debug!("exporting gpio{pin} via {}", self.root.display());
            self.export(pin)?;
            unexport = Some(self.root.join("unexport"));
        }
        Ok(Box::new(SysfsPin {
            pin,
            dir,
            value: None,
            unexport,
        }))
    }
}

/// One exported sysfs line
pub struct SysfsPin {
    pin: u32,
    dir: PathBuf,
    value: Option<File>,
    /// Set only when this adapter exported the line
    unexport: Option<PathBuf>,
}

impl SysfsPin {
    fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    fn open_value(path: &Path, pin: u32) -> SwitchResult<File> {
        OpenOptions::new()
            .write(true)
            .open(path)
            .map_err(|e| SwitchError::Gpio(format!("Failed to open gpio{pin} value: {e}")))
    }
}

impl OutputPin for SysfsPin {
    fn set_drive_mode_output(&mut self) -> SwitchResult<()> {
        std::fs::write(self.path("direction"), "out").map_err(|e| {
            SwitchError::Gpio(format!("Failed to set gpio{} direction: {e}", self.pin))
        })?;
        self.value = Some(Self::open_value(&self.path("value"), self.pin)?);
        Ok(())
    }

    fn write(&mut self, level: Level) -> SwitchResult<()> {
        let pin = self.pin;
        let file = match self.value.as_mut() {
            Some(file) => file,
            None => {
                return Err(SwitchError::Gpio(format!(
                    "gpio{pin} written before being set to output"
                )))
            }
        };
        let byte: &[u8] = match level {
            Level::High => b"1",
            Level::Low => b"0",
        };
        file.seek(SeekFrom::Start(0))
            .and_then(|_| file.write_all(byte))
            .map_err(|e| SwitchError::Gpio(format!("Write to gpio{pin} failed: {e}")))
    }
}

impl Drop for SysfsPin {
    fn drop(&mut self) {
        let Some(unexport) = self.unexport.take() else {
            return;
        };
        self.value = None;
        log::debug!("unexporting gpio{}", self.pin);
        if let Err(e) = std::fs::write(&unexport, self.pin.to_string()) {
            log::warn!("Failed to unexport gpio{}: {e}", self.pin);
        }
    }
}
