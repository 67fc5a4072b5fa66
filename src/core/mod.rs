//! Núcleo do firmware: navegador de ROMs e pipeline de boot do modo GBA.
//!
//! Everything here runs on a single thread driven by the frame-sync tick.
//! Hardware and storage are reached only through the collaborator traits in
//! [`hw`] and [`fs`].

pub mod boot;
pub mod browser;
pub mod cartridge;
pub mod config;
pub mod error;
pub mod fs;
pub mod hw;
pub mod runtime;

#[cfg(test)]
pub(crate) mod testing;

/// Drive prefix of the SD card.
pub const SDMC_ROOT: &str = "sdmc:/";

/// Firmware working directory on the SD card.
pub const WORK_DIR: &str = "sdmc:/3ds/open_agb_firm";

/// Saves folder, relative to [`WORK_DIR`].
pub const SAVE_DIR: &str = "saves";

/// Screenshots folder, relative to [`WORK_DIR`].
pub const SCREENSHOT_DIR: &str = "screenshots";
