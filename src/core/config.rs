//! Firmware configuration.
//!
//! One [`OafConfig`] value is loaded from `config.ini` at startup, overlaid
//! with the per-game file, and then passed by reference to whoever needs it.
//! Reading the ini text is left to a [`ConfigParser`] implementation.

use crate::core::cartridge::SaveType;
use crate::core::error::Result;
use crate::core::hw::{AudioOutput, ButtonMaps};

/// Resolved settings for one boot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OafConfig {
    /// LCD luminance.
    pub backlight: u8,
    /// Luminance change per hot-key press.
    pub backlight_steps: u8,
    /// Skip the legacy BIOS intro.
    pub direct_boot: bool,
    /// Look save types up in the game database.
    pub use_gba_db: bool,
    /// Keep per-game config and saves in the saves folder instead of beside the ROM.
    pub use_saves_folder: bool,
    pub audio_out: AudioOutput,
    /// 127 leaves the volume slider in charge.
    pub volume: i8,
    pub button_maps: ButtonMaps,
    /// 0-9, anything higher disables save persistence.
    pub save_slot: u8,
    /// Explicit override. `None` means unset.
    pub save_type: Option<SaveType>,
    /// Force the database path even when `use_gba_db` is off.
    pub save_override: bool,
    /// Fallback for the heuristic detector.
    pub default_save: SaveType,
}

impl Default for OafConfig {
    fn default() -> Self {
        Self {
            backlight: 64,
            backlight_steps: 5,
            direct_boot: false,
            use_gba_db: true,
            use_saves_folder: true,
            audio_out: AudioOutput::Auto,
            volume: 127,
            button_maps: ButtonMaps::default(),
            save_slot: 0,
            save_type: None,
            save_override: false,
            default_save: SaveType::Sram256k,
        }
    }
}

/// Ini collaborator.
pub trait ConfigParser {
    /// Overlay the settings in `path` onto `config`. `early` is set for the
    /// global file read before anything is shown on screen.
    /// A missing file is reported as [`crate::Error::NotFound`].
    fn parse(&mut self, path: &str, config: &mut OafConfig, early: bool) -> Result<()>;
}
