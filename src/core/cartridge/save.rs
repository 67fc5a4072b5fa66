//! Save memory types and save-file paths.

use std::fmt;

use log::info;

use super::database::SaveDatabase;
use crate::core::browser::path::swap_extension;
use crate::core::config::OafConfig;

/// Save hardware the legacy side has to emulate. Discriminants are the
/// codes the bridge expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SaveType {
    Eeprom8k = 0,
    Eeprom8kAlt = 1,
    Eeprom64k = 2,
    Eeprom64kAlt = 3,
    Flash512kAtmelRtc = 4,
    Flash512kAtmel = 5,
    Flash512kSstRtc = 6,
    Flash512kSst = 7,
    Flash512kPanasonicRtc = 8,
    Flash512kPanasonic = 9,
    Flash1mMacronixRtc = 10,
    Flash1mMacronix = 11,
    Flash1mSanyoRtc = 12,
    Flash1mSanyo = 13,
    Sram256k = 14,
    None = 15,
}

impl SaveType {
    const ALL: [SaveType; 16] = [
        SaveType::Eeprom8k,
        SaveType::Eeprom8kAlt,
        SaveType::Eeprom64k,
        SaveType::Eeprom64kAlt,
        SaveType::Flash512kAtmelRtc,
        SaveType::Flash512kAtmel,
        SaveType::Flash512kSstRtc,
        SaveType::Flash512kSst,
        SaveType::Flash512kPanasonicRtc,
        SaveType::Flash512kPanasonic,
        SaveType::Flash1mMacronixRtc,
        SaveType::Flash1mMacronix,
        SaveType::Flash1mSanyoRtc,
        SaveType::Flash1mSanyo,
        SaveType::Sram256k,
        SaveType::None,
    ];

    /// Código usado pela ponte legacy
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Tipo a partir do código da ponte
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(usize::from(code)).copied()
    }

    /// Retorna se o tipo inclui RTC
    pub fn has_rtc(self) -> bool {
        matches!(
            self,
            SaveType::Flash512kAtmelRtc
                | SaveType::Flash512kSstRtc
                | SaveType::Flash512kPanasonicRtc
                | SaveType::Flash1mMacronixRtc
                | SaveType::Flash1mSanyoRtc
        )
    }
}

impl fmt::Display for SaveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SaveType::Eeprom8k => "EEPROM 8k",
            SaveType::Eeprom8kAlt => "EEPROM 8k (alt)",
            SaveType::Eeprom64k => "EEPROM 64k",
            SaveType::Eeprom64kAlt => "EEPROM 64k (alt)",
            SaveType::Flash512kAtmelRtc => "Flash 512k Atmel + RTC",
            SaveType::Flash512kAtmel => "Flash 512k Atmel",
            SaveType::Flash512kSstRtc => "Flash 512k SST + RTC",
            SaveType::Flash512kSst => "Flash 512k SST",
            SaveType::Flash512kPanasonicRtc => "Flash 512k Panasonic + RTC",
            SaveType::Flash512kPanasonic => "Flash 512k Panasonic",
            SaveType::Flash1mMacronixRtc => "Flash 1M Macronix + RTC",
            SaveType::Flash1mMacronix => "Flash 1M Macronix",
            SaveType::Flash1mSanyoRtc => "Flash 1M Sanyo + RTC",
            SaveType::Flash1mSanyo => "Flash 1M Sanyo",
            SaveType::Sram256k => "SRAM 256k",
            SaveType::None => "none",
        };
        f.write_str(name)
    }
}

/// Where the resolved save type came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveTypeSource {
    Override,
    Database,
    Heuristic,
}

/// Extension of the slot 0 save.
pub const SAVE_EXT: &str = ".sav";

/// Highest usable save slot.
pub const MAX_SAVE_SLOT: u8 = 9;

/// Save path for `slot`, derived from the per-game config path.
///
/// Slot 0 is `<base>.sav`, slots 1-9 are `<base>.N.sav`. Any other slot
/// yields an empty path, which means "no save file".
pub fn save_path_for(cfg_path: &str, slot: u8) -> String {
    match slot {
        0 => swap_extension(cfg_path, SAVE_EXT),
        1..=MAX_SAVE_SLOT => swap_extension(cfg_path, &format!(".{}{}", slot, SAVE_EXT)),
        _ => String::new(),
    }
}

/// Pick the save type: explicit override first, then the database when it
/// is enabled or forced, then the heuristic.
pub fn resolve_save_type(
    config: &OafConfig,
    rom: &[u8],
    save_path: &str,
    database: &dyn SaveDatabase,
) -> (SaveType, SaveTypeSource) {
    let (save_type, source) = if let Some(forced) = config.save_type {
        (forced, SaveTypeSource::Override)
    } else if config.use_gba_db || config.save_override {
        (database.lookup(rom, save_path, config), SaveTypeSource::Database)
    } else {
        (
            super::detect::detect_save_type(rom, config.default_save),
            SaveTypeSource::Heuristic,
        )
    };
    info!("save type: {} ({:?})", save_type, source);
    (save_type, source)
}
