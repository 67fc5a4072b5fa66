//! Save type heuristic.
//!
//! Games linked against the official save library carry its ID string
//! (e.g. `FLASH1M_V103`) somewhere in the ROM, always word aligned.

use log::debug;

use super::save::SaveType;

/// ROMs above this size use the alternate EEPROM addressing.
const EEPROM_ALT_THRESHOLD: usize = 0x0100_0000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SaveLib {
    Eeprom,
    Sram,
    Flash512,
    Flash1m,
}

const SAVE_LIB_IDS: [(&[u8], SaveLib); 6] = [
    (b"EEPROM_V", SaveLib::Eeprom),
    (b"SRAM_V", SaveLib::Sram),
    (b"SRAM_F_V", SaveLib::Sram),
    (b"FLASH_V", SaveLib::Flash512),
    (b"FLASH512_V", SaveLib::Flash512),
    (b"FLASH1M_V", SaveLib::Flash1m),
];

/// Procura a assinatura da biblioteca de save na ROM
fn find_save_lib(rom: &[u8]) -> Option<SaveLib> {
    (0..rom.len()).step_by(4).find_map(|off| {
        let tail = &rom[off..];
        match tail.first().copied() {
            Some(b'E' | b'S' | b'F') => SAVE_LIB_IDS
                .iter()
                .find(|(id, _)| tail.starts_with(id))
                .map(|&(_, lib)| lib),
            _ => None,
        }
    })
}

/// Guess the save type of `rom` (unmirrored). `default` is used when no
/// save library ID is found.
pub fn detect_save_type(rom: &[u8], default: SaveType) -> SaveType {
    let found = find_save_lib(rom);
    debug!("save library: {:?}", found);
    match found {
        Some(SaveLib::Eeprom) if rom.len() > EEPROM_ALT_THRESHOLD => SaveType::Eeprom64kAlt,
        Some(SaveLib::Eeprom) => SaveType::Eeprom64k,
        Some(SaveLib::Sram) => SaveType::Sram256k,
        Some(SaveLib::Flash512) => SaveType::Flash512kPanasonicRtc,
        Some(SaveLib::Flash1m) => SaveType::Flash1mMacronixRtc,
        None => default,
    }
}
