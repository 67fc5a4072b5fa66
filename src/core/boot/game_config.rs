//! Per-game config path.

use crate::core::browser::path::{file_name, swap_extension};
use crate::core::SAVE_DIR;

/// Extensão do ini por jogo
pub const CONFIG_EXT: &str = ".ini";

/// Config path for `rom_path`: `saves/<name>.ini` in saves-folder mode,
/// otherwise `<name>.ini` beside the ROM.
pub fn game_config_path(rom_path: &str, use_saves_folder: bool) -> String {
    if use_saves_folder {
        let name = swap_extension(file_name(rom_path), CONFIG_EXT);
        format!("{}/{}", SAVE_DIR, name)
    } else {
        swap_extension(rom_path, CONFIG_EXT)
    }
}
