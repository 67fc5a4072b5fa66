// open-agb-rs/src/core/cartridge/mod.rs

//! Cartucho GBA: imagem da ROM, tipos de save e resolução do tipo de save.
//!
//! The ROM is staged into a fixed window the size of the legacy cartridge
//! address space. Everything past the real bytes is synthesised so the
//! legacy side reads exactly what a real cartridge bus would return.

pub mod database;
pub mod detect;
pub mod loader;
pub mod patch;
pub mod rom;
pub mod save;

pub use database::{NoDatabase, SaveDatabase};
pub use detect::detect_save_type;
pub use loader::{fill_open_bus, fix_rom_padding, padded_size, RomLoader, StagedRom};
pub use patch::{NoPatches, RomPatcher};
pub use rom::RomImage;
pub use save::{resolve_save_type, save_path_for, SaveType, SaveTypeSource};

/// Legacy cartridge window (32 MiB).
pub const MAX_ROM_SIZE: usize = 0x0200_0000;

/// Smallest retail ROM chip (8 Mbit).
pub const MIN_ROM_SIZE: usize = 0x0010_0000;

/// An 8 Mbit chip shows up this many times in the address space.
pub const MIRROR_FACTOR: usize = 4;

/// Unprogrammed flash reads back as all ones.
pub const FILL_BYTE: u8 = 0xFF;
