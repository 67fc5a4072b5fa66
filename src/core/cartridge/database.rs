//! Save type database collaborator.

use super::detect::detect_save_type;
use super::save::SaveType;
use crate::core::config::OafConfig;

/// Looks a ROM up in the game database.
///
/// `rom` is the unmirrored padded image; database hashes are computed over
/// exactly that. Implementations fall back to their own heuristic when the
/// game is unknown and must always return a type.
pub trait SaveDatabase {
    /// Tipo de save conhecido para a ROM
    fn lookup(&self, rom: &[u8], save_path: &str, config: &OafConfig) -> SaveType;
}

/// Empty database: every lookup goes to the heuristic.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoDatabase;

impl SaveDatabase for NoDatabase {
    fn lookup(&self, rom: &[u8], _save_path: &str, config: &OafConfig) -> SaveType {
        detect_save_type(rom, config.default_save)
    }
}
