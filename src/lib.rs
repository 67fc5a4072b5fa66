// Este é o ponto de entrada principal da biblioteca.
// O hardware (tela, HID, ponte de compatibilidade) e o sistema de arquivos
// são colaboradores externos, injetados via traits em `core::hw` e `core::fs`.

// Módulos principais do projeto.
pub mod core;

// Re-exportações para facilitar o uso.
pub use crate::core::boot::{BootInfo, BootOrchestrator, BootOutcome};
pub use crate::core::browser::{browse_files, BrowseResult};
pub use crate::core::cartridge::{RomImage, RomLoader, RomPatcher, SaveDatabase, SaveType};
pub use crate::core::config::{ConfigParser, OafConfig};
pub use crate::core::error::{Error, Result};
pub use crate::core::fs::FileSystem;
pub use crate::core::hw::Hardware;
pub use crate::core::runtime::RuntimeTickLoop;

/// Versão do firmware.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
