//! Navegador de arquivos: listagem, navegação e seleção da ROM.
//!
//! The browser lists one directory at a time on the bottom-screen console,
//! directories first, files filtered by extension.

pub mod dir_list;
pub mod file_browser;
pub mod path;
pub mod scan;
pub mod view;

pub use dir_list::{DirEntry, DirList, EntryKind, DLIST_GROW_SIZE};
pub use file_browser::{browse_files_filtered, BrowseResult, BrowserState, FileBrowser, Navigator};
pub use path::{path_append, pop_to_parent};
pub use scan::{rescan_into, scan_dir};

use crate::core::error::Result;
use crate::core::fs::FileSystem;
use crate::core::hw::{Console, Gfx, Hid};

/// Only ROM images are listed.
pub const DEFAULT_FILTER: &str = ".gba";

/// Let the user pick a ROM under `base_path`.
pub fn browse_files<F, H>(fs: &mut F, hw: &mut H, base_path: &str) -> Result<BrowseResult>
where
    F: FileSystem + ?Sized,
    H: Gfx + Hid + Console + ?Sized,
{
    browse_files_filtered(fs, hw, base_path, DEFAULT_FILTER)
}
