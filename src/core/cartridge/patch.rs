//! Binary patch collaborator (IPS/UPS and friends live on the other side).

use super::rom::RomImage;
use crate::core::error::Result;

/// Aplica patches (IPS/UPS) à ROM carregada
pub trait RomPatcher {
    /// Apply whatever patches belong to `rom_path` to the staged image. May
    /// change the logical size through [`RomImage::set_size`].
    fn patch(&mut self, rom_path: &str, image: &mut RomImage) -> Result<()>;
}

/// Patcher that never finds a patch.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPatches;

impl RomPatcher for NoPatches {
    fn patch(&mut self, _rom_path: &str, _image: &mut RomImage) -> Result<()> {
        Ok(())
    }
}
