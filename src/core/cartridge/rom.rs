//! Staged ROM window.

use crate::core::error::{Error, Result};

use super::{MAX_ROM_SIZE, MIN_ROM_SIZE, MIRROR_FACTOR};

/// ROM bytes staged for the legacy side.
///
/// Backed by 32-bit words so the whole window is word aligned; byte access
/// goes through `bytemuck`. `size` is the logical (unmirrored, padded) size.
#[derive(Debug)]
pub struct RomImage {
    words: Vec<u32>,
    size: usize,
}

impl RomImage {
    /// Full 32 MiB window.
    pub fn new() -> Result<Self> {
        Self::with_window(MAX_ROM_SIZE)
    }

    /// `window` must be a power of two large enough to hold a mirrored
    /// minimum-size chip.
    pub fn with_window(window: usize) -> Result<Self> {
        if !window.is_power_of_two() || window < MIN_ROM_SIZE * MIRROR_FACTOR {
            return Err(Error::InvalidArgument);
        }
        let len = window / 4;
        let mut words = Vec::new();
        words.try_reserve_exact(len)?;
        words.resize(len, 0);
        Ok(Self { words, size: 0 })
    }

    /// Tamanho da janela alocada em bytes
    pub fn window(&self) -> usize {
        self.words.len() * 4
    }

    /// Logical ROM size, 0 until something was staged.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Define o tamanho lógico (limitado à janela)
    pub fn set_size(&mut self, size: usize) {
        debug_assert!(size <= self.window());
        self.size = size.min(self.window());
    }

    /// The unmirrored ROM.
    pub fn rom(&self) -> &[u8] {
        &self.bytes()[..self.size]
    }

    /// Janela inteira como bytes
    pub fn bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.words)
    }

    /// Janela inteira como bytes (mutável)
    pub fn bytes_mut(&mut self) -> &mut [u8] {
        bytemuck::cast_slice_mut(&mut self.words)
    }
}
