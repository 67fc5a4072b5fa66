//! ROM staging: read, pad, mirror, open-bus fill.

use log::{debug, info, warn};

use super::rom::RomImage;
use super::{FILL_BYTE, MAX_ROM_SIZE, MIN_ROM_SIZE, MIRROR_FACTOR};
use crate::core::error::{Error, Result};
use crate::core::fs::{FileHandle, FileSystem, FsError, OpenMode};

/// Result of [`RomLoader::stage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StagedRom {
    /// Padded, unmirrored size. Save database hashes cover exactly this much.
    pub size: usize,
    /// Bytes actually read from the file.
    pub file_size: usize,
    /// The file did not fit the window and was cut.
    pub truncated: bool,
}

/// Size of the chip a `file_size` byte dump came from.
pub fn padded_size(file_size: usize) -> usize {
    file_size.next_power_of_two().max(MIN_ROM_SIZE)
}

/// Fill `buf[start..]` with the value an undriven cartridge bus returns:
/// each halfword reads back as its own halfword address.
///
/// `start` must be halfword aligned.
pub fn fill_open_bus(buf: &mut [u8], start: usize) {
    debug_assert!(start % 2 == 0, "open bus fill must start on a halfword");
    for (i, half) in buf[start..].chunks_exact_mut(2).enumerate() {
        let addr = (start >> 1) + i;
        half.copy_from_slice(&(addr as u16).to_le_bytes());
    }
}

/// Pad a freshly read dump in place and return its logical size.
///
/// `buf` is the whole window and holds `file_size` real bytes at the start.
/// The gap up to the chip size becomes [`FILL_BYTE`], a minimum-size chip is
/// mirrored [`MIRROR_FACTOR`] times and the rest of the window is open bus.
/// The returned size never includes the mirrors.
pub fn fix_rom_padding(buf: &mut [u8], file_size: usize) -> usize {
    let window = buf.len();
    let file_size = file_size.min(window);
    let rom_size = padded_size(file_size).min(window);
    buf[file_size..rom_size].fill(FILL_BYTE);

    let mut mirrored = rom_size;
    if rom_size == MIN_ROM_SIZE && window >= MIN_ROM_SIZE * MIRROR_FACTOR {
        // Classic NES Series e outros com ROM de 8 Mbit.
        mirrored = MIN_ROM_SIZE * MIRROR_FACTOR;
        for dst in (rom_size..mirrored).step_by(rom_size) {
            buf.copy_within(0..rom_size, dst);
        }
    }

    if mirrored < window {
        fill_open_bus(buf, mirrored);
    }
    debug!("rom padded: {} -> {} (mirrored {})", file_size, rom_size, mirrored);

    rom_size
}

/// Loads ROM files into a [`RomImage`].
#[derive(Debug, Clone, Copy)]
pub struct RomLoader {
    window: usize,
}

impl Default for RomLoader {
    fn default() -> Self {
        Self {
            window: MAX_ROM_SIZE,
        }
    }
}

impl RomLoader {
    /// Cria um loader com a janela de 32 MiB
    pub fn new() -> Self {
        Self::default()
    }

    /// Loader for a smaller window; see [`RomImage::with_window`].
    pub fn with_window(window: usize) -> Self {
        Self { window }
    }

    /// Janela usada pelo loader
    pub fn window(&self) -> usize {
        self.window
    }

    /// Fresh image sized for this loader.
    pub fn alloc_image(&self) -> Result<RomImage> {
        RomImage::with_window(self.window)
    }

    /// Read `path` into `image` and pad it.
    ///
    /// A file larger than the window is cut to the window; that is reported
    /// through [`StagedRom::truncated`], not as an error.
    pub fn stage<F: FileSystem + ?Sized>(
        &self,
        fs: &mut F,
        path: &str,
        image: &mut RomImage,
    ) -> Result<StagedRom> {
        if path.is_empty() || image.window() < self.window {
            return Err(Error::InvalidArgument);
        }

        let read;
        let file_size;
        let truncated;
        {
            let mut file = FileHandle::open(fs, path, OpenMode::READ)?;
            let full = usize::try_from(file.size()).unwrap_or(usize::MAX);
            truncated = full > self.window;
            file_size = full.min(self.window);
            if truncated {
                warn!("ROM {} is {} bytes, cut to {}", path, full, file_size);
            }
            read = file.read_full(&mut image.bytes_mut()[..file_size])?;
        }
        if read != file_size {
            return Err(Error::Fs(FsError::ShortRead));
        }

        let window = &mut image.bytes_mut()[..self.window];
        let size = fix_rom_padding(window, file_size);
        image.set_size(size);
        info!("ROM carregada: {} ({} bytes, logical {})", path, file_size, size);

        Ok(StagedRom {
            size,
            file_size,
            truncated,
        })
    }
}
