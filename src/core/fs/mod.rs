//! Filesystem collaborator.
//!
//! The firmware talks to the SD card through a FatFs-like surface: directory
//! handles read in batches, file handles with a size query, and a few
//! whole-path helpers. [`DirHandle`] and [`FileHandle`] wrap the raw handles
//! so they are closed on every exit path.

#[cfg(feature = "host-fs")]
pub mod host;

#[cfg(feature = "host-fs")]
pub use host::HostFs;

use bitflags::bitflags;
use thiserror::Error;

/// Erros reportados pela camada de sistema de arquivos
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsError {
    #[error("no such file")]
    NoFile,
    #[error("no such path")]
    NoPath,
    #[error("already exists")]
    Exist,
    #[error("access denied")]
    Denied,
    #[error("short read")]
    ShortRead,
    #[error("disk error")]
    Disk,
    #[error("fs error code {0}")]
    Other(u8),
}

/// Resultado das operações de sistema de arquivos
pub type FsResult<T> = std::result::Result<T, FsError>;

bitflags! {
    /// FAT attribute byte.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct FileAttr: u8 {
        const READ_ONLY = 0x01;
        const HIDDEN    = 0x02;
        const SYSTEM    = 0x04;
        const DIRECTORY = 0x10;
        const ARCHIVE   = 0x20;
    }
}

bitflags! {
    /// Open mode for [`FileSystem::open`]. Without `CREATE_ALWAYS` the file
    /// must already exist.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct OpenMode: u8 {
        const READ          = 0x01;
        const WRITE         = 0x02;
        const CREATE_ALWAYS = 0x08;
    }
}

/// One child returned by a batched directory read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    pub name: String,
    pub size: u64,
    pub attrib: FileAttr,
}

impl FileInfo {
    /// Retorna se é diretório
    pub fn is_dir(&self) -> bool {
        self.attrib.contains(FileAttr::DIRECTORY)
    }
}

/// Storage surface consumed by the browser and the boot pipeline.
pub trait FileSystem {
    type Dir;
    type File;

    /// Abre um diretório para leitura em lotes
    fn open_dir(&mut self, path: &str) -> FsResult<Self::Dir>;

    /// Replace the contents of `out` with up to `max` children.
    /// An empty batch means the listing is exhausted.
    fn read_dir(&mut self, dir: &mut Self::Dir, out: &mut Vec<FileInfo>, max: usize)
        -> FsResult<()>;

    /// Fecha o diretório
    fn close_dir(&mut self, dir: Self::Dir);

    /// Abre um arquivo
    fn open(&mut self, path: &str, mode: OpenMode) -> FsResult<Self::File>;

    /// Tamanho do arquivo em bytes
    fn size(&self, file: &Self::File) -> u64;

    /// Read into `buf`, returning the number of bytes read.
    fn read(&mut self, file: &mut Self::File, buf: &mut [u8]) -> FsResult<usize>;

    /// Fecha o arquivo
    fn close(&mut self, file: Self::File);

    /// Cria um diretório; `Exist` se já existe
    fn make_dir(&mut self, path: &str) -> FsResult<()>;

    /// Create `path` and any missing parents.
    fn make_path(&mut self, path: &str) -> FsResult<()>;

    /// Muda o diretório atual
    fn change_dir(&mut self, path: &str) -> FsResult<()>;

    /// Create or truncate `path` and write `data` to it.
    fn quick_write(&mut self, path: &str, data: &[u8]) -> FsResult<()>;
}

/// Open directory, closed on drop.
pub struct DirHandle<'a, F: FileSystem + ?Sized> {
    fs: &'a mut F,
    dir: Option<F::Dir>,
}

impl<'a, F: FileSystem + ?Sized> DirHandle<'a, F> {
    /// Abre `path`
    pub fn open(fs: &'a mut F, path: &str) -> FsResult<Self> {
        let dir = fs.open_dir(path)?;
        Ok(Self { fs, dir: Some(dir) })
    }

    /// Read the next batch into `out`. Returns the batch length.
    pub fn read_batch(&mut self, out: &mut Vec<FileInfo>, max: usize) -> FsResult<usize> {
        match self.dir.as_mut() {
            Some(dir) => {
                self.fs.read_dir(dir, out, max)?;
                Ok(out.len())
            }
            None => Ok(0),
        }
    }
}

impl<F: FileSystem + ?Sized> Drop for DirHandle<'_, F> {
    fn drop(&mut self) {
        if let Some(dir) = self.dir.take() {
            self.fs.close_dir(dir);
        }
    }
}

/// Open file, closed on drop.
pub struct FileHandle<'a, F: FileSystem + ?Sized> {
    fs: &'a mut F,
    file: Option<F::File>,
}

impl<'a, F: FileSystem + ?Sized> FileHandle<'a, F> {
    /// Abre `path` com `mode`
    pub fn open(fs: &'a mut F, path: &str, mode: OpenMode) -> FsResult<Self> {
        let file = fs.open(path, mode)?;
        Ok(Self { fs, file: Some(file) })
    }

    /// Tamanho do arquivo
    pub fn size(&self) -> u64 {
        self.file.as_ref().map_or(0, |f| self.fs.size(f))
    }

    /// Read until `buf` is full or the file ends. Returns the bytes read.
    pub fn read_full(&mut self, buf: &mut [u8]) -> FsResult<usize> {
        let Some(file) = self.file.as_mut() else {
            return Ok(0);
        };
        let mut total = 0;
        while total < buf.len() {
            let n = self.fs.read(file, &mut buf[total..])?;
            if n == 0 {
                break;
            }
            total += n;
        }
        Ok(total)
    }
}

impl<F: FileSystem + ?Sized> Drop for FileHandle<'_, F> {
    fn drop(&mut self) {
        if let Some(file) = self.file.take() {
            self.fs.close(file);
        }
    }
}
