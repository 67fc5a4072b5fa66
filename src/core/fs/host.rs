//! [`FileSystem`] on top of `std::fs`.
//!
//! `sdmc:/` is mapped onto a host directory. Relative paths resolve against a
//! working directory tracked in firmware notation, so `change_dir` behaves like
//! `f_chdir` on the card.

use std::fs::{self, File, ReadDir};
use std::io::{self, ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

use log::debug;

use super::{FileAttr, FileInfo, FileSystem, FsError, FsResult, OpenMode};
use crate::core::SDMC_ROOT;

/// Host-backed SD card.
pub struct HostFs {
    root: PathBuf,
    cwd: String,
}

/// Open host file plus its size at open time.
pub struct HostFile {
    file: File,
    size: u64,
}

impl HostFs {
    /// Mapeia `sdmc:/` em `root`
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            cwd: SDMC_ROOT.to_string(),
        }
    }

    /// Current directory in firmware notation.
    pub fn cwd(&self) -> &str {
        &self.cwd
    }

    /// Segmentos do caminho absoluto. `..` nunca sobe acima de `sdmc:/`.
    fn segments<'p>(&'p self, path: &'p str) -> Vec<&'p str> {
        let (base, rest) = match path.strip_prefix(SDMC_ROOT) {
            Some(rest) => ("", rest),
            None => (self.cwd.strip_prefix(SDMC_ROOT).unwrap_or(&self.cwd), path),
        };
        let mut segs: Vec<&str> = Vec::new();
        for seg in base.split('/').chain(rest.split('/')) {
            match seg {
                "" | "." => {}
                ".." => {
                    segs.pop();
                }
                seg => segs.push(seg),
            }
        }
        segs
    }

    /// Caminho absoluto normalizado, em notação do cartão
    fn absolute(&self, path: &str) -> String {
        format!("{}{}", SDMC_ROOT, self.segments(path).join("/"))
    }

    /// Caminho no host
    fn resolve(&self, path: &str) -> PathBuf {
        self.segments(path)
            .into_iter()
            .fold(self.root.clone(), |acc, seg| acc.join(seg))
    }

    /// Converte erro de IO no erro do cartão
    fn io_to_fs(err: io::Error, host_path: &Path) -> FsError {
        match err.kind() {
            ErrorKind::NotFound => {
                let parent_exists = host_path.parent().is_some_and(Path::is_dir);
                if parent_exists {
                    FsError::NoFile
                } else {
                    FsError::NoPath
                }
            }
            ErrorKind::AlreadyExists => FsError::Exist,
            ErrorKind::PermissionDenied => FsError::Denied,
            _ => FsError::Disk,
        }
    }
}

impl FileSystem for HostFs {
    type Dir = ReadDir;
    type File = HostFile;

    fn open_dir(&mut self, path: &str) -> FsResult<ReadDir> {
        let host = self.resolve(path);
        if !host.is_dir() {
            return Err(FsError::NoPath);
        }
        fs::read_dir(&host).map_err(|e| Self::io_to_fs(e, &host))
    }

    fn read_dir(&mut self, dir: &mut ReadDir, out: &mut Vec<FileInfo>, max: usize) -> FsResult<()> {
        out.clear();
        while out.len() < max {
            let Some(entry) = dir.next() else { break };
            let entry = entry.map_err(|_| FsError::Disk)?;
            let meta = entry.metadata().map_err(|_| FsError::Disk)?;
            let mut attrib = FileAttr::empty();
            if meta.is_dir() {
                attrib |= FileAttr::DIRECTORY;
            } else {
                attrib |= FileAttr::ARCHIVE;
            }
            if meta.permissions().readonly() {
                attrib |= FileAttr::READ_ONLY;
            }
            out.push(FileInfo {
                name: entry.file_name().to_string_lossy().into_owned(),
                size: if meta.is_dir() { 0 } else { meta.len() },
                attrib,
            });
        }
        Ok(())
    }

    fn close_dir(&mut self, dir: ReadDir) {
        drop(dir);
    }

    fn open(&mut self, path: &str, mode: OpenMode) -> FsResult<HostFile> {
        let host = self.resolve(path);
        let file = if mode.contains(OpenMode::CREATE_ALWAYS) {
            File::create(&host)
        } else {
            fs::OpenOptions::new()
                .read(mode.contains(OpenMode::READ))
                .write(mode.contains(OpenMode::WRITE))
                .open(&host)
        }
        .map_err(|e| Self::io_to_fs(e, &host))?;
        let size = file.metadata().map_err(|_| FsError::Disk)?.len();
        Ok(HostFile { file, size })
    }

    fn size(&self, file: &HostFile) -> u64 {
        file.size
    }

    fn read(&mut self, file: &mut HostFile, buf: &mut [u8]) -> FsResult<usize> {
        file.file.read(buf).map_err(|_| FsError::Disk)
    }

    fn close(&mut self, file: HostFile) {
        drop(file);
    }

    fn make_dir(&mut self, path: &str) -> FsResult<()> {
        let host = self.resolve(path);
        fs::create_dir(&host).map_err(|e| Self::io_to_fs(e, &host))
    }

    fn make_path(&mut self, path: &str) -> FsResult<()> {
        let host = self.resolve(path);
        fs::create_dir_all(&host).map_err(|e| Self::io_to_fs(e, &host))
    }

    fn change_dir(&mut self, path: &str) -> FsResult<()> {
        let host = self.resolve(path);
        if !host.is_dir() {
            return Err(FsError::NoPath);
        }
        self.cwd = self.absolute(path);
        debug!("cwd: {}", self.cwd);
        Ok(())
    }

    fn quick_write(&mut self, path: &str, data: &[u8]) -> FsResult<()> {
        let host = self.resolve(path);
        let mut file = File::create(&host).map_err(|e| Self::io_to_fs(e, &host))?;
        file.write_all(data).map_err(|_| FsError::Disk)
    }
}
