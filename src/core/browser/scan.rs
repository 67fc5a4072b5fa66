//! Directory scanner: fills a [`DirList`] from the filesystem collaborator.

use log::{debug, info};

use super::dir_list::{DirEntry, DirList, EntryKind};
use crate::core::error::{Error, Result};
use crate::core::fs::{DirHandle, FileInfo, FileSystem};

/// Children fetched per directory read.
pub const DIR_READ_BLOCKS: usize = 10;

/// A file is listed when its name is longer than `filter`, ends with it
/// (case-sensitive) and does not start with a dot.
pub fn file_passes_filter(name: &str, filter: &str) -> bool {
    name.len() > filter.len()
        && name.as_bytes().ends_with(filter.as_bytes())
        && !name.starts_with('.')
}

/// Tipo da entrada a partir dos atributos FAT
fn classify(info: &FileInfo) -> EntryKind {
    if info.is_dir() {
        EntryKind::Directory
    } else {
        EntryKind::File
    }
}

/// Scan `path`, keeping every directory and the files accepted by
/// [`file_passes_filter`]. The result is sorted.
///
/// The directory handle is closed on every path out of this function, and a
/// partially filled list is dropped on error.
pub fn scan_dir<F: FileSystem + ?Sized>(fs: &mut F, path: &str, filter: &str) -> Result<DirList> {
    if path.is_empty() {
        return Err(Error::InvalidArgument);
    }

    let mut batch: Vec<FileInfo> = Vec::new();
    batch.try_reserve_exact(DIR_READ_BLOCKS)?;
    let mut list = DirList::new()?;

    {
        let mut dir = DirHandle::open(fs, path)?;
        while dir.read_batch(&mut batch, DIR_READ_BLOCKS)? != 0 {
            for info in batch.drain(..) {
                let kind = classify(&info);
                if kind == EntryKind::File && !file_passes_filter(&info.name, filter) {
                    continue;
                }
                if list.is_full() {
                    list = list.grow()?;
                    debug!("dir list grown to {}", list.capacity());
                }
                list.push(DirEntry::new(kind, info.name));
            }
        }
    }

    list.sort();
    info!("scanned {}: {} entries", path, list.len());
    Ok(list)
}

/// Rescan into `slot`. Whatever the slot held is released before the scan
/// starts; on failure the slot is left empty.
pub fn rescan_into<F: FileSystem + ?Sized>(
    fs: &mut F,
    path: &str,
    filter: &str,
    slot: &mut Option<DirList>,
) -> Result<()> {
    drop(slot.take());
    *slot = Some(scan_dir(fs, path, filter)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fs::{FsError, HostFs};
    use crate::core::testing::ScriptedFs;
    use std::fs;

    fn sd_with(files: &[&str], dirs: &[&str]) -> (tempfile::TempDir, HostFs) {
        let tmp = tempfile::tempdir().unwrap();
        for d in dirs {
            fs::create_dir_all(tmp.path().join(d)).unwrap();
        }
        for f in files {
            fs::write(tmp.path().join(f), b"x").unwrap();
        }
        let hfs = HostFs::new(tmp.path());
        (tmp, hfs)
    }

    fn names(list: &DirList) -> Vec<&str> {
        list.iter().map(DirEntry::name).collect()
    }

    #[test]
    fn test_filter_rules() {
        assert!(file_passes_filter("game.gba", ".gba"));
        assert!(!file_passes_filter(".gba", ".gba"));
        assert!(!file_passes_filter("game.GBA", ".gba"));
        assert!(!file_passes_filter(".hidden.gba", ".gba"));
        assert!(!file_passes_filter("game.gba.txt", ".gba"));
        assert!(file_passes_filter("x.gba", ".gba"));
    }

    #[test]
    fn test_scan_orders_dirs_then_files() {
        let (_tmp, mut hfs) = sd_with(&["b.gba", "A.gba"], &["sub"]);
        let list = scan_dir(&mut hfs, "sdmc:/", ".gba").unwrap();
        assert_eq!(names(&list), ["sub", "A.gba", "b.gba"]);
        assert!(list.get(0).unwrap().is_dir());
    }

    #[test]
    fn test_scan_applies_filter_to_files_only() {
        let (_tmp, mut hfs) = sd_with(
            &["a.gba", "notes.txt", ".x.gba", "upper.GBA"],
            &[".config", "roms.txt"],
        );
        let list = scan_dir(&mut hfs, "sdmc:/", ".gba").unwrap();
        assert_eq!(names(&list), [".config", "roms.txt", "a.gba"]);
    }

    #[test]
    fn test_scan_grows_past_initial_capacity() {
        let tmp = tempfile::tempdir().unwrap();
        for i in 0..300 {
            fs::write(tmp.path().join(format!("rom{i:03}.gba")), b"").unwrap();
        }
        let mut hfs = HostFs::new(tmp.path());
        let list = scan_dir(&mut hfs, "sdmc:/", ".gba").unwrap();
        assert_eq!(list.len(), 300);
        assert_eq!(list.capacity(), 3 * 128);
        assert!(list
            .entries()
            .windows(2)
            .all(|w| w[0].name().as_bytes() <= w[1].name().as_bytes()));
    }

    #[test]
    fn test_scan_missing_dir_is_no_usable_path() {
        let (_tmp, mut hfs) = sd_with(&[], &[]);
        assert_eq!(
            scan_dir(&mut hfs, "sdmc:/gone", ".gba").unwrap_err(),
            Error::NoUsablePath
        );
        assert_eq!(scan_dir(&mut hfs, "", ".gba").unwrap_err(), Error::InvalidArgument);
    }

    #[test]
    fn test_read_error_closes_dir_and_propagates() {
        let names: Vec<String> = (0..25).map(|i| format!("r{i:02}.gba")).collect();
        let names: Vec<&str> = names.iter().map(String::as_str).collect();

        // Falha no terceiro lote, depois de 20 entradas já lidas.
        let mut sfs = ScriptedFs::with_files(&names).failing_on_batch(2, FsError::Disk);
        assert_eq!(
            scan_dir(&mut sfs, "sdmc:/roms", ".gba").unwrap_err(),
            Error::Fs(FsError::Disk)
        );
        assert_eq!((sfs.dir_opens, sfs.dir_closes), (1, 1));

        let mut sfs = ScriptedFs::with_files(&names).failing_on_batch(0, FsError::Denied);
        assert_eq!(
            scan_dir(&mut sfs, "sdmc:/roms", ".gba").unwrap_err(),
            Error::Fs(FsError::Denied)
        );
        assert_eq!(sfs.open_dirs(), 0);
    }

    #[test]
    fn test_rescan_read_error_empties_slot() {
        let mut sfs = ScriptedFs::with_files(&["a.gba", "b.gba"]);
        let mut slot = None;
        rescan_into(&mut sfs, "sdmc:/", ".gba", &mut slot).unwrap();
        assert_eq!(slot.as_ref().map(DirList::len), Some(2));

        let mut sfs = ScriptedFs::with_files(&["a.gba"]).failing_on_batch(1, FsError::Disk);
        assert_eq!(
            rescan_into(&mut sfs, "sdmc:/", ".gba", &mut slot),
            Err(Error::Fs(FsError::Disk))
        );
        assert!(slot.is_none());
        assert_eq!(sfs.dir_opens, sfs.dir_closes);
    }

    #[test]
    fn test_rescan_replaces_slot() {
        let (_tmp, mut hfs) = sd_with(&["a.gba", "d/b.gba"], &["d"]);
        let mut slot = None;
        rescan_into(&mut hfs, "sdmc:/", ".gba", &mut slot).unwrap();
        assert_eq!(names(slot.as_ref().unwrap()), ["d", "a.gba"]);

        rescan_into(&mut hfs, "sdmc:/d", ".gba", &mut slot).unwrap();
        assert_eq!(names(slot.as_ref().unwrap()), ["b.gba"]);

        assert!(rescan_into(&mut hfs, "sdmc:/nope", ".gba", &mut slot).is_err());
        assert!(slot.is_none());
    }
}
