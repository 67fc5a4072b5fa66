//! Small path records kept in the work directory.

use log::debug;

use crate::core::error::{Error, Result};
use crate::core::fs::{FileHandle, FileSystem, FsError, OpenMode};

/// ROM to boot without showing the browser.
pub const AUTOBOOT_RECORD: &str = "autoboot.txt";

/// Directory the browser was in when the last ROM was picked.
pub const LASTDIR_RECORD: &str = "lastdir.txt";

/// Read a whole record as a path.
///
/// Trailing NUL, CR and LF bytes are dropped so hand-edited files work. A
/// missing record is [`Error::NotFound`].
pub fn load_path_record<F: FileSystem + ?Sized>(fs: &mut F, name: &str) -> Result<String> {
    let mut buf = Vec::new();
    {
        let mut file = FileHandle::open(fs, name, OpenMode::READ)?;
        let size = usize::try_from(file.size()).map_err(|_| Error::OutOfMemory)?;
        buf.try_reserve_exact(size)?;
        buf.resize(size, 0);
        if file.read_full(&mut buf)? != size {
            return Err(Error::Fs(FsError::ShortRead));
        }
    }

    while matches!(buf.last().copied(), Some(0 | b'\r' | b'\n')) {
        buf.pop();
    }
    let path = String::from_utf8(buf).map_err(|_| Error::InvalidArgument)?;
    debug!("{}: {:?}", name, path);
    Ok(path)
}

/// Overwrite a record with `path`.
pub fn store_path_record<F: FileSystem + ?Sized>(fs: &mut F, name: &str, path: &str) -> Result<()> {
    fs.quick_write(name, path.as_bytes())?;
    Ok(())
}
