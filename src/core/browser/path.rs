//! Path buffer helpers for firmware paths (`sdmc:/dir/file`).

use crate::core::error::Result;

/// Separador de caminho no cartão
pub const SEPARATOR: char = '/';
const DRIVE_SEPARATOR: char = ':';

/// Append `segment` to `base`, inserting one separator unless `base`
/// already ends with one.
///
/// `base` is moved in: if growing it fails the buffer is released and the
/// caller gets `OutOfMemory` with nothing left to clean up.
pub fn path_append(mut base: String, segment: &str) -> Result<String> {
    let add_sep = !base.ends_with(SEPARATOR);
    base.try_reserve(segment.len() + usize::from(add_sep))?;
    if add_sep {
        base.push(SEPARATOR);
    }
    base.push_str(segment);
    Ok(base)
}

/// Truncate `path` to its parent directory. Returns `false` (and leaves the
/// path alone) when there is no parent, e.g. at the drive root.
///
/// The drive root keeps its separator: `sdmc:/roms` becomes `sdmc:/`, not
/// `sdmc:`.
pub fn pop_to_parent(path: &mut String) -> bool {
    let mut end = path.len();
    // Ignore one trailing separator unless it is the root's.
    if path.ends_with(SEPARATOR) && !path[..end - 1].ends_with(DRIVE_SEPARATOR) && end > 1 {
        end -= 1;
    }

    let Some(sep) = path[..end].rfind(SEPARATOR) else {
        return false;
    };
    let cut = if sep == 0 || path[..sep].ends_with(DRIVE_SEPARATOR) {
        sep + 1
    } else {
        sep
    };
    if cut >= path.len() {
        return false;
    }
    path.truncate(cut);
    true
}

/// Final path component.
pub fn file_name(path: &str) -> &str {
    path.rfind(SEPARATOR).map_or(path, |i| &path[i + 1..])
}

/// Replace the extension of the final component with `ext` (which carries
/// its own leading dot). A name without an extension gets `ext` appended.
pub fn swap_extension(path: &str, ext: &str) -> String {
    let name_start = path.rfind(SEPARATOR).map_or(0, |i| i + 1);
    let stem_end = path[name_start..]
        .rfind('.')
        .filter(|&dot| dot > 0)
        .map_or(path.len(), |dot| name_start + dot);
    let mut out = String::with_capacity(stem_end + ext.len());
    out.push_str(&path[..stem_end]);
    out.push_str(ext);
    out
}
