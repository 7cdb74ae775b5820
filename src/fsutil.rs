use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};

/// Split a relative path into its named components using the host's path rules.
///
/// `.` components are dropped and any root or drive prefix is discarded, so the
/// result can always be joined below a base directory. Returns `None` if the path
/// contains `..`, which could climb back to (or above) that base.
#[must_use]
pub fn split_components(relative: &Path) -> Option<Vec<OsString>> {
    let mut out = Vec::new();
    for c in relative.components() {
        match c {
            Component::Normal(s) => out.push(s.to_os_string()),
            Component::ParentDir => return None,
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }
    Some(out)
}

// `Path::components` silently drops a trailing separator or `/.`; for a file path
// those mean "directory", so they have to be caught on the raw text.
fn names_a_directory(relative: &Path) -> bool {
    let bytes = relative.as_os_str().as_encoded_bytes();
    match bytes {
        [] => true,
        [.., last] if std::path::is_separator(char::from(*last)) => true,
        [b'.'] => true,
        [.., sep, b'.'] => std::path::is_separator(char::from(*sep)),
        _ => false,
    }
}

/// Split a relative file path into its parent components and final file name.
///
/// Returns `None` when there is no usable file name: empty input, a trailing
/// separator or `.`, or any `..` component.
#[must_use]
pub fn split_file_path(relative: &Path) -> Option<(Vec<OsString>, OsString)> {
    if names_a_directory(relative) {
        return None;
    }
    let mut parts = split_components(relative)?;
    let name = parts.pop()?;
    Some((parts, name))
}

/// Join components onto `base` in order.
#[must_use]
pub fn join_all(base: &Path, components: &[OsString]) -> PathBuf {
    let mut p = base.to_path_buf();
    p.extend(components);
    p
}

/// Create exactly one directory level if it is not already present.
///
/// Returns `true` when the directory was created by this call.
///
/// # Errors
/// Returns an error if the directory is missing and cannot be created, e.g.
/// because its parent does not exist.
pub fn create_dir_level(path: &Path) -> io::Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    fs::create_dir(path)?;
    Ok(true)
}

/// Open a file for writing, truncating any existing content.
///
/// # Errors
/// Returns an error if the file cannot be created/opened.
pub fn open_truncate(path: &Path) -> io::Result<File> {
    OpenOptions::new().write(true).create(true).truncate(true).open(path)
}

/// Replace the file's content with `content`, creating it if needed.
///
/// # Errors
/// Returns an error if the file cannot be opened or written.
pub fn write_truncate(path: &Path, content: &[u8]) -> io::Result<()> {
    let mut f = open_truncate(path)?;
    f.write_all(content)?;
    f.flush()
}
