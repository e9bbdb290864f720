//! Capability-based file helpers for journal databases and exports.
//!
//! Paths are UTF-8 (`camino`) and every access goes through a `cap-std`
//! directory handle opened from ambient authority at the path's anchor:
//! the filesystem root for absolute paths, the working directory otherwise.
#![forbid(unsafe_code)]

use std::io;

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};

/// Split `path` into the ambient anchor to open and the remainder below it.
///
/// Leading root, prefix, `.` and `..` components form the anchor.
fn split_anchor(path: &Utf8Path) -> (Utf8PathBuf, Utf8PathBuf) {
    let mut anchor = Utf8PathBuf::new();
    let mut rest = Utf8PathBuf::new();
    for component in path.components() {
        let leading = rest.as_str().is_empty()
            && matches!(
                component,
                Utf8Component::Prefix(_)
                    | Utf8Component::RootDir
                    | Utf8Component::CurDir
                    | Utf8Component::ParentDir
            );
        if leading {
            anchor.push(component);
        } else {
            rest.push(component);
        }
    }
    if anchor.as_str().is_empty() {
        anchor.push(".");
    }
    (anchor, rest)
}

fn parent_of(path: &Utf8Path) -> &Utf8Path {
    path.parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."))
}

fn file_name_of(path: &Utf8Path) -> io::Result<&str> {
    path.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{path} does not name a file"),
        )
    })
}

/// Open `dir` as a capability handle.
fn open_dir(dir: &Utf8Path) -> io::Result<fs_utf8::Dir> {
    let (anchor, rest) = split_anchor(dir);
    let base = fs_utf8::Dir::open_ambient_dir(&anchor, ambient_authority())?;
    if rest.as_str().is_empty() {
        Ok(base)
    } else {
        base.open_dir(&rest)
    }
}

/// Create every missing directory above `path`.
///
/// Paths without a parent, or whose parent is a bare anchor, need nothing.
///
/// # Errors
/// Propagates I/O failures from opening the anchor or creating directories.
pub fn ensure_parent_dir(path: &Utf8Path) -> io::Result<()> {
    let (anchor, rest) = split_anchor(parent_of(path));
    if rest.as_str().is_empty() {
        return Ok(());
    }
    fs_utf8::Dir::open_ambient_dir(&anchor, ambient_authority())?.create_dir_all(&rest)
}

/// Read a UTF-8 text file.
///
/// # Errors
/// Returns an error when the file is missing, unreadable or not UTF-8.
pub fn read_text_file(path: &Utf8Path) -> io::Result<String> {
    open_dir(parent_of(path))?.read_to_string(file_name_of(path)?)
}

/// Write `contents` to `path`, creating parent directories first.
///
/// An existing file is replaced.
///
/// # Errors
/// Propagates I/O failures from creating directories or writing the file.
pub fn write_file(path: &Utf8Path, contents: impl AsRef<[u8]>) -> io::Result<()> {
    let name = file_name_of(path)?;
    ensure_parent_dir(path)?;
    open_dir(parent_of(path))?.write(name, contents)
}

/// Report whether `path` names an existing regular file.
///
/// # Errors
/// Propagates I/O failures other than a missing file or directory.
pub fn is_file(path: &Utf8Path) -> io::Result<bool> {
    let dir = match open_dir(parent_of(path)) {
        Ok(dir) => dir,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(err) => return Err(err),
    };
    match dir.metadata(file_name_of(path)?) {
        Ok(meta) => Ok(meta.is_file()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    fn temp_root() -> (TempDir, Utf8PathBuf) {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf8 tempdir");
        (dir, root)
    }

    #[rstest]
    #[case("journal.db", ".", "journal.db")]
    #[case("/var/lib/journal.db", "/", "var/lib/journal.db")]
    #[case("../exports/out.json", "..", "exports/out.json")]
    #[case("./data/out.json", ".", "data/out.json")]
    fn anchors_split_from_the_remainder(
        #[case] path: &str,
        #[case] anchor: &str,
        #[case] rest: &str,
    ) {
        let (found_anchor, found_rest) = split_anchor(Utf8Path::new(path));
        assert_eq!(found_anchor, Utf8PathBuf::from(anchor));
        assert_eq!(found_rest, Utf8PathBuf::from(rest));
    }

    #[rstest]
    fn write_creates_missing_parents() {
        let (_guard, root) = temp_root();
        let target = root.join("nested/deeper/journal.json");
        write_file(&target, "{}").expect("write journal");
        assert_eq!(read_text_file(&target).expect("read journal"), "{}");
        assert!(is_file(&target).expect("stat journal"));
    }

    #[rstest]
    fn missing_files_are_not_files() {
        let (_guard, root) = temp_root();
        assert!(!is_file(&root.join("absent/journal.db")).expect("stat"));
        assert!(!is_file(&root.join("journal.db")).expect("stat"));
    }

    #[rstest]
    fn reading_a_missing_file_fails() {
        let (_guard, root) = temp_root();
        let err = read_text_file(&root.join("nope.json")).expect_err("missing file");
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[rstest]
    fn ensure_parent_dir_accepts_bare_names() {
        ensure_parent_dir(Utf8Path::new("journal.db")).expect("nothing to create");
    }
}
