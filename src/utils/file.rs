use std::fs::{self, File};
use std::io::{self, BufReader, Read};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{Error, Result};

/// What happened when copying into a path that must not be overwritten
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    /// The destination did not exist and now holds the source bytes
    Copied,
    /// Something already occupied the destination; it was left untouched
    AlreadyExists,
}

/// Create a directory and its parents if it doesn't exist
pub fn ensure_directory_exists(dir: &Path) -> Result<()> {
    if !dir.is_dir() {
        debug!("Directory {} does not exist. Creating it now.", dir.display());
        fs::create_dir_all(dir).map_err(|source| Error::DirectoryCreate {
            path: dir.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

/// Compare two files byte for byte
pub fn files_identical(a: &Path, b: &Path) -> io::Result<bool> {
    let len = fs::metadata(a)?.len();
    if fs::metadata(b)?.len() != len {
        return Ok(false);
    }

    let mut reader_a = BufReader::new(File::open(a)?);
    let mut reader_b = BufReader::new(File::open(b)?);
    let mut buf_a = [0u8; 8192];
    let mut buf_b = [0u8; 8192];
    let mut remaining = len;

    while remaining > 0 {
        let chunk = remaining.min(buf_a.len() as u64) as usize;
        reader_a.read_exact(&mut buf_a[..chunk])?;
        reader_b.read_exact(&mut buf_b[..chunk])?;
        if buf_a[..chunk] != buf_b[..chunk] {
            return Ok(false);
        }
        remaining -= chunk as u64;
    }
    Ok(true)
}

/// Copy `src` to `dest` without ever replacing an existing `dest`.
///
/// The bytes are staged in a temporary file next to `dest` and linked into
/// place with a no-clobber rename, so a partially written font never shows
/// up at `dest` and two writers cannot both win.
pub fn copy_no_clobber(src: &Path, dest: &Path) -> Result<CopyOutcome> {
    let copy_error = |source: io::Error| Error::Copy {
        from: src.to_path_buf(),
        to: dest.to_path_buf(),
        source,
    };

    if dest.exists() {
        return Ok(CopyOutcome::AlreadyExists);
    }

    let dir = dest
        .parent()
        .ok_or_else(|| Error::InvalidPath(dest.to_path_buf()))?;

    let mut staged = NamedTempFile::new_in(dir).map_err(copy_error)?;
    let mut source = File::open(src).map_err(copy_error)?;
    io::copy(&mut source, staged.as_file_mut()).map_err(copy_error)?;
    // staged files are created owner-only; placed fonts keep the source's mode
    let permissions = source.metadata().map_err(copy_error)?.permissions();
    staged.as_file().set_permissions(permissions).map_err(copy_error)?;
    staged.as_file().sync_all().map_err(copy_error)?;

    match staged.persist_noclobber(dest) {
        Ok(_) => Ok(CopyOutcome::Copied),
        Err(err) if err.error.kind() == io::ErrorKind::AlreadyExists => {
            debug!("{} appeared while copying, leaving it in place", dest.display());
            Ok(CopyOutcome::AlreadyExists)
        }
        Err(err) => Err(copy_error(err.error)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_directory_creates_nested() {
        let temp = tempfile::tempdir().unwrap();
        let nested = temp.path().join("truetype").join("firacode");
        ensure_directory_exists(&nested).unwrap();
        assert!(nested.is_dir());
        // second call is a no-op
        ensure_directory_exists(&nested).unwrap();
    }

    #[test]
    fn ensure_directory_fails_under_a_file() {
        let temp = tempfile::tempdir().unwrap();
        let blocker = temp.path().join("truetype");
        fs::write(&blocker, b"not a directory").unwrap();

        let err = ensure_directory_exists(&blocker.join("firacode")).unwrap_err();
        assert!(matches!(err, Error::DirectoryCreate { .. }));
    }

    #[test]
    fn identical_and_different_files() {
        let temp = tempfile::tempdir().unwrap();
        let a = temp.path().join("a.ttf");
        let b = temp.path().join("b.ttf");
        let c = temp.path().join("c.ttf");
        let d = temp.path().join("d.ttf");
        fs::write(&a, b"\x00\x01\x00\x00glyphs").unwrap();
        fs::write(&b, b"\x00\x01\x00\x00glyphs").unwrap();
        fs::write(&c, b"\x00\x01\x00\x00glyphz").unwrap();
        fs::write(&d, b"\x00\x01").unwrap();

        assert!(files_identical(&a, &b).unwrap());
        assert!(!files_identical(&a, &c).unwrap());
        assert!(!files_identical(&a, &d).unwrap());
    }

    #[test]
    fn identical_large_files() {
        let temp = tempfile::tempdir().unwrap();
        let a = temp.path().join("a.otf");
        let b = temp.path().join("b.otf");
        let data: Vec<u8> = (0..50_000u32).map(|i| (i % 251) as u8).collect();
        fs::write(&a, &data).unwrap();
        fs::write(&b, &data).unwrap();
        assert!(files_identical(&a, &b).unwrap());
    }

    #[test]
    fn copy_no_clobber_copies_then_refuses() {
        let temp = tempfile::tempdir().unwrap();
        let src = temp.path().join("src.ttf");
        let dest = temp.path().join("dest.ttf");
        fs::write(&src, b"first").unwrap();

        assert_eq!(copy_no_clobber(&src, &dest).unwrap(), CopyOutcome::Copied);
        assert_eq!(fs::read(&dest).unwrap(), b"first");

        fs::write(&src, b"second").unwrap();
        assert_eq!(copy_no_clobber(&src, &dest).unwrap(), CopyOutcome::AlreadyExists);
        assert_eq!(fs::read(&dest).unwrap(), b"first");
    }

    #[test]
    fn copy_missing_source_is_copy_error() {
        let temp = tempfile::tempdir().unwrap();
        let err = copy_no_clobber(&temp.path().join("missing.ttf"), &temp.path().join("out.ttf"))
            .unwrap_err();
        assert!(matches!(err, Error::Copy { .. }));
        // no staging file left behind
        assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
    }

    #[cfg(unix)]
    #[test]
    fn copy_keeps_source_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let temp = tempfile::tempdir().unwrap();
        let src = temp.path().join("src.ttf");
        let dest = temp.path().join("dest.ttf");
        fs::write(&src, b"shared font").unwrap();
        fs::set_permissions(&src, fs::Permissions::from_mode(0o644)).unwrap();

        assert_eq!(copy_no_clobber(&src, &dest).unwrap(), CopyOutcome::Copied);
        let mode = fs::metadata(&dest).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o644);
    }

    #[test]
    fn empty_files_are_identical() {
        let temp = tempfile::tempdir().unwrap();
        let a = temp.path().join("a.ttf");
        let b = temp.path().join("b.ttf");
        fs::write(&a, b"").unwrap();
        fs::write(&b, b"").unwrap();
        assert!(files_identical(&a, &b).unwrap());
    }
}
