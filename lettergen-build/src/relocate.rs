//! Copy primitive and the batch relocator.
//!
//! ## `copy_file`: 4-step protocol
//!
//! 1. Create the destination's parent directories.
//! 2. Copy bytes to `<dest>.lettergen.tmp`.
//! 3. Rename to the final path (atomic on POSIX).
//! 4. On rename failure, remove the `.tmp` sibling.
//!
//! A destination therefore either holds the complete file under its final
//! name or nothing new at all.

use std::path::{Path, PathBuf};

use lettergen_core::MovableFile;

use crate::error::CopyError;

fn copy_err(from: &Path, to: &Path, source: std::io::Error) -> CopyError {
    CopyError {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    }
}

/// Copy `from` to `to`, creating parent directories as needed.
pub fn copy_file(from: &Path, to: &Path) -> Result<(), CopyError> {
    let tmp = PathBuf::from(format!("{}.lettergen.tmp", to.display()));
    copy_file_with_tmp(from, to, &tmp)
}

fn copy_file_with_tmp(from: &Path, to: &Path, tmp: &Path) -> Result<(), CopyError> {
    if let Some(parent) = to.parent() {
        std::fs::create_dir_all(parent).map_err(|e| copy_err(from, to, e))?;
    }
    std::fs::copy(from, tmp).map_err(|e| {
        let _ = std::fs::remove_file(tmp);
        copy_err(from, to, e)
    })?;
    if let Err(e) = std::fs::rename(tmp, to) {
        let _ = std::fs::remove_file(tmp);
        return Err(copy_err(from, to, e));
    }
    Ok(())
}

/// Copy every file into `dir`, keeping its base name.
///
/// Stops at the first failure without rolling back files already copied.
/// Returns the destination paths, in input order.
pub fn move_files_to_dir(files: &[&dyn MovableFile], dir: &Path) -> Result<Vec<PathBuf>, CopyError> {
    let mut moved = Vec::with_capacity(files.len());
    for file in files {
        let source = file.path();
        let Some(filename) = source.file_name() else {
            return Err(copy_err(
                source,
                dir,
                std::io::Error::new(std::io::ErrorKind::InvalidInput, "source has no file name"),
            ));
        };
        let destination = dir.join(filename);
        copy_file(source, &destination)?;
        tracing::debug!(
            source = %source.display(),
            destination = %destination.display(),
            "moving file to dir"
        );
        moved.push(destination);
    }
    Ok(moved)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use lettergen_core::{Asset, PdfFile};
    use std::fs;
    use tempfile::TempDir;

    fn file(dir: &Path, name: &str, content: &str) -> PathBuf {
        let p = dir.join(name);
        fs::write(&p, content).unwrap();
        p
    }

    #[test]
    fn copy_creates_parent_directories() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();
        let from = file(src.path(), "logo.png", "png");
        let to = dst.path().join("a").join("b").join("logo.png");
        copy_file(&from, &to).expect("copy");
        assert_eq!(fs::read_to_string(&to).unwrap(), "png");
    }

    #[test]
    fn copy_leaves_no_tmp_behind() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();
        let from = file(src.path(), "x.pdf", "pdf");
        let to = dst.path().join("x.pdf");
        copy_file(&from, &to).expect("copy");
        assert!(!dst.path().join("x.pdf.lettergen.tmp").exists());
    }

    #[test]
    fn copy_missing_source_is_error_and_cleans_tmp() {
        let dst = TempDir::new().unwrap();
        let to = dst.path().join("x.pdf");
        let err = copy_file(&dst.path().join("missing.pdf"), &to).unwrap_err();
        assert!(err.to_string().contains("missing.pdf"), "got: {err}");
        assert!(!to.exists());
        assert!(!dst.path().join("x.pdf.lettergen.tmp").exists());
    }

    #[test]
    fn relocation_preserves_base_names_across_kinds() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();
        let asset = Asset::new(file(src.path(), "letterhead.pdf", "head"));
        let pdf = PdfFile { path: file(src.path(), "alice.pdf", "alice") };

        let moved = move_files_to_dir(&[&asset, &pdf], dst.path()).expect("move");
        assert_eq!(
            moved,
            vec![dst.path().join("letterhead.pdf"), dst.path().join("alice.pdf")]
        );
        for (m, src_path) in moved.iter().zip([&asset.path, &pdf.path]) {
            assert_eq!(m.file_name(), src_path.file_name());
        }
        // Sources stay in place: relocation copies.
        assert!(asset.path.exists());
    }

    #[test]
    fn relocation_stops_at_first_failure_without_rollback() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();
        let a = Asset::new(file(src.path(), "a.sty", "a"));
        let missing = Asset::new(src.path().join("missing.png"));
        let c = Asset::new(file(src.path(), "c.png", "c"));

        let err = move_files_to_dir(&[&a, &missing, &c], dst.path()).unwrap_err();
        assert_eq!(err.from, missing.path);
        assert!(dst.path().join("a.sty").exists(), "prefix must stay copied");
        assert!(!dst.path().join("c.png").exists(), "nothing after the failure");
    }

    #[test]
    fn relocation_rejects_path_without_file_name() {
        let dst = TempDir::new().unwrap();
        let root = Asset::new("/");
        let err = move_files_to_dir(&[&root], dst.path()).unwrap_err();
        assert_eq!(err.source.kind(), std::io::ErrorKind::InvalidInput);
    }

    #[test]
    fn empty_batch_is_a_noop() {
        let dst = TempDir::new().unwrap();
        let target = dst.path().join("never-created");
        let moved = move_files_to_dir(&[], &target).expect("move");
        assert!(moved.is_empty());
        assert!(!target.exists());
    }

    #[test]
    #[cfg(unix)]
    fn rename_failure_leaves_original_and_cleans_tmp() {
        use std::os::unix::fs::PermissionsExt;

        let root = TempDir::new().unwrap();
        let readonly_dir = root.path().join("readonly");
        fs::create_dir_all(&readonly_dir).unwrap();
        let to = readonly_dir.join("file.pdf");
        fs::write(&to, "original").unwrap();

        let mut perms = fs::metadata(&readonly_dir).unwrap().permissions();
        perms.set_mode(0o555);
        fs::set_permissions(&readonly_dir, perms).unwrap();

        let src = TempDir::new().unwrap();
        let from = file(src.path(), "file.pdf", "new content");
        let tmp_dir = TempDir::new().unwrap();
        let tmp = tmp_dir.path().join("file.pdf.lettergen.tmp");

        let result = copy_file_with_tmp(&from, &to, &tmp);

        let mut perms = fs::metadata(&readonly_dir).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&readonly_dir, perms).unwrap();

        // root bypasses directory permissions; only assert when the rename failed.
        if result.is_err() {
            assert_eq!(fs::read_to_string(&to).unwrap(), "original");
            assert!(!tmp.exists(), ".lettergen.tmp should be cleaned up");
        }
    }
}
