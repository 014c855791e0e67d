//! Output file handling: atomic writes and on-disk hash checks.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use cytrus_schema::ContentHash;
use sha1::{Digest, Sha1};

/// Write `data` to `dest` so the file appears complete or not at all.
///
/// The bytes go to a temporary file in the destination directory which is
/// then renamed over `dest`. Parent directories are created as needed.
/// Executables get mode `0o755`, everything else `0o644`.
///
/// # Errors
///
/// Returns any I/O error from directory creation, writing or the rename.
pub async fn write_atomic(dest: &Path, data: Vec<u8>, executable: bool) -> std::io::Result<()> {
    let dest = dest.to_path_buf();
    tokio::task::spawn_blocking(move || write_atomic_blocking(&dest, &data, executable))
        .await
        .map_err(std::io::Error::other)?
}

fn write_atomic_blocking(dest: &Path, data: &[u8], executable: bool) -> std::io::Result<()> {
    let parent = dest
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
    std::fs::create_dir_all(&parent)?;

    let mut tmp = tempfile::NamedTempFile::new_in(&parent)?;
    tmp.write_all(data)?;
    tmp.flush()?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = if executable { 0o755 } else { 0o644 };
        tmp.as_file()
            .set_permissions(std::fs::Permissions::from_mode(mode))?;
    }
    #[cfg(not(unix))]
    let _ = executable;

    tmp.persist(dest).map_err(|e| e.error)?;
    Ok(())
}

/// SHA-1 of the file at `path`, hex-encoded.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read.
pub async fn sha1_file(path: &Path) -> std::io::Result<String> {
    let path = path.to_path_buf();
    tokio::task::spawn_blocking(move || {
        let mut hasher = Sha1::new();
        let mut file = std::fs::File::open(&path)?;
        let mut buffer = [0u8; 8192];
        loop {
            let count = file.read(&mut buffer)?;
            if count == 0 {
                break;
            }
            hasher.update(&buffer[..count]);
        }
        Ok::<String, std::io::Error>(hex::encode(hasher.finalize()))
    })
    .await
    .map_err(std::io::Error::other)?
}

/// Whether the file at `path` hashes to `expected`.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read.
pub async fn matches_hash(path: &Path, expected: &ContentHash) -> std::io::Result<bool> {
    if expected.is_empty() {
        return Ok(false);
    }
    Ok(sha1_file(path).await? == expected.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn creates_parents_and_writes_content() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("a").join("b").join("file.bin");

        write_atomic(&dest, b"hello".to_vec(), false).await.unwrap();

        assert_eq!(std::fs::read(&dest).unwrap(), b"hello");
        // Only the final file is left behind.
        let entries: Vec<_> = std::fs::read_dir(dest.parent().unwrap()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[tokio::test]
    async fn overwrites_existing_file() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("file.bin");
        std::fs::write(&dest, b"old contents").unwrap();

        write_atomic(&dest, b"new".to_vec(), false).await.unwrap();
        assert_eq!(std::fs::read(&dest).unwrap(), b"new");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn sets_mode_from_executable_flag() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let exe = dir.path().join("run.sh");
        let data = dir.path().join("data.txt");

        write_atomic(&exe, b"#!/bin/sh".to_vec(), true).await.unwrap();
        write_atomic(&data, b"plain".to_vec(), false).await.unwrap();

        let mode = |p: &Path| std::fs::metadata(p).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode(&exe), 0o755);
        assert_eq!(mode(&data), 0o644);
    }

    #[tokio::test]
    async fn hash_check() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("abc");
        std::fs::write(&path, b"abc").unwrap();

        let good = ContentHash::new("a9993e364706816aba3e25717850c26c9cd0d89d");
        let bad = ContentHash::new("0000000000000000000000000000000000000000");
        assert!(matches_hash(&path, &good).await.unwrap());
        assert!(!matches_hash(&path, &bad).await.unwrap());
        assert!(!matches_hash(&path, &ContentHash::default()).await.unwrap());
    }
}
