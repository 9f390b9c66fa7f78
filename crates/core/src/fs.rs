//! Durable file primitives.
//!
//! Every whole-file write goes through a temporary sibling followed by a rename,
//! so a crash leaves either the previous contents or the new contents on disk,
//! never a torn write. Append-only logs are flushed with `sync_data` per line.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

use crate::error::Error;
use crate::result::Result;

/// Create `dir` and all missing parents.
///
/// # Errors
///
/// Returns [`Error::DirectoryCreationFailed`] if the directory cannot be created,
/// including when a regular file already occupies the path.
pub async fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .await
        .map_err(|e| Error::directory_creation_failed(dir, e.to_string()))
}

/// Read a file to a string, returning `None` when it does not exist.
///
/// # Errors
///
/// Returns [`Error::FileReadFailed`] for any I/O failure other than not-found.
pub async fn read_optional(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path).await {
        Ok(contents) => Ok(Some(contents)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::file_read_failed(path, e.to_string())),
    }
}

/// Read every non-blank line of a file; a missing file yields no lines.
///
/// # Errors
///
/// Returns [`Error::FileReadFailed`] for any I/O failure other than not-found.
pub async fn read_lines(path: &Path) -> Result<Vec<String>> {
    Ok(read_optional(path)
        .await?
        .map(|contents| {
            contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default())
}

/// Serialize `value` as pretty JSON and atomically replace `path` with it.
///
/// # Errors
///
/// Returns an error if encoding, writing the temporary file, syncing, or the
/// final rename fails. On error the previous contents of `path` are intact.
pub async fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let payload = encode_pretty(value)?;
    if let Some(parent) = path.parent() {
        ensure_dir(parent).await?;
    }
    replace_with(path, &payload).await
}

/// Like [`write_json_atomic`] but refuses to replace an existing file.
///
/// # Errors
///
/// Returns [`Error::AlreadyExists`] when `path` is already present, or any
/// error [`write_json_atomic`] can return.
pub async fn create_json_exclusive<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let payload = encode_pretty(value)?;
    if let Some(parent) = path.parent() {
        ensure_dir(parent).await?;
    }
    let exists = fs::try_exists(path)
        .await
        .map_err(|e| Error::file_read_failed(path, e.to_string()))?;
    if exists {
        return Err(Error::AlreadyExists {
            path: path.to_path_buf(),
        });
    }
    replace_with(path, &payload).await
}

/// Append `value` as one compact JSON line.
///
/// # Errors
///
/// Returns an error if encoding, opening, writing, or syncing fails.
pub async fn append_json_line<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let mut line =
        serde_json::to_vec(value).map_err(|e| Error::json_encode_failed(e.to_string()))?;
    line.push(b'\n');

    if let Some(parent) = path.parent() {
        ensure_dir(parent).await?;
    }
    let write_err = |e: std::io::Error| Error::file_write_failed(path, e.to_string());
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await
        .map_err(write_err)?;
    file.write_all(&line).await.map_err(write_err)?;
    file.sync_data().await.map_err(write_err)
}

fn encode_pretty<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    let mut payload =
        serde_json::to_vec_pretty(value).map_err(|e| Error::json_encode_failed(e.to_string()))?;
    payload.push(b'\n');
    Ok(payload)
}

fn temp_sibling(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map_or_else(|| "state".into(), |n| n.to_string_lossy().into_owned());
    path.with_file_name(format!(".{name}.tmp"))
}

async fn replace_with(path: &Path, payload: &[u8]) -> Result<()> {
    let tmp = temp_sibling(path);
    let tmp_err = |e: std::io::Error| Error::file_write_failed(&tmp, e.to_string());

    let mut file = fs::File::create(&tmp).await.map_err(tmp_err)?;
    file.write_all(payload).await.map_err(tmp_err)?;
    file.sync_all().await.map_err(tmp_err)?;
    drop(file);

    if let Err(e) = fs::rename(&tmp, path).await {
        let _ = fs::remove_file(&tmp).await;
        return Err(Error::file_write_failed(path, e.to_string()));
    }
    sync_parent(path).await
}

#[cfg(unix)]
async fn sync_parent(path: &Path) -> Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    let dir = fs::File::open(parent)
        .await
        .map_err(|e| Error::file_write_failed(parent, e.to_string()))?;
    dir.sync_all()
        .await
        .map_err(|e| Error::file_write_failed(parent, e.to_string()))
}

#[cfg(not(unix))]
async fn sync_parent(_path: &Path) -> Result<()> {
    Ok(())
}
