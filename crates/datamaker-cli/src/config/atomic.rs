use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::{ConfigError, ConfigResult, io_error};

/// Pretty-print `value` as JSON into `path`, replacing any previous file.
pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> ConfigResult<()> {
    let mut data = serde_json::to_vec_pretty(value)?;
    data.push(b'\n');
    write_bytes_atomic(path, &data)
}

/// Write through a sibling temp file and rename it over `path`.
///
/// Readers see either the old content or the complete new content.
pub fn write_bytes_atomic(path: &Path, data: &[u8]) -> ConfigResult<()> {
    let parent = path.parent().filter(|dir| !dir.as_os_str().is_empty());
    if let Some(dir) = parent {
        fs::create_dir_all(dir).map_err(io_error(dir))?;
    }

    let staging = staging_path(path)?;
    let mut file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(&staging)
        .map_err(io_error(&staging))?;
    file.write_all(data).map_err(io_error(&staging))?;
    file.sync_all().map_err(io_error(&staging))?;
    drop(file);

    if let Err(source) = fs::rename(&staging, path) {
        let _ = fs::remove_file(&staging);
        return Err(ConfigError::Io {
            path: path.to_path_buf(),
            source,
        });
    }

    if let Some(dir) = parent {
        sync_dir(dir)?;
    }

    Ok(())
}

fn sync_dir(dir: &Path) -> ConfigResult<()> {
    File::open(dir)
        .and_then(|handle| handle.sync_all())
        .map_err(io_error(dir))
}

fn staging_path(path: &Path) -> ConfigResult<PathBuf> {
    let file_name = path
        .file_name()
        .ok_or_else(|| ConfigError::InvalidPath(path.to_path_buf()))?;
    Ok(path.with_file_name(format!(
        ".{}.{}.partial",
        file_name.to_string_lossy(),
        std::process::id()
    )))
}
