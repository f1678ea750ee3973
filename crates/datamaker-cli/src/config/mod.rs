mod atomic;
mod env_file;
mod options;

pub use atomic::write_json_atomic;
pub use env_file::load_env_file;
pub use options::{OptionOverrides, load_client_options, resolve_client_options};

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("toml decode error in {path}: {source}")]
    TomlDecode {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid path for atomic write: {0}")]
    InvalidPath(PathBuf),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

fn io_error(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> ConfigError {
    let path = path.into();
    move |source| ConfigError::Io { path, source }
}
