use std::collections::BTreeMap;
use std::path::Path;

use super::{ConfigResult, io_error};

/// Read a dotenv-style file into a key/value map.
pub fn load_env_file(path: &Path) -> ConfigResult<BTreeMap<String, String>> {
    let content = std::fs::read_to_string(path).map_err(io_error(path))?;
    Ok(parse_env_file(&content))
}

/// Parse `KEY=VALUE` lines.
///
/// Blank lines and `#` comments are skipped, an `export ` prefix is ignored
/// and one layer of matching quotes is stripped from values. Later keys win.
pub fn parse_env_file(content: &str) -> BTreeMap<String, String> {
    let mut values = BTreeMap::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line = line.strip_prefix("export ").unwrap_or(line);
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        values.insert(key.to_string(), unquote(value.trim()).to_string());
    }
    values
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}
