use std::collections::BTreeMap;
use std::path::Path;

use datamaker_client::{API_KEY_ENV, ClientOptions};

use super::{ConfigError, ConfigResult, io_error};

/// Values given on the command line; each one beats the config file.
#[derive(Debug, Clone, Default)]
pub struct OptionOverrides {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub timeout_ms: Option<u64>,
}

/// Decode [`ClientOptions`] from a TOML file.
pub fn load_client_options(path: &Path) -> ConfigResult<ClientOptions> {
    let content = std::fs::read_to_string(path).map_err(io_error(path))?;
    toml::from_str(&content).map_err(|source| ConfigError::TomlDecode {
        path: path.to_path_buf(),
        source,
    })
}

/// Merge every configuration source into the options handed to the client.
///
/// API key precedence: command line, config file, env file, process
/// environment. Blank values count as missing at every level.
pub fn resolve_client_options(
    file: Option<ClientOptions>,
    overrides: OptionOverrides,
    env_file: &BTreeMap<String, String>,
    process_key: Option<String>,
) -> ClientOptions {
    let mut options = file.unwrap_or_default();

    options.api_key = [
        overrides.api_key,
        options.api_key.take(),
        env_file.get(API_KEY_ENV).cloned(),
        process_key,
    ]
    .into_iter()
    .flatten()
    .find(|key| !key.trim().is_empty());

    if let Some(base_url) = overrides.base_url {
        options.base_url = Some(base_url);
    }
    if let Some(timeout_ms) = overrides.timeout_ms {
        options.timeout_ms = Some(timeout_ms);
    }

    options
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_with_key(key: &str) -> BTreeMap<String, String> {
        BTreeMap::from([(API_KEY_ENV.to_string(), key.to_string())])
    }

    #[test]
    fn command_line_key_wins() {
        let options = resolve_client_options(
            Some(ClientOptions::default().with_api_key("from-file")),
            OptionOverrides {
                api_key: Some("from-flag".to_string()),
                ..OptionOverrides::default()
            },
            &env_with_key("from-env-file"),
            Some("from-process".to_string()),
        );
        assert_eq!(options.api_key.as_deref(), Some("from-flag"));
    }

    #[test]
    fn config_file_beats_env_sources() {
        let options = resolve_client_options(
            Some(ClientOptions::default().with_api_key("from-file")),
            OptionOverrides::default(),
            &env_with_key("from-env-file"),
            Some("from-process".to_string()),
        );
        assert_eq!(options.api_key.as_deref(), Some("from-file"));
    }

    #[test]
    fn env_file_beats_process_environment() {
        let options = resolve_client_options(
            None,
            OptionOverrides::default(),
            &env_with_key("from-env-file"),
            Some("from-process".to_string()),
        );
        assert_eq!(options.api_key.as_deref(), Some("from-env-file"));
    }

    #[test]
    fn blank_values_fall_through() {
        let options = resolve_client_options(
            Some(ClientOptions::default().with_api_key("  ")),
            OptionOverrides::default(),
            &env_with_key(""),
            Some("from-process".to_string()),
        );
        assert_eq!(options.api_key.as_deref(), Some("from-process"));

        let options =
            resolve_client_options(None, OptionOverrides::default(), &BTreeMap::new(), None);
        assert_eq!(options.api_key, None);
    }

    #[test]
    fn flags_override_file_settings() {
        let file = ClientOptions {
            base_url: Some("https://file.test/api".to_string()),
            timeout_ms: Some(1_000),
            ..ClientOptions::default()
        };
        let options = resolve_client_options(
            Some(file),
            OptionOverrides {
                base_url: Some("http://localhost:3000/api".to_string()),
                timeout_ms: Some(5_000),
                ..OptionOverrides::default()
            },
            &BTreeMap::new(),
            None,
        );
        assert_eq!(options.base_url(), "http://localhost:3000/api");
        assert_eq!(options.timeout_ms, Some(5_000));
    }

    #[test]
    fn toml_file_decodes_client_options() {
        let path = std::env::temp_dir().join(format!(
            "datamaker_options_{}.toml",
            std::process::id()
        ));
        std::fs::write(
            &path,
            "base_url = \"http://localhost:3000/api\"\n\
             timeout_ms = 2000\n\
             max_retries = 2\n\
             \n\
             [default_headers]\n\
             X-Team = \"qa\"\n\
             \n\
             [default_query]\n\
             workspace = \"qa\"\n",
        )
        .expect("write config");

        let options = load_client_options(&path).expect("decode");
        let _ = std::fs::remove_file(&path);

        assert_eq!(options.timeout_ms, Some(2_000));
        assert_eq!(options.max_retries, Some(2));
        assert_eq!(options.default_headers["X-Team"], "qa");
        assert_eq!(options.default_query["workspace"], "qa");
        assert_eq!(options.api_key, None);
    }

    #[test]
    fn unknown_toml_keys_are_rejected() {
        let path = std::env::temp_dir().join(format!(
            "datamaker_options_unknown_{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "retries = 3\n").expect("write config");

        let err = load_client_options(&path).expect_err("unknown key");
        let _ = std::fs::remove_file(&path);

        assert!(matches!(err, ConfigError::TomlDecode { .. }));
    }
}
