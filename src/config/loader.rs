// Configuration loader
// Defaults, then ~/.wingman/config.toml (or --config), then environment

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use super::settings::{AuthConfig, BackendConfig, Config, ServerConfig};

/// Load configuration from the config file (if any) and the process environment
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let path = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => default_config_path().filter(|p| p.exists()),
    };

    load_config_from(path.as_deref(), |key| std::env::var(key).ok())
}

/// Load configuration with an injectable environment lookup
pub fn load_config_from<F>(config_path: Option<&Path>, env: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let file = match config_path {
        Some(path) => read_config_file(path)?,
        None => FileConfig::default(),
    };

    // Empty values count as unset
    let env = |key: &str| env(key).filter(|v| !v.trim().is_empty());

    let mut server = ServerConfig::default();
    if let Some(host) = file.server.host {
        server.host = host;
    }
    if let Some(port) = file.server.port {
        server.port = port;
    }
    if let Some(host) = env("HOST") {
        server.host = host;
    }
    if let Some(port) = env("PORT") {
        server.port = port
            .parse()
            .with_context(|| format!("PORT must be a port number, got '{}'", port))?;
    }

    let mut backend = BackendConfig::default();
    backend.api_key = env("OPENAI_API_KEY").or(file.backend.api_key);
    if let Some(model) = env("OPENAI_MODEL").or(file.backend.model) {
        backend.model = model;
    }
    if let Some(base_url) = env("OPENAI_BASE_URL").or(file.backend.base_url) {
        backend.base_url = base_url;
    }
    if let Some(secs) = env("BACKEND_TIMEOUT_SECS") {
        backend.timeout_secs = secs
            .parse()
            .with_context(|| format!("BACKEND_TIMEOUT_SECS must be whole seconds, got '{}'", secs))?;
    } else if let Some(secs) = file.backend.timeout_secs {
        backend.timeout_secs = secs;
    }
    if backend.timeout_secs == 0 {
        bail!("Backend timeout must be at least one second");
    }

    let Some(bearer_token) = env("BEARER_TOKEN").or(file.auth.bearer_token) else {
        bail!(
            "No bearer token configured.\n\n\
            Set the shared secret clients must present:\n\
            export BEARER_TOKEN=\"...\"\n\n\
            or add `bearer_token` under [auth] in ~/.wingman/config.toml"
        );
    };

    let Some(validate_identity) = env("MY_NUMBER").or(file.auth.validate_identity) else {
        bail!(
            "No validate identity configured.\n\n\
            Set the identity string returned by the `validate` tool:\n\
            export MY_NUMBER=\"...\"\n\n\
            or add `validate_identity` under [auth] in ~/.wingman/config.toml"
        );
    };

    Ok(Config {
        server,
        auth: AuthConfig {
            bearer_token,
            validate_identity,
        },
        backend,
    })
}

fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".wingman").join("config.toml"))
}

fn read_config_file(path: &Path) -> Result<FileConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str(&contents).with_context(|| format!("Failed to parse {}", path.display()))
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    server: FileServer,
    #[serde(default)]
    auth: FileAuth,
    #[serde(default)]
    backend: FileBackend,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileServer {
    host: Option<String>,
    port: Option<u16>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileAuth {
    bearer_token: Option<String>,
    validate_identity: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileBackend {
    api_key: Option<String>,
    model: Option<String>,
    base_url: Option<String>,
    timeout_secs: Option<u64>,
}
