pub mod models;

pub use models::Config;

use anyhow::Context;
use log::{debug, warn};
use std::{
    fs::File,
    io::Read,
    path::{Path, PathBuf},
};
use validator::Validate;

use crate::error::{Error, Result};

pub const CONFIG_FILE_NAME: &str = "config.yaml";
pub const CONFIG_DIR_NAME: &str = ".cf-dns-manager";
pub const TOKEN_ENV: &str = "CF_API_TOKEN";
pub const ACCOUNT_ENV: &str = "CF_ACCOUNT_ID";

/// Config file locations, in lookup order.
pub fn search_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(CONFIG_FILE_NAME)];
    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME));
    }
    paths
}

pub fn load(explicit: Option<&Path>) -> Result<Config> {
    resolve(explicit, &search_paths(), |key| std::env::var(key).ok())
}

/// Reads the config from `explicit` or the first existing candidate, layers
/// the environment on top and checks the result.
///
/// With no config file and no token in the environment, a template is written
/// to the first candidate path and an error asks the user to fill it in.
pub fn resolve<F>(explicit: Option<&Path>, candidates: &[PathBuf], env: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => candidates.iter().find(|p| p.is_file()).cloned(),
    };

    let mut config = match &path {
        Some(path) => load_file(path).map_err(Error::Config)?,
        None => Config::default(),
    };
    config.apply_env(env);

    if path.is_none() && config.cloudflare_token.is_empty() {
        let Some(target) = candidates.first() else {
            return Err(Error::Auth(missing_token_message()));
        };
        write_template(target).map_err(Error::Config)?;
        return Err(Error::Config(anyhow::anyhow!(
            "created {}; set cloudflare_token (and optionally account_id) there, or export {} and {}",
            target.display(),
            TOKEN_ENV,
            ACCOUNT_ENV
        )));
    }

    config
        .validate()
        .map_err(|e| Error::Config(anyhow::Error::new(e).context("invalid configuration")))?;

    if config.cloudflare_token.trim().is_empty() {
        return Err(Error::Auth(missing_token_message()));
    }

    Ok(config)
}

fn missing_token_message() -> String {
    format!(
        "Cloudflare API token is not set; add cloudflare_token to {} or set {}",
        CONFIG_FILE_NAME, TOKEN_ENV
    )
}

fn load_file(path: &Path) -> anyhow::Result<Config> {
    debug!("Loading config from {}", path.display());
    let mut file = File::open(path)
        .with_context(|| format!("Failed to open config file: {}", path.display()))?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

fn write_template(path: &Path) -> anyhow::Result<()> {
    warn!("No config file found, writing template to {}", path.display());
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    let contents = serde_yaml::to_string(&Config::default())?;
    std::fs::write(path, contents)
        .with_context(|| format!("Failed to write config file: {}", path.display()))
}
