use std::{collections::HashMap, path::Path};

use anyhow::{bail, Context};
use client_core::graphql::{parse_endpoint, GatewaySettings};
use config::{Config, Environment, File, FileFormat};

pub const DEFAULT_CONFIG_FILE: &str = "board_sync.toml";
const ENV_PREFIX: &str = "APP";
const ENV_SEPARATOR: &str = "__";
const ENV_TOKEN_KEY: &str = "APP__API_TOKEN";
const TOKEN_ALIAS_VAR: &str = "MONDAY_API_TOKEN";

/// Defaults, then the TOML file, then `APP__*` variables.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<GatewaySettings> {
    load_settings_from(path, std::env::vars().collect())
}

fn load_settings_from(
    path: Option<&Path>,
    env: HashMap<String, String>,
) -> anyhow::Result<GatewaySettings> {
    let defaults = GatewaySettings::default();
    let file = match path {
        Some(path) => File::from(path).format(FileFormat::Toml).required(true),
        None => File::new(DEFAULT_CONFIG_FILE, FileFormat::Toml).required(false),
    };
    let token_alias = if env.contains_key(ENV_TOKEN_KEY) {
        None
    } else {
        env.get(TOKEN_ALIAS_VAR).cloned()
    };

    let settings: GatewaySettings = Config::builder()
        .set_default("endpoint", defaults.endpoint)?
        .set_default("api_token", defaults.api_token)?
        .set_default("request_timeout_secs", defaults.request_timeout_secs)?
        .add_source(file)
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator(ENV_SEPARATOR)
                .separator(ENV_SEPARATOR)
                .source(Some(env)),
        )
        .set_override_option("api_token", token_alias)?
        .build()
        .context("failed to read configuration")?
        .try_deserialize()
        .context("invalid configuration")?;

    parse_endpoint(&settings.endpoint)?;
    Ok(settings)
}

pub fn ensure_api_token(settings: &GatewaySettings) -> anyhow::Result<()> {
    if settings.api_token.trim().is_empty() {
        bail!("no API token configured; set {ENV_TOKEN_KEY} or {TOKEN_ALIAS_VAR}");
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
