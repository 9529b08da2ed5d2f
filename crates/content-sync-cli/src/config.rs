use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use content_sync::Environment;
use content_sync_kontent::DEFAULT_BASE_URL;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub environments: HashMap<String, EnvironmentConfig>,
}

/// Credentials and endpoint for one target environment.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct EnvironmentConfig {
    pub project_id: Option<String>,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

/// Fully resolved settings for one run's target environment.
#[derive(Debug, Clone)]
pub struct ResolvedEnvironment {
    pub project_id: String,
    pub api_key: String,
    pub base_url: String,
}

/// Config file path: `~/.config/content-sync/config.toml`
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("content-sync").join("config.toml"))
}

/// Load config from file, falling back to an empty config if missing.
pub fn load_config() -> AppConfig {
    if let Some(path) = config_path()
        && let Ok(contents) = std::fs::read_to_string(&path)
    {
        if let Ok(config) = toml::from_str::<AppConfig>(&contents) {
            return config;
        }
        eprintln!(
            "warning: failed to parse config at {}, using defaults",
            path.display()
        );
    }

    AppConfig::default()
}

/// Environment variables follow `KONTENT_<ENV>_<FIELD>`, e.g.
/// `KONTENT_PROD_MANAGEMENT_API_KEY`.
fn env_var(environment: Environment, suffix: &str) -> Option<String> {
    let key = format!(
        "KONTENT_{}_{suffix}",
        environment.to_string().to_uppercase()
    );
    std::env::var(key).ok().filter(|value| !value.is_empty())
}

/// Resolve the selected environment. Environment variables override the
/// config file; `base_url` falls back to the hosted endpoint. A missing
/// project id or API key is a caller error surfaced before any file or
/// remote work.
pub fn resolve(config: &AppConfig, environment: Environment) -> Result<ResolvedEnvironment> {
    let from_file = config.environments.get(&environment.to_string());

    let project_id = env_var(environment, "PROJECT_ID")
        .or_else(|| from_file.and_then(|e| e.project_id.clone()))
        .with_context(|| format!("no project id configured for \"{environment}\""))?;

    let api_key = env_var(environment, "MANAGEMENT_API_KEY")
        .or_else(|| from_file.and_then(|e| e.api_key.clone()))
        .with_context(|| format!("no management API key configured for \"{environment}\""))?;

    let base_url = env_var(environment, "BASE_URL")
        .or_else(|| from_file.and_then(|e| e.base_url.clone()))
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());

    Ok(ResolvedEnvironment {
        project_id,
        api_key,
        base_url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(toml_str: &str) -> AppConfig {
        toml::from_str(toml_str).unwrap()
    }

    #[test]
    fn parse_both_environments_from_toml() {
        let config = parsed(
            r#"
[environments.dev]
project_id = "dev-project"
api_key = "dev-key"

[environments.prod]
project_id = "prod-project"
api_key = "prod-key"
base_url = "https://manage.example.com/v2/projects"
"#,
        );

        assert_eq!(config.environments.len(), 2);
        assert_eq!(
            config.environments["dev"].project_id.as_deref(),
            Some("dev-project")
        );
        assert_eq!(
            config.environments["prod"].base_url.as_deref(),
            Some("https://manage.example.com/v2/projects")
        );
    }

    #[test]
    fn resolve_picks_the_selected_environment() {
        let config = parsed(
            r#"
[environments.dev]
project_id = "dev-project"
api_key = "dev-key"

[environments.prod]
project_id = "prod-project"
api_key = "prod-key"
"#,
        );

        let resolved = resolve(&config, Environment::Prod).unwrap();
        assert_eq!(resolved.project_id, "prod-project");
        assert_eq!(resolved.api_key, "prod-key");
    }

    #[test]
    fn base_url_defaults_to_the_hosted_endpoint() {
        let config = parsed(
            r#"
[environments.dev]
project_id = "dev-project"
api_key = "dev-key"
"#,
        );

        let resolved = resolve(&config, Environment::Dev).unwrap();
        assert_eq!(resolved.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn missing_api_key_is_a_caller_error() {
        let config = parsed(
            r#"
[environments.dev]
project_id = "dev-project"
"#,
        );

        let err = resolve(&config, Environment::Dev).unwrap_err();
        assert!(err.to_string().contains("management API key"));
    }

    #[test]
    fn missing_environment_table_is_a_caller_error() {
        let err = resolve(&AppConfig::default(), Environment::Prod).unwrap_err();
        assert!(err.to_string().contains("prod"));
    }
}
