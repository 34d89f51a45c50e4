use std::path::Path;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Connection settings for one model role, read from
/// `{ROLE}_{API_KEY,BASE_URL,MODEL,PROVIDER}` environment variables.
#[derive(Debug, Clone)]
pub struct RoleConfig {
    /// "openai" (default) or "fake".
    pub provider: String,
    pub model: String,
    pub api_key: String,
    pub base_url: String,
}

/// The four model roles of a benchmark run.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    pub student: RoleConfig,
    pub teacher: RoleConfig,
    pub grader: RoleConfig,
    pub moderator: RoleConfig,
}

/// Load role configuration, optionally seeding the process environment from
/// a dotfile first. A missing dotfile is fine (plain env vars still apply);
/// a malformed one is an error.
pub fn load_config(env_file: &Path) -> anyhow::Result<HarnessConfig> {
    if env_file.exists() {
        dotenvy::from_path(env_file).map_err(|e| {
            anyhow::anyhow!("failed to load env file {}: {}", env_file.display(), e)
        })?;
    }

    Ok(HarnessConfig {
        student: role_from_env("STUDENT"),
        teacher: role_from_env("TEACHER"),
        grader: role_from_env("GRADER"),
        moderator: role_from_env("MODERATOR"),
    })
}

fn role_from_env(prefix: &str) -> RoleConfig {
    let var = |suffix: &str| std::env::var(format!("{prefix}_{suffix}")).unwrap_or_default();

    let provider = var("PROVIDER");
    let base_url = var("BASE_URL");
    RoleConfig {
        provider: if provider.is_empty() {
            "openai".to_string()
        } else {
            provider
        },
        model: var("MODEL"),
        api_key: var("API_KEY"),
        base_url: if base_url.is_empty() {
            DEFAULT_BASE_URL.to_string()
        } else {
            base_url
        },
    }
}
