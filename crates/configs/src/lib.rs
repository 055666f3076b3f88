use anyhow::{anyhow, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub firebase: FirebaseConfig,
    #[serde(default)]
    pub chatbot: ChatbotConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 5000, worker_threads: None }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            acquire_timeout_secs: default_acquire_timeout(),
            sqlx_logging: false,
        }
    }
}

fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 2 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_acquire_timeout() -> u64 { 30 }

/// Firebase project settings used to validate provider-issued ID tokens.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct FirebaseConfig {
    #[serde(default)]
    pub project_id: String,
    /// When set, tokens are treated as Auth-emulator tokens (unsigned).
    #[serde(default)]
    pub emulator_host: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatbotConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_chatbot_model")]
    pub model: String,
    #[serde(default = "default_chatbot_endpoint")]
    pub endpoint: String,
}

impl Default for ChatbotConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_chatbot_model(),
            endpoint: default_chatbot_endpoint(),
        }
    }
}

fn default_chatbot_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_chatbot_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load `CONFIG_PATH`/`config.toml` when present, otherwise start from
    /// defaults, then fill gaps from environment variables and validate.
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default().unwrap_or_default();
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize_from_env();
        self.database.normalize_from_env();
        self.database.validate()?;
        self.firebase.normalize_from_env();
        self.firebase.validate()?;
        self.chatbot.normalize_from_env();
        Ok(())
    }
}

impl ServerConfig {
    fn normalize_from_env(&mut self) {
        if let Ok(host) = std::env::var("SERVER_HOST") {
            if !host.trim().is_empty() {
                self.host = host;
            }
        }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            self.port = port;
        }
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
    }
}

impl DatabaseConfig {
    pub fn normalize_from_env(&mut self) {
        if self.url.trim().is_empty() {
            if let Ok(url) = std::env::var("DATABASE_URL") {
                self.url = url;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!(
                "database.url is empty; set it in config.toml or via DATABASE_URL"
            ));
        }
        let lower = self.url.to_lowercase();
        if !(lower.starts_with("postgresql://") || lower.starts_with("postgres://")) {
            return Err(anyhow!("database.url must start with postgresql:// or postgres://"));
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive seconds"));
        }
        Ok(())
    }
}

impl FirebaseConfig {
    pub fn normalize_from_env(&mut self) {
        if self.project_id.trim().is_empty() {
            if let Ok(pid) = std::env::var("FIREBASE_PROJECT_ID") {
                self.project_id = pid;
            }
        }
        if self.emulator_host.is_none() {
            if let Ok(host) = std::env::var("FIREBASE_AUTH_EMULATOR_HOST") {
                if !host.trim().is_empty() {
                    self.emulator_host = Some(host);
                }
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.project_id.trim().is_empty() {
            return Err(anyhow!(
                "firebase.project_id is empty; set it in config.toml or via FIREBASE_PROJECT_ID"
            ));
        }
        Ok(())
    }
}

impl ChatbotConfig {
    pub fn normalize_from_env(&mut self) {
        if self.api_key.trim().is_empty() {
            if let Ok(key) = std::env::var("GEMINI_API_KEY") {
                self.api_key = key;
            }
        }
        // A missing key is not a startup error: chatbot requests fail with a
        // clear upstream error instead.
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 5000);
        assert_eq!(cfg.chatbot.model, "gemini-2.5-flash");
        assert!(cfg.chatbot.endpoint.starts_with("https://"));
    }

    #[test]
    fn database_url_scheme_is_enforced() {
        let cfg = DatabaseConfig {
            url: "mysql://root@localhost/educonnect".into(),
            ..DatabaseConfig::default()
        };
        assert!(cfg.validate().is_err());

        let cfg = DatabaseConfig {
            url: "postgres://postgres@localhost/educonnect".into(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            acquire_timeout_secs: default_acquire_timeout(),
            sqlx_logging: false,
        };
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn firebase_project_id_is_required() {
        let cfg = FirebaseConfig::default();
        assert!(cfg.validate().is_err());

        let cfg = FirebaseConfig { project_id: "educonnect-dev".into(), emulator_host: None };
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn toml_sections_parse() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [server]
            host = "0.0.0.0"
            port = 8080

            [database]
            url = "postgres://postgres@localhost/educonnect"

            [firebase]
            project_id = "educonnect-prod"

            [chatbot]
            api_key = "k"
            "#,
        )
        .expect("parse");
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.firebase.project_id, "educonnect-prod");
        assert_eq!(cfg.database.max_connections, 10);
    }
}
