use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub pagination: PaginationConfig,
    #[serde(default)]
    pub content: ContentConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_acquire_timeout_secs")]
    pub acquire_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    pub jwt_secret: String,
}

/// Page size bounds applied to every paginated endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct PaginationConfig {
    #[serde(default = "default_limit")]
    pub default_limit: u32,
    #[serde(default = "default_max_limit")]
    pub max_limit: u32,
}

/// Locales the localized fields are published in.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentConfig {
    #[serde(default = "default_locale")]
    pub default_locale: String,
    #[serde(default = "default_supported_locales")]
    pub supported_locales: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_max_connections() -> u32 {
    10
}

fn default_acquire_timeout_secs() -> u64 {
    5
}

fn default_limit() -> u32 {
    10
}

fn default_max_limit() -> u32 {
    100
}

fn default_locale() -> String {
    "en".to_string()
}

fn default_supported_locales() -> Vec<String> {
    vec!["en".to_string(), "fr".to_string(), "ar".to_string()]
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
        }
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            default_locale: default_locale(),
            supported_locales: default_supported_locales(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: default_host(),
                port: default_port(),
            },
            database: DatabaseConfig {
                url: "postgres://localhost/agency_blog".to_string(),
                max_connections: default_max_connections(),
                acquire_timeout_secs: default_acquire_timeout_secs(),
            },
            auth: AuthConfig {
                jwt_secret: "development-secret-change-in-production".to_string(),
            },
            pagination: PaginationConfig::default(),
            content: ContentConfig::default(),
        }
    }
}

impl ContentConfig {
    /// Returns `locale` when it is supported, otherwise the default locale.
    pub fn resolve_locale(&self, locale: Option<&str>) -> String {
        match locale.map(str::trim) {
            Some(l) if self.supported_locales.iter().any(|s| s == l) => l.to_string(),
            _ => self.default_locale.clone(),
        }
    }

    pub fn is_supported(&self, locale: &str) -> bool {
        self.supported_locales.iter().any(|s| s == locale)
    }
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("content.supported_locales")
                    .try_parsing(true),
            )
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("database.url", "postgres://localhost/agency_blog")?
            .set_default("database.max_connections", 10)?
            .set_default("database.acquire_timeout_secs", 5)?
            .set_default("auth.jwt_secret", "development-secret-change-in-production")?
            .set_default("pagination.default_limit", 10)?
            .set_default("pagination.max_limit", 100)?
            .set_default("content.default_locale", "en")?
            .set_default("content.supported_locales", vec!["en", "fr", "ar"])?
            .build()?;

        let config: Config = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.pagination.default_limit == 0 || self.pagination.max_limit == 0 {
            anyhow::bail!("pagination limits must be > 0");
        }
        if self.pagination.default_limit > self.pagination.max_limit {
            anyhow::bail!("pagination.default_limit must not exceed pagination.max_limit");
        }
        if !self.content.is_supported(&self.content.default_locale) {
            anyhow::bail!("content.default_locale must be one of content.supported_locales");
        }
        Ok(())
    }
}
