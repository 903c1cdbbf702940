use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub deletion: DeletionConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    /// Public base URL advertised to clients (settings endpoint URL display).
    /// Falls back to http://localhost:<port> when unset.
    pub public_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub max_connections: u32,
    pub connection_timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletionConfig {
    /// Hard fallback when neither the request nor the stored settings
    /// provide a limit.
    pub default_limit: i64,
    /// Directory holding attachment media files.
    pub uploads_dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Bearer token required on the settings endpoints. When unset the
    /// settings surface is disabled.
    pub admin_token: Option<String>,
    pub enable_cors: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Server overrides
        if let Ok(v) = env::var("PRODUCT_PURGE_PORT").or_else(|_| env::var("PORT")) {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }
        if let Ok(v) = env::var("PRODUCT_PURGE_PUBLIC_URL") {
            self.server.public_url = Some(v);
        }

        // Database overrides
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = v.parse().unwrap_or(self.database.connection_timeout);
        }

        // Deletion overrides
        if let Ok(v) = env::var("DELETION_DEFAULT_LIMIT") {
            self.deletion.default_limit = v.parse().unwrap_or(self.deletion.default_limit);
        }
        if let Ok(v) = env::var("UPLOADS_DIR") {
            self.deletion.uploads_dir = v;
        }

        // Security overrides
        if let Ok(v) = env::var("ADMIN_TOKEN") {
            if !v.is_empty() {
                self.security.admin_token = Some(v);
            }
        }
        if let Ok(v) = env::var("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                port: 3000,
                public_url: None,
            },
            database: DatabaseConfig {
                max_connections: 10,
                connection_timeout: 30,
            },
            deletion: DeletionConfig {
                default_limit: 10,
                uploads_dir: "./uploads".to_string(),
            },
            security: SecurityConfig {
                admin_token: None,
                enable_cors: true,
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig {
                port: 3000,
                public_url: None,
            },
            database: DatabaseConfig {
                max_connections: 20,
                connection_timeout: 10,
            },
            deletion: DeletionConfig {
                default_limit: 10,
                uploads_dir: "/var/lib/product-purge/uploads".to_string(),
            },
            security: SecurityConfig {
                admin_token: None,
                enable_cors: true,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                port: 3000,
                public_url: None,
            },
            database: DatabaseConfig {
                max_connections: 50,
                connection_timeout: 5,
            },
            deletion: DeletionConfig {
                default_limit: 10,
                uploads_dir: "/var/lib/product-purge/uploads".to_string(),
            },
            security: SecurityConfig {
                admin_token: None,
                enable_cors: false,
            },
        }
    }

    /// Base URL used when rendering the delete endpoint for clients.
    pub fn public_base_url(&self) -> String {
        match &self.server.public_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("http://localhost:{}", self.server.port),
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}
