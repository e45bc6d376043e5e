use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub bucket: String,
    pub region: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    /// Custom endpoint for S3-compatible stores (MinIO etc.); path-style
    /// addressing is enabled when this is set.
    pub endpoint: Option<String>,
}

// Default value functions
fn default_app_env() -> String {
    "development".to_string()
}

fn default_app_host() -> String {
    "0.0.0.0".to_string()
}

fn default_app_port() -> u16 {
    8080
}

fn default_db_max_connections() -> u32 {
    20
}

fn default_storage_bucket() -> String {
    "waste-report-media".to_string()
}

fn default_storage_region() -> String {
    "us-east-1".to_string()
}

impl Config {
    pub fn from_env() -> Self {
        let app = AppConfig {
            env: env::var("APP_ENV").unwrap_or_else(|_| default_app_env()),
            host: env::var("APP_HOST").unwrap_or_else(|_| default_app_host()),
            port: env::var("APP_PORT")
                .unwrap_or_else(|_| default_app_port().to_string())
                .parse()
                .unwrap_or(default_app_port()),
        };

        let database = DatabaseConfig {
            url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| default_db_max_connections().to_string())
                .parse()
                .unwrap_or(default_db_max_connections()),
        };

        let storage = StorageConfig {
            bucket: env::var("STORAGE_BUCKET").unwrap_or_else(|_| default_storage_bucket()),
            region: env::var("STORAGE_REGION").unwrap_or_else(|_| default_storage_region()),
            access_key_id: env::var("AWS_ACCESS_KEY_ID").unwrap_or_default(),
            secret_access_key: env::var("AWS_SECRET_ACCESS_KEY").unwrap_or_default(),
            endpoint: env::var("STORAGE_ENDPOINT").ok().filter(|e| !e.trim().is_empty()),
        };

        Config {
            app,
            database,
            storage,
        }
    }

    pub fn is_production(&self) -> bool {
        self.app.env == "production"
    }
}
