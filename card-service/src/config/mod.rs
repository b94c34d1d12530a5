use secrecy::{ExposeSecret, Secret};
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

#[derive(Debug, Clone)]
pub struct CardConfig {
    pub common: core_config::Config,
    pub environment: Environment,
    pub service_name: String,
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
    pub storage: StorageBackend,
    pub mongodb: MongoConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Dev,
    Prod,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StorageBackend {
    Mongodb,
    Memory,
}

#[derive(Debug, Clone)]
pub struct MongoConfig {
    pub uri: Secret<String>,
    pub database: String,
    pub collection: String,
}

impl CardConfig {
    pub fn load() -> Result<Self, AppError> {
        // Handles .env and the APP__ prefix
        let common_config = core_config::Config::load()?;
        Self::from_lookup(common_config, |key| env::var(key).ok())
    }

    /// Builds the service config from `lookup`, which maps a variable name
    /// to its value. In `prod` every variable is required except
    /// `OTLP_ENDPOINT`, and the Mongo credentials when `MONGODB_URI` is set.
    pub fn from_lookup<F>(common: core_config::Config, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env { lookup: &lookup };

        let environment: Environment = env
            .var("ENVIRONMENT")
            .unwrap_or_else(|| "dev".to_string())
            .parse()
            .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!(e)))?;
        let is_prod = environment == Environment::Prod;

        let storage: StorageBackend = env
            .get("STORAGE_BACKEND", Some("mongodb"), is_prod)?
            .parse()
            .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!(e)))?;

        // Only the mongodb backend needs credentials.
        let uri = if storage == StorageBackend::Mongodb {
            env.mongo_uri(is_prod)?
        } else {
            String::new()
        };

        Ok(CardConfig {
            common,
            environment,
            service_name: env.get("SERVICE_NAME", Some("card-service"), is_prod)?,
            log_level: env.get("LOG_LEVEL", Some("info"), is_prod)?,
            otlp_endpoint: env.var("OTLP_ENDPOINT").filter(|s| !s.is_empty()),
            storage,
            mongodb: MongoConfig {
                uri: Secret::new(uri),
                database: env.get("MONGODB_DATABASE", Some("credit_card_db"), is_prod)?,
                collection: env.get("MONGODB_COLLECTION", Some("credit_card_requests"), is_prod)?,
            },
        })
    }

    pub fn mongodb_uri(&self) -> &str {
        self.mongodb.uri.expose_secret()
    }
}

struct Env<'a, F> {
    lookup: &'a F,
}

impl<F> Env<'_, F>
where
    F: Fn(&str) -> Option<String>,
{
    fn var(&self, key: &str) -> Option<String> {
        (self.lookup)(key)
    }

    fn get(&self, key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
        match self.var(key) {
            Some(val) => Ok(val),
            None => {
                if is_prod {
                    Err(AppError::ConfigError(anyhow::anyhow!(
                        "{} is required in production but not set",
                        key
                    )))
                } else if let Some(def) = default {
                    Ok(def.to_string())
                } else {
                    Err(AppError::ConfigError(anyhow::anyhow!(
                        "{} is required but not set",
                        key
                    )))
                }
            }
        }
    }

    /// `MONGODB_URI` wins; otherwise the URI is assembled from
    /// `MONGODB_USERNAME`, `MONGODB_PASSWORD` and `MONGODB_HOST`.
    fn mongo_uri(&self, is_prod: bool) -> Result<String, AppError> {
        if let Some(uri) = self.var("MONGODB_URI") {
            return Ok(uri);
        }

        let username = self.get("MONGODB_USERNAME", None, is_prod)?;
        let password = self.get("MONGODB_PASSWORD", None, is_prod)?;
        let host = self.get("MONGODB_HOST", Some("localhost:27017"), is_prod)?;

        Ok(compose_mongo_uri(&username, &password, &host))
    }
}

fn compose_mongo_uri(username: &str, password: &str, host: &str) -> String {
    format!("mongodb://{}:{}@{}/", username, password, host)
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dev" | "development" => Ok(Environment::Dev),
            "prod" | "production" => Ok(Environment::Prod),
            _ => Err(format!("Invalid environment: {}", s)),
        }
    }
}

impl std::str::FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mongodb" | "mongo" => Ok(StorageBackend::Mongodb),
            "memory" => Ok(StorageBackend::Memory),
            _ => Err(format!("Invalid storage backend: {}", s)),
        }
    }
}
