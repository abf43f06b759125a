use once_cell::sync::Lazy;
use std::{fs, path::PathBuf};
use thiserror::Error;

use crate::{
    models::{
        Config, ConfigMetadata, DatabaseConfig, ServerConfig, ViewConfig,
        sources::{EnvConfig, FileConfig},
    },
    validation::{ConfigWarnings, validate_database_url},
};

static DEFAULT_CONFIG_LOCATIONS: Lazy<Vec<PathBuf>> = Lazy::new(|| {
    vec![
        PathBuf::from("hookline.toml"),
        PathBuf::from("config/hookline.toml"),
    ]
});

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read configuration file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("configuration file {path} does not exist")]
    MissingConfig { path: PathBuf },

    #[error("failed to load .env file: {0}")]
    Dotenv(#[from] dotenvy::Error),

    #[error(
        "DATABASE_URL must be provided \
         (set DEV_MODE=true to run with an in-memory store)"
    )]
    MissingDatabaseUrl,

    #[error("invalid database URL: {source}")]
    InvalidDatabaseUrl {
        #[source]
        source: url::ParseError,
    },

    #[error(
        "unsupported database scheme `{scheme}`; \
         expected postgres:// or postgresql://"
    )]
    UnsupportedDatabaseScheme { scheme: String },

    #[error("database URL must include a database name")]
    MissingDatabaseName,

    #[error("{field} must be greater than zero")]
    ZeroValue { field: &'static str },
}

#[derive(Debug)]
pub struct ConfigLoad {
    pub config: Config,
    pub warnings: ConfigWarnings,
}

#[derive(Debug, Default)]
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
    /// Skip `.env` discovery entirely.
    skip_env_file: bool,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.config_path = Some(path.into());
        self
    }

    pub fn without_env_file(mut self) -> Self {
        self.skip_env_file = true;
        self
    }

    /// Load `.env`, gather the process environment and compose.
    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let env_file_loaded = self.load_env_file()?;
        self.load_with_env(EnvConfig::gather(), env_file_loaded)
    }

    /// Compose from an explicit environment snapshot.
    pub fn load_with_env(
        &self,
        env: EnvConfig,
        env_file_loaded: bool,
    ) -> Result<ConfigLoad, ConfigLoadError> {
        let (file_config, config_path) = self.load_file_config(&env)?;
        self.compose_config(file_config, env, config_path, env_file_loaded)
    }

    fn load_env_file(&self) -> Result<bool, ConfigLoadError> {
        if self.skip_env_file {
            return Ok(false);
        }

        // A missing .env file is not an error
        dotenvy::dotenv().map(|_| true).or_else(|err| match err {
            dotenvy::Error::Io(_) => Ok(false),
            other => Err(ConfigLoadError::Dotenv(other)),
        })
    }

    fn load_file_config(
        &self,
        env: &EnvConfig,
    ) -> Result<(Option<FileConfig>, Option<PathBuf>), ConfigLoadError> {
        let explicit =
            self.config_path.clone().or_else(|| env.config_path.clone());

        let path = match explicit {
            Some(path) if !path.exists() => {
                return Err(ConfigLoadError::MissingConfig { path });
            }
            Some(path) => path,
            None => match DEFAULT_CONFIG_LOCATIONS
                .iter()
                .find(|candidate| candidate.exists())
            {
                Some(found) => found.clone(),
                None => return Ok((None, None)),
            },
        };

        let contents =
            fs::read_to_string(&path).map_err(|source| ConfigLoadError::Io {
                path: path.clone(),
                source,
            })?;
        let file_config: FileConfig =
            toml::from_str(&contents).map_err(|source| {
                ConfigLoadError::Parse {
                    path: path.clone(),
                    source,
                }
            })?;

        Ok((Some(file_config), Some(path)))
    }

    fn compose_config(
        &self,
        file_config: Option<FileConfig>,
        env: EnvConfig,
        config_path: Option<PathBuf>,
        env_file_loaded: bool,
    ) -> Result<ConfigLoad, ConfigLoadError> {
        let mut warnings = ConfigWarnings::default();

        if file_config.is_none() {
            warnings.push_with_hint(
                "No hookline.toml detected; \
                 falling back to environment variables",
                "Create hookline.toml or set HOOKLINE_CONFIG to point at one",
            );
        }

        let FileConfig {
            server: file_server,
            database: file_database,
            view: file_view,
            dev_mode: file_dev_mode,
        } = file_config.unwrap_or_default();

        let defaults = ServerConfig::default();
        let server = ServerConfig {
            host: env
                .server_host
                .or(file_server.host)
                .unwrap_or(defaults.host),
            port: env.server_port.or(file_server.port).unwrap_or(defaults.port),
        };

        let dev_mode = env.dev_mode.or(file_dev_mode).unwrap_or(false);

        let database_url = env
            .database_url
            .or(file_database.url)
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());
        match &database_url {
            Some(url) => validate_database_url(url)?,
            None if dev_mode => warnings.push_with_hint(
                "No DATABASE_URL configured; \
                 activities are kept in memory only",
                "Set DATABASE_URL to persist activities in PostgreSQL",
            ),
            None => return Err(ConfigLoadError::MissingDatabaseUrl),
        }

        let database = DatabaseConfig {
            url: database_url,
            max_connections: env
                .database_max_connections
                .or(file_database.max_connections)
                .unwrap_or(DatabaseConfig::default().max_connections),
        };
        if database.max_connections == 0 {
            return Err(ConfigLoadError::ZeroValue {
                field: "database.max_connections",
            });
        }

        let view = ViewConfig {
            recent_limit: env
                .recent_limit
                .or(file_view.recent_limit)
                .unwrap_or(ViewConfig::default().recent_limit),
        };
        if view.recent_limit == 0 {
            return Err(ConfigLoadError::ZeroValue {
                field: "view.recent_limit",
            });
        }

        if dev_mode {
            warnings.push("DEV_MODE is enabled; CORS is permissive");
        }

        let config = Config {
            server,
            database,
            view,
            dev_mode,
            metadata: ConfigMetadata {
                config_path,
                env_file_loaded,
            },
        };

        Ok(ConfigLoad { config, warnings })
    }
}
