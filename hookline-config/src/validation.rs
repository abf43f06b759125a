use url::Url;

use crate::loader::ConfigLoadError;

/// Non-fatal findings collected while composing configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigWarnings {
    pub items: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    pub fn push(&mut self, message: impl Into<String>) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: None,
        });
    }

    pub fn push_with_hint(
        &mut self,
        message: impl Into<String>,
        hint: impl Into<String>,
    ) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

/// Accept only `postgres://` / `postgresql://` URLs that name a database.
pub fn validate_database_url(raw: &str) -> Result<(), ConfigLoadError> {
    let url = Url::parse(raw)
        .map_err(|source| ConfigLoadError::InvalidDatabaseUrl { source })?;

    if !matches!(url.scheme(), "postgres" | "postgresql") {
        return Err(ConfigLoadError::UnsupportedDatabaseScheme {
            scheme: url.scheme().to_string(),
        });
    }

    if url.path().trim_start_matches('/').is_empty() {
        return Err(ConfigLoadError::MissingDatabaseName);
    }

    Ok(())
}
