//! Notion credentials
//!
//! The integration token and database id are taken from CLI flags or the
//! environment first, then from `secrets.json` in the base directory.

use std::fmt;

use serde::Deserialize;
use zeroize::Zeroizing;

use super::paths::ExpensePaths;
use crate::error::{ExpenseError, ExpenseResult};

pub const TOKEN_VAR: &str = "NOTION_TOKEN";
pub const DATABASE_ID_VAR: &str = "NOTION_DATABASE_ID";

/// A bearer token that is wiped from memory on drop and never printed
#[derive(Clone)]
pub struct SecretToken {
    inner: Zeroizing<String>,
}

impl SecretToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            inner: Zeroizing::new(token.into()),
        }
    }

    /// Get the token for use in a request header
    pub fn expose(&self) -> &str {
        self.inner.as_str()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.trim().is_empty()
    }
}

impl fmt::Debug for SecretToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretToken")
            .field("len", &self.inner.len())
            .finish()
    }
}

impl fmt::Display for SecretToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED {} bytes]", self.inner.len())
    }
}

/// Everything needed to query one database
#[derive(Debug, Clone)]
pub struct Credentials {
    pub token: SecretToken,
    pub database_id: String,
}

/// On-disk form of `secrets.json`
#[derive(Default, Deserialize)]
struct SecretsFile {
    #[serde(default, alias = "NOTION_TOKEN")]
    notion_token: Option<String>,
    #[serde(default, alias = "NOTION_DATABASE_ID")]
    notion_database_id: Option<String>,
}

impl Drop for SecretsFile {
    fn drop(&mut self) {
        if let Some(token) = self.notion_token.take() {
            drop(Zeroizing::new(token));
        }
    }
}

impl Credentials {
    /// Resolve credentials, preferring explicit values over `secrets.json`
    ///
    /// Empty strings count as missing. Fails before any request is made.
    pub fn resolve(
        token: Option<String>,
        database_id: Option<String>,
        paths: &ExpensePaths,
    ) -> ExpenseResult<Self> {
        let token = non_empty(token);
        let database_id = non_empty(database_id);

        let mut file = if token.is_none() || database_id.is_none() {
            load_secrets_file(paths)?
        } else {
            SecretsFile::default()
        };

        let token = token
            .or_else(|| non_empty(file.notion_token.take()))
            .ok_or_else(|| ExpenseError::missing_credential(TOKEN_VAR))?;
        let database_id = database_id
            .or_else(|| non_empty(file.notion_database_id.take()))
            .ok_or_else(|| ExpenseError::missing_credential(DATABASE_ID_VAR))?;

        Ok(Self {
            token: SecretToken::new(token),
            database_id,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn load_secrets_file(paths: &ExpensePaths) -> ExpenseResult<SecretsFile> {
    let path = paths.secrets_file();
    if !path.exists() {
        return Ok(SecretsFile::default());
    }

    let contents = Zeroizing::new(std::fs::read_to_string(&path).map_err(|e| {
        ExpenseError::Io(format!("Failed to read {}: {}", path.display(), e))
    })?);

    serde_json::from_str(&contents).map_err(|e| {
        ExpenseError::Config(format!("Failed to parse {}: {}", path.display(), e))
    })
}
