// Connection settings resolved once per invocation.

use url::Url;

use crate::cli::GlobalFlags;
use crate::error::{Error, Result};

pub const API_HOST_ENV: &str = "API_HOST";
pub const ACCESS_TOKEN_ENV: &str = "ACCESS_TOKEN";

/// Base URI and bearer token for every request of this invocation.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_uri: Url,
    pub token: String,
}

impl Config {
    /// Flag values win over the environment; empty values count as unset.
    pub fn resolve(flags: &GlobalFlags, env: &dyn Fn(&str) -> Option<String>) -> Result<Self> {
        let uri = pick(flags.uri.as_deref(), env(API_HOST_ENV)).ok_or(Error::MissingConfig {
            flag: "uri",
            var: API_HOST_ENV,
        })?;
        let token = pick(flags.token.as_deref(), env(ACCESS_TOKEN_ENV)).ok_or(
            Error::MissingConfig {
                flag: "token",
                var: ACCESS_TOKEN_ENV,
            },
        )?;

        let api_uri = Url::parse(&uri).map_err(|e| Error::InvalidUri {
            uri: uri.clone(),
            reason: e.to_string(),
        })?;
        if api_uri.cannot_be_a_base() {
            return Err(Error::InvalidUri {
                uri,
                reason: "URI cannot be used as a base".into(),
            });
        }

        tracing::debug!(api_uri = %api_uri, "configuration resolved");
        Ok(Config { api_uri, token })
    }
}

fn pick(flag: Option<&str>, env: Option<String>) -> Option<String> {
    flag.filter(|v| !v.is_empty())
        .map(str::to_owned)
        .or(env)
        .filter(|v| !v.is_empty())
}
