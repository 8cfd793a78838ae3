// Error taxonomy for the admin client.
//
// `ApiError` is what the HTTP layer and the resource clients return.
// `TokenError` comes from the client-side token check. `Error` is what the
// dispatcher reports to the operator; its `Display` output is printed to
// stderr verbatim, so usage blocks are embedded in the message itself.

use thiserror::Error;

/// Failure of a single request against the remote API.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("server returned status {status}{}", body_suffix(.body))]
    Status { status: u16, body: String },

    #[error("failed to marshal JSON, reason: {0}")]
    Encode(serde_json::Error),

    #[error("failed to parse response, reason: {0}")]
    Decode(serde_json::Error),
}

fn body_suffix(body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        String::new()
    } else {
        format!(": {body}")
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TokenError {
    #[error("the provided access token has expired, please renew it")]
    Expired,

    #[error("could not parse access token: {0}")]
    Malformed(String),
}

/// Top-level error reported by the dispatcher.
#[derive(Error, Debug)]
pub enum Error {
    /// Bad command line. Carries the usage block that applies.
    #[error("{message}\n{usage}")]
    Usage {
        message: String,
        usage: &'static str,
    },

    #[error("error: either -{flag} must be provided or {var} environment variable must be set.")]
    MissingConfig {
        flag: &'static str,
        var: &'static str,
    },

    #[error("error: invalid API URI '{uri}': {reason}")]
    InvalidUri { uri: String, reason: String },

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("Error: failed to {action}, reason: {reason}")]
    Api {
        action: &'static str,
        reason: ApiError,
    },

    #[error("failed to write output")]
    Output(#[from] std::io::Error),
}

impl Error {
    pub fn usage(message: impl Into<String>, usage: &'static str) -> Self {
        Error::Usage {
            message: message.into(),
            usage,
        }
    }

    pub fn api(action: &'static str, reason: ApiError) -> Self {
        Error::Api { action, reason }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
