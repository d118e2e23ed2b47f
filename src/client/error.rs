use std::path::PathBuf;

use crate::error::OcsError;

/// Failures raised while assembling an [`ApiClient`](super::ApiClient) or
/// persisting its session, before any request goes out.
#[derive(Debug, thiserror::Error)]
pub enum ApiClientError {
    #[error("\"{0}\" is not a usable server host")]
    InvalidHost(String),

    #[error("cookie jar lock was poisoned")]
    PoisonedLock,

    #[error("failed to open cookie file {path:?}")]
    CookieFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cookie file does not hold a valid jar")]
    CookieFormat(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),
}

/// What came back from a dispatched call. The server answering with a
/// failure meta block and the exchange never producing an envelope at all
/// are different situations for a caller; keep them apart.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("server rejected the call: {0}")]
    Ocs(#[from] OcsError),

    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
}

impl RequestError {
    /// The server's statuscode, when the server is the one that said no.
    pub fn statuscode(&self) -> Option<u16> {
        match self {
            RequestError::Ocs(err) => Some(err.statuscode()),
            RequestError::Transport(_) => None,
        }
    }

    pub fn is_ocs(&self) -> bool {
        matches!(self, RequestError::Ocs(_))
    }

    pub fn as_ocs(self) -> Result<OcsError, reqwest::Error> {
        match self {
            RequestError::Ocs(v) => Ok(v),
            RequestError::Transport(v) => Err(v),
        }
    }
}
