use std::fmt;

use crate::ocs::OcsMeta;

/// Failure reported by the server inside an envelope's meta block.
#[derive(Debug, Clone)]
pub struct OcsError {
    status: String,
    statuscode: u16,
    message: Option<String>,
}

impl OcsError {
    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn statuscode(&self) -> u16 {
        self.statuscode
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_ref().map(|v| v.as_str())
    }
}

impl From<OcsMeta> for OcsError {
    fn from(meta: OcsMeta) -> Self {
        OcsError {
            status: meta.status,
            statuscode: meta.statuscode,
            message: meta.message,
        }
    }
}

impl fmt::Display for OcsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.status, self.statuscode)?;

        if let Some(msg) = &self.message {
            write!(f, ": {}", msg)?;
        }

        Ok(())
    }
}

impl std::error::Error for OcsError {}
