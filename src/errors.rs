/// All error types that can occur when talking to the LIFX cloud API.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Failed to deserialize JSON data returned by the vendor.
    #[error("failed to load json: {0:?}")]
    JsonLoad(serde_json::Error),

    /// An HTTP operation failed before a response could be used: building
    /// the client or request, connecting, TLS, timeout or reading the body.
    #[error("http {action} error: {err}")]
    Http { action: String, err: reqwest::Error },

    /// The vendor answered with a non-success status code.
    #[error("{action} returned unexpected status {status}")]
    Status { action: String, status: u16 },
}

impl Error {
    /// Create a new http error
    pub fn http(action: &str, err: reqwest::Error) -> Self {
        Error::Http {
            action: action.to_string(),
            err,
        }
    }

    /// Create a new status error
    pub fn status(action: &str, status: u16) -> Self {
        Error::Status {
            action: action.to_string(),
            status,
        }
    }
}

/// Hacky implementation of PartialEq for testing
#[cfg(test)]
impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}
