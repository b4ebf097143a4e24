use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered, but the body could not be read as JSON.
    #[error("invalid JSON response (HTTP {status}): {source}")]
    InvalidBody {
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to access file system: {0}")]
    Io(#[from] std::io::Error),

    #[error("no test cases found in {}", .0.display())]
    EmptySuite(PathBuf),
}

impl Error {
    /// HTTP status of the response that produced this error, when one arrived.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::InvalidBody { status, .. } => Some(*status),
            Error::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Full message including every underlying cause, e.g.
    /// `request failed: error sending request for url (..): tcp connect error: Connection refused`.
    pub fn describe(&self) -> String {
        let mut message = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(err) = source {
            let text = err.to_string();
            // `#[from]` variants repeat their source's message
            if !message.contains(&text) {
                message.push_str(": ");
                message.push_str(&text);
            }
            source = err.source();
        }

        if let Error::Http(err) = self {
            if err.is_timeout() && !message.contains("timed out") {
                message.push_str(": operation timed out");
            } else if err.is_connect() && !message.contains("connect") {
                message.push_str(": connection failed");
            }
        }
        message
    }
}

pub type Result<T> = std::result::Result<T, Error>;
