//! Input and output formats.
//!
//! A format turns raw input bytes into a [`RequestDocument`] and a batch of
//! answers back into bytes. The handler never sees the wire format.

mod json;
mod text;

pub use json::JsonFormat;
pub use text::TextFormat;

use crate::requests::{RequestDocument, StatRequest, StatResponse};

/// Errors from parsing or rendering a batch.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("input is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("{0} requests cannot be written in this format")]
    Unsupported(&'static str),

    #[error("failed to write output: {0}")]
    Fmt(#[from] std::fmt::Error),
}

impl FormatError {
    pub(crate) fn syntax(line: usize, message: impl Into<String>) -> Self {
        FormatError::Syntax {
            line,
            message: message.into(),
        }
    }
}

/// A wire format for batches.
pub trait RequestFormat {
    fn parse(&self, input: &[u8]) -> Result<RequestDocument, FormatError>;

    /// Render the responses to `requests`, which pair up by position.
    fn render(&self, requests: &[StatRequest], responses: &[StatResponse]) -> Result<Vec<u8>, FormatError>;
}

/// The formats selectable from the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum FormatKind {
    #[default]
    Json,
    Text,
}

impl FormatKind {
    pub fn adapter(self) -> Box<dyn RequestFormat + Send + Sync> {
        match self {
            FormatKind::Json => Box::new(JsonFormat),
            FormatKind::Text => Box::new(TextFormat),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = FormatError::syntax(3, "expected a count");
        assert_eq!(err.to_string(), "line 3: expected a count");

        let err = FormatError::Unsupported("Route");
        assert_eq!(err.to_string(), "Route requests cannot be written in this format");

        let err = FormatError::from(std::fmt::Error);
        assert!(err.to_string().starts_with("failed to write output"));
    }

    #[test]
    fn kinds_pick_their_adapter() {
        let input = b"{\"stat_requests\": [{\"id\": 1, \"type\": \"Map\"}]}";
        let doc = FormatKind::Json.adapter().parse(input).unwrap();
        assert_eq!(doc.stat_requests.len(), 1);

        let doc = FormatKind::Text.adapter().parse(b"0\n0\n").unwrap();
        assert_eq!(doc, RequestDocument::default());
    }
}
