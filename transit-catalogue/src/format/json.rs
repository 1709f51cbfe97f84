//! The JSON batch format.

use super::{FormatError, RequestFormat};
use crate::requests::{RequestDocument, StatRequest, StatResponse};

/// One JSON object in, one JSON array of responses out.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormat;

impl RequestFormat for JsonFormat {
    fn parse(&self, input: &[u8]) -> Result<RequestDocument, FormatError> {
        Ok(serde_json::from_slice(input)?)
    }

    fn render(&self, _requests: &[StatRequest], responses: &[StatResponse]) -> Result<Vec<u8>, FormatError> {
        let mut bytes = serde_json::to_vec_pretty(responses)?;
        bytes.push(b'\n');
        Ok(bytes)
    }
}
