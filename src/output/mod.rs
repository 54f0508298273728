//! The output channel: every answer leaves the engine as one JSON payload
//! with a declared content type.
//!
//! Logical failures (`not found`, `duplicate`) are payloads too, shaped as
//! `{"error": "..."}` and delivered like any successful answer. Only store
//! faults escape as `Err`.

use std::fmt::Display;

use serde::Serialize;

use crate::persistence::{Row, TableError};

mod handlers;

pub use handlers::{count, create, find, get, list, remove, remove_all, update};

/// Content types an answer can declare.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MimeType {
    Json,
}

impl MimeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MimeType::Json => "application/json",
        }
    }
}

impl Display for MimeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A serialized answer, ready to be handed to the transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextOutput {
    pub mime_type: MimeType,
    pub content: String,
}

impl TextOutput {
    pub fn json<T: Serialize + ?Sized>(value: &T) -> TextOutput {
        //! Serialize `value` as the JSON body of a new output.
        //!
        //! The payload shapes used here are plain maps, lists and strings, so
        //! serialization cannot fail; should it ever, the output degrades to an
        //! `{"error": ...}` payload instead of panicking.

        let content = serde_json::to_string(value).unwrap_or_else(|e| {
            serde_json::json!({ "error": e.to_string() }).to_string()
        });

        TextOutput {
            mime_type: MimeType::Json,
            content,
        }
    }

    pub fn value(&self) -> serde_json::Result<serde_json::Value> {
        //! Parse the content back, mostly useful to callers that inspect
        //! answers.

        serde_json::from_str(&self.content)
    }
}

impl Display for TextOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

/// Every shape an answer can take on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Response {
    Row(Row),
    Rows(Vec<Row>),
    Count { count: usize },
    Ack { result: &'static str },
    Error { error: String },
}

impl Response {
    pub fn ok() -> Response {
        Response::Ack { result: "ok" }
    }

    pub fn error(error: &TableError) -> Response {
        Response::Error {
            error: error.to_string(),
        }
    }

    pub fn into_output(self) -> TextOutput {
        TextOutput::json(&self)
    }
}
