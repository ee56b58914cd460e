use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// A task as the service reports it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteTask {
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default, deserialize_with = "null_as_false")]
    pub is_done: bool,
}

/// Envelope of `GET users/{user}`.
#[derive(Debug, Deserialize)]
pub(crate) struct TodoListBody {
    #[serde(default)]
    pub todos: Vec<RemoteTask>,
}

/// Body of create and update requests.
#[derive(Debug, Serialize)]
pub(crate) struct TaskBody<'a> {
    pub label: &'a str,
    pub is_done: bool,
}

// Ids arrive as JSON numbers from the public service but are opaque to us.
fn id_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(i64),
        Text(String),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Number(value) => value.to_string(),
        RawId::Text(value) => value,
    })
}

fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

/// Completions reported by the engine thread, one per command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    TasksFetched(Result<Vec<RemoteTask>, ApiError>),
    TaskCreated(Result<(), ApiError>),
    TaskUpdated {
        id: String,
        is_done: bool,
        result: Result<(), ApiError>,
    },
    TaskDeleted {
        id: String,
        result: Result<(), ApiError>,
    },
    /// Results of a batch delete, in the order the ids were given.
    TasksDeleted {
        results: Vec<(String, Result<(), ApiError>)>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct ApiError {
    pub kind: FailureKind,
    pub message: String,
}

impl ApiError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    Network,
    InvalidResponse,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::InvalidResponse => write!(f, "invalid response"),
        }
    }
}
