//! To-do engine: REST client for the task service and background effect execution.
mod api;
mod engine;
mod types;

pub use api::{ApiSettings, ReqwestTodoApi, TodoApi};
pub use engine::{EngineError, EngineHandle};
pub use types::{ApiError, EngineEvent, FailureKind, RemoteTask};
