use std::io;
use std::sync::{mpsc, Arc};
use std::thread;

use futures_util::future::join_all;
use thiserror::Error;
use todo_logging::{todo_debug, todo_info};

use crate::api::{ApiSettings, ReqwestTodoApi, TodoApi};
use crate::{ApiError, EngineEvent};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("api client setup failed: {0}")]
    Api(#[from] ApiError),
    #[error("engine runtime failed to start: {0}")]
    Io(#[from] io::Error),
}

enum EngineCommand {
    FetchTasks,
    CreateTask { label: String },
    UpdateTask { id: String, label: String, is_done: bool },
    DeleteTask { id: String },
    DeleteTasks { ids: Vec<String> },
}

/// Runs task-service requests on a background runtime.
///
/// Every command is spawned as its own task, so a slow request never holds
/// back the others. Completions are collected with [`EngineHandle::try_recv`].
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: ApiSettings) -> Result<Self, EngineError> {
        let api = ReqwestTodoApi::new(settings)?;
        Self::with_api(Arc::new(api))
    }

    pub fn with_api(api: Arc<dyn TodoApi>) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("todo-engine-worker")
            .enable_all()
            .build()?;

        thread::Builder::new()
            .name("todo-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let api = api.clone();
                    let event_tx = event_tx.clone();
                    runtime.spawn(async move {
                        let event = handle_command(api.as_ref(), command).await;
                        let _ = event_tx.send(event);
                    });
                }
                todo_info!("Engine command channel closed; shutting down");
            })?;

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn fetch_tasks(&self) {
        self.submit(EngineCommand::FetchTasks);
    }

    pub fn create_task(&self, label: impl Into<String>) {
        self.submit(EngineCommand::CreateTask {
            label: label.into(),
        });
    }

    pub fn update_task(&self, id: impl Into<String>, label: impl Into<String>, is_done: bool) {
        self.submit(EngineCommand::UpdateTask {
            id: id.into(),
            label: label.into(),
            is_done,
        });
    }

    pub fn delete_task(&self, id: impl Into<String>) {
        self.submit(EngineCommand::DeleteTask { id: id.into() });
    }

    /// Deletes all `ids` concurrently; one `TasksDeleted` event reports them all.
    pub fn delete_tasks(&self, ids: Vec<String>) {
        self.submit(EngineCommand::DeleteTasks { ids });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    fn submit(&self, command: EngineCommand) {
        let _ = self.cmd_tx.send(command);
    }
}

async fn handle_command(api: &dyn TodoApi, command: EngineCommand) -> EngineEvent {
    match command {
        EngineCommand::FetchTasks => EngineEvent::TasksFetched(api.list_tasks().await),
        EngineCommand::CreateTask { label } => {
            EngineEvent::TaskCreated(api.create_task(&label).await)
        }
        EngineCommand::UpdateTask { id, label, is_done } => {
            let result = api.update_task(&id, &label, is_done).await;
            EngineEvent::TaskUpdated {
                id,
                is_done,
                result,
            }
        }
        EngineCommand::DeleteTask { id } => {
            let result = api.delete_task(&id).await;
            EngineEvent::TaskDeleted { id, result }
        }
        EngineCommand::DeleteTasks { ids } => {
            todo_debug!("Deleting {} tasks concurrently", ids.len());
            let results = join_all(ids.iter().map(|id| api.delete_task(id))).await;
            EngineEvent::TasksDeleted {
                results: ids.into_iter().zip(results).collect(),
            }
        }
    }
}
