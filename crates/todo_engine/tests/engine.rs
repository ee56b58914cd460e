use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use pretty_assertions::assert_eq;
use todo_engine::{ApiError, EngineEvent, EngineHandle, FailureKind, RemoteTask, TodoApi};

/// In-memory service double; ids listed in `failing` reject deletes with 500.
#[derive(Default)]
struct StubApi {
    failing: HashSet<String>,
    calls: Mutex<Vec<String>>,
}

impl StubApi {
    fn failing(ids: &[&str]) -> Self {
        Self {
            failing: ids.iter().map(|id| id.to_string()).collect(),
            ..Self::default()
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait::async_trait]
impl TodoApi for StubApi {
    async fn list_tasks(&self) -> Result<Vec<RemoteTask>, ApiError> {
        self.record("list".to_string());
        Ok(vec![RemoteTask {
            id: "1".to_string(),
            label: "stub".to_string(),
            is_done: false,
        }])
    }

    async fn create_task(&self, label: &str) -> Result<(), ApiError> {
        self.record(format!("create {label}"));
        Ok(())
    }

    async fn update_task(&self, id: &str, _label: &str, is_done: bool) -> Result<(), ApiError> {
        self.record(format!("update {id} {is_done}"));
        Ok(())
    }

    async fn delete_task(&self, id: &str) -> Result<(), ApiError> {
        self.record(format!("delete {id}"));
        if self.failing.contains(id) {
            return Err(ApiError {
                kind: FailureKind::HttpStatus(500),
                message: "500 Internal Server Error".to_string(),
            });
        }
        Ok(())
    }
}

fn next_event(engine: &EngineHandle) -> EngineEvent {
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        if let Some(event) = engine.try_recv() {
            return event;
        }
        assert!(Instant::now() < deadline, "engine produced no event");
        thread::sleep(Duration::from_millis(5));
    }
}

#[test]
fn batch_delete_reports_every_result_in_order() {
    let api = Arc::new(StubApi::failing(&["b"]));
    let engine = EngineHandle::with_api(api.clone()).unwrap();

    engine.delete_tasks(vec!["a".to_string(), "b".to_string(), "c".to_string()]);

    let EngineEvent::TasksDeleted { results } = next_event(&engine) else {
        panic!("expected batch result");
    };
    let summary: Vec<_> = results
        .iter()
        .map(|(id, result)| (id.as_str(), result.as_ref().err().map(|e| e.kind.clone())))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("a", None),
            ("b", Some(FailureKind::HttpStatus(500))),
            ("c", None),
        ]
    );

    let mut deletes = api.calls();
    deletes.sort();
    assert_eq!(deletes, vec!["delete a", "delete b", "delete c"]);
}

#[test]
fn update_completion_echoes_requested_value() {
    let api = Arc::new(StubApi::default());
    let engine = EngineHandle::with_api(api.clone()).unwrap();

    engine.update_task("9", "label", true);

    assert_eq!(
        next_event(&engine),
        EngineEvent::TaskUpdated {
            id: "9".to_string(),
            is_done: true,
            result: Ok(()),
        }
    );
    assert_eq!(api.calls(), vec!["update 9 true"]);
}

#[test]
fn fetch_and_create_each_produce_one_event() {
    let api = Arc::new(StubApi::default());
    let engine = EngineHandle::with_api(api).unwrap();

    engine.create_task("buy milk");
    let created = next_event(&engine);
    assert_eq!(created, EngineEvent::TaskCreated(Ok(())));

    engine.fetch_tasks();
    match next_event(&engine) {
        EngineEvent::TasksFetched(Ok(tasks)) => assert_eq!(tasks.len(), 1),
        other => panic!("unexpected event {other:?}"),
    }
    assert!(engine.try_recv().is_none());
}

/// Every delete parks on a barrier sized to the batch, so the batch only
/// completes when all deletes are in flight together.
struct RendezvousApi {
    barrier: tokio::sync::Barrier,
}

#[async_trait::async_trait]
impl TodoApi for RendezvousApi {
    async fn list_tasks(&self) -> Result<Vec<RemoteTask>, ApiError> {
        Ok(Vec::new())
    }

    async fn create_task(&self, _label: &str) -> Result<(), ApiError> {
        Ok(())
    }

    async fn update_task(&self, _id: &str, _label: &str, _is_done: bool) -> Result<(), ApiError> {
        Ok(())
    }

    async fn delete_task(&self, id: &str) -> Result<(), ApiError> {
        tokio::time::timeout(Duration::from_secs(2), self.barrier.wait())
            .await
            .map(|_| ())
            .map_err(|_| ApiError {
                kind: FailureKind::Timeout,
                message: format!("delete {id} ran alone"),
            })
    }
}

#[test]
fn batch_deletes_are_in_flight_together() {
    let ids: Vec<String> = ["a", "b", "c", "d"].iter().map(|id| id.to_string()).collect();
    let api = Arc::new(RendezvousApi {
        barrier: tokio::sync::Barrier::new(ids.len()),
    });
    let engine = EngineHandle::with_api(api).unwrap();

    engine.delete_tasks(ids.clone());

    let EngineEvent::TasksDeleted { results } = next_event(&engine) else {
        panic!("expected batch result");
    };
    assert_eq!(results, ids.into_iter().map(|id| (id, Ok(()))).collect::<Vec<_>>());
}
