use std::collections::VecDeque;
use std::sync::Mutex;

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde_json::Value;

use crate::request::TaskRequest;
use crate::response::TaskResponse;

use super::TaskClient;

/// A scripted client for tests. Replays replies in order and records
/// every request it was given.
pub struct MockTaskClient {
    replies: Mutex<VecDeque<Result<Value, String>>>,
    requests: Mutex<Vec<TaskRequest>>,
}

impl MockTaskClient {
    /// `Ok` entries are returned as replies, `Err` entries as transport failures.
    pub fn new(replies: Vec<Result<Value, String>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Every request submitted so far, oldest first.
    pub fn requests(&self) -> Vec<TaskRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl TaskClient for MockTaskClient {
    async fn submit(&self, request: &TaskRequest) -> Result<TaskResponse> {
        let n = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request.clone());
            requests.len()
        };
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| anyhow!("MockTaskClient: no more replies (called {n} times)"))?;
        reply.map(TaskResponse::new).map_err(|e| anyhow!(e))
    }

    fn endpoint(&self) -> &str {
        "mock://tasks"
    }
}
