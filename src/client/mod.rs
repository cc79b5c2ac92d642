pub mod http;
pub mod mock;

use anyhow::Result;
use async_trait::async_trait;

use crate::request::TaskRequest;
use crate::response::TaskResponse;

/// Something that can carry a task to the server and bring back its reply.
#[async_trait]
pub trait TaskClient: Send + Sync {
    /// Send one request. Any transport or decoding failure is an `Err`.
    async fn submit(&self, request: &TaskRequest) -> Result<TaskResponse>;

    /// Where requests go, for display.
    fn endpoint(&self) -> &str;
}
