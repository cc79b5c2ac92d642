//! The request composer: what the user is about to send, and what came back.
//!
//! [`ComposerState`] is a plain record with pure transitions
//! (`Idle → Pending → Succeeded | Failed`, and back to `Pending` on the
//! next submission). [`Composer`] pairs it with a [`TaskClient`].

use anyhow::{Result, bail};
use tracing::debug;

use crate::client::TaskClient;
use crate::consts::default_user;
use crate::request::TaskRequest;
use crate::response::TaskResponse;

/// Where the last submission stands.
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Idle,
    Pending,
    Succeeded(TaskResponse),
    Failed(String),
}

/// Everything the form holds.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposerState {
    pub user_id: String,
    pub use_tools: bool,
    pub task: String,
    phase: Phase,
}

impl Default for ComposerState {
    fn default() -> Self {
        Self::new(default_user(), true)
    }
}

impl ComposerState {
    pub fn new(user_id: &str, use_tools: bool) -> Self {
        Self {
            user_id: user_id.to_string(),
            use_tools,
            task: String::new(),
            phase: Phase::Idle,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_pending(&self) -> bool {
        self.phase == Phase::Pending
    }

    /// Whether the submit control is enabled.
    pub fn can_submit(&self) -> bool {
        !self.is_pending() && !self.task.trim().is_empty()
    }

    /// The last successful reply, if the last submission succeeded.
    pub fn response(&self) -> Option<&TaskResponse> {
        match &self.phase {
            Phase::Succeeded(resp) => Some(resp),
            _ => None,
        }
    }

    /// The last failure message, if the last submission failed.
    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            Phase::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Start a submission. On success the state is `Pending`, the previous
    /// reply and error are gone, and the returned request is what to send.
    /// On rejection the state is untouched.
    pub fn begin(&mut self) -> Result<TaskRequest> {
        if self.is_pending() {
            bail!("a request is already in flight");
        }
        if self.task.trim().is_empty() {
            bail!("task must not be empty");
        }
        self.phase = Phase::Pending;
        debug!(user_id = %self.user_id, use_tools = self.use_tools, "composer pending");
        Ok(TaskRequest {
            user_id: self.user_id.clone(),
            task: self.task.clone(),
            use_tools: self.use_tools,
        })
    }

    /// Finish a submission with its outcome. Failures keep the full error
    /// chain as the message.
    pub fn resolve(&mut self, outcome: Result<TaskResponse>) {
        self.phase = match outcome {
            Ok(resp) => {
                debug!("composer succeeded");
                Phase::Succeeded(resp)
            }
            Err(e) => {
                debug!(error = %e, "composer failed");
                Phase::Failed(format!("{e:#}"))
            }
        };
    }
}

/// How a submission raced against an interrupt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// The reply or failure is in the state.
    Finished,
    /// The interrupt fired first. The state stays `Pending`.
    Interrupted,
}

/// Owns the state and the client. One submission at a time.
pub struct Composer {
    client: Box<dyn TaskClient>,
    state: ComposerState,
}

impl Composer {
    pub fn new(client: Box<dyn TaskClient>, state: ComposerState) -> Self {
        Self { client, state }
    }

    pub fn state(&self) -> &ComposerState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut ComposerState {
        &mut self.state
    }

    pub fn endpoint(&self) -> &str {
        self.client.endpoint()
    }

    /// Submit the current task. Returns `Err` only if the submission was
    /// rejected before anything was sent; transport failures end up in
    /// [`ComposerState::error`].
    pub async fn submit(&mut self) -> Result<&Phase> {
        let request = self.state.begin()?;
        let outcome = self.client.submit(&request).await;
        self.state.resolve(outcome);
        Ok(self.state.phase())
    }

    /// Replace the task text, then submit.
    pub async fn submit_task(&mut self, task: &str) -> Result<&Phase> {
        self.state.task = task.to_string();
        self.submit().await
    }

    /// Submit `task`, giving up as soon as `interrupt` completes. An
    /// interrupted composer is left `Pending` and should be discarded.
    pub async fn submit_until<F>(&mut self, task: &str, interrupt: F) -> Result<Submission>
    where
        F: Future,
    {
        tokio::select! {
            result = self.submit_task(task) => result.map(|_| Submission::Finished),
            _ = interrupt => {
                debug!("submission interrupted");
                Ok(Submission::Interrupted)
            }
        }
    }
}
