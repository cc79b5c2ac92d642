use async_trait::async_trait;

use super::{Command, CommandResult, SessionInfo};
use crate::composer::Phase;

pub struct LastCommand;

#[async_trait]
impl Command for LastCommand {
    fn name(&self) -> &str {
        "/last"
    }

    fn aliases(&self) -> &[&str] {
        &["/raw"]
    }

    fn description(&self) -> &str {
        "show the raw JSON of the last reply"
    }

    async fn execute(&self, _args: &str, info: &SessionInfo<'_>) -> CommandResult {
        match info.state.phase() {
            Phase::Succeeded(resp) => println!("{}", resp.pretty()),
            Phase::Failed(message) => println!("  last request failed: {message}"),
            Phase::Pending => println!("  request still in flight"),
            Phase::Idle => println!("  (no result yet)"),
        }
        CommandResult::Handled
    }
}
