use async_trait::async_trait;

use super::{Command, CommandResult, SessionInfo, StateChange};
use crate::config::parse_flag;

pub struct ToolsCommand;

#[async_trait]
impl Command for ToolsCommand {
    fn name(&self) -> &str {
        "/tools"
    }

    fn usage(&self) -> &str {
        "[on|off]"
    }

    fn description(&self) -> &str {
        "toggle or set whether the server may use tools"
    }

    async fn execute(&self, args: &str, info: &SessionInfo<'_>) -> CommandResult {
        let flag = if args.is_empty() {
            !info.state.use_tools
        } else {
            match parse_flag(args) {
                Ok(flag) => flag,
                Err(e) => {
                    eprintln!("  ✗ {e}");
                    return CommandResult::Handled;
                }
            }
        };
        CommandResult::StateChanged(StateChange::UseTools(flag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::test_info;

    #[tokio::test]
    async fn no_args_toggles() {
        // test_info() starts with tools on
        assert_eq!(
            ToolsCommand.execute("", &test_info()).await,
            CommandResult::StateChanged(StateChange::UseTools(false))
        );
    }

    #[tokio::test]
    async fn explicit_value() {
        assert_eq!(
            ToolsCommand.execute("on", &test_info()).await,
            CommandResult::StateChanged(StateChange::UseTools(true))
        );
        assert_eq!(
            ToolsCommand.execute("no", &test_info()).await,
            CommandResult::StateChanged(StateChange::UseTools(false))
        );
    }

    #[tokio::test]
    async fn bad_value_is_handled() {
        assert_eq!(
            ToolsCommand.execute("sometimes", &test_info()).await,
            CommandResult::Handled
        );
    }
}
