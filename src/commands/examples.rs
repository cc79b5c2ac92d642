use async_trait::async_trait;

use super::{Command, CommandResult, SessionInfo, StateChange, parse_choice};
use crate::consts::EXAMPLE_TASKS;

pub struct ExamplesCommand;

#[async_trait]
impl Command for ExamplesCommand {
    fn name(&self) -> &str {
        "/examples"
    }

    fn aliases(&self) -> &[&str] {
        &["/ex"]
    }

    fn usage(&self) -> &str {
        "[N]"
    }

    fn description(&self) -> &str {
        "list example tasks, or submit example N"
    }

    async fn execute(&self, args: &str, _info: &SessionInfo<'_>) -> CommandResult {
        if args.is_empty() {
            for (i, task) in EXAMPLE_TASKS.iter().enumerate() {
                println!("  {}. {}", i + 1, task);
            }
            return CommandResult::Handled;
        }

        match parse_choice(args, EXAMPLE_TASKS.len()) {
            Some(idx) => {
                let task = EXAMPLE_TASKS[idx];
                println!("  task: {task}");
                CommandResult::StateChanged(StateChange::Submit(task.to_string()))
            }
            None => {
                eprintln!(
                    "  ✗ invalid example: {args} (pick 1-{})",
                    EXAMPLE_TASKS.len()
                );
                CommandResult::Handled
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::test_info;

    #[tokio::test]
    async fn list_is_handled() {
        assert_eq!(
            ExamplesCommand.execute("", &test_info()).await,
            CommandResult::Handled
        );
    }

    #[tokio::test]
    async fn pick_submits_example() {
        assert_eq!(
            ExamplesCommand.execute("1", &test_info()).await,
            CommandResult::StateChanged(StateChange::Submit(EXAMPLE_TASKS[0].to_string()))
        );
    }

    #[tokio::test]
    async fn bad_pick_is_handled() {
        assert_eq!(
            ExamplesCommand.execute("0", &test_info()).await,
            CommandResult::Handled
        );
        assert_eq!(
            ExamplesCommand.execute("weather", &test_info()).await,
            CommandResult::Handled
        );
    }
}
