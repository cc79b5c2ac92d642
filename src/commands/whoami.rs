use async_trait::async_trait;

use super::{Command, CommandResult, SessionInfo};
use crate::banner::on_off;

pub struct WhoamiCommand;

#[async_trait]
impl Command for WhoamiCommand {
    fn name(&self) -> &str {
        "/whoami"
    }

    fn description(&self) -> &str {
        "show identity, tool flag, and endpoint"
    }

    async fn execute(&self, _args: &str, info: &SessionInfo<'_>) -> CommandResult {
        println!("  user      {}", info.state.user_id);
        println!("  tools     {}", on_off(info.state.use_tools));
        println!("  endpoint  {}", info.endpoint);
        println!("  config    {}", info.config);
        CommandResult::Handled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::test_info;

    #[tokio::test]
    async fn returns_handled() {
        assert_eq!(
            WhoamiCommand.execute("", &test_info()).await,
            CommandResult::Handled
        );
    }

    #[test]
    fn metadata() {
        assert_eq!(WhoamiCommand.name(), "/whoami");
        assert!(WhoamiCommand.aliases().is_empty());
    }
}
