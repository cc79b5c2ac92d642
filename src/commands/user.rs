use async_trait::async_trait;

use super::{Command, CommandResult, SessionInfo, StateChange, parse_choice};
use crate::consts::USERS;

pub struct UserCommand;

#[async_trait]
impl Command for UserCommand {
    fn name(&self) -> &str {
        "/user"
    }

    fn usage(&self) -> &str {
        "[N|name]"
    }

    fn description(&self) -> &str {
        "list identities, or switch to one by number or name"
    }

    async fn execute(&self, args: &str, info: &SessionInfo<'_>) -> CommandResult {
        let current = info.state.user_id.as_str();

        if args.is_empty() {
            println!("  Identities:\n");
            for (i, user) in USERS.iter().enumerate() {
                let marker = if *user == current { " ← current" } else { "" };
                println!("  {}. {}{}", i + 1, user, marker);
            }
            if !USERS.contains(&current) {
                println!("\n  current: {current} (custom)");
            }
            return CommandResult::Handled;
        }

        let selected = resolve_user(args);
        if selected == current {
            println!("  already using {selected}");
            return CommandResult::Handled;
        }

        println!("  ✓ user changed to {selected}");
        CommandResult::StateChanged(StateChange::User(selected))
    }
}

/// A number picks from [`USERS`]; anything else is taken as a custom identity.
fn resolve_user(args: &str) -> String {
    match parse_choice(args, USERS.len()) {
        Some(idx) => USERS[idx].to_string(),
        None => args.to_string(),
    }
}
