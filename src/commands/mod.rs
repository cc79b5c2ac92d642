//! REPL commands prefixed with `/`.
//!
//! Commands implement the [`Command`] trait and are registered in a
//! [`CommandRegistry`]. The registry handles dispatch, alias resolution,
//! argument splitting, and help generation. A command never mutates the
//! session itself; it returns a [`StateChange`] for the REPL to apply.

mod examples;
mod last;
mod quit;
mod tools;
mod user;
mod whoami;

use async_trait::async_trait;
use std::sync::Arc;

use crate::composer::ComposerState;

/// Triggers for the built-in help, handled by the registry itself.
const HELP_TRIGGERS: &[&str] = &["/help", "/h", "/?"];

/// Session info available to commands during execution.
pub struct SessionInfo<'a> {
    pub endpoint: &'a str,
    pub config: &'a str,
    pub state: &'a ComposerState,
}

/// A state change the REPL needs to apply after a command runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateChange {
    /// Switch identity.
    User(String),
    /// Set the tool flag.
    UseTools(bool),
    /// Put this text in the task field and submit it.
    Submit(String),
}

/// What the REPL should do after a command runs.
#[derive(Debug, PartialEq, Eq)]
pub enum CommandResult {
    /// Not a command, treat the line as a task.
    NotACommand,
    /// Command handled, continue the REPL loop.
    Handled,
    StateChanged(StateChange),
    Quit,
}

/// A REPL command.
#[async_trait]
pub trait Command: Send + Sync {
    /// Primary name, e.g. `"/whoami"`.
    fn name(&self) -> &str;

    fn aliases(&self) -> &[&str] {
        &[]
    }

    /// Shown after the name in `/help`, e.g. `"[on|off]"`.
    fn usage(&self) -> &str {
        ""
    }

    /// One-line description for `/help`.
    fn description(&self) -> &str;

    /// Run the command. `args` is everything after the trigger, trimmed.
    async fn execute(&self, args: &str, info: &SessionInfo<'_>) -> CommandResult;
}

/// Holds registered commands.
pub struct CommandRegistry {
    commands: Vec<Arc<dyn Command>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        let commands: Vec<Arc<dyn Command>> = vec![
            Arc::new(whoami::WhoamiCommand),
            Arc::new(user::UserCommand),
            Arc::new(tools::ToolsCommand),
            Arc::new(examples::ExamplesCommand),
            Arc::new(last::LastCommand),
            Arc::new(quit::QuitCommand),
        ];
        Self { commands }
    }

    pub fn register(&mut self, command: Arc<dyn Command>) {
        self.commands.push(command);
    }

    /// Dispatch input to a matching command, or return `NotACommand`.
    pub async fn dispatch(&self, input: &str, info: &SessionInfo<'_>) -> CommandResult {
        let input = input.trim();
        let (trigger, args) = match input.split_once(char::is_whitespace) {
            Some((trigger, args)) => (trigger, args.trim()),
            None => (input, ""),
        };

        // Bare-word aliases like `quit` only count on their own
        if !trigger.starts_with('/') && !args.is_empty() {
            return CommandResult::NotACommand;
        }

        if HELP_TRIGGERS.contains(&trigger) {
            print!("{}", self.help_text());
            return CommandResult::Handled;
        }

        for command in &self.commands {
            if trigger == command.name() || command.aliases().contains(&trigger) {
                return command.execute(args, info).await;
            }
        }

        if trigger.starts_with('/') {
            println!("unknown command: {trigger}");
            println!("type /help for available commands");
            return CommandResult::Handled;
        }

        CommandResult::NotACommand
    }

    /// Generate help text from all registered commands.
    pub fn help_text(&self) -> String {
        let mut entries: Vec<(String, &str)> = vec![(
            format_label(HELP_TRIGGERS[0], &HELP_TRIGGERS[1..], ""),
            "show this help",
        )];
        entries.extend(self.commands.iter().map(|c| {
            (
                format_label(c.name(), c.aliases(), c.usage()),
                c.description(),
            )
        }));

        let max_width = entries
            .iter()
            .map(|(label, _)| label.len())
            .max()
            .unwrap_or(10);

        let mut out = String::new();
        for (label, desc) in &entries {
            out.push_str(&format!("  {label:<max_width$}  {desc}\n"));
        }
        out
    }

    pub fn names(&self) -> Vec<&str> {
        self.commands.iter().map(|c| c.name()).collect()
    }

    /// All registered names and aliases, help included.
    pub fn all_triggers(&self) -> Vec<&str> {
        let mut triggers: Vec<&str> = HELP_TRIGGERS.to_vec();
        for cmd in &self.commands {
            triggers.push(cmd.name());
            triggers.extend_from_slice(cmd.aliases());
        }
        triggers
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn format_label(name: &str, aliases: &[&str], usage: &str) -> String {
    let mut label = name.to_string();
    if !usage.is_empty() {
        label.push(' ');
        label.push_str(usage);
    }
    if !aliases.is_empty() {
        label.push_str(&format!(" ({})", aliases.join(", ")));
    }
    label
}

/// Parse a 1-based menu choice.
pub(crate) fn parse_choice(input: &str, len: usize) -> Option<usize> {
    match input.trim().parse::<usize>() {
        Ok(n) if n >= 1 && n <= len => Some(n - 1),
        _ => None,
    }
}
