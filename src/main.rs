use std::io::{self, Write};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use tasktester::banner::{BannerInfo, on_off, print_banner};
use tasktester::client::http::HttpTaskClient;
use tasktester::commands::{CommandRegistry, CommandResult, SessionInfo, StateChange};
use tasktester::composer::{Composer, ComposerState, Phase, Submission};
use tasktester::config::{Config, ConfigKey, Overrides, Settings};
use tasktester::consts::default_db_path;
use tasktester::render::render;
use tasktester::spinner::Spinner;

#[derive(Parser)]
#[command(
    name = "tasktester",
    version,
    about = "Send tasks to a task server and see what comes back."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Task endpoint URL
    #[arg(short, long)]
    endpoint: Option<String>,

    /// User identity sent with each task
    #[arg(short, long)]
    user: Option<String>,

    /// Let the server use tools (overrides the saved preference)
    #[arg(long, conflicts_with = "no_tools")]
    tools: bool,

    /// Ask the server not to use tools
    #[arg(long)]
    no_tools: bool,

    /// SQLite database for saved preferences (use :memory: for ephemeral)
    #[arg(short, long)]
    db: Option<String>,

    /// Run a single task and exit (non-interactive)
    #[arg(short, long)]
    run: Option<String>,

    /// Print the raw JSON reply instead of the formatted view
    #[arg(long, default_value_t = false)]
    raw: bool,

    /// Log debug output to stderr (RUST_LOG takes precedence)
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Show or change saved preferences
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective settings
    Show,
    /// Save a preference
    Set { key: Key, value: String },
    /// Forget a preference
    Unset { key: Key },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Key {
    Endpoint,
    User,
    Tools,
}

impl From<Key> for ConfigKey {
    fn from(key: Key) -> Self {
        match key {
            Key::Endpoint => ConfigKey::Endpoint,
            Key::User => ConfigKey::User,
            Key::Tools => ConfigKey::Tools,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let db = match &cli.db {
        Some(db) => db.clone(),
        None => {
            let path = default_db_path()?;
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            path.to_string_lossy().into_owned()
        }
    };
    let config = Config::open(&db)?;

    let overrides = Overrides {
        endpoint: cli.endpoint.clone(),
        user: cli.user.clone(),
        use_tools: match (cli.tools, cli.no_tools) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        },
    };

    if let Some(Command::Config { action }) = cli.command {
        return handle_config(&config, &overrides, action);
    }

    let settings = Settings::resolve(&config, &overrides)?;
    let client = HttpTaskClient::new(&settings.endpoint)?;
    let mut composer = Composer::new(
        Box::new(client),
        ComposerState::new(&settings.user, settings.use_tools),
    );

    // Single task mode
    if let Some(task) = cli.run {
        if submit(&mut composer, &task).await? == Submission::Interrupted {
            bail!("interrupted");
        }
        if let Some(error) = composer.state().error() {
            bail!("{error}");
        }
        print_outcome(composer.state(), cli.raw);
        return Ok(());
    }

    let config_label = if db == ":memory:" {
        "ephemeral"
    } else {
        db.as_str()
    };

    print_banner(&BannerInfo {
        endpoint: &settings.endpoint,
        user: &settings.user,
        use_tools: settings.use_tools,
        config: config_label,
    });

    let commands = CommandRegistry::new();

    // REPL — async stdin so Ctrl+C is caught at the prompt too
    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        print!("\ntask> ");
        io::stdout().flush()?;

        let line = tokio::select! {
            result = lines.next_line() => {
                match result {
                    Ok(Some(line)) => line,
                    Ok(None) => {
                        // Ctrl+D (EOF)
                        println!();
                        break;
                    }
                    Err(e) => {
                        eprintln!("input error: {}", e);
                        break;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                println!();
                break;
            }
        };

        // Trimmed text decides commands; tasks go out as typed
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let result = {
            let info = SessionInfo {
                endpoint: composer.endpoint(),
                config: config_label,
                state: composer.state(),
            };
            commands.dispatch(input, &info).await
        };

        let submission = match result {
            CommandResult::Handled => Submission::Finished,
            CommandResult::Quit => break,
            CommandResult::NotACommand => submit_and_print(&mut composer, &line, cli.raw).await,
            CommandResult::StateChanged(change) => {
                apply_change(&mut composer, &config, change, cli.raw).await
            }
        };

        // The interrupted request is still pending, so the session is over
        if submission == Submission::Interrupted {
            println!("\n\ninterrupted");
            break;
        }
    }

    println!("goodbye.");
    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "tasktester=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Submit `task` with the spinner running until the reply arrives or
/// Ctrl+C is pressed. Only a rejected submission is an `Err`.
async fn submit(composer: &mut Composer, task: &str) -> Result<Submission> {
    if composer.state().is_pending() || task.trim().is_empty() {
        // Rejected before sending; no spinner needed
        return composer.submit_task(task).await.map(|_| Submission::Finished);
    }
    let spinner = Spinner::start("processing...");
    let result = composer.submit_until(task, tokio::signal::ctrl_c()).await;
    spinner.stop().await;
    result
}

async fn submit_and_print(composer: &mut Composer, task: &str, raw: bool) -> Submission {
    match submit(composer, task).await {
        Ok(Submission::Finished) => {
            print_outcome(composer.state(), raw);
            Submission::Finished
        }
        Ok(Submission::Interrupted) => Submission::Interrupted,
        Err(e) => {
            eprintln!("  ✗ {e}");
            Submission::Finished
        }
    }
}

fn print_outcome(state: &ComposerState, raw: bool) {
    match state.phase() {
        Phase::Failed(message) => eprintln!("\nerror: {message}"),
        Phase::Succeeded(resp) if raw => println!("\n{}", resp.pretty()),
        _ => println!("\n{}", render(state.response())),
    }
}

async fn apply_change(
    composer: &mut Composer,
    config: &Config,
    change: StateChange,
    raw: bool,
) -> Submission {
    match change {
        StateChange::User(user) => {
            persist(config, ConfigKey::User, &user);
            composer.state_mut().user_id = user;
        }
        StateChange::UseTools(flag) => {
            persist(config, ConfigKey::Tools, &flag.to_string());
            composer.state_mut().use_tools = flag;
            println!("  ✓ tools {}", on_off(flag));
        }
        StateChange::Submit(task) => return submit_and_print(composer, &task, raw).await,
    }
    Submission::Finished
}

fn persist(config: &Config, key: ConfigKey, value: &str) {
    if let Err(e) = config.set(key, value) {
        warn!(%key, error = %e, "failed to save preference");
    }
}

fn handle_config(config: &Config, overrides: &Overrides, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let settings = Settings::resolve(config, overrides)?;
            println!("  endpoint  {}", settings.endpoint);
            println!("  user      {}", settings.user);
            println!("  tools     {}", on_off(settings.use_tools));
        }
        ConfigAction::Set { key, value } => {
            let key = ConfigKey::from(key);
            if key == ConfigKey::Endpoint {
                HttpTaskClient::new(&value)?;
            }
            config.set(key, &value)?;
            println!("✓ {key} saved.");
        }
        ConfigAction::Unset { key } => {
            let key = ConfigKey::from(key);
            config.remove(key)?;
            println!("✓ {key} reset to default.");
        }
    }
    Ok(())
}
