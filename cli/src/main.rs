use clap::Parser;
use todo_cli::{transport::UreqTransport, Cli, Command};
use todo_core::{HttpTodoApi, TodoClient, TodoStore};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with_writer(std::io::stderr)
        .init();

    let config = cli.api_config();
    let base_url = config.resolved_base_url();
    tracing::info!(mode = ?config.mode, %base_url, "using todo API");

    let api = HttpTodoApi::new(TodoClient::new(&base_url), UreqTransport::new());
    let store = TodoStore::new(api);
    let command = cli.command.clone().unwrap_or(Command::List);

    let stdout = std::io::stdout();
    todo_cli::run(&store, &command, &mut stdout.lock()).await
}
