//! Command-line front end for the todo service.
//!
//! Each invocation is one short session: load the list, apply a single
//! command through `TodoStore`, print the resulting list.

pub mod transport;

use std::io::Write;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use todo_core::{ApiConfig, Mode, Todo, TodoApi, TodoId, TodoStore};

#[derive(Debug, Parser)]
#[command(name = "todo", version, about = "Manage a remote todo list")]
pub struct Cli {
    /// Base URL of the todo API, e.g. http://localhost:5000/api
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Origin that a relative base URL is resolved against
    #[arg(long, global = true)]
    pub origin: Option<String>,

    /// Talk to the local development server
    #[arg(long, global = true)]
    pub dev: bool,

    /// Log more (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Show all todos
    List,
    /// Create a todo
    Add {
        #[arg(required = true, num_args = 1..)]
        body: Vec<String>,
    },
    /// Replace the text of a todo
    Edit {
        id: String,
        #[arg(required = true, num_args = 1..)]
        body: Vec<String>,
    },
    /// Flip a todo between done and not done
    Toggle { id: String },
    /// Remove a todo
    Delete { id: String },
}

impl Cli {
    /// Environment settings with command-line overrides applied.
    pub fn api_config(&self) -> ApiConfig {
        let mut config = ApiConfig::from_env();
        if self.dev {
            config.mode = Mode::Development;
        }
        if let Some(url) = &self.api_url {
            config.api_url = Some(url.clone());
        }
        if let Some(origin) = &self.origin {
            config.origin = origin.clone();
        }
        config
    }
}

/// Run one command against `store` and print the resulting list to `out`.
pub async fn run<A: TodoApi>(store: &TodoStore<A>, command: &Command, out: &mut impl Write) -> anyhow::Result<()> {
    store.load().await;
    if let Some(err) = store.last_error() {
        return Err(err).context("could not load todos");
    }

    match command {
        Command::List => {}
        Command::Add { body } => store.add(&body.join(" ")).await,
        Command::Edit { id, body } => {
            let todo = existing(store, id)?;
            store.edit(&todo.id, &body.join(" ")).await;
        }
        Command::Toggle { id } => {
            let todo = existing(store, id)?;
            store.toggle(&todo.id, todo.completed).await;
        }
        Command::Delete { id } => {
            let todo = existing(store, id)?;
            store.delete(&todo.id).await;
        }
    }

    render(out, &store.todos())?;
    if let Some(err) = store.last_error() {
        return Err(err.into());
    }
    Ok(())
}

fn existing<A: TodoApi>(store: &TodoStore<A>, id: &str) -> anyhow::Result<Todo> {
    match store.get(&TodoId::from(id)) {
        Some(todo) => Ok(todo),
        None => bail!("no todo with id {id}"),
    }
}

pub fn render(out: &mut impl Write, todos: &[Todo]) -> std::io::Result<()> {
    if todos.is_empty() {
        return writeln!(out, "No Todos, yay!!!");
    }
    for todo in todos {
        let mark = if todo.completed { 'x' } else { ' ' };
        writeln!(out, "[{mark}] {}  ({})", todo.body, todo.id)?;
    }
    Ok(())
}
