//! In-memory todo list kept in step with the server.
//!
//! # Design
//! Every mutation is confirmed by the server before it touches local state.
//! Operations take `&self` and may overlap while their requests are pending,
//! so effects are applied by looking the todo up by id at resolve time. An
//! index captured before the request could point at a different item by then.
//!
//! Failures never reach the caller. They are logged and kept as
//! `last_error` so a front end can show them if it wants to.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{error, info};

use crate::api::TodoApi;
use crate::error::StoreError;
use crate::types::{CreateTodo, Todo, TodoId, UpdateTodo};

#[derive(Debug, Default)]
struct State {
    todos: Vec<Todo>,
    last_error: Option<StoreError>,
}

/// The authoritative local todo sequence for one client session.
#[derive(Debug)]
pub struct TodoStore<A> {
    api: A,
    state: Mutex<State>,
}

impl<A: TodoApi> TodoStore<A> {
    /// An empty store. Call `load` to fetch the server's list.
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: Mutex::new(State::default()),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Replace the local sequence with the server's list.
    pub async fn load(&self) {
        match self.api.list().await {
            Ok(todos) => {
                info!(count = todos.len(), "loaded todos");
                let mut state = self.lock();
                state.todos = todos;
                state.last_error = None;
            }
            Err(err) => self.fail("fetching todos", err.into()),
        }
    }

    /// Create a todo and append it once the server has assigned its id.
    pub async fn add(&self, body: &str) {
        if body.trim().is_empty() {
            self.fail("creating todo", StoreError::EmptyBody);
            return;
        }
        match self.api.create(&CreateTodo::new(body)).await {
            Ok(todo) => {
                let mut state = self.lock();
                state.todos.push(todo);
                state.last_error = None;
            }
            Err(err) => self.fail("creating todo", err.into()),
        }
    }

    /// Replace the body of `id`, keeping its position and completion flag.
    pub async fn edit(&self, id: &TodoId, new_body: &str) {
        match self.api.update(id, &UpdateTodo::body(new_body)).await {
            Ok(_) => self.apply(id, |todo| todo.body = new_body.to_string()),
            Err(err) => self.fail("updating todo", err.into()),
        }
    }

    /// Ask the server to set `completed` to `!current_completed`.
    pub async fn toggle(&self, id: &TodoId, current_completed: bool) {
        let completed = !current_completed;
        match self.api.update(id, &UpdateTodo::completed(completed)).await {
            Ok(_) => self.apply(id, |todo| todo.completed = completed),
            Err(err) => self.fail("updating todo", err.into()),
        }
    }

    pub async fn delete(&self, id: &TodoId) {
        match self.api.delete(id).await {
            Ok(()) => {
                let mut state = self.lock();
                state.todos.retain(|todo| &todo.id != id);
                state.last_error = None;
            }
            Err(err) => self.fail("deleting todo", err.into()),
        }
    }

    /// Snapshot of the current sequence.
    pub fn todos(&self) -> Vec<Todo> {
        self.lock().todos.clone()
    }

    pub fn get(&self, id: &TodoId) -> Option<Todo> {
        self.lock().todos.iter().find(|todo| &todo.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().todos.is_empty()
    }

    /// The failure of the most recent operation, if it failed.
    pub fn last_error(&self) -> Option<StoreError> {
        self.lock().last_error.clone()
    }

    /// Dismiss the recorded failure without touching the list.
    pub fn clear_error(&self) {
        self.lock().last_error = None;
    }

    fn apply(&self, id: &TodoId, change: impl FnOnce(&mut Todo)) {
        let mut state = self.lock();
        state.last_error = None;
        // The todo may have been deleted while the request was in flight.
        if let Some(todo) = state.todos.iter_mut().find(|todo| &todo.id == id) {
            change(todo);
        }
    }

    fn fail(&self, action: &str, err: StoreError) {
        error!(error = %err, "error {action}");
        self.lock().last_error = Some(err);
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
