//! API client core for the todo service.
//!
//! # Overview
//! Two layers. `TodoClient` builds `HttpRequest` values and parses
//! `HttpResponse` values without touching the network (host-does-IO
//! pattern). `TodoStore` keeps the local todo list and reconciles it with
//! the server through the `TodoApi` trait, applying each change only after
//! the server has confirmed it.
//!
//! # Design
//! - `TodoClient` is stateless; it holds only `base_url`.
//! - Each CRUD operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - `HttpTodoApi` joins the client to a host-supplied `Transport`.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod store;
pub mod types;

pub use api::{HttpTodoApi, TodoApi};
pub use client::TodoClient;
pub use config::{ApiConfig, Mode};
pub use error::{ApiError, StoreError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use store::TodoStore;
pub use types::{CreateTodo, Todo, TodoId, UpdateOutcome, UpdateTodo};
