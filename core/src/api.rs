//! Asynchronous todo API: the seam between the store and the network.
//!
//! `HttpTodoApi` pairs the stateless `TodoClient` with a `Transport` and runs
//! the build, execute, parse sequence for each operation. The store only sees
//! the `TodoApi` trait, so tests can drive it with an in-memory stub.

use tracing::debug;

use crate::client::TodoClient;
use crate::error::ApiError;
use crate::http::Transport;
use crate::types::{CreateTodo, Todo, TodoId, UpdateOutcome, UpdateTodo};

/// The four remote operations the store relies on.
#[allow(async_fn_in_trait)]
pub trait TodoApi {
    async fn list(&self) -> Result<Vec<Todo>, ApiError>;
    async fn create(&self, input: &CreateTodo) -> Result<Todo, ApiError>;
    async fn update(&self, id: &TodoId, input: &UpdateTodo) -> Result<UpdateOutcome, ApiError>;
    async fn delete(&self, id: &TodoId) -> Result<(), ApiError>;
}

/// `TodoApi` backed by real HTTP requests.
#[derive(Debug, Clone)]
pub struct HttpTodoApi<T> {
    client: TodoClient,
    transport: T,
}

impl<T: Transport> HttpTodoApi<T> {
    pub fn new(client: TodoClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &TodoClient {
        &self.client
    }
}

impl<T: Transport> TodoApi for HttpTodoApi<T> {
    async fn list(&self) -> Result<Vec<Todo>, ApiError> {
        let req = self.client.build_list_todos();
        debug!(method = req.method.as_str(), path = %req.path, "sending request");
        let response = self.transport.execute(req).await?;
        self.client.parse_list_todos(response)
    }

    async fn create(&self, input: &CreateTodo) -> Result<Todo, ApiError> {
        let req = self.client.build_create_todo(input)?;
        debug!(method = req.method.as_str(), path = %req.path, "sending request");
        let response = self.transport.execute(req).await?;
        self.client.parse_create_todo(response)
    }

    async fn update(&self, id: &TodoId, input: &UpdateTodo) -> Result<UpdateOutcome, ApiError> {
        let req = self.client.build_update_todo(id, input)?;
        debug!(method = req.method.as_str(), path = %req.path, "sending request");
        let response = self.transport.execute(req).await?;
        self.client.parse_update_todo(response)
    }

    async fn delete(&self, id: &TodoId) -> Result<(), ApiError> {
        let req = self.client.build_delete_todo(id);
        debug!(method = req.method.as_str(), path = %req.path, "sending request");
        let response = self.transport.execute(req).await?;
        self.client.parse_delete_todo(response)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::http::{HttpMethod, HttpRequest, HttpResponse};

    /// Replays canned responses and records what was sent.
    struct Canned {
        responses: Mutex<Vec<Result<HttpResponse, ApiError>>>,
        sent: Mutex<Vec<HttpRequest>>,
    }

    impl Canned {
        fn new(responses: Vec<Result<HttpResponse, ApiError>>) -> Self {
            Self {
                responses: Mutex::new(responses),
                sent: Mutex::new(Vec::new()),
            }
        }
    }

    impl Transport for Canned {
        async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            self.sent.lock().unwrap().push(request);
            self.responses.lock().unwrap().remove(0)
        }
    }

    fn ok(status: u16, body: &str) -> Result<HttpResponse, ApiError> {
        Ok(HttpResponse {
            status,
            body: body.to_string(),
        })
    }

    fn api(responses: Vec<Result<HttpResponse, ApiError>>) -> HttpTodoApi<Canned> {
        HttpTodoApi::new(TodoClient::new("http://test/api"), Canned::new(responses))
    }

    #[tokio::test]
    async fn create_round_trip() {
        let api = api(vec![ok(201, r#"{"id":"7","body":"Buy milk","completed":false}"#)]);
        let todo = api.create(&CreateTodo::new("Buy milk")).await.unwrap();
        assert_eq!(todo.id, TodoId::from("7"));

        let sent = api.transport.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].method, HttpMethod::Post);
        assert_eq!(sent[0].path, "http://test/api/todos");
    }

    #[tokio::test]
    async fn transport_failure_propagates() {
        let api = api(vec![Err(ApiError::Transport("connection refused".into()))]);
        let err = api.list().await.unwrap_err();
        assert!(err.is_network());
    }

    #[tokio::test]
    async fn update_uses_patch() {
        let api = api(vec![ok(200, r#"{"success":true}"#)]);
        let outcome = api
            .update(&TodoId::from("7"), &UpdateTodo::completed(true))
            .await
            .unwrap();
        assert_eq!(outcome, UpdateOutcome::Acknowledged);
        assert_eq!(api.transport.sent.lock().unwrap()[0].method, HttpMethod::Patch);
    }

    #[tokio::test]
    async fn delete_not_found() {
        let api = api(vec![ok(404, "")]);
        let err = api.delete(&TodoId::from("7")).await.unwrap_err();
        assert_eq!(err, ApiError::NotFound);
    }
}
