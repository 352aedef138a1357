//! Command sessions over `UreqTransport` against the live mock server.

use std::net::SocketAddr;

use todo_cli::{run, transport::UreqTransport, Command};
use todo_core::{HttpTodoApi, TodoClient, TodoStore};

fn start_server() -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    addr
}

/// One CLI invocation: a fresh store, one command, captured output.
async fn session(addr: SocketAddr, command: Command) -> (anyhow::Result<()>, String) {
    let client = TodoClient::new(&format!("http://{addr}/api"));
    let store = TodoStore::new(HttpTodoApi::new(client, UreqTransport::new()));
    let mut out = Vec::new();
    let result = run(&store, &command, &mut out).await;
    (result, String::from_utf8(out).unwrap())
}

fn words(s: &str) -> Vec<String> {
    s.split_whitespace().map(str::to_string).collect()
}

#[tokio::test]
async fn milk_session() {
    let addr = start_server();

    let (result, out) = session(addr, Command::List).await;
    result.unwrap();
    assert_eq!(out, "No Todos, yay!!!\n");

    let (result, out) = session(addr, Command::Add { body: words("buy milk") }).await;
    result.unwrap();
    assert!(out.starts_with("[ ] buy milk  ("), "unexpected output: {out}");
    let id = out.trim_end().rsplit('(').next().unwrap().trim_end_matches(')').to_string();

    let (result, out) = session(addr, Command::Toggle { id: id.clone() }).await;
    result.unwrap();
    assert_eq!(out, format!("[x] buy milk  ({id})\n"));

    let (result, out) = session(
        addr,
        Command::Edit {
            id: id.clone(),
            body: words("buy oat milk"),
        },
    )
    .await;
    result.unwrap();
    assert_eq!(out, format!("[x] buy oat milk  ({id})\n"));

    let (result, out) = session(addr, Command::Delete { id }).await;
    result.unwrap();
    assert_eq!(out, "No Todos, yay!!!\n");
}

#[tokio::test]
async fn blank_add_is_reported() {
    let addr = start_server();
    let (result, out) = session(addr, Command::Add { body: vec!["  ".to_string()] }).await;
    assert!(result.unwrap_err().to_string().contains("must not be empty"));
    assert_eq!(out, "No Todos, yay!!!\n");
}

#[tokio::test]
async fn unreachable_server_fails_before_rendering() {
    let addr = std::net::TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();
    let (result, out) = session(addr, Command::List).await;
    assert!(result.unwrap_err().to_string().contains("could not load todos"));
    assert!(out.is_empty());
}
