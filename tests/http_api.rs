//! `HttpBookApi` against a local server that plays back canned HTTP/1.1 responses.

use std::sync::{Arc, Mutex};

use bookshelf::{Book, BookApi, BookInput, CatalogStore, ErrorKind, HttpBookApi};
use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use url::Url;

#[derive(Debug, Clone)]
struct RecordedRequest {
    method: String,
    path: String,
    headers: Vec<(String, String)>,
    body: String,
}

impl RecordedRequest {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

struct Canned {
    status: u16,
    reason: &'static str,
    body: String,
    /// Advertised `Content-Length` when it differs from the real body.
    declared_length: Option<usize>,
}

fn reply(status: u16, reason: &'static str, body: impl Into<String>) -> Canned {
    Canned {
        status,
        reason,
        body: body.into(),
        declared_length: None,
    }
}

/// A response that promises `declared_length` bytes, sends `body`, and hangs up.
fn truncated(status: u16, reason: &'static str, body: &str, declared_length: usize) -> Canned {
    Canned {
        declared_length: Some(declared_length),
        ..reply(status, reason, body)
    }
}

struct CannedServer {
    base: Url,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl CannedServer {
    /// Serves `responses` in order, one connection each.
    async fn start(responses: Vec<Canned>) -> Self {
        Self::start_at("", responses).await
    }

    async fn start_at(prefix: &str, responses: Vec<Canned>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));

        let recorded = Arc::clone(&requests);
        tokio::spawn(async move {
            for canned in responses {
                let (mut stream, _) = listener.accept().await.unwrap();
                let request = read_request(&mut stream).await;
                recorded.lock().unwrap().push(request);
                write_response(&mut stream, &canned).await;
            }
        });

        Self {
            base: Url::parse(&format!("http://{addr}{prefix}")).unwrap(),
            requests,
        }
    }

    fn api(&self) -> HttpBookApi {
        HttpBookApi::new(self.base.clone()).unwrap()
    }

    fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

async fn read_request(stream: &mut TcpStream) -> RecordedRequest {
    let mut buf = Vec::new();
    let mut chunk = [0_u8; 1024];
    let header_end = loop {
        let n = stream.read(&mut chunk).await.unwrap();
        assert!(n > 0, "client closed before sending headers");
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).into_owned();
    let mut lines = head.split("\r\n");
    let mut request_line = lines.next().unwrap().split(' ');
    let method = request_line.next().unwrap().to_string();
    let path = request_line.next().unwrap().to_string();
    let headers: Vec<(String, String)> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(k, v)| (k.trim().to_ascii_lowercase(), v.trim().to_string()))
        .collect();

    let content_length = headers
        .iter()
        .find(|(k, _)| k == "content-length")
        .map_or(0, |(_, v)| v.parse::<usize>().unwrap());
    while buf.len() < header_end + content_length {
        let n = stream.read(&mut chunk).await.unwrap();
        assert!(n > 0, "client closed before sending body");
        buf.extend_from_slice(&chunk[..n]);
    }
    let body = String::from_utf8_lossy(&buf[header_end..header_end + content_length]).into_owned();

    RecordedRequest {
        method,
        path,
        headers,
        body,
    }
}

async fn write_response(stream: &mut TcpStream, canned: &Canned) {
    let mut response = format!("HTTP/1.1 {} {}\r\nConnection: close\r\n", canned.status, canned.reason);
    if canned.status != 204 {
        response.push_str("Content-Type: application/json\r\n");
        let length = canned.declared_length.unwrap_or(canned.body.len());
        response.push_str(&format!("Content-Length: {length}\r\n"));
    }
    response.push_str("\r\n");
    if canned.status != 204 {
        response.push_str(&canned.body);
    }
    stream.write_all(response.as_bytes()).await.unwrap();
    stream.shutdown().await.unwrap();
}

fn book_json(id: i64, title: &str, author: &str, year: i32) -> String {
    json!({ "id": id, "title": title, "author": author, "year": year }).to_string()
}

#[tokio::test]
async fn list_decodes_books_and_asks_for_fresh_data() {
    let body = format!(
        "[{},{}]",
        book_json(2, "Dune", "Frank Herbert", 1965),
        book_json(1, "Emma", "Jane Austen", 1815)
    );
    let server = CannedServer::start(vec![reply(200, "OK", body)]).await;

    let books = server.api().list().await.unwrap();

    assert_eq!(books.len(), 2);
    assert_eq!(
        books[0],
        Book {
            id: 2,
            title: "Dune".into(),
            author: "Frank Herbert".into(),
            year: 1965
        }
    );
    let requests = server.requests();
    assert_eq!(requests[0].method, "GET");
    assert_eq!(requests[0].path, "/books");
    assert_eq!(requests[0].header("cache-control"), Some("no-store"));
    assert_eq!(requests[0].header("accept"), Some("application/json"));
}

#[tokio::test]
async fn create_posts_the_input_as_json() {
    let server =
        CannedServer::start(vec![reply(201, "Created", book_json(9, "Dune", "Frank Herbert", 1965))])
            .await;

    let created = server
        .api()
        .create(&BookInput::new("Dune", "Frank Herbert", 1965))
        .await
        .unwrap();

    assert_eq!(created.id, 9);
    let request = &server.requests()[0];
    assert_eq!(request.method, "POST");
    assert_eq!(request.path, "/books");
    assert_eq!(request.header("content-type"), Some("application/json"));
    assert_eq!(
        request.json(),
        json!({ "title": "Dune", "author": "Frank Herbert", "year": 1965 })
    );
}

#[tokio::test]
async fn update_puts_below_a_prefixed_base() {
    let server = CannedServer::start_at(
        "/api/",
        vec![reply(200, "OK", book_json(7, "Emma", "Jane Austen", 1816))],
    )
    .await;

    let updated = server
        .api()
        .update(7, &BookInput::new("Emma", "Jane Austen", 1816))
        .await
        .unwrap();

    assert_eq!(updated.year, 1816);
    let request = &server.requests()[0];
    assert_eq!(request.method, "PUT");
    assert_eq!(request.path, "/api/books/7");
    assert_eq!(request.json()["year"], json!(1816));
}

#[tokio::test]
async fn delete_accepts_no_content() {
    let server = CannedServer::start(vec![reply(204, "No Content", "")]).await;

    server.api().delete(3).await.unwrap();

    let request = &server.requests()[0];
    assert_eq!(request.method, "DELETE");
    assert_eq!(request.path, "/books/3");
}

#[tokio::test]
async fn not_found_uses_status_line_and_error_field() {
    let server =
        CannedServer::start(vec![reply(404, "Not Found", r#"{"error":"not found"}"#)]).await;

    let err = server.api().get(42).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transport);
    assert_eq!(err.status(), Some(404));
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "404 Not Found: not found");
}

#[tokio::test]
async fn server_error_without_body_uses_status_line() {
    let server = CannedServer::start(vec![reply(500, "Internal Server Error", "")]).await;

    let err = server.api().list().await.unwrap_err();

    assert_eq!(err.to_string(), "500 Internal Server Error");
}

#[tokio::test]
async fn unreadable_error_body_falls_back_to_status_line() {
    let server =
        CannedServer::start(vec![truncated(500, "Internal Server Error", "partial", 100)]).await;

    let err = server.api().list().await.unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert_eq!(err.to_string(), "500 Internal Server Error");
}

#[tokio::test]
async fn text_error_bodies_are_trimmed() {
    let server = CannedServer::start(vec![reply(400, "Bad Request", "  title too long \n")]).await;

    let err = server
        .api()
        .create(&BookInput::new("x", "y", 2000))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "400 Bad Request: title too long");
}

#[tokio::test]
async fn unreachable_service_is_a_transport_failure_without_status() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let api = HttpBookApi::new(Url::parse(&format!("http://{addr}")).unwrap()).unwrap();

    let err = api.list().await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transport);
    assert_eq!(err.status(), None);
    assert!(!err.to_string().is_empty());
}

#[tokio::test]
async fn store_reconciles_over_the_wire() {
    let created = book_json(1, "Dune", "Frank Herbert", 1965);
    let server = CannedServer::start(vec![
        reply(200, "OK", "[]"),
        reply(201, "Created", created.clone()),
        reply(200, "OK", format!("[{created}]")),
    ])
    .await;

    let store = CatalogStore::open(server.api()).await;
    assert!(store.snapshot().books.is_empty());

    store
        .add_book(&BookInput::new("Dune", "Frank Herbert", 1965))
        .await
        .unwrap();

    let snapshot = store.snapshot();
    assert_eq!(snapshot.books.len(), 1);
    assert_eq!(snapshot.books[0].id, 1);
    assert!(!snapshot.loading);
    assert_eq!(snapshot.error, None);
    let paths: Vec<(String, String)> = server
        .requests()
        .into_iter()
        .map(|r| (r.method, r.path))
        .collect();
    assert_eq!(
        paths,
        vec![
            ("GET".to_string(), "/books".to_string()),
            ("POST".to_string(), "/books".to_string()),
            ("GET".to_string(), "/books".to_string()),
        ]
    );
}
