//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves a single static body on every GET. Behavior (status, whether
//! `Content-Length` is sent, a redirect hop) is set with [`ServerOptions`].
//! Each response closes the connection.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

#[derive(Debug, Clone, Copy)]
pub struct ServerOptions {
    /// Status line sent for the body path, e.g. "200 OK" or "404 Not Found".
    pub status: &'static str,
    /// If false, omit `Content-Length`; the body ends when the connection closes.
    pub send_content_length: bool,
    /// If true, any path other than `/final` answers 302 to `/final`.
    pub redirect: bool,
    /// If set, close the connection after this many body bytes while still
    /// announcing the full length.
    pub cut_after: Option<usize>,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            status: "200 OK",
            send_content_length: true,
            redirect: false,
            cut_after: None,
        }
    }
}

/// A running test server. `hits` counts accepted connections.
pub struct TestServer {
    pub base_url: String,
    pub hits: Arc<AtomicUsize>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }

    pub fn hit_count(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Starts a server in a background thread serving `body` with a 200 and Content-Length.
pub fn start(body: Vec<u8>) -> TestServer {
    start_with_options(body, ServerOptions::default())
}

/// Like `start` but with custom status, length and redirect behavior.
pub fn start_with_options(body: Vec<u8>, opts: ServerOptions) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let body = Arc::new(body);
    let hits = Arc::new(AtomicUsize::new(0));
    let hits_srv = Arc::clone(&hits);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            hits_srv.fetch_add(1, Ordering::SeqCst);
            let body = Arc::clone(&body);
            thread::spawn(move || handle(stream, &body, opts));
        }
    });
    TestServer {
        base_url: format!("http://127.0.0.1:{}/", port),
        hits,
    }
}

fn handle(mut stream: std::net::TcpStream, body: &[u8], opts: ServerOptions) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let (method, path) = parse_request_line(request);
    if !method.eq_ignore_ascii_case("GET") {
        let _ = stream.write_all(b"HTTP/1.1 405 Method Not Allowed\r\nConnection: close\r\n\r\n");
        return;
    }
    if opts.redirect && path != "/final" {
        let _ = stream.write_all(
            b"HTTP/1.1 302 Found\r\nLocation: /final\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        );
        return;
    }
    let is_error = !opts.status.starts_with('2');
    let payload: &[u8] = if is_error { b"error page" } else { body };
    let length_header = if opts.send_content_length {
        format!("Content-Length: {}\r\n", payload.len())
    } else {
        String::new()
    };
    let head = format!(
        "HTTP/1.1 {}\r\n{}Connection: close\r\n\r\n",
        opts.status, length_header
    );
    let sent = match opts.cut_after {
        Some(n) => &payload[..n.min(payload.len())],
        None => payload,
    };
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(sent);
    let _ = stream.flush();
}

/// Returns (method, path) from the request line.
fn parse_request_line(request: &str) -> (&str, &str) {
    let first = request.lines().next().unwrap_or("");
    let mut parts = first.split_whitespace();
    let method = parts.next().unwrap_or("");
    let path = parts.next().unwrap_or("/");
    (method, path)
}
