//! Minimal HTTP/1.1 origin for integration tests.
//!
//! Serves one body for any path, answers HEAD with a configurable status,
//! optionally honors `If-Modified-Since` with 304, and can bounce requests
//! through redirect hops. Counts what it sees so tests can assert on
//! network activity.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

#[derive(Debug, Clone, Copy)]
pub struct OriginOptions {
    /// Status for HEAD requests (ignored when a 304 applies).
    pub head_status: u32,
    /// Status for GET requests.
    pub get_status: u32,
    /// Answer a HEAD that carries `If-Modified-Since` with 304.
    pub not_modified_when_conditional: bool,
    /// Number of 302 hops before the resource is served.
    pub redirects: u32,
}

impl Default for OriginOptions {
    fn default() -> Self {
        Self {
            head_status: 200,
            get_status: 200,
            not_modified_when_conditional: false,
            redirects: 0,
        }
    }
}

#[derive(Debug, Default)]
pub struct Hits {
    pub head: AtomicUsize,
    pub get: AtomicUsize,
    /// Requests that carried `If-Modified-Since`.
    pub conditional: AtomicUsize,
}

pub struct Origin {
    base: String,
    redirects: u32,
    body: Arc<Mutex<Vec<u8>>>,
    pub hits: Arc<Hits>,
}

impl Origin {
    /// URL of `file` behind the configured number of redirect hops.
    pub fn url(&self, file: &str) -> String {
        format!("{}{}/{}", self.base, self.redirects, file)
    }

    pub fn set_body(&self, body: &[u8]) {
        *self.body.lock().unwrap() = body.to_vec();
    }

    pub fn heads(&self) -> usize {
        self.hits.head.load(Ordering::SeqCst)
    }

    pub fn gets(&self) -> usize {
        self.hits.get.load(Ordering::SeqCst)
    }

    pub fn conditionals(&self) -> usize {
        self.hits.conditional.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> usize {
        self.heads() + self.gets()
    }
}

pub fn start(body: &[u8]) -> Origin {
    start_with_options(body, OriginOptions::default())
}

/// Starts a server in a background thread. It runs until the process exits.
pub fn start_with_options(body: &[u8], opts: OriginOptions) -> Origin {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let body = Arc::new(Mutex::new(body.to_vec()));
    let hits = Arc::new(Hits::default());
    {
        let body = Arc::clone(&body);
        let hits = Arc::clone(&hits);
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let body = Arc::clone(&body);
                let hits = Arc::clone(&hits);
                thread::spawn(move || handle(stream, &body, &hits, opts));
            }
        });
    }
    Origin {
        base: format!("http://127.0.0.1:{}/", port),
        redirects: opts.redirects,
        body,
        hits,
    }
}

/// URL on a port nothing listens on.
pub fn unreachable_url(file: &str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/{}", port, file)
}

fn handle(
    mut stream: std::net::TcpStream,
    body: &Mutex<Vec<u8>>,
    hits: &Hits,
    opts: OriginOptions,
) {
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
    let (method, path, conditional) = parse_request(request);

    if let Some(location) = next_hop(path) {
        let response = format!(
            "HTTP/1.1 302 Found\r\nLocation: {}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
            location
        );
        let _ = stream.write_all(response.as_bytes());
        return;
    }

    if method.eq_ignore_ascii_case("HEAD") {
        hits.head.fetch_add(1, Ordering::SeqCst);
        if conditional {
            hits.conditional.fetch_add(1, Ordering::SeqCst);
        }
        if conditional && opts.not_modified_when_conditional {
            let _ = stream.write_all(b"HTTP/1.1 304 Not Modified\r\nConnection: close\r\n\r\n");
            return;
        }
        let len = body.lock().unwrap().len();
        let response = format!(
            "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            opts.head_status,
            reason(opts.head_status),
            len
        );
        let _ = stream.write_all(response.as_bytes());
        return;
    }
    if method.eq_ignore_ascii_case("GET") {
        hits.get.fetch_add(1, Ordering::SeqCst);
        if conditional {
            hits.conditional.fetch_add(1, Ordering::SeqCst);
        }
        let body = body.lock().unwrap().clone();
        let response = format!(
            "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            opts.get_status,
            reason(opts.get_status),
            body.len()
        );
        let _ = stream.write_all(response.as_bytes());
        let _ = stream.write_all(&body);
        return;
    }
    let _ = stream.write_all(b"HTTP/1.1 405 Method Not Allowed\r\nConnection: close\r\n\r\n");
}

/// `/3/lib.js` → `Some("/2/lib.js")`; `/0/lib.js` → `None`.
fn next_hop(path: &str) -> Option<String> {
    let rest = path.strip_prefix('/')?;
    let (hops, file) = rest.split_once('/')?;
    let hops: u32 = hops.parse().ok()?;
    if hops == 0 {
        return None;
    }
    Some(format!("/{}/{}", hops - 1, file))
}

fn reason(status: u32) -> &'static str {
    match status {
        200 => "OK",
        304 => "Not Modified",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}

/// Returns (method, path, has If-Modified-Since).
fn parse_request(request: &str) -> (&str, &str, bool) {
    let mut method = "";
    let mut path = "";
    let mut conditional = false;
    for line in request.lines() {
        let line = line.trim();
        if line.is_empty() {
            break;
        }
        if method.is_empty() {
            let mut parts = line.split_whitespace();
            method = parts.next().unwrap_or("");
            path = parts.next().unwrap_or("");
            continue;
        }
        if let Some((name, _)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("if-modified-since") {
                conditional = true;
            }
        }
    }
    (method, path, conditional)
}
