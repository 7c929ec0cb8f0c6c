//! Minimal HTTP/1.1 server for integration tests.
//!
//! Each path gets a scripted sequence of responses: request N receives
//! response N, and the last response repeats once the script runs out.
//! Every request is counted per path. Unknown paths get 404.

#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Reply {
    pub status: u16,
    pub body: Vec<u8>,
    /// Sleep before answering (to trigger client timeouts).
    pub delay: Option<Duration>,
    /// Send the body `chunk` bytes at a time with `gap` between writes.
    pub trickle: Option<(usize, Duration)>,
}

impl Reply {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
            delay: None,
            trickle: None,
        }
    }

    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self::new(200, body)
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn trickled(mut self, chunk: usize, gap: Duration) -> Self {
        self.trickle = Some((chunk.max(1), gap));
        self
    }
}

#[derive(Default)]
struct Route {
    script: Vec<Reply>,
    hits: usize,
}

#[derive(Clone)]
pub struct ListingServer {
    base: String,
    routes: Arc<Mutex<HashMap<String, Route>>>,
}

impl ListingServer {
    /// Starts the server on an ephemeral port. Runs until the process exits.
    pub fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().unwrap().port();
        let routes: Arc<Mutex<HashMap<String, Route>>> = Arc::default();
        let shared = Arc::clone(&routes);
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let routes = Arc::clone(&shared);
                thread::spawn(move || handle(stream, &routes));
            }
        });
        Self {
            base: format!("http://127.0.0.1:{}/", port),
            routes,
        }
    }

    /// Absolute URL for `path` (no leading slash).
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path.trim_start_matches('/'))
    }

    /// Serve `reply` for every request to `path`.
    pub fn route(&self, path: &str, reply: Reply) {
        self.script(path, vec![reply]);
    }

    /// Serve `replies` in order for `path`; the last one repeats.
    pub fn script(&self, path: &str, replies: Vec<Reply>) {
        let key = format!("/{}", path.trim_start_matches('/'));
        let mut routes = self.routes.lock().unwrap();
        let route = routes.entry(key).or_default();
        route.script = replies;
    }

    /// Requests received so far for `path`.
    pub fn hits(&self, path: &str) -> usize {
        let key = format!("/{}", path.trim_start_matches('/'));
        self.routes
            .lock()
            .unwrap()
            .get(&key)
            .map(|r| r.hits)
            .unwrap_or(0)
    }
}

fn handle(mut stream: TcpStream, routes: &Mutex<HashMap<String, Route>>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(5)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let request = String::from_utf8_lossy(&buf[..n]);
    let path = request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/")
        .to_string();

    let reply = {
        let mut routes = routes.lock().unwrap();
        match routes.get_mut(&path) {
            Some(route) if !route.script.is_empty() => {
                let idx = route.hits.min(route.script.len() - 1);
                route.hits += 1;
                route.script[idx].clone()
            }
            Some(route) => {
                route.hits += 1;
                Reply::new(404, "not found")
            }
            None => Reply::new(404, "not found"),
        }
    };

    if let Some(d) = reply.delay {
        thread::sleep(d);
    }
    let head = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        reply.status,
        reason(reply.status),
        reply.body.len()
    );
    let _ = stream.write_all(head.as_bytes());
    match reply.trickle {
        Some((chunk, gap)) => {
            let _ = stream.flush();
            for piece in reply.body.chunks(chunk) {
                thread::sleep(gap);
                if stream.write_all(piece).and_then(|_| stream.flush()).is_err() {
                    return;
                }
            }
        }
        None => {
            let _ = stream.write_all(&reply.body);
        }
    }
    let _ = stream.flush();
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        408 => "Request Timeout",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        504 => "Gateway Timeout",
        _ => "Status",
    }
}

/// A directory-index page with one row per `(title, href)`.
pub fn listing_page(entries: &[(&str, &str)]) -> String {
    let mut rows = String::new();
    for (title, href) in entries {
        rows.push_str(&format!(
            "<tr><td class=\"link\"><a href=\"{href}\" title=\"{title}\">{title}</a></td>\
             <td class=\"size\">512.0 MiB</td><td class=\"date\">2024-03-01 12:00</td></tr>\n"
        ));
    }
    format!(
        "<!DOCTYPE html><html><head><title>Index</title></head><body>\n\
         <table id=\"list\"><thead><tr><th>File Name</th><th>File Size</th><th>Date</th></tr></thead>\n\
         <tbody>\n\
         <tr><td class=\"link\"><a href=\"../\" title=\"Parent directory\">Parent directory/</a></td><td class=\"size\">-</td><td class=\"date\">-</td></tr>\n\
         {rows}</tbody></table></body></html>"
    )
}
