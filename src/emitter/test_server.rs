//! Throwaway HTTP/1.1 endpoint for emitter tests
//!
//! Every accepted connection is handled according to a [`Behavior`] and
//! the parsed request is pushed onto a channel, so tests can count calls.

use indexmap::IndexMap;
use std::collections::HashMap;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub enum Behavior {
    Respond {
        status: u16,
        body: &'static [u8],
        headers: Vec<(&'static str, &'static str)>,
    },
    /// Drop the socket without reading or answering
    CloseImmediately,
    /// Read the request, then hold the socket open without answering
    Hang(Duration),
}

impl Behavior {
    pub fn respond(status: u16, body: &'static str) -> Self {
        Behavior::Respond {
            status,
            body: body.as_bytes(),
            headers: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    /// Keys lowercased
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(|s| s.as_str())
    }

    /// Decode a form body; values in these tests never need percent-decoding
    pub fn form(&self) -> IndexMap<String, String> {
        self.body
            .split('&')
            .filter(|pair| !pair.is_empty())
            .filter_map(|pair| pair.split_once('='))
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }
}

pub struct StubServer {
    port: u16,
    requests: Receiver<CapturedRequest>,
}

impl StubServer {
    pub fn start(behavior: Behavior) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub server");
        let port = listener.local_addr().expect("stub server addr").port();
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { continue };
                handle(stream, &behavior, &tx);
            }
        });

        Self { port, requests: rx }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://127.0.0.1:{}{}", self.port, path)
    }

    pub fn next_request(&self) -> Option<CapturedRequest> {
        self.next_request_within(Duration::from_secs(5))
    }

    pub fn next_request_within(&self, timeout: Duration) -> Option<CapturedRequest> {
        self.requests.recv_timeout(timeout).ok()
    }
}

/// URL on a port nothing is listening on
pub fn unused_url(path: &str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind probe");
    let port = listener.local_addr().expect("probe addr").port();
    drop(listener);
    format!("http://127.0.0.1:{}{}", port, path)
}

fn handle(stream: TcpStream, behavior: &Behavior, tx: &Sender<CapturedRequest>) {
    if let Behavior::CloseImmediately = behavior {
        drop(stream);
        return;
    }

    let mut reader = BufReader::new(stream);
    let Some(request) = read_request(&mut reader) else {
        return;
    };
    let _ = tx.send(request);
    let mut stream = reader.into_inner();

    match behavior {
        Behavior::Respond { status, body, headers } => {
            let mut response = format!(
                "HTTP/1.1 {} Stub\r\nContent-Length: {}\r\nConnection: close\r\n",
                status,
                body.len()
            );
            for (name, value) in headers {
                response.push_str(&format!("{}: {}\r\n", name, value));
            }
            response.push_str("\r\n");
            let _ = stream.write_all(response.as_bytes());
            let _ = stream.write_all(body);
            let _ = stream.flush();
        }
        Behavior::Hang(duration) => thread::sleep(*duration),
        Behavior::CloseImmediately => {}
    }
}

fn read_request(reader: &mut BufReader<TcpStream>) -> Option<CapturedRequest> {
    let mut request_line = String::new();
    reader.read_line(&mut request_line).ok()?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next()?.to_string();
    let path = parts.next()?.to_string();

    let mut headers = HashMap::new();
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).ok()? == 0 {
            break;
        }
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            headers.insert(name.trim().to_ascii_lowercase(), value.trim().to_string());
        }
    }

    let length: usize = headers.get("content-length").and_then(|v| v.parse().ok()).unwrap_or(0);
    let mut body = vec![0; length];
    reader.read_exact(&mut body).ok()?;

    Some(CapturedRequest {
        method,
        path,
        headers,
        body: String::from_utf8_lossy(&body).to_string(),
    })
}
