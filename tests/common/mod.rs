// Fixtures shared by the integration tests: zip archives built in memory and a tiny
// loopback HTTP server standing in for go.dev.

#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{BufRead, BufReader, Cursor, Write};
use std::net::{TcpListener, TcpStream};
use std::path::Path;
use std::sync::Arc;
use std::thread;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// One archive member: a directory when `content` is `None`.
pub struct Member<'a> {
    pub name: &'a str,
    pub content: Option<&'a [u8]>,
}

pub fn dir(name: &str) -> Member<'_> {
    Member {
        name,
        content: None,
    }
}

pub fn file<'a>(name: &'a str, content: &'a [u8]) -> Member<'a> {
    Member {
        name,
        content: Some(content),
    }
}

/// Builds a zip archive in memory.
pub fn zip_bytes(members: &[Member<'_>]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default()
        .compression_method(CompressionMethod::Stored)
        .unix_permissions(0o755);
    for member in members {
        match member.content {
            None => writer.add_directory(member.name, options).unwrap(),
            Some(content) => {
                writer.start_file(member.name, options).unwrap();
                writer.write_all(content).unwrap();
            }
        }
    }
    writer.finish().unwrap().into_inner()
}

pub fn write_zip(path: &Path, members: &[Member<'_>]) {
    std::fs::write(path, zip_bytes(members)).unwrap();
}

/// Archive laid out the way go.dev ships Windows releases.
pub fn go_release_zip(version: &str) -> Vec<u8> {
    let version_file = format!("{version}\ntime 2024-02-06T21:31:52Z\n");
    zip_bytes(&[
        dir("go/"),
        dir("go/bin/"),
        file("go/VERSION", version_file.as_bytes()),
        file("go/bin/go.exe", b"MZ fake go binary"),
        file("go/bin/gofmt.exe", b"MZ fake gofmt binary"),
        file("go/src/runtime/runtime.go", b"package runtime\n"),
    ])
}

/// A route served by [`serve`].
#[derive(Clone)]
pub struct Route {
    pub body: Vec<u8>,
    /// Whether to send `Content-Length`; without it the body is delimited by closing the
    /// connection.
    pub declare_length: bool,
}

impl Route {
    pub fn sized(body: Vec<u8>) -> Self {
        Route {
            body,
            declare_length: true,
        }
    }

    pub fn without_length(body: Vec<u8>) -> Self {
        Route {
            body,
            declare_length: false,
        }
    }
}

/// Starts an HTTP/1.1 server on a random loopback port and returns its base URL.
/// Unknown paths get a 404. The server lives until the test process exits.
pub fn serve(routes: HashMap<String, Route>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let routes = Arc::new(routes);

    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let routes = Arc::clone(&routes);
            thread::spawn(move || handle(stream, &routes));
        }
    });

    format!("http://{addr}")
}

fn handle(mut stream: TcpStream, routes: &HashMap<String, Route>) {
    let mut reader = BufReader::new(stream.try_clone().unwrap());
    let mut request_line = String::new();
    if reader.read_line(&mut request_line).is_err() {
        return;
    }
    loop {
        let mut header = String::new();
        match reader.read_line(&mut header) {
            Ok(0) | Err(_) => break,
            Ok(_) if header.trim().is_empty() => break,
            Ok(_) => {}
        }
    }

    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or("");
    let path = parts.next().unwrap_or("");

    let response = match routes.get(path) {
        Some(route) => {
            let mut head = String::from("HTTP/1.1 200 OK\r\nConnection: close\r\n");
            if route.declare_length {
                head.push_str(&format!("Content-Length: {}\r\n", route.body.len()));
            }
            head.push_str("\r\n");
            let mut bytes = head.into_bytes();
            if method != "HEAD" {
                bytes.extend_from_slice(&route.body);
            }
            bytes
        }
        None => b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n".to_vec(),
    };
    let _ = stream.write_all(&response);
    let _ = stream.flush();
}
