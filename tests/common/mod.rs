#![allow(dead_code)]

use std::io::{BufRead, BufReader};
use std::process::{Child, Command, Stdio};

/// Server process bound to an ephemeral port. The port is recovered from
/// the startup log line on stderr; the banner lines printed before it are
/// kept for inspection. The process dies with the guard.
pub struct HttpServer {
    child: Child,
    pub port: u16,
    pub banner: Vec<String>,
}

impl HttpServer {
    pub fn spawn(
        dir: &std::path::Path,
        extra_args: &[&str],
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let mut child = Command::new(env!("CARGO_BIN_EXE_mcp-file-extract"))
            .args(["serve", "--port", "0", "--dir"])
            .arg(dir)
            .args(extra_args)
            .env("RUST_LOG", "info")
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()?;

        let mut reader = BufReader::new(child.stderr.take().expect("stderr available"));
        let mut line = String::new();
        let mut banner = Vec::new();
        let port = loop {
            line.clear();
            if reader.read_line(&mut line)? == 0 {
                let _ = child.kill();
                return Err("server exited before reporting its port".into());
            }
            if let Some(port) = parse_port(&line) {
                break port;
            }
            banner.push(line.trim_end().to_string());
        };

        // Keep draining stderr so the child never blocks on a full pipe.
        std::thread::spawn(move || {
            let mut sink = String::new();
            while let Ok(n) = reader.read_line(&mut sink) {
                if n == 0 {
                    break;
                }
                sink.clear();
            }
        });

        Ok(HttpServer { child, port, banner })
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://127.0.0.1:{}{path}", self.port)
    }
}

impl Drop for HttpServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

fn parse_port(line: &str) -> Option<u16> {
    let tail = &line[line.find("listening on")?..];
    let digits: String = tail[tail.rfind(':')? + 1..]
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

pub fn client() -> reqwest::blocking::Client {
    reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(10))
        .build()
        .expect("http client builds")
}
