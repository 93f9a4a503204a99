mod common;

use common::{HttpServer, client};
use std::io::{BufRead, BufReader, Write};
use std::process::{Command, Stdio};
use tempfile::tempdir;

/// The same requests must produce byte-identical response objects whether
/// they arrive over stdio or HTTP.
#[test]
fn stdio_and_http_answers_match() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    std::fs::write(dir.path().join("shared.md"), "# Shared\n\nSame either way.\n")?;

    let requests = [
        r#"{"jsonrpc":"2.0","id":1,"method":"initialize"}"#,
        r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#,
        r#"{"jsonrpc":"2.0","id":3,"method":"tools/call","params":{"name":"extract-file-to-html","arguments":{"filename":"shared.md"}}}"#,
        r#"{"jsonrpc":"2.0","id":4,"method":"tools/call","params":{"name":"extract-file-to-html","arguments":{"filename":"nope.pdf"}}}"#,
        r#"{"jsonrpc":"2.0","id":5,"method":"tools/call","params":{"name":"no-such-tool"}}"#,
        r#"{"jsonrpc":"2.0","id":6,"method":"bogus/method"}"#,
    ];

    // Stdio pass.
    let mut child = Command::new(env!("CARGO_BIN_EXE_mcp-file-extract"))
        .args(["serve", "--stdio", "--dir"])
        .arg(dir.path())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()?;
    let mut stdin = child.stdin.take().expect("stdin available");
    for request in &requests {
        writeln!(stdin, "{request}")?;
    }
    drop(stdin);

    let stdout = BufReader::new(child.stdout.take().expect("stdout available"));
    let mut via_stdio = Vec::new();
    for line in stdout.lines() {
        let line = line?;
        if !line.trim().is_empty() {
            via_stdio.push(serde_json::from_str::<serde_json::Value>(line.trim())?);
        }
    }
    let _ = child.kill();

    // HTTP pass against the same directory.
    let server = HttpServer::spawn(dir.path(), &[])?;
    let client = client();
    let mut via_http = Vec::new();
    for request in &requests {
        let response = client.post(server.url("/")).body(*request).send()?;
        assert_eq!(response.status(), 200);
        via_http.push(response.json::<serde_json::Value>()?);
    }

    assert_eq!(via_stdio.len(), requests.len());
    assert_eq!(via_http.len(), requests.len());
    for (stdio_answer, http_answer) in via_stdio.iter().zip(&via_http) {
        assert_eq!(stdio_answer, http_answer);
    }
    Ok(())
}
