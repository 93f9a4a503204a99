mod common;

use common::{HttpServer, client};
use std::io::{BufRead, BufReader};
use tempfile::tempdir;

fn read_event(
    reader: &mut impl BufRead,
) -> Result<(String, String), Box<dyn std::error::Error>> {
    let mut event = String::new();
    let mut data = String::new();
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            return Err("sse stream ended".into());
        }
        let line = line.trim_end();
        if line.starts_with(':') {
            continue; // keep-alive comment
        }
        if let Some(rest) = line.strip_prefix("event:") {
            event = rest.trim().to_string();
        } else if let Some(rest) = line.strip_prefix("data:") {
            data = rest.trim().to_string();
        } else if line.is_empty() && !event.is_empty() {
            return Ok((event, data));
        }
    }
}

#[test]
fn sse_announces_the_message_endpoint() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let server = HttpServer::spawn(dir.path(), &[])?;

    let response = client().get(server.url("/sse")).send()?;
    assert_eq!(response.status(), 200);
    assert!(
        response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("text/event-stream"))
    );

    let mut reader = BufReader::new(response);
    let (event, data) = read_event(&mut reader)?;
    assert_eq!(event, "endpoint");
    assert!(data.starts_with("/?sessionId="), "unexpected data: {data}");
    Ok(())
}

#[test]
fn tool_calls_are_relayed_as_log_notifications() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    std::fs::write(dir.path().join("doc.txt"), "observable\n")?;
    let server = HttpServer::spawn(dir.path(), &[])?;
    let client = client();

    let stream = client.get(server.url("/sse")).send()?;
    let mut reader = BufReader::new(stream);
    let (event, _) = read_event(&mut reader)?;
    assert_eq!(event, "endpoint");

    let response = client
        .post(server.url("/"))
        .body(
            r#"{"jsonrpc":"2.0","id":1,"method":"tools/call","params":{"name":"extract-file-to-html","arguments":{"filename":"doc.txt"}}}"#,
        )
        .send()?;
    assert_eq!(response.status(), 200);

    let (event, data) = read_event(&mut reader)?;
    assert_eq!(event, "message");
    let notification: serde_json::Value = serde_json::from_str(&data)?;
    assert_eq!(notification["jsonrpc"], "2.0");
    assert_eq!(notification["method"], "notifications/message");
    assert_eq!(notification["params"]["level"], "info");
    Ok(())
}
