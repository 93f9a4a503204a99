use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use tracing::info;

use crate::dispatch::Dispatcher;

/// Newline-delimited JSON-RPC over stdin/stdout. One request per line, one
/// response per line, flushed immediately. Logging stays on stderr so
/// stdout carries nothing but protocol frames.
pub fn serve(dispatcher: &Dispatcher) -> Result<()> {
    info!("stdio transport ready");
    let stdin = io::stdin();
    let stdout = io::stdout();
    run(dispatcher, stdin.lock(), stdout.lock())?;
    info!("stdin closed, shutting down");
    Ok(())
}

fn run(dispatcher: &Dispatcher, reader: impl BufRead, mut writer: impl Write) -> Result<()> {
    for line in reader.lines() {
        let line = line.context("failed to read request line")?;
        if line.trim().is_empty() {
            continue;
        }
        if let Some(response) = dispatcher.handle_text(&line) {
            let serialized =
                serde_json::to_string(&response).context("failed to serialize response")?;
            writeln!(writer, "{serialized}").context("failed to write response")?;
            writer.flush().context("failed to flush stdout")?;
        }
    }
    Ok(())
}
