use seqproc::{RunOutcome, RunState};
use std::io::Write;
use std::path::Path;

/// Write a rendered report to stdout or a file.
pub fn write_output(text: &str, output_path: Option<&str>) -> Result<(), String> {
    match output_path {
        Some(path) => std::fs::write(Path::new(path), format!("{}\n", text))
            .map_err(|e| format!("Failed to write output file '{}': {}", path, e)),
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            handle
                .write_all(text.as_bytes())
                .and_then(|_| handle.write_all(b"\n"))
                .map_err(|e| format!("Failed to write to stdout: {}", e))
        }
    }
}

/// Serialize a value to JSON (pretty or compact).
pub fn to_json<T: serde::Serialize>(value: &T, compact: bool) -> Result<String, String> {
    let rendered = if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    };
    rendered.map_err(|e| format!("JSON serialization failed: {}", e))
}

/// One-line human summary of a finished run.
pub fn summarize(outcome: &RunOutcome) -> String {
    match outcome.state {
        RunState::Cancelled => format!(
            "Cancelled after {}/{} items ({} ms)",
            outcome.processed, outcome.total, outcome.elapsed_ms
        ),
        _ if outcome.total == 0 => "No items to process".to_string(),
        state => format!(
            "Run {}: {}/{} items ({} ms)",
            state, outcome.processed, outcome.total, outcome.elapsed_ms
        ),
    }
}
