// Small dev utility: load a JSON snapshot and print the procurement board (or every
// order timeline) as JSON, evaluated against the real clock.
//
// Usage:
//   cargo run --bin render-timeline -- <snapshot.json> [config.json] [--timelines] [--json-logs]
//
// Logs go to stderr; RUST_LOG controls verbosity.

use anyhow::Context;
use obra_timeline::engine::date_projector;
use obra_timeline::{logging, EngineConfig, ProcurementBoard, Snapshot};

fn main() -> anyhow::Result<()> {
    let mut show_timelines = false;
    let mut json_logs = false;
    let mut positional = Vec::new();
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--timelines" => show_timelines = true,
            "--json-logs" => json_logs = true,
            _ => positional.push(arg),
        }
    }

    if json_logs {
        logging::init_json();
    } else {
        logging::init();
    }

    let snapshot_path = positional
        .first()
        .context("usage: render-timeline <snapshot.json> [config.json] [--timelines]")?;
    let raw = std::fs::read_to_string(snapshot_path)
        .with_context(|| format!("reading snapshot {}", snapshot_path))?;
    let snapshot = Snapshot::from_json_str(&raw)?;

    let config = match positional.get(1) {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    };

    tracing::info!(
        "snapshot loaded: lineas={}, obras={}, etapas={}, ordenes_compra={}",
        snapshot.lineas.len(),
        snapshot.obras.len(),
        snapshot.etapas.len(),
        snapshot.ordenes_compra.len()
    );

    let board = ProcurementBoard::new(config);
    let now = date_projector::system_now();

    let output = if show_timelines {
        serde_json::to_string_pretty(&board.timelines(&snapshot, now))?
    } else {
        serde_json::to_string_pretty(&board.build(&snapshot, now))?
    };
    println!("{}", output);
    Ok(())
}
