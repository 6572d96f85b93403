use std::path::Path;

use nd_engine::{ChanceRequest, ChanceWorker, EngineConfig};

pub fn run(
    config: EngineConfig,
    json: Option<&str>,
    file: Option<&Path>,
    strict: bool,
) -> Result<(), String> {
    let source = match (json, file) {
        (Some(json), None) => json.to_string(),
        (None, Some(path)) => std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {e}", path.display()))?,
        (Some(_), Some(_)) => return Err("pass the request inline or with --file, not both".into()),
        (None, None) => return Err("no request given: pass JSON or --file".into()),
    };

    let request: ChanceRequest =
        serde_json::from_str(&source).map_err(|e| format!("invalid request: {e}"))?;
    if strict {
        request.normalize_strict().map_err(|e| e.to_string())?;
    }

    tracing::debug!(?request, "sending request to worker");
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("cannot start runtime: {e}"))?;
    let worker = ChanceWorker::spawn(config).map_err(|e| e.to_string())?;
    let chance = runtime
        .block_on(worker.chance(request))
        .map_err(|e| e.to_string())?;

    println!("{chance}");
    Ok(())
}
