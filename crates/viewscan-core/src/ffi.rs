//! JSON-in/JSON-out API for callers in other languages.
//!
//! Every function takes strings and returns a JSON envelope
//! `{ "success": bool, "data"?: ..., "error"?: "..." }`.

use serde::{Deserialize, Serialize};

use crate::listing::list_triggers;
use crate::snapshot::Snapshot;
use crate::types::ResultMap;

#[derive(Debug, Serialize)]
pub struct FfiResult<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ScanInput {
    snapshot: Snapshot,
    #[serde(default)]
    models: Vec<String>,
}

/// List triggers from a snapshot.
///
/// Input: snapshot JSON and a JSON array of model names (an empty array
/// selects every model of the snapshot).
/// Output: JSON envelope whose `data` is the result map.
pub fn list_triggers_to_json(snapshot_json: &str, models_json: &str) -> String {
    let snapshot = match Snapshot::from_json(snapshot_json) {
        Ok(s) => s,
        Err(e) => return failure(&e.to_string()),
    };
    let models: Vec<String> = match serde_json::from_str(models_json) {
        Ok(m) => m,
        Err(e) => return failure(&format!("Invalid models JSON: {e}")),
    };

    match scan(&snapshot, &models) {
        Ok(result) => success(result),
        Err(e) => failure(&e),
    }
}

/// List triggers from several snapshots and merge the results.
///
/// Input: JSON array of `{ "snapshot": {...}, "models": [...] }` objects.
/// Output: JSON envelope whose `data` is the merged result map.
pub fn list_triggers_multi_to_json(inputs_json: &str) -> String {
    let inputs: Vec<ScanInput> = match serde_json::from_str(inputs_json) {
        Ok(i) => i,
        Err(e) => return failure(&format!("Invalid input JSON: {e}")),
    };

    let mut merged = ResultMap::new();
    for input in &inputs {
        match scan(&input.snapshot, &input.models) {
            Ok(result) => merged.merge(&result),
            Err(e) => return failure(&e),
        }
    }
    success(merged)
}

fn scan(snapshot: &Snapshot, models: &[String]) -> Result<ResultMap, String> {
    let selected = if models.is_empty() {
        snapshot.model_names()
    } else {
        models.to_vec()
    };
    list_triggers(snapshot, &selected).map_err(|e| e.to_string())
}

fn success(data: ResultMap) -> String {
    let result = FfiResult {
        success: true,
        data: Some(data),
        error: None,
    };
    serde_json::to_string(&result)
        .unwrap_or_else(|e| failure(&format!("JSON serialization error: {e}")))
}

fn failure(message: &str) -> String {
    serde_json::json!({ "success": false, "error": message }).to_string()
}
