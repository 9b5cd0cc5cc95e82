use crate::errors::AppError;
use crate::models::{AppData, Document, SCHEMA_VERSION, now_ms};
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::{error, warn};

pub fn resolve_data_path() -> Result<PathBuf, std::io::Error> {
    if let Ok(path) = env::var("JOURNAL_DATA_PATH") {
        return Ok(PathBuf::from(path));
    }

    Ok(PathBuf::from("data/journal.json"))
}

/// Decodes a stored document. Anything unusable — malformed JSON or a schema
/// version this build does not support — yields `None`; the caller starts
/// from an empty state.
pub fn decode_document(bytes: &[u8]) -> Option<AppData> {
    match serde_json::from_slice::<Document>(bytes) {
        Ok(doc) if doc.version == SCHEMA_VERSION => Some(doc.data),
        Ok(doc) => {
            warn!(
                "discarding stored document with unsupported version {}",
                doc.version
            );
            None
        }
        Err(err) => {
            error!("failed to parse stored document: {err}");
            None
        }
    }
}

pub async fn load_data(path: &Path) -> AppData {
    match fs::read(path).await {
        Ok(bytes) => decode_document(&bytes).unwrap_or_default(),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => AppData::default(),
        Err(err) => {
            error!("failed to read data file: {err}");
            AppData::default()
        }
    }
}

/// Pretty-printed full snapshot, wrapped in a fresh envelope. Also the export
/// payload.
pub fn encode_document(data: &AppData) -> Result<Vec<u8>, serde_json::Error> {
    let doc = Document {
        version: SCHEMA_VERSION,
        timestamp: now_ms(),
        data: data.clone(),
    };
    serde_json::to_vec_pretty(&doc)
}

pub async fn persist_data(path: &Path, data: &AppData) -> Result<(), AppError> {
    let payload = encode_document(data).map_err(AppError::internal)?;
    fs::write(path, payload).await.map_err(AppError::internal)?;
    Ok(())
}

/// Parses an uploaded snapshot. The payload must be a JSON object carrying
/// both `version` and `data`, and the version must be the supported one;
/// anything else is a format error and leaves the caller's state untouched.
pub fn parse_snapshot(bytes: &[u8]) -> Result<AppData, AppError> {
    let value: serde_json::Value = serde_json::from_slice(bytes)
        .map_err(|err| AppError::unprocessable(format!("import is not valid JSON: {err}")))?;
    let object = value
        .as_object()
        .ok_or_else(|| AppError::unprocessable("import must be a JSON object"))?;
    if !object.contains_key("version") {
        return Err(AppError::unprocessable("import is missing the 'version' field"));
    }
    if !object.contains_key("data") {
        return Err(AppError::unprocessable("import is missing the 'data' field"));
    }

    let doc: Document = serde_json::from_value(value).map_err(|err| {
        AppError::unprocessable(format!("import does not match the journal format: {err}"))
    })?;
    if doc.version != SCHEMA_VERSION {
        return Err(AppError::unprocessable(format!(
            "unsupported journal version {}",
            doc.version
        )));
    }
    Ok(doc.data)
}
