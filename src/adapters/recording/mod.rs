//! Recording adapters that capture interactions to cassettes.

pub mod image_provider;

use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use tracing::warn;

use crate::cassette::recorder::CassetteRecorder;

/// Record a `Result<T, E>` outcome using the `{Ok: ..}` / `{Err: ..}` convention.
///
/// An outcome that cannot be serialized is skipped with a warning.
pub(crate) fn record_result<T, E>(
    recorder: &Arc<Mutex<CassetteRecorder>>,
    port: &str,
    method: &str,
    result: &Result<T, E>,
) where
    T: Serialize,
    E: Serialize,
{
    let output = match result {
        Ok(v) => serde_json::to_value(v).map(|inner| serde_json::json!({ "Ok": inner })),
        Err(e) => serde_json::to_value(e).map(|inner| serde_json::json!({ "Err": inner })),
    };

    match output {
        Ok(output) => {
            let mut guard = recorder.lock().unwrap_or_else(PoisonError::into_inner);
            guard.record(port, method, serde_json::Value::Null, output);
        }
        Err(err) => warn!(port, method, error = %err, "interaction not recorded"),
    }
}
