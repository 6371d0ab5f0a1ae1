//! Replaying adapters that replay recorded interactions.
//!
//! Every adapter reads its outputs from a [`CassetteReplayer`] and decodes
//! them with the same `{"Ok": v}` / `{"Err": msg}` convention the recording
//! adapters write.

pub mod browser;
pub mod clock;
pub mod filesystem;
pub mod git;
pub mod http;
pub mod id_gen;
pub mod shell;

pub use browser::ReplayingBrowserDriver;
pub use clock::ReplayingClock;
pub use filesystem::ReplayingFileSystem;
pub use git::ReplayingGitRepo;
pub use http::ReplayingHttpProbe;
pub use id_gen::ReplayingIdGenerator;
pub use shell::ReplayingShellExecutor;

use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::cassette::replayer::CassetteReplayer;

/// Pull the output of the next `port::method` interaction.
///
/// Mirror of `recording::record_interaction`. Panics on a port or method
/// mismatch, which means the replayed code diverged from the recording.
pub(crate) fn next_output(replayer: &Mutex<CassetteReplayer>, port: &str, method: &str) -> Value {
    let mut guard = replayer.lock().expect("replayer lock poisoned");
    guard.next_interaction(port, method).output
}

/// Decode a recorded output that is not a `Result`.
pub(crate) fn replay_value<T: DeserializeOwned>(output: Value, context: &str) -> T {
    serde_json::from_value(output)
        .unwrap_or_else(|e| panic!("{context}: recorded output does not decode: {e}"))
}

/// Decode a recorded `Result` using the Ok/Err JSON convention.
///
/// Mirror of `recording::record_result`.
pub(crate) fn replay_result<T: DeserializeOwned>(
    output: Value,
    context: &str,
) -> Result<T, Box<dyn std::error::Error + Send + Sync>> {
    match output {
        Value::Object(mut map) => {
            if let Some(err) = map.remove("Err") {
                let msg = err.as_str().map_or_else(|| err.to_string(), str::to_string);
                return Err(msg.into());
            }
            let ok = map
                .remove("Ok")
                .ok_or_else(|| format!("{context}: recorded output has neither Ok nor Err"))?;
            serde_json::from_value(ok)
                .map_err(|e| format!("{context}: failed to deserialize: {e}").into())
        }
        other => Err(format!("{context}: expected Ok/Err object, got {other}").into()),
    }
}
