//! Captures generated task IDs so a replay names its manifest identically.

use std::sync::{Arc, Mutex};

use super::record_interaction;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::IdGenerator;

/// ID generator that logs each task ID it produces.
pub struct RecordingIdGenerator {
    inner: Box<dyn IdGenerator>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingIdGenerator {
    /// Wraps `inner`, appending each ID to `recorder`.
    pub fn new(inner: Box<dyn IdGenerator>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl IdGenerator for RecordingIdGenerator {
    fn generate_id(&self) -> String {
        let id = self.inner.generate_id();
        record_interaction(&self.recorder, "id_gen", "generate_id", &(), &id);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FixedId;
    use serde_json::json;

    #[test]
    fn task_id_is_stored_with_a_null_input() {
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new("id_gen.yaml", "id_gen", "abc")));
        let ids = RecordingIdGenerator::new(Box::new(FixedId("task-1700000000000")), Arc::clone(&recorder));

        assert_eq!(ids.generate_id(), "task-1700000000000");

        let recorder = recorder.lock().unwrap();
        let [entry] = recorder.interactions() else {
            panic!("expected exactly one interaction");
        };
        assert_eq!(entry.port, "id_gen");
        assert_eq!(entry.input, json!(null));
        assert_eq!(entry.output, json!("task-1700000000000"));
    }
}
