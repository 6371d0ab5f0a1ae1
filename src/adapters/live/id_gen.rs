//! Live adapter for the `IdGenerator` port.

use chrono::Utc;

use crate::ports::IdGenerator;

/// Live ID generator producing `task-<unix millis>` tokens.
pub struct LiveIdGenerator;

impl LiveIdGenerator {
    /// Creates a new live ID generator.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for LiveIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for LiveIdGenerator {
    fn generate_id(&self) -> String {
        format!("task-{}", Utc::now().timestamp_millis())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_timestamp_token() {
        let before = Utc::now().timestamp_millis();
        let id = LiveIdGenerator::new().generate_id();
        let after = Utc::now().timestamp_millis();

        let millis: i64 = id.strip_prefix("task-").unwrap().parse().unwrap();
        assert!(millis >= before && millis <= after);
    }
}
