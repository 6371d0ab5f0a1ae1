//! Serves recorded interactions back to the replaying adapters.

use std::collections::{HashMap, VecDeque};

use super::format::{Cassette, Interaction};

/// Recorded interactions grouped into one FIFO per `(port, method)`.
///
/// Calls to different methods may interleave differently on replay than
/// they did while recording; only the order within one method matters.
#[derive(Clone)]
pub struct CassetteReplayer {
    pending: HashMap<(String, String), VecDeque<Interaction>>,
    served: HashMap<(String, String), u64>,
}

impl CassetteReplayer {
    /// Queues every interaction in `cassette`.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut pending: HashMap<(String, String), VecDeque<Interaction>> = HashMap::new();
        for interaction in &cassette.interactions {
            pending
                .entry((interaction.port.clone(), interaction.method.clone()))
                .or_default()
                .push_back(interaction.clone());
        }
        Self { pending, served: HashMap::new() }
    }

    /// Pops the next interaction recorded for `port`/`method`.
    ///
    /// # Panics
    ///
    /// Panics with a message starting `Cassette exhausted` when nothing was
    /// recorded for the pair or every recorded call has been served.
    pub fn next_interaction(&mut self, port: &str, method: &str) -> Interaction {
        let key = (port.to_string(), method.to_string());
        let Some(queue) = self.pending.get_mut(&key) else {
            let mut known: Vec<String> =
                self.pending.keys().map(|(p, m)| format!("{p}::{m}")).collect();
            known.sort();
            panic!(
                "Cassette exhausted: nothing recorded for {port}::{method} (recorded: [{}])",
                known.join(", ")
            );
        };
        let served = self.served.entry(key).or_default();
        match queue.pop_front() {
            Some(interaction) => {
                *served += 1;
                interaction
            }
            None => panic!(
                "Cassette exhausted: {port}::{method} was recorded {served} time(s) \
                 and replay asked for more"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::{json, Value};

    fn cassette(entries: &[(&str, &str, Value)]) -> Cassette {
        Cassette {
            name: "verify".into(),
            recorded_at: Utc::now(),
            commit: "abc123".into(),
            interactions: entries
                .iter()
                .enumerate()
                .map(|(seq, (port, method, output))| Interaction {
                    seq: seq as u64,
                    port: (*port).into(),
                    method: (*method).into(),
                    input: Value::Null,
                    output: output.clone(),
                })
                .collect(),
        }
    }

    #[test]
    fn each_method_keeps_its_own_order() {
        let mut replayer = CassetteReplayer::new(&cassette(&[
            ("shell", "run", json!({"Ok": {"exit_code": 0}})),
            ("http", "get", json!(200)),
            ("shell", "run", json!({"Ok": {"exit_code": 1}})),
        ]));

        assert_eq!(replayer.next_interaction("http", "get").seq, 1);
        assert_eq!(replayer.next_interaction("shell", "run").output["Ok"]["exit_code"], 0);
        assert_eq!(replayer.next_interaction("shell", "run").output["Ok"]["exit_code"], 1);
    }

    #[test]
    #[should_panic(expected = "Cassette exhausted: browser::screenshot was recorded 1 time(s)")]
    fn asking_past_the_recording_panics() {
        let mut replayer =
            CassetteReplayer::new(&cassette(&[("browser", "screenshot", json!({"Ok": "iVBORw0KGgo="}))]));
        let _ = replayer.next_interaction("browser", "screenshot");
        let _ = replayer.next_interaction("browser", "screenshot");
    }

    #[test]
    #[should_panic(expected = "nothing recorded for git::changed_files (recorded: [clock::now])")]
    fn unrecorded_method_lists_what_was_recorded() {
        let mut replayer =
            CassetteReplayer::new(&cassette(&[("clock", "now", json!("2024-01-01T00:00:00Z"))]));
        let _ = replayer.next_interaction("git", "changed_files");
    }
}
