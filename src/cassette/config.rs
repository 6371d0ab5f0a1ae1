//! Cassette configuration for composable per-port replay.

use std::path::{Path, PathBuf};

use super::format::Cassette;
use super::replayer::CassetteReplayer;

/// Per-port cassette file paths. Each port can optionally have its own
/// cassette file for replay. Ports without a cassette path will panic
/// if called during replay.
#[derive(Debug, Clone, Default)]
pub struct CassetteConfig {
    /// Path to the filesystem port cassette file.
    pub fs: Option<PathBuf>,
    /// Path to the git port cassette file.
    pub git: Option<PathBuf>,
    /// Path to the clock port cassette file.
    pub clock: Option<PathBuf>,
    /// Path to the shell port cassette file.
    pub shell: Option<PathBuf>,
    /// Path to the ID generator port cassette file.
    pub id_gen: Option<PathBuf>,
    /// Path to the HTTP probe port cassette file.
    pub http: Option<PathBuf>,
    /// Path to the browser port cassette file.
    pub browser: Option<PathBuf>,
}

/// Per-port replayers, each with its own interaction stream.
pub struct PortReplayers {
    /// Replayer for the filesystem port.
    pub fs: Option<CassetteReplayer>,
    /// Replayer for the git port.
    pub git: Option<CassetteReplayer>,
    /// Replayer for the clock port.
    pub clock: Option<CassetteReplayer>,
    /// Replayer for the shell port.
    pub shell: Option<CassetteReplayer>,
    /// Replayer for the ID generator port.
    pub id_gen: Option<CassetteReplayer>,
    /// Replayer for the HTTP probe port.
    pub http: Option<CassetteReplayer>,
    /// Replayer for the browser port.
    pub browser: Option<CassetteReplayer>,
}

impl CassetteConfig {
    /// Returns a config where all port paths are `None`. Any port called
    /// during replay will panic because no cassette is loaded.
    #[must_use]
    pub fn panic_on_unspecified() -> Self {
        Self::default()
    }

    /// Points every port at the per-port files a [`RecordingSession`] writes
    /// into `dir` (`<port>.cassette.yaml`), skipping files that do not exist.
    ///
    /// [`RecordingSession`]: super::session::RecordingSession
    #[must_use]
    pub fn from_session_dir(dir: &Path) -> Self {
        let port = |name: &str| {
            let path = dir.join(format!("{name}.cassette.yaml"));
            path.exists().then_some(path)
        };
        Self {
            fs: port("fs"),
            git: port("git"),
            clock: port("clock"),
            shell: port("shell"),
            id_gen: port("id_gen"),
            http: port("http"),
            browser: port("browser"),
        }
    }

    /// Load a monolithic cassette file and create a single replayer.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_monolithic(path: &Path) -> Result<CassetteReplayer, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read cassette file {}: {e}", path.display()))?;
        let cassette: Cassette = serde_yaml::from_str(&content)
            .map_err(|e| format!("Failed to parse cassette file {}: {e}", path.display()))?;
        Ok(CassetteReplayer::new(&cassette))
    }

    /// Load all configured per-port cassette files and create replayers.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured cassette file cannot be read or parsed.
    pub fn load_all(&self) -> Result<PortReplayers, String> {
        let load = |path: &Option<PathBuf>| path.as_deref().map(Self::load_monolithic).transpose();
        Ok(PortReplayers {
            fs: load(&self.fs)?,
            git: load(&self.git)?,
            clock: load(&self.clock)?,
            shell: load(&self.shell)?,
            id_gen: load(&self.id_gen)?,
            http: load(&self.http)?,
            browser: load(&self.browser)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Cassette, Interaction};
    use chrono::Utc;
    use serde_json::json;

    fn write_cassette(path: &Path, interactions: Vec<Interaction>) {
        let cassette = Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            commit: "abc".into(),
            interactions,
        };
        let yaml = serde_yaml::to_string(&cassette).unwrap();
        std::fs::write(path, yaml).unwrap();
    }

    fn interaction(seq: u64, port: &str, method: &str, output: serde_json::Value) -> Interaction {
        Interaction { seq, port: port.into(), method: method.into(), input: json!(null), output }
    }

    #[test]
    fn panic_on_unspecified_returns_all_none() {
        let config = CassetteConfig::panic_on_unspecified();
        assert!(config.fs.is_none());
        assert!(config.git.is_none());
        assert!(config.clock.is_none());
        assert!(config.shell.is_none());
        assert!(config.id_gen.is_none());
        assert!(config.http.is_none());
        assert!(config.browser.is_none());
    }

    #[test]
    fn load_monolithic_cassette() {
        let dir = std::env::temp_dir().join("attest_config_test_mono");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("full.cassette.yaml");

        write_cassette(
            &path,
            vec![
                interaction(0, "http", "get", json!({"Ok": 200})),
                interaction(1, "fs", "exists", json!(false)),
            ],
        );

        let mut replayer = CassetteConfig::load_monolithic(&path).unwrap();
        assert_eq!(replayer.next_interaction("http", "get").output, json!({"Ok": 200}));
        assert_eq!(replayer.next_interaction("fs", "exists").output, json!(false));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn load_per_port_cassettes() {
        let dir = std::env::temp_dir().join("attest_config_test_ports");
        std::fs::create_dir_all(&dir).unwrap();

        let http_path = dir.join("http.cassette.yaml");
        write_cassette(&http_path, vec![interaction(0, "http", "get", json!({"Ok": 503}))]);
        let fs_path = dir.join("fs.cassette.yaml");
        write_cassette(&fs_path, vec![interaction(0, "fs", "exists", json!(true))]);

        let config =
            CassetteConfig { http: Some(http_path), fs: Some(fs_path), ..CassetteConfig::default() };
        let mut replayers = config.load_all().unwrap();

        let http = replayers.http.as_mut().unwrap();
        assert_eq!(http.next_interaction("http", "get").output, json!({"Ok": 503}));
        let fs = replayers.fs.as_mut().unwrap();
        assert_eq!(fs.next_interaction("fs", "exists").output, json!(true));

        assert!(replayers.git.is_none());
        assert!(replayers.clock.is_none());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn from_session_dir_only_picks_existing_files() {
        let dir = std::env::temp_dir().join("attest_config_test_session_dir");
        std::fs::create_dir_all(&dir).unwrap();
        write_cassette(&dir.join("shell.cassette.yaml"), vec![]);

        let config = CassetteConfig::from_session_dir(&dir);
        assert_eq!(config.shell, Some(dir.join("shell.cassette.yaml")));
        assert!(config.browser.is_none());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
