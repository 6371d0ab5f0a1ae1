//! In-memory port fakes shared by unit tests.
//!
//! Every fake is a cheap handle over shared state, so a test can keep a
//! clone after boxing one into a [`ServiceContext`] and inspect it later.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::context::ServiceContext;
use crate::ports::{
    BrowserDriver, BrowserSession, Clock, DiffRange, FileSystem, GitRepo, HttpProbe, IdGenerator,
    LayoutMetrics, ProbeError, ShellExecutor, ShellOutput,
};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Task id produced by [`test_context`].
pub const TEST_TASK_ID: &str = "task-1700000000000";

/// A context wired entirely to fakes with benign defaults: every shell
/// command exits 0, every probe returns 200, the browser measures nothing.
pub fn test_context() -> ServiceContext {
    ServiceContext {
        clock: Box::new(StepClock::new()),
        fs: Box::new(MemFs::new()),
        git: Box::new(FakeGit::new()),
        shell: Box::new(ScriptedShell::new()),
        id_gen: Box::new(FixedId(TEST_TASK_ID)),
        http: Box::new(FakeHttp::new()),
        browser: Box::new(FakeBrowser::new()),
    }
}

/// Starts at 2024-01-01T00:00:00Z and advances 250ms per reading.
pub struct StepClock {
    next: Mutex<DateTime<Utc>>,
}

impl StepClock {
    pub fn new() -> Self {
        Self { next: Mutex::new(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()) }
    }
}

impl Clock for StepClock {
    fn now(&self) -> DateTime<Utc> {
        let mut next = self.next.lock().unwrap();
        let now = *next;
        *next = now + Duration::milliseconds(250);
        now
    }
}

pub struct FixedId(pub &'static str);

impl IdGenerator for FixedId {
    fn generate_id(&self) -> String {
        self.0.to_string()
    }
}

/// In-memory filesystem. Writes to files with a rejected extension fail.
#[derive(Clone, Default)]
pub struct MemFs {
    files: Arc<Mutex<HashMap<PathBuf, Vec<u8>>>>,
    rejected: Option<&'static str>,
}

impl MemFs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting(extension: &'static str) -> Self {
        Self { rejected: Some(extension), ..Self::default() }
    }

    pub fn insert(&self, path: impl AsRef<Path>, contents: &str) {
        self.files.lock().unwrap().insert(path.as_ref().to_path_buf(), contents.as_bytes().to_vec());
    }

    pub fn read(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files
            .lock()
            .unwrap()
            .get(path.as_ref())
            .map(|b| String::from_utf8_lossy(b).into_owned())
    }

    pub fn paths(&self) -> Vec<PathBuf> {
        let mut paths: Vec<_> = self.files.lock().unwrap().keys().cloned().collect();
        paths.sort();
        paths
    }
}

impl FileSystem for MemFs {
    fn read_to_string(&self, path: &Path) -> Result<String, BoxError> {
        self.read(path).ok_or_else(|| format!("File not found: {}", path.display()).into())
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), BoxError> {
        self.write_bytes(path, contents.as_bytes())
    }

    fn write_bytes(&self, path: &Path, contents: &[u8]) -> Result<(), BoxError> {
        if self.rejected.is_some_and(|ext| path.extension().is_some_and(|e| e == ext)) {
            return Err(format!("read-only: {}", path.display()).into());
        }
        self.files.lock().unwrap().insert(path.to_path_buf(), contents.to_vec());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        let files = self.files.lock().unwrap();
        files.contains_key(path) || files.keys().any(|k| k.starts_with(path) && k != path)
    }

    fn list_dir(&self, path: &Path) -> Result<Vec<String>, BoxError> {
        let files = self.files.lock().unwrap();
        let mut names: Vec<String> = files
            .keys()
            .filter(|k| k.parent() == Some(path))
            .filter_map(|k| k.file_name().map(|n| n.to_string_lossy().into_owned()))
            .collect();
        names.sort();
        Ok(names)
    }
}

/// Git fake: unconfigured ranges and paths return errors.
#[derive(Default)]
pub struct FakeGit {
    files: HashMap<DiffRange, Vec<String>>,
    statuses: HashMap<String, String>,
}

impl FakeGit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_files(mut self, range: DiffRange, files: &[&str]) -> Self {
        self.files.insert(range, files.iter().map(|f| (*f).to_string()).collect());
        self
    }

    pub fn with_status(mut self, path: &str, line: &str) -> Self {
        self.statuses.insert(path.to_string(), line.to_string());
        self
    }
}

impl GitRepo for FakeGit {
    fn changed_files(&self, range: DiffRange) -> Result<Vec<String>, BoxError> {
        self.files.get(&range).cloned().ok_or_else(|| format!("bad revision for {range:?}").into())
    }

    fn change_status(&self, _range: DiffRange, path: &str) -> Result<String, BoxError> {
        self.statuses.get(path).cloned().ok_or_else(|| format!("no diff for {path}").into())
    }
}

/// Shell fake. Commands exit 0 unless a scripted prefix matches.
#[derive(Clone, Default)]
pub struct ScriptedShell {
    scripts: Arc<Mutex<Vec<(String, Option<i32>)>>>,
    ran: Arc<Mutex<Vec<String>>>,
}

impl ScriptedShell {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands starting with `prefix` exit with `code`.
    pub fn exits(self, prefix: &str, code: i32) -> Self {
        self.scripts.lock().unwrap().push((prefix.to_string(), Some(code)));
        self
    }

    /// Commands starting with `prefix` cannot be spawned.
    pub fn unspawnable(self, prefix: &str) -> Self {
        self.scripts.lock().unwrap().push((prefix.to_string(), None));
        self
    }

    pub fn ran(&self) -> Vec<String> {
        self.ran.lock().unwrap().clone()
    }
}

impl ShellExecutor for ScriptedShell {
    fn run(&self, command: &str) -> Result<ShellOutput, BoxError> {
        self.ran.lock().unwrap().push(command.to_string());
        let scripted = self
            .scripts
            .lock()
            .unwrap()
            .iter()
            .find(|(prefix, _)| command.starts_with(prefix.as_str()))
            .map(|(_, code)| *code);
        match scripted {
            Some(None) => Err("No such file or directory (os error 2)".into()),
            Some(Some(code)) => Ok(ShellOutput {
                exit_code: code,
                stdout: String::new(),
                stderr: format!("exited {code}"),
            }),
            None => Ok(ShellOutput { exit_code: 0, stdout: "ok".into(), stderr: String::new() }),
        }
    }
}

/// HTTP fake. Unscripted URLs answer 200.
#[derive(Clone, Default)]
pub struct FakeHttp {
    responses: Arc<Mutex<HashMap<String, Result<u16, ProbeError>>>>,
    requested: Arc<Mutex<Vec<String>>>,
}

impl FakeHttp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, url: &str, response: Result<u16, ProbeError>) -> Self {
        self.responses.lock().unwrap().insert(url.to_string(), response);
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

impl HttpProbe for FakeHttp {
    fn get(&self, url: &str) -> Result<u16, ProbeError> {
        self.requested.lock().unwrap().push(url.to_string());
        self.responses.lock().unwrap().get(url).cloned().unwrap_or(Ok(200))
    }
}

/// Browser fake recording every session call as a log line.
#[derive(Clone, Default)]
pub struct FakeBrowser {
    log: Arc<Mutex<Vec<String>>>,
    metrics: Option<LayoutMetrics>,
    fail_launch: bool,
    fail_navigation_to: Option<String>,
    panic_on_screenshot: bool,
}

impl FakeBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every page measures `usage` percent of a 1440px viewport.
    pub fn measuring(mut self, usage: f64) -> Self {
        self.metrics = Some(LayoutMetrics {
            main_width: 1440.0 * usage / 100.0,
            viewport_width: 1440.0,
            viewport_usage: usage,
            padding_left: 16.0,
            padding_right: 16.0,
        });
        self
    }

    pub fn failing_launch(mut self) -> Self {
        self.fail_launch = true;
        self
    }

    pub fn failing_navigation_to(mut self, url_part: &str) -> Self {
        self.fail_navigation_to = Some(url_part.to_string());
        self
    }

    pub fn panicking_on_screenshot(mut self) -> Self {
        self.panic_on_screenshot = true;
        self
    }

    pub fn log(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }

    fn record(&self, entry: String) {
        self.log.lock().unwrap().push(entry);
    }
}

impl BrowserDriver for FakeBrowser {
    fn launch(&self) -> Result<Box<dyn BrowserSession>, BoxError> {
        if self.fail_launch {
            return Err("session not created: chrome not reachable".into());
        }
        self.record("launch".into());
        Ok(Box::new(self.clone()))
    }
}

impl BrowserSession for FakeBrowser {
    fn set_viewport(&self, width: u32, height: u32) -> Result<(), BoxError> {
        self.record(format!("viewport {width}x{height}"));
        Ok(())
    }

    fn navigate(&self, url: &str) -> Result<(), BoxError> {
        self.record(format!("navigate {url}"));
        match &self.fail_navigation_to {
            Some(part) if url.contains(part.as_str()) => Err("net::ERR_CONNECTION_REFUSED".into()),
            _ => Ok(()),
        }
    }

    fn screenshot(&self) -> Result<Vec<u8>, BoxError> {
        assert!(!self.panic_on_screenshot, "renderer crashed");
        Ok(b"\x89PNG".to_vec())
    }

    fn layout_metrics(&self, _selector: &str) -> Result<Option<LayoutMetrics>, BoxError> {
        Ok(self.metrics.clone())
    }

    fn close(&self) -> Result<(), BoxError> {
        self.record("close".into());
        Ok(())
    }
}
