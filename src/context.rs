//! Service context bundling all port trait objects.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::adapters::live::browser::WebDriverBrowser;
use crate::adapters::live::clock::LiveClock;
use crate::adapters::live::filesystem::LiveFileSystem;
use crate::adapters::live::git::LiveGitRepo;
use crate::adapters::live::http::LiveHttpProbe;
use crate::adapters::live::id_gen::LiveIdGenerator;
use crate::adapters::live::shell::LiveShellExecutor;
use crate::adapters::recording::{
    RecordingBrowserDriver, RecordingClock, RecordingFileSystem, RecordingGitRepo,
    RecordingHttpProbe, RecordingIdGenerator, RecordingShellExecutor,
};
use crate::adapters::replaying::{
    ReplayingBrowserDriver, ReplayingClock, ReplayingFileSystem, ReplayingGitRepo,
    ReplayingHttpProbe, ReplayingIdGenerator, ReplayingShellExecutor,
};
use crate::cassette::config::CassetteConfig;
use crate::cassette::session::RecordingSession;
use crate::config::VerifyConfig;
use crate::ports::{
    BrowserDriver, BrowserSession, Clock, DiffRange, FileSystem, GitRepo, HttpProbe, IdGenerator,
    ProbeError, ShellExecutor, ShellOutput,
};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Bundles all port trait objects into a single context.
///
/// Each field provides access to one external boundary. Constructors
/// wire up different adapter implementations (live, replaying, recording).
pub struct ServiceContext {
    /// Clock for report timestamps and durations.
    pub clock: Box<dyn Clock>,
    /// Filesystem for manifests, reports, screenshots and test discovery.
    pub fs: Box<dyn FileSystem>,
    /// Git repository for change-set discovery.
    pub git: Box<dyn GitRepo>,
    /// Shell executor for the command-driven checks.
    pub shell: Box<dyn ShellExecutor>,
    /// Task identifier generator.
    pub id_gen: Box<dyn IdGenerator>,
    /// HTTP probe for integration checks.
    pub http: Box<dyn HttpProbe>,
    /// Headless browser driver for visual checks.
    pub browser: Box<dyn BrowserDriver>,
}

impl ServiceContext {
    /// Creates a live context with real adapters for every port.
    ///
    /// Shell and git run from `config.project_root`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn live(config: &VerifyConfig) -> Result<Self, String> {
        let timeout = Duration::from_secs(config.http_timeout_secs);
        let http = LiveHttpProbe::new(timeout)
            .map_err(|e| format!("Failed to build HTTP client: {e}"))?;

        Ok(Self {
            clock: Box::new(LiveClock),
            fs: Box::new(LiveFileSystem),
            git: Box::new(LiveGitRepo::new(&config.project_root)),
            shell: Box::new(LiveShellExecutor::new(&config.project_root)),
            id_gen: Box::new(LiveIdGenerator::new()),
            http: Box::new(http),
            browser: Box::new(WebDriverBrowser::new(
                config.webdriver_url.clone(),
                config.browser,
                timeout,
            )),
        })
    }

    /// Creates a recording context: live adapters wrapped so that every
    /// interaction lands in the session's per-port cassettes.
    ///
    /// This is the developer-only mechanism behind the `ATTEST_RECORD` env var.
    ///
    /// # Errors
    ///
    /// Returns an error if the live context cannot be built.
    pub fn recording(config: &VerifyConfig, session: &RecordingSession) -> Result<Self, String> {
        let live = Self::live(config)?;

        Ok(Self {
            clock: Box::new(RecordingClock::new(live.clock, Arc::clone(&session.clock))),
            fs: Box::new(RecordingFileSystem::new(live.fs, Arc::clone(&session.fs))),
            git: Box::new(RecordingGitRepo::new(live.git, Arc::clone(&session.git))),
            shell: Box::new(RecordingShellExecutor::new(live.shell, Arc::clone(&session.shell))),
            id_gen: Box::new(RecordingIdGenerator::new(live.id_gen, Arc::clone(&session.id_gen))),
            http: Box::new(RecordingHttpProbe::new(live.http, Arc::clone(&session.http))),
            browser: Box::new(RecordingBrowserDriver::new(
                live.browser,
                Arc::clone(&session.browser),
            )),
        })
    }

    /// Creates a replaying context from a monolithic cassette file.
    ///
    /// All ports are served by a single cassette; each port/method pair
    /// is dispatched to the right interaction stream automatically.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, String> {
        let replayer = CassetteConfig::load_monolithic(path)?;
        let fresh = || replayer.clone();

        Ok(Self {
            clock: Box::new(ReplayingClock::new(fresh())),
            fs: Box::new(ReplayingFileSystem::new(fresh())),
            git: Box::new(ReplayingGitRepo::new(fresh())),
            shell: Box::new(ReplayingShellExecutor::new(fresh())),
            id_gen: Box::new(ReplayingIdGenerator::new(fresh())),
            http: Box::new(ReplayingHttpProbe::new(fresh())),
            browser: Box::new(ReplayingBrowserDriver::new(fresh())),
        })
    }

    /// Creates a replaying context from per-port cassette files.
    ///
    /// Ports without a configured cassette file use a panicking adapter that
    /// fails with a clear message when called.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured cassette file cannot be read or parsed.
    pub fn replaying_from(config: &CassetteConfig) -> Result<Self, String> {
        let replayers = config.load_all()?;

        Ok(Self {
            clock: match replayers.clock {
                Some(r) => Box::new(ReplayingClock::new(r)),
                None => Box::new(Unconfigured("clock")),
            },
            fs: match replayers.fs {
                Some(r) => Box::new(ReplayingFileSystem::new(r)),
                None => Box::new(Unconfigured("fs")),
            },
            git: match replayers.git {
                Some(r) => Box::new(ReplayingGitRepo::new(r)),
                None => Box::new(Unconfigured("git")),
            },
            shell: match replayers.shell {
                Some(r) => Box::new(ReplayingShellExecutor::new(r)),
                None => Box::new(Unconfigured("shell")),
            },
            id_gen: match replayers.id_gen {
                Some(r) => Box::new(ReplayingIdGenerator::new(r)),
                None => Box::new(Unconfigured("id_gen")),
            },
            http: match replayers.http {
                Some(r) => Box::new(ReplayingHttpProbe::new(r)),
                None => Box::new(Unconfigured("http")),
            },
            browser: match replayers.browser {
                Some(r) => Box::new(ReplayingBrowserDriver::new(r)),
                None => Box::new(Unconfigured("browser")),
            },
        })
    }
}

// --- Panicking adapter for ports without a cassette ---

struct Unconfigured(&'static str);

impl Unconfigured {
    fn fail(&self) -> ! {
        panic!("{} port not configured in CassetteConfig: no cassette loaded", self.0);
    }
}

impl Clock for Unconfigured {
    fn now(&self) -> chrono::DateTime<chrono::Utc> {
        self.fail()
    }
}

impl FileSystem for Unconfigured {
    fn read_to_string(&self, _path: &Path) -> Result<String, BoxError> {
        self.fail()
    }
    fn write(&self, _path: &Path, _contents: &str) -> Result<(), BoxError> {
        self.fail()
    }
    fn write_bytes(&self, _path: &Path, _contents: &[u8]) -> Result<(), BoxError> {
        self.fail()
    }
    fn exists(&self, _path: &Path) -> bool {
        self.fail()
    }
    fn list_dir(&self, _path: &Path) -> Result<Vec<String>, BoxError> {
        self.fail()
    }
}

impl GitRepo for Unconfigured {
    fn changed_files(&self, _range: DiffRange) -> Result<Vec<String>, BoxError> {
        self.fail()
    }
    fn change_status(&self, _range: DiffRange, _path: &str) -> Result<String, BoxError> {
        self.fail()
    }
}

impl ShellExecutor for Unconfigured {
    fn run(&self, _command: &str) -> Result<ShellOutput, BoxError> {
        self.fail()
    }
}

impl IdGenerator for Unconfigured {
    fn generate_id(&self) -> String {
        self.fail()
    }
}

impl HttpProbe for Unconfigured {
    fn get(&self, _url: &str) -> Result<u16, ProbeError> {
        self.fail()
    }
}

impl BrowserDriver for Unconfigured {
    fn launch(&self) -> Result<Box<dyn BrowserSession>, BoxError> {
        self.fail()
    }
}
