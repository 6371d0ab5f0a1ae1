//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the verification core and an
//! external collaborator (time, filesystem, git, shell, IDs, HTTP, browser).
//! Implementations live in `src/adapters/`.

pub mod browser;
pub mod clock;
pub mod filesystem;
pub mod git;
pub mod http;
pub mod id_gen;
pub mod shell;

pub use browser::{BrowserDriver, BrowserSession, LayoutMetrics};
pub use clock::Clock;
pub use filesystem::FileSystem;
pub use git::{DiffRange, GitRepo};
pub use http::{HttpProbe, ProbeError};
pub use id_gen::IdGenerator;
pub use shell::{ShellExecutor, ShellOutput};
