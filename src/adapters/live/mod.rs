//! Live adapters for real external interactions.

pub mod browser;
pub mod clock;
pub mod filesystem;
pub mod git;
pub mod http;
pub mod id_gen;
pub mod shell;

/// Builds the single-threaded runtime the HTTP-based adapters block on.
fn current_thread_runtime() -> std::io::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread().enable_all().build()
}
