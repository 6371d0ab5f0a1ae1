//! ID generator port for producing task identifiers.

/// Generates task identifiers.
///
/// The live implementation derives the token from the current timestamp;
/// two invocations within the same millisecond collide.
pub trait IdGenerator: Send + Sync {
    /// Generates a new task identifier string.
    fn generate_id(&self) -> String;
}
