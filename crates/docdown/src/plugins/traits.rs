//! Base plugin trait.

/// Common identity for every pluggable backend.
///
/// Backends are shared across concurrent requests behind `Arc`, so they must
/// be `Send + Sync` and should keep no per-request state.
///
/// # Example
///
/// ```rust
/// use docdown::plugins::Plugin;
///
/// struct Noop;
///
/// impl Plugin for Noop {
///     fn name(&self) -> &str {
///         "noop"
///     }
/// }
///
/// assert_eq!(Noop.name(), "noop");
/// ```
pub trait Plugin: Send + Sync {
    /// Short lowercase identifier used in logs (e.g. `"markitdown"`).
    fn name(&self) -> &str;
}
