//! Error types for sln-core

/// Result type for sln-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in sln-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A template and its argument list drifted apart
    #[error(
        "Failed creating {template}: the template requires {expected} arguments but {provided} were supplied"
    )]
    TemplateArguments {
        template: &'static str,
        expected: usize,
        provided: usize,
    },

    /// A template contains an unbalanced brace or a non-numeric placeholder
    #[error("Malformed {template} template at byte {position}")]
    TemplateSyntax {
        template: &'static str,
        position: usize,
    },

    /// Invalid solution mode specified
    #[error("Invalid solution mode: {mode}")]
    InvalidSolutionMode { mode: String },

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from sln-fs
    #[error(transparent)]
    Fs(#[from] sln_fs::Error),

    /// Host error from sln-host
    #[error(transparent)]
    Host(#[from] sln_host::Error),
}
