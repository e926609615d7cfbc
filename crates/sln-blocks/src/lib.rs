//! Preserved custom blocks for slnsync.
//!
//! Generated artifacts are owned by the generator, except for one fragment
//! each that belongs to the IDE:
//!
//! - **Project files**: every `<ProjectExtensions>` element under the root
//!   `<Project>` element.
//! - **Solution files**: every `GlobalSection(MonoDevelopProperties)` section.
//!
//! This crate finds those fragments in the previously generated file so the
//! serializers can splice them verbatim into the fresh output. Extraction
//! never fails: a missing, unreadable or malformed file simply has no
//! blocks.

pub mod project;
pub mod solution;

pub use project::{parse_project_extensions, read_project_extensions};
pub use solution::{parse_solution_properties, read_solution_properties};

/// A preserved fragment and where it was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreservedBlock {
    /// The fragment text, markers included.
    pub content: String,
    /// The 1-based line number where the fragment starts.
    pub start_line: usize,
    /// The 1-based line number where the fragment ends.
    pub end_line: usize,
}
