//! `GlobalSection(MonoDevelopProperties)` sections in solution files.

use regex::Regex;
use sln_fs::{NormalizedPath, io};
use std::sync::LazyLock;

use crate::PreservedBlock;

static PROPERTIES_HEADER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*GlobalSection\(MonoDevelopProperties.*\)")
        .expect("Invalid solution properties regex")
});

const SECTION_END: &str = "EndGlobalSection";

/// Parses every MonoDevelop properties section from solution file text.
///
/// A section runs from its header line through the next line containing
/// `EndGlobalSection`. Lines keep their original indentation; line endings
/// are normalized to CRLF. A section cut off by the end of the file is kept
/// as far as it goes.
pub fn parse_solution_properties(content: &str) -> Vec<PreservedBlock> {
    let mut blocks = Vec::new();
    let mut current: Option<(usize, Vec<&str>)> = None;

    for (index, line) in content.lines().enumerate() {
        let line_number = index + 1;

        if current.is_none() && PROPERTIES_HEADER_REGEX.is_match(line) {
            current = Some((line_number, Vec::new()));
        }

        if let Some((start_line, lines)) = current.as_mut() {
            lines.push(line);
            if line.contains(SECTION_END) {
                blocks.push(PreservedBlock {
                    content: lines.join("\r\n"),
                    start_line: *start_line,
                    end_line: line_number,
                });
                current = None;
            }
        }
    }

    if let Some((start_line, lines)) = current {
        blocks.push(PreservedBlock {
            content: lines.join("\r\n"),
            start_line,
            end_line: start_line + lines.len() - 1,
        });
    }

    blocks
}

/// Renders parsed sections for the solution template, CRLF-separated.
pub fn render_solution_properties(blocks: &[PreservedBlock]) -> Option<String> {
    if blocks.is_empty() {
        return None;
    }
    Some(
        blocks
            .iter()
            .map(|block| block.content.as_str())
            .collect::<Vec<_>>()
            .join("\r\n"),
    )
}

/// Reads the solution at `path` and returns its rendered properties sections.
///
/// `None` when the file is missing, unreadable or has no such section.
pub fn read_solution_properties(path: &NormalizedPath) -> Option<String> {
    match io::read_text_if_exists(path) {
        Ok(Some(content)) => render_solution_properties(&parse_solution_properties(&content)),
        Ok(None) => None,
        Err(e) => {
            tracing::debug!(path = %path, error = %e, "existing solution unreadable");
            None
        }
    }
}
