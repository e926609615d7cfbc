//! `<ProjectExtensions>` blocks in generated project files.

use roxmltree::{Document, Node};
use sln_fs::{NormalizedPath, io};

use crate::PreservedBlock;

/// Namespace of MSBuild project documents.
pub const MSBUILD_NAMESPACE: &str = "http://schemas.microsoft.com/developer/msbuild/2003";

const PROJECT_ELEMENT: &str = "Project";
const EXTENSIONS_ELEMENT: &str = "ProjectExtensions";

/// Parses every `<ProjectExtensions>` element directly under the root
/// `<Project>` element, verbatim and in document order.
///
/// Returns an empty vector when the text is not a well-formed XML document
/// or its root is not an MSBuild `<Project>`. Commented-out elements never
/// count.
pub fn parse_project_extensions(content: &str) -> Vec<PreservedBlock> {
    let document = match Document::parse(content) {
        Ok(document) => document,
        Err(e) => {
            tracing::debug!(error = %e, "existing project is not well-formed, ignoring its blocks");
            return Vec::new();
        }
    };

    let root = document.root_element();
    let namespace = root.tag_name().namespace();
    if root.tag_name().name() != PROJECT_ELEMENT || !matches!(namespace, None | Some(MSBUILD_NAMESPACE)) {
        tracing::debug!(root = root.tag_name().name(), "existing project has no Project root");
        return Vec::new();
    }

    root.children()
        .filter(|node| is_extensions_element(node, namespace))
        .map(|node| {
            let range = node.range();
            PreservedBlock {
                content: content[range.clone()].to_string(),
                start_line: line_of(content, range.start),
                end_line: line_of(content, range.end),
            }
        })
        .collect()
}

fn is_extensions_element(node: &Node<'_, '_>, namespace: Option<&str>) -> bool {
    node.is_element()
        && node.tag_name().name() == EXTENSIONS_ELEMENT
        && node.tag_name().namespace() == namespace
}

/// Renders parsed blocks the way the project footer embeds them.
///
/// Each block is followed by a CRLF; no blocks render to the empty string.
pub fn render_project_extensions(blocks: &[PreservedBlock]) -> String {
    blocks
        .iter()
        .map(|block| format!("{}\r\n", block.content))
        .collect()
}

/// Reads the project file at `path` and returns its rendered extension blocks.
///
/// Missing, unreadable and malformed files all yield the empty string.
pub fn read_project_extensions(path: &NormalizedPath) -> String {
    match io::read_text_if_exists(path) {
        Ok(Some(content)) => render_project_extensions(&parse_project_extensions(&content)),
        Ok(None) => String::new(),
        Err(e) => {
            tracing::debug!(path = %path, error = %e, "existing project unreadable");
            String::new()
        }
    }
}

fn line_of(content: &str, offset: usize) -> usize {
    content[..offset].matches('\n').count() + 1
}
