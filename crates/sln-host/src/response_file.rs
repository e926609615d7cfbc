//! Compiler response-file parsing.
//!
//! Response files hold extra compiler switches, one or more per line:
//!
//! ```text
//! # comment
//! -define:FEATURE_A;FEATURE_B
//! -r:Plugins/Vendor.dll
//! -unsafe
//! ```
//!
//! Only the switches that affect generated projects are understood. Anything
//! else is reported back as an error so the host can surface it.

use sln_fs::{NormalizedPath, io};

use crate::unit::ResponseFileData;

/// Read and parse the response file at `path`.
///
/// A missing or unreadable file yields a single error entry.
pub fn resolve_response_file(
    path: &NormalizedPath,
    project_dir: &NormalizedPath,
    system_reference_dirs: &[NormalizedPath],
) -> ResponseFileData {
    match io::read_text(path) {
        Ok(content) => parse_response_file(&content, project_dir, system_reference_dirs),
        Err(e) => ResponseFileData {
            errors: vec![e.to_string()],
            ..ResponseFileData::default()
        },
    }
}

/// Parse response-file text.
///
/// Relative references resolve against `project_dir` first and then each of
/// `system_reference_dirs`; the first existing file wins.
pub fn parse_response_file(
    content: &str,
    project_dir: &NormalizedPath,
    system_reference_dirs: &[NormalizedPath],
) -> ResponseFileData {
    let mut data = ResponseFileData::default();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        for token in tokenize(line) {
            apply_token(&token, project_dir, system_reference_dirs, &mut data);
        }
    }

    data
}

fn apply_token(
    token: &str,
    project_dir: &NormalizedPath,
    system_reference_dirs: &[NormalizedPath],
    data: &mut ResponseFileData,
) {
    let Some(option) = token.strip_prefix('-').or_else(|| token.strip_prefix('/')) else {
        data.errors.push(format!("Unexpected argument '{}'", token));
        return;
    };

    let (name, value) = match option.split_once(':') {
        Some((name, value)) => (name, Some(value)),
        None => (option, None),
    };

    match (name.to_ascii_lowercase().as_str(), value) {
        ("define" | "d", Some(value)) => {
            data.defines.extend(split_list(value).map(str::to_string));
        }
        ("reference" | "r", Some(value)) => {
            for reference in split_list(value) {
                match resolve_reference(reference, project_dir, system_reference_dirs) {
                    Some(path) => data.full_path_references.push(path.as_str().to_string()),
                    None => data
                        .errors
                        .push(format!("Reference '{}' could not be found", reference)),
                }
            }
        }
        ("unsafe" | "unsafe+", None) => data.unsafe_code = true,
        ("unsafe-", None) => data.unsafe_code = false,
        _ => data.errors.push(format!("Unknown option '{}'", token)),
    }
}

fn split_list(value: &str) -> impl Iterator<Item = &str> {
    value
        .split([';', ','])
        .map(|item| item.trim().trim_matches('"'))
        .filter(|item| !item.is_empty())
}

fn resolve_reference(
    reference: &str,
    project_dir: &NormalizedPath,
    system_reference_dirs: &[NormalizedPath],
) -> Option<NormalizedPath> {
    let candidate = NormalizedPath::new(reference);
    if candidate.is_absolute() {
        return candidate.is_file().then_some(candidate);
    }

    std::iter::once(project_dir)
        .chain(system_reference_dirs)
        .map(|dir| dir.join(reference))
        .find(NormalizedPath::is_file)
}

/// Split a line on whitespace, keeping double-quoted runs together.
fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quoted = false;

    for c in line.chars() {
        match c {
            '"' => quoted = !quoted,
            c if c.is_whitespace() && !quoted => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}
