//! Frontmatter splitting and metadata extraction.
//!
//! A content file may start with a YAML block fenced by `---` lines:
//!
//! ```text
//! ---
//! title: Getting Started
//! description: First steps
//! ---
//! # Body starts here
//! ```
//!
//! Only `title` and `description` are recognized; other keys are ignored.
//! A malformed block never fails the build: the file is treated as having no
//! metadata and a warning is logged.

use serde_yaml::Value;
use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::Path;

/// Recognized frontmatter fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frontmatter {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// A content file split into metadata and markdown body.
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub frontmatter: Frontmatter,
    pub body: String,
}

/// Split raw file content into the YAML block (if any) and the body.
///
/// The opening fence must be the first line (a leading BOM is tolerated).
/// Without a closing fence the whole input is body.
pub fn split(content: &str) -> (Option<&str>, &str) {
    let content = content.trim_start_matches('\u{feff}');
    let Some(rest) = strip_fence_line(content) else {
        return (None, content);
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return (Some(yaml), body);
        }
        offset += line.len();
    }
    (None, content)
}

/// Returns the input after an opening `---` line, or `None` if it doesn't start with one.
fn strip_fence_line(content: &str) -> Option<&str> {
    let (first, rest) = match content.split_once('\n') {
        Some((first, rest)) => (first, rest),
        None => (content, ""),
    };
    (first.trim_end() == "---").then_some(rest)
}

/// Parse content into a [`Document`], degrading malformed YAML to empty metadata.
///
/// `origin` is only used to identify the file in the warning.
pub fn parse(content: &str, origin: &Path) -> Document {
    let (yaml, body) = split(content);
    let frontmatter = match yaml.map(parse_fields) {
        Some(Ok(fm)) => fm,
        Some(Err(e)) => {
            tracing::warn!(path = %origin.display(), error = %e, "Ignoring malformed frontmatter");
            Frontmatter::default()
        }
        None => Frontmatter::default(),
    };
    Document {
        frontmatter,
        body: body.to_string(),
    }
}

/// Read and parse a content file.
///
/// Invalid UTF-8 is replaced with U+FFFD and logged; only I/O failures are errors.
pub fn read_document(path: &Path) -> io::Result<Document> {
    let bytes = fs::read(path)?;
    let content = String::from_utf8_lossy(&bytes);
    if let Cow::Owned(_) = content {
        tracing::warn!(path = %path.display(), "File is not valid UTF-8, decoding lossily");
    }
    Ok(parse(&content, path))
}

fn parse_fields(yaml: &str) -> Result<Frontmatter, serde_yaml::Error> {
    if yaml.trim().is_empty() {
        return Ok(Frontmatter::default());
    }
    let value: Value = serde_yaml::from_str(yaml)?;
    let Value::Mapping(map) = value else {
        return Ok(Frontmatter::default());
    };
    let field = |key: &str| map.get(key).and_then(scalar_to_string);
    Ok(Frontmatter {
        title: field("title"),
        description: field("description"),
    })
}

/// Stringify a scalar YAML value. Blank strings, null and collections yield `None`.
fn scalar_to_string(value: &Value) -> Option<String> {
    let s = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    (!s.is_empty()).then_some(s)
}
