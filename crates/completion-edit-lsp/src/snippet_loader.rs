//! VSCode-style JSON snippet files.
//!
//! ```json
//! {
//!   "for loop": {
//!     "prefix": ["for", "fori"],
//!     "body": ["for ${1:i} in ${2:iter} {", "\t$0", "}"],
//!     "description": "for loop"
//!   }
//! }
//! ```
//!
//! The file stem names the filetype (`rust.json` → `rust`).

use completion_edit::SnippetGrammar;
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
/// Snippet file loading failures.
pub enum SnippetLoadError {
    #[error("failed to read snippet file {path}: {source}")]
    /// The file could not be read.
    Io {
        /// File being loaded.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    #[error("invalid snippet file {path}: {source}")]
    /// The file is not a valid snippet map.
    Json {
        /// File being loaded.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot derive a filetype from {0}")]
    /// The path has no usable file stem.
    NoFiletype(PathBuf),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

#[derive(Debug, Deserialize)]
struct SnippetUnit {
    prefix: OneOrMany,
    body: OneOrMany,
    #[serde(default)]
    description: String,
}

/// A snippet read from a snippet file, ready to be offered as a completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedSnippet {
    /// Template grammar of the body.
    pub grammar: SnippetGrammar,
    /// Filetype the snippet applies to.
    pub filetype: String,
    /// Snippet name (the JSON key).
    pub label: String,
    /// Template body.
    pub content: String,
    /// Human-readable description.
    pub doc: String,
    /// Trigger words.
    pub matches: BTreeSet<String>,
}

/// Parse the contents of a snippet file for `filetype`. Array bodies are joined with `linefeed`.
pub fn parse_snippets(
    filetype: &str,
    json: &str,
    linefeed: &str,
) -> Result<Vec<LoadedSnippet>, serde_json::Error> {
    let units: BTreeMap<String, SnippetUnit> = serde_json::from_str(json)?;

    Ok(units
        .into_iter()
        .map(|(label, unit)| LoadedSnippet {
            grammar: SnippetGrammar::Lsp,
            filetype: filetype.to_string(),
            label,
            content: match unit.body {
                OneOrMany::One(body) => body,
                OneOrMany::Many(lines) => lines.join(linefeed),
            },
            doc: unit.description,
            matches: match unit.prefix {
                OneOrMany::One(prefix) => BTreeSet::from([prefix]),
                OneOrMany::Many(prefixes) => prefixes.into_iter().collect(),
            },
        })
        .collect())
}

/// Load a snippet file; the filetype is the file stem.
pub fn load_snippet_file(
    path: &Path,
    linefeed: &str,
) -> Result<(String, Vec<LoadedSnippet>), SnippetLoadError> {
    let filetype = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::trim)
        .filter(|stem| !stem.is_empty())
        .ok_or_else(|| SnippetLoadError::NoFiletype(path.to_path_buf()))?
        .to_string();

    let json = std::fs::read_to_string(path).map_err(|source| SnippetLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let snippets =
        parse_snippets(&filetype, &json, linefeed).map_err(|source| SnippetLoadError::Json {
            path: path.to_path_buf(),
            source,
        })?;

    tracing::debug!(path = %path.display(), %filetype, count = snippets.len(), "loaded snippets");
    Ok((filetype, snippets))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const RUST: &str = r#"{
        "for loop": {
            "prefix": ["for", "fori"],
            "body": ["for ${1:i} in ${2:iter} {", "\t$0", "}"],
            "description": "for loop"
        },
        "print": { "prefix": "pr", "body": "println!(\"$1\");" }
    }"#;

    #[test]
    fn test_parse_both_prefix_and_body_shapes() {
        let snippets = parse_snippets("rust", RUST, "\n").unwrap();
        assert_eq!(snippets.len(), 2);

        let for_loop = &snippets[0];
        assert_eq!(for_loop.label, "for loop");
        assert_eq!(for_loop.content, "for ${1:i} in ${2:iter} {\n\t$0\n}");
        assert_eq!(
            for_loop.matches,
            BTreeSet::from(["for".to_string(), "fori".to_string()])
        );

        let print = &snippets[1];
        assert_eq!(print.content, "println!(\"$1\");");
        assert_eq!(print.doc, "");
        assert_eq!(print.filetype, "rust");
    }

    #[test]
    fn test_missing_body_is_an_error() {
        assert!(parse_snippets("rust", r#"{ "x": { "prefix": "x" } }"#, "\n").is_err());
    }

    #[test]
    fn test_load_derives_filetype_from_stem() {
        let dir = std::env::temp_dir().join(format!("completion-edit-lsp-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("python.json");
        std::fs::write(&path, r#"{ "main": { "prefix": "main", "body": "def main():" } }"#).unwrap();

        let (filetype, snippets) = load_snippet_file(&path, "\n").unwrap();
        assert_eq!(filetype, "python");
        assert_eq!(snippets[0].matches, BTreeSet::from(["main".to_string()]));

        std::fs::remove_dir_all(&dir).unwrap();
        assert!(matches!(
            load_snippet_file(&path, "\n"),
            Err(SnippetLoadError::Io { .. })
        ));
    }
}
