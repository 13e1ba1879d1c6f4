//! Loader for pattern files.
//!
//! A pattern file holds any number of `name = pattern` definitions and
//! exactly one root pattern:
//!
//! ```text
//! # consonants
//! N = m/n
//! C = p/t/k/N     # N is visible: defined above
//! V = a/i/u
//! (C)V
//! ```
//!
//! Blank lines and lines starting with `#` are ignored. A definition only
//! sees names defined on earlier lines; later ones stay literal text.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use tracing::debug;

use crate::error::FileError;
use crate::model::Pattern;

/// Read and load the pattern file at `path`.
pub fn load_file(path: &std::path::Path) -> Result<Pattern> {
    let contents =
        std::fs::read_to_string(path).with_context(|| format!("Reading {}", path.display()))?;
    load(&contents).with_context(|| format!("Loading patterns from {}", path.display()))
}

/// Split `input` into its root pattern and the definitions visible to it.
pub fn load(input: &str) -> Result<Pattern, FileError> {
    let mut refs = BTreeMap::<char, Pattern>::new();
    let mut roots = Vec::<&str>::new();

    for line in input.split('\n') {
        let stripped = line.trim();
        if stripped.is_empty() || stripped.starts_with('#') {
            continue;
        }

        match split_definition(stripped) {
            Some((name, source)) => {
                let name = single_char(name)?;
                let visible = visible_refs(source, &refs);
                debug!(%name, source, visible = visible.len(), "definition");
                refs.insert(name, Pattern::with_refs(source, visible));
            }
            None => roots.push(strip_comment(line)),
        }
    }

    let root = match roots.as_slice() {
        [] => return Err(FileError::MissingRoot),
        [root] => *root,
        _ => return Err(FileError::MultipleRoots),
    };

    let visible = visible_refs(root, &refs);
    Ok(Pattern::with_refs(root, visible))
}

/// `name = pattern [# comment]` -> (name, pattern), both trimmed.
///
/// The name runs up to the first `=` after at least one character; the
/// pattern up to the first `#` and must not be empty before trimming.
fn split_definition(line: &str) -> Option<(&str, &str)> {
    let first_len = line.chars().next()?.len_utf8();
    let eq = first_len + line[first_len..].find('=')?;
    let value = line[eq + 1..].split('#').next()?;
    if value.is_empty() {
        return None;
    }
    Some((line[..eq].trim(), value.trim()))
}

fn single_char(name: &str) -> Result<char, FileError> {
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(FileError::InvalidReferenceName(name.to_string())),
    }
}

/// Definitions whose name occurs anywhere in `source`.
fn visible_refs(source: &str, refs: &BTreeMap<char, Pattern>) -> BTreeMap<char, Pattern> {
    refs.iter()
        .filter(|(name, _)| source.contains(**name))
        .map(|(name, pattern)| (*name, pattern.clone()))
        .collect()
}

/// Drop a trailing `# comment` (at least one character after `#`) together
/// with the whitespace before it. Everything else is pattern text.
fn strip_comment(line: &str) -> &str {
    let line = line.strip_suffix('\r').unwrap_or(line);
    match line
        .char_indices()
        .find(|&(i, c)| c == '#' && i + 1 < line.len())
    {
        Some((cut, _)) => line[..cut].trim_end(),
        None => line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn refs(entries: Vec<(char, Pattern)>) -> BTreeMap<char, Pattern> {
        entries.into_iter().collect()
    }

    #[test]
    fn test_missing_root() {
        let test_cases = vec!["", "# comment comment\n#\n\n# bread\n       # wow\n\n"];
        for input in test_cases {
            let err = load(input).unwrap_err();
            assert_eq!(err, FileError::MissingRoot);
            assert_eq!(err.to_string(), "missing root pattern");
        }
    }

    #[test]
    fn test_root_only() {
        assert_eq!(load("abc").unwrap(), Pattern::new("abc"));
        assert_eq!(load("abc  # trailing\n").unwrap(), Pattern::new("abc"));
    }

    #[test]
    fn test_root_keeps_surrounding_whitespace() {
        let test_cases = vec![
            ("  a b  ", "  a b  "),
            ("  a b  \r\n", "  a b  "),
            ("\ta b # comment", "\ta b"),
            ("ab#", "ab#"),
        ];

        for (input, expected) in test_cases {
            assert_eq!(load(input).unwrap().source, expected, "{input:?}");
        }
    }

    #[test]
    fn test_more_than_one_root() {
        let err = load("hello\nworld").unwrap_err();
        assert_eq!(err, FileError::MultipleRoots);
        assert_eq!(err.to_string(), "more than one root pattern");
    }

    #[test]
    fn test_definitions() {
        let result = load("C = p/t/k\nC\n").unwrap();
        assert_eq!(
            result,
            Pattern::with_refs("C", refs(vec![('C', Pattern::new("p/t/k"))]))
        );
    }

    #[test]
    fn test_definition_comment_is_dropped() {
        let result = load("V=a/i/u # vowels\nV").unwrap();
        assert_eq!(result.refs[&'V'], Pattern::new("a/i/u"));
    }

    #[test]
    fn test_nested_references() {
        let result = load("N = m/n\nC = p/t/k/N\nC\n").unwrap();
        let expected = Pattern::with_refs(
            "C",
            refs(vec![(
                'C',
                Pattern::with_refs("p/t/k/N", refs(vec![('N', Pattern::new("m/n"))])),
            )]),
        );
        assert_eq!(result, expected);
    }

    #[test]
    fn test_forward_references_are_ignored() {
        let result = load("C = p/t/k/N\nN = m/n\nC\n").unwrap();
        assert_eq!(
            result,
            Pattern::with_refs("C", refs(vec![('C', Pattern::new("p/t/k/N"))]))
        );
    }

    #[test]
    fn test_unused_definitions_are_not_visible() {
        let result = load("X = x\nV = a/e\nV").unwrap();
        assert_eq!(result.refs.len(), 1);
        assert!(result.refs.contains_key(&'V'));
    }

    #[test]
    fn test_multi_char_names_are_rejected() {
        let err = load("CV = ka\nCV").unwrap_err();
        assert_eq!(err, FileError::InvalidReferenceName("CV".into()));
    }

    #[test]
    fn test_split_definition() {
        let test_cases = vec![
            ("C = p/t/k", Some(("C", "p/t/k"))),
            ("C=p # comment", Some(("C", "p"))),
            ("Δ = a", Some(("Δ", "a"))),
            ("=abc", None),
            ("a=", None),
            ("a=#x", None),
            ("abc", None),
        ];

        for (line, expected) in test_cases {
            assert_eq!(split_definition(line), expected, "{line}");
        }
    }
}
