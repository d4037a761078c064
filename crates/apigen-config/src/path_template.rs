//! Resource name patterns such as `shelves/{shelf}/books/{book}`.
//!
//! Grammar:
//! ```text
//! Template = Segment { "/" Segment }
//! Segment  = LITERAL | "*" | "**" | "{" IDENT [ "=" Template ] "}"
//! ```
//! Bare wildcards are bound to positional variables `$0`, `$1`, ... so every
//! piece of a concrete path can be captured by name.

use indexmap::IndexMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathTemplateError {
    #[error("empty name pattern")]
    Empty,
    #[error("empty segment in '{0}'")]
    EmptySegment(String),
    #[error("unbalanced braces in '{0}'")]
    UnbalancedBraces(String),
    #[error("invalid variable name '{0}'")]
    InvalidVariable(String),
    #[error("duplicate variable '{0}'")]
    DuplicateVariable(String),
    #[error("nested variable binding in '{0}'")]
    NestedBinding(String),
    #[error("invalid literal segment '{0}'")]
    InvalidLiteral(String),
    #[error("more than one '**' wildcard in '{0}'")]
    MultiplePathWildcards(String),
    #[error("no value for variable '{0}'")]
    MissingValue(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    /// `*`: exactly one path segment.
    Wildcard,
    /// `**`: one or more path segments.
    PathWildcard,
}

/// One template piece: a literal, or a named capture over a sub-pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Literal(String),
    Binding {
        var: String,
        pattern: Vec<Segment>,
        /// Written as a bare `*`/`**` rather than `{var}`.
        positional: bool,
    },
}

/// A parsed, validated resource name pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    source: String,
    pieces: Vec<Piece>,
}

impl PathTemplate {
    pub fn parse(source: &str) -> Result<Self, PathTemplateError> {
        let trimmed = source.strip_prefix('/').unwrap_or(source);
        if trimmed.is_empty() {
            return Err(PathTemplateError::Empty);
        }

        let mut pieces = Vec::new();
        let mut positional = 0usize;
        for raw in split_top_level(trimmed, source)? {
            if raw.is_empty() {
                return Err(PathTemplateError::EmptySegment(source.to_string()));
            }
            if let Some(inner) = raw.strip_prefix('{') {
                let inner = inner
                    .strip_suffix('}')
                    .ok_or_else(|| PathTemplateError::UnbalancedBraces(source.to_string()))?;
                let (var, sub) = match inner.split_once('=') {
                    Some((var, sub)) => (var, Some(sub)),
                    None => (inner, None),
                };
                if !is_identifier(var) {
                    return Err(PathTemplateError::InvalidVariable(var.to_string()));
                }
                let pattern = match sub {
                    None => vec![Segment::Wildcard],
                    Some(sub) => parse_sub_pattern(sub, source)?,
                };
                pieces.push(Piece::Binding {
                    var: var.to_string(),
                    pattern,
                    positional: false,
                });
            } else {
                match parse_segment(raw, source)? {
                    Segment::Literal(lit) => pieces.push(Piece::Literal(lit)),
                    wildcard => {
                        pieces.push(Piece::Binding {
                            var: format!("${positional}"),
                            pattern: vec![wildcard],
                            positional: true,
                        });
                        positional += 1;
                    }
                }
            }
        }

        let template = Self {
            source: source.to_string(),
            pieces,
        };
        template.check_unique_vars()?;
        template.check_path_wildcards()?;
        Ok(template)
    }

    fn check_unique_vars(&self) -> Result<(), PathTemplateError> {
        let mut seen = Vec::new();
        for var in self.vars() {
            if seen.contains(&var) {
                return Err(PathTemplateError::DuplicateVariable(var.to_string()));
            }
            seen.push(var);
        }
        Ok(())
    }

    fn check_path_wildcards(&self) -> Result<(), PathTemplateError> {
        let count: usize = self
            .pieces
            .iter()
            .map(|p| match p {
                Piece::Binding { pattern, .. } => pattern
                    .iter()
                    .filter(|s| **s == Segment::PathWildcard)
                    .count(),
                Piece::Literal(_) => 0,
            })
            .sum();
        if count > 1 {
            return Err(PathTemplateError::MultiplePathWildcards(
                self.source.clone(),
            ));
        }
        Ok(())
    }

    /// The pattern as written.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Variable names in order of appearance, including positional `$n` names.
    pub fn vars(&self) -> impl Iterator<Item = &str> {
        self.pieces.iter().filter_map(|p| match p {
            Piece::Binding { var, .. } => Some(var.as_str()),
            Piece::Literal(_) => None,
        })
    }

    /// Named variables only (excludes positional wildcards).
    pub fn named_vars(&self) -> impl Iterator<Item = &str> {
        self.pieces.iter().filter_map(|p| match p {
            Piece::Binding {
                var,
                positional: false,
                ..
            } => Some(var.as_str()),
            _ => None,
        })
    }

    /// Substitute values for every variable.
    pub fn instantiate<K, V>(&self, values: &IndexMap<K, V>) -> Result<String, PathTemplateError>
    where
        K: std::borrow::Borrow<str> + std::hash::Hash + Eq,
        V: AsRef<str>,
    {
        let mut parts = Vec::with_capacity(self.pieces.len());
        for piece in &self.pieces {
            match piece {
                Piece::Literal(lit) => parts.push(lit.as_str()),
                Piece::Binding { var, .. } => {
                    let value = values
                        .get(var.as_str())
                        .ok_or_else(|| PathTemplateError::MissingValue(var.clone()))?;
                    parts.push(value.as_ref());
                }
            }
        }
        Ok(parts.join("/"))
    }

    /// Match a concrete resource name, capturing variable values.
    pub fn matches(&self, path: &str) -> Option<IndexMap<String, String>> {
        let path = path.strip_prefix('/').unwrap_or(path);
        let actual: Vec<&str> = path.split('/').collect();
        let mut expected: Vec<(Option<&str>, Segment)> = Vec::new();
        for piece in &self.pieces {
            match piece {
                Piece::Literal(lit) => expected.push((None, Segment::Literal(lit.clone()))),
                Piece::Binding { var, pattern, .. } => {
                    expected.extend(pattern.iter().map(|s| (Some(var.as_str()), s.clone())))
                }
            }
        }

        let mut captured: IndexMap<String, Vec<&str>> = IndexMap::new();
        if !match_segments(&expected, &actual, &mut captured) {
            return None;
        }
        Some(
            captured
                .into_iter()
                .map(|(var, parts)| (var, parts.join("/")))
                .collect(),
        )
    }
}

fn match_segments<'a>(
    expected: &[(Option<&str>, Segment)],
    actual: &[&'a str],
    captured: &mut IndexMap<String, Vec<&'a str>>,
) -> bool {
    let Some(((var, segment), rest)) = expected.split_first() else {
        return actual.is_empty();
    };
    let take = match segment {
        Segment::Literal(lit) => {
            if actual.first() != Some(&lit.as_str()) {
                return false;
            }
            1
        }
        Segment::Wildcard => {
            if actual.first().is_none_or(|s| s.is_empty()) {
                return false;
            }
            1
        }
        // Only one `**` exists, so the remaining pattern has a fixed width.
        Segment::PathWildcard => {
            if actual.len() < rest.len() + 1 {
                return false;
            }
            actual.len() - rest.len()
        }
    };
    if let Some(var) = var {
        captured
            .entry(var.to_string())
            .or_default()
            .extend_from_slice(&actual[..take]);
    }
    match_segments(rest, &actual[take..], captured)
}

/// Split on `/` outside of braces.
fn split_top_level<'a>(text: &'a str, source: &str) -> Result<Vec<&'a str>, PathTemplateError> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in text.char_indices() {
        match c {
            '{' => {
                if depth > 0 {
                    return Err(PathTemplateError::NestedBinding(source.to_string()));
                }
                depth += 1;
            }
            '}' => {
                if depth == 0 {
                    return Err(PathTemplateError::UnbalancedBraces(source.to_string()));
                }
                depth -= 1;
            }
            '/' if depth == 0 => {
                parts.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(PathTemplateError::UnbalancedBraces(source.to_string()));
    }
    parts.push(&text[start..]);
    Ok(parts)
}

fn parse_sub_pattern(sub: &str, source: &str) -> Result<Vec<Segment>, PathTemplateError> {
    if sub.is_empty() {
        return Err(PathTemplateError::EmptySegment(source.to_string()));
    }
    sub.split('/').map(|raw| parse_segment(raw, source)).collect()
}

fn parse_segment(raw: &str, source: &str) -> Result<Segment, PathTemplateError> {
    match raw {
        "" => Err(PathTemplateError::EmptySegment(source.to_string())),
        "*" => Ok(Segment::Wildcard),
        "**" => Ok(Segment::PathWildcard),
        lit if lit.contains(['{', '}', '*', '=']) => {
            Err(PathTemplateError::InvalidLiteral(lit.to_string()))
        }
        lit => Ok(Segment::Literal(lit.to_string())),
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl FromStr for PathTemplate {
    type Err = PathTemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
