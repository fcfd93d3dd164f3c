use crate::error::CompileError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[allow(clippy::expect_used)]
static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier regex is valid"));

/// One piece of a path segment: literal text or a `{name}` placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Piece {
    Literal(String),
    Param(String),
}

/// Text between two `/` separators, e.g. `file-{id}.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub pieces: Vec<Piece>,
}

impl Segment {
    /// Placeholder names in this segment, in order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.pieces.iter().filter_map(|p| match p {
            Piece::Param(name) => Some(name.as_str()),
            Piece::Literal(_) => None,
        })
    }

    #[must_use]
    pub fn contains_param(&self, name: &str) -> bool {
        self.param_names().any(|n| n == name)
    }

    /// Literal text with every placeholder token removed.
    #[must_use]
    pub fn literal_text(&self) -> String {
        self.pieces
            .iter()
            .filter_map(|p| match p {
                Piece::Literal(text) => Some(text.as_str()),
                Piece::Param(_) => None,
            })
            .collect()
    }

    /// The segment as written in the pattern.
    #[must_use]
    pub fn raw(&self) -> String {
        let mut out = String::new();
        for piece in &self.pieces {
            match piece {
                Piece::Literal(text) => out.push_str(text),
                Piece::Param(name) => {
                    out.push('{');
                    out.push_str(name);
                    out.push('}');
                }
            }
        }
        out
    }
}

/// Segment template of a path pattern. Joining the raw segments with `/`
/// reproduces the pattern exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompiledPath {
    pub segments: Vec<Segment>,
    /// Placeholder names in pattern order
    pub param_names: Vec<String>,
}

impl CompiledPath {
    #[must_use]
    pub fn is_dynamic(&self) -> bool {
        !self.param_names.is_empty()
    }

    /// Rebuild the original pattern.
    #[must_use]
    pub fn reconstruct(&self) -> String {
        self.segments
            .iter()
            .map(Segment::raw)
            .collect::<Vec<_>>()
            .join("/")
    }

    /// The segment holding placeholder `name`, if any.
    #[must_use]
    pub fn segment_containing(&self, name: &str) -> Option<&Segment> {
        self.segments.iter().find(|s| s.contains_param(name))
    }

    /// Anchored regex source for the whole path: literals escaped, each
    /// placeholder a named capture group around its constraint.
    ///
    /// `/files/{id}.json` with `id = \d+` becomes `^/files/(?P<id>\d+)\.json$`.
    pub fn regex_source<'a, F>(&self, constraint_for: F) -> String
    where
        F: Fn(&str) -> &'a str,
    {
        let mut pattern = String::with_capacity(self.reconstruct().len() * 2 + 2);
        pattern.push('^');
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                pattern.push('/');
            }
            for piece in &segment.pieces {
                match piece {
                    Piece::Literal(text) => pattern.push_str(&regex::escape(text)),
                    Piece::Param(name) => {
                        pattern.push_str("(?P<");
                        pattern.push_str(name);
                        pattern.push('>');
                        pattern.push_str(constraint_for(name));
                        pattern.push(')');
                    }
                }
            }
        }
        pattern.push('$');
        pattern
    }
}

fn malformed(path: &str, position: usize, reason: &str) -> CompileError {
    CompileError::MalformedPattern {
        path: path.to_string(),
        position,
        reason: reason.to_string(),
    }
}

/// Compile a raw path pattern into its segment template.
///
/// The path is split on `/` keeping the empty leading segment, so `/users/{id}`
/// becomes `["", "users", "{id}"]`. Each segment is scanned for `{identifier}`
/// tokens; surrounding literal text stays with the segment.
///
/// # Errors
///
/// - [`CompileError::MalformedPattern`] for a path not starting with `/`, an
///   unclosed `{`, a stray `}`, a `{` inside a placeholder, or an empty or
///   non-identifier placeholder name
/// - [`CompileError::DuplicateParameterName`] when a name appears twice
pub fn compile(path: &str) -> Result<CompiledPath, CompileError> {
    if !path.starts_with('/') {
        return Err(malformed(path, 0, "path must start with '/'"));
    }

    let mut segments = Vec::with_capacity(path.matches('/').count() + 1);
    let mut param_names: Vec<String> = Vec::with_capacity(path.matches('{').count());
    let mut seen = HashSet::new();
    let mut offset = 0;

    for raw in path.split('/') {
        let segment = compile_segment(path, raw, offset)?;
        for name in segment.param_names() {
            if !seen.insert(name.to_string()) {
                return Err(CompileError::DuplicateParameterName {
                    path: path.to_string(),
                    name: name.to_string(),
                });
            }
            param_names.push(name.to_string());
        }
        segments.push(segment);
        offset += raw.len() + 1;
    }

    Ok(CompiledPath {
        segments,
        param_names,
    })
}

fn compile_segment(path: &str, raw: &str, offset: usize) -> Result<Segment, CompileError> {
    let mut pieces = Vec::new();
    let mut literal = String::new();
    let mut chars = raw.char_indices();

    while let Some((i, c)) = chars.next() {
        match c {
            '{' => {
                let open = offset + i;
                let mut name = String::new();
                let mut closed = false;
                for (j, c) in chars.by_ref() {
                    match c {
                        '}' => {
                            closed = true;
                            break;
                        }
                        '{' => {
                            return Err(malformed(path, offset + j, "nested '{' in placeholder"))
                        }
                        _ => name.push(c),
                    }
                }
                if !closed {
                    return Err(malformed(path, open, "unclosed '{'"));
                }
                if name.is_empty() {
                    return Err(malformed(path, open, "empty placeholder '{}'"));
                }
                if !IDENTIFIER.is_match(&name) {
                    return Err(malformed(
                        path,
                        open + 1,
                        &format!("'{}' is not a valid placeholder name", name),
                    ));
                }
                if !literal.is_empty() {
                    pieces.push(Piece::Literal(std::mem::take(&mut literal)));
                }
                pieces.push(Piece::Param(name));
            }
            '}' => return Err(malformed(path, offset + i, "unmatched '}'")),
            _ => literal.push(c),
        }
    }

    if !literal.is_empty() {
        pieces.push(Piece::Literal(literal));
    }
    Ok(Segment { pieces })
}
