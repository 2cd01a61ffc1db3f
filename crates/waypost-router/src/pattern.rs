//! Route pattern compiler
//!
//! A pattern is written `METHOD [HOST]/PATH`:
//! - `GET /users/{id}` - any host, one named parameter
//! - `GET api.example.com/users/{id}` - host-specific
//! - `GET /files/{path...}` - catch-all, binds the rest of the path
//! - `GET /static/` - trailing slash, anonymous catch-all
//! - `GET /static/{$}` - trailing slash, exact match only

use crate::error::PatternError;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// One `/`-delimited token of a compiled path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Matched byte-for-byte. The empty literal is the `{$}` end anchor.
    Literal(String),
    /// `{name}`, binds exactly one non-empty segment
    Wildcard(String),
    /// `{name...}`, binds every remaining segment. Always last.
    /// An empty name comes from a trailing slash.
    CatchAll(String),
}

impl Segment {
    /// Parameter name, if this segment binds one
    pub fn name(&self) -> Option<&str> {
        match self {
            Segment::Literal(_) => None,
            Segment::Wildcard(name) | Segment::CatchAll(name) => Some(name),
        }
    }

    pub fn is_wild(&self) -> bool {
        !matches!(self, Segment::Literal(_))
    }

    pub fn is_multi(&self) -> bool {
        matches!(self, Segment::CatchAll(_))
    }
}

/// A compiled, immutable route spec.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pattern {
    method: String,
    host: String,
    segments: Vec<Segment>,
}

impl Pattern {
    /// Compile a route spec
    ///
    /// # Example
    /// ```
    /// use waypost_router::{Pattern, Segment};
    ///
    /// let p = Pattern::parse("GET api.example.com/users/{id}").unwrap();
    /// assert_eq!(p.method(), "GET");
    /// assert_eq!(p.host(), "api.example.com");
    /// assert_eq!(
    ///     p.segments(),
    ///     &[Segment::Literal("users".into()), Segment::Wildcard("id".into())]
    /// );
    /// ```
    pub fn parse(spec: &str) -> Result<Self, PatternError> {
        let mut fields = spec.split_whitespace();
        let method = fields.next().ok_or(PatternError::Empty)?;
        let rest = fields.next().ok_or(PatternError::MissingPath)?;
        if let Some(extra) = fields.next() {
            return Err(PatternError::TrailingField(extra.to_string()));
        }

        if !method.bytes().all(is_tchar) {
            return Err(PatternError::InvalidMethod(method.to_string()));
        }

        let slash = rest.find('/').ok_or(PatternError::MissingPath)?;
        let (host, path) = rest.split_at(slash);
        if host.contains('{') || host.contains('}') {
            return Err(PatternError::WildcardInHost(host.to_string()));
        }

        Ok(Self {
            method: method.to_string(),
            host: host.to_string(),
            segments: parse_path(path)?,
        })
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    /// Empty when the pattern applies to any host
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Parameter names in path order
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(Segment::name)
    }
}

impl FromStr for Pattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.host)?;
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) if text.is_empty() => f.write_str("/{$}")?,
                Segment::Literal(text) => write!(f, "/{text}")?,
                Segment::Wildcard(name) => write!(f, "/{{{name}}}")?,
                Segment::CatchAll(name) if name.is_empty() => f.write_str("/")?,
                Segment::CatchAll(name) => write!(f, "/{{{name}...}}")?,
            }
        }
        Ok(())
    }
}

/// `path` always starts with `/` here.
fn parse_path(path: &str) -> Result<Vec<Segment>, PatternError> {
    let raw: Vec<&str> = path[1..].split('/').collect();
    let last = raw.len() - 1;
    let mut names = HashSet::new();
    let mut segments = Vec::with_capacity(raw.len());

    for (i, token) in raw.into_iter().enumerate() {
        let segment = if token.is_empty() {
            if i != last {
                return Err(PatternError::EmptySegment);
            }
            Segment::CatchAll(String::new())
        } else if token == "{$}" {
            if i != last {
                return Err(PatternError::AnchorNotLast);
            }
            Segment::Literal(String::new())
        } else if let Some(inner) = token.strip_prefix('{') {
            let inner = inner
                .strip_suffix('}')
                .filter(|inner| !inner.contains(['{', '}']))
                .ok_or_else(|| PatternError::MalformedWildcard(token.to_string()))?;

            let (name, multi) = match inner.strip_suffix("...") {
                Some(name) => (name, true),
                None => (inner, false),
            };
            if !is_ident(name) {
                return Err(PatternError::InvalidName(name.to_string()));
            }
            if multi && i != last {
                return Err(PatternError::CatchAllNotLast(name.to_string()));
            }
            if !names.insert(name) {
                return Err(PatternError::DuplicateName(name.to_string()));
            }

            if multi {
                Segment::CatchAll(name.to_string())
            } else {
                Segment::Wildcard(name.to_string())
            }
        } else if token.contains(['{', '}']) {
            return Err(PatternError::MalformedWildcard(token.to_string()));
        } else {
            Segment::Literal(token.to_string())
        };
        segments.push(segment);
    }

    Ok(segments)
}

fn is_ident(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// RFC 9110 token character
fn is_tchar(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b)
}
