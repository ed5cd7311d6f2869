//! Path patterns: ordered literal, parameter and catch-all segments.
//!
//! Malformed patterns are rejected at parse time so navigation never has to
//! deal with them.

use crate::error::{self, Result};
use snafu::ensure;
use std::collections::HashMap;

/// Parameters extracted from a matched path, keyed by segment name.
pub type Params = HashMap<String, String>;

/// One segment of a path pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    /// A named parameter such as `:slug`; binds one path segment.
    Param(String),
    /// Matches the remainder of the path, including an empty remainder.
    CatchAll,
}

/// A parsed path pattern such as `/restaurant/:slug` or the catch-all `/*`.
#[derive(Debug, Clone)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Parse `raw` into segments.
    ///
    /// Fails fast on a parameter segment with no name (`/:`), a catch-all
    /// that is not the final segment, or a missing leading `/`.
    pub fn parse(raw: &str) -> Result<Self> {
        ensure!(
            raw.starts_with('/'),
            error::BadPatternStartSnafu { pattern: raw }
        );

        let mut segments = Vec::new();
        for part in raw.split('/').filter(|p| !p.is_empty()) {
            ensure!(
                !matches!(segments.last(), Some(Segment::CatchAll)),
                error::CatchAllNotLastSnafu { pattern: raw }
            );
            let segment = if part == "*" {
                Segment::CatchAll
            } else if let Some(name) = part.strip_prefix(':') {
                ensure!(!name.is_empty(), error::UnnamedParamSnafu { pattern: raw });
                Segment::Param(name.to_string())
            } else {
                Segment::Literal(part.to_string())
            };
            segments.push(segment);
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    /// The pattern as written.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Whether this pattern ends in a catch-all segment.
    pub fn is_catch_all(&self) -> bool {
        matches!(self.segments.last(), Some(Segment::CatchAll))
    }

    /// Whether every segment is a literal.
    pub fn is_literal(&self) -> bool {
        self.segments
            .iter()
            .all(|s| matches!(s, Segment::Literal(_)))
    }

    /// Match `path` against this pattern, binding named parameters.
    ///
    /// Linear in the number of path segments; empty segments (double or
    /// trailing slashes) are ignored.
    pub fn matches(&self, path: &str) -> Option<Params> {
        let mut params = Params::new();
        let mut parts = path.split('/').filter(|p| !p.is_empty());

        for segment in &self.segments {
            match segment {
                Segment::CatchAll => return Some(params),
                Segment::Literal(lit) => {
                    if parts.next()? != lit {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    let value = parts.next()?;
                    params.insert(name.clone(), value.to_string());
                }
            }
        }

        // the whole path must be consumed
        if parts.next().is_some() {
            return None;
        }
        Some(params)
    }
}
