//! Field path resolution inside documents.

use crate::document::{Document, Value};

/// Resolves a (possibly nested) field path to a value within a document
pub trait FieldLocator {
    /// Find the value at `path`, or `None` if any part of the path is missing
    fn locate<'d>(&self, document: &'d Document, path: &str) -> Option<&'d Value>;
}

/// One step of a parsed field path
#[derive(Debug, Clone, PartialEq, Eq)]
enum PathSegment<'p> {
    Key(&'p str),
    Index(usize),
}

/// Default locator for `name(.name | [index])*` paths
///
/// The whole path is first tried as a top-level key, so field names that
/// themselves contain `.` or `[` stay addressable.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathLocator;

impl PathLocator {
    /// Split a path into key and index segments, `None` if malformed
    fn parse(path: &str) -> Option<Vec<PathSegment<'_>>> {
        let mut segments = Vec::new();
        let bytes = path.as_bytes();
        let mut pos = 0;
        let mut expect_key = true;

        while pos < bytes.len() {
            match bytes[pos] {
                b'[' if !expect_key => {
                    let close = path[pos..].find(']')? + pos;
                    let digits = &path[pos + 1..close];
                    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                        return None;
                    }
                    let index = digits.parse::<usize>().ok()?;
                    segments.push(PathSegment::Index(index));
                    pos = close + 1;
                    expect_key = false;
                }
                b'.' if !expect_key => {
                    pos += 1;
                    expect_key = true;
                }
                b'.' | b'[' | b']' => return None,
                _ if expect_key => {
                    let end = path[pos..]
                        .find(|c: char| c == '.' || c == '[')
                        .map(|i| i + pos)
                        .unwrap_or(path.len());
                    segments.push(PathSegment::Key(&path[pos..end]));
                    pos = end;
                    expect_key = false;
                }
                _ => return None,
            }
        }

        // A path must start with a key and may not end on a dangling '.'
        if expect_key || !matches!(segments.first(), Some(PathSegment::Key(_))) {
            return None;
        }
        Some(segments)
    }
}

impl FieldLocator for PathLocator {
    fn locate<'d>(&self, document: &'d Document, path: &str) -> Option<&'d Value> {
        if let Some(value) = document.get(path) {
            return Some(value);
        }

        let segments = match Self::parse(path) {
            Some(segments) => segments,
            None => {
                log::debug!("field path '{}' is malformed, treating as absent", path);
                return None;
            }
        };

        let mut segments = segments.into_iter();
        let mut current = match segments.next()? {
            PathSegment::Key(key) => document.get(key)?,
            PathSegment::Index(_) => return None,
        };

        for segment in segments {
            current = match (segment, current) {
                (PathSegment::Key(key), Value::Map(map)) => map.get(key)?,
                (PathSegment::Index(index), Value::List(list)) => list.get(index)?,
                _ => return None,
            };
        }
        Some(current)
    }
}
