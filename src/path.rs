use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// One step of a [`Path`]: a named key or a numeric index.
///
/// Numeric segments address dictionary keys by their decimal form, so
/// `PathSegment::Index(0)` and `PathSegment::Key("0")` reach the same entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    Index(u64),
    Key(String),
}

/// Ordered keys addressing one node of a dictionary
pub type Path = Vec<PathSegment>;

impl PathSegment {
    /// The dictionary key this segment looks up
    pub fn as_key(&self) -> Cow<'_, str> {
        match self {
            PathSegment::Key(key) => Cow::Borrowed(key),
            PathSegment::Index(index) => Cow::Owned(index.to_string()),
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => write!(f, "{}", key),
            PathSegment::Index(index) => write!(f, "{}", index),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        PathSegment::Key(key)
    }
}

impl From<&String> for PathSegment {
    fn from(key: &String) -> Self {
        PathSegment::Key(key.clone())
    }
}

impl From<u64> for PathSegment {
    fn from(index: u64) -> Self {
        PathSegment::Index(index)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index as u64)
    }
}

impl From<u32> for PathSegment {
    fn from(index: u32) -> Self {
        PathSegment::Index(u64::from(index))
    }
}

/// Render a path as dot-separated keys, e.g. `nested.deep.value`
pub fn display_path(path: &[PathSegment]) -> String {
    path.iter()
        .map(|segment| segment.as_key())
        .collect::<Vec<_>>()
        .join(".")
}

/// Build a path from anything that converts into segments
pub fn path_of<I, S>(segments: I) -> Path
where
    I: IntoIterator<Item = S>,
    S: Into<PathSegment>,
{
    segments.into_iter().map(Into::into).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_path() {
        let path = path_of(["nested", "deep", "value"]);
        assert_eq!(display_path(&path), "nested.deep.value");
        assert_eq!(display_path(&[]), "");
    }

    #[test]
    fn test_index_segment_key() {
        assert_eq!(PathSegment::from(3usize).as_key(), "3");
        assert_eq!(PathSegment::from("name").as_key(), "name");
    }

    #[test]
    fn test_segments_serialize_as_json_scalars() {
        let path = vec![PathSegment::from("profile"), PathSegment::from(0usize)];
        let json = serde_json::to_string(&path).unwrap();
        assert_eq!(json, r#"["profile",0]"#);

        let back: Path = serde_json::from_str(&json).unwrap();
        assert_eq!(back, path);
    }
}
