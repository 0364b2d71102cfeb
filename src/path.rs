//! Locations inside a nested input value.
//!
//! Every [`SchemaError`](crate::SchemaError) carries a [`JsonPath`] naming the
//! key or index where it was raised. Structural schemas extend the path one
//! [`PathSegment`] at a time as they descend.

use std::fmt::{self, Display};

/// One step into a composite value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// An object or record key.
    Field(String),
    /// An array or tuple position.
    Index(usize),
}

impl PathSegment {
    pub fn field(name: impl Into<String>) -> Self {
        PathSegment::Field(name.into())
    }

    pub fn index(idx: usize) -> Self {
        PathSegment::Index(idx)
    }
}

/// Renders the bare key or the decimal index, without brackets.
impl Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Field(name) => f.write_str(name),
            PathSegment::Index(idx) => write!(f, "{}", idx),
        }
    }
}

/// An immutable sequence of segments from the root of the input.
///
/// Appending returns a new path, so sibling children can share a parent
/// path without cloning it up front. `Display` renders `rocket.cores[2].status`;
/// [`to_strings`](JsonPath::to_strings) gives the flat form
/// `["rocket", "cores", "2", "status"]`.
///
/// # Example
///
/// ```rust
/// use gatekeep::JsonPath;
///
/// let path = JsonPath::root()
///     .push_field("rocket")
///     .push_field("cores")
///     .push_index(2)
///     .push_field("status");
///
/// assert_eq!(path.to_string(), "rocket.cores[2].status");
/// assert_eq!(path.to_strings(), vec!["rocket", "cores", "2", "status"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct JsonPath {
    segments: Vec<PathSegment>,
}

impl JsonPath {
    /// The empty path; errors here render as `(root)`.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn from_field(name: impl Into<String>) -> Self {
        Self::root().appended(PathSegment::field(name))
    }

    pub fn from_index(idx: usize) -> Self {
        Self::root().appended(PathSegment::Index(idx))
    }

    /// Returns this path extended by a key.
    pub fn push_field(&self, name: impl Into<String>) -> Self {
        self.appended(PathSegment::field(name))
    }

    /// Returns this path extended by a position.
    pub fn push_index(&self, index: usize) -> Self {
        self.appended(PathSegment::Index(index))
    }

    /// Returns this path followed by every segment of `other`.
    ///
    /// Used to move errors reported relative to a child onto the child's
    /// absolute location.
    pub fn join(&self, other: &JsonPath) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + other.segments.len());
        segments.extend_from_slice(&self.segments);
        segments.extend_from_slice(&other.segments);
        Self { segments }
    }

    fn appended(&self, segment: PathSegment) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend_from_slice(&self.segments);
        segments.push(segment);
        Self { segments }
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.is_root()
    }

    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }

    /// Every segment as a string, indices in decimal.
    pub fn to_strings(&self) -> Vec<String> {
        self.segments.iter().map(ToString::to_string).collect()
    }

    /// The path one level up, or `None` at the root.
    pub fn parent(&self) -> Option<Self> {
        let (_, init) = self.segments.split_last()?;
        Some(Self {
            segments: init.to_vec(),
        })
    }

    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }
}

impl Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for segment in &self.segments {
            match segment {
                PathSegment::Field(name) if first => f.write_str(name)?,
                PathSegment::Field(name) => write!(f, ".{}", name)?,
                PathSegment::Index(idx) => write!(f, "[{}]", idx)?,
            }
            first = false;
        }
        Ok(())
    }
}
