//! Field paths inside an event payload (`localCondicao.cep`, `agenteRisco[0].codigo`)

use serde_json::{Map, Value};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// Location of a value in a payload. The first segment is always a key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldPath(Vec<PathSegment>);

impl FieldPath {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Path to a top-level field
    pub fn field(name: &str) -> Self {
        Self(vec![PathSegment::Key(name.to_string())])
    }

    pub fn key(&self, name: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Key(name.to_string()));
        Self(segments)
    }

    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Index(index));
        Self(segments)
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn depth(&self) -> usize {
        self.0
            .iter()
            .filter(|s| matches!(s, PathSegment::Key(_)))
            .count()
    }

    /// True when `self` equals `prefix` or lies underneath it
    pub fn starts_with(&self, prefix: &FieldPath) -> bool {
        self.0.starts_with(&prefix.0)
    }

    /// Proper prefixes of this path, shortest first
    pub fn ancestors(&self) -> impl Iterator<Item = FieldPath> + '_ {
        (1..self.0.len()).map(|n| Self(self.0[..n].to_vec()))
    }

    /// Innermost list holding this path (`a[0].b` → `a`)
    pub fn enclosing_list(&self) -> Option<FieldPath> {
        let pos = self
            .0
            .iter()
            .rposition(|s| matches!(s, PathSegment::Index(_)))?;
        Some(Self(self.0[..pos].to_vec()))
    }

    /// Parse the display form back into a path
    pub fn parse(raw: &str) -> Option<Self> {
        let mut segments = Vec::new();
        for part in raw.split('.') {
            let (name, mut rest) = match part.find('[') {
                Some(pos) => (&part[..pos], &part[pos..]),
                None => (part, ""),
            };
            if name.is_empty() {
                return None;
            }
            segments.push(PathSegment::Key(name.to_string()));
            while !rest.is_empty() {
                let close = rest.find(']')?;
                let index = rest.get(1..close)?.parse::<usize>().ok()?;
                segments.push(PathSegment::Index(index));
                rest = &rest[close + 1..];
                if !rest.is_empty() && !rest.starts_with('[') {
                    return None;
                }
            }
        }
        Some(Self(segments))
    }

    /// Read the value at this path
    pub fn lookup<'a>(&self, root: &'a Map<String, Value>) -> Option<&'a Value> {
        let (first, rest) = self.0.split_first()?;
        let PathSegment::Key(name) = first else {
            return None;
        };
        let mut current = root.get(name)?;
        for segment in rest {
            current = match segment {
                PathSegment::Key(name) => current.as_object()?.get(name)?,
                PathSegment::Index(index) => current.as_array()?.get(*index)?,
            };
        }
        Some(current)
    }

    /// Mutable slot at this path, creating intermediate objects for keys.
    /// Array indices must already exist.
    pub fn entry<'a>(&self, root: &'a mut Map<String, Value>) -> Option<&'a mut Value> {
        let (first, rest) = self.0.split_first()?;
        let PathSegment::Key(name) = first else {
            return None;
        };
        let mut current = root.entry(name.clone()).or_insert(Value::Null);
        for segment in rest {
            current = match segment {
                PathSegment::Key(name) => {
                    if !current.is_object() {
                        *current = Value::Object(Map::new());
                    }
                    current
                        .as_object_mut()?
                        .entry(name.clone())
                        .or_insert(Value::Null)
                }
                PathSegment::Index(index) => current.as_array_mut()?.get_mut(*index)?,
            };
        }
        Some(current)
    }

    /// Overwrite the value at this path. Returns false when the path cannot exist.
    pub fn set(&self, root: &mut Map<String, Value>, value: Value) -> bool {
        match self.entry(root) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Key(name) if idx == 0 => write!(f, "{name}")?,
                PathSegment::Key(name) => write!(f, ".{name}")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}
