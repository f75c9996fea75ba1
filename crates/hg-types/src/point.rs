//! Concrete, possibly nested, assignments of values to dimensions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::errors::HgResult;
use crate::value::Value;

/// What a point holds under one key: a primitive for a dimension, or a
/// nested point for a joined subgrid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Coordinate {
    Value(Value),
    Point(Point),
}

impl Coordinate {
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(v) => Some(v),
            Self::Point(_) => None,
        }
    }

    pub fn as_point(&self) -> Option<&Point> {
        match self {
            Self::Value(_) => None,
            Self::Point(p) => Some(p),
        }
    }
}

impl From<Value> for Coordinate {
    fn from(v: Value) -> Self {
        Self::Value(v)
    }
}

macro_rules! coordinate_from_primitive {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Coordinate {
                fn from(v: $ty) -> Self {
                    Self::Value(Value::from(v))
                }
            }
        )*
    };
}

coordinate_from_primitive!(bool, i64, i32, f64, &str, String);

impl From<Point> for Coordinate {
    fn from(p: Point) -> Self {
        Self::Point(p)
    }
}

/// An immutable mapping from dimension or subgrid name to coordinate.
///
/// Equality is structural and ignores insertion order. A point keeps no
/// reference to the grid that produced or validated it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Point {
    coordinates: BTreeMap<String, Coordinate>,
}

impl Point {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insertion used while assembling a point.
    pub fn with(mut self, name: impl Into<String>, coordinate: impl Into<Coordinate>) -> Self {
        self.coordinates.insert(name.into(), coordinate.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&Coordinate> {
        self.coordinates.get(name)
    }

    /// Primitive value stored under `name`, if any.
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.get(name).and_then(Coordinate::as_value)
    }

    /// Nested point stored under `name`, if any.
    pub fn nested(&self, name: &str) -> Option<&Point> {
        self.get(name).and_then(Coordinate::as_point)
    }

    /// Resolves a dotted path such as `emergency_buffer_config.use_colors`.
    pub fn get_path(&self, path: &str) -> Option<&Coordinate> {
        match path.split_once('.') {
            None => self.get(path),
            Some((head, rest)) => self.nested(head)?.get_path(rest),
        }
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.coordinates.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Coordinate)> {
        self.coordinates.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn to_json(&self) -> HgResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> HgResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl<K: Into<String>, C: Into<Coordinate>> FromIterator<(K, C)> for Point {
    fn from_iter<I: IntoIterator<Item = (K, C)>>(iter: I) -> Self {
        Self {
            coordinates: iter
                .into_iter()
                .map(|(k, c)| (k.into(), c.into()))
                .collect(),
        }
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match serde_json::to_string(self) {
            Ok(json) => f.write_str(&json),
            Err(_) => Err(std::fmt::Error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffered_config() -> Point {
        Point::new()
            .with("num_readers", 1)
            .with("use_emergency_buffer", true)
            .with(
                "emergency_buffer_config",
                Point::new()
                    .with("log2_emergency_buffer_size", 2)
                    .with("use_colors", true)
                    .with(
                        "emergency_buffer_color",
                        Point::new().with("color", "Crimson"),
                    ),
            )
    }

    #[test]
    fn equality_is_structural_and_order_free() {
        let a = Point::new().with("x", 1).with("y", "a");
        let b = Point::new().with("y", "a").with("x", 1);
        assert_eq!(a, b);

        let c = Point::new().with("x", 1).with("y", "b");
        assert_ne!(a, c);
    }

    #[test]
    fn nested_points_compare_deeply() {
        let a = buffered_config();
        let b = buffered_config();
        assert_eq!(a, b);

        let c = Point::new()
            .with("num_readers", 1)
            .with("use_emergency_buffer", true)
            .with(
                "emergency_buffer_config",
                Point::new()
                    .with("log2_emergency_buffer_size", 2)
                    .with("use_colors", true)
                    .with(
                        "emergency_buffer_color",
                        Point::new().with("color", "Maroon"),
                    ),
            );
        assert_ne!(a, c);
    }

    #[test]
    fn path_lookup() {
        let point = buffered_config();
        assert_eq!(
            point
                .get_path("emergency_buffer_config.emergency_buffer_color.color")
                .and_then(Coordinate::as_value),
            Some(&Value::from("Crimson"))
        );
        assert!(point.get_path("emergency_buffer_config.missing").is_none());
        // A primitive cannot be descended into
        assert!(point.get_path("num_readers.x").is_none());
    }

    #[test]
    fn json_form_is_a_plain_object() {
        let point = buffered_config();
        let json = point.to_json().unwrap();
        let as_value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            as_value["emergency_buffer_config"]["emergency_buffer_color"]["color"],
            "Crimson"
        );
        assert_eq!(Point::from_json(&json).unwrap(), point);
    }

    #[test]
    fn from_iterator() {
        let point: Point = vec![("a", 1), ("b", 2)].into_iter().collect();
        assert_eq!(point.len(), 2);
        assert_eq!(point.value("b"), Some(&Value::Int(2)));
        assert!(point.nested("b").is_none());
    }
}
