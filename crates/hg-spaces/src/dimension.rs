//! Single named axes of variation and their domains.

use hg_types::{DimensionError, HgResult, Value};
use rand::Rng;
use std::cmp::Ordering;

/// Checks the naming rules shared by dimensions and grids.
pub(crate) fn check_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("name is empty".to_string());
    }
    if name.contains('.') {
        return Err("'.' is reserved as the path separator".to_string());
    }
    Ok(())
}

fn validated_name(name: impl Into<String>) -> Result<String, DimensionError> {
    let name = name.into();
    match check_name(&name) {
        Ok(()) => Ok(name),
        Err(reason) => Err(DimensionError::InvalidName { name, reason }),
    }
}

fn check_distinct(name: &str, values: &[Value]) -> Result<(), DimensionError> {
    if values.is_empty() {
        return Err(DimensionError::NoValues {
            name: name.to_string(),
        });
    }
    for (i, value) in values.iter().enumerate() {
        // NaN never equals itself and infinities have no JSON form
        if matches!(value, Value::Float(v) if !v.is_finite()) {
            return Err(DimensionError::NonFiniteValue {
                name: name.to_string(),
                value: value.to_string(),
            });
        }
        if values[..i].contains(value) {
            return Err(DimensionError::DuplicateValue {
                name: name.to_string(),
                value: value.to_string(),
            });
        }
    }
    Ok(())
}

/// Real interval `[min, max]`, inclusive at both ends.
#[derive(Debug, Clone, PartialEq)]
pub struct ContinuousDimension {
    name: String,
    min: f64,
    max: f64,
}

impl ContinuousDimension {
    pub fn new(name: impl Into<String>, min: f64, max: f64) -> HgResult<Self> {
        let name = validated_name(name)?;
        if !min.is_finite() || !max.is_finite() || !(max - min).is_finite() {
            return Err(DimensionError::NonFiniteBounds { name, min, max }.into());
        }
        if min > max {
            return Err(DimensionError::EmptyRange {
                name,
                min: min.to_string(),
                max: max.to_string(),
            }
            .into());
        }
        Ok(Self { name, min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Integers are accepted and compared as reals.
    pub fn contains(&self, value: &Value) -> bool {
        match value {
            Value::Int(_) | Value::Float(_) => value
                .as_f64()
                .map_or(false, |v| self.min <= v && v <= self.max),
            _ => false,
        }
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Value {
        Value::Float(rng.gen_range(self.min..=self.max))
    }
}

/// Integer interval `[min, max]`, inclusive at both ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscreteDimension {
    name: String,
    min: i64,
    max: i64,
}

impl DiscreteDimension {
    pub fn new(name: impl Into<String>, min: i64, max: i64) -> HgResult<Self> {
        let name = validated_name(name)?;
        if min > max {
            return Err(DimensionError::EmptyRange {
                name,
                min: min.to_string(),
                max: max.to_string(),
            }
            .into());
        }
        Ok(Self { name, min, max })
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    pub fn max(&self) -> i64 {
        self.max
    }

    pub fn contains(&self, value: &Value) -> bool {
        matches!(value, Value::Int(v) if self.min <= *v && *v <= self.max)
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Value {
        Value::Int(rng.gen_range(self.min..=self.max))
    }
}

/// Fixed, ordered sequence of values.
#[derive(Debug, Clone, PartialEq)]
pub struct OrdinalDimension {
    name: String,
    ordered_values: Vec<Value>,
}

impl OrdinalDimension {
    pub fn new(name: impl Into<String>, ordered_values: Vec<Value>) -> HgResult<Self> {
        let name = validated_name(name)?;
        check_distinct(&name, &ordered_values)?;
        Ok(Self {
            name,
            ordered_values,
        })
    }

    pub fn ordered_values(&self) -> &[Value] {
        &self.ordered_values
    }

    /// Rank of `value` within the declared order.
    pub fn position(&self, value: &Value) -> Option<usize> {
        self.ordered_values.iter().position(|v| v == value)
    }

    /// Orders two members of the domain; `None` if either is not a member.
    pub fn compare(&self, a: &Value, b: &Value) -> Option<Ordering> {
        Some(self.position(a)?.cmp(&self.position(b)?))
    }

    pub fn contains(&self, value: &Value) -> bool {
        self.ordered_values.contains(value)
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Value {
        let idx = rng.gen_range(0..self.ordered_values.len());
        self.ordered_values[idx].clone()
    }
}

/// Unordered set of allowed values, possibly of mixed primitive types.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoricalDimension {
    name: String,
    values: Vec<Value>,
}

impl CategoricalDimension {
    pub fn new(name: impl Into<String>, values: Vec<Value>) -> HgResult<Self> {
        let name = validated_name(name)?;
        check_distinct(&name, &values)?;
        Ok(Self { name, values })
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn contains(&self, value: &Value) -> bool {
        self.values.contains(value)
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Value {
        let idx = rng.gen_range(0..self.values.len());
        self.values[idx].clone()
    }
}

/// A single named axis of a hypergrid.
#[derive(Debug, Clone, PartialEq)]
pub enum Dimension {
    Continuous(ContinuousDimension),
    Discrete(DiscreteDimension),
    Ordinal(OrdinalDimension),
    Categorical(CategoricalDimension),
}

impl Dimension {
    pub fn continuous(name: impl Into<String>, min: f64, max: f64) -> HgResult<Self> {
        ContinuousDimension::new(name, min, max).map(Self::Continuous)
    }

    pub fn discrete(name: impl Into<String>, min: i64, max: i64) -> HgResult<Self> {
        DiscreteDimension::new(name, min, max).map(Self::Discrete)
    }

    pub fn ordinal<V: Into<Value>>(
        name: impl Into<String>,
        ordered_values: impl IntoIterator<Item = V>,
    ) -> HgResult<Self> {
        let values = ordered_values.into_iter().map(Into::into).collect();
        OrdinalDimension::new(name, values).map(Self::Ordinal)
    }

    pub fn categorical<V: Into<Value>>(
        name: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> HgResult<Self> {
        let values = values.into_iter().map(Into::into).collect();
        CategoricalDimension::new(name, values).map(Self::Categorical)
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Continuous(d) => &d.name,
            Self::Discrete(d) => &d.name,
            Self::Ordinal(d) => &d.name,
            Self::Categorical(d) => &d.name,
        }
    }

    /// Wire tag of the variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Continuous(_) => "continuous",
            Self::Discrete(_) => "discrete",
            Self::Ordinal(_) => "ordinal",
            Self::Categorical(_) => "categorical",
        }
    }

    pub fn contains(&self, value: &Value) -> bool {
        match self {
            Self::Continuous(d) => d.contains(value),
            Self::Discrete(d) => d.contains(value),
            Self::Ordinal(d) => d.contains(value),
            Self::Categorical(d) => d.contains(value),
        }
    }

    /// Whether `a` and `b` denote the same member of this domain.
    ///
    /// Continuous domains compare numerically, so `Int(1)` and `Float(1.0)`
    /// are one value; every other kind compares exactly.
    pub fn same_value(&self, a: &Value, b: &Value) -> bool {
        match (self, a.as_f64(), b.as_f64()) {
            (Self::Continuous(_), Some(x), Some(y)) => x == y,
            _ => a == b,
        }
    }

    /// Draws one value uniformly from the domain.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Value {
        match self {
            Self::Continuous(d) => d.sample(rng),
            Self::Discrete(d) => d.sample(rng),
            Self::Ordinal(d) => d.sample(rng),
            Self::Categorical(d) => d.sample(rng),
        }
    }

    /// Number of distinct values in the domain, `None` for continuous ranges.
    pub fn cardinality(&self) -> Option<u64> {
        match self {
            Self::Continuous(_) => None,
            Self::Discrete(d) => d.max.abs_diff(d.min).checked_add(1),
            Self::Ordinal(d) => Some(d.ordered_values.len() as u64),
            Self::Categorical(d) => Some(d.values.len() as u64),
        }
    }
}
