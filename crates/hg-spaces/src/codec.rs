//! Wire records for dimensions, hypergrids and joins.
//!
//! Encoding is infallible. Decoding dispatches on the `kind` tag of each
//! dimension record and re-runs every construction check, so a decoded grid
//! is always structurally consistent. Failures carry the path of the
//! offending record, e.g. `hypergrid 'root' / join 'use_colors' /
//! hypergrid 'color' / dimension 'shade'`.

use hg_types::{CodecError, HgError, HgResult, Value};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dimension::Dimension;
use crate::hypergrid::Hypergrid;

/// Tagged wire form of a single dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionRecord {
    pub kind: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ordered_values: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<Value>>,
}

/// Wire form of a join: the pivot, its guard, and the child grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinRecord {
    pub pivot_dimension_name: String,
    pub allowed_values: Vec<Value>,
    pub child: HypergridRecord,
}

/// Wire form of a flat or hierarchical hypergrid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HypergridRecord {
    pub name: String,
    #[serde(default)]
    pub dimensions: Vec<DimensionRecord>,
    #[serde(default)]
    pub joins: Vec<JoinRecord>,
}

type DimensionDecoder = fn(&DimensionRecord, &str) -> HgResult<Dimension>;

/// Decoders keyed by wire tag. The set is closed; unknown tags fail.
const DIMENSION_DECODERS: &[(&str, DimensionDecoder)] = &[
    ("continuous", decode_continuous as DimensionDecoder),
    ("discrete", decode_discrete as DimensionDecoder),
    ("ordinal", decode_ordinal as DimensionDecoder),
    ("categorical", decode_categorical as DimensionDecoder),
];

fn missing(path: &str, field: &str) -> HgError {
    CodecError::MissingField {
        path: path.to_string(),
        field: field.to_string(),
    }
    .into()
}

fn invalid(path: &str, field: &str, message: impl Into<String>) -> HgError {
    CodecError::InvalidField {
        path: path.to_string(),
        field: field.to_string(),
        message: message.into(),
    }
    .into()
}

/// Attaches `path` to construction errors raised while decoding a record.
fn at_path(path: &str, err: HgError) -> HgError {
    match err {
        HgError::Codec(_) => err,
        other => CodecError::Record {
            path: path.to_string(),
            source: Box::new(other),
        }
        .into(),
    }
}

fn required<'a, T>(value: &'a Option<T>, path: &str, field: &str) -> HgResult<&'a T> {
    value.as_ref().ok_or_else(|| missing(path, field))
}

fn real_bound(record: &DimensionRecord, path: &str, field: &str) -> HgResult<f64> {
    let value = required(if field == "min" { &record.min } else { &record.max }, path, field)?;
    value
        .as_f64()
        .ok_or_else(|| invalid(path, field, format!("expected a number, found {}", value.type_name())))
}

fn integer_bound(record: &DimensionRecord, path: &str, field: &str) -> HgResult<i64> {
    let value = required(if field == "min" { &record.min } else { &record.max }, path, field)?;
    value
        .as_i64()
        .ok_or_else(|| invalid(path, field, format!("expected an integer, found {}", value.type_name())))
}

fn decode_continuous(record: &DimensionRecord, path: &str) -> HgResult<Dimension> {
    let min = real_bound(record, path, "min")?;
    let max = real_bound(record, path, "max")?;
    Dimension::continuous(record.name.clone(), min, max)
}

fn decode_discrete(record: &DimensionRecord, path: &str) -> HgResult<Dimension> {
    let min = integer_bound(record, path, "min")?;
    let max = integer_bound(record, path, "max")?;
    Dimension::discrete(record.name.clone(), min, max)
}

fn decode_ordinal(record: &DimensionRecord, path: &str) -> HgResult<Dimension> {
    let values = required(&record.ordered_values, path, "ordered_values")?;
    Dimension::ordinal(record.name.clone(), values.iter().cloned())
}

fn decode_categorical(record: &DimensionRecord, path: &str) -> HgResult<Dimension> {
    let values = required(&record.values, path, "values")?;
    Dimension::categorical(record.name.clone(), values.iter().cloned())
}

impl From<&Dimension> for DimensionRecord {
    fn from(dimension: &Dimension) -> Self {
        let mut record = DimensionRecord {
            kind: dimension.kind().to_string(),
            name: dimension.name().to_string(),
            min: None,
            max: None,
            ordered_values: None,
            values: None,
        };
        match dimension {
            Dimension::Continuous(d) => {
                record.min = Some(Value::Float(d.min()));
                record.max = Some(Value::Float(d.max()));
            }
            Dimension::Discrete(d) => {
                record.min = Some(Value::Int(d.min()));
                record.max = Some(Value::Int(d.max()));
            }
            Dimension::Ordinal(d) => record.ordered_values = Some(d.ordered_values().to_vec()),
            Dimension::Categorical(d) => record.values = Some(d.values().to_vec()),
        }
        record
    }
}

impl DimensionRecord {
    /// Rebuilds the dimension; `path` locates the record for error reports.
    pub fn to_dimension(&self, path: &str) -> HgResult<Dimension> {
        let path = format!("{path} / dimension '{}'", self.name);
        let decoder = DIMENSION_DECODERS
            .iter()
            .find(|(kind, _)| *kind == self.kind)
            .map(|(_, decoder)| *decoder)
            .ok_or_else(|| CodecError::UnknownKind {
                path: path.clone(),
                kind: self.kind.clone(),
            })?;
        decoder(self, &path).map_err(|e| at_path(&path, e))
    }
}

/// Produces the wire record for `grid`, including its full join tree.
pub fn encode(grid: &Hypergrid) -> HypergridRecord {
    HypergridRecord {
        name: grid.name().to_string(),
        dimensions: grid.dimensions().iter().map(DimensionRecord::from).collect(),
        joins: grid
            .joins()
            .iter()
            .map(|join| JoinRecord {
                pivot_dimension_name: join.pivot().to_string(),
                allowed_values: join.allowed_values().to_vec(),
                child: encode(join.child()),
            })
            .collect(),
    }
}

/// Rebuilds a grid from its wire record, validating every dimension and join.
pub fn decode(record: &HypergridRecord) -> HgResult<Hypergrid> {
    decode_at(record, "")
}

fn decode_at(record: &HypergridRecord, parent_path: &str) -> HgResult<Hypergrid> {
    let path = if parent_path.is_empty() {
        format!("hypergrid '{}'", record.name)
    } else {
        format!("{parent_path} / hypergrid '{}'", record.name)
    };

    let dimensions = record
        .dimensions
        .iter()
        .map(|d| d.to_dimension(&path))
        .collect::<HgResult<Vec<_>>>()?;
    let mut grid = Hypergrid::new(record.name.clone(), dimensions).map_err(|e| at_path(&path, e))?;

    for join in &record.joins {
        let join_path = format!("{path} / join '{}'", join.pivot_dimension_name);
        if join.pivot_dimension_name.contains('.') {
            return Err(invalid(
                &join_path,
                "pivot_dimension_name",
                "joins must name a dimension of the grid that owns them",
            ));
        }
        let child = decode_at(&join.child, &join_path)?;
        grid = grid
            .join(child, &join.pivot_dimension_name, join.allowed_values.clone())
            .map_err(|e| at_path(&join_path, e))?;
    }

    debug!("Decoded {}", path);
    Ok(grid)
}

impl From<Hypergrid> for HypergridRecord {
    fn from(grid: Hypergrid) -> Self {
        encode(&grid)
    }
}

impl TryFrom<HypergridRecord> for Hypergrid {
    type Error = HgError;

    fn try_from(record: HypergridRecord) -> HgResult<Self> {
        decode(&record)
    }
}

impl Serialize for Hypergrid {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        encode(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Hypergrid {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let record = HypergridRecord::deserialize(deserializer)?;
        decode(&record).map_err(serde::de::Error::custom)
    }
}

/// Serializes `grid` to its JSON wire form.
pub fn to_json(grid: &Hypergrid) -> HgResult<String> {
    Ok(serde_json::to_string(&encode(grid))?)
}

/// Parses and validates a grid from its JSON wire form.
///
/// Documents that are not well-formed records (bad syntax, a missing
/// `kind`, `name` or `pivot_dimension_name`) fail with
/// [`CodecError::Malformed`] at `<root>`; the message carries serde's
/// field name and line/column.
pub fn from_json(json: &str) -> HgResult<Hypergrid> {
    let record: HypergridRecord = serde_json::from_str(json).map_err(|e| CodecError::Malformed {
        path: "<root>".to_string(),
        message: e.to_string(),
    })?;
    decode(&record)
}
