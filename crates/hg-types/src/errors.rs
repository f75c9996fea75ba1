use thiserror::Error;

/// Main error type for hypergrid operations
#[derive(Error, Debug)]
pub enum HgError {
    #[error("Dimension error: {0}")]
    Dimension(#[from] DimensionError),

    #[error("Grid error: {0}")]
    Grid(#[from] GridError),

    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Errors raised while constructing a single dimension
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DimensionError {
    #[error("Invalid dimension name {name:?}: {reason}")]
    InvalidName { name: String, reason: String },

    #[error("Empty range for dimension {name}: min {min} is greater than max {max}")]
    EmptyRange { name: String, min: String, max: String },

    #[error("Non-finite bounds for dimension {name}: [{min}, {max}]")]
    NonFiniteBounds { name: String, min: f64, max: f64 },

    #[error("Dimension {name} declares no values")]
    NoValues { name: String },

    #[error("Dimension {name} declares value {value} more than once")]
    DuplicateValue { name: String, value: String },

    #[error("Dimension {name} declares non-finite value {value}")]
    NonFiniteValue { name: String, value: String },
}

/// Errors raised while assembling hypergrids and joins
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    #[error("Invalid grid name {name:?}: {reason}")]
    InvalidName { name: String, reason: String },

    #[error("Grid {grid} declares dimension {dimension} more than once")]
    DuplicateDimension { grid: String, dimension: String },

    #[error("Grid {grid} has no dimension or joined subgrid matching pivot {pivot}")]
    UnknownPivot { grid: String, pivot: String },

    #[error("Join on pivot {pivot} declares no allowed values")]
    EmptyGuard { pivot: String },

    #[error("Allowed value {value} is outside the domain of pivot dimension {pivot}")]
    GuardNotSubset { pivot: String, value: String },

    #[error("Join on pivot {pivot} overlaps an existing join on value {value}")]
    OverlappingGuard { pivot: String, value: String },

    #[error("Grid {grid} already has a joined subgrid named {child}")]
    DuplicateSubgrid { grid: String, child: String },

    #[error("Subgrid name {child} collides with a dimension of grid {grid}")]
    SubgridNameCollision { grid: String, child: String },
}

/// Errors raised while decoding wire records
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Unknown dimension kind {kind:?} at {path}")]
    UnknownKind { path: String, kind: String },

    #[error("Missing required field {field} at {path}")]
    MissingField { path: String, field: String },

    #[error("Invalid field {field} at {path}: {message}")]
    InvalidField {
        path: String,
        field: String,
        message: String,
    },

    #[error("Malformed record at {path}: {message}")]
    Malformed { path: String, message: String },

    #[error("Invalid record at {path}: {source}")]
    Record {
        path: String,
        #[source]
        source: Box<HgError>,
    },
}

/// Result type alias for hypergrid operations
pub type HgResult<T> = Result<T, HgError>;

/// Macro for creating validation errors
#[macro_export]
macro_rules! validation_error {
    ($($arg:tt)*) => {
        $crate::HgError::Validation(format!($($arg)*))
    };
}

/// Macro for creating internal errors
#[macro_export]
macro_rules! internal_error {
    ($($arg:tt)*) => {
        $crate::HgError::Internal(format!($($arg)*))
    };
}

/// Macro for creating configuration errors
#[macro_export]
macro_rules! config_error {
    ($($arg:tt)*) => {
        $crate::HgError::Config(format!($($arg)*))
    };
}
