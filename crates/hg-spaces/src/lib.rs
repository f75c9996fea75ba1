//! # hg-spaces
//!
//! Hierarchical configuration spaces.
//!
//! A [`Hypergrid`] is a named set of [`Dimension`]s. Joining a child grid
//! onto a pivot dimension makes the child's dimensions legal only while the
//! pivot holds one of a declared set of values. Grids decide containment of
//! [`Point`]s, draw random legal points from a caller-supplied generator,
//! and round-trip losslessly through the [`codec`] wire records.

pub mod codec;
mod dimension;
mod hypergrid;

pub use codec::{decode, encode, DimensionRecord, HypergridRecord, JoinRecord};
pub use dimension::{
    CategoricalDimension, ContinuousDimension, Dimension, DiscreteDimension, OrdinalDimension,
};
pub use hg_types::{Coordinate, HgError, HgResult, Point, Value};
pub use hypergrid::{Hypergrid, Join};
