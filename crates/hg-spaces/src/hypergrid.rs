//! Flat and hierarchical hypergrids.
//!
//! A [`Hypergrid`] owns its dimensions and its joins; each [`Join`] owns its
//! child grid. The tree is acyclic by construction, so containment and
//! sampling terminate by structural recursion.

use hg_types::{Coordinate, GridError, HgResult, Point, Value};
use rand::Rng;
use tracing::debug;

use crate::dimension::{check_name, Dimension};

/// Conditional attachment of a child grid, active while the pivot dimension
/// of the owning grid holds one of `allowed_values`.
#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    pivot: String,
    allowed_values: Vec<Value>,
    child: Hypergrid,
}

impl Join {
    /// Name of the pivot dimension within the owning grid.
    pub fn pivot(&self) -> &str {
        &self.pivot
    }

    pub fn allowed_values(&self) -> &[Value] {
        &self.allowed_values
    }

    pub fn child(&self) -> &Hypergrid {
        &self.child
    }

    /// Whether the branch is active while `pivot` holds `pivot_value`.
    ///
    /// Membership follows the pivot's own notion of equality, so an integer
    /// matches an equal real on a continuous pivot.
    pub fn is_active(&self, pivot: &Dimension, pivot_value: &Value) -> bool {
        self.allowed_values
            .iter()
            .any(|allowed| pivot.same_value(allowed, pivot_value))
    }
}

/// A named collection of dimensions, optionally extended by joined subgrids.
#[derive(Debug, Clone, PartialEq)]
pub struct Hypergrid {
    name: String,
    dimensions: Vec<Dimension>,
    joins: Vec<Join>,
}

impl Hypergrid {
    pub fn new(name: impl Into<String>, dimensions: Vec<Dimension>) -> HgResult<Self> {
        let name = name.into();
        if let Err(reason) = check_name(&name) {
            return Err(GridError::InvalidName { name, reason }.into());
        }
        for (i, dimension) in dimensions.iter().enumerate() {
            if dimensions[..i].iter().any(|d| d.name() == dimension.name()) {
                return Err(GridError::DuplicateDimension {
                    grid: name,
                    dimension: dimension.name().to_string(),
                }
                .into());
            }
        }
        debug!("Created hypergrid {} with {} dimensions", name, dimensions.len());
        Ok(Self {
            name,
            dimensions,
            joins: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The grid's own dimensions in declaration order.
    pub fn dimensions(&self) -> &[Dimension] {
        &self.dimensions
    }

    pub fn dimension(&self, name: &str) -> Option<&Dimension> {
        self.dimensions.iter().find(|d| d.name() == name)
    }

    pub fn joins(&self) -> &[Join] {
        &self.joins
    }

    pub fn is_hierarchical(&self) -> bool {
        !self.joins.is_empty()
    }

    /// A child grid joined directly onto this one.
    pub fn subgrid(&self, name: &str) -> Option<&Hypergrid> {
        self.joins
            .iter()
            .map(|j| &j.child)
            .find(|child| child.name == name)
    }

    /// Resolves a dotted dimension path, descending through joined subgrids.
    pub fn find_dimension(&self, path: &str) -> Option<&Dimension> {
        match path.split_once('.') {
            None => self.dimension(path),
            Some((child, rest)) => self.subgrid(child)?.find_dimension(rest),
        }
    }

    /// Every dimension reachable in the tree, as dotted paths: own
    /// dimensions first, then each joined child in declaration order.
    pub fn dimension_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .dimensions
            .iter()
            .map(|d| d.name().to_string())
            .collect();
        for join in &self.joins {
            names.extend(
                join.child
                    .dimension_names()
                    .into_iter()
                    .map(|n| format!("{}.{}", join.child.name, n)),
            );
        }
        names
    }

    /// Attaches `child` under the pivot dimension `pivot`, active whenever the
    /// pivot takes one of `allowed_values`.
    ///
    /// `pivot` may be a dotted path into an already-joined subgrid, in which
    /// case the join is made inside that subgrid.
    pub fn join(
        mut self,
        child: Hypergrid,
        pivot: &str,
        allowed_values: Vec<Value>,
    ) -> HgResult<Self> {
        if self.dimension(pivot).is_some() {
            self.attach(child, pivot, allowed_values)?;
            return Ok(self);
        }

        let (head, rest) = pivot.split_once('.').ok_or_else(|| GridError::UnknownPivot {
            grid: self.name.clone(),
            pivot: pivot.to_string(),
        })?;
        let idx = self
            .joins
            .iter()
            .position(|j| j.child.name == head)
            .ok_or_else(|| GridError::UnknownPivot {
                grid: self.name.clone(),
                pivot: pivot.to_string(),
            })?;

        let target = self.joins.remove(idx);
        let nested = target.child.join(child, rest, allowed_values)?;
        self.joins.insert(
            idx,
            Join {
                child: nested,
                ..target
            },
        );
        Ok(self)
    }

    fn attach(&mut self, child: Hypergrid, pivot: &str, allowed_values: Vec<Value>) -> HgResult<()> {
        let pivot_dimension = self.dimension(pivot).ok_or_else(|| GridError::UnknownPivot {
            grid: self.name.clone(),
            pivot: pivot.to_string(),
        })?;

        if allowed_values.is_empty() {
            return Err(GridError::EmptyGuard {
                pivot: pivot.to_string(),
            }
            .into());
        }
        if let Some(outside) = allowed_values.iter().find(|v| !pivot_dimension.contains(v)) {
            return Err(GridError::GuardNotSubset {
                pivot: pivot.to_string(),
                value: outside.to_string(),
            }
            .into());
        }
        if self.dimension(&child.name).is_some() {
            return Err(GridError::SubgridNameCollision {
                grid: self.name.clone(),
                child: child.name.clone(),
            }
            .into());
        }
        if self.subgrid(&child.name).is_some() {
            return Err(GridError::DuplicateSubgrid {
                grid: self.name.clone(),
                child: child.name.clone(),
            }
            .into());
        }
        for existing in self.joins.iter().filter(|j| j.pivot == pivot) {
            if let Some(shared) = allowed_values
                .iter()
                .find(|v| existing.is_active(pivot_dimension, v))
            {
                return Err(GridError::OverlappingGuard {
                    pivot: pivot.to_string(),
                    value: shared.to_string(),
                }
                .into());
            }
        }

        debug!(
            "Joined subgrid {} onto {} on pivot {} ({} allowed values)",
            child.name,
            self.name,
            pivot,
            allowed_values.len()
        );
        self.joins.push(Join {
            pivot: pivot.to_string(),
            allowed_values,
            child,
        });
        Ok(())
    }

    /// Whether `point` is a legal configuration of this grid.
    ///
    /// Every own dimension must be present and in domain, and every active
    /// branch must hold a nested point contained by its child grid. Values
    /// under inactive branches and unknown keys are ignored.
    pub fn contains(&self, point: &Point) -> bool {
        let own_dimensions_valid = self.dimensions.iter().all(|d| {
            point
                .value(d.name())
                .map_or(false, |value| d.contains(value))
        });
        if !own_dimensions_valid {
            return false;
        }

        self.joins.iter().all(|join| {
            let (Some(pivot), Some(pivot_value)) =
                (self.dimension(&join.pivot), point.value(&join.pivot))
            else {
                return false;
            };
            if !join.is_active(pivot, pivot_value) {
                return true;
            }
            point
                .nested(&join.child.name)
                .map_or(false, |nested| join.child.contains(nested))
        })
    }

    /// Draws one legal configuration.
    ///
    /// Own dimensions are drawn in declaration order, then each join in
    /// declaration order recurses depth-first into its child when active.
    /// The same generator is threaded through the whole traversal, so a
    /// generator seeded identically reproduces the same sequence of points.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Point {
        let mut values: Vec<(String, Coordinate)> = self
            .dimensions
            .iter()
            .map(|d| (d.name().to_string(), Coordinate::Value(d.sample(rng))))
            .collect();

        let mut children = Vec::new();
        for join in &self.joins {
            let active = self.dimension(&join.pivot).map_or(false, |pivot| {
                values
                    .iter()
                    .find(|(name, _)| *name == join.pivot)
                    .and_then(|(_, c)| c.as_value())
                    .map_or(false, |v| join.is_active(pivot, v))
            });
            if active {
                children.push((
                    join.child.name.clone(),
                    Coordinate::Point(join.child.sample(rng)),
                ));
            }
        }

        values.extend(children);
        values.into_iter().collect()
    }
}
