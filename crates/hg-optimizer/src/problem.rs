//! Optimization problem definitions.

use hg_spaces::Hypergrid;
use hg_types::{validation_error, HgError, HgResult, Point};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Whether we are maximizing or minimizing an objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectiveDirection {
    Maximize,
    Minimize,
}

impl Default for ObjectiveDirection {
    fn default() -> Self {
        Self::Maximize
    }
}

impl ObjectiveDirection {
    /// Whether `candidate` is strictly better than `incumbent`.
    pub fn improves(self, candidate: f64, incumbent: f64) -> bool {
        match self {
            Self::Maximize => candidate > incumbent,
            Self::Minimize => candidate < incumbent,
        }
    }
}

/// A named objective; the name must be a dimension of the objective space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Objective {
    pub name: String,
    #[serde(default)]
    pub direction: ObjectiveDirection,
}

impl Objective {
    pub fn new(name: impl Into<String>, direction: ObjectiveDirection) -> Self {
        Self {
            name: name.into(),
            direction,
        }
    }
}

/// Wire form of an [`OptimizationProblem`], validated on conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemRecord {
    pub parameter_space: Hypergrid,
    pub objective_space: Hypergrid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_space: Option<Hypergrid>,
    pub objectives: Vec<Objective>,
}

/// The spaces an optimizer works over: what it may tune, what it measures,
/// and optionally the context observations are made in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ProblemRecord", into = "ProblemRecord")]
pub struct OptimizationProblem {
    parameter_space: Hypergrid,
    objective_space: Hypergrid,
    context_space: Option<Hypergrid>,
    objectives: Vec<Objective>,
}

impl OptimizationProblem {
    pub fn new(
        parameter_space: Hypergrid,
        objective_space: Hypergrid,
        objectives: Vec<Objective>,
    ) -> HgResult<Self> {
        Self::build(parameter_space, objective_space, None, objectives)
    }

    pub fn with_context_space(self, context_space: Hypergrid) -> HgResult<Self> {
        Self::build(
            self.parameter_space,
            self.objective_space,
            Some(context_space),
            self.objectives,
        )
    }

    fn build(
        parameter_space: Hypergrid,
        objective_space: Hypergrid,
        context_space: Option<Hypergrid>,
        objectives: Vec<Objective>,
    ) -> HgResult<Self> {
        if objectives.is_empty() {
            return Err(validation_error!("optimization problem declares no objectives"));
        }
        for (i, objective) in objectives.iter().enumerate() {
            if objectives[..i].iter().any(|o| o.name == objective.name) {
                return Err(validation_error!(
                    "objective {} is declared more than once",
                    objective.name
                ));
            }
            if objective_space.find_dimension(&objective.name).is_none() {
                return Err(validation_error!(
                    "objective {} is not a dimension of objective space {}",
                    objective.name,
                    objective_space.name()
                ));
            }
        }

        info!(
            "Built optimization problem over {} ({} parameters, {} objectives)",
            parameter_space.name(),
            parameter_space.dimension_names().len(),
            objectives.len()
        );
        Ok(Self {
            parameter_space,
            objective_space,
            context_space,
            objectives,
        })
    }

    pub fn parameter_space(&self) -> &Hypergrid {
        &self.parameter_space
    }

    pub fn objective_space(&self) -> &Hypergrid {
        &self.objective_space
    }

    pub fn context_space(&self) -> Option<&Hypergrid> {
        self.context_space.as_ref()
    }

    pub fn objectives(&self) -> &[Objective] {
        &self.objectives
    }

    /// Confirms `parameters` is a legal configuration before it is passed on.
    pub fn check_parameters(&self, parameters: &Point) -> HgResult<()> {
        check_in_space(&self.parameter_space, parameters)
    }

    pub fn check_objectives(&self, objectives: &Point) -> HgResult<()> {
        check_in_space(&self.objective_space, objectives)
    }

    /// Without a context space, only an empty context is accepted.
    pub fn check_context(&self, context: &Point) -> HgResult<()> {
        match &self.context_space {
            Some(space) => check_in_space(space, context),
            None if context.is_empty() => Ok(()),
            None => Err(validation_error!(
                "problem declares no context space but a context was supplied"
            )),
        }
    }

    pub fn to_json(&self) -> HgResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> HgResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

fn check_in_space(space: &Hypergrid, point: &Point) -> HgResult<()> {
    if space.contains(point) {
        Ok(())
    } else {
        warn!("Point {} is not contained in {}", point, space.name());
        Err(validation_error!(
            "point {} is not contained in {}",
            point,
            space.name()
        ))
    }
}

impl TryFrom<ProblemRecord> for OptimizationProblem {
    type Error = HgError;

    fn try_from(record: ProblemRecord) -> HgResult<Self> {
        Self::build(
            record.parameter_space,
            record.objective_space,
            record.context_space,
            record.objectives,
        )
    }
}

impl From<OptimizationProblem> for ProblemRecord {
    fn from(problem: OptimizationProblem) -> Self {
        Self {
            parameter_space: problem.parameter_space,
            objective_space: problem.objective_space,
            context_space: problem.context_space,
            objectives: problem.objectives,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hg_spaces::{Dimension, Value};

    fn parameter_space() -> Hypergrid {
        let buffer = Hypergrid::new(
            "emergency_buffer_config",
            vec![Dimension::discrete("log2_emergency_buffer_size", 0, 16).unwrap()],
        )
        .unwrap();
        Hypergrid::new(
            "communication_channel_parameter_space",
            vec![
                Dimension::discrete("num_readers", 1, 64).unwrap(),
                Dimension::categorical("use_emergency_buffer", vec![true, false]).unwrap(),
            ],
        )
        .unwrap()
        .join(buffer, "use_emergency_buffer", vec![Value::Bool(true)])
        .unwrap()
    }

    fn objective_space() -> Hypergrid {
        Hypergrid::new(
            "objectives",
            vec![Dimension::continuous("throughput", 0.0, 1e9).unwrap()],
        )
        .unwrap()
    }

    fn sample_problem() -> OptimizationProblem {
        OptimizationProblem::new(
            parameter_space(),
            objective_space(),
            vec![Objective::new("throughput", ObjectiveDirection::Maximize)],
        )
        .unwrap()
    }

    #[test]
    fn objectives_must_name_objective_dimensions() {
        let err = OptimizationProblem::new(
            parameter_space(),
            objective_space(),
            vec![Objective::new("latency", ObjectiveDirection::Minimize)],
        )
        .unwrap_err();
        assert!(matches!(err, HgError::Validation(_)));

        let err = OptimizationProblem::new(
            parameter_space(),
            objective_space(),
            vec![
                Objective::new("throughput", ObjectiveDirection::Maximize),
                Objective::new("throughput", ObjectiveDirection::Minimize),
            ],
        )
        .unwrap_err();
        assert!(matches!(err, HgError::Validation(_)));

        assert!(OptimizationProblem::new(parameter_space(), objective_space(), vec![]).is_err());
    }

    #[test]
    fn parameters_are_checked_against_the_parameter_space() {
        let problem = sample_problem();
        let good = Point::new()
            .with("num_readers", 4)
            .with("use_emergency_buffer", false);
        assert!(problem.check_parameters(&good).is_ok());

        let missing_branch = Point::new()
            .with("num_readers", 4)
            .with("use_emergency_buffer", true);
        assert!(matches!(
            problem.check_parameters(&missing_branch),
            Err(HgError::Validation(_))
        ));

        assert!(problem
            .check_objectives(&Point::new().with("throughput", 1250.5))
            .is_ok());
        assert!(problem
            .check_objectives(&Point::new().with("throughput", -1.0))
            .is_err());
    }

    #[test]
    fn context_requires_a_context_space() {
        let problem = sample_problem();
        assert!(problem.check_context(&Point::new()).is_ok());
        assert!(problem
            .check_context(&Point::new().with("load", 0.5))
            .is_err());

        let context = Hypergrid::new(
            "context",
            vec![Dimension::continuous("load", 0.0, 1.0).unwrap()],
        )
        .unwrap();
        let problem = problem.with_context_space(context).unwrap();
        assert!(problem
            .check_context(&Point::new().with("load", 0.5))
            .is_ok());
        assert!(problem.check_context(&Point::new()).is_err());
    }

    #[test]
    fn json_round_trip_preserves_the_problem() {
        let problem = sample_problem();
        let json = problem.to_json().unwrap();
        let decoded = OptimizationProblem::from_json(&json).unwrap();
        assert_eq!(decoded, problem);

        let wire: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            wire["parameter_space"]["joins"][0]["child"]["name"],
            "emergency_buffer_config"
        );
        assert_eq!(wire["objectives"][0]["direction"], "Maximize");
        assert!(wire.get("context_space").is_none());
    }

    #[test]
    fn invalid_problem_json_is_rejected() {
        let json = serde_json::json!({
            "parameter_space": {"name": "p", "dimensions": [{"kind": "discrete", "name": "n", "min": 0, "max": 3}]},
            "objective_space": {"name": "o", "dimensions": [{"kind": "continuous", "name": "y", "min": 0.0, "max": 1.0}]},
            "objectives": [{"name": "z"}]
        });
        assert!(OptimizationProblem::from_json(&json.to_string()).is_err());
    }

    #[test]
    fn direction_comparisons() {
        assert!(ObjectiveDirection::Maximize.improves(2.0, 1.5));
        assert!(!ObjectiveDirection::Maximize.improves(1.0, 1.5));
        assert!(ObjectiveDirection::Minimize.improves(0.05, 0.15));
        assert_eq!(ObjectiveDirection::default(), ObjectiveDirection::Maximize);
    }
}
