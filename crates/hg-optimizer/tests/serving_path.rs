use hg_optimizer::{
    ObjectiveDirection, OptimizationProblem, RandomSearch, SamplerConfig, SearchStrategy,
};
use hg_spaces::{Point, Value};

const CHANNEL_PROBLEM: &str = include_str!("../data/channel_problem.json");

#[test]
fn problem_document_decodes() {
    let problem = OptimizationProblem::from_json(CHANNEL_PROBLEM).unwrap();
    assert_eq!(
        problem.parameter_space().name(),
        "communication_channel_parameter_space"
    );
    assert_eq!(problem.objectives().len(), 2);
    assert_eq!(problem.objectives()[1].direction, ObjectiveDirection::Minimize);
    assert!(problem
        .parameter_space()
        .find_dimension("emergency_buffer_config.emergency_buffer_color.color")
        .is_some());
    assert!(problem.context_space().is_some());
}

#[test]
fn suggestions_survive_the_response_path() {
    let problem = OptimizationProblem::from_json(CHANNEL_PROBLEM).unwrap();
    let mut search = RandomSearch::new(
        problem.parameter_space().clone(),
        &SamplerConfig::new().with_seed(2024),
    );

    let suggestions = search.suggest(200).unwrap();
    assert_eq!(suggestions.len(), 200);
    for point in suggestions {
        problem.check_parameters(&point).unwrap();
        // What a remote caller would send back to us
        let echoed = Point::from_json(&point.to_json().unwrap()).unwrap();
        assert_eq!(echoed, point);
        problem.check_parameters(&echoed).unwrap();
    }
}

#[test]
fn externally_supplied_points_are_validated() {
    let problem = OptimizationProblem::from_json(CHANNEL_PROBLEM).unwrap();

    let from_caller = Point::from_json(
        r#"{"num_readers": 8, "log2_buffer_size": 12, "use_emergency_buffer": true,
            "emergency_buffer_config": {"log2_emergency_buffer_size": 40, "use_colors": false}}"#,
    )
    .unwrap();
    assert!(problem.check_parameters(&from_caller).is_err());

    let observed = Point::new()
        .with("throughput", 5120.0)
        .with("p99_latency_ms", 3.5);
    problem.check_objectives(&observed).unwrap();
    problem
        .check_context(&Point::new().with("load", Value::from("medium")))
        .unwrap();
}

#[test]
fn problem_round_trips_through_json() {
    let problem = OptimizationProblem::from_json(CHANNEL_PROBLEM).unwrap();
    let again = OptimizationProblem::from_json(&problem.to_json().unwrap()).unwrap();
    assert_eq!(again, problem);
}
