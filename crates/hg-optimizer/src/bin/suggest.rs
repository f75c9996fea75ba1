use anyhow::Context;
use hg_optimizer::{OptimizationProblem, RandomSearch, SamplerConfig, SearchStrategy};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let path = args
        .next()
        .context("usage: hg-suggest <problem.json> [count]")?;
    let config = SamplerConfig::from_env()?;
    let count = match args.next() {
        Some(raw) => raw
            .parse::<usize>()
            .with_context(|| format!("invalid count {raw:?}"))?,
        None => config.batch_size,
    };

    let json = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
    let problem = OptimizationProblem::from_json(&json).with_context(|| format!("parsing {path}"))?;

    let mut search = RandomSearch::new(problem.parameter_space().clone(), &config);
    let suggestions = search.suggest(count)?;
    info!("Suggested {} configurations from {}", suggestions.len(), path);

    for point in &suggestions {
        problem.check_parameters(point)?;
        println!("{}", point.to_json()?);
    }
    Ok(())
}
