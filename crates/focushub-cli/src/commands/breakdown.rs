use focushub_core::breakdown::{GeminiBreaker, TaskBreaker};
use focushub_core::Config;

use crate::common::{print_json, CliResult};

pub fn run(task: &str) -> CliResult {
    let config = Config::load_or_default();
    tracing::debug!(task, model = %config.breakdown.model, "requesting breakdown");
    let breaker = GeminiBreaker::from_config(config.breakdown)?;
    let runtime = tokio::runtime::Runtime::new()?;
    let steps = runtime.block_on(breaker.break_down(task));
    print_json(&steps)?;
    Ok(())
}
