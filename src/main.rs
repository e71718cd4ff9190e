use std::error::Error;

use serde::Serialize;
use tracing::info;

use sched_model::{
    Pid, Ticks,
    config::SimConfig,
    sim::{self, Sim},
    telemetry::init_tracing,
};

#[derive(Serialize)]
struct PolicyReport<'a> {
    policy: String,
    finish: &'a [Ticks],
    order: &'a [Pid],
}

fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();

    let mut config = match std::env::args().nth(1) {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::demo(),
    }
    .with_env_overrides()?;

    let batch = config.load_batch()?;
    let policies = config.policies()?;
    info!(procs = batch.len(), policies = policies.len(), "batch loaded");

    for policy in policies {
        let result = Sim::run_policy(&batch, policy)?;
        let response = result.response();
        let report = PolicyReport {
            policy: policy.to_string(),
            finish: &response.finish,
            order: &response.order,
        };
        println!("{}", serde_json::to_string(&report)?);

        let summary = sim::summarize(&batch, &result);
        info!(
            %policy,
            avg_turnaround = summary.avg_turnaround,
            avg_waiting = summary.avg_waiting,
            avg_response = summary.avg_response,
            makespan = summary.makespan,
            utilization = summary.utilization,
            "summary"
        );
    }

    Ok(())
}
