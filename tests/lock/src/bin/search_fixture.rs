//! Binary that runs the 8-Queens calibration through the search agent and
//! prints deterministic output lines for cross-process verification.
//!
//! Usage: `search_fixture`
//!
//! Output: key=value lines on stdout. Logs go to stderr, filtered by
//! `RUST_LOG` (default `warn`), and never affect stdout.

use fathom_harness::agent::SearchAgent;
use fathom_harness::report::build_report;
use fathom_harness::worlds::n_queens::NQueens;
use fathom_search::metrics::METRIC_DEPTH_ITERATIONS;
use fathom_search::{SearchProblem, Strategy};
use lock_tests::CALIBRATION_BOARD_SIZE;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let problem = NQueens::new(CALIBRATION_BOARD_SIZE);
    let strategy = Strategy::iterative_deepening();
    let agent = SearchAgent::default();
    let result = agent.run(&problem, &strategy);
    let report = build_report(problem.problem_id(), &strategy, agent.policy(), &result)
        .expect("report builds");
    let run = result.expect("calibration run finds a plan");

    let report_json = report.to_value().expect("report parses");
    let columns: Vec<String> = run
        .actions
        .iter()
        .map(|a| a.location.y.to_string())
        .collect();

    println!("report_digest={}", report.digest().as_str());
    println!(
        "plan_digest={}",
        report_json["plan_digest"].as_str().expect("missing plan_digest")
    );
    println!(
        "policy_digest={}",
        report_json["policy_digest"].as_str().expect("missing policy_digest")
    );
    println!("outcome={}", report_json["outcome"]["type"].as_str().unwrap_or(""));
    println!("plan_length={}", run.actions.len());
    println!("plan_columns={}", columns.join(","));
    println!(
        "nodes_expanded={}",
        run.instrumentation().nodes_expanded()
    );
    println!(
        "depth_iterations={}",
        run.instrumentation().get(METRIC_DEPTH_ITERATIONS).unwrap_or(0)
    );
}
