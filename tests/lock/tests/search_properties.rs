//! Behavioural properties of depth-limited search, iterative deepening and the
//! search agent, checked end to end through the harness.

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use fathom_harness::agent::{AgentError, SearchAgent};
use fathom_harness::report::build_report;
use fathom_harness::worlds::branching_tree::BranchingTree;
use fathom_harness::worlds::n_queens::NQueens;
use fathom_search::metrics::METRIC_DEPTH_ITERATIONS;
use fathom_search::{
    AbortReasonV1, CallbackStageV1, CancelFlag, CycleCheckV1, FnProblem, NamedActionV1,
    OutcomeKindV1, SearchContext, SearchOutcome, SearchPolicyV1, SearchProblem, Strategy,
};
use lock_tests::{run_calibration, CALIBRATION_NODES_EXPANDED};

/// States 0..size arranged in a ring; `next` moves one step clockwise.
fn ring(size: u32) -> FnProblem<u32, NamedActionV1> {
    FnProblem::new(
        "ring",
        0,
        |_: &u32| vec![NamedActionV1::new("next")],
        move |s: &u32, _: &NamedActionV1| (s + 1) % size,
        |_: &u32| false,
    )
}

#[test]
fn repeated_runs_are_identical_n10() {
    let problem = NQueens::new(6);
    let strategy = Strategy::iterative_deepening();
    let agent = SearchAgent::default();

    let first = agent.run(&problem, &strategy);
    let first_report = build_report(problem.problem_id(), &strategy, agent.policy(), &first).unwrap();
    for _ in 0..9 {
        let again = agent.run(&problem, &strategy);
        assert_eq!(again, first);
        let report = build_report(problem.problem_id(), &strategy, agent.policy(), &again).unwrap();
        assert_eq!(report.bytes(), first_report.bytes());
        assert_eq!(report.digest(), first_report.digest());
    }
}

#[test]
fn iterative_deepening_returns_a_shallowest_solution() {
    let tree = BranchingTree::new(2, 5).with_goal(vec![1, 0, 1]);
    let run = SearchAgent::default()
        .run(&tree, &Strategy::iterative_deepening())
        .unwrap();
    assert_eq!(run.actions.len(), 3);

    // No single pass below the solution depth finds it.
    for limit in 0..3 {
        let err = SearchAgent::default()
            .run(&tree, &Strategy::depth_limited(limit))
            .unwrap_err();
        assert!(matches!(err, AgentError::CutoffReached { .. }), "limit {limit}");
    }
    let at_depth = SearchAgent::default()
        .run(&tree, &Strategy::depth_limited(3))
        .unwrap();
    assert_eq!(at_depth.actions, run.actions);
}

#[test]
fn depth_limit_zero_on_non_goal_root_is_cutoff() {
    let problem = NQueens::new(8);
    let mut ctx = SearchContext::new(SearchPolicyV1::default());
    let outcome = Strategy::depth_limited(0).search(&problem, &mut ctx).unwrap();
    assert_eq!(outcome, SearchOutcome::Cutoff);
    assert_eq!(ctx.metrics().nodes_expanded(), 0);
}

#[test]
fn iterative_deepening_counts_every_pass() {
    let mut single = SearchContext::new(SearchPolicyV1::default());
    let outcome = Strategy::depth_limited(8)
        .search(&NQueens::new(8), &mut single)
        .unwrap();
    assert!(outcome.is_solution());

    let total = run_calibration().unwrap().instrumentation().nodes_expanded();
    assert_eq!(total, CALIBRATION_NODES_EXPANDED);
    assert!(total > single.metrics().nodes_expanded());
}

#[test]
fn unsolvable_finite_space_is_no_solution() {
    for size in [2, 3] {
        let err = SearchAgent::default()
            .run(&NQueens::new(size), &Strategy::iterative_deepening())
            .unwrap_err();
        let AgentError::NoSolution { stats } = err else {
            panic!("expected NoSolution for n={size}, got {err:?}");
        };
        assert!(stats.instrumentation.nodes_expanded() > 0);
    }
}

#[test]
fn trivially_solvable_board_of_one() {
    let run = SearchAgent::default()
        .run(&NQueens::new(1), &Strategy::iterative_deepening())
        .unwrap();
    assert_eq!(
        run.rendered_actions(),
        vec!["Action[name==placeQueenAt, location== ( 0 , 0 ) ]"]
    );
}

#[test]
fn cycle_check_turns_endless_cutoff_into_failure() {
    let problem = ring(4);

    let unchecked = SearchAgent::new(SearchPolicyV1 {
        max_depth: Some(12),
        ..SearchPolicyV1::default()
    })
    .run(&problem, &Strategy::iterative_deepening())
    .unwrap_err();
    assert!(matches!(
        unchecked,
        AgentError::Aborted {
            reason: AbortReasonV1::DepthCeilingReached { max_depth: 12 },
            ..
        }
    ));

    let checked = SearchAgent::new(SearchPolicyV1 {
        cycle_check: CycleCheckV1::AncestorPath,
        ..SearchPolicyV1::default()
    })
    .run(&problem, &Strategy::iterative_deepening())
    .unwrap_err();
    assert!(
        matches!(checked, AgentError::NoSolution { .. }),
        "expected NoSolution, got {checked:?}"
    );
}

#[test]
fn expansion_budget_stops_the_run() {
    let err = SearchAgent::new(SearchPolicyV1 {
        max_expansions: Some(100),
        ..SearchPolicyV1::default()
    })
    .run(&NQueens::new(8), &Strategy::iterative_deepening())
    .unwrap_err();
    let AgentError::Aborted { reason, stats } = err else {
        panic!("expected Aborted, got {err:?}");
    };
    assert_eq!(
        reason,
        AbortReasonV1::ExpansionBudgetExceeded {
            max_expansions: 100
        }
    );
    assert_eq!(stats.instrumentation.nodes_expanded(), 100);
}

#[test]
fn aborted_run_stats_stay_consistent() {
    let err = SearchAgent::new(SearchPolicyV1 {
        max_expansions: Some(100),
        ..SearchPolicyV1::default()
    })
    .run(&NQueens::new(8), &Strategy::iterative_deepening())
    .unwrap_err();
    let stats = err.stats().expect("aborted runs keep their stats");

    let iterations = stats.instrumentation.get(METRIC_DEPTH_ITERATIONS).unwrap_or(0);
    assert_eq!(iterations, stats.passes.len() as u64);
    assert_eq!(
        stats.passes.iter().map(|p| p.nodes_expanded).sum::<u64>(),
        stats.instrumentation.nodes_expanded()
    );
    let last = stats.passes.last().expect("at least one pass ran");
    assert_eq!(last.outcome, OutcomeKindV1::Aborted);
    assert!(stats.passes[..stats.passes.len() - 1]
        .iter()
        .all(|p| p.outcome == OutcomeKindV1::Cutoff));
}

#[test]
fn deadline_stops_the_run() {
    let slow = FnProblem::new(
        "slow",
        0u32,
        |_: &u32| {
            std::thread::sleep(Duration::from_millis(5));
            vec![NamedActionV1::new("inc")]
        },
        |s: &u32, _: &NamedActionV1| s + 1,
        |_: &u32| false,
    );
    let err = SearchAgent::new(SearchPolicyV1 {
        deadline: Some(Duration::from_millis(1)),
        ..SearchPolicyV1::default()
    })
    .run(&slow, &Strategy::iterative_deepening())
    .unwrap_err();
    assert!(
        matches!(
            err,
            AgentError::Aborted {
                reason: AbortReasonV1::DeadlineExceeded { deadline_ms: 1 },
                ..
            }
        ),
        "expected DeadlineExceeded, got {err:?}"
    );
}

#[test]
fn cancel_raised_mid_run_stops_before_next_expansion() {
    let cancel = CancelFlag::new();
    let trigger = cancel.clone();
    let calls = AtomicU32::new(0);
    let problem = FnProblem::new(
        "cancel_after_three",
        0u32,
        move |_: &u32| {
            if calls.fetch_add(1, Ordering::SeqCst) + 1 == 3 {
                trigger.cancel();
            }
            vec![NamedActionV1::new("inc")]
        },
        |s: &u32, _: &NamedActionV1| s + 1,
        |_: &u32| false,
    );

    let err = SearchAgent::default()
        .with_cancel_flag(cancel)
        .run(&problem, &Strategy::iterative_deepening())
        .unwrap_err();
    let AgentError::Aborted { reason, stats } = err else {
        panic!("expected Aborted, got {err:?}");
    };
    assert_eq!(reason, AbortReasonV1::Cancelled);
    assert_eq!(stats.instrumentation.nodes_expanded(), 3);
}

#[test]
fn panicking_callback_is_contained() {
    let problem = FnProblem::new(
        "explodes",
        0u32,
        |s: &u32| {
            assert!(*s < 2, "actions exploded at {s}");
            vec![NamedActionV1::new("inc")]
        },
        |s: &u32, _: &NamedActionV1| s + 1,
        |_: &u32| false,
    );
    let err = SearchAgent::default()
        .run(&problem, &Strategy::iterative_deepening())
        .unwrap_err();
    let AgentError::ProblemPanicked { stage, stats } = err else {
        panic!("expected ProblemPanicked, got {err:?}");
    };
    assert_eq!(stage, CallbackStageV1::Actions);

    // Limits 0..=2 expand 0 + 1 + 2 nodes; the panic hits the third
    // expansion of limit 3, which is still counted.
    assert_eq!(stats.instrumentation.nodes_expanded(), 6);
    assert_eq!(stats.passes.len(), 4);
    assert_eq!(stats.passes[3].outcome, OutcomeKindV1::Panicked);
    assert_eq!(stats.passes[3].nodes_expanded, 3);
}
