//! 8-Queens calibration: iterative deepening on the empty 8×8 board must
//! reproduce the reference plan and expansion count exactly.

use fathom_harness::worlds::n_queens::PLACE_QUEEN;
use fathom_search::metrics::{METRIC_DEPTH_ITERATIONS, METRIC_NODES_EXPANDED, METRIC_PATH_COST};
use fathom_search::{ActionV1, OutcomeKindV1};
use lock_tests::{
    calibration_plan, run_calibration, CALIBRATION_COLUMNS, CALIBRATION_NODES_EXPANDED,
};

#[test]
fn plan_has_eight_placements() {
    let run = run_calibration().unwrap();
    assert_eq!(run.actions.len(), 8);
    assert!(run.actions.iter().all(|a| a.name() == PLACE_QUEEN));
}

#[test]
fn plan_places_one_queen_per_row_in_reference_columns() {
    let run = run_calibration().unwrap();
    for (row, action) in run.actions.iter().enumerate() {
        assert_eq!(action.location.x, row);
        assert_eq!(action.location.y, CALIBRATION_COLUMNS[row], "row {row}");
    }
}

#[test]
fn plan_renders_reference_text() {
    let run = run_calibration().unwrap();
    assert_eq!(run.rendered_actions(), calibration_plan());
    assert_eq!(
        run.rendered_actions()[1],
        "Action[name==placeQueenAt, location== ( 1 , 4 ) ]"
    );
}

#[test]
fn nodes_expanded_matches_reference_count() {
    let run = run_calibration().unwrap();
    let instrumentation = run.instrumentation();
    assert_eq!(
        instrumentation.property(METRIC_NODES_EXPANDED).as_deref(),
        Some("3656")
    );
    assert_eq!(instrumentation.nodes_expanded(), CALIBRATION_NODES_EXPANDED);
}

#[test]
fn one_pass_per_depth_up_to_the_board_size() {
    let run = run_calibration().unwrap();
    let instrumentation = run.instrumentation();
    assert_eq!(instrumentation.get(METRIC_DEPTH_ITERATIONS), Some(9));
    assert_eq!(instrumentation.get(METRIC_PATH_COST), Some(8));

    let passes = &run.stats.passes;
    assert_eq!(passes.len(), 9);
    assert!(passes[..8].iter().all(|p| p.outcome == OutcomeKindV1::Cutoff));
    assert_eq!(passes[8].outcome, OutcomeKindV1::Solution);
    assert_eq!(
        passes.iter().map(|p| p.nodes_expanded).sum::<u64>(),
        CALIBRATION_NODES_EXPANDED
    );
}
