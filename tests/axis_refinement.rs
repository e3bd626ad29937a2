use quantpde::axis;
use quantpde::config::BASE_SPOT_TICKS;
use quantpde::grid::{Axis, NewTickBetweenEachPair, RectilinearGrid1};

#[test]
fn refinement_scenario_from_three_ticks() {
    let axis = axis![0, 10, 20];
    let once = axis.refine();
    assert_eq!(once.size(), 5);
    assert_eq!(once.to_string(), "(0 5 10 15 20)");

    let twice = once.refine();
    assert_eq!(twice.size(), 9);
    assert_eq!(twice.to_string(), "(0 2.5 5 7.5 10 12.5 15 17.5 20)");
}

#[test]
fn base_grid_refinements_keep_every_coarser_tick() {
    let base = Axis::new(BASE_SPOT_TICKS);
    let mut previous = base.clone();
    for level in 1..=4 {
        let refined = base.refine_times(level);
        assert_eq!(refined.size(), (1 << level) * (base.size() - 1) + 1);
        assert!(refined.is_strictly_increasing());
        for (i, &tick) in previous.iter().enumerate() {
            assert_eq!(refined[2 * i].to_bits(), tick.to_bits());
        }
        previous = refined;
    }
}

#[test]
fn midpoints_sit_between_their_neighbours() {
    let axis = Axis::new(BASE_SPOT_TICKS).refine();
    for i in (1..axis.size()).step_by(2) {
        assert_eq!(axis[i], (axis[i - 1] + axis[i + 1]) / 2.0);
        assert!(axis[i - 1] < axis[i] && axis[i] < axis[i + 1]);
    }
}

#[test]
fn grid_refinement_goes_through_policy() {
    let grid =
        RectilinearGrid1::new(Axis::new(BASE_SPOT_TICKS)).refined(&NewTickBetweenEachPair, 2);
    assert_eq!(grid.axis(), &Axis::new(BASE_SPOT_TICKS).refine_times(2));
}

#[test]
fn buffer_copy_matches_list_construction() {
    let buffer: Vec<f64> = BASE_SPOT_TICKS.to_vec();
    let from_buffer = Axis::from_slice(&buffer);
    assert_eq!(from_buffer, Axis::new(buffer.clone()));
    drop(buffer);
    assert_eq!(from_buffer.size(), BASE_SPOT_TICKS.len());
}

#[test]
fn copies_are_isolated_after_refinement() {
    let original = axis![1, 2, 3];
    let mut copy = original.clone();
    copy[2] = 4.0;
    assert_eq!(original.to_string(), "(1 2 3)");
    assert_eq!(copy.refine().to_string(), "(1 1.5 2 3 4)");
}
