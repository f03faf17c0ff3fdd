//! Unit tests for vn-path.

#[cfg(test)]
mod element {
    use vn_core::{Cell, Vec3};

    use crate::PathElement;

    #[test]
    fn cell_elements_occupied_by_feet_cell() {
        let e = PathElement::Travel(Cell::new(3, 64, -2));
        assert!(e.occupied_by(Vec3::new(3.9, 64.0, -1.1)));
        assert!(!e.occupied_by(Vec3::new(3.5, 65.0, -1.5)));
        assert_eq!(PathElement::Jump(Cell::new(1, 2, 3)).destination(), Cell::new(1, 2, 3));
    }

    #[test]
    fn travel_vector_occupied_along_segment() {
        let e = PathElement::TravelVector { from: Cell::new(0, 64, 0), to: Cell::new(6, 64, 0) };
        assert_eq!(e.destination(), Cell::new(6, 64, 0));
        assert!(e.occupied_by(Vec3::new(3.2, 64.0, 0.8)));
        assert!(!e.occupied_by(Vec3::new(3.2, 64.0, 1.2)));
        assert!(!e.occupied_by(Vec3::new(3.2, 65.0, 0.5)));
        assert!(!e.occupied_by(Vec3::new(-1.0, 64.0, 0.5)));
    }

    #[test]
    fn display() {
        let e = PathElement::Fall(Cell::new(1, 2, 3));
        assert_eq!(e.to_string(), "fall (1, 2, 3)");
    }
}

#[cfg(test)]
mod convert {
    use vn_core::Cell;
    use vn_search::PathNode;

    use crate::{convert, PathElement};

    fn node(x: i32, y: i32, jump: bool, fall: bool) -> PathNode {
        PathNode { cell: Cell::new(x, y, 0), g: 0, is_jump: jump, is_fall: fall }
    }

    #[test]
    fn flags_map_to_variants() {
        let out = convert(&[node(0, 64, false, false), node(0, 65, true, false), node(1, 65, false, false)]);
        assert_eq!(
            out,
            vec![
                PathElement::Travel(Cell::new(0, 64, 0)),
                PathElement::Jump(Cell::new(0, 65, 0)),
                PathElement::Travel(Cell::new(1, 65, 0)),
            ]
        );
    }

    #[test]
    fn landing_after_fall_is_skipped() {
        let out = convert(&[
            node(0, 65, false, false),
            node(1, 65, false, true),
            node(1, 64, false, false),
            node(2, 64, false, false),
        ]);
        assert_eq!(
            out,
            vec![
                PathElement::Travel(Cell::new(0, 65, 0)),
                PathElement::Fall(Cell::new(1, 65, 0)),
                PathElement::Travel(Cell::new(2, 64, 0)),
            ]
        );
    }

    #[test]
    fn final_landing_is_kept() {
        let out = convert(&[node(0, 65, false, false), node(1, 65, false, true), node(1, 64, false, false)]);
        assert_eq!(out.len(), 3);
        assert_eq!(out[2], PathElement::Travel(Cell::new(1, 64, 0)));
    }
}

#[cfg(test)]
mod passes {
    use vn_core::Cell;

    use crate::{CollinearTravelPass, FallColumnPass, JumpStepPass, Pass, PathElement};
    use PathElement::{Fall, Jump, Travel, TravelVector};

    fn c(x: i32, y: i32, z: i32) -> Cell {
        Cell::new(x, y, z)
    }

    fn twice(pass: &dyn Pass, input: Vec<PathElement>) -> Vec<PathElement> {
        let once = pass.apply(input);
        let again = pass.apply(once.clone());
        assert_eq!(once, again, "{} is not idempotent", pass.name());
        once
    }

    #[test]
    fn collinear_runs_become_vectors() {
        let input = vec![
            Travel(c(0, 64, 0)),
            Travel(c(1, 64, 0)),
            Travel(c(2, 64, 0)),
            Travel(c(3, 64, 0)),
            Travel(c(4, 64, 1)),
            Travel(c(5, 64, 2)),
            Travel(c(6, 64, 3)),
        ];
        let out = twice(&CollinearTravelPass, input);
        assert_eq!(
            out,
            vec![
                TravelVector { from: c(0, 64, 0), to: c(3, 64, 0) },
                TravelVector { from: c(4, 64, 1), to: c(6, 64, 3) },
            ]
        );
    }

    #[test]
    fn short_runs_and_non_travel_untouched() {
        let input = vec![
            Travel(c(0, 64, 0)),
            Travel(c(1, 64, 0)),
            Jump(c(1, 65, 0)),
            Travel(c(2, 65, 0)),
            Travel(c(3, 65, 1)),
        ];
        let out = twice(&CollinearTravelPass, input.clone());
        assert_eq!(out, input);
    }

    #[test]
    fn vertical_travel_never_merges() {
        let input = vec![Travel(c(0, 64, 0)), Travel(c(0, 63, 0)), Travel(c(0, 62, 0))];
        let out = twice(&CollinearTravelPass, input.clone());
        assert_eq!(out, input);
    }

    #[test]
    fn fall_column_drops_cells_below() {
        let input = vec![
            Travel(c(0, 66, 0)),
            Fall(c(1, 66, 0)),
            Fall(c(1, 64, 0)),
            Travel(c(2, 63, 0)),
        ];
        let out = twice(&FallColumnPass, input);
        assert_eq!(out, vec![Travel(c(0, 66, 0)), Fall(c(1, 66, 0)), Travel(c(2, 63, 0))]);
    }

    #[test]
    fn fall_column_keeps_last() {
        let input = vec![Travel(c(0, 66, 0)), Fall(c(1, 66, 0)), Travel(c(1, 64, 0))];
        let out = twice(&FallColumnPass, input.clone());
        assert_eq!(out, input);
    }

    #[test]
    fn jump_retargets_to_step() {
        let input = vec![Travel(c(0, 64, 0)), Jump(c(0, 65, 0)), Travel(c(1, 65, 0)), Travel(c(2, 65, 1))];
        let out = twice(&JumpStepPass, input);
        assert_eq!(out, vec![Travel(c(0, 64, 0)), Jump(c(1, 65, 0)), Travel(c(2, 65, 1))]);
    }

    #[test]
    fn jump_before_vector_keeps_vector() {
        let tv = TravelVector { from: c(1, 65, 0), to: c(5, 65, 0) };
        let input = vec![Travel(c(0, 64, 0)), Jump(c(0, 65, 0)), tv];
        let out = twice(&JumpStepPass, input);
        assert_eq!(out, vec![Travel(c(0, 64, 0)), Jump(c(1, 65, 0)), tv]);
    }

    #[test]
    fn staircase_chains_jumps() {
        let input = vec![
            Travel(c(0, 64, 0)),
            Jump(c(0, 65, 0)),
            Travel(c(1, 65, 0)),
            Jump(c(1, 66, 0)),
            Travel(c(2, 66, 0)),
        ];
        let out = twice(&JumpStepPass, input);
        assert_eq!(out, vec![Travel(c(0, 64, 0)), Jump(c(1, 65, 0)), Jump(c(2, 66, 0))]);
    }

    #[test]
    fn lone_jump_is_kept() {
        let input = vec![Travel(c(0, 64, 0)), Jump(c(0, 65, 0))];
        let out = twice(&JumpStepPass, input.clone());
        assert_eq!(out, input);
    }
}

#[cfg(test)]
mod pipeline {
    use vn_core::Cell;
    use vn_search::{BoundedAStar, Pathfinder};
    use vn_world::{GridWorld, GridWorldBuilder, ProbeWorld};

    use crate::{PathElement, Simplifier};

    #[test]
    fn straight_search_collapses_to_one_vector() {
        let start = Cell::new(0, 64, 0);
        let w = ProbeWorld::new(GridWorld::flat(63), start.center());
        let out = BoundedAStar::default().find_path(&w, start, Cell::new(12, 64, 0), 1_000).unwrap();
        let elems = Simplifier::standard().simplify(&out.path);
        assert_eq!(
            elems,
            vec![PathElement::TravelVector { from: start, to: out.end().unwrap() }]
        );
    }

    #[test]
    fn step_climb_yields_jump_onto_step() {
        let start = Cell::new(0, 64, 0);
        let grid = GridWorldBuilder::new()
            .ground(63)
            .fill(Cell::new(5, 64, -3), Cell::new(12, 64, 3))
            .build();
        let w = ProbeWorld::new(grid, start.center());
        let out = BoundedAStar::default().find_path(&w, start, Cell::new(10, 65, 0), 5_000).unwrap();
        let elems = Simplifier::standard().simplify(&out.path);
        let jump = elems
            .iter()
            .find_map(|e| match e {
                PathElement::Jump(c) => Some(*c),
                _ => None,
            })
            .unwrap();
        // The jump lands on top of the step, not in the air above the approach.
        assert_eq!(jump.y, 65);
        assert!(jump.x >= 5);
    }

    #[test]
    fn empty_pipeline_only_converts() {
        let start = Cell::new(0, 64, 0);
        let w = ProbeWorld::new(GridWorld::flat(63), start.center());
        let out = BoundedAStar::default().find_path(&w, start, Cell::new(6, 64, 0), 1_000).unwrap();
        let elems = Simplifier::empty().simplify(&out.path);
        assert_eq!(elems.len(), out.path.len());
        assert!(elems.iter().all(PathElement::is_travel));
    }
}

#[cfg(test)]
mod properties {
    use proptest::prelude::*;

    use vn_core::Cell;
    use vn_search::{BoundedAStar, Pathfinder};
    use vn_world::{GridWorldBuilder, ProbeWorld};

    use crate::Simplifier;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn pipeline_is_idempotent_on_search_output(
            blocks in prop::collection::vec((-10i32..10, -10i32..10, 0i32..3, 1i32..3), 0..60),
            gx in -14i32..14,
            gz in -14i32..14,
            gy in 63i32..67,
        ) {
            let start = Cell::new(0, 64, 0);
            let mut b = GridWorldBuilder::new().ground(60);
            // Terraced terrain: platforms of varying height over a low floor.
            b = b.fill(Cell::new(-12, 61, -12), Cell::new(12, 63, 12));
            for (x, z, base, h) in blocks {
                if (x, z) != (0, 0) {
                    b = b.column(Cell::new(x, 64 + base - 1, z), h);
                }
            }
            let w = ProbeWorld::new(b.build(), start.center());
            let out = BoundedAStar::default()
                .find_path(&w, start, Cell::new(gx, gy, gz), 3_000)
                .unwrap();
            let simplifier = Simplifier::standard();
            let once = simplifier.simplify(&out.path);
            let twice = simplifier.run(once.clone());
            prop_assert_eq!(once, twice);
        }
    }
}
