//! Tests for the solver step loop, forced collapses and attempt lifecycle

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use sockettile::algorithm::cancellation::CancellationToken;
    use sockettile::algorithm::connections::{ConnectionRules, ConnectionTable};
    use sockettile::algorithm::propagation::is_arc_consistent;
    use sockettile::spatial::tiles::{SocketLabel, TileCatalog, sockets};
    use sockettile::{ConfigurationError, GenerationError, SolveState, Solver};

    fn rules(entries: &[(&str, &[&str])]) -> ConnectionRules {
        entries
            .iter()
            .map(|(socket, targets)| {
                (
                    SocketLabel::from(*socket),
                    targets.iter().map(|t| SocketLabel::from(*t)).collect(),
                )
            })
            .collect()
    }

    /// Every combination of "0"/"1" sides; always solvable
    fn mask_solver(width: usize, height: usize, seed: u64) -> Solver {
        let catalog = TileCatalog::new(
            (0..16_usize)
                .map(|mask| {
                    std::array::from_fn(|side| {
                        SocketLabel::from(if mask >> side & 1 == 1 { "1" } else { "0" })
                    })
                })
                .collect(),
        );
        let table =
            ConnectionTable::new(&rules(&[("0", &["0"]), ("1", &["1"])]), &catalog).unwrap();
        Solver::new(catalog, table, width, height, seed).unwrap()
    }

    /// Two uniform variants whose sockets accept nothing
    fn hostile_solver(seed: u64) -> Solver {
        let catalog = TileCatalog::new(vec![
            sockets(["a", "a", "a", "a"]),
            sockets(["b", "b", "b", "b"]),
        ]);
        let table = ConnectionTable::new(&rules(&[("a", &[]), ("b", &[])]), &catalog).unwrap();
        Solver::new(catalog, table, 1, 2, seed).unwrap()
    }

    fn single_catalog() -> (TileCatalog, ConnectionTable) {
        let catalog = TileCatalog::new(vec![sockets(["a", "a", "a", "a"])]);
        let table = ConnectionTable::new(&rules(&[("a", &["a"])]), &catalog).unwrap();
        (catalog, table)
    }

    #[test]
    fn test_zero_dimensions_are_rejected() {
        let (catalog, table) = single_catalog();
        let error = Solver::new(catalog, table, 0, 3, 1).unwrap_err();

        assert!(matches!(
            error,
            GenerationError::Configuration(ConfigurationError::InvalidDimensions {
                width: 0,
                height: 3
            })
        ));
    }

    // Verified by multiplying the dimensions unchecked
    #[test]
    fn test_overflowing_dimensions_are_rejected() {
        let (catalog, table) = single_catalog();
        let error = Solver::new(catalog, table, usize::MAX, 2, 0).unwrap_err();

        assert!(matches!(
            error,
            GenerationError::Configuration(ConfigurationError::InvalidDimensions {
                width: usize::MAX,
                height: 2
            })
        ));
    }

    #[test]
    fn test_empty_catalog_is_rejected() {
        let (_, table) = single_catalog();
        let error = Solver::new(TileCatalog::new(Vec::new()), table, 2, 2, 1).unwrap_err();

        assert!(matches!(
            error,
            GenerationError::Configuration(ConfigurationError::EmptyCatalog)
        ));
    }

    // A single-variant catalog is solved on the first step
    #[test]
    fn test_single_variant_solves_immediately() {
        let (catalog, table) = single_catalog();
        let mut solver = Solver::new(catalog, table, 3, 3, 1).unwrap();

        let outcome = solver.step_once();
        assert_eq!(outcome.state, SolveState::Solved);
        assert_eq!(outcome.collapsed, None);
        assert_eq!(solver.collapse_count(), 0);
        assert_eq!(outcome.snapshot.dim(), (3, 3));
    }

    // Each running step collapses one cell and leaves the grid arc consistent
    #[test]
    fn test_step_once_collapses_one_cell() {
        let mut solver = mask_solver(4, 4, 9);

        let outcome = solver.step_once();
        assert_eq!(outcome.state, SolveState::Running);
        let (cell, variant) = outcome.collapsed.unwrap();
        assert_eq!(solver.grid().candidates(cell), vec![variant]);
        assert_eq!(solver.collapse_count(), 1);
        assert!(is_arc_consistent(solver.grid(), solver.rules()));

        let (x, y) = solver.grid().coordinates(cell);
        assert_eq!(outcome.snapshot[[y, x]], vec![variant]);
    }

    // Verified by letting step mutate the grid after a terminal state
    #[test]
    fn test_terminal_step_is_idempotent() {
        let mut solver = mask_solver(3, 3, 4);
        let state = solver
            .solve_to_completion(&CancellationToken::new())
            .unwrap();
        assert_eq!(state, SolveState::Solved);

        let before = solver.grid().snapshot();
        let collapses = solver.collapse_count();
        for _ in 0..3 {
            let outcome = solver.step_once();
            assert_eq!(outcome.state, SolveState::Solved);
            assert_eq!(outcome.collapsed, None);
            assert_eq!(outcome.snapshot, before);
        }
        assert_eq!(solver.collapse_count(), collapses);
    }

    // Exclusions only grow during an attempt and collapses never exceed cells
    #[test]
    fn test_exclusions_are_monotonic() {
        let mut solver = mask_solver(5, 4, 21);
        let mut previous: Vec<usize> = (0..solver.grid().cell_count())
            .map(|cell| solver.grid().entropy(cell))
            .collect();

        while !solver.state().is_terminal() {
            solver.step_once();
            let current: Vec<usize> = (0..solver.grid().cell_count())
                .map(|cell| solver.grid().entropy(cell))
                .collect();
            assert!(current.iter().zip(&previous).all(|(now, before)| now <= before));
            previous = current;
        }

        assert_eq!(solver.state(), SolveState::Solved);
        assert!(solver.collapse_count() <= solver.grid().cell_count());
    }

    #[test]
    fn test_same_seed_same_result() {
        let token = CancellationToken::new();
        let mut first = mask_solver(8, 6, 1234);
        let mut second = mask_solver(8, 6, 1234);

        first.solve_to_completion(&token).unwrap();
        second.solve_to_completion(&token).unwrap();

        assert_eq!(first.decided_tiles(), second.decided_tiles());
        assert!(first.decided_tiles().is_some());
    }

    #[test]
    fn test_with_rng_matches_seed() {
        let token = CancellationToken::new();
        let mut seeded = mask_solver(6, 6, 77);
        let (catalog, table) = (seeded.catalog().clone(), seeded.connections().clone());
        let mut explicit =
            Solver::with_rng(catalog, table, 6, 6, StdRng::seed_from_u64(77)).unwrap();

        seeded.solve_to_completion(&token).unwrap();
        explicit.solve_to_completion(&token).unwrap();
        assert_eq!(seeded.decided_tiles(), explicit.decided_tiles());
    }

    // Solved tiles agree on every shared edge
    #[test]
    fn test_solution_respects_sockets() {
        let mut solver = mask_solver(7, 5, 3);
        solver
            .solve_to_completion(&CancellationToken::new())
            .unwrap();
        let tiles = solver.decided_tiles().unwrap();

        for ((y, x), &variant) in tiles.indexed_iter() {
            if let Some(&east) = tiles.get((y, x + 1)) {
                // East side is bit 1, west side is bit 3
                assert_eq!(variant >> 1 & 1, east >> 3 & 1);
            }
            if let Some(&south) = tiles.get((y + 1, x)) {
                // South side is bit 2, north side is bit 0
                assert_eq!(variant >> 2 & 1, south & 1);
            }
        }
    }

    // Mutually hostile sockets contradict at the neighbor for any seed
    #[test]
    fn test_forced_collapse_contradiction() {
        for seed in 0..8 {
            for variant in 0..2 {
                let mut solver = hostile_solver(seed);
                let state = solver.collapse_cell(0, variant).unwrap();
                assert_eq!(state, SolveState::Contradiction { cell: 1 });
                assert_eq!(solver.decided_tiles(), None);
            }
        }
    }

    #[test]
    fn test_collapse_cell_rejects_bad_indices() {
        let mut solver = mask_solver(2, 2, 1);

        assert!(matches!(
            solver.collapse_cell(4, 0),
            Err(GenerationError::InvalidCell {
                index: 4,
                cell_count: 4
            })
        ));
        assert!(matches!(
            solver.collapse_cell(0, 16),
            Err(GenerationError::InvalidTileIndex {
                index: 16,
                max_tiles: 16
            })
        ));
        assert_eq!(solver.state(), SolveState::Running);
    }

    // Forcing a variant the cell no longer allows empties that cell
    #[test]
    fn test_forcing_excluded_variant() {
        let mut solver = mask_solver(2, 1, 1);
        // Cell 0 east side "1" forces cell 1 west side "1"
        solver.collapse_cell(0, 0b0010).unwrap();
        let state = solver.collapse_cell(1, 0).unwrap();

        assert_eq!(state, SolveState::Contradiction { cell: 1 });
        assert_eq!(solver.grid().entropy(1), 0);

        // Terminal attempts ignore further forced collapses
        assert_eq!(
            solver.collapse_cell(0, 0).unwrap(),
            SolveState::Contradiction { cell: 1 }
        );
    }

    // Verified by leaving the state untouched in reset
    #[test]
    fn test_reset_starts_new_attempt() {
        let mut solver = hostile_solver(2);
        assert_eq!(solver.attempt(), 1);
        solver.collapse_cell(0, 0).unwrap();

        solver.reset();
        assert_eq!(solver.attempt(), 2);
        assert_eq!(solver.state(), SolveState::Running);
        assert_eq!(solver.collapse_count(), 0);
        assert_eq!(solver.grid().entropy(0), 2);
        assert_eq!(solver.grid().entropy(1), 2);
    }

    #[test]
    fn test_cancelled_solve_resets() {
        let mut solver = mask_solver(4, 4, 8);
        solver.step_once();
        let token = CancellationToken::new();
        token.cancel();

        let result = solver.solve_to_completion(&token);
        assert!(matches!(result, Err(GenerationError::Cancelled)));
        assert_eq!(solver.state(), SolveState::Running);
        assert_eq!(solver.collapse_count(), 0);
        assert_eq!(solver.attempt(), 2);
        assert_eq!(solver.grid().entropy(0), 16);
    }

    // Sockets that only face the other label force a checkerboard
    // Verified by intersecting with the exposed sockets instead of their allowed union
    #[test]
    fn test_cross_relation_solves_consistently() {
        let catalog = TileCatalog::new(vec![
            sockets(["A", "A", "A", "A"]),
            sockets(["B", "B", "B", "B"]),
        ]);
        let table =
            ConnectionTable::new(&rules(&[("A", &["B"]), ("B", &["A"])]), &catalog).unwrap();

        for seed in 0..6 {
            let mut solver = Solver::new(catalog.clone(), table.clone(), 5, 4, seed).unwrap();
            while !solver.state().is_terminal() {
                solver.step_once();
                assert!(is_arc_consistent(solver.grid(), solver.rules()));
            }
            assert_eq!(solver.state(), SolveState::Solved);
            assert_eq!(solver.collapse_count(), 1);

            let tiles = solver.decided_tiles().unwrap();
            for ((y, x), &variant) in tiles.indexed_iter() {
                assert_eq!(variant, (x + y + tiles[[0, 0]]) % 2);
            }
        }
    }

    #[test]
    fn test_solver_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<Solver>();
    }
}
