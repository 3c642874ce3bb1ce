//! Tests for minimum-entropy cell selection and seeded random choices

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use sockettile::algorithm::selection::{
        RandomSelector, Selection, choose_variant, lowest_entropy_cells, select_cell,
    };
    use sockettile::algorithm::superposition::SuperpositionGrid;

    // Tests the same seed yields the same sequence of choices
    // Verified by seeding from entropy instead of the given seed
    #[test]
    fn test_seeded_choices_repeat() {
        let items: Vec<usize> = (0..50).collect();
        let mut first = RandomSelector::new(7);
        let mut second = RandomSelector::from_rng(StdRng::seed_from_u64(7));

        for _ in 0..100 {
            assert_eq!(first.choose(&items), second.choose(&items));
        }
    }

    #[test]
    fn test_choose_from_empty_slice() {
        let mut selector = RandomSelector::new(0);
        let empty: [usize; 0] = [];

        assert_eq!(selector.choose(&empty), None);
        assert_eq!(selector.choose(&[9]), Some(9));
    }

    // Every element is reachable, not just the first or last
    #[test]
    fn test_choose_covers_all_items() {
        let mut selector = RandomSelector::new(3);
        let mut seen = [false; 4];
        for _ in 0..200 {
            if let Some(item) = selector.choose(&[0_usize, 1, 2, 3]) {
                seen[item] = true;
            }
        }
        assert!(seen.iter().all(|&hit| hit));
    }

    // Decided cells are skipped and ties keep index order
    // Verified by including entropy-1 cells in the candidate list
    #[test]
    fn test_lowest_entropy_ties() {
        let mut grid = SuperpositionGrid::new(3, 2, 4);
        grid.exclude_all_except(0, 1);
        grid.exclude(2, 0);
        grid.exclude(2, 1);
        grid.exclude(4, 3);
        grid.exclude(5, 0);
        grid.exclude(5, 2);

        // Entropies: [1, 4, 2, 4, 3, 2]
        assert_eq!(lowest_entropy_cells(&grid), Ok(vec![2, 5]));
    }

    #[test]
    fn test_zero_entropy_is_reported() {
        let mut grid = SuperpositionGrid::new(3, 1, 2);
        grid.exclude(2, 0);
        grid.exclude(2, 1);

        assert_eq!(lowest_entropy_cells(&grid), Err(2));
        let mut selector = RandomSelector::new(1);
        assert_eq!(
            select_cell(&grid, &mut selector),
            Selection::Contradiction { cell: 2 }
        );
    }

    #[test]
    fn test_all_decided_is_solved() {
        let mut grid = SuperpositionGrid::new(2, 2, 3);
        for cell in 0..4 {
            grid.exclude_all_except(cell, cell % 3);
        }
        let mut selector = RandomSelector::new(1);

        assert_eq!(lowest_entropy_cells(&grid), Ok(vec![]));
        assert_eq!(select_cell(&grid, &mut selector), Selection::Solved);
    }

    // A single-variant catalog is solved before any collapse
    #[test]
    fn test_single_variant_grid_is_solved() {
        let grid = SuperpositionGrid::new(4, 4, 1);
        let mut selector = RandomSelector::new(5);
        assert_eq!(select_cell(&grid, &mut selector), Selection::Solved);
    }

    #[test]
    fn test_select_cell_picks_among_ties() {
        let mut grid = SuperpositionGrid::new(4, 1, 3);
        grid.exclude(1, 0);
        grid.exclude(3, 2);
        let mut selector = RandomSelector::new(11);

        for _ in 0..20 {
            let selection = select_cell(&grid, &mut selector);
            assert!(
                selection == Selection::Cell(1) || selection == Selection::Cell(3),
                "unexpected selection {selection:?}"
            );
        }
    }

    #[test]
    fn test_choose_variant_uses_candidates() {
        let mut grid = SuperpositionGrid::new(1, 1, 5);
        grid.exclude(0, 0);
        grid.exclude(0, 2);
        grid.exclude(0, 4);
        let mut selector = RandomSelector::new(2);

        for _ in 0..20 {
            let variant = choose_variant(&grid, 0, &mut selector);
            assert!(matches!(variant, Some(1 | 3)));
        }

        grid.exclude(0, 1);
        grid.exclude(0, 3);
        assert_eq!(choose_variant(&grid, 0, &mut selector), None);
    }
}
