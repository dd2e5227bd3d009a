use flood_fill::shapes::{Rect, ScatterParameters, draw_all, scatter_rects};
use flood_fill::{FillParameters, FloodError, FloodFill, Grid, fill};
use rand::prelude::*;
use rand::rngs::StdRng;
use std::collections::VecDeque;

/// Sequential BFS fill used as the reference result
fn reference_fill(grid: &mut Grid, x: usize, y: usize, target: u8) {
    let original = grid.color_at(x, y).unwrap();
    if original == target {
        return;
    }
    let mut queue = VecDeque::from([(x, y)]);
    grid.set_color(x, y, target).unwrap();
    while let Some((cx, cy)) = queue.pop_front() {
        for n in grid.neighbors(cx, cy).unwrap() {
            if n.color == original {
                grid.set_color(n.point.x, n.point.y, target).unwrap();
                queue.push_back((n.point.x, n.point.y));
            }
        }
    }
}

fn noisy_grid(width: usize, height: usize, seed: u64) -> Grid {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut grid = Grid::new(width, height, b'.').unwrap();
    for y in 0..height {
        for x in 0..width {
            if rng.gen_bool(0.35) {
                grid.set_color(x, y, b'#').unwrap();
            }
        }
    }
    grid
}

#[test_log::test]
fn matches_sequential_reference_on_random_grids() {
    for seed in 0..20u64 {
        let grid = noisy_grid(31, 17, seed);
        let (sx, sy) = ((seed as usize * 7) % 31, (seed as usize * 5) % 17);

        let mut expected = grid.clone();
        reference_fill(&mut expected, sx, sy, b'X');

        let mut actual = grid.clone();
        let stats = FloodFill::with_params(FillParameters::with_workers(4))
            .run(&mut actual, sx, sy, b'X')
            .unwrap();

        assert_eq!(actual, expected, "seed {}", seed);
        if grid.get(sx, sy) != Some(b'X') {
            assert_eq!(stats.cells_filled, expected.count(b'X'), "seed {}", seed);
        }
    }
}

#[test_log::test]
fn final_state_is_deterministic_across_runs_and_worker_counts() {
    let base = noisy_grid(64, 48, 7);
    let mut first = base.clone();
    fill(&mut first, 10, 10, b'o').unwrap();

    for workers in [1, 2, 3, 8, 16] {
        for _ in 0..3 {
            let mut again = base.clone();
            FloodFill::with_params(FillParameters::with_workers(workers))
                .run(&mut again, 10, 10, b'o')
                .unwrap();
            assert_eq!(again.snapshot(), first.snapshot(), "{} workers", workers);
        }
    }
}

#[test_log::test]
fn corners_fill_without_leaving_the_grid() {
    let (w, h) = (6, 4);
    for (x, y) in [(0, 0), (w - 1, 0), (0, h - 1), (w - 1, h - 1)] {
        let mut grid = Grid::new(w, h, b'.').unwrap();
        let stats = fill(&mut grid, x, y, b'C').unwrap();
        assert_eq!(grid.count(b'C'), w * h, "corner ({}, {})", x, y);
        assert_eq!(stats.cells_filled, w * h);
    }
}

#[test_log::test]
fn disjoint_region_of_same_color_is_untouched() {
    let mut grid = Grid::from_rows(&[
        "...#...",
        "...#...",
        "...#...",
        "...#...",
    ])
    .unwrap();
    fill(&mut grid, 0, 0, b'X').unwrap();
    assert_eq!(
        grid.render(),
        vec!["XXX#...", "XXX#...", "XXX#...", "XXX#..."]
    );
}

#[test_log::test]
fn other_colors_are_never_altered() {
    let mut grid = Grid::new(20, 20, b'_').unwrap();
    draw_all(
        &mut grid,
        &[
            Rect::new(2..8, 2..8, b'a'),
            Rect::new(12..18, 0..20, b'b'),
        ],
    );
    let before = grid.clone();
    fill(&mut grid, 0, 19, b'G').unwrap();

    for y in 0..20 {
        for x in 0..20 {
            let was = before.get(x, y).unwrap();
            let now = grid.get(x, y).unwrap();
            if was == b'_' && x < 12 {
                assert_eq!(now, b'G', "({}, {})", x, y);
            } else {
                assert_eq!(now, was, "({}, {})", x, y);
            }
        }
    }
}

#[test_log::test]
fn filling_with_own_color_is_idempotent() {
    let mut grid = noisy_grid(12, 12, 3);
    let color = grid.get(5, 5).unwrap();
    let before = grid.clone();
    let stats = fill(&mut grid, 5, 5, color).unwrap();
    assert_eq!(grid, before);
    assert_eq!(stats.cells_filled, 0);
    assert_eq!(stats.duplicates_dropped, 0);
}

#[test_log::test]
fn refilling_a_filled_region_restores_it() {
    let base = noisy_grid(25, 25, 11);
    let mut grid = base.clone();
    let seed = (0..25)
        .flat_map(|y| (0..25).map(move |x| (x, y)))
        .find(|&(x, y)| base.get(x, y) == Some(b'.'))
        .unwrap();

    fill(&mut grid, seed.0, seed.1, b'R').unwrap();
    fill(&mut grid, seed.0, seed.1, b'.').unwrap();
    assert_eq!(grid, base);
}

#[test_log::test]
fn demo_canvas_fills_background_around_shapes() {
    let mut grid = Grid::new(100, 120, b'_').unwrap();
    draw_all(&mut grid, &flood_fill::shapes::demo_shapes());
    let blank = grid.count(b'_');

    let stats = fill(&mut grid, 2, 3, b'G').unwrap();
    assert_eq!(stats.cells_filled, blank);
    assert_eq!(grid.count(b'_'), 0);
    assert_eq!(grid.count(b'\\'), 1600);
}

#[test_log::test]
fn scattered_canvas_matches_reference() {
    let mut grid = Grid::new(80, 60, b' ').unwrap();
    let params = ScatterParameters {
        count: 40,
        seed: 2024,
        ..Default::default()
    };
    draw_all(&mut grid, &scatter_rects(80, 60, &params));

    let seed = (0..60)
        .flat_map(|y| (0..80).map(move |x| (x, y)))
        .find(|&(x, y)| grid.get(x, y) == Some(b' '))
        .unwrap();

    let mut expected = grid.clone();
    reference_fill(&mut expected, seed.0, seed.1, b'~');
    fill(&mut grid, seed.0, seed.1, b'~').unwrap();
    assert_eq!(grid, expected);
}

#[test_log::test]
fn out_of_bounds_seed_is_reported() {
    let mut grid = Grid::new(4, 3, b'.').unwrap();
    let err = fill(&mut grid, 1, 3, b'X').unwrap_err();
    assert_eq!(
        err,
        FloodError::OutOfBounds {
            x: 1,
            y: 3,
            width: 4,
            height: 3
        }
    );
    assert_eq!(grid.count(b'.'), 12);
}
