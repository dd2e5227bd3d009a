//! Concurrent flood fill.
//!
//! A single coordinator thread owns the visited marks and the count of
//! outstanding exploration tasks. A fixed pool of workers runs the tasks:
//! each recolors one cell, reports the neighbors that still carry the
//! original color, then signals completion. The coordinator decides which
//! discoveries become new tasks, so no cell is ever scheduled twice and the
//! grid itself needs no lock.
//!
//! ```text
//!              work (GridPoint)
//!  coordinator ───────────────────▶ worker 0..N
//!      ▲  ▲                             │   │
//!      │  └──── discoveries (bounded) ──┘   │
//!      └──────── completions ───────────────┘
//! ```

use crate::error::{FloodError, Result};
use crate::grid::{Grid, GridPoint, Neighbor};
use crossbeam_channel::{Receiver, Sender, bounded, select, unbounded};
use std::thread;
use std::time::{Duration, Instant};

/// A single task can discover at most this many neighbors
const MAX_FAN_OUT: usize = 4;

/// Parameters controlling how a fill is spread across threads
#[derive(Debug, Clone)]
pub struct FillParameters {
    /// Number of worker threads exploring cells
    pub num_workers: usize,
    /// Capacity of the discoveries channel, never less than the per-task fan-out
    pub discovery_capacity: usize,
}

impl Default for FillParameters {
    fn default() -> Self {
        let num_workers = thread::available_parallelism().map_or(1, |n| n.get());
        FillParameters::with_workers(num_workers)
    }
}

impl FillParameters {
    pub fn with_workers(num_workers: usize) -> Self {
        FillParameters {
            num_workers,
            discovery_capacity: MAX_FAN_OUT * num_workers.max(1),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.num_workers == 0 {
            return Err(FloodError::InvalidParameters(
                "num_workers must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Summary of one fill
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillStats {
    pub seed: GridPoint,
    pub original_color: u8,
    pub target_color: u8,
    /// Cells recolored, which is also the number of tasks launched
    pub cells_filled: usize,
    /// Discoveries dropped because the cell was already scheduled
    pub duplicates_dropped: usize,
    pub workers: usize,
    pub elapsed: Duration,
}

/// Per-fill visited marks, owned by the coordinator
struct VisitedMarks {
    width: usize,
    marks: Vec<bool>,
}

impl VisitedMarks {
    fn new(width: usize, height: usize) -> Self {
        VisitedMarks {
            width,
            marks: vec![false; width * height],
        }
    }

    /// Mark `point`, returning whether it was unvisited before
    fn mark(&mut self, point: GridPoint) -> bool {
        let slot = &mut self.marks[point.y * self.width + point.x];
        !std::mem::replace(slot, true)
    }
}

/// Recolor one cell and report the neighbors that still hold `original`.
///
/// Every task writes before it reads, so a neighbor already painted by
/// another task never matches `original` and the fill cannot re-expand into
/// finished territory. Already-scheduled cells may still be reported; the
/// coordinator filters them.
fn explore_one(
    grid: &Grid,
    point: GridPoint,
    target: u8,
    original: u8,
    discovered: &Sender<Neighbor>,
) -> Result<()> {
    grid.paint(point, target)?;

    for neighbor in grid.neighbors(point.x, point.y)? {
        if neighbor.color == original {
            discovered
                .send(neighbor)
                .map_err(|_| FloodError::WorkerDisconnected)?;
        }
    }

    Ok(())
}

fn worker_loop(
    worker_id: usize,
    grid: &Grid,
    target: u8,
    original: u8,
    work: Receiver<GridPoint>,
    discovered: Sender<Neighbor>,
    done: Sender<Result<()>>,
) {
    let mut explored = 0usize;
    for point in work.iter() {
        let outcome = explore_one(grid, point, target, original, &discovered);
        explored += 1;
        if done.send(outcome).is_err() {
            break;
        }
    }
    log::trace!("Worker {} explored {} cells", worker_id, explored);
}

/// Coordinator-side state for one fill
struct Coordinator<'a> {
    grid: &'a Grid,
    original: u8,
    visited: VisitedMarks,
    outstanding: usize,
    failure: Option<FloodError>,
    work: Sender<GridPoint>,
    stats: &'a mut FillStats,
}

impl Coordinator<'_> {
    fn launch(&mut self, point: GridPoint) -> Result<()> {
        // An unvisited cell has never been painted, so it must still hold the original color.
        debug_assert_eq!(
            self.grid.get(point.x, point.y),
            Some(self.original),
            "cell {point:?} scheduled after it was recolored"
        );
        self.work
            .send(point)
            .map_err(|_| FloodError::WorkerDisconnected)?;
        self.outstanding += 1;
        self.stats.cells_filled += 1;
        Ok(())
    }

    fn on_discovery(&mut self, neighbor: Neighbor) -> Result<()> {
        if self.failure.is_some() || !self.visited.mark(neighbor.point) {
            self.stats.duplicates_dropped += 1;
            return Ok(());
        }
        self.launch(neighbor.point)
    }

    fn on_done(&mut self, outcome: Result<()>) {
        self.outstanding -= 1;
        if let Err(e) = outcome {
            log::error!("Exploration task failed: {}", e);
            self.failure.get_or_insert(e);
        }
    }

    /// Run until quiescence: nothing outstanding and no discovery left to drain
    fn run(
        &mut self,
        seed: GridPoint,
        discovered: &Receiver<Neighbor>,
        done: &Receiver<Result<()>>,
    ) -> Result<()> {
        self.visited.mark(seed);
        self.launch(seed)?;

        loop {
            if self.outstanding == 0 {
                // Tasks send their discoveries before completing, so anything
                // still pending is already buffered.
                match discovered.try_recv() {
                    Ok(neighbor) => {
                        self.on_discovery(neighbor)?;
                        continue;
                    }
                    Err(_) => break,
                }
            }

            // Safe to wait: with work outstanding a completion is guaranteed to arrive.
            select! {
                recv(discovered) -> msg => {
                    let neighbor = msg.map_err(|_| FloodError::WorkerDisconnected)?;
                    self.on_discovery(neighbor)?;
                }
                recv(done) -> msg => {
                    let outcome = msg.map_err(|_| FloodError::WorkerDisconnected)?;
                    self.on_done(outcome);
                }
            }
        }

        match self.failure.take() {
            Some(e) => Err(FloodError::TaskFailed(e.to_string())),
            None => Ok(()),
        }
    }
}

/// Flood fill driver
#[derive(Debug, Clone, Default)]
pub struct FloodFill {
    pub params: FillParameters,
}

impl FloodFill {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_params(params: FillParameters) -> Self {
        FloodFill { params }
    }

    /// Recolor the 4-connected region containing (x, y) to `target`.
    ///
    /// Fails with `OutOfBounds` before touching the grid if the seed is off
    /// the grid. Filling a region with its own color is a no-op.
    pub fn run(&self, grid: &mut Grid, x: usize, y: usize, target: u8) -> Result<FillStats> {
        self.params.validate()?;
        let start = Instant::now();

        let seed = GridPoint::new(x, y);
        let original = grid.color_at(x, y)?;
        let workers = self.params.num_workers;

        let mut stats = FillStats {
            seed,
            original_color: original,
            target_color: target,
            cells_filled: 0,
            duplicates_dropped: 0,
            workers,
            elapsed: Duration::ZERO,
        };

        if original == target {
            log::debug!(
                "Seed ({}, {}) already holds {:?}, nothing to fill",
                x,
                y,
                target as char
            );
            stats.elapsed = start.elapsed();
            return Ok(stats);
        }

        log::debug!(
            "Filling from ({}, {}): {:?} -> {:?} with {} workers",
            x,
            y,
            original as char,
            target as char,
            workers
        );

        let grid: &Grid = grid;
        let capacity = self.params.discovery_capacity.max(MAX_FAN_OUT);

        let result = thread::scope(|scope| {
            let (work_tx, work_rx) = unbounded::<GridPoint>();
            let (discovered_tx, discovered_rx) = bounded::<Neighbor>(capacity);
            let (done_tx, done_rx) = unbounded::<Result<()>>();

            for worker_id in 0..workers {
                let work_rx = work_rx.clone();
                let discovered_tx = discovered_tx.clone();
                let done_tx = done_tx.clone();

                let spawned = thread::Builder::new()
                    .name(format!("flood-worker-{}", worker_id))
                    .spawn_scoped(scope, move || {
                        worker_loop(
                            worker_id,
                            grid,
                            target,
                            original,
                            work_rx,
                            discovered_tx,
                            done_tx,
                        )
                    });

                // Returning drops `work_tx`, which lets already spawned workers exit.
                if let Err(e) = spawned {
                    return Err(FloodError::WorkerSpawn(format!("worker {}: {}", worker_id, e)));
                }
            }

            // Only workers hold senders now, so a dead pool shows up as a disconnect.
            drop(discovered_tx);
            drop(done_tx);

            let mut coordinator = Coordinator {
                grid,
                original,
                visited: VisitedMarks::new(grid.width(), grid.height()),
                outstanding: 0,
                failure: None,
                work: work_tx,
                stats: &mut stats,
            };
            coordinator.run(seed, &discovered_rx, &done_rx)
        });

        stats.elapsed = start.elapsed();
        result?;

        log::info!(
            "Flood fill complete: {} cells recolored, {} duplicate discoveries dropped in {:?}",
            stats.cells_filled,
            stats.duplicates_dropped,
            stats.elapsed
        );

        Ok(stats)
    }
}

/// Fill from (x, y) with default parameters
pub fn fill(grid: &mut Grid, x: usize, y: usize, target: u8) -> Result<FillStats> {
    FloodFill::new().run(grid, x, y, target)
}
