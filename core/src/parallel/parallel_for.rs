//! Parallel loops over image tiles.

use crate::geometry::*;
use crate::pbrt::*;
use std::any::Any;
use std::panic;

/// Largest tile edge chosen automatically.
const MAX_TILE_SIZE: Int = 32;

/// Per-worker state for `parallel_for_2d()`.
///
/// Slot `i` belongs to worker `i` for the duration of a loop and is never
/// shared. Slots are filled on the first tile a worker runs and keep their
/// state across loops, so expensive state is built at most once per worker.
pub struct WorkerLocal<T> {
    slots: Vec<Option<T>>,
}

impl<T> WorkerLocal<T> {
    /// Create a new `WorkerLocal<T>` with empty slots.
    ///
    /// * `n_workers` - Number of worker threads. At least one is used.
    pub fn new(n_workers: usize) -> Self {
        Self {
            slots: (0..n_workers.max(1)).map(|_| None).collect(),
        }
    }

    /// Returns the number of workers.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if there are no workers. Never the case.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns the number of slots that have been initialized.
    pub fn initialized(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Iterates over initialized worker states.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.slots.iter().flatten()
    }
}

/// Returns the tile edge length used to split `bounds` among `n_threads`
/// workers: roughly eight tiles per worker, between 1 and 32 pixels wide.
///
/// * `bounds`    - Region being split.
/// * `n_threads` - Number of worker threads.
pub fn default_tile_size(bounds: &Bounds2i, n_threads: usize) -> Int {
    let area = bounds.area().max(0) as Float;
    let n = (8 * n_threads.max(1)) as Float;
    clamp((area / n).sqrt() as Int, 1, MAX_TILE_SIZE)
}

/// Runs `body` over every tile of `bounds` on a pool of scoped worker threads
/// and returns once every tile has finished.
///
/// Tiles are handed out through a channel so idle workers pick up the next
/// pending tile. Every worker gets exclusive access to its `WorkerLocal` slot,
/// which is created with `init` on the worker's first tile. A panic on any
/// worker is re-raised on the calling thread.
///
/// * `bounds`    - Region to split into tiles.
/// * `tile_size` - Tile edge length in pixels.
/// * `locals`    - Per-worker state; its length sets the number of workers.
/// * `init`      - Creates a worker's state.
/// * `body`      - Processes one tile.
pub fn parallel_for_2d<T, I, F>(
    bounds: &Bounds2i,
    tile_size: Int,
    locals: &mut WorkerLocal<T>,
    init: I,
    body: F,
) where
    T: Send,
    I: Fn() -> T + Sync,
    F: Fn(&Bounds2i, &mut T) + Sync,
{
    let tiles = bounds.tiles(tile_size);
    if tiles.is_empty() {
        return;
    }
    let n_workers = locals.len().min(tiles.len());
    debug!(
        "Running {} tiles of size {} on {} workers",
        tiles.len(),
        tile_size,
        n_workers
    );

    let (tx, rx) = crossbeam_channel::unbounded();
    for tile in tiles {
        // The receiver is alive so this cannot fail.
        let _ = tx.send(tile);
    }
    drop(tx);

    let result = crossbeam::scope(|scope| {
        for slot in locals.slots.iter_mut().take(n_workers) {
            let rxc = rx.clone();
            let init = &init;
            let body = &body;
            scope.spawn(move |_| {
                for tile in rxc.iter() {
                    let state = slot.get_or_insert_with(init);
                    body(&tile, state);
                }
            });
        }
    });

    if let Err(e) = result {
        panic::resume_unwind(first_panic(e));
    }
}

/// Unpacks the payload of the first worker panic from the error crossbeam
/// returns when a scoped thread panicked.
fn first_panic(e: Box<dyn Any + Send>) -> Box<dyn Any + Send> {
    match e.downcast::<Vec<Box<dyn Any + Send>>>() {
        Ok(panics) => match panics.into_iter().next() {
            Some(p) => p,
            None => Box::new("worker thread panicked"),
        },
        Err(e) => e,
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
