//! Order-preserving map executors
//!
//! Each item is processed independently; results always come back in input
//! order, whatever order workers finish in.

use rayon::prelude::*;

/// Apply a pure function to every item, returning results in input order.
pub trait ParallelMap {
    fn map_ordered<T, R, F>(&self, items: Vec<T>, f: F) -> Vec<R>
    where
        T: Send,
        R: Send,
        F: Fn(T) -> R + Send + Sync;
}

/// Runs every item on the calling thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct Serial;

impl ParallelMap for Serial {
    fn map_ordered<T, R, F>(&self, items: Vec<T>, f: F) -> Vec<R>
    where
        T: Send,
        R: Send,
        F: Fn(T) -> R + Send + Sync,
    {
        items.into_iter().map(f).collect()
    }
}

/// Fixed-size rayon pool, built per batch.
#[derive(Debug, Clone, Copy)]
pub struct WorkerPool {
    workers: usize,
}

impl WorkerPool {
    pub fn new(workers: usize) -> Self {
        Self { workers: workers.max(1) }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }
}

impl ParallelMap for WorkerPool {
    fn map_ordered<T, R, F>(&self, items: Vec<T>, f: F) -> Vec<R>
    where
        T: Send,
        R: Send,
        F: Fn(T) -> R + Send + Sync,
    {
        if items.is_empty() {
            return Vec::new();
        }
        let workers = self.workers.min(items.len());
        tracing::debug!(workers, items = items.len(), "dispatching to worker pool");

        match rayon::ThreadPoolBuilder::new().num_threads(workers).build() {
            Ok(pool) => pool.install(|| items.into_par_iter().map(f).collect()),
            Err(e) => {
                tracing::warn!("Worker pool unavailable, running serially: {}", e);
                Serial.map_ordered(items, f)
            }
        }
    }
}

/// Executor selected from a worker count: 1 (or 0) runs serially.
#[derive(Debug, Clone, Copy)]
pub enum Executor {
    Serial(Serial),
    Pool(WorkerPool),
}

impl Executor {
    pub fn with_jobs(n_jobs: usize) -> Self {
        if n_jobs > 1 {
            Self::Pool(WorkerPool::new(n_jobs))
        } else {
            Self::Serial(Serial)
        }
    }

    pub fn jobs(&self) -> usize {
        match self {
            Self::Serial(_) => 1,
            Self::Pool(pool) => pool.workers(),
        }
    }
}

impl Default for Executor {
    fn default() -> Self {
        Self::Serial(Serial)
    }
}

impl ParallelMap for Executor {
    fn map_ordered<T, R, F>(&self, items: Vec<T>, f: F) -> Vec<R>
    where
        T: Send,
        R: Send,
        F: Fn(T) -> R + Send + Sync,
    {
        match self {
            Self::Serial(serial) => serial.map_ordered(items, f),
            Self::Pool(pool) => pool.map_ordered(items, f),
        }
    }
}
