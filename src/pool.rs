//! A fixed-size worker pool for generating tessellations off the caller's
//! thread.
//!
//! The engine itself is a pure function, so isolation only needs plain
//! threads and channels: each submission travels to a worker as data and
//! comes back as data. A generation that errors still answers, because
//! errors are part of [`AntwerpData`].

use std::sync::mpsc::{channel, Receiver, RecvError, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{Builder, JoinHandle};

use tracing::{debug, warn};

use crate::engine;
use crate::export::{AntwerpData, AntwerpOptions};

struct Job {
    options: AntwerpOptions,
    reply: Sender<AntwerpData>,
}

/// A pool of worker threads running the tiling engine.
///
/// Dropping the pool closes the queue; workers finish the jobs already
/// submitted and exit.
pub struct TilingPool {
    queue: Option<Sender<Job>>,
    workers: Vec<JoinHandle<()>>,
}

impl TilingPool {
    /// Spawns `size` workers. A `size` of zero is clamped to one.
    ///
    /// # Errors
    ///
    /// Returns an [`std::io::Error`] when a worker thread cannot be
    /// spawned.
    pub fn new(size: usize) -> std::io::Result<Self> {
        let (queue, jobs) = channel::<Job>();
        let jobs = Arc::new(Mutex::new(jobs));

        let size = size.max(1);
        let mut workers = Vec::with_capacity(size);
        for id in 0..size {
            let jobs = Arc::clone(&jobs);
            let handle = Builder::new()
                .name(format!("tiling-worker-{id}"))
                .spawn(move || worker_loop(id, &jobs))?;
            workers.push(handle);
        }

        Ok(Self {
            queue: Some(queue),
            workers,
        })
    }

    /// Submits a generation request and returns the channel the result
    /// arrives on. The receiver yields exactly one [`AntwerpData`], or
    /// disconnects if the pool shuts down before the job runs.
    #[must_use]
    pub fn submit(&self, options: AntwerpOptions) -> Receiver<AntwerpData> {
        let (reply, result) = channel();
        if let Some(queue) = &self.queue {
            if queue.send(Job { options, reply }).is_err() {
                warn!("tiling pool queue closed, dropping job");
            }
        }
        result
    }

    /// Submits a request and blocks until its result arrives.
    ///
    /// # Errors
    ///
    /// Returns [`RecvError`] when the pool shut down before the job
    /// could run, so a dropped job is distinguishable from an empty
    /// scene.
    pub fn generate(&self, options: AntwerpOptions) -> Result<AntwerpData, RecvError> {
        self.submit(options).recv()
    }
}

impl Drop for TilingPool {
    fn drop(&mut self) {
        // Closing the queue ends every worker's recv loop.
        self.queue.take();
        for handle in self.workers.drain(..) {
            if handle.join().is_err() {
                warn!("tiling worker panicked");
            }
        }
    }
}

fn worker_loop(id: usize, jobs: &Mutex<Receiver<Job>>) {
    loop {
        let job = match jobs.lock() {
            Ok(receiver) => receiver.recv(),
            // A poisoned lock means another worker panicked mid-recv;
            // there is no queue state to recover.
            Err(_) => break,
        };
        let Ok(job) = job else { break };

        debug!(worker = id, configuration = %job.options.configuration, "generating");
        let data = engine::to_shapes(&job.options);
        // The submitter may have dropped its receiver; that just means
        // nobody wants the result anymore.
        let _ = job.reply.send(data);
    }
}
