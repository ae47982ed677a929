//! Background search on a dedicated thread
//!
//! The worker owns the `SearchContext` while it searches and sends it back
//! with the result, so the table survives between moves without being
//! shared.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::{Result, anyhow};
use crossbeam_channel as chan;
use madking_core::search::iterative_deepening;
use madking_core::{Evaluator, Position, SearchAlgorithm, SearchContext, SearchLimits, SearchResult};

/// What the worker hands back
pub struct Finished {
    pub ctx: SearchContext,
    pub result: SearchResult,
}

pub struct BackgroundSearch {
    rx: chan::Receiver<Finished>,
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl BackgroundSearch {
    /// Start an iterative-deepening search of `pos`
    pub fn spawn<E>(
        mut ctx: SearchContext,
        pos: Position,
        eval: E,
        algorithm: SearchAlgorithm,
        limits: SearchLimits,
    ) -> Self
    where
        E: Evaluator + Send + 'static,
    {
        let (tx, rx) = chan::bounded(1);
        let stop = Arc::new(AtomicBool::new(false));
        let limits = limits.with_stop(Arc::clone(&stop));
        let handle = thread::spawn(move || {
            let result = iterative_deepening(&mut ctx, &pos, &eval, algorithm, &limits);
            // The receiver may be gone if the caller dropped us
            let _ = tx.send(Finished { ctx, result });
        });
        BackgroundSearch {
            rx,
            stop,
            handle: Some(handle),
        }
    }

    /// Ask the worker not to start another iteration
    pub fn stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    /// Non-blocking poll
    pub fn try_result(&mut self) -> Option<Finished> {
        let finished = self.rx.try_recv().ok()?;
        self.join();
        Some(finished)
    }

    /// Wait at most `timeout`; `Ok(None)` if the search is still running
    pub fn wait_timeout(&mut self, timeout: Duration) -> Result<Option<Finished>> {
        match self.rx.recv_timeout(timeout) {
            Ok(finished) => {
                self.join();
                Ok(Some(finished))
            }
            Err(chan::RecvTimeoutError::Timeout) => Ok(None),
            Err(chan::RecvTimeoutError::Disconnected) => {
                self.join();
                Err(anyhow!("search worker exited without a result"))
            }
        }
    }

    /// Block until the search completes
    pub fn wait(mut self) -> Result<Finished> {
        let finished = self
            .rx
            .recv()
            .map_err(|_| anyhow!("search worker exited without a result"))?;
        self.join();
        Ok(finished)
    }

    fn join(&mut self) {
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::warn!("search worker panicked");
            }
        }
    }
}

impl Drop for BackgroundSearch {
    fn drop(&mut self) {
        self.stop();
        self.join();
    }
}
