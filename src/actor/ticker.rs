//! Scheduler: Dedicated thread that ticks the stage at a fixed interval.
//!
//! Each iteration checks the stop flag, runs one [`Stage::tick`], then waits
//! out whatever is left of the interval. An overrunning tick is followed
//! immediately by the next one; missed ticks are never replayed.

use super::stage::Stage;
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};
use parking_lot::Mutex;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Time left in the interval after a tick took `elapsed`, or `None` if the
/// tick overran.
#[inline]
pub fn remaining(interval: Duration, elapsed: Duration) -> Option<Duration> {
    interval.checked_sub(elapsed).filter(|rest| !rest.is_zero())
}

/// Handle to the render thread.
#[derive(Debug)]
pub struct Scheduler {
    /// Handle to the render thread.
    handle: Option<JoinHandle<()>>,
    /// Checked at the top of every iteration.
    stop: Arc<AtomicBool>,
    /// Interrupts the inter-tick wait.
    wake_tx: Sender<()>,
}

impl Scheduler {
    /// Start ticking `stage` every `interval`.
    ///
    /// # Errors
    ///
    /// Returns an error if the OS fails to spawn the thread.
    pub fn spawn(stage: Arc<Mutex<Stage>>, interval: Duration) -> io::Result<Self> {
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stop);

        // One pending wake is enough to cut a wait short.
        let (wake_tx, wake_rx) = bounded(1);

        let handle = thread::Builder::new()
            .name("termframe-render".to_string())
            .spawn(move || {
                Self::run_loop(&stage, &stop_flag, &wake_rx, interval);
            })?;

        log::debug!("scheduler started at {interval:?}");
        Ok(Self {
            handle: Some(handle),
            stop,
            wake_tx,
        })
    }

    /// Ask the loop to exit at the top of its next iteration.
    ///
    /// A tick already in progress runs to completion.
    pub fn stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
        let _ = self.wake_tx.try_send(());
    }

    /// Whether the render thread has exited.
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Stop and wait for the render thread to finish.
    pub fn join(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.stop();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::warn!("render thread panicked");
            }
            log::debug!("scheduler stopped");
        }
    }

    /// Main render loop.
    fn run_loop(
        stage: &Mutex<Stage>,
        stop: &AtomicBool,
        wake_rx: &Receiver<()>,
        interval: Duration,
    ) {
        loop {
            if stop.load(Ordering::Relaxed) {
                break;
            }

            let started = Instant::now();
            if let Err(e) = stage.lock().tick() {
                log::warn!("frame flush failed: {e}");
            }

            if let Some(rest) = remaining(interval, started.elapsed()) {
                match wake_rx.recv_timeout(rest) {
                    Ok(()) | Err(RecvTimeoutError::Timeout) => {}
                    Err(RecvTimeoutError::Disconnected) => break,
                }
            }
        }
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::StreamRenderer;
    use crate::buffer::Grid;
    use crate::config::ColorDepth;

    fn shared_stage() -> Arc<Mutex<Stage>> {
        let backend = StreamRenderer::new(io::sink(), ColorDepth::TrueColor);
        Arc::new(Mutex::new(Stage::new(
            Grid::new(4, 2).unwrap(),
            Box::new(backend),
            None,
        )))
    }

    #[test]
    fn test_remaining() {
        let interval = Duration::from_millis(50);
        assert_eq!(
            remaining(interval, Duration::from_millis(20)),
            Some(Duration::from_millis(30))
        );
        assert_eq!(remaining(interval, interval), None);
        assert_eq!(remaining(interval, Duration::from_millis(80)), None);
    }

    #[test]
    fn test_scheduler_ticks() {
        let stage = shared_stage();
        let scheduler = Scheduler::spawn(Arc::clone(&stage), Duration::from_millis(5)).unwrap();

        let deadline = Instant::now() + Duration::from_secs(2);
        while stage.lock().stats().ticks < 3 && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
        }
        scheduler.join();
        assert!(stage.lock().stats().ticks >= 3);
    }

    #[test]
    fn test_stop_interrupts_wait() {
        let stage = shared_stage();
        let scheduler = Scheduler::spawn(Arc::clone(&stage), Duration::from_secs(60)).unwrap();

        let deadline = Instant::now() + Duration::from_secs(2);
        while stage.lock().stats().ticks < 1 && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(1));
        }

        let started = Instant::now();
        scheduler.join();
        assert!(started.elapsed() < Duration::from_secs(5));
        assert_eq!(stage.lock().stats().ticks, 1);
    }

    #[test]
    fn test_stop_flag() {
        let stage = shared_stage();
        let scheduler = Scheduler::spawn(Arc::clone(&stage), Duration::from_millis(10)).unwrap();
        scheduler.stop();

        let deadline = Instant::now() + Duration::from_secs(2);
        while !scheduler.is_finished() && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(1));
        }
        assert!(scheduler.is_finished());
    }
}
