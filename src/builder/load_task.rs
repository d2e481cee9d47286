//! Background dictionary loading.
//!
//! A load runs on its own worker thread so the caller stays responsive while
//! large files are scanned. The worker holds a load lock for the whole run, so
//! at most one load per lock is in flight; a second load waits for the first.
//! Completion is signalled once through a one-shot channel, whether the load
//! succeeded, failed or was cancelled, so a waiting caller is never left blocked.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::{debug, warn};

use crate::builder::dictionary_loader::{DictionaryLoader, LoadReport};
use crate::utils::progress_report::CancelFlag;
use crate::{MovarError, Result};

/// Lock shared by every load that must not overlap.
pub type LoadLock = Arc<Mutex<()>>;

/// Handle to a load running in the background.
pub struct LoadHandle {
    receiver: Receiver<Result<LoadReport>>,
    cancel: CancelFlag,
    worker: Option<JoinHandle<()>>,
}

impl LoadHandle {
    /// Starts `loader` on a worker thread.
    ///
    /// Once the lock is held and the load has finished, `on_complete` runs on
    /// the worker with the result, still under the lock; afterwards the outcome
    /// is sent to the handle.
    pub fn spawn<F>(loader: DictionaryLoader, lock: LoadLock, on_complete: F) -> Self
    where
        F: FnOnce(&Result<LoadReport>) + Send + 'static,
    {
        let cancel = CancelFlag::new();
        let worker_cancel = cancel.clone();
        let loader = loader.with_cancel_flag(cancel.clone());
        let (sender, receiver) = mpsc::sync_channel(1);

        let spawned = thread::Builder::new()
            .name("movar-loader".into())
            .spawn(move || {
                // the lock guards no data, so poisoning is ignored
                let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
                debug!("Load lock acquired");
                let outcome = match loader.load() {
                    // cancelled after the last check inside the load
                    Ok(_) if worker_cancel.is_cancelled() => Err(MovarError::user_interrupted()),
                    outcome => outcome,
                };
                on_complete(&outcome);
                if let Err(err) = &outcome {
                    warn!("Dictionary load failed: {}", err);
                }
                // receiver may be gone if the caller dropped the handle
                let _ = sender.send(outcome);
            });

        match spawned {
            Ok(worker) => Self { receiver, cancel, worker: Some(worker) },
            Err(err) => {
                // no worker: deliver the failure through the channel ourselves
                let (sender, receiver) = mpsc::sync_channel(1);
                let _ = sender.send(Err(MovarError::load_failed(format!("failed to spawn loader thread: {}", err))));
                Self { receiver, cancel, worker: None }
            }
        }
    }

    /// Asks the worker to stop at its next check.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    /// Blocks until the load completes.
    pub fn wait(mut self) -> Result<LoadReport> {
        let outcome = self.receiver
            .recv()
            .unwrap_or_else(|_| Err(MovarError::load_failed("loader thread exited without a result")));
        self.join();
        outcome
    }

    /// Waits up to `timeout` for the load to complete.
    ///
    /// On timeout the load is cancelled and this blocks until the worker has
    /// stopped, which includes waiting for the load lock if the worker has not
    /// taken it yet. A cancelled worker publishes nothing and a `Timeout` error
    /// is returned. If the load completed before it saw the cancellation, its
    /// report is returned instead, matching what `on_complete` received.
    pub fn wait_timeout(mut self, timeout: Duration) -> Result<LoadReport> {
        match self.receiver.recv_timeout(timeout) {
            Ok(outcome) => {
                self.join();
                outcome
            }
            Err(RecvTimeoutError::Timeout) => {
                self.cancel();
                self.join();
                match self.receiver.try_recv() {
                    Ok(Ok(report)) => Ok(report),
                    _ => Err(MovarError::timeout(timeout.as_secs_f64())),
                }
            }
            Err(RecvTimeoutError::Disconnected) => {
                self.join();
                Err(MovarError::load_failed("loader thread exited without a result"))
            }
        }
    }

    /// Returns the outcome if the load has already completed.
    pub fn try_result(&self) -> Option<Result<LoadReport>> {
        self.receiver.try_recv().ok()
    }

    fn join(&mut self) {
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!("Loader thread panicked");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use super::*;
    use crate::builder::loader_config::LoaderConfig;
    use crate::utils::progress_report::ProgressState;

    fn write_dict(dir: &Path, name: &str, title: &str) {
        let text = format!("#Title:{}\n#Pair:Eng-Eng\n#Description:x\n#Regex filter:^[A-Z]+$\nCAT\nfeline\n", title);
        fs::write(dir.join(name), text).unwrap();
    }

    fn loader_for(dir: &Path) -> DictionaryLoader {
        DictionaryLoader::new(LoaderConfig::from_locations([dir]))
    }

    #[test]
    fn test_wait_returns_report() {
        let dir = tempfile::tempdir().unwrap();
        write_dict(dir.path(), "a.txt", "Alpha");
        let handle = LoadHandle::spawn(loader_for(dir.path()), LoadLock::default(), |_| {});
        let report = handle.wait().unwrap();
        assert_eq!(report.collection.titles().collect::<Vec<_>>(), vec!["Alpha"]);
    }

    #[test]
    fn test_on_complete_sees_outcome_before_signal() {
        let dir = tempfile::tempdir().unwrap();
        write_dict(dir.path(), "a.txt", "Alpha");
        let seen = Arc::new(Mutex::new(0usize));
        let seen_in_worker = seen.clone();
        let handle = LoadHandle::spawn(loader_for(dir.path()), LoadLock::default(), move |outcome| {
            if let Ok(report) = outcome {
                *seen_in_worker.lock().unwrap() = report.collection.len();
            }
        });
        handle.wait().unwrap();
        assert_eq!(*seen.lock().unwrap(), 1);
    }

    #[test]
    fn test_loads_are_serialized_by_lock() {
        let dir = tempfile::tempdir().unwrap();
        write_dict(dir.path(), "a.txt", "Alpha");
        let lock = LoadLock::default();

        let guard = lock.lock().unwrap();
        let handle = LoadHandle::spawn(loader_for(dir.path()), lock.clone(), |_| {});
        // the worker cannot start while the lock is held elsewhere
        thread::sleep(Duration::from_millis(50));
        assert!(handle.try_result().is_none());
        drop(guard);
        assert_eq!(handle.wait().unwrap().collection.len(), 1);
    }

    fn slow_indexing(state: &mut ProgressState) -> bool {
        if state.state_id.starts_with("indexing") {
            thread::sleep(Duration::from_millis(300));
        }
        false
    }

    #[test]
    fn test_wait_timeout_cancels_without_completing() {
        let dir = tempfile::tempdir().unwrap();
        write_dict(dir.path(), "a.txt", "Alpha");
        let completed = Arc::new(Mutex::new(None));
        let completed_in_worker = completed.clone();

        let loader = loader_for(dir.path()).with_reporter(slow_indexing);
        let handle = LoadHandle::spawn(loader, LoadLock::default(), move |outcome| {
            *completed_in_worker.lock().unwrap() = Some(outcome.is_ok());
        });
        let flag = handle.cancel_flag();
        let err = handle.wait_timeout(Duration::from_millis(50)).unwrap_err();
        assert!(err.is_timeout());
        assert!(flag.is_cancelled());
        // the worker has stopped by now and saw the cancellation
        assert_eq!(*completed.lock().unwrap(), Some(false));
    }

    #[test]
    fn test_panicked_load_does_not_block_later_loads() {
        let dir = tempfile::tempdir().unwrap();
        write_dict(dir.path(), "a.txt", "Alpha");
        let lock = LoadLock::default();

        let first = LoadHandle::spawn(loader_for(dir.path()), lock.clone(), |_| panic!("completion failed"));
        assert!(matches!(first.wait(), Err(MovarError::LoadFailed { .. })));
        assert!(lock.is_poisoned());

        let second = LoadHandle::spawn(loader_for(dir.path()), lock.clone(), |_| {});
        assert_eq!(second.wait().unwrap().collection.len(), 1);
    }

    #[test]
    fn test_cancelled_load_still_signals() {
        let dir = tempfile::tempdir().unwrap();
        write_dict(dir.path(), "a.txt", "Alpha");
        let lock = LoadLock::default();

        let guard = lock.lock().unwrap();
        let handle = LoadHandle::spawn(loader_for(dir.path()), lock.clone(), |_| {});
        handle.cancel();
        drop(guard);
        assert!(handle.wait().unwrap_err().is_user_interrupted());
    }
}
