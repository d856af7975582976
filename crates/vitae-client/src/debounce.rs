//! Cancel-and-restart timer.

use std::{
  future::Future,
  sync::{Mutex, PoisonError},
  time::Duration,
};

use tokio::task::JoinHandle;

/// Runs the most recently scheduled job once `delay` has passed without
/// another [`schedule`](Debouncer::schedule) call.
///
/// At most one job is pending at a time. Scheduling aborts the pending one.
/// Must be used from inside a tokio runtime.
#[derive(Debug)]
pub struct Debouncer {
  delay:   Duration,
  pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
  pub fn new(delay: Duration) -> Self { Self { delay, pending: Mutex::new(None) } }

  pub fn delay(&self) -> Duration { self.delay }

  pub fn schedule<F>(&self, job: F)
  where
    F: Future<Output = ()> + Send + 'static,
  {
    let delay = self.delay;
    let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(previous) = pending.take() {
      previous.abort();
    }
    *pending = Some(tokio::spawn(async move {
      tokio::time::sleep(delay).await;
      job.await;
    }));
  }

  /// Drop the pending job, if any, without running it.
  pub fn cancel(&self) {
    let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(previous) = pending.take() {
      previous.abort();
    }
  }

  pub fn is_pending(&self) -> bool {
    let pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
    pending.as_ref().is_some_and(|h| !h.is_finished())
  }
}

impl Drop for Debouncer {
  fn drop(&mut self) { self.cancel(); }
}

#[cfg(test)]
mod tests {
  use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
  };

  use super::*;

  fn counter_job(hits: Arc<AtomicUsize>, value: usize) -> impl Future<Output = ()> + Send + 'static {
    async move {
      hits.fetch_add(value, Ordering::SeqCst);
    }
  }

  #[tokio::test(start_paused = true)]
  async fn fires_once_after_idle_period() {
    let hits = Arc::new(AtomicUsize::new(0));
    let d = Debouncer::new(Duration::from_secs(5));

    d.schedule(counter_job(hits.clone(), 1));
    assert!(d.is_pending());

    tokio::time::sleep(Duration::from_secs(4)).await;
    assert_eq!(hits.load(Ordering::SeqCst), 0);

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(hits.load(Ordering::SeqCst), 1);
    assert!(!d.is_pending());
  }

  #[tokio::test(start_paused = true)]
  async fn rescheduling_replaces_the_pending_job() {
    let hits = Arc::new(AtomicUsize::new(0));
    let d = Debouncer::new(Duration::from_secs(5));

    d.schedule(counter_job(hits.clone(), 1));
    tokio::time::sleep(Duration::from_secs(3)).await;
    d.schedule(counter_job(hits.clone(), 10));

    // The first job would have fired at t=5.
    tokio::time::sleep(Duration::from_secs(4)).await;
    assert_eq!(hits.load(Ordering::SeqCst), 0);

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(hits.load(Ordering::SeqCst), 10);
  }

  #[tokio::test(start_paused = true)]
  async fn cancel_drops_pending_job() {
    let hits = Arc::new(AtomicUsize::new(0));
    let d = Debouncer::new(Duration::from_secs(1));

    d.schedule(counter_job(hits.clone(), 1));
    d.cancel();
    assert!(!d.is_pending());

    tokio::time::sleep(Duration::from_secs(3)).await;
    assert_eq!(hits.load(Ordering::SeqCst), 0);
  }
}
