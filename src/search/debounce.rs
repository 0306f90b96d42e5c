//! 基于 tokio 定时器的防抖器。

use std::{
    future::Future,
    sync::{Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use tokio::task::JoinHandle;
use tracing::Instrument;

/// 只执行静默期结束前最后一次提交的任务。
///
/// 每次 [`schedule`](Self::schedule) 都会放弃尚在等待的上一个任务并重新计时。
/// 计时结束时先在定时器任务中同步调用 `start`，再把它返回的 future 派发为独立的
/// tokio 任务，之后的重新计时或取消都不会中断它。
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    /// 创建一个静默期为 `delay` 的防抖器。
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    /// 静默期长度。
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// 重新计时，静默期结束后调用 `start` 并派发它返回的任务。必须在 tokio 运行时中调用。
    ///
    /// `start` 与派发之间没有让出点，调用方可以在其中同步地更新状态。
    pub fn schedule<S, F>(&self, start: S)
    where
        S: FnOnce() -> F + Send + 'static,
        F: Future<Output = ()> + Send + 'static,
    {
        let delay = self.delay;
        let timer = tokio::spawn(
            async move {
                tokio::time::sleep(delay).await;
                tokio::spawn(start().in_current_span());
            }
            .in_current_span(),
        );

        if let Some(previous) = self.lock().replace(timer) {
            previous.abort();
        }
    }

    /// 放弃尚在等待的任务。已派发的任务不受影响。
    pub fn cancel(&self) {
        if let Some(previous) = self.lock().take() {
            previous.abort();
        }
    }

    /// 是否有任务仍在等待静默期结束。
    pub fn is_pending(&self) -> bool {
        self.lock()
            .as_ref()
            .is_some_and(|timer| !timer.is_finished())
    }

    fn lock(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_only_last_task_runs() {
        let debouncer = Debouncer::new(Duration::from_millis(500));
        let runs = Arc::new(Mutex::new(Vec::new()));

        for i in 0..3 {
            let runs = runs.clone();
            debouncer.schedule(move || async move {
                runs.lock().unwrap().push(i);
            });
            tokio::time::sleep(Duration::from_millis(200)).await;
        }
        assert!(debouncer.is_pending());
        assert!(runs.lock().unwrap().is_empty());

        tokio::time::sleep(Duration::from_millis(400)).await;
        assert_eq!(*runs.lock().unwrap(), vec![2]);
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_drops_waiting_task() {
        let debouncer = Debouncer::new(Duration::from_millis(500));
        let count = Arc::new(AtomicUsize::new(0));

        let c = count.clone();
        debouncer.schedule(move || async move {
            c.fetch_add(1, Ordering::SeqCst);
        });
        debouncer.cancel();

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dispatched_task_survives_reschedule() {
        let debouncer = Debouncer::new(Duration::from_millis(100));
        let count = Arc::new(AtomicUsize::new(0));

        let c = count.clone();
        debouncer.schedule(move || async move {
            tokio::time::sleep(Duration::from_millis(1000)).await;
            c.fetch_add(1, Ordering::SeqCst);
        });
        tokio::time::sleep(Duration::from_millis(200)).await;

        // 第一个任务已派发，重新计时和取消都不应影响它
        debouncer.schedule(|| async {});
        debouncer.cancel();

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_runs_when_timer_fires() {
        let debouncer = Debouncer::new(Duration::from_millis(100));
        let order = Arc::new(Mutex::new(Vec::new()));

        let o = order.clone();
        debouncer.schedule(move || {
            o.lock().unwrap().push("start");
            async move {
                o.lock().unwrap().push("task");
            }
        });
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(order.lock().unwrap().is_empty());

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(*order.lock().unwrap(), vec!["start", "task"]);
    }
}
