// src/client/binder.rs
//
// Per-widget polling. A mounted binder owns one poller task; every tick
// spawns an independent fetch, so a slow response never delays the next
// poll. Results are committed into a watch channel that renderers read.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::fetch::{Fetch, FetchError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Loaded,
    Errored,
}

/// Which of several overlapping responses gets to update the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommitPolicy {
    /// Every response is committed as it settles; the last one to settle wins.
    #[default]
    LastSettled,
    /// A response older than the one already committed is dropped.
    LatestIssued,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewState<T> {
    pub phase: Phase,
    /// Last successfully loaded data. An error does not clear it.
    pub data: Option<T>,
    pub error: Option<String>,
    /// Sequence number of the request that produced the current state.
    pub committed: u64,
}

impl<T> ViewState<T> {
    fn idle(initial: Option<T>) -> Self {
        Self { phase: Phase::Idle, data: initial, error: None, committed: 0 }
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }
}

pub struct Binder<T> {
    name: &'static str,
    fetcher: Arc<dyn Fetch<T>>,
    interval: Option<Duration>,
    error_message: String,
    policy: CommitPolicy,
    initial: Option<T>,
}

impl<T> Binder<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new<F>(name: &'static str, fetcher: Arc<F>) -> Self
    where
        F: Fetch<T> + 'static,
    {
        Self {
            name,
            fetcher: fetcher as Arc<dyn Fetch<T>>,
            interval: None,
            error_message: format!("Failed to load {name}"),
            policy: CommitPolicy::default(),
            initial: None,
        }
    }

    /// Re-fetch period. `None` or zero fetches once on mount.
    pub fn interval(mut self, interval: Option<Duration>) -> Self {
        self.interval = interval.filter(|d| !d.is_zero());
        self
    }

    pub fn error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = message.into();
        self
    }

    pub fn policy(mut self, policy: CommitPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Data shown before the first response arrives.
    pub fn initial(mut self, data: T) -> Self {
        self.initial = Some(data);
        self
    }

    pub fn mount(self) -> Mounted<T> {
        let (tx, rx) = watch::channel(ViewState::idle(self.initial));
        let inner = Arc::new(Inner {
            name: self.name,
            fetcher: self.fetcher,
            error_message: self.error_message,
            policy: self.policy,
            issued: AtomicU64::new(0),
            tx,
        });
        let token = CancellationToken::new();
        tokio::spawn(poll(inner, self.interval, token.clone()));
        Mounted { state: rx, token }
    }
}

/// Handle to a running binder. Dropping it unmounts the widget.
pub struct Mounted<T> {
    state: watch::Receiver<ViewState<T>>,
    token: CancellationToken,
}

impl<T: Clone> Mounted<T> {
    pub fn subscribe(&self) -> watch::Receiver<ViewState<T>> {
        self.state.clone()
    }

    pub fn snapshot(&self) -> ViewState<T> {
        self.state.borrow().clone()
    }

    /// Stops the timer. Fetches still in flight are abandoned uncommitted.
    pub fn unmount(self) {}
}

impl<T> Drop for Mounted<T> {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

struct Inner<T> {
    name: &'static str,
    fetcher: Arc<dyn Fetch<T>>,
    error_message: String,
    policy: CommitPolicy,
    issued: AtomicU64,
    tx: watch::Sender<ViewState<T>>,
}

async fn poll<T>(inner: Arc<Inner<T>>, interval: Option<Duration>, token: CancellationToken)
where
    T: Send + Sync + 'static,
{
    let Some(period) = interval else {
        spawn_fetch(&inner, &token);
        return;
    };

    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        tokio::select! {
            _ = token.cancelled() => break,
            _ = ticker.tick() => spawn_fetch(&inner, &token),
        }
    }
    debug!(widget = inner.name, "poller stopped");
}

fn spawn_fetch<T>(inner: &Arc<Inner<T>>, token: &CancellationToken)
where
    T: Send + Sync + 'static,
{
    let seq = inner.issued.fetch_add(1, Ordering::SeqCst) + 1;
    inner.tx.send_modify(|s| s.phase = Phase::Loading);

    let inner = Arc::clone(inner);
    let token = token.clone();
    tokio::spawn(async move {
        let result = tokio::select! {
            _ = token.cancelled() => return,
            r = inner.fetcher.fetch() => r,
        };
        inner.commit(seq, result, &token);
    });
}

impl<T> Inner<T> {
    fn commit(&self, seq: u64, result: Result<T, FetchError>, token: &CancellationToken) {
        if let Err(e) = &result {
            warn!(widget = self.name, seq, error = %e, "fetch failed");
        }
        let committed = self.tx.send_if_modified(|s| {
            if token.is_cancelled() {
                return false;
            }
            if self.policy == CommitPolicy::LatestIssued && seq < s.committed {
                return false;
            }
            match result {
                Ok(data) => {
                    s.data = Some(data);
                    s.error = None;
                    s.phase = Phase::Loaded;
                }
                Err(_) => {
                    s.error = Some(self.error_message.clone());
                    s.phase = Phase::Errored;
                }
            }
            s.committed = seq;
            true
        });
        if !committed {
            debug!(widget = self.name, seq, "response discarded");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Mutex;
    use tokio::time::sleep;

    /// Each call pops the next (delay, response); `None` responses fail.
    /// Once the script runs out, calls never resolve.
    struct Script<T> {
        steps: Mutex<VecDeque<(u64, Option<T>)>>,
        calls: AtomicUsize,
    }

    impl<T> Script<T> {
        fn new(steps: Vec<(u64, Option<T>)>) -> Arc<Self> {
            Arc::new(Self { steps: Mutex::new(steps.into()), calls: AtomicUsize::new(0) })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl<T: Send + Sync + 'static> Fetch<T> for Script<T> {
        async fn fetch(&self) -> Result<T, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let step = self.steps.lock().unwrap().pop_front();
            match step {
                Some((delay, response)) => {
                    sleep(Duration::from_secs(delay)).await;
                    response.ok_or(FetchError::Status(500))
                }
                None => std::future::pending().await,
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn loads_once_without_interval() {
        let script = Script::new(vec![(1, Some(7))]);
        let mounted = Binder::new("numbers", script.clone()).mount();

        sleep(Duration::from_secs(60)).await;
        let state = mounted.snapshot();
        assert_eq!(state.phase, Phase::Loaded);
        assert_eq!(state.data, Some(7));
        assert_eq!(state.error, None);
        assert_eq!(script.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_interval_means_no_repeat() {
        let script = Script::new(vec![(0, Some(1)), (0, Some(2))]);
        let mounted = Binder::new("numbers", script.clone())
            .interval(Some(Duration::ZERO))
            .mount();

        sleep(Duration::from_secs(30)).await;
        assert_eq!(mounted.snapshot().data, Some(1));
        assert_eq!(script.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn repolls_on_interval() {
        let script = Script::new(vec![(0, Some(1)), (0, Some(2)), (0, Some(3))]);
        let mounted = Binder::new("numbers", script.clone())
            .interval(Some(Duration::from_secs(10)))
            .mount();

        sleep(Duration::from_secs(25)).await;
        assert_eq!(script.calls(), 3);
        assert_eq!(mounted.snapshot().data, Some(3));
        assert_eq!(mounted.snapshot().committed, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn error_keeps_previous_data() {
        let script = Script::new(vec![(0, Some(5)), (0, None)]);
        let mounted = Binder::new("drivers", script.clone())
            .interval(Some(Duration::from_secs(10)))
            .mount();

        sleep(Duration::from_secs(11)).await;
        let state = mounted.snapshot();
        assert_eq!(state.phase, Phase::Errored);
        assert_eq!(state.data, Some(5));
        assert_eq!(state.error.as_deref(), Some("Failed to load drivers"));
    }

    #[tokio::test(start_paused = true)]
    async fn custom_error_message_and_initial_data() {
        let script = Script::new(vec![(2, None::<i32>)]);
        let mounted = Binder::new("metrics", script)
            .initial(42)
            .error_message("Failed metrics fetch")
            .mount();

        sleep(Duration::from_secs(1)).await;
        let state = mounted.snapshot();
        assert!(state.is_loading());
        assert_eq!(state.data, Some(42));

        sleep(Duration::from_secs(2)).await;
        let state = mounted.snapshot();
        assert_eq!(state.data, Some(42));
        assert_eq!(state.error.as_deref(), Some("Failed metrics fetch"));
    }

    #[tokio::test(start_paused = true)]
    async fn response_after_unmount_is_ignored() {
        let script = Script::new(vec![(5, Some(1))]);
        let mounted = Binder::new("rides", script.clone())
            .interval(Some(Duration::from_secs(10)))
            .mount();
        let rx = mounted.subscribe();

        sleep(Duration::from_secs(1)).await;
        mounted.unmount();
        sleep(Duration::from_secs(30)).await;

        let state = rx.borrow().clone();
        assert_eq!(state.data, None);
        assert_eq!(state.committed, 0);
        // timer stopped with the first fetch
        assert_eq!(script.calls(), 1);
    }

    // First poll settles at t=15, second (issued at t=10) at t=11.
    fn overlapping() -> Arc<Script<&'static str>> {
        Script::new(vec![(15, Some("first")), (1, Some("second"))])
    }

    #[tokio::test(start_paused = true)]
    async fn last_settled_wins_by_default() {
        let mounted = Binder::new("hourly", overlapping())
            .interval(Some(Duration::from_secs(10)))
            .mount();

        sleep(Duration::from_secs(12)).await;
        assert_eq!(mounted.snapshot().data, Some("second"));

        sleep(Duration::from_secs(4)).await;
        let state = mounted.snapshot();
        assert_eq!(state.data, Some("first"));
        assert_eq!(state.committed, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn latest_issued_drops_stale_responses() {
        let mounted = Binder::new("hourly", overlapping())
            .interval(Some(Duration::from_secs(10)))
            .policy(CommitPolicy::LatestIssued)
            .mount();

        sleep(Duration::from_secs(16)).await;
        let state = mounted.snapshot();
        assert_eq!(state.data, Some("second"));
        assert_eq!(state.committed, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn latest_issued_commits_when_every_fetch_outlasts_the_interval() {
        let script = Script::new((1..=12).map(|i| (11, Some(i))).collect());
        let mounted = Binder::new("hourly", script)
            .interval(Some(Duration::from_secs(10)))
            .policy(CommitPolicy::LatestIssued)
            .mount();

        // fetch n is issued at 10(n-1)s and settles 11s later
        sleep(Duration::from_secs(95)).await;
        let state = mounted.snapshot();
        assert_eq!(state.phase, Phase::Loaded);
        assert_eq!(state.data, Some(9));
        assert_eq!(state.committed, 9);
    }
}
