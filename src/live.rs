// src/live.rs
//! Live views: hot values that replay their latest state to late subscribers.
//!
//! Everything observable in the data layer is a `tokio::sync::watch` channel.
//! [`derive`] maps one channel into another; [`LiveView`] shares a derived
//! channel between any number of subscribers and tears the upstream down
//! only after it has gone unobserved for a grace period.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Mirrors `f(upstream)` into a new receiver.
///
/// The first value is computed synchronously. Every upstream change is
/// re-emitted, even when `f` produces an equal value. The forwarding task
/// ends when the upstream closes or when every returned receiver is dropped.
pub fn derive<S, T, F>(mut upstream: watch::Receiver<S>, mut f: F) -> watch::Receiver<T>
where
    S: Send + Sync + 'static,
    T: Send + Sync + 'static,
    F: FnMut(&S) -> T + Send + 'static,
{
    let initial = f(&*upstream.borrow_and_update());
    let (tx, rx) = watch::channel(initial);

    tokio::spawn(async move {
        loop {
            tokio::select! {
                changed = upstream.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let next = f(&*upstream.borrow_and_update());
                    if tx.send(next).is_err() {
                        break;
                    }
                }
                _ = tx.closed() => break,
            }
        }
    });

    rx
}

type Source<T> = Box<dyn Fn() -> watch::Receiver<T> + Send + Sync>;

struct Shared<T> {
    sender: watch::Sender<T>,
    source: Source<T>,
    grace: Duration,
    producer: Mutex<Option<JoinHandle<()>>>,
}

/// A lazily started, shared view over an upstream channel.
///
/// The upstream is opened by calling `source` on the first subscription and
/// forwarded until nobody has subscribed for `grace`. The next subscription
/// after that reopens it. Subscribers always receive the current value
/// immediately.
pub struct LiveView<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Clone for LiveView<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T> LiveView<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new<F>(initial: T, grace: Duration, source: F) -> Self
    where
        F: Fn() -> watch::Receiver<T> + Send + Sync + 'static,
    {
        let (sender, _) = watch::channel(initial);
        Self {
            shared: Arc::new(Shared {
                sender,
                source: Box::new(source),
                grace,
                producer: Mutex::new(None),
            }),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<T> {
        let mut producer = self.shared.producer.lock();
        let running = producer.as_ref().is_some_and(|task| !task.is_finished());
        if !running {
            let mut upstream = (self.shared.source)();
            let current = upstream.borrow_and_update().clone();
            self.shared.sender.send_replace(current);
            let receiver = self.shared.sender.subscribe();
            *producer = Some(tokio::spawn(forward(Arc::clone(&self.shared), upstream)));
            return receiver;
        }
        self.shared.sender.subscribe()
    }

    /// Whether the upstream is currently open.
    pub fn is_active(&self) -> bool {
        self.shared
            .producer
            .lock()
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }
}

async fn forward<T>(shared: Arc<Shared<T>>, mut upstream: watch::Receiver<T>)
where
    T: Clone + Send + Sync + 'static,
{
    loop {
        tokio::select! {
            changed = upstream.changed() => {
                if changed.is_err() {
                    break;
                }
                let next = upstream.borrow_and_update().clone();
                shared.sender.send_replace(next);
            }
            _ = shared.sender.closed() => {
                let deadline = tokio::time::Instant::now() + shared.grace;
                loop {
                    tokio::select! {
                        _ = tokio::time::sleep_until(deadline) => break,
                        changed = upstream.changed() => {
                            if changed.is_err() {
                                break;
                            }
                            let next = upstream.borrow_and_update().clone();
                            shared.sender.send_replace(next);
                        }
                    }
                }
                // Decided under the slot lock so a concurrent subscribe
                // either sees this task alive or starts a fresh one.
                let mut producer = shared.producer.lock();
                if shared.sender.receiver_count() == 0 {
                    *producer = None;
                    return;
                }
            }
        }
    }
    *shared.producer.lock() = None;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_derive_maps_every_change() {
        let (tx, rx) = watch::channel(1);
        let mut doubled = derive(rx, |v: &i32| v * 2);
        assert_eq!(*doubled.borrow_and_update(), 2);

        tx.send(3).unwrap();
        doubled.changed().await.unwrap();
        assert_eq!(*doubled.borrow_and_update(), 6);

        // Equal values are still re-emitted.
        tx.send(3).unwrap();
        doubled.changed().await.unwrap();
        assert_eq!(*doubled.borrow_and_update(), 6);
    }

    #[tokio::test]
    async fn test_derive_releases_upstream_when_unobserved() {
        let (tx, rx) = watch::channel(1);
        let doubled = derive(rx, |v: &i32| v * 2);
        drop(doubled);
        tokio::time::timeout(Duration::from_secs(1), tx.closed())
            .await
            .unwrap();
    }

    fn counted_view(grace: Duration) -> (LiveView<i32>, Arc<watch::Sender<i32>>, Arc<AtomicUsize>) {
        let (tx, _) = watch::channel(1);
        let tx = Arc::new(tx);
        let opened = Arc::new(AtomicUsize::new(0));
        let view = {
            let tx = Arc::clone(&tx);
            let opened = Arc::clone(&opened);
            LiveView::new(0, grace, move || {
                opened.fetch_add(1, Ordering::SeqCst);
                tx.subscribe()
            })
        };
        (view, tx, opened)
    }

    #[tokio::test(start_paused = true)]
    async fn test_view_is_lazy_and_shared() {
        let (view, tx, opened) = counted_view(Duration::from_secs(5));
        assert_eq!(opened.load(Ordering::SeqCst), 0);
        assert!(!view.is_active());

        let mut first = view.subscribe();
        let second = view.subscribe();
        assert_eq!(opened.load(Ordering::SeqCst), 1);
        assert_eq!(*first.borrow_and_update(), 1);

        tx.send(7).unwrap();
        first.changed().await.unwrap();
        assert_eq!(*first.borrow(), 7);
        assert_eq!(*second.borrow(), 7);
    }

    #[tokio::test(start_paused = true)]
    async fn test_view_survives_grace_then_tears_down() {
        let (view, tx, opened) = counted_view(Duration::from_secs(5));
        drop(view.subscribe());

        tokio::time::sleep(Duration::from_secs(4)).await;
        assert!(view.is_active());
        tx.send(2).unwrap();
        tokio::time::sleep(Duration::from_millis(10)).await;
        let late = view.subscribe();
        assert_eq!(opened.load(Ordering::SeqCst), 1);
        assert_eq!(*late.borrow(), 2);
        drop(late);

        tokio::time::sleep(Duration::from_secs(6)).await;
        assert!(!view.is_active());

        // Nothing listens upstream once the view is torn down.
        tx.send_replace(9);
        let fresh = view.subscribe();
        assert_eq!(opened.load(Ordering::SeqCst), 2);
        assert_eq!(*fresh.borrow(), 9);
    }
}
