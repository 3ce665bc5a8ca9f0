//! Change notification for whatever renders the library.

use tokio::sync::watch;

/// Told whenever the game collection changes. Carries no payload.
pub trait RedrawSignal: Send + Sync {
    fn redraw(&self);
}

/// Ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRedraw;

impl RedrawSignal for NoRedraw {
    fn redraw(&self) {}
}

/// Adapts a closure into a [`RedrawSignal`].
pub struct RedrawFn<F>(pub F);

impl<F> RedrawSignal for RedrawFn<F>
where
    F: Fn() + Send + Sync,
{
    fn redraw(&self) {
        (self.0)()
    }
}

/// Publishes a generation counter over a `watch` channel.
///
/// Bursts of changes coalesce: a subscriber that wakes up late sees only the
/// latest generation. Sending never blocks and works with no subscribers.
#[derive(Debug)]
pub struct RedrawChannel {
    tx: watch::Sender<u64>,
}

impl RedrawChannel {
    /// Creates the channel and its first subscriber.
    pub fn new() -> (Self, watch::Receiver<u64>) {
        let (tx, rx) = watch::channel(0);
        (Self { tx }, rx)
    }

    /// Adds another subscriber.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.tx.subscribe()
    }

    /// Returns the current generation.
    pub fn generation(&self) -> u64 {
        *self.tx.borrow()
    }
}

impl RedrawSignal for RedrawChannel {
    fn redraw(&self) {
        self.tx.send_modify(|generation| *generation = generation.wrapping_add(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn channel_wakes_subscribers() {
        let (signal, mut rx) = RedrawChannel::new();
        signal.redraw();

        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), 1);
    }

    #[test]
    fn channel_coalesces_without_receivers() {
        let (signal, rx) = RedrawChannel::new();
        drop(rx);

        signal.redraw();
        signal.redraw();
        assert_eq!(signal.generation(), 2);
        assert_eq!(*signal.subscribe().borrow(), 2);
    }

    #[test]
    fn closure_adapter() {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);
        let signal = RedrawFn(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        signal.redraw();
        NoRedraw.redraw();
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
