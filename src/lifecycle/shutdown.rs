//! Stop coordination between the signal watcher and the server.
//!
//! A `watch` channel holds a single "stopping" flag. Listeners created after
//! the stop was requested still see it, and dropping the coordinator counts as
//! a stop so a forgotten handle cannot keep the relay serving.

use tokio::sync::watch;

/// Owner side: requests the stop.
#[derive(Debug)]
pub struct Shutdown {
    stopping: watch::Sender<bool>,
}

/// Listener side: resolves once a stop was requested.
#[derive(Debug, Clone)]
pub struct ShutdownSignal {
    stopping: watch::Receiver<bool>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (stopping, _) = watch::channel(false);
        Self { stopping }
    }

    /// Hand out a listener for the server or any background task.
    pub fn subscribe(&self) -> ShutdownSignal {
        ShutdownSignal {
            stopping: self.stopping.subscribe(),
        }
    }

    /// Ask every listener, present and future, to stop.
    pub fn trigger(&self) {
        self.stopping.send_replace(true);
    }

    pub fn is_triggered(&self) -> bool {
        *self.stopping.borrow()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownSignal {
    /// Wait for the stop request (or for the coordinator to go away).
    pub async fn recv(&mut self) {
        let _ = self.stopping.wait_for(|stopping| *stopping).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_trigger_wakes_waiting_listeners() {
        let shutdown = Shutdown::new();
        let mut server = shutdown.subscribe();
        let mut watcher = server.clone();

        let waiting = tokio::spawn(async move { server.recv().await });
        shutdown.trigger();

        tokio::time::timeout(Duration::from_secs(1), waiting)
            .await
            .expect("listener should wake")
            .unwrap();
        tokio::time::timeout(Duration::from_secs(1), watcher.recv())
            .await
            .expect("clone should wake too");
    }

    #[tokio::test]
    async fn test_late_listener_sees_earlier_trigger() {
        let shutdown = Shutdown::default();
        shutdown.trigger();
        assert!(shutdown.is_triggered());

        let mut late = shutdown.subscribe();
        tokio::time::timeout(Duration::from_secs(1), late.recv())
            .await
            .expect("stop requested before subscribing must not be missed");
    }

    #[tokio::test]
    async fn test_dropping_coordinator_releases_listeners() {
        let shutdown = Shutdown::new();
        let mut listener = shutdown.subscribe();
        drop(shutdown);

        tokio::time::timeout(Duration::from_secs(1), listener.recv())
            .await
            .expect("listener should not hang once the coordinator is gone");
    }

    #[tokio::test]
    async fn test_untriggered_listener_keeps_waiting() {
        let shutdown = Shutdown::new();
        let mut listener = shutdown.subscribe();

        let waited = tokio::time::timeout(Duration::from_millis(50), listener.recv()).await;
        assert!(waited.is_err());
        assert!(!shutdown.is_triggered());
    }
}
