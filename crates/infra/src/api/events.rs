//! Error event listeners
//!
//! Every error the client returns from a request is also broadcast to the
//! listeners registered here. Listeners run synchronously on the task that
//! produced the error, after the registry lock has been released, so a
//! listener may register or remove listeners itself.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use credify_domain::CredifyError;
use parking_lot::RwLock;
use tracing::error;

/// Event channels exposed by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClientEvent {
    /// A request failed; the listener receives the normalized error
    Error,
}

/// Handle returned by [`EventEmitter::on`], used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

type ErrorListener = Arc<dyn Fn(&CredifyError) + Send + Sync>;

/// Registry of error listeners
#[derive(Default)]
pub struct EventEmitter {
    next_id: AtomicU64,
    error_listeners: RwLock<Vec<(ListenerId, ErrorListener)>>,
}

impl EventEmitter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for `event`
    pub fn on<F>(&self, event: ClientEvent, listener: F) -> ListenerId
    where
        F: Fn(&CredifyError) + Send + Sync + 'static,
    {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        match event {
            ClientEvent::Error => self.error_listeners.write().push((id, Arc::new(listener))),
        }
        id
    }

    /// Remove a listener
    ///
    /// # Returns
    /// `true` if the listener was registered
    pub fn off(&self, event: ClientEvent, id: ListenerId) -> bool {
        match event {
            ClientEvent::Error => {
                let mut listeners = self.error_listeners.write();
                let before = listeners.len();
                listeners.retain(|(existing, _)| *existing != id);
                listeners.len() != before
            }
        }
    }

    /// Number of listeners registered for `event`
    #[must_use]
    pub fn listener_count(&self, event: ClientEvent) -> usize {
        match event {
            ClientEvent::Error => self.error_listeners.read().len(),
        }
    }

    /// Broadcast `err` to every error listener
    ///
    /// A panicking listener is logged and skipped; the remaining listeners
    /// still run and the panic never reaches the caller.
    ///
    /// # Returns
    /// Number of listeners that completed without panicking
    pub fn emit_error(&self, err: &CredifyError) -> usize {
        let snapshot: Vec<(ListenerId, ErrorListener)> = self.error_listeners.read().clone();

        let mut delivered = 0;
        for (id, listener) in snapshot {
            match catch_unwind(AssertUnwindSafe(|| listener(err))) {
                Ok(()) => delivered += 1,
                Err(payload) => {
                    let reason = payload
                        .downcast_ref::<&str>()
                        .map(ToString::to_string)
                        .or_else(|| payload.downcast_ref::<String>().cloned())
                        .unwrap_or_else(|| "unknown panic".to_string());
                    error!(listener = id.0, %reason, "error listener panicked");
                }
            }
        }
        delivered
    }
}

impl std::fmt::Debug for EventEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventEmitter")
            .field("error_listeners", &self.listener_count(ClientEvent::Error))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use super::*;

    fn sample_error() -> CredifyError {
        CredifyError::network("connection reset")
    }

    #[test]
    fn delivers_to_all_listeners() {
        let emitter = EventEmitter::new();
        let hits = Arc::new(AtomicUsize::new(0));

        for _ in 0..3 {
            let hits = Arc::clone(&hits);
            emitter.on(ClientEvent::Error, move |_| {
                hits.fetch_add(1, Ordering::SeqCst);
            });
        }

        assert_eq!(emitter.emit_error(&sample_error()), 3);
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn off_stops_delivery() {
        let emitter = EventEmitter::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let id = emitter.on(ClientEvent::Error, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert!(emitter.off(ClientEvent::Error, id));
        assert!(!emitter.off(ClientEvent::Error, id));
        assert_eq!(emitter.emit_error(&sample_error()), 0);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn panicking_listener_does_not_block_others() {
        let emitter = EventEmitter::new();
        let seen = Arc::new(parking_lot::Mutex::new(Vec::new()));

        emitter.on(ClientEvent::Error, |_| panic!("listener bug"));
        let sink = Arc::clone(&seen);
        emitter.on(ClientEvent::Error, move |err| sink.lock().push(err.clone()));

        assert_eq!(emitter.emit_error(&sample_error()), 1);
        assert_eq!(seen.lock().as_slice(), &[sample_error()]);
    }

    #[test]
    fn listener_may_unsubscribe_itself() {
        let emitter = Arc::new(EventEmitter::new());
        let slot = Arc::new(parking_lot::Mutex::new(None::<ListenerId>));

        let weak = Arc::downgrade(&emitter);
        let own_id = Arc::clone(&slot);
        let id = emitter.on(ClientEvent::Error, move |_| {
            if let (Some(emitter), Some(id)) = (weak.upgrade(), *own_id.lock()) {
                emitter.off(ClientEvent::Error, id);
            }
        });
        *slot.lock() = Some(id);

        emitter.emit_error(&sample_error());
        assert_eq!(emitter.listener_count(ClientEvent::Error), 0);
    }

    #[test]
    fn ids_are_unique() {
        let emitter = EventEmitter::new();
        let a = emitter.on(ClientEvent::Error, |_| {});
        let b = emitter.on(ClientEvent::Error, |_| {});
        assert_ne!(a, b);
        assert_eq!(emitter.listener_count(ClientEvent::Error), 2);
    }
}
