//! Channel registry contract
//!
//! The registry is the single source of truth for which channels exist and
//! which one is active. Everything else (selectors, toolbar commands) only
//! reads it through [`ChannelRegistry`] and reacts to its change
//! notifications.

use crate::channel::{ChannelDescriptor, ChannelId};
use crate::error::RegistryError;
use bitflags::bitflags;
use std::collections::VecDeque;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, Weak};
use std::thread::{self, ThreadId};

/// BoxFuture type alias for registry requests that may complete later
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

bitflags! {
    /// What a single registry mutation changed
    ///
    /// Subscribers register an interest mask and are notified once per
    /// mutation whose change intersects it.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ChangeKind: u8 {
        /// A channel was registered or unregistered
        const CHANNEL_SET = 0b0001;
        /// The active channel pointer moved
        const ACTIVE_CHANNEL = 0b0010;
        /// A channel's scroll lock flipped
        const SCROLL_LOCK = 0b0100;
        /// A channel's buffer was appended to or cleared
        const CONTENT = 0b1000;
    }
}

/// Consistent read-only view of a registry, taken after a mutation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrySnapshot {
    /// Channels in registration order
    pub channels: Vec<ChannelDescriptor>,
    /// The active channel, absent only before first use
    pub active: Option<ChannelDescriptor>,
    /// Grows with every mutation; concurrent emissions can arrive out of
    /// order, so a lower revision than one already seen is stale
    pub revision: u64,
}

/// Notification callback
pub type ChangeHandler = Box<dyn FnMut(ChangeKind, &RegistrySnapshot) + Send>;

/// A handler plus the thread currently running it
struct HandlerSlot {
    handler: Mutex<ChangeHandler>,
    running_on: Mutex<Option<ThreadId>>,
    /// Notifications raised while the handler runs on its own thread
    nested: Mutex<VecDeque<(ChangeKind, RegistrySnapshot)>>,
}

impl HandlerSlot {
    fn new(handler: ChangeHandler) -> Self {
        Self {
            handler: Mutex::new(handler),
            running_on: Mutex::new(None),
            nested: Mutex::new(VecDeque::new()),
        }
    }

    fn is_running_on(&self, thread: ThreadId) -> bool {
        self.running_on
            .lock()
            .map(|running_on| *running_on == Some(thread))
            .unwrap_or(false)
    }

    fn set_running_on(&self, thread: Option<ThreadId>) {
        if let Ok(mut running_on) = self.running_on.lock() {
            *running_on = thread;
        }
    }

    fn pop_nested(&self) -> Option<(ChangeKind, RegistrySnapshot)> {
        self.nested.lock().ok()?.pop_front()
    }

    /// Run the handler for one notification
    ///
    /// A notification raised by the handler itself on this thread is queued
    /// and delivered right after the running call returns, while
    /// `still_subscribed` holds.
    fn deliver(
        &self,
        id: u64,
        change: ChangeKind,
        snapshot: &RegistrySnapshot,
        still_subscribed: impl Fn() -> bool,
    ) {
        let current = thread::current().id();
        if self.is_running_on(current) {
            if let Ok(mut nested) = self.nested.lock() {
                nested.push_back((change, snapshot.clone()));
            }
            return;
        }

        let Ok(mut handler) = self.handler.lock() else {
            log::warn!("Subscriber {} panicked earlier, skipping", id);
            return;
        };
        self.set_running_on(Some(current));
        (handler)(change, snapshot);
        while let Some((change, snapshot)) = self.pop_nested() {
            if !still_subscribed() {
                log::debug!("Subscriber {} released, discarding {:?}", id, change);
                continue;
            }
            (handler)(change, &snapshot);
        }
        self.set_running_on(None);
    }
}

type SharedHandler = Arc<HandlerSlot>;

struct ListenerEntry {
    id: u64,
    interest: ChangeKind,
    handler: SharedHandler,
}

#[derive(Default)]
struct ListenerTable {
    next_id: u64,
    entries: Vec<ListenerEntry>,
}

impl ListenerTable {
    fn contains(&self, id: u64) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }

    fn slot(&self, id: u64) -> Option<SharedHandler> {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| entry.handler.clone())
    }
}

fn table_contains(table: &Mutex<ListenerTable>, id: u64) -> bool {
    table.lock().map(|table| table.contains(id)).unwrap_or(false)
}

/// Subscriber list a registry implementation embeds to deliver notifications
///
/// Handlers run on the emitting thread, in subscription order, without any
/// registry lock held. A handler may read the registry or drop subscriptions.
/// Emissions from different threads wait for each other per handler; a
/// notification that would re-enter a handler on its own thread is queued
/// until that handler returns.
#[derive(Clone, Default)]
pub struct Listeners {
    table: Arc<Mutex<ListenerTable>>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for every change intersecting `interest`
    pub fn subscribe(&self, interest: ChangeKind, handler: ChangeHandler) -> Subscription {
        let Ok(mut table) = self.table.lock() else {
            log::warn!("Listener table poisoned, subscription ignored");
            return Subscription::detached();
        };
        let id = table.next_id;
        table.next_id += 1;
        table.entries.push(ListenerEntry {
            id,
            interest,
            handler: Arc::new(HandlerSlot::new(handler)),
        });

        Subscription {
            id,
            table: Arc::downgrade(&self.table),
        }
    }

    /// Number of live subscriptions
    pub fn len(&self) -> usize {
        self.table.lock().map(|table| table.entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Deliver `change` to every interested subscriber
    pub fn emit(&self, change: ChangeKind, snapshot: &RegistrySnapshot) {
        if change.is_empty() {
            return;
        }

        let targets: Vec<(u64, SharedHandler)> = match self.table.lock() {
            Ok(table) => table
                .entries
                .iter()
                .filter(|entry| entry.interest.intersects(change))
                .map(|entry| (entry.id, entry.handler.clone()))
                .collect(),
            Err(_) => return,
        };

        for (id, slot) in targets {
            // Released by an earlier handler of this same emission
            if !table_contains(&self.table, id) {
                continue;
            }
            slot.deliver(id, change, snapshot, || table_contains(&self.table, id));
        }
    }
}

/// Handle to a registry subscription
///
/// The subscription is released exactly once: on [`Subscription::release`]
/// or when the handle is dropped, whichever comes first.
#[must_use = "dropping a Subscription releases it immediately"]
pub struct Subscription {
    id: u64,
    table: Weak<Mutex<ListenerTable>>,
}

impl Subscription {
    fn detached() -> Self {
        Self {
            id: u64::MAX,
            table: Weak::new(),
        }
    }

    /// Whether notifications are still delivered to this subscription
    pub fn is_active(&self) -> bool {
        self.table
            .upgrade()
            .and_then(|table| table.lock().ok().map(|table| table.contains(self.id)))
            .unwrap_or(false)
    }

    /// Deliver one notification to this subscription's handler alone,
    /// regardless of its interest mask
    ///
    /// Lets an owner publish its initial state through the same serialized
    /// path as later changes. Returns `false` once the subscription is gone.
    pub fn notify(&self, change: ChangeKind, snapshot: &RegistrySnapshot) -> bool {
        let Some(table) = self.table.upgrade() else {
            return false;
        };
        let slot = match table.lock() {
            Ok(entries) => entries.slot(self.id),
            Err(_) => None,
        };
        let Some(slot) = slot else {
            return false;
        };
        slot.deliver(self.id, change, snapshot, || table_contains(&table, self.id));
        true
    }

    /// Release the subscription now
    pub fn release(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(table) = self.table.upgrade() {
            if let Ok(mut table) = table.lock() {
                table.entries.retain(|entry| entry.id != self.id);
            }
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}

/// Read and request access to the live set of output channels
///
/// Implementations must emit exactly one notification per mutation, after
/// their own state lock is released, carrying a snapshot taken after the
/// mutation.
pub trait ChannelRegistry: Send + Sync {
    /// All channels in registration order
    fn list_channels(&self) -> Vec<ChannelDescriptor>;

    /// The active channel, absent only before the first channel registers
    fn active_channel(&self) -> Option<ChannelDescriptor>;

    /// Look up a channel by id
    ///
    /// With no id the registry applies its own default rule.
    fn channel(&self, id: Option<&ChannelId>) -> Option<ChannelDescriptor>;

    /// Make a channel active and visible
    ///
    /// Resolves once the registry acknowledges the channel as active.
    fn request_show<'a>(
        &'a self,
        id: &'a ChannelId,
    ) -> BoxFuture<'a, Result<ChannelDescriptor, RegistryError>>;

    /// Subscribe to every change intersecting `interest`
    fn subscribe(&self, interest: ChangeKind, handler: ChangeHandler) -> Subscription;

    /// Clear the active channel's buffer
    fn clear_active_channel(&self);

    /// Set the scroll lock of one channel
    fn set_scroll_lock(&self, id: &ChannelId, scroll_lock: bool) -> Result<(), RegistryError>;

    fn snapshot(&self) -> RegistrySnapshot {
        RegistrySnapshot {
            channels: self.list_channels(),
            active: self.active_channel(),
            revision: 0,
        }
    }

    /// Fired when a channel is registered or unregistered
    fn on_channel_set_changed(&self, handler: ChangeHandler) -> Subscription {
        self.subscribe(ChangeKind::CHANNEL_SET, handler)
    }

    /// Fired when the active channel changes
    fn on_active_channel_changed(&self, handler: ChangeHandler) -> Subscription {
        self.subscribe(ChangeKind::ACTIVE_CHANNEL, handler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_handler(counter: &Arc<AtomicUsize>) -> ChangeHandler {
        let counter = counter.clone();
        Box::new(move |_, _| {
            counter.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn test_emit_respects_interest() {
        let listeners = Listeners::new();
        let set_calls = Arc::new(AtomicUsize::new(0));
        let active_calls = Arc::new(AtomicUsize::new(0));

        let _set = listeners.subscribe(ChangeKind::CHANNEL_SET, counting_handler(&set_calls));
        let _active =
            listeners.subscribe(ChangeKind::ACTIVE_CHANNEL, counting_handler(&active_calls));

        let snapshot = RegistrySnapshot::default();
        listeners.emit(ChangeKind::CHANNEL_SET, &snapshot);
        listeners.emit(ChangeKind::CONTENT, &snapshot);
        listeners.emit(
            ChangeKind::CHANNEL_SET | ChangeKind::ACTIVE_CHANNEL,
            &snapshot,
        );

        assert_eq!(set_calls.load(Ordering::SeqCst), 2);
        assert_eq!(active_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_combined_interest_delivers_once_per_mutation() {
        let listeners = Listeners::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let _sub = listeners.subscribe(
            ChangeKind::CHANNEL_SET | ChangeKind::ACTIVE_CHANNEL,
            counting_handler(&calls),
        );

        listeners.emit(
            ChangeKind::CHANNEL_SET | ChangeKind::ACTIVE_CHANNEL,
            &RegistrySnapshot::default(),
        );

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_drop_releases_subscription() {
        let listeners = Listeners::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let sub = listeners.subscribe(ChangeKind::all(), counting_handler(&calls));
        assert!(sub.is_active());
        assert_eq!(listeners.len(), 1);

        drop(sub);
        listeners.emit(ChangeKind::CHANNEL_SET, &RegistrySnapshot::default());

        assert!(listeners.is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_release_during_emission_skips_released_handler() {
        let listeners = Listeners::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let second: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));

        let slot = second.clone();
        let _first = listeners.subscribe(
            ChangeKind::CHANNEL_SET,
            Box::new(move |_, _| {
                if let Ok(mut slot) = slot.lock() {
                    slot.take();
                }
            }),
        );
        let sub = listeners.subscribe(ChangeKind::CHANNEL_SET, counting_handler(&calls));
        *second.lock().unwrap() = Some(sub);

        listeners.emit(ChangeKind::CHANNEL_SET, &RegistrySnapshot::default());

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(listeners.len(), 1);
    }

    #[test]
    fn test_subscription_outliving_listeners_is_inactive() {
        let listeners = Listeners::new();
        let sub = listeners.subscribe(ChangeKind::all(), Box::new(|_, _| {}));
        drop(listeners);

        assert!(!sub.is_active());
        sub.release();
    }

    #[test]
    fn test_reentrant_notification_is_delivered_after_handler_returns() {
        let listeners = Listeners::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let inner = listeners.clone();
        let sink = seen.clone();
        let _sub = listeners.subscribe(
            ChangeKind::CONTENT,
            Box::new(move |_, snapshot| {
                sink.lock().unwrap().push(snapshot.revision);
                if snapshot.revision == 1 {
                    let newer = RegistrySnapshot {
                        revision: 2,
                        ..RegistrySnapshot::default()
                    };
                    inner.emit(ChangeKind::CONTENT, &newer);
                    // Still inside the first call
                    assert_eq!(sink.lock().unwrap().len(), 1);
                }
            }),
        );

        let first = RegistrySnapshot {
            revision: 1,
            ..RegistrySnapshot::default()
        };
        listeners.emit(ChangeKind::CONTENT, &first);

        assert_eq!(*seen.lock().unwrap(), vec![1, 2]);
    }

    #[test]
    fn test_queued_notification_skipped_after_release() {
        let listeners = Listeners::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let own: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));

        let inner = listeners.clone();
        let counter = calls.clone();
        let slot = own.clone();
        let sub = listeners.subscribe(
            ChangeKind::CONTENT,
            Box::new(move |change, snapshot| {
                if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                    inner.emit(change, snapshot);
                    slot.lock().unwrap().take();
                }
            }),
        );
        *own.lock().unwrap() = Some(sub);

        listeners.emit(ChangeKind::CONTENT, &RegistrySnapshot::default());

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(listeners.is_empty());
    }

    #[test]
    fn test_notify_reaches_only_its_own_handler() {
        let listeners = Listeners::new();
        let mine = Arc::new(AtomicUsize::new(0));
        let other = Arc::new(AtomicUsize::new(0));
        let sub = listeners.subscribe(ChangeKind::CONTENT, counting_handler(&mine));
        let _other = listeners.subscribe(ChangeKind::all(), counting_handler(&other));

        assert!(sub.notify(ChangeKind::CHANNEL_SET, &RegistrySnapshot::default()));

        assert_eq!(mine.load(Ordering::SeqCst), 1);
        assert_eq!(other.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_notify_after_listeners_dropped_is_refused() {
        let listeners = Listeners::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let sub = listeners.subscribe(ChangeKind::all(), counting_handler(&calls));
        drop(listeners);

        assert!(!sub.notify(ChangeKind::CONTENT, &RegistrySnapshot::default()));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_concurrent_emissions_all_delivered() {
        let listeners = Listeners::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let _sub = listeners.subscribe(
            ChangeKind::CONTENT,
            Box::new(move |_, _| {
                counter.fetch_add(1, Ordering::SeqCst);
                thread::sleep(std::time::Duration::from_millis(1));
            }),
        );

        let emitters: Vec<_> = (0..4)
            .map(|_| {
                let listeners = listeners.clone();
                thread::spawn(move || {
                    for _ in 0..25 {
                        listeners.emit(ChangeKind::CONTENT, &RegistrySnapshot::default());
                    }
                })
            })
            .collect();
        for emitter in emitters {
            emitter.join().unwrap();
        }

        assert_eq!(calls.load(Ordering::SeqCst), 100);
    }
}
