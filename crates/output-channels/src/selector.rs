//! Channel selector synchronization
//!
//! A [`ChannelSelector`] keeps the switcher widget's option list (sorted
//! labels plus the selected index) in step with the registry.

use crate::channel::ChannelId;
use crate::registry::{ChangeKind, ChannelRegistry, RegistrySnapshot, Subscription};
use std::sync::{Arc, Mutex};

/// Redraw-ready view of the available channels
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectorProjection {
    /// Every registered label, ascending, duplicates kept
    pub sorted_labels: Vec<String>,
    /// Index of the active channel's label; 0 when absent or list empty
    pub selected_index: usize,
}

impl SelectorProjection {
    /// Derive the projection from a registry snapshot
    pub fn from_snapshot(snapshot: &RegistrySnapshot) -> Self {
        let mut sorted_labels: Vec<String> = snapshot
            .channels
            .iter()
            .map(|channel| channel.label.clone())
            .collect();
        sorted_labels.sort();

        let selected_index = snapshot
            .active
            .as_ref()
            .and_then(|active| sorted_labels.iter().position(|label| *label == active.label))
            .unwrap_or(0);

        Self {
            sorted_labels,
            selected_index,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sorted_labels.is_empty()
    }

    /// Label at the selected index, `None` for an empty list
    pub fn selected_label(&self) -> Option<&str> {
        self.sorted_labels
            .get(self.selected_index)
            .map(String::as_str)
    }
}

/// Keeps a [`SelectorProjection`] current for as long as it lives
///
/// The projection is recomputed synchronously whenever a channel is added or
/// removed or the active channel changes, and handed to the redraw callback.
pub struct ChannelSelector {
    registry: Arc<dyn ChannelRegistry>,
    projection: Arc<Mutex<Published>>,
    subscriptions: Vec<Subscription>,
}

/// Last projection handed out, with the registry revision it came from
#[derive(Default)]
struct Published {
    revision: u64,
    projection: SelectorProjection,
}

impl ChannelSelector {
    /// Start following the registry, then publish the initial projection
    ///
    /// The initial publish goes through the subscription so it is
    /// serialized with concurrent changes, and a change made between
    /// subscribing and reading the first snapshot still reaches the handler.
    pub fn new<F>(registry: Arc<dyn ChannelRegistry>, on_redraw: F) -> Self
    where
        F: FnMut(&SelectorProjection) + Send + 'static,
    {
        let interest = ChangeKind::CHANNEL_SET | ChangeKind::ACTIVE_CHANNEL;
        let on_redraw = Arc::new(Mutex::new(on_redraw));
        let projection = Arc::new(Mutex::new(Published::default()));

        let target = projection.clone();
        let redraw = on_redraw.clone();
        let subscription = registry.subscribe(
            interest,
            Box::new(move |_, snapshot| Self::recompute(&*target, &*redraw, snapshot)),
        );

        let initial = registry.snapshot();
        if !subscription.notify(interest, &initial) {
            Self::recompute(&*projection, &*on_redraw, &initial);
        }

        Self {
            registry,
            projection,
            subscriptions: vec![subscription],
        }
    }

    fn recompute<F>(
        projection: &Mutex<Published>,
        on_redraw: &Mutex<F>,
        snapshot: &RegistrySnapshot,
    ) where
        F: FnMut(&SelectorProjection),
    {
        let next = SelectorProjection::from_snapshot(snapshot);
        if let Ok(mut published) = projection.lock() {
            if snapshot.revision < published.revision {
                return;
            }
            published.revision = snapshot.revision;
            published.projection = next.clone();
        }
        if let Ok(mut redraw) = on_redraw.lock() {
            (redraw)(&next);
        }
    }

    /// Current projection
    pub fn projection(&self) -> SelectorProjection {
        self.projection
            .lock()
            .map(|published| published.projection.clone())
            .unwrap_or_default()
    }

    /// Map an option picked in the switcher back to a channel id
    ///
    /// Scans the registry in registration order and keeps the last channel
    /// whose label matches, so with colliding labels this can name a
    /// different channel than the one the forward index points at. Unknown
    /// text is returned as-is.
    pub fn resolve_option(&self, option: &str) -> ChannelId {
        self.registry
            .list_channels()
            .into_iter()
            .filter(|channel| channel.label == option)
            .last()
            .map(|channel| channel.id)
            .unwrap_or_else(|| ChannelId::from(option))
    }

    /// Resolve the option at `index` of the current projection
    pub fn resolve_index(&self, index: usize) -> Option<ChannelId> {
        let label = self.projection().sorted_labels.get(index).cloned()?;
        Some(self.resolve_option(&label))
    }

    /// Release registry subscriptions; later calls do nothing
    pub fn dispose(&mut self) {
        if self.subscriptions.is_empty() {
            return;
        }
        log::debug!("Disposing channel selector");
        self.subscriptions.clear();
    }

    pub fn is_disposed(&self) -> bool {
        self.subscriptions.is_empty()
    }
}

impl Drop for ChannelSelector {
    fn drop(&mut self) {
        self.dispose();
    }
}
