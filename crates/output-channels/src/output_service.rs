//! In-memory channel registry
//!
//! Owns every registered [`OutputChannel`] with its line buffer and the
//! active-channel pointer. All mutations follow the same shape: take the
//! state lock, mutate, take a snapshot, release the lock, then notify.

use crate::channel::{ChannelContent, ChannelDescriptor, ChannelId, OutputChannel};
use crate::error::RegistryError;
use crate::registry::{
    BoxFuture, ChangeHandler, ChangeKind, ChannelRegistry, Listeners, RegistrySnapshot,
    Subscription,
};
use std::sync::{Mutex, MutexGuard};

/// Default per-channel line cap
pub const DEFAULT_MAX_LINES: usize = 10_000;

#[derive(Debug, Default)]
struct ServiceState {
    /// Registration order
    channels: Vec<OutputChannel>,
    active: Option<ChannelId>,
    default_channel: Option<ChannelId>,
    revision: u64,
}

impl ServiceState {
    fn find(&self, id: &ChannelId) -> Option<&OutputChannel> {
        self.channels.iter().find(|channel| &channel.id == id)
    }

    fn find_mut(&mut self, id: &ChannelId) -> Option<&mut OutputChannel> {
        self.channels.iter_mut().find(|channel| &channel.id == id)
    }

    fn active(&self) -> Option<&OutputChannel> {
        self.active.as_ref().and_then(|id| self.find(id))
    }

    /// Default rule for an absent id: active, then configured default, then
    /// the first registered channel
    fn resolve(&self, id: Option<&ChannelId>) -> Option<&OutputChannel> {
        match id {
            Some(id) => self.find(id),
            None => self
                .active()
                .or_else(|| self.default_channel.as_ref().and_then(|id| self.find(id)))
                .or_else(|| self.channels.first()),
        }
    }

    fn snapshot(&self) -> RegistrySnapshot {
        RegistrySnapshot {
            channels: self.channels.iter().map(OutputChannel::descriptor).collect(),
            active: self.active().map(OutputChannel::descriptor),
            revision: self.revision,
        }
    }
}

/// The output panel's channel registry
pub struct OutputService {
    state: Mutex<ServiceState>,
    listeners: Listeners,
    max_lines: usize,
}

impl OutputService {
    pub fn new() -> Self {
        Self::with_max_lines(DEFAULT_MAX_LINES)
    }

    /// Create a registry whose channels keep at most `max_lines` lines each
    pub fn with_max_lines(max_lines: usize) -> Self {
        Self {
            state: Mutex::new(ServiceState::default()),
            listeners: Listeners::new(),
            max_lines,
        }
    }

    /// Channel used when a lookup has no id and nothing is active yet
    pub fn with_default_channel(self, id: impl Into<ChannelId>) -> Self {
        self.lock().default_channel = Some(id.into());
        self
    }

    fn lock(&self) -> MutexGuard<'_, ServiceState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Run a mutation and notify subscribers with what it changed
    fn mutate<T>(
        &self,
        f: impl FnOnce(&mut ServiceState) -> Result<(T, ChangeKind), RegistryError>,
    ) -> Result<T, RegistryError> {
        let (value, change, snapshot) = {
            let mut state = self.lock();
            let (value, change) = f(&mut state)?;
            if change.is_empty() {
                return Ok(value);
            }
            state.revision += 1;
            (value, change, state.snapshot())
        };

        self.listeners.emit(change, &snapshot);
        Ok(value)
    }

    /// Register a new channel
    ///
    /// The first channel registered into an empty registry becomes active.
    pub fn register_channel(
        &self,
        id: impl Into<ChannelId>,
        label: impl Into<String>,
    ) -> Result<ChannelDescriptor, RegistryError> {
        let id = id.into();
        let label = label.into();
        let max_lines = self.max_lines;

        let descriptor = self.mutate(|state| {
            if state.find(&id).is_some() {
                return Err(RegistryError::DuplicateChannel(id.clone()));
            }

            let channel = OutputChannel::new(id.clone(), label, max_lines);
            let descriptor = channel.descriptor();
            state.channels.push(channel);

            let mut change = ChangeKind::CHANNEL_SET;
            if state.active().is_none() {
                state.active = Some(id.clone());
                change |= ChangeKind::ACTIVE_CHANNEL;
            }
            Ok((descriptor, change))
        })?;

        log::debug!(
            "Registered output channel '{}' ({})",
            descriptor.label,
            descriptor.id
        );
        Ok(descriptor)
    }

    /// Remove a channel and its buffer
    ///
    /// Removing the active channel moves the active pointer to the default
    /// channel, or the first remaining one.
    pub fn unregister_channel(&self, id: &ChannelId) -> Result<ChannelDescriptor, RegistryError> {
        let descriptor = self.mutate(|state| {
            let Some(position) = state.channels.iter().position(|channel| &channel.id == id)
            else {
                return Err(RegistryError::ChannelNotFound(id.clone()));
            };
            let removed = state.channels.remove(position);

            let mut change = ChangeKind::CHANNEL_SET;
            if state.active.as_ref() == Some(id) {
                state.active = state.resolve(None).map(|channel| channel.id.clone());
                change |= ChangeKind::ACTIVE_CHANNEL;
            }
            Ok((removed.descriptor(), change))
        })?;

        log::debug!("Unregistered output channel '{}'", descriptor.label);
        Ok(descriptor)
    }

    /// Make a channel active
    ///
    /// Showing the channel that is already active is acknowledged without a
    /// notification.
    pub fn show(&self, id: &ChannelId) -> Result<ChannelDescriptor, RegistryError> {
        self.mutate(|state| {
            let Some(channel) = state.find(id) else {
                return Err(RegistryError::ChannelNotFound(id.clone()));
            };
            let descriptor = channel.descriptor();

            if state.active.as_ref() == Some(id) {
                return Ok((descriptor, ChangeKind::empty()));
            }
            state.active = Some(id.clone());
            Ok((descriptor, ChangeKind::ACTIVE_CHANNEL))
        })
    }

    /// Append text to a channel, returning the number of lines added
    pub fn append(&self, id: &ChannelId, text: &str) -> Result<usize, RegistryError> {
        self.mutate(|state| {
            let channel = state
                .find_mut(id)
                .ok_or_else(|| RegistryError::ChannelNotFound(id.clone()))?;
            let added = channel.append(text);
            let change = if added > 0 {
                ChangeKind::CONTENT
            } else {
                ChangeKind::empty()
            };
            Ok((added, change))
        })
    }

    /// Clear one channel's buffer
    pub fn clear(&self, id: &ChannelId) -> Result<(), RegistryError> {
        self.mutate(|state| {
            let channel = state
                .find_mut(id)
                .ok_or_else(|| RegistryError::ChannelNotFound(id.clone()))?;
            channel.clear();
            Ok(((), ChangeKind::CONTENT))
        })
    }

    /// Buffered lines of one channel, oldest first
    pub fn lines(&self, id: &ChannelId) -> Option<Vec<String>> {
        self.lock().find(id).map(OutputChannel::lines)
    }

    /// Buffered lines of the active channel, empty when nothing is active
    pub fn active_lines(&self) -> Vec<String> {
        self.lock()
            .active()
            .map(OutputChannel::lines)
            .unwrap_or_default()
    }

    /// Identity, lines and append count of the active channel, read together
    pub fn active_content(&self) -> Option<ChannelContent> {
        self.lock().active().map(OutputChannel::content)
    }

    /// Number of live subscriptions, across all subscribers
    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }
}

impl Default for OutputService {
    fn default() -> Self {
        Self::new()
    }
}

impl ChannelRegistry for OutputService {
    fn list_channels(&self) -> Vec<ChannelDescriptor> {
        self.lock()
            .channels
            .iter()
            .map(OutputChannel::descriptor)
            .collect()
    }

    fn active_channel(&self) -> Option<ChannelDescriptor> {
        self.lock().active().map(OutputChannel::descriptor)
    }

    fn channel(&self, id: Option<&ChannelId>) -> Option<ChannelDescriptor> {
        self.lock().resolve(id).map(OutputChannel::descriptor)
    }

    fn request_show<'a>(
        &'a self,
        id: &'a ChannelId,
    ) -> BoxFuture<'a, Result<ChannelDescriptor, RegistryError>> {
        Box::pin(async move { self.show(id) })
    }

    fn subscribe(&self, interest: ChangeKind, handler: ChangeHandler) -> Subscription {
        self.listeners.subscribe(interest, handler)
    }

    fn clear_active_channel(&self) {
        let active = self.lock().active.clone();
        if let Some(id) = active {
            if let Err(e) = self.clear(&id) {
                log::debug!("Nothing to clear: {}", e);
            }
        }
    }

    fn set_scroll_lock(&self, id: &ChannelId, scroll_lock: bool) -> Result<(), RegistryError> {
        self.mutate(|state| {
            let channel = state
                .find_mut(id)
                .ok_or_else(|| RegistryError::ChannelNotFound(id.clone()))?;
            if channel.scroll_lock == scroll_lock {
                return Ok(((), ChangeKind::empty()));
            }
            channel.scroll_lock = scroll_lock;
            Ok(((), ChangeKind::SCROLL_LOCK))
        })
    }

    fn snapshot(&self) -> RegistrySnapshot {
        self.lock().snapshot()
    }
}
