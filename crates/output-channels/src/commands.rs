//! Output panel commands
//!
//! The panel toolbar and command palette only ever do four things to the
//! output panel. They are a closed set, so they are an enum rather than a
//! family of action objects.

use crate::channel::{ChannelDescriptor, ChannelId};
use crate::registry::{ChangeKind, ChannelRegistry, RegistrySnapshot, Subscription};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// The panel hosting the output view
pub trait PanelHost: Send + Sync {
    /// Show the panel when hidden, hide it when shown
    fn toggle_panel_visibility(&self);

    /// Move keyboard focus into the panel
    fn focus_panel(&self);
}

/// Result of running an [`OutputCommand`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    PanelToggled,
    Cleared,
    /// New scroll lock of the active channel, `None` with nothing active
    ScrollLockToggled(Option<bool>),
    /// The channel now shown, `None` when the id resolved to nothing
    Switched(Option<ChannelDescriptor>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputCommand {
    ToggleVisibility,
    Clear,
    ToggleScrollLock,
    /// Switch to a channel; `None` lets the registry pick its default
    Switch(Option<ChannelId>),
}

impl OutputCommand {
    pub async fn execute(
        self,
        registry: &dyn ChannelRegistry,
        panel: &dyn PanelHost,
    ) -> CommandOutcome {
        match self {
            Self::ToggleVisibility => {
                panel.toggle_panel_visibility();
                CommandOutcome::PanelToggled
            }
            Self::Clear => {
                registry.clear_active_channel();
                panel.focus_panel();
                CommandOutcome::Cleared
            }
            Self::ToggleScrollLock => {
                CommandOutcome::ScrollLockToggled(toggle_scroll_lock(registry))
            }
            Self::Switch(channel_id) => {
                CommandOutcome::Switched(switch_to(registry, channel_id.as_ref()).await)
            }
        }
    }
}

/// Flip the active channel's scroll lock, returning the new value
fn toggle_scroll_lock(registry: &dyn ChannelRegistry) -> Option<bool> {
    let active = registry.active_channel()?;
    let scroll_lock = !active.scroll_lock;
    match registry.set_scroll_lock(&active.id, scroll_lock) {
        Ok(()) => Some(scroll_lock),
        Err(e) => {
            log::debug!("Scroll lock not toggled: {}", e);
            None
        }
    }
}

async fn switch_to(
    registry: &dyn ChannelRegistry,
    channel_id: Option<&ChannelId>,
) -> Option<ChannelDescriptor> {
    let Some(channel) = registry.channel(channel_id) else {
        log::debug!("No output channel resolved for {:?}", channel_id);
        return None;
    };

    match registry.request_show(&channel.id).await {
        Ok(shown) => {
            log::debug!("Switched output to '{}'", shown.label);
            Some(shown)
        }
        Err(e) => {
            log::debug!("Output switch not satisfied: {}", e);
            None
        }
    }
}

/// Makes a channel the active, visible one
#[derive(Clone)]
pub struct SwitchCommand {
    registry: Arc<dyn ChannelRegistry>,
}

impl SwitchCommand {
    pub fn new(registry: Arc<dyn ChannelRegistry>) -> Self {
        Self { registry }
    }

    /// Show `channel_id`, or the registry's default channel when absent
    ///
    /// Completes once the registry acknowledges the switch. An id that does
    /// not resolve yields `None` and leaves the registry untouched.
    pub async fn run(&self, channel_id: Option<ChannelId>) -> Option<ChannelDescriptor> {
        switch_to(self.registry.as_ref(), channel_id.as_ref()).await
    }
}

/// Scroll-lock toggle with a checked state that follows the active channel
///
/// Scroll lock belongs to each channel, so the checked state is re-read
/// whenever the active channel changes.
pub struct ScrollLockToggle {
    registry: Arc<dyn ChannelRegistry>,
    checked: Arc<AtomicBool>,
    subscriptions: Vec<Subscription>,
}

impl ScrollLockToggle {
    /// Start following the registry, then read the initial checked state
    pub fn new<F>(registry: Arc<dyn ChannelRegistry>, on_checked: F) -> Self
    where
        F: FnMut(bool) + Send + 'static,
    {
        let checked = Arc::new(AtomicBool::new(false));
        let last_revision = Arc::new(Mutex::new(0));

        let mirror = checked.clone();
        let seen = last_revision.clone();
        let on_checked = Mutex::new(on_checked);
        let subscription = registry.subscribe(
            ChangeKind::ACTIVE_CHANNEL | ChangeKind::SCROLL_LOCK,
            Box::new(move |_, snapshot| {
                let Some(scroll_lock) = Self::mirror(&seen, &mirror, snapshot) else {
                    return;
                };
                if let Ok(mut on_checked) = on_checked.lock() {
                    (on_checked)(scroll_lock);
                }
            }),
        );
        Self::mirror(&last_revision, &checked, &registry.snapshot());

        Self {
            registry,
            checked,
            subscriptions: vec![subscription],
        }
    }

    /// Store the active channel's scroll lock unless `snapshot` is older
    /// than the last one mirrored
    fn mirror(
        last_revision: &Mutex<u64>,
        checked: &AtomicBool,
        snapshot: &RegistrySnapshot,
    ) -> Option<bool> {
        let mut last_revision = last_revision.lock().ok()?;
        if snapshot.revision < *last_revision {
            return None;
        }
        *last_revision = snapshot.revision;
        let scroll_lock = snapshot
            .active
            .as_ref()
            .map(|channel| channel.scroll_lock)
            .unwrap_or(false);
        checked.store(scroll_lock, Ordering::SeqCst);
        Some(scroll_lock)
    }

    /// Flip the active channel's scroll lock
    pub fn run(&self) -> Option<bool> {
        let scroll_lock = toggle_scroll_lock(self.registry.as_ref())?;
        self.checked.store(scroll_lock, Ordering::SeqCst);
        Some(scroll_lock)
    }

    pub fn is_checked(&self) -> bool {
        self.checked.load(Ordering::SeqCst)
    }

    pub fn dispose(&mut self) {
        self.subscriptions.clear();
    }
}

impl Drop for ScrollLockToggle {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RegistryError;
    use crate::output_service::OutputService;
    use crate::registry::{BoxFuture, ChangeHandler};
    use crate::selector::ChannelSelector;
    use std::sync::atomic::AtomicUsize;

    #[derive(Default)]
    struct MockPanel {
        toggles: AtomicUsize,
        focuses: AtomicUsize,
    }

    impl PanelHost for MockPanel {
        fn toggle_panel_visibility(&self) {
            self.toggles.fetch_add(1, Ordering::SeqCst);
        }

        fn focus_panel(&self) {
            self.focuses.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn build_and_tasks() -> Arc<OutputService> {
        let service = Arc::new(OutputService::new());
        service.register_channel("1", "Build").unwrap();
        service.register_channel("2", "Tasks").unwrap();
        service
    }

    #[tokio::test]
    async fn test_switch_command_shows_channel() {
        let service = build_and_tasks();
        let command = SwitchCommand::new(service.clone());

        let shown = command.run(Some(ChannelId::from("2"))).await;

        assert_eq!(shown.map(|c| c.label), Some("Tasks".to_string()));
        assert_eq!(service.active_channel().unwrap().id.as_str(), "2");
    }

    #[tokio::test]
    async fn test_switch_to_unknown_id_changes_nothing() {
        let service = build_and_tasks();
        let published = Arc::new(AtomicUsize::new(0));
        let counter = published.clone();
        let _selector = ChannelSelector::new(service.clone(), move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let command = SwitchCommand::new(service.clone());

        let shown = command.run(Some(ChannelId::from("missing"))).await;

        assert!(shown.is_none());
        assert_eq!(service.active_channel().unwrap().id.as_str(), "1");
        // Only the initial publish
        assert_eq!(published.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_switch_without_id_uses_registry_default() {
        let service = build_and_tasks();
        let command = SwitchCommand::new(service.clone());

        let shown = command.run(None).await;

        assert_eq!(shown.map(|c| c.id), Some(ChannelId::from("1")));
    }

    #[tokio::test]
    async fn test_switch_via_selector_option() {
        let service = build_and_tasks();
        service.register_channel("3", "Tasks").unwrap();
        let selector = ChannelSelector::new(service.clone(), |_| {});

        let id = selector.resolve_option("Tasks");
        let outcome = OutputCommand::Switch(Some(id))
            .execute(service.as_ref(), &MockPanel::default())
            .await;

        assert_eq!(
            outcome,
            CommandOutcome::Switched(Some(ChannelDescriptor::new("3", "Tasks")))
        );
        // Forward search lands on the first "Tasks" in sorted order
        assert_eq!(selector.projection().selected_index, 1);
    }

    #[tokio::test]
    async fn test_toggle_visibility_delegates_to_panel() {
        let service = build_and_tasks();
        let panel = MockPanel::default();

        let outcome = OutputCommand::ToggleVisibility
            .execute(service.as_ref(), &panel)
            .await;

        assert_eq!(outcome, CommandOutcome::PanelToggled);
        assert_eq!(panel.toggles.load(Ordering::SeqCst), 1);
        assert_eq!(panel.focuses.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_clear_empties_active_and_focuses_panel() {
        let service = build_and_tasks();
        service.append(&ChannelId::from("1"), "a\nb").unwrap();
        service.append(&ChannelId::from("2"), "c").unwrap();
        let panel = MockPanel::default();

        let outcome = OutputCommand::Clear.execute(service.as_ref(), &panel).await;

        assert_eq!(outcome, CommandOutcome::Cleared);
        assert!(service.lines(&ChannelId::from("1")).unwrap().is_empty());
        assert_eq!(service.lines(&ChannelId::from("2")).unwrap(), vec!["c"]);
        assert_eq!(panel.focuses.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_toggle_scroll_lock_without_channels() {
        let service = Arc::new(OutputService::new());

        let outcome = OutputCommand::ToggleScrollLock
            .execute(service.as_ref(), &MockPanel::default())
            .await;

        assert_eq!(outcome, CommandOutcome::ScrollLockToggled(None));
    }

    #[test]
    fn test_scroll_lock_toggle_follows_active_channel() {
        let service = build_and_tasks();
        let published = Arc::new(Mutex::new(Vec::new()));
        let sink = published.clone();
        let toggle = ScrollLockToggle::new(service.clone(), move |checked| {
            sink.lock().unwrap().push(checked)
        });
        assert!(!toggle.is_checked());

        assert_eq!(toggle.run(), Some(true));
        assert!(toggle.is_checked());

        service.show(&ChannelId::from("2")).unwrap();
        assert!(!toggle.is_checked());

        service.show(&ChannelId::from("1")).unwrap();
        assert!(toggle.is_checked());

        assert_eq!(*published.lock().unwrap(), vec![true, false, true]);
    }

    #[test]
    fn test_scroll_lock_toggle_sees_changes_from_other_commands() {
        let service = build_and_tasks();
        let toggle = ScrollLockToggle::new(service.clone(), |_| {});

        service.set_scroll_lock(&ChannelId::from("1"), true).unwrap();

        assert!(toggle.is_checked());
    }

    #[test]
    fn test_scroll_lock_toggle_drop_releases_subscription() {
        let service = build_and_tasks();
        let toggle = ScrollLockToggle::new(service.clone(), |_| {});
        assert_eq!(service.subscriber_count(), 1);

        drop(toggle);

        assert_eq!(service.subscriber_count(), 0);
    }

    /// Registry whose active channel gets locked while a subscriber is added
    struct LocksOnSubscribe {
        inner: Arc<OutputService>,
    }

    impl ChannelRegistry for LocksOnSubscribe {
        fn list_channels(&self) -> Vec<ChannelDescriptor> {
            self.inner.list_channels()
        }

        fn active_channel(&self) -> Option<ChannelDescriptor> {
            self.inner.active_channel()
        }

        fn channel(&self, id: Option<&ChannelId>) -> Option<ChannelDescriptor> {
            self.inner.channel(id)
        }

        fn request_show<'a>(
            &'a self,
            id: &'a ChannelId,
        ) -> BoxFuture<'a, Result<ChannelDescriptor, RegistryError>> {
            self.inner.request_show(id)
        }

        fn subscribe(&self, interest: ChangeKind, handler: ChangeHandler) -> Subscription {
            self.inner
                .set_scroll_lock(&ChannelId::from("1"), true)
                .unwrap();
            self.inner.subscribe(interest, handler)
        }

        fn clear_active_channel(&self) {
            self.inner.clear_active_channel()
        }

        fn set_scroll_lock(&self, id: &ChannelId, scroll_lock: bool) -> Result<(), RegistryError> {
            self.inner.set_scroll_lock(id, scroll_lock)
        }

        fn snapshot(&self) -> RegistrySnapshot {
            self.inner.snapshot()
        }
    }

    #[test]
    fn test_scroll_lock_set_while_subscribing_is_not_missed() {
        let service = build_and_tasks();
        let registry: Arc<dyn ChannelRegistry> = Arc::new(LocksOnSubscribe {
            inner: service.clone(),
        });

        let toggle = ScrollLockToggle::new(registry, |_| {});

        assert!(toggle.is_checked());
    }

    #[test]
    fn test_scroll_lock_toggle_ignores_stale_snapshot() {
        let service = build_and_tasks();
        let stale = service.snapshot();
        let toggle = ScrollLockToggle::new(service.clone(), |_| {});
        service.set_scroll_lock(&ChannelId::from("1"), true).unwrap();

        let last_revision = Mutex::new(service.snapshot().revision);
        assert_eq!(
            ScrollLockToggle::mirror(&last_revision, &toggle.checked, &stale),
            None
        );

        assert!(toggle.is_checked());
    }
}
