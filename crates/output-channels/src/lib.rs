//! Output channels
//!
//! Registry of independently produced text streams ("channels") shown in a
//! single output panel, plus the pieces that keep a channel switcher in sync
//! with it:
//!
//! - [`OutputService`]: in-memory [`ChannelRegistry`] owning the channels,
//!   their buffers and the active-channel pointer
//! - [`ChannelSelector`]: sorted label list and selected index for a switcher
//!   widget, recomputed on every relevant registry change
//! - [`SwitchCommand`] and [`OutputCommand`]: the commands a panel toolbar or
//!   command palette runs against the registry

mod channel;
mod commands;
mod error;
mod output_service;
mod registry;
mod selector;

pub use channel::{ChannelContent, ChannelDescriptor, ChannelId};
pub use commands::{CommandOutcome, OutputCommand, PanelHost, ScrollLockToggle, SwitchCommand};
pub use error::RegistryError;
pub use output_service::{OutputService, DEFAULT_MAX_LINES};
pub use registry::{
    BoxFuture, ChangeHandler, ChangeKind, ChannelRegistry, Listeners, RegistrySnapshot,
    Subscription,
};
pub use selector::{ChannelSelector, SelectorProjection};
