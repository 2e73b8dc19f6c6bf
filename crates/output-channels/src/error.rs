use crate::channel::ChannelId;
use thiserror::Error;

/// Errors reported by a channel registry
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("no output channel with id `{0}`")]
    ChannelNotFound(ChannelId),

    #[error("output channel `{0}` is already registered")]
    DuplicateChannel(ChannelId),
}
