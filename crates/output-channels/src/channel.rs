use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// Opaque, stable identifier of an output channel
///
/// Ids are unique within a registry and never reused for a different stream
/// while the program runs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelId(String);

impl ChannelId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ChannelId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ChannelId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for ChannelId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Snapshot of one channel's identity, as handed out by a registry
///
/// Labels are for display only and may collide; anything that needs to find
/// a channel again uses the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelDescriptor {
    pub id: ChannelId,
    pub label: String,
    /// Scroll lock of the channel at the time the snapshot was taken
    pub scroll_lock: bool,
}

impl ChannelDescriptor {
    pub fn new(id: impl Into<ChannelId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            scroll_lock: false,
        }
    }
}

/// A channel's buffered lines together with its identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelContent {
    pub channel: ChannelDescriptor,
    /// Buffered lines, oldest first
    pub lines: Vec<String>,
    /// Lines ever appended to the channel; survives the line cap and clears
    pub appended: u64,
}

/// A live channel inside [`crate::OutputService`]: identity plus its buffer
#[derive(Debug, Clone)]
pub(crate) struct OutputChannel {
    pub id: ChannelId,
    pub label: String,
    pub scroll_lock: bool,
    lines: VecDeque<String>,
    max_lines: usize,
    appended: u64,
}

impl OutputChannel {
    pub fn new(id: ChannelId, label: String, max_lines: usize) -> Self {
        Self {
            id,
            label,
            scroll_lock: false,
            lines: VecDeque::new(),
            max_lines: max_lines.max(1),
            appended: 0,
        }
    }

    pub fn descriptor(&self) -> ChannelDescriptor {
        ChannelDescriptor {
            id: self.id.clone(),
            label: self.label.clone(),
            scroll_lock: self.scroll_lock,
        }
    }

    /// Append text, one buffer line per `\n`-separated line
    ///
    /// Returns the number of lines added. Oldest lines are dropped once the
    /// buffer exceeds its cap.
    pub fn append(&mut self, text: &str) -> usize {
        let mut added = 0;
        for line in text.lines() {
            self.lines.push_back(line.to_string());
            added += 1;
        }
        self.appended += added as u64;
        while self.lines.len() > self.max_lines {
            self.lines.pop_front();
        }
        added
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.iter().cloned().collect()
    }

    pub fn content(&self) -> ChannelContent {
        ChannelContent {
            channel: self.descriptor(),
            lines: self.lines(),
            appended: self.appended,
        }
    }
}
