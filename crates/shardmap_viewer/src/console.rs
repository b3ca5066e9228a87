//! Command console state.
//!
//! Holds the command buffer, history and suggestion list. History recall
//! walks from newest to oldest; recalling with `keep_location` swaps in the
//! historical command text while keeping the current buffer's location
//! prefix, so an operator can replay a command at a freshly picked spot.
//!
//! The console does no IO. The shell feeds it edits and drains the
//! suggestion updates through a [`SuggestionSink`].

use shardmap_core::command::{parse, suggest};
use shardmap_core::events::SuggestionSink;

/// Command console state machine.
#[derive(Debug, Default)]
pub struct CommandConsole {
    /// Known commands offered as suggestions.
    known_commands: Vec<String>,
    buffer: String,
    history: Vec<String>,
    /// `None` when editing the live buffer; `Some(n)` when showing the
    /// n-th newest history entry.
    history_index: Option<usize>,
    /// Live buffer stashed while walking history.
    stash: String,
    enabled: bool,
}

impl CommandConsole {
    /// Create a console with a known-command list for suggestions.
    #[must_use]
    pub fn new(known_commands: Vec<String>) -> Self {
        Self {
            known_commands,
            enabled: true,
            ..Self::default()
        }
    }

    /// Enable or disable the console for the session (backend HTTP 405).
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Whether the backend accepts commands this session.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Current buffer contents.
    #[must_use]
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Submitted command history, oldest first.
    #[must_use]
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Replace the buffer with an edit and refresh suggestions.
    pub fn edit(&mut self, text: impl Into<String>, sink: &mut dyn SuggestionSink) {
        self.buffer = text.into();
        self.history_index = None;
        let suggestions = suggest(&self.known_commands, &self.buffer);
        sink.suggestions_changed(&suggestions);
    }

    /// Clear the buffer and leave history browsing.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.history_index = None;
    }

    /// Record a successfully submitted command and clear the buffer.
    pub fn push_history(&mut self, command: impl Into<String>) {
        self.history.push(command.into());
        self.clear();
    }

    /// Recall the next-older history entry into the buffer.
    ///
    /// With `keep_location` the current buffer's location prefix is kept
    /// and only the command text is replaced.
    pub fn recall_older(&mut self, keep_location: bool) {
        let next = match self.history_index {
            None => 0,
            Some(i) => i + 1,
        };
        if next >= self.history.len() {
            return;
        }
        if self.history_index.is_none() {
            self.stash = self.buffer.clone();
        }
        self.history_index = Some(next);
        self.load_entry(next, keep_location);
    }

    /// Walk back toward the live buffer.
    pub fn recall_newer(&mut self, keep_location: bool) {
        match self.history_index {
            None => {}
            Some(0) => {
                self.history_index = None;
                self.buffer = std::mem::take(&mut self.stash);
            }
            Some(i) => {
                self.history_index = Some(i - 1);
                self.load_entry(i - 1, keep_location);
            }
        }
    }

    fn load_entry(&mut self, newest_offset: usize, keep_location: bool) {
        let entry = &self.history[self.history.len() - 1 - newest_offset];
        if keep_location {
            let location = parse(&self.buffer).location_prefix();
            let command = parse(entry).text;
            self.buffer = format!("{location}{command}");
        } else {
            self.buffer = entry.clone();
        }
    }
}
