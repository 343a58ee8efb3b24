//! Per-request completion settings.

use crate::base::{TextRange, TextSize};

/// Settings of one completion request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompletionOptions {
    /// Completing inside a documentation comment.
    pub javadoc: bool,
    /// Offset of the cursor in the unit.
    pub offset: TextSize,
    /// Source range of the node under completion.
    pub assist_node: TextRange,
}

impl CompletionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_javadoc(mut self, javadoc: bool) -> Self {
        self.javadoc = javadoc;
        self
    }

    pub fn with_offset(mut self, offset: TextSize) -> Self {
        self.offset = offset;
        self
    }

    /// Also moves the cursor to the start of the node unless an offset was
    /// set already.
    pub fn with_assist_node(mut self, assist_node: TextRange) -> Self {
        if self.offset == TextSize::default() {
            self.offset = assist_node.start();
        }
        self.assist_node = assist_node;
        self
    }

    pub(crate) fn not_in_javadoc(&self) -> bool {
        !self.javadoc
    }
}
