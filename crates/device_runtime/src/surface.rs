//! Output surface model.
//!
//! The page has one shared output area. Handlers never touch the DOM; they edit an
//! [`OutputDocument`] made of addressable blocks, and every edit is published through an
//! [`OutputSink`]. Blocks carry a revision so keyed views can re-render only what changed.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
/// Stable address of one output block.
pub struct BlockId(pub u32);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// One `<option>` of a select block.
pub struct SelectOption {
    /// Submitted value.
    pub value: String,
    /// Visible label.
    pub label: String,
}

impl SelectOption {
    /// Convenience constructor.
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Content of an output block.
pub enum BlockKind {
    /// Plain text, rendered as text.
    Text(String),
    /// Markup produced by a handler, rendered as HTML. Dynamic values must already be escaped.
    Markup(String),
    /// Clickable button.
    Button {
        /// Button caption.
        label: String,
        /// Whether clicks are blocked.
        disabled: bool,
    },
    /// Drop-down list.
    Select {
        /// Options in display order.
        options: Vec<SelectOption>,
        /// Currently selected value.
        value: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Addressable output block.
pub struct OutputBlock {
    /// Block address.
    pub id: BlockId,
    /// Bumped on every edit of this block.
    pub revision: u32,
    /// Block content.
    pub kind: BlockKind,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Ordered list of output blocks. Ids are never reused within a document.
pub struct OutputDocument {
    blocks: Vec<OutputBlock>,
    next_id: u32,
}

impl OutputDocument {
    /// Blocks in display order.
    pub fn blocks(&self) -> &[OutputBlock] {
        &self.blocks
    }

    /// Looks up a block.
    pub fn block(&self, id: BlockId) -> Option<&OutputBlock> {
        self.blocks.iter().find(|block| block.id == id)
    }

    /// Returns whether the document has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Removes every block.
    pub fn clear(&mut self) {
        self.blocks.clear();
    }

    /// Appends a block and returns its id.
    pub fn append(&mut self, kind: BlockKind) -> BlockId {
        let id = BlockId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.blocks.push(OutputBlock {
            id,
            revision: 0,
            kind,
        });
        id
    }

    /// Replaces the whole document with one text block.
    pub fn replace_text(&mut self, text: impl Into<String>) -> BlockId {
        self.clear();
        self.append(BlockKind::Text(text.into()))
    }

    /// Replaces the whole document with one markup block.
    pub fn replace_markup(&mut self, markup: impl Into<String>) -> BlockId {
        self.clear();
        self.append(BlockKind::Markup(markup.into()))
    }

    /// Sets a block's content to plain text.
    pub fn set_text(&mut self, id: BlockId, text: impl Into<String>) -> bool {
        let text = text.into();
        self.edit(id, |kind| *kind = BlockKind::Text(text))
    }

    /// Sets a block's content to markup.
    pub fn set_markup(&mut self, id: BlockId, markup: impl Into<String>) -> bool {
        let markup = markup.into();
        self.edit(id, |kind| *kind = BlockKind::Markup(markup))
    }

    /// Appends markup to a text or markup block. Existing text is escaped first.
    pub fn append_markup(&mut self, id: BlockId, markup: &str) -> bool {
        self.edit(id, |kind| {
            let mut combined = match kind {
                BlockKind::Text(text) => escape_html(text),
                BlockKind::Markup(existing) => std::mem::take(existing),
                _ => String::new(),
            };
            combined.push_str(markup);
            *kind = BlockKind::Markup(combined);
        })
    }

    /// Changes a button caption.
    pub fn set_label(&mut self, id: BlockId, label: impl Into<String>) -> bool {
        let label = label.into();
        self.edit(id, |kind| {
            if let BlockKind::Button { label: current, .. } = kind {
                *current = label;
            }
        })
    }

    /// Enables or disables a button.
    pub fn set_disabled(&mut self, id: BlockId, disabled: bool) -> bool {
        self.edit(id, |kind| {
            if let BlockKind::Button {
                disabled: current, ..
            } = kind
            {
                *current = disabled;
            }
        })
    }

    /// Changes the selected value of a select block.
    pub fn set_select_value(&mut self, id: BlockId, value: impl Into<String>) -> bool {
        let value = value.into();
        self.edit(id, |kind| {
            if let BlockKind::Select { value: current, .. } = kind {
                *current = value;
            }
        })
    }

    /// Visible text of the document, one line per block, with markup tags stripped.
    pub fn text_content(&self) -> String {
        self.blocks
            .iter()
            .map(|block| match &block.kind {
                BlockKind::Text(text) => text.clone(),
                BlockKind::Markup(markup) => strip_tags(markup),
                BlockKind::Button { label, .. } => label.clone(),
                BlockKind::Select { options, value } => options
                    .iter()
                    .find(|option| &option.value == value)
                    .map(|option| option.label.clone())
                    .unwrap_or_default(),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Buttons as `(id, label, disabled)` in display order.
    pub fn buttons(&self) -> Vec<(BlockId, String, bool)> {
        self.blocks
            .iter()
            .filter_map(|block| match &block.kind {
                BlockKind::Button { label, disabled } => Some((block.id, label.clone(), *disabled)),
                _ => None,
            })
            .collect()
    }

    /// Finds the first button with `label`.
    pub fn button(&self, label: &str) -> Option<BlockId> {
        self.buttons()
            .into_iter()
            .find(|(_, current, _)| current == label)
            .map(|(id, _, _)| id)
    }

    fn edit(&mut self, id: BlockId, apply: impl FnOnce(&mut BlockKind)) -> bool {
        let Some(block) = self.blocks.iter_mut().find(|block| block.id == id) else {
            return false;
        };
        apply(&mut block.kind);
        block.revision = block.revision.wrapping_add(1);
        true
    }
}

/// Receives the document after every edit.
pub trait OutputSink {
    /// Publishes the current document.
    fn publish(&self, document: &OutputDocument);
}

#[derive(Debug, Clone, Copy, Default)]
/// Sink that discards updates.
pub struct NullSink;

impl OutputSink for NullSink {
    fn publish(&self, _document: &OutputDocument) {}
}

/// Escapes text for interpolation into markup.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn strip_tags(markup: &str) -> String {
    let mut text = String::with_capacity(markup.len());
    let mut in_tag = false;
    for ch in markup.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => text.push(ch),
            _ => {}
        }
    }
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Formats a number the way JavaScript string concatenation does.
pub(crate) fn js_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if value == 0.0 {
        "0".to_string()
    } else if (1e-6..1e21).contains(&value.abs()) {
        format!("{value}")
    } else {
        // Exponent form: `1e+21`, `1.5e-7`.
        let formatted = format!("{value:e}");
        match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{mantissa}e+{exponent}")
            }
            _ => formatted,
        }
    }
}

/// `Number.prototype.toFixed(0)`: ties round away from zero.
pub(crate) fn js_whole(value: f64) -> String {
    js_number(value.round())
}
