//! The two coincident layers of a text surface
//!
//! The editable layer takes input and holds raw text. The render layer shows
//! the colored runs and never takes input. Both receive identical layout so
//! they stay aligned.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::Result;
use crate::syntax::RunSequence;

/// Visual settings shared by both layers
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutProps {
    pub font_size: f32,
    pub font_family: String,
    /// Uniform padding around the text, in pixels or cells
    pub padding: u16,
    pub placeholder: Option<String>,
    pub read_only: bool,
    pub autosize: bool,
}

impl Default for LayoutProps {
    fn default() -> Self {
        Self {
            font_size: 14.0,
            font_family: "monospace".to_string(),
            padding: 4,
            placeholder: None,
            read_only: false,
            autosize: true,
        }
    }
}

/// Interactive plain-text layer
pub trait EditableLayer {
    /// Overwrite the raw content
    ///
    /// Implementations may report the write through their change
    /// notification before returning.
    fn set_text(&mut self, text: &str);

    fn text(&self) -> String;

    fn apply_layout(&mut self, layout: &LayoutProps);
}

/// Non-interactive colored layer
pub trait RenderLayer {
    /// Replace everything shown with `runs`
    fn render(&mut self, runs: &RunSequence) -> Result<()>;

    fn apply_layout(&mut self, layout: &LayoutProps);
}

type ChangeCallback = Rc<dyn Fn(&str)>;

/// Connection point for an editable layer's change notification
#[derive(Clone, Default)]
pub struct ChangeHook {
    slot: Rc<RefCell<Option<ChangeCallback>>>,
}

impl ChangeHook {
    pub fn connect(&self, callback: impl Fn(&str) + 'static) {
        *self.slot.borrow_mut() = Some(Rc::new(callback));
    }

    pub fn disconnect(&self) {
        self.slot.borrow_mut().take();
    }

    pub fn is_connected(&self) -> bool {
        self.slot.borrow().is_some()
    }

    /// Deliver a change notification to the connected handler
    pub fn notify(&self, text: &str) {
        let callback = self.slot.borrow().clone();
        if let Some(callback) = callback {
            callback(text);
        }
    }
}

/// In-memory editable layer
///
/// Every write, programmatic or typed, fires the change hook synchronously,
/// the way native text controls do.
#[derive(Default)]
pub struct TextBuffer {
    text: String,
    layout: LayoutProps,
    hook: ChangeHook,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle for wiring the change notification
    pub fn change_hook(&self) -> ChangeHook {
        self.hook.clone()
    }

    pub fn layout(&self) -> &LayoutProps {
        &self.layout
    }

    /// Simulate user input replacing the content
    ///
    /// Ignored when the layer is read-only.
    pub fn type_text(&mut self, text: &str) {
        if self.layout.read_only {
            return;
        }
        self.text = text.to_string();
        self.hook.notify(text);
    }
}

impl EditableLayer for TextBuffer {
    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.hook.notify(text);
    }

    fn text(&self) -> String {
        self.text.clone()
    }

    fn apply_layout(&mut self, layout: &LayoutProps) {
        self.layout = layout.clone();
    }
}
