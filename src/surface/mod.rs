//! Dual-layer text surface
//!
//! A `TextSurface` owns the current text and keeps an editable layer and a
//! render layer showing the same content. Every edit, language change, color
//! change or theme change re-highlights the whole text and hands the result
//! to the render layer before the call returns.
//!
//! Programmatic writes to the editable layer come back through its change
//! notification; the suppress-echo flag turns those echoes into no-ops so
//! that only genuine user edits reach text-changed observers.

mod guard;
mod layers;
mod theme;

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use tracing::{debug, trace, warn};

use crate::error::Result;
use crate::syntax::{resolve, Color, HighlightLanguage, Highlighter, RunSequence, Theme};

pub use guard::EchoGuard;
pub use layers::{ChangeHook, EditableLayer, LayoutProps, RenderLayer, TextBuffer};
pub use theme::{ThemeNotifier, ThemeSubscription};

/// Single source of truth for a surface
#[derive(Debug, Clone, PartialEq)]
pub struct TextSurfaceState {
    pub text: String,
    pub language: HighlightLanguage,
    /// Explicit PlainText color; `None` follows the theme
    pub plain_text_color: Option<Color>,
    pub theme: Theme,
    pub layout: LayoutProps,
}

impl TextSurfaceState {
    fn new(theme: Theme) -> Self {
        Self {
            text: String::new(),
            language: HighlightLanguage::default(),
            plain_text_color: None,
            theme,
            layout: LayoutProps::default(),
        }
    }

    /// Color used when the language is PlainText
    pub fn effective_plain_text_color(&self) -> Color {
        self.plain_text_color
            .unwrap_or_else(|| self.theme.plain_text_color())
    }

    pub fn highlighter(&self) -> Highlighter {
        Highlighter::new(resolve(self.theme)).with_plain_text_color(self.effective_plain_text_color())
    }
}

type TextChangedCallback = Rc<dyn Fn(&str)>;

struct Inner<E, R> {
    state: RefCell<TextSurfaceState>,
    suppress_echo: Cell<bool>,
    editable: RefCell<E>,
    rendered: RefCell<R>,
    runs: RefCell<RunSequence>,
    observers: RefCell<Vec<TextChangedCallback>>,
    notifier: ThemeNotifier,
    subscription: RefCell<Option<ThemeSubscription>>,
}

/// Editable text layer with a synchronized highlighted rendering
pub struct TextSurface<E, R> {
    inner: Rc<Inner<E, R>>,
}

impl<E, R> Clone for TextSurface<E, R> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<E, R> TextSurface<E, R>
where
    E: EditableLayer + 'static,
    R: RenderLayer + 'static,
{
    /// Create a surface and subscribe it to `notifier`
    ///
    /// Both layers receive the default layout and the render layer shows the
    /// highlighting of the empty text before this returns.
    pub fn new(editable: E, rendered: R, notifier: &ThemeNotifier) -> Result<Self> {
        let theme = notifier.theme();
        let inner = Rc::new_cyclic(|weak: &Weak<Inner<E, R>>| {
            let weak = weak.clone();
            let subscription = notifier.subscribe(move |_| {
                if let Some(inner) = weak.upgrade() {
                    let surface = TextSurface { inner };
                    if let Err(err) = surface.on_theme_changed() {
                        warn!(error = %err, "re-render after theme change failed");
                    }
                }
            });
            Inner {
                state: RefCell::new(TextSurfaceState::new(theme)),
                suppress_echo: Cell::new(false),
                editable: RefCell::new(editable),
                rendered: RefCell::new(rendered),
                runs: RefCell::new(RunSequence::new()),
                observers: RefCell::new(Vec::new()),
                notifier: notifier.clone(),
                subscription: RefCell::new(Some(subscription)),
            }
        });

        let surface = Self { inner };
        surface.apply_layout()?;
        Ok(surface)
    }

    /// Handler to connect to the editable layer's change notification
    pub fn edit_handler(&self) -> impl Fn(&str) + 'static {
        let weak = Rc::downgrade(&self.inner);
        move |text: &str| {
            if let Some(inner) = weak.upgrade() {
                let surface = TextSurface { inner };
                if let Err(err) = surface.on_user_edited(text) {
                    warn!(error = %err, "re-render after edit failed");
                }
            }
        }
    }

    /// Register an observer for genuine user edits
    pub fn on_text_changed(&self, callback: impl Fn(&str) + 'static) {
        self.inner.observers.borrow_mut().push(Rc::new(callback));
    }

    /// Replace the text programmatically
    ///
    /// Observers are not notified; the editable layer's echo is swallowed.
    pub fn set_text(&self, text: &str) -> Result<()> {
        {
            let _guard = EchoGuard::engage(&self.inner.suppress_echo);
            self.inner.editable.borrow_mut().set_text(text);
        }
        self.inner.state.borrow_mut().text = text.to_string();
        self.refresh()
    }

    /// Change notification from the editable layer
    pub fn on_user_edited(&self, text: &str) -> Result<()> {
        if self.inner.suppress_echo.get() {
            trace!(len = text.len(), "suppressed echo of programmatic write");
            return Ok(());
        }

        self.inner.state.borrow_mut().text = text.to_string();
        let rendered = self.refresh();
        self.notify_text_changed(text);
        rendered
    }

    /// Replace the text as a user edit
    ///
    /// The editable layer is written with its echo swallowed and released
    /// before the edit is recorded, so observers may read the layer or call
    /// back into the surface. Ignored while the surface is read-only.
    pub fn type_text(&self, text: &str) -> Result<()> {
        if self.inner.state.borrow().layout.read_only {
            trace!(len = text.len(), "ignored typing into read-only surface");
            return Ok(());
        }
        let typed = {
            let _guard = EchoGuard::engage(&self.inner.suppress_echo);
            let mut editable = self.inner.editable.borrow_mut();
            editable.set_text(text);
            editable.text()
        };
        self.on_user_edited(&typed)
    }

    pub fn set_language(&self, language: HighlightLanguage) -> Result<()> {
        self.inner.state.borrow_mut().language = language;
        self.refresh()
    }

    /// Set an explicit PlainText color that survives theme changes
    pub fn set_plain_text_color(&self, color: Color) -> Result<()> {
        self.inner.state.borrow_mut().plain_text_color = Some(color);
        self.refresh()
    }

    /// Drop the explicit PlainText color and follow the theme again
    pub fn clear_plain_text_color(&self) -> Result<()> {
        self.inner.state.borrow_mut().plain_text_color = None;
        self.refresh()
    }

    /// Re-read the theme and re-render the unchanged text
    pub fn on_theme_changed(&self) -> Result<()> {
        let theme = self.inner.notifier.theme();
        self.inner.state.borrow_mut().theme = theme;
        debug!(theme = theme.name(), "surface following theme change");
        self.refresh()
    }

    pub fn set_font_size(&self, font_size: f32) -> Result<()> {
        self.update_layout(|layout| layout.font_size = font_size)
    }

    pub fn set_font_family(&self, font_family: &str) -> Result<()> {
        self.update_layout(|layout| layout.font_family = font_family.to_string())
    }

    pub fn set_padding(&self, padding: u16) -> Result<()> {
        self.update_layout(|layout| layout.padding = padding)
    }

    pub fn set_placeholder(&self, placeholder: Option<&str>) -> Result<()> {
        self.update_layout(|layout| layout.placeholder = placeholder.map(str::to_string))
    }

    pub fn set_read_only(&self, read_only: bool) -> Result<()> {
        self.update_layout(|layout| layout.read_only = read_only)
    }

    pub fn set_autosize(&self, autosize: bool) -> Result<()> {
        self.update_layout(|layout| layout.autosize = autosize)
    }

    /// Replace all layout settings at once
    pub fn set_layout(&self, layout: LayoutProps) -> Result<()> {
        self.update_layout(|current| *current = layout)
    }

    pub fn text(&self) -> String {
        self.inner.state.borrow().text.clone()
    }

    pub fn language(&self) -> HighlightLanguage {
        self.inner.state.borrow().language
    }

    pub fn theme(&self) -> Theme {
        self.inner.state.borrow().theme
    }

    pub fn layout(&self) -> LayoutProps {
        self.inner.state.borrow().layout.clone()
    }

    /// Snapshot of the state
    pub fn state(&self) -> TextSurfaceState {
        self.inner.state.borrow().clone()
    }

    /// Runs most recently handed to the render layer
    pub fn runs(&self) -> RunSequence {
        self.inner.runs.borrow().clone()
    }

    /// Whether a programmatic write is in progress
    pub fn is_suppressing_echo(&self) -> bool {
        self.inner.suppress_echo.get()
    }

    /// Whether the theme subscription is still held
    pub fn is_subscribed(&self) -> bool {
        self.inner.subscription.borrow().is_some()
    }

    /// Borrow the editable layer
    ///
    /// A change notification fired from inside `f` runs while the layer is
    /// still borrowed; use `type_text` for user edits.
    pub fn with_editable<T>(&self, f: impl FnOnce(&mut E) -> T) -> T {
        f(&mut self.inner.editable.borrow_mut())
    }

    pub fn with_rendered<T>(&self, f: impl FnOnce(&mut R) -> T) -> T {
        f(&mut self.inner.rendered.borrow_mut())
    }

    /// Release the theme subscription
    ///
    /// Dropping the last handle does the same; this is for embedders that
    /// tear the control down while other handles are still around.
    pub fn dispose(self) {
        if let Some(subscription) = self.inner.subscription.borrow_mut().take() {
            drop(subscription);
            debug!("text surface released theme subscription");
        }
    }

    fn update_layout(&self, f: impl FnOnce(&mut LayoutProps)) -> Result<()> {
        f(&mut self.inner.state.borrow_mut().layout);
        self.apply_layout()
    }

    fn apply_layout(&self) -> Result<()> {
        let layout = self.inner.state.borrow().layout.clone();
        self.inner.editable.borrow_mut().apply_layout(&layout);
        self.inner.rendered.borrow_mut().apply_layout(&layout);
        // Text may reflow under the new layout
        self.refresh()
    }

    /// Re-highlight the current text and push it to the render layer
    fn refresh(&self) -> Result<()> {
        let runs = {
            let state = self.inner.state.borrow();
            state.highlighter().highlight(&state.text, state.language)
        };
        debug!(
            language = self.language().name(),
            len = self.inner.state.borrow().text.len(),
            runs = runs.len(),
            "re-highlighted surface"
        );
        *self.inner.runs.borrow_mut() = runs.clone();
        self.inner.rendered.borrow_mut().render(&runs)
    }

    fn notify_text_changed(&self, text: &str) {
        let observers: Vec<TextChangedCallback> =
            self.inner.observers.borrow().iter().cloned().collect();
        for observer in observers {
            observer(text);
        }
    }
}
