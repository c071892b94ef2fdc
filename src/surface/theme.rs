//! Theme change notification
//!
//! A `ThemeNotifier` is a cheap cloneable handle to the current theme and the
//! observers interested in it. Subscribing returns a `ThemeSubscription`;
//! dropping that subscription removes the observer.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use tracing::{debug, trace};

use crate::syntax::Theme;

type ThemeCallback = Rc<dyn Fn(Theme)>;

struct NotifierInner {
    theme: Cell<Theme>,
    observers: RefCell<Vec<(u64, ThemeCallback)>>,
    next_id: Cell<u64>,
}

/// Source of theme change events
#[derive(Clone)]
pub struct ThemeNotifier {
    inner: Rc<NotifierInner>,
}

impl ThemeNotifier {
    pub fn new(theme: Theme) -> Self {
        Self {
            inner: Rc::new(NotifierInner {
                theme: Cell::new(theme),
                observers: RefCell::new(Vec::new()),
                next_id: Cell::new(1),
            }),
        }
    }

    /// Current theme
    pub fn theme(&self) -> Theme {
        self.inner.theme.get()
    }

    /// Switch theme and notify observers
    ///
    /// Setting the theme it already has notifies nobody.
    pub fn set_theme(&self, theme: Theme) {
        if self.inner.theme.replace(theme) == theme {
            return;
        }
        debug!(theme = theme.name(), "theme changed");

        // Observers may subscribe or unsubscribe from inside the callback
        let observers: Vec<ThemeCallback> = self
            .inner
            .observers
            .borrow()
            .iter()
            .map(|(_, callback)| Rc::clone(callback))
            .collect();
        for callback in observers {
            callback(theme);
        }
    }

    /// Register an observer for theme changes
    pub fn subscribe(&self, callback: impl Fn(Theme) + 'static) -> ThemeSubscription {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        self.inner.observers.borrow_mut().push((id, Rc::new(callback)));
        trace!(id, "theme observer subscribed");
        ThemeSubscription {
            id,
            notifier: Rc::downgrade(&self.inner),
        }
    }

    /// Number of live observers
    pub fn observer_count(&self) -> usize {
        self.inner.observers.borrow().len()
    }
}

impl Default for ThemeNotifier {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}

/// Registration handle; the observer is removed when this is dropped
pub struct ThemeSubscription {
    id: u64,
    notifier: Weak<NotifierInner>,
}

impl ThemeSubscription {
    /// Remove the observer now
    pub fn unsubscribe(self) {}

    /// Whether the notifier is still alive
    pub fn is_active(&self) -> bool {
        self.notifier.strong_count() > 0
    }
}

impl Drop for ThemeSubscription {
    fn drop(&mut self) {
        if let Some(inner) = self.notifier.upgrade() {
            inner.observers.borrow_mut().retain(|(id, _)| *id != self.id);
            trace!(id = self.id, "theme observer unsubscribed");
        }
    }
}
