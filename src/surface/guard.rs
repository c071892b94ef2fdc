//! Echo suppression for programmatic writes

use std::cell::Cell;

/// Holds the suppress-echo flag set for its lifetime
///
/// The previous value is restored on drop, including during unwinding.
pub struct EchoGuard<'a> {
    flag: &'a Cell<bool>,
    previous: bool,
}

impl<'a> EchoGuard<'a> {
    pub fn engage(flag: &'a Cell<bool>) -> Self {
        let previous = flag.replace(true);
        Self { flag, previous }
    }
}

impl Drop for EchoGuard<'_> {
    fn drop(&mut self) {
        self.flag.set(self.previous);
    }
}
