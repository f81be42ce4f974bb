//! User-visible error notifications.

use std::cell::RefCell;
use std::rc::Rc;

/// Surfaces error messages to the user.
pub trait Notifier {
    /// Shows an error message.
    fn error(&self, message: &str);
}

/// Sends notifications to the log at error level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn error(&self, message: &str) {
        log::error!("{message}");
    }
}

/// Keeps every notification in memory. Clones share the same list.
#[derive(Debug, Clone, Default)]
pub struct MemoryNotifier {
    messages: Rc<RefCell<Vec<String>>>,
}

impl MemoryNotifier {
    /// Creates an empty notifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages received so far, oldest first.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }

    /// Removes and returns the messages received so far.
    #[must_use]
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.messages.borrow_mut())
    }
}

impl Notifier for MemoryNotifier {
    fn error(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_messages() {
        let notifier = MemoryNotifier::new();
        let handle = notifier.clone();

        notifier.error("uno");
        notifier.error("dos");

        assert_eq!(handle.messages(), vec!["uno", "dos"]);
        assert_eq!(handle.take(), vec!["uno", "dos"]);
        assert!(notifier.messages().is_empty());
    }
}
