use crate::services::{Notification, Notifier};
use std::cell::RefCell;

/// Records notification kinds instead of delivering anything, so tests can
/// assert what a domain operation fired.
#[derive(Default)]
pub struct MockNotifier {
    pub notifications: RefCell<Vec<String>>,
}

impl MockNotifier {
    pub fn new() -> MockNotifier {
        MockNotifier {
            notifications: RefCell::new(Vec::new()),
        }
    }

    pub fn kinds(&self) -> Vec<String> {
        self.notifications.borrow().clone()
    }
}

impl Notifier for MockNotifier {
    fn notify(&self, notification: Notification) {
        self.notifications.borrow_mut().push(notification.kind().to_string());
    }
}
