use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use std::cell::RefCell;

/// A single-threaded broadcast stream.
///
/// Every call to [`EventStream::events`] creates a new receiver; [`EventStream::fire`]
/// delivers a copy of the value to every receiver that is still alive, in
/// subscription order. Receivers drain their queue whenever they get to it,
/// usually on the next frame.
pub struct EventStream<T> {
    senders: RefCell<Vec<UnboundedSender<T>>>,
}

impl<T> std::fmt::Debug for EventStream<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventStream")
            .field("subscribers", &format!("<{} subscribers>", self.senders.borrow().len()))
            .finish()
    }
}

impl<T> Default for EventStream<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> EventStream<T> {
    pub fn new() -> Self {
        Self {
            senders: RefCell::new(Vec::new()),
        }
    }

    /// Subscribe to every value fired from now on
    pub fn events(&self) -> UnboundedReceiver<T> {
        let (sender, receiver) = mpsc::unbounded();
        self.senders.borrow_mut().push(sender);
        receiver
    }

    /// Number of receivers that have not been dropped yet.
    pub fn subscriber_count(&self) -> usize {
        let mut senders = self.senders.borrow_mut();
        senders.retain(|sender| !sender.is_closed());
        senders.len()
    }
}

impl<T: Clone> EventStream<T> {
    pub fn fire(&self, value: T) {
        let mut senders = self.senders.borrow_mut();
        // Dropped receivers unsubscribe themselves here
        senders.retain(|sender| sender.unbounded_send(value.clone()).is_ok());
    }
}
