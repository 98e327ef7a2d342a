mod stream;

pub use stream::EventStream;
pub use futures::channel::mpsc::{TryRecvError, UnboundedReceiver as EventReceiver};
