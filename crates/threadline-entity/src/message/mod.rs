//! Message domain entities.

pub mod model;
pub mod thread;
pub mod unread;

pub use model::{Message, NewMessage};
pub use thread::ThreadNode;
pub use unread::UnreadMessage;
