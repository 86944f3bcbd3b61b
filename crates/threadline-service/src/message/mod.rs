//! Message mutation orchestration and read projections.

pub mod history;
pub mod policy;
pub mod service;
pub mod thread;
pub mod unread;

pub use history::EditHistoryRecorder;
pub use policy::ContentPolicy;
pub use service::MessageService;
pub use thread::ThreadBuilder;
pub use unread::UnreadView;
