//! Notification fan-out and the notification read surface.

pub mod dispatcher;
pub mod service;

pub use dispatcher::NotificationDispatcher;
pub use service::NotificationService;
