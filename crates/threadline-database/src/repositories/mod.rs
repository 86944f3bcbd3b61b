//! Repository implementations for all Threadline entities.

/// Common table expression naming every message an actor sent or received,
/// together with all transitive replies to those messages. The actor id is
/// bound as `?1`. `UNION` (not `UNION ALL`) keeps the walk finite even if
/// the parent chain were ever corrupted into a loop.
macro_rules! actor_messages_cte {
    () => {
        "WITH RECURSIVE doomed(id) AS ( \
            SELECT id FROM messages WHERE sender_id = ?1 OR receiver_id = ?1 \
            UNION \
            SELECT m.id FROM messages m INNER JOIN doomed d ON m.parent_id = d.id \
         ) "
    };
}

pub mod history;
pub mod message;
pub mod notification;

pub use history::EditRecordRepository;
pub use message::MessageRepository;
pub use notification::NotificationRepository;
