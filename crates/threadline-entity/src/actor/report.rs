//! Outcome of removing an actor's dependent records.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Counts of everything deleted by an actor cleanup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemovalReport {
    /// The removed actor.
    pub actor_id: Uuid,
    /// Messages sent or received by the actor, plus their replies.
    pub messages_removed: u64,
    /// Notifications addressed to the actor or attached to removed messages.
    pub notifications_removed: u64,
    /// Edit records of removed messages.
    pub edit_records_removed: u64,
}

impl RemovalReport {
    /// Empty report for an actor.
    pub fn new(actor_id: Uuid) -> Self {
        Self {
            actor_id,
            ..Self::default()
        }
    }

    /// Total number of rows deleted.
    pub fn total(&self) -> u64 {
        self.messages_removed + self.notifications_removed + self.edit_records_removed
    }

    /// Whether nothing had to be deleted.
    pub fn is_noop(&self) -> bool {
        self.total() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_totals() {
        let mut report = RemovalReport::new(Uuid::new_v4());
        assert!(report.is_noop());

        report.messages_removed = 3;
        report.notifications_removed = 3;
        report.edit_records_removed = 1;
        assert_eq!(report.total(), 7);

        let json = serde_json::to_value(report).unwrap();
        assert_eq!(json["messages_removed"], 3);
    }
}
