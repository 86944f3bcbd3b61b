//! Reply-tree reconstruction.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use threadline_core::error::AppError;
use threadline_database::repositories::MessageRepository;
use threadline_entity::message::{Message, ThreadNode};

/// Rebuilds nested reply trees from flat parent/child links.
#[derive(Debug, Clone)]
pub struct ThreadBuilder {
    /// Message repository.
    message_repo: Arc<MessageRepository>,
}

impl ThreadBuilder {
    /// Creates a new thread builder.
    pub fn new(message_repo: Arc<MessageRepository>) -> Self {
        Self { message_repo }
    }

    /// Builds the reply tree below `root_id` (which need not be a root
    /// message) from a single bulk read.
    pub async fn build_thread(&self, root_id: Uuid) -> Result<ThreadNode, AppError> {
        let messages = self.message_repo.find_thread(root_id).await?;

        let tree = assemble_thread(root_id, &messages)
            .ok_or_else(|| AppError::not_found(format!("Message {root_id} not found")))?;

        debug!(%root_id, messages = messages.len(), "Thread assembled");
        Ok(tree)
    }
}

/// Assembles the tree rooted at `root_id` out of `messages`.
///
/// Depth-first expansion uses an explicit work-stack. Every message is
/// materialized once into a node map, and each `(parent, child)` edge is
/// recorded in visitation order. Replies keep the order in which they
/// appear in `messages`; nothing is re-sorted.
///
/// Returns `None` if `root_id` is not among `messages`.
pub fn assemble_thread(root_id: Uuid, messages: &[Message]) -> Option<ThreadNode> {
    let root = messages.iter().find(|m| m.id == root_id)?;

    let mut replies: HashMap<Uuid, Vec<&Message>> = HashMap::new();
    for msg in messages {
        if msg.id == root_id {
            continue;
        }
        if let Some(parent_id) = msg.parent_id {
            replies.entry(parent_id).or_default().push(msg);
        }
    }

    let mut nodes: HashMap<Uuid, ThreadNode> = HashMap::with_capacity(messages.len());
    let mut edges: Vec<(Uuid, Uuid)> = Vec::new();
    let mut stack = vec![root];

    while let Some(msg) = stack.pop() {
        if nodes.contains_key(&msg.id) {
            continue;
        }
        nodes.insert(msg.id, ThreadNode::from(msg));

        for child in replies.get(&msg.id).into_iter().flatten() {
            stack.push(*child);
            edges.push((msg.id, child.id));
        }
    }

    // A child's own edges are always recorded after the edge that reached
    // it, so walking the list backwards only ever moves finished subtrees.
    // Siblings arrive reversed and are flipped once, as their parent is
    // attached.
    for (parent_id, child_id) in edges.iter().rev() {
        let Some(mut child) = nodes.remove(child_id) else {
            continue;
        };
        child.children.reverse();
        if let Some(parent) = nodes.get_mut(parent_id) {
            parent.children.push(child);
        }
    }

    let mut tree = nodes.remove(&root_id)?;
    tree.children.reverse();
    Some(tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn message(content: &str, parent: Option<&Message>) -> Message {
        Message {
            id: Uuid::new_v4(),
            sender_id: Uuid::new_v4(),
            receiver_id: Uuid::new_v4(),
            content: content.to_string(),
            created_at: Utc::now(),
            edited: false,
            parent_id: parent.map(|p| p.id),
            read: false,
        }
    }

    #[test]
    fn test_children_in_discovery_order() {
        let root = message("root", None);
        let a = message("A", Some(&root));
        let b = message("B", Some(&root));
        let c = message("C", Some(&a));
        let messages = vec![root.clone(), a.clone(), b.clone(), c.clone()];

        let tree = assemble_thread(root.id, &messages).unwrap();
        assert_eq!(tree.id, root.id);
        assert_eq!(tree.child_ids(), vec![a.id, b.id]);
        assert_eq!(tree.children[0].child_ids(), vec![c.id]);
        assert!(tree.children[1].children.is_empty());
        assert_eq!(tree.size(), 4);

        let again = assemble_thread(root.id, &messages).unwrap();
        assert_eq!(tree, again);
    }

    #[test]
    fn test_siblings_not_sorted_by_timestamp_or_content() {
        let root = message("root", None);
        let mut late = message("zzz", Some(&root));
        late.created_at = Utc::now() + Duration::hours(1);
        let early = message("aaa", Some(&root));
        let messages = vec![root.clone(), late.clone(), early.clone()];

        let tree = assemble_thread(root.id, &messages).unwrap();
        assert_eq!(tree.child_ids(), vec![late.id, early.id]);
    }

    #[test]
    fn test_subtree_from_non_root_message() {
        let root = message("root", None);
        let a = message("A", Some(&root));
        let c = message("C", Some(&a));
        let messages = vec![a.clone(), c.clone()];

        let tree = assemble_thread(a.id, &messages).unwrap();
        assert_eq!(tree.id, a.id);
        assert_eq!(tree.child_ids(), vec![c.id]);
    }

    #[test]
    fn test_missing_root() {
        let root = message("root", None);
        assert!(assemble_thread(Uuid::new_v4(), &[root]).is_none());
        assert!(assemble_thread(Uuid::new_v4(), &[]).is_none());
    }

    #[test]
    fn test_deep_chain_does_not_recurse() {
        let mut messages = vec![message("0", None)];
        for i in 1..50_000 {
            let next = message(&i.to_string(), messages.last());
            messages.push(next);
        }

        let tree = assemble_thread(messages[0].id, &messages).unwrap();
        assert_eq!(tree.size(), 50_000);
    }

    #[test]
    fn test_corrupt_cycle_terminates() {
        let mut root = message("root", None);
        let a = message("A", Some(&root));
        let b = message("B", Some(&a));
        root.parent_id = Some(b.id);
        let messages = vec![root.clone(), a.clone(), b.clone()];

        let tree = assemble_thread(root.id, &messages).unwrap();
        assert_eq!(tree.size(), 3);
        assert_eq!(tree.child_ids(), vec![a.id]);
    }
}
