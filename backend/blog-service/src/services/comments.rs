use std::collections::HashMap;

use uuid::Uuid;

use crate::models::{Comment, CommentThread};

/// Partition a post's approved comments into a two-level tree.
///
/// Top-level comments come out newest first, replies oldest first. Replies
/// whose parent is not itself a visible top-level comment are dropped.
pub fn build_comment_tree(comments: Vec<Comment>) -> Vec<CommentThread> {
    let mut by_parent: HashMap<Option<Uuid>, Vec<Comment>> = HashMap::new();
    for comment in comments {
        by_parent.entry(comment.parent_id).or_default().push(comment);
    }

    let mut top_level = by_parent.remove(&None).unwrap_or_default();
    top_level.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    top_level
        .into_iter()
        .map(|comment| {
            let mut replies = by_parent.remove(&Some(comment.id)).unwrap_or_default();
            replies.sort_by(|a, b| a.created_at.cmp(&b.created_at));
            CommentThread { comment, replies }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn comment(id: u128, parent: Option<u128>, minute: i64) -> Comment {
        Comment {
            id: Uuid::from_u128(id),
            post_id: Uuid::from_u128(999),
            parent_id: parent.map(Uuid::from_u128),
            author_name: format!("reader-{id}"),
            content: "Nice write-up".into(),
            created_at: Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
                + Duration::minutes(minute),
        }
    }

    #[test]
    fn orders_top_level_newest_first_and_replies_oldest_first() {
        let tree = build_comment_tree(vec![
            comment(1, None, 0),
            comment(2, None, 10),
            comment(3, Some(1), 30),
            comment(4, Some(1), 20),
            comment(5, Some(2), 15),
        ]);

        let top: Vec<u128> = tree.iter().map(|t| t.comment.id.as_u128()).collect();
        assert_eq!(top, vec![2, 1]);

        let replies_of_1: Vec<u128> = tree[1].replies.iter().map(|c| c.id.as_u128()).collect();
        assert_eq!(replies_of_1, vec![4, 3]);
        assert_eq!(tree[0].replies.len(), 1);
    }

    #[test]
    fn drops_replies_to_hidden_or_nested_parents() {
        let tree = build_comment_tree(vec![
            comment(1, None, 0),
            comment(2, Some(1), 5),
            // reply to a reply: only one nesting level is rendered
            comment(3, Some(2), 6),
            // parent not approved, so absent from the input
            comment(4, Some(77), 7),
        ]);

        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].replies.len(), 1);
        assert_eq!(tree[0].replies[0].id, Uuid::from_u128(2));
    }

    #[test]
    fn empty_input_yields_empty_tree() {
        assert!(build_comment_tree(Vec::new()).is_empty());
    }
}
