use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::validation::not_blank;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCommentPayload {
    #[validate(custom(function = "not_blank"))]
    pub text: String,
    #[validate(length(max = 200))]
    pub title: Option<String>,
    #[validate(length(max = 100))]
    pub discussion_id: Option<String>,
    /// Id of the comment being replied to.
    pub parent: Option<i64>,
}

/// A comment as shown under a snippet. `replies` is only ever populated on
/// top-level comments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentView {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub text: String,
    pub title: Option<String>,
    pub discussion_id: Option<String>,
    pub parent: Option<i64>,
    pub date: String,
    pub like_count: i64,
    pub is_liked: bool,
    pub replies: Vec<CommentView>,
}
