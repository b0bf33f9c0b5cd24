use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{ArticleId, ArticleTagId, ArticleTypeId, CommentId, SpaceId, UserId};

/// Result code the server attaches to every successful envelope.
pub const SUCCESS_CODE: i32 = 0;

const UNKNOWN_ERROR_TEXT: &str = "request failed with an unspecified error";

/// Generic success/failure wrapper every remote call returns. Business
/// failures arrive as a non-success `code`, independent of transport status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultEnvelope<T> {
    pub code: i32,
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ResultEnvelope<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: SUCCESS_CODE,
            data: Some(data),
            message: None,
        }
    }

    pub fn failure(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            data: None,
            message: Some(message.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }

    /// Text for user-facing error surfaces when the envelope is not a success.
    pub fn error_text(&self) -> String {
        self.message
            .clone()
            .unwrap_or_else(|| UNKNOWN_ERROR_TEXT.to_string())
    }
}

/// One page of a server-side paginated collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub size: u32,
    pub number: u32,
    pub total: u64,
}

/// Page parameters sent with list requests.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageRequest {
    pub number: u32,
    pub size: u32,
}

impl PageRequest {
    pub fn new(number: u32, size: u32) -> Self {
        Self { number, size }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            number: 0,
            size: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Space {
    pub id: SpaceId,
    pub code: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// Authorship stamp attached to a draft at submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: UserId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpaceRef {
    pub id: SpaceId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRef {
    pub id: ArticleTagId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleType {
    pub id: ArticleTypeId,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleTag {
    pub id: ArticleTagId,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub id: ArticleId,
    pub title: String,
    pub content: String,
    pub user: UserRef,
    pub space: SpaceRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<ArticleId>,
    #[serde(default)]
    pub article_tags: Vec<TagRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Client-side draft of an article. Identity is assigned by the server on
/// save; authorship, space, parent, and tags are stamped at submission.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArticleDraft {
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub article_type: Option<ArticleTypeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space: Option<SpaceRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<ArticleId>,
    #[serde(default)]
    pub article_tags: Vec<TagRef>,
}

/// One node of a space's article tree, reflecting parent/child nesting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeNode {
    pub id: ArticleId,
    pub name: String,
    #[serde(default)]
    pub children: Vec<TreeNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub content: String,
    pub user_id: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Identity parsed from the client-persisted session blob.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: UserId,
    pub username: String,
}
