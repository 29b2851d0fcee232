use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use validator::{Validate, ValidationError};

use crate::models::snippet::{Snippet, DIFFICULTY_LEVELS};
use crate::services::snippet_service::SnippetList;
use crate::utils::validation::{not_blank, one_of};

fn validate_difficulty(value: &str) -> Result<(), ValidationError> {
    one_of(value, &DIFFICULTY_LEVELS, "difficulty_level")
}

/// Tags arrive either as a JSON array or as one comma-separated string.
#[derive(Deserialize)]
#[serde(untagged)]
enum TagsInput {
    List(Vec<String>),
    Csv(String),
}

impl From<TagsInput> for Vec<String> {
    fn from(input: TagsInput) -> Self {
        let raw = match input {
            TagsInput::List(items) => items,
            TagsInput::Csv(s) => s.split(',').map(str::to_string).collect(),
        };
        raw.into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect()
    }
}

fn deserialize_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(TagsInput::deserialize(deserializer)?.into())
}

fn deserialize_optional_tags<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<TagsInput>::deserialize(deserializer)?.map(Into::into))
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateSnippetPayload {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 50))]
    pub language: String,
    #[validate(custom(function = "not_blank"))]
    pub summary: String,
    #[validate(custom(function = "not_blank"))]
    pub snippet: String,
    #[serde(default, deserialize_with = "deserialize_tags")]
    pub tags: Vec<String>,
    #[validate(custom(function = "validate_difficulty"))]
    pub difficulty_level: Option<String>,
    pub is_public: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateSnippetPayload {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub language: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub summary: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub snippet: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_tags")]
    pub tags: Option<Vec<String>>,
    #[validate(custom(function = "validate_difficulty"))]
    pub difficulty_level: Option<String>,
    pub is_public: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SnippetListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub language: Option<String>,
    pub difficulty_level: Option<String>,
    pub search: Option<String>,
    pub include_private: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnippetResponse {
    pub id: i64,
    pub title: String,
    pub language: String,
    pub summary: String,
    pub snippet: String,
    pub tags: Vec<String>,
    pub difficulty_level: String,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Snippet> for SnippetResponse {
    fn from(s: Snippet) -> Self {
        Self {
            id: s.id,
            title: s.title,
            language: s.language,
            summary: s.summary,
            snippet: s.snippet,
            tags: s.tags.0,
            difficulty_level: s.difficulty_level,
            is_public: s.is_public,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnippetListResponse {
    pub items: Vec<SnippetResponse>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

impl From<SnippetList> for SnippetListResponse {
    fn from(list: SnippetList) -> Self {
        Self {
            items: list.items.into_iter().map(SnippetResponse::from).collect(),
            total: list.total,
            page: list.page,
            per_page: list.per_page,
            total_pages: list.total_pages,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveToggleResponse {
    pub snippet_id: i64,
    pub saved: bool,
}
