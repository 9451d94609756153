use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A Scrapbox user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub display_name: String,
    pub photo: String,
}

impl User {
    pub fn with_id(id: String) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }
}

/// A Scrapbox page on a project.
///
/// The list endpoint reports only the user id, so `user` holds an id-only
/// [`User`] there; the single page endpoint returns the full record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Page {
    pub id: String,
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub image: String,
    pub descriptions: Vec<String>,
    #[serde(deserialize_with = "user_or_id")]
    pub user: Option<User>,
    pub pin: i64,
    pub views: i64,
    pub point: i64,
    pub linked: i64,
    pub commit_id: String,
    pub created: i64,
    pub updated: i64,
    pub accessed: i64,
}

impl Page {
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.created, 0)
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.updated, 0)
    }

    pub fn accessed_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.accessed, 0)
    }

    pub fn is_pinned(&self) -> bool {
        self.pin != 0
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum UserRef {
    Id(String),
    Full(User),
}

fn user_or_id<'de, D>(deserializer: D) -> Result<Option<User>, D::Error>
where
    D: Deserializer<'de>,
{
    let user = Option::<UserRef>::deserialize(deserializer)?;
    Ok(user.map(|user| match user {
        UserRef::Id(id) => User::with_id(id),
        UserRef::Full(user) => user,
    }))
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Response of `/api/pages/:project`: the pagination echo plus the pages, in
/// the order the API ranked them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageListResult {
    pub skip: u64,
    pub limit: u64,
    pub count: u64,
    pub pages: Vec<Page>,
}

/// Optional parameters of a page listing. Zero means the parameter is left
/// out of the query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListOptions {
    pub skip: u64,
    pub limit: u64,
}

impl ListOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_skip(mut self, skip: u64) -> Self {
        self.skip = skip;
        self
    }

    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }
}
