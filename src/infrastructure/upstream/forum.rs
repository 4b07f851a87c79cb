//! Flarum forum API

use reqwest::header::AUTHORIZATION;
use reqwest::StatusCode;
use serde::Deserialize;

use crate::application::errors::UpstreamError;
use crate::domain::entities::ForumDiscussion;
use crate::infrastructure::http::HttpClient;

/// Discussions per page; the server sorts by comment count
pub const PAGE_LIMIT: u32 = 10;

#[derive(Deserialize, Debug)]
struct DiscussionList {
    #[serde(default)]
    data: Vec<Discussion>,
}

#[derive(Deserialize, Debug)]
struct Discussion {
    #[serde(default)]
    attributes: Attributes,
}

#[derive(Deserialize, Debug, Default)]
struct Attributes {
    #[serde(default)]
    title: String,
}

#[derive(Clone)]
pub struct ForumService {
    http: HttpClient,
    base_url: String,
    token: String,
}

impl ForumService {
    pub fn new(http: HttpClient, base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            token: token.into(),
        }
    }

    /// Most commented discussions, in server order.
    pub async fn hot_discussions(&self) -> Result<Vec<ForumDiscussion>, UpstreamError> {
        let response = self
            .http
            .inner()
            .get(format!("{}/api/discussions", self.base_url))
            .query(&[("sort", "-commentCount".to_string()), ("page[limit]", PAGE_LIMIT.to_string())])
            .header(AUTHORIZATION, format!("Token {}", self.token))
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(UpstreamError::Status(response.status().as_u16()));
        }

        let list: DiscussionList = response.json().await?;
        Ok(list
            .data
            .into_iter()
            .map(|d| ForumDiscussion {
                title: d.attributes.title,
            })
            .collect())
    }
}
