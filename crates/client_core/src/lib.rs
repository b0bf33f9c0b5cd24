use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use shared::{
    domain::ArticleId,
    protocol::{
        Article, ArticleDraft, ArticleTag, ArticleType, Comment, Page, PageRequest,
        ResultEnvelope, Space, TreeNode,
    },
};
use tracing::debug;
use url::Url;

pub mod article_create;
pub mod session;
pub mod space_overview;
pub mod ui;
pub mod view;

pub use article_create::{ArticleCreationController, CreationState};
pub use session::{MemorySessionStore, MissingSessionStore, SessionStore, AUTH_USER_KEY};
pub use space_overview::{SpaceOverviewController, SpaceViewState};
pub use ui::{LoggingNavigator, LoggingNotifier, Navigator, Notifier, HOME_ROUTE};
pub use view::{PageState, TagOption};

#[async_trait]
pub trait ArticleService: Send + Sync {
    async fn save(&self, draft: &ArticleDraft) -> Result<ResultEnvelope<Article>>;
    async fn info(&self, article_id: ArticleId) -> Result<ResultEnvelope<Article>>;
}

#[async_trait]
pub trait ArticleTypeService: Send + Sync {
    async fn list(&self) -> Result<ResultEnvelope<Page<ArticleType>>>;
}

#[async_trait]
pub trait ArticleTagService: Send + Sync {
    async fn list(&self) -> Result<ResultEnvelope<Page<ArticleTag>>>;
}

#[async_trait]
pub trait SpaceService: Send + Sync {
    async fn space_info_by_code(&self, code: &str) -> Result<ResultEnvelope<Space>>;
    async fn article_count_by_code(&self, code: &str) -> Result<ResultEnvelope<i64>>;
    async fn article_tree_by_space(
        &self,
        page: &PageRequest,
        code: &str,
    ) -> Result<ResultEnvelope<Vec<TreeNode>>>;
}

#[async_trait]
pub trait CommentService: Send + Sync {
    async fn comments_by_article(
        &self,
        article_id: ArticleId,
        page: &PageRequest,
    ) -> Result<ResultEnvelope<Page<Comment>>>;
}

#[derive(Serialize)]
struct PageQuery {
    page: u32,
    size: u32,
}

impl From<&PageRequest> for PageQuery {
    fn from(page: &PageRequest) -> Self {
        Self {
            page: page.number,
            size: page.size,
        }
    }
}

/// Reqwest-backed implementation of every remote service contract. Transport
/// failures surface as errors; business failures stay inside the envelope.
pub struct HttpApi {
    http: Client,
    server_url: String,
}

impl HttpApi {
    pub fn new(server_url: impl Into<String>) -> Result<Self> {
        let server_url = server_url.into();
        let parsed = Url::parse(&server_url)
            .with_context(|| format!("invalid server url: {server_url}"))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(anyhow::anyhow!(
                "server url must use http or https: {server_url}"
            ));
        }
        Ok(Self {
            http: Client::new(),
            server_url: server_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl ArticleService for HttpApi {
    async fn save(&self, draft: &ArticleDraft) -> Result<ResultEnvelope<Article>> {
        debug!(title = %draft.title, "article: submitting draft");
        let envelope = self
            .http
            .post(format!("{}/article", self.server_url))
            .json(draft)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(envelope)
    }

    async fn info(&self, article_id: ArticleId) -> Result<ResultEnvelope<Article>> {
        let envelope = self
            .http
            .get(format!("{}/article/{}", self.server_url, article_id.0))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(envelope)
    }
}

#[async_trait]
impl ArticleTypeService for HttpApi {
    async fn list(&self) -> Result<ResultEnvelope<Page<ArticleType>>> {
        let envelope = self
            .http
            .get(format!("{}/article/types", self.server_url))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(envelope)
    }
}

#[async_trait]
impl ArticleTagService for HttpApi {
    async fn list(&self) -> Result<ResultEnvelope<Page<ArticleTag>>> {
        let envelope = self
            .http
            .get(format!("{}/article/tags", self.server_url))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(envelope)
    }
}

#[async_trait]
impl SpaceService for HttpApi {
    async fn space_info_by_code(&self, code: &str) -> Result<ResultEnvelope<Space>> {
        let envelope = self
            .http
            .get(format!("{}/space/{code}", self.server_url))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(envelope)
    }

    async fn article_count_by_code(&self, code: &str) -> Result<ResultEnvelope<i64>> {
        let envelope = self
            .http
            .get(format!("{}/space/{code}/article/count", self.server_url))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(envelope)
    }

    async fn article_tree_by_space(
        &self,
        page: &PageRequest,
        code: &str,
    ) -> Result<ResultEnvelope<Vec<TreeNode>>> {
        let envelope = self
            .http
            .get(format!("{}/space/{code}/article/tree", self.server_url))
            .query(&PageQuery::from(page))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(envelope)
    }
}

#[async_trait]
impl CommentService for HttpApi {
    async fn comments_by_article(
        &self,
        article_id: ArticleId,
        page: &PageRequest,
    ) -> Result<ResultEnvelope<Page<Comment>>> {
        let envelope = self
            .http
            .get(format!(
                "{}/comment/article/{}",
                self.server_url, article_id.0
            ))
            .query(&PageQuery::from(page))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(envelope)
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
