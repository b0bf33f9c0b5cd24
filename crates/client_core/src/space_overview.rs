//! Space browsing view: one space's metadata, its article count, its article
//! tree, and the detail/comments of whichever article is selected.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use shared::{
    domain::ArticleId,
    protocol::{Article, Comment, PageRequest, ResultEnvelope, Space, TreeNode},
};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::{view::PageState, ArticleService, CommentService, SpaceService};

#[derive(Debug, Clone, Default)]
pub struct SpaceViewState {
    pub space: Option<Space>,
    pub article_count: Option<i64>,
    pub tree_nodes: Option<Vec<TreeNode>>,
    pub article: Option<Article>,
    pub comments: Vec<Comment>,
    pub page: Option<PageState>,
    pub current_page: Option<u32>,
}

pub struct SpaceOverviewController {
    space_code: String,
    spaces: Arc<dyn SpaceService>,
    articles: Arc<dyn ArticleService>,
    comments: Arc<dyn CommentService>,
    state: Mutex<SpaceViewState>,
}

impl SpaceOverviewController {
    /// The space code is a route parameter, captured at construction.
    pub fn new(
        space_code: impl Into<String>,
        spaces: Arc<dyn SpaceService>,
        articles: Arc<dyn ArticleService>,
        comments: Arc<dyn CommentService>,
    ) -> Self {
        Self {
            space_code: space_code.into(),
            spaces,
            articles,
            comments,
            state: Mutex::new(SpaceViewState::default()),
        }
    }

    pub fn space_code(&self) -> &str {
        &self.space_code
    }

    /// Three independent fetches; each populates its own piece of view state
    /// on completion, in whatever order the responses arrive. Transport
    /// failures land on the generic log surface and leave the field untouched.
    pub async fn initialize(&self) {
        let page = PageRequest::default();
        let (space, count, tree) = tokio::join!(
            self.spaces.space_info_by_code(&self.space_code),
            self.spaces.article_count_by_code(&self.space_code),
            self.spaces
                .article_tree_by_space(&page, &self.space_code),
        );

        match space {
            Ok(envelope) => self.state.lock().await.space = envelope.data,
            Err(err) => warn!(space_code = %self.space_code, "space: info load failed: {err}"),
        }
        match count {
            Ok(envelope) => self.state.lock().await.article_count = envelope.data,
            Err(err) => warn!(space_code = %self.space_code, "space: article count load failed: {err}"),
        }
        match tree {
            Ok(envelope) => self.state.lock().await.tree_nodes = envelope.data,
            Err(err) => warn!(space_code = %self.space_code, "space: article tree load failed: {err}"),
        }
    }

    /// Loads the detail of the article picked in the tree, then chains into
    /// the comment load for it. Overlapping selections are not cancelled;
    /// completions apply in arrival order and the last write wins.
    pub async fn select_article(&self, article_id: ArticleId) -> Result<()> {
        let envelope: ResultEnvelope<Article> = self.articles.info(article_id).await?;
        let Some(article) = envelope.data else {
            warn!(
                article_id = article_id.0,
                "space: article detail unavailable: {}",
                envelope.error_text()
            );
            return Ok(());
        };

        debug!(article_id = article.id.0, "space: article selected");
        {
            let mut state = self.state.lock().await;
            state.article = Some(article);
        }
        self.load_comments().await
    }

    /// Fetches a page of comments for the currently selected article and
    /// re-derives the page state from the server's metadata.
    pub async fn load_comments(&self) -> Result<()> {
        let article_id = {
            let state = self.state.lock().await;
            state
                .article
                .as_ref()
                .map(|article| article.id)
                .ok_or_else(|| anyhow!("no article selected"))?
        };

        let envelope = self
            .comments
            .comments_by_article(article_id, &PageRequest::default())
            .await?;
        let Some(page) = envelope.data else {
            warn!(
                article_id = article_id.0,
                "space: comment load returned no data: {}",
                envelope.error_text()
            );
            return Ok(());
        };

        let page_state = PageState::from_page(&page);
        let mut state = self.state.lock().await;
        state.comments = page.content;
        state.page = Some(page_state);
        state.current_page = Some(page_state.number);
        Ok(())
    }

    pub async fn snapshot(&self) -> SpaceViewState {
        self.state.lock().await.clone()
    }
}
