//! Article creation flow: collect fields across a short wizard, assemble the
//! draft with ambient identity, submit, and react to the result code.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use shared::{
    domain::{ArticleId, ArticleTagId, ArticleTypeId, SpaceId},
    protocol::{ArticleDraft, ArticleType, SpaceRef, TagRef, UserRef},
};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::{
    session::SessionStore,
    ui::{Navigator, Notifier, HOME_ROUTE},
    view::TagOption,
    ArticleService, ArticleTagService, ArticleTypeService,
};

#[derive(Debug, Clone, Default)]
pub struct CreationState {
    pub draft: ArticleDraft,
    pub article_types: Vec<ArticleType>,
    pub tag_options: Vec<TagOption>,
    pub selected_tags: Vec<ArticleTagId>,
    pub settings_visible: bool,
}

pub struct ArticleCreationController {
    space: SpaceId,
    parent: Option<ArticleId>,
    articles: Arc<dyn ArticleService>,
    article_types: Arc<dyn ArticleTypeService>,
    article_tags: Arc<dyn ArticleTagService>,
    session: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
    state: Mutex<CreationState>,
}

impl ArticleCreationController {
    /// Space and parent references are route parameters, captured at
    /// construction.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        space: SpaceId,
        parent: Option<ArticleId>,
        articles: Arc<dyn ArticleService>,
        article_types: Arc<dyn ArticleTypeService>,
        article_tags: Arc<dyn ArticleTagService>,
        session: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            space,
            parent,
            articles,
            article_types,
            article_tags,
            session,
            navigator,
            notifier,
            state: Mutex::new(CreationState::default()),
        }
    }

    /// Resets the draft and loads the article-type catalog.
    pub async fn initialize(&self) {
        {
            let mut state = self.state.lock().await;
            *state = CreationState::default();
        }
        match self.article_types.list().await {
            Ok(envelope) => {
                let types = envelope.data.map(|page| page.content).unwrap_or_default();
                self.state.lock().await.article_types = types;
            }
            Err(err) => warn!("article: type catalog load failed: {err}"),
        }
    }

    /// Lazily loads the tag catalog when the tagging step is reached, mapping
    /// each server tag to a picker option.
    pub async fn load_tag_catalog(&self) {
        match self.article_tags.list().await {
            Ok(envelope) => {
                let Some(page) = envelope.data else {
                    return;
                };
                let options = page
                    .content
                    .into_iter()
                    .map(|tag| TagOption {
                        value: tag.id,
                        label: tag.name,
                    })
                    .collect();
                self.state.lock().await.tag_options = options;
            }
            Err(err) => warn!("article: tag catalog load failed: {err}"),
        }
    }

    pub async fn set_title(&self, title: impl Into<String>) {
        self.state.lock().await.draft.title = title.into();
    }

    pub async fn set_article_type(&self, type_id: ArticleTypeId) {
        self.state.lock().await.draft.article_type = Some(type_id);
    }

    /// Assigns freeform editor content to the draft body.
    pub async fn record_editor_content(&self, content: impl Into<String>) {
        self.state.lock().await.draft.content = content.into();
    }

    /// Marks a tag as selected. Only tags drawn from the loaded catalog are
    /// accepted; unknown ids are dropped with a log record.
    pub async fn select_tag(&self, tag_id: ArticleTagId) {
        let mut state = self.state.lock().await;
        if !state.tag_options.iter().any(|option| option.value == tag_id) {
            warn!(tag_id = tag_id.0, "article: ignoring tag outside catalog");
            return;
        }
        if !state.selected_tags.contains(&tag_id) {
            state.selected_tags.push(tag_id);
        }
    }

    pub async fn show_settings(&self) {
        self.state.lock().await.settings_visible = true;
    }

    /// Stamps the draft with the session identity, the space and parent
    /// route references, and the selected tag refs, then submits it. A
    /// success result hides the settings dialog, emits an info notification,
    /// and navigates home; any other result surfaces the error payload.
    /// Fails before any request is sent when the session blob is unusable.
    pub async fn submit(&self) -> Result<()> {
        let user = self.session.user()?;

        let draft = {
            let mut state = self.state.lock().await;
            if state.draft.title.trim().is_empty() {
                return Err(anyhow!("article title must not be empty"));
            }
            let tags: Vec<TagRef> = state.selected_tags.iter().map(|&id| TagRef { id }).collect();
            state.draft.user = Some(UserRef { id: user.id });
            state.draft.space = Some(SpaceRef { id: self.space });
            state.draft.parent = self.parent;
            state.draft.article_tags = tags;
            state.draft.clone()
        };

        let envelope = self.articles.save(&draft).await?;
        if envelope.is_success() {
            self.state.lock().await.settings_visible = false;
            info!(title = %draft.title, "article: created");
            self.notifier
                .info(&format!("article '{}' created", draft.title));
            self.navigator.navigate(HOME_ROUTE);
        } else {
            self.notifier.error(&envelope.error_text());
        }
        Ok(())
    }

    pub async fn snapshot(&self) -> CreationState {
        self.state.lock().await.clone()
    }
}
