use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use client_core::{
    ArticleCreationController, ArticleService, ArticleTagService, ArticleTypeService,
    CommentService, HttpApi, LoggingNavigator, LoggingNotifier, MemorySessionStore,
    SpaceOverviewController, SpaceService,
};
use shared::{
    domain::{ArticleId, ArticleTagId, SpaceId, UserId},
    protocol::{SessionUser, TreeNode},
};

mod config;

#[derive(Parser, Debug)]
struct Args {
    /// Overrides the configured server url.
    #[arg(long)]
    server_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Browse a space: metadata, article count, article tree, and optionally
    /// one article's detail with its comments.
    Browse {
        #[arg(long)]
        space: String,
        #[arg(long)]
        article: Option<i64>,
    },
    /// Create an article in a space.
    Publish {
        #[arg(long)]
        space_id: i64,
        #[arg(long)]
        parent: Option<i64>,
        #[arg(long)]
        user_id: i64,
        #[arg(long)]
        username: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
        #[arg(long)]
        tag: Vec<i64>,
    },
}

fn print_tree(nodes: &[TreeNode], depth: usize) {
    for node in nodes {
        println!("{}- [{}] {}", "  ".repeat(depth), node.id.0, node.name);
        print_tree(&node.children, depth + 1);
    }
}

async fn browse(api: Arc<HttpApi>, space_code: String, article: Option<i64>) -> Result<()> {
    let controller = SpaceOverviewController::new(
        space_code,
        Arc::clone(&api) as Arc<dyn SpaceService>,
        Arc::clone(&api) as Arc<dyn ArticleService>,
        api as Arc<dyn CommentService>,
    );
    controller.initialize().await;

    if let Some(id) = article {
        controller.select_article(ArticleId(id)).await?;
    }

    let state = controller.snapshot().await;
    match &state.space {
        Some(space) => println!("Space '{}' ({})", space.name, space.code),
        None => println!("Space metadata unavailable"),
    }
    println!("Articles: {}", state.article_count.unwrap_or(0));
    match &state.tree_nodes {
        Some(nodes) if !nodes.is_empty() => print_tree(nodes, 0),
        _ => println!("(no articles)"),
    }
    if let Some(article) = &state.article {
        println!("\n# {}\n{}", article.title, article.content);
        println!("\nComments ({}):", state.comments.len());
        for comment in &state.comments {
            let author = comment.username.as_deref().unwrap_or("anonymous");
            println!("  {author}: {}", comment.content);
        }
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
async fn publish(
    api: Arc<HttpApi>,
    space_id: i64,
    parent: Option<i64>,
    user_id: i64,
    username: String,
    title: String,
    content: String,
    tags: Vec<i64>,
) -> Result<()> {
    let session = MemorySessionStore::new();
    session.store_user(&SessionUser {
        id: UserId(user_id),
        username,
    });

    let controller = ArticleCreationController::new(
        SpaceId(space_id),
        parent.map(ArticleId),
        Arc::clone(&api) as Arc<dyn ArticleService>,
        Arc::clone(&api) as Arc<dyn ArticleTypeService>,
        api as Arc<dyn ArticleTagService>,
        Arc::new(session),
        Arc::new(LoggingNavigator),
        Arc::new(LoggingNotifier),
    );

    controller.initialize().await;
    controller.set_title(&title).await;
    controller.record_editor_content(content).await;
    if !tags.is_empty() {
        controller.load_tag_catalog().await;
        for tag in tags {
            controller.select_tag(ArticleTagId(tag)).await;
        }
    }
    controller.submit().await?;
    println!("Published '{title}'");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let settings = config::load_settings();
    let server_url = args.server_url.unwrap_or(settings.server_url);
    let api = Arc::new(HttpApi::new(server_url)?);

    match args.command {
        Command::Browse { space, article } => browse(api, space, article).await,
        Command::Publish {
            space_id,
            parent,
            user_id,
            username,
            title,
            content,
            tag,
        } => {
            publish(
                api, space_id, parent, user_id, username, title, content, tag,
            )
            .await
        }
    }
}
