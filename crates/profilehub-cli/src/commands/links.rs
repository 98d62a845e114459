//! Share link management CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;
use uuid::Uuid;

use crate::output::{self, OutputFormat};
use profilehub_api::AppState;
use profilehub_core::config::AppConfig;
use profilehub_core::error::AppError;
use profilehub_entity::share::{LinkVisibility, ShareLink};
use profilehub_service::{CreateShareLinkRequest, RequestContext};

/// Arguments for link commands
#[derive(Debug, Args)]
pub struct LinksArgs {
    /// Owner whose links are managed
    #[arg(short, long)]
    pub user: Uuid,

    /// Link subcommand
    #[command(subcommand)]
    pub command: LinksCommand,
}

/// Link subcommands
#[derive(Debug, Subcommand)]
pub enum LinksCommand {
    /// List the owner's links, newest first
    List,
    /// Create a new link
    Create {
        /// Link name
        name: String,
        /// Hide the profile photo
        #[arg(long)]
        no_avatar: bool,
        /// Hide the cover
        #[arg(long)]
        no_cover: bool,
        /// Hide attachments
        #[arg(long)]
        no_attachments: bool,
    },
    /// Delete a link
    Delete {
        /// Link ID
        id: Uuid,
        /// Skip confirmation prompt
        #[arg(long)]
        force: bool,
    },
    /// Show usage statistics
    Stats,
}

/// Link display row for table output
#[derive(Debug, Serialize, Tabled)]
struct LinkRow {
    /// Link ID
    id: String,
    /// Name
    name: String,
    /// Views
    views: i64,
    /// Last used
    last_used: String,
    /// Sections shown
    shows: String,
    /// Public URL
    url: String,
}

impl LinkRow {
    fn new(link: &ShareLink, state: &AppState) -> Self {
        Self {
            id: link.id.to_string(),
            name: link.name.clone(),
            views: link.usage_count,
            last_used: link
                .last_used_at
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "never".to_string()),
            shows: describe(link.visibility),
            url: state.share_url(&link.token),
        }
    }
}

fn describe(visibility: LinkVisibility) -> String {
    let sections: Vec<&str> = [
        (visibility.avatar, "avatar"),
        (visibility.cover, "cover"),
        (visibility.attachments, "attachments"),
    ]
    .into_iter()
    .filter_map(|(on, name)| on.then_some(name))
    .collect();

    if sections.is_empty() {
        "basics only".to_string()
    } else {
        sections.join(", ")
    }
}

/// Execute link commands
pub async fn execute(
    args: &LinksArgs,
    config: AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    super::require_persistent_backend(&config)?;

    let state = super::build_state(config).await?;
    let ctx = RequestContext::new(args.user);

    let result = run(&args.command, &state, &ctx, format).await;
    state.stores.close().await;
    result
}

async fn run(
    command: &LinksCommand,
    state: &AppState,
    ctx: &RequestContext,
    format: OutputFormat,
) -> Result<(), AppError> {
    let service = &state.share_link_service;

    match command {
        LinksCommand::List => {
            let mut links = service.list(ctx).await?;
            links.sort_by(|a, b| b.created_at.cmp(&a.created_at));

            let rows: Vec<LinkRow> = links.iter().map(|l| LinkRow::new(l, state)).collect();
            output::print_list(&rows, format);
        }
        LinksCommand::Create {
            name,
            no_avatar,
            no_cover,
            no_attachments,
        } => {
            let link = service
                .create(
                    ctx,
                    CreateShareLinkRequest {
                        name: name.clone(),
                        visibility: Some(LinkVisibility::new(
                            !no_avatar,
                            !no_cover,
                            !no_attachments,
                        )),
                    },
                )
                .await?;

            output::print_success(&format!("Link '{}' created", link.name));
            output::print_kv("ID", &link.id.to_string());
            output::print_kv("URL", &state.share_url(&link.token));
        }
        LinksCommand::Delete { id, force } => {
            let link = service.get(ctx, *id).await?;

            if !force {
                let confirm = dialoguer::Confirm::new()
                    .with_prompt(format!(
                        "Delete link '{}'? Its URL will stop working. Continue?",
                        link.name
                    ))
                    .default(false)
                    .interact()
                    .map_err(|e| AppError::internal(format!("Prompt failed: {e}")))?;

                if !confirm {
                    output::print_warning("Aborted.");
                    return Ok(());
                }
            }

            service.delete(ctx, *id).await?;
            output::print_success(&format!("Link '{}' deleted", link.name));
        }
        LinksCommand::Stats => {
            let stats = state.stats_service.stats(ctx).await?;

            match format {
                OutputFormat::Json => output::print_json(&stats),
                OutputFormat::Table => {
                    output::print_kv("Total views", &stats.total_views.to_string());
                    output::print_kv("Active links", &stats.active_links.to_string());
                    output::print_kv("Used this week", &stats.recent_views.to_string());
                    output::print_kv(
                        "Views per day",
                        &format!("{:.1}", stats.average_views_per_day),
                    );
                    output::print_kv(
                        "Most viewed",
                        &stats
                            .most_viewed_link
                            .as_ref()
                            .map(|l| format!("{} ({} views)", l.name, l.usage_count))
                            .unwrap_or_else(|| "none".to_string()),
                    );
                }
            }
        }
    }

    Ok(())
}
