pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod logic;
pub mod model;
pub mod store;
pub mod sync;
pub mod view;

pub use client::{HttpTransport, InProcessTransport, Transport};
pub use error::{Result, SyncError};
pub use logic::{resolve_ingredients, EditMode, EditSession, ResolvedRecipe};
pub use model::*;
pub use sync::{IngredientStore, MutationOutcome, RecipeStore};
pub use view::{Workspace, WorkspaceView};

/// Connects to the configured recipe service and loads both collections.
pub async fn open_workspace(config: &crate::config::AppConfig) -> anyhow::Result<Workspace> {
    let transport = HttpTransport::new(&config.api.base_url, config.request_timeout())?;
    let mut workspace = Workspace::new(std::sync::Arc::new(transport));
    workspace.refresh().await?;
    Ok(workspace)
}
