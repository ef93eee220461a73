//! Client-side snapshots of the recipe service's collections.
//!
//! Every mutating operation waits for the service's answer and then refetches
//! the collection(s) it touched. Snapshots are only ever replaced wholesale
//! by a fetch; nothing edits them locally. A failed refetch is logged and
//! leaves the previous snapshot in place; it never changes the outcome the
//! service reported for the mutation.

pub mod ingredients;
pub mod outcome;
pub mod recipes;

pub use ingredients::IngredientStore;
pub use outcome::MutationOutcome;
pub use recipes::RecipeStore;

use crate::client::{ApiRequest, Transport};
use crate::error::{Result, SyncError};
use log::warn;
use serde::de::DeserializeOwned;

pub(crate) fn log_refetch<T>(collection: &str, result: Result<T>) {
    if let Err(e) = result {
        warn!("refetching {} after a mutation failed: {}", collection, e);
    }
}

/// Fetches a whole collection. Any non-success status is an error; the
/// caller keeps its previous snapshot in that case.
pub(crate) async fn fetch_list<T: DeserializeOwned>(
    transport: &dyn Transport,
    request: ApiRequest,
) -> Result<Vec<T>> {
    let method = request.method;
    let path = request.path.clone();
    let response = transport.execute(request).await?;
    if !response.is_success() {
        return Err(SyncError::Status {
            method: method.as_str(),
            path,
            status: response.status,
        });
    }
    response.json(&path)
}
