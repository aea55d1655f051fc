//! Execution of panel effects against the document store and the clock.

use tokio::task::JoinSet;

use super::{PanelEffect, PanelEvent, StoreConnection, ToastEffect};
use crate::store::{self, RATINGS_COLLECTION, StoreError, StoreHandle, document_id};

/// Result of deleting every document in the ratings collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClearOutcome {
    /// Ids that were deleted.
    pub deleted: Vec<String>,
    /// Ids whose delete failed, with the failure.
    pub failures: Vec<(String, StoreError)>,
}

impl ClearOutcome {
    /// Returns the number of failed deletes.
    #[must_use]
    pub const fn failed(&self) -> usize {
        self.failures.len()
    }

    pub(super) fn log(&self) {
        tracing::info!(
            deleted = self.deleted.len(),
            failed = self.failed(),
            "cleared ratings collection"
        );
        for (id, error) in &self.failures {
            tracing::warn!("deleting car rating {id:?} failed: {error}");
        }
    }
}

/// Runs `effect` to completion and returns the event reporting its outcome.
///
/// Store effects issued while `connection` is pending resolve to the
/// corresponding failure event with a backend error; the panel never emits
/// them in that state.
pub async fn perform(effect: PanelEffect, connection: &StoreConnection) -> Option<PanelEvent> {
    match effect {
        PanelEffect::Fetch { id } => {
            let result = match connection.handle() {
                Some(handle) => store::fetch_rating(handle.store(), &id).await,
                None => Err(not_connected()),
            };
            Some(match result {
                Ok(rating) => PanelEvent::LoadSucceeded(rating),
                Err(error) => PanelEvent::LoadFailed { id, error },
            })
        }
        PanelEffect::Write { rating } => {
            let result = match connection.handle() {
                Some(handle) => store::save_rating(handle.store(), &rating).await.map(drop),
                None => Err(not_connected()),
            };
            Some(PanelEvent::SaveSettled {
                id: rating.id,
                result,
            })
        }
        PanelEffect::ClearCollection => {
            let result = match connection.handle() {
                Some(handle) => clear_ratings(handle.clone()).await,
                None => Err(not_connected()),
            };
            Some(match result {
                Ok(outcome) => PanelEvent::DeleteAllSettled(outcome),
                Err(error) => PanelEvent::DeleteAllFailed(error),
            })
        }
        PanelEffect::Toast(ToastEffect::ArmHideTimer { ticket, after }) => {
            tokio::time::sleep(after).await;
            Some(PanelEvent::ToastTimerElapsed(ticket))
        }
        PanelEffect::Toast(ToastEffect::StartFade { ticket, duration }) => {
            tokio::time::sleep(duration).await;
            Some(PanelEvent::ToastFadeFinished(ticket))
        }
    }
}

/// Deletes every document in the ratings collection.
///
/// The collection is listed once, then one delete per id runs concurrently.
/// Individual delete failures are collected rather than aborting the rest.
///
/// # Errors
///
/// Returns the store's error when the collection cannot be listed.
pub async fn clear_ratings(handle: StoreHandle) -> Result<ClearOutcome, StoreError> {
    let documents = handle.store().get_documents(RATINGS_COLLECTION).await?;
    let ids: Vec<String> = documents
        .iter()
        .filter_map(|document| document_id(document).map(str::to_owned))
        .collect();

    let mut deletes = JoinSet::new();
    for id in ids {
        let task_handle = handle.clone();
        deletes.spawn(async move {
            let result = task_handle
                .store()
                .delete_document(RATINGS_COLLECTION, &id)
                .await;
            (id, result)
        });
    }

    let mut outcome = ClearOutcome::default();
    while let Some(joined) = deletes.join_next().await {
        match joined {
            Ok((id, Ok(()))) => outcome.deleted.push(id),
            Ok((id, Err(error))) => outcome.failures.push((id, error)),
            Err(join_error) => outcome.failures.push((
                String::new(),
                StoreError::Backend {
                    message: join_error.to_string(),
                },
            )),
        }
    }
    outcome.deleted.sort();
    Ok(outcome)
}

fn not_connected() -> StoreError {
    StoreError::Backend {
        message: "data store is not connected".to_owned(),
    }
}
