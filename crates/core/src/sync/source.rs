//! Fetching live data for a sync check.
//!
//! The relational store sits behind [`LiveDataSource`] so the comparison and
//! repair logic stays free of I/O. A failed fetch never produces a verdict
//! and never touches the document.

use async_trait::async_trait;

use super::compare::{check_sync, SyncVerdict};
use super::reconcile::sync_document;
use super::snapshot::LiveData;
use super::SyncError;
use crate::document::node::Document;
use crate::error::CoreError;
use crate::types::DbId;

/// Source of the current organization, location, categories, and items.
#[async_trait]
pub trait LiveDataSource: Send + Sync {
    async fn fetch_live_data(&self, organization_id: DbId) -> Result<LiveData, CoreError>;
}

async fn fetch<S>(source: &S, organization_id: DbId) -> Result<LiveData, SyncError>
where
    S: LiveDataSource + ?Sized,
{
    source
        .fetch_live_data(organization_id)
        .await
        .map_err(|e| SyncError::LiveDataUnavailable(e.to_string()))
}

/// Fetch live data and compare it against `document`.
pub async fn check_sync_from<S>(
    source: &S,
    organization_id: DbId,
    document: &Document,
) -> Result<SyncVerdict, SyncError>
where
    S: LiveDataSource + ?Sized,
{
    let live = fetch(source, organization_id).await?;
    Ok(check_sync(document, &live))
}

/// Fetch live data and return the repaired copy of `document`.
pub async fn sync_from<S>(
    source: &S,
    organization_id: DbId,
    document: &Document,
) -> Result<Document, SyncError>
where
    S: LiveDataSource + ?Sized,
{
    let live = fetch(source, organization_id).await?;
    Ok(sync_document(document, &live)?)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::document::block::{Block, HeaderProps};
    use crate::document::mutation::{apply, Mutation};
    use crate::sync::snapshot::OrganizationSnapshot;

    struct FixedSource(LiveData);

    #[async_trait]
    impl LiveDataSource for FixedSource {
        async fn fetch_live_data(&self, _organization_id: DbId) -> Result<LiveData, CoreError> {
            Ok(self.0.clone())
        }
    }

    struct DownSource;

    #[async_trait]
    impl LiveDataSource for DownSource {
        async fn fetch_live_data(&self, _organization_id: DbId) -> Result<LiveData, CoreError> {
            Err(CoreError::Internal("connection refused".into()))
        }
    }

    fn organization(name: &str) -> OrganizationSnapshot {
        OrganizationSnapshot {
            id: 1,
            name: name.into(),
            logo_url: None,
            banner_url: None,
            updated_at: Utc.timestamp_opt(1, 0).unwrap(),
        }
    }

    fn document() -> Document {
        apply(
            &Document::template(),
            Mutation::SetProp {
                id: "header".into(),
                patch: Block::Header(HeaderProps {
                    organization: Some(organization("Old Name")),
                    ..HeaderProps::default()
                })
                .props_map()
                .unwrap(),
            },
        )
        .unwrap()
    }

    fn live(name: &str) -> LiveData {
        LiveData {
            organization: Some(organization(name)),
            ..LiveData::default()
        }
    }

    #[tokio::test]
    async fn verdict_from_source() {
        let doc = document();
        let verdict = check_sync_from(&FixedSource(live("New Name")), 1, &doc)
            .await
            .unwrap();
        assert_eq!(verdict, SyncVerdict::OutOfSync);

        let verdict = check_sync_from(&FixedSource(live("Old Name")), 1, &doc)
            .await
            .unwrap();
        assert_eq!(verdict, SyncVerdict::InSync);
    }

    #[tokio::test]
    async fn unavailable_source_gives_no_verdict() {
        let doc = document();
        let result = check_sync_from(&DownSource, 1, &doc).await;
        assert_matches!(result, Err(SyncError::LiveDataUnavailable(_)));
    }

    #[tokio::test]
    async fn unavailable_source_leaves_document_alone() {
        let doc = document();
        let before = doc.clone();
        let result = sync_from(&DownSource, 1, &doc).await;
        assert_matches!(result, Err(SyncError::LiveDataUnavailable(_)));
        assert_eq!(doc, before);
    }

    #[tokio::test]
    async fn sync_through_trait_object() {
        let source: Box<dyn LiveDataSource> = Box::new(FixedSource(live("New Name")));
        let synced = sync_from(source.as_ref(), 1, &document()).await.unwrap();
        let verdict = check_sync_from(source.as_ref(), 1, &synced).await.unwrap();
        assert!(verdict.is_in_sync());
    }
}
