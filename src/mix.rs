//! Mix resolution
//!
//! Turns a free-text song query into a bounded, ordered list of tracks:
//! one search for the seed video, then pagination of the provider's
//! radio/mix collection keyed off that seed.

use async_trait::async_trait;

use crate::error::{RadioMixError, Result};
use crate::models::{MixResult, MixRoot, Page, PageCursor};

/// Prefix the provider uses for the radio/mix collection of a seed video
pub const MIX_COLLECTION_PREFIX: &str = "RD";

/// Largest page the playlist provider will return
pub const MAX_PAGE_SIZE: usize = 50;

/// Search + playlist provider backing the resolver
#[async_trait]
pub trait MixProvider: Send + Sync {
    /// Top video hit for a query (video type, music category), if any
    async fn search_top(&self, query: &str) -> Result<Option<MixRoot>>;

    /// One page of a collection listing
    async fn playlist_page(
        &self,
        collection_id: &str,
        page_size: usize,
        cursor: Option<&PageCursor>,
    ) -> Result<Page>;

    /// Collection id of the mix seeded by `root_video_id`
    fn mix_collection_id(&self, root_video_id: &str) -> String {
        format!("{}{}", MIX_COLLECTION_PREFIX, root_video_id)
    }
}

/// Pagination state: either another page is to be fetched, or we're done
#[derive(Debug, Clone, PartialEq, Eq)]
enum Pagination {
    /// Fetch the page after this cursor (`None` = first page)
    MorePages(Option<PageCursor>),
    Done,
}

impl Pagination {
    fn start() -> Self {
        Pagination::MorePages(None)
    }

    /// Transition after a page has been stitched in.
    ///
    /// `provider_page_empty` means the provider itself returned no entries;
    /// a page whose entries were all unplayable still follows its cursor.
    fn advance(
        next: Option<PageCursor>,
        provider_page_empty: bool,
        limit_reached: bool,
    ) -> Self {
        match next {
            Some(cursor) if !limit_reached && !provider_page_empty => {
                Pagination::MorePages(Some(cursor))
            }
            _ => Pagination::Done,
        }
    }
}

/// Resolves mixes against a [`MixProvider`]
pub struct MixResolver<P> {
    provider: P,
}

impl<P: MixProvider> MixResolver<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Resolve the mix for `query`, returning at most `limit` tracks.
    ///
    /// Any provider failure aborts the whole resolution; partial mixes are
    /// never returned.
    pub async fn resolve(&self, query: &str, limit: usize) -> Result<MixResult> {
        let query = query.trim();
        if query.is_empty() {
            return Err(RadioMixError::InvalidArgument("No song name provided".into()));
        }
        if limit == 0 {
            return Err(RadioMixError::InvalidArgument("limit must be at least 1".into()));
        }

        let root = self
            .provider
            .search_top(query)
            .await?
            .ok_or_else(|| RadioMixError::NotFound(format!("Song not found: {}", query)))?;

        let collection_id = self.provider.mix_collection_id(&root.id);
        tracing::debug!(root = %root.id, collection = %collection_id, "resolving mix");

        let mut tracks = Vec::with_capacity(limit.min(MAX_PAGE_SIZE));
        let mut state = Pagination::start();

        while let Pagination::MorePages(cursor) = state {
            let remaining = limit - tracks.len();
            let page_size = remaining.min(MAX_PAGE_SIZE);

            let page = self
                .provider
                .playlist_page(&collection_id, page_size, cursor.as_ref())
                .await?;

            tracing::debug!(
                collection = %collection_id,
                received = page.items.len(),
                fetched = page.fetched,
                has_next = page.next.is_some(),
                "fetched mix page"
            );

            let provider_page_empty = page.fetched == 0;
            tracks.extend(page.items.into_iter().take(remaining));

            state = Pagination::advance(page.next, provider_page_empty, tracks.len() >= limit);
        }

        tracing::info!(root = %root.id, tracks = tracks.len(), "mix resolved");

        Ok(MixResult { root, tracks })
    }
}
