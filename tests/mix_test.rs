//! Mix Resolver Tests
//!
//! Drives the resolver against an in-memory provider to check pagination,
//! truncation and ordering without any HTTP.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use radiomix::mix::{MixProvider, MixResolver, MAX_PAGE_SIZE};
use radiomix::models::{MixRoot, Page, PageCursor, Track};
use radiomix::{RadioMixError, Result};

/// Provider serving a fixed collection, paged by numeric cursors
struct FakeProvider {
    root: Option<MixRoot>,
    collection: Vec<Track>,
    /// Page index (0-based) that fails, if any
    fail_at_page: Option<usize>,
    searches: AtomicUsize,
    pages: AtomicUsize,
    requested: Mutex<Vec<(String, usize, Option<String>)>>,
}

impl FakeProvider {
    fn with_tracks(n: usize) -> Self {
        Self {
            root: Some(MixRoot {
                title: "Seed".into(),
                id: "seed".into(),
            }),
            collection: (0..n)
                .map(|i| Track::new(format!("Track {}", i), &format!("v{}", i), None))
                .collect(),
            fail_at_page: None,
            searches: AtomicUsize::new(0),
            pages: AtomicUsize::new(0),
            requested: Mutex::new(Vec::new()),
        }
    }

    fn empty_search() -> Self {
        Self {
            root: None,
            ..Self::with_tracks(0)
        }
    }
}

#[async_trait]
impl MixProvider for FakeProvider {
    async fn search_top(&self, _query: &str) -> Result<Option<MixRoot>> {
        self.searches.fetch_add(1, Ordering::SeqCst);
        Ok(self.root.clone())
    }

    async fn playlist_page(
        &self,
        collection_id: &str,
        page_size: usize,
        cursor: Option<&PageCursor>,
    ) -> Result<Page> {
        let page_index = self.pages.fetch_add(1, Ordering::SeqCst);
        self.requested.lock().unwrap().push((
            collection_id.to_string(),
            page_size,
            cursor.map(|c| c.as_str().to_string()),
        ));

        if self.fail_at_page == Some(page_index) {
            return Err(RadioMixError::Provider("quotaExceeded".into()));
        }

        // The real provider pages in its own fixed size, independent of the
        // requested size, so serve pages of 5 capped at page_size.
        let start: usize = cursor.map(|c| c.as_str().parse().unwrap()).unwrap_or(0);
        let end = (start + page_size.min(5)).min(self.collection.len());
        let next = (end < self.collection.len()).then(|| PageCursor::new(end.to_string()));

        Ok(Page::new(self.collection[start..end].to_vec(), next))
    }
}

/// Provider that always serves a full page, whatever size was asked for
struct OversizedPages;

#[async_trait]
impl MixProvider for OversizedPages {
    async fn search_top(&self, _query: &str) -> Result<Option<MixRoot>> {
        Ok(Some(MixRoot {
            title: "Seed".into(),
            id: "seed".into(),
        }))
    }

    async fn playlist_page(
        &self,
        _collection_id: &str,
        _page_size: usize,
        _cursor: Option<&PageCursor>,
    ) -> Result<Page> {
        let items = (0..MAX_PAGE_SIZE)
            .map(|i| Track::new(format!("Track {}", i), &format!("v{}", i), None))
            .collect();
        Ok(Page::new(items, Some(PageCursor::new("more"))))
    }
}

#[tokio::test]
async fn test_limit_never_exceeded() {
    for limit in [1, 3, 5, 7, 12, 20] {
        let resolver = MixResolver::new(FakeProvider::with_tracks(12));
        let mix = resolver.resolve("song", limit).await.unwrap();
        assert!(mix.tracks.len() <= limit);
        assert_eq!(mix.tracks.len(), limit.min(12), "limit {}", limit);
    }
}

#[tokio::test]
async fn test_oversized_last_page_is_truncated() {
    for limit in [1, 7, 49] {
        let resolver = MixResolver::new(OversizedPages);
        let mix = resolver.resolve("song", limit).await.unwrap();
        assert_eq!(mix.tracks.len(), limit, "limit {}", limit);
        assert_eq!(mix.tracks[limit - 1].title, format!("Track {}", limit - 1));
    }
}

#[tokio::test]
async fn test_unplayable_page_does_not_stop_pagination() {
    /// Second page holds only a deleted entry but still has a cursor
    struct HoleyPages {
        pages: AtomicUsize,
    }

    #[async_trait]
    impl MixProvider for HoleyPages {
        async fn search_top(&self, _query: &str) -> Result<Option<MixRoot>> {
            Ok(Some(MixRoot {
                title: "Seed".into(),
                id: "seed".into(),
            }))
        }

        async fn playlist_page(
            &self,
            _collection_id: &str,
            _page_size: usize,
            _cursor: Option<&PageCursor>,
        ) -> Result<Page> {
            let page = match self.pages.fetch_add(1, Ordering::SeqCst) {
                0 => Page {
                    items: vec![Track::new("A", "a", None), Track::new("B", "b", None)],
                    fetched: 3,
                    next: Some(PageCursor::new("p2")),
                },
                1 => Page {
                    items: Vec::new(),
                    fetched: 1,
                    next: Some(PageCursor::new("p3")),
                },
                _ => Page::new(vec![Track::new("C", "c", None)], None),
            };
            Ok(page)
        }
    }

    let resolver = MixResolver::new(HoleyPages {
        pages: AtomicUsize::new(0),
    });
    let mix = resolver.resolve("song", 3).await.unwrap();

    let titles: Vec<&str> = mix.tracks.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["A", "B", "C"]);
    assert_eq!(resolver.provider().pages.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_empty_provider_page_ends_pagination() {
    struct EmptyWithCursor;

    #[async_trait]
    impl MixProvider for EmptyWithCursor {
        async fn search_top(&self, _query: &str) -> Result<Option<MixRoot>> {
            Ok(Some(MixRoot {
                title: "Seed".into(),
                id: "seed".into(),
            }))
        }

        async fn playlist_page(
            &self,
            _collection_id: &str,
            _page_size: usize,
            _cursor: Option<&PageCursor>,
        ) -> Result<Page> {
            Ok(Page::new(Vec::new(), Some(PageCursor::new("again"))))
        }
    }

    let mix = MixResolver::new(EmptyWithCursor).resolve("song", 5).await.unwrap();
    assert!(mix.tracks.is_empty());
}

#[tokio::test]
async fn test_stops_when_cursor_exhausted() {
    let resolver = MixResolver::new(FakeProvider::with_tracks(8));
    let mix = resolver.resolve("song", 50).await.unwrap();

    assert_eq!(mix.tracks.len(), 8);
    assert_eq!(resolver.provider().pages.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_order_is_provider_order_and_stable() {
    let resolver = MixResolver::new(FakeProvider::with_tracks(11));
    let first = resolver.resolve("song", 9).await.unwrap();
    let second = resolver.resolve("song", 9).await.unwrap();

    assert_eq!(first, second);
    let titles: Vec<&str> = first.tracks.iter().map(|t| t.title.as_str()).collect();
    let expected: Vec<String> = (0..9).map(|i| format!("Track {}", i)).collect();
    assert_eq!(titles, expected);
}

#[tokio::test]
async fn test_collection_id_and_cursor_threading() {
    let resolver = MixResolver::new(FakeProvider::with_tracks(12));
    resolver.resolve("song", 12).await.unwrap();

    let requested = resolver.provider().requested.lock().unwrap().clone();
    assert_eq!(
        requested,
        vec![
            ("RDseed".to_string(), 12, None),
            ("RDseed".to_string(), 7, Some("5".to_string())),
            ("RDseed".to_string(), 2, Some("10".to_string())),
        ]
    );
}

#[tokio::test]
async fn test_page_size_capped_at_provider_max() {
    let resolver = MixResolver::new(FakeProvider::with_tracks(3));
    resolver.resolve("song", 500).await.unwrap();

    let requested = resolver.provider().requested.lock().unwrap().clone();
    assert_eq!(requested[0].1, MAX_PAGE_SIZE);
}

#[tokio::test]
async fn test_empty_search_is_not_found() {
    let resolver = MixResolver::new(FakeProvider::empty_search());
    let err = resolver.resolve("zzzqqqnonexistentsong123", 10).await.unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(resolver.provider().pages.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_failure_on_later_page_returns_no_partial_mix() {
    let provider = FakeProvider {
        fail_at_page: Some(1),
        ..FakeProvider::with_tracks(20)
    };
    let resolver = MixResolver::new(provider);

    match resolver.resolve("song", 20).await {
        Err(RadioMixError::Provider(msg)) => assert_eq!(msg, "quotaExceeded"),
        other => panic!("Expected Provider error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_invalid_arguments_make_no_calls() {
    let resolver = MixResolver::new(FakeProvider::with_tracks(5));

    assert!(resolver.resolve("song", 0).await.unwrap_err().is_invalid_argument());
    assert!(resolver.resolve("   ", 5).await.unwrap_err().is_invalid_argument());
    assert_eq!(resolver.provider().searches.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_custom_collection_convention() {
    struct OtherConvention(FakeProvider);

    #[async_trait]
    impl MixProvider for OtherConvention {
        async fn search_top(&self, query: &str) -> Result<Option<MixRoot>> {
            self.0.search_top(query).await
        }

        async fn playlist_page(
            &self,
            collection_id: &str,
            page_size: usize,
            cursor: Option<&PageCursor>,
        ) -> Result<Page> {
            self.0.playlist_page(collection_id, page_size, cursor).await
        }

        fn mix_collection_id(&self, root_video_id: &str) -> String {
            format!("RDAMVM{}", root_video_id)
        }
    }

    let resolver = MixResolver::new(OtherConvention(FakeProvider::with_tracks(2)));
    resolver.resolve("song", 2).await.unwrap();

    let requested = resolver.provider().0.requested.lock().unwrap().clone();
    assert_eq!(requested[0].0, "RDAMVMseed");
}
