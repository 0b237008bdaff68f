use crate::api::MenuApi;
use crate::error::Result;
use crate::menu::{sort_forest, MenuNode};
use crate::types::{ListQuery, Pagination};

/// Latest full snapshot of the menu hierarchy. Each refresh replaces the
/// whole tree; nothing is patched in place.
#[derive(Debug, Clone, Default)]
pub struct MenuTreeStore {
    snapshot: Option<Vec<MenuNode>>,
    pagination: Pagination,
}

impl MenuTreeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loaded(&self) -> bool {
        self.snapshot.is_some()
    }

    pub fn snapshot(&self) -> &[MenuNode] {
        self.snapshot.as_deref().unwrap_or(&[])
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    /// Fetch the hierarchy. On failure the previous snapshot stays in place.
    pub async fn refresh<A: MenuApi + ?Sized>(&mut self, api: &A) -> Result<&[MenuNode]> {
        let limit = crate::config::config().menu.hierarchy_limit;
        self.refresh_with(api, &ListQuery::page(1, limit)).await
    }

    pub async fn refresh_with<A: MenuApi + ?Sized>(&mut self, api: &A, query: &ListQuery) -> Result<&[MenuNode]> {
        match api.hierarchy(query).await {
            Ok(page) => {
                let mut forest = page.data;
                sort_forest(&mut forest);
                tracing::debug!("Loaded {} top-level menus", forest.len());
                self.pagination = page.pagination;
                self.snapshot = Some(forest);
                Ok(self.snapshot())
            }
            Err(e) => {
                tracing::warn!("Menu refresh failed, keeping previous snapshot: {}", e);
                Err(e)
            }
        }
    }

    pub fn into_snapshot(self) -> Vec<MenuNode> {
        self.snapshot.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MenuPayload;
    use crate::error::Error;
    use crate::types::{DeleteResult, Page};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};

    struct FlakyMenus {
        fail: AtomicBool,
    }

    #[async_trait]
    impl MenuApi for FlakyMenus {
        async fn hierarchy(&self, _query: &ListQuery) -> Result<Page<MenuNode>> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(Error::server(503, "unavailable"));
            }
            Ok(Page {
                data: vec![
                    MenuNode::new("second").with_id("2").with_order(2).with_path("/2"),
                    MenuNode::new("first").with_id("1").with_order(1).with_path("/1"),
                ],
                pagination: Pagination { total: 2, page: 1, limit: 100, total_pages: 1 },
            })
        }

        async fn create_menu(&self, payload: &MenuPayload) -> Result<MenuNode> {
            Ok(payload.parent.clone())
        }

        async fn update_menu(&self, _id: &str, payload: &MenuPayload) -> Result<MenuNode> {
            Ok(payload.parent.clone())
        }

        async fn delete_menu(&self, _id: &str) -> Result<()> {
            Ok(())
        }

        async fn delete_menus(&self, ids: &[String]) -> Result<DeleteResult> {
            Ok(DeleteResult { deleted_count: ids.len() as u64 })
        }
    }

    #[tokio::test]
    async fn test_refresh_sorts_and_keeps_stale_on_failure() {
        let api = FlakyMenus { fail: AtomicBool::new(false) };
        let mut store = MenuTreeStore::new();

        store.refresh(&api).await.unwrap();
        let names: Vec<_> = store.snapshot().iter().map(|n| n.name.clone()).collect();
        assert_eq!(names, vec!["first", "second"]);
        assert_eq!(store.pagination().total, 2);

        api.fail.store(true, Ordering::SeqCst);
        assert!(store.refresh(&api).await.is_err());
        assert_eq!(store.snapshot().len(), 2);
    }

    #[tokio::test]
    async fn test_unloaded_store_is_empty() {
        let api = FlakyMenus { fail: AtomicBool::new(true) };
        let mut store = MenuTreeStore::new();
        assert!(store.refresh(&api).await.is_err());
        assert!(!store.is_loaded());
        assert!(store.snapshot().is_empty());
    }
}
