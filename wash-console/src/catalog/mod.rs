//! Catalog registry - service/material name+price resolution with caching
//!
//! Drafts carry only opaque catalog ids; prices are always looked up here,
//! never trusted from the draft. The cache is an explicit object scoped to
//! one authoring/review session, so nothing leaks across sessions.

use crate::client::ConsoleApi;
use futures::future::join_all;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// Price used for entries whose lookup failed
const STUB_PRICE: &str = "0.00";

// ============================================================================
// Types
// ============================================================================

/// Which catalog a line item belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LineItemKind {
    Service,
    Material,
}

impl LineItemKind {
    /// Placeholder name for entries whose lookup failed
    fn placeholder_name(self) -> &'static str {
        match self {
            Self::Service => "Service",
            Self::Material => "Material",
        }
    }
}

/// Identifies a priced catalog entry without embedding its price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineItemRef {
    pub kind: LineItemKind,
    pub id: i64,
}

impl LineItemRef {
    pub fn service(id: i64) -> Self {
        Self {
            kind: LineItemKind::Service,
            id,
        }
    }

    pub fn material(id: i64) -> Self {
        Self {
            kind: LineItemKind::Material,
            id,
        }
    }
}

/// Authoritative name and price for one catalog entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub name: String,
    /// Numeric string, two decimals for stubs
    pub price: String,
}

impl CatalogEntry {
    /// Stand-in entry for a failed lookup. A single bad catalog entry must
    /// never abort receipt generation for the whole order.
    pub fn stub(kind: LineItemKind) -> Self {
        Self {
            name: kind.placeholder_name().to_string(),
            price: STUB_PRICE.to_string(),
        }
    }
}

// ============================================================================
// Cache
// ============================================================================

/// Session-scoped catalog cache keyed by `(kind, id)`
///
/// Write-once per key: the first resolution wins, concurrent lookups within
/// one generation pass read-share the map.
#[derive(Clone, Default)]
pub struct CatalogCache {
    entries: Arc<RwLock<HashMap<LineItemRef, CatalogEntry>>>,
}

impl std::fmt::Debug for CatalogCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogCache")
            .field("entries", &self.entries.read().len())
            .finish()
    }
}

impl CatalogCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, item: LineItemRef) -> Option<CatalogEntry> {
        self.entries.read().get(&item).cloned()
    }

    pub fn contains(&self, item: LineItemRef) -> bool {
        self.entries.read().contains_key(&item)
    }

    /// Insert unless the key is already resolved (first resolution wins).
    pub fn insert_if_absent(&self, item: LineItemRef, entry: CatalogEntry) {
        self.entries.write().entry(item).or_insert(entry);
    }

    /// Drop one entry so the next pass re-fetches it.
    pub fn invalidate(&self, item: LineItemRef) -> bool {
        self.entries.write().remove(&item).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

// ============================================================================
// Registry
// ============================================================================

/// Lookup layer resolving catalog refs through the API with caching
#[derive(Clone)]
pub struct CatalogRegistry {
    api: Arc<dyn ConsoleApi>,
    cache: CatalogCache,
}

impl CatalogRegistry {
    pub fn new(api: Arc<dyn ConsoleApi>, cache: CatalogCache) -> Self {
        Self { api, cache }
    }

    pub fn cache(&self) -> &CatalogCache {
        &self.cache
    }

    /// Resolve every ref in one pass.
    ///
    /// Issues exactly one lookup per distinct uncached id and fans them all
    /// out concurrently, suspending once for the combined completion, so the
    /// pass costs the slowest single lookup rather than the sum. Failed
    /// lookups are stubbed and logged, never propagated.
    pub async fn resolve_all(&self, refs: &[LineItemRef]) {
        let mut missing: Vec<LineItemRef> = Vec::new();
        for item in refs {
            if !self.cache.contains(*item) && !missing.contains(item) {
                missing.push(*item);
            }
        }
        if missing.is_empty() {
            return;
        }

        let lookups = missing.iter().map(|item| self.fetch(*item));
        for (item, entry) in missing.iter().zip(join_all(lookups).await) {
            self.cache.insert_if_absent(*item, entry);
        }
    }

    /// Read one entry from the cache; an unresolved ref gets the stub.
    pub fn resolve(&self, item: LineItemRef) -> CatalogEntry {
        self.cache
            .get(item)
            .unwrap_or_else(|| CatalogEntry::stub(item.kind))
    }

    async fn fetch(&self, item: LineItemRef) -> CatalogEntry {
        let result = match item.kind {
            LineItemKind::Service => self.api.fetch_service(item.id).await.map(|detail| {
                CatalogEntry {
                    name: detail.name,
                    price: detail.price,
                }
            }),
            LineItemKind::Material => self.api.fetch_material(item.id).await.map(|detail| {
                CatalogEntry {
                    name: detail.name,
                    price: detail.sell_price,
                }
            }),
        };

        match result {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!(kind = ?item.kind, id = item.id, error = %err, "catalog lookup failed, substituting stub");
                CatalogEntry::stub(item.kind)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use shared::order::{
        CreateOrderRequest, CreateOrderResponse, EmployeeSummary, MaterialDetail, ServiceDetail,
    };
    use shared::{ConsoleError, ConsoleResult};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Catalog backend that counts lookups and fails on demand
    struct CountingApi {
        fail_services: Vec<i64>,
        lookups: AtomicUsize,
    }

    impl CountingApi {
        fn new(fail_services: Vec<i64>) -> Self {
            Self {
                fail_services,
                lookups: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ConsoleApi for CountingApi {
        async fn fetch_service(&self, id: i64) -> ConsoleResult<ServiceDetail> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            if self.fail_services.contains(&id) {
                return Err(ConsoleError::Api {
                    status: 404,
                    message: "not found".to_string(),
                });
            }
            Ok(ServiceDetail {
                name: format!("Service {}", id),
                price: "100.00".to_string(),
            })
        }

        async fn fetch_material(&self, id: i64) -> ConsoleResult<MaterialDetail> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            Ok(MaterialDetail {
                name: format!("Material {}", id),
                sell_price: "50.00".to_string(),
            })
        }

        async fn create_order(
            &self,
            _request: &CreateOrderRequest,
        ) -> ConsoleResult<CreateOrderResponse> {
            unimplemented!("not used in catalog tests")
        }

        async fn list_employees(&self) -> ConsoleResult<Vec<EmployeeSummary>> {
            unimplemented!("not used in catalog tests")
        }
    }

    fn make_registry(api: CountingApi) -> (CatalogRegistry, Arc<CountingApi>) {
        let api = Arc::new(api);
        let registry = CatalogRegistry::new(api.clone(), CatalogCache::new());
        (registry, api)
    }

    #[tokio::test]
    async fn test_resolve_all_deduplicates_lookups() {
        let (registry, api) = make_registry(CountingApi::new(vec![]));
        let refs = vec![
            LineItemRef::service(1),
            LineItemRef::service(1),
            LineItemRef::material(1),
            LineItemRef::service(2),
        ];

        registry.resolve_all(&refs).await;

        // 3 distinct refs, 3 lookups
        assert_eq!(api.lookups.load(Ordering::SeqCst), 3);
        assert_eq!(registry.resolve(LineItemRef::service(1)).name, "Service 1");
        assert_eq!(registry.resolve(LineItemRef::material(1)).name, "Material 1");
    }

    #[tokio::test]
    async fn test_second_pass_hits_the_cache() {
        let (registry, api) = make_registry(CountingApi::new(vec![]));
        let refs = vec![LineItemRef::service(1)];

        registry.resolve_all(&refs).await;
        registry.resolve_all(&refs).await;

        assert_eq!(api.lookups.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_lookup_becomes_stub() {
        let (registry, _api) = make_registry(CountingApi::new(vec![9]));

        registry.resolve_all(&[LineItemRef::service(9)]).await;

        let entry = registry.resolve(LineItemRef::service(9));
        assert_eq!(entry.name, "Service");
        assert_eq!(entry.price, "0.00");
    }

    #[tokio::test]
    async fn test_invalidate_forces_refetch() {
        let (registry, api) = make_registry(CountingApi::new(vec![]));
        let item = LineItemRef::service(1);

        registry.resolve_all(&[item]).await;
        assert!(registry.cache().invalidate(item));
        registry.resolve_all(&[item]).await;

        assert_eq!(api.lookups.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_unresolved_ref_reads_as_stub() {
        let cache = CatalogCache::new();
        let registry = CatalogRegistry::new(Arc::new(CountingApi::new(vec![])), cache);

        let entry = registry.resolve(LineItemRef::material(77));
        assert_eq!(entry.name, "Material");
        assert_eq!(entry.price, "0.00");
    }

    #[test]
    fn test_cache_first_resolution_wins() {
        let cache = CatalogCache::new();
        let item = LineItemRef::service(1);
        cache.insert_if_absent(
            item,
            CatalogEntry {
                name: "First".to_string(),
                price: "1.00".to_string(),
            },
        );
        cache.insert_if_absent(
            item,
            CatalogEntry {
                name: "Second".to_string(),
                price: "2.00".to_string(),
            },
        );

        assert_eq!(cache.get(item).unwrap().name, "First");
        assert_eq!(cache.len(), 1);
    }
}
