//! Resource registry.
//!
//! Routes are grouped into resources by a lower-cased key. The resulting [`ResourceRegistry`]
//! answers both documentation queries: which resources exist, and which routes belong to one.
//!
//! # Publishing
//!
//! [`SharedRegistry`] owns the mounted routes and the currently published registry snapshot.
//! Mounting a sub-API builds a complete replacement registry under a writer lock and publishes
//! it with a single atomic swap. Readers load the current snapshot without locking and keep
//! it alive for as long as they hold the `Arc`, so a reader sees either the registry before
//! a mount or the one after it, never a mix.

use crate::route::RouteDescriptor;
use arc_swap::ArcSwap;
use indexmap::IndexMap;
use log::debug;
use parking_lot::Mutex;
use regex::Regex;
use std::sync::{Arc, LazyLock};

static FIRST_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/(\w*?)[./(]").expect("valid segment pattern"));

/// How a route's resource key is derived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeyStrategy {
    /// The route's namespace with every `/` removed
    #[default]
    Namespace,
    /// The first `/<word>` path segment followed by `.`, `/` or `(`
    FirstPathSegment,
}

impl KeyStrategy {
    /// Derives the resource key of `route`, or `None` when the route belongs to no resource.
    pub fn resource_key(&self, route: &RouteDescriptor) -> Option<String> {
        let raw = match self {
            KeyStrategy::Namespace => route.namespace.replace('/', ""),
            KeyStrategy::FirstPathSegment => FIRST_SEGMENT
                .captures(&route.path)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().to_string())
                .unwrap_or_default(),
        };

        if raw.is_empty() {
            None
        } else {
            Some(raw.to_lowercase())
        }
    }
}

/// Routes grouped by resource key.
///
/// Resources are kept in first-seen order and routes in registration order.
#[derive(Debug, Clone, Default)]
pub struct ResourceRegistry {
    resources: IndexMap<String, Vec<Arc<RouteDescriptor>>>,
}

impl ResourceRegistry {
    /// Groups `routes` by resource key. Routes without a key are left out.
    pub fn build<I>(routes: I, strategy: KeyStrategy) -> Self
    where
        I: IntoIterator<Item = Arc<RouteDescriptor>>,
    {
        let mut resources: IndexMap<String, Vec<Arc<RouteDescriptor>>> = IndexMap::new();
        for route in routes {
            if let Some(key) = strategy.resource_key(&route) {
                resources.entry(key).or_default().push(route);
            }
        }
        Self { resources }
    }

    /// Resource keys in registry order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.resources.keys().map(String::as_str)
    }

    /// Routes of the resource named exactly `key`; empty for unknown keys.
    pub fn routes(&self, key: &str) -> &[Arc<RouteDescriptor>] {
        self.resources.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of resources.
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Total number of routes across all resources.
    pub fn route_count(&self) -> usize {
        self.resources.values().map(Vec::len).sum()
    }
}

/// Process-wide registry with atomic rebuild-and-publish.
pub struct SharedRegistry {
    strategy: KeyStrategy,
    current: ArcSwap<ResourceRegistry>,
    mounted: Mutex<Vec<Arc<RouteDescriptor>>>,
}

impl SharedRegistry {
    /// An empty registry using `strategy` for every rebuild.
    pub fn new(strategy: KeyStrategy) -> Self {
        Self {
            strategy,
            current: ArcSwap::from_pointee(ResourceRegistry::default()),
            mounted: Mutex::new(Vec::new()),
        }
    }

    pub fn strategy(&self) -> KeyStrategy {
        self.strategy
    }

    /// Adds the routes of a newly mounted sub-API and publishes the rebuilt registry.
    pub fn mount<I>(&self, routes: I)
    where
        I: IntoIterator<Item = RouteDescriptor>,
    {
        let mut mounted = self.mounted.lock();
        mounted.extend(routes.into_iter().map(Arc::new));
        self.publish(&mounted);
    }

    /// Discards every mounted route and publishes a registry built from `routes` alone.
    pub fn replace<I>(&self, routes: I)
    where
        I: IntoIterator<Item = RouteDescriptor>,
    {
        let mut mounted = self.mounted.lock();
        *mounted = routes.into_iter().map(Arc::new).collect();
        self.publish(&mounted);
    }

    /// The currently published registry.
    pub fn snapshot(&self) -> Arc<ResourceRegistry> {
        self.current.load_full()
    }

    // Caller holds the writer lock.
    fn publish(&self, routes: &[Arc<RouteDescriptor>]) {
        let registry = ResourceRegistry::build(routes.iter().cloned(), self.strategy);
        debug!(
            "Publishing registry: {} resources, {} of {} routes",
            registry.len(),
            registry.route_count(),
            routes.len()
        );
        self.current.store(Arc::new(registry));
    }
}

impl Default for SharedRegistry {
    fn default() -> Self {
        Self::new(KeyStrategy::default())
    }
}
