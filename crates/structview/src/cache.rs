// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Layout cache keyed by record name.
//!
//! # Concurrency
//!
//! - **Lock-free reads**: `ArcSwap` snapshot of an immutable map
//! - **Serialised writes**: one `Mutex` guards check-then-insert, so every
//!   key is constructed at most once and a batch is published atomically
//!
//! Layouts are immutable once published, so readers never need a lock.

use crate::error::SchemaError;
use crate::layout::Layout;
use arc_swap::ArcSwap;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

type LayoutMap = HashMap<String, Arc<Layout>>;

/// Record-name to [`Layout`] cache shared between compiler and projector.
pub struct LayoutCache {
    layouts: ArcSwap<LayoutMap>,
    write_lock: Mutex<()>,
}

impl LayoutCache {
    /// Empty cache.
    pub fn new() -> Self {
        Self {
            layouts: ArcSwap::from_pointee(HashMap::new()),
            write_lock: Mutex::new(()),
        }
    }

    /// Layout cached under `name`.
    pub fn get(&self, name: &str) -> Option<Arc<Layout>> {
        self.layouts.load().get(name).cloned()
    }

    /// Returns `true` if `name` is cached.
    pub fn contains(&self, name: &str) -> bool {
        self.layouts.load().contains_key(name)
    }

    /// Number of cached layouts.
    pub fn len(&self) -> usize {
        self.layouts.load().len()
    }

    /// Returns `true` if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.layouts.load().is_empty()
    }

    /// Cached record names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.layouts.load().keys().cloned().collect();
        names.sort();
        names
    }

    /// Consistent view of every cached layout.
    pub fn snapshot(&self) -> Arc<LayoutMap> {
        self.layouts.load_full()
    }

    /// Publish a batch of layouts, all or nothing.
    ///
    /// A layout equal to the one already cached under its name is skipped.
    /// A different one fails with [`SchemaError::Conflict`] and nothing from
    /// the batch is published. Returns the number of newly cached layouts.
    pub fn publish<I>(&self, layouts: I) -> Result<usize, SchemaError>
    where
        I: IntoIterator<Item = Arc<Layout>>,
    {
        let _guard = self.write_lock.lock();
        let current = self.layouts.load_full();
        let mut added: LayoutMap = HashMap::new();

        for layout in layouts {
            let name = layout.record_name().to_string();
            let existing = current.get(&name).or_else(|| added.get(&name)).cloned();
            match existing {
                Some(existing) if *existing == *layout => continue,
                Some(_) => {
                    log::warn!("[cache] rejecting conflicting layout for '{}'", name);
                    return Err(SchemaError::Conflict(name));
                }
                None => {
                    added.insert(name, layout);
                }
            }
        }

        let count = added.len();
        if count > 0 {
            let mut next = (*current).clone();
            next.extend(added);
            self.layouts.store(Arc::new(next));
            log::debug!("[cache] published {} layout(s), {} cached", count, self.len());
        }
        Ok(count)
    }

    /// Return the layout for `name`, building it with `build` on first use.
    ///
    /// `build` runs at most once per key even with concurrent callers; if it
    /// fails nothing is cached and the error is returned.
    pub fn get_or_try_insert_with<F>(
        &self,
        name: &str,
        build: F,
    ) -> Result<Arc<Layout>, SchemaError>
    where
        F: FnOnce() -> Result<Layout, SchemaError>,
    {
        if let Some(layout) = self.get(name) {
            return Ok(layout);
        }

        let _guard = self.write_lock.lock();
        let current = self.layouts.load_full();
        if let Some(layout) = current.get(name) {
            return Ok(Arc::clone(layout));
        }

        let layout = Arc::new(build()?);
        let mut next = (*current).clone();
        next.insert(name.to_string(), Arc::clone(&layout));
        self.layouts.store(Arc::new(next));
        log::debug!("[cache] built layout '{}' on first use", name);
        Ok(layout)
    }
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LayoutCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutCache")
            .field("records", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutBuilder;
    use crate::types::TypeTag;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn point() -> Arc<Layout> {
        Arc::new(
            LayoutBuilder::new("Point")
                .field("x", TypeTag::I32)
                .field("y", TypeTag::F32)
                .build()
                .expect("layout"),
        )
    }

    #[test]
    fn publish_and_get() {
        let cache = LayoutCache::new();
        assert!(cache.is_empty());
        assert_eq!(cache.publish([point()]).expect("publish"), 1);
        assert_eq!(cache.get("Point").map(|l| l.size()), Some(8));
        assert!(cache.contains("Point"));
        assert!(cache.get("Line").is_none());
    }

    #[test]
    fn republish_identical_is_noop() {
        let cache = LayoutCache::new();
        cache.publish([point()]).expect("first");
        assert_eq!(cache.publish([point()]).expect("second"), 0);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn conflicting_batch_publishes_nothing() {
        let cache = LayoutCache::new();
        cache.publish([point()]).expect("first");

        let line = LayoutBuilder::new("Line")
            .field("len", TypeTag::F64)
            .build()
            .expect("line");
        let other_point = LayoutBuilder::new("Point")
            .field("x", TypeTag::F64)
            .build()
            .expect("other point");
        let (line, other_point) = (Arc::new(line), Arc::new(other_point));

        let err = cache.publish([line, other_point]).unwrap_err();
        assert_eq!(err, SchemaError::Conflict("Point".into()));
        assert!(!cache.contains("Line"));
        assert_eq!(cache.get("Point"), Some(point()));
    }

    #[test]
    fn get_or_insert_builds_once() {
        let cache = LayoutCache::new();
        let calls = AtomicUsize::new(0);
        for _ in 0..3 {
            let layout = cache
                .get_or_try_insert_with("Point", || {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok((*point()).clone())
                })
                .expect("layout");
            assert_eq!(layout.size(), 8);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn failed_build_leaves_cache_empty() {
        let cache = LayoutCache::new();
        let err = cache
            .get_or_try_insert_with("Empty", || Err(SchemaError::EmptyRecord("Empty".into())))
            .unwrap_err();
        assert_eq!(err, SchemaError::EmptyRecord("Empty".into()));
        assert!(cache.is_empty());
    }

    #[test]
    fn concurrent_first_use_builds_once() {
        let cache = Arc::new(LayoutCache::new());
        let calls = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let calls = Arc::clone(&calls);
                std::thread::spawn(move || {
                    cache
                        .get_or_try_insert_with("Point", || {
                            calls.fetch_add(1, Ordering::SeqCst);
                            Ok((*point()).clone())
                        })
                        .expect("layout")
                })
            })
            .collect();

        for handle in handles {
            let layout = handle.join().expect("thread");
            assert_eq!(layout.record_name(), "Point");
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn independent_caches_do_not_share() {
        let a = LayoutCache::new();
        let b = LayoutCache::new();
        a.publish([point()]).expect("publish");
        assert!(b.get("Point").is_none());
        assert_eq!(a.names(), vec!["Point".to_string()]);
    }
}
