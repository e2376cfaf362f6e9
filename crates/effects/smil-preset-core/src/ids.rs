//! Identifiers and allocators for synthesized primitives.
//!
//! Every primitive that other primitives may reference carries an id derived
//! from one run-wide sequence (`a_0`, `a_1`, ...). Derived ids (masks, quick
//! bundles, sweep steps) are suffixes on the primary id.

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

const PREFIX: &str = "a_";

#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrimitiveId(String);

impl PrimitiveId {
    /// Primary id for sequence number `n`.
    pub fn primary(n: u32) -> Self {
        Self(format!("{PREFIX}{n}"))
    }

    /// Wrap an id produced elsewhere (e.g. by the timeline driver).
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn with_suffix(&self, suffix: &str) -> Self {
        Self(format!("{}{}", self.0, suffix))
    }

    /// Id of the sibling mask element.
    pub fn mask(&self) -> Self {
        self.with_suffix("_mask")
    }

    pub fn reverse(&self) -> Self {
        self.with_suffix("_rev")
    }

    pub fn forward(&self) -> Self {
        self.with_suffix("_fwd")
    }

    /// Lettered step id: `_r1`, `_l3`, `_s2`.
    pub fn lettered_step(&self, letter: char, step: usize) -> Self {
        Self(format!("{}_{}{}", self.0, letter, step))
    }

    /// Two-digit numbered step id: `_01`, `_12`.
    pub fn numbered_step(&self, step: usize) -> Self {
        Self(format!("{}_{:02}", self.0, step))
    }
}

impl fmt::Display for PrimitiveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Source of fresh primary ids. One source must back a whole conversion run.
pub trait IdSource {
    fn next_id(&mut self) -> PrimitiveId;
}

/// Monotonic allocator for single-threaded runs.
#[derive(Default, Debug)]
pub struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume a sequence, e.g. after ids were emitted by an earlier pass.
    pub fn starting_at(next: u32) -> Self {
        Self { next }
    }

    #[inline]
    pub fn alloc(&mut self) -> PrimitiveId {
        let id = PrimitiveId::primary(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }

    /// Number of ids handed out so far.
    #[inline]
    pub fn issued(&self) -> u32 {
        self.next
    }
}

impl IdSource for IdAllocator {
    #[inline]
    fn next_id(&mut self) -> PrimitiveId {
        self.alloc()
    }
}

/// Atomically incremented allocator for callers that convert slides or
/// objects in parallel. Clones share the same sequence.
#[derive(Clone, Default, Debug)]
pub struct SharedIdAllocator {
    next: Arc<AtomicU32>,
}

impl SharedIdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc(&self) -> PrimitiveId {
        PrimitiveId::primary(self.next.fetch_add(1, Ordering::Relaxed))
    }

    pub fn issued(&self) -> u32 {
        self.next.load(Ordering::Relaxed)
    }
}

impl IdSource for SharedIdAllocator {
    #[inline]
    fn next_id(&mut self) -> PrimitiveId {
        self.alloc()
    }
}
