//! Isolation scopes used as factory cache keys

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_UNIQUE: AtomicU64 = AtomicU64::new(1);

/// Opaque identity of an isolation boundary (a plugin, a module, a test)
///
/// The registry compares scopes only for equality; it never looks inside.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Scope {
    /// No isolation: the single process-wide factory
    #[default]
    Global,
    /// Host-chosen name
    Named(Arc<str>),
    /// Identity minted by [`Scope::unique`]
    Unique(u64),
}

impl Scope {
    pub fn global() -> Self {
        Scope::Global
    }

    pub fn named(name: impl Into<Arc<str>>) -> Self {
        Scope::Named(name.into())
    }

    /// A scope distinct from every other scope in this process
    pub fn unique() -> Self {
        Scope::Unique(NEXT_UNIQUE.fetch_add(1, Ordering::Relaxed))
    }

    pub fn is_global(&self) -> bool {
        matches!(self, Scope::Global)
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Global => f.write_str("<global>"),
            Scope::Named(name) => write!(f, "{}", name),
            Scope::Unique(id) => write!(f, "<scope #{}>", id),
        }
    }
}
