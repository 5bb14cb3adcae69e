//! Binding tables. The root environment has id `0`; each installed private module gets
//! a child environment whose parent is the environment it was installed into.

use bindery_core::{Implementation, Instance, Key, Scope};
use fxhash::FxHashMap;
use std::sync::OnceLock;

pub(crate) type EnvId = usize;

pub(crate) const ROOT: EnvId = 0;

/// Where a provider entry gets new values from.
#[derive(Debug)]
pub(crate) enum Source {
    Implementation(Implementation),
    /// Another key, resolved from the environment owning this entry.
    Linked(Key),
}

/// What a key resolves to inside one environment.
#[derive(Debug)]
pub(crate) enum Entry {
    Instance(Instance),
    Provider { source: Source, scope: Scope, cell: OnceLock<Instance> },
    /// The key is exposed by the child environment holding the real binding.
    Exposed(EnvId),
}

impl Entry {
    pub(crate) const fn provider(source: Source) -> Self {
        Self::Provider { source, scope: Scope::NoScope, cell: OnceLock::new() }
    }

    pub(crate) const fn kind(&self) -> &'static str {
        match self {
            Self::Instance(_) => "instance",
            Self::Provider { source: Source::Implementation(_), .. } => "implementation",
            Self::Provider { source: Source::Linked(_), .. } => "linked",
            Self::Exposed(_) => "exposed",
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct Environment {
    pub(crate) parent: Option<EnvId>,
    pub(crate) entries: FxHashMap<Key, Entry>,
}

impl Environment {
    pub(crate) fn child_of(parent: EnvId) -> Self {
        Self { parent: Some(parent), entries: FxHashMap::default() }
    }
}
