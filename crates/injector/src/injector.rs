use crate::builder::InjectorBuilder;
use crate::config::InjectorConfig;
use crate::environment::{EnvId, Entry, Environment, ROOT, Source};
use bindery_core::{Instance, Key, ResolveError, Resolver, Scope};
use std::cell::RefCell;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// The assembled dependency graph.
///
/// Cheap to clone and safe to share across threads. Resolution starts in the root
/// environment; values bound inside private modules are reachable only through
/// exposed keys.
#[derive(Clone)]
pub struct Injector {
    inner: Arc<InjectorInner>,
}

pub(crate) struct InjectorInner {
    envs: Vec<Environment>,
    config: InjectorConfig,
}

/// Keys currently being constructed, with the environment they were found in.
type Path = RefCell<Vec<(EnvId, Key)>>;

impl Injector {
    /// Starts an empty [`InjectorBuilder`].
    #[must_use]
    pub fn builder() -> InjectorBuilder {
        InjectorBuilder::new()
    }

    pub(crate) fn new(envs: Vec<Environment>, config: InjectorConfig) -> Self {
        Self { inner: Arc::new(InjectorInner { envs, config }) }
    }

    #[must_use]
    pub fn config(&self) -> &InjectorConfig {
        &self.inner.config
    }

    /// `true` when `key` is visible from the root environment.
    #[must_use]
    pub fn contains(&self, key: &Key) -> bool {
        self.inner.lookup(ROOT, key).is_ok()
    }

    /// Builds every singleton that must exist before the injector is handed out.
    pub(crate) fn create_eager_singletons(&self) -> Result<usize, ResolveError> {
        let production = self.inner.config.stage == crate::Stage::Production;
        let mut created = 0;

        for (env, environment) in self.inner.envs.iter().enumerate() {
            for (key, entry) in &environment.entries {
                let Entry::Provider { scope, .. } = entry else {
                    continue;
                };
                let eager = *scope == Scope::EagerSingleton || (production && *scope == Scope::Singleton);
                if eager {
                    self.inner.resolve_in(env, key, &Path::default())?;
                    created += 1;
                }
            }
        }
        Ok(created)
    }
}

impl Resolver for Injector {
    fn resolve(&self, key: &Key) -> Result<Instance, ResolveError> {
        self.inner.resolve_in(ROOT, key, &Path::default())
    }
}

impl fmt::Debug for Injector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Injector")
            .field("environments", &self.inner.envs.len())
            .field("config", &self.inner.config)
            .finish()
    }
}

/// A resolver bound to one environment and one in-flight dependency path; handed to
/// factories so their dependencies resolve where the binding lives.
struct Resolution<'a> {
    inner: &'a InjectorInner,
    env: EnvId,
    path: &'a Path,
}

impl Resolver for Resolution<'_> {
    fn resolve(&self, key: &Key) -> Result<Instance, ResolveError> {
        self.inner.resolve_in(self.env, key, self.path)
    }
}

impl InjectorInner {
    /// Finds the entry for `key`, walking up to parents and down through exposures.
    fn lookup(&self, mut env: EnvId, key: &Key) -> Result<(EnvId, &Entry), ResolveError> {
        loop {
            let environment = &self.envs[env];
            match environment.entries.get(key) {
                Some(Entry::Exposed(child)) => return self.exposed(*child, key),
                Some(entry) => return Ok((env, entry)),
                None => match environment.parent {
                    Some(parent) => env = parent,
                    None => return Err(ResolveError::missing(key.clone())),
                },
            }
        }
    }

    fn exposed(&self, mut env: EnvId, key: &Key) -> Result<(EnvId, &Entry), ResolveError> {
        loop {
            match self.envs[env].entries.get(key) {
                Some(Entry::Exposed(child)) => env = *child,
                Some(entry) => return Ok((env, entry)),
                None => {
                    return Err(ResolveError::Internal {
                        message: format!("{key} is exposed by environment {env} without a binding").into(),
                        context: None,
                    });
                },
            }
        }
    }

    fn resolve_in(&self, env: EnvId, key: &Key, path: &Path) -> Result<Instance, ResolveError> {
        let (owner, entry) = self.lookup(env, key)?;
        let (source, scope, cell) = match entry {
            Entry::Instance(instance) => return Ok(instance.clone()),
            Entry::Provider { source, scope, cell } => (source, *scope, cell),
            Entry::Exposed(_) => {
                return Err(ResolveError::Internal {
                    message: format!("{key} resolved to an unfollowed exposure").into(),
                    context: None,
                });
            },
        };

        if let Some(instance) = cell.get() {
            return Ok(instance.clone());
        }

        let frame = (owner, key.clone());
        if path.borrow().contains(&frame) {
            let keys: Vec<Key> = path.borrow().iter().map(|(_, k)| k.clone()).collect();
            return Err(ResolveError::circular(&keys, key));
        }

        path.borrow_mut().push(frame);
        let result = match source {
            Source::Implementation(implementation) => {
                trace!(env = owner, %key, implementation = %implementation.type_ref(), "Constructing instance");
                implementation.provide(&Resolution { inner: self, env: owner, path })
            },
            Source::Linked(target) => {
                trace!(env = owner, %key, %target, "Following linked key");
                self.resolve_in(owner, target, path)
            },
        };
        path.borrow_mut().pop();
        let instance = result?;

        if scope.is_singleton() {
            Ok(cell.get_or_init(|| instance).clone())
        } else {
            Ok(instance)
        }
    }
}
