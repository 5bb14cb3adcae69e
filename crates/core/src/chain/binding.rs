use super::{BindingDeclaration, ChainState, Finished, Injection, Linked, Qualified, Unlinked, Unqualified};
use crate::declaration::TypeBinding;
use crate::inject::{Implements, Injectable};
use crate::key::{Key, Qualifier};
use crate::module::ModuleBuilder;
use crate::resolver::{ResolveError, Resolver};
use crate::value::{Implementation, Instance, Scope};
use std::any::type_name;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// Chain for binding `T`, started by [`ModuleBuilder::bind`],
/// [`ModuleBuilder::expose_and_bind`] or their `_key` variants.
pub struct BindingBuilder<T: ?Sized, P, S = Unqualified, D = TypeBinding> {
    module: ModuleBuilder<P>,
    declaration: D,
    _state: PhantomData<(fn(&T), S)>,
}

impl<T: ?Sized, P, D> BindingBuilder<T, P, Unqualified, D> {
    pub(crate) const fn new(module: ModuleBuilder<P>, declaration: D) -> Self {
        Self { module, declaration, _state: PhantomData }
    }
}

impl<T: ?Sized, P, D> BindingBuilder<T, P, Qualified, D> {
    pub(crate) const fn keyed(module: ModuleBuilder<P>, declaration: D) -> Self {
        Self { module, declaration, _state: PhantomData }
    }
}

impl<T: ?Sized, P, S, D: BindingDeclaration> BindingBuilder<T, P, S, D> {
    fn transition<N>(self, step: impl FnOnce(D) -> D) -> BindingBuilder<T, P, N, D> {
        BindingBuilder { module: self.module, declaration: step(self.declaration), _state: PhantomData }
    }
}

impl<T: ?Sized, P, D: BindingDeclaration> BindingBuilder<T, P, Unqualified, D> {
    /// Qualifies the bound key.
    pub fn annotated_with(self, qualifier: impl Into<Qualifier>) -> BindingBuilder<T, P, Qualified, D> {
        let qualifier = qualifier.into();
        self.transition(|d| d.annotate(qualifier))
    }
}

impl<T, P, S, D> BindingBuilder<T, P, S, D>
where
    T: ?Sized + Send + Sync + 'static,
    S: Unlinked,
    D: BindingDeclaration,
{
    /// Links `T` to the implementation type `I`, built through constructor injection.
    pub fn to<I: Injectable + Implements<T>>(self) -> BindingBuilder<T, P, Linked, D> {
        self.transition(|d| d.link(Implementation::of::<T, I>()))
    }

    /// Links `T` to a provider closure.
    pub fn to_provider<F>(self, provider: F) -> BindingBuilder<T, P, Linked, D>
    where
        F: Fn(&dyn Resolver) -> Result<Arc<T>, ResolveError> + Send + Sync + 'static,
    {
        self.transition(|d| d.link(Implementation::from_provider(provider)))
    }

    /// Links the bound key to `target`, another key of `T`; resolving the bound key
    /// resolves `target` in the same environment.
    pub fn to_key(self, target: Key) -> BindingBuilder<T, P, Linked, D> {
        self.transition(|d| d.link_key(target))
    }

    /// Binds `T` to a prebuilt instance.
    pub fn to_instance(self, instance: Arc<T>) -> BindingBuilder<T, P, Finished, D> {
        self.transition(|d| d.link_instance(Instance::new(instance)))
    }
}

impl<T: ?Sized, P, D: BindingDeclaration> BindingBuilder<T, P, Linked, D> {
    pub fn in_scope(self, scope: Scope) -> BindingBuilder<T, P, Finished, D> {
        self.transition(|d| d.scope(scope))
    }

    pub fn as_eager_singleton(self) -> BindingBuilder<T, P, Finished, D> {
        self.in_scope(Scope::EagerSingleton)
    }
}

impl<T: ?Sized, P, S: ChainState, D: BindingDeclaration> Injection<ModuleBuilder<P>>
    for BindingBuilder<T, P, S, D>
{
    fn inject(self) -> ModuleBuilder<P> {
        self.declaration.enqueue(self.module)
    }
}

impl<T: ?Sized, P, S, D: fmt::Debug> fmt::Debug for BindingBuilder<T, P, S, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindingBuilder")
            .field("type", &type_name::<T>())
            .field("state", &type_name::<S>())
            .field("declaration", &self.declaration)
            .finish_non_exhaustive()
    }
}
