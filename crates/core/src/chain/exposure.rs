use super::{ChainState, Injection, Qualified, Unqualified};
use crate::declaration::TypeExposing;
use crate::key::Qualifier;
use crate::module::ModuleBuilder;
use std::any::type_name;
use std::fmt;
use std::marker::PhantomData;

/// Chain for exposing `T`, started by [`ModuleBuilder::expose`] or
/// [`ModuleBuilder::expose_key`].
pub struct ExposureBuilder<T: ?Sized, P, S = Unqualified> {
    module: ModuleBuilder<P>,
    declaration: TypeExposing,
    _state: PhantomData<(fn(&T), S)>,
}

impl<T: ?Sized, P> ExposureBuilder<T, P, Qualified> {
    pub(crate) const fn keyed(module: ModuleBuilder<P>, declaration: TypeExposing) -> Self {
        Self { module, declaration, _state: PhantomData }
    }
}

impl<T: ?Sized, P> ExposureBuilder<T, P> {
    pub(crate) const fn new(module: ModuleBuilder<P>, declaration: TypeExposing) -> Self {
        Self { module, declaration, _state: PhantomData }
    }

    pub fn annotated_with(self, qualifier: impl Into<Qualifier>) -> ExposureBuilder<T, P, Qualified> {
        ExposureBuilder {
            module: self.module,
            declaration: self.declaration.annotated_with(qualifier),
            _state: PhantomData,
        }
    }
}

impl<T: ?Sized, P, S: ChainState> Injection<ModuleBuilder<P>> for ExposureBuilder<T, P, S> {
    fn inject(self) -> ModuleBuilder<P> {
        self.module.add_exposure(self.declaration)
    }
}

impl<T: ?Sized, P, S> fmt::Debug for ExposureBuilder<T, P, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExposureBuilder")
            .field("type", &type_name::<T>())
            .field("declaration", &self.declaration)
            .finish_non_exhaustive()
    }
}
