use super::{ChainState, Finished, Injection, Qualified, Unlinked, Unqualified};
use crate::constant::ConstantValue;
use crate::declaration::ConstantBinding;
use crate::key::Qualifier;
use crate::module::ModuleBuilder;
use std::any::Any;
use std::marker::PhantomData;

/// Chain for a constant binding, started by [`ModuleBuilder::bind_constant`].
#[derive(Debug)]
pub struct ConstantBuilder<P, S = Unqualified> {
    module: ModuleBuilder<P>,
    declaration: ConstantBinding,
    _state: PhantomData<S>,
}

impl<P> ConstantBuilder<P> {
    pub(crate) const fn new(module: ModuleBuilder<P>, declaration: ConstantBinding) -> Self {
        Self { module, declaration, _state: PhantomData }
    }

    pub fn annotated_with(self, qualifier: impl Into<Qualifier>) -> ConstantBuilder<P, Qualified> {
        ConstantBuilder {
            module: self.module,
            declaration: self.declaration.annotated_with(qualifier),
            _state: PhantomData,
        }
    }
}

impl<P, S: Unlinked> ConstantBuilder<P, S> {
    pub fn to(self, value: impl Into<ConstantValue>) -> ConstantBuilder<P, Finished> {
        ConstantBuilder { module: self.module, declaration: self.declaration.to(value), _state: PhantomData }
    }

    /// Stores a value whose kind is checked at installation.
    pub fn to_dynamic(self, value: Box<dyn Any + Send + Sync>) -> ConstantBuilder<P, Finished> {
        ConstantBuilder {
            module: self.module,
            declaration: self.declaration.to_dynamic(value),
            _state: PhantomData,
        }
    }
}

impl<P, S: ChainState> Injection<ModuleBuilder<P>> for ConstantBuilder<P, S> {
    fn inject(self) -> ModuleBuilder<P> {
        self.module.add_binding(self.declaration)
    }
}
