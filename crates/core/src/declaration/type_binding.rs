use super::Declared;
use crate::binder::{Binder, BindingTarget};
use crate::error::DeclarationError;
use crate::key::{Key, Qualifier, TypeRef};
use crate::value::{Implementation, Instance, Scope};
use tracing::trace;

/// Where a scoped binding gets its values from.
#[derive(Debug)]
enum Link {
    Implementation(Implementation),
    Key(Key),
}

impl Link {
    fn provides(&self) -> TypeRef {
        match self {
            Self::Implementation(implementation) => implementation.provides(),
            Self::Key(key) => key.type_ref(),
        }
    }
}

/// Binds a declared type to an implementation, another key, an instance, or an
/// implementation or key with a scope.
///
/// The setters overwrite silently; contradictions surface when the binding is applied.
#[derive(Debug)]
pub struct TypeBinding {
    declared: Declared,
    link: Option<Link>,
    instance: Option<Instance>,
    scope: Option<Scope>,
}

impl TypeBinding {
    #[must_use]
    pub fn new(ty: TypeRef) -> Self {
        Self { declared: Declared::new(ty), link: None, instance: None, scope: None }
    }

    #[must_use]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self::new(TypeRef::of::<T>())
    }

    /// A binding of `key`, qualifier included.
    #[must_use]
    pub fn for_key(key: Key) -> Self {
        Self { declared: Declared::from_key(key), link: None, instance: None, scope: None }
    }

    #[must_use]
    pub fn annotated_with(mut self, qualifier: impl Into<Qualifier>) -> Self {
        self.declared.annotate(qualifier.into());
        self
    }

    #[must_use]
    pub fn to(mut self, implementation: Implementation) -> Self {
        self.link = Some(Link::Implementation(implementation));
        self
    }

    /// Links the declared key to `target`, which must have the same type.
    #[must_use]
    pub fn to_key(mut self, target: Key) -> Self {
        self.link = Some(Link::Key(target));
        self
    }

    #[must_use]
    pub fn to_instance(mut self, instance: Instance) -> Self {
        self.instance = Some(instance);
        self
    }

    #[must_use]
    pub fn in_scope(mut self, scope: Scope) -> Self {
        self.scope = Some(scope);
        self
    }

    #[must_use]
    pub fn key(&self) -> Key {
        self.declared.key()
    }

    /// Applies the binding to `binder`.
    ///
    /// # Errors
    /// Returns [`DeclarationError::InvalidState`] when an instance is combined with an
    /// implementation, a linked key or a scope, when nothing was set, when the target
    /// produces another type than the declared one, or when a key is linked to itself.
    /// Binder failures propagate as is.
    pub fn apply<B: Binder + ?Sized>(self, binder: &mut B) -> Result<(), B::Error> {
        let key = self.declared.key();
        trace!(%key, "Applying type binding");

        match (self.instance, self.link, self.scope) {
            (Some(instance), None, None) => {
                check_type(&key, instance.type_ref())?;
                binder.bind_type(key, BindingTarget::Instance(instance))
            },
            (Some(_), _, _) => Err(DeclarationError::invalid_state(format!(
                "{key} is bound to an instance together with an implementation or scope"
            ))
            .into()),
            (None, Some(link), scope) => {
                check_type(&key, link.provides())?;
                let target = match link {
                    Link::Implementation(implementation) => BindingTarget::Implementation(implementation),
                    Link::Key(target) if target == key => {
                        return Err(DeclarationError::invalid_state(format!("{key} is linked to itself")).into());
                    },
                    Link::Key(target) => BindingTarget::Linked(target),
                };
                binder.bind_type(key.clone(), target)?;
                if let Some(scope) = scope {
                    binder.scope(&key, scope)?;
                }
                Ok(())
            },
            (None, None, _) => Err(DeclarationError::invalid_state(format!(
                "{key} has neither an implementation, a linked key nor an instance"
            ))
            .into()),
        }
    }
}

fn check_type(key: &Key, provided: TypeRef) -> Result<(), DeclarationError> {
    if provided == key.type_ref() {
        Ok(())
    } else {
        Err(DeclarationError::invalid_state(format!("{key} is bound to a target producing `{provided}`")))
    }
}
