use crate::key::{Key, Qualifier, TypeRef};

/// The qualifier layer shared by every declaration.
#[derive(Clone, Debug, Default)]
pub struct Annotated {
    qualifier: Option<Qualifier>,
}

impl Annotated {
    /// Sets the qualifier; the last call wins.
    pub fn annotate(&mut self, qualifier: Qualifier) {
        self.qualifier = Some(qualifier);
    }

    #[must_use]
    pub const fn qualifier(&self) -> Option<&Qualifier> {
        self.qualifier.as_ref()
    }

    pub(crate) fn into_qualifier(self) -> Option<Qualifier> {
        self.qualifier
    }
}

/// The qualifier layer plus the declared type.
#[derive(Clone, Debug)]
pub struct Declared {
    ty: TypeRef,
    annotated: Annotated,
}

impl Declared {
    #[must_use]
    pub fn new(ty: TypeRef) -> Self {
        Self { ty, annotated: Annotated::default() }
    }

    /// Takes both the type and the qualifier from `key`.
    #[must_use]
    pub fn from_key(key: Key) -> Self {
        let (ty, qualifier) = key.into_parts();
        Self { ty, annotated: Annotated { qualifier } }
    }

    pub fn annotate(&mut self, qualifier: Qualifier) {
        self.annotated.annotate(qualifier);
    }

    #[must_use]
    pub const fn type_ref(&self) -> TypeRef {
        self.ty
    }

    #[must_use]
    pub const fn qualifier(&self) -> Option<&Qualifier> {
        self.annotated.qualifier()
    }

    #[must_use]
    pub fn key(&self) -> Key {
        Key::new(self.ty, self.annotated.qualifier().cloned())
    }
}
