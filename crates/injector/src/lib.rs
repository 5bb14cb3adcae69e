//! A small in-memory resolution engine for bindery modules.
//!
//! [`InjectorBuilder`] is the top-level [`ModuleContainer`](bindery_core::ModuleContainer):
//! modules built through its `module()` chains are installed, in order, into a root
//! environment. Private modules get a child environment and only their exposed keys
//! become visible to the parent.
//!
//! ```rust
//! use bindery_core::prelude::*;
//! use bindery_injector::Injector;
//!
//! trait Greeter: Send + Sync {
//!     fn greet(&self) -> String;
//! }
//!
//! #[derive(Injectable)]
//! struct English;
//!
//! impl Greeter for English {
//!     fn greet(&self) -> String {
//!         "hello".into()
//!     }
//! }
//!
//! implements!(English => dyn Greeter);
//!
//! let injector = Injector::builder()
//!     .module()
//!     .bind::<dyn Greeter>()
//!     .to::<English>()
//!     .in_scope(Scope::Singleton)
//!     .inject()
//!     .inject()
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(injector.get::<dyn Greeter>().unwrap().greet(), "hello");
//! ```

mod binder;
mod builder;
pub mod config;
mod environment;
mod error;
mod injector;

pub use builder::InjectorBuilder;
pub use config::{InjectorConfig, Stage};
pub use error::{InjectorError, InjectorErrorExt};
pub use injector::Injector;
