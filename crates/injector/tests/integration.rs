pub mod fixtures;

use bindery_core::declaration::TypeBinding;
use bindery_core::prelude::*;
use bindery_injector::{Injector, InjectorError, Stage};
use fixtures::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

fn counting_provider(
    counter: &Arc<AtomicUsize>,
) -> impl Fn(&dyn Resolver) -> Result<Arc<AuditLog>, ResolveError> + Send + Sync + 'static {
    let counter = Arc::clone(counter);
    move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(AuditLog))
    }
}

#[test]
fn test_end_to_end_chain() {
    let injector = Injector::builder()
        .module()
        .bind::<dyn Repository>()
        .to::<SqlRepository>()
        .inject()
        .module()
        .bind_constant()
        .annotated_with(named("db.url"))
        .to("x")
        .inject()
        .inject()
        .inject()
        .build()
        .expect("Injector should build");

    let repository = injector.get::<dyn Repository>().unwrap();
    assert_eq!(repository.url(), "x");
    assert_eq!(*injector.get_qualified::<String>("db.url").unwrap(), "x");
}

#[test]
fn test_singleton_identity_and_unscoped_instances() {
    let injector = Injector::builder()
        .module()
        .bind::<AuditLog>()
        .to::<AuditLog>()
        .in_scope(Scope::Singleton)
        .inject()
        .bind::<dyn Repository>()
        .to::<SqlRepository>()
        .inject()
        .bind_constant()
        .annotated_with("db.url")
        .to("mem://")
        .inject()
        .inject()
        .build()
        .unwrap();

    let first = injector.get::<AuditLog>().unwrap();
    let second = injector.get::<AuditLog>().unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    let first = injector.get::<dyn Repository>().unwrap();
    let second = injector.get::<dyn Repository>().unwrap();
    assert!(!Arc::ptr_eq(&first, &second));
}

#[test]
fn test_constants_resolve_as_their_natural_type() {
    let injector = Injector::builder()
        .module()
        .bind_constant()
        .annotated_with("port")
        .to(8080_u16)
        .inject()
        .bind_constant()
        .annotated_with("tier")
        .to(ConstantValue::enumerant(Tier::Pro))
        .inject()
        .bind_constant()
        .annotated_with("service")
        .to(TypeRef::of::<dyn Service>())
        .inject()
        .bind_constant()
        .annotated_with("debug")
        .to_dynamic(Box::new(true))
        .inject()
        .inject()
        .build()
        .unwrap();

    assert_eq!(*injector.get_qualified::<u16>("port").unwrap(), 8080);
    assert_eq!(*injector.get_qualified::<Tier>("tier").unwrap(), Tier::Pro);
    assert!(injector.get_qualified::<TypeRef>("service").unwrap().is::<dyn Service>());
    assert!(*injector.get_qualified::<bool>("debug").unwrap());
    assert!(matches!(
        injector.get_qualified::<u32>("port"),
        Err(ResolveError::MissingBinding { .. })
    ));
}

#[test]
fn test_private_modules_hide_unexposed_bindings() {
    let injector = Injector::builder()
        .module()
        .expose_and_bind::<dyn Service>()
        .to::<UserService>()
        .in_scope(Scope::Singleton)
        .inject()
        .bind::<dyn Repository>()
        .to::<SqlRepository>()
        .inject()
        .bind_constant()
        .annotated_with("db.url")
        .to("postgres://users")
        .inject()
        .inject()
        .build()
        .unwrap();

    assert_eq!(injector.get::<dyn Service>().unwrap().describe(), "users@postgres://users");
    assert!(!injector.contains(&Key::of::<dyn Repository>()));
    assert!(matches!(injector.get::<dyn Repository>(), Err(ResolveError::MissingBinding { .. })));
}

#[test]
fn test_sibling_private_modules_can_bind_the_same_key() {
    let injector = Injector::builder()
        .module()
        .expose_and_bind::<dyn Service>()
        .annotated_with("primary")
        .to::<UserService>()
        .inject()
        .bind::<dyn Repository>()
        .to::<SqlRepository>()
        .inject()
        .bind_constant()
        .annotated_with("db.url")
        .to("primary-db")
        .inject()
        .inject()
        .module()
        .expose_and_bind::<dyn Service>()
        .annotated_with("replica")
        .to::<UserService>()
        .inject()
        .bind::<dyn Repository>()
        .to::<SqlRepository>()
        .inject()
        .bind_constant()
        .annotated_with("db.url")
        .to("replica-db")
        .inject()
        .inject()
        .build()
        .unwrap();

    assert_eq!(injector.get_qualified::<dyn Service>("primary").unwrap().describe(), "users@primary-db");
    assert_eq!(injector.get_qualified::<dyn Service>("replica").unwrap().describe(), "users@replica-db");
}

#[test]
fn test_private_modules_see_parent_bindings() {
    let injector = Injector::builder()
        .module()
        .bind_constant()
        .annotated_with("db.url")
        .to("shared-db")
        .inject()
        .bind::<AuditLog>()
        .to_instance(Arc::new(AuditLog))
        .inject()
        .module()
        .expose::<dyn Repository>()
        .inject()
        .bind::<dyn Repository>()
        .to::<SqlRepository>()
        .inject()
        .inject()
        .inject()
        .module()
        .bind::<dyn Service>()
        .to::<UserService>()
        .inject()
        .inject()
        .build()
        .unwrap();

    assert_eq!(injector.get::<dyn Service>().unwrap().describe(), "users@shared-db");
}

#[test]
fn test_optional_dependencies() {
    let without = Injector::builder()
        .module()
        .bind::<dyn Repository>()
        .to_instance(Arc::new(SqlRepository { url: Arc::new("a".into()) }))
        .inject()
        .bind::<UserService>()
        .to::<UserService>()
        .inject()
        .inject()
        .build()
        .unwrap();
    assert!(without.get::<UserService>().unwrap().audit.is_none());
    assert!(without.find::<AuditLog>().unwrap().is_none());

    let with = Injector::builder()
        .module()
        .bind::<dyn Repository>()
        .to_instance(Arc::new(SqlRepository { url: Arc::new("a".into()) }))
        .inject()
        .bind::<AuditLog>()
        .to::<AuditLog>()
        .inject()
        .bind::<UserService>()
        .to::<UserService>()
        .inject()
        .inject()
        .build()
        .unwrap();
    assert!(with.get::<UserService>().unwrap().audit.is_some());
}

#[test]
fn test_duplicate_bindings_are_rejected_unless_overrides_are_allowed() {
    let result = Injector::builder()
        .module()
        .bind_constant()
        .annotated_with("name")
        .to("a")
        .inject()
        .bind_constant()
        .annotated_with("name")
        .to("b")
        .inject()
        .inject()
        .build();
    assert!(matches!(result, Err(InjectorError::DuplicateBinding { .. })));

    let injector = Injector::builder()
        .allow_overrides(true)
        .module()
        .bind_constant()
        .annotated_with("name")
        .to("a")
        .inject()
        .bind_constant()
        .annotated_with("name")
        .to("b")
        .inject()
        .inject()
        .build()
        .unwrap();
    assert_eq!(*injector.get_qualified::<String>("name").unwrap(), "b");
}

#[test]
fn test_exposing_an_unbound_key_fails() {
    let result = Injector::builder().module().expose::<dyn Service>().inject().inject().build();
    assert!(matches!(result, Err(InjectorError::UnboundExposure { .. })));
}

#[test]
fn test_unqualified_constant_is_invalid() {
    let result = Injector::builder().module().bind_constant().to(1_u8).inject().inject().build();
    assert!(matches!(result, Err(InjectorError::InvalidBinding { .. })));
}

#[test]
fn test_declaration_errors_propagate_unchanged() {
    let binding = TypeBinding::of::<AuditLog>()
        .to_instance(Instance::of(AuditLog))
        .in_scope(Scope::Singleton);
    let result = Injector::builder()
        .module()
        .add_binding(binding)
        .inject()
        .build();

    assert!(matches!(
        result,
        Err(InjectorError::Declaration { source: DeclarationError::InvalidState { .. }, .. })
    ));
}

#[test]
fn test_circular_dependencies_are_reported() {
    let injector = Injector::builder()
        .module()
        .bind::<Chicken>()
        .to::<Chicken>()
        .inject()
        .bind::<Egg>()
        .to::<Egg>()
        .inject()
        .inject()
        .build()
        .unwrap();

    let err = injector.get::<Chicken>().err().unwrap();
    assert!(matches!(err, ResolveError::CircularDependency { .. }));
    assert!(err.to_string().contains("Chicken"));
}

#[test]
fn test_eager_singletons_are_built_during_assembly() {
    let counter = Arc::new(AtomicUsize::new(0));
    let injector = Injector::builder()
        .module()
        .bind::<AuditLog>()
        .to_provider(counting_provider(&counter))
        .as_eager_singleton()
        .inject()
        .inject()
        .build()
        .unwrap();

    assert_eq!(counter.load(Ordering::SeqCst), 1);
    injector.get::<AuditLog>().unwrap();
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[test]
fn test_stage_decides_when_singletons_are_built() {
    let counter = Arc::new(AtomicUsize::new(0));
    let lazy = Injector::builder()
        .module()
        .bind::<AuditLog>()
        .to_provider(counting_provider(&counter))
        .in_scope(Scope::Singleton)
        .inject()
        .inject()
        .build()
        .unwrap();
    assert_eq!(counter.load(Ordering::SeqCst), 0);
    lazy.get::<AuditLog>().unwrap();
    assert_eq!(counter.load(Ordering::SeqCst), 1);

    let counter = Arc::new(AtomicUsize::new(0));
    Injector::builder()
        .stage(Stage::Production)
        .module()
        .bind::<AuditLog>()
        .to_provider(counting_provider(&counter))
        .in_scope(Scope::Singleton)
        .inject()
        .inject()
        .build()
        .unwrap();
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[test]
fn test_failing_eager_singleton_fails_the_build() {
    let result = Injector::builder()
        .module()
        .bind::<AuditLog>()
        .to_provider(|_| Err(ResolveError::provider("audit store offline")))
        .as_eager_singleton()
        .inject()
        .inject()
        .build();

    assert!(matches!(
        result,
        Err(InjectorError::Resolve { source: ResolveError::Provider { .. }, .. })
    ));
}

#[test]
fn test_build_drains_pending_modules() {
    let mut builder = Injector::builder()
        .module()
        .bind::<AuditLog>()
        .to::<AuditLog>()
        .inject()
        .inject();

    let first = builder.build().unwrap();
    let second = builder.build().unwrap();
    assert!(first.contains(&Key::of::<AuditLog>()));
    assert!(!second.contains(&Key::of::<AuditLog>()));
}

#[test]
fn test_concurrent_singleton_resolution_observes_one_value() {
    let injector = Injector::builder()
        .module()
        .bind::<AuditLog>()
        .to::<AuditLog>()
        .in_scope(Scope::Singleton)
        .inject()
        .inject()
        .build()
        .unwrap();

    let resolved: Vec<Arc<AuditLog>> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let injector = injector.clone();
                scope.spawn(move || injector.get::<AuditLog>().unwrap())
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert!(resolved.windows(2).all(|pair| Arc::ptr_eq(&pair[0], &pair[1])));
}

fn primary_service() -> Key {
    Key::of::<dyn Service>().qualified("primary")
}

#[test]
fn test_linked_key_resolves_its_target() {
    let injector = Injector::builder()
        .module()
        .bind_key::<dyn Service>(primary_service())
        .to::<UserService>()
        .in_scope(Scope::Singleton)
        .inject()
        .bind::<dyn Service>()
        .to_key(primary_service())
        .inject()
        .bind::<dyn Repository>()
        .to::<SqlRepository>()
        .inject()
        .bind_constant()
        .annotated_with("db.url")
        .to("primary-db")
        .inject()
        .inject()
        .build()
        .unwrap();

    let alias = injector.get::<dyn Service>().unwrap();
    let target = injector.get_key::<dyn Service>(&primary_service()).unwrap();
    assert_eq!(alias.describe(), "users@primary-db");
    assert!(Arc::ptr_eq(&alias, &target));
}

#[test]
fn test_scoped_link_caches_independently_of_its_target() {
    let counter = Arc::new(AtomicUsize::new(0));
    let injector = Injector::builder()
        .module()
        .bind::<AuditLog>()
        .annotated_with("fresh")
        .to_provider(counting_provider(&counter))
        .inject()
        .bind::<AuditLog>()
        .to_key(Key::of::<AuditLog>().qualified("fresh"))
        .in_scope(Scope::Singleton)
        .inject()
        .inject()
        .build()
        .unwrap();

    let first = injector.get::<AuditLog>().unwrap();
    let second = injector.get::<AuditLog>().unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(counter.load(Ordering::SeqCst), 1);

    injector.get_qualified::<AuditLog>("fresh").unwrap();
    assert_eq!(counter.load(Ordering::SeqCst), 2);
}

#[test]
fn test_linked_keys_forming_a_loop_are_reported() {
    let injector = Injector::builder()
        .module()
        .bind_key::<AuditLog>(Key::of::<AuditLog>().qualified("a"))
        .to_key(Key::of::<AuditLog>().qualified("b"))
        .inject()
        .bind_key::<AuditLog>(Key::of::<AuditLog>().qualified("b"))
        .to_key(Key::of::<AuditLog>().qualified("a"))
        .inject()
        .inject()
        .build()
        .unwrap();

    let err = injector.get_qualified::<AuditLog>("a").err().unwrap();
    assert!(matches!(err, ResolveError::CircularDependency { .. }));
}

#[test]
fn test_link_to_an_unbound_key_reports_the_target() {
    let injector = Injector::builder()
        .module()
        .bind::<AuditLog>()
        .to_key(Key::of::<AuditLog>().qualified("missing"))
        .inject()
        .inject()
        .build()
        .unwrap();

    let err = injector.get::<AuditLog>().err().unwrap();
    assert_eq!(err.missing_key(), Some(&Key::of::<AuditLog>().qualified("missing")));
}

#[test]
fn test_links_to_another_type_or_to_themselves_are_invalid() {
    let other_type = Injector::builder()
        .module()
        .bind::<AuditLog>()
        .to_key(Key::of::<String>())
        .inject()
        .inject()
        .build();
    assert!(matches!(
        other_type,
        Err(InjectorError::Declaration { source: DeclarationError::InvalidState { .. }, .. })
    ));

    let itself = Injector::builder()
        .module()
        .bind::<AuditLog>()
        .to_key(Key::of::<AuditLog>())
        .inject()
        .inject()
        .build();
    assert!(matches!(
        itself,
        Err(InjectorError::Declaration { source: DeclarationError::InvalidState { .. }, .. })
    ));
}

#[test]
fn test_keyed_binding_must_match_the_chain_type() {
    let result = Injector::builder()
        .module()
        .bind_key::<AuditLog>(Key::of::<String>().qualified("audit"))
        .to::<AuditLog>()
        .inject()
        .inject()
        .build();

    assert!(matches!(
        result,
        Err(InjectorError::Declaration { source: DeclarationError::InvalidState { .. }, .. })
    ));
}

#[test]
fn test_keyed_exposures_publish_private_bindings() {
    let injector = Injector::builder()
        .module()
        .expose_key(primary_service())
        .inject()
        .bind_key::<dyn Service>(primary_service())
        .to::<UserService>()
        .inject()
        .expose_and_bind_key::<dyn Repository>(Key::of::<dyn Repository>().qualified("users"))
        .to::<SqlRepository>()
        .in_scope(Scope::Singleton)
        .inject()
        .bind::<dyn Repository>()
        .to_key(Key::of::<dyn Repository>().qualified("users"))
        .inject()
        .bind_constant()
        .annotated_with("db.url")
        .to("users-db")
        .inject()
        .inject()
        .build()
        .unwrap();

    assert_eq!(injector.get_key::<dyn Service>(&primary_service()).unwrap().describe(), "users@users-db");
    assert_eq!(injector.get_qualified::<dyn Repository>("users").unwrap().url(), "users-db");
    assert!(!injector.contains(&Key::of::<dyn Repository>()));
}
