use bindery::prelude::*;
use std::sync::Arc;

trait Clock: Send + Sync {
    fn now(&self) -> u64;
}

struct FixedClock(u64);

impl Clock for FixedClock {
    fn now(&self) -> u64 {
        self.0
    }
}

#[test]
fn test_prelude_covers_a_full_chain() {
    let injector = Injector::builder()
        .module()
        .expose::<dyn Clock>()
        .inject()
        .bind::<dyn Clock>()
        .to_provider(|resolver| {
            let epoch = resolver.get_qualified::<u64>("epoch")?;
            Ok(Arc::new(FixedClock(*epoch)) as Arc<dyn Clock>)
        })
        .in_scope(Scope::Singleton)
        .inject()
        .bind_constant()
        .annotated_with("epoch")
        .to(1_700_000_000_u64)
        .inject()
        .inject()
        .build()
        .unwrap();

    assert_eq!(injector.get::<dyn Clock>().unwrap().now(), 1_700_000_000);
    assert!(injector.find::<u64>().unwrap().is_none());
}

#[test]
fn test_default_features() {
    assert!(bindery::is_enabled("injector"));
}
