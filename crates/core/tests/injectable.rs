pub mod fixtures;

use bindery_core::prelude::*;
use fixtures::{Diesel, Motor};
use std::collections::HashMap;
use std::sync::Arc;

struct MapResolver(HashMap<Key, Instance>);

impl Resolver for MapResolver {
    fn resolve(&self, key: &Key) -> Result<Instance, ResolveError> {
        self.0.get(key).cloned().ok_or_else(|| ResolveError::missing(key.clone()))
    }
}

#[derive(Injectable)]
struct Vehicle {
    motor: Arc<dyn Motor>,
    #[inject(named = "model")]
    model: Arc<String>,
    trailer: Option<Arc<Trailer>>,
    #[inject(default)]
    mileage: u64,
}

struct Trailer;

#[derive(Injectable)]
struct Pair(Arc<dyn Motor>, #[inject(named = "model")] Arc<String>);

fn resolver() -> MapResolver {
    let mut bindings = HashMap::new();
    bindings.insert(Key::of::<dyn Motor>(), Instance::new::<dyn Motor>(Arc::new(Diesel)));
    bindings.insert(Key::of::<String>().qualified("model"), Instance::of("T-800".to_owned()));
    MapResolver(bindings)
}

#[test]
fn fields_are_resolved_by_key() {
    let vehicle = Vehicle::inject(&resolver()).unwrap();
    assert_eq!(vehicle.motor.rpm(), 1800);
    assert_eq!(vehicle.model.as_str(), "T-800");
    assert!(vehicle.trailer.is_none());
    assert_eq!(vehicle.mileage, 0);
}

#[test]
fn tuple_structs_are_supported() {
    let Pair(motor, model) = Pair::inject(&resolver()).unwrap();
    assert_eq!(motor.rpm(), 1800);
    assert_eq!(*model, "T-800");
}

#[test]
fn missing_required_field_fails() {
    let err = Vehicle::inject(&MapResolver(HashMap::new())).err().unwrap();
    assert_eq!(err.missing_key(), Some(&Key::of::<dyn Motor>()));
}
