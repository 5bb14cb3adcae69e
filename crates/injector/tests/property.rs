use bindery_core::prelude::*;
use bindery_injector::Injector;
use proptest::prelude::*;

proptest! {
    #[test]
    fn every_qualified_constant_resolves_to_its_value(
        values in proptest::collection::btree_map("[a-z]{1,8}", any::<i64>(), 0..32)
    ) {
        let mut module = Injector::builder().module();
        for (name, value) in &values {
            module = module.bind_constant().annotated_with(name.clone()).to(*value).inject();
        }
        let injector = module.inject().build().unwrap();

        for (name, value) in values {
            prop_assert_eq!(*injector.get_qualified::<i64>(name).unwrap(), value);
        }
    }

    #[test]
    fn private_constants_stay_hidden_unless_exposed(name in "[a-z]{1,8}", value in any::<u32>(), exposed in any::<bool>()) {
        let mut module = Injector::builder().module();
        if exposed {
            module = module.expose::<u32>().annotated_with(name.clone()).inject();
        } else {
            module = module.expose::<u8>().annotated_with("marker").inject();
            module = module.bind_constant().annotated_with("marker").to(0_u8).inject();
        }
        let injector = module.bind_constant().annotated_with(name.clone()).to(value).inject().inject().build().unwrap();

        let resolved = injector.find_key::<u32>(&Key::of::<u32>().qualified(name)).unwrap();
        prop_assert_eq!(resolved.map(|v| *v), exposed.then_some(value));
    }
}
