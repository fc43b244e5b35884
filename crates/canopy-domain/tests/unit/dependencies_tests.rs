//! Dependency slot and registry tests

use std::rc::Rc;

use canopy_domain::Error;
use canopy_domain::entities::{
    Dependencies, DependencySlot, ErasedProvision, Provision, SlotState,
};
use canopy_domain::value_objects::TypeKey;

#[derive(Debug, Clone, PartialEq)]
struct Config {
    name: String,
}

fn config_slot(provision: &Rc<Provision<Config>>) -> DependencySlot {
    DependencySlot::resolved(TypeKey::of::<Config>(), provision.clone(), "Root")
}

#[test]
fn test_slot_state_follows_provider() {
    let provision = Rc::new(Provision::<Config>::new());
    let slot = config_slot(&provision);
    assert_eq!(slot.state(), SlotState::Pending);
    assert!(slot.subscription_active());
    assert_eq!(slot.provider_label(), Some("Root"));

    provision.mark_ready();
    assert_eq!(slot.state(), SlotState::Ready);
    assert!(!slot.subscription_active());

    let empty = DependencySlot::unresolved(TypeKey::of::<Config>());
    assert_eq!(empty.state(), SlotState::Unresolved);
}

#[test]
fn test_begin_cycle_discards_slots_and_advances_generation() {
    let deps = Dependencies::new();
    let provision = Rc::new(Provision::<Config>::new());

    let first = deps.begin_cycle();
    deps.install(config_slot(&provision));
    deps.mark_loaded();
    assert_eq!(deps.len(), 1);
    assert!(deps.is_loaded());

    let second = deps.begin_cycle();
    assert!(second > first);
    assert!(deps.is_empty());
    assert!(!deps.is_loaded());
    assert_eq!(deps.generation(), second);
}

#[test]
fn test_install_replaces_slot_for_same_type() {
    let deps = Dependencies::new();
    let outer = Rc::new(Provision::<Config>::new());
    let inner = Rc::new(Provision::<Config>::new());
    inner.mark_ready();

    deps.install(config_slot(&outer));
    deps.install(DependencySlot::resolved(
        TypeKey::of::<Config>(),
        inner,
        "Inner",
    ));

    assert_eq!(deps.resolved_types(), vec![TypeKey::of::<Config>()]);
    assert_eq!(deps.slot_state::<Config>(), SlotState::Ready);
    let slot = deps.slot(TypeKey::of::<Config>()).expect("slot");
    assert_eq!(slot.provider_label(), Some("Inner"));
}

#[test]
fn test_get_requires_ready_provider() {
    let deps = Dependencies::new();
    assert!(matches!(
        deps.get::<Config>(),
        Err(Error::DependencyNotResolved { .. })
    ));

    let provision = Rc::new(Provision::<Config>::new());
    deps.install(config_slot(&provision));
    assert!(matches!(
        deps.get::<Config>(),
        Err(Error::ProviderNotReady { .. })
    ));

    provision.mark_ready();
    assert!(matches!(
        deps.get::<Config>(),
        Err(Error::ProvisionMissing { .. })
    ));

    provision.set(Config {
        name: "x".to_string(),
    });
    assert_eq!(deps.get::<Config>().expect("value").name, "x");
    assert_eq!(deps.with(|c: &Config| c.name.len()).expect("value"), 1);
}

#[test]
fn test_fake_wins_and_survives_new_cycle() {
    let deps = Dependencies::new();
    let provision = Rc::new(Provision::holding(Config {
        name: "real".to_string(),
    }));
    provision.mark_ready();
    deps.install(config_slot(&provision));

    deps.fake(Config {
        name: "fake".to_string(),
    });
    assert!(deps.is_faked::<Config>());
    assert_eq!(deps.get::<Config>().expect("fake").name, "fake");

    deps.begin_cycle();
    assert_eq!(deps.get::<Config>().expect("fake").name, "fake");

    deps.clear_fakes();
    assert!(deps.get::<Config>().is_err());
}

#[test]
fn test_fake_may_be_replaced_while_read() {
    let deps = Dependencies::new();
    deps.fake(Config {
        name: "a".to_string(),
    });

    let seen = deps
        .with(|current: &Config| {
            deps.fake(Config {
                name: "b".to_string(),
            });
            current.name.clone()
        })
        .unwrap();

    assert_eq!(seen, "a");
    assert_eq!(deps.get::<Config>().unwrap().name, "b");
}

#[test]
fn test_typed_provider_access() {
    let deps = Dependencies::new();
    let provision = Rc::new(Provision::holding(Config {
        name: "x".to_string(),
    }));
    deps.install(config_slot(&provision));

    let typed = deps.provider::<Config>().expect("provider");
    assert!(Rc::ptr_eq(&typed, &provision));
}
