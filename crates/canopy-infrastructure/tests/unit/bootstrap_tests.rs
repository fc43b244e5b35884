//! Composition root tests

use std::rc::Rc;

use canopy_application::declarations::DeclarationTable;
use canopy_application::injector::ProvidePolicy;
use canopy_domain::entities::{Dependencies, Provisions};
use canopy_domain::error::Error;
use canopy_domain::ports::{Dependent, TreeNode};
use canopy_domain::value_objects::TypeKey;
use canopy_infrastructure::config::{CanopyConfig, InjectionConfig};
use canopy_infrastructure::scene::SceneLink;
use canopy_infrastructure::{bootstrap, bootstrap_with};

#[derive(Debug, Clone, PartialEq)]
struct Theme(&'static str);

struct Root {
    link: SceneLink,
    provisions: Provisions,
}

impl TreeNode for Root {
    fn parent(&self) -> Option<Rc<dyn TreeNode>> {
        self.link.parent()
    }

    fn provisions(&self) -> Option<&Provisions> {
        Some(&self.provisions)
    }

    fn label(&self) -> String {
        self.link.name().to_string()
    }
}

struct Button {
    link: SceneLink,
    dependencies: Dependencies,
}

impl TreeNode for Button {
    fn parent(&self) -> Option<Rc<dyn TreeNode>> {
        self.link.parent()
    }

    fn label(&self) -> String {
        self.link.name().to_string()
    }
}

impl Dependent for Button {
    fn dependencies(&self) -> &Dependencies {
        &self.dependencies
    }

    fn loaded(&self) {}
}

fn theme_root() -> Rc<Root> {
    Rc::new(Root {
        link: SceneLink::new("Root"),
        provisions: Provisions::named("Root").with_value(Theme("dark")),
    })
}

fn button_under(root: &Rc<Root>) -> Rc<Button> {
    let button = Rc::new(Button {
        link: SceneLink::new("Button"),
        dependencies: Dependencies::new(),
    });
    let parent: Rc<dyn TreeNode> = root.clone();
    button.link.attach(&parent).unwrap();
    button
}

#[test]
fn test_bootstrap_applies_injection_config() {
    let config = CanopyConfig {
        injection: InjectionConfig {
            provide_policy: ProvidePolicy::Reject,
            global_fallback: false,
            auto_register_roots: false,
        },
        ..CanopyConfig::default()
    };

    let injector = bootstrap(&config).unwrap();

    assert_eq!(injector.options().provide_policy, ProvidePolicy::Reject);
    assert!(!injector.options().global_fallback);
    assert!(!injector.options().auto_register_roots);
}

#[test]
fn test_bootstrap_with_explicit_table() {
    let table = DeclarationTable::builder()
        .declare::<Button>(&[TypeKey::of::<Theme>()])
        .build()
        .unwrap();
    let injector = bootstrap_with(&CanopyConfig::default(), table).unwrap();
    let root = theme_root();
    let button = button_under(&root);

    injector.provide(&root).unwrap();
    injector.depend(&button).unwrap();

    assert!(button.dependencies().is_loaded());
    assert_eq!(button.dependencies().get::<Theme>().unwrap(), Theme("dark"));
}

#[test]
fn test_registered_table_without_declarations_rejects_depend() {
    let injector = bootstrap(&CanopyConfig::default()).unwrap();
    let root = theme_root();
    let button = button_under(&root);

    let result = injector.depend(&button);

    assert!(matches!(result, Err(Error::NoDependenciesDeclared { .. })));
}
