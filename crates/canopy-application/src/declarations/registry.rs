//! Compile-time dependency declarations
//!
//! Consumer types register the types they depend on into a linkme
//! distributed slice. The slice is read once when a
//! [`DeclarationTable`](super::DeclarationTable) is built.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                 Declaration Registration Flow                │
//! ├──────────────────────────────────────────────────────────────┤
//! │                                                              │
//! │  1. Consumer declares: declare_dependencies!(Player => [..]) │
//! │                              ↓                               │
//! │  2. Macro submits:     #[distributed_slice(DECLARATIONS)]    │
//! │                        static DECLARATION = ...              │
//! │                              ↓                               │
//! │  3. Table merges:      DeclarationTable::registered()        │
//! │                              ↓                               │
//! │  4. Injector reads:    slots_for(TypeKey::of::<Player>())    │
//! │                                                              │
//! └──────────────────────────────────────────────────────────────┘
//! ```

use canopy_domain::value_objects::TypeKey;

/// Static declaration of the dependencies of one consumer type
///
/// `extends` names the base type whose declarations are inherited. Function
/// pointers are stored because [`TypeKey::of`] cannot run in const context.
#[derive(Debug)]
pub struct DependencyDeclaration {
    /// Consumer type
    pub owner: fn() -> TypeKey,
    /// Base type whose declared dependencies are inherited
    pub extends: Option<fn() -> TypeKey>,
    /// Types declared directly on the consumer, in declaration order
    pub dependencies: &'static [fn() -> TypeKey],
}

impl DependencyDeclaration {
    /// Consumer type key
    pub fn owner_key(&self) -> TypeKey {
        (self.owner)()
    }

    /// Base type key
    pub fn base_key(&self) -> Option<TypeKey> {
        self.extends.map(|base| base())
    }

    /// Declared dependency keys
    pub fn dependency_keys(&self) -> Vec<TypeKey> {
        self.dependencies.iter().map(|key| key()).collect()
    }
}

// Auto-collection via linkme distributed slices - consumers submit entries at compile time
#[linkme::distributed_slice]
pub static DEPENDENCY_DECLARATIONS: [DependencyDeclaration] = [..];

/// List all registered consumer types
///
/// Returns `(consumer, dependency count)` pairs in link order.
pub fn list_declarations() -> Vec<(&'static str, usize)> {
    DEPENDENCY_DECLARATIONS
        .iter()
        .map(|decl| (decl.owner_key().name(), decl.dependencies.len()))
        .collect()
}

/// Register the dependencies of a consumer type
///
/// ```ignore
/// declare_dependencies!(Player => [Config, Inventory]);
/// declare_dependencies!(Boss: Enemy => [Arena]);
/// declare_dependencies!(Minion: Enemy => []);
/// ```
///
/// The `Derived: Base` form inherits every dependency declared for `Base`;
/// the base must be declared as well.
#[macro_export]
macro_rules! declare_dependencies {
    (@emit $owner:ty, $extends:expr, [$($dep:ty),*]) => {
        const _: () = {
            #[$crate::__private::linkme::distributed_slice(
                $crate::declarations::DEPENDENCY_DECLARATIONS
            )]
            #[linkme(crate = $crate::__private::linkme)]
            static DECLARATION: $crate::declarations::DependencyDeclaration =
                $crate::declarations::DependencyDeclaration {
                    owner: $crate::__private::TypeKey::of::<$owner>,
                    extends: $extends,
                    dependencies: &[$($crate::__private::TypeKey::of::<$dep>),*],
                };
        };
    };
    ($owner:ty : $base:ty => [$($dep:ty),* $(,)?]) => {
        $crate::declare_dependencies!(@emit $owner,
            ::core::option::Option::Some($crate::__private::TypeKey::of::<$base>),
            [$($dep),*]);
    };
    ($owner:ty => [$($dep:ty),* $(,)?]) => {
        $crate::declare_dependencies!(@emit $owner, ::core::option::Option::None, [$($dep),*]);
    };
}
