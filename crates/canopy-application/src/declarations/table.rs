//! Merged declaration table
//!
//! Maps every declared consumer type to the ordered list of dependency slots
//! it owns, inherited declarations included. Built once at startup, either
//! from the linkme registry or explicitly through the builder.

use std::collections::{HashMap, HashSet};

use canopy_domain::error::{Error, Result};
use canopy_domain::value_objects::TypeKey;
use tracing::debug;

use super::registry::DEPENDENCY_DECLARATIONS;

#[derive(Debug, Clone)]
struct Declared {
    extends: Option<TypeKey>,
    dependencies: Vec<TypeKey>,
}

/// Immutable consumer type → dependency slots table
///
/// Slots of a type are ordered base-most first, then each derived type's own
/// declarations in declaration order. A type declared more than once along
/// the chain keeps its first position.
#[derive(Debug, Clone, Default)]
pub struct DeclarationTable {
    merged: HashMap<TypeKey, Vec<TypeKey>>,
}

impl DeclarationTable {
    /// Start an explicit table
    pub fn builder() -> DeclarationTableBuilder {
        DeclarationTableBuilder::default()
    }

    /// Build the table from every `declare_dependencies!` in the binary
    pub fn registered() -> Result<Self> {
        Self::builder().include_registered().build()
    }

    /// Merged dependency slots of `owner`, empty when undeclared
    pub fn slots_for(&self, owner: TypeKey) -> &[TypeKey] {
        self.merged.get(&owner).map(Vec::as_slice).unwrap_or_default()
    }

    /// Whether `owner` has a declaration
    pub fn is_declared(&self, owner: TypeKey) -> bool {
        self.merged.contains_key(&owner)
    }

    /// Number of declared consumer types
    pub fn len(&self) -> usize {
        self.merged.len()
    }

    /// Whether no consumer type is declared
    pub fn is_empty(&self) -> bool {
        self.merged.is_empty()
    }
}

/// Builder for [`DeclarationTable`]
#[derive(Debug, Default)]
pub struct DeclarationTableBuilder {
    declarations: Vec<(TypeKey, Declared)>,
}

impl DeclarationTableBuilder {
    /// Declare the dependencies of consumer `C`
    #[must_use]
    pub fn declare<C: 'static>(self, dependencies: &[TypeKey]) -> Self {
        self.push(TypeKey::of::<C>(), None, dependencies.to_vec())
    }

    /// Declare the dependencies of consumer `C`, inheriting those of `B`
    #[must_use]
    pub fn declare_extending<C: 'static, B: 'static>(self, dependencies: &[TypeKey]) -> Self {
        self.push(
            TypeKey::of::<C>(),
            Some(TypeKey::of::<B>()),
            dependencies.to_vec(),
        )
    }

    /// Add every declaration registered through `declare_dependencies!`
    #[must_use]
    pub fn include_registered(mut self) -> Self {
        for decl in DEPENDENCY_DECLARATIONS {
            self = self.push(decl.owner_key(), decl.base_key(), decl.dependency_keys());
        }
        self
    }

    fn push(mut self, owner: TypeKey, extends: Option<TypeKey>, dependencies: Vec<TypeKey>) -> Self {
        self.declarations.push((
            owner,
            Declared {
                extends,
                dependencies,
            },
        ));
        self
    }

    /// Validate and merge the declarations
    ///
    /// Fails with [`Error::Declaration`] when a type is declared twice, when
    /// a base type is not declared, or when `extends` links form a cycle.
    pub fn build(self) -> Result<DeclarationTable> {
        let mut declared: HashMap<TypeKey, Declared> = HashMap::new();
        for (owner, decl) in self.declarations {
            if declared.insert(owner, decl).is_some() {
                return Err(Error::declaration(format!("{owner} is declared more than once")));
            }
        }

        let mut merged = HashMap::with_capacity(declared.len());
        for owner in declared.keys() {
            let chain = chain_of(*owner, &declared)?;
            let mut seen = HashSet::new();
            let slots: Vec<TypeKey> = chain
                .iter()
                .rev()
                .flat_map(|key| declared[key].dependencies.iter().copied())
                .filter(|key| seen.insert(*key))
                .collect();
            merged.insert(*owner, slots);
        }

        debug!(consumers = merged.len(), "built dependency declaration table");
        Ok(DeclarationTable { merged })
    }
}

/// `owner` followed by its base types, most-derived first
fn chain_of(owner: TypeKey, declared: &HashMap<TypeKey, Declared>) -> Result<Vec<TypeKey>> {
    let mut chain = vec![owner];
    let mut visited = HashSet::from([owner]);
    let mut current = owner;
    while let Some(base) = declared[&current].extends {
        if !declared.contains_key(&base) {
            return Err(Error::declaration(format!(
                "{current} extends {base}, which has no declaration"
            )));
        }
        if !visited.insert(base) {
            return Err(Error::declaration(format!(
                "declaration chain of {owner} loops back to {base}"
            )));
        }
        chain.push(base);
        current = base;
    }
    Ok(chain)
}
