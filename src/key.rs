//! Service keys

use std::any::{TypeId, type_name};
use std::fmt;

/// Stable identifier for a registered service
///
/// Derived from the Rust type being registered. Hashing and equality use
/// the `TypeId`; the type name rides along for diagnostics only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ServiceKey {
    id: TypeId,
    name: &'static str,
}

impl ServiceKey {
    /// Create the key for a service type
    pub fn of<T: 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// Type name for diagnostics
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Underlying type identity
    pub fn type_id(&self) -> TypeId {
        self.id
    }
}

impl fmt::Display for ServiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
