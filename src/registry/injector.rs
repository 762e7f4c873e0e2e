//! Cloneable per-type resolution handles
//!
//! An [`Injector`] binds one service type to a shared registry reference.
//! Request-handling code keeps the injector around and asks it for the
//! service when needed, instead of reaching for a process-wide container.

use super::Registry;
use crate::error::Result;
use std::marker::PhantomData;
use std::sync::Arc;

/// Resolves one service type on demand
pub struct Injector<T> {
    registry: Arc<Registry>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Injector<T>
where
    T: Send + Sync + 'static,
{
    pub(super) fn new(registry: Arc<Registry>) -> Self {
        Self {
            registry,
            _marker: PhantomData,
        }
    }

    /// Resolve the bound service type through the backing registry
    ///
    /// Runs the full lookup on every call, so a transient registration
    /// still produces a fresh value each time.
    pub fn get(&self) -> Result<Arc<T>> {
        self.registry.resolve::<T>()
    }
}

impl<T> Clone for Injector<T> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
            _marker: PhantomData,
        }
    }
}
