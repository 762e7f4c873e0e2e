//! Lock utilities for proper error handling of poisoned locks

use crate::error::{Error, Result};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Lock a RwLock for reading and handle poisoning
pub fn read_lock<'a, T>(lock: &'a RwLock<T>, context: &str) -> Result<RwLockReadGuard<'a, T>> {
    lock.read()
        .map_err(|_| Error::internal(format!("RwLock read lock poisoned: {}", context)))
}

/// Lock a RwLock for writing and handle poisoning
pub fn write_lock<'a, T>(lock: &'a RwLock<T>, context: &str) -> Result<RwLockWriteGuard<'a, T>> {
    lock.write()
        .map_err(|_| Error::internal(format!("RwLock write lock poisoned: {}", context)))
}
