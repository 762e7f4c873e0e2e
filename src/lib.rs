//! Typed service registry and dependency injection container
//!
//! This crate maps a service key (derived from a Rust type) to a concrete,
//! ready-to-use instance. Registrations come in three lifetimes plus an
//! explicit constructor table used as the auto-wire fallback:
//!
//! ```text
//! resolve::<T>()
//!       │
//!       ▼
//! ┌──────────────┐   hit   ┌─────────────────────────────┐
//! │  singletons  │ ──────▶ │ same Arc<T> on every call   │
//! ├──────────────┤         ├─────────────────────────────┤
//! │  instances   │ ──────▶ │ identical semantics         │
//! ├──────────────┤         ├─────────────────────────────┤
//! │  factories   │ ──────▶ │ fresh value, never cached   │
//! ├──────────────┤         ├─────────────────────────────┤
//! │ constructors │ ──────▶ │ build T, resolving its      │
//! └──────────────┘         │ parameters recursively      │
//!       │ miss             └─────────────────────────────┘
//!       ▼
//! Err(UnresolvedDependency)
//! ```
//!
//! ## Key Principles
//!
//! - **Typed lookups**: keys are [`ServiceKey`]s derived from `TypeId`, so a
//!   resolved value never needs an unchecked cast at the call site.
//! - **Explicit wiring**: constructors are closures registered up front that
//!   resolve their own parameters through a [`Resolution`] context. There is
//!   no runtime reflection and no global container; the registry is passed
//!   around as an ordinary value.
//! - **Read-biased locking**: registrations happen once at startup,
//!   resolutions on every unit of work, so each backing map sits behind its
//!   own `RwLock`.
//!
//! ## Usage
//!
//! ```
//! use std::sync::Arc;
//! use wireup::{Registry, Result};
//!
//! struct Database { url: String }
//! struct Repository { db: Arc<Database> }
//!
//! fn main() -> Result<()> {
//!     let registry = Registry::new();
//!     registry.register_singleton(Database { url: "sqlite://app.db".into() })?;
//!     registry.register_constructor(|cx| {
//!         Ok(Repository { db: cx.resolve::<Database>()? })
//!     })?;
//!
//!     let repo = registry.resolve::<Repository>()?;
//!     assert_eq!(repo.db.url, "sqlite://app.db");
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod key;
pub mod locks;
pub mod registry;

pub use error::{Error, Result};
pub use key::ServiceKey;
pub use registry::{Injector, Registry, Resolution};
