//! Integration tests for the service registry

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use wireup::{Error, Registry};

#[derive(Debug, Clone, PartialEq)]
struct Config {
    url: String,
}

#[derive(Debug)]
struct Database {
    url: String,
}

#[derive(Debug)]
struct Repository {
    db: Arc<Database>,
}

#[derive(Debug)]
struct Ticket {
    serial: usize,
}

struct Unrelated;

#[test]
fn test_singleton_returns_same_instance() {
    let registry = Registry::new();
    registry
        .register_singleton(Config {
            url: "postgres://localhost".to_string(),
        })
        .unwrap();

    let first = registry.resolve::<Config>().unwrap();
    let second = registry.resolve::<Config>().unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn test_singleton_survives_unrelated_registrations() {
    let registry = Registry::new();
    registry
        .register_singleton(Config {
            url: "postgres://localhost".to_string(),
        })
        .unwrap();
    let before = registry.resolve::<Config>().unwrap();

    registry.register_singleton(Unrelated).unwrap();
    registry.register_transient(|| Ticket { serial: 0 }).unwrap();

    let after = registry.resolve::<Config>().unwrap();
    assert!(Arc::ptr_eq(&before, &after));
}

#[test]
fn test_transient_factory_runs_once_per_resolve() {
    let registry = Registry::new();
    let invocations = Arc::new(AtomicUsize::new(0));

    let counter = Arc::clone(&invocations);
    registry
        .register_transient(move || Ticket {
            serial: counter.fetch_add(1, Ordering::SeqCst),
        })
        .unwrap();

    let first = registry.resolve::<Ticket>().unwrap();
    let second = registry.resolve::<Ticket>().unwrap();
    let third = registry.resolve::<Ticket>().unwrap();

    assert_eq!(first.serial, 0);
    assert_eq!(second.serial, 1);
    assert_eq!(third.serial, 2);
    assert_eq!(invocations.load(Ordering::SeqCst), 3);
}

#[test]
fn test_instance_and_singleton_are_equivalent() {
    let via_singleton = Registry::new();
    via_singleton
        .register_singleton(Config {
            url: "redis://cache".to_string(),
        })
        .unwrap();

    let via_instance = Registry::new();
    via_instance
        .register_instance(Config {
            url: "redis://cache".to_string(),
        })
        .unwrap();

    let a = via_singleton.resolve::<Config>().unwrap();
    let b = via_instance.resolve::<Config>().unwrap();
    assert_eq!(*a, *b);

    // Both cache the stored value across resolves.
    assert!(Arc::ptr_eq(&b, &via_instance.resolve::<Config>().unwrap()));
}

#[test]
fn test_reregistration_overwrites() {
    let registry = Registry::new();
    registry
        .register_singleton(Config {
            url: "first".to_string(),
        })
        .unwrap();
    registry
        .register_singleton(Config {
            url: "second".to_string(),
        })
        .unwrap();

    let resolved = registry.resolve::<Config>().unwrap();
    assert_eq!(resolved.url, "second");
}

#[test]
fn test_auto_wire_uses_registered_dependency() {
    let registry = Registry::new();
    registry
        .register_singleton(Database {
            url: "sqlite://app.db".to_string(),
        })
        .unwrap();
    registry
        .register_constructor(|cx| {
            Ok(Repository {
                db: cx.resolve::<Database>()?,
            })
        })
        .unwrap();

    let repo = registry.resolve::<Repository>().unwrap();
    assert_eq!(repo.db.url, "sqlite://app.db");

    let db = registry.resolve::<Database>().unwrap();
    assert!(Arc::ptr_eq(&repo.db, &db));
}

#[test]
fn test_auto_wire_failure_names_key_and_wraps_cause() {
    let registry = Registry::new();
    // Repository's constructor needs a Database nobody registered.
    registry
        .register_constructor(|cx| {
            Ok(Repository {
                db: cx.resolve::<Database>()?,
            })
        })
        .unwrap();

    let error = registry.resolve::<Repository>().unwrap_err();
    match error {
        Error::AutoWireFailure { key, source } => {
            assert!(key.name().contains("Repository"));
            match *source {
                Error::UnresolvedDependency { key } => {
                    assert!(key.name().contains("Database"));
                }
                other => panic!("Expected UnresolvedDependency cause, got {other}"),
            }
        }
        other => panic!("Expected AutoWireFailure, got {other}"),
    }
}

#[test]
fn test_constructor_error_is_wrapped() {
    #[derive(Debug)]
    struct Broken;

    let registry = Registry::new();
    registry
        .register_constructor::<Broken, _>(|_cx| Err("missing credentials".into()))
        .unwrap();

    let error = registry.resolve::<Broken>().unwrap_err();
    match error {
        Error::AutoWireFailure { key, source } => {
            assert!(key.name().contains("Broken"));
            assert!(format!("{source}").contains("missing credentials"));
        }
        other => panic!("Expected AutoWireFailure, got {other}"),
    }
}

#[test]
fn test_unregistered_leaf_is_unresolved() {
    let registry = Registry::new();

    let error = registry.resolve::<Config>().unwrap_err();
    match error {
        Error::UnresolvedDependency { key } => {
            assert!(key.name().contains("Config"));
        }
        other => panic!("Expected UnresolvedDependency, got {other}"),
    }
}

#[test]
fn test_direct_cycle_fails_fast() {
    #[derive(Debug)]
    struct Selfish {
        #[allow(dead_code)]
        inner: Arc<Selfish>,
    }

    let registry = Registry::new();
    registry
        .register_constructor(|cx| {
            Ok(Selfish {
                inner: cx.resolve::<Selfish>()?,
            })
        })
        .unwrap();

    let error = registry.resolve::<Selfish>().unwrap_err();
    match error {
        Error::CyclicDependency { path } => {
            assert_eq!(path.len(), 2);
            assert_eq!(path[0], path[1]);
        }
        other => panic!("Expected CyclicDependency, got {other}"),
    }
}

#[test]
fn test_transitive_cycle_reports_full_path() {
    #[derive(Debug)]
    struct Chicken {
        #[allow(dead_code)]
        egg: Arc<Egg>,
    }
    #[derive(Debug)]
    struct Egg {
        #[allow(dead_code)]
        chicken: Arc<Chicken>,
    }

    let registry = Registry::new();
    registry
        .register_constructor(|cx| {
            Ok(Chicken {
                egg: cx.resolve::<Egg>()?,
            })
        })
        .unwrap();
    registry
        .register_constructor(|cx| {
            Ok(Egg {
                chicken: cx.resolve::<Chicken>()?,
            })
        })
        .unwrap();

    let error = registry.resolve::<Chicken>().unwrap_err();
    match error {
        Error::CyclicDependency { path } => {
            assert_eq!(path.len(), 3);
            assert_eq!(path[0], path[2]);
            assert!(path[1].name().contains("Egg"));
        }
        other => panic!("Expected CyclicDependency, got {other}"),
    }
}

#[test]
fn test_concurrent_resolution() {
    let registry = Arc::new(Registry::new());
    registry
        .register_singleton(Config {
            url: "postgres://localhost".to_string(),
        })
        .unwrap();
    let serials = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&serials);
    registry
        .register_transient(move || Ticket {
            serial: counter.fetch_add(1, Ordering::SeqCst),
        })
        .unwrap();

    let baseline = registry.resolve::<Config>().unwrap();
    let mut handles = Vec::new();
    for _ in 0..8 {
        let registry = Arc::clone(&registry);
        let baseline = Arc::clone(&baseline);
        handles.push(thread::spawn(move || {
            for _ in 0..50 {
                let config = registry.resolve::<Config>().unwrap();
                assert!(Arc::ptr_eq(&config, &baseline));
                registry.resolve::<Ticket>().unwrap();
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    // Every transient resolve invoked the factory exactly once.
    assert_eq!(serials.load(Ordering::SeqCst), 8 * 50);
}

#[test]
fn test_is_registered_and_key_listing() {
    let registry = Registry::new();
    assert!(!registry.is_registered::<Config>());

    registry
        .register_singleton(Config {
            url: "postgres://localhost".to_string(),
        })
        .unwrap();
    registry.register_transient(|| Ticket { serial: 0 }).unwrap();

    assert!(registry.is_registered::<Config>());
    assert!(registry.is_registered::<Ticket>());
    assert!(!registry.is_registered::<Database>());

    let keys = registry.registered_keys();
    assert_eq!(keys.len(), 2);
    assert!(keys.iter().any(|k| k.name().contains("Config")));
}

#[test]
fn test_injector_handle() {
    let registry = Arc::new(Registry::new());
    registry
        .register_singleton(Config {
            url: "postgres://localhost".to_string(),
        })
        .unwrap();

    let injector = registry.injector::<Config>();
    let direct = registry.resolve::<Config>().unwrap();
    assert!(Arc::ptr_eq(&injector.get().unwrap(), &direct));
}
