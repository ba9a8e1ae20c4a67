use std::any::TypeId;
use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::container::registry::{ErasedHolder, FactoryHolder, Registry, SingletonHolder};
use crate::container::{Container, ContainerError, Interface};
use crate::key::ServiceKey;
use crate::provider::Provider;
use crate::scope::{Lifetime, Scope, ScopedRef};
use crate::util::any::DowncastRef;

/// The shared state behind every [`Container`] handle.
///
/// No lock is held while a provider runs. Providers are therefore free to
/// resolve or register services on the same container, at the cost of having
/// to re-check a key before inserting the holder they produced.
#[derive(Debug)]
pub struct ContainerCore {
    registry: Registry,
}

impl ContainerCore {
    pub fn new() -> Self {
        Self {
            registry: Registry::new(),
        }
    }

    pub fn register<I>(
        &self,
        handle: &Container,
        lifetime: Lifetime,
        key: ServiceKey,
        provider: Box<dyn Provider<I>>,
    ) -> Result<(), ContainerError>
    where
        I: Interface + ?Sized,
    {
        let partition = self.registry.partition(lifetime);
        if partition.read().contains(&key) {
            warn!(%key, %lifetime, "rejecting duplicate registration");
            return Err(ContainerError::DuplicateRegistration { key, lifetime });
        }

        let holder: Arc<dyn ErasedHolder> = match lifetime {
            Lifetime::Singleton => {
                debug!(%key, "constructing singleton at registration");
                let instance = provider.provide(handle, &key)?;
                Arc::new(SingletonHolder::new(instance))
            }
            Lifetime::Transient | Lifetime::Scoped => Arc::new(FactoryHolder::new(provider)),
        };

        let mut partition = partition.write();
        if partition.contains(&key) {
            // Taken while the provider was running. The rejected holder may
            // own a singleton whose destructor uses this container.
            drop(partition);
            drop(holder);
            warn!(%key, %lifetime, "rejecting duplicate registration");
            return Err(ContainerError::DuplicateRegistration { key, lifetime });
        }
        debug!(%key, %lifetime, "registered service");
        partition.insert(key, holder)
    }

    pub fn resolve_singleton<I>(&self, key: ServiceKey) -> Result<Arc<I>, ContainerError>
    where
        I: Interface + ?Sized,
    {
        let erased = self.lookup(Lifetime::Singleton, &key)?;
        let Some(holder) = erased.downcast_ref::<SingletonHolder<I>>() else {
            unreachable!("{key} resolved to a holder of `{}`", erased.interface_name())
        };
        trace!(%key, "resolved singleton");
        Ok(holder.instance())
    }

    pub fn resolve_transient<I>(
        &self,
        handle: &Container,
        key: ServiceKey,
    ) -> Result<Arc<I>, ContainerError>
    where
        I: Interface + ?Sized,
    {
        let erased = self.lookup(Lifetime::Transient, &key)?;
        let holder = Self::downcast_factory::<I>(&erased, &key);
        debug!(%key, "creating transient service");
        holder.create(handle, &key)
    }

    pub fn resolve_scoped<I>(
        &self,
        handle: &Container,
        scope: &Scope,
        key: ServiceKey,
    ) -> Result<ScopedRef<I>, ContainerError>
    where
        I: Interface + ?Sized,
    {
        if scope.contains_key(&key) {
            warn!(%key, "service already resolved in this scope, returning an empty reference");
            return Ok(ScopedRef::empty());
        }

        let erased = self.lookup(Lifetime::Scoped, &key)?;
        let holder = Self::downcast_factory::<I>(&erased, &key);
        debug!(%key, "creating scoped service");
        let instance = holder.create(handle, &key)?;
        Ok(scope.adopt(key, instance))
    }

    pub fn contains(&self, lifetime: Lifetime, key: &ServiceKey) -> bool {
        self.registry.partition(lifetime).read().contains(key)
    }

    pub fn tags(&self, lifetime: Lifetime, type_id: TypeId) -> Vec<String> {
        self.registry.partition(lifetime).read().tags(type_id)
    }

    pub fn count(&self, lifetime: Lifetime) -> usize {
        self.registry.partition(lifetime).read().len()
    }

    fn lookup(
        &self,
        lifetime: Lifetime,
        key: &ServiceKey,
    ) -> Result<Arc<dyn ErasedHolder>, ContainerError> {
        let holder = self.registry.partition(lifetime).read().get(key);
        holder.ok_or_else(|| {
            debug!(%key, %lifetime, "service not registered");
            ContainerError::ServiceNotRegistered {
                key: key.clone(),
                lifetime,
            }
        })
    }

    fn downcast_factory<'a, I>(
        erased: &'a Arc<dyn ErasedHolder>,
        key: &ServiceKey,
    ) -> &'a FactoryHolder<I>
    where
        I: Interface + ?Sized,
    {
        let Some(holder) = erased.downcast_ref::<FactoryHolder<I>>() else {
            unreachable!("{key} resolved to a holder of `{}`", erased.interface_name())
        };
        holder
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    use super::*;

    #[test]
    fn container_core_register_constructs_singleton_eagerly() {
        let constructed = Arc::new(AtomicUsize::new(0));
        let container = Container::new();

        container
            .register_singleton_with("", {
                let constructed = Arc::clone(&constructed);
                move |_: &Container| -> Result<Arc<usize>, ContainerError> {
                    Ok(Arc::new(constructed.fetch_add(1, Ordering::SeqCst)))
                }
            })
            .unwrap();
        assert_eq!(constructed.load(Ordering::SeqCst), 1);

        let first = container.resolve_singleton::<usize>("").unwrap();
        let second = container.resolve_singleton::<usize>("").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(constructed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn container_core_register_defers_transient_and_scoped() {
        let constructed = Arc::new(AtomicUsize::new(0));
        let container = Container::new();
        let factory = {
            let constructed = Arc::clone(&constructed);
            move |_: &Container| -> Result<Arc<usize>, ContainerError> {
                Ok(Arc::new(constructed.fetch_add(1, Ordering::SeqCst)))
            }
        };

        container
            .register_transient_with("", factory.clone())
            .unwrap();
        container.register_scoped_with("", factory).unwrap();
        assert_eq!(constructed.load(Ordering::SeqCst), 0);

        let scope = container.create_scope();
        container.resolve_transient::<usize>("").unwrap();
        container.resolve_scoped::<usize>(&scope, "").unwrap();
        assert_eq!(constructed.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn container_core_register_allows_reentrant_providers() {
        let container = Container::new();

        container
            .register_singleton_with("outer", |container: &Container| {
                container.register_singleton_with("inner", |_: &Container| Ok(Arc::new(1i32)))?;
                let inner = container.resolve_singleton::<i32>("inner")?;
                Ok(Arc::new(*inner + 1))
            })
            .unwrap();

        assert_eq!(*container.resolve_singleton::<i32>("outer").unwrap(), 2);
        assert_eq!(container.tags::<i32>(Lifetime::Singleton), vec!["inner", "outer"]);
    }

    #[test]
    fn container_core_register_fails_when_provider_takes_its_own_key() {
        let container = Container::new();

        let err = container
            .register_singleton_with("", |container: &Container| {
                container.register_instance("", Arc::new(1i32))?;
                Ok(Arc::new(2i32))
            })
            .unwrap_err();

        assert!(matches!(
            err,
            ContainerError::DuplicateRegistration {
                lifetime: Lifetime::Singleton,
                ..
            }
        ));
        assert_eq!(*container.resolve_singleton::<i32>("").unwrap(), 1);
    }

    #[test]
    fn container_core_register_fails_when_singleton_dependency_is_missing() {
        let container = Container::new();

        let err = container
            .register_singleton_with("", |container: &Container| {
                let base = container.resolve_singleton::<i32>("base")?;
                Ok(Arc::new(i64::from(*base)))
            })
            .unwrap_err();

        assert_eq!(err.key(), Some(&ServiceKey::of::<i32>("base")));
        assert!(!container.is_registered::<i64>(Lifetime::Singleton, ""));
        assert_eq!(container.count(Lifetime::Singleton), 0);
    }

    #[test]
    fn container_core_resolve_succeeds_on_multiple_threads() {
        const THREADS: usize = 16;

        let container = Container::new();
        container.register_instance("", Arc::new(42u64)).unwrap();
        container
            .register_transient_with("", |_: &Container| Ok(Arc::new(String::from("fresh"))))
            .unwrap();

        let singleton = container.resolve_singleton::<u64>("").unwrap();
        let handles: Vec<_> = (0..THREADS)
            .map(|i| {
                let container = container.clone();
                thread::spawn(move || {
                    let tag = format!("thread-{i}");
                    container.register_instance(&tag, Arc::new(i)).unwrap();

                    let scope = container.create_scope();
                    assert!(container.resolve_scoped::<u8>(&scope, "").is_err());
                    assert_eq!(*container.resolve_transient::<String>("").unwrap(), "fresh");
                    assert_eq!(*container.resolve_singleton::<usize>(&tag).unwrap(), i);
                    container.resolve_singleton::<u64>("").unwrap()
                })
            })
            .collect();

        for handle in handles {
            let resolved = handle.join().expect("Each thread should not `panic!()`");
            assert!(Arc::ptr_eq(&resolved, &singleton));
        }
        assert_eq!(container.tags::<usize>(Lifetime::Singleton).len(), THREADS);
    }
}
