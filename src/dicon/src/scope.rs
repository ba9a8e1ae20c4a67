use std::any::Any;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt::{Debug, Display, Formatter, Result as FmtResult};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use crate::container::Interface;
use crate::key::ServiceKey;

/// The lifetime policy a service is registered under.
///
/// Each lifetime owns an independent registry partition, so the same key may
/// be registered once per lifetime without conflicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lifetime {
    /// One instance, constructed at registration and shared by every caller.
    Singleton,
    /// A new instance on every resolution. Nothing is cached.
    Transient,
    /// At most one instance per key and per [`Scope`], owned by that scope.
    Scoped,
}

impl Lifetime {
    pub const ALL: [Lifetime; 3] = [Self::Singleton, Self::Transient, Self::Scoped];

    pub fn to_str(&self) -> &'static str {
        match self {
            Self::Singleton => "Singleton",
            Self::Transient => "Transient",
            Self::Scoped => "Scoped",
        }
    }
}

impl Display for Lifetime {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.to_str())
    }
}

/// A bounded context owning scoped service instances.
///
/// A [`Scope`] is obtained from [`Container::create_scope`] and is populated
/// lazily by [`Container::resolve_scoped`]. Every key appears at most once,
/// and a filled slot is never overwritten. The scope is the only strong owner
/// the container keeps for these instances: callers get a [`ScopedRef`], so
/// dropping the last handle to the scope drops every instance nobody else has
/// upgraded and kept.
///
/// [`Container::create_scope`]: crate::container::Container::create_scope
/// [`Container::resolve_scoped`]: crate::container::Container::resolve_scoped
pub struct Scope {
    instances: Mutex<HashMap<ServiceKey, Box<dyn Any + Send + Sync>>>,
}

impl Scope {
    pub(crate) fn new() -> Self {
        Self {
            instances: Mutex::new(HashMap::new()),
        }
    }

    /// Returns true if an instance of `I` under `tag` lives in this scope.
    pub fn contains<I>(&self, tag: &str) -> bool
    where
        I: Interface + ?Sized,
    {
        self.contains_key(&ServiceKey::of::<I>(tag))
    }

    pub fn len(&self) -> usize {
        self.instances.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.lock().is_empty()
    }

    pub(crate) fn contains_key(&self, key: &ServiceKey) -> bool {
        self.instances.lock().contains_key(key)
    }

    /// Takes ownership of `instance` under `key` and hands back an observer.
    ///
    /// If the slot got filled while `instance` was being constructed, the
    /// existing entry wins and `instance` is dropped, which yields an empty
    /// [`ScopedRef`] just like any other repeated resolution.
    pub(crate) fn adopt<I>(&self, key: ServiceKey, instance: Arc<I>) -> ScopedRef<I>
    where
        I: Interface + ?Sized,
    {
        let mut instances = self.instances.lock();
        if let Entry::Vacant(entry) = instances.entry(key) {
            let observer = ScopedRef::new(Arc::downgrade(&instance));
            entry.insert(Box::new(instance));
            observer
        } else {
            // The instance may own resources whose destructors reach back
            // into this scope.
            drop(instances);
            drop(instance);
            ScopedRef::empty()
        }
    }
}

impl Debug for Scope {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let instances = self.instances.lock();
        f.debug_set().entries(instances.keys()).finish()
    }
}

/// A non-owning reference to a scoped service instance.
///
/// The referenced instance is owned by its [`Scope`]. Use
/// [`ScopedRef::upgrade`] to obtain a temporary owning handle; it fails once
/// the scope and every other owner are gone.
///
/// A [`ScopedRef`] may be *empty*: resolving a key that was already resolved
/// in the same scope returns an empty reference rather than the existing
/// instance.
pub struct ScopedRef<I>
where
    I: ?Sized,
{
    inner: Option<Weak<I>>,
}

impl<I> ScopedRef<I>
where
    I: ?Sized,
{
    pub(crate) fn new(inner: Weak<I>) -> Self {
        Self { inner: Some(inner) }
    }

    pub(crate) fn empty() -> Self {
        Self { inner: None }
    }

    pub fn upgrade(&self) -> Option<Arc<I>> {
        self.inner.as_ref().and_then(Weak::upgrade)
    }

    /// Returns true if this reference never pointed to any instance.
    pub fn is_empty(&self) -> bool {
        self.inner.is_none()
    }

    /// Returns true if the referenced instance is still owned by someone.
    pub fn is_alive(&self) -> bool {
        self.inner
            .as_ref()
            .is_some_and(|inner| inner.strong_count() > 0)
    }
}

impl<I> Clone for ScopedRef<I>
where
    I: ?Sized,
{
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<I> Debug for ScopedRef<I>
where
    I: ?Sized,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let state = if self.is_empty() {
            "empty"
        } else if self.is_alive() {
            "alive"
        } else {
            "dropped"
        };
        f.debug_tuple("ScopedRef").field(&state).finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    struct Tracked(Arc<AtomicUsize>);

    impl Drop for Tracked {
        fn drop(&mut self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn scope_adopt_succeeds_when_slot_is_vacant() {
        let scope = Scope::new();
        let observer = scope.adopt(ServiceKey::untagged::<i32>(), Arc::new(42i32));

        assert!(!observer.is_empty());
        assert_eq!(observer.upgrade().as_deref(), Some(&42));
        assert!(scope.contains::<i32>(""));
        assert_eq!(scope.len(), 1);
    }

    #[test]
    fn scope_adopt_returns_empty_ref_when_slot_is_filled() {
        let dropped = Arc::new(AtomicUsize::new(0));
        let scope = Scope::new();
        let key = ServiceKey::untagged::<Tracked>();

        let first = scope.adopt(key.clone(), Arc::new(Tracked(Arc::clone(&dropped))));
        let second = scope.adopt(key, Arc::new(Tracked(Arc::clone(&dropped))));

        assert!(first.is_alive());
        assert!(second.is_empty());
        assert!(second.upgrade().is_none());
        assert_eq!(dropped.load(Ordering::SeqCst), 1);
        assert_eq!(scope.len(), 1);
    }

    #[test]
    fn scope_drop_releases_owned_instances() {
        let dropped = Arc::new(AtomicUsize::new(0));
        let scope = Scope::new();
        let a = scope.adopt(
            ServiceKey::of::<Tracked>("a"),
            Arc::new(Tracked(Arc::clone(&dropped))),
        );
        let b = scope.adopt(
            ServiceKey::of::<Tracked>("b"),
            Arc::new(Tracked(Arc::clone(&dropped))),
        );
        let kept = b.upgrade().unwrap();

        drop(scope);

        assert!(!a.is_alive());
        assert!(a.upgrade().is_none());
        assert!(b.is_alive());
        assert_eq!(dropped.load(Ordering::SeqCst), 1);

        drop(kept);
        assert_eq!(dropped.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn lifetime_display_succeeds() {
        assert_eq!(Lifetime::Singleton.to_string(), "Singleton");
        assert_eq!(Lifetime::Transient.to_string(), "Transient");
        assert_eq!(Lifetime::Scoped.to_string(), "Scoped");
    }
}
