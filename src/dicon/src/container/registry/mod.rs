mod holder;
mod partition;

use parking_lot::RwLock;

use crate::scope::Lifetime;

pub(crate) use holder::{ErasedHolder, FactoryHolder, SingletonHolder};
pub(crate) use partition::Partition;

/// The three independent partitions of a container, one per [`Lifetime`],
/// each guarded by its own lock.
#[derive(Debug)]
pub(crate) struct Registry {
    singleton: RwLock<Partition>,
    transient: RwLock<Partition>,
    scoped: RwLock<Partition>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            singleton: RwLock::new(Partition::new(Lifetime::Singleton)),
            transient: RwLock::new(Partition::new(Lifetime::Transient)),
            scoped: RwLock::new(Partition::new(Lifetime::Scoped)),
        }
    }

    pub fn partition(&self, lifetime: Lifetime) -> &RwLock<Partition> {
        match lifetime {
            Lifetime::Singleton => &self.singleton,
            Lifetime::Transient => &self.transient,
            Lifetime::Scoped => &self.scoped,
        }
    }
}
