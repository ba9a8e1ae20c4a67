use std::any::TypeId;
use std::collections::HashMap;
use std::sync::Arc;

use crate::container::registry::holder::ErasedHolder;
use crate::container::ContainerError;
use crate::key::ServiceKey;
use crate::scope::Lifetime;

/// The holders of one lifetime, keyed by interface type and then by tag.
#[derive(Debug)]
pub struct Partition {
    lifetime: Lifetime,
    holders: HashMap<TypeId, HashMap<String, Arc<dyn ErasedHolder>>>,
}

impl Partition {
    pub fn new(lifetime: Lifetime) -> Self {
        Self {
            lifetime,
            holders: HashMap::new(),
        }
    }

    pub fn contains(&self, key: &ServiceKey) -> bool {
        self.get(key).is_some()
    }

    pub fn get(&self, key: &ServiceKey) -> Option<Arc<dyn ErasedHolder>> {
        self.holders
            .get(&key.type_id())
            .and_then(|slot| slot.get(key.tag()))
            .map(Arc::clone)
    }

    /// Inserts `holder` under `key` unless the key is already taken, in which
    /// case the partition is left as it was.
    pub fn insert(
        &mut self,
        key: ServiceKey,
        holder: Arc<dyn ErasedHolder>,
    ) -> Result<(), ContainerError> {
        let slot = self.holders.entry(key.type_id()).or_default();
        if slot.contains_key(key.tag()) {
            return Err(ContainerError::DuplicateRegistration {
                key,
                lifetime: self.lifetime,
            });
        }
        slot.insert(key.tag().to_owned(), holder);
        Ok(())
    }

    pub fn tags(&self, type_id: TypeId) -> Vec<String> {
        let mut tags: Vec<_> = self
            .holders
            .get(&type_id)
            .map(|slot| slot.keys().cloned().collect())
            .unwrap_or_default();
        tags.sort_unstable();
        tags
    }

    pub fn len(&self) -> usize {
        self.holders.values().map(HashMap::len).sum()
    }
}
