use std::any::{self, TypeId};
use std::fmt::{Debug, Display, Formatter, Result as FmtResult};
use std::hash::{Hash, Hasher};

/// The tag used when a registration or resolution doesn't name one.
pub const DEFAULT_TAG: &str = "";

/// The identity under which a service is registered and resolved.
///
/// A [`ServiceKey`] is made of the [`TypeId`] of the requested interface and a
/// free-form tag. Two keys are equal iff both parts are equal; the type name
/// is only carried around for diagnostics and never takes part in comparison,
/// since it is not guaranteed to be unique or stable.
///
/// # Examples
///
/// ```rust
/// # use dicon::key::ServiceKey;
/// trait Database: Send + Sync {}
///
/// let mysql = ServiceKey::of::<dyn Database>("MySQL");
/// assert_eq!(mysql, ServiceKey::of::<dyn Database>("MySQL"));
/// assert_ne!(mysql, ServiceKey::of::<dyn Database>("PostgreSQL"));
/// assert_ne!(mysql, ServiceKey::of::<i32>("MySQL"));
/// ```
#[derive(Clone)]
pub struct ServiceKey {
    type_id: TypeId,
    type_name: &'static str,
    tag: String,
}

impl ServiceKey {
    /// Creates the key of interface `I` under `tag`.
    pub fn of<I>(tag: &str) -> Self
    where
        I: ?Sized + 'static,
    {
        Self {
            type_id: TypeId::of::<I>(),
            type_name: any::type_name::<I>(),
            tag: tag.to_owned(),
        }
    }

    /// Creates the key of interface `I` under [`DEFAULT_TAG`].
    pub fn untagged<I>() -> Self
    where
        I: ?Sized + 'static,
    {
        Self::of::<I>(DEFAULT_TAG)
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn is_untagged(&self) -> bool {
        self.tag == DEFAULT_TAG
    }
}

impl PartialEq for ServiceKey {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id && self.tag == other.tag
    }
}

impl Eq for ServiceKey {}

impl Hash for ServiceKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
        self.tag.hash(state);
    }
}

impl Debug for ServiceKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(self, f)
    }
}

impl Display for ServiceKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        if self.is_untagged() {
            write!(f, "{}", self.type_name)
        } else {
            write!(f, "{}@{:?}", self.type_name, self.tag)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    trait Database: Send + Sync {}

    #[test]
    fn service_key_eq_succeeds() {
        let untagged = ServiceKey::untagged::<dyn Database>();
        let mysql = ServiceKey::of::<dyn Database>("MySQL");
        let postgres = ServiceKey::of::<dyn Database>("PostgreSQL");

        assert_eq!(untagged, ServiceKey::of::<dyn Database>(DEFAULT_TAG));
        assert_ne!(untagged, mysql);
        assert_ne!(mysql, postgres);
        assert_ne!(mysql, ServiceKey::of::<i32>("MySQL"));
    }

    #[test]
    fn service_key_hash_agrees_with_eq() {
        let mut keys = HashSet::new();
        assert!(keys.insert(ServiceKey::of::<dyn Database>("MySQL")));
        assert!(keys.insert(ServiceKey::of::<dyn Database>("PostgreSQL")));
        assert!(!keys.insert(ServiceKey::of::<dyn Database>("MySQL")));
        assert!(keys.contains(&ServiceKey::of::<dyn Database>("PostgreSQL")));
    }

    #[test]
    fn service_key_display_succeeds() {
        let untagged = ServiceKey::untagged::<i32>();
        let tagged = ServiceKey::of::<i32>("answer");

        assert!(untagged.is_untagged());
        assert_eq!(untagged.to_string(), "i32");
        assert_eq!(tagged.to_string(), "i32@\"answer\"");
        assert_eq!(tagged.tag(), "answer");
        assert_eq!(tagged.type_id(), TypeId::of::<i32>());
    }
}
