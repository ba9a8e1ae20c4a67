#![allow(clippy::new_without_default)]

pub mod container;
pub mod global;
pub mod key;
pub mod module;
pub mod provider;
pub mod scope;
mod util;

pub use dicon_derive::component;

pub mod prelude {
    pub use crate::component;
    pub use crate::container::{Container, ContainerError, Interface};
    pub use crate::key::ServiceKey;
    pub use crate::module::{bind, Configuration, Module};
    pub use crate::provider::component::{Component, Provides};
    pub use crate::scope::{Lifetime, Scope, ScopedRef};
}
