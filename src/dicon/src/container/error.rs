use std::error::Error;
use std::sync::Arc;

use snafu::prelude::*;

use crate::key::ServiceKey;
use crate::scope::Lifetime;

#[derive(Debug, Clone, Snafu)]
#[non_exhaustive]
#[snafu(visibility(pub(crate)))]
pub enum ContainerError {
    #[snafu(display("the key {key} is already registered as a {lifetime} service"))]
    #[non_exhaustive]
    DuplicateRegistration { key: ServiceKey, lifetime: Lifetime },
    #[snafu(display("could not find any {lifetime} service registered as {key}"))]
    #[non_exhaustive]
    ServiceNotRegistered { key: ServiceKey, lifetime: Lifetime },
    #[snafu(display("could not construct the service {key}"))]
    #[non_exhaustive]
    ObjectConstruction {
        key: ServiceKey,
        source: Arc<dyn Error + Send + Sync>,
    },
    #[snafu(display("a global container has already been installed"))]
    GlobalAlreadyInstalled {},
    #[snafu(display("no global container is installed"))]
    GlobalNotInstalled {},
}

impl ContainerError {
    /// Returns the key the error is about, if any.
    pub fn key(&self) -> Option<&ServiceKey> {
        match self {
            Self::DuplicateRegistration { key, .. }
            | Self::ServiceNotRegistered { key, .. }
            | Self::ObjectConstruction { key, .. } => Some(key),
            Self::GlobalAlreadyInstalled {} | Self::GlobalNotInstalled {} => None,
        }
    }
}
