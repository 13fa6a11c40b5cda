//! New Relic Deployment Notifier Library
//!
//! Records application deployments in New Relic APM on behalf of a
//! configuration-management host.
//!
//! The target application is given either by id or by name. A name is resolved
//! with one lookup call, then the deployment marker is created with a second.
//! Tests are included in the module files.

pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod module;
pub mod notifier;
pub mod observability;
pub mod request;

pub use client::{NewRelicApi, NewRelicREST};
pub use config::NotifierConfig;
pub use error::{ApiStage, NotifyError};
pub use module::{ModuleInvocation, ModuleResult};
pub use notifier::{DeploymentNotifier, DeploymentOutcome, RunMode};
pub use request::{AppTarget, DeploymentParams, DeploymentRequest};
