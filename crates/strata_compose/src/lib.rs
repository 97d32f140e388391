//! # strata_compose
//!
//! The infrastructure composition engine: derives stable logical
//! identifiers and tags from environment settings, builds every
//! resource declaration with explicit cross-references to already-built
//! siblings, selects the topology for the environment class, and
//! assembles one ordered, acyclic document per stack.
//!
//! ## Stacks
//!
//! - **Application stack** ([`AppStack`]): security group, instance
//!   role/profile, notification topic, launch configuration and scaling
//!   group (production adds a load balancer, its alarm, and DNS
//!   records), scaling policies, CPU alarms, origin DNS record, and the
//!   CodeDeploy deployment group with its deploy-user policy.
//! - **Network stack** ([`NetworkStack`]): VPC, security groups,
//!   internet gateway and routing, subnets, code bucket, hosted zones,
//!   and per-application CodeDeploy resources, with outputs exported
//!   for dependent application documents.
//!
//! ## Example
//!
//! ```rust,no_run
//! use strata_compose::AppStack;
//! use strata_settings::SettingsLoader;
//!
//! let settings = SettingsLoader::from_file("prod.yaml").unwrap();
//! let document = AppStack::compose(&settings).unwrap();
//! println!("{}", document.to_json().unwrap());
//! ```

pub mod arn;
pub mod builders;
pub mod error;
pub mod link;
pub mod naming;
pub mod network;
pub mod schema;
pub mod topology;

pub use error::{ComposeError, ComposeResult};
pub use link::{OutputBinding, StackLinker};
pub use naming::derive;
pub use network::NetworkStack;
pub use topology::{AppStack, EnvClass};
