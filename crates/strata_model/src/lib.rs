//! # strata_model
//!
//! Stack document model for Strata: logical identifiers, tags, property
//! value trees with provisioning-engine intrinsics, resource
//! declarations, and the document assembler with deterministic JSON
//! serialization.
//!
//! ## Features
//!
//! - **LogicalId**: alphanumeric-only identifiers, stable across runs
//! - **CfnValue**: literals plus `Ref`, `Fn::GetAtt`, `Fn::Join`,
//!   `Fn::Base64` intrinsic forms
//! - **Document**: resources and outputs in declaration order, duplicate
//!   identifiers rejected, pretty JSON on demand
//!
//! ## Example
//!
//! ```rust
//! use strata_model::{CfnValue, Document, LogicalId, Resource};
//!
//! let mut doc = Document::new("Example stack");
//! let bucket = doc
//!     .add_resource(
//!         Resource::new(LogicalId::new("AcmeBucket"), "AWS::S3::Bucket")
//!             .prop("BucketName", "code.example.com"),
//!     )
//!     .unwrap();
//! doc.add_output("BucketId", bucket.reference()).unwrap();
//! println!("{}", doc.to_json().unwrap());
//! ```

pub mod document;
pub mod error;
pub mod id;
pub mod resource;
pub mod tags;
pub mod value;

pub use document::{Document, Output, FORMAT_VERSION};
pub use error::{ModelError, ModelResult};
pub use id::LogicalId;
pub use resource::{Handle, Resource};
pub use tags::TagSet;
pub use value::CfnValue;
