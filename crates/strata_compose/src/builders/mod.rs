//! Resource builders, one module per service family.
//!
//! Every builder takes the document under assembly, the environment
//! settings, and explicit handles of the siblings it references. It
//! registers exactly one resource (or one per configured list element),
//! then returns the handle later builders use for `Ref`/`GetAtt`
//! wiring. Builders read only the settings keys scoped to their
//! component and mutate nothing but the document.

pub mod autoscaling;
pub mod cloudwatch;
pub mod codedeploy;
pub mod ec2;
pub mod elb;
pub mod iam;
pub mod route53;
pub mod s3;
pub mod sns;
