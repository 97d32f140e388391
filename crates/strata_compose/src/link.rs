//! Linking network-stack outputs to application-stack settings.
//!
//! The network document exports identifiers (VPC, subnets, security
//! groups, bucket domain, per-application deploy role and user) that a
//! dependent application document imports through its settings. The
//! linker owns that mapping: given the resolved output values of an
//! applied network stack, it produces the `config:aws` fragment to
//! merge into the application's environment file.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ComposeError, ComposeResult};

/// One exported output consumed by a dependent document's settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputBinding {
    /// Output name in the network document.
    pub output: String,
    /// Settings key the value lands under in the application document.
    pub settings_key: String,
    /// Whether application composition needs the value.
    pub required: bool,
}

impl OutputBinding {
    fn required(output: impl Into<String>, settings_key: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            settings_key: settings_key.into(),
            required: true,
        }
    }

    fn optional(output: impl Into<String>, settings_key: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            settings_key: settings_key.into(),
            required: false,
        }
    }
}

/// Linker mapping network exports onto application settings keys.
#[derive(Debug, Default)]
pub struct StackLinker {
    bindings: Vec<OutputBinding>,
}

impl StackLinker {
    pub fn new() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// Bindings for the shared network exports.
    pub fn with_network_bindings(mut self) -> Self {
        self.bindings.extend(vec![
            OutputBinding::required("VpcId", "vpc_id"),
            OutputBinding::required("SGSSH", "sg_ssh"),
            OutputBinding::required("SGELB", "sg_elb"),
            OutputBinding::required("PublicSubnet", "pub_subnet_id"),
            OutputBinding::required("AppSubnet", "app_subnet_id"),
            OutputBinding::optional("S3BucketDomain", "s3.domain"),
        ]);
        self
    }

    /// Bindings for one application's deploy resources, selected by its
    /// position in the network stack's application list.
    pub fn with_application_bindings(mut self, index: usize) -> Self {
        self.bindings.extend(vec![
            OutputBinding::required(format!("CDRole{index}"), "cd_role_arn"),
            OutputBinding::required(format!("CDUser{index}"), "cd_iam_user"),
        ]);
        self
    }

    pub fn bindings(&self) -> &[OutputBinding] {
        &self.bindings
    }

    /// Build the `config:aws` fragment for a dependent application
    /// document from resolved output values.
    pub fn settings_fragment(
        &self,
        values: &BTreeMap<String, String>,
    ) -> ComposeResult<BTreeMap<String, String>> {
        let mut fragment = BTreeMap::new();
        for binding in &self.bindings {
            match values.get(&binding.output) {
                Some(value) => {
                    fragment.insert(binding.settings_key.clone(), value.clone());
                }
                None if binding.required => {
                    return Err(ComposeError::MissingOutput(binding.output.clone()));
                }
                None => debug!("Skipping absent optional output {}", binding.output),
            }
        }
        Ok(fragment)
    }

    /// Render the fragment as a YAML section ready to merge into an
    /// environment file.
    pub fn to_yaml(&self, values: &BTreeMap<String, String>) -> ComposeResult<String> {
        let fragment = self.settings_fragment(values)?;
        let mut sections = BTreeMap::new();
        sections.insert("config:aws".to_string(), fragment);
        Ok(serde_yaml::to_string(&sections)?)
    }
}
