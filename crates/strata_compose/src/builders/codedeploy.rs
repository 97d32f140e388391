//! Deployment group and application builders.

use tracing::debug;

use strata_model::{CfnValue, Document, Handle, Resource};
use strata_settings::Settings;

use crate::builders::iam;
use crate::error::ComposeResult;
use crate::naming::derive;

/// Deployment group targeting the scaling group's instances.
///
/// The application, service role, and authenticating user come from the
/// network stack's exports via settings.
pub fn deployment_group(
    doc: &mut Document,
    settings: &Settings,
    group: &Handle,
) -> ComposeResult<Handle> {
    let (id, _tags) = derive(settings, "cd_deploymentgroup")?;

    debug!("Adding deployment group {id}");
    let resource = Resource::new(id, "AWS::CodeDeploy::DeploymentGroup")
        .prop("ApplicationName", settings.string("cd_application")?)
        .prop("AutoScalingGroups", CfnValue::List(vec![group.reference()]))
        .prop(
            "DeploymentConfigName",
            settings.string("cd_deploymentgroup.configname")?,
        )
        .prop(
            "DeploymentGroupName",
            settings.string("cd_deploymentgroup.name")?,
        )
        .prop("ServiceRoleArn", settings.string("cd_role_arn")?);
    Ok(doc.add_resource(resource)?)
}

/// One CodeDeploy application per configured name, each with its
/// service role and deploy user.
///
/// Identifiers and export names carry the element index, so identity is
/// fixed by list position; reordering the list replaces the resources.
pub fn applications(doc: &mut Document, settings: &Settings) -> ComposeResult<()> {
    let (base_id, _tags) = derive(settings, "cd_application")?;

    for (index, name) in settings.list("cd_application.names")?.iter().enumerate() {
        debug!("Adding deploy application {name}");
        let application = doc.add_resource(
            Resource::new(base_id.indexed(index), "AWS::CodeDeploy::Application")
                .prop("ApplicationName", name.as_str()),
        )?;
        doc.add_output(format!("CDApp{index}"), application.reference())?;

        let role = iam::codedeploy_service_role(doc, name)?;
        doc.add_output(format!("CDRole{index}"), role.reference())?;

        let user = iam::codedeploy_user(doc, name)?;
        doc.add_output(format!("CDUser{index}"), user.reference())?;
    }
    Ok(())
}
