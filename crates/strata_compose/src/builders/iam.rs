//! IAM role, instance-profile, user, and policy builders.
//!
//! Roles, profiles, users, and managed policies do not support tags in
//! the provisioning schema, so the tag half of the derivation goes
//! unused here.

use tracing::debug;

use strata_model::{CfnValue, Document, Handle, LogicalId, Resource};
use strata_settings::Settings;

use crate::arn;
use crate::error::ComposeResult;
use crate::naming::derive;

const S3_READONLY_ARN: &str = "arn:aws:iam::aws:policy/AmazonS3ReadOnlyAccess";
const CODEDEPLOY_SERVICE_ARN: &str = "arn:aws:iam::aws:policy/service-role/AWSCodeDeployRole";

/// Allow statement over literal action and resource lists.
fn allow_statement(actions: &[&str], resources: Vec<CfnValue>) -> CfnValue {
    CfnValue::map([
        ("Action", CfnValue::strings(actions.iter().copied())),
        ("Effect", "Allow".into()),
        ("Resource", CfnValue::List(resources)),
    ])
}

/// Trust policy letting one service principal assume the role.
fn service_trust_policy(service: &str, sid: &LogicalId) -> CfnValue {
    CfnValue::map([(
        "Statement",
        CfnValue::List(vec![CfnValue::map([
            ("Action", CfnValue::strings(["sts:AssumeRole"])),
            ("Effect", "Allow".into()),
            ("Principal", CfnValue::map([("Service", service.into())])),
            ("Sid", sid.as_str().into()),
        ])]),
    )])
}

/// Instance role letting EC2 read deploy artifacts from the code bucket.
pub fn instance_role(doc: &mut Document, settings: &Settings) -> ComposeResult<Handle> {
    let (id, _tags) = derive(settings, "role")?;
    let bucket = settings.string("s3.bucket")?;

    let inline_policy = CfnValue::map([
        (
            "PolicyDocument",
            CfnValue::map([(
                "Statement",
                CfnValue::List(vec![allow_statement(
                    &["s3:GetObject", "s3:ListBucket"],
                    vec![
                        arn::s3(bucket).into(),
                        arn::s3(&format!("{bucket}/*")).into(),
                    ],
                )]),
            )]),
        ),
        ("PolicyName", format!("{id}Policy").into()),
    ]);

    debug!("Adding instance role {id}");
    let resource = Resource::new(id.clone(), "AWS::IAM::Role")
        .prop(
            "AssumeRolePolicyDocument",
            service_trust_policy("ec2.amazonaws.com", &id),
        )
        .prop("ManagedPolicyArns", CfnValue::strings([S3_READONLY_ARN]))
        .prop("Path", "/")
        .prop("Policies", CfnValue::List(vec![inline_policy]));
    Ok(doc.add_resource(resource)?)
}

/// Instance profile wrapping the instance role.
pub fn instance_profile(
    doc: &mut Document,
    settings: &Settings,
    role: &Handle,
) -> ComposeResult<Handle> {
    let (id, _tags) = derive(settings, "profile")?;
    let resource = Resource::new(id, "AWS::IAM::InstanceProfile")
        .prop("Path", "/")
        .prop("Roles", CfnValue::List(vec![role.reference()]));
    Ok(doc.add_resource(resource)?)
}

/// Service role the deployment service assumes for one application.
pub fn codedeploy_service_role(doc: &mut Document, application: &str) -> ComposeResult<Handle> {
    let id = LogicalId::new(format!("{application}CDRole"));
    debug!("Adding deploy service role {id}");
    let resource = Resource::new(id.clone(), "AWS::IAM::Role")
        .prop(
            "AssumeRolePolicyDocument",
            service_trust_policy("codedeploy.amazonaws.com", &id),
        )
        .prop(
            "ManagedPolicyArns",
            CfnValue::strings([CODEDEPLOY_SERVICE_ARN]),
        )
        .prop("Path", "/");
    Ok(doc.add_resource(resource)?)
}

/// IAM user the deployment pipeline authenticates as for one application.
///
/// The user carries no policy here; the application stack attaches the
/// release policy to it once the deployment group exists.
pub fn codedeploy_user(doc: &mut Document, application: &str) -> ComposeResult<Handle> {
    let id = LogicalId::new(format!("{application}CDUser"));
    Ok(doc.add_resource(Resource::new(id, "AWS::IAM::User"))?)
}

/// Managed policy granting the deploy user exactly the release workflow:
/// upload the bundle, register the revision, run and inspect the
/// deployment.
pub fn deploy_user_policy(doc: &mut Document, settings: &Settings) -> ComposeResult<Handle> {
    let (id, _tags) = derive(settings, "cd_user_policy")?;
    let region = settings.string("region")?;
    let account = settings.string("account")?;
    let bucket = settings.string("s3.bucket")?;
    let application = settings.string("cd_application")?;
    let config_name = settings.string("cd_deploymentgroup.configname")?;

    let application_arn = format!("application:{application}");
    let group_arn = format!("deploymentgroup:{application}");
    let config_arn = format!("deploymentconfig:{config_name}");

    let statements = vec![
        allow_statement(
            &["s3:PutObject"],
            vec![arn::s3(&format!("{bucket}/{application}/*")).into()],
        ),
        allow_statement(
            &[
                "codedeploy:RegisterApplicationRevision",
                "codedeploy:GetApplicationRevision",
            ],
            vec![
                arn::codedeploy(region, account, &application_arn).into(),
                arn::codedeploy(region, account, &format!("{application_arn}/*")).into(),
            ],
        ),
        allow_statement(
            &["codedeploy:CreateDeployment", "codedeploy:GetDeployment"],
            vec![arn::codedeploy(region, account, &format!("{group_arn}/*")).into()],
        ),
        allow_statement(
            &["codedeploy:GetDeploymentConfig"],
            vec![arn::codedeploy(region, account, &config_arn).into()],
        ),
    ];

    debug!("Adding deploy user policy {id}");
    let resource = Resource::new(id, "AWS::IAM::ManagedPolicy")
        .prop(
            "PolicyDocument",
            CfnValue::map([
                ("Statement", CfnValue::List(statements)),
                ("Version", "2012-10-17".into()),
            ]),
        )
        .prop(
            "Users",
            CfnValue::strings([settings.string("cd_iam_user")?]),
        );
    Ok(doc.add_resource(resource)?)
}
