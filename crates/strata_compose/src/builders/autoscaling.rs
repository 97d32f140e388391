//! Launch configuration, scaling group, and scaling policy builders.
//!
//! The launch configuration and scaling group each come in two mutually
//! exclusive variants; the topology selector invokes exactly one of
//! each pair per run.

use tracing::debug;

use strata_model::{CfnValue, Document, Handle, Resource};
use strata_settings::Settings;

use crate::error::ComposeResult;
use crate::naming::derive;

/// Shell bootstrap installing the deploy agent on first boot.
const BOOTSTRAP: &[&str] = &[
    "#!/bin/bash -xe\n",
    "apt-get update\n",
    "apt-get install -y python-pip ruby\n",
    "pip install awscli\n",
    "cd /home/ubuntu\n",
    "aws s3 cp s3://aws-codedeploy-us-east-1/latest/install . --region us-east-1\n",
    "chmod +x ./install\n",
    "./install auto\n",
];

/// Instance lifecycle events forwarded to the notification topic.
const LIFECYCLE_EVENTS: &[&str] = &[
    "autoscaling:EC2_INSTANCE_LAUNCH",
    "autoscaling:EC2_INSTANCE_LAUNCH_ERROR",
    "autoscaling:EC2_INSTANCE_TERMINATE",
    "autoscaling:EC2_INSTANCE_TERMINATE_ERROR",
];

fn user_data() -> CfnValue {
    CfnValue::base64(CfnValue::Join(
        String::new(),
        BOOTSTRAP.iter().map(|line| (*line).into()).collect(),
    ))
}

fn launch_config(
    doc: &mut Document,
    settings: &Settings,
    profile: &Handle,
    security_groups: Vec<CfnValue>,
) -> ComposeResult<Handle> {
    let (id, _tags) = derive(settings, "launchconfig")?;
    debug!("Adding launch configuration {id}");
    let resource = Resource::new(id, "AWS::AutoScaling::LaunchConfiguration")
        .prop("AssociatePublicIpAddress", true)
        .prop("IamInstanceProfile", profile.reference())
        .prop("ImageId", settings.string("launchconfig.image_id")?)
        // Detailed monitoring is billed per instance; basic is enough.
        .prop("InstanceMonitoring", false)
        .prop("InstanceType", settings.string("launchconfig.instance_type")?)
        .prop("KeyName", settings.string("launchconfig.key_name")?)
        .prop("SecurityGroups", CfnValue::List(security_groups))
        .prop("UserData", user_data());
    Ok(doc.add_resource(resource)?)
}

/// Production launch configuration: traffic reaches instances only
/// through the load balancer, so the edge security group stays off.
pub fn launch_config_behind_lb(
    doc: &mut Document,
    settings: &Settings,
    profile: &Handle,
    app_sg: &Handle,
) -> ComposeResult<Handle> {
    let groups = vec![settings.string("sg_ssh")?.into(), app_sg.reference()];
    launch_config(doc, settings, profile, groups)
}

/// Non-production launch configuration: no load balancer exists, so the
/// edge security group is attached for direct access.
pub fn launch_config_direct(
    doc: &mut Document,
    settings: &Settings,
    profile: &Handle,
    app_sg: &Handle,
) -> ComposeResult<Handle> {
    let groups = vec![
        settings.string("sg_ssh")?.into(),
        settings.string("sg_elb")?.into(),
        app_sg.reference(),
    ];
    launch_config(doc, settings, profile, groups)
}

fn scaling_group(
    settings: &Settings,
    launch_config: &Handle,
    topic: &Handle,
) -> ComposeResult<Resource> {
    let (id, tags) = derive(settings, "asg")?;
    let scale_min = settings.integer("asg.scale_min")?;
    Ok(Resource::new(id, "AWS::AutoScaling::AutoScalingGroup")
        .prop("Cooldown", settings.integer("asg.cooldown")?)
        .prop("DesiredCapacity", scale_min)
        .prop("HealthCheckGracePeriod", settings.integer("asg.health_grace")?)
        .prop("LaunchConfigurationName", launch_config.reference())
        .prop("MaxSize", settings.integer("asg.scale_max")?)
        .prop("MinSize", scale_min)
        .prop(
            "NotificationConfigurations",
            CfnValue::List(vec![CfnValue::map([
                (
                    "NotificationTypes",
                    CfnValue::strings(LIFECYCLE_EVENTS.iter().copied()),
                ),
                ("TopicARN", topic.reference()),
            ])]),
        )
        .prop(
            "VPCZoneIdentifier",
            CfnValue::strings([settings.string("app_subnet_id")?]),
        )
        .prop("Tags", tags.to_propagating_value()))
}

/// Production scaling group: attached to the load balancer and
/// health-checked through it.
pub fn scaling_group_with_lb(
    doc: &mut Document,
    settings: &Settings,
    launch_config: &Handle,
    load_balancer: &Handle,
    topic: &Handle,
) -> ComposeResult<Handle> {
    let resource = scaling_group(settings, launch_config, topic)?
        .prop("HealthCheckType", "ELB")
        .prop("LoadBalancerNames", CfnValue::List(vec![load_balancer.reference()]));
    debug!("Adding scaling group {}", resource.logical_id());
    Ok(doc.add_resource(resource)?)
}

/// Non-production scaling group: no load balancer, instance-level
/// health checks.
pub fn scaling_group_direct(
    doc: &mut Document,
    settings: &Settings,
    launch_config: &Handle,
    topic: &Handle,
) -> ComposeResult<Handle> {
    let resource = scaling_group(settings, launch_config, topic)?.prop("HealthCheckType", "EC2");
    debug!("Adding scaling group {}", resource.logical_id());
    Ok(doc.add_resource(resource)?)
}

fn scaling_policy(
    doc: &mut Document,
    settings: &Settings,
    component: &str,
    group: &Handle,
    adjustment: i64,
) -> ComposeResult<Handle> {
    let (id, _tags) = derive(settings, component)?;
    let resource = Resource::new(id, "AWS::AutoScaling::ScalingPolicy")
        .prop("AdjustmentType", "ChangeInCapacity")
        .prop("AutoScalingGroupName", group.reference())
        .prop("Cooldown", settings.integer(&format!("{component}.cooldown"))?)
        .prop("ScalingAdjustment", adjustment)
        .depends_on(group.id());
    Ok(doc.add_resource(resource)?)
}

/// Add one instance when the high-CPU alarm fires.
pub fn scale_up_policy(
    doc: &mut Document,
    settings: &Settings,
    group: &Handle,
) -> ComposeResult<Handle> {
    scaling_policy(doc, settings, "scale_up_policy", group, 1)
}

/// Remove one instance when the low-CPU alarm fires.
pub fn scale_down_policy(
    doc: &mut Document,
    settings: &Settings,
    group: &Handle,
) -> ComposeResult<Handle> {
    scaling_policy(doc, settings, "scale_down_policy", group, -1)
}
