//! Alarm builders.
//!
//! Alarms do not support tags in the provisioning schema.

use tracing::debug;

use strata_model::{CfnValue, Document, Handle, Resource};
use strata_settings::Settings;

use crate::error::ComposeResult;
use crate::naming::derive;

fn dimension(name: &str, value: CfnValue) -> CfnValue {
    CfnValue::map([("Name", name.into()), ("Value", value)])
}

/// Scale up on sustained high CPU; a dead instance drops the metric,
/// which also trips the comparison.
pub fn cpu_high_alarm(
    doc: &mut Document,
    settings: &Settings,
    group: &Handle,
    scale_up: &Handle,
) -> ComposeResult<Handle> {
    let (id, _tags) = derive(settings, "alarm_high")?;
    debug!("Adding alarm {id}");
    let resource = Resource::new(id, "AWS::CloudWatch::Alarm")
        .prop("AlarmActions", CfnValue::List(vec![scale_up.reference()]))
        .prop("AlarmDescription", "CPU high or missing due to dead instance")
        .prop("ComparisonOperator", "GreaterThanThreshold")
        .prop(
            "Dimensions",
            CfnValue::List(vec![dimension("AutoScalingGroupName", group.reference())]),
        )
        .prop("EvaluationPeriods", 3)
        .prop("MetricName", "CPUUtilization")
        .prop("Namespace", "AWS/EC2")
        .prop("Period", 60)
        .prop("Statistic", "Average")
        .prop("Threshold", settings.integer("alarm_high.threshold")?);
    Ok(doc.add_resource(resource)?)
}

/// Scale down after a long stretch of low CPU.
pub fn cpu_low_alarm(
    doc: &mut Document,
    settings: &Settings,
    group: &Handle,
    scale_down: &Handle,
) -> ComposeResult<Handle> {
    let (id, _tags) = derive(settings, "alarm_low")?;
    debug!("Adding alarm {id}");
    let resource = Resource::new(id, "AWS::CloudWatch::Alarm")
        .prop("AlarmActions", CfnValue::List(vec![scale_down.reference()]))
        .prop("AlarmDescription", "CPU low")
        .prop("ComparisonOperator", "LessThanThreshold")
        .prop(
            "Dimensions",
            CfnValue::List(vec![dimension("AutoScalingGroupName", group.reference())]),
        )
        .prop("EvaluationPeriods", 40)
        .prop("MetricName", "CPUUtilization")
        .prop("Namespace", "AWS/EC2")
        .prop("Period", 60)
        .prop("Statistic", "Average")
        .prop("Threshold", settings.integer("alarm_low.threshold")?);
    Ok(doc.add_resource(resource)?)
}

/// Notify the topic whenever the load balancer's healthy-host minimum
/// drops below the threshold during the sample period.
pub fn lb_empty_alarm(
    doc: &mut Document,
    settings: &Settings,
    load_balancer: &Handle,
    topic: &Handle,
) -> ComposeResult<Handle> {
    let (id, _tags) = derive(settings, "alarm_elb_empty")?;
    debug!("Adding alarm {id}");
    let resource = Resource::new(id, "AWS::CloudWatch::Alarm")
        .prop("AlarmActions", CfnValue::List(vec![topic.reference()]))
        .prop("AlarmDescription", "Load balancer HealthyHostCount below threshold")
        .prop("ComparisonOperator", "LessThanThreshold")
        .prop(
            "Dimensions",
            CfnValue::List(vec![dimension("LoadBalancerName", load_balancer.reference())]),
        )
        .prop("EvaluationPeriods", 1)
        .prop("MetricName", "HealthyHostCount")
        .prop("Namespace", "AWS/ELB")
        .prop("Period", 300)
        .prop("Statistic", "Minimum")
        .prop("Threshold", settings.integer("alarm_elb_empty.threshold")?);
    Ok(doc.add_resource(resource)?)
}
