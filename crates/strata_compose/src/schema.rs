//! Recognized settings keys per stack topology.
//!
//! Each table enumerates the dotted keys a topology's builders read, so
//! a misconfigured environment fails in one validation pass instead of
//! partway through the builder sequence.

use strata_settings::{KeySpec, ValueKind};

use crate::topology::EnvClass;

/// Keys every stack needs.
const COMMON_KEYS: &[KeySpec] = &[
    KeySpec::required("app", ValueKind::String),
    KeySpec::required("env", ValueKind::String),
];

/// Keys the application stack reads in every environment class.
const APP_BASE_KEYS: &[KeySpec] = &[
    KeySpec::required("account", ValueKind::String),
    KeySpec::required("region", ValueKind::String),
    // Imported from the network stack's exports.
    KeySpec::required("vpc_id", ValueKind::String),
    KeySpec::required("sg_ssh", ValueKind::String),
    KeySpec::required("sg_elb", ValueKind::String),
    KeySpec::required("app_subnet_id", ValueKind::String),
    KeySpec::required("sg_app.name", ValueKind::String),
    KeySpec::required("sg_app.desc", ValueKind::String),
    KeySpec::required("sg_app.ports", ValueKind::IntegerList),
    KeySpec::required("role.name", ValueKind::String),
    KeySpec::required("profile.name", ValueKind::String),
    KeySpec::required("s3.bucket", ValueKind::String),
    KeySpec::required("sns.name", ValueKind::String),
    KeySpec::required("sns.emails", ValueKind::CommaList),
    KeySpec::required("launchconfig.name", ValueKind::String),
    KeySpec::required("launchconfig.image_id", ValueKind::String),
    KeySpec::required("launchconfig.instance_type", ValueKind::String),
    KeySpec::required("launchconfig.key_name", ValueKind::String),
    KeySpec::required("asg.name", ValueKind::String),
    KeySpec::required("asg.cooldown", ValueKind::Integer),
    KeySpec::required("asg.health_grace", ValueKind::Integer),
    KeySpec::required("asg.scale_min", ValueKind::Integer),
    KeySpec::required("asg.scale_max", ValueKind::Integer),
    KeySpec::required("scale_up_policy.name", ValueKind::String),
    KeySpec::required("scale_up_policy.cooldown", ValueKind::Integer),
    KeySpec::required("scale_down_policy.name", ValueKind::String),
    KeySpec::required("scale_down_policy.cooldown", ValueKind::Integer),
    KeySpec::required("alarm_high.name", ValueKind::String),
    KeySpec::required("alarm_high.threshold", ValueKind::Integer),
    KeySpec::required("alarm_low.name", ValueKind::String),
    KeySpec::required("alarm_low.threshold", ValueKind::Integer),
    KeySpec::required("dns.zone", ValueKind::String),
    KeySpec::required("dns.ttl", ValueKind::Integer),
    KeySpec::required("dns_origin.name", ValueKind::String),
    KeySpec::required("dns_origin.record", ValueKind::String),
    KeySpec::required("dns_origin.ip", ValueKind::String),
    KeySpec::required("cd_application", ValueKind::String),
    KeySpec::required("cd_role_arn", ValueKind::String),
    KeySpec::required("cd_iam_user", ValueKind::String),
    KeySpec::required("cd_deploymentgroup.name", ValueKind::String),
    KeySpec::required("cd_deploymentgroup.configname", ValueKind::String),
    KeySpec::required("cd_user_policy.name", ValueKind::String),
];

/// Keys only the production topology reads.
const APP_PRODUCTION_KEYS: &[KeySpec] = &[
    KeySpec::required("pub_subnet_id", ValueKind::String),
    KeySpec::required("elb.name", ValueKind::String),
    KeySpec::required("elb.ssl_id", ValueKind::String),
    KeySpec::required("alarm_elb_empty.name", ValueKind::String),
    KeySpec::required("alarm_elb_empty.threshold", ValueKind::Integer),
    KeySpec::required("dns.name", ValueKind::String),
    KeySpec::required("dns.record", ValueKind::String),
    KeySpec::required("dns2.name", ValueKind::String),
    KeySpec::required("dns2.record", ValueKind::String),
];

/// Keys the network stack reads.
const NETWORK_KEYS: &[KeySpec] = &[
    KeySpec::required("vpc.name", ValueKind::String),
    KeySpec::required("vpc.cidr_block", ValueKind::String),
    KeySpec::required("sg_ssh.name", ValueKind::String),
    KeySpec::required("sg_ssh.desc", ValueKind::String),
    KeySpec::required("sg_ssh.ports", ValueKind::IntegerList),
    KeySpec::required("sg_ssh.cidr_block", ValueKind::String),
    KeySpec::required("sg_elb.name", ValueKind::String),
    KeySpec::required("sg_elb.desc", ValueKind::String),
    KeySpec::required("sg_elb.ports", ValueKind::IntegerList),
    KeySpec::required("sg_elb.cidr_block", ValueKind::String),
    KeySpec::required("igw_gateway.name", ValueKind::String),
    KeySpec::required("igw_attachment.name", ValueKind::String),
    KeySpec::required("igw_route_table.name", ValueKind::String),
    KeySpec::required("igw_default_route.name", ValueKind::String),
    KeySpec::required("subnet_public.name", ValueKind::String),
    KeySpec::required("subnet_public.az", ValueKind::String),
    KeySpec::required("subnet_public.cidr_block", ValueKind::String),
    KeySpec::required("subnet_app.name", ValueKind::String),
    KeySpec::required("subnet_app.az", ValueKind::String),
    KeySpec::required("subnet_app.cidr_block", ValueKind::String),
    KeySpec::required("subnet_db1.name", ValueKind::String),
    KeySpec::required("subnet_db1.az", ValueKind::String),
    KeySpec::required("subnet_db1.cidr_block", ValueKind::String),
    KeySpec::required("subnet_db2.name", ValueKind::String),
    KeySpec::required("subnet_db2.az", ValueKind::String),
    KeySpec::required("subnet_db2.cidr_block", ValueKind::String),
    KeySpec::required("subnet_public_rta.name", ValueKind::String),
    KeySpec::required("subnet_app_rta.name", ValueKind::String),
    KeySpec::required("subnet_db1_rta.name", ValueKind::String),
    KeySpec::required("subnet_db2_rta.name", ValueKind::String),
    KeySpec::required("role.name", ValueKind::String),
    KeySpec::required("profile.name", ValueKind::String),
    KeySpec::required("s3.name", ValueKind::String),
    KeySpec::required("s3.bucket", ValueKind::String),
    KeySpec::required("s3_dns.name", ValueKind::String),
    KeySpec::required("s3_dns.zone", ValueKind::String),
    KeySpec::required("s3_dns.record", ValueKind::String),
    KeySpec::required("s3_dns.ttl", ValueKind::Integer),
    KeySpec::required("r53_dns.name", ValueKind::String),
    KeySpec::required("r53_dns.zones", ValueKind::CommaList),
    KeySpec::required("cd_application.name", ValueKind::String),
    KeySpec::required("cd_application.names", ValueKind::CommaList),
];

/// Key schema for the application stack in the given environment class.
pub fn app_keys(class: EnvClass) -> Vec<KeySpec> {
    let mut keys = Vec::new();
    keys.extend_from_slice(COMMON_KEYS);
    keys.extend_from_slice(APP_BASE_KEYS);
    if class.is_production() {
        keys.extend_from_slice(APP_PRODUCTION_KEYS);
    }
    keys
}

/// Key schema for the network stack.
pub fn network_keys() -> Vec<KeySpec> {
    let mut keys = Vec::new();
    keys.extend_from_slice(COMMON_KEYS);
    keys.extend_from_slice(NETWORK_KEYS);
    keys
}
