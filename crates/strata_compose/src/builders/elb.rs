//! Load balancer builder.

use tracing::debug;

use strata_model::{CfnValue, Document, Handle, Resource};
use strata_settings::Settings;

use crate::arn;
use crate::error::ComposeResult;
use crate::naming::derive;

/// Public load balancer terminating TLS and fronting the scaling group.
///
/// TLS terminates at the balancer with the ACM certificate; the
/// instance side of both listeners stays plain HTTP.
pub fn load_balancer(doc: &mut Document, settings: &Settings) -> ComposeResult<Handle> {
    let (id, tags) = derive(settings, "elb")?;
    let region = settings.string("region")?;
    let account = settings.string("account")?;
    let certificate = arn::acm(region, account, settings.string("elb.ssl_id")?);

    let listeners = CfnValue::List(vec![
        CfnValue::map([
            ("InstancePort", "80".into()),
            ("InstanceProtocol", "HTTP".into()),
            ("LoadBalancerPort", "80".into()),
            ("Protocol", "HTTP".into()),
        ]),
        CfnValue::map([
            ("InstancePort", "443".into()),
            ("InstanceProtocol", "HTTP".into()),
            ("LoadBalancerPort", "443".into()),
            ("Protocol", "HTTPS".into()),
            ("SSLCertificateId", certificate.into()),
        ]),
    ]);

    debug!("Adding load balancer {id}");
    let resource = Resource::new(id.clone(), "AWS::ElasticLoadBalancing::LoadBalancer")
        .prop(
            "ConnectionDrainingPolicy",
            CfnValue::map([("Enabled", true.into()), ("Timeout", 300.into())]),
        )
        .prop("CrossZone", true)
        .prop(
            "HealthCheck",
            CfnValue::map([
                ("HealthyThreshold", "3".into()),
                ("Interval", "30".into()),
                ("Target", "HTTP:80/".into()),
                ("Timeout", "5".into()),
                ("UnhealthyThreshold", "5".into()),
            ]),
        )
        .prop("Listeners", listeners)
        // The scaling group attaches by balancer name, so pin it.
        .prop("LoadBalancerName", id.as_str())
        .prop(
            "SecurityGroups",
            CfnValue::strings([settings.string("sg_elb")?]),
        )
        .prop(
            "Subnets",
            CfnValue::strings([settings.string("pub_subnet_id")?]),
        )
        .tags(&tags);
    Ok(doc.add_resource(resource)?)
}
