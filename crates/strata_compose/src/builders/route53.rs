//! DNS record and hosted-zone builders.

use tracing::debug;

use strata_model::{CfnValue, Document, Handle, Resource};
use strata_settings::Settings;

use crate::error::ComposeResult;
use crate::naming::derive;

/// CNAME in the application zone pointing at the load balancer.
///
/// `component` selects the record settings (`dns` or `dns2`); both
/// records live in the `dns.zone` zone and share its TTL.
pub fn lb_alias_record(
    doc: &mut Document,
    settings: &Settings,
    component: &str,
    load_balancer: &Handle,
) -> ComposeResult<Handle> {
    let (id, _tags) = derive(settings, component)?;
    let zone = settings.string("dns.zone")?;
    let record = settings.string(&format!("{component}.record"))?;

    debug!("Adding DNS record {id}");
    let resource = Resource::new(id, "AWS::Route53::RecordSet")
        .prop("Comment", "CNAME to the public load balancer")
        .prop("HostedZoneName", zone)
        .prop("Name", format!("{record}.{zone}"))
        .prop(
            "ResourceRecords",
            CfnValue::List(vec![load_balancer.attribute("DNSName")]),
        )
        .prop("TTL", settings.string("dns.ttl")?)
        .prop("Type", "CNAME");
    Ok(doc.add_resource(resource)?)
}

/// A record pointing at the fixed origin server.
///
/// The canonical name moves to the stack later; until then the origin
/// stays reachable under its own record.
pub fn origin_record(doc: &mut Document, settings: &Settings) -> ComposeResult<Handle> {
    let (id, _tags) = derive(settings, "dns_origin")?;
    let zone = settings.string("dns.zone")?;
    let record = settings.string("dns_origin.record")?;

    debug!("Adding DNS record {id}");
    let resource = Resource::new(id, "AWS::Route53::RecordSet")
        .prop("Comment", "A record pointing at the origin server")
        .prop("HostedZoneName", zone)
        .prop("Name", format!("{record}.{zone}"))
        .prop(
            "ResourceRecords",
            CfnValue::strings([settings.string("dns_origin.ip")?]),
        )
        .prop("TTL", settings.string("dns.ttl")?)
        .prop("Type", "A");
    Ok(doc.add_resource(resource)?)
}

/// CNAME giving the code bucket's website a readable name.
pub fn bucket_alias_record(
    doc: &mut Document,
    settings: &Settings,
    bucket: &Handle,
) -> ComposeResult<Handle> {
    let (id, _tags) = derive(settings, "s3_dns")?;
    let zone = settings.string("s3_dns.zone")?;
    let record = settings.string("s3_dns.record")?;

    debug!("Adding DNS record {id}");
    let resource = Resource::new(id, "AWS::Route53::RecordSet")
        .prop("Comment", "CNAME to the code bucket website")
        .prop("HostedZoneName", zone)
        .prop("Name", format!("{record}.{zone}"))
        .prop(
            "ResourceRecords",
            CfnValue::List(vec![bucket.attribute("DomainName")]),
        )
        .prop("TTL", settings.string("s3_dns.ttl")?)
        .prop("Type", "CNAME");
    Ok(doc.add_resource(resource)?)
}

/// One hosted zone per configured zone name.
///
/// Identifiers and export names carry the element index, so identity is
/// fixed by list position; reordering the list replaces the zones.
pub fn hosted_zones(doc: &mut Document, settings: &Settings) -> ComposeResult<Vec<Handle>> {
    let (base_id, _tags) = derive(settings, "r53_dns")?;

    let mut handles = Vec::new();
    for (index, zone) in settings.list("r53_dns.zones")?.iter().enumerate() {
        let id = base_id.indexed(index);
        debug!("Adding hosted zone {id} for {zone}");
        let handle = doc.add_resource(
            Resource::new(id, "AWS::Route53::HostedZone").prop("Name", zone.as_str()),
        )?;
        doc.add_output(format!("HostedZoneName{index}"), handle.reference())?;
        handles.push(handle);
    }
    Ok(handles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use strata_model::LogicalId;

    fn settings(pairs: &[(&str, &str)]) -> Settings {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn handle(id: &str) -> Handle {
        let mut doc = Document::new("fixture");
        doc.add_resource(Resource::new(LogicalId::new(id), "AWS::S3::Bucket"))
            .unwrap()
    }

    #[test]
    fn test_lb_alias_record_name_joins_zone() {
        let s = settings(&[
            ("app", "Acme"),
            ("env", "prod"),
            ("dns.name", "Dns"),
            ("dns.zone", "example.com."),
            ("dns.record", "www"),
            ("dns.ttl", "300"),
        ]);
        let mut doc = Document::new("test");
        let lb = handle("AcmeElb");
        lb_alias_record(&mut doc, &s, "dns", &lb).unwrap();

        let record = serde_json::to_value(doc.get("AcmeDns").unwrap()).unwrap();
        assert_eq!(record["Properties"]["Name"], json!("www.example.com."));
        assert_eq!(record["Properties"]["Type"], json!("CNAME"));
        assert_eq!(
            record["Properties"]["ResourceRecords"],
            json!([{"Fn::GetAtt": ["AcmeElb", "DNSName"]}])
        );
    }

    #[test]
    fn test_origin_record_is_a_record() {
        let s = settings(&[
            ("app", "Acme"),
            ("env", "stage"),
            ("dns.zone", "example.com."),
            ("dns.ttl", "300"),
            ("dns_origin.name", "DnsOrigin"),
            ("dns_origin.record", "origin"),
            ("dns_origin.ip", "198.51.100.7"),
        ]);
        let mut doc = Document::new("test");
        origin_record(&mut doc, &s).unwrap();

        let record = serde_json::to_value(doc.get("AcmeDnsOrigin").unwrap()).unwrap();
        assert_eq!(record["Properties"]["Type"], json!("A"));
        assert_eq!(record["Properties"]["ResourceRecords"], json!(["198.51.100.7"]));
    }

    #[test]
    fn test_hosted_zones_indexed_identity() {
        let s = settings(&[
            ("app", "Acme"),
            ("env", "prod"),
            ("r53_dns.name", "Zone"),
            ("r53_dns.zones", "example.com., example.org."),
        ]);
        let mut doc = Document::new("test");
        let handles = hosted_zones(&mut doc, &s).unwrap();

        assert_eq!(handles.len(), 2);
        assert!(doc.contains("AcmeZone0"));
        assert!(doc.contains("AcmeZone1"));
        assert_eq!(doc.outputs()[0].name(), "HostedZoneName0");
        assert_eq!(doc.outputs()[1].name(), "HostedZoneName1");
    }
}
