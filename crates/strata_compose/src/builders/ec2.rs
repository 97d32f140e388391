//! EC2 network and security-group builders.

use tracing::debug;

use strata_model::{CfnValue, Document, Handle, Resource};
use strata_settings::{Settings, SettingsError};

use crate::error::ComposeResult;
use crate::naming::derive;

/// Parse a comma-separated port list into integers.
pub(crate) fn ports(settings: &Settings, key: &str) -> ComposeResult<Vec<i64>> {
    let mut ports = Vec::new();
    for item in settings.list(key)? {
        ports.push(item.parse().map_err(|_| SettingsError::MalformedValue {
            key: key.to_string(),
            reason: format!("expected integer port, got {item:?}"),
        })?);
    }
    Ok(ports)
}

fn tcp_rule(port: i64, source: (&str, CfnValue)) -> CfnValue {
    let (source_key, source_value) = source;
    CfnValue::map([
        ("FromPort", port.into()),
        ("IpProtocol", "tcp".into()),
        (source_key, source_value),
        ("ToPort", port.into()),
    ])
}

/// Security group for application instances.
///
/// Ingress is allowed only from the edge security group, one rule per
/// configured port, so instances never take traffic directly.
pub fn app_security_group(doc: &mut Document, settings: &Settings) -> ComposeResult<Handle> {
    let (id, tags) = derive(settings, "sg_app")?;
    let edge_sg = settings.string("sg_elb")?;

    let rules: Vec<CfnValue> = ports(settings, "sg_app.ports")?
        .into_iter()
        .map(|port| tcp_rule(port, ("SourceSecurityGroupId", edge_sg.into())))
        .collect();

    debug!("Adding security group {id}");
    let resource = Resource::new(id, "AWS::EC2::SecurityGroup")
        .prop("GroupDescription", settings.string("sg_app.desc")?)
        .prop("SecurityGroupIngress", CfnValue::List(rules))
        .prop("VpcId", settings.string("vpc_id")?)
        .tags(&tags);
    Ok(doc.add_resource(resource)?)
}

/// Security group with CIDR-scoped ingress, one rule per configured port.
pub fn cidr_security_group(
    doc: &mut Document,
    settings: &Settings,
    component: &str,
    vpc: &Handle,
    export: &str,
) -> ComposeResult<Handle> {
    let (id, tags) = derive(settings, component)?;
    let cidr = settings.string(&format!("{component}.cidr_block"))?;

    let rules: Vec<CfnValue> = ports(settings, &format!("{component}.ports"))?
        .into_iter()
        .map(|port| tcp_rule(port, ("CidrIp", cidr.into())))
        .collect();

    debug!("Adding security group {id}");
    let resource = Resource::new(id, "AWS::EC2::SecurityGroup")
        .prop("GroupDescription", settings.string(&format!("{component}.desc"))?)
        .prop("SecurityGroupIngress", CfnValue::List(rules))
        .prop("VpcId", vpc.reference())
        .tags(&tags);
    let handle = doc.add_resource(resource)?;
    doc.add_output(export, handle.reference())?;
    Ok(handle)
}

/// VPC holding every network resource; exports its id.
pub fn vpc(doc: &mut Document, settings: &Settings) -> ComposeResult<Handle> {
    let (id, tags) = derive(settings, "vpc")?;
    debug!("Adding VPC {id}");
    let resource = Resource::new(id, "AWS::EC2::VPC")
        .prop("CidrBlock", settings.string("vpc.cidr_block")?)
        .prop("EnableDnsHostnames", true)
        .tags(&tags);
    let handle = doc.add_resource(resource)?;
    doc.add_output("VpcId", handle.reference())?;
    Ok(handle)
}

pub fn internet_gateway(doc: &mut Document, settings: &Settings) -> ComposeResult<Handle> {
    let (id, tags) = derive(settings, "igw_gateway")?;
    debug!("Adding internet gateway {id}");
    let resource = Resource::new(id, "AWS::EC2::InternetGateway").tags(&tags);
    Ok(doc.add_resource(resource)?)
}

pub fn gateway_attachment(
    doc: &mut Document,
    settings: &Settings,
    vpc: &Handle,
    gateway: &Handle,
) -> ComposeResult<Handle> {
    let (id, _tags) = derive(settings, "igw_attachment")?;
    let resource = Resource::new(id, "AWS::EC2::VPCGatewayAttachment")
        .prop("InternetGatewayId", gateway.reference())
        .prop("VpcId", vpc.reference());
    Ok(doc.add_resource(resource)?)
}

/// Route table for internet-bound traffic; exports its id.
pub fn route_table(doc: &mut Document, settings: &Settings, vpc: &Handle) -> ComposeResult<Handle> {
    let (id, tags) = derive(settings, "igw_route_table")?;
    let resource = Resource::new(id, "AWS::EC2::RouteTable")
        .prop("VpcId", vpc.reference())
        .tags(&tags);
    let handle = doc.add_resource(resource)?;
    doc.add_output("IGWRoute", handle.reference())?;
    Ok(handle)
}

/// Default route to the internet gateway.
///
/// Routes through a gateway must wait for the gateway attachment, which
/// the property graph cannot express, hence the explicit dependency.
pub fn default_route(
    doc: &mut Document,
    settings: &Settings,
    gateway: &Handle,
    route_table: &Handle,
    attachment: &Handle,
) -> ComposeResult<Handle> {
    let (id, _tags) = derive(settings, "igw_default_route")?;
    let resource = Resource::new(id, "AWS::EC2::Route")
        .prop("DestinationCidrBlock", "0.0.0.0/0")
        .prop("GatewayId", gateway.reference())
        .prop("RouteTableId", route_table.reference())
        .depends_on(attachment.id());
    Ok(doc.add_resource(resource)?)
}

/// Subnet in a fixed availability zone; exports its id under `export`.
pub fn subnet(
    doc: &mut Document,
    settings: &Settings,
    component: &str,
    vpc: &Handle,
    export: &str,
) -> ComposeResult<Handle> {
    let (id, tags) = derive(settings, component)?;
    debug!("Adding subnet {id}");
    let resource = Resource::new(id, "AWS::EC2::Subnet")
        .prop("AvailabilityZone", settings.string(&format!("{component}.az"))?)
        .prop("CidrBlock", settings.string(&format!("{component}.cidr_block"))?)
        .prop("VpcId", vpc.reference())
        .tags(&tags);
    let handle = doc.add_resource(resource)?;
    doc.add_output(export, handle.reference())?;
    Ok(handle)
}

pub fn route_table_association(
    doc: &mut Document,
    settings: &Settings,
    component: &str,
    subnet: &Handle,
    route_table: &Handle,
) -> ComposeResult<Handle> {
    let (id, _tags) = derive(settings, component)?;
    let resource = Resource::new(id, "AWS::EC2::SubnetRouteTableAssociation")
        .prop("RouteTableId", route_table.reference())
        .prop("SubnetId", subnet.reference());
    Ok(doc.add_resource(resource)?)
}
