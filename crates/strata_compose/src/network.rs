//! Network stack composition.

use tracing::{debug, info};

use strata_model::Document;
use strata_settings::{SchemaValidator, Settings};

use crate::builders::{codedeploy, ec2, iam, route53, s3};
use crate::error::ComposeResult;
use crate::schema;

/// Shared network document composition.
///
/// One network stack backs every application environment: VPC, security
/// groups, internet gateway and routing, subnets, the code bucket, the
/// hosted zones, and the per-application deploy resources. Its outputs
/// are copied into the settings of dependent application documents
/// before those are composed (see [`crate::link`]).
pub struct NetworkStack;

impl NetworkStack {
    /// Compose the network document from `settings`.
    pub fn compose(settings: &Settings) -> ComposeResult<Document> {
        let app = settings.app()?;
        info!("Composing network stack for {app}");

        SchemaValidator::validate_strict(settings, &schema::network_keys())?;

        let mut doc = Document::new(format!(
            "{app} network: VPC, IGW, RouteTable, DefaultRoute, S3"
        ));

        let vpc = ec2::vpc(&mut doc, settings)?;
        ec2::cidr_security_group(&mut doc, settings, "sg_ssh", &vpc, "SGSSH")?;
        ec2::cidr_security_group(&mut doc, settings, "sg_elb", &vpc, "SGELB")?;

        let gateway = ec2::internet_gateway(&mut doc, settings)?;
        let attachment = ec2::gateway_attachment(&mut doc, settings, &vpc, &gateway)?;
        let route_table = ec2::route_table(&mut doc, settings, &vpc)?;
        ec2::default_route(&mut doc, settings, &gateway, &route_table, &attachment)?;

        // The application subnet stays public as well: instances reach
        // the origin through the gateway instead of a NAT hop.
        let public = ec2::subnet(&mut doc, settings, "subnet_public", &vpc, "PublicSubnet")?;
        let app_subnet = ec2::subnet(&mut doc, settings, "subnet_app", &vpc, "AppSubnet")?;
        let db1 = ec2::subnet(&mut doc, settings, "subnet_db1", &vpc, "DB1Subnet")?;
        let db2 = ec2::subnet(&mut doc, settings, "subnet_db2", &vpc, "DB2Subnet")?;
        ec2::route_table_association(&mut doc, settings, "subnet_public_rta", &public, &route_table)?;
        ec2::route_table_association(&mut doc, settings, "subnet_app_rta", &app_subnet, &route_table)?;
        ec2::route_table_association(&mut doc, settings, "subnet_db1_rta", &db1, &route_table)?;
        ec2::route_table_association(&mut doc, settings, "subnet_db2_rta", &db2, &route_table)?;

        let role = iam::instance_role(&mut doc, settings)?;
        iam::instance_profile(&mut doc, settings, &role)?;

        let bucket = s3::code_bucket(&mut doc, settings)?;
        route53::bucket_alias_record(&mut doc, settings, &bucket)?;
        route53::hosted_zones(&mut doc, settings)?;
        codedeploy::applications(&mut doc, settings)?;

        debug!("Network stack holds {} resources", doc.resources().len());
        Ok(doc)
    }
}
