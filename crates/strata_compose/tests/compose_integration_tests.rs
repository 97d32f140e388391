//! Integration tests for stack composition.

use std::collections::{BTreeMap, BTreeSet};

use pretty_assertions::assert_eq;
use serde_json::json;
use strata_compose::{AppStack, NetworkStack, StackLinker};
use strata_model::Document;
use strata_settings::Settings;

fn settings(pairs: &[(&str, &str)]) -> Settings {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn app_base() -> Vec<(&'static str, &'static str)> {
    vec![
        ("app", "Acme"),
        ("account", "123456789012"),
        ("region", "us-east-1"),
        ("vpc_id", "vpc-0abc"),
        ("sg_ssh", "sg-ssh"),
        ("sg_elb", "sg-edge"),
        ("app_subnet_id", "subnet-app"),
        ("sg_app.name", "SG"),
        ("sg_app.desc", "Allow app traffic from the load balancer only"),
        ("sg_app.ports", "80,443"),
        ("role.name", "RoleEc2S3"),
        ("profile.name", "Profile"),
        ("s3.bucket", "code.example.com"),
        ("sns.name", "SnsNotify"),
        ("sns.emails", "a@x.com, b@y.com"),
        ("launchconfig.name", "LaunchConfig"),
        ("launchconfig.image_id", "ami-0123456789abcdef0"),
        ("launchconfig.instance_type", "t3.small"),
        ("launchconfig.key_name", "acme-key"),
        ("asg.name", "ASG"),
        ("asg.cooldown", "300"),
        ("asg.health_grace", "600"),
        ("asg.scale_min", "2"),
        ("asg.scale_max", "2"),
        ("scale_up_policy.name", "ScaleUpPolicy"),
        ("scale_up_policy.cooldown", "120"),
        ("scale_down_policy.name", "ScaleDownPolicy"),
        ("scale_down_policy.cooldown", "120"),
        ("alarm_high.name", "AlarmHigh"),
        ("alarm_high.threshold", "80"),
        ("alarm_low.name", "AlarmLow"),
        ("alarm_low.threshold", "20"),
        ("dns.zone", "example.com."),
        ("dns.ttl", "300"),
        ("dns_origin.name", "DnsOrigin"),
        ("dns_origin.record", "origin"),
        ("dns_origin.ip", "198.51.100.7"),
        ("cd_application", "Storefront"),
        ("cd_role_arn", "arn:aws:iam::123456789012:role/StorefrontCDRole"),
        ("cd_iam_user", "StorefrontCDUser"),
        ("cd_deploymentgroup.name", "DeployGroup"),
        ("cd_deploymentgroup.configname", "CodeDeployDefault.OneAtATime"),
        ("cd_user_policy.name", "CDUserPolicy"),
    ]
}

fn prod_settings() -> Settings {
    let mut pairs = app_base();
    pairs.extend(vec![
        ("env", "prod"),
        ("pub_subnet_id", "subnet-pub"),
        ("elb.name", "Elb"),
        ("elb.ssl_id", "certificate/abc"),
        ("alarm_elb_empty.name", "AlarmElbEmpty"),
        ("alarm_elb_empty.threshold", "1"),
        ("dns.name", "Dns"),
        ("dns.record", "www"),
        ("dns2.name", "Dns2"),
        ("dns2.record", "shop"),
    ]);
    settings(&pairs)
}

fn stage_settings() -> Settings {
    let mut pairs = app_base();
    pairs.push(("env", "stage"));
    settings(&pairs)
}

fn network_settings() -> Settings {
    settings(&[
        ("app", "Acme"),
        ("env", "prod"),
        ("vpc.name", "VPC"),
        ("vpc.cidr_block", "10.0.0.0/16"),
        ("sg_ssh.name", "SgSsh"),
        ("sg_ssh.desc", "Allow ssh from the office"),
        ("sg_ssh.ports", "22"),
        ("sg_ssh.cidr_block", "203.0.113.0/24"),
        ("sg_elb.name", "SgElb"),
        ("sg_elb.desc", "Allow the world to the load balancer"),
        ("sg_elb.ports", "80,443"),
        ("sg_elb.cidr_block", "0.0.0.0/0"),
        ("igw_gateway.name", "Igw"),
        ("igw_attachment.name", "IgwAttachment"),
        ("igw_route_table.name", "IgwRouteTable"),
        ("igw_default_route.name", "IgwDefaultRoute"),
        ("subnet_public.name", "SubnetPublic"),
        ("subnet_public.az", "us-east-1a"),
        ("subnet_public.cidr_block", "10.0.0.0/24"),
        ("subnet_app.name", "SubnetApp"),
        ("subnet_app.az", "us-east-1a"),
        ("subnet_app.cidr_block", "10.0.1.0/24"),
        ("subnet_db1.name", "SubnetDb1"),
        ("subnet_db1.az", "us-east-1a"),
        ("subnet_db1.cidr_block", "10.0.2.0/24"),
        ("subnet_db2.name", "SubnetDb2"),
        ("subnet_db2.az", "us-east-1b"),
        ("subnet_db2.cidr_block", "10.0.3.0/24"),
        ("subnet_public_rta.name", "SubnetPublicRta"),
        ("subnet_app_rta.name", "SubnetAppRta"),
        ("subnet_db1_rta.name", "SubnetDb1Rta"),
        ("subnet_db2_rta.name", "SubnetDb2Rta"),
        ("role.name", "RoleEc2S3"),
        ("profile.name", "Profile"),
        ("s3.name", "Bucket"),
        ("s3.bucket", "code.example.com"),
        ("s3_dns.name", "S3Dns"),
        ("s3_dns.zone", "example.com."),
        ("s3_dns.record", "code"),
        ("s3_dns.ttl", "300"),
        ("r53_dns.name", "Zone"),
        ("r53_dns.zones", "example.com., example.org."),
        ("cd_application.name", "CDApp"),
        ("cd_application.names", "Storefront, Backoffice"),
    ])
}

/// Every reference must target a resource declared earlier.
fn assert_dependency_order(doc: &Document) {
    let mut seen: BTreeSet<String> = BTreeSet::new();
    for resource in doc.resources() {
        for reference in resource.references() {
            assert!(
                seen.contains(reference.as_str()),
                "{} references {} before its declaration",
                resource.logical_id(),
                reference
            );
        }
        seen.insert(resource.logical_id().to_string());
    }
}

#[test]
fn test_composition_is_deterministic() {
    let prod = prod_settings();
    let first = AppStack::compose(&prod).unwrap().to_json().unwrap();
    let second = AppStack::compose(&prod).unwrap().to_json().unwrap();
    assert_eq!(first, second);

    let net = network_settings();
    let first = NetworkStack::compose(&net).unwrap().to_json().unwrap();
    let second = NetworkStack::compose(&net).unwrap().to_json().unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_logical_ids_are_unique() {
    for doc in [
        AppStack::compose(&prod_settings()).unwrap(),
        AppStack::compose(&stage_settings()).unwrap(),
        NetworkStack::compose(&network_settings()).unwrap(),
    ] {
        let ids: Vec<_> = doc
            .resources()
            .iter()
            .map(|r| r.logical_id().to_string())
            .collect();
        let unique: BTreeSet<_> = ids.iter().cloned().collect();
        assert_eq!(ids.len(), unique.len());
    }
}

#[test]
fn test_references_point_backwards() {
    assert_dependency_order(&AppStack::compose(&prod_settings()).unwrap());
    assert_dependency_order(&AppStack::compose(&stage_settings()).unwrap());
    assert_dependency_order(&NetworkStack::compose(&network_settings()).unwrap());
}

#[test]
fn test_non_production_omits_load_balancer_topology() {
    let doc = AppStack::compose(&stage_settings()).unwrap();

    for id in ["AcmeElb", "AcmeAlarmElbEmpty", "AcmeDns", "AcmeDns2"] {
        assert!(!doc.contains(id), "{id} must not exist outside production");
    }

    let group = doc.get("AcmeASG").unwrap();
    assert_eq!(
        serde_json::to_value(group.property("HealthCheckType").unwrap()).unwrap(),
        json!("EC2")
    );
    assert!(group.property("LoadBalancerNames").is_none());

    assert_eq!(
        doc.description(),
        "Acme stage: ASG, EC2, Route53, CodeDeploy"
    );
}

#[test]
fn test_production_has_one_load_balancer_wired_to_group() {
    let doc = AppStack::compose(&prod_settings()).unwrap();

    let balancers: Vec<_> = doc
        .resources()
        .iter()
        .filter(|r| r.kind() == "AWS::ElasticLoadBalancing::LoadBalancer")
        .collect();
    assert_eq!(balancers.len(), 1);

    let group = doc.get("AcmeASG").unwrap();
    assert_eq!(
        serde_json::to_value(group.property("LoadBalancerNames").unwrap()).unwrap(),
        json!([{"Ref": "AcmeElb"}])
    );
    assert_eq!(
        serde_json::to_value(group.property("HealthCheckType").unwrap()).unwrap(),
        json!("ELB")
    );

    for id in ["AcmeAlarmElbEmpty", "AcmeDns", "AcmeDns2"] {
        assert!(doc.contains(id), "missing {id}");
    }
}

#[test]
fn test_unrecognized_env_falls_back_to_non_production() {
    let mut pairs = app_base();
    pairs.push(("env", "qa17"));
    let doc = AppStack::compose(&settings(&pairs)).unwrap();

    assert!(!doc.contains("AcmeElb"));
    assert_eq!(doc.description(), "Acme qa17: ASG, EC2, Route53, CodeDeploy");
}

#[test]
fn test_notification_emails_are_split_and_trimmed() {
    let doc = AppStack::compose(&prod_settings()).unwrap();
    let topic = doc.get("AcmeSnsNotify").unwrap();
    assert_eq!(
        serde_json::to_value(topic.property("Subscription").unwrap()).unwrap(),
        json!([
            {"Endpoint": "a@x.com", "Protocol": "email"},
            {"Endpoint": "b@y.com", "Protocol": "email"},
        ])
    );
}

#[test]
fn test_derived_identity_and_tag() {
    let doc = AppStack::compose(&prod_settings()).unwrap();
    let group = doc.get("AcmeSG").unwrap();
    assert_eq!(group.kind(), "AWS::EC2::SecurityGroup");
    assert_eq!(
        serde_json::to_value(group.property("Tags").unwrap()).unwrap()[0],
        json!({"Key": "Name", "Value": "Acme-SG-prod"})
    );
}

#[test]
fn test_missing_key_fails_before_output() {
    let pairs: Vec<_> = prod_settings_pairs_without("asg.cooldown");
    let err = AppStack::compose(&settings(&pairs)).unwrap_err();
    assert!(err.to_string().contains("asg.cooldown"));
}

fn prod_settings_pairs_without(key: &str) -> Vec<(&'static str, &'static str)> {
    let mut pairs = app_base();
    pairs.extend(vec![
        ("env", "prod"),
        ("pub_subnet_id", "subnet-pub"),
        ("elb.name", "Elb"),
        ("elb.ssl_id", "certificate/abc"),
        ("alarm_elb_empty.name", "AlarmElbEmpty"),
        ("alarm_elb_empty.threshold", "1"),
        ("dns.name", "Dns"),
        ("dns.record", "www"),
        ("dns2.name", "Dns2"),
        ("dns2.record", "shop"),
    ]);
    pairs.retain(|(k, _)| *k != key);
    pairs
}

#[test]
fn test_malformed_list_fails() {
    let mut pairs = prod_settings_pairs_without("sns.emails");
    pairs.push(("sns.emails", "a@x.com,,b@y.com"));
    assert!(AppStack::compose(&settings(&pairs)).is_err());
}

#[test]
fn test_network_exports_feed_application_settings() {
    let doc = NetworkStack::compose(&network_settings()).unwrap();

    let names: BTreeSet<_> = doc.outputs().iter().map(|o| o.name().to_string()).collect();
    for expected in [
        "VpcId",
        "SGSSH",
        "SGELB",
        "IGWRoute",
        "PublicSubnet",
        "AppSubnet",
        "DB1Subnet",
        "DB2Subnet",
        "S3BucketDomain",
        "HostedZoneName0",
        "HostedZoneName1",
        "CDApp0",
        "CDRole0",
        "CDUser0",
        "CDApp1",
        "CDRole1",
        "CDUser1",
    ] {
        assert!(names.contains(expected), "missing output {expected}");
    }

    // Pretend the provisioning engine resolved the exports, then link
    // them into an application settings fragment.
    let resolved: BTreeMap<String, String> = doc
        .outputs()
        .iter()
        .map(|o| (o.name().to_string(), format!("resolved-{}", o.name())))
        .collect();

    let fragment = StackLinker::new()
        .with_network_bindings()
        .with_application_bindings(0)
        .settings_fragment(&resolved)
        .unwrap();

    assert_eq!(fragment["vpc_id"], "resolved-VpcId");
    assert_eq!(fragment["sg_elb"], "resolved-SGELB");
    assert_eq!(fragment["app_subnet_id"], "resolved-AppSubnet");
    assert_eq!(fragment["s3.domain"], "resolved-S3BucketDomain");
    assert_eq!(fragment["cd_role_arn"], "resolved-CDRole0");
    assert_eq!(fragment["cd_iam_user"], "resolved-CDUser0");
}

#[test]
fn test_network_stack_per_application_resources() {
    let doc = NetworkStack::compose(&network_settings()).unwrap();

    assert!(doc.contains("AcmeCDApp0"));
    assert!(doc.contains("AcmeCDApp1"));
    assert!(doc.contains("StorefrontCDRole"));
    assert!(doc.contains("BackofficeCDUser"));

    let route = doc.get("AcmeIgwDefaultRoute").unwrap();
    let value = serde_json::to_value(route).unwrap();
    assert_eq!(value["DependsOn"], json!("AcmeIgwAttachment"));
}
