//! Environment-driven topology selection for the application stack.

use tracing::{debug, info};

use strata_model::Document;
use strata_settings::{SchemaValidator, Settings};

use crate::builders::{autoscaling, cloudwatch, codedeploy, ec2, elb, iam, route53, sns};
use crate::error::ComposeResult;
use crate::schema;

/// Environment class read from the `env` setting.
///
/// Only `prod` selects the production topology. Every other value —
/// recognized or not — falls back to the reduced non-production shape
/// and description; an unknown environment is never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvClass {
    Production,
    NonProduction,
}

impl EnvClass {
    pub fn from_env(env: &str) -> Self {
        if env == "prod" {
            Self::Production
        } else {
            Self::NonProduction
        }
    }

    pub fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Application stack composition.
///
/// The builder sequence is fixed per environment class and every branch
/// is decided here, once, so each resource lands in the document before
/// anything that references it. Production adds the load balancer, its
/// empty-balancer alarm, and the two alias records; everything else is
/// shared.
pub struct AppStack;

impl AppStack {
    /// Compose the application document for the environment in `settings`.
    pub fn compose(settings: &Settings) -> ComposeResult<Document> {
        let app = settings.app()?;
        let env = settings.env()?;
        let class = EnvClass::from_env(env);
        info!("Composing application stack for {app} ({env})");

        SchemaValidator::validate_strict(settings, &schema::app_keys(class))?;

        let mut doc = Document::new(Self::description(app, env, class));

        let sg_app = ec2::app_security_group(&mut doc, settings)?;
        let role = iam::instance_role(&mut doc, settings)?;
        // The profile must precede the launch configuration that
        // references it, the topic the scaling group that notifies
        // through it.
        let profile = iam::instance_profile(&mut doc, settings, &role)?;
        let topic = sns::notification_topic(&mut doc, settings)?;

        let (group, load_balancer) = match class {
            EnvClass::Production => {
                let launch =
                    autoscaling::launch_config_behind_lb(&mut doc, settings, &profile, &sg_app)?;
                let lb = elb::load_balancer(&mut doc, settings)?;
                let group =
                    autoscaling::scaling_group_with_lb(&mut doc, settings, &launch, &lb, &topic)?;
                (group, Some(lb))
            }
            EnvClass::NonProduction => {
                let launch =
                    autoscaling::launch_config_direct(&mut doc, settings, &profile, &sg_app)?;
                let group = autoscaling::scaling_group_direct(&mut doc, settings, &launch, &topic)?;
                (group, None)
            }
        };

        let scale_down = autoscaling::scale_down_policy(&mut doc, settings, &group)?;
        let scale_up = autoscaling::scale_up_policy(&mut doc, settings, &group)?;
        cloudwatch::cpu_high_alarm(&mut doc, settings, &group, &scale_up)?;
        cloudwatch::cpu_low_alarm(&mut doc, settings, &group, &scale_down)?;

        if let Some(lb) = &load_balancer {
            cloudwatch::lb_empty_alarm(&mut doc, settings, lb, &topic)?;
            route53::lb_alias_record(&mut doc, settings, "dns", lb)?;
            route53::lb_alias_record(&mut doc, settings, "dns2", lb)?;
        }

        route53::origin_record(&mut doc, settings)?;
        codedeploy::deployment_group(&mut doc, settings, &group)?;
        iam::deploy_user_policy(&mut doc, settings)?;

        debug!("Application stack holds {} resources", doc.resources().len());
        Ok(doc)
    }

    fn description(app: &str, env: &str, class: EnvClass) -> String {
        match class {
            EnvClass::Production => format!("{app} {env}: ELB, ASG, EC2, Route53, CodeDeploy"),
            EnvClass::NonProduction => format!("{app} {env}: ASG, EC2, Route53, CodeDeploy"),
        }
    }
}
