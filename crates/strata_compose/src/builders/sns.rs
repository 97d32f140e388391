//! Notification topic builder.

use tracing::debug;

use strata_model::{CfnValue, Document, Handle, Resource};
use strata_settings::Settings;

use crate::error::ComposeResult;
use crate::naming::derive;

/// Topic with one email subscription per configured address.
///
/// Topic properties cannot be updated in place by the provisioning
/// engine; changing subscriptions means dropping the topic from one
/// document revision and re-adding it in the next.
pub fn notification_topic(doc: &mut Document, settings: &Settings) -> ComposeResult<Handle> {
    let (id, _tags) = derive(settings, "sns")?;

    let subscriptions: Vec<CfnValue> = settings
        .list("sns.emails")?
        .into_iter()
        .map(|email| {
            CfnValue::map([
                ("Endpoint", email.into()),
                ("Protocol", "email".into()),
            ])
        })
        .collect();

    debug!("Adding notification topic {id}");
    let resource =
        Resource::new(id, "AWS::SNS::Topic").prop("Subscription", CfnValue::List(subscriptions));
    Ok(doc.add_resource(resource)?)
}
