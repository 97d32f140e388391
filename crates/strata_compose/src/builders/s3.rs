//! Code bucket builder.

use tracing::debug;

use strata_model::{CfnValue, Document, Handle, Resource};
use strata_settings::Settings;

use crate::error::ComposeResult;
use crate::naming::derive;

/// Website-enabled bucket holding deploy bundles and static assets.
///
/// Exports the bucket's domain name for dependent documents.
pub fn code_bucket(doc: &mut Document, settings: &Settings) -> ComposeResult<Handle> {
    let (id, tags) = derive(settings, "s3")?;

    debug!("Adding code bucket {id}");
    let resource = Resource::new(id, "AWS::S3::Bucket")
        .prop("AccessControl", "BucketOwnerFullControl")
        .prop("BucketName", settings.string("s3.bucket")?)
        .prop(
            "WebsiteConfiguration",
            CfnValue::map([("IndexDocument", "index.html".into())]),
        )
        .tags(&tags);
    let handle = doc.add_resource(resource)?;
    doc.add_output("S3BucketDomain", handle.attribute("DomainName"))?;
    Ok(handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_code_bucket_exports_domain() {
        let settings: Settings = [
            ("app", "Acme"),
            ("env", "prod"),
            ("s3.name", "Bucket"),
            ("s3.bucket", "code.example.com"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let mut doc = Document::new("test");
        code_bucket(&mut doc, &settings).unwrap();

        let bucket = serde_json::to_value(doc.get("AcmeBucket").unwrap()).unwrap();
        assert_eq!(bucket["Properties"]["BucketName"], json!("code.example.com"));
        assert_eq!(
            bucket["Properties"]["WebsiteConfiguration"],
            json!({"IndexDocument": "index.html"})
        );

        assert_eq!(doc.outputs()[0].name(), "S3BucketDomain");
        assert_eq!(
            serde_json::to_value(doc.outputs()[0].value()).unwrap(),
            json!({"Fn::GetAtt": ["AcmeBucket", "DomainName"]})
        );
    }
}
