//! ARN construction for policy resources.

/// `arn:aws:s3:::<resource>` — S3 ARNs carry no region or account.
pub fn s3(resource: &str) -> String {
    format!("arn:aws:s3:::{resource}")
}

/// `arn:aws:acm:<region>:<account>:<resource>`.
pub fn acm(region: &str, account: &str, resource: &str) -> String {
    format!("arn:aws:acm:{region}:{account}:{resource}")
}

/// `arn:aws:codedeploy:<region>:<account>:<resource>`.
pub fn codedeploy(region: &str, account: &str, resource: &str) -> String {
    format!("arn:aws:codedeploy:{region}:{account}:{resource}")
}
