//! Email masking for public listings

const MASKED_SEGMENT: &str = "*****";
const VISIBLE_PREFIX: usize = 3;

/// Hide most of the local part of an email address
///
/// `jonathan@example.com` becomes `jon*****@example.com`. Values that do not
/// contain exactly one `@` are returned unchanged.
pub fn mask_email(email: &str) -> String {
    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return email.to_string();
    };

    let prefix: String = local.chars().take(VISIBLE_PREFIX).collect();
    format!("{prefix}{MASKED_SEGMENT}@{domain}")
}
