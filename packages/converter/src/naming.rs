//! Tag name normalization.
//!
//! XML sources write tags in medial-capital style (`registrationListing`);
//! the converted document uses underscore-separated lowercase keys
//! (`registration_listing`). Namespace prefixes are dropped first, then the
//! casing rules are applied in a fixed order.

use std::sync::LazyLock;

use regex::Regex;

/// A capitalized word boundary: any character followed by an uppercase
/// letter that starts a lowercase run. Splits `TESTTest` into `TEST_Test`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static WORD_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(.)([A-Z][a-z])").expect("valid regex"));

/// A lowercase letter or digit followed by an uppercase letter.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static CASE_STEP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("valid regex"));

/// Strip a namespace prefix from a qualified tag name.
///
/// Handles both Clark notation (`{http://ns}tag`) and prefix notation
/// (`ns:tag`), keeping only the local name.
///
/// # Examples
/// ```
/// use openfda_converter::naming::local_name;
///
/// assert_eq!(local_name("{urn:device}deviceName"), "deviceName");
/// assert_eq!(local_name("ns:deviceName"), "deviceName");
/// assert_eq!(local_name("deviceName"), "deviceName");
/// ```
pub fn local_name(qualified: &str) -> &str {
    if let Some((_, rest)) = qualified.rsplit_once('}') {
        return rest;
    }
    if let Some((_, rest)) = qualified.rsplit_once(':') {
        return rest;
    }
    qualified
}

/// Convert a camelCase tag name to snake_case.
///
/// Two substitution passes, then lowercase: first an underscore before each
/// capitalized word boundary, then an underscore between a lowercase letter
/// or digit and a following uppercase letter. A leading capital never gains
/// a leading underscore.
///
/// # Examples
/// ```
/// use openfda_converter::naming::camel_to_snake;
///
/// assert_eq!(camel_to_snake("deviceName"), "device_name");
/// assert_eq!(camel_to_snake("FDACompany"), "fda_company");
/// ```
pub fn camel_to_snake(name: &str) -> String {
    let step = WORD_BOUNDARY.replace_all(name, "${1}_${2}");
    CASE_STEP.replace_all(&step, "${1}_${2}").to_lowercase()
}

/// Strip the namespace and snake-case the local name in one step.
pub fn normalize_tag(qualified: &str) -> String {
    camel_to_snake(local_name(qualified))
}
