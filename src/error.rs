//! Top-level error kinds (`spec.md` §7): input validation that happens
//! before a call ever reaches the facade, plus everything
//! [`dubbo_client::ClientError`] already covers.

/// A fixed-form dubbo version, e.g. `2.4.10` or `2.4.x`.
const DUBBO_VERSION_PATTERN: &str = r"^\d+\.\d+(\.\d+|\.x)$";

#[derive(Debug, thiserror::Error)]
pub enum InvokeError {
    #[error("interface is required")]
    MissingInterface,

    #[error("method is required")]
    MissingMethod,

    #[error("exactly one of registryAddress or serviceURI is required")]
    MissingEndpoint,

    #[error("registryAddress {0:?} does not match ^[a-z]+://.+$")]
    MalformedRegistryUri(String),

    #[error("parameterValues rejected: {0}")]
    BadJsonValues(String),

    #[error("dubboVersion {given:?} does not match {DUBBO_VERSION_PATTERN}")]
    InvalidDubboVersion { given: String },

    #[error("timeoutMs {given} is not within (0, 300000]")]
    InvalidTimeout { given: u64 },

    #[error(transparent)]
    Client(#[from] dubbo_client::ClientError),
}

/// A hand-rolled check for `^\d+\.\d+(\.\d+|\.x)$` — small enough that
/// pulling in a regex engine for one call-site isn't worth it.
pub fn is_valid_dubbo_version(version: &str) -> bool {
    let mut parts = version.split('.');
    let Some(major) = parts.next() else { return false };
    let Some(minor) = parts.next() else { return false };
    let Some(patch) = parts.next() else { return false };
    if parts.next().is_some() {
        return false;
    }
    !major.is_empty()
        && major.bytes().all(|b| b.is_ascii_digit())
        && !minor.is_empty()
        && minor.bytes().all(|b| b.is_ascii_digit())
        && (patch == "x" || (!patch.is_empty() && patch.bytes().all(|b| b.is_ascii_digit())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_the_documented_default() {
        assert!(is_valid_dubbo_version("2.4.10"));
    }

    #[test]
    fn accepts_the_x_wildcard_patch() {
        assert!(is_valid_dubbo_version("2.4.x"));
    }

    #[test]
    fn rejects_a_two_component_version() {
        assert!(!is_valid_dubbo_version("2.4"));
    }

    #[test]
    fn rejects_non_numeric_components() {
        assert!(!is_valid_dubbo_version("a.b.c"));
    }
}
