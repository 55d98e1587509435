//! Endpoint URI validation (`spec.md` §4.F): accepted with or without a
//! `dubbo://` scheme, any path after `host:port` ignored, IPv6 handled
//! by splitting on the *last* colon.

use crate::ClientError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
}

pub fn parse_endpoint(uri: &str) -> Result<Endpoint, ClientError> {
    let without_scheme = uri.strip_prefix("dubbo://").unwrap_or(uri);
    let host_port = without_scheme.split('/').next().unwrap_or(without_scheme);

    let last_colon = host_port.rfind(':').ok_or_else(|| ClientError::MalformedEndpoint {
        uri: uri.to_owned(),
    })?;
    let host = &host_port[..last_colon];
    let port_str = &host_port[last_colon + 1..];

    if host.is_empty() {
        return Err(ClientError::MalformedEndpoint { uri: uri.to_owned() });
    }
    let port: u16 = port_str.parse().map_err(|_| ClientError::MalformedEndpoint {
        uri: uri.to_owned(),
    })?;
    if port == 0 {
        return Err(ClientError::MalformedEndpoint { uri: uri.to_owned() });
    }

    Ok(Endpoint {
        host: host.to_owned(),
        port,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_bare_host_port() {
        let endpoint = parse_endpoint("10.0.0.1:20880").unwrap();
        assert_eq!(endpoint.host, "10.0.0.1");
        assert_eq!(endpoint.port, 20880);
    }

    #[test]
    fn strips_the_dubbo_scheme() {
        let endpoint = parse_endpoint("dubbo://10.0.0.1:20880").unwrap();
        assert_eq!(endpoint.host, "10.0.0.1");
        assert_eq!(endpoint.port, 20880);
    }

    #[test]
    fn ignores_a_trailing_path() {
        let endpoint = parse_endpoint("dubbo://10.0.0.1:20880/com.x.Foo").unwrap();
        assert_eq!(endpoint.port, 20880);
    }

    #[test]
    fn splits_ipv6_on_the_last_colon() {
        let endpoint = parse_endpoint("[::1]:20880").unwrap();
        assert_eq!(endpoint.host, "[::1]");
        assert_eq!(endpoint.port, 20880);
    }

    #[test]
    fn rejects_missing_port() {
        assert!(parse_endpoint("10.0.0.1").is_err());
    }

    #[test]
    fn rejects_port_zero() {
        assert!(parse_endpoint("10.0.0.1:0").is_err());
    }

    #[test]
    fn rejects_non_numeric_port() {
        assert!(parse_endpoint("10.0.0.1:abc").is_err());
    }
}
