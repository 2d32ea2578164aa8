use super::Transformer;
use crate::error::ValidationError;
use std::{
    fmt,
    net::{IpAddr, Ipv4Addr, Ipv6Addr},
    str::FromStr,
};

const FQDN_MAX_LEN: usize = 253;
const LABEL_MAX_LEN: usize = 63;

pub fn ip_address() -> Transformer<IpAddr> {
    Box::new(|s: &str| {
        s.parse::<IpAddr>().map_err(|e| {
            ValidationError::new(format!("'{}' does not appear to be an IP address: {}", s, e))
        })
    })
}

pub fn ip_network() -> Transformer<IpNetwork> {
    Box::new(|s: &str| s.parse::<IpNetwork>())
}

pub fn ip_interface() -> Transformer<IpInterface> {
    Box::new(|s: &str| s.parse::<IpInterface>())
}

pub fn url_parse() -> Transformer<url::Url> {
    Box::new(|s: &str| {
        url::Url::parse(s).map_err(|e| ValidationError::new(format!("'{}': {}", s, e)))
    })
}

pub fn fqdn() -> Transformer<Fqdn> {
    Box::new(|s: &str| s.parse::<Fqdn>())
}

/// An address with a prefix length, host bits allowed (`192.168.0.7/24`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IpInterface {
    pub addr: IpAddr,
    pub prefix_len: u8,
}

impl IpInterface {
    /// The network this interface belongs to
    pub fn network(&self) -> IpNetwork {
        IpNetwork {
            addr: mask(self.addr, self.prefix_len),
            prefix_len: self.prefix_len,
        }
    }
}

impl FromStr for IpInterface {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (addr, prefix_len) = split_prefix(s, "interface")?;
        Ok(Self { addr, prefix_len })
    }
}

impl fmt::Display for IpInterface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.addr, self.prefix_len)
    }
}

/// A network address with a prefix length; host bits must be zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IpNetwork {
    pub addr: IpAddr,
    pub prefix_len: u8,
}

impl IpNetwork {
    pub fn contains(&self, ip: IpAddr) -> bool {
        ip.is_ipv4() == self.addr.is_ipv4() && mask(ip, self.prefix_len) == self.addr
    }
}

impl FromStr for IpNetwork {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (addr, prefix_len) = split_prefix(s, "network")?;
        if mask(addr, prefix_len) != addr {
            return Err(ValidationError::new(format!("'{}' has host bits set", s)));
        }
        Ok(Self { addr, prefix_len })
    }
}

impl fmt::Display for IpNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.addr, self.prefix_len)
    }
}

/// Parses `addr[/prefix]`; a missing prefix means a single host
fn split_prefix(s: &str, what: &str) -> Result<(IpAddr, u8), ValidationError> {
    let invalid = |reason: String| {
        ValidationError::new(format!(
            "'{}' does not appear to be an IPv4 or IPv6 {}: {}",
            s, what, reason
        ))
    };

    let (addr, prefix) = match s.split_once('/') {
        Some((addr, prefix)) => (addr, Some(prefix)),
        None => (s, None),
    };
    let addr: IpAddr = addr.parse().map_err(|e| invalid(format!("{}", e)))?;
    let max_len = if addr.is_ipv4() { 32 } else { 128 };

    let prefix_len = match prefix {
        None => max_len,
        Some(prefix) => {
            let len: u8 = prefix
                .parse()
                .map_err(|_| invalid(format!("invalid prefix length '{}'", prefix)))?;
            if len > max_len {
                return Err(invalid(format!("prefix length {} exceeds {}", len, max_len)));
            }
            len
        }
    };
    Ok((addr, prefix_len))
}

fn mask(addr: IpAddr, prefix_len: u8) -> IpAddr {
    match addr {
        IpAddr::V4(v4) => {
            let bits = u32::from(v4);
            let mask = u32::MAX.checked_shl(32 - u32::from(prefix_len)).unwrap_or(0);
            IpAddr::V4(Ipv4Addr::from(bits & mask))
        }
        IpAddr::V6(v6) => {
            let bits = u128::from(v6);
            let mask = u128::MAX.checked_shl(128 - u32::from(prefix_len)).unwrap_or(0);
            IpAddr::V6(Ipv6Addr::from(bits & mask))
        }
    }
}

/// Fully qualified domain name, stored without the trailing root dot
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Fqdn(String);

impl Fqdn {
    /// Name without the trailing dot (`example.com`)
    pub fn relative(&self) -> &str {
        &self.0
    }

    /// Name with the trailing dot (`example.com.`)
    pub fn absolute(&self) -> String {
        format!("{}.", self.0)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }
}

impl FromStr for Fqdn {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::new(format!("{} is not a valid FQDN", s));

        let name = s.strip_suffix('.').unwrap_or(s);
        if name.is_empty() || name.len() > FQDN_MAX_LEN {
            return Err(invalid());
        }

        let labels: Vec<&str> = name.split('.').collect();
        if labels.len() < 2 {
            return Err(invalid());
        }
        let valid_label = |label: &str| {
            !label.is_empty()
                && label.len() <= LABEL_MAX_LEN
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        };
        if !labels.iter().all(|label| valid_label(label)) {
            return Err(invalid());
        }
        // a TLD made only of digits would make the name an address
        if labels
            .last()
            .is_some_and(|tld| tld.chars().all(|c| c.is_ascii_digit()))
        {
            return Err(invalid());
        }

        Ok(Self(name.to_ascii_lowercase()))
    }
}

impl fmt::Display for Fqdn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
