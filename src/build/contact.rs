//! Grammars for contributor contact references.
//!
//! A contact is accepted if it is an email address (optionally written with a
//! `mailto:` marker) or, failing that, a hierarchical URL with an authority
//! component. Matching is performed on the whitespace-trimmed input and must
//! cover the whole string.

use crate::model::contributor::Contact;
use thiserror::Error;

const MAILTO: &str = "mailto:";

// Schemes whose authority must name a host. `file` is special but may omit it.
const HOST_REQUIRED_SCHEMES: [&str; 5] = ["http", "https", "ws", "wss", "ftp"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmailError {
    #[error("no '@' separator")]
    MissingAt,
    #[error("empty local part")]
    EmptyLocalPart,
    #[error("invalid character '{0}' in local part")]
    InvalidLocalChar(char),
    #[error("invalid character '{0}' in domain")]
    InvalidDomainChar(char),
    #[error("domain has no top-level label")]
    MissingTopLevelDomain,
    #[error("top-level label '{0}' must be alphabetic")]
    InvalidTopLevelDomain(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlError {
    #[error("invalid character {0:?}")]
    InvalidChar(char),
    #[error("no scheme")]
    MissingScheme,
    #[error("invalid scheme '{0}'")]
    InvalidScheme(String),
    #[error("no '//' authority")]
    MissingAuthority,
    #[error("empty host")]
    EmptyHost,
    #[error("invalid character '{0}' in host")]
    InvalidHostChar(char),
    #[error("invalid character '{0}' in user info")]
    InvalidUserInfoChar(char),
    #[error("invalid port '{0}'")]
    InvalidPort(String),
}

/// Both grammars rejected the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMismatch {
    pub email: EmailError,
    pub url: UrlError,
}

/// Parses a raw contact string, trying the email grammar before the URL one.
pub fn parse_contact(raw: &str) -> Result<Contact, ContactMismatch> {
    let trimmed = raw.trim();
    match match_email(trimmed) {
        Ok(address) => Ok(Contact::Email(address.to_string())),
        Err(email) => match match_url(trimmed) {
            Ok(url) => Ok(Contact::Url(url.to_string())),
            Err(url) => Err(ContactMismatch { email, url }),
        },
    }
}

/// Matches `[mailto:]local@domain.tld` and returns the address without the
/// marker.
pub fn match_email(s: &str) -> Result<&str, EmailError> {
    let address = match s.get(..MAILTO.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(MAILTO) => &s[MAILTO.len()..],
        _ => s,
    };

    let (local, domain) = address.split_once('@').ok_or(EmailError::MissingAt)?;
    if local.is_empty() {
        return Err(EmailError::EmptyLocalPart);
    }
    if let Some(c) = local.chars().find(|&c| !is_local_char(c)) {
        return Err(EmailError::InvalidLocalChar(c));
    }
    if let Some(c) = domain.chars().find(|&c| !is_domain_char(c)) {
        return Err(EmailError::InvalidDomainChar(c));
    }

    let (head, tld) = domain
        .rsplit_once('.')
        .ok_or(EmailError::MissingTopLevelDomain)?;
    if head.is_empty() || tld.is_empty() {
        return Err(EmailError::MissingTopLevelDomain);
    }
    if !tld.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(EmailError::InvalidTopLevelDomain(tld.to_string()));
    }

    Ok(address)
}

/// Matches `scheme://[userinfo@]host[:port][/path][?query][#fragment]`.
///
/// The host may be empty (as in `file:///tmp/x`) unless the scheme is one of
/// the web schemes that always address a server. The port may be empty.
pub fn match_url(s: &str) -> Result<&str, UrlError> {
    if let Some(c) = s.chars().find(|c| c.is_whitespace() || c.is_control()) {
        return Err(UrlError::InvalidChar(c));
    }

    let (scheme, rest) = s.split_once(':').ok_or(UrlError::MissingScheme)?;
    if !is_valid_scheme(scheme) {
        return Err(if scheme.is_empty() {
            UrlError::MissingScheme
        } else {
            UrlError::InvalidScheme(scheme.to_string())
        });
    }

    let rest = rest.strip_prefix("//").ok_or(UrlError::MissingAuthority)?;
    let authority_end = rest.find(&['/', '?', '#'][..]).unwrap_or(rest.len());
    let authority = &rest[..authority_end];

    let host_port = match authority.rsplit_once('@') {
        Some((userinfo, host_port)) => {
            if let Some(c) = userinfo
                .chars()
                .find(|&c| !(is_reg_name_char(c) || c == ':'))
            {
                return Err(UrlError::InvalidUserInfoChar(c));
            }
            host_port
        }
        None => authority,
    };

    let port = if let Some(literal) = host_port.strip_prefix('[') {
        let (inner, after) = literal
            .split_once(']')
            .ok_or(UrlError::InvalidHostChar('['))?;
        if inner.is_empty() {
            return Err(UrlError::EmptyHost);
        }
        if let Some(c) = inner
            .chars()
            .find(|&c| !(c.is_ascii_hexdigit() || c == ':' || c == '.'))
        {
            return Err(UrlError::InvalidHostChar(c));
        }
        match after {
            "" => None,
            _ => Some(
                after
                    .strip_prefix(':')
                    .ok_or_else(|| UrlError::InvalidPort(after.to_string()))?,
            ),
        }
    } else {
        let (host, port) = match host_port.rsplit_once(':') {
            Some((host, port)) => (host, Some(port)),
            None => (host_port, None),
        };
        if host.is_empty() && requires_host(scheme) {
            return Err(UrlError::EmptyHost);
        }
        if let Some(c) = host.chars().find(|&c| !is_reg_name_char(c)) {
            return Err(UrlError::InvalidHostChar(c));
        }
        port
    };

    if let Some(port) = port {
        let in_range = port.is_empty()
            || (port.len() <= 5
                && port.chars().all(|c| c.is_ascii_digit())
                && port.parse::<u32>().is_ok_and(|p| p <= u32::from(u16::MAX)));
        if !in_range {
            return Err(UrlError::InvalidPort(port.to_string()));
        }
    }

    Ok(s)
}

fn is_local_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '%' | '+' | '-')
}

fn is_domain_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '-')
}

fn is_valid_scheme(scheme: &str) -> bool {
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

fn requires_host(scheme: &str) -> bool {
    HOST_REQUIRED_SCHEMES
        .iter()
        .any(|s| s.eq_ignore_ascii_case(scheme))
}

// Unreserved characters, sub-delims and the '%' of percent-encoding.
fn is_reg_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(
            c,
            '-' | '.'
                | '_'
                | '~'
                | '%'
                | '!'
                | '$'
                | '&'
                | '\''
                | '('
                | ')'
                | '*'
                | '+'
                | ','
                | ';'
                | '='
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_with_and_without_mailto_normalize_alike() {
        assert_eq!(match_email("a@b.com"), Ok("a@b.com"));
        assert_eq!(match_email("mailto:a@b.com"), Ok("a@b.com"));
        assert_eq!(match_email("MAILTO:a@b.com"), Ok("a@b.com"));
        assert_eq!(
            parse_contact("mailto:a@b.com"),
            parse_contact("  a@b.com\n")
        );
    }

    #[test]
    fn email_accepts_dotted_local_part_and_subdomains() {
        assert_eq!(
            match_email("first.last+tag@mail.example.org"),
            Ok("first.last+tag@mail.example.org")
        );
    }

    #[test]
    fn email_rejections() {
        assert_eq!(match_email("ab.com"), Err(EmailError::MissingAt));
        assert_eq!(match_email("@b.com"), Err(EmailError::EmptyLocalPart));
        assert_eq!(match_email("a b@c.com"), Err(EmailError::InvalidLocalChar(' ')));
        assert_eq!(match_email("a@b@c.com"), Err(EmailError::InvalidDomainChar('@')));
        assert_eq!(match_email("a@localhost"), Err(EmailError::MissingTopLevelDomain));
        assert_eq!(match_email("a@.com"), Err(EmailError::MissingTopLevelDomain));
        assert_eq!(
            match_email("a@b.c0m"),
            Err(EmailError::InvalidTopLevelDomain("c0m".into()))
        );
    }

    #[test]
    fn url_accepts_common_forms() {
        for url in [
            "https://example.org",
            "http://example.org:8080/path?q=1#frag",
            "ftp://user:pw@files.example.org/pub",
            "http://[::1]:80/",
            "git+ssh://host/repo.git",
            "file:///tmp/x",
            "http://x.org:",
            "http://x.org:/path",
        ] {
            assert_eq!(match_url(url), Ok(url), "{url}");
        }
    }

    #[test]
    fn host_may_be_omitted_only_outside_web_schemes() {
        assert_eq!(
            parse_contact(" file:///tmp/x "),
            Ok(Contact::Url("file:///tmp/x".into()))
        );
        assert_eq!(match_url("custom:///resource"), Ok("custom:///resource"));
        assert_eq!(match_url("HTTPS:///path"), Err(UrlError::EmptyHost));
        assert_eq!(match_url("ws://"), Err(UrlError::EmptyHost));
        assert_eq!(match_url("http://[]/"), Err(UrlError::EmptyHost));
    }

    #[test]
    fn empty_port_is_accepted_but_bad_digits_are_not() {
        assert_eq!(
            parse_contact("http://x.org:"),
            Ok(Contact::Url("http://x.org:".into()))
        );
        assert_eq!(match_url("http://[::1]:/"), Ok("http://[::1]:/"));
        assert_eq!(
            match_url("http://x.org:8o"),
            Err(UrlError::InvalidPort("8o".into()))
        );
        assert_eq!(
            match_url("http://x.org:000080"),
            Err(UrlError::InvalidPort("000080".into()))
        );
    }

    #[test]
    fn url_rejections() {
        assert_eq!(match_url("not-an-email-or-url"), Err(UrlError::MissingScheme));
        assert_eq!(match_url("mailto:nobody"), Err(UrlError::MissingAuthority));
        assert_eq!(
            match_url("1http://x.org"),
            Err(UrlError::InvalidScheme("1http".into()))
        );
        assert_eq!(match_url("http://"), Err(UrlError::EmptyHost));
        assert_eq!(match_url("http://a b.org"), Err(UrlError::InvalidChar(' ')));
        assert_eq!(
            match_url("http://x.org:99999"),
            Err(UrlError::InvalidPort("99999".into()))
        );
        assert_eq!(match_url("http://x^y.org"), Err(UrlError::InvalidHostChar('^')));
    }

    #[test]
    fn email_is_preferred_over_url() {
        let contact = parse_contact("mailto:a@b.com").unwrap();
        assert!(contact.is_email());
        assert_eq!(contact.as_str(), "a@b.com");

        let contact = parse_contact(" https://example.org/me ").unwrap();
        assert!(contact.is_url());
        assert_eq!(contact.as_str(), "https://example.org/me");
    }

    #[test]
    fn neither_grammar_reports_both_failures() {
        let err = parse_contact("not-an-email-or-url").unwrap_err();
        assert_eq!(err.email, EmailError::MissingAt);
        assert_eq!(err.url, UrlError::MissingScheme);
    }
}
