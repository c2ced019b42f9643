use crate::build::{self, BuildConfig, Error as BuildError};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;

/// A validated contact reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Contact {
    /// Email address, stored without any `mailto:` marker.
    Email(String),
    Url(String),
}

impl Contact {
    pub fn as_str(&self) -> &str {
        match self {
            Contact::Email(s) | Contact::Url(s) => s,
        }
    }

    pub fn is_email(&self) -> bool {
        matches!(self, Contact::Email(_))
    }

    pub fn is_url(&self) -> bool {
        matches!(self, Contact::Url(_))
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attribution for a molecule record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Value")]
pub struct Contributor {
    name: String,
    contact: Contact,
    organization: Option<String>,
}

impl Contributor {
    pub(crate) fn assemble(name: String, contact: Contact, organization: Option<String>) -> Self {
        Self {
            name,
            contact,
            organization,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn contact(&self) -> &Contact {
        &self.contact
    }

    pub fn organization(&self) -> Option<&str> {
        self.organization.as_deref()
    }
}

impl TryFrom<&Value> for Contributor {
    type Error = BuildError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        build::build_contributor(value, &BuildConfig::default())
    }
}

impl TryFrom<Value> for Contributor {
    type Error = BuildError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::try_from(&value)
    }
}
