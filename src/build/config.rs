//! Configuration for the record builders.
//!
//! [`BuildConfig`] controls how failures are reported and how strict the
//! optional checks are. The defaults reproduce the legacy behavior: stop at
//! the first failing field, accept empty names, accept any text as an atomic
//! symbol and ignore unrecognized input fields.

use serde::Deserialize;

/// How many field errors a build attempt reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorMode {
    /// Stop at the first failing field.
    #[default]
    FailFast,

    /// Validate every field and report all failures together.
    ///
    /// Each field still stops at its own first failure.
    CollectAll,
}

/// Settings for [`build_molecule`](super::build_molecule) and
/// [`build_contributor`](super::build_contributor).
///
/// # Examples
///
/// ```
/// use molecule_record::{BuildConfig, ErrorMode};
///
/// let strict = BuildConfig {
///     error_mode: ErrorMode::CollectAll,
///     allow_empty_name: false,
///     ..Default::default()
/// };
///
/// let from_toml = BuildConfig::from_toml_str(
///     r#"
///     error_mode = "collect_all"
///     allow_empty_name = false
///     "#,
/// )
/// .unwrap();
///
/// assert_eq!(strict, from_toml);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Whether to stop at the first failing field or collect them all.
    pub error_mode: ErrorMode,

    /// Accept `""` as a molecule or contributor name.
    pub allow_empty_name: bool,

    /// Require every atomic symbol to name a periodic-table element.
    pub check_element_symbols: bool,

    /// Reject input fields the record does not define.
    pub deny_unknown_fields: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::FailFast,
            allow_empty_name: true,
            check_element_symbols: false,
            deny_unknown_fields: false,
        }
    }
}

impl BuildConfig {
    /// Loads a configuration from TOML. Keys that are absent keep their
    /// default values.
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    pub(crate) fn collect_all(&self) -> bool {
        self.error_mode == ErrorMode::CollectAll
    }
}
