use crate::{Error, Result};

use serde::Serialize;
use std::str::FromStr;

/// Prefix shared by every build property the generator reads.
const PROPERTY_PREFIX: &str = "mapto_";

/// Options shaping the emitted code.
///
/// None of these options participate in mapping resolution. The resolved
/// plan for a type is identical for every combination; only the rendering
/// of that plan changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Options {
    /// Visibility of generated constructors, update and conversion methods
    pub generated_methods_access_modifier: AccessModifier,

    /// Emit the null-propagating `Option<&Source>` conversion alongside the
    /// plain one
    pub support_nullable_reference_types: bool,

    /// Attach documentation to generated items
    pub generate_xml_document: bool,
}

/// Visibility applied to generated methods
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessModifier {
    /// `pub`
    #[default]
    Public,

    /// `pub(crate)`
    Internal,

    /// Inherited (module-private) visibility
    Private,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            generated_methods_access_modifier: AccessModifier::Public,
            support_nullable_reference_types: false,
            generate_xml_document: true,
        }
    }
}

impl Options {
    /// Create a new Options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the visibility of generated methods
    pub fn access_modifier(mut self, access: AccessModifier) -> Self {
        self.generated_methods_access_modifier = access;
        self
    }

    /// Enable or disable the null-propagating conversion
    pub fn support_nullable_reference_types(mut self, enabled: bool) -> Self {
        self.support_nullable_reference_types = enabled;
        self
    }

    /// Enable or disable documentation on generated items
    pub fn generate_xml_document(mut self, enabled: bool) -> Self {
        self.generate_xml_document = enabled;
        self
    }

    /// Reads options from host build properties.
    ///
    /// Keys are matched case-insensitively, may carry a `build_property.`
    /// prefix, and are named after the option with a `mapto_` prefix in
    /// either snake or camel case, e.g.
    /// `mapto_generated_methods_access_modifier = internal` or
    /// `MapTo_GeneratedMethodsAccessModifier = Internal`. Keys outside
    /// the `mapto_` namespace are ignored so the full property bag of a
    /// build can be passed through unfiltered.
    pub fn from_properties<I, K, V>(properties: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut options = Self::default();

        for (key, value) in properties {
            let key = key.as_ref().trim().to_ascii_lowercase();
            let value = value.as_ref().trim();
            let name = key.strip_prefix("build_property.").unwrap_or(&key);

            let Some(name) = name.strip_prefix(PROPERTY_PREFIX) else {
                continue;
            };

            // `generated_methods_access_modifier` and `GeneratedMethodsAccessModifier`
            // name the same option
            let name: String = name.chars().filter(|c| *c != '_').collect();

            match name.as_str() {
                "generatedmethodsaccessmodifier" => {
                    options.generated_methods_access_modifier = value
                        .parse()
                        .map_err(|_| Error::invalid_option(&key, value))?;
                }
                "supportnullablereferencetypes" => {
                    options.support_nullable_reference_types = parse_bool(&key, value)?;
                }
                "generatexmldocument" => {
                    options.generate_xml_document = parse_bool(&key, value)?;
                }
                _ => {
                    tracing::warn!(property = %key, "ignoring unknown mapto build property");
                }
            }
        }

        Ok(options)
    }
}

impl AccessModifier {
    pub fn as_str(self) -> &'static str {
        match self {
            AccessModifier::Public => "public",
            AccessModifier::Internal => "internal",
            AccessModifier::Private => "private",
        }
    }
}

impl FromStr for AccessModifier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "public" | "pub" => Ok(AccessModifier::Public),
            "internal" | "crate" | "pub(crate)" => Ok(AccessModifier::Internal),
            "private" => Ok(AccessModifier::Private),
            _ => Err(Error::invalid_option("generated_methods_access_modifier", s)),
        }
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(Error::invalid_option(key, value)),
    }
}
