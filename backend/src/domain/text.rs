//! Helper macro for trimmed, non-blank string newtypes.
//!
//! Several domain fields (names, area codes, issue titles) share the same
//! contract: the caller's input is trimmed and must not be empty afterwards.
//! The macro keeps those types distinct without repeating the boilerplate.

macro_rules! define_text_newtype {
    (
        $(#[$outer:meta])*
        pub struct $name:ident => $field:literal;
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Validate and construct the value, trimming surrounding whitespace.
            pub fn new(value: impl AsRef<str>) -> Result<Self, $crate::domain::FieldValidationError> {
                let trimmed = value.as_ref().trim();
                if trimmed.is_empty() {
                    return Err($crate::domain::FieldValidationError::blank($field));
                }
                Ok(Self(trimmed.to_owned()))
            }

            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = $crate::domain::FieldValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }
    };
}

pub(crate) use define_text_newtype;

/// Validation failure for a single named input field.
///
/// The `field` name uses the wire (camelCase) spelling so inbound adapters
/// can surface it to clients unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldValidationError {
    /// Required field was missing or blank once trimmed.
    #[error("{field} must not be empty")]
    Blank { field: &'static str },
    /// Field was present but not one of the accepted values.
    #[error("{field} has an unsupported value: {value}")]
    Unsupported { field: &'static str, value: String },
}

impl FieldValidationError {
    /// Helper for blank inputs.
    pub fn blank(field: &'static str) -> Self {
        Self::Blank { field }
    }

    /// Helper for values outside an enumerated set.
    pub fn unsupported(field: &'static str, value: impl Into<String>) -> Self {
        Self::Unsupported {
            field,
            value: value.into(),
        }
    }

    /// Wire name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Blank { field } | Self::Unsupported { field, .. } => field,
        }
    }

    /// Stable machine-readable reason code.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Blank { .. } => "blank",
            Self::Unsupported { .. } => "unsupported",
        }
    }
}
