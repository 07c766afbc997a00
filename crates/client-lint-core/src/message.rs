//! Message catalog for client convention diagnostics.

use serde::{Deserialize, Serialize};

/// Identifies one kind of convention violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MessageId {
    /// Client constructor lacks a `configuration` parameter.
    #[serde(rename = "missing-configuration-constructor-parameter")]
    MissingConfigParameter,
    /// Client lacks a `create_configuration` method.
    #[serde(rename = "missing-configuration-factory-method")]
    MissingFactoryMethod,
    /// `create_configuration` lacks a `**kwargs` parameter.
    #[serde(rename = "missing-configuration-factory-method-kwargs")]
    MissingFactoryKwargs,
    /// A `get_*`/`list_*` method returns a shape its name contradicts.
    #[serde(rename = "service-method-incorrect-return-type")]
    IncorrectReturnType,
}

impl MessageId {
    /// Every message, in code order.
    pub const ALL: [Self; 4] = [
        Self::MissingConfigParameter,
        Self::MissingFactoryMethod,
        Self::MissingFactoryKwargs,
        Self::IncorrectReturnType,
    ];

    /// Stable message code (e.g., `"C4712"`).
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::MissingConfigParameter => "C4712",
            Self::MissingFactoryMethod => "C4713",
            Self::MissingFactoryKwargs => "C4714",
            Self::IncorrectReturnType => "C4715",
        }
    }

    /// Kebab-case symbol used in config and suppression comments.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::MissingConfigParameter => "missing-configuration-constructor-parameter",
            Self::MissingFactoryMethod => "missing-configuration-factory-method",
            Self::MissingFactoryKwargs => "missing-configuration-factory-method-kwargs",
            Self::IncorrectReturnType => "service-method-incorrect-return-type",
        }
    }

    /// Short message shown at the offending node.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::MissingConfigParameter => "Is missing a configuration parameter.",
            Self::MissingFactoryMethod => "Is missing a create_configuration method.",
            Self::MissingFactoryKwargs => "Is missing a **kwargs argument.",
            Self::IncorrectReturnType => "Returns the wrong thing.",
        }
    }

    /// Longer explanation for `list-rules`.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::MissingConfigParameter => {
                "All client types should accept a configuration parameter."
            }
            Self::MissingFactoryMethod => {
                "All client types should have a create_configuration method."
            }
            Self::MissingFactoryKwargs => {
                "All client types should have a create_configuration method that takes a **kwargs parameter."
            }
            Self::IncorrectReturnType => "The method does not return what its name implies.",
        }
    }

    /// Looks a message up by code or symbol.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|id| id.code() == key || id.symbol() == key)
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_code_and_symbol() {
        assert_eq!(
            MessageId::from_key("C4713"),
            Some(MessageId::MissingFactoryMethod)
        );
        assert_eq!(
            MessageId::from_key("missing-configuration-factory-method-kwargs"),
            Some(MessageId::MissingFactoryKwargs)
        );
        assert_eq!(MessageId::from_key("C9999"), None);
    }

    #[test]
    fn codes_are_unique() {
        let mut codes: Vec<&str> = MessageId::ALL.iter().map(|m| m.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), MessageId::ALL.len());
    }
}
