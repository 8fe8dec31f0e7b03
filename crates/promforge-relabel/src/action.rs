//! The relabel action set.

use std::fmt;

use serde::{Deserialize, Serialize};

/// What a relabel rule does with its matched input.
///
/// Serialized in the lowercase single-word form Prometheus reads, e.g.
/// `HashMod` becomes `hashmod`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelabelAction {
    /// Write a regex replacement of the concatenated source into the
    /// target label. The default when no action is given.
    Replace,
    /// Keep targets or series whose concatenated source matches.
    Keep,
    /// Drop targets or series whose concatenated source matches.
    Drop,
    /// Write the hash of the concatenated source modulo `modulus` into
    /// the target label.
    HashMod,
    /// Copy every label whose name matches the regex to the name given
    /// by the replacement.
    LabelMap,
    /// Remove every label whose name matches the regex.
    LabelDrop,
    /// Keep only labels whose name matches the regex.
    LabelKeep,
    /// Lowercase the concatenated source into the target label.
    Lowercase,
    /// Uppercase the concatenated source into the target label.
    Uppercase,
    /// Keep targets where the concatenated source equals the target
    /// label's value.
    KeepEqual,
    /// Drop targets where the concatenated source equals the target
    /// label's value.
    DropEqual,
}

impl RelabelAction {
    /// Returns the wire name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Replace => "replace",
            Self::Keep => "keep",
            Self::Drop => "drop",
            Self::HashMod => "hashmod",
            Self::LabelMap => "labelmap",
            Self::LabelDrop => "labeldrop",
            Self::LabelKeep => "labelkeep",
            Self::Lowercase => "lowercase",
            Self::Uppercase => "uppercase",
            Self::KeepEqual => "keepequal",
            Self::DropEqual => "dropequal",
        }
    }
}

impl fmt::Display for RelabelAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case(RelabelAction::Replace, "replace")]
    #[test_case(RelabelAction::Keep, "keep")]
    #[test_case(RelabelAction::Drop, "drop")]
    #[test_case(RelabelAction::HashMod, "hashmod")]
    #[test_case(RelabelAction::LabelMap, "labelmap")]
    #[test_case(RelabelAction::LabelDrop, "labeldrop")]
    #[test_case(RelabelAction::LabelKeep, "labelkeep")]
    #[test_case(RelabelAction::Lowercase, "lowercase")]
    #[test_case(RelabelAction::Uppercase, "uppercase")]
    #[test_case(RelabelAction::KeepEqual, "keepequal")]
    #[test_case(RelabelAction::DropEqual, "dropequal")]
    fn wire_name_is_lowercase(action: RelabelAction, expected: &str) {
        assert_eq!(action.as_str(), expected);
        let yaml = serde_yaml::to_string(&action).unwrap();
        assert_eq!(yaml.trim(), expected);
    }

    #[test]
    fn deserializes_from_wire_name() {
        let action: RelabelAction = serde_yaml::from_str("labeldrop").unwrap();
        assert_eq!(action, RelabelAction::LabelDrop);
    }
}
