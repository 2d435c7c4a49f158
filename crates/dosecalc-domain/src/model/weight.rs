//! Weight acceptance policy

use serde::{Deserialize, Serialize};

/// Which numeric weights are accepted once the text parses as a number
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightPolicy {
    /// Zero and negative weights are rejected as invalid
    #[default]
    RequirePositive,
    /// Any finite number is accepted; zero or negative weights yield zero or negative rates
    AllowNonPositive,
}

impl WeightPolicy {
    pub fn accepts(&self, weight_kg: f64) -> bool {
        match self {
            WeightPolicy::RequirePositive => weight_kg > 0.0,
            WeightPolicy::AllowNonPositive => true,
        }
    }
}

impl std::fmt::Display for WeightPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WeightPolicy::RequirePositive => write!(f, "require_positive"),
            WeightPolicy::AllowNonPositive => write!(f, "allow_non_positive"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_positive() {
        let policy = WeightPolicy::RequirePositive;
        assert!(policy.accepts(0.5));
        assert!(!policy.accepts(0.0));
        assert!(!policy.accepts(-3.0));
    }

    #[test]
    fn test_allow_non_positive() {
        let policy = WeightPolicy::AllowNonPositive;
        assert!(policy.accepts(0.0));
        assert!(policy.accepts(-3.0));
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&WeightPolicy::AllowNonPositive).unwrap();
        assert_eq!(json, "\"allow_non_positive\"");
        assert_eq!(WeightPolicy::default().to_string(), "require_positive");
    }
}
