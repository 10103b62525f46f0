//! Generator configuration.

use crate::naming::NamingPolicy;

/// Attribute names recognized as markers.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MarkerNames {
    pub case_labels: String,
    pub mutators: String,
    pub bindings: String,
    pub bind_target: String,
    pub bind_source: String,
    pub testable: String,
    pub ignore: String,
    pub abstraction_key: String,
}

impl Default for MarkerNames {
    fn default() -> Self {
        Self {
            case_labels: "EnumCaseLabels".to_string(),
            mutators: "GenerateMutators".to_string(),
            bindings: "GenerateBindings".to_string(),
            bind_target: "BindTarget".to_string(),
            bind_source: "Bindable".to_string(),
            testable: "GenerateTestableImpl".to_string(),
            ignore: "IgnoreForImpl".to_string(),
            abstraction_key: "GenerateKeyForImpl".to_string(),
        }
    }
}

/// Configuration shared by every generator invocation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GeneratorConfig {
    pub naming: NamingPolicy,
    pub markers: MarkerNames,
}
