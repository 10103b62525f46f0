//! Naming policy shared by all generators.
//!
//! The testable-abstraction and abstraction-key generators must agree on the
//! interface name and the test-double prefix, so both derive every name from
//! the same [`NamingPolicy`] value.

/// Names used for synthesized declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NamingPolicy {
    /// Interface nested in every abstracted type.
    pub interface_name: String,
    /// Prefix of the test-double type name.
    pub test_double_prefix: String,
    /// Suffix of stored handler fields in test doubles.
    pub handler_suffix: String,
    /// Suffix of dependency-key enumerations.
    pub key_suffix: String,
    /// Protocol adopted by dependency keys.
    pub key_protocol: String,
    /// Name of the mirrored label enumeration.
    pub case_labels_name: String,
    /// Compilation condition guarding test-only declarations.
    pub debug_condition: String,
    pub binding_prefix: String,
    pub show_prefix: String,
    pub hide_prefix: String,
}

impl Default for NamingPolicy {
    fn default() -> Self {
        Self {
            interface_name: "AnyImpl".to_string(),
            test_double_prefix: "Testable".to_string(),
            handler_suffix: "Handler".to_string(),
            key_suffix: "Key".to_string(),
            key_protocol: "DependencyKey".to_string(),
            case_labels_name: "CaseLabels".to_string(),
            debug_condition: "DEBUG".to_string(),
            binding_prefix: "bind".to_string(),
            show_prefix: "show".to_string(),
            hide_prefix: "hide".to_string(),
        }
    }
}

impl NamingPolicy {
    /// `TestableHost`
    pub fn test_double_name(&self, host: &str) -> String {
        format!("{}{}", self.test_double_prefix, host)
    }

    /// `Host.AnyImpl`
    pub fn interface_path(&self, host: &str) -> String {
        format!("{}.{}", host, self.interface_name)
    }

    /// `Host.TestableHost`; a qualified host keeps its path, as in
    /// `Feature.Host.TestableHost`.
    pub fn test_double_path(&self, host: &str) -> String {
        format!("{}.{}", host, self.test_double_name(last_segment(host)))
    }

    /// `fetchHandler` for `fetch`.
    pub fn handler_name(&self, function: &str) -> String {
        format!("{}{}", function, self.handler_suffix)
    }

    /// `HostKey`
    pub fn key_name(&self, host: &str) -> String {
        format!("{}{}", last_segment(host), self.key_suffix)
    }

    /// Global accessor of a dependency key: the host name with a lowercase initial.
    pub fn key_accessor_name(&self, host: &str) -> String {
        lowercase_first(last_segment(host))
    }

    /// `bindStateCounter` for target `state` and property `counter`.
    pub fn binding_name(&self, target: &str, property: &str) -> String {
        format!(
            "{}{}{}",
            self.binding_prefix,
            uppercase_first(target),
            uppercase_first(property)
        )
    }

    pub fn show_name(&self, name: &str) -> String {
        format!("{}{}", self.show_prefix, name)
    }

    pub fn hide_name(&self, name: &str) -> String {
        format!("{}{}", self.hide_prefix, name)
    }

    /// Companion field storing the coupled value of a mutator pair.
    pub fn companion_field_name(&self, field: &str, coupled_type: &str) -> String {
        format!("{}_{}", field, coupled_type)
    }
}

/// `Host` for `Feature.Host`.
pub fn last_segment(path: &str) -> &str {
    path.rsplit('.').next().unwrap_or(path)
}

/// Uppercase the first character only, leaving the rest untouched.
pub fn uppercase_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lowercase the first character only, leaving the rest untouched.
pub fn lowercase_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
