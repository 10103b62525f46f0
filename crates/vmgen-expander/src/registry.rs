//! Marker registry mapping attribute names to generators.

use indexmap::IndexMap;
use vmgen_core::MarkerNames;

/// Generator behind a marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    CaseLabels,
    Mutators,
    Bindings,
    BindTarget,
    BindSource,
    Testable,
    Ignore,
    AbstractionKey,
}

impl MarkerKind {
    /// Markers expanded at file scope rather than attached to a declaration.
    pub fn is_freestanding(self) -> bool {
        self == MarkerKind::AbstractionKey
    }
}

/// A registry of marker names.
#[derive(Debug, Clone, Default)]
pub struct MarkerRegistry {
    markers: IndexMap<String, MarkerKind>,
}

impl MarkerRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            markers: IndexMap::new(),
        }
    }

    /// Registry holding every configured marker name.
    pub fn from_names(names: &MarkerNames) -> Self {
        let mut registry = Self::new();
        registry.register(&names.case_labels, MarkerKind::CaseLabels);
        registry.register(&names.mutators, MarkerKind::Mutators);
        registry.register(&names.bindings, MarkerKind::Bindings);
        registry.register(&names.bind_target, MarkerKind::BindTarget);
        registry.register(&names.bind_source, MarkerKind::BindSource);
        registry.register(&names.testable, MarkerKind::Testable);
        registry.register(&names.ignore, MarkerKind::Ignore);
        registry.register(&names.abstraction_key, MarkerKind::AbstractionKey);
        registry
    }

    /// Register a marker name. A later registration replaces an earlier one.
    pub fn register(&mut self, name: &str, kind: MarkerKind) {
        self.markers.insert(name.to_string(), kind);
    }

    pub fn get(&self, name: &str) -> Option<MarkerKind> {
        self.markers.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.markers.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}
