//! Selection options
//!
//! A selection names an entity and how far to traverse its hierarchy. It is
//! turned into a concrete set of target ids by a selector resolver.

use crate::entity::{EntityKind, EntityReference};
use crate::error::ModelError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Breadth of hierarchy traversal applied when resolving a selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HierarchyQueryScope {
    /// The referenced entity only
    Exact,
    /// The referenced entity and its ancestors
    Parents,
    /// The referenced entity and its descendants
    #[default]
    Children,
}

impl HierarchyQueryScope {
    /// Wire name of this scope
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            HierarchyQueryScope::Exact => "EXACT",
            HierarchyQueryScope::Parents => "PARENTS",
            HierarchyQueryScope::Children => "CHILDREN",
        }
    }
}

impl fmt::Display for HierarchyQueryScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HierarchyQueryScope {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "EXACT" => Ok(HierarchyQueryScope::Exact),
            "PARENTS" => Ok(HierarchyQueryScope::Parents),
            "CHILDREN" => Ok(HierarchyQueryScope::Children),
            _ => Err(ModelError::UnknownScope(s.to_string())),
        }
    }
}

/// Criteria used to resolve a set of target entities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionOptions {
    /// Entity the selection is anchored on
    pub entity_reference: EntityReference,
    /// Traversal breadth
    #[serde(default)]
    pub scope: HierarchyQueryScope,
}

impl SelectionOptions {
    /// Create new selection options
    #[inline]
    #[must_use]
    pub fn new(entity_reference: EntityReference, scope: HierarchyQueryScope) -> Self {
        Self {
            entity_reference,
            scope,
        }
    }

    /// Selection over a single entity with `EXACT` scope
    #[inline]
    #[must_use]
    pub fn exact(entity_reference: EntityReference) -> Self {
        Self::new(entity_reference, HierarchyQueryScope::Exact)
    }

    /// Copy of these options with the scope replaced
    #[inline]
    #[must_use]
    pub fn with_scope(&self, scope: HierarchyQueryScope) -> Self {
        Self {
            entity_reference: self.entity_reference,
            scope,
        }
    }

    /// Kind of the anchoring entity
    #[inline]
    #[must_use]
    pub fn kind(&self) -> EntityKind {
        self.entity_reference.kind
    }
}

impl fmt::Display for SelectionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.entity_reference, self.scope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_scope_leaves_original_untouched() {
        let original = SelectionOptions::new(
            EntityReference::new(EntityKind::OrgUnit, 3),
            HierarchyQueryScope::Children,
        );
        let narrowed = original.with_scope(HierarchyQueryScope::Exact);

        assert_eq!(original.scope, HierarchyQueryScope::Children);
        assert_eq!(narrowed.scope, HierarchyQueryScope::Exact);
        assert_eq!(narrowed.entity_reference, original.entity_reference);
    }

    #[test]
    fn scope_defaults_to_children_when_absent() {
        let json = r#"{"entityReference":{"kind":"ORG_UNIT","id":9}}"#;
        let options: SelectionOptions = serde_json::from_str(json).unwrap();
        assert_eq!(options.scope, HierarchyQueryScope::Children);
    }

    #[test]
    fn scope_parse() {
        assert_eq!("exact".parse::<HierarchyQueryScope>().unwrap(), HierarchyQueryScope::Exact);
        assert!("sideways".parse::<HierarchyQueryScope>().is_err());
    }
}
