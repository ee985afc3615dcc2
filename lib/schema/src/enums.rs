//! Ordered enum registry
//!
//! Holds, per ordered categorical type, its members in declared order.
//! Member lookup returns `None` for values outside the enum.

use ahash::AHashMap;
use std::collections::BTreeMap;

/// An ordered categorical type
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedEnum {
    name: String,
    members: Vec<String>,
    positions: AHashMap<String, usize>,
}

impl OrderedEnum {
    pub fn new(name: impl Into<String>, members: Vec<String>) -> Self {
        let positions = members
            .iter()
            .enumerate()
            .map(|(i, m)| (m.clone(), i))
            .collect();
        Self {
            name: name.into(),
            members,
            positions,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn members(&self) -> &[String] {
        &self.members
    }

    pub fn cardinality(&self) -> usize {
        self.members.len()
    }

    /// Zero-based position of `member`, or `None` if it is not a member
    #[inline]
    pub fn position(&self, member: &str) -> Option<usize> {
        self.positions.get(member).copied()
    }
}

/// Registry of ordered enums keyed by type name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnumRegistry {
    enums: AHashMap<String, OrderedEnum>,
}

impl EnumRegistry {
    /// Build from descriptor enum declarations
    pub fn from_declarations(declarations: &BTreeMap<String, Vec<String>>) -> Self {
        let enums = declarations
            .iter()
            .map(|(name, members)| (name.clone(), OrderedEnum::new(name.clone(), members.clone())))
            .collect();
        Self { enums }
    }

    pub fn get(&self, name: &str) -> Option<&OrderedEnum> {
        self.enums.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.enums.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.enums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enums.is_empty()
    }
}
