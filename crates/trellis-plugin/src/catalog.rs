// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Entity capability catalog.
//!
//! Each domain-entity type declares, in one place at bootstrap, the
//! interfaces it satisfies. The registry widens a plugin's capability set
//! through this table when matching components against its base entity.

use std::collections::HashMap;

/// Static table of entity types and the interfaces they implement.
#[derive(Debug, Clone, Default)]
pub struct EntityCatalog {
    entities: HashMap<String, Vec<String>>,
}

impl EntityCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare `entity` and its interfaces. Re-declaring replaces the list.
    pub fn register<I, S>(&mut self, entity: impl Into<String>, interfaces: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entities
            .insert(entity.into(), interfaces.into_iter().map(Into::into).collect());
        self
    }

    /// Interfaces of a declared entity, `None` if the entity is unknown.
    pub fn interfaces_of(&self, entity: &str) -> Option<&[String]> {
        self.entities.get(entity).map(Vec::as_slice)
    }

    pub fn contains_entity(&self, entity: &str) -> bool {
        self.entities.contains_key(entity)
    }

    /// Whether `type_name` is a declared entity or an interface of one.
    pub fn knows(&self, type_name: &str) -> bool {
        self.contains_entity(type_name)
            || self
                .entities
                .values()
                .any(|interfaces| interfaces.iter().any(|i| i == type_name))
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
