// FICHIER : provisioner/src/provision/report.rs

use crate::utils::prelude::*;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum CollectionOutcome {
    Created,
    AlreadyExists,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum AttributeOutcome {
    Created,
    AlreadyExists,
    /// Type inconnu : ignoré sans appel distant.
    Unsupported(String),
    Failed(String),
    /// Non tenté : la collection a été abandonnée avant.
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeReport {
    pub key: String,
    pub outcome: AttributeOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionReport {
    pub id: String,
    pub name: String,
    pub outcome: CollectionOutcome,
    pub attributes: Vec<AttributeReport>,
}

impl CollectionReport {
    /// Vrai si la collection ou l'un de ses attributs a échoué.
    pub fn has_failure(&self) -> bool {
        matches!(self.outcome, CollectionOutcome::Failed(_))
            || self
                .attributes
                .iter()
                .any(|a| matches!(a.outcome, AttributeOutcome::Failed(_)))
    }

    pub fn attribute(&self, key: &str) -> Option<&AttributeOutcome> {
        self.attributes
            .iter()
            .find(|a| a.key == key)
            .map(|a| &a.outcome)
    }
}

/// Bilan d'un run, collection par collection, dans l'ordre du catalogue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProvisionReport {
    pub collections: Vec<CollectionReport>,
}

impl ProvisionReport {
    pub fn collection(&self, id: &str) -> Option<&CollectionReport> {
        self.collections.iter().find(|c| c.id == id)
    }

    /// Ressources (collections + attributs) créées par ce run.
    pub fn created_count(&self) -> usize {
        self.collections
            .iter()
            .map(|c| {
                usize::from(c.outcome == CollectionOutcome::Created)
                    + c.attributes
                        .iter()
                        .filter(|a| a.outcome == AttributeOutcome::Created)
                        .count()
            })
            .sum()
    }

    /// Ressources déjà présentes côté serveur.
    pub fn existing_count(&self) -> usize {
        self.collections
            .iter()
            .map(|c| {
                usize::from(c.outcome == CollectionOutcome::AlreadyExists)
                    + c.attributes
                        .iter()
                        .filter(|a| a.outcome == AttributeOutcome::AlreadyExists)
                        .count()
            })
            .sum()
    }

    pub fn unsupported_count(&self) -> usize {
        self.collections
            .iter()
            .flat_map(|c| c.attributes.iter())
            .filter(|a| matches!(a.outcome, AttributeOutcome::Unsupported(_)))
            .count()
    }

    pub fn failed_collections(&self) -> Vec<&str> {
        self.collections
            .iter()
            .filter(|c| c.has_failure())
            .map(|c| c.id.as_str())
            .collect()
    }

    pub fn is_clean(&self) -> bool {
        self.collections.iter().all(|c| !c.has_failure())
    }
}
