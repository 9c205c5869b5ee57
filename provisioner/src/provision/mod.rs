// FICHIER : provisioner/src/provision/mod.rs

//! Application du catalogue sur la base distante.
//!
//! Strictement séquentiel : une collection à la fois, un attribut à la fois,
//! avec une pause fixe entre deux appels. Un 409 signifie "déjà là" et n'est
//! jamais une erreur ; toute autre erreur abandonne la collection courante
//! mais pas le run.

pub mod pacing;
pub mod report;

pub use self::pacing::PacingPolicy;
pub use self::report::{
    AttributeOutcome, AttributeReport, CollectionOutcome, CollectionReport, ProvisionReport,
};

use crate::catalog::{AttributeKind, AttributeSpec, Catalog, CollectionSpec, SizePolicy};
use crate::remote::{
    public_permissions, AttributeRequest, BooleanAttribute, CollectionRequest, DateTimeAttribute,
    FloatAttribute, IntegerAttribute, SchemaApi, StringAttribute,
};
use crate::utils::i18n::t;
use crate::utils::prelude::*;
use crate::{user_error, user_info, user_success, user_warn};
use std::fmt;

/// Bornes appliquées à tout attribut entier, quelle que soit sa clé.
pub const INTEGER_MIN: i64 = 0;
pub const INTEGER_MAX: i64 = 10_000;

/// Bornes appliquées à tout attribut flottant, quelle que soit sa clé.
pub const FLOAT_MIN: f64 = 0.0;
pub const FLOAT_MAX: f64 = 100_000.0;

/// Requête de création d'une collection (permissions publiques, activée).
pub fn collection_request(spec: &CollectionSpec) -> CollectionRequest {
    CollectionRequest {
        collection_id: spec.id.clone(),
        name: spec.name.clone(),
        permissions: public_permissions(),
        document_security: true,
        enabled: true,
    }
}

/// Paramètres résolus d'un attribut. `None` pour un type non supporté.
pub fn attribute_request(spec: &AttributeSpec, sizes: &SizePolicy) -> Option<AttributeRequest> {
    let key = spec.key.clone();
    let required = spec.required;

    let request = match &spec.kind {
        AttributeKind::String => AttributeRequest::String(StringAttribute {
            size: sizes.size_for(&spec.key),
            key,
            required,
            default: None,
            array: false,
        }),
        AttributeKind::DateTime => AttributeRequest::DateTime(DateTimeAttribute {
            key,
            required,
            default: None,
            array: false,
        }),
        AttributeKind::Boolean => AttributeRequest::Boolean(BooleanAttribute {
            key,
            required,
            default: None,
        }),
        AttributeKind::Integer => AttributeRequest::Integer(IntegerAttribute {
            key,
            required,
            min: INTEGER_MIN,
            max: INTEGER_MAX,
            default: None,
            array: false,
        }),
        AttributeKind::Float => AttributeRequest::Float(FloatAttribute {
            key,
            required,
            min: FLOAT_MIN,
            max: FLOAT_MAX,
            default: None,
            array: false,
        }),
        AttributeKind::Unsupported(_) => return None,
    };
    Some(request)
}

/// Un appel qu'un run émettrait (mode "plan", sans réseau).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum PlannedCall {
    CreateCollection {
        request: CollectionRequest,
    },
    CreateAttribute {
        collection_id: String,
        request: AttributeRequest,
    },
    SkipAttribute {
        collection_id: String,
        key: String,
        kind: String,
    },
}

impl fmt::Display for PlannedCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlannedCall::CreateCollection { request } => {
                write!(f, "collection {} ({})", request.collection_id, request.name)
            }
            PlannedCall::CreateAttribute {
                collection_id,
                request,
            } => {
                write!(f, "  + {}.{} [{}]", collection_id, request.key(), request.path_segment())?;
                match request {
                    AttributeRequest::String(a) => write!(f, " size={}", a.size)?,
                    AttributeRequest::Integer(a) => write!(f, " min={} max={}", a.min, a.max)?,
                    AttributeRequest::Float(a) => write!(f, " min={} max={}", a.min, a.max)?,
                    _ => {}
                }
                Ok(())
            }
            PlannedCall::SkipAttribute {
                collection_id,
                key,
                kind,
            } => write!(
                f,
                "  ! {}.{} [{}] {}",
                collection_id,
                key,
                kind,
                t("PLAN_SKIPPED")
            ),
        }
    }
}

/// Liste, dans l'ordre, les appels qu'un run émettrait.
pub fn plan(catalog: &Catalog, sizes: &SizePolicy) -> Vec<PlannedCall> {
    let mut calls = Vec::with_capacity(catalog.len() + catalog.attribute_count());
    for spec in catalog {
        calls.push(PlannedCall::CreateCollection {
            request: collection_request(spec),
        });
        for attr in &spec.attributes {
            match attribute_request(attr, sizes) {
                Some(request) => calls.push(PlannedCall::CreateAttribute {
                    collection_id: spec.id.clone(),
                    request,
                }),
                None => calls.push(PlannedCall::SkipAttribute {
                    collection_id: spec.id.clone(),
                    key: attr.key.clone(),
                    kind: attr.kind.to_string(),
                }),
            }
        }
    }
    calls
}

/// Pilote du provisionnement. Le client distant est injecté.
pub struct Provisioner<'a> {
    api: &'a dyn SchemaApi,
    database_id: String,
    pacing: PacingPolicy,
    sizes: SizePolicy,
}

impl<'a> Provisioner<'a> {
    pub fn new(api: &'a dyn SchemaApi, database_id: &str) -> Self {
        Self {
            api,
            database_id: database_id.to_string(),
            pacing: PacingPolicy::default(),
            sizes: SizePolicy::default(),
        }
    }

    pub fn with_pacing(mut self, pacing: PacingPolicy) -> Self {
        self.pacing = pacing;
        self
    }

    /// Applique tout le catalogue. Ne renvoie jamais d'erreur : les échecs
    /// sont consignés collection par collection dans le rapport.
    pub async fn run(&self, catalog: &Catalog) -> ProvisionReport {
        user_info!("RUN_START", "({} collections)", catalog.len());

        let mut report = ProvisionReport::default();
        for spec in catalog {
            let collection = self.provision_collection(spec).await;
            let completed = !collection.has_failure();
            report.collections.push(collection);

            if completed {
                self.pacing.after_collection().await;
            }
        }

        if report.is_clean() {
            user_success!("RUN_DONE");
        } else {
            user_warn!(
                "RUN_DONE_WITH_ERRORS",
                "{}",
                report.failed_collections().join(", ")
            );
        }
        info!(
            created = report.created_count(),
            existing = report.existing_count(),
            unsupported = report.unsupported_count(),
            "Provisionnement terminé"
        );
        report
    }

    #[instrument(skip(self, spec), fields(collection = %spec.id))]
    async fn provision_collection(&self, spec: &CollectionSpec) -> CollectionReport {
        user_info!("COLLECTION_START", "{}", spec.name);

        let outcome = match self.ensure_collection(spec).await {
            Ok(outcome) => outcome,
            Err(e) => {
                return CollectionReport {
                    id: spec.id.clone(),
                    name: spec.name.clone(),
                    outcome: CollectionOutcome::Failed(e.to_string()),
                    attributes: skipped(&spec.attributes),
                };
            }
        };

        let mut attributes = Vec::with_capacity(spec.attributes.len());
        if let Err(e) = self.ensure_attributes(spec, &mut attributes).await {
            user_error!(
                "COLLECTION_ABORTED",
                error = e,
                resource = spec.name,
                action = "UPDATE_COLLECTION"
            );
            attributes.extend(skipped(&spec.attributes[attributes.len()..]));
        }

        CollectionReport {
            id: spec.id.clone(),
            name: spec.name.clone(),
            outcome,
            attributes,
        }
    }

    async fn ensure_collection(&self, spec: &CollectionSpec) -> Result<CollectionOutcome> {
        let request = collection_request(spec);
        match self.api.create_collection(&self.database_id, &request).await {
            Ok(()) => {
                user_success!("COLLECTION_CREATED", "{}", spec.name);
                Ok(CollectionOutcome::Created)
            }
            Err(e) if e.is_conflict() => {
                user_info!("COLLECTION_EXISTS", "{}", spec.name);
                Ok(CollectionOutcome::AlreadyExists)
            }
            Err(e) => {
                user_error!(
                    "COLLECTION_FAILED",
                    error = e,
                    resource = spec.name,
                    action = "CREATE_COLLECTION"
                );
                Err(e)
            }
        }
    }

    /// Crée les attributs dans l'ordre. La première erreur non-409 est
    /// remontée après avoir été consignée dans `done`.
    async fn ensure_attributes(
        &self,
        spec: &CollectionSpec,
        done: &mut Vec<AttributeReport>,
    ) -> Result<()> {
        for attr in &spec.attributes {
            user_info!(
                "ATTRIBUTE_START",
                "{} ({}) -> {}",
                attr.key,
                attr.kind,
                spec.id
            );

            let result = self.ensure_attribute(&spec.id, attr).await;
            let outcome = match &result {
                Ok(outcome) => outcome.clone(),
                Err(e) => AttributeOutcome::Failed(e.to_string()),
            };
            done.push(AttributeReport {
                key: attr.key.clone(),
                outcome,
            });
            result?;

            self.pacing.after_attribute().await;
        }
        Ok(())
    }

    async fn ensure_attribute(
        &self,
        collection_id: &str,
        attr: &AttributeSpec,
    ) -> Result<AttributeOutcome> {
        let Some(request) = attribute_request(attr, &self.sizes) else {
            user_warn!("ATTRIBUTE_UNSUPPORTED", "{} ({})", attr.key, attr.kind);
            return Ok(AttributeOutcome::Unsupported(attr.kind.to_string()));
        };

        match self
            .api
            .create_attribute(&self.database_id, collection_id, &request)
            .await
        {
            Ok(()) => {
                user_success!("ATTRIBUTE_CREATED", "{}", attr.key);
                Ok(AttributeOutcome::Created)
            }
            Err(e) if e.is_conflict() => {
                user_info!("ATTRIBUTE_EXISTS", "{}", attr.key);
                Ok(AttributeOutcome::AlreadyExists)
            }
            Err(e) => {
                let resource = format!("{}.{}", collection_id, attr.key);
                user_error!(
                    "ATTRIBUTE_FAILED",
                    error = e,
                    resource = resource,
                    action = "CREATE_ATTRIBUTE"
                );
                Err(e)
            }
        }
    }
}

fn skipped(attrs: &[AttributeSpec]) -> Vec<AttributeReport> {
    attrs
        .iter()
        .map(|a| AttributeReport {
            key: a.key.clone(),
            outcome: AttributeOutcome::Skipped,
        })
        .collect()
}
