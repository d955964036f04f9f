// SPDX-FileCopyrightText: 2026 Dexter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared by the store traits, the storage adapter and the
//! curation algorithms.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

record_id!(
    /// Identifier of a [`Person`].
    PersonId
);
record_id!(
    /// Identifier of an [`Affiliation`].
    AffiliationId
);
record_id!(
    /// Identifier of an [`Entity`].
    EntityId
);
record_id!(
    /// Identifier of a [`Document`].
    DocumentId
);
record_id!(
    /// Identifier of an [`Utterance`].
    UtteranceId
);
record_id!(
    /// Identifier of a [`Medium`].
    MediumId
);
record_id!(GenderId);
record_id!(RaceId);

/// Health status reported by store health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Store is fully operational.
    Healthy,
    /// Store is operational but experiencing issues.
    Degraded(String),
    /// Store is not operational.
    Unhealthy(String),
}

/// Kind of thing an [`Entity`] names.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EntityGroup {
    Person,
    Organisation,
    Location,
    Other,
}

/// A person, with a bit more information than a `person` entity.
///
/// Several entities (aliases) may link to the same person.
#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    pub gender_id: Option<GenderId>,
    pub race_id: Option<RaceId>,
    /// Current affiliation. Maintained by affiliation relearning.
    pub affiliation_id: Option<AffiliationId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Person {
    /// Pick the alias entity that best represents this person.
    ///
    /// An entity whose name matches the person's name exactly wins; otherwise
    /// the last alias is returned.
    pub fn preferred_entity<'a>(&self, aliases: &'a [Entity]) -> Option<&'a Entity> {
        aliases
            .iter()
            .find(|e| e.name == self.name)
            .or_else(|| aliases.last())
    }
}

/// An organisation a person can be affiliated with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Affiliation {
    pub id: AffiliationId,
    pub code: String,
    pub name: String,
}

impl Affiliation {
    pub fn full_name(&self) -> String {
        if self.code.is_empty() {
            self.name.clone()
        } else {
            format!("{} {}", self.code, self.name)
        }
    }
}

/// One document's attribution of an affiliation to a person.
///
/// Derived from a document source whose affiliation is set; sources without
/// an affiliation never become claims.
#[derive(Debug, Clone, PartialEq)]
pub struct AffiliationClaim {
    pub person_id: PersonId,
    pub affiliation_id: AffiliationId,
    pub document_id: DocumentId,
    /// Publication date of the claiming document.
    pub published_at: DateTime<Utc>,
}

/// A named thing found in a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub name: String,
    pub group: EntityGroup,
    pub person_id: Option<PersonId>,
}

/// A media outlet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Medium {
    pub id: MediumId,
    pub name: String,
    pub domain: Option<String>,
}

/// A news article.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: DocumentId,
    pub url: Option<String>,
    pub title: String,
    pub summary: Option<String>,
    pub text: String,
    pub published_at: DateTime<Utc>,
    pub medium_id: Option<MediumId>,
}

/// Fields needed to store a new document.
#[derive(Debug, Clone)]
pub struct NewDocument {
    pub url: Option<String>,
    pub title: String,
    pub summary: Option<String>,
    pub text: String,
    pub published_at: DateTime<Utc>,
    pub medium_id: Option<MediumId>,
}

/// A person quoted or referenced as a source in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSource {
    pub document_id: DocumentId,
    pub person_id: PersonId,
    pub affiliation_id: Option<AffiliationId>,
}

/// A quotation by an entity in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utterance {
    pub id: UtteranceId,
    pub document_id: DocumentId,
    pub entity_id: EntityId,
    pub quote: String,
    /// Offset of the quotation in the document text.
    pub offset: Option<i64>,
    pub length: Option<i64>,
}

/// A quotation that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUtterance {
    pub document_id: DocumentId,
    pub entity_id: EntityId,
    pub quote: String,
    pub offset: Option<i64>,
    pub length: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gender {
    pub id: GenderId,
    pub name: String,
}

impl Gender {
    pub fn abbr(&self) -> String {
        abbreviate(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Race {
    pub id: RaceId,
    pub name: String,
}

impl Race {
    pub fn abbr(&self) -> String {
        abbreviate(&self.name)
    }
}

fn abbreviate(name: &str) -> String {
    name.chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_default()
}

/// Flattened, display-ready view of a person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonSummary {
    pub id: PersonId,
    pub name: String,
    pub race: Option<String>,
    pub gender: Option<String>,
    /// Full name of the current affiliation.
    pub affiliation: Option<String>,
}

/// Document count for one media outlet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediumCount {
    pub medium: String,
    pub documents: i64,
}

/// Aggregate numbers shown on the admin dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub document_count: i64,
    pub date_from: Option<DateTime<Utc>>,
    pub date_to: Option<DateTime<Utc>>,
    /// Entity counts keyed by entity group.
    pub group_counts: BTreeMap<String, i64>,
    pub media_counts: Vec<MediumCount>,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn entity(id: i64, name: &str) -> Entity {
        Entity {
            id: EntityId(id),
            name: name.to_string(),
            group: EntityGroup::Person,
            person_id: Some(PersonId(1)),
        }
    }

    fn person(name: &str) -> Person {
        Person {
            id: PersonId(1),
            name: name.to_string(),
            gender_id: None,
            race_id: None,
            affiliation_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn preferred_entity_prefers_exact_name() {
        let p = person("Jacob Zuma");
        let aliases = vec![entity(1, "Jacob Zuma"), entity(2, "Zuma")];
        assert_eq!(p.preferred_entity(&aliases).unwrap().id, EntityId(1));
    }

    #[test]
    fn preferred_entity_falls_back_to_last() {
        let p = person("Jacob Zuma");
        let aliases = vec![entity(1, "JZ"), entity(2, "Zuma")];
        assert_eq!(p.preferred_entity(&aliases).unwrap().id, EntityId(2));
        assert!(p.preferred_entity(&[]).is_none());
    }

    #[test]
    fn entity_group_round_trips_through_strings() {
        for group in [
            EntityGroup::Person,
            EntityGroup::Organisation,
            EntityGroup::Location,
            EntityGroup::Other,
        ] {
            let s = group.to_string();
            assert_eq!(EntityGroup::from_str(&s).unwrap(), group);
        }
        assert_eq!(EntityGroup::Person.to_string(), "person");
    }

    #[test]
    fn affiliation_full_name_includes_code() {
        let a = Affiliation {
            id: AffiliationId(1),
            code: "1.1".to_string(),
            name: "ANC".to_string(),
        };
        assert_eq!(a.full_name(), "1.1 ANC");

        let bare = Affiliation {
            code: String::new(),
            ..a
        };
        assert_eq!(bare.full_name(), "ANC");
    }

    #[test]
    fn gender_and_race_abbreviate_first_letter() {
        let g = Gender {
            id: GenderId(1),
            name: "female".to_string(),
        };
        assert_eq!(g.abbr(), "F");
        let r = Race {
            id: RaceId(1),
            name: String::new(),
        };
        assert_eq!(r.abbr(), "");
    }

    #[test]
    fn ids_serialize_as_plain_integers() {
        let json = serde_json::to_string(&PersonId(7)).unwrap();
        assert_eq!(json, "7");
    }
}
