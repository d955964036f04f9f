// SPDX-FileCopyrightText: 2026 Dexter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Affiliation relearning.
//!
//! A person's affiliation is re-derived from the affiliations recent documents
//! attributed to them. Every claim votes with a weight that halves for each
//! whole day of age, and the current affiliation (if any) starts with the
//! weight of a claim exactly one window old. The heaviest affiliation wins;
//! on a tie the one seen first keeps the lead, so the incumbent survives
//! unless a challenger strictly outweighs it.

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info};

use dexter_core::types::{AffiliationClaim, AffiliationId, Person, PersonId};
use dexter_core::{DexterError, EvidenceStore};

/// Default size of the look-back window, in days.
pub const DEFAULT_WINDOW_DAYS: u32 = 7;

/// Weight of a claim dated `at`, seen from `now`: `1 / 2^days` where `days`
/// is the number of whole days elapsed.
///
/// Claims dated after `now` count as zero days old.
pub fn decay_weight(now: DateTime<Utc>, at: DateTime<Utc>) -> f64 {
    let days = (now - at).num_days().max(0);
    0.5_f64.powi(i32::try_from(days).unwrap_or(i32::MAX))
}

/// Accumulated weight per affiliation, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AffiliationWeights {
    entries: Vec<(AffiliationId, f64)>,
}

impl AffiliationWeights {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `weight` to `affiliation`, registering it if unseen.
    pub fn add(&mut self, affiliation: AffiliationId, weight: f64) {
        match self.entries.iter_mut().find(|(id, _)| *id == affiliation) {
            Some((_, total)) => *total += weight,
            None => self.entries.push((affiliation, weight)),
        }
    }

    pub fn get(&self, affiliation: AffiliationId) -> Option<f64> {
        self.entries
            .iter()
            .find(|(id, _)| *id == affiliation)
            .map(|(_, w)| *w)
    }

    /// The heaviest affiliation. Ties go to the earliest registered one.
    pub fn leader(&self) -> Option<AffiliationId> {
        let mut best: Option<(AffiliationId, f64)> = None;
        for &(id, weight) in &self.entries {
            match best {
                Some((_, top)) if weight <= top => {}
                _ => best = Some((id, weight)),
            }
        }
        best.map(|(id, _)| id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(AffiliationId, f64)> {
        self.entries.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Outcome of relearning one person's affiliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relearned {
    /// The affiliation after relearning.
    pub affiliation: Option<AffiliationId>,
    /// Whether it differs from the affiliation before relearning.
    pub changed: bool,
}

/// Decides affiliations from weighted claims inside a sliding window.
#[derive(Debug, Clone, Copy)]
pub struct AffiliationLearner {
    window: Duration,
}

impl Default for AffiliationLearner {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_DAYS)
    }
}

impl AffiliationLearner {
    pub fn new(window_days: u32) -> Self {
        Self {
            window: Duration::days(i64::from(window_days)),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Oldest publication date that still counts at `now`. Saturates at the
    /// earliest representable instant.
    pub fn window_start(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now.checked_sub_signed(self.window)
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// Accumulate the vote for each affiliation.
    ///
    /// `claims` must be ordered oldest first; that order decides ties.
    pub fn weigh(
        &self,
        current: Option<AffiliationId>,
        claims: &[AffiliationClaim],
        now: DateTime<Utc>,
    ) -> AffiliationWeights {
        let mut weights = AffiliationWeights::new();
        if let Some(incumbent) = current {
            weights.add(incumbent, decay_weight(now, self.window_start(now)));
        }
        for claim in claims {
            weights.add(claim.affiliation_id, decay_weight(now, claim.published_at));
        }
        weights
    }

    /// Pick the winning affiliation and apply it to `person` in memory.
    pub fn decide(
        &self,
        person: &mut Person,
        claims: &[AffiliationClaim],
        now: DateTime<Utc>,
    ) -> Relearned {
        let weights = self.weigh(person.affiliation_id, claims, now);
        debug!(person = %person.id, weights = ?weights.entries, "affiliation weights");

        let Some(winner) = weights.leader() else {
            return Relearned {
                affiliation: person.affiliation_id,
                changed: false,
            };
        };

        let previous = person.affiliation_id;
        if previous == Some(winner) {
            return Relearned {
                affiliation: previous,
                changed: false,
            };
        }

        info!(
            person = %person.id,
            previous = ?previous.map(|a| a.0),
            learned = %winner,
            "learned new affiliation"
        );
        person.affiliation_id = Some(winner);
        Relearned {
            affiliation: Some(winner),
            changed: true,
        }
    }

    /// Load the in-window claims for `person` and decide. Only `person` is
    /// modified; nothing is written back to the store.
    pub async fn relearn<S>(
        &self,
        store: &S,
        person: &mut Person,
        now: DateTime<Utc>,
    ) -> Result<Relearned, DexterError>
    where
        S: EvidenceStore + ?Sized,
    {
        let claims = store
            .affiliation_claims(person.id, self.window_start(now), now)
            .await?;
        Ok(self.decide(person, &claims, now))
    }
}

/// Relearn a stored person's affiliation as of `as_of` and persist a change.
pub async fn relearn_affiliation<S>(
    store: &S,
    learner: &AffiliationLearner,
    person_id: PersonId,
    as_of: DateTime<Utc>,
) -> Result<Relearned, DexterError>
where
    S: EvidenceStore + ?Sized,
{
    let mut person = store
        .person(person_id)
        .await?
        .ok_or(DexterError::NotFound {
            kind: "person",
            id: person_id.0,
        })?;

    let outcome = learner.relearn(store, &mut person, as_of).await?;
    if outcome.changed {
        store
            .set_person_affiliation(person_id, outcome.affiliation)
            .await?;
    }
    Ok(outcome)
}

/// Relearn everyone with at least one claim inside the window ending at `as_of`.
pub async fn relearn_recent<S>(
    store: &S,
    learner: &AffiliationLearner,
    as_of: DateTime<Utc>,
) -> Result<Vec<(PersonId, Relearned)>, DexterError>
where
    S: EvidenceStore + ?Sized,
{
    let people = store
        .people_with_claims(learner.window_start(as_of), as_of)
        .await?;
    debug!(count = people.len(), "relearning affiliations");

    let mut outcomes = Vec::with_capacity(people.len());
    for person_id in people {
        let outcome = relearn_affiliation(store, learner, person_id, as_of).await?;
        outcomes.push((person_id, outcome));
    }
    Ok(outcomes)
}
