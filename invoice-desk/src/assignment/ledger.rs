//! Assignment ledger
//!
//! Partitions the unpacked copies of an invoice across its people. Every copy
//! sits in exactly one bucket: a person's, or the reserved unassigned bucket.
//! Moves remove from the current bucket before appending to the target, so the
//! partition holds after every mutation.

use serde::ser::{Serialize, SerializeMap, Serializer};
use shared::invoice::{CopyId, LineItemId, UnpackedCopy};
use std::collections::HashSet;
use thiserror::Error;

/// Reserved bucket key for copies nobody has taken yet
pub const UNASSIGNED_KEY: &str = "__unassigned__";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssignmentError {
    #[error("Copy not found: {0}")]
    CopyNotFound(CopyId),

    #[error("Line item has no copies in the ledger: {0}")]
    ItemNotFound(LineItemId),

    #[error("Person not found: {0}")]
    PersonNotFound(String),

    #[error("Person listed more than once: {0}")]
    DuplicatePerson(String),

    #[error("Person name is reserved: {0}")]
    ReservedName(String),

    #[error("Partition violated: {0}")]
    PartitionViolation(String),
}

/// Copies attributed to one person
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonBucket {
    pub person: String,
    pub copies: Vec<UnpackedCopy>,
}

impl PersonBucket {
    pub fn total(&self) -> i64 {
        self.copies.iter().map(|c| c.amount).sum()
    }
}

/// Person buckets in people order, plus the unassigned bucket
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentLedger {
    buckets: Vec<PersonBucket>,
    unassigned: Vec<UnpackedCopy>,
}

impl AssignmentLedger {
    /// Every copy starts unassigned
    pub fn new<I, S>(people: I, copies: Vec<UnpackedCopy>) -> Result<Self, AssignmentError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut buckets: Vec<PersonBucket> = Vec::new();
        for person in people {
            let person = person.into();
            if person == UNASSIGNED_KEY {
                return Err(AssignmentError::ReservedName(person));
            }
            if buckets.iter().any(|b| b.person == person) {
                return Err(AssignmentError::DuplicatePerson(person));
            }
            buckets.push(PersonBucket {
                person,
                copies: Vec::new(),
            });
        }
        Ok(Self {
            buckets,
            unassigned: copies,
        })
    }

    /// Single-person ledger with every copy already assigned
    pub fn auto_assign(
        person: impl Into<String>,
        copies: Vec<UnpackedCopy>,
    ) -> Result<Self, AssignmentError> {
        let person = person.into();
        if person == UNASSIGNED_KEY {
            return Err(AssignmentError::ReservedName(person));
        }
        Ok(Self {
            buckets: vec![PersonBucket { person, copies }],
            unassigned: Vec::new(),
        })
    }

    // ========== Queries ==========

    pub fn people(&self) -> impl Iterator<Item = &str> {
        self.buckets.iter().map(|b| b.person.as_str())
    }

    pub fn buckets(&self) -> &[PersonBucket] {
        &self.buckets
    }

    pub fn bucket(&self, person: &str) -> Option<&[UnpackedCopy]> {
        self.buckets
            .iter()
            .find(|b| b.person == person)
            .map(|b| b.copies.as_slice())
    }

    pub fn unassigned(&self) -> &[UnpackedCopy] {
        &self.unassigned
    }

    pub fn unassigned_count(&self) -> usize {
        self.unassigned.len()
    }

    pub fn is_fully_assigned(&self) -> bool {
        self.unassigned.is_empty()
    }

    /// Sum of copy amounts attributed to `person`
    pub fn person_total(&self, person: &str) -> Option<i64> {
        self.buckets
            .iter()
            .find(|b| b.person == person)
            .map(PersonBucket::total)
    }

    /// Key of the bucket holding `copy_id` ([`UNASSIGNED_KEY`] when unassigned)
    pub fn owner_of(&self, copy_id: CopyId) -> Option<&str> {
        if self.unassigned.iter().any(|c| c.id == copy_id) {
            return Some(UNASSIGNED_KEY);
        }
        self.buckets
            .iter()
            .find(|b| b.copies.iter().any(|c| c.id == copy_id))
            .map(|b| b.person.as_str())
    }

    /// Every copy, person buckets first
    pub fn copies(&self) -> impl Iterator<Item = &UnpackedCopy> {
        self.buckets
            .iter()
            .flat_map(|b| b.copies.iter())
            .chain(self.unassigned.iter())
    }

    pub fn copy_count(&self) -> usize {
        self.buckets.iter().map(|b| b.copies.len()).sum::<usize>() + self.unassigned.len()
    }

    /// Whether the ledger was built for exactly these people, in this order
    pub fn has_people<'a>(&self, people: impl IntoIterator<Item = &'a str>) -> bool {
        self.people().eq(people)
    }

    // ========== Moves ==========

    /// Move a copy to `person`'s bucket
    pub fn assign(&mut self, copy_id: CopyId, person: &str) -> Result<(), AssignmentError> {
        let target = self.person_index(person)?;
        let copy = self.take(copy_id)?;
        self.buckets[target].copies.push(copy);
        debug_assert!(self.has_unique_copies());
        Ok(())
    }

    /// Move a copy back to the unassigned bucket
    pub fn unassign(&mut self, copy_id: CopyId) -> Result<(), AssignmentError> {
        let copy = self.take(copy_id)?;
        self.unassigned.push(copy);
        debug_assert!(self.has_unique_copies());
        Ok(())
    }

    /// Move every copy unpacked from `item` to `person`; returns the count moved
    pub fn assign_item(
        &mut self,
        item: LineItemId,
        person: &str,
    ) -> Result<usize, AssignmentError> {
        self.person_index(person)?;
        let ids: Vec<CopyId> = self
            .copies()
            .filter(|c| c.source_item == item)
            .map(|c| c.id)
            .collect();
        if ids.is_empty() {
            return Err(AssignmentError::ItemNotFound(item));
        }
        for id in &ids {
            self.assign(*id, person)?;
        }
        Ok(ids.len())
    }

    // ========== Invariant ==========

    /// Check that the buckets hold exactly `expected`, each copy once
    pub fn verify_partition(&self, expected: &[UnpackedCopy]) -> Result<(), AssignmentError> {
        let mut seen = HashSet::with_capacity(expected.len());
        for copy in self.copies() {
            if !seen.insert(copy.id) {
                return Err(AssignmentError::PartitionViolation(format!(
                    "copy {} appears in more than one bucket",
                    copy.id
                )));
            }
        }

        let wanted: HashSet<CopyId> = expected.iter().map(|c| c.id).collect();
        if let Some(missing) = wanted.difference(&seen).next() {
            return Err(AssignmentError::PartitionViolation(format!(
                "copy {missing} is missing from every bucket"
            )));
        }
        if let Some(extra) = seen.difference(&wanted).next() {
            return Err(AssignmentError::PartitionViolation(format!(
                "copy {extra} does not belong to this invoice"
            )));
        }
        Ok(())
    }

    fn has_unique_copies(&self) -> bool {
        let mut seen = HashSet::new();
        self.copies().all(|c| seen.insert(c.id))
    }

    fn person_index(&self, person: &str) -> Result<usize, AssignmentError> {
        self.buckets
            .iter()
            .position(|b| b.person == person)
            .ok_or_else(|| AssignmentError::PersonNotFound(person.to_string()))
    }

    /// Remove a copy from whichever bucket holds it
    fn take(&mut self, copy_id: CopyId) -> Result<UnpackedCopy, AssignmentError> {
        if let Some(pos) = self.unassigned.iter().position(|c| c.id == copy_id) {
            return Ok(self.unassigned.remove(pos));
        }
        for bucket in &mut self.buckets {
            if let Some(pos) = bucket.copies.iter().position(|c| c.id == copy_id) {
                return Ok(bucket.copies.remove(pos));
            }
        }
        Err(AssignmentError::CopyNotFound(copy_id))
    }
}

/// Serialized as `{ person: [copies], ..., "__unassigned__": [copies] }`
impl Serialize for AssignmentLedger {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.buckets.len() + 1))?;
        for bucket in &self.buckets {
            map.serialize_entry(&bucket.person, &bucket.copies)?;
        }
        map.serialize_entry(UNASSIGNED_KEY, &self.unassigned)?;
        map.end()
    }
}
