//! Resume Model Builder: submitted form → canonical `ResumeRecord`.
//!
//! Repeated-group entries are kept only when every required field is
//! present. Partially filled entries and entries past the configured limit are
//! left out of the record and reported as `DroppedEntry` notices; they never
//! fail the build.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::resume::{EducationEntry, ResumeRecord, WorkEntry};
use crate::resume::form::{EducationForm, ResumeForm, WorkForm};
use crate::resume::segment::segment_lines;

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// Per-group entry caps. `None` means unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupLimits {
    pub work: Option<usize>,
    pub education: Option<usize>,
}

/// Three work slots and two education slots, as the browser form offers.
impl Default for GroupLimits {
    fn default() -> Self {
        Self {
            work: Some(3),
            education: Some(2),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryGroup {
    WorkExperience,
    Education,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DropReason {
    MissingFields { fields: Vec<String> },
    LimitExceeded { limit: usize },
}

/// An entry the user started filling in that did not make it into the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DroppedEntry {
    pub group: EntryGroup,
    /// 1-based slot number as submitted (`role_2` is slot 2). JSON lists
    /// use the 1-based position.
    pub index: usize,
    pub reason: DropReason,
}

#[derive(Debug, Clone, Default)]
pub struct BuildOutcome {
    pub record: ResumeRecord,
    pub dropped: Vec<DroppedEntry>,
}

// ────────────────────────────────────────────────────────────────────────────
// Builder
// ────────────────────────────────────────────────────────────────────────────

pub fn build_record(form: &ResumeForm, limits: GroupLimits) -> BuildOutcome {
    let mut dropped = Vec::new();

    let work_experience = select_complete(&form.work_experience, limits.work, &mut dropped);
    let education = select_complete(&form.education, limits.education, &mut dropped);

    if !dropped.is_empty() {
        debug!(count = dropped.len(), "Dropped incomplete or excess entries");
    }

    BuildOutcome {
        record: ResumeRecord {
            name: form.name.clone(),
            email: form.email.clone(),
            phone: form.phone.clone(),
            linkedin: form.linkedin.clone(),
            github: form.github.clone(),
            summary: form.summary.clone(),
            work_experience,
            education,
            skills: form.skills.clone(),
        },
        dropped,
    }
}

/// A repeated-group slot as submitted.
trait GroupSlot {
    type Entry;
    const GROUP: EntryGroup;
    const FIELD_COUNT: usize;

    /// Submitted slot number, `0` when only the list position is known.
    fn slot(&self) -> usize;
    fn missing_fields(&self) -> Vec<&'static str>;
    fn to_entry(&self) -> Self::Entry;
}

impl GroupSlot for WorkForm {
    type Entry = WorkEntry;
    const GROUP: EntryGroup = EntryGroup::WorkExperience;
    const FIELD_COUNT: usize = 4;

    fn slot(&self) -> usize {
        self.slot
    }

    fn missing_fields(&self) -> Vec<&'static str> {
        absent(&[
            ("role", self.role.as_str()),
            ("company", self.company.as_str()),
            ("duration", self.duration.as_str()),
            ("description", self.description.as_str()),
        ])
    }

    fn to_entry(&self) -> WorkEntry {
        WorkEntry {
            role: self.role.clone(),
            company: self.company.clone(),
            duration: self.duration.clone(),
            description: segment_lines(&self.description),
        }
    }
}

impl GroupSlot for EducationForm {
    type Entry = EducationEntry;
    const GROUP: EntryGroup = EntryGroup::Education;
    const FIELD_COUNT: usize = 3;

    fn slot(&self) -> usize {
        self.slot
    }

    fn missing_fields(&self) -> Vec<&'static str> {
        absent(&[
            ("degree", self.degree.as_str()),
            ("institution", self.institution.as_str()),
            ("year", self.year.as_str()),
        ])
    }

    fn to_entry(&self) -> EducationEntry {
        EducationEntry {
            degree: self.degree.clone(),
            institution: self.institution.clone(),
            year: self.year.clone(),
        }
    }
}

/// Keeps complete entries up to `limit`, recording every partially filled or
/// excess entry under its submitted slot number. Fully blank slots are
/// skipped silently.
fn select_complete<F: GroupSlot>(
    slots: &[F],
    limit: Option<usize>,
    dropped: &mut Vec<DroppedEntry>,
) -> Vec<F::Entry> {
    let mut selected = Vec::new();

    for (position, slot) in slots.iter().enumerate() {
        let index = match slot.slot() {
            0 => position + 1,
            n => n,
        };
        let missing = slot.missing_fields();

        if !missing.is_empty() {
            if missing.len() < F::FIELD_COUNT {
                dropped.push(DroppedEntry {
                    group: F::GROUP,
                    index,
                    reason: DropReason::MissingFields {
                        fields: missing.into_iter().map(String::from).collect(),
                    },
                });
            }
            continue;
        }

        match limit {
            Some(limit) if selected.len() >= limit => dropped.push(DroppedEntry {
                group: F::GROUP,
                index,
                reason: DropReason::LimitExceeded { limit },
            }),
            _ => selected.push(slot.to_entry()),
        }
    }

    selected
}

fn absent(fields: &[(&'static str, &str)]) -> Vec<&'static str> {
    fields
        .iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| *name)
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
