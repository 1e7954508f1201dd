//! Submitted form values, before any presence filtering.
//!
//! The same logical form arrives either as JSON (`ResumeForm` directly) or as
//! flat url-encoded fields keyed the way the browser form names them
//! (`role_1`, `company_1`, `degree_2`, ...).

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub linkedin: String,
    pub github: String,
    pub summary: String,
    pub skills: String,
    pub work_experience: Vec<WorkForm>,
    pub education: Vec<EducationForm>,
}

/// One work slot. `description` is the raw multi-line text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkForm {
    /// Slot number `n` from flat `role_n` fields. `0` when the slot came from
    /// a JSON list, where its 1-based position stands in.
    #[serde(skip)]
    pub slot: usize,
    pub role: String,
    pub company: String,
    pub duration: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationForm {
    /// See `WorkForm::slot`.
    #[serde(skip)]
    pub slot: usize,
    pub degree: String,
    pub institution: String,
    pub year: String,
}

const WORK_KEYS: &[&str] = &["role", "company", "duration", "description"];
const EDUCATION_KEYS: &[&str] = &["degree", "institution", "year"];

impl ResumeForm {
    /// Decodes flat `name -> value` fields. Group indices start at 1, may have
    /// gaps, and are ordered numerically. Each slot keeps its submitted index.
    /// Unknown keys are ignored.
    pub fn from_flat_fields(fields: &HashMap<String, String>) -> Self {
        let get = |key: &str| fields.get(key).cloned().unwrap_or_default();

        let work_experience = indexed_groups(fields, WORK_KEYS)
            .into_iter()
            .map(|(index, mut values)| WorkForm {
                slot: index,
                role: values.remove("role").unwrap_or_default(),
                company: values.remove("company").unwrap_or_default(),
                duration: values.remove("duration").unwrap_or_default(),
                description: values.remove("description").unwrap_or_default(),
            })
            .collect();

        let education = indexed_groups(fields, EDUCATION_KEYS)
            .into_iter()
            .map(|(index, mut values)| EducationForm {
                slot: index,
                degree: values.remove("degree").unwrap_or_default(),
                institution: values.remove("institution").unwrap_or_default(),
                year: values.remove("year").unwrap_or_default(),
            })
            .collect();

        ResumeForm {
            name: get("name"),
            email: get("email"),
            phone: get("phone"),
            linkedin: get("linkedin"),
            github: get("github"),
            summary: get("summary"),
            skills: get("skills"),
            work_experience,
            education,
        }
    }
}

/// Groups `{key}_{n}` fields by `n` for the given group keys.
fn indexed_groups<'a>(
    fields: &HashMap<String, String>,
    keys: &[&'a str],
) -> BTreeMap<usize, HashMap<&'a str, String>> {
    let mut groups: BTreeMap<usize, HashMap<&'a str, String>> = BTreeMap::new();
    for (field, value) in fields {
        let Some((key, index)) = field.rsplit_once('_') else {
            continue;
        };
        let Some(key) = keys.iter().copied().find(|k| *k == key) else {
            continue;
        };
        let Ok(index) = index.parse::<usize>() else {
            continue;
        };
        if index == 0 {
            continue;
        }
        groups.entry(index).or_default().insert(key, value.clone());
    }
    groups
}
