use serde::{Deserialize, Serialize};

/// Canonical resume content for one request. Built fresh from the submitted
/// form, read by the renderer and the preview, then dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeRecord {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub linkedin: String,
    pub github: String,
    pub summary: String,
    pub work_experience: Vec<WorkEntry>,
    pub education: Vec<EducationEntry>,
    /// Comma-separated, kept verbatim.
    pub skills: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkEntry {
    pub role: String,
    pub company: String,
    pub duration: String,
    pub description: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub degree: String,
    pub institution: String,
    pub year: String,
}
