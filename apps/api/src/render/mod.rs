// Document Renderer
// Maps a ResumeRecord to its outline, then serializes the outline as DOCX.
// Pure and deterministic: no clock, no randomness, no I/O.

pub mod docx;
pub mod outline;

use thiserror::Error;
use tracing::debug;

use crate::models::resume::ResumeRecord;

use outline::outline;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("field '{field}' contains U+{codepoint:04X}, which cannot be written to a document")]
    UnrepresentableCharacter { field: String, codepoint: u32 },

    #[error("DOCX packaging failed: {0}")]
    Package(String),
}

/// Renders `record` to DOCX bytes.
///
/// Characters outside the XML 1.0 character range are rejected before any
/// serialization so the output is never a package Word refuses to open.
pub fn render_docx(record: &ResumeRecord) -> Result<Vec<u8>, RenderError> {
    check_representable(record)?;
    let blocks = outline(record);
    let bytes = docx::write_docx(&blocks)?;
    debug!(blocks = blocks.len(), bytes = bytes.len(), "Rendered DOCX");
    Ok(bytes)
}

fn check_representable(record: &ResumeRecord) -> Result<(), RenderError> {
    let mut fields: Vec<(String, &str)> = vec![
        ("name".to_string(), record.name.as_str()),
        ("email".to_string(), record.email.as_str()),
        ("phone".to_string(), record.phone.as_str()),
        ("linkedin".to_string(), record.linkedin.as_str()),
        ("github".to_string(), record.github.as_str()),
        ("summary".to_string(), record.summary.as_str()),
        ("skills".to_string(), record.skills.as_str()),
    ];
    for (i, exp) in record.work_experience.iter().enumerate() {
        let n = i + 1;
        fields.push((format!("work_experience[{n}].role"), exp.role.as_str()));
        fields.push((format!("work_experience[{n}].company"), exp.company.as_str()));
        fields.push((format!("work_experience[{n}].duration"), exp.duration.as_str()));
        for point in &exp.description {
            fields.push((format!("work_experience[{n}].description"), point.as_str()));
        }
    }
    for (i, edu) in record.education.iter().enumerate() {
        let n = i + 1;
        fields.push((format!("education[{n}].degree"), edu.degree.as_str()));
        fields.push((format!("education[{n}].institution"), edu.institution.as_str()));
        fields.push((format!("education[{n}].year"), edu.year.as_str()));
    }

    for (field, value) in fields {
        if let Some(ch) = value.chars().find(|c| !is_xml_char(*c)) {
            return Err(RenderError::UnrepresentableCharacter {
                field,
                codepoint: ch as u32,
            });
        }
    }
    Ok(())
}

/// XML 1.0 `Char` production. Rust chars already exclude surrogates.
fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r' | '\u{20}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}')
}

#[cfg(test)]
pub(crate) fn sample_record() -> ResumeRecord {
    use crate::models::resume::{EducationEntry, WorkEntry};

    ResumeRecord {
        name: "Jane Doe".to_string(),
        email: "jane@example.com".to_string(),
        phone: "555-0100".to_string(),
        linkedin: "janedoe".to_string(),
        github: "jdoe".to_string(),
        summary: "Backend engineer.".to_string(),
        work_experience: vec![WorkEntry {
            role: "Engineer".to_string(),
            company: "Acme".to_string(),
            duration: "2020-2022".to_string(),
            description: vec!["Led X".to_string(), "Shipped Y".to_string()],
        }],
        education: vec![EducationEntry {
            degree: "BSc Computer Science".to_string(),
            institution: "MIT".to_string(),
            year: "2019".to_string(),
        }],
        skills: "Python, Go".to_string(),
    }
}
