//! Document outline: the fixed section structure of a rendered resume.
//!
//! `outline` is a pure function of the record; the DOCX writer only
//! serializes what it returns. Section order:
//! name → contact lines → summary → work experience → education → skills.

use crate::models::resume::ResumeRecord;

pub const SUMMARY_HEADING: &str = "Professional Summary";
pub const WORK_HEADING: &str = "Work Experience";
pub const EDUCATION_HEADING: &str = "Education";
pub const SKILLS_HEADING: &str = "Skills";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { level: u8, text: String },
    Paragraph { text: String },
    /// Rendered in the bulleted-list style. `text` already carries the dash marker.
    Bullet { text: String },
}

impl Block {
    fn heading(level: u8, text: impl Into<String>) -> Self {
        Block::Heading {
            level,
            text: text.into(),
        }
    }

    fn paragraph(text: impl Into<String>) -> Self {
        Block::Paragraph { text: text.into() }
    }
}

pub fn outline(record: &ResumeRecord) -> Vec<Block> {
    let mut blocks = vec![
        Block::heading(1, record.name.as_str()),
        Block::paragraph(format!("Email: {}", record.email)),
        Block::paragraph(format!("Phone: {}", record.phone)),
        Block::paragraph(format!("LinkedIn: {}", record.linkedin)),
        Block::paragraph(format!("GitHub: {}", record.github)),
        Block::heading(2, SUMMARY_HEADING),
        Block::paragraph(record.summary.as_str()),
        Block::heading(2, WORK_HEADING),
    ];

    for exp in &record.work_experience {
        blocks.push(Block::paragraph(format!(
            "{} at {} ({})",
            exp.role, exp.company, exp.duration
        )));
        blocks.extend(exp.description.iter().map(|point| Block::Bullet {
            text: format!("- {point}"),
        }));
    }

    blocks.push(Block::heading(2, EDUCATION_HEADING));
    blocks.extend(record.education.iter().map(|edu| {
        Block::paragraph(format!(
            "{} from {} ({})",
            edu.degree, edu.institution, edu.year
        ))
    }));

    blocks.push(Block::heading(2, SKILLS_HEADING));
    blocks.push(Block::paragraph(record.skills.as_str()));

    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::WorkEntry;
    use crate::render::sample_record as jane_doe;

    fn text(block: &Block) -> &str {
        match block {
            Block::Heading { text, .. } | Block::Paragraph { text } | Block::Bullet { text } => {
                text
            }
        }
    }

    #[test]
    fn test_jane_doe_section_order() {
        let blocks = outline(&jane_doe());
        assert_eq!(
            blocks,
            vec![
                Block::heading(1, "Jane Doe"),
                Block::paragraph("Email: jane@example.com"),
                Block::paragraph("Phone: 555-0100"),
                Block::paragraph("LinkedIn: janedoe"),
                Block::paragraph("GitHub: jdoe"),
                Block::heading(2, "Professional Summary"),
                Block::paragraph("Backend engineer."),
                Block::heading(2, "Work Experience"),
                Block::paragraph("Engineer at Acme (2020-2022)"),
                Block::Bullet {
                    text: "- Led X".to_string()
                },
                Block::Bullet {
                    text: "- Shipped Y".to_string()
                },
                Block::heading(2, "Education"),
                Block::paragraph("BSc Computer Science from MIT (2019)"),
                Block::heading(2, "Skills"),
                Block::paragraph("Python, Go"),
            ]
        );
    }

    #[test]
    fn test_blank_record_keeps_structure() {
        let blocks = outline(&ResumeRecord::default());
        assert_eq!(blocks.len(), 11);
        assert_eq!(blocks[0], Block::heading(1, ""));
        assert_eq!(blocks[1], Block::paragraph("Email: "));
        assert!(!blocks.iter().any(|b| matches!(b, Block::Bullet { .. })));
        let headings: Vec<&str> = blocks
            .iter()
            .filter(|b| matches!(b, Block::Heading { level: 2, .. }))
            .map(text)
            .collect();
        assert_eq!(
            headings,
            vec!["Professional Summary", "Work Experience", "Education", "Skills"]
        );
    }

    #[test]
    fn test_entries_keep_submission_order() {
        let mut record = jane_doe();
        record.work_experience.push(WorkEntry {
            role: "Lead".to_string(),
            company: "Globex".to_string(),
            duration: "2022-2024".to_string(),
            description: vec!["Grew team to 8".to_string()],
        });
        let texts: Vec<String> = outline(&record)
            .iter()
            .map(|b| text(b).to_string())
            .collect();
        let first = texts.iter().position(|t| t == "Engineer at Acme (2020-2022)");
        let second = texts.iter().position(|t| t == "Lead at Globex (2022-2024)");
        assert!(first < second);
        assert_eq!(
            texts[second.unwrap() + 1],
            "- Grew team to 8"
        );
    }

    #[test]
    fn test_outline_is_deterministic() {
        assert_eq!(outline(&jane_doe()), outline(&jane_doe()));
    }
}
