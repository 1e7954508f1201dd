//! Markdown preview of a `ResumeRecord`, shown before the user downloads.

use crate::models::resume::ResumeRecord;

pub fn render_preview(record: &ResumeRecord) -> String {
    let mut lines = vec![
        "### Personal Details".to_string(),
        format!("**Name:** {}", record.name),
        format!("**Email:** {}", record.email),
        format!("**Phone:** {}", record.phone),
        format!("**LinkedIn:** {}", record.linkedin),
        format!("**GitHub:** {}", record.github),
        String::new(),
        "### Professional Summary".to_string(),
        record.summary.clone(),
        String::new(),
        "### Work Experience".to_string(),
    ];

    for exp in &record.work_experience {
        lines.push(format!("**{}** at {} ({})", exp.role, exp.company, exp.duration));
        lines.extend(exp.description.iter().map(|point| format!("- {point}")));
    }

    lines.push(String::new());
    lines.push("### Education".to_string());
    lines.extend(
        record
            .education
            .iter()
            .map(|edu| format!("**{}** from {} ({})", edu.degree, edu.institution, edu.year)),
    );

    lines.push(String::new());
    lines.push("### Skills".to_string());
    lines.push(record.skills.clone());

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{EducationEntry, WorkEntry};

    #[test]
    fn test_preview_sections_in_order() {
        let record = ResumeRecord {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            summary: "Backend engineer.".to_string(),
            work_experience: vec![WorkEntry {
                role: "Engineer".to_string(),
                company: "Acme".to_string(),
                duration: "2020-2022".to_string(),
                description: vec!["Led X".to_string(), "Shipped Y".to_string()],
            }],
            education: vec![EducationEntry {
                degree: "BSc".to_string(),
                institution: "MIT".to_string(),
                year: "2019".to_string(),
            }],
            skills: "Python, Go".to_string(),
            ..Default::default()
        };

        let preview = render_preview(&record);
        let positions: Vec<usize> = [
            "### Personal Details",
            "**Name:** Jane Doe",
            "**Email:** jane@example.com",
            "### Professional Summary",
            "Backend engineer.",
            "### Work Experience",
            "**Engineer** at Acme (2020-2022)",
            "- Led X",
            "- Shipped Y",
            "### Education",
            "**BSc** from MIT (2019)",
            "### Skills",
            "Python, Go",
        ]
        .iter()
        .map(|needle| preview.find(needle).expect(needle))
        .collect();

        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_blank_record_preview_has_all_headings() {
        let preview = render_preview(&ResumeRecord::default());
        for heading in [
            "### Personal Details",
            "### Professional Summary",
            "### Work Experience",
            "### Education",
            "### Skills",
        ] {
            assert!(preview.contains(heading));
        }
        assert!(!preview.contains("- "));
    }

    #[test]
    fn test_preview_exact_layout() {
        let record = ResumeRecord {
            name: "Jane".to_string(),
            summary: "Builder.".to_string(),
            work_experience: vec![WorkEntry {
                role: "Eng".to_string(),
                company: "Acme".to_string(),
                duration: "2020".to_string(),
                description: vec!["Led X".to_string()],
            }],
            skills: "Go".to_string(),
            ..Default::default()
        };

        let expected = "### Personal Details\n\
                        **Name:** Jane\n\
                        **Email:** \n\
                        **Phone:** \n\
                        **LinkedIn:** \n\
                        **GitHub:** \n\
                        \n\
                        ### Professional Summary\n\
                        Builder.\n\
                        \n\
                        ### Work Experience\n\
                        **Eng** at Acme (2020)\n\
                        - Led X\n\
                        \n\
                        ### Education\n\
                        \n\
                        ### Skills\n\
                        Go\n";
        assert_eq!(render_preview(&record), expected);
    }
}
