//! Assessment report model and PDF rendering.
//!
//! The report content is an explicit value handed to the renderer; the only
//! producer today is [`AssessmentReport::placeholder`], which reproduces the
//! demo payload with the candidate's name interpolated into the summary.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

pub mod pdf;

use pdf::ReportWriter;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentReport {
    pub technical_skills: SkillSection,
    pub problem_solving: ScoreSection,
    pub communication_skills: ScoreSection,
    pub soft_skills: Vec<Skill>,
    pub recommendation: String,
    pub summary: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillSection {
    pub score: String,
    pub justification: String,
    pub skills: Vec<Skill>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreSection {
    pub score: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    pub expertise_level: String,
    pub justification: String,
}

impl AssessmentReport {
    /// The static demo assessment. Only the summary varies with the input;
    /// everything else is fixed template content.
    pub fn placeholder(candidate_name: &str) -> Self {
        Self {
            technical_skills: SkillSection {
                score: "30%".to_string(),
                justification: "Alex demonstrated limited technical knowledge and hands-on \
                    experience in AI engineering. While he showed some familiarity with concepts \
                    like RAG, LLMs, and sentiment analysis, his explanations lacked depth and \
                    specificity expected for a Senior AI Engineer role. He struggled with \
                    questions about model optimization, deployment, and scaling."
                    .to_string(),
                skills: vec![
                    Skill {
                        name: "AI/ML Engineering".to_string(),
                        expertise_level: "Beginner".to_string(),
                        justification: "Alex showed basic understanding of AI concepts but \
                            lacked depth in technical implementation and problem-solving."
                            .to_string(),
                    },
                    Skill {
                        name: "Cloud Platforms (AWS, Azure)".to_string(),
                        expertise_level: "Beginner".to_string(),
                        justification: "Alex mentioned experience with AWS and Azure but \
                            couldn't provide specific details about deployment or infrastructure \
                            management."
                            .to_string(),
                    },
                    Skill {
                        name: "NLP/LLMs".to_string(),
                        expertise_level: "Intermediate".to_string(),
                        justification: "Alex demonstrated some knowledge of LLMs and NLP \
                            concepts, but his explanations were often superficial."
                            .to_string(),
                    },
                ],
            },
            problem_solving: ScoreSection {
                score: "40%".to_string(),
            },
            communication_skills: ScoreSection {
                score: "70%".to_string(),
            },
            soft_skills: vec![
                Skill {
                    name: "Teamwork".to_string(),
                    expertise_level: "Intermediate".to_string(),
                    justification: "Alex mentioned collaborating with DevOps teams, but didn't \
                        provide strong examples of cross-functional teamwork."
                        .to_string(),
                },
                Skill {
                    name: "Adaptability".to_string(),
                    expertise_level: "Beginner".to_string(),
                    justification: "Alex showed limited ability to adapt to technical questions \
                        outside his comfort zone."
                        .to_string(),
                },
            ],
            recommendation: "Not Recommended".to_string(),
            summary: format!(
                "{candidate_name} demonstrated a background primarily in product management \
                 with some exposure to AI projects. While he showed enthusiasm and a basic \
                 understanding of AI concepts, his technical skills and hands-on experience \
                 fall short of the requirements for a Senior AI Engineer role at Unblocked. \
                 His strengths lie in communication and product-oriented thinking, but he \
                 lacks the deep technical expertise in AI engineering, model optimization, \
                 and cloud deployment that are crucial for this position."
            ),
        }
    }
}

/// Derives the report filename from the job title and id: every
/// non-alphanumeric character of the title becomes an underscore.
pub fn report_file_name(job_title: &str, job_id: &str) -> String {
    let safe_title: String = job_title
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect();
    format!("{safe_title}_{job_id}.pdf")
}

/// Renders the report to a PDF under a fresh per-request temp directory and
/// returns its path. The unique parent directory keeps concurrent renders for
/// the same job from clobbering each other; the file itself is left in place
/// after upload.
pub fn render_assessment_pdf(
    report: &AssessmentReport,
    job_title: &str,
    job_id: &str,
) -> Result<PathBuf> {
    let file_name = report_file_name(job_title, job_id);
    let dir = tempfile::Builder::new().prefix("assessment-").tempdir()?;
    let path = dir.into_path().join(file_name);

    let bytes = render(report)?;
    std::fs::write(&path, bytes)?;
    Ok(path)
}

fn render(report: &AssessmentReport) -> Result<Vec<u8>> {
    let mut doc = ReportWriter::new();

    doc.title("Candidate Assessment");
    doc.spacer(12.0);

    doc.heading("Technical Skills");
    doc.paragraph(&format!("Score: {}", report.technical_skills.score));
    doc.paragraph(&format!(
        "Justification: {}",
        report.technical_skills.justification
    ));
    doc.spacer(12.0);
    for skill in &report.technical_skills.skills {
        doc.subheading(&format!("Skill: {}", skill.name));
        doc.paragraph(&format!("Expertise: {}", skill.expertise_level));
        doc.paragraph(&format!("Justification: {}", skill.justification));
        doc.spacer(6.0);
    }

    doc.heading("Problem Solving");
    doc.paragraph(&format!("Score: {}", report.problem_solving.score));
    doc.spacer(12.0);

    doc.heading("Communication Skills");
    doc.paragraph(&format!("Score: {}", report.communication_skills.score));
    doc.spacer(12.0);

    doc.heading("Soft Skills");
    for skill in &report.soft_skills {
        doc.subheading(&format!("Skill: {}", skill.name));
        doc.paragraph(&format!("Expertise: {}", skill.expertise_level));
        doc.paragraph(&format!("Justification: {}", skill.justification));
        doc.spacer(6.0);
    }

    doc.heading("Recommendation Status");
    doc.paragraph(&format!("Status: {}", report.recommendation));
    doc.spacer(12.0);

    doc.heading("Candidate Summary");
    doc.paragraph(&report.summary);

    doc.finish("Candidate Assessment")
        .map_err(|e| anyhow::anyhow!("failed to assemble PDF: {e}"))
}
