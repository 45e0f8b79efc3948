//! Output assembly and serialization.

use chrono::Utc;

use crate::error::Result;
use crate::model::{
    ExtractedSection, RankedSection, RefinedSubsection, RunInput, RunMetadata, RunOutput,
    SubsectionAnalysis,
};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Package metadata, ranked sections, and refinements into the run output.
///
/// `extracted_sections` keeps rank order; `subsection_analysis` holds one
/// entry per section whose refinement produced sentences.
pub fn assemble(
    input: &RunInput,
    ranked: &[RankedSection],
    refined: Vec<RefinedSubsection>,
) -> RunOutput {
    let metadata = RunMetadata {
        input_documents: input
            .documents
            .iter()
            .map(|d| d.filename.clone())
            .collect(),
        persona: input.persona.role.clone(),
        job_to_be_done: input.job_to_be_done.task.clone(),
        processing_timestamp: Utc::now().to_rfc3339(),
    };

    let extracted_sections = ranked
        .iter()
        .map(|s| ExtractedSection {
            document: s.document_id.clone(),
            section_title: s.section_title.clone(),
            importance_rank: s.importance_rank,
            page_number: s.page_number,
        })
        .collect();

    let subsection_analysis = refined
        .into_iter()
        .map(|r| SubsectionAnalysis {
            document: r.document_id,
            refined_text: r.refined_text,
            page_number: r.page_number,
        })
        .collect();

    RunOutput {
        metadata,
        extracted_sections,
        subsection_analysis,
    }
}

/// Serialize a run output to JSON.
pub fn to_json(output: &RunOutput, format: JsonFormat) -> Result<String> {
    let json = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(output)?,
        JsonFormat::Compact => serde_json::to_string(output)?,
    };
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DocumentRef, JobToBeDone, Persona};

    fn sample() -> RunOutput {
        let input = RunInput {
            documents: vec![DocumentRef {
                filename: "guide.pdf".to_string(),
                title: None,
            }],
            persona: Persona {
                role: "Planner".to_string(),
            },
            job_to_be_done: JobToBeDone {
                task: "plan things".to_string(),
            },
        };
        let ranked = vec![RankedSection {
            document_id: "guide.pdf".to_string(),
            section_title: "Overview".to_string(),
            text: "full page text".to_string(),
            page_number: 3,
            score: 0.72,
            importance_rank: 1,
        }];
        let refined = vec![RefinedSubsection {
            document_id: "guide.pdf".to_string(),
            refined_text: "the best sentences".to_string(),
            page_number: 3,
        }];
        assemble(&input, &ranked, refined)
    }

    #[test]
    fn test_assemble_shapes() {
        let output = sample();
        assert_eq!(output.metadata.input_documents, vec!["guide.pdf"]);
        assert_eq!(output.metadata.persona, "Planner");
        assert_eq!(output.metadata.job_to_be_done, "plan things");
        assert!(!output.metadata.processing_timestamp.is_empty());

        assert_eq!(output.extracted_sections.len(), 1);
        assert_eq!(output.extracted_sections[0].importance_rank, 1);
        assert_eq!(output.extracted_sections[0].page_number, 3);

        assert_eq!(output.subsection_analysis.len(), 1);
        assert_eq!(output.subsection_analysis[0].refined_text, "the best sentences");
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&sample(), JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"extracted_sections\""));
        assert!(json.contains("\"subsection_analysis\""));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&sample(), JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
    }
}
