//! Run configuration and assembled output records.

use serde::{Deserialize, Serialize};

/// A document named by the run configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRef {
    /// Filename relative to the input directory
    pub filename: String,

    /// Optional display title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// The persona on whose behalf sections are ranked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Persona {
    pub role: String,
}

/// The task the persona is trying to accomplish.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobToBeDone {
    pub task: String,
}

/// Run configuration, deserialized from the input JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunInput {
    pub documents: Vec<DocumentRef>,
    pub persona: Persona,
    pub job_to_be_done: JobToBeDone,
}

impl RunInput {
    /// The query string embedded once per run: `"{role} - {task}"`.
    pub fn query(&self) -> String {
        format!("{} - {}", self.persona.role, self.job_to_be_done.task)
    }
}

/// Run metadata echoed into the output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMetadata {
    pub input_documents: Vec<String>,
    pub persona: String,
    pub job_to_be_done: String,
    pub processing_timestamp: String,
}

/// One ranked section in the output, rank ascending.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedSection {
    pub document: String,
    pub section_title: String,
    pub importance_rank: u32,
    pub page_number: u32,
}

/// One refined subsection extract in the output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubsectionAnalysis {
    pub document: String,
    pub refined_text: String,
    pub page_number: u32,
}

/// The full result of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunOutput {
    pub metadata: RunMetadata,
    pub extracted_sections: Vec<ExtractedSection>,
    pub subsection_analysis: Vec<SubsectionAnalysis>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_format() {
        let input = RunInput {
            documents: vec![],
            persona: Persona {
                role: "Travel Planner".to_string(),
            },
            job_to_be_done: JobToBeDone {
                task: "Plan a trip of 4 days".to_string(),
            },
        };
        assert_eq!(input.query(), "Travel Planner - Plan a trip of 4 days");
    }

    #[test]
    fn test_run_input_from_json() {
        let json = r#"{
            "documents": [{"filename": "guide.pdf"}],
            "persona": {"role": "Researcher"},
            "job_to_be_done": {"task": "Survey methods"}
        }"#;
        let input: RunInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.documents.len(), 1);
        assert_eq!(input.documents[0].filename, "guide.pdf");
        assert!(input.documents[0].title.is_none());
    }
}
