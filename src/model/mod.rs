//! Typed records flowing through the extraction and ranking pipeline.

mod run;
mod section;
mod span;

pub use run::{
    DocumentRef, ExtractedSection, JobToBeDone, Persona, RunInput, RunMetadata, RunOutput,
    SubsectionAnalysis,
};
pub use section::{RankedSection, RefinedSubsection, Section};
pub use span::{Heading, HeadingLevel, Span};
