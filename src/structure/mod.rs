//! Document structuring: font-size statistics, heading detection, and
//! section building.

mod font_stats;
mod headings;
mod sections;

pub use font_stats::{FontHistogram, HeadingLevelMap};
pub use headings::HeadingClassifier;
pub use sections::{SectionBuilder, DEFAULT_MIN_PAGE_CHARS};
