//! Display formatting for model output.
//!
//! Everything here is a pure function of its input string: cleaning helpers
//! that strip markdown and model boilerplate, title extraction, and the
//! analysis segmenter that turns free text into labeled [`Section`]s.
//!
//! [`Section`]: crate::domain::Section

mod clean;
mod segment;
mod title;

pub use clean::{clean_ai_text, clean_analysis_text, clean_meta_commentary, strip_markdown};
pub use segment::{
    MAX_NUMBERED_TITLE, MAX_PARAGRAPH_TITLE, OVERVIEW_TITLE, classify_icon, segment_analysis,
};
pub use title::{FALLBACK_TITLE, extract_title};
