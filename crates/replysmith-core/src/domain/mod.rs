//! Domain entities - the core business objects.

mod audience;
mod role;
mod section;
mod user;

pub use audience::{Platform, Tone};
pub use role::{Role, TrialStatus};
pub use section::{Section, SectionIcon};
pub use user::{User, UserProfile, mask_email};
