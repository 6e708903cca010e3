// Resume document model: schema, legacy read path and pure edit functions.
// Nothing in here touches the network or the store.

pub mod edit;
pub mod handlers;
pub mod legacy;
pub mod model;

pub use edit::{apply_edits, create_blank, resolve_title, set_profile_image, DocumentError, EditOp};
pub use legacy::read_stored;
pub use model::{EducationEntry, ExperienceEntry, ResumeDocument};
