pub mod event;
pub mod record;

pub use event::AppEvent;
pub use record::{
    CandidateRecord, DetailRecord, Example, GenerationResponse, Meaning, SavedEntry, ShapeError,
    Synonym, UsageRegister,
};
