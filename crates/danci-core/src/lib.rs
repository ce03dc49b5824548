pub mod lookup;
pub mod preprocess;
pub mod session;
pub mod store;

pub use lookup::{Lookup, LookupError};
pub use session::{LookupOutcome, SessionCoordinator, SessionError, SessionPhase};
pub use store::{StoreError, VocabularyStore};
