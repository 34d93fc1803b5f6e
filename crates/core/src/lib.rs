//! ProDialer core — contact model, data-access boundary, configuration and
//! the error taxonomy shared by the reporting engine and its host.

pub mod clock;
pub mod config;
pub mod error;
pub mod store;
pub mod types;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::AppConfig;
pub use error::{ProDialerError, ProDialerResult};
pub use store::{ContactSource, JsonFileContacts};
pub use types::{CallEvent, Contact, LeadStatus, LeadTag};
