//! Certificate verification core: five independent checks over an uploaded
//! certificate record, combined into a 0-100 score and a
//! verified / pending / invalid status.
//!
//! The ledger and signature checks are simulations driven by a caller-supplied
//! RNG; pass a seeded `StdRng` for reproducible verdicts.

pub mod address;
pub mod catalog;
pub mod checks;
pub mod config;
pub mod errors;
pub mod intake;
pub mod model;
pub mod report;
pub mod scorer;
pub mod session;

pub use checks::{Check, CheckContext, CheckDetails, CheckKind, CheckResult};
pub use config::CertifyConfig;
pub use errors::{ConfigError, IntakeError};
pub use model::{CertificateRecord, FileRef, VerificationStatus, VerificationVerdict};
pub use scorer::VerificationScorer;
pub use session::Session;
