//! Casebook Core - case study services
//!
//! The services behind the HTTP surface:
//! - Individual case study CRUD with a pending-only update rule
//! - Focus-group submissions, group lookup and edit reconciliation
//! - Value and tension history reports
//! - Username/password registration and login
//!
//! Services own no record state. Each call loads the collection it needs
//! from a [`casebook_store::RecordStore`], changes it, and saves it back.
//!
//! # Example
//!
//! ```rust,ignore
//! use casebook_core::{Casebook, EditRequest, Stores};
//! use casebook_store::CollectionPaths;
//!
//! # async fn example() -> Result<(), casebook_core::CasebookError> {
//! let casebook = Casebook::new(Stores::files(&CollectionPaths::under("data".as_ref())));
//!
//! let request = EditRequest::new("alice|a@x.com|2024-01-01T00:00:00Z", "facilitator");
//! let outcome = casebook.focus_groups.edit(&request).await?;
//!
//! println!("new version: {}", outcome.is_new_version());
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod auth;
pub mod case_studies;
pub mod casebook;
pub mod clock;
mod draft;
pub mod edit;
pub mod error;
pub mod focus_groups;
pub mod history;

pub use auth::{Authenticator, Credentials, Registration};
pub use case_studies::CaseStudyService;
pub use casebook::{Casebook, Stores};
pub use clock::{Clock, FixedClock, SystemClock};
pub use edit::{reconcile_edit, EditOutcome, EditPlacement, EditRequest};
pub use error::{CasebookError, ErrorKind};
pub use focus_groups::FocusGroupService;
pub use history::{tension_history, value_history, TensionFilter, PREDEFINED_TENSIONS};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
