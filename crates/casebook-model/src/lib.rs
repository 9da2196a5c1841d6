//! Casebook record model
//!
//! Plain data types shared by every casebook crate.
//!
//! # Core Concepts
//!
//! - [`Submission`]: a case study record, either individual or focus-group
//! - [`Case`]: one group's values and tensions inside a submission
//! - [`SubmissionKey`]: composite identity `username|email|submittedAt`
//! - [`Timestamp`]: RFC 3339 text kept verbatim so keys never drift
//! - [`shallow_merge`]: per-field overlay used by updates and edits
//!
//! # Example
//!
//! ```rust,ignore
//! use casebook_model::{Submission, SubmissionKey};
//!
//! let sub: Submission = serde_json::from_str(raw)?;
//! let key = sub.key();
//! assert_eq!(key, "alice|a@x.com|2024-01-01T00:00:00Z".parse()?);
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod error;
mod key;
mod lenient;
mod merge;
mod submission;
mod timestamp;
mod user;

pub use error::ModelError;
pub use key::SubmissionKey;
pub use merge::{shallow_merge, Fields};
pub use submission::{Case, Entry, ReviewStatus, Submission};
pub use timestamp::Timestamp;
pub use user::{PublicUser, User};
