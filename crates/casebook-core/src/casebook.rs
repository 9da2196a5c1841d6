//! Service facade
//!
//! Bundles the per-collection services over one set of stores and one clock.

use crate::auth::Authenticator;
use crate::case_studies::CaseStudyService;
use crate::clock::{Clock, SystemClock};
use crate::focus_groups::FocusGroupService;
use crate::history::{tension_history, value_history, TensionFilter};
use casebook_model::{Entry, Submission, User};
use casebook_store::{CollectionPaths, JsonFileStore, RecordStore};
use std::sync::Arc;

/// The three collections a casebook runs on
#[derive(Clone)]
pub struct Stores {
    /// Individual case studies
    pub individual: Arc<dyn RecordStore<Submission>>,
    /// Focus-group submissions
    pub focus_group: Arc<dyn RecordStore<Submission>>,
    /// Registered users
    pub users: Arc<dyn RecordStore<User>>,
}

impl Stores {
    /// JSON files laid out by `paths`
    #[must_use]
    pub fn files(paths: &CollectionPaths) -> Self {
        Self {
            individual: Arc::new(JsonFileStore::<Submission>::new(&paths.individual)),
            focus_group: Arc::new(JsonFileStore::<Submission>::new(&paths.focus_group)),
            users: Arc::new(JsonFileStore::<User>::new(&paths.users)),
        }
    }
}

/// Everything the HTTP layer calls into
#[derive(Clone)]
pub struct Casebook {
    /// Individual case studies
    pub case_studies: CaseStudyService,
    /// Focus-group submissions and edits
    pub focus_groups: FocusGroupService,
    /// Users and credentials
    pub auth: Authenticator,
    individual: Arc<dyn RecordStore<Submission>>,
    focus_group: Arc<dyn RecordStore<Submission>>,
    tensions: TensionFilter,
}

impl std::fmt::Debug for Casebook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Casebook")
            .field("case_studies", &self.case_studies)
            .field("focus_groups", &self.focus_groups)
            .field("tensions", &self.tensions)
            .finish_non_exhaustive()
    }
}

impl Casebook {
    /// Casebook on the wall clock
    #[must_use]
    pub fn new(stores: Stores) -> Self {
        Self::with_clock(stores, Arc::new(SystemClock))
    }

    /// Casebook on a supplied clock
    #[must_use]
    pub fn with_clock(stores: Stores, clock: Arc<dyn Clock>) -> Self {
        Self {
            case_studies: CaseStudyService::new(stores.individual.clone(), clock.clone()),
            focus_groups: FocusGroupService::new(stores.focus_group.clone(), clock.clone()),
            auth: Authenticator::new(stores.users, clock),
            individual: stores.individual,
            focus_group: stores.focus_group,
            tensions: TensionFilter::default(),
        }
    }

    /// Replace the excluded tension labels
    #[must_use]
    pub fn with_tension_filter(mut self, tensions: TensionFilter) -> Self {
        self.tensions = tensions;
        self
    }

    /// Distinct values named by `email`, individual case studies first
    pub async fn value_history(&self, email: &str) -> Vec<Entry> {
        let (individual, group) = self.load_both().await;
        value_history(email, &[&individual, &group])
    }

    /// Distinct tensions named by `email`, predefined labels excluded
    pub async fn tension_history(&self, email: &str) -> Vec<Entry> {
        let (individual, group) = self.load_both().await;
        tension_history(email, &[&individual, &group], &self.tensions)
    }

    async fn load_both(&self) -> (Vec<Submission>, Vec<Submission>) {
        (self.individual.load().await, self.focus_group.load().await)
    }
}
