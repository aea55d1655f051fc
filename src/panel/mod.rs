//! Rating panel state and update logic.
//!
//! [`RatingPanel`] owns the rating draft being edited, the advisory `ready`
//! flag, the connection to the document store and the toast. All state
//! changes go through [`RatingPanel::update`], which consumes a
//! [`PanelEvent`] and returns the [`PanelEffect`]s the caller must run.
//! Effects are plain data; [`effects::perform`] executes one and yields the
//! event to feed back in.
//!
//! # Operations
//!
//! - **Load**: fetch a rating by name and replace the draft with it.
//! - **New**: reset the draft.
//! - **Save**: write the draft; the confirmation toast is shown immediately.
//! - **Delete all**: remove every rating and reset the draft.
//!
//! Store operations are refused with [`PanelError::NotReady`] until
//! [`PanelEvent::Connected`] has delivered a store handle.

pub mod effects;
mod error;
pub mod toast;

pub use effects::{ClearOutcome, perform};
pub use error::PanelError;
pub use toast::{Toast, ToastEffect, ToastPhase, ToastTicket, ToastTimings};

use crate::rating::{Rating, RatingAxis, Score};
use crate::store::{StoreError, StoreHandle};

/// Notice shown after resetting the draft.
pub const NEW_RATING_NOTICE: &str = "New car rating created.";

/// Notice shown after requesting deletion of every rating.
pub const DELETED_ALL_NOTICE: &str = "Deleted all ratings.";

/// Connection state of the panel's document store.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum StoreConnection {
    /// The host handshake has not completed.
    #[default]
    Pending,
    /// A scoped data manager is available.
    Ready(StoreHandle),
}

impl StoreConnection {
    /// Returns the store handle when connected.
    #[must_use]
    pub const fn handle(&self) -> Option<&StoreHandle> {
        match self {
            Self::Pending => None,
            Self::Ready(handle) => Some(handle),
        }
    }
}

/// Inputs to the panel: user actions and completions of earlier effects.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelEvent {
    // Initialisation
    /// The host handshake produced a store handle.
    Connected(StoreHandle),
    /// The host handshake failed.
    ConnectFailed(String),

    // Edits
    /// The car name field changed.
    NameEdited(String),
    /// A rating slider changed.
    AxisEdited {
        /// Axis that changed.
        axis: RatingAxis,
        /// New score.
        value: Score,
    },

    // Operations
    /// Load the rating named `id`.
    LoadRequested {
        /// Car name to search for.
        id: String,
    },
    /// Reset the draft.
    NewRequested,
    /// Save the draft.
    SaveRequested,
    /// Delete every stored rating.
    DeleteAllRequested,

    // Store completions
    /// A fetch returned a rating.
    LoadSucceeded(Rating),
    /// A fetch failed.
    LoadFailed {
        /// The id that was searched for.
        id: String,
        /// Underlying store failure.
        error: StoreError,
    },
    /// A write finished, successfully or not.
    SaveSettled {
        /// Id of the saved draft.
        id: String,
        /// Outcome of the write.
        result: Result<(), StoreError>,
    },
    /// Every delete issued for the collection finished.
    DeleteAllSettled(ClearOutcome),
    /// The collection could not be listed, so nothing was deleted.
    DeleteAllFailed(StoreError),

    // Toast timers
    /// The hide timer for a visible toast elapsed.
    ToastTimerElapsed(ToastTicket),
    /// The fade animation finished.
    ToastFadeFinished(ToastTicket),
}

/// Asynchronous work requested by the panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelEffect {
    /// Fetch the rating `id` from the ratings collection.
    Fetch {
        /// Car name to fetch.
        id: String,
    },
    /// Upsert `rating` into the ratings collection.
    Write {
        /// Rating to store.
        rating: Rating,
    },
    /// Delete every document in the ratings collection.
    ClearCollection,
    /// Run a toast timer.
    Toast(ToastEffect),
}

/// The rating panel's state container.
#[derive(Debug, Clone)]
pub struct RatingPanel {
    draft: Rating,
    ready: bool,
    connection: StoreConnection,
    toast: Toast,
}

impl Default for RatingPanel {
    fn default() -> Self {
        Self::new(ToastTimings::default())
    }
}

impl RatingPanel {
    /// Creates a panel with an empty draft and no store connection.
    #[must_use]
    pub fn new(timings: ToastTimings) -> Self {
        Self {
            draft: Rating::empty(),
            ready: true,
            connection: StoreConnection::Pending,
            toast: Toast::new(timings),
        }
    }

    /// Returns the rating being edited.
    #[must_use]
    pub const fn draft(&self) -> &Rating {
        &self.draft
    }

    /// Returns false while a load or save is in flight.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        self.ready
    }

    /// Returns true once a store handle is available.
    #[must_use]
    pub const fn is_connected(&self) -> bool {
        matches!(self.connection, StoreConnection::Ready(_))
    }

    /// Returns the store connection.
    #[must_use]
    pub const fn connection(&self) -> &StoreConnection {
        &self.connection
    }

    /// Returns the toast.
    #[must_use]
    pub const fn toast(&self) -> &Toast {
        &self.toast
    }

    /// Applies `event` and returns the effects to run.
    pub fn update(&mut self, event: PanelEvent) -> Vec<PanelEffect> {
        let mut effects = Vec::new();
        match event {
            PanelEvent::Connected(handle) => {
                tracing::debug!("rating panel connected to the document store");
                self.connection = StoreConnection::Ready(handle);
            }
            PanelEvent::ConnectFailed(message) => {
                tracing::warn!("document store handshake failed: {message}");
                self.notify(
                    &mut effects,
                    format!("Unable to connect to the data store: {message}"),
                );
            }
            PanelEvent::NameEdited(name) => self.draft.id = name,
            PanelEvent::AxisEdited { axis, value } => self.draft.set_score(axis, value),
            PanelEvent::LoadRequested { id } => self.load(&mut effects, id),
            PanelEvent::NewRequested => {
                self.draft = Rating::empty();
                self.notify(&mut effects, NEW_RATING_NOTICE);
            }
            PanelEvent::SaveRequested => self.save(&mut effects),
            PanelEvent::DeleteAllRequested => self.delete_all(&mut effects),
            PanelEvent::LoadSucceeded(rating) => {
                self.ready = true;
                self.notify(&mut effects, format!("Car rating loaded: {}", rating.id));
                self.draft = rating;
            }
            PanelEvent::LoadFailed { id, error } => {
                tracing::debug!("loading car rating {id:?} failed: {error}");
                self.fail(&mut effects, &PanelError::NotFoundOrFetch { id, cause: error });
                self.ready = true;
            }
            PanelEvent::SaveSettled { id, result } => {
                self.ready = true;
                if let Err(cause) = result {
                    tracing::warn!("{}", PanelError::Persistence { id, cause });
                }
            }
            PanelEvent::DeleteAllSettled(outcome) => outcome.log(),
            PanelEvent::DeleteAllFailed(error) => {
                tracing::warn!("listing ratings for deletion failed: {error}");
            }
            PanelEvent::ToastTimerElapsed(ticket) => {
                effects.extend(self.toast.hide_timer_elapsed(ticket).map(PanelEffect::Toast));
            }
            PanelEvent::ToastFadeFinished(ticket) => {
                self.toast.fade_finished(ticket);
            }
        }
        effects
    }

    /// Cancels pending timers when the panel goes away.
    pub fn teardown(&mut self) {
        if self.toast.cancel_hide_timer() {
            tracing::trace!("cancelled pending toast timer");
        }
    }

    fn load(&mut self, effects: &mut Vec<PanelEffect>, id: String) {
        if id.is_empty() {
            self.fail(effects, &PanelError::MissingSearchQuery);
            self.draft = Rating::empty();
            return;
        }
        if !self.is_connected() {
            self.fail(effects, &PanelError::NotReady);
            return;
        }

        self.ready = false;
        effects.push(PanelEffect::Fetch { id });
    }

    fn save(&mut self, effects: &mut Vec<PanelEffect>) {
        if !self.draft.has_id() {
            self.fail(effects, &PanelError::MissingCarName);
            return;
        }
        if !self.is_connected() {
            self.fail(effects, &PanelError::NotReady);
            return;
        }

        self.ready = false;
        effects.push(PanelEffect::Write {
            rating: self.draft.clone(),
        });
        let notice = format!("Car rating saved: {}", self.draft.id);
        self.notify(effects, notice);
    }

    fn delete_all(&mut self, effects: &mut Vec<PanelEffect>) {
        if !self.is_connected() {
            self.fail(effects, &PanelError::NotReady);
            return;
        }

        effects.push(PanelEffect::ClearCollection);
        self.draft = Rating::empty();
        self.notify(effects, DELETED_ALL_NOTICE);
    }

    fn fail(&mut self, effects: &mut Vec<PanelEffect>, error: &PanelError) {
        self.notify(effects, error.to_string());
    }

    fn notify(&mut self, effects: &mut Vec<PanelEffect>, message: impl Into<String>) {
        effects.extend(self.toast.show(message).map(PanelEffect::Toast));
    }
}

#[cfg(test)]
mod tests;
