use crate::AnalysisOutcome;

/// Caller-owned reference to the selected photo, such as a revocable
/// object URL used for the preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageHandle(pub String);

/// Identifies one analysis run. Handed out when the run starts and handed
/// back with its outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisTicket(u64);

/// Where the session is in the analysis cycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Status {
    /// Nothing in flight, nothing to show.
    #[default]
    Idle,
    /// The run with this ticket is analyzing the current image.
    Loading(AnalysisTicket),
    /// The last analysis finished with this outcome.
    ShowingResult(AnalysisOutcome),
}

/// Something that happened in the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// The user picked a new photo.
    ImageSelected(ImageHandle),
    /// The user pressed the analyze control.
    AnalysisStarted,
    /// The run identified by `ticket` finished.
    AnalysisFinished {
        /// Ticket of the run, from [`Session::ticket`].
        ticket: AnalysisTicket,
        /// What the run produced.
        outcome: AnalysisOutcome,
    },
    /// The user left; drop everything.
    Reset,
}

/// Immutable UI state. Every change goes through [`Session::reduce`].
///
/// ```
/// use zerkalo::{AnalysisOutcome, ImageHandle, Session, SessionEvent, Status};
///
/// let session = Session::default()
///     .reduce(SessionEvent::ImageSelected(ImageHandle("blob:1".into())))
///     .reduce(SessionEvent::AnalysisStarted);
/// assert!(!session.can_analyze());
///
/// let ticket = session.ticket().unwrap();
/// let session = session.reduce(SessionEvent::AnalysisFinished {
///     ticket,
///     outcome: AnalysisOutcome::NoFaceFound,
/// });
/// assert_eq!(session.status(), &Status::ShowingResult(AnalysisOutcome::NoFaceFound));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    image: Option<ImageHandle>,
    status: Status,
    runs: u64,
}

impl Session {
    /// The selected photo, if any.
    pub fn image(&self) -> Option<&ImageHandle> {
        self.image.as_ref()
    }

    /// Current status.
    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Ticket of the running analysis, if one is running.
    pub fn ticket(&self) -> Option<AnalysisTicket> {
        match self.status {
            Status::Loading(ticket) => Some(ticket),
            Status::Idle | Status::ShowingResult(_) => None,
        }
    }

    /// The outcome on display, if any.
    pub fn outcome(&self) -> Option<&AnalysisOutcome> {
        match &self.status {
            Status::ShowingResult(outcome) => Some(outcome),
            Status::Idle | Status::Loading(_) => None,
        }
    }

    /// Whether the analyze control should be enabled.
    pub fn can_analyze(&self) -> bool {
        self.image.is_some() && self.ticket().is_none()
    }

    /// Apply one event and return the next state.
    ///
    /// Events that make no sense in the current state leave it unchanged:
    /// starting without an image or while loading, and finishing with a
    /// ticket other than the running one. Selecting a new image drops the
    /// old handle and any result, so a run started for the old image can
    /// never deliver its outcome.
    pub fn reduce(self, event: SessionEvent) -> Session {
        match event {
            SessionEvent::ImageSelected(handle) => Session {
                image: Some(handle),
                status: Status::Idle,
                ..self
            },
            SessionEvent::AnalysisStarted if self.can_analyze() => {
                let runs = self.runs + 1;
                Session {
                    status: Status::Loading(AnalysisTicket(runs)),
                    runs,
                    ..self
                }
            }
            SessionEvent::AnalysisStarted => self,
            SessionEvent::AnalysisFinished { ticket, outcome } if self.ticket() == Some(ticket) => {
                Session {
                    status: Status::ShowingResult(outcome),
                    ..self
                }
            }
            SessionEvent::AnalysisFinished { .. } => {
                tracing::debug!("dropping outcome of a superseded analysis");
                self
            }
            // The run counter survives so tickets from before the reset stay stale.
            SessionEvent::Reset => Session {
                runs: self.runs,
                ..Session::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{resolve_profile, StyleCategory, ToneLabel};

    fn handle(id: &str) -> ImageHandle {
        ImageHandle(format!("blob:{id}"))
    }

    fn started(id: &str) -> Session {
        Session::default()
            .reduce(SessionEvent::ImageSelected(handle(id)))
            .reduce(SessionEvent::AnalysisStarted)
    }

    fn finish(session: Session, ticket: AnalysisTicket, outcome: AnalysisOutcome) -> Session {
        session.reduce(SessionEvent::AnalysisFinished { ticket, outcome })
    }

    #[test]
    fn starts_idle_without_image() {
        let session = Session::default();
        assert_eq!(session.status(), &Status::Idle);
        assert!(session.image().is_none());
        assert!(session.ticket().is_none());
        assert!(!session.can_analyze());
    }

    #[test]
    fn cannot_start_without_image() {
        let session = Session::default().reduce(SessionEvent::AnalysisStarted);
        assert_eq!(session, Session::default());
    }

    #[test]
    fn trigger_is_disabled_while_loading() {
        let loading = started("a");
        assert!(matches!(loading.status(), Status::Loading(_)));
        assert!(!loading.can_analyze());

        let again = loading.clone().reduce(SessionEvent::AnalysisStarted);
        assert_eq!(again, loading);
    }

    #[test]
    fn finished_analysis_shows_outcome_and_reenables_trigger() {
        let profile = resolve_profile(ToneLabel::Light, StyleCategory::Street);
        let session = started("a");
        let ticket = session.ticket().unwrap();
        let session = finish(session, ticket, AnalysisOutcome::Profile(profile.clone()));

        assert_eq!(session.outcome(), Some(&AnalysisOutcome::Profile(profile)));
        assert!(session.can_analyze());
    }

    #[test]
    fn new_image_clears_result_and_drops_old_handle() {
        let session = started("a");
        let ticket = session.ticket().unwrap();
        let session = finish(session, ticket, AnalysisOutcome::NoFaceFound)
            .reduce(SessionEvent::ImageSelected(handle("b")));

        assert_eq!(session.image(), Some(&handle("b")));
        assert_eq!(session.status(), &Status::Idle);
        assert!(session.outcome().is_none());
    }

    #[test]
    fn outcome_of_superseded_analysis_is_ignored() {
        let session = started("a");
        let stale = session.ticket().unwrap();
        let session = session.reduce(SessionEvent::ImageSelected(handle("b")));
        let session = finish(session, stale, AnalysisOutcome::NoFaceFound);

        assert_eq!(session.status(), &Status::Idle);
        assert_eq!(session.image(), Some(&handle("b")));
    }

    #[test]
    fn old_run_cannot_answer_for_restarted_analysis_of_new_image() {
        let session = started("a");
        let stale = session.ticket().unwrap();
        let session = session
            .reduce(SessionEvent::ImageSelected(handle("b")))
            .reduce(SessionEvent::AnalysisStarted);
        let current = session.ticket().unwrap();
        assert_ne!(stale, current);

        let old_profile = resolve_profile(ToneLabel::Dark, StyleCategory::Casual);
        let session = finish(session, stale, AnalysisOutcome::Profile(old_profile));
        assert_eq!(session.status(), &Status::Loading(current));
        assert!(session.outcome().is_none());

        let session = finish(session, current, AnalysisOutcome::NoFaceFound);
        assert_eq!(session.image(), Some(&handle("b")));
        assert_eq!(session.outcome(), Some(&AnalysisOutcome::NoFaceFound));
    }

    #[test]
    fn tickets_from_before_reset_stay_stale() {
        let session = started("a");
        let stale = session.ticket().unwrap();
        let session = session
            .reduce(SessionEvent::Reset)
            .reduce(SessionEvent::ImageSelected(handle("b")))
            .reduce(SessionEvent::AnalysisStarted);
        assert_ne!(session.ticket(), Some(stale));

        let session = finish(session, stale, AnalysisOutcome::NoFaceFound);
        assert!(session.outcome().is_none());
    }

    #[test]
    fn reset_clears_image_and_status() {
        let session = started("a").reduce(SessionEvent::Reset);
        assert!(session.image().is_none());
        assert_eq!(session.status(), &Status::Idle);
        assert!(!session.can_analyze());
    }
}
