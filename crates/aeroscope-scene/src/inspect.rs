//! Inspect requests and stale-result suppression.
//!
//! Each request gets a ticket. Only the completion for the most recent live
//! ticket is displayed; completions for superseded or dismissed requests are
//! dropped.

use std::fmt;

use crate::mode::PropulsionType;

/// Monotonically increasing request identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A request to generate a schematic for one part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectRequest {
    pub ticket: Ticket,
    pub part: String,
    pub propulsion: PropulsionType,
}

/// What the inspect panel should show.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InspectStatus<'a, T> {
    /// Nothing requested, or the last request was dismissed.
    Idle,
    /// Waiting for the result of this request.
    Pending(&'a InspectRequest),
    /// The result for this request has arrived.
    Ready(&'a InspectRequest, &'a T),
}

/// Tracks the live inspect request and its displayed result.
#[derive(Debug, Clone)]
pub struct InspectTracker<T> {
    issued: u64,
    pending: Option<InspectRequest>,
    displayed: Option<(InspectRequest, T)>,
}

impl<T> Default for InspectTracker<T> {
    fn default() -> Self {
        Self {
            issued: 0,
            pending: None,
            displayed: None,
        }
    }
}

impl<T> InspectTracker<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a request for `part`, superseding any earlier one.
    pub fn request(&mut self, part: impl Into<String>, propulsion: PropulsionType) -> InspectRequest {
        self.issued += 1;
        let request = InspectRequest {
            ticket: Ticket(self.issued),
            part: part.into(),
            propulsion,
        };
        if let Some(previous) = self.pending.replace(request.clone()) {
            tracing::debug!(ticket = %previous.ticket, part = %previous.part, "inspect request superseded");
        }
        self.displayed = None;
        tracing::debug!(ticket = %request.ticket, part = %request.part, "inspect requested");
        request
    }

    /// Deliver a result. Returns `false` and drops it if `ticket` is stale.
    pub fn complete(&mut self, ticket: Ticket, result: T) -> bool {
        match self.pending.take_if(|pending| pending.ticket == ticket) {
            Some(request) => {
                self.displayed = Some((request, result));
                true
            }
            None => {
                tracing::debug!(%ticket, "dropping stale inspect result");
                false
            }
        }
    }

    /// Forget the live request and any displayed result.
    pub fn dismiss(&mut self) {
        self.pending = None;
        self.displayed = None;
    }

    pub fn status(&self) -> InspectStatus<'_, T> {
        if let Some(request) = &self.pending {
            InspectStatus::Pending(request)
        } else if let Some((request, result)) = &self.displayed {
            InspectStatus::Ready(request, result)
        } else {
            InspectStatus::Idle
        }
    }

    /// The request still awaiting a result, if any.
    pub fn pending(&self) -> Option<&InspectRequest> {
        self.pending.as_ref()
    }

    /// The displayed result and the request it answers.
    pub fn displayed(&self) -> Option<(&InspectRequest, &T)> {
        self.displayed.as_ref().map(|(request, result)| (request, result))
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_none() && self.displayed.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tickets_increase() {
        let mut tracker = InspectTracker::<()>::new();
        let a = tracker.request("ENG 1", PropulsionType::Kerosene);
        let b = tracker.request("ENG 1", PropulsionType::Kerosene);
        assert!(b.ticket > a.ticket);
    }

    #[test]
    fn test_late_result_does_not_overwrite_newer_request() {
        let mut tracker = InspectTracker::new();
        let first = tracker.request("ENG 1", PropulsionType::LiquidH2);
        let second = tracker.request("ENG 2", PropulsionType::LiquidH2);

        assert!(!tracker.complete(first.ticket, "eng-1-image"));
        assert_eq!(tracker.status(), InspectStatus::Pending(&second));

        assert!(tracker.complete(second.ticket, "eng-2-image"));
        let (request, image) = tracker.displayed().unwrap();
        assert_eq!(request.part, "ENG 2");
        assert_eq!(*image, "eng-2-image");

        // A result arriving after the newer one was shown is still ignored.
        assert!(!tracker.complete(first.ticket, "eng-1-image"));
        assert_eq!(tracker.displayed().unwrap().1, &"eng-2-image");
    }

    #[test]
    fn test_dismiss_discards_in_flight_result() {
        let mut tracker = InspectTracker::new();
        let request = tracker.request("ENG 1", PropulsionType::Saf);
        tracker.dismiss();
        assert!(!tracker.complete(request.ticket, 1));
        assert_eq!(tracker.status(), InspectStatus::Idle);
        assert!(tracker.is_idle());
    }

    #[test]
    fn test_result_is_accepted_once() {
        let mut tracker = InspectTracker::new();
        let request = tracker.request("ENG 2", PropulsionType::Electric);
        assert!(tracker.complete(request.ticket, 'a'));
        assert!(!tracker.complete(request.ticket, 'b'));
        assert_eq!(tracker.displayed().unwrap().1, &'a');
    }

    #[test]
    fn test_new_request_clears_display() {
        let mut tracker = InspectTracker::new();
        let request = tracker.request("ENG 1", PropulsionType::Saf);
        tracker.complete(request.ticket, 1);
        let next = tracker.request("ENG 2", PropulsionType::Saf);
        assert_eq!(tracker.status(), InspectStatus::Pending(&next));
    }
}
