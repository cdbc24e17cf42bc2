use crate::model::{OperationDescriptor, OperationId, OperationResult, RequestPayload};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Idle,
    Loading,
}

/// Identifies one submission. `session` names the controller instance and
/// `generation` the submission within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    pub session: u64,
    pub generation: u64,
}

/// Everything needed to run one transport call off the UI thread.
#[derive(Debug, Clone)]
pub struct PendingRequest {
    pub ticket: RequestTicket,
    pub operation: OperationId,
    pub payload: RequestPayload,
}

/// Input and result state for a single operation.
#[derive(Debug)]
pub struct OperationController {
    descriptor: &'static OperationDescriptor,
    inputs: Vec<(String, String)>,
    status: Status,
    last_result: Option<OperationResult>,
    session: u64,
    generation: u64,
}

impl OperationController {
    pub fn new(descriptor: &'static OperationDescriptor, session: u64) -> Self {
        Self {
            descriptor,
            inputs: descriptor.default_inputs(),
            status: Status::Idle,
            last_result: None,
            session,
            generation: 0,
        }
    }

    pub fn descriptor(&self) -> &'static OperationDescriptor {
        self.descriptor
    }

    pub fn operation(&self) -> OperationId {
        self.descriptor.id
    }

    pub fn session(&self) -> u64 {
        self.session
    }

    pub fn inputs(&self) -> &[(String, String)] {
        &self.inputs
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.inputs
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == Status::Loading
    }

    pub fn last_result(&self) -> Option<&OperationResult> {
        self.last_result.as_ref()
    }

    /// Returns false for names the descriptor does not declare.
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> bool {
        match self.inputs.iter_mut().find(|(field, _)| field == name) {
            Some((_, current)) => {
                *current = value.into();
                true
            }
            None => false,
        }
    }

    /// Restores defaults and forgets the result. Any request still in flight
    /// is orphaned.
    pub fn reset(&mut self) {
        self.inputs = self.descriptor.default_inputs();
        self.last_result = None;
        self.status = Status::Idle;
        self.generation += 1;
    }

    /// Starts a submission. Invalid input settles immediately with an error
    /// result and no request is produced.
    pub fn begin_submit(&mut self) -> Option<PendingRequest> {
        let payload = match RequestPayload::parse(&self.inputs) {
            Ok(payload) => payload,
            Err(err) => {
                self.generation += 1;
                self.status = Status::Idle;
                self.last_result = Some(OperationResult::Error(err.to_string()));
                return None;
            }
        };
        self.generation += 1;
        self.status = Status::Loading;
        self.last_result = None;
        Some(PendingRequest {
            ticket: self.ticket(),
            operation: self.operation(),
            payload,
        })
    }

    /// Applies a completed request if it is the latest one issued.
    pub fn settle(&mut self, ticket: RequestTicket, result: OperationResult) -> bool {
        if ticket != self.ticket() {
            debug!(
                operation = self.operation().endpoint(),
                ?ticket,
                current = self.generation,
                "discarding stale result"
            );
            return false;
        }
        self.last_result = Some(result);
        self.status = Status::Idle;
        true
    }

    fn ticket(&self) -> RequestTicket {
        RequestTicket {
            session: self.session,
            generation: self.generation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::result::GoldbachPair;

    fn controller(id: OperationId) -> OperationController {
        OperationController::new(id.descriptor(), 1)
    }

    fn goldbach(first: u64, second: u64) -> OperationResult {
        OperationResult::GoldbachPair(GoldbachPair {
            n: first + second,
            pair: Some((first, second)),
        })
    }

    #[test]
    fn starts_from_descriptor_defaults() {
        let controller = controller(OperationId::PatternPrime);
        assert_eq!(controller.field("n"), Some("10"));
        assert_eq!(controller.field("max_n"), Some("3000"));
        assert_eq!(controller.status(), Status::Idle);
        assert!(controller.last_result().is_none());
    }

    #[test]
    fn submit_goes_loading_then_idle() {
        let mut controller = controller(OperationId::GoldbachPair);
        let pending = controller.begin_submit().expect("valid defaults");
        assert_eq!(pending.operation, OperationId::GoldbachPair);
        assert_eq!(
            serde_json::to_string(&pending.payload).unwrap(),
            r#"{"even_n":20}"#
        );
        assert!(controller.is_loading());
        assert!(controller.last_result().is_none());

        assert!(controller.settle(pending.ticket, goldbach(3, 17)));
        assert_eq!(controller.status(), Status::Idle);
        assert_eq!(controller.last_result(), Some(&goldbach(3, 17)));
    }

    #[test]
    fn resubmitting_clears_the_previous_result() {
        let mut controller = controller(OperationId::GoldbachPair);
        let first = controller.begin_submit().unwrap();
        controller.settle(first.ticket, goldbach(3, 17));

        controller.set_field("even_n", "30");
        let second = controller.begin_submit().unwrap();
        assert!(controller.last_result().is_none());
        assert!(controller.is_loading());
        assert!(controller.settle(second.ticket, goldbach(7, 23)));
    }

    #[test]
    fn only_the_latest_submission_is_applied() {
        let mut controller = controller(OperationId::GoldbachPair);
        let first = controller.begin_submit().unwrap();
        controller.set_field("even_n", "30");
        let second = controller.begin_submit().unwrap();

        assert!(controller.settle(second.ticket, goldbach(7, 23)));
        assert!(!controller.settle(first.ticket, goldbach(3, 17)));
        assert_eq!(controller.last_result(), Some(&goldbach(7, 23)));
    }

    #[test]
    fn stale_response_keeps_loading_until_latest_arrives() {
        let mut controller = controller(OperationId::GoldbachPair);
        let first = controller.begin_submit().unwrap();
        let second = controller.begin_submit().unwrap();

        assert!(!controller.settle(first.ticket, goldbach(3, 17)));
        assert!(controller.is_loading());
        assert!(controller.last_result().is_none());
        assert!(controller.settle(second.ticket, goldbach(3, 17)));
        assert!(!controller.is_loading());
    }

    #[test]
    fn reset_restores_defaults_and_orphans_in_flight_requests() {
        let mut controller = controller(OperationId::MersennePrimes);
        controller.set_field("end", "127");
        let pending = controller.begin_submit().unwrap();

        controller.reset();
        assert_eq!(controller.field("end"), Some("31"));
        assert_eq!(controller.status(), Status::Idle);
        assert!(!controller.settle(pending.ticket, OperationResult::MersennePrimes(Vec::new())));
        assert!(controller.last_result().is_none());
    }

    #[test]
    fn invalid_input_settles_without_a_request() {
        let mut controller = controller(OperationId::PrimesBetweenSquares);
        assert!(controller.set_field("p2", "17x"));
        assert!(controller.begin_submit().is_none());
        assert_eq!(controller.status(), Status::Idle);
        assert_eq!(
            controller.last_result().and_then(OperationResult::error),
            Some("p2: \"17x\" is not a whole number")
        );
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let mut controller = controller(OperationId::RepunitPrimes);
        assert!(!controller.set_field("max_n", "9"));
        assert_eq!(controller.inputs().len(), 1);
    }

    #[test]
    fn tickets_from_other_sessions_are_rejected() {
        let mut controller = controller(OperationId::GoldbachPair);
        let pending = controller.begin_submit().unwrap();
        let foreign = RequestTicket {
            session: pending.ticket.session + 1,
            generation: pending.ticket.generation,
        };
        assert!(!controller.settle(foreign, goldbach(3, 17)));
        assert!(controller.is_loading());
    }
}
