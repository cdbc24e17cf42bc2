use super::controller::{OperationController, RequestTicket};
use crate::model::{DESCRIPTORS, OperationDescriptor, OperationId, OperationResult};
use tracing::{debug, info};

/// The fixed set of operations and the single live controller.
///
/// Only the active operation has a controller. Switching away drops it, so
/// returning to an operation starts from its defaults.
#[derive(Debug)]
pub struct Shell {
    controller: OperationController,
    next_session: u64,
}

impl Default for Shell {
    fn default() -> Self {
        Self::new(OperationId::default())
    }
}

impl Shell {
    pub fn new(active: OperationId) -> Self {
        Self {
            controller: OperationController::new(active.descriptor(), 1),
            next_session: 2,
        }
    }

    pub fn descriptors(&self) -> &'static [OperationDescriptor] {
        &DESCRIPTORS
    }

    pub fn active(&self) -> OperationId {
        self.controller.operation()
    }

    pub fn controller(&self) -> &OperationController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut OperationController {
        &mut self.controller
    }

    /// Returns whether the active operation changed.
    pub fn select_operation(&mut self, id: OperationId) -> bool {
        if id == self.active() {
            return false;
        }
        info!(from = self.active().endpoint(), to = id.endpoint(), "switching operation");
        self.controller = OperationController::new(id.descriptor(), self.next_session);
        self.next_session += 1;
        true
    }

    /// Routes a completion to the live controller. Completions for
    /// controllers that no longer exist are dropped.
    pub fn settle(&mut self, ticket: RequestTicket, result: OperationResult) -> bool {
        if ticket.session != self.controller.session() {
            debug!(?ticket, "dropping result for a closed operation");
            return false;
        }
        self.controller.settle(ticket, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::result::{DecimalString, PatternPrime};

    fn pattern_result() -> OperationResult {
        OperationResult::PatternPrime(PatternPrime {
            n: Some(10),
            is_prime: Some(true),
            pattern_number: Some(DecimalString::parse("12345678910987654321").unwrap()),
        })
    }

    #[test]
    fn lists_all_operations_in_order() {
        let shell = Shell::default();
        let ids: Vec<u8> = shell.descriptors().iter().map(|d| d.id.number()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(shell.active(), OperationId::PatternPrime);
    }

    #[test]
    fn switching_away_and_back_discards_state() {
        let mut shell = Shell::default();
        let pending = shell.controller_mut().begin_submit().unwrap();
        assert!(shell.settle(pending.ticket, pattern_result()));
        assert!(shell.controller().last_result().is_some());

        assert!(shell.select_operation(OperationId::GoldbachPair));
        assert!(shell.select_operation(OperationId::PatternPrime));
        assert!(shell.controller().last_result().is_none());
        assert_eq!(shell.controller().field("n"), Some("10"));
    }

    #[test]
    fn reselecting_the_active_operation_keeps_state() {
        let mut shell = Shell::default();
        shell.controller_mut().set_field("n", "1000");
        assert!(!shell.select_operation(OperationId::PatternPrime));
        assert_eq!(shell.controller().field("n"), Some("1000"));
    }

    #[test]
    fn late_results_for_a_closed_operation_are_dropped() {
        let mut shell = Shell::default();
        let pending = shell.controller_mut().begin_submit().unwrap();
        shell.select_operation(OperationId::RepunitPrimes);
        shell.select_operation(OperationId::PatternPrime);

        // Same operation and generation, different controller instance.
        let fresh = shell.controller_mut().begin_submit().unwrap();
        assert_eq!(fresh.ticket.generation, pending.ticket.generation);
        assert!(!shell.settle(pending.ticket, pattern_result()));
        assert!(shell.controller().is_loading());
        assert!(shell.settle(fresh.ticket, pattern_result()));
    }
}
