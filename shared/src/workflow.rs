//! Order status workflow
//!
//! The directed graph of legal status transitions and the role permitted to
//! invoke each edge:
//!
//! | From → To | Allowed actor |
//! |-----------|---------------|
//! | PENDING → PREPARING | seller |
//! | PENDING → CANCELLED | seller |
//! | PREPARING → READY | seller |
//! | READY → COMPLETED | customer or seller |
//! | any non-terminal → CANCELLED | seller |
//!
//! `COMPLETED` and `CANCELLED` are terminal. The party performing each
//! physical action differs (kitchen prep vs. pickup acknowledgment), so the
//! edges are actor-qualified: a customer cannot fabricate `COMPLETED` before
//! pickup, and a seller cannot reopen a cancelled or completed order.

use crate::models::{OrderStatus, Role};
use thiserror::Error;

/// Rejected status transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("order status cannot move from {from} to {to} as {actor}")]
pub struct TransitionError {
    pub from: OrderStatus,
    pub to: OrderStatus,
    pub actor: Role,
}

/// Check whether `actor` may move an order from `from` to `to`.
///
/// Rejection carries no side effects; callers must not mutate any stored
/// order on `Err`.
pub fn check_transition(
    from: OrderStatus,
    to: OrderStatus,
    actor: Role,
) -> Result<(), TransitionError> {
    use OrderStatus::*;

    let allowed = match (from, to) {
        (Pending, Preparing) => actor == Role::Seller,
        (Preparing, Ready) => actor == Role::Seller,
        // Pickup acknowledgment: either side may close out a ready order.
        (Ready, Completed) => true,
        (Pending | Preparing | Ready, Cancelled) => actor == Role::Seller,
        _ => false,
    };

    if allowed {
        Ok(())
    } else {
        Err(TransitionError { from, to, actor })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use OrderStatus::*;

    const ALL: [OrderStatus; 5] = [Pending, Preparing, Ready, Completed, Cancelled];

    fn legal_for(actor: Role) -> Vec<(OrderStatus, OrderStatus)> {
        match actor {
            Role::Seller => vec![
                (Pending, Preparing),
                (Pending, Cancelled),
                (Preparing, Ready),
                (Preparing, Cancelled),
                (Ready, Completed),
                (Ready, Cancelled),
            ],
            Role::Customer => vec![(Ready, Completed)],
        }
    }

    #[test]
    fn full_table_sweep() {
        for actor in [Role::Seller, Role::Customer] {
            let legal = legal_for(actor);
            for from in ALL {
                for to in ALL {
                    let result = check_transition(from, to, actor);
                    if legal.contains(&(from, to)) {
                        assert!(result.is_ok(), "{from} -> {to} as {actor} should be legal");
                    } else {
                        let err = result.unwrap_err();
                        assert_eq!((err.from, err.to, err.actor), (from, to, actor));
                    }
                }
            }
        }
    }

    #[test]
    fn terminal_states_have_no_outbound_edges() {
        for from in [Completed, Cancelled] {
            for to in ALL {
                for actor in [Role::Seller, Role::Customer] {
                    assert!(check_transition(from, to, actor).is_err());
                }
            }
        }
    }

    #[test]
    fn customer_cannot_skip_ahead() {
        assert!(check_transition(Pending, Completed, Role::Customer).is_err());
        assert!(check_transition(Preparing, Completed, Role::Customer).is_err());
        assert!(check_transition(Pending, Preparing, Role::Customer).is_err());
        assert!(check_transition(Preparing, Cancelled, Role::Customer).is_err());
    }

    #[test]
    fn self_transitions_are_rejected() {
        for status in ALL {
            assert!(check_transition(status, status, Role::Seller).is_err());
        }
    }
}
