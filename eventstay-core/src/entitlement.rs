use std::sync::Arc;

use eventstay_shared::{Enrollment, TicketStatus, TicketWithType};
use tracing::debug;

use crate::repository::{EnrollmentRepository, TicketRepository};
use crate::{AccessError, AccessResult, Missing, Unentitled};

/// Ticket context of a user who passed the gate.
#[derive(Debug, Clone, PartialEq)]
pub struct TicketContext {
    pub enrollment: Enrollment,
    pub ticket: TicketWithType,
}

/// Decides whether a user may read hotel inventory.
///
/// Checks run in a fixed order and the first failure wins:
/// enrollment exists, ticket exists, ticket is not reserved, ticket type is
/// not remote, ticket type includes hotel.
#[derive(Clone)]
pub struct EntitlementGate {
    enrollments: Arc<dyn EnrollmentRepository>,
    tickets: Arc<dyn TicketRepository>,
}

impl EntitlementGate {
    pub fn new(
        enrollments: Arc<dyn EnrollmentRepository>,
        tickets: Arc<dyn TicketRepository>,
    ) -> Self {
        Self { enrollments, tickets }
    }

    pub async fn evaluate(&self, user_id: i32) -> AccessResult<TicketContext> {
        // 1. Enrollment
        let enrollment = self
            .enrollments
            .find_enrollment_by_user(user_id)
            .await?
            .ok_or_else(|| {
                debug!("User {} has no enrollment", user_id);
                AccessError::NotFound(Missing::Enrollment)
            })?;

        // 2. Ticket joined with its type
        let ticket = self
            .tickets
            .find_ticket_with_type_by_enrollment(enrollment.id)
            .await?
            .ok_or_else(|| {
                debug!("Enrollment {} has no ticket", enrollment.id);
                AccessError::NotFound(Missing::Ticket)
            })?;

        // 3. Ticket state
        check_ticket(&ticket).map_err(|reason| {
            debug!("Ticket {} denied hotel access: {}", ticket.ticket.id, reason);
            AccessError::PaymentRequired(reason)
        })?;

        Ok(TicketContext { enrollment, ticket })
    }
}

/// State checks over an already-fetched ticket. Reservation is checked before
/// remoteness, remoteness before hotel inclusion.
pub fn check_ticket(ticket: &TicketWithType) -> Result<(), Unentitled> {
    if ticket.ticket.status == TicketStatus::Reserved {
        return Err(Unentitled::TicketReserved);
    }
    if ticket.ticket_type.is_remote {
        return Err(Unentitled::RemoteTicketType);
    }
    if !ticket.ticket_type.includes_hotel {
        return Err(Unentitled::HotelNotIncluded);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StubStore;

    fn gate(store: &Arc<StubStore>) -> EntitlementGate {
        EntitlementGate::new(store.clone(), store.clone())
    }

    #[tokio::test]
    async fn test_missing_enrollment_is_not_found() {
        let store = Arc::new(StubStore::default());

        let err = gate(&store).evaluate(1).await.unwrap_err();
        assert!(matches!(err, AccessError::NotFound(Missing::Enrollment)));
    }

    #[tokio::test]
    async fn test_missing_ticket_is_not_found() {
        let store = Arc::new(StubStore::default().with_enrollment(1));

        let err = gate(&store).evaluate(1).await.unwrap_err();
        assert!(matches!(err, AccessError::NotFound(Missing::Ticket)));
    }

    #[tokio::test]
    async fn test_ticket_lookup_skipped_without_enrollment() {
        // Ticket exists for an enrollment id that no user maps to.
        let store = Arc::new(StubStore::default().with_ticket(TicketStatus::Paid, false, true));

        let err = gate(&store).evaluate(1).await.unwrap_err();
        assert!(matches!(err, AccessError::NotFound(Missing::Enrollment)));
        assert_eq!(store.ticket_lookups(), 0);
    }

    #[tokio::test]
    async fn test_reserved_wins_over_every_flag_combination() {
        for (is_remote, includes_hotel) in [(false, true), (true, true), (false, false), (true, false)] {
            let store = Arc::new(
                StubStore::default()
                    .with_enrollment(1)
                    .with_ticket(TicketStatus::Reserved, is_remote, includes_hotel),
            );

            let err = gate(&store).evaluate(1).await.unwrap_err();
            assert!(
                matches!(err, AccessError::PaymentRequired(Unentitled::TicketReserved)),
                "remote={} hotel={} gave {:?}",
                is_remote,
                includes_hotel,
                err
            );
        }
    }

    #[tokio::test]
    async fn test_remote_checked_before_hotel_inclusion() {
        let store = Arc::new(
            StubStore::default()
                .with_enrollment(1)
                .with_ticket(TicketStatus::Paid, true, false),
        );

        let err = gate(&store).evaluate(1).await.unwrap_err();
        assert!(matches!(err, AccessError::PaymentRequired(Unentitled::RemoteTicketType)));
    }

    #[tokio::test]
    async fn test_remote_with_hotel_still_denied() {
        let store = Arc::new(
            StubStore::default()
                .with_enrollment(1)
                .with_ticket(TicketStatus::Paid, true, true),
        );

        let err = gate(&store).evaluate(1).await.unwrap_err();
        assert!(matches!(err, AccessError::PaymentRequired(Unentitled::RemoteTicketType)));
    }

    #[tokio::test]
    async fn test_ticket_without_hotel_denied() {
        let store = Arc::new(
            StubStore::default()
                .with_enrollment(1)
                .with_ticket(TicketStatus::Paid, false, false),
        );

        let err = gate(&store).evaluate(1).await.unwrap_err();
        assert!(matches!(err, AccessError::PaymentRequired(Unentitled::HotelNotIncluded)));
    }

    #[tokio::test]
    async fn test_paid_in_person_ticket_with_hotel_passes() {
        let store = Arc::new(
            StubStore::default()
                .with_enrollment(1)
                .with_ticket(TicketStatus::Paid, false, true),
        );

        let ctx = gate(&store).evaluate(1).await.unwrap();
        assert_eq!(ctx.enrollment.user_id, 1);
        assert_eq!(ctx.ticket.ticket.enrollment_id, ctx.enrollment.id);
        assert!(ctx.ticket.ticket_type.includes_hotel);
    }

    #[tokio::test]
    async fn test_store_failure_surfaces_unchanged() {
        let store = Arc::new(StubStore::default().offline());

        let err = gate(&store).evaluate(1).await.unwrap_err();
        assert!(matches!(err, AccessError::Store(_)));
    }
}
