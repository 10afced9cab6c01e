use super::schemas::{DonationAction, DonationStatus};

#[test]
fn pending_can_be_accepted_or_cancelled() {
    assert!(DonationStatus::Pending.can_transition_to(DonationStatus::Accepted));
    assert!(DonationStatus::Pending.can_transition_to(DonationStatus::Cancelled));
    assert!(!DonationStatus::Pending.can_transition_to(DonationStatus::Completed));
}

#[test]
fn accepted_can_only_be_completed() {
    assert!(DonationStatus::Accepted.can_transition_to(DonationStatus::Completed));
    assert!(!DonationStatus::Accepted.can_transition_to(DonationStatus::Pending));
    assert!(!DonationStatus::Accepted.can_transition_to(DonationStatus::Cancelled));
}

#[test]
fn terminal_states_absorb_every_action() {
    for terminal in [DonationStatus::Completed, DonationStatus::Cancelled] {
        assert!(terminal.is_terminal());
        for next in [
            DonationStatus::Pending,
            DonationStatus::Accepted,
            DonationStatus::Completed,
            DonationStatus::Cancelled,
        ] {
            assert!(!terminal.can_transition_to(next));
        }
    }
}

#[test]
fn actions_map_to_expected_statuses() {
    assert_eq!(
        DonationAction::Accept.target_status(),
        DonationStatus::Accepted
    );
    assert_eq!(
        DonationAction::Reject.target_status(),
        DonationStatus::Cancelled
    );
    assert_eq!(
        DonationAction::Complete.target_status(),
        DonationStatus::Completed
    );
}

#[test]
fn status_serializes_snake_case() {
    assert_eq!(
        serde_json::to_string(&DonationStatus::Pending).unwrap(),
        "\"pending\""
    );
    assert_eq!(
        serde_json::from_str::<DonationAction>("\"reject\"").unwrap(),
        DonationAction::Reject
    );
}
