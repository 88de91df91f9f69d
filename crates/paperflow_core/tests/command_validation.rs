use paperflow_core::{Action, ClosingReason, Command, Recommendation, ReviewError};

fn assert_invalid_argument(result: Result<Command, ReviewError>) {
    match result {
        Err(ReviewError::InvalidArgument(_)) => {}
        other => panic!("expected InvalidArgument, got {other:?}"),
    }
}

#[test]
fn payload_free_actions_reject_any_payload() {
    for action in [Action::Accept, Action::Modify, Action::Submit, Action::Propose] {
        let command = Command::new(action, None).unwrap();
        assert_eq!(command.action(), action);
        assert_eq!(command.payload(), None);

        assert_invalid_argument(Command::new(action, Some("Bob")));
    }
}

#[test]
fn assign_requires_non_blank_reviewer() {
    let command = Command::new(Action::Assign, Some("reviewer7")).unwrap();
    assert_eq!(command.payload(), Some("reviewer7"));

    assert_invalid_argument(Command::new(Action::Assign, None));
    assert_invalid_argument(Command::new(Action::Assign, Some("")));
    assert_invalid_argument(Command::new(Action::Assign, Some("   ")));
}

#[test]
fn assign_rejects_reviewer_ids_that_break_records() {
    assert_invalid_argument(Command::new(Action::Assign, Some("Smith, J")));
    assert_invalid_argument(Command::new(Action::Assign, Some("rev\n7")));
    assert_invalid_argument(Command::new(Action::Assign, Some("rev\r7")));
}

#[test]
fn assign_trims_reviewer_id() {
    let command = Command::new(Action::Assign, Some("  Bob ")).unwrap();
    assert_eq!(command.payload(), Some("Bob"));
}

#[test]
fn recommend_accepts_only_recommendation_codes() {
    for code in Recommendation::ALL {
        let command = Command::new(Action::Recommend, Some(code.as_str())).unwrap();
        assert_eq!(command.recommendation(), Some(code));
    }

    assert_invalid_argument(Command::new(Action::Recommend, None));
    assert_invalid_argument(Command::new(Action::Recommend, Some("Accepted")));
    assert_invalid_argument(Command::new(Action::Recommend, Some("strongacceptrecommendation")));
}

#[test]
fn close_accepts_withdrawn_rejected_duplicate_only() {
    for reason in [
        ClosingReason::Withdrawn,
        ClosingReason::Rejected,
        ClosingReason::Duplicate,
    ] {
        let command = Command::new(Action::Close, Some(reason.as_str())).unwrap();
        assert_eq!(command.closing_reason(), Some(reason));
    }

    assert_invalid_argument(Command::new(Action::Close, None));
    assert_invalid_argument(Command::new(Action::Close, Some("Accepted")));
    assert_invalid_argument(Command::new(Action::Close, Some("Gone")));
}

#[test]
fn process_requires_accepted() {
    let command = Command::new(Action::Process, Some("Accepted")).unwrap();
    assert_eq!(command.closing_reason(), Some(ClosingReason::Accepted));

    assert_invalid_argument(Command::new(Action::Process, None));
    assert_invalid_argument(Command::new(Action::Process, Some("Withdrawn")));
}

#[test]
fn parse_uses_verbatim_action_tokens() {
    let command = Command::parse("RECOMMEND", Some("WeakRejectRecommendation")).unwrap();
    assert_eq!(command.action(), Action::Recommend);
    assert_eq!(command.recommendation(), Some(Recommendation::WeakReject));

    assert_invalid_argument(Command::parse("", None));
    assert_invalid_argument(Command::parse("   ", None));
    assert_invalid_argument(Command::parse("accept", None));
    assert_invalid_argument(Command::parse("PUBLISH", None));
}

#[test]
fn commands_compare_by_value() {
    let a = Command::new(Action::Assign, Some("Bob")).unwrap();
    let b = Command::parse("ASSIGN", Some("Bob")).unwrap();
    assert_eq!(a, b);
}

#[test]
fn action_wire_names_are_uppercase_tokens() {
    let json = serde_json::to_value(Action::Recommend).unwrap();
    assert_eq!(json, "RECOMMEND");
    let code = serde_json::to_value(Recommendation::StrongReject).unwrap();
    assert_eq!(code, "StrongRejectRecommendation");
}
