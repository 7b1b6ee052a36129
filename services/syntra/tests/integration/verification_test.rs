use syntra::error::SyntraServiceError;
use syntra::usecase::verification::{
    DecideVerificationUseCase, Decision, SubmitVerificationInput, SubmitVerificationUseCase,
};
use syntra_domain::verification::VerificationStatus;

use crate::helpers::{MockStorage, MockUserRepo, MockVerificationRepo, test_request, test_user};

fn valid_input() -> SubmitVerificationInput {
    SubmitVerificationInput {
        full_name: "Jane Doe".to_owned(),
        institution: "UNILAG".to_owned(),
        matric_or_nysc: "190404010".to_owned(),
        whatsapp: "2348000000000".to_owned(),
        id_image: vec![0xFF, 0xD8, 0xFF, 0xE0],
    }
}

// ── Submit ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_create_pending_request_and_flip_user_status_on_submit() {
    let user = test_user();
    let user_repo = MockUserRepo::new(vec![user.clone()]);
    let requests = MockVerificationRepo::new(vec![], user_repo.users_handle());
    let requests_handle = requests.requests_handle();

    let usecase = SubmitVerificationUseCase {
        requests,
        storage: MockStorage::new(),
    };
    usecase.execute(user.id, valid_input()).await.unwrap();

    let stored = requests_handle.lock().unwrap();
    assert_eq!(stored.len(), 1);
    let request = &stored[0];
    assert_eq!(request.user_id, user.id);
    assert_eq!(request.full_name, "Jane Doe");
    assert_eq!(request.institution, "UNILAG");
    assert_eq!(request.matric_or_nysc, "190404010");
    assert_eq!(request.whatsapp, "2348000000000");
    assert_eq!(request.status, VerificationStatus::Pending);
    assert!(request.id_image_url.starts_with("https://"));

    let users = user_repo.users_handle();
    let users = users.lock().unwrap();
    assert_eq!(
        users[0].verification_status,
        VerificationStatus::Pending,
        "user status should flip to PENDING together with the request insert"
    );
}

#[tokio::test]
async fn should_reject_second_submit_while_pending() {
    let user = test_user();
    let user_repo = MockUserRepo::new(vec![user.clone()]);
    let requests = MockVerificationRepo::new(vec![], user_repo.users_handle());

    let usecase = SubmitVerificationUseCase {
        requests,
        storage: MockStorage::new(),
    };
    usecase.execute(user.id, valid_input()).await.unwrap();

    let result = usecase.execute(user.id, valid_input()).await;
    assert!(
        matches!(result, Err(SyntraServiceError::DuplicateRequest)),
        "expected DuplicateRequest, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_submit_when_already_approved() {
    let mut user = test_user();
    user.verification_status = VerificationStatus::Approved;
    let user_repo = MockUserRepo::new(vec![user.clone()]);
    let requests = MockVerificationRepo::new(
        vec![test_request(user.id, VerificationStatus::Approved)],
        user_repo.users_handle(),
    );

    let usecase = SubmitVerificationUseCase {
        requests,
        storage: MockStorage::new(),
    };
    let result = usecase.execute(user.id, valid_input()).await;
    assert!(
        matches!(result, Err(SyntraServiceError::DuplicateRequest)),
        "expected DuplicateRequest, got {result:?}"
    );
}

#[tokio::test]
async fn should_allow_resubmission_after_rejection() {
    let mut user = test_user();
    user.verification_status = VerificationStatus::Rejected;
    let old_request = test_request(user.id, VerificationStatus::Rejected);
    let old_id = old_request.id;

    let user_repo = MockUserRepo::new(vec![user.clone()]);
    let requests = MockVerificationRepo::new(vec![old_request], user_repo.users_handle());
    let requests_handle = requests.requests_handle();

    let usecase = SubmitVerificationUseCase {
        requests,
        storage: MockStorage::new(),
    };
    usecase.execute(user.id, valid_input()).await.unwrap();

    let stored = requests_handle.lock().unwrap();
    assert_eq!(stored.len(), 2, "resubmission creates a new row");
    let old = stored.iter().find(|r| r.id == old_id).unwrap();
    assert_eq!(
        old.status,
        VerificationStatus::Rejected,
        "the rejected row is never mutated"
    );

    let users = user_repo.users_handle();
    assert_eq!(
        users.lock().unwrap()[0].verification_status,
        VerificationStatus::Pending
    );
}

#[tokio::test]
async fn should_fail_submit_with_blank_claim_field() {
    let user = test_user();
    let user_repo = MockUserRepo::new(vec![user.clone()]);
    let requests = MockVerificationRepo::new(vec![], user_repo.users_handle());
    let requests_handle = requests.requests_handle();
    let storage = MockStorage::new();

    let usecase = SubmitVerificationUseCase {
        requests,
        storage: storage.clone(),
    };
    let mut input = valid_input();
    input.institution = "   ".to_owned();

    let result = usecase.execute(user.id, input).await;
    assert!(
        matches!(result, Err(SyntraServiceError::InvalidSubmission)),
        "expected InvalidSubmission, got {result:?}"
    );
    assert_eq!(storage.upload_count(), 0, "invalid input never reaches storage");
    assert!(requests_handle.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_fail_submit_with_empty_evidence_image() {
    let user = test_user();
    let user_repo = MockUserRepo::new(vec![user.clone()]);
    let requests = MockVerificationRepo::new(vec![], user_repo.users_handle());

    let usecase = SubmitVerificationUseCase {
        requests,
        storage: MockStorage::new(),
    };
    let mut input = valid_input();
    input.id_image = Vec::new();

    let result = usecase.execute(user.id, input).await;
    assert!(
        matches!(result, Err(SyntraServiceError::InvalidSubmission)),
        "expected InvalidSubmission, got {result:?}"
    );
}

#[tokio::test]
async fn should_abort_submit_when_storage_fails() {
    let user = test_user();
    let user_repo = MockUserRepo::new(vec![user.clone()]);
    let requests = MockVerificationRepo::new(vec![], user_repo.users_handle());
    let requests_handle = requests.requests_handle();

    let usecase = SubmitVerificationUseCase {
        requests,
        storage: MockStorage::failing(),
    };
    let result = usecase.execute(user.id, valid_input()).await;
    assert!(
        matches!(result, Err(SyntraServiceError::StorageFailure)),
        "expected StorageFailure, got {result:?}"
    );

    // No partial record: neither a request row nor a user-status flip.
    assert!(requests_handle.lock().unwrap().is_empty());
    let users = user_repo.users_handle();
    assert_eq!(
        users.lock().unwrap()[0].verification_status,
        VerificationStatus::Unverified
    );
}

#[tokio::test]
async fn should_leave_no_partial_state_when_transaction_fails() {
    let user = test_user();
    let user_repo = MockUserRepo::new(vec![user.clone()]);
    let requests = MockVerificationRepo::new(vec![], user_repo.users_handle());
    let requests_handle = requests.requests_handle();
    requests.fail_next_transaction();

    let usecase = SubmitVerificationUseCase {
        requests,
        storage: MockStorage::new(),
    };
    let result = usecase.execute(user.id, valid_input()).await;
    assert!(
        matches!(result, Err(SyntraServiceError::Internal(_))),
        "expected Internal, got {result:?}"
    );

    assert!(requests_handle.lock().unwrap().is_empty());
    let users = user_repo.users_handle();
    assert_eq!(
        users.lock().unwrap()[0].verification_status,
        VerificationStatus::Unverified,
        "rolled-back submit must leave neither change persisted"
    );
}

// ── Decide ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_approve_request_and_user_atomically() {
    let mut user = test_user();
    user.verification_status = VerificationStatus::Pending;
    let request = test_request(user.id, VerificationStatus::Pending);
    let request_id = request.id;

    let user_repo = MockUserRepo::new(vec![user.clone()]);
    let requests = MockVerificationRepo::new(vec![request], user_repo.users_handle());

    let usecase = DecideVerificationUseCase { requests };
    let out = usecase
        .execute(request_id, Decision::Approve, None)
        .await
        .unwrap();

    assert_eq!(out.request.status, VerificationStatus::Approved);
    assert_eq!(out.user.verification_status, VerificationStatus::Approved);

    let users = user_repo.users_handle();
    assert_eq!(
        users.lock().unwrap()[0].verification_status,
        VerificationStatus::Approved
    );
}

#[tokio::test]
async fn should_reject_request_with_note() {
    let mut user = test_user();
    user.verification_status = VerificationStatus::Pending;
    let request = test_request(user.id, VerificationStatus::Pending);
    let request_id = request.id;

    let user_repo = MockUserRepo::new(vec![user.clone()]);
    let requests = MockVerificationRepo::new(vec![request], user_repo.users_handle());
    let requests_handle = requests.requests_handle();

    let usecase = DecideVerificationUseCase { requests };
    let out = usecase
        .execute(
            request_id,
            Decision::Reject,
            Some("ID image unreadable".to_owned()),
        )
        .await
        .unwrap();

    assert_eq!(out.request.status, VerificationStatus::Rejected);
    assert_eq!(out.user.verification_status, VerificationStatus::Rejected);

    let stored = requests_handle.lock().unwrap();
    assert_eq!(
        stored[0].rejection_note.as_deref(),
        Some("ID image unreadable")
    );
}

#[tokio::test]
async fn should_require_note_on_reject() {
    let mut user = test_user();
    user.verification_status = VerificationStatus::Pending;
    let request = test_request(user.id, VerificationStatus::Pending);
    let request_id = request.id;

    let user_repo = MockUserRepo::new(vec![user.clone()]);
    let requests = MockVerificationRepo::new(vec![request], user_repo.users_handle());
    let requests_handle = requests.requests_handle();

    let usecase = DecideVerificationUseCase { requests };

    for note in [None, Some("   ".to_owned())] {
        let result = usecase.execute(request_id, Decision::Reject, note).await;
        assert!(
            matches!(result, Err(SyntraServiceError::MissingRejectionReason)),
            "expected MissingRejectionReason, got {result:?}"
        );
    }

    // Nothing transitioned.
    assert_eq!(
        requests_handle.lock().unwrap()[0].status,
        VerificationStatus::Pending
    );
}

#[tokio::test]
async fn should_not_redecide_terminal_request() {
    let mut user = test_user();
    user.verification_status = VerificationStatus::Pending;
    let request = test_request(user.id, VerificationStatus::Pending);
    let request_id = request.id;

    let user_repo = MockUserRepo::new(vec![user.clone()]);
    let requests = MockVerificationRepo::new(vec![request], user_repo.users_handle());

    let usecase = DecideVerificationUseCase { requests };
    usecase
        .execute(request_id, Decision::Approve, None)
        .await
        .unwrap();

    let result = usecase
        .execute(request_id, Decision::Reject, Some("changed my mind".to_owned()))
        .await;
    assert!(
        matches!(result, Err(SyntraServiceError::RequestAlreadyDecided)),
        "expected RequestAlreadyDecided, got {result:?}"
    );
}

#[tokio::test]
async fn should_return_not_found_for_unknown_request() {
    let user_repo = MockUserRepo::empty();
    let requests = MockVerificationRepo::new(vec![], user_repo.users_handle());

    let usecase = DecideVerificationUseCase { requests };
    let result = usecase
        .execute(uuid::Uuid::new_v4(), Decision::Approve, None)
        .await;
    assert!(
        matches!(result, Err(SyntraServiceError::RequestNotFound)),
        "expected RequestNotFound, got {result:?}"
    );
}

// ── Full scenario ────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_block_resubmit_after_approval() {
    let user = test_user();
    let user_repo = MockUserRepo::new(vec![user.clone()]);
    let requests = MockVerificationRepo::new(vec![], user_repo.users_handle());
    let requests_handle = requests.requests_handle();

    let submit = SubmitVerificationUseCase {
        requests: requests.clone(),
        storage: MockStorage::new(),
    };
    submit.execute(user.id, valid_input()).await.unwrap();

    let request_id = requests_handle.lock().unwrap()[0].id;
    let decide = DecideVerificationUseCase { requests };
    decide
        .execute(request_id, Decision::Approve, None)
        .await
        .unwrap();

    let users = user_repo.users_handle();
    assert_eq!(
        users.lock().unwrap()[0].verification_status,
        VerificationStatus::Approved
    );

    let result = submit.execute(user.id, valid_input()).await;
    assert!(
        matches!(result, Err(SyntraServiceError::DuplicateRequest)),
        "an approved user cannot resubmit, got {result:?}"
    );
}
