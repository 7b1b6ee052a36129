//! Shared mocks for integration tests. Each mock implements a domain port
//! over `Arc<Mutex<_>>` state so tests can assert on writes through shared
//! handles.

use std::sync::{Arc, Mutex};

use chrono::{Duration, Utc};
use uuid::Uuid;

use syntra::domain::repository::{
    MailerPort, OAuthPort, ObjectStoragePort, OtpRepository, UserRepository,
    VerificationRepository,
};
use syntra::domain::types::{
    FederatedIdentity, OtpCode, PendingReview, User, VerificationRequest,
};
use syntra::error::SyntraServiceError;
use syntra_domain::user::UserRole;
use syntra_domain::verification::VerificationStatus;

pub use syntra_testing::session::TEST_JWT_SECRET;

// ── Fixtures ─────────────────────────────────────────────────────────────────

pub fn test_user() -> User {
    let now = Utc::now();
    User {
        id: Uuid::new_v4(),
        name: Some("Jane Doe".to_owned()),
        email: "jane@example.com".to_owned(),
        hashed_password: None,
        image: None,
        whatsapp: Some("2348000000000".to_owned()),
        role: UserRole::User,
        verification_status: VerificationStatus::Unverified,
        email_verified_at: None,
        created_at: now,
        updated_at: now,
    }
}

pub fn test_request(user_id: Uuid, status: VerificationStatus) -> VerificationRequest {
    VerificationRequest {
        id: Uuid::new_v4(),
        user_id,
        full_name: "Jane Doe".to_owned(),
        institution: "UNILAG".to_owned(),
        matric_or_nysc: "190404010".to_owned(),
        whatsapp: "2348000000000".to_owned(),
        id_image_url: "https://cdn.example.com/syntra-verification-ids/evidence.jpg".to_owned(),
        status,
        rejection_note: None,
        created_at: Utc::now(),
    }
}

pub fn test_otp(user_id: Uuid, email: &str, code: &str) -> OtpCode {
    let now = Utc::now();
    OtpCode {
        id: Uuid::new_v4(),
        user_id,
        email: email.to_owned(),
        code: code.to_owned(),
        expires_at: now + Duration::seconds(600),
        used_at: None,
        created_at: now,
    }
}

// ── MockUserRepo ─────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockUserRepo {
    users: Arc<Mutex<Vec<User>>>,
    otps: Arc<Mutex<Vec<OtpCode>>>,
}

impl MockUserRepo {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: Arc::new(Mutex::new(users)),
            otps: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn users_handle(&self) -> Arc<Mutex<Vec<User>>> {
        self.users.clone()
    }

    pub fn otps_handle(&self) -> Arc<Mutex<Vec<OtpCode>>> {
        self.otps.clone()
    }
}

impl UserRepository for MockUserRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, SyntraServiceError> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, SyntraServiceError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn create(&self, user: &User) -> Result<(), SyntraServiceError> {
        self.users.lock().unwrap().push(user.clone());
        Ok(())
    }

    async fn create_with_otp(
        &self,
        user: &User,
        otp: &OtpCode,
    ) -> Result<(), SyntraServiceError> {
        self.users.lock().unwrap().push(user.clone());
        self.otps.lock().unwrap().push(otp.clone());
        Ok(())
    }

    async fn mark_email_verified(&self, id: Uuid) -> Result<(), SyntraServiceError> {
        let mut users = self.users.lock().unwrap();
        if let Some(user) = users.iter_mut().find(|u| u.id == id) {
            user.email_verified_at = Some(Utc::now());
        }
        Ok(())
    }
}

// ── MockVerificationRepo ─────────────────────────────────────────────────────

/// Shares the user vec with `MockUserRepo` (pass `users_handle()`) so the
/// two-row atomicity contract is observable from both sides.
#[derive(Clone)]
pub struct MockVerificationRepo {
    requests: Arc<Mutex<Vec<VerificationRequest>>>,
    users: Arc<Mutex<Vec<User>>>,
    fail_transaction: Arc<Mutex<bool>>,
}

impl MockVerificationRepo {
    pub fn new(requests: Vec<VerificationRequest>, users: Arc<Mutex<Vec<User>>>) -> Self {
        Self {
            requests: Arc::new(Mutex::new(requests)),
            users,
            fail_transaction: Arc::new(Mutex::new(false)),
        }
    }

    pub fn requests_handle(&self) -> Arc<Mutex<Vec<VerificationRequest>>> {
        self.requests.clone()
    }

    /// Force the next transactional write to fail without mutating anything,
    /// simulating a store-level rollback.
    pub fn fail_next_transaction(&self) {
        *self.fail_transaction.lock().unwrap() = true;
    }

    fn take_failure(&self) -> bool {
        let mut flag = self.fail_transaction.lock().unwrap();
        std::mem::replace(&mut *flag, false)
    }

    fn set_user_status(&self, user_id: Uuid, status: VerificationStatus) {
        let mut users = self.users.lock().unwrap();
        if let Some(user) = users.iter_mut().find(|u| u.id == user_id) {
            user.verification_status = status;
        }
    }
}

impl VerificationRepository for MockVerificationRepo {
    async fn has_open_or_approved(&self, user_id: Uuid) -> Result<bool, SyntraServiceError> {
        Ok(self.requests.lock().unwrap().iter().any(|r| {
            r.user_id == user_id
                && matches!(
                    r.status,
                    VerificationStatus::Pending | VerificationStatus::Approved
                )
        }))
    }

    async fn create_pending(
        &self,
        request: &VerificationRequest,
    ) -> Result<(), SyntraServiceError> {
        if self.take_failure() {
            return Err(SyntraServiceError::Internal(anyhow::anyhow!(
                "transaction aborted"
            )));
        }
        self.requests.lock().unwrap().push(request.clone());
        self.set_user_status(request.user_id, request.status);
        Ok(())
    }

    async fn decide(
        &self,
        request_id: Uuid,
        verdict: VerificationStatus,
        note: Option<String>,
    ) -> Result<(VerificationRequest, User), SyntraServiceError> {
        if self.take_failure() {
            return Err(SyntraServiceError::Internal(anyhow::anyhow!(
                "transaction aborted"
            )));
        }
        let mut requests = self.requests.lock().unwrap();
        let request = requests
            .iter_mut()
            .find(|r| r.id == request_id)
            .ok_or(SyntraServiceError::RequestNotFound)?;
        if request.status != VerificationStatus::Pending {
            return Err(SyntraServiceError::RequestAlreadyDecided);
        }
        request.status = verdict;
        if note.is_some() {
            request.rejection_note = note;
        }
        let request = request.clone();
        drop(requests);

        self.set_user_status(request.user_id, verdict);
        let user = self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == request.user_id)
            .cloned()
            .ok_or(SyntraServiceError::RequestNotFound)?;
        Ok((request, user))
    }

    async fn list_pending(&self) -> Result<Vec<PendingReview>, SyntraServiceError> {
        let users = self.users.lock().unwrap();
        Ok(self
            .requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.status == VerificationStatus::Pending)
            .map(|r| {
                let user = users.iter().find(|u| u.id == r.user_id);
                PendingReview {
                    request: r.clone(),
                    submitter_name: user.and_then(|u| u.name.clone()),
                    submitter_email: user.map(|u| u.email.clone()).unwrap_or_default(),
                }
            })
            .collect())
    }
}

// ── MockOtpRepo ──────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockOtpRepo {
    codes: Arc<Mutex<Vec<OtpCode>>>,
}

impl MockOtpRepo {
    pub fn new(codes: Vec<OtpCode>) -> Self {
        Self {
            codes: Arc::new(Mutex::new(codes)),
        }
    }

    pub fn codes_handle(&self) -> Arc<Mutex<Vec<OtpCode>>> {
        self.codes.clone()
    }
}

impl OtpRepository for MockOtpRepo {
    async fn find_valid(
        &self,
        email: &str,
        code: &str,
    ) -> Result<Option<OtpCode>, SyntraServiceError> {
        Ok(self
            .codes
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.email == email && c.code == code && c.is_valid())
            .cloned())
    }

    async fn mark_used(&self, id: Uuid) -> Result<(), SyntraServiceError> {
        let mut codes = self.codes.lock().unwrap();
        if let Some(code) = codes.iter_mut().find(|c| c.id == id) {
            code.used_at = Some(Utc::now());
        }
        Ok(())
    }
}

// ── MockStorage ──────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockStorage {
    pub fail: bool,
    uploads: Arc<Mutex<u32>>,
}

impl MockStorage {
    pub fn new() -> Self {
        Self {
            fail: false,
            uploads: Arc::new(Mutex::new(0)),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            uploads: Arc::new(Mutex::new(0)),
        }
    }

    pub fn upload_count(&self) -> u32 {
        *self.uploads.lock().unwrap()
    }
}

impl ObjectStoragePort for MockStorage {
    async fn upload_image(
        &self,
        _bytes: &[u8],
        folder: &str,
    ) -> Result<String, SyntraServiceError> {
        if self.fail {
            return Err(SyntraServiceError::StorageFailure);
        }
        *self.uploads.lock().unwrap() += 1;
        Ok(format!("https://cdn.example.com/{folder}/evidence.jpg"))
    }
}

// ── MockMailer ───────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockMailer {
    pub fail: bool,
    sent: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockMailer {
    pub fn new() -> Self {
        Self {
            fail: false,
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn sent_handle(&self) -> Arc<Mutex<Vec<(String, String)>>> {
        self.sent.clone()
    }
}

impl MailerPort for MockMailer {
    async fn send_otp_email(&self, to: &str, code: &str) -> Result<(), SyntraServiceError> {
        if self.fail {
            return Err(SyntraServiceError::Internal(anyhow::anyhow!(
                "smtp unavailable"
            )));
        }
        self.sent
            .lock()
            .unwrap()
            .push((to.to_owned(), code.to_owned()));
        Ok(())
    }
}

// ── MockOAuth ────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockOAuth {
    pub identity: FederatedIdentity,
}

impl OAuthPort for MockOAuth {
    async fn exchange_code(
        &self,
        _code: &str,
    ) -> Result<FederatedIdentity, SyntraServiceError> {
        Ok(self.identity.clone())
    }
}
