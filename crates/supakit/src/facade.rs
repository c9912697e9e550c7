use supakit_core::{Record, SupabaseClient, SupabaseResult};

use crate::auth::AuthService;
use crate::envelope::Outcome;
use crate::profile::ProfileService;
use crate::records::RecordService;
use crate::types::{
    AuthSession, FacadeConfig, ProfileUpdate, SignInOutcome, SignUpOutcome, User,
};

/// One object for auth, profile and table operations.
///
/// Every method forwards to the matching collaborator.
///
/// # Example
/// ```ignore
/// use supakit::prelude::*;
///
/// let kit = Supakit::new(FacadeConfig::new("https://your-project.supabase.co", "anon-key"))?;
/// let signed_in = kit.sign_in("ada@example.com", "hunter22").await?;
/// let todos = kit.list("todos", Some(&record![("done", false)])).await?;
/// ```
#[derive(Debug, Clone)]
pub struct Supakit {
    client: SupabaseClient,
    auth: AuthService,
    profile: ProfileService,
    records: RecordService,
}

impl Supakit {
    /// Fails if the URL or key cannot be used to build a connection.
    pub fn new(config: FacadeConfig) -> SupabaseResult<Self> {
        let auth = AuthService::new(&config.supabase)?;
        let client = SupabaseClient::new(config.supabase)?;
        Ok(Self {
            profile: ProfileService::new(&client),
            records: RecordService::new(&client),
            auth,
            client,
        })
    }

    /// The handle shared by the profile and record collaborators.
    pub fn client(&self) -> &SupabaseClient {
        &self.client
    }

    pub fn auth(&self) -> &AuthService {
        &self.auth
    }

    pub fn profile(&self) -> &ProfileService {
        &self.profile
    }

    pub fn records(&self) -> &RecordService {
        &self.records
    }

    // ─── Auth ──────────────────────────────────────────────────

    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        profile: Option<ProfileUpdate>,
    ) -> Outcome<SignUpOutcome> {
        self.auth.sign_up(email, password, profile).await
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Outcome<SignInOutcome> {
        self.auth.sign_in(email, password).await
    }

    pub async fn sign_out(&self) -> Outcome<()> {
        self.auth.sign_out().await
    }

    pub async fn get_current_user(&self) -> Outcome<Option<User>> {
        self.auth.get_current_user().await
    }

    pub async fn get_current_session(&self) -> Outcome<Option<AuthSession>> {
        self.auth.get_current_session().await
    }

    pub async fn resend_verification_email(&self) -> Outcome<()> {
        self.auth.resend_verification_email().await
    }

    // ─── Profile ───────────────────────────────────────────────

    pub async fn update_profile(&self, updates: ProfileUpdate) -> Outcome<User> {
        self.profile.update_profile(updates).await
    }

    // ─── Records ───────────────────────────────────────────────

    pub async fn create(&self, table: &str, data: Record) -> Outcome<Record> {
        self.records.create(table, data).await
    }

    pub async fn read(&self, table: &str, id: &str) -> Outcome<Option<Record>> {
        self.records.read(table, id).await
    }

    pub async fn update(&self, table: &str, id: &str, data: Record) -> Outcome<Record> {
        self.records.update(table, id, data).await
    }

    pub async fn delete(&self, table: &str, id: &str) -> Outcome<()> {
        self.records.delete(table, id).await
    }

    pub async fn list(&self, table: &str, filters: Option<&Record>) -> Outcome<Vec<Record>> {
        self.records.list(table, filters).await
    }
}
