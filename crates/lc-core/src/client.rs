//! Typed client for the loan backend.
//!
//! Every authorised call reads the token from the injected [`Session`] first.
//! Without one the call fails with [`ApiError::NotAuthenticated`] and the
//! transport is never touched.

use futures::future::try_join;
use serde::de::DeserializeOwned;
use serde::Serialize;

use lc_api_types::{
    Agent, AgentId, AssignRequest, AssignResponse, CollectPaymentRequest, CollectResponse,
    Customer, CustomerForm, CustomerId, ErrorBody, Loan, LoanApplicationRequest, LoanDetails,
    LoanId, LoanSchedule, LoanType, LoginRequest, LoginResponse, ScheduleId, UploadResponse,
};

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::session::Session;
use crate::transport::{ApiRequest, FilePart, Method, MultipartForm, Transport};

/// Backend paths, relative to the configured base URL.
pub mod endpoints {
    pub const LOGIN: &str = "/api/auth/login/";
    pub const LOANS: &str = "/api/auth/loans/";
    pub const LOAN_SCHEDULES: &str = "/api/auth/loan-schedules/";
    pub const AGENTS: &str = "/api/auth/agents/";
    pub const CUSTOMERS: &str = "/api/auth/customers/";
    pub const LOAN_TYPES: &str = "/api/auth/loan-types/";
    pub const UPLOAD_DOCUMENTS: &str = "/api/customers/upload-documents/";

    pub fn loan_details(id: super::LoanId) -> String {
        format!("{LOANS}{id}/details/")
    }

    pub fn customer(id: super::CustomerId) -> String {
        format!("{CUSTOMERS}{id}/")
    }

    pub fn assign_schedule(id: super::ScheduleId) -> String {
        format!("{LOAN_SCHEDULES}{id}/assign/")
    }

    pub fn collect_payment(id: super::ScheduleId) -> String {
        format!("{LOAN_SCHEDULES}{id}/collect/")
    }
}

/// Multipart field names of the document upload.
pub const DOCUMENTS_FIELD: &str = "documents";
pub const CUSTOMER_ID_FIELD: &str = "customer_id";

pub struct ApiClient<T, S> {
    transport: T,
    session: S,
    base_url: String,
}

impl<T: Transport, S: Session> ApiClient<T, S> {
    pub fn new(transport: T, session: S, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            transport,
            session,
            base_url,
        }
    }

    pub fn from_config(transport: T, session: S, config: &ApiConfig) -> Self {
        Self::new(transport, session, config.base_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Build a request carrying `Authorization: Token <token>`.
    pub fn authorized(&self, method: Method, path: &str) -> Result<ApiRequest, ApiError> {
        let Some(token) = self.session.token() else {
            tracing::warn!(%method, path, "no session token; request not sent");
            return Err(ApiError::NotAuthenticated);
        };
        Ok(ApiRequest::new(method, self.url(path)).header("Authorization", format!("Token {token}")))
    }

    /// Send a prepared request and decode a 2xx body into `R`.
    pub async fn execute<R: DeserializeOwned>(&self, request: ApiRequest) -> Result<R, ApiError> {
        let method = request.method;
        let url = request.url.clone();
        tracing::debug!(%method, %url, "sending request");

        let response = self.transport.send(request).await.map_err(|e| {
            tracing::warn!(%method, %url, error = %e, "request failed");
            ApiError::Transport(e.0)
        })?;

        if !response.is_success() {
            let reason = serde_json::from_str::<ErrorBody>(&response.body)
                .ok()
                .and_then(|b| b.reason());
            tracing::warn!(%method, %url, status = response.status, reason = ?reason, "backend rejected request");
            return Err(ApiError::Status {
                status: response.status,
                reason,
            });
        }

        // An empty 2xx body decodes as an empty object.
        let body = if response.body.trim().is_empty() {
            "{}"
        } else {
            response.body.as_str()
        };
        serde_json::from_str(body).map_err(|e| {
            tracing::warn!(%method, %url, error = %e, "response did not decode");
            ApiError::Decode(e.to_string())
        })
    }

    pub async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        let request = self.authorized(Method::Get, path)?;
        self.execute(request).await
    }

    pub async fn post_json<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, ApiError> {
        self.send_json(Method::Post, path, body).await
    }

    pub async fn put_json<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, ApiError> {
        self.send_json(Method::Put, path, body).await
    }

    async fn send_json<B: Serialize, R: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<R, ApiError> {
        let value = serde_json::to_value(body).map_err(|e| ApiError::Decode(e.to_string()))?;
        let request = self
            .authorized(method, path)?
            .header("Content-Type", "application/json")
            .json(value);
        self.execute(request).await
    }

    // ── Reads ──

    pub async fn list_loans(&self) -> Result<Vec<Loan>, ApiError> {
        self.get(endpoints::LOANS).await
    }

    pub async fn loan_details(&self, id: LoanId) -> Result<LoanDetails, ApiError> {
        self.get(&endpoints::loan_details(id)).await
    }

    pub async fn list_schedules(&self) -> Result<Vec<LoanSchedule>, ApiError> {
        self.get(endpoints::LOAN_SCHEDULES).await
    }

    pub async fn list_agents(&self) -> Result<Vec<Agent>, ApiError> {
        self.get(endpoints::AGENTS).await
    }

    pub async fn list_customers(&self) -> Result<Vec<Customer>, ApiError> {
        self.get(endpoints::CUSTOMERS).await
    }

    /// Schedules and agents, requested concurrently. Fails if either fails.
    pub async fn schedule_board(&self) -> Result<(Vec<LoanSchedule>, Vec<Agent>), ApiError> {
        try_join(self.list_schedules(), self.list_agents()).await
    }

    pub async fn list_loan_types(&self) -> Result<Vec<LoanType>, ApiError> {
        self.get(endpoints::LOAN_TYPES).await
    }

    /// Customers and loan types for the application form. Fails if either fails.
    pub async fn loan_form_options(&self) -> Result<(Vec<Customer>, Vec<LoanType>), ApiError> {
        try_join(self.list_customers(), self.list_loan_types()).await
    }

    // ── Writes ──

    pub async fn create_customer(&self, form: &CustomerForm) -> Result<Customer, ApiError> {
        self.post_json(endpoints::CUSTOMERS, form).await
    }

    pub async fn update_customer(
        &self,
        id: CustomerId,
        form: &CustomerForm,
    ) -> Result<Customer, ApiError> {
        self.put_json(&endpoints::customer(id), form).await
    }

    pub async fn create_loan(&self, application: &LoanApplicationRequest) -> Result<Loan, ApiError> {
        self.post_json(endpoints::LOANS, application).await
    }

    pub async fn assign_schedule(
        &self,
        schedule: ScheduleId,
        agent: AgentId,
    ) -> Result<AssignResponse, ApiError> {
        self.post_json(
            &endpoints::assign_schedule(schedule),
            &AssignRequest { assigned_to: agent },
        )
        .await
    }

    pub async fn collect_payment(
        &self,
        schedule: ScheduleId,
        payment: &CollectPaymentRequest,
    ) -> Result<CollectResponse, ApiError> {
        self.post_json(&endpoints::collect_payment(schedule), payment)
            .await
    }

    pub async fn upload_documents(
        &self,
        customer: CustomerId,
        files: Vec<FilePart>,
    ) -> Result<UploadResponse, ApiError> {
        let form = files
            .into_iter()
            .fold(MultipartForm::default(), |form, part| form.file(DOCUMENTS_FIELD, part))
            .text(CUSTOMER_ID_FIELD, customer.to_string());
        let request = self
            .authorized(Method::Post, endpoints::UPLOAD_DOCUMENTS)?
            .multipart(form);
        self.execute(request).await
    }

    /// Exchange credentials for a token. Needs no session.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let body = serde_json::to_value(LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        })
        .map_err(|e| ApiError::Decode(e.to_string()))?;
        let request = ApiRequest::new(Method::Post, self.url(endpoints::LOGIN))
            .header("Content-Type", "application/json")
            .json(body);
        self.execute(request).await
    }
}
