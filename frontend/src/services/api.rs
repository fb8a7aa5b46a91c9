use async_trait::async_trait;
use gloo::net::http::{Request, RequestBuilder};
use serde::de::DeserializeOwned;
use shared::{
    ApiError, AuthEvent, AuthEvents, Category, ClientConfig, LoginRequest, LoginResponse,
    PaginatedResponse, SuccessResponse, Transaction, TransactionApi, TransactionCreate,
    TransactionQuery, TransactionUpdate, TwoFactorVerify,
};

use crate::services::session::Session;

/// API client for communicating with the MeuFuturo backend
#[derive(Clone)]
pub struct ApiClient {
    config: ClientConfig,
    session: Session,
    auth_events: AuthEvents,
}

impl ApiClient {
    pub fn new(config: ClientConfig, session: Session, auth_events: AuthEvents) -> Self {
        Self {
            config,
            session,
            auth_events,
        }
    }

    /// Exchange credentials for an access token
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let body = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let request = Request::post(&self.config.endpoint("/auth/login")).json(&body);
        self.send(request, false).await
    }

    /// Finish a login that stopped at the second factor
    pub async fn verify_two_factor(
        &self,
        user_id: &str,
        code: &str,
    ) -> Result<LoginResponse, ApiError> {
        let body = TwoFactorVerify {
            totp_code: code.trim().to_string(),
        };
        let request = Request::post(&self.config.endpoint("/auth/verify-2fa"))
            .query([("user_id", user_id)])
            .json(&body);
        self.send(request, false).await
    }

    /// Categories available for filtering, system ones included
    pub async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        let request = self
            .authorized(Request::get(&self.config.endpoint("/financial/categories")))
            .build();
        self.send(request, true).await
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => builder.header("Authorization", &format!("Bearer {token}")),
            None => builder,
        }
    }

    fn transaction_url(&self, id: &str) -> String {
        self.config.endpoint(&format!("/financial/transactions/{id}"))
    }

    /// Send a request and decode a success body. Failed statuses become
    /// [`ApiError`]s; a 401 on an authenticated call also ends the session.
    async fn send<T: DeserializeOwned>(
        &self,
        request: Result<Request, gloo::net::Error>,
        authenticated: bool,
    ) -> Result<T, ApiError> {
        let request = request.map_err(|e| ApiError::Network(e.to_string()))?;
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.ok() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let err = ApiError::from_status(status, &body);
            log::warn!("request failed with status {status}: {err}");

            if authenticated && err.is_auth_error() {
                self.auth_events.emit(&AuthEvent::SessionExpired {
                    message: err.to_string(),
                });
            }
            return Err(err);
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait(?Send)]
impl TransactionApi for ApiClient {
    async fn list_transactions(
        &self,
        query: &TransactionQuery,
    ) -> Result<PaginatedResponse<Transaction>, ApiError> {
        let pairs = query.to_query_pairs();
        let request = self
            .authorized(Request::get(&self.config.endpoint("/financial/transactions")))
            .query(pairs.iter().map(|(key, value)| (*key, value.as_str())))
            .build();
        self.send(request, true).await
    }

    async fn create_transaction(&self, data: &TransactionCreate) -> Result<Transaction, ApiError> {
        let request = self
            .authorized(Request::post(&self.config.endpoint("/financial/transactions")))
            .json(data);
        self.send(request, true).await
    }

    async fn update_transaction(
        &self,
        id: &str,
        data: &TransactionUpdate,
    ) -> Result<Transaction, ApiError> {
        let request = self.authorized(Request::put(&self.transaction_url(id))).json(data);
        self.send(request, true).await
    }

    async fn delete_transaction(&self, id: &str) -> Result<(), ApiError> {
        let request = self.authorized(Request::delete(&self.transaction_url(id))).build();
        let _: SuccessResponse = self.send(request, true).await?;
        Ok(())
    }
}

impl PartialEq for ApiClient {
    fn eq(&self, other: &Self) -> bool {
        self.config == other.config
            && self.session == other.session
            && self.auth_events == other.auth_events
    }
}
