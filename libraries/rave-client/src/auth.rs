//! Account endpoints for the Rave API.

use crate::client::{error_message, expect_success, parse, require_token, send_error};
use crate::error::{ClientError, Result};
use crate::types::{AuthResponse, LoginRequest, ProfileUpdate, RegisterRequest, User};
use reqwest::{Client, StatusCode};
use tracing::{debug, info, warn};

/// Account client for the Rave API.
pub struct AuthClient<'a> {
    http: &'a Client,
    base_url: &'a str,
    token: Option<&'a str>,
}

impl<'a> AuthClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str, token: Option<&'a str>) -> Self {
        Self {
            http,
            base_url,
            token,
        }
    }

    /// Create an account.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<AuthResponse> {
        let url = format!("{}/api/users/register", self.base_url);
        debug!(url = %url, email = %email, "Registering account");

        let request = RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };

        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(send_error)?;

        let registered: AuthResponse = parse(response, "register response").await?;
        info!(user_id = %registered.user.id, "Account created");
        Ok(registered)
    }

    /// Login with email and password.
    ///
    /// Returns the token on success.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse> {
        let url = format!("{}/api/users/login", self.base_url);
        debug!(url = %url, email = %email, "Attempting login");

        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(send_error)?;

        if response.status() == StatusCode::UNAUTHORIZED {
            let message = error_message(response).await;
            warn!(error = %message, "Login failed: invalid credentials");
            return Err(ClientError::AuthFailed(message));
        }

        let login: AuthResponse = parse(response, "login response").await?;
        info!(user_id = %login.user.id, name = %login.user.name, "Login successful");
        Ok(login)
    }

    /// Profile of the token's owner.
    pub async fn profile(&self) -> Result<User> {
        let url = format!("{}/api/users/profile", self.base_url);
        debug!(url = %url, "Getting profile");

        let response = self
            .http
            .get(&url)
            .bearer_auth(require_token(self.token)?)
            .send()
            .await
            .map_err(send_error)?;

        parse(response, "profile").await
    }

    /// Update the token owner's profile.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User> {
        let url = format!("{}/api/users/profile", self.base_url);
        debug!(url = %url, "Updating profile");

        let response = self
            .http
            .patch(&url)
            .bearer_auth(require_token(self.token)?)
            .json(update)
            .send()
            .await
            .map_err(send_error)?;

        parse(response, "profile").await
    }

    /// Delete the token owner's account.
    pub async fn delete_profile(&self) -> Result<()> {
        let url = format!("{}/api/users/profile", self.base_url);
        debug!(url = %url, "Deleting account");

        let response = self
            .http
            .delete(&url)
            .bearer_auth(require_token(self.token)?)
            .send()
            .await
            .map_err(send_error)?;

        expect_success(response).await
    }
}
