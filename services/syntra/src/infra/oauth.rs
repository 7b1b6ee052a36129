//! OAuth identity-provider collaborator (Google authorization-code exchange).

use anyhow::Context as _;
use serde::Deserialize;

use crate::domain::repository::OAuthPort;
use crate::domain::types::FederatedIdentity;
use crate::error::SyntraServiceError;

const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const USERINFO_URL: &str = "https://openidconnect.googleapis.com/v1/userinfo";

#[derive(Clone)]
pub struct GoogleOAuth {
    pub client: reqwest::Client,
    pub client_id: String,
    pub client_secret: String,
    pub redirect_url: String,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Deserialize)]
struct UserInfoResponse {
    email: String,
    name: Option<String>,
    picture: Option<String>,
}

impl OAuthPort for GoogleOAuth {
    async fn exchange_code(
        &self,
        code: &str,
    ) -> Result<FederatedIdentity, SyntraServiceError> {
        let params = [
            ("code", code),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("redirect_uri", self.redirect_url.as_str()),
            ("grant_type", "authorization_code"),
        ];
        let response = self
            .client
            .post(TOKEN_URL)
            .form(&params)
            .send()
            .await
            .context("exchange oauth code")?;

        // A rejected code is a caller problem (expired, reused, forged), not
        // an upstream outage.
        if !response.status().is_success() {
            return Err(SyntraServiceError::Unauthorized);
        }
        let token: TokenResponse = response
            .json()
            .await
            .context("parse oauth token response")?;

        let userinfo: UserInfoResponse = self
            .client
            .get(USERINFO_URL)
            .bearer_auth(&token.access_token)
            .send()
            .await
            .context("fetch oauth userinfo")?
            .error_for_status()
            .context("oauth userinfo status")?
            .json()
            .await
            .context("parse oauth userinfo")?;

        Ok(FederatedIdentity {
            email: userinfo.email,
            name: userinfo.name,
            image: userinfo.picture,
        })
    }
}
