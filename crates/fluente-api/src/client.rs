// Backend HTTP client
//
// Wraps `reqwest::Client` with base-URL construction, bearer-token
// injection from the [`Session`], and error-body decoding. Endpoint
// modules (users, classes, payments, ...) are implemented as inherent
// methods in separate files to keep this module focused on transport
// mechanics.

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::{ApiErrorBody, Error};
use crate::session::{AuthenticatedUser, Session};
use crate::transport::TransportConfig;

/// Login response: `{ message, user, accessToken }`.
#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub message: String,
    pub user: AuthenticatedUser,
    pub access_token: String,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct RefreshResponse {
    access_token: String,
}

/// Generic `{ "message": ... }` acknowledgement returned by delete endpoints.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// HTTP client for the Fluente backend.
///
/// All methods return decoded payloads; error bodies are turned into
/// [`Error::Api`] before the caller sees them.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    session: Session,
}

impl ApiClient {
    /// Create a client from a base URL and transport settings, with a
    /// fresh unauthenticated session.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        Ok(Self {
            http: transport.build_client()?,
            base_url,
            session: Session::new(),
        })
    }

    /// Create a client bound to an existing session (e.g. a token restored
    /// from the keyring).
    pub fn with_session(
        base_url: Url,
        transport: &TransportConfig,
        session: Session,
    ) -> Result<Self, Error> {
        Ok(Self {
            http: transport.build_client()?,
            base_url,
            session,
        })
    }

    /// The session backing this client.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The backend base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── Authentication ──────────────────────────────────────────────

    /// Log in with email + password. On success the session stores the
    /// access token and user, and subsequent requests carry the bearer
    /// header.
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<LoginResponse, Error> {
        #[derive(Serialize)]
        struct LoginBody<'a> {
            email: &'a str,
            password: &'a str,
        }

        let response: LoginResponse = self
            .post(
                "auth/login",
                &LoginBody {
                    email,
                    password: password.expose_secret(),
                },
            )
            .await
            .map_err(|err| match err {
                Error::Api { status, message } if status == 400 || status == 401 => {
                    Error::Authentication { message }
                }
                other => other,
            })?;

        self.session
            .set_token(SecretString::from(response.access_token.clone()));
        self.session.set_user(response.user.clone());
        debug!(user = %response.user.email, "logged in");
        Ok(response)
    }

    /// Exchange the refresh cookie for a new access token. Clears the
    /// session if the backend refuses.
    pub async fn refresh(&self) -> Result<(), Error> {
        match self.post::<RefreshResponse, _>("auth/refresh", &()).await {
            Ok(response) => {
                self.session
                    .set_token(SecretString::from(response.access_token));
                Ok(())
            }
            Err(err) => {
                self.session.clear();
                Err(err)
            }
        }
    }

    /// Log out. The session is cleared regardless of whether the backend
    /// call succeeds.
    pub async fn logout(&self) -> Result<(), Error> {
        let result = self.post::<serde_json::Value, _>("auth/logout", &()).await;
        self.session.clear();
        result.map(|_| ())
    }

    /// Fetch the current account (`auth/me`).
    pub async fn me(&self) -> Result<AuthenticatedUser, Error> {
        self.get("auth/me", &[]).await
    }

    // ── URL builder ─────────────────────────────────────────────────

    /// Build a full URL for an API path: `{base}/api/{path}`.
    pub(crate) fn api_url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}/api/{path}"))?)
    }

    // ── Request helpers ─────────────────────────────────────────────

    /// Send a GET request with optional query parameters.
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, Error> {
        let mut url = self.api_url(path)?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        debug!("GET {}", url);
        let builder = self.apply_auth(self.http.get(url));
        self.send(builder).await
    }

    /// Send a POST request with a JSON body.
    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.api_url(path)?;
        debug!("POST {}", url);
        let builder = self.apply_auth(self.http.post(url).json(body));
        self.send(builder).await
    }

    /// Send a PUT request with a JSON body.
    pub(crate) async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.api_url(path)?;
        debug!("PUT {}", url);
        let builder = self.apply_auth(self.http.put(url).json(body));
        self.send(builder).await
    }

    /// Send a PATCH request with a JSON body.
    pub(crate) async fn patch<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.api_url(path)?;
        debug!("PATCH {}", url);
        let builder = self.apply_auth(self.http.patch(url).json(body));
        self.send(builder).await
    }

    /// Send a DELETE request.
    pub(crate) async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.api_url(path)?;
        debug!("DELETE {}", url);
        let builder = self.apply_auth(self.http.delete(url));
        self.send(builder).await
    }

    /// Attach the bearer token when the session holds one.
    fn apply_auth(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.session.bearer_header() {
            Some(header) => builder.header(reqwest::header::AUTHORIZATION, header),
            None => builder,
        }
    }

    /// Execute the request and decode the response, mapping error bodies
    /// into [`Error::Api`] / [`Error::SessionExpired`].
    async fn send<T: DeserializeOwned>(&self, builder: reqwest::RequestBuilder) -> Result<T, Error> {
        let response = builder.send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(if self.session.is_authenticated() {
                Error::SessionExpired
            } else {
                Error::Authentication {
                    message: "missing or invalid credentials".into(),
                }
            });
        }

        let body = response.text().await?;

        if !status.is_success() {
            let fallback = format!("API request failed (HTTP {status})");
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map_or_else(|_| preview_or(&body, &fallback), |e| e.display_message(&fallback));
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }

        trace!(bytes = body.len(), "response body received");
        serde_json::from_str(&body).map_err(|e| {
            let preview = &body[..body.len().min(200)];
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
            }
        })
    }
}

/// Use a non-empty raw body as the message, truncated; else the fallback.
fn preview_or(body: &str, fallback: &str) -> String {
    if body.trim().is_empty() {
        fallback.to_owned()
    } else {
        body[..body.len().min(200)].to_owned()
    }
}
