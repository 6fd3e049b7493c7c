//! HTTP client for the recruiting backend.
//!
//! [`ApiClient`] wraps a `reqwest::Client` configured with the base URL and
//! request timeout, attaches the bearer token from its [`CredentialProvider`],
//! and maps every response into the crate error taxonomy:
//!
//! | Outcome                        | Result                          |
//! |--------------------------------|---------------------------------|
//! | transport failure / timeout    | [`ReclutaError::Network`]       |
//! | 401                            | session cleared if the rejected token is still current, [`ReclutaError::Unauthorized`] |
//! | other non-2xx                  | [`ReclutaError::Api`] with the body `message` |
//! | 2xx with unexpected body shape | [`ReclutaError::Decode`]        |

use super::credentials::{CredentialProvider, Session, SessionEnd};
use super::query::ListQuery;
use crate::domain::error::{ReclutaError, Result};
use crate::domain::{ListEntity, Page, User};
use crate::Config;
use reqwest::header::AUTHORIZATION;
use reqwest::{Method, Request, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

/// Message used when a 401 carries no body.
const SESSION_EXPIRED_MESSAGE: &str = "Sesión expirada. Inicia sesión nuevamente.";

/// Body of a successful login.
#[derive(Debug, Deserialize)]
struct LoginResponse {
    access_token: String,
    user: User,
}

/// Body of an error response.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Client for the recruiting REST API.
///
/// Cheap to clone: clones share the connection pool and the credential
/// provider.
///
/// # Examples
///
/// ```no_run
/// use recluta::api::{ApiClient, ListQuery, SessionStore};
/// use recluta::domain::Candidate;
/// use recluta::Config;
/// use std::sync::Arc;
///
/// # async fn run() -> recluta::Result<()> {
/// let session = Arc::new(SessionStore::new());
/// let client = ApiClient::new(&Config::default(), session)?;
/// client.login("ana@example.com", "secret").await?;
///
/// let query = ListQuery::new(1, 10).with_filter("estado", "activo");
/// let page = client.list::<Candidate>(&query).await?;
/// println!("{} candidates", page.total_count);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    credentials: Arc<dyn CredentialProvider>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Creates a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ReclutaError::InvalidUrl`] if `api_url` is not an http(s) URL,
    /// or [`ReclutaError::Network`] if the TLS backend cannot be initialized.
    pub fn new(config: &Config, credentials: Arc<dyn CredentialProvider>) -> Result<Self> {
        let base_url = config.api_url.trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ReclutaError::InvalidUrl(config.api_url.clone()));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ReclutaError::Network(e.to_string()))?;

        tracing::debug!(base_url = %base_url, timeout_secs = config.timeout_secs, "api client created");

        Ok(Self {
            http,
            base_url,
            credentials,
        })
    }

    /// Returns the base URL all endpoints are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let builder = self.http.request(method, url);
        match self.credentials.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Sends a request and converts non-success statuses into errors.
    async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let request = builder.build()?;
        let token = bearer_token(&request);
        let response = self.http.execute(request).await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message);

        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!(message = ?message, "backend rejected credentials");
            if let Some(token) = token {
                self.credentials.clear_if(&token, SessionEnd::Rejected);
            }
            return Err(ReclutaError::Unauthorized(
                message.unwrap_or_else(|| SESSION_EXPIRED_MESSAGE.to_string()),
            ));
        }

        tracing::debug!(status = status.as_u16(), message = ?message, "request failed");
        Err(ReclutaError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn get_json(&self, builder: RequestBuilder) -> Result<serde_json::Value> {
        let response = self.send(builder).await?;
        Ok(response.json::<serde_json::Value>().await?)
    }

    /// Reads one page of `E`.
    ///
    /// # Errors
    ///
    /// Any transport, status or decode failure; see the module table.
    #[tracing::instrument(level = "debug", skip(self, query), fields(entity = E::RESOURCE, page = query.page))]
    pub async fn list<E: ListEntity>(&self, query: &ListQuery) -> Result<Page<E>> {
        let builder = self.request(Method::GET, E::RESOURCE).query(&query.params());
        let body = self.get_json(builder).await?;
        let page = Page::<E>::from_json(body)?;
        tracing::debug!(
            items = page.items.len(),
            total_pages = page.total_pages,
            total_count = page.total_count,
            "page fetched"
        );
        Ok(page)
    }

    /// Reads a single `E` by id.
    ///
    /// # Errors
    ///
    /// Any transport, status or decode failure; a missing record is an
    /// [`ReclutaError::Api`] with status 404.
    #[tracing::instrument(level = "debug", skip(self), fields(entity = E::RESOURCE))]
    pub async fn fetch_one<E: ListEntity>(&self, id: i64) -> Result<E> {
        let builder = self.request(Method::GET, &format!("{}/{id}", E::RESOURCE));
        let body = self.get_json(builder).await?;
        serde_json::from_value(body).map_err(|e| ReclutaError::Decode(format!("{}: {e}", E::RESOURCE)))
    }

    /// Deactivates a record (`DELETE /<resource>/<id>`).
    ///
    /// The backend soft-deletes: candidates and clients become inactive and
    /// vacancies are cancelled. Callers refresh their list after `Ok`.
    ///
    /// # Errors
    ///
    /// Any transport or status failure.
    #[tracing::instrument(level = "debug", skip(self), fields(entity = E::RESOURCE))]
    pub async fn deactivate<E: ListEntity>(&self, id: i64) -> Result<()> {
        let builder = self.request(Method::DELETE, &format!("{}/{id}", E::RESOURCE));
        self.send(builder).await?;
        tracing::debug!(id, "record deactivated");
        Ok(())
    }

    /// Logs in and installs the session in the credential provider.
    ///
    /// # Errors
    ///
    /// Invalid credentials surface as [`ReclutaError::Unauthorized`] with the
    /// backend message; other failures as usual.
    #[tracing::instrument(level = "debug", skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        let builder = self
            .request(Method::POST, "auth/login")
            .json(&serde_json::json!({ "email": email, "password": password }));
        let response = self.send(builder).await?;
        let login: LoginResponse = response.json().await?;

        let user = login.user.clone();
        self.credentials.begin(Session {
            token: login.access_token,
            user: login.user,
        });
        Ok(user)
    }

    /// Ends the current session locally.
    pub fn logout(&self) {
        self.credentials.clear(SessionEnd::Logout);
    }

    /// Checks whether the current token is still accepted.
    ///
    /// # Errors
    ///
    /// A rejected token clears the session and returns
    /// [`ReclutaError::Unauthorized`].
    pub async fn verify_token(&self) -> Result<serde_json::Value> {
        self.get_json(self.request(Method::GET, "auth/verify")).await
    }

    /// Probes `GET /health`.
    ///
    /// # Errors
    ///
    /// Returns the failure when the backend is unreachable or unhealthy.
    pub async fn health_check(&self) -> Result<serde_json::Value> {
        let result = self.get_json(self.request(Method::GET, "health")).await;
        match &result {
            Ok(_) => tracing::debug!("backend reachable"),
            Err(e) => tracing::warn!(error = %e, "backend health check failed"),
        }
        result
    }
}

/// Returns the bearer token a built request carries.
fn bearer_token(request: &Request) -> Option<String> {
    request
        .headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{SessionEvent, SessionStore};
    use crate::domain::{Client, Role, Vacancy};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    /// Answers one request with a canned response and returns the config
    /// pointing at it plus the request head it received.
    async fn serve_once(status: &str, body: &str) -> (Config, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut head = Vec::new();
            let mut buf = [0u8; 4096];
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                head.extend_from_slice(&buf[..n]);
            }
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            let _ = tx.send(String::from_utf8_lossy(&head).into_owned());
        });

        let config = Config {
            api_url: format!("http://{addr}/api"),
            ..Config::default()
        };
        (config, rx)
    }

    fn session(token: &str) -> Session {
        Session {
            token: token.to_string(),
            user: User {
                id: 7,
                nombre: "Luis".to_string(),
                email: "luis@example.com".to_string(),
                rol: Role::Reclutador,
                activo: true,
                fecha_creacion: None,
            },
        }
    }

    #[test]
    fn rejects_non_http_base_url() {
        let config = Config {
            api_url: "localhost:5000/api".to_string(),
            ..Config::default()
        };
        let err = ApiClient::new(&config, Arc::new(SessionStore::new())).unwrap_err();
        assert!(matches!(err, ReclutaError::InvalidUrl(_)));
    }

    #[test]
    fn trailing_slash_is_dropped() {
        let config = Config {
            api_url: "http://localhost:5000/api/".to_string(),
            ..Config::default()
        };
        let client = ApiClient::new(&config, Arc::new(SessionStore::new())).unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000/api");
    }

    #[tokio::test]
    async fn unauthorized_ends_the_session_that_sent_the_token() {
        let (config, head) = serve_once("401 Unauthorized", r#"{"message":"Token inválido"}"#).await;
        let store = Arc::new(SessionStore::new());
        store.begin(session("tok-9"));
        let events = store.subscribe();
        let client = ApiClient::new(&config, store.clone()).unwrap();

        let err = client.verify_token().await.unwrap_err();

        assert!(matches!(err, ReclutaError::Unauthorized(ref m) if m == "Token inválido"));
        assert_eq!(store.token(), None);
        assert_eq!(*events.borrow(), SessionEvent::Expired);
        let head = head.await.unwrap().to_ascii_lowercase();
        assert!(head.starts_with("get /api/auth/verify "));
        assert!(head.contains("authorization: bearer tok-9"));
    }

    #[tokio::test]
    async fn failed_login_without_session_publishes_nothing() {
        let (config, _head) = serve_once("401 Unauthorized", r#"{"message":"Credenciales inválidas"}"#).await;
        let store = Arc::new(SessionStore::new());
        let events = store.subscribe();
        let client = ApiClient::new(&config, store.clone()).unwrap();

        let err = client.login("luis@example.com", "nope").await.unwrap_err();

        assert_eq!(err.user_message(), "Credenciales inválidas");
        assert_eq!(*events.borrow(), SessionEvent::Anonymous);
    }

    #[tokio::test]
    async fn backend_message_is_kept_verbatim() {
        let (config, _head) = serve_once(
            "500 Internal Server Error",
            r#"{"message":"Error obteniendo vacantes: timeout"}"#,
        )
        .await;
        let client = ApiClient::new(&config, Arc::new(SessionStore::new())).unwrap();

        let err = client.list::<Vacancy>(&ListQuery::new(1, 10)).await.unwrap_err();

        assert!(matches!(
            err,
            ReclutaError::Api { status: 500, message: Some(ref m) } if m == "Error obteniendo vacantes: timeout"
        ));
    }

    #[tokio::test]
    async fn error_without_message_falls_back_to_status() {
        let (config, _head) = serve_once("404 Not Found", "<html>not found</html>").await;
        let client = ApiClient::new(&config, Arc::new(SessionStore::new())).unwrap();

        let err = client.fetch_one::<Client>(9).await.unwrap_err();

        assert!(matches!(err, ReclutaError::Api { status: 404, message: None }));
        assert_eq!(err.user_message(), "Error 404: Not Found");
    }

    #[tokio::test]
    async fn blank_filters_never_reach_the_wire() {
        let body = r#"{"clientes":[{"id":1,"nombre":"Acme","ccp":"ACM-01","activo":true}],"total":11,"pages":2,"current_page":2}"#;
        let (config, head) = serve_once("200 OK", body).await;
        let client = ApiClient::new(&config, Arc::new(SessionStore::new())).unwrap();

        let mut query = ListQuery::new(2, 10);
        query.filters.insert("search".to_string(), "   ".to_string());
        let page = client.list::<Client>(&query).await.unwrap();

        assert_eq!(page.total_count, 11);
        assert_eq!(page.items[0].nombre, "Acme");
        let head = head.await.unwrap();
        let request_line = head.lines().next().unwrap();
        assert_eq!(request_line, "GET /api/clientes?page=2&per_page=10 HTTP/1.1");
        assert!(!head.to_ascii_lowercase().contains("authorization"));
    }
}
