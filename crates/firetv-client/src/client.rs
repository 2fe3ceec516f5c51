//! Fire TV HTTP client implementation

use std::fmt;
use std::time::Duration;

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};
use url::Url;

use firetv_core::{mask_token, DeviceConfig};

use crate::error::{FireTvClientError, Result};

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
/// Default connection timeout
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Header carrying the bearer token on authenticated routes
pub const TOKEN_HEADER: &str = "X-Client-Token";

/// Wake endpoint, unauthenticated
const WAKE_PATH: &str = "/apps/FireTVRemote";
/// Pairing: ask the device to display a PIN on screen
const PIN_DISPLAY_PATH: &str = "/v1/FireTV/pin/display";
/// Pairing: exchange the on-screen PIN for a bearer token
const PIN_VERIFY_PATH: &str = "/v1/FireTV/pin/verify";
/// Control commands (navigation, volume, power)
const CONTROL_PATH: &str = "/v1/FireTV";
/// Media/playback commands
const MEDIA_PATH: &str = "/v1/media";

#[derive(Debug, Serialize)]
struct PinDisplayRequest<'a> {
    #[serde(rename = "friendlyName")]
    friendly_name: &'a str,
}

#[derive(Debug, Serialize)]
struct PinVerifyRequest<'a> {
    pin: &'a str,
}

/// The device returns the token in a field literally named `description`
#[derive(Debug, Deserialize)]
struct PinVerifyResponse {
    #[serde(default)]
    description: Option<String>,
}

/// HTTP client for the Fire TV local remote API.
///
/// One client owns one logical session to one device. The session can
/// be closed explicitly with [`close`](FireTvClient::close); afterwards
/// every operation fails fast without touching the network, and
/// [`is_open`](FireTvClient::is_open) reports `false`. Closing is
/// idempotent.
///
/// Authenticated routes carry the bearer token in the
/// [`TOKEN_HEADER`] header. A client built without a token sends the
/// request bare and lets the device answer 401, which surfaces as
/// [`FireTvClientError::TokenInvalid`].
pub struct FireTvClient {
    base_url: Url,
    token: Option<String>,
    session: Option<Client>,
}

impl FireTvClient {
    /// Create an unauthenticated client for `host:port`.
    ///
    /// Sufficient for wake, connection probing and pairing; command
    /// routes will be rejected by the device until a token is used.
    pub fn new(host: &str, port: u16) -> Result<Self> {
        Self::with_config(host, port, None, DEFAULT_TIMEOUT, DEFAULT_CONNECT_TIMEOUT)
    }

    /// Create a client that authenticates command routes with `token`
    pub fn with_token(host: &str, port: u16, token: &str) -> Result<Self> {
        Self::with_config(
            host,
            port,
            Some(token.to_string()),
            DEFAULT_TIMEOUT,
            DEFAULT_CONNECT_TIMEOUT,
        )
    }

    /// Create a client for a stored device record
    pub fn for_config(config: &DeviceConfig) -> Result<Self> {
        Self::with_token(&config.host, config.port, &config.token)
    }

    /// Create a client with custom timeouts
    pub fn with_config(
        host: &str,
        port: u16,
        token: Option<String>,
        timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self> {
        let base_url = Url::parse(&format!("http://{host}:{port}"))?;

        let session = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()?;

        Ok(Self {
            base_url,
            token,
            session: Some(session),
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Whether the session is still open
    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    /// Close the session.
    ///
    /// Idempotent and infallible; only the first call does anything.
    pub fn close(&mut self) {
        if self.session.take().is_some() {
            debug!(device = %self.base_url, "client session closed");
        }
    }

    fn session(&self) -> Result<&Client> {
        self.session.as_ref().ok_or(FireTvClientError::SessionClosed)
    }

    // =========================================================================
    // Wake and reachability
    // =========================================================================

    /// Wake the device from sleep. Best-effort: the result is advisory
    /// and every failure cause is folded into `false`.
    #[instrument(skip(self), fields(device = %self.base_url))]
    pub async fn wake(&self) -> bool {
        let Ok(session) = self.session() else {
            debug!("wake skipped, session is closed");
            return false;
        };
        let Ok(url) = self.base_url.join(WAKE_PATH) else {
            return false;
        };

        match session.post(url).send().await {
            Ok(response) if response.status().is_success() => {
                debug!("wake request accepted");
                true
            }
            Ok(response) => {
                debug!(status = %response.status(), "wake request rejected");
                false
            }
            Err(err) => {
                debug!(error = %err, "wake request failed");
                false
            }
        }
    }

    /// Probe the device until it answers, with a bounded retry budget.
    ///
    /// Makes at most `max_retries` attempts and sleeps `retry_delay`
    /// between attempts, not after the last one. Never fails: every
    /// error cause is logged and folded into `false`. `max_retries`
    /// of zero returns `false` without any network traffic.
    #[instrument(skip(self), fields(device = %self.base_url))]
    pub async fn test_connection(&self, max_retries: u32, retry_delay: Duration) -> bool {
        if self.session.is_none() {
            debug!("connection test skipped, session is closed");
            return false;
        }
        for attempt in 1..=max_retries {
            if self.probe().await {
                debug!(attempt, "device answered");
                return true;
            }
            if attempt < max_retries {
                tokio::time::sleep(retry_delay).await;
            }
        }
        debug!(max_retries, "device did not answer within the retry budget");
        false
    }

    async fn probe(&self) -> bool {
        let Ok(session) = self.session() else {
            return false;
        };

        match session.get(self.base_url.clone()).send().await {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                debug!(status = %response.status(), "probe rejected");
                false
            }
            Err(err) => {
                debug!(error = %err, "probe failed");
                false
            }
        }
    }

    // =========================================================================
    // Pairing
    // =========================================================================

    /// Ask the device to display a pairing PIN, announcing the client
    /// under `friendly_name`. True only when the device accepted.
    #[instrument(skip(self), fields(device = %self.base_url))]
    pub async fn request_pin(&self, friendly_name: &str) -> bool {
        let Ok(session) = self.session() else {
            warn!("PIN display requested on a closed session");
            return false;
        };
        let Ok(url) = self.base_url.join(PIN_DISPLAY_PATH) else {
            return false;
        };
        let body = PinDisplayRequest { friendly_name };

        match session.post(url).json(&body).send().await {
            Ok(response) if response.status().is_success() => {
                debug!("device is displaying a pairing PIN");
                true
            }
            Ok(response) => {
                warn!(status = %response.status(), "PIN display request rejected");
                false
            }
            Err(err) => {
                warn!(error = %err, "PIN display request failed");
                false
            }
        }
    }

    /// Exchange the on-screen PIN for a bearer token.
    ///
    /// `None` covers every failure; the device does not let a caller
    /// distinguish a wrong PIN from an expired pairing window.
    #[instrument(skip(self, pin), fields(device = %self.base_url))]
    pub async fn verify_pin(&self, pin: &str) -> Option<String> {
        let session = self.session().ok()?;
        let url = self.base_url.join(PIN_VERIFY_PATH).ok()?;
        let body = PinVerifyRequest { pin };

        let response = match session.post(url).json(&body).send().await {
            Ok(response) => response,
            Err(err) => {
                warn!(error = %err, "PIN verification request failed");
                return None;
            }
        };
        if !response.status().is_success() {
            warn!(status = %response.status(), "device rejected the PIN");
            return None;
        }

        match response.json::<PinVerifyResponse>().await {
            Ok(PinVerifyResponse {
                description: Some(token),
            }) if !token.is_empty() => {
                debug!("device issued a client token");
                Some(token)
            }
            Ok(_) => {
                warn!("verification response carried no token");
                None
            }
            Err(err) => {
                warn!(error = %err, "could not parse the verification response");
                None
            }
        }
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// Send a control-route action (navigation, volume, power)
    #[instrument(skip(self), fields(device = %self.base_url))]
    pub async fn send_control_command(&self, action: &str) -> Result<bool> {
        let url = self.base_url.join(CONTROL_PATH)?;
        let request = self
            .authenticated(self.session()?.post(url))
            .query(&[("action", action)]);
        self.dispatch(request, action).await
    }

    /// Send a media-route action (playback)
    #[instrument(skip(self), fields(device = %self.base_url))]
    pub async fn send_media_command(&self, action: &str) -> Result<bool> {
        let url = self.base_url.join(MEDIA_PATH)?;
        let request = self
            .authenticated(self.session()?.post(url))
            .query(&[("action", action)]);
        self.dispatch(request, action).await
    }

    /// Launch an application by package identifier
    #[instrument(skip(self), fields(device = %self.base_url))]
    pub async fn launch_app(&self, package: &str) -> Result<bool> {
        let url = self.base_url.join(&format!("/v1/FireTV/app/{package}"))?;
        let request = self.authenticated(self.session()?.post(url));
        self.dispatch(request, package).await
    }

    fn authenticated(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.header(TOKEN_HEADER, token),
            None => request,
        }
    }

    /// Shared status mapping for the authenticated command routes:
    /// 2xx is success, 401/403 means the credential is no longer
    /// accepted, everything else is a plain failure.
    async fn dispatch(&self, request: RequestBuilder, what: &str) -> Result<bool> {
        let response = request.send().await?;
        match response.status() {
            status if status.is_success() => Ok(true),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                warn!(what, "device rejected the client token");
                Err(FireTvClientError::TokenInvalid)
            }
            status => {
                warn!(what, %status, "device refused the command");
                Ok(false)
            }
        }
    }
}

impl fmt::Debug for FireTvClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FireTvClient")
            .field("base_url", &self.base_url.as_str())
            .field("token", &self.token.as_deref().map(mask_token))
            .field("open", &self.is_open())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
