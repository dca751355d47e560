//! Web server notifier for real-time updates.
//!
//! The CLI changes the same workspace a running `synergy serve` displays.
//! After each change it posts the event to `/internal/notify` so connected
//! dashboards refresh.

use std::time::Duration;

use synergy_db::WebSocketMessage;
use tracing::{debug, warn};

/// Default web server URL.
pub const DEFAULT_WEB_URL: &str = "http://127.0.0.1:3030";

/// Notifies the web server of changes via HTTP.
#[derive(Clone)]
pub struct WebNotifier {
    client: reqwest::Client,
    base_url: String,
}

impl WebNotifier {
    /// Uses `SYNERGY_WEB_URL` if set, otherwise `http://127.0.0.1:3030`.
    pub fn new() -> Self {
        let base_url =
            std::env::var("SYNERGY_WEB_URL").unwrap_or_else(|_| DEFAULT_WEB_URL.to_string());
        Self::with_url(&base_url)
    }

    pub fn with_url(base_url: &str) -> Self {
        debug!(base_url = %base_url, "WebNotifier initialized");
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(2))
                .build()
                .unwrap_or_default(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/internal/notify", self.base_url)
    }

    /// Post one event. Delivery failures are logged and otherwise ignored.
    pub async fn notify(&self, message: &WebSocketMessage) {
        let url = self.endpoint();
        debug!(url = %url, ?message, "Sending change notification");

        match self.client.post(&url).json(message).send().await {
            Ok(response) if response.status().is_success() => {
                debug!("Change notification delivered");
            }
            Ok(response) => {
                warn!(
                    status_code = %response.status(),
                    "Change notification rejected"
                );
            }
            Err(e) => {
                // Expected when no server is running.
                debug!(error = %e, url = %url, "Change notification not delivered");
            }
        }
    }

    /// Send several events in order.
    pub async fn notify_all(&self, messages: &[WebSocketMessage]) {
        for message in messages {
            self.notify(message).await;
        }
    }
}

impl Default for WebNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let notifier = WebNotifier::with_url("http://localhost:4000/");
        assert_eq!(notifier.endpoint(), "http://localhost:4000/internal/notify");
    }

    #[tokio::test]
    async fn test_unreachable_server_is_ignored() {
        let notifier = WebNotifier::with_url("http://127.0.0.1:9");
        notifier.notify(&WebSocketMessage::DashboardRefresh).await;
    }
}
