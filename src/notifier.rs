use reqwest::{Client, StatusCode};
use serde_json::json;
use tracing::{error, info};

use crate::config::NotifierConfig;

/// Sends new-low alerts through the Sendinblue transactional email API.
pub struct EmailNotifier {
    client: Client,
    config: NotifierConfig,
}

impl EmailNotifier {
    pub fn new(config: NotifierConfig) -> Self {
        EmailNotifier {
            client: Client::new(),
            config,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/v3/smtp/email", self.config.api_base)
    }

    fn create_payload(&self, item_name: &str, message: &str, recipient: &str) -> serde_json::Value {
        json!({
            "sender": {
                "name": self.config.sender_name,
                "email": self.config.sender_email
            },
            "to": [
                {
                    "email": recipient,
                    "name": "PriceWatcher Sub"
                }
            ],
            "subject": format!("PriceWatcher ALERT for '{item_name}'"),
            "htmlContent": message
        })
    }

    /// Deliver one alert. Returns true only on provider acceptance (201).
    /// Failure never propagates: a lost email must not roll back the
    /// price-record update.
    pub async fn notify(&self, item_name: &str, message: &str, recipient: &str) -> bool {
        let Some(api_key) = self.config.api_key.as_deref() else {
            error!(
                "Can't send email notification. No API key in environment variable {}",
                crate::config::API_KEY_ENV
            );
            return false;
        };

        info!("Sending email notification...");
        let payload = self.create_payload(item_name, message, recipient);

        let response = self
            .client
            .post(self.endpoint())
            .header("Accept", "application/json")
            .header("api-key", api_key)
            .json(&payload)
            .send()
            .await;

        match response {
            Ok(response) if response.status() == StatusCode::CREATED => {
                info!("Email notification sent");
                true
            }
            Ok(response) => {
                error!("Could not send email for item '{item_name}'");
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                error!("Provider answered {status}: {body}");
                false
            }
            Err(e) => {
                error!("Could not send email for item '{item_name}': {e}");
                false
            }
        }
    }
}
