//! Library announcements over a Discord-compatible webhook.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Serialize;
use tracing::{debug, trace};

use crate::config::WebhookConfig;
use crate::error::{LibraryError, Result};

/// Lines per posted message.
pub const MESSAGE_BATCH_SIZE: usize = 10;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Announces files added to the library.
pub trait Notifier {
    /// Posts one announcement covering `labels`.
    fn notify(&self, labels: &[String]) -> Result<()>;
}

/// Builds the message bodies for `labels`: sorted, one
/// `Added: <label> to the library!` line each, [`MESSAGE_BATCH_SIZE`] lines
/// per message, each message opening with `mention` when given.
pub fn build_messages(labels: &[String], mention: Option<&str>) -> Vec<String> {
    let mut lines: Vec<String> = labels
        .iter()
        .map(|label| format!("Added: {label} to the library!"))
        .collect();
    lines.sort();

    lines
        .chunks(MESSAGE_BATCH_SIZE)
        .map(|chunk| {
            let body = chunk.join("\n");
            match mention {
                Some(mention) => format!("{mention} {body}"),
                None => body,
            }
        })
        .collect()
}

#[derive(Debug, Serialize)]
struct WebhookPayload<'a> {
    content: &'a str,
    username: &'a str,
}

/// Posts announcements to a Discord webhook.
#[derive(Debug, Clone)]
pub struct DiscordWebhook {
    client: Client,
    config: WebhookConfig,
}

impl DiscordWebhook {
    /// Creates a webhook client.
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::Notify` if the HTTP client cannot be built.
    pub fn new(config: WebhookConfig) -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, config })
    }

    fn send(&self, content: &str) -> Result<()> {
        let payload = WebhookPayload {
            content,
            username: &self.config.username,
        };

        let response = self.client.post(&self.config.url).json(&payload).send()?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(LibraryError::NotifyRejected {
                status: status.as_u16(),
                body,
            });
        }

        trace!(%status, "webhook message delivered");
        Ok(())
    }
}

impl Notifier for DiscordWebhook {
    fn notify(&self, labels: &[String]) -> Result<()> {
        let messages = build_messages(labels, self.config.mention.as_deref());
        debug!(messages = messages.len(), "sending webhook notifications");
        for message in &messages {
            self.send(message)?;
        }
        Ok(())
    }
}
