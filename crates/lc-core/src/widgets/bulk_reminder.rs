//! Bulk SMS / email reminder trigger.
//!
//! Sending is delegated to a [`ReminderSender`] supplied by the page. The
//! default sender only simulates a queueing backend.

use std::fmt;

use async_trait::async_trait;

use crate::notice::Notice;

pub const SEND_FAILED: &str = "Failed to send";
pub const SENT: &str = "Sent";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReminderChannel {
    Sms,
    Email,
}

impl ReminderChannel {
    pub fn as_str(self) -> &'static str {
        match self {
            ReminderChannel::Sms => "sms",
            ReminderChannel::Email => "email",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ReminderChannel::Sms => "SMS",
            ReminderChannel::Email => "Email",
        }
    }
}

impl fmt::Display for ReminderChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReminderReceipt {
    pub ok: bool,
    pub message: Option<String>,
}

#[async_trait(?Send)]
pub trait ReminderSender {
    /// `Err` carries a user-facing reason, if any.
    async fn send(&self, channel: ReminderChannel) -> Result<ReminderReceipt, Option<String>>;
}

/// Stand-in used when no real reminder backend is wired up.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedSender;

#[async_trait(?Send)]
impl ReminderSender for SimulatedSender {
    async fn send(&self, channel: ReminderChannel) -> Result<ReminderReceipt, Option<String>> {
        Ok(ReminderReceipt {
            ok: true,
            message: Some(format!(
                "{} reminders queued.",
                channel.as_str().to_ascii_uppercase()
            )),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderOutcome {
    pub channel: ReminderChannel,
    pub notice: Notice,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BulkReminder {
    sending: bool,
    last: Option<ReminderOutcome>,
}

impl BulkReminder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_sending(&self) -> bool {
        self.sending
    }

    pub fn last(&self) -> Option<&ReminderOutcome> {
        self.last.as_ref()
    }

    /// One send at a time across both channels.
    pub fn begin_send(&mut self, channel: ReminderChannel) -> Option<ReminderChannel> {
        if self.sending {
            return None;
        }
        self.sending = true;
        self.last = None;
        Some(channel)
    }

    pub fn finish_send(
        &mut self,
        channel: ReminderChannel,
        result: Result<ReminderReceipt, Option<String>>,
    ) -> &ReminderOutcome {
        self.sending = false;
        let notice = match result {
            Ok(receipt) => {
                let message = receipt.message.unwrap_or_else(|| SENT.to_string());
                if receipt.ok {
                    Notice::success(message)
                } else {
                    Notice::error(message)
                }
            }
            Err(reason) => {
                tracing::warn!(%channel, reason = reason.as_deref().unwrap_or(""), "reminder send failed");
                Notice::error(reason.unwrap_or_else(|| SEND_FAILED.to_string()))
            }
        };
        self.last.insert(ReminderOutcome { channel, notice })
    }

    /// Run a full send through `sender`. Returns `None` if one is already
    /// running.
    pub async fn send_with<R: ReminderSender + ?Sized>(
        &mut self,
        sender: &R,
        channel: ReminderChannel,
    ) -> Option<ReminderOutcome> {
        let channel = self.begin_send(channel)?;
        let result = sender.send(channel).await;
        Some(self.finish_send(channel, result).clone())
    }
}
