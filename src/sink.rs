use teloxide::prelude::*;
use teloxide::types::{ChatId, MessageId, Recipient};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelId(pub i64);

/// Handle to the live dashboard message. Replaced wholesale when a new
/// message is created, never mutated in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageRef {
    pub channel: ChannelId,
    pub message_id: i32,
}

#[derive(Debug, Error, Clone)]
#[error("{message}")]
pub struct SinkError {
    message: String,
}

impl From<teloxide::RequestError> for SinkError {
    fn from(error: teloxide::RequestError) -> Self {
        Self {
            message: error.to_string(),
        }
    }
}

impl SinkError {
    #[cfg(test)]
    pub(crate) fn mock(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

/// The only chat operations the monitoring loop consumes. Everything below
/// this seam (connections, retries, rate limits) belongs to the chat client.
pub trait NotificationSink {
    async fn resolve_channel(&self, name: &str) -> Result<ChannelId, SinkError>;
    async fn send(&self, channel: ChannelId, text: &str) -> Result<MessageRef, SinkError>;
    async fn edit(&self, message: &MessageRef, text: &str) -> Result<(), SinkError>;
}

pub struct TelegramSink {
    bot: Bot,
}

impl TelegramSink {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

impl NotificationSink for TelegramSink {
    async fn resolve_channel(&self, name: &str) -> Result<ChannelId, SinkError> {
        let normalized = name
            .trim()
            .trim_start_matches(['@', '#'])
            .to_lowercase();

        // Either a raw chat id or a public @username; Telegram matches
        // usernames case-insensitively, normalization keeps logs consistent.
        let recipient = match normalized.parse::<i64>() {
            Ok(id) => Recipient::Id(ChatId(id)),
            Err(_) => Recipient::ChannelUsername(format!("@{}", normalized)),
        };

        let chat = self.bot.get_chat(recipient).await?;
        Ok(ChannelId(chat.id.0))
    }

    async fn send(&self, channel: ChannelId, text: &str) -> Result<MessageRef, SinkError> {
        let message = self.bot.send_message(ChatId(channel.0), text).await?;
        Ok(MessageRef {
            channel,
            message_id: message.id.0,
        })
    }

    async fn edit(&self, message: &MessageRef, text: &str) -> Result<(), SinkError> {
        self.bot
            .edit_message_text(
                ChatId(message.channel.0),
                MessageId(message.message_id),
                text,
            )
            .await?;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
    use std::sync::Mutex;

    use super::{ChannelId, MessageRef, NotificationSink, SinkError};

    pub(crate) struct MockSink {
        channel: Option<ChannelId>,
        pub(crate) sent: Mutex<Vec<(ChannelId, String)>>,
        pub(crate) edited: Mutex<Vec<(MessageRef, String)>>,
        pub(crate) fail_sends: AtomicBool,
        pub(crate) fail_edits: AtomicBool,
        reject_matching: Mutex<Option<String>>,
        next_message_id: AtomicI32,
    }

    impl MockSink {
        pub(crate) fn with_channel(channel: ChannelId) -> Self {
            Self {
                channel: Some(channel),
                sent: Mutex::new(Vec::new()),
                edited: Mutex::new(Vec::new()),
                fail_sends: AtomicBool::new(false),
                fail_edits: AtomicBool::new(false),
                reject_matching: Mutex::new(None),
                next_message_id: AtomicI32::new(1),
            }
        }

        /// Rejects only sends whose text contains `pattern`; everything
        /// else is accepted.
        pub(crate) fn reject_sends_containing(&self, pattern: &str) {
            *self
                .reject_matching
                .lock()
                .expect("mock sink lock poisoned") = Some(pattern.to_string());
        }

        pub(crate) fn without_channel() -> Self {
            Self {
                channel: None,
                ..Self::with_channel(ChannelId(0))
            }
        }

        pub(crate) fn sent_texts(&self) -> Vec<String> {
            self.sent
                .lock()
                .expect("mock sink lock poisoned")
                .iter()
                .map(|(_, text)| text.clone())
                .collect()
        }

        pub(crate) fn edited_texts(&self) -> Vec<String> {
            self.edited
                .lock()
                .expect("mock sink lock poisoned")
                .iter()
                .map(|(_, text)| text.clone())
                .collect()
        }
    }

    impl NotificationSink for MockSink {
        async fn resolve_channel(&self, name: &str) -> Result<ChannelId, SinkError> {
            self.channel
                .ok_or_else(|| SinkError::mock(&format!("channel '{}' not found", name)))
        }

        async fn send(&self, channel: ChannelId, text: &str) -> Result<MessageRef, SinkError> {
            if self.fail_sends.load(Ordering::SeqCst) {
                return Err(SinkError::mock("send rejected"));
            }

            if let Some(pattern) = self
                .reject_matching
                .lock()
                .expect("mock sink lock poisoned")
                .as_deref()
            {
                if text.contains(pattern) {
                    return Err(SinkError::mock("send rejected"));
                }
            }

            let message_id = self.next_message_id.fetch_add(1, Ordering::SeqCst);
            self.sent
                .lock()
                .expect("mock sink lock poisoned")
                .push((channel, text.to_string()));
            Ok(MessageRef {
                channel,
                message_id,
            })
        }

        async fn edit(&self, message: &MessageRef, text: &str) -> Result<(), SinkError> {
            if self.fail_edits.load(Ordering::SeqCst) {
                return Err(SinkError::mock("edit rejected"));
            }

            self.edited
                .lock()
                .expect("mock sink lock poisoned")
                .push((*message, text.to_string()));
            Ok(())
        }
    }
}
