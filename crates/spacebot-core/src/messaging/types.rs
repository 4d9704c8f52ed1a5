/// Inline keyboard (buttons) attached to a message. Outer vec = rows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InlineKeyboard {
    pub rows: Vec<Vec<InlineButton>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InlineButton {
    pub label: String,
    pub callback_data: String,
}

impl InlineButton {
    pub fn new(label: impl Into<String>, callback_data: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            callback_data: callback_data.into(),
        }
    }
}

impl InlineKeyboard {
    /// All buttons side by side on one row.
    pub fn single_row(buttons: Vec<InlineButton>) -> Self {
        Self {
            rows: vec![buttons],
        }
    }

    pub fn buttons(&self) -> impl Iterator<Item = &InlineButton> {
        self.rows.iter().flatten()
    }
}

/// Why a single outbound message did not go through.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DeliveryError {
    /// The recipient blocked the bot.
    #[error("recipient blocked the bot")]
    Blocked,

    /// Chat or account no longer exists (deleted, deactivated, never started).
    #[error("recipient is gone")]
    RecipientGone,

    #[error("timed out")]
    TimedOut,

    #[error("platform error: {0}")]
    Platform(String),
}
