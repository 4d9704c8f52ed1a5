/// Telegram user id (numeric). Also the subscriber identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(pub i64);

/// Telegram chat id (numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChatId(pub i64);

/// Telegram message id (numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MessageId(pub i32);

/// A stable reference to a Telegram message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MessageRef {
    pub chat_id: ChatId,
    pub message_id: MessageId,
}

impl From<UserId> for ChatId {
    /// Private chats share the numeric id of the user.
    fn from(id: UserId) -> Self {
        ChatId(id.0)
    }
}

/// A registered broadcast recipient.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Subscriber {
    pub user_id: UserId,
    pub username: Option<String>,
}

/// One news item. Fetched fresh on every request, never persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Article {
    pub title: String,
    pub summary: String,
    pub url: String,
}

impl Article {
    /// Placeholder delivered in place of a real article when the feed fails.
    pub fn sentinel() -> Self {
        Self {
            title: "Error".to_string(),
            summary: "Could not fetch news.".to_string(),
            url: String::new(),
        }
    }
}

/// Context of an inbound `/start`.
#[derive(Clone, Debug)]
pub struct StartRequest {
    pub user_id: UserId,
    pub username: Option<String>,
    pub first_name: String,
}
