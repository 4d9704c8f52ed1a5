use std::sync::Arc;

use teloxide::prelude::*;

use spacebot_core::domain::{ChatId, MessageId, MessageRef};

use crate::router::AppState;

pub async fn handle_callback(q: CallbackQuery, state: Arc<AppState>) -> ResponseResult<()> {
    let data = q.data.clone().unwrap_or_default();
    let message = q.message.as_ref().map(|m| MessageRef {
        chat_id: ChatId(m.chat.id.0),
        message_id: MessageId(m.id.0),
    });

    if let Err(e) = state
        .interactions
        .action_selected(&q.id, message, &data)
        .await
    {
        tracing::warn!(user_id = q.from.id.0, error = %e, "failed to answer button press");
    }
    Ok(())
}
