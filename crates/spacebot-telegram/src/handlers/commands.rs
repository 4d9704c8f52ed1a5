use std::sync::Arc;

use teloxide::prelude::*;

use spacebot_core::domain::{ChatId, StartRequest, UserId};

use crate::router::AppState;

fn parse_command(text: &str) -> (String, String) {
    // Telegram may send `/cmd@botname arg1 ...`
    let mut parts = text.trim().splitn(2, char::is_whitespace);
    let first = parts.next().unwrap_or("").trim();
    let rest = parts.next().unwrap_or("").trim().to_string();

    let cmd = first
        .trim_start_matches('/')
        .split('@')
        .next()
        .unwrap_or("")
        .to_lowercase();

    (cmd, rest)
}

pub async fn handle_command(msg: &Message, text: &str, state: Arc<AppState>) -> ResponseResult<()> {
    let (cmd, _args) = parse_command(text);
    match cmd.as_str() {
        "start" => handle_start(msg, state).await,
        _ => Ok(()),
    }
}

async fn handle_start(msg: &Message, state: Arc<AppState>) -> ResponseResult<()> {
    let Some(user) = msg.from() else {
        return Ok(());
    };

    let req = StartRequest {
        user_id: UserId(user.id.0 as i64),
        username: user.username.clone(),
        first_name: user.first_name.clone(),
    };

    if let Err(e) = state.interactions.start(ChatId(msg.chat.id.0), &req).await {
        tracing::warn!(user_id = req.user_id.0, error = %e, "failed to answer /start");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_command() {
        assert_eq!(parse_command("/start"), ("start".to_string(), String::new()));
    }

    #[test]
    fn strips_bot_mention_and_keeps_args() {
        assert_eq!(
            parse_command("/Start@SpaceNewsBot  deep-link "),
            ("start".to_string(), "deep-link".to_string())
        );
    }
}
