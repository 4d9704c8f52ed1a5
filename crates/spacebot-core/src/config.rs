use std::{
    env, fs,
    path::{Path, PathBuf},
    time::Duration,
};

use chrono::{FixedOffset, NaiveTime, Offset, Utc};

use crate::{errors::Error, Result};

pub const DEFAULT_FEED_URL: &str = "https://api.spaceflightnewsapi.net/v4/articles/?limit=1";
pub const DEFAULT_ABOUT_TEXT: &str =
    "🌌 I'm a bot that brings you daily space news! Made with ❤️ by Ermo.";

/// Typed configuration, read from the environment (and `.env` if present).
#[derive(Clone, Debug)]
pub struct Config {
    // Telegram
    pub telegram_bot_token: String,

    // Persistence
    pub database_path: PathBuf,

    // Feed
    pub feed_url: String,
    pub feed_timeout: Duration,

    // Broadcast
    pub send_timeout: Duration,
    pub broadcast_time: NaiveTime,
    pub broadcast_utc_offset: FixedOffset,

    // Static content
    pub about_text: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));

        let telegram_bot_token = env_str("TELEGRAM_BOT_TOKEN").unwrap_or_default();
        if telegram_bot_token.trim().is_empty() {
            return Err(Error::Config(
                "TELEGRAM_BOT_TOKEN environment variable is required".to_string(),
            ));
        }

        let database_path = env_path("DATABASE_PATH").unwrap_or_else(|| PathBuf::from("users.db"));

        let feed_url = env_str("NEWS_FEED_URL")
            .and_then(non_empty)
            .unwrap_or_else(|| DEFAULT_FEED_URL.to_string());
        let feed_timeout = Duration::from_millis(env_u64("FEED_TIMEOUT_MS").unwrap_or(10_000));
        let send_timeout = Duration::from_millis(env_u64("SEND_TIMEOUT_MS").unwrap_or(10_000));

        let broadcast_time = match env_str("BROADCAST_TIME").and_then(non_empty) {
            Some(raw) => parse_hhmm(&raw)?,
            None => NaiveTime::from_hms_opt(9, 0, 0)
                .ok_or_else(|| Error::Config("invalid default broadcast time".to_string()))?,
        };
        let broadcast_utc_offset = match env_str("BROADCAST_UTC_OFFSET").and_then(non_empty) {
            Some(raw) => parse_utc_offset(&raw)?,
            None => utc(),
        };

        let about_text = env_str("ABOUT_TEXT")
            .and_then(non_empty)
            .unwrap_or_else(|| DEFAULT_ABOUT_TEXT.to_string());

        Ok(Self {
            telegram_bot_token,
            database_path,
            feed_url,
            feed_timeout,
            send_timeout,
            broadcast_time,
            broadcast_utc_offset,
            about_text,
        })
    }
}

/// Parse a wall-clock `HH:MM`.
pub fn parse_hhmm(raw: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(raw.trim(), "%H:%M")
        .map_err(|_| Error::Config(format!("invalid BROADCAST_TIME (expected HH:MM): {raw}")))
}

/// Parse `Z`, `UTC`, or a signed `±HH:MM` offset.
pub fn parse_utc_offset(raw: &str) -> Result<FixedOffset> {
    let t = raw.trim();
    if t.eq_ignore_ascii_case("z") || t.eq_ignore_ascii_case("utc") {
        return Ok(utc());
    }

    let invalid = || Error::Config(format!("invalid BROADCAST_UTC_OFFSET (expected ±HH:MM): {raw}"));

    let (sign, rest) = match t.as_bytes().first() {
        Some(b'+') => (1, &t[1..]),
        Some(b'-') => (-1, &t[1..]),
        _ => return Err(invalid()),
    };
    let (h, m) = rest.split_once(':').ok_or_else(invalid)?;
    if h.len() != 2 || m.len() != 2 {
        return Err(invalid());
    }
    let hours: i32 = h.parse().map_err(|_| invalid())?;
    let minutes: i32 = m.parse().map_err(|_| invalid())?;
    if hours > 23 || minutes > 59 {
        return Err(invalid());
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(invalid)
}

fn utc() -> FixedOffset {
    Utc.fix()
}

fn env_str(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim();
        if key.is_empty() {
            continue;
        }
        if env::var_os(key).is_some() {
            continue; // do not override existing env
        }

        let mut val = v.trim().to_string();
        // Strip optional surrounding quotes.
        if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            val = val[1..val.len() - 1].to_string();
        }

        env::set_var(key, val);
    }
}

fn env_u64(key: &str) -> Option<u64> {
    env_str(key).and_then(|s| s.trim().parse::<u64>().ok())
}

fn env_path(key: &str) -> Option<PathBuf> {
    env::var_os(key).map(PathBuf::from)
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn parses_wall_clock_time() {
        let t = parse_hhmm("09:00").unwrap();
        assert_eq!((t.hour(), t.minute()), (9, 0));
        let t = parse_hhmm(" 23:45 ").unwrap();
        assert_eq!((t.hour(), t.minute()), (23, 45));

        assert!(matches!(parse_hhmm("9am"), Err(Error::Config(_))));
        assert!(parse_hhmm("24:00").is_err());
    }

    #[test]
    fn parses_utc_offsets() {
        assert_eq!(parse_utc_offset("Z").unwrap().local_minus_utc(), 0);
        assert_eq!(parse_utc_offset("utc").unwrap().local_minus_utc(), 0);
        assert_eq!(parse_utc_offset("+02:00").unwrap().local_minus_utc(), 7200);
        assert_eq!(
            parse_utc_offset("-05:30").unwrap().local_minus_utc(),
            -(5 * 3600 + 30 * 60)
        );
    }

    #[test]
    fn rejects_malformed_offsets() {
        for raw in ["0200", "+2:00", "+24:00", "+02:60", "Europe/Berlin", ""] {
            assert!(parse_utc_offset(raw).is_err(), "expected {raw:?} to fail");
        }
    }
}
