use chrono::{Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Timestamp layout used on every transcript line
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One exchange between the user and the bot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    /// Local time the turn was recorded, second precision
    pub timestamp: NaiveDateTime,
    /// What the user typed
    pub user: String,
    /// What was displayed as the bot's reply
    pub bot: String,
}

impl ChatTurn {
    /// Create a turn stamped with the current local time
    pub fn new(user: impl Into<String>, bot: impl Into<String>) -> Self {
        let now = Local::now().naive_local();
        Self::at(now.with_nanosecond(0).unwrap_or(now), user, bot)
    }

    /// Create a turn with an explicit timestamp
    pub fn at(timestamp: NaiveDateTime, user: impl Into<String>, bot: impl Into<String>) -> Self {
        Self {
            timestamp,
            user: user.into(),
            bot: bot.into(),
        }
    }

    /// The transcript entry for this turn: a user line, a bot line and a
    /// blank separator
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use termchat::storage::ChatTurn;
    ///
    /// let ts = NaiveDate::from_ymd_opt(2024, 5, 1)
    ///     .unwrap()
    ///     .and_hms_opt(9, 30, 0)
    ///     .unwrap();
    /// let turn = ChatTurn::at(ts, "hi", "hello");
    /// assert_eq!(
    ///     turn.to_transcript_entry(),
    ///     "2024-05-01 09:30:00 - User: hi\n2024-05-01 09:30:00 - Bot: hello\n\n"
    /// );
    /// ```
    pub fn to_transcript_entry(&self) -> String {
        let timestamp = self.timestamp.format(TIMESTAMP_FORMAT);
        format!(
            "{ts} - User: {}\n{ts} - Bot: {}\n\n",
            self.user,
            self.bot,
            ts = timestamp
        )
    }
}

impl fmt::Display for ChatTurn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} -> {}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.user,
            self.bot
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Speaker {
    User,
    Bot,
}

/// Parse `YYYY-MM-DD HH:MM:SS - User: text` / `... - Bot: text`
fn parse_entry_line(line: &str) -> Option<(NaiveDateTime, Speaker, String)> {
    let (timestamp, rest) = line.split_once(" - ")?;
    let timestamp = NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT).ok()?;

    if let Some(text) = rest.strip_prefix("User: ") {
        Some((timestamp, Speaker::User, text.to_string()))
    } else if let Some(text) = rest.strip_prefix("Bot: ") {
        Some((timestamp, Speaker::Bot, text.to_string()))
    } else {
        None
    }
}

/// Parse transcript text back into turns
///
/// Lines without a timestamp prefix continue the previous entry (multi-line
/// replies); blank lines are separators. A user line with no following bot
/// line is dropped.
pub fn parse_transcript(contents: &str) -> Vec<ChatTurn> {
    let mut entries: Vec<(NaiveDateTime, Speaker, String)> = Vec::new();

    for line in contents.lines() {
        match parse_entry_line(line) {
            Some(entry) => entries.push(entry),
            None if line.is_empty() => {}
            None => {
                if let Some((_, _, text)) = entries.last_mut() {
                    text.push('\n');
                    text.push_str(line);
                } else {
                    tracing::debug!("Skipping unrecognized transcript line");
                }
            }
        }
    }

    let mut turns = Vec::new();
    let mut pending_user: Option<(NaiveDateTime, String)> = None;

    for (timestamp, speaker, text) in entries {
        match speaker {
            Speaker::User => pending_user = Some((timestamp, text)),
            Speaker::Bot => {
                if let Some((user_timestamp, user)) = pending_user.take() {
                    turns.push(ChatTurn::at(user_timestamp, user, text));
                }
            }
        }
    }

    turns
}
