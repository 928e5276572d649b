use teloxide::prelude::*;
use teloxide::types::UserId;

const STATUS_REPLY: &str = "Monitoring is active ✅ Live metrics are updated below.";

pub(crate) fn is_status_request(text: &str) -> bool {
    text.trim().eq_ignore_ascii_case("status")
}

/// Plain-text handler: a literal "status" from anyone but the bot itself
/// gets a fixed acknowledgment. No other inbound text is acted on.
pub async fn answer_text(bot: Bot, msg: Message, own_id: UserId) -> ResponseResult<()> {
    if msg.from().map(|user| user.id) == Some(own_id) {
        return Ok(());
    }

    if msg.text().map(is_status_request).unwrap_or(false) {
        bot.send_message(msg.chat.id, STATUS_REPLY).await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::is_status_request;

    #[test]
    fn status_matching_is_case_insensitive_and_trimmed() {
        assert!(is_status_request("status"));
        assert!(is_status_request("STATUS"));
        assert!(is_status_request("  Status "));

        assert!(!is_status_request("status?"));
        assert!(!is_status_request("bot status"));
        assert!(!is_status_request(""));
    }
}
