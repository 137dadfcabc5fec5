use wagerbook::application::intake::ChatMessage;
use wagerbook::domain::id::{GroupId, MessageId, PlayerId};

/// A group-chat message from `sender`.
pub fn chat(id: &str, sender: &str, text: &str) -> ChatMessage {
    ChatMessage {
        message_id: MessageId::new(id),
        sender_name: Some(sender.to_string()),
        sender_id: Some(PlayerId::new(format!("U-{sender}"))),
        group_id: Some(GroupId::new("G-main")),
        text: Some(text.to_string()),
    }
}

pub fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_string()).collect()
}
