use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionType {
    Ping,
    ApplicationCommand,
    Other(u8),
}

impl From<u8> for InteractionType {
    fn from(value: u8) -> Self {
        match value {
            1 => InteractionType::Ping,
            2 => InteractionType::ApplicationCommand,
            other => InteractionType::Other(other),
        }
    }
}

pub const PONG: u8 = 1;
pub const CHANNEL_MESSAGE_WITH_SOURCE: u8 = 4;

#[derive(Debug, Deserialize)]
pub struct Interaction {
    #[serde(rename = "type")]
    pub kind: u8,
    pub data: Option<CommandData>,
}

impl Interaction {
    pub fn interaction_type(&self) -> InteractionType {
        InteractionType::from(self.kind)
    }
}

#[derive(Debug, Deserialize)]
pub struct CommandData {
    pub name: String,
    #[serde(default)]
    pub options: Vec<CommandOption>,
}

#[derive(Debug, Deserialize)]
pub struct CommandOption {
    pub name: String,
    #[serde(default)]
    pub value: Value,
}

impl CommandOption {
    pub fn value_str(&self) -> Option<&str> {
        self.value.as_str()
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct InteractionResponse {
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<MessageData>,
}

impl InteractionResponse {
    pub fn pong() -> Self {
        Self { kind: PONG, data: None }
    }

    pub fn message(data: MessageData) -> Self {
        Self {
            kind: CHANNEL_MESSAGE_WITH_SOURCE,
            data: Some(data),
        }
    }
}

/// Either plain `content` or a set of embeds.
#[derive(Debug, Serialize, PartialEq)]
pub struct MessageData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub embeds: Vec<Embed>,
}

impl MessageData {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            embeds: Vec::new(),
        }
    }

    pub fn embed(embed: Embed) -> Self {
        Self {
            content: None,
            embeds: vec![embed],
        }
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct Embed {
    pub title: String,
    pub color: u32,
    pub fields: Vec<EmbedField>,
    pub footer: EmbedFooter,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<EmbedThumbnail>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct EmbedFooter {
    pub text: String,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct EmbedThumbnail {
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn pong_serializes_without_data() {
        let value = serde_json::to_value(InteractionResponse::pong()).unwrap();
        assert_eq!(value, json!({ "type": 1 }));
    }

    #[test]
    fn command_payload_parses_options() {
        let interaction: Interaction = serde_json::from_value(json!({
            "id": "1",
            "type": 2,
            "data": { "id": "9", "name": "crypto", "options": [{ "name": "name", "type": 3, "value": "eth" }] }
        }))
        .unwrap();

        assert_eq!(interaction.interaction_type(), InteractionType::ApplicationCommand);
        let data = interaction.data.unwrap();
        assert_eq!(data.name, "crypto");
        assert_eq!(data.options[0].value_str(), Some("eth"));
    }

    #[test]
    fn unknown_types_are_kept() {
        let interaction: Interaction = serde_json::from_value(json!({ "type": 3 })).unwrap();
        assert_eq!(interaction.interaction_type(), InteractionType::Other(3));
    }

    #[test]
    fn text_message_has_no_embeds_key() {
        let value = serde_json::to_value(InteractionResponse::message(MessageData::text("hi"))).unwrap();
        assert_eq!(value, json!({ "type": 4, "data": { "content": "hi" } }));
    }
}
