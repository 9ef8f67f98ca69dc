//! System instruction synthesis.
//!
//! Every upstream call starts with one system message built from a fixed base
//! instruction, the optional knowledge text and the optional topic restriction.

use crate::chat::ChatMessage;
use crate::config::SessionConfig;

/// Maximum number of tokens requested from the upstream model per reply.
pub const MAX_OUTPUT_TOKENS: u32 = 1024;

const BASE_INSTRUCTION: &str = "You are a helpful, friendly, and concise assistant. \
You must ALWAYS respond in English only. Never switch to Italian or any other language, \
even if the user writes in another language; keep your reply in English. \
The only exception is if the user explicitly asks you to answer in a specific language.";

const KNOWLEDGE_INSTRUCTION: &str = "Use ONLY the following information about the company \
to answer questions. Do not invent or assume anything not stated here. \
If the user asks something not covered by this information, say you do not have that information.";

/// Builds the system instruction for the given session configuration.
pub fn system_prompt(config: &SessionConfig) -> String {
    let mut prompt = String::from(BASE_INSTRUCTION);

    if let Some(knowledge) = config.knowledge_text() {
        prompt.push_str("\n\n");
        prompt.push_str(KNOWLEDGE_INSTRUCTION);
        prompt.push_str("\n\n---\n\n");
        prompt.push_str(knowledge);
    }

    if let Some(topic) = config.topic() {
        prompt.push_str(&format!(
            " You must ONLY answer questions about: {topic}. If the user asks about anything else, \
politely say you can only help with topics related to \"{topic}\" and invite them to ask within that scope."
        ));
    }

    prompt
}

/// Prepends the system instruction to a conversation.
pub fn with_system_prompt(config: &SessionConfig, conversation: Vec<ChatMessage>) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(conversation.len() + 1);
    messages.push(ChatMessage::system().content(system_prompt(config)).build());
    messages.extend(conversation);
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::ChatRole;

    #[test]
    fn bare_config_yields_base_instruction_only() {
        let prompt = system_prompt(&SessionConfig::default());
        assert_eq!(prompt, BASE_INSTRUCTION);
    }

    #[test]
    fn topic_is_named_in_the_prompt() {
        let config = SessionConfig::new(Some("cooking".into()), None);
        let prompt = system_prompt(&config);
        assert!(prompt.starts_with(BASE_INSTRUCTION));
        assert!(prompt.contains("You must ONLY answer questions about: cooking."));
        assert!(prompt.contains("topics related to \"cooking\""));
    }

    #[test]
    fn knowledge_block_precedes_topic_clause() {
        let config = SessionConfig::new(
            Some("billing".into()),
            Some("Acme sells anvils.".into()),
        );
        let prompt = system_prompt(&config);
        let knowledge_at = prompt.find("\n\n---\n\nAcme sells anvils.").unwrap();
        let topic_at = prompt.find("about: billing").unwrap();
        assert!(knowledge_at < topic_at);
        assert!(prompt.contains("Use ONLY the following information"));
    }

    #[test]
    fn system_message_goes_first_and_conversation_is_untouched() {
        let conversation = vec![
            ChatMessage::user().content("hi").build(),
            ChatMessage::assistant().content("hello").build(),
            ChatMessage::user().content("how are you?").build(),
        ];
        let messages = with_system_prompt(&SessionConfig::default(), conversation.clone());
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0].role, ChatRole::System);
        assert_eq!(
            messages.iter().filter(|m| m.role == ChatRole::System).count(),
            1
        );
        assert_eq!(&messages[1..], conversation.as_slice());
    }
}
