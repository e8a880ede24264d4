use rand::Rng;

use crate::clients::openai::types::{Message, Role};

pub const FOZZIE_JOKES: [&str; 4] = [
    " Wocka wocka!",
    " Hey, why did the AI cross the road? To get to the other site! Wocka wocka!",
    " You know what they say about artificial intelligence? It's better than artificial stupidity! Wocka wocka!",
    " Here's a joke for you: Why don't robots ever panic? Because they have nerves of steel! Wocka wocka!",
];

/// Appends the joke at `pick` (wrapping) to `content`.
pub fn apply_fozzie_mode_with(content: &str, pick: usize) -> String {
    let joke = FOZZIE_JOKES[pick % FOZZIE_JOKES.len()];
    format!("{}{}", content, joke)
}

pub fn apply_fozzie_mode(content: &str) -> String {
    let pick = rand::thread_rng().gen_range(0..FOZZIE_JOKES.len());
    apply_fozzie_mode_with(content, pick)
}

/// Conversation sent on the next turn: the optional system prompt
/// followed by the running history.
pub fn build_conversation(system: Option<&str>, history: &[Message]) -> Vec<Message> {
    let mut messages = Vec::with_capacity(history.len() + 1);
    if let Some(system) = system.map(str::trim).filter(|s| !s.is_empty()) {
        messages.push(Message::system(system));
    }
    messages.extend(history.iter().filter(|m| m.role != Role::System).cloned());
    messages
}

pub fn message_to_string(msg: &Message) -> String {
    match msg.role {
        Role::User => format!("User: {}", msg.content),
        Role::Assistant => format!("Assistant: {}", msg.content),
        Role::System => format!("System Note: {}", msg.content),
    }
}
