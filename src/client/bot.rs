//! Canned-Response Companion Bot
//!
//! An if/else ladder over lowercase substring matches. Replies are
//! generated locally and only persisted when the chat store explicitly
//! posts them through the chat endpoint.

/// Pick a canned reply for a user message
pub fn generate_response(user_message: &str) -> &'static str {
    let lowercase = user_message.to_lowercase();

    if lowercase.contains("hello") || lowercase.contains("hi ") {
        return "Hello there! How are you feeling today?";
    }

    if lowercase.contains("sad") || lowercase.contains("depressed") || lowercase.contains("unhappy")
    {
        return "I'm sorry to hear you're feeling down. Would you like to talk about it or maybe try a mood-lifting activity?";
    }

    if lowercase.contains("anxious") || lowercase.contains("nervous") || lowercase.contains("worried")
    {
        return "It sounds like you're feeling anxious. Have you tried any breathing exercises? Taking slow, deep breaths can help calm your nervous system.";
    }

    if lowercase.contains("angry") || lowercase.contains("mad") || lowercase.contains("frustrated") {
        return "I can sense you're frustrated. Sometimes taking a short break or doing some physical activity can help release that tension.";
    }

    if lowercase.contains("happy") || lowercase.contains("good") || lowercase.contains("great") {
        return "I'm glad to hear you're feeling good! What's been bringing you joy lately?";
    }

    if lowercase.contains("help") || lowercase.contains("suggestion") {
        return "I'm here to help. You could try journaling, meditation, talking to a friend, or doing something you enjoy. What sounds most appealing right now?";
    }

    "Thank you for sharing. Would you like to talk more about what's on your mind, or maybe try one of our mindfulness activities?"
}
