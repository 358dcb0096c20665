//! Prompt templates for every model call the gateway makes.
//!
//! Kept in one place so the wording — which the suggestion splitter and the
//! chat persona depend on — has a single owner.

use fd_domain::Message;

/// System persona for the chat assistant.
pub const CHAT_SYSTEM: &str = "\
You are a financial literacy assistant.

- Help the user understand their documents and provide advice specifically personalized to their documents.
- When providing advice, present tips as concise bullet points or numbered lists.
- Use clear and simple language.
- The user may ask questions or request summaries of their documents.
- Using the provided summaries, give users advice on how to manage their finances better.
- Always prioritize user privacy and data security.
- Encourage them to do their own research.";

/// System instruction for the search-oriented resource lookup.
pub const RESOURCE_SYSTEM: &str = "Provide 5 links in a numbered format. \
Just give the numbers and links, no need for any other text.";

/// One-document summarization request (ingestion pipeline).
pub fn summarize_messages(display_name: &str, text: &str) -> Vec<Message> {
    vec![Message::user(format!(
        "Summarize the following financial document for the user's records. \
Highlight every numeric value (income, withholding, balances, deductions) and \
call out anything actionable for tax filing or personal finance. Keep the \
summary short and factual.\n\nDocument name: {display_name}\n\nDocument \
contents:\n{text}"
    ))]
}

/// Full suggestion-list generation from all of a user's summaries.
pub fn generation_messages(summaries: &str) -> Vec<Message> {
    vec![Message::user(format!(
        "Analyze the following document summaries and provide a detailed list \
of actionable financial recommendations tailored to the user's specific \
financial situation and goals. Each suggestion should:\n\n\
Be numbered and presented clearly in simple, concise language.\n\
Directly reference specific details and numbers from the document summaries \
to ensure relevance and precision.\n\
Include at least three specific and personal improvement strategies based on \
explicit insights or themes extracted from the summaries.\n\
Document Summaries:\n{summaries}"
    ))]
}

/// Request for exactly one new suggestion that does not overlap the
/// existing list.
pub fn extension_messages(existing: &[String], summaries: &str) -> Vec<Message> {
    let existing_text = if existing.is_empty() {
        "None".to_string()
    } else {
        existing.join("\n")
    };
    vec![Message::user(format!(
        "Review the following document summaries and provide one unique, \
actionable financial suggestion tailored to the user's specific financial \
situation and goals. The new suggestion must:\n\n\
Be distinct and not overlap with any of the existing suggestions in content \
or intent.\n\
Be presented clearly and concisely in simple language.\n\
Directly reference specific details from the document summaries to \
demonstrate its relevance.\n\
Existing Suggestions:\n{existing_text}\n\n\
Document Summaries:\n{summaries}"
    ))]
}

/// The 3-message chat exchange: persona, summaries carrier, live question.
pub fn chat_messages(summaries: &str, question: &str) -> Vec<Message> {
    vec![
        Message::system(CHAT_SYSTEM),
        Message::assistant(format!(
            "Here are the summaries of the user's documents:\n{summaries}"
        )),
        Message::user(question),
    ]
}

/// Resource-link lookup for a topic.
pub fn resource_messages(topic: &str) -> Vec<Message> {
    vec![
        Message::system(RESOURCE_SYSTEM),
        Message::user(format!("Please provide links about: {topic}")),
    ]
}
