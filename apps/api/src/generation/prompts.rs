// Prompt construction for the remote text-generation models.
// Oversized context is trimmed here, before anything goes on the wire.

use crate::generation::request::{ChatRequest, CoverLetterRequest};

/// Resume text beyond this many characters is dropped from the prompt.
pub const RESUME_SUMMARY_CHARS: usize = 500;

/// Only the most recent turns of a conversation are replayed.
pub const CHAT_HISTORY_TURNS: usize = 3;

/// Marker the chat model uses for its own turns.
pub const BOT_MARKER: &str = "Bot:";

pub fn build_cover_letter_prompt(request: &CoverLetterRequest) -> String {
    let profile = &request.profile;
    let resume_summary = request
        .resume_text
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(|r| truncate_chars(r, RESUME_SUMMARY_CHARS))
        .unwrap_or("Not provided");

    format!(
        "Generate a professional cover letter based on the following:\n\
         \n\
         Candidate Profile:\n\
         Name: {name}\n\
         Skills: {skills}\n\
         Bio: {bio}\n\
         \n\
         Job Description:\n\
         {job_description}\n\
         \n\
         Resume Summary:\n\
         {resume_summary}\n",
        name = profile.name().unwrap_or_default(),
        skills = profile.skills().unwrap_or_default(),
        bio = profile.bio().unwrap_or_default(),
        job_description = request.job_description.trim(),
    )
}

pub fn build_chat_prompt(request: &ChatRequest) -> String {
    let start = request.history.len().saturating_sub(CHAT_HISTORY_TURNS);
    let mut prompt = String::new();
    for turn in &request.history[start..] {
        prompt.push_str(&format!(
            "User: {}\n{BOT_MARKER} {}\n",
            turn.message, turn.response
        ));
    }
    prompt.push_str(&format!("User: {}\n{BOT_MARKER}", request.message));
    prompt
}

/// The chat model echoes the conversation; its reply is whatever follows the last bot marker.
pub fn extract_chat_reply(generated: &str) -> &str {
    generated
        .rsplit(BOT_MARKER)
        .next()
        .unwrap_or(generated)
        .trim()
}

/// Returns at most `max` characters of `text`, cut on a char boundary.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
