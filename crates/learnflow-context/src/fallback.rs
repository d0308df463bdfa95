//! Canned replies used when the upstream generation call fails.
//!
//! Upstream instability must never surface as a transport-level failure to
//! the chat client, so the orchestrator substitutes one of these templates
//! and still answers with HTTP 200.

use regex::Regex;
use std::sync::OnceLock;

const GREETING_REPLY: &str = "Hello! I'm the LearnFlow assistant. I can help you find courses, \
notes, assignments, and lab manuals on the platform. What are you looking for?";

const HELP_REPLY: &str = "I can help you navigate LearnFlow: ask me about a course by its code \
(for example CHB101), where to find notes or assignments, or what a semester covers.";

const COURSE_REPLY: &str = "I can't reach the answer service right now, but you can browse every \
course from the Courses page, or ask me again in a moment with the course code.";

const ASSIGNMENT_REPLY: &str = "I can't fetch assignment details right now. Published assignments \
are listed under /resources/assignments, grouped by course. Please try again shortly.";

const RESOURCE_REPLY: &str = "I can't search resources right now. Notes, lab manuals, and \
downloads are available under the Resources section of the site. Please try again shortly.";

const GENERIC_REPLY: &str = "I'm experiencing connection issues right now. Please try again in a \
moment.";

fn greeting_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\b(hello|hi|hey)\b").expect("greeting regex"))
}

/// Pick the canned reply matching the query, else the generic apology.
pub fn fallback_reply(query: &str) -> String {
    let lowered = query.to_lowercase();
    let reply = if greeting_regex().is_match(&lowered) {
        GREETING_REPLY
    } else if lowered.contains("help") {
        HELP_REPLY
    } else if lowered.contains("course") {
        COURSE_REPLY
    } else if lowered.contains("assignment") {
        ASSIGNMENT_REPLY
    } else if lowered.contains("resource")
        || lowered.contains("notes")
        || lowered.contains("download")
    {
        RESOURCE_REPLY
    } else {
        GENERIC_REPLY
    };
    reply.to_string()
}
