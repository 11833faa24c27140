//! Deterministic fallback text — used whenever remote generation fails.
//!
//! Both composers are total: any input, including blank fields, produces
//! non-empty, well-formed prose. No I/O.

use crate::models::profile::CandidateProfile;

const DEFAULT_NAME: &str = "Applicant";
const DEFAULT_SKILLS: &str = "various technical skills";

/// Canned advice per topic, in match priority order. The first keyword found
/// in the lowercased message wins, so "interview" beats "resume" beats
/// "salary" beats "career" when a message mentions several.
pub const CHAT_TOPICS: &[(&str, &str)] = &[
    (
        "interview",
        "For interview preparation, focus on these key areas: \
         1) Review common technical questions, \
         2) Practice behavioral questions using the STAR method, \
         3) Research the company thoroughly, \
         4) Prepare questions to ask the interviewer.",
    ),
    (
        "resume",
        "To improve your resume: \
         1) Use action verbs and quantify achievements, \
         2) Tailor it to each job application, \
         3) Keep it concise (1-2 pages), \
         4) Include relevant keywords from job descriptions.",
    ),
    (
        "salary",
        "For salary negotiations: \
         1) Research market rates for your role and location, \
         2) Consider total compensation including benefits, \
         3) Wait for the offer before discussing numbers, \
         4) Be prepared to justify your requested salary.",
    ),
    (
        "career",
        "For career growth: \
         1) Set clear short and long-term goals, \
         2) Continuously learn new skills, \
         3) Network actively in your industry, \
         4) Seek mentorship and feedback.",
    ),
];

pub const CLARIFICATION_REPLY: &str = "Thank you for your question. \
    I'm here to help with career advice, interview preparation, resume tips, \
    and job search strategies. What specific aspect would you like to discuss?";

pub fn compose_cover_letter(profile: &CandidateProfile) -> String {
    let name = profile.name().unwrap_or(DEFAULT_NAME);
    let skills = profile.skills().unwrap_or(DEFAULT_SKILLS);

    format!(
        "Dear Hiring Manager,\n\
         \n\
         I am writing to express my strong interest in the position at your organization. \
         With my background in {skills} and a proven track record in the field, I am confident \
         I would be a valuable addition to your team.\n\
         \n\
         Throughout my career, I have delivered high-quality solutions that align with business \
         objectives. My experience has equipped me with the technical expertise necessary to \
         excel in this role.\n\
         \n\
         I am particularly drawn to this opportunity because it aligns with my passion for \
         innovation and professional growth. I would welcome the opportunity to discuss how my \
         skills and experience can benefit your organization.\n\
         \n\
         Thank you for considering my application. I look forward to speaking with you further.\n\
         \n\
         Sincerely,\n\
         {name}"
    )
}

pub fn compose_chat_reply(message: &str) -> String {
    let message = message.to_lowercase();
    CHAT_TOPICS
        .iter()
        .find(|(keyword, _)| message.contains(keyword))
        .map(|(_, advice)| *advice)
        .unwrap_or(CLARIFICATION_REPLY)
        .to_string()
}
