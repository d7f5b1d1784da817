//! Prompt templates rendered from structured parameter records.
//!
//! Every generation call in the pipeline goes through one of these templates; nothing
//! assembles prompts ad hoc. Each template fixes its own sampling parameters, so a call
//! site only chooses the template and fills its slots.

use crate::generation::{ChatMessage, GenerationRequest};
use crate::pipeline::types::SessionContext;

const FEEDBACK_TEMPERATURE: f32 = 0.5;
const MATERIAL_TEMPERATURE: f32 = 0.4;
const REPORT_TEMPERATURE: f32 = 0.7;
const FEEDBACK_MAX_TOKENS: u32 = 1000;
const REPORT_MAX_TOKENS: u32 = 1000;

const MATERIAL_EVALUATOR_SYSTEM: &str = "You are a professional training material evaluator. \
     Focus strictly on analyzing the uploaded material and give improvement suggestions.";
const MATERIAL_COMBINER_SYSTEM: &str = "You are a training program evaluator. \
     Focus on topic alignment and material completeness.";

/// Summarize one chunk of feedback items for a given role.
#[derive(Debug, Clone)]
pub struct FeedbackChunkPrompt<'a> {
    /// Role the feedback concerns, e.g. "participant" or "facilitator".
    pub role_name: &'a str,
    /// Feedback items grouped into this chunk.
    pub items: &'a [String],
}

impl FeedbackChunkPrompt<'_> {
    /// Render the template into a generation request.
    pub fn render(&self) -> GenerationRequest {
        let listing = bullet_list(self.items);
        let prompt = format!(
            "You are an expert analyst. Summarize the following {count} {role} feedback \
             points into a concise paragraph:\n\n{listing}",
            count = self.items.len(),
            role = self.role_name,
        );
        GenerationRequest {
            messages: vec![ChatMessage::user(prompt)],
            temperature: FEEDBACK_TEMPERATURE,
            max_tokens: Some(FEEDBACK_MAX_TOKENS),
        }
    }
}

/// Collapse several chunk-level feedback summaries into one paragraph.
#[derive(Debug, Clone)]
pub struct FeedbackCombinePrompt<'a> {
    /// Role the summaries concern.
    pub role_name: &'a str,
    /// Chunk-level summaries, in input order.
    pub summaries: &'a [String],
}

impl FeedbackCombinePrompt<'_> {
    /// Render the template into a generation request.
    pub fn render(&self) -> GenerationRequest {
        let listing = bullet_list(self.summaries);
        let prompt = format!(
            "You are an expert analyst. Summarize the following {count} summarized {role} \
             feedback points into a single concise paragraph:\n\n{listing}",
            count = self.summaries.len(),
            role = self.role_name,
        );
        GenerationRequest {
            messages: vec![ChatMessage::user(prompt)],
            temperature: FEEDBACK_TEMPERATURE,
            max_tokens: Some(FEEDBACK_MAX_TOKENS),
        }
    }
}

/// Evaluate one part of the training material against the session topic.
#[derive(Debug, Clone)]
pub struct MaterialChunkPrompt<'a> {
    /// One-based ordinal of this part within the material.
    pub part: usize,
    /// Session the material belongs to.
    pub session: &'a SessionContext,
    /// Material text for this part.
    pub chunk: &'a str,
}

impl MaterialChunkPrompt<'_> {
    /// Render the template into a generation request.
    pub fn render(&self) -> GenerationRequest {
        let topic = self.session.topic();
        let prompt = format!(
            "You are reviewing part {part} of a training session titled \"{topic}\".\n\n\
             Your job is to strictly evaluate the following uploaded training material:\n\n\
             {chunk}\n\n\
             Provide a concise evaluation focusing on:\n\
             1. Clarity and completeness of the material.\n\
             2. How relevant the content is to the session topic: \"{topic}\".\n\
             3. Any missing concepts or subtopics that should be included to improve coverage.\n\
             4. Suggestions to enhance engagement or practical understanding.",
            part = self.part,
            chunk = self.chunk,
        );
        GenerationRequest {
            messages: vec![
                ChatMessage::system(MATERIAL_EVALUATOR_SYSTEM),
                ChatMessage::user(prompt),
            ],
            temperature: MATERIAL_TEMPERATURE,
            max_tokens: None,
        }
    }
}

/// Combine per-part material evaluations into one holistic evaluation.
///
/// The per-part passages are concatenated verbatim, not re-summarized, so the combiner sees
/// each part's findings in full.
#[derive(Debug, Clone)]
pub struct MaterialCombinePrompt<'a> {
    /// Session the material belongs to.
    pub session: &'a SessionContext,
    /// Per-part evaluation passages, in part order.
    pub part_feedback: &'a [String],
}

impl MaterialCombinePrompt<'_> {
    /// Render the template into a generation request.
    pub fn render(&self) -> GenerationRequest {
        let topic = self.session.topic();
        let passages = self.part_feedback.join("\n\n");
        let prompt = format!(
            "The following is feedback across parts of a training session titled \
             \"{topic}\":\n\n{passages}\n\n\
             Now:\n\
             - Combine all this feedback into a concise overall evaluation.\n\
             - Comment on how well the uploaded materials align with the topic.\n\
             - Suggest specific content, examples, or sections that could be added to \
             enhance quality.",
        );
        GenerationRequest {
            messages: vec![
                ChatMessage::system(MATERIAL_COMBINER_SYSTEM),
                ChatMessage::user(prompt),
            ],
            temperature: MATERIAL_TEMPERATURE,
            max_tokens: None,
        }
    }
}

/// Compose the final feedback report from the two track summaries.
#[derive(Debug, Clone)]
pub struct FeedbackReportPrompt<'a> {
    /// Top-level summary of the participant-side track.
    pub participant_summary: &'a str,
    /// Top-level summary of the facilitator-side track.
    pub facilitator_summary: &'a str,
}

impl FeedbackReportPrompt<'_> {
    /// Render the template into a generation request.
    pub fn render(&self) -> GenerationRequest {
        let prompt = format!(
            "You are an expert educational analyst.\n\n\
             Here is the summary of participant feedback about a session:\n\
             {participant}\n\n\
             Here is the summary of facilitator and moderator feedback about the \
             participants:\n\
             {facilitator}\n\n\
             Please provide:\n\
             1. An integrated analysis highlighting the overall performance of the \
             facilitators and the quality of the sessions.\n\
             2. For each participant, analyze the feedback given by facilitators and \
             moderators and explain how that participant can improve, including where \
             their weaknesses and strengths lie.",
            participant = self.participant_summary,
            facilitator = self.facilitator_summary,
        );
        GenerationRequest {
            messages: vec![ChatMessage::user(prompt)],
            temperature: REPORT_TEMPERATURE,
            max_tokens: Some(REPORT_MAX_TOKENS),
        }
    }
}

fn bullet_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("- {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}
