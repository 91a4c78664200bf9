//! Turn assembly for agent invocations
//!
//! Pure data assembly: given the pieces of context an agent must see, build
//! the ordered user turns of its single invocation. Segment order is fixed
//! because providers may weight earlier turns differently and transcript
//! debugging relies on a stable order.

use crate::transcript::ChatTurn;

/// Separator joining replies within and across rounds
pub const ROUND_SEPARATOR: &str = "\n\n---\n\n";

/// Builds the ordered turn list for one agent's invocation
pub struct TurnBuilder;

impl TurnBuilder {
    /// Assemble the turns for a single invocation.
    ///
    /// Order: shared context (first turn of the first round only) -> seed
    /// framing -> the contextual text this turn responds to. Each segment is
    /// a distinct user turn. The agent's instruction text is NOT a turn; it
    /// travels separately as the invocation's system prompt.
    ///
    /// Never fails.
    pub fn build(
        seed: Option<&str>,
        shared_context: Option<&str>,
        contextual_text: &str,
    ) -> Vec<ChatTurn> {
        let mut turns = Vec::with_capacity(3);

        if let Some(shared) = shared_context {
            turns.push(ChatTurn::user(format!(
                "Shared context for this relay:\n{shared}"
            )));
        }

        if let Some(seed) = seed {
            turns.push(ChatTurn::user(format!(
                "Consider the following seed content:\n{seed}\n\nNow, regarding the main task:"
            )));
        }

        turns.push(ChatTurn::user(contextual_text.to_string()));
        turns
    }
}

/// Join a round's replies into the next context blob.
pub fn join_replies(replies: &[String]) -> String {
    replies.join(ROUND_SEPARATOR)
}

/// Build the judge's submissions blob: each surviving circle's final output
/// labeled with that circle's name.
pub fn judge_submissions(submissions: &[(String, String)]) -> String {
    let mut blob = String::from("Submissions from each circle:\n");
    for (name, output) in submissions {
        blob.push_str(&format!("\n--- {name} ---\n{output}\n"));
    }
    blob
}
