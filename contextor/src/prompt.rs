//! Prompt builder: fixed instruction, retrieved context, then the question.

/// Instruction placed before the context block.
pub const INSTRUCTION: &str = "Use this context to answer the question:";

/// Builds the single-turn prompt for `question` over `context`.
///
/// Layout is `INSTRUCTION`, blank line, context, blank line, `Question: …`.
/// An empty context keeps both blank lines.
///
/// # Example
/// ```
/// use contextor::prompt::build_prompt;
/// let p = build_prompt("Returns accepted within 30 days.", "What is the return policy?");
/// assert!(p.ends_with("\n\nQuestion: What is the return policy?"));
/// ```
pub fn build_prompt(context: &str, question: &str) -> String {
    format!("{INSTRUCTION}\n\n{context}\n\nQuestion: {question}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_sits_between_instruction_and_question() {
        let p = build_prompt("A\n\nB", "why?");
        assert_eq!(
            p,
            "Use this context to answer the question:\n\nA\n\nB\n\nQuestion: why?"
        );
    }

    #[test]
    fn empty_context_keeps_both_separators() {
        let p = build_prompt("", "What is the return policy?");
        assert!(p.contains(
            "Use this context to answer the question:\n\n\n\nQuestion: What is the return policy?"
        ));
    }

    #[test]
    fn question_is_not_trimmed_or_rewritten() {
        let p = build_prompt("ctx", "  spaced `code` <b>  ");
        assert!(p.ends_with("Question:   spaced `code` <b>  "));
    }
}
