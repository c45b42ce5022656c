//! Prompt construction, one template per perspective.
//!
//! `build_prompt` is a pure function of `(submission, perspective)`: the same
//! pair always yields byte-identical text and the code is embedded verbatim.

use crate::domain::{CodeSubmission, Perspective};

/// Language named in the prompt.
pub const LANGUAGE: &str = "C++";

/// The answer layout every prompt asks for; the score parser reads it back.
pub const RESPONSE_FORMAT: &str = "Format: Feedback: <text>\nScore: <number>";

fn instruction(perspective: Perspective) -> &'static str {
    match perspective {
        Perspective::TimeComplexity => "Analyze the time complexity of this",
        Perspective::SpaceComplexity => "Analyze the space complexity of this",
        Perspective::Readability => "Analyze the readability of this",
    }
}

fn focus(perspective: Perspective) -> &'static str {
    match perspective {
        Perspective::Readability => " (naming, structure, clarity)",
        _ => "",
    }
}

fn top_of_scale(perspective: Perspective) -> &'static str {
    match perspective {
        Perspective::Readability => "10 = excellent",
        _ => "10 = optimal",
    }
}

/// Build the instruction sent to the model for one perspective.
pub fn build_prompt(submission: &CodeSubmission, perspective: Perspective) -> String {
    format!(
        "You are an expert code reviewer evaluating {title} only.\n\
         {instruction} {LANGUAGE} code{focus}. Provide:\n\
         1. Brief feedback (2-3 sentences)\n\
         2. Score from 0-10 ({top})\n\
         \n\
         Code:\n\
         {code}\n\
         \n\
         {RESPONSE_FORMAT}",
        title = perspective.title().to_lowercase(),
        instruction = instruction(perspective),
        focus = focus(perspective),
        top = top_of_scale(perspective),
        code = submission.code(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_is_deterministic() {
        let submission = CodeSubmission::new("int add(int a,int b){return a+b;}");
        for perspective in Perspective::ALL {
            assert_eq!(
                build_prompt(&submission, perspective),
                build_prompt(&submission, perspective)
            );
        }
    }

    #[test]
    fn test_prompt_embeds_code_verbatim() {
        let code = format!("// {}\nint f() {{ return 1; }}\n", "x".repeat(50_000));
        let submission = CodeSubmission::new(code.clone());
        let prompt = build_prompt(&submission, Perspective::SpaceComplexity);
        assert!(prompt.contains(&code));
    }

    #[test]
    fn test_prompts_differ_per_perspective() {
        let submission = CodeSubmission::new("int x;");
        let time = build_prompt(&submission, Perspective::TimeComplexity);
        let space = build_prompt(&submission, Perspective::SpaceComplexity);
        let readability = build_prompt(&submission, Perspective::Readability);

        assert!(time.contains("time complexity"));
        assert!(space.contains("space complexity"));
        assert!(readability.contains("naming, structure, clarity"));
        assert!(readability.contains("10 = excellent"));
        assert_ne!(time, space);
    }

    #[test]
    fn test_prompt_states_range_and_format() {
        let prompt = build_prompt(&CodeSubmission::new("int x;"), Perspective::TimeComplexity);
        assert!(prompt.contains("Score from 0-10"));
        assert!(prompt.ends_with(RESPONSE_FORMAT));
    }
}
