//! Terminal rendering of question lists.

use colored::Colorize;
use mcq_core::Mcq;

/// Option letter for `index` ("A", "B", ...).
fn letter(index: usize) -> String {
    u8::try_from(index)
        .ok()
        .filter(|i| *i < 26)
        .map(|i| ((b'A' + i) as char).to_string())
        .unwrap_or_else(|| (index + 1).to_string())
}

/// Render `mcqs` as numbered questions with lettered options.
///
/// With `show_answers`, correct options are marked and explanations shown.
/// Hints are always shown.
pub fn render_text(mcqs: &[Mcq], show_answers: bool) -> String {
    let mut out = String::new();

    for (number, mcq) in mcqs.iter().enumerate() {
        let tag = format!("[{}, {}]", mcq.difficulty, mcq.question_type.as_str());
        out.push_str(&format!(
            "{}. {} {}\n",
            number + 1,
            mcq.question.bold(),
            tag.dimmed()
        ));

        for (index, option) in mcq.options.iter().enumerate() {
            let line = format!("{}. {}", letter(index), option);
            if show_answers && mcq.is_correct(index) {
                out.push_str(&format!("   {} {}\n", line.green(), "(correct)".green()));
            } else {
                out.push_str(&format!("   {}\n", line));
            }
        }

        if let Some(hint) = &mcq.hint {
            out.push_str(&format!("   {} {}\n", "Hint:".yellow(), hint));
        }
        if show_answers {
            if let Some(explanation) = &mcq.explanation {
                out.push_str(&format!("   {} {}\n", "Explanation:".cyan(), explanation));
            }
        }
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcq_core::Difficulty;

    fn sample() -> Vec<Mcq> {
        vec![Mcq::multiple(
            "Which are noble gases?",
            ["Helium", "Oxygen", "Neon"],
            vec![0, 2],
            Difficulty::Easy,
        )
        .with_hint("Group 18")
        .with_explanation("Helium and neon have full outer shells.")]
    }

    #[test]
    fn test_render_without_answers() {
        colored::control::set_override(false);
        let text = render_text(&sample(), false);

        assert!(text.starts_with("1. Which are noble gases? [easy, multiple]\n"));
        assert!(text.contains("   C. Neon\n"));
        assert!(text.contains("Hint: Group 18"));
        assert!(!text.contains("(correct)"));
        assert!(!text.contains("full outer shells"));
    }

    #[test]
    fn test_render_with_answers() {
        colored::control::set_override(false);
        let text = render_text(&sample(), true);

        assert!(text.contains("A. Helium (correct)"));
        assert!(!text.contains("B. Oxygen (correct)"));
        assert!(text.contains("C. Neon (correct)"));
        assert!(text.contains("Explanation: Helium and neon have full outer shells."));
    }
}
