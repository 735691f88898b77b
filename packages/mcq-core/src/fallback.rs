//! Sample questions installed when generation fails.

use crate::types::{GenerationSettings, Mcq};

/// Fallback questions shaped by `settings`.
///
/// At most two questions are returned, never more than `numQuestions`. The
/// first question is multiple-answer only when the settings allow it.
pub fn fallback_mcqs(settings: &GenerationSettings) -> Vec<Mcq> {
    let difficulty = settings.difficulty;

    let benefits_options = [
        "Enhanced user experience through personalization",
        "Automated code generation and testing",
        "Increased development costs",
        "Improved accessibility features",
    ];
    let benefits = if settings.allow_multiple_correct {
        Mcq::multiple(
            "What are the primary benefits of artificial intelligence in modern web development? (Select all that apply)",
            benefits_options,
            vec![0, 1, 3],
            difficulty,
        )
    } else {
        Mcq::single(
            "What are the primary benefits of artificial intelligence in modern web development? (Select all that apply)",
            benefits_options,
            0,
            difficulty,
        )
    };

    let language = Mcq::single(
        "Which programming language is primarily used for client-side web development?",
        ["Python", "JavaScript", "Java", "C++"],
        1,
        difficulty,
    );

    let samples = [
        (
            benefits,
            "Think about how AI tools help developers be more productive and create better user experiences.",
            "AI in web development enhances user experience through personalization, automates repetitive tasks like code generation and testing, and can improve accessibility through automated alt-text generation and other features. It typically reduces costs rather than increases them.",
        ),
        (
            language,
            "This language runs in web browsers and is essential for interactive web pages.",
            "JavaScript is the primary programming language for client-side web development, running in web browsers to create interactive and dynamic user interfaces.",
        ),
    ];

    samples
        .into_iter()
        .take(settings.num_questions)
        .map(|(mut mcq, hint, explanation)| {
            if settings.include_hints {
                mcq.hint = Some(hint.to_string());
            }
            if settings.include_explanations {
                mcq.explanation = Some(explanation.to_string());
            }
            mcq
        })
        .collect()
}
