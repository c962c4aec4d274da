//! Text the bot sends, and the text it understands back.
//!
//! Everything here is pure so the dialogue handlers only glue it to teloxide.

use teloxide::utils::html;

use crate::error::QuizError;
use crate::quiz::session::{AnswerRecord, Session, Summary};
use crate::quiz::{Domain, Question};

/// Longest text Telegram accepts in one message.
pub const MAX_MESSAGE_LEN: usize = 4096;

pub const SKIP_BUTTON: &str = "Skip";
pub const NEXT_BUTTON: &str = "Next ➡";
pub const PREVIOUS_BUTTON: &str = "⬅ Previous";
pub const RESET_BUTTON: &str = "Reset";
pub const ALL_DOMAINS_BUTTON: &str = "All domains";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizInput {
    Answer(usize),
    Skip,
    Next,
    Previous,
    Reset,
}

impl QuizInput {
    /// `options` is the number of options of the question on screen; letters
    /// past it are not answers.
    pub fn parse(text: &str, options: usize) -> Option<Self> {
        let text = text.trim();
        match text {
            SKIP_BUTTON => return Some(QuizInput::Skip),
            NEXT_BUTTON => return Some(QuizInput::Next),
            PREVIOUS_BUTTON => return Some(QuizInput::Previous),
            RESET_BUTTON => return Some(QuizInput::Reset),
            _ => {}
        }

        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_alphabetic() => {
                let index = (c.to_ascii_uppercase() as u8 - b'A') as usize;
                (index < options).then_some(QuizInput::Answer(index))
            }
            _ => None,
        }
    }
}

impl QuizInput {
    /// Applies this input to `session`. On error the session is unchanged.
    pub fn apply(self, session: &mut Session) -> Result<(), QuizError> {
        match self {
            QuizInput::Answer(option) => session.submit_answer(option).map(|outcome| {
                log::debug!("Answer correct: {}", outcome.is_correct);
            }),
            QuizInput::Skip => session.skip_current(None),
            QuizInput::Next => session.advance(),
            QuizInput::Previous => session.retreat(),
            QuizInput::Reset => {
                session.reset();
                Ok(())
            }
        }
    }
}

pub fn option_label(index: usize) -> String {
    match u8::try_from(index) {
        Ok(i) if i < 26 => char::from(b'A' + i).to_string(),
        _ => (index + 1).to_string(),
    }
}

fn labelled_option(question: &Question, index: usize) -> String {
    format!(
        "{}. {}",
        option_label(index),
        html::escape(&question.options[index])
    )
}

/// Verdict, explanation and correct answer for a question that has a record.
pub fn render_feedback(question: &Question, record: &AnswerRecord) -> String {
    let verdict = if record.skipped {
        "⏭ Skipped, no score added."
    } else if record.correct {
        "✅ Correct"
    } else {
        "❌ Incorrect"
    };

    let mut text = verdict.to_string();
    if let Some(selected) = record.selected {
        text.push_str(&format!(
            "\n{} {}",
            html::bold("Your answer:"),
            labelled_option(question, selected)
        ));
    }
    text.push_str(&format!(
        "\n{} {}\n\n{}\n{}",
        html::bold("Correct answer:"),
        labelled_option(question, question.answer_index),
        html::bold("Explanation:"),
        html::escape(&question.explanation)
    ));
    text
}

/// The current question, followed by its feedback if it has already been
/// answered or skipped. `None` once the quiz is over or before it started.
pub fn render_question(session: &Session) -> Option<String> {
    let question = session.current_question()?;
    let (number, total) = session.progress();

    let options = (0..question.options.len())
        .map(|i| labelled_option(question, i))
        .collect::<Vec<_>>()
        .join("\n");

    let mut text = format!(
        "{}\nDomain: {} | Score: {}\nTopic: {}\n\n{}\n\n{}",
        html::bold(&format!("Question {} of {}", number, total)),
        html::escape(question.domain.label()),
        session.score(),
        html::escape(&question.topic),
        html::escape(&question.question),
        options
    );

    if let Some(record) = session.record(&question.id) {
        text.push_str("\n\n");
        text.push_str(&render_feedback(question, record));
    }
    Some(text)
}

/// The summary as separate messages: the score first, then one message per
/// reviewed question, so no single message grows with the review list.
pub fn render_summary(summary: &Summary, session: &Session) -> Vec<String> {
    let mut header = format!(
        "🎉 Quiz complete!\nFinal score: {}\nSeed: {} (same seed = same quiz order)",
        html::bold(&format!("{} / {}", summary.score, summary.total)),
        session.seed()
    );

    if summary.is_perfect() {
        header.push_str("\n\n✅ No incorrect answers. Nice.");
        return vec![header];
    }

    header.push_str(&format!(
        "\n\n{} ({})",
        html::bold("🔎 Review incorrect answers"),
        summary.review.len()
    ));

    let mut messages = vec![header];
    for question in &summary.review {
        let mut text = format!(
            "{} ({}, {})\n{}",
            html::bold(&question.id),
            html::escape(question.domain.label()),
            html::escape(&question.topic),
            html::escape(&question.question)
        );
        if let Some(record) = session.record(&question.id) {
            text.push('\n');
            text.push_str(&render_feedback(question, record));
        }
        messages.push(text);
    }
    messages
}

/// Domains picked by the user: the "all" button, a single domain name, or
/// several names separated by commas. Names are case-insensitive and
/// duplicates are dropped.
pub fn parse_domains(text: &str) -> Result<Vec<Domain>, QuizError> {
    if text.trim().eq_ignore_ascii_case(ALL_DOMAINS_BUTTON) {
        return Ok(Domain::ALL.to_vec());
    }

    let mut domains = Vec::new();
    for name in text.split(',').map(str::trim).filter(|n| !n.is_empty()) {
        let domain = name.parse::<Domain>()?;
        if !domains.contains(&domain) {
            domains.push(domain);
        }
    }
    if domains.is_empty() {
        return Err(QuizError::InvalidConfiguration(
            "choose at least one domain".to_string(),
        ));
    }
    Ok(domains)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started(count: usize) -> Session {
        let mut session = Session::default();
        session.start(7, &Domain::ALL, count).unwrap();
        session
    }

    #[test]
    fn parses_buttons_and_letters() {
        assert_eq!(QuizInput::parse("Skip", 4), Some(QuizInput::Skip));
        assert_eq!(QuizInput::parse(NEXT_BUTTON, 4), Some(QuizInput::Next));
        assert_eq!(QuizInput::parse(PREVIOUS_BUTTON, 4), Some(QuizInput::Previous));
        assert_eq!(QuizInput::parse(" Reset ", 4), Some(QuizInput::Reset));
        assert_eq!(QuizInput::parse("A", 4), Some(QuizInput::Answer(0)));
        assert_eq!(QuizInput::parse("d", 4), Some(QuizInput::Answer(3)));
        assert_eq!(QuizInput::parse("E", 4), None);
        assert_eq!(QuizInput::parse("AB", 4), None);
        assert_eq!(QuizInput::parse("", 4), None);
    }

    #[test]
    fn applied_answer_is_in_the_session() {
        let mut session = started(2);
        let q = session.current_question().unwrap().clone();
        QuizInput::Answer(q.answer_index).apply(&mut session).unwrap();
        QuizInput::Next.apply(&mut session).unwrap();

        // This is the session the dialogue stores before anything is sent.
        let saved = session.clone();
        assert_eq!(saved.score(), 1);
        assert!(saved.record(&q.id).unwrap().correct);
        assert_eq!(saved.position(), 1);
    }

    #[test]
    fn rejected_input_leaves_session_unchanged() {
        let mut session = started(2);
        QuizInput::Skip.apply(&mut session).unwrap();
        let before = session.clone();
        assert!(matches!(
            QuizInput::Answer(0).apply(&mut session),
            Err(QuizError::AlreadyAnswered(_))
        ));
        assert_eq!(session.score(), before.score());
        assert_eq!(session.current_record(), before.current_record());
    }

    #[test]
    fn reset_input_clears_session() {
        let mut session = started(3);
        QuizInput::Skip.apply(&mut session).unwrap();
        QuizInput::Reset.apply(&mut session).unwrap();
        assert!(session.current_question().is_none());
        assert!(session.summary().review.is_empty());
        assert_eq!(QuizInput::Next.apply(&mut session), Err(QuizError::OutOfRange));
    }

    #[test]
    fn option_labels() {
        assert_eq!(option_label(0), "A");
        assert_eq!(option_label(3), "D");
        assert_eq!(option_label(30), "31");
    }

    #[test]
    fn question_view_shows_progress_and_options() {
        let session = started(3);
        let text = render_question(&session).unwrap();
        assert!(text.contains("Question 1 of 3"));
        assert!(text.contains("A. "));
        assert!(text.contains("D. "));
        assert!(!text.contains("Explanation"));
    }

    #[test]
    fn answered_question_is_shown_with_stored_feedback() {
        let mut session = started(3);
        let q = session.current_question().unwrap().clone();
        session.submit_answer(q.answer_index).unwrap();
        let text = render_question(&session).unwrap();
        assert!(text.contains("✅ Correct"));
        assert!(text.contains("Explanation:"));
        assert!(text.contains("Score: 1"));
    }

    #[test]
    fn html_is_escaped() {
        let mut session = started(200);
        let position = session
            .questions()
            .iter()
            .position(|q| q.topic.contains('&'))
            .unwrap();
        for _ in 0..position {
            session.advance().unwrap();
        }
        let text = render_question(&session).unwrap();
        assert!(text.contains("&amp;"));
    }

    #[test]
    fn nothing_to_render_when_complete() {
        let mut session = started(1);
        session.advance().unwrap();
        assert!(render_question(&session).is_none());
    }

    #[test]
    fn summary_lists_reviewed_questions() {
        let mut session = started(2);
        let skipped = session.current_question().unwrap().id.clone();
        session.skip_current(None).unwrap();
        session.advance().unwrap();
        session.advance().unwrap();

        let messages = render_summary(&session.summary(), &session);
        assert_eq!(messages.len(), 2);
        assert!(messages[0].contains("0 / 2"));
        assert!(messages[1].contains(&skipped));
        assert!(messages[1].contains("Skipped"));
    }

    #[test]
    fn perfect_summary() {
        let mut session = started(1);
        let q = session.current_question().unwrap().clone();
        session.submit_answer(q.answer_index).unwrap();
        session.advance().unwrap();
        let messages = render_summary(&session.summary(), &session);
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("1 / 1"));
        assert!(messages[0].contains("No incorrect answers"));
    }

    #[test]
    fn every_summary_message_fits_telegram_limit() {
        let mut session = started(50);
        while let Some(q) = session.current_question().cloned() {
            session
                .submit_answer((q.answer_index + 1) % q.options.len())
                .unwrap();
            session.advance().unwrap();
        }

        let summary = session.summary();
        assert_eq!(summary.review.len(), 50);
        let messages = render_summary(&summary, &session);
        assert_eq!(messages.len(), 51);
        for message in &messages {
            assert!(
                message.chars().count() <= MAX_MESSAGE_LEN,
                "{} chars",
                message.chars().count()
            );
        }
        assert!(messages[0].contains("0 / 50"));
    }

    #[test]
    fn parses_domain_lists() {
        assert_eq!(parse_domains("People"), Ok(vec![Domain::People]));
        assert_eq!(
            parse_domains("process, PEOPLE"),
            Ok(vec![Domain::Process, Domain::People])
        );
        assert_eq!(
            parse_domains("People,Business Environment,people"),
            Ok(vec![Domain::People, Domain::BusinessEnvironment])
        );
        assert!(matches!(
            parse_domains("Process, Finance"),
            Err(QuizError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            parse_domains(" , "),
            Err(QuizError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn all_domains_is_case_insensitive() {
        assert_eq!(parse_domains(ALL_DOMAINS_BUTTON), Ok(Domain::ALL.to_vec()));
        assert_eq!(parse_domains(" all DOMAINS "), Ok(Domain::ALL.to_vec()));
    }
}
