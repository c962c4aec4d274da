pub mod bank;
pub mod business;
pub mod people;
pub mod process;
pub mod session;

use std::fmt;
use std::str::FromStr;

use crate::error::QuizError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Domain {
    Process,
    People,
    #[serde(rename = "Business Environment")]
    BusinessEnvironment,
}

impl Domain {
    pub const ALL: [Domain; 3] = [Domain::Process, Domain::People, Domain::BusinessEnvironment];

    pub fn label(&self) -> &'static str {
        match self {
            Domain::Process => "Process",
            Domain::People => "People",
            Domain::BusinessEnvironment => "Business Environment",
        }
    }

    /// Prefix of the question ids generated for this domain.
    pub fn id_prefix(&self) -> &'static str {
        match self {
            Domain::Process => "P",
            Domain::People => "PE",
            Domain::BusinessEnvironment => "B",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Domain {
    type Err = QuizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Domain::ALL
            .into_iter()
            .find(|d| d.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| QuizError::InvalidConfiguration(format!("unknown domain '{}'", wanted)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Question {
    pub id: String,
    pub domain: Domain,
    pub topic: String,
    pub question: String,
    pub options: Vec<String>,
    pub answer_index: usize,
    pub explanation: String,
}

impl Question {
    pub fn correct_option(&self) -> &str {
        &self.options[self.answer_index]
    }
}

/// A scenario with fixed options. `text` may contain `{placeholder}`s.
#[derive(Debug)]
pub struct Template {
    pub topic: &'static str,
    pub text: &'static str,
    pub options: &'static [&'static str],
    pub answer: usize,
    pub explanation: &'static str,
}

impl Template {
    /// Builds the `seq`-th (1-based) question of `domain` out of this template.
    pub fn instantiate(&self, domain: Domain, seq: usize, text: String) -> Question {
        Question {
            id: format!("{}{:03}", domain.id_prefix(), seq),
            domain,
            topic: self.topic.to_string(),
            question: text,
            options: self.options.iter().map(|o| o.to_string()).collect(),
            answer_index: self.answer,
            explanation: self.explanation.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_parses_case_insensitively() {
        assert_eq!("people".parse::<Domain>(), Ok(Domain::People));
        assert_eq!(
            " business environment ".parse::<Domain>(),
            Ok(Domain::BusinessEnvironment)
        );
        assert!(matches!(
            "Finance".parse::<Domain>(),
            Err(QuizError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn every_template_has_a_valid_answer() {
        let all = process::TEMPLATES
            .iter()
            .chain(people::TEMPLATES.iter())
            .chain(business::TEMPLATES.iter());
        for t in all {
            assert_eq!(t.options.len(), 4, "{}", t.topic);
            assert!(t.answer < t.options.len(), "{}", t.topic);
        }
    }

    #[test]
    fn instantiate_pads_sequence_number() {
        let q = people::TEMPLATES[0].instantiate(Domain::People, 7, "text".to_string());
        assert_eq!(q.id, "PE007");
        assert_eq!(q.domain, Domain::People);
        assert_eq!(q.correct_option(), people::TEMPLATES[0].options[1]);
    }

    #[test]
    fn question_serializes_with_plain_field_names() {
        let q = business::TEMPLATES[0].instantiate(Domain::BusinessEnvironment, 1, "Q?".to_string());
        let json = serde_json::to_value(&q).unwrap();
        assert_eq!(json["id"], "B001");
        assert_eq!(json["domain"], "Business Environment");
        assert_eq!(json["answer_index"], 1);
        assert_eq!(json["options"].as_array().unwrap().len(), 4);
        assert!(json.get("explanation").is_some());
        assert!(json.get("topic").is_some());
        assert_eq!(json["question"], "Q?");
    }
}
