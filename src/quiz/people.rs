use rand::rngs::StdRng;
use rand::Rng;

use crate::quiz::{Domain, Question, Template};

pub const TEMPLATES: [Template; 6] = [
    Template {
        topic: "Conflict Management",
        text: "Two team members strongly disagree on a technical approach and the conflict is hurting team morale. What should the project manager do FIRST?",
        options: &[
            "Use authority to pick the solution",
            "Facilitate a collaborative discussion to understand interests and reach agreement",
            "Escalate to functional management",
            "Remove one team member from the project",
        ],
        answer: 1,
        explanation: "PMP prefers collaborate/problem-solve first. Forcing or escalation is used only when collaboration fails or time/safety constraints demand it.",
    },
    Template {
        topic: "Servant Leadership",
        text: "A high-performing, self-organizing team says the project manager's frequent oversight is slowing them down. What should the project manager do?",
        options: &[
            "Increase monitoring to ensure standards are met",
            "Adopt servant leadership: empower the team and provide support as needed",
            "Replace team members who resist oversight",
            "Escalate the complaint to HR",
        ],
        answer: 1,
        explanation: "For mature teams, empower and remove impediments. Over-control reduces ownership and performance, an exam-favorite trap.",
    },
    Template {
        topic: "Stakeholder Engagement",
        text: "A key stakeholder actively resists the project because they fear the change will reduce their influence. What should the project manager do FIRST?",
        options: &[
            "Escalate to the sponsor to overrule the stakeholder",
            "Understand concerns and work with the stakeholder on engagement and change readiness",
            "Ignore the stakeholder and proceed as planned",
            "Remove the stakeholder from communications and decisions",
        ],
        answer: 1,
        explanation: "Resistance is addressed through engagement: understand concerns, communicate value, involve stakeholders. Escalate only after collaboration attempts.",
    },
    Template {
        topic: "Team Development",
        text: "New team members joined and roles/responsibilities are unclear. What should the project manager do NEXT?",
        options: &[
            "Assign tasks ad hoc and adjust later",
            "Develop/revisit the team charter and clarify roles (e.g., RACI, working agreements)",
            "Wait for the team to self-organize over time",
            "Escalate to the sponsor for direction",
        ],
        answer: 1,
        explanation: "Clarify roles and working agreements early. Team charters and RACI-style clarity are common PMP correct answers.",
    },
    Template {
        topic: "Communication & Culture",
        text: "A distributed team reports misunderstandings due to cultural and language differences. What should the project manager do NEXT?",
        options: &[
            "Use only written communication to avoid confusion",
            "Tailor communications and establish shared norms, using interactive methods for complex topics",
            "Replace remote members with local staff",
            "Stop meetings to reduce conflict",
        ],
        answer: 1,
        explanation: "Tailor communication, use cultural awareness, and use interactive methods for complex or sensitive topics. Replacing people is rarely first.",
    },
    Template {
        topic: "Coaching & Performance",
        text: "A team member is underperforming because expectations were not clearly communicated. What should the project manager do FIRST?",
        options: &[
            "Document the issue and escalate to HR",
            "Clarify expectations, provide feedback, and coach the team member",
            "Remove the team member from the project immediately",
            "Ignore it to avoid conflict",
        ],
        answer: 1,
        explanation: "PMP prefers direct coaching and clear expectations first. Escalation or removal comes later if performance does not improve.",
    },
];

pub fn generate(n: usize, rng: &mut StdRng) -> Vec<Question> {
    (1..=n)
        .map(|seq| {
            let template = &TEMPLATES[rng.gen_range(0..TEMPLATES.len())];
            template.instantiate(Domain::People, seq, template.text.to_string())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn questions_are_used_verbatim() {
        let mut rng = StdRng::seed_from_u64(1);
        for q in generate(20, &mut rng) {
            assert!(TEMPLATES.iter().any(|t| t.text == q.question));
            assert!(q.id.starts_with("PE"));
        }
    }
}
