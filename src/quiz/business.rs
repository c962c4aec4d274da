use rand::rngs::StdRng;
use rand::Rng;

use crate::quiz::{Domain, Question, Template};

pub const TEMPLATES: [Template; 4] = [
    Template {
        topic: "Compliance / Regulatory",
        text: "Mid-project, a new regulatory requirement is announced that may affect the product design. What should the project manager do FIRST?",
        options: &[
            "Ignore it until the next phase to avoid delays",
            "Assess the impact and determine required changes to remain compliant",
            "Ask the team to implement changes immediately without analysis",
            "Close the project early",
        ],
        answer: 1,
        explanation: "Compliance is non-negotiable. First assess impacts, then follow governance/change control to implement required changes.",
    },
    Template {
        topic: "Business Value / Benefits",
        text: "Deliverables are being completed on schedule, but expected business benefits are not being realized. What should the project manager do NEXT?",
        options: &[
            "Continue focusing only on completing deliverables",
            "Review the benefits management plan and engage stakeholders to realign to outcomes",
            "Increase reporting frequency",
            "Reduce scope to finish earlier",
        ],
        answer: 1,
        explanation: "PMP emphasizes value delivery: verify benefits realization and realign via governance. Outputs are not outcomes, a core exam theme.",
    },
    Template {
        topic: "Strategy Alignment",
        text: "A project supports a strategic objective, but market conditions changed and the objective may no longer be valid. What should the project manager do FIRST?",
        options: &[
            "Hide the information to prevent cancellation",
            "Raise the concern through governance and request a business case/strategy review",
            "Push the team to deliver faster to prove value",
            "Reduce quality to meet deadlines",
        ],
        answer: 1,
        explanation: "When strategy shifts, the PM should surface it through governance so leadership can decide to continue, pivot, pause, or terminate.",
    },
    Template {
        topic: "Governance / Policy",
        text: "The sponsor requests a feature that conflicts with an organizational policy. What should the project manager do?",
        options: &[
            "Implement the feature because the sponsor requested it",
            "Explain the constraint, assess options, and follow governance for a compliant decision",
            "Ask the team to implement it quietly",
            "Remove the policy from project documentation",
        ],
        answer: 1,
        explanation: "Policy/compliance constraints must be respected. Communicate constraints, assess alternatives, and use governance for approvals.",
    },
];

pub fn generate(n: usize, rng: &mut StdRng) -> Vec<Question> {
    (1..=n)
        .map(|seq| {
            let template = &TEMPLATES[rng.gen_range(0..TEMPLATES.len())];
            template.instantiate(Domain::BusinessEnvironment, seq, template.text.to_string())
        })
        .collect()
}
