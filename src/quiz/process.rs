use rand::rngs::StdRng;
use rand::Rng;

use crate::quiz::bank::render;
use crate::quiz::{Domain, Question, Template};

const NAMES: [&str; 12] = [
    "Aisha", "Miguel", "Chen", "Priya", "Omar", "Sofia", "Liam", "Fatima", "Kenji", "Elena",
    "Ravi", "Noah",
];
const INDUSTRIES: [&str; 8] = [
    "healthcare",
    "fintech",
    "manufacturing",
    "telecom",
    "retail",
    "energy",
    "public sector",
    "education",
];
const APPROACHES: [&str; 3] = ["predictive", "agile", "hybrid"];
const PHASES: [&str; 7] = [
    "initiating",
    "planning",
    "execution",
    "monitoring and controlling",
    "closing",
    "an iteration",
    "a sprint review",
];
const SIZES: [&str; 4] = ["a small", "a major", "an urgent", "a late-breaking"];

pub const TEMPLATES: [Template; 10] = [
    Template {
        topic: "Integration / Change control",
        text: "{name} is managing a {approach} project in {industry}. A stakeholder requests {size} change during {phase} and asks to bypass the agreed change process. What should the project manager do FIRST?",
        options: &[
            "Approve the change to maintain stakeholder engagement",
            "Assess impacts and follow the agreed change control/governance approach",
            "Escalate to the sponsor immediately",
            "Update the schedule baseline and implement the change",
        ],
        answer: 1,
        explanation: "PMP expects: assess impact, then follow the governance/change approach. Escalation is not first unless required by policy or repeated noncompliance.",
    },
    Template {
        topic: "Scope / Requirements",
        text: "Deliverables are being produced, but key stakeholders say they do not meet expectations. What should the project manager do FIRST?",
        options: &[
            "Conduct a quality audit to identify nonconformities",
            "Review and confirm requirements and acceptance criteria with stakeholders",
            "Add additional testers to the team",
            "Escalate to the steering committee",
        ],
        answer: 1,
        explanation: "If stakeholders reject deliverables, first verify requirements and acceptance criteria (definition of done). Audits and resourcing come after confirming what's expected.",
    },
    Template {
        topic: "Quality",
        text: "The team finds the same defect pattern repeatedly even though inspections occur regularly. What should the project manager do NEXT?",
        options: &[
            "Increase inspection frequency",
            "Perform root cause analysis and implement preventive actions",
            "Ask the customer to accept the defects due to schedule pressure",
            "Replace the quality inspector",
        ],
        answer: 1,
        explanation: "Repeated defects indicate a systemic cause. PMP favors prevention over inspection: root cause analysis (5 Whys, fishbone), then preventive actions.",
    },
    Template {
        topic: "Schedule / Forecasting",
        text: "A key milestone is at risk because remaining work was underestimated. What should the project manager do FIRST?",
        options: &[
            "Require overtime to recover the schedule",
            "Re-estimate remaining work and update the schedule forecast",
            "Rebaseline the schedule immediately",
            "Remove low performers from the team",
        ],
        answer: 1,
        explanation: "First get accurate data and update the forecast. Rebaselining is a formal decision after analysis and approvals; overtime is an option after planning.",
    },
    Template {
        topic: "Risk vs Issue",
        text: "A supplier missed two deliveries and work is now blocked. What should the project manager do NEXT?",
        options: &[
            "Log it as a risk and monitor",
            "Record it as an issue and implement the issue response/escalation path",
            "Ignore it until the next status meeting",
            "Only update the lessons learned register",
        ],
        answer: 1,
        explanation: "A current blocking problem is an issue (not a risk). Capture it in the issue log and execute the agreed issue management/escalation process.",
    },
    Template {
        topic: "Communications Planning",
        text: "Stakeholders complain that updates are inconsistent and they do not know what decisions were made. What should the project manager do FIRST?",
        options: &[
            "Send daily status reports to all stakeholders",
            "Review communication requirements and update the communications management plan",
            "Escalate to the sponsor",
            "Replace the communications tool",
        ],
        answer: 1,
        explanation: "Plan communications based on stakeholder needs: what info, when, how, by whom. 'More reports' is a trap if requirements are unclear.",
    },
    Template {
        topic: "Procurement",
        text: "A vendor proposes a substitute that meets technical specs but changes contract terms. What should the project manager do NEXT?",
        options: &[
            "Accept the substitute to avoid delays",
            "Review the contract and follow the procurement/change control process",
            "Ask the team to decide and proceed immediately",
            "Pay extra to keep the schedule",
        ],
        answer: 1,
        explanation: "Contract changes must follow contractual and integrated change control. Review terms, approvals and impacts before accepting substitutions.",
    },
    Template {
        topic: "Agile/Hybrid Value Delivery",
        text: "In a(n) {approach} project, during {phase} a stakeholder says a delivered feature does not provide expected value. What should the project manager do NEXT?",
        options: &[
            "Submit a formal change request",
            "Facilitate backlog refinement and ask the product owner to reprioritize",
            "Reject the feedback because the iteration is complete",
            "Update the scope baseline",
        ],
        answer: 1,
        explanation: "Agile/hybrid exams prefer adapting through backlog refinement and reprioritization to maximize value. Formal change requests apply if governance requires it.",
    },
    Template {
        topic: "Cost / Variance",
        text: "Performance reports show cost variance is worsening. What should the project manager do FIRST?",
        options: &[
            "Reduce quality activities to save money",
            "Analyze variance causes and develop corrective actions",
            "Replace the cost engineer",
            "Stop reporting cost performance to avoid escalation",
        ],
        answer: 1,
        explanation: "First analyze causes of variance and plan corrective actions. Cutting quality is a classic PMP trap; personnel changes are rarely the first response.",
    },
    Template {
        topic: "Governance / Compliance",
        text: "Midway through the project, the organization introduces a new governance/compliance requirement. What should the project manager do FIRST?",
        options: &[
            "Stop the project immediately",
            "Assess impacts and determine required updates to plans and baselines",
            "Ignore until project closing",
            "Ask the team to work around it informally",
        ],
        answer: 1,
        explanation: "New governance/compliance constraints require impact assessment first, then updates through the agreed governance/change process.",
    },
];

fn pick<'a>(rng: &mut StdRng, values: &[&'a str]) -> &'a str {
    values[rng.gen_range(0..values.len())]
}

/// One binding per placeholder, always drawn in the same order.
fn draw_bindings(rng: &mut StdRng) -> [(&'static str, &'static str); 5] {
    [
        ("name", pick(rng, &NAMES)),
        ("industry", pick(rng, &INDUSTRIES)),
        ("approach", pick(rng, &APPROACHES)),
        ("phase", pick(rng, &PHASES)),
        ("size", pick(rng, &SIZES)),
    ]
}

pub fn generate(n: usize, rng: &mut StdRng) -> Vec<Question> {
    (1..=n)
        .map(|seq| {
            let template = &TEMPLATES[rng.gen_range(0..TEMPLATES.len())];
            // Drawn even for templates without placeholders, so every question
            // consumes the same number of values from the stream.
            let bindings = draw_bindings(rng);
            template.instantiate(Domain::Process, seq, render(template.text, &bindings))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn placeholders_are_all_resolved() {
        let mut rng = StdRng::seed_from_u64(3);
        for q in generate(60, &mut rng) {
            assert!(!q.question.contains('{'), "{}", q.question);
            assert!(!q.question.contains('}'), "{}", q.question);
        }
    }

    #[test]
    fn ids_follow_generation_order() {
        let mut rng = StdRng::seed_from_u64(11);
        let ids: Vec<_> = generate(3, &mut rng).into_iter().map(|q| q.id).collect();
        assert_eq!(ids, vec!["P001", "P002", "P003"]);
    }

    #[test]
    fn every_question_consumes_the_same_number_of_draws() {
        let mut a = StdRng::seed_from_u64(5);
        let mut b = StdRng::seed_from_u64(5);
        generate(4, &mut a);
        for _ in 0..4 {
            b.gen_range(0..TEMPLATES.len());
            draw_bindings(&mut b);
        }
        assert_eq!(a.gen::<u64>(), b.gen::<u64>());
    }
}
