use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::quiz::{business, people, process, Question};

/// Size of the bank a session draws its working set from.
pub const BANK_SIZE: usize = 200;

/// How many questions each domain gets: half Process, 40% People and the
/// remainder Business Environment. The three always sum to `total`.
pub fn domain_split(total: usize) -> (usize, usize, usize) {
    let n_process = total / 2;
    let n_people = total * 4 / 10;
    let n_business = total - n_process - n_people;
    (n_process, n_people, n_business)
}

/// Replaces every `{key}` in `template` with its bound value. Unknown
/// placeholders are left untouched.
pub fn render(template: &str, bindings: &[(&str, &str)]) -> String {
    bindings
        .iter()
        .fold(template.to_string(), |text, (key, value)| {
            text.replace(&format!("{{{}}}", key), value)
        })
}

/// Builds the full question bank for `seed`.
///
/// A single stream feeds Process, People and Business generation in that
/// order and then shuffles the concatenation, so the result is a pure function
/// of `(total, seed)`.
pub fn generate_bank(total: usize, seed: u64) -> Vec<Question> {
    let mut rng = StdRng::seed_from_u64(seed);
    let (n_process, n_people, n_business) = domain_split(total);
    log::debug!(
        "Generating bank of {} questions (seed {}): {} process, {} people, {} business",
        total,
        seed,
        n_process,
        n_people,
        n_business
    );

    let mut questions = process::generate(n_process, &mut rng);
    questions.extend(people::generate(n_people, &mut rng));
    questions.extend(business::generate(n_business, &mut rng));

    questions.shuffle(&mut rng);
    questions
}
