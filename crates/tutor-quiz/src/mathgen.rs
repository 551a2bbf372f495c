//! Procedural Math Questions
//!
//! Synthesizes a multiple-choice arithmetic, geometry, or percentage
//! question from a 32-bit seed. Operands come from modulo arithmetic on the
//! seed; the three distractors are deliberate near-misses (off-by-one
//! operand, perimeter-for-area, decimal slips). Presentation order is
//! shuffled with the caller's RNG, and the correct index is located by an
//! index tag, never by value equality, so colliding option values cannot
//! make grading ambiguous.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::model::{Question, Subject};

/// Generate a math question from a seed.
///
/// `seed % 3` picks the sub-type. The RNG only shuffles presentation
/// order; every option value is a pure function of the seed.
pub fn generate<R: Rng + ?Sized>(seed: u32, rng: &mut R) -> Question {
    match seed % 3 {
        0 => arithmetic(seed, rng),
        1 => geometry(seed, rng),
        _ => percentage(seed, rng),
    }
}

/// (a × b) + c with single-digit factors
fn arithmetic<R: Rng + ?Sized>(seed: u32, rng: &mut R) -> Question {
    let a = i64::from(2 + seed % 8);
    let b = i64::from(2 + (seed / 8) % 8);
    let c = i64::from(1 + (seed / 64) % 20);
    let answer = a * b + c;

    // Off-by-one-operand misses, plus the added-instead-of-multiplied slip.
    let distractors = [(a + 1) * b + c, a * (b + 1) + c, a + b + c];
    let (options, correct_index) = build_options(answer, distractors, rng);

    Question {
        id: format!("math-arith-{seed}"),
        text: format!("What is ({a} × {b}) + {c}?"),
        options,
        correct_index,
        hint: "Multiply the first two numbers, then add the third.".into(),
        fun_fact: format!(
            "Multiplication is repeated addition: {a} × {b} is {a} added to itself {b} times."
        ),
        subject: Subject::Math,
    }
}

/// Rectangle area with the classic perimeter confusion as a distractor
fn geometry<R: Rng + ?Sized>(seed: u32, rng: &mut R) -> Question {
    let w = i64::from(3 + seed % 10);
    let h = i64::from(4 + (seed / 10) % 10);
    let answer = w * h;

    let distractors = [2 * (w + h), (w + 1) * h, w * (h + 1)];
    let (options, correct_index) = build_options(answer, distractors, rng);

    Question {
        id: format!("math-geom-{seed}"),
        text: format!(
            "A rectangle is {w} cm wide and {h} cm tall. What is its area in square centimeters?"
        ),
        options,
        correct_index,
        hint: "Area of a rectangle is width times height.".into(),
        fun_fact: "Doubling both sides of a rectangle makes the area four times bigger, not twice."
            .into(),
        subject: Subject::Math,
    }
}

/// Percentage of a whole, kept to integer answers
fn percentage<R: Rng + ?Sized>(seed: u32, rng: &mut R) -> Question {
    const PERCENTS: [i64; 4] = [10, 20, 25, 50];

    let percent = PERCENTS[((seed / 4) % 4) as usize];
    let whole = i64::from(20 * (1 + seed % 10));
    let answer = whole * percent / 100;

    // Decimal slip (×10), the complement, and a doubling slip.
    let distractors = [whole * percent / 10, whole - answer, answer * 2];
    let (options, correct_index) = build_options(answer, distractors, rng);

    Question {
        id: format!("math-pct-{seed}"),
        text: format!("What is {percent}% of {whole}?"),
        options,
        correct_index,
        hint: format!("{percent}% means {percent} out of every 100."),
        fun_fact: "50% of a number is the same as dividing it by 2.".into(),
        subject: Subject::Math,
    }
}

/// Assemble four pairwise-distinct options and locate the correct index.
///
/// Distractors that collide with the answer or each other are dropped and
/// replaced by offsetting from the answer until four distinct values exist.
/// The correct value is tagged by index before the shuffle, so duplicate
/// display strings can never misreport `correct_index`.
fn build_options<R: Rng + ?Sized>(
    answer: i64,
    distractors: [i64; 3],
    rng: &mut R,
) -> ([String; 4], usize) {
    let mut values = vec![answer];
    for d in distractors {
        if !values.contains(&d) {
            values.push(d);
        }
    }
    let mut bump = 1;
    while values.len() < 4 {
        let candidate = answer + bump;
        if !values.contains(&candidate) {
            values.push(candidate);
        }
        bump += 1;
    }

    let mut tagged: Vec<(usize, i64)> = values.into_iter().enumerate().collect();
    tagged.shuffle(rng);

    let correct_index = tagged
        .iter()
        .position(|(tag, _)| *tag == 0)
        .unwrap_or_default();

    let mut options: [String; 4] = Default::default();
    for (slot, (_, value)) in tagged.into_iter().enumerate().take(4) {
        options[slot] = value.to_string();
    }

    (options, correct_index)
}
