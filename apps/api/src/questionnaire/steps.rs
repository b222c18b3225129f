use serde::Serialize;

use crate::models::dimension::Dimension;

/// One questionnaire page. Steps are numbered from 1.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct QuestionStep {
    pub step: usize,
    pub dimension: Dimension,
    pub prompt: &'static str,
    pub progress: u8,
}

const PROMPTS: [(Dimension, &str); Dimension::COUNT] = [
    (
        Dimension::Analytical,
        "How much do you enjoy analytical thinking and problem-solving?",
    ),
    (
        Dimension::Creative,
        "How much do you enjoy creative and artistic activities?",
    ),
    (
        Dimension::Social,
        "How much do you enjoy working with and helping others?",
    ),
    (
        Dimension::Technical,
        "How comfortable are you with technical and hands-on work?",
    ),
];

pub const TOTAL_STEPS: usize = PROMPTS.len();

pub fn all_steps() -> Vec<QuestionStep> {
    (1..=TOTAL_STEPS).filter_map(step).collect()
}

/// Returns `None` for step numbers outside `1..=TOTAL_STEPS`.
pub fn step(number: usize) -> Option<QuestionStep> {
    let (dimension, prompt) = *PROMPTS.get(number.checked_sub(1)?)?;
    Some(QuestionStep {
        step: number,
        dimension,
        prompt,
        progress: (number * 100 / TOTAL_STEPS) as u8,
    })
}

pub fn step_for(dimension: Dimension) -> usize {
    dimension.index() + 1
}
