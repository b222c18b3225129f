//! Four-letter personality code derived from a finalized profile.
//! Informational only; it does not feed into match percentages.

use serde::Serialize;

use crate::models::dimension::Dimension;
use crate::models::profile::UserProfile;

const LETTER_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AxisScores {
    pub ei: f64,
    pub sn: f64,
    pub tf: f64,
    pub jp: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonalityType {
    pub code: String,
    pub scores: AxisScores,
}

pub fn personality_type(profile: &UserProfile) -> PersonalityType {
    let analytical = profile.score(Dimension::Analytical);
    let creative = profile.score(Dimension::Creative);
    let social = profile.score(Dimension::Social);
    let technical = profile.score(Dimension::Technical);

    let scores = AxisScores {
        ei: social / 10.0,
        sn: creative / 10.0,
        tf: (analytical + technical) / 20.0,
        jp: (technical + creative) / 20.0,
    };

    let letter = |value: f64, high: char, low: char| {
        if value >= LETTER_THRESHOLD {
            high
        } else {
            low
        }
    };

    let code = [
        letter(scores.ei, 'E', 'I'),
        letter(scores.sn, 'N', 'S'),
        letter(scores.tf, 'T', 'F'),
        letter(scores.jp, 'P', 'J'),
    ]
    .iter()
    .collect();

    PersonalityType { code, scores }
}
