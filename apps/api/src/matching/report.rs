//! Response-ready recommendation report built from ranked matches.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::matching::engine::{rank, MatchError, MatchResult};
use crate::matching::personality::{personality_type, PersonalityType};
use crate::models::dimension::{Dimension, DimensionMap};
use crate::models::major::Major;
use crate::models::profile::UserProfile;

/// Careers and skills shown per major on the results page.
pub const DISPLAY_LIST_LIMIT: usize = 3;

#[derive(Debug, Clone, Serialize)]
pub struct MatchView {
    pub name: String,
    pub description: String,
    pub match_percentage: u8,
    /// Closeness per dimension in `[0, 1]`; display only.
    pub dimension_matches: DimensionMap<f64>,
    pub careers: Vec<String>,
    pub skills: Vec<String>,
    /// Chart axis labels, aligned with both vectors.
    pub dimensions: [Dimension; Dimension::COUNT],
    pub user_vector: [f64; Dimension::COUNT],
    pub major_vector: [f64; Dimension::COUNT],
}

impl From<MatchResult<'_>> for MatchView {
    fn from(result: MatchResult<'_>) -> Self {
        let Major {
            name,
            description,
            careers,
            skills,
            ..
        } = result.major;
        MatchView {
            name: name.clone(),
            description: description.clone(),
            match_percentage: result.match_percentage,
            dimension_matches: result.dimension_matches,
            careers: careers.iter().take(DISPLAY_LIST_LIMIT).cloned().collect(),
            skills: skills.iter().take(DISPLAY_LIST_LIMIT).cloned().collect(),
            dimensions: Dimension::ALL,
            user_vector: result.user_vector,
            major_vector: result.major_vector,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Recommendations {
    pub profile: UserProfile,
    pub personality: PersonalityType,
    pub matches: Vec<MatchView>,
    pub generated_at: DateTime<Utc>,
}

/// Ranks `majors` for `profile` and packages the top `top_k` for display.
/// Either the whole report is produced or an error; never a partial list.
pub fn recommend(
    profile: &UserProfile,
    majors: &[Major],
    top_k: usize,
) -> Result<Recommendations, MatchError> {
    let matches = rank(profile, majors, top_k)?
        .into_iter()
        .map(MatchView::from)
        .collect();

    Ok(Recommendations {
        profile: *profile,
        personality: personality_type(profile),
        matches,
        generated_at: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questionnaire::builder::ProfileBuilder;

    fn sample_major() -> Major {
        Major {
            name: "Computer Science".to_string(),
            description: "Software".to_string(),
            careers: ["A", "B", "C", "D", "E"].map(String::from).to_vec(),
            skills: vec!["Programming".to_string()],
            weights: DimensionMap::from_fn(|d| [0.9, 0.2, 0.4, 0.8][d.index()]),
        }
    }

    fn sample_profile() -> UserProfile {
        let mut b = ProfileBuilder::new();
        for (d, v) in Dimension::ALL.into_iter().zip([8.0, 3.0, 5.0, 9.0]) {
            b.record_answer(d, v).unwrap();
        }
        b.finalize().unwrap()
    }

    #[test]
    fn test_view_truncates_display_lists() {
        let report = recommend(&sample_profile(), &[sample_major()], 3).unwrap();
        let view = &report.matches[0];
        assert_eq!(view.careers, vec!["A", "B", "C"]);
        assert_eq!(view.skills, vec!["Programming"]);
        assert_eq!(view.match_percentage, 90);
    }

    #[test]
    fn test_report_includes_personality_and_profile() {
        let report = recommend(&sample_profile(), &[sample_major()], 1).unwrap();
        assert_eq!(report.personality.code, "ESTP");
        assert_eq!(report.profile.score(Dimension::Technical), 9.0);
    }

    #[test]
    fn test_view_serializes_chart_fields() {
        let report = recommend(&sample_profile(), &[sample_major()], 1).unwrap();
        let json = serde_json::to_value(&report.matches[0]).unwrap();
        assert_eq!(
            json["dimensions"],
            serde_json::json!(["analytical", "creative", "social", "technical"])
        );
        assert_eq!(json["user_vector"], serde_json::json!([8.0, 3.0, 5.0, 9.0]));
        for d in Dimension::ALL {
            let term = json["dimension_matches"][d.as_str()].as_f64().unwrap();
            assert!((term - 0.9).abs() < 1e-9, "{d}: {term}");
        }
    }

    #[test]
    fn test_empty_catalog_produces_no_report() {
        assert_eq!(
            recommend(&sample_profile(), &[], 3).unwrap_err(),
            MatchError::EmptyCatalog
        );
    }
}
