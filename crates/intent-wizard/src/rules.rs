//! The category decision table.

use atelier_types::Category;

use crate::steps::{GENRES, RANDOM_MODEL};
use crate::types::{QuestionId, WizardAnswers};

/// Derive a model category from the answers recorded so far.
///
/// A priority-ordered decision table: rules are evaluated top to bottom and
/// the first match wins, so a higher rule's outcome never changes when a
/// lower-priority answer is edited. Unanswered questions simply never match.
/// Falls back to [`Category::Avatar`].
pub fn derive_category(answers: &WizardAnswers) -> Category {
    let use_case = answers.get(QuestionId::UseCase);
    let style = answers.get(QuestionId::Style);
    let genre = answers.get(QuestionId::Genre);
    let audience = answers.get(QuestionId::Audience);

    if use_case == Some(RANDOM_MODEL) {
        return Category::Avatar;
    }
    if matches!(style, Some("Voxel") | Some("Cartoon")) {
        return Category::Avatar;
    }
    if matches!(style, Some("Low Poly") | Some("Clay Motion")) {
        return Category::Animal;
    }
    if style == Some("High Poly") {
        return Category::Building;
    }
    if genre.is_some_and(|g| GENRES.contains(&g)) {
        return Category::Avatar;
    }
    if matches!(audience, Some("Kids") | Some("Family")) {
        return Category::Animal;
    }
    Category::Avatar
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answers(pairs: &[(QuestionId, &str)]) -> WizardAnswers {
        let mut a = WizardAnswers::default();
        for (q, v) in pairs {
            a.set(*q, *v);
        }
        a
    }

    #[test]
    fn style_drives_the_category() {
        assert_eq!(
            derive_category(&answers(&[(QuestionId::Style, "Cartoon")])),
            Category::Avatar
        );
        assert_eq!(
            derive_category(&answers(&[(QuestionId::Style, "Clay Motion")])),
            Category::Animal
        );
        assert_eq!(
            derive_category(&answers(&[(QuestionId::Style, "High Poly")])),
            Category::Building
        );
    }

    #[test]
    fn random_model_outranks_style() {
        let a = answers(&[
            (QuestionId::UseCase, RANDOM_MODEL),
            (QuestionId::Style, "High Poly"),
        ]);
        assert_eq!(derive_category(&a), Category::Avatar);
    }

    #[test]
    fn style_outranks_genre_and_audience() {
        let a = answers(&[
            (QuestionId::Style, "Low Poly"),
            (QuestionId::Genre, "Wild West"),
            (QuestionId::Audience, "Adults"),
        ]);
        assert_eq!(derive_category(&a), Category::Animal);
    }

    #[test]
    fn audience_rule_fires_only_without_higher_matches() {
        assert_eq!(
            derive_category(&answers(&[(QuestionId::Audience, "Kids")])),
            Category::Animal
        );
        let with_genre = answers(&[
            (QuestionId::Genre, "Eco Utopia"),
            (QuestionId::Audience, "Kids"),
        ]);
        assert_eq!(derive_category(&with_genre), Category::Avatar);
    }

    #[test]
    fn no_answers_falls_back_to_avatar() {
        assert_eq!(derive_category(&WizardAnswers::default()), Category::Avatar);
    }

    #[test]
    fn unknown_values_never_match() {
        let a = answers(&[
            (QuestionId::Genre, "Cooking Show"),
            (QuestionId::Audience, "Robots"),
        ]);
        assert_eq!(derive_category(&a), Category::Avatar);
    }
}
