pub mod mcq30;
pub mod nbrs;
pub mod pbrs;

use crate::scoring::QuestionnaireItem;

/// Agreement labels shared by the 4-point metacognition scales.
fn agreement_labels() -> Vec<String> {
    ["Do not agree", "Agree slightly", "Agree moderately", "Agree very much"]
        .iter()
        .map(|l| l.to_string())
        .collect()
}

/// Build items `<prefix>_1..=n` from texts, optionally tagged by subscale.
fn items(prefix: &str, texts: &[(&str, Option<&str>)]) -> Vec<QuestionnaireItem> {
    texts
        .iter()
        .enumerate()
        .map(|(i, (text, subscale))| QuestionnaireItem {
            id: format!("{prefix}_{}", i + 1),
            text: text.to_string(),
            subscale: subscale.map(str::to_string),
        })
        .collect()
}
