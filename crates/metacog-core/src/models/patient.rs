use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Patient {
    pub id: Uuid,
    pub name: String,
    pub date_of_birth: jiff::civil::Date,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disorder: Option<Disorder>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub archived: bool,
    pub created_at: jiff::Timestamp,
    pub updated_at: jiff::Timestamp,
}

impl Patient {
    pub fn new(name: impl Into<String>, date_of_birth: jiff::civil::Date, now: jiff::Timestamp) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into().trim().to_string(),
            date_of_birth,
            gender: None,
            disorder: None,
            phone: None,
            email: None,
            notes: None,
            archived: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Age in whole years on `today`.
    pub fn age_on(&self, today: jiff::civil::Date) -> i16 {
        let dob = self.date_of_birth;
        let mut age = today.year() - dob.year();
        if (today.month(), today.day()) < (dob.month(), dob.day()) {
            age -= 1;
        }
        age
    }

    /// Up to two uppercase initials, for list avatars.
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .flat_map(char::to_uppercase)
            .take(2)
            .collect()
    }
}

/// Stored in snake_case; only these six spellings deserialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Disorder {
    Gad,
    Depression,
    Ocd,
    Ptsd,
    Other,
    Unspecified,
}

impl Disorder {
    pub fn label(&self) -> &'static str {
        match self {
            Disorder::Gad => "Generalized Anxiety Disorder",
            Disorder::Depression => "Depression",
            Disorder::Ocd => "Obsessive-Compulsive Disorder",
            Disorder::Ptsd => "Post-Traumatic Stress Disorder",
            Disorder::Other => "Other",
            Disorder::Unspecified => "Unspecified",
        }
    }

    /// Whether a dedicated metacognitive model exists for this disorder.
    pub fn has_model(&self) -> bool {
        !matches!(self, Disorder::Other | Disorder::Unspecified)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Gender {
    Male,
    Female,
    Other,
    Undisclosed,
}
