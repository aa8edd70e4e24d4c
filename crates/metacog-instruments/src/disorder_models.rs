//! Reference metacognitive models per disorder (Fisher & Wells, 2009).
//!
//! Static data used to pre-fill a mapping: the model label, the typical
//! trigger, the metabeliefs clinicians usually probe for and how the CAS
//! tends to show up.

use metacog_core::models::mapping::MappingDraft;
use metacog_core::models::patient::Disorder;

/// Positive metabeliefs that recur across disorders.
pub const COMMON_POSITIVE_BELIEFS: &[&str] = &[
    "Worrying helps me solve problems",
    "Worrying keeps me prepared",
    "Worrying stops bad things from happening",
    "Ruminating helps me understand my feelings",
    "Ruminating about the past helps me avoid future mistakes",
    "Analysing my thoughts gives me control",
    "I need to monitor my thoughts constantly",
    "Focusing on threats keeps me safe",
    "Checking for danger protects me",
    "Controlling my thoughts is essential",
];

/// Negative metabeliefs that recur across disorders.
pub const COMMON_NEGATIVE_BELIEFS: &[&str] = &[
    "My worrying is uncontrollable",
    "My worrying is dangerous for me",
    "I cannot stop ruminating once I start",
    "Ruminating can make me lose control",
    "My thoughts can harm me",
    "I have no control over my thoughts",
    "Thinking certain things can make them happen",
    "My mind is failing",
    "I will go mad from my thoughts",
    "I cannot trust my memory",
];

#[derive(Debug, Clone, Copy)]
pub struct CasProfile {
    pub worry: &'static str,
    pub rumination: &'static str,
    pub threat_monitoring: &'static str,
    pub thought_suppression: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct DisorderModel {
    pub disorder: Disorder,
    pub label: &'static str,
    pub trigger: &'static str,
    pub positive_beliefs: &'static [&'static str],
    pub negative_beliefs: &'static [&'static str],
    pub cas: CasProfile,
}

impl DisorderModel {
    /// Positive beliefs specific to this model followed by the common ones,
    /// without repeats.
    pub fn suggested_positive_beliefs(&self) -> Vec<&'static str> {
        merge(self.positive_beliefs, COMMON_POSITIVE_BELIEFS)
    }

    pub fn suggested_negative_beliefs(&self) -> Vec<&'static str> {
        merge(self.negative_beliefs, COMMON_NEGATIVE_BELIEFS)
    }

    /// An empty mapping draft labelled with this model.
    pub fn draft(&self) -> MappingDraft {
        MappingDraft {
            model: self.label.to_string(),
            ..MappingDraft::default()
        }
    }
}

fn merge(first: &[&'static str], second: &[&'static str]) -> Vec<&'static str> {
    let mut merged: Vec<&'static str> = first.to_vec();
    for &belief in second {
        if !merged.contains(&belief) {
            merged.push(belief);
        }
    }
    merged
}

pub const DISORDER_MODELS: &[DisorderModel] = &[
    DisorderModel {
        disorder: Disorder::Gad,
        label: "GAD - Generalized Anxiety Disorder",
        trigger: "Intrusive thought about a future threat (\"What if something goes wrong?\")",
        positive_beliefs: &[
            "Worrying helps me cope",
            "Worrying keeps me prepared",
            "If I worry, I will not be caught off guard",
        ],
        negative_beliefs: &[
            "My worrying is uncontrollable",
            "Worrying could make me go mad",
            "Worrying will damage my health",
        ],
        cas: CasProfile {
            worry: "Chains of \"what if\" thinking about future catastrophes",
            rumination: "Going over past conversations for signs of danger",
            threat_monitoring: "Scanning for bodily signs of anxiety and for bad news",
            thought_suppression: "Trying to push worries away or seeking reassurance",
        },
    },
    DisorderModel {
        disorder: Disorder::Depression,
        label: "Depression",
        trigger: "Sad mood or a negative thought (\"Why do I feel like this?\")",
        positive_beliefs: &[
            "Ruminating helps me find answers",
            "Analysing my feelings will help me understand my depression",
        ],
        negative_beliefs: &[
            "Ruminating is uncontrollable",
            "Depression is a biological illness I cannot influence",
        ],
        cas: CasProfile {
            worry: "Worry about the consequences of being depressed",
            rumination: "Prolonged analysis of causes and meanings of low mood",
            threat_monitoring: "Monitoring mood and energy for signs of getting worse",
            thought_suppression: "Withdrawal, inactivity and avoiding reminders",
        },
    },
    DisorderModel {
        disorder: Disorder::Ocd,
        label: "OCD - Obsessive-Compulsive Disorder",
        trigger: "Intrusive thought, image or urge",
        positive_beliefs: &[
            "Performing rituals keeps me safe",
            "I must check to be certain",
        ],
        negative_beliefs: &[
            "Having this thought means it will happen",
            "Thinking it is as bad as doing it",
            "If I do not neutralise the thought, something bad will happen",
        ],
        cas: CasProfile {
            worry: "Worry about the meaning and consequences of intrusions",
            rumination: "Mentally reviewing actions to be sure nothing was missed",
            threat_monitoring: "Watching the mind for unwanted thoughts",
            thought_suppression: "Neutralising, rituals and thought suppression",
        },
    },
    DisorderModel {
        disorder: Disorder::Ptsd,
        label: "PTSD - Post-Traumatic Stress Disorder",
        trigger: "Intrusive memory or reminder of the trauma",
        positive_beliefs: &[
            "Going over the trauma helps me understand why it happened",
            "Staying alert keeps me safe",
        ],
        negative_beliefs: &[
            "My symptoms mean I am going mad",
            "I cannot control my memories",
        ],
        cas: CasProfile {
            worry: "Worry about the trauma happening again",
            rumination: "Repeatedly analysing what could have been done differently",
            threat_monitoring: "Hypervigilance to danger cues in the environment",
            thought_suppression: "Pushing memories away and avoiding reminders",
        },
    },
];

/// The reference model for `disorder`, when one exists.
pub fn model_for(disorder: Disorder) -> Option<&'static DisorderModel> {
    DISORDER_MODELS.iter().find(|m| m.disorder == disorder)
}

/// Model lookup by label, as stored on a mapping.
pub fn model_by_label(label: &str) -> Option<&'static DisorderModel> {
    DISORDER_MODELS.iter().find(|m| m.label == label)
}
