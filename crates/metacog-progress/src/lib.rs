//! metacog-progress
//!
//! Longitudinal analysis over already-loaded assessments: change between
//! administrations, trend classification, averages, monthly series and
//! population statistics.
//!
//! Every function here is pure and total. Inputs are explicit slices; none
//! of them touch storage or the clock, so "now" is always a parameter.
//! Lower questionnaire scores mean clinical improvement throughout.

pub mod history;
pub mod series;
pub mod statistics;
pub mod trend;
