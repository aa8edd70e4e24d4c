pub mod assessment;
pub mod mapping;
pub mod patient;
pub mod therapist;
