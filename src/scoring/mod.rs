// Scoring: bio signals, feature extraction, and the weighted trust rules.
//
// Data flows leaf-first: bio text → BioSignals, profile → AccountFeatures,
// features → ScoreResult.

pub mod bio;
pub mod engine;
pub mod features;
