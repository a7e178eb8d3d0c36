//! Month lifecycle operations over the repositories.

mod monthly_evaluation;

pub use monthly_evaluation::{BatchFailure, BatchOutcome, MonthlyEvaluationService};
