#![warn(missing_docs)]
//! pqbench Analysis - Comparative Analyzer
//!
//! Batch-level computations over finalised `AlgorithmResult` rows:
//! - Per-family analysis with category breakdowns
//! - Classic vs post-quantum comparison
//! - Efficiency ranking (batch-relative, recomputed per call)
//! - Use-case recommendations and an executive summary
//!
//! Every grouped computation first checks that the groups it needs are
//! present and returns `AnalysisOutcome::InsufficientData` otherwise.

mod categories;
mod family;
mod outcome;
mod ranking;
mod recommendations;
mod summary;

pub use categories::{Category, CategoryRole, CategoryTable};
pub use family::{
    BandwidthComparison, CategoryInsight, FamilyAnalysis, FamilyComparison, GroupStatistics,
    NistStatus, PerformanceComparison, SizePick, TimePick, TradeOffs, analyze_family,
    compare_families, family_statistics,
};
pub use outcome::AnalysisOutcome;
pub use ranking::{
    BestPerformers, EfficiencyEntry, Performer, SpeedupEntry, best_performers, rank_efficiency,
    speedup_against,
};
pub use recommendations::{
    DataDriven, MigrationStrategy, Recommendation, Recommendations, UseCase,
    generate_recommendations,
};
pub use summary::executive_summary;
