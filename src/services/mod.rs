pub mod recommendations;
pub mod sources;

pub use recommendations::RecommendationService;
