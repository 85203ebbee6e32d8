//! Valuations module - the calculation pipeline, its models, services and traits.

pub mod valuations_calculator;
mod valuations_model;
mod valuations_service;
mod valuations_traits;

pub use valuations_model::{
    CalculatedMetrics, EvBand, EvBasis, GrowthRatios, HistoricalAverages, MultipleFactors,
    TestCalculation, ValuationInput, ValuationResult,
};
pub use valuations_service::ValuationService;
pub use valuations_traits::{ValuationRepositoryTrait, ValuationServiceTrait};
