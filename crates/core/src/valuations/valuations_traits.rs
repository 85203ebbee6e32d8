use super::valuations_model::{CalculatedMetrics, TestCalculation, ValuationInput, ValuationResult};
use crate::errors::Result;
use async_trait::async_trait;

/// Trait for valuation result storage. Results are insert-only.
#[async_trait]
pub trait ValuationRepositoryTrait: Send + Sync {
    async fn save_result(&self, result: ValuationResult) -> Result<ValuationResult>;
    /// Most recently created result for the exact company name.
    fn find_latest_by_company(&self, company_name: &str) -> Result<Option<ValuationResult>>;
}

/// Trait for valuation service operations
#[async_trait]
pub trait ValuationServiceTrait: Send + Sync {
    fn calculate_metrics(&self, input: &ValuationInput) -> Result<CalculatedMetrics>;
    async fn create_valuation(&self, input: ValuationInput) -> Result<ValuationResult>;
    fn get_valuation(&self, company_name: &str) -> Result<Option<ValuationResult>>;
    fn run_test_calculation(&self) -> Result<TestCalculation>;
}
