use std::sync::Arc;

use config_engine::CatalogConfig;
use database_layer::{InMemoryRepository, Repository, SequenceDefinition, SequenceGenerator, SequenceRegistry};

use crate::clock::Clock;
use crate::models::{
    BenefitCode, Category, Department, HospitalBed, MedicalFacility, MedicalStaff, PaymentRate,
    ReferenceLevel,
};

/// Name of the sequence that numbers reference levels
pub const REFERENCE_LEVEL_SEQUENCE: &str = "hic.reference.level";

/// Storage handles and collaborators shared by every service
#[derive(Clone)]
pub struct CatalogContext {
    pub benefit_codes: Arc<dyn Repository<BenefitCode>>,
    pub categories: Arc<dyn Repository<Category>>,
    pub departments: Arc<dyn Repository<Department>>,
    pub staff: Arc<dyn Repository<MedicalStaff>>,
    pub beds: Arc<dyn Repository<HospitalBed>>,
    pub facilities: Arc<dyn Repository<MedicalFacility>>,
    pub payment_rates: Arc<dyn Repository<PaymentRate>>,
    pub reference_levels: Arc<dyn Repository<ReferenceLevel>>,
    pub sequences: Arc<dyn SequenceGenerator>,
    pub clock: Arc<dyn Clock>,
    /// Maximum number of records a search returns
    pub search_limit: usize,
}

impl CatalogContext {
    /// Context backed by in-memory tables
    pub fn in_memory(config: &CatalogConfig, clock: Arc<dyn Clock>) -> Self {
        let reference = &config.sequence.reference_level;
        let sequences = SequenceRegistry::new().with_sequence(
            SequenceDefinition::new(REFERENCE_LEVEL_SEQUENCE, reference.prefix.clone(), reference.padding)
                .starting_at(reference.start),
        );

        Self {
            benefit_codes: Arc::new(InMemoryRepository::new()),
            categories: Arc::new(InMemoryRepository::new()),
            departments: Arc::new(InMemoryRepository::new()),
            staff: Arc::new(InMemoryRepository::new()),
            beds: Arc::new(InMemoryRepository::new()),
            facilities: Arc::new(InMemoryRepository::new()),
            payment_rates: Arc::new(InMemoryRepository::new()),
            reference_levels: Arc::new(InMemoryRepository::new()),
            sequences: Arc::new(sequences),
            clock,
            search_limit: config.search.default_limit,
        }
    }
}
