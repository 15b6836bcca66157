use database_layer::Row;
use error_common::codes::validation;
use tracing::{debug, info};
use uuid::Uuid;

use super::{search_records, CatalogContext};
use crate::constraints::BED_PRICE_CHECK;
use crate::error::{reject, require_text, CatalogResult};
use crate::models::{BedType, Department, HospitalBed};

#[derive(Clone)]
pub struct HospitalBedService {
    ctx: CatalogContext,
}

impl HospitalBedService {
    pub fn new(ctx: CatalogContext) -> Self {
        Self { ctx }
    }

    pub async fn create(&self, bed: HospitalBed) -> CatalogResult<HospitalBed> {
        self.save(bed, false)
            .await
            .inspect_err(|err| err.log("hospital_bed.create"))
    }

    pub async fn update(&self, bed: HospitalBed) -> CatalogResult<HospitalBed> {
        self.save(bed, true)
            .await
            .inspect_err(|err| err.log("hospital_bed.update"))
    }

    /// Delete a bed; HIS beds mapped to it become unmapped
    pub async fn delete(&self, id: Uuid) -> CatalogResult<HospitalBed> {
        let removed = self.ctx.beds.delete(id).await?;
        for mut bed in self.his_beds_of(id).await? {
            bed.bhyt_bed_id = None;
            self.ctx.beds.update(bed).await?;
        }
        info!(id = %id, code = %removed.code, "Hospital bed deleted");
        Ok(removed)
    }

    pub async fn get(&self, id: Uuid) -> CatalogResult<Option<HospitalBed>> {
        Ok(self.ctx.beds.get(id).await?)
    }

    /// All beds, BHYT beds first, each type ordered by code
    pub async fn list(&self) -> CatalogResult<Vec<HospitalBed>> {
        let mut beds = self.ctx.beds.list().await?;
        beds.sort_by(|a, b| {
            (a.bed_type.as_str(), &a.code).cmp(&(b.bed_type.as_str(), &b.code))
        });
        Ok(beds)
    }

    pub async fn list_by_type(&self, bed_type: BedType) -> CatalogResult<Vec<HospitalBed>> {
        let mut beds = self.list().await?;
        beds.retain(|bed| bed.bed_type == bed_type);
        Ok(beds)
    }

    pub async fn search(&self, term: &str) -> CatalogResult<Vec<HospitalBed>> {
        let found = search_records(self.list().await?, term, self.ctx.search_limit);
        debug!(term, count = found.len(), "Searched hospital beds");
        Ok(found)
    }

    /// HIS beds that point at `bhyt_bed_id`
    pub async fn his_beds_of(&self, bhyt_bed_id: Uuid) -> CatalogResult<Vec<HospitalBed>> {
        let mut beds = self
            .ctx
            .beds
            .find(&move |bed: &HospitalBed| bed.bhyt_bed_id == Some(bhyt_bed_id))
            .await?;
        beds.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(beds)
    }

    pub async fn mapping_count(&self, bhyt_bed_id: Uuid) -> CatalogResult<usize> {
        Ok(self.his_beds_of(bhyt_bed_id).await?.len())
    }

    async fn save(&self, bed: HospitalBed, existing: bool) -> CatalogResult<HospitalBed> {
        self.validate(&bed).await?;
        let saved = if existing {
            self.ctx.beds.update(bed).await?
        } else {
            self.ctx.beds.insert(bed).await?
        };
        info!(
            id = %saved.id,
            code = %saved.code,
            bed_type = saved.bed_type.as_str(),
            mapped = saved.bhyt_bed_id.is_some(),
            "Hospital bed saved"
        );
        Ok(saved)
    }

    async fn validate(&self, bed: &HospitalBed) -> CatalogResult<()> {
        require_text(HospitalBed::TABLE, "code", &bed.code, "Bed Code")?;
        require_text(HospitalBed::TABLE, "name", &bed.name, "Bed Name")?;

        if bed.price.is_nan() || bed.price < 0.0 {
            return Err(reject(validation::OUT_OF_RANGE, HospitalBed::TABLE, BED_PRICE_CHECK.message));
        }

        if let Some(department_id) = bed.department_id {
            if self.ctx.departments.get(department_id).await?.is_none() {
                return Err(reject(
                    validation::INVALID_REFERENCE,
                    Department::TABLE,
                    "Department does not exist!",
                ));
            }
        }

        if let Some(bhyt_bed_id) = bed.bhyt_bed_id {
            if bhyt_bed_id == bed.id {
                return Err(reject(
                    validation::INVALID_REFERENCE,
                    HospitalBed::TABLE,
                    "A bed cannot be mapped to itself!",
                ));
            }
            if self.ctx.beds.get(bhyt_bed_id).await?.is_none() {
                return Err(reject(
                    validation::INVALID_REFERENCE,
                    HospitalBed::TABLE,
                    "Corresponding BHYT bed does not exist!",
                ));
            }
        }
        Ok(())
    }
}
