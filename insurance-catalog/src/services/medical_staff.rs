use database_layer::Row;
use logger_redacted::redacted_info;
use tracing::{debug, info};
use uuid::Uuid;

use super::category::require_category;
use super::CatalogContext;
use crate::error::{require_text, CatalogResult};
use crate::models::{contains_ignore_case, CategoryType, MedicalStaff};
use crate::validation::{validate_certificate_date, validate_insurance_number};

#[derive(Clone)]
pub struct MedicalStaffService {
    ctx: CatalogContext,
}

impl MedicalStaffService {
    pub fn new(ctx: CatalogContext) -> Self {
        Self { ctx }
    }

    pub async fn create(&self, staff: MedicalStaff) -> CatalogResult<MedicalStaff> {
        self.save(staff, false)
            .await
            .inspect_err(|err| err.log("medical_staff.create"))
    }

    pub async fn update(&self, staff: MedicalStaff) -> CatalogResult<MedicalStaff> {
        self.save(staff, true)
            .await
            .inspect_err(|err| err.log("medical_staff.update"))
    }

    pub async fn delete(&self, id: Uuid) -> CatalogResult<MedicalStaff> {
        let removed = self.ctx.staff.delete(id).await?;
        info!(id = %id, his_code = %removed.his_code, "Medical staff deleted");
        Ok(removed)
    }

    pub async fn get(&self, id: Uuid) -> CatalogResult<Option<MedicalStaff>> {
        Ok(self.ctx.staff.get(id).await?)
    }

    /// All staff ordered by name
    pub async fn list(&self) -> CatalogResult<Vec<MedicalStaff>> {
        let mut staff = self.ctx.staff.list().await?;
        staff.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(staff)
    }

    /// Staff whose name or HIS code contains `term`
    pub async fn search(&self, term: &str) -> CatalogResult<Vec<MedicalStaff>> {
        let term = term.trim();
        let found: Vec<MedicalStaff> = self
            .list()
            .await?
            .into_iter()
            .filter(|member| {
                term.is_empty()
                    || contains_ignore_case(&member.name, term)
                    || contains_ignore_case(&member.his_code, term)
            })
            .take(self.ctx.search_limit)
            .collect();
        debug!(count = found.len(), "Searched medical staff");
        Ok(found)
    }

    async fn save(&self, mut staff: MedicalStaff, existing: bool) -> CatalogResult<MedicalStaff> {
        normalize(&mut staff);
        self.validate(&staff).await?;

        let saved = if existing {
            self.ctx.staff.update(staff).await?
        } else {
            self.ctx.staff.insert(staff).await?
        };
        redacted_info!(
            "Medical staff {} saved (BHYT code {}, certificate {})",
            saved.his_code,
            saved.bhyt_code.as_deref().unwrap_or("-"),
            saved.certificate_code.as_deref().map_or("-", |_| "on file"),
        );
        Ok(saved)
    }

    async fn validate(&self, staff: &MedicalStaff) -> CatalogResult<()> {
        require_text(MedicalStaff::TABLE, "his_code", &staff.his_code, "HIS Code")?;
        require_text(MedicalStaff::TABLE, "name", &staff.name, "Name")?;

        if let Some(bhyt_code) = &staff.bhyt_code {
            validate_insurance_number(bhyt_code)?;
        }
        if let Some(issued_on) = staff.certificate_date {
            validate_certificate_date(issued_on, self.ctx.clock.today())?;
        }
        if let Some(title_id) = staff.title_id {
            require_category(
                &self.ctx,
                title_id,
                CategoryType::ProfessionalTitle,
                MedicalStaff::TABLE,
                "Professional title",
            )
            .await?;
        }
        if let Some(service_id) = staff.service_id {
            require_category(
                &self.ctx,
                service_id,
                CategoryType::MedicalServiceCode,
                MedicalStaff::TABLE,
                "Medical service code",
            )
            .await?;
        }
        Ok(())
    }
}

/// Blank optional codes are stored as NULL so they never collide
fn normalize(staff: &mut MedicalStaff) {
    for field in [&mut staff.bhyt_code, &mut staff.certificate_code, &mut staff.certificate_place] {
        if field.as_deref().is_some_and(|value| value.trim().is_empty()) {
            *field = None;
        }
    }
}
