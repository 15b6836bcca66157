use database_layer::Row;
use serde::Serialize;
use uuid::Uuid;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{BedType, CodedRecord, Department, HospitalBed};
use crate::services::{DepartmentService, HospitalBedService};

/// Counterpart records of one mapped record, as shown by "view mappings"
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MappingView<T> {
    pub title: String,
    pub source_id: Uuid,
    pub records: Vec<T>,
}

impl<T> MappingView<T> {
    pub fn count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// HIS departments of a BHYT department, or BHYT departments of a HIS department
pub async fn view_department_mappings(
    departments: &DepartmentService,
    id: Uuid,
) -> CatalogResult<MappingView<Department>> {
    let Some(department) = departments.get(id).await? else {
        return Err(CatalogError::NotFound {
            model: Department::TABLE,
            id,
        });
    };

    let (title, records) = if department.is_bhyt() {
        (
            format!("HIS departments of {}", department.display_name()),
            departments.mapped_his_departments(id).await?,
        )
    } else {
        (
            format!("BHYT departments of {}", department.display_name()),
            departments.bhyt_departments_for(id).await?,
        )
    };
    Ok(MappingView {
        title,
        source_id: id,
        records,
    })
}

/// HIS beds of a BHYT bed, or the BHYT bed a HIS bed maps to
pub async fn view_bed_mappings(beds: &HospitalBedService, id: Uuid) -> CatalogResult<MappingView<HospitalBed>> {
    let Some(bed) = beds.get(id).await? else {
        return Err(CatalogError::NotFound {
            model: HospitalBed::TABLE,
            id,
        });
    };

    let (title, records) = match bed.bed_type {
        BedType::Bhyt => (
            format!("HIS beds mapped to {}", bed.display_name()),
            beds.his_beds_of(id).await?,
        ),
        BedType::His => {
            let target = match bed.bhyt_bed_id {
                Some(bhyt_bed_id) => beds.get(bhyt_bed_id).await?,
                None => None,
            };
            (
                format!("BHYT bed of {}", bed.display_name()),
                target.into_iter().collect(),
            )
        }
    };
    Ok(MappingView {
        title,
        source_id: id,
        records,
    })
}
