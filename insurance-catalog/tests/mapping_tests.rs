//! BHYT ↔ HIS mappings: departments, the department wizard, the demo sync,
//! and hospital beds

use config_engine::{CatalogConfig, HisDepartmentEntry, HisSyncConfig};
use error_common::codes::validation;
use insurance_catalog::*;

async fn his_departments(catalog: &InsuranceCatalog, entries: &[(&str, &str)]) -> Vec<Department> {
    let mut created = Vec::new();
    for (code, name) in entries {
        created.push(catalog.departments.create(Department::his(*code, *name)).await.unwrap());
    }
    created
}

// ============================================================================
// Departments
// ============================================================================

#[tokio::test]
async fn test_bhyt_department_creation_defaults() {
    let catalog = InsuranceCatalog::in_memory_default();

    let mut department = Department::new("Khoa Nội");
    department.department_source = DepartmentSource::Bhyt;
    department.bhyt_code = Some("K03".to_string());
    let created = catalog.departments.create(department).await.unwrap();
    assert!(created.patient_department);
    assert_eq!(created.bhyt_name.as_deref(), Some("Khoa Nội"));

    // Name taken from the BHYT name when blank
    let mut department = DepartmentService::default_bhyt_department();
    department.bhyt_code = Some("K04".to_string());
    department.bhyt_name = Some("Khoa Ngoại".to_string());
    let created = catalog.departments.create(department).await.unwrap();
    assert_eq!(created.name, "Khoa Ngoại");
    assert_eq!(created.display_name(), "🏥 [K04] Khoa Ngoại");
}

#[tokio::test]
async fn test_duplicate_bhyt_department_code_is_rejected() {
    let catalog = InsuranceCatalog::in_memory_default();
    catalog.departments.create(Department::bhyt("K01", "Khoa Khám bệnh")).await.unwrap();

    let err = catalog
        .departments
        .create(Department::bhyt("K01", "Khoa khác"))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "BHYT department code 'K01' already exists!");
    assert_eq!(err.as_validation().unwrap().code, validation::DUPLICATE_CODE);
}

#[tokio::test]
async fn test_department_code_length_and_store_uniqueness() {
    let catalog = InsuranceCatalog::in_memory_default();
    let err = catalog
        .departments
        .create(Department::his("KHOA-NOI-TONG-HOP", "Nội"))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "HIS Code must not exceed 10 characters!");

    catalog.departments.create(Department::his("NOI", "Nội")).await.unwrap();
    let err = catalog.departments.create(Department::his("NOI", "Nội 2")).await.unwrap_err();
    assert_eq!(err.to_string(), "HIS department code must be unique!");
}

#[test]
fn test_bhyt_name_edit_updates_name() {
    let mut department = DepartmentService::default_bhyt_department();
    DepartmentService::apply_bhyt_name(&mut department, "Khoa Nhi");
    assert_eq!(department.name, "Khoa Nhi");

    let mut his = Department::his("NHI", "Nhi");
    DepartmentService::apply_bhyt_name(&mut his, "Khoa Nhi");
    assert_eq!(his.name, "Nhi");
}

#[tokio::test]
async fn test_department_mappings_and_counts() {
    let catalog = InsuranceCatalog::in_memory_default();
    let his = his_departments(&catalog, &[("KB1", "Phòng khám 1"), ("KB2", "Phòng khám 2")]).await;
    let bhyt = catalog.departments.create(Department::bhyt("K01", "Khoa Khám bệnh")).await.unwrap();

    let bhyt = catalog
        .departments
        .set_mappings(bhyt.id, his.iter().map(|department| department.id))
        .await
        .unwrap();
    assert_eq!(bhyt.mapping_count(), 2);
    assert_eq!(catalog.departments.mapping_count(bhyt.id).await.unwrap(), 2);

    let view = view_department_mappings(&catalog.departments, bhyt.id).await.unwrap();
    assert_eq!(view.count(), 2);
    assert_eq!(view.title, "HIS departments of 🏥 [K01] Khoa Khám bệnh");

    let inverse = view_department_mappings(&catalog.departments, his[0].id).await.unwrap();
    assert_eq!(inverse.records.len(), 1);
    assert_eq!(inverse.records[0].id, bhyt.id);

    // Deleting a HIS department drops it from the mapping
    catalog.departments.delete(his[0].id).await.unwrap();
    assert_eq!(catalog.departments.mapping_count(bhyt.id).await.unwrap(), 1);
}

#[tokio::test]
async fn test_mapping_to_missing_department_is_rejected() {
    let catalog = InsuranceCatalog::in_memory_default();
    let department = Department::bhyt("K01", "Khoa Khám bệnh").with_his_departments([uuid::Uuid::new_v4()]);
    let err = catalog.departments.create(department).await.unwrap_err();
    assert_eq!(err.as_validation().unwrap().code, validation::INVALID_REFERENCE);
}

#[tokio::test]
async fn test_department_search() {
    let catalog = InsuranceCatalog::in_memory_default();
    his_departments(&catalog, &[("NOI", "Khoa Nội"), ("NGOAI", "Khoa Ngoại")]).await;
    catalog.departments.create(Department::bhyt("K05", "Khoa Phụ sản")).await.unwrap();

    assert_eq!(catalog.departments.search("khoa").await.unwrap().len(), 3);
    assert_eq!(catalog.departments.search("ngoai").await.unwrap().len(), 1);
    assert_eq!(catalog.departments.search("k05").await.unwrap().len(), 1);
    assert_eq!(catalog.departments.search("").await.unwrap().len(), 3);
}

// ============================================================================
// Department wizard
// ============================================================================

#[tokio::test]
async fn test_wizard_creates_mapped_bhyt_department() {
    let catalog = InsuranceCatalog::in_memory_default();
    let his = his_departments(&catalog, &[("HSCC1", "Cấp cứu A"), ("HSCC2", "Cấp cứu B")]).await;

    let wizard = DepartmentWizard::new("K02", "Khoa Hồi sức cấp cứu")
        .with_his_departments(his.iter().map(|department| department.id));
    let outcome = wizard.run(&catalog.departments).await;

    assert_eq!(outcome.notification.kind, NotificationKind::Success);
    assert_eq!(outcome.notification.title, "Created successfully");
    assert_eq!(
        outcome.notification.message,
        "Created BHYT department [K02] Khoa Hồi sức cấp cứu\nMapped to 2 HIS departments: Cấp cứu A, Cấp cứu B"
    );

    let department = outcome.department.unwrap();
    assert!(department.is_bhyt());
    assert!(department.patient_department);
    assert_eq!(department.mapping_count(), 2);
}

#[tokio::test]
async fn test_wizard_reports_duplicate_code_as_danger() {
    let catalog = InsuranceCatalog::in_memory_default();
    catalog.departments.create(Department::bhyt("K02", "Khoa Hồi sức")).await.unwrap();

    let wizard = DepartmentWizard::new("K02", "Khoa khác");
    let err = wizard.validate(&catalog.departments).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "BHYT department code 'K02' already exists!\nPlease use a different code."
    );

    let outcome = wizard.run(&catalog.departments).await;
    assert_eq!(outcome.notification.kind, NotificationKind::Danger);
    assert!(outcome.department.is_none());
    assert_eq!(catalog.departments.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_wizard_requires_code_and_name() {
    let catalog = InsuranceCatalog::in_memory_default();
    let err = DepartmentWizard::new("", "Khoa").validate(&catalog.departments).await.unwrap_err();
    assert_eq!(err.as_validation().unwrap().code, validation::REQUIRED_FIELD);
}

// ============================================================================
// Demo HIS sync
// ============================================================================

#[tokio::test]
async fn test_demo_sync_is_idempotent() {
    let catalog = InsuranceCatalog::in_memory_default();
    let expected = CatalogConfig::default().his_sync.departments.len();

    let first = sync_departments(&catalog.departments, &DemoHisSource::from_config(&catalog.his_sync))
        .await
        .unwrap();
    assert_eq!(first.created, expected);
    assert_eq!(first.updated, 0);

    let second = sync_departments(&catalog.departments, &DemoHisSource::from_config(&catalog.his_sync))
        .await
        .unwrap();
    assert_eq!(second, SyncSummary { created: 0, updated: 0, unchanged: expected, failed: Vec::new() });
    assert_eq!(second.notification().kind, NotificationKind::Info);

    assert_eq!(
        catalog.departments.list_by_source(DepartmentSource::His).await.unwrap().len(),
        expected
    );
}

#[tokio::test]
async fn test_demo_sync_renames_by_his_code() {
    let catalog = InsuranceCatalog::in_memory_default();
    catalog.departments.create(Department::his("K01", "Tên cũ")).await.unwrap();

    let source = DemoHisSource::from_config(&HisSyncConfig {
        departments: vec![
            HisDepartmentEntry::new("K01", "Khoa Khám bệnh"),
            HisDepartmentEntry::new("K09", "Khoa Dược"),
        ],
    });
    let summary = sync_departments(&catalog.departments, &source).await.unwrap();
    assert_eq!(summary, SyncSummary { created: 1, updated: 1, unchanged: 0, failed: Vec::new() });

    let notification = summary.notification();
    assert_eq!(notification.kind, NotificationKind::Success);
    assert!(notification.message.contains("Created 1 and updated 1"));

    let names: Vec<String> = catalog
        .departments
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|department| department.name)
        .collect();
    assert_eq!(names, ["Khoa Dược", "Khoa Khám bệnh"]);
}

#[tokio::test]
async fn test_demo_sync_reports_rejected_entries_and_keeps_the_rest() {
    let catalog = InsuranceCatalog::in_memory_default();
    let mut bhyt = Department::bhyt("B01", "Khoa Khám bệnh BHYT");
    bhyt.his_code = Some("K01".to_string());
    catalog.departments.create(bhyt).await.unwrap();

    let source = DemoHisSource::from_config(&HisSyncConfig {
        departments: vec![
            HisDepartmentEntry::new("K01", "Khoa Khám bệnh"),
            HisDepartmentEntry::new("K09", "Khoa Dược"),
        ],
    });
    let summary = sync_departments(&catalog.departments, &source).await.unwrap();
    assert_eq!(summary.created, 1);
    assert_eq!(summary.failed.len(), 1);
    assert_eq!(summary.failed[0].his_code, "K01");

    let notification = summary.notification();
    assert_eq!(notification.kind, NotificationKind::Warning);
    assert!(notification.sticky);
    assert!(notification.message.contains("1 HIS departments were skipped"));

    let his = catalog.departments.list_by_source(DepartmentSource::His).await.unwrap();
    assert_eq!(his.len(), 1);
    assert_eq!(his[0].his_code.as_deref(), Some("K09"));
}

#[tokio::test]
async fn test_catalog_sync_action_returns_notification() {
    let catalog = InsuranceCatalog::in_memory_default();
    let notification = catalog.sync_from_his().await.unwrap();
    assert_eq!(notification.kind, NotificationKind::Success);

    let again = catalog.sync_from_his().await.unwrap();
    assert_eq!(again.kind, NotificationKind::Info);
}

// ============================================================================
// Hospital beds
// ============================================================================

#[tokio::test]
async fn test_bed_code_unique_within_type() {
    let catalog = InsuranceCatalog::in_memory_default();
    catalog
        .beds
        .create(HospitalBed::new("G01", "Giường thường", BedType::Bhyt))
        .await
        .unwrap();
    catalog
        .beds
        .create(HospitalBed::new("G01", "Giường thường", BedType::His))
        .await
        .unwrap();

    let err = catalog
        .beds
        .create(HospitalBed::new("G01", "Trùng mã", BedType::His))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Bed code must be unique within the same type (BHYT/HIS)!");
}

#[tokio::test]
async fn test_bed_mappings() {
    let catalog = InsuranceCatalog::in_memory_default();
    let ward = catalog.departments.create(Department::bhyt("K03", "Khoa Nội")).await.unwrap();
    let bhyt_bed = catalog
        .beds
        .create(HospitalBed::new("BH01", "Giường BHYT", BedType::Bhyt).in_department(ward.id).with_price(250_000.0))
        .await
        .unwrap();

    for code in ["H01", "H02"] {
        catalog
            .beds
            .create(HospitalBed::new(code, "Giường HIS", BedType::His).mapped_to(bhyt_bed.id))
            .await
            .unwrap();
    }
    assert_eq!(catalog.beds.mapping_count(bhyt_bed.id).await.unwrap(), 2);

    let view = view_bed_mappings(&catalog.beds, bhyt_bed.id).await.unwrap();
    let codes: Vec<&str> = view.records.iter().map(|bed| bed.code.as_str()).collect();
    assert_eq!(codes, ["H01", "H02"]);

    let his_bed = view.records[0].clone();
    let inverse = view_bed_mappings(&catalog.beds, his_bed.id).await.unwrap();
    assert_eq!(inverse.records.len(), 1);
    assert_eq!(inverse.records[0].id, bhyt_bed.id);

    // Removing the BHYT bed unmaps the HIS beds
    catalog.beds.delete(bhyt_bed.id).await.unwrap();
    let his_bed = catalog.beds.get(his_bed.id).await.unwrap().unwrap();
    assert_eq!(his_bed.bhyt_bed_id, None);

    // Removing the department clears the bed's department
    let other = catalog
        .beds
        .create(HospitalBed::new("BH02", "Giường BHYT 2", BedType::Bhyt).in_department(ward.id))
        .await
        .unwrap();
    catalog.departments.delete(ward.id).await.unwrap();
    assert_eq!(catalog.beds.get(other.id).await.unwrap().unwrap().department_id, None);
}

#[tokio::test]
async fn test_bed_reference_rules() {
    let catalog = InsuranceCatalog::in_memory_default();

    let err = catalog
        .beds
        .create(HospitalBed::new("H01", "Giường", BedType::His).mapped_to(uuid::Uuid::new_v4()))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Corresponding BHYT bed does not exist!");

    let mut bed = catalog
        .beds
        .create(HospitalBed::new("H02", "Giường", BedType::His))
        .await
        .unwrap();
    bed.bhyt_bed_id = Some(bed.id);
    let err = catalog.beds.update(bed).await.unwrap_err();
    assert_eq!(err.to_string(), "A bed cannot be mapped to itself!");

    let err = catalog
        .beds
        .create(HospitalBed::new("H03", "Giường", BedType::His).with_price(-1.0))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Bed price must not be negative!");
}
