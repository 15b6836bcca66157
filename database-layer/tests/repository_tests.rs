//! In-memory repository behaviour: named constraints, atomic writes, lookups

use database_layer::*;
use uuid::Uuid;

static BED_CODE_TYPE: ConstraintDef = ConstraintDef::new(
    "code_type_uniq",
    "hic_hospital_bed",
    "Bed code must be unique within the same type (BHYT/HIS)!",
);
static BED_PRICE: ConstraintDef =
    ConstraintDef::new("bed_price_check", "hic_hospital_bed", "Bed price must not be negative!");

#[derive(Debug, Clone, PartialEq)]
struct Bed {
    id: Uuid,
    code: String,
    bed_type: &'static str,
    price: f64,
}

impl Bed {
    fn new(code: &str, bed_type: &'static str, price: f64) -> Self {
        Self {
            id: Uuid::nil(),
            code: code.to_string(),
            bed_type,
            price,
        }
    }
}

impl Row for Bed {
    const TABLE: &'static str = "hic_hospital_bed";

    fn id(&self) -> Uuid {
        self.id
    }

    fn set_id(&mut self, id: Uuid) {
        self.id = id;
    }

    fn unique_keys(&self) -> Vec<UniqueKey> {
        vec![UniqueKey::composite(
            &BED_CODE_TYPE,
            &[Some(self.code.as_str()), Some(self.bed_type)],
        )]
    }

    fn checks(&self) -> Vec<CheckConstraint> {
        vec![CheckConstraint::new(&BED_PRICE, self.price >= 0.0)]
    }
}

#[tokio::test]
async fn test_insert_assigns_id() {
    let repo = InMemoryRepository::<Bed>::new();
    let bed = repo.insert(Bed::new("G01", "bhyt", 150_000.0)).await.unwrap();
    assert!(!bed.id.is_nil());
    assert_eq!(repo.get(bed.id).await.unwrap(), Some(bed));
}

#[tokio::test]
async fn test_unique_violation_names_constraint() {
    let repo = InMemoryRepository::<Bed>::new();
    repo.insert(Bed::new("G01", "bhyt", 0.0)).await.unwrap();

    let err = repo.insert(Bed::new("G01", "bhyt", 0.0)).await.unwrap_err();
    match err {
        DatabaseError::ConstraintViolation { constraint, message } => {
            assert_eq!(constraint, "code_type_uniq");
            assert_eq!(message, "Bed code must be unique within the same type (BHYT/HIS)!");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(repo.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_same_code_other_type_is_allowed() {
    let repo = InMemoryRepository::<Bed>::new();
    repo.insert(Bed::new("G01", "bhyt", 0.0)).await.unwrap();
    repo.insert(Bed::new("G01", "his", 0.0)).await.unwrap();
    assert_eq!(repo.list().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_check_violation_leaves_row_unchanged() {
    let repo = InMemoryRepository::<Bed>::new();
    let bed = repo.insert(Bed::new("G01", "bhyt", 10.0)).await.unwrap();

    let mut changed = bed.clone();
    changed.price = -1.0;
    let err = repo.update(changed).await.unwrap_err();
    assert!(matches!(err, DatabaseError::ConstraintViolation { ref constraint, .. } if constraint == "bed_price_check"));
    assert_eq!(repo.require(bed.id).await.unwrap().price, 10.0);
}

#[tokio::test]
async fn test_update_may_keep_its_own_key() {
    let repo = InMemoryRepository::<Bed>::new();
    let mut bed = repo.insert(Bed::new("G01", "bhyt", 10.0)).await.unwrap();
    bed.price = 20.0;
    assert_eq!(repo.update(bed).await.unwrap().price, 20.0);
}

#[tokio::test]
async fn test_missing_rows() {
    let repo = InMemoryRepository::<Bed>::new();
    let id = Uuid::new_v4();
    assert!(matches!(repo.delete(id).await, Err(DatabaseError::NotFound { .. })));
    assert!(matches!(repo.require(id).await, Err(DatabaseError::NotFound { .. })));

    let mut ghost = Bed::new("G09", "his", 0.0);
    ghost.id = id;
    assert!(matches!(repo.update(ghost).await, Err(DatabaseError::NotFound { .. })));
}

#[tokio::test]
async fn test_find_filters_rows() {
    let repo = InMemoryRepository::<Bed>::new();
    repo.insert(Bed::new("G01", "bhyt", 0.0)).await.unwrap();
    repo.insert(Bed::new("G02", "his", 0.0)).await.unwrap();
    repo.insert(Bed::new("G03", "his", 0.0)).await.unwrap();

    let his = repo.find(&|bed: &Bed| bed.bed_type == "his").await.unwrap();
    assert_eq!(his.len(), 2);
}

#[test]
fn test_schema_declares_every_constraint_name() {
    for name in [
        "benefit_code_uniq",
        "category_code_type_uniq",
        "bhyt_code_uniq",
        "social_insurance_code_unique",
        "code_type_uniq",
        "medical_facility_code_unique",
        "payment_rate_period_excl",
        "reference_level_period_excl",
    ] {
        assert!(SCHEMA_SQL.contains(name), "schema misses {name}");
    }
}
