use database_layer::Row;
use error_common::codes::validation;
use tracing::{debug, info};
use uuid::Uuid;

use super::{search_records, CatalogContext};
use crate::error::{reject, reject_conflict, require_text, CatalogResult};
use crate::models::{BenefitCode, Category, CategoryType, CodedRecord, MedicalStaff, PaymentRate};
use crate::validation::{check_code, sanitize_code, SanitizedCode};

#[derive(Clone)]
pub struct CategoryService {
    ctx: CatalogContext,
}

impl CategoryService {
    pub fn new(ctx: CatalogContext) -> Self {
        Self { ctx }
    }

    pub async fn create(&self, category: Category) -> CatalogResult<Category> {
        self.insert(category)
            .await
            .inspect_err(|err| err.log("category.create"))
    }

    pub async fn update(&self, category: Category) -> CatalogResult<Category> {
        self.replace(category)
            .await
            .inspect_err(|err| err.log("category.update"))
    }

    /// Delete a category that no payment rate uses as its technical level
    ///
    /// Staff titles and services pointing at it are cleared.
    pub async fn delete(&self, id: Uuid) -> CatalogResult<Category> {
        self.remove(id)
            .await
            .inspect_err(|err| err.log("category.delete"))
    }

    pub async fn get(&self, id: Uuid) -> CatalogResult<Option<Category>> {
        Ok(self.ctx.categories.get(id).await?)
    }

    /// All categories ordered by type, then code
    pub async fn list(&self) -> CatalogResult<Vec<Category>> {
        let mut categories = self.ctx.categories.list().await?;
        categories.sort_by(|a, b| {
            (a.category_type, &a.code).cmp(&(b.category_type, &b.code))
        });
        Ok(categories)
    }

    pub async fn list_by_type(&self, category_type: CategoryType) -> CatalogResult<Vec<Category>> {
        let mut categories = self.list().await?;
        categories.retain(|category| category.category_type == category_type);
        Ok(categories)
    }

    /// Categories whose code or name contains `term`, optionally of one type
    pub async fn search(
        &self,
        term: &str,
        category_type: Option<CategoryType>,
    ) -> CatalogResult<Vec<Category>> {
        let mut categories = self.list().await?;
        if let Some(category_type) = category_type {
            categories.retain(|category| category.category_type == category_type);
        }
        let found = search_records(categories, term, self.ctx.search_limit);
        debug!(term, count = found.len(), "Searched categories");
        Ok(found)
    }

    /// Clean a code while it is being typed
    pub fn sanitize(&self, category_type: CategoryType, code: &str) -> SanitizedCode {
        sanitize_code(category_type, code)
    }

    async fn insert(&self, category: Category) -> CatalogResult<Category> {
        self.validate(&category).await?;
        let created = self.ctx.categories.insert(category).await?;
        let label = created.category_type.label();
        info!(
            id = %created.id,
            category_type = %created.category_type,
            code = %created.code,
            "{label} has been created."
        );
        Ok(created)
    }

    async fn replace(&self, category: Category) -> CatalogResult<Category> {
        let stored = self.ctx.categories.require(category.id).await?;
        if stored.category_type != category.category_type {
            self.ensure_type_unused(&stored).await?;
        }
        self.validate(&category).await?;
        let updated = self.ctx.categories.update(category).await?;
        info!(id = %updated.id, code = %updated.code, "Category updated");
        Ok(updated)
    }

    async fn remove(&self, id: Uuid) -> CatalogResult<Category> {
        let category = self.ctx.categories.require(id).await?;

        let rates = self
            .ctx
            .payment_rates
            .find(&move |rate: &PaymentRate| rate.technical_level_id == id)
            .await?;
        if let Some(rate) = rates.first() {
            return Err(reject_conflict(
                validation::RECORD_IN_USE,
                Category::TABLE,
                format!(
                    "{} is used by payment rate {} and cannot be deleted!",
                    category.display_name(),
                    rate.code
                ),
                rate.code.clone(),
            ));
        }

        let removed = self.ctx.categories.delete(id).await?;
        let staff = self
            .ctx
            .staff
            .find(&move |member: &MedicalStaff| {
                member.title_id == Some(id) || member.service_id == Some(id)
            })
            .await?;
        for mut member in staff {
            if member.title_id == Some(id) {
                member.title_id = None;
            }
            if member.service_id == Some(id) {
                member.service_id = None;
            }
            self.ctx.staff.update(member).await?;
        }
        info!(id = %id, code = %removed.code, "Category deleted");
        Ok(removed)
    }

    /// Reject a type change while rows rely on the stored type
    async fn ensure_type_unused(&self, stored: &Category) -> CatalogResult<()> {
        let id = stored.id;
        let rates = self
            .ctx
            .payment_rates
            .find(&move |rate: &PaymentRate| rate.technical_level_id == id)
            .await?;
        if let Some(rate) = rates.first() {
            return Err(reject_conflict(
                validation::RECORD_IN_USE,
                Category::TABLE,
                format!(
                    "{} is used by payment rate {} and its type cannot be changed!",
                    stored.display_name(),
                    rate.code
                ),
                rate.code.clone(),
            )
            .with_record(id));
        }

        let staff = self
            .ctx
            .staff
            .find(&move |member: &MedicalStaff| {
                member.title_id == Some(id) || member.service_id == Some(id)
            })
            .await?;
        if let Some(member) = staff.first() {
            return Err(reject_conflict(
                validation::RECORD_IN_USE,
                Category::TABLE,
                format!(
                    "{} is used by medical staff {} and its type cannot be changed!",
                    stored.display_name(),
                    member.name
                ),
                member.his_code.clone(),
            )
            .with_record(id));
        }
        Ok(())
    }

    async fn validate(&self, category: &Category) -> CatalogResult<()> {
        require_text(Category::TABLE, "code", &category.code, "Code")?;
        require_text(Category::TABLE, "name", &category.name, "Name")?;
        check_code(category.category_type, &category.code)?;

        let (id, code, category_type) = (category.id, category.code.clone(), category.category_type);
        let duplicates = self
            .ctx
            .categories
            .find(&move |other: &Category| {
                other.id != id && other.category_type == category_type && other.code == code
            })
            .await?;
        if let Some(existing) = duplicates.first() {
            return Err(reject_conflict(
                validation::DUPLICATE_CODE,
                Category::TABLE,
                format!(
                    "{} with the code {} already exists. Please check again.",
                    category_type.label(),
                    category.code
                ),
                existing.display_name(),
            ));
        }

        if let Some(benefit_id) = category.benefit_code_id {
            if self.ctx.benefit_codes.get(benefit_id).await?.is_none() {
                return Err(reject(
                    validation::INVALID_REFERENCE,
                    BenefitCode::TABLE,
                    "Benefit code does not exist!",
                ));
            }
        }
        Ok(())
    }
}

/// Resolve a category reference that must exist and be of `expected` type
pub(crate) async fn require_category(
    ctx: &CatalogContext,
    id: Uuid,
    expected: CategoryType,
    model: &str,
    field_label: &str,
) -> CatalogResult<Category> {
    let Some(category) = ctx.categories.get(id).await? else {
        return Err(reject(
            validation::INVALID_REFERENCE,
            model,
            format!("{field_label} does not exist!"),
        ));
    };
    if category.category_type != expected {
        return Err(reject(
            validation::INVALID_REFERENCE,
            model,
            format!("{field_label} must be a category of type {}!", expected.label()),
        ));
    }
    Ok(category)
}
