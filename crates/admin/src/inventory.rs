//! Inventory management: catalog CRUD behind a staged dialog form.
//!
//! The dialog holds strings, exactly as typed; nothing is coerced until the
//! admin submits. A submit that fails - bad number, backend rejection,
//! outage - leaves the form staged with the admin's values so the dialog
//! can stay open, instead of silently discarding their input.

use rust_decimal::Decimal;
use tracing::{info, instrument};

use minimart_core::ProductId;
use minimart_storefront::backend::{BackendApi, ProductPayload};
use minimart_storefront::catalog::CatalogSource;
use minimart_storefront::state::AppState;

use crate::AdminError;

/// What the staged form will do on submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    /// Creating a new product.
    Create,
    /// Editing an existing product.
    Edit(ProductId),
}

/// The product dialog's contents, string-typed as the admin typed them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductForm {
    pub name: String,
    pub unit_price: String,
    pub stock_quantity: String,
    pub image_url: String,
    pub description: String,
    mode: FormMode,
}

impl ProductForm {
    fn blank() -> Self {
        Self {
            name: String::new(),
            unit_price: String::new(),
            stock_quantity: String::new(),
            image_url: String::new(),
            description: String::new(),
            mode: FormMode::Create,
        }
    }

    /// What submitting this form will do.
    #[must_use]
    pub const fn mode(&self) -> FormMode {
        self.mode
    }

    fn coerce(&self) -> Result<ProductPayload, AdminError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(AdminError::MissingName);
        }
        let unit_price: Decimal = self
            .unit_price
            .trim()
            .parse()
            .map_err(|_| AdminError::InvalidPrice(self.unit_price.clone()))?;
        if unit_price.is_sign_negative() {
            return Err(AdminError::InvalidPrice(self.unit_price.clone()));
        }
        let stock_quantity: u32 = self
            .stock_quantity
            .trim()
            .parse()
            .map_err(|_| AdminError::InvalidQuantity(self.stock_quantity.clone()))?;

        Ok(ProductPayload {
            name: name.to_string(),
            stock_quantity,
            unit_price,
            image_url: none_if_blank(&self.image_url),
            description: none_if_blank(&self.description),
        })
    }
}

fn none_if_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Catalog CRUD with a staged form and two-phase delete.
#[derive(Debug, Default)]
pub struct InventoryManager {
    form: Option<ProductForm>,
    pending_delete: Option<ProductId>,
}

impl InventoryManager {
    /// Create a manager with nothing staged.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            form: None,
            pending_delete: None,
        }
    }

    /// The currently staged form, if a dialog is open.
    #[must_use]
    pub const fn form(&self) -> Option<&ProductForm> {
        self.form.as_ref()
    }

    /// Mutable access to the staged form, for the dialog's field edits.
    pub fn form_mut(&mut self) -> Option<&mut ProductForm> {
        self.form.as_mut()
    }

    /// The product ID awaiting delete confirmation, if any.
    #[must_use]
    pub const fn pending_delete(&self) -> Option<ProductId> {
        self.pending_delete
    }

    /// Stage a blank create form.
    pub fn open_create(&mut self) {
        self.form = Some(ProductForm::blank());
    }

    /// Stage an edit form pre-filled from the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::UnknownProduct`] when the ID is not in the
    /// catalog.
    pub fn open_edit<B: BackendApi>(
        &mut self,
        app: &AppState<B>,
        id: ProductId,
    ) -> Result<(), AdminError> {
        let product = app.product(id).ok_or(AdminError::UnknownProduct(id))?;
        self.form = Some(ProductForm {
            name: product.name.clone(),
            unit_price: product.unit_price.amount.to_string(),
            stock_quantity: product.stock_quantity.to_string(),
            image_url: product.image.clone().unwrap_or_default(),
            description: product.description.clone().unwrap_or_default(),
            mode: FormMode::Edit(id),
        });
        Ok(())
    }

    /// Close the dialog, discarding the staged form.
    pub fn close_form(&mut self) {
        self.form = None;
    }

    /// Submit the staged form.
    ///
    /// Coerces the string fields, sends the create or update, and refreshes
    /// the catalog wholesale on success. Any failure leaves the form staged
    /// exactly as it was.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError`] when no form is open, a field does not
    /// coerce, or the backend refused or never received the request.
    #[instrument(skip(self, app))]
    pub async fn submit<B: BackendApi>(
        &mut self,
        app: &AppState<B>,
    ) -> Result<ProductId, AdminError> {
        let form = self.form.as_ref().ok_or(AdminError::NoOpenForm)?;
        let payload = form.coerce()?;

        let id = match form.mode {
            FormMode::Create => app.backend().create_product(&payload).await?,
            FormMode::Edit(id) => {
                app.backend().update_product(id, &payload).await?;
                id
            }
        };

        app.refresh_catalog().await;
        self.form = None;
        info!(product_id = %id, "product saved");
        Ok(id)
    }

    /// Stage a delete for confirmation. Nothing is executed yet.
    pub fn request_delete(&mut self, id: ProductId) {
        self.pending_delete = Some(id);
    }

    /// Drop the pending delete without executing it.
    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Execute the pending delete against the backend and the catalog.
    ///
    /// The pending ID stays staged when the backend call fails, so the
    /// confirmation dialog can stay open.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::NoPendingDelete`] when nothing is staged, or
    /// the backend's error.
    #[instrument(skip(self, app))]
    pub async fn confirm_delete<B: BackendApi>(
        &mut self,
        app: &AppState<B>,
    ) -> Result<ProductId, AdminError> {
        let id = self.pending_delete.ok_or(AdminError::NoPendingDelete)?;
        app.backend().delete_product(id).await?;
        app.remove_product(id);
        self.pending_delete = None;
        info!(product_id = %id, "product deleted");
        Ok(id)
    }

    /// Re-fetch the catalog and replace it wholesale.
    pub async fn refresh<B: BackendApi>(&self, app: &AppState<B>) -> CatalogSource {
        app.refresh_catalog().await
    }
}

#[cfg(test)]
mod tests {
    use minimart_storefront::backend::InMemoryBackend;
    use minimart_storefront::config::StorefrontConfig;

    use super::*;

    fn app() -> (AppState<InMemoryBackend>, InMemoryBackend) {
        let backend = InMemoryBackend::new();
        let app = AppState::with_backend(StorefrontConfig::default(), backend.clone());
        (app, backend)
    }

    fn filled_create_form(manager: &mut InventoryManager) {
        manager.open_create();
        let form = manager.form_mut().expect("open form");
        form.name = "Instant noodles".to_string();
        form.unit_price = "4500".to_string();
        form.stock_quantity = "40".to_string();
    }

    #[tokio::test]
    async fn create_submits_and_refreshes_the_catalog() {
        let (app, _) = app();
        app.refresh_catalog().await;
        let mut manager = InventoryManager::new();
        filled_create_form(&mut manager);

        let id = manager.submit(&app).await.expect("create");

        assert_eq!(id, ProductId::new(12));
        assert!(manager.form().is_none());
        assert_eq!(app.catalog().len(), 12);
        assert!(app.catalog().contains(id));
    }

    #[tokio::test]
    async fn bad_numbers_keep_the_form_staged() {
        let (app, _) = app();
        let mut manager = InventoryManager::new();
        filled_create_form(&mut manager);
        manager.form_mut().expect("open form").unit_price = "four thousand".to_string();

        let err = manager.submit(&app).await.expect_err("bad price");
        assert!(matches!(err, AdminError::InvalidPrice(_)));

        let form = manager.form().expect("form retained");
        assert_eq!(form.name, "Instant noodles");
        assert_eq!(form.unit_price, "four thousand");
    }

    #[tokio::test]
    async fn backend_failure_keeps_the_form_staged() {
        let (app, backend) = app();
        let mut manager = InventoryManager::new();
        filled_create_form(&mut manager);
        backend.set_offline(true);

        let err = manager.submit(&app).await.expect_err("offline");
        assert!(matches!(err, AdminError::Backend(_)));
        assert!(manager.form().is_some());
    }

    #[tokio::test]
    async fn edit_prefills_from_the_catalog() {
        let (app, _) = app();
        app.refresh_catalog().await;
        let mut manager = InventoryManager::new();

        manager.open_edit(&app, ProductId::new(1)).expect("known id");
        let form = manager.form().expect("open form");
        assert_eq!(form.mode(), FormMode::Edit(ProductId::new(1)));
        assert!(!form.name.is_empty());
        assert!(form.unit_price.parse::<Decimal>().is_ok());

        let err = manager
            .open_edit(&app, ProductId::new(999))
            .expect_err("unknown id");
        assert!(matches!(err, AdminError::UnknownProduct(_)));
    }

    #[tokio::test]
    async fn delete_requires_request_then_confirm() {
        let (app, _) = app();
        app.refresh_catalog().await;
        let mut manager = InventoryManager::new();

        // No single call deletes.
        let err = manager.confirm_delete(&app).await.expect_err("nothing staged");
        assert!(matches!(err, AdminError::NoPendingDelete));

        manager.request_delete(ProductId::new(3));
        assert!(app.catalog().contains(ProductId::new(3)));

        let id = manager.confirm_delete(&app).await.expect("confirmed");
        assert_eq!(id, ProductId::new(3));
        assert!(!app.catalog().contains(ProductId::new(3)));
        assert!(manager.pending_delete().is_none());
    }

    #[tokio::test]
    async fn cancel_clears_the_pending_delete_without_executing() {
        let (app, _) = app();
        app.refresh_catalog().await;
        let mut manager = InventoryManager::new();

        manager.request_delete(ProductId::new(3));
        manager.cancel_delete();

        assert!(manager.pending_delete().is_none());
        assert!(app.catalog().contains(ProductId::new(3)));
    }

    #[tokio::test]
    async fn repeated_requests_then_cancel_leave_the_catalog_unchanged() {
        let (app, _) = app();
        app.refresh_catalog().await;
        let mut manager = InventoryManager::new();

        // The pending slot holds one ID; a second request replaces it.
        manager.request_delete(ProductId::new(2));
        manager.request_delete(ProductId::new(3));
        assert_eq!(manager.pending_delete(), Some(ProductId::new(3)));

        manager.cancel_delete();

        assert!(manager.pending_delete().is_none());
        assert!(app.catalog().contains(ProductId::new(2)));
        assert!(app.catalog().contains(ProductId::new(3)));
        assert_eq!(app.catalog().len(), 11);
    }

    #[tokio::test]
    async fn failed_delete_keeps_the_confirmation_pending() {
        let (app, backend) = app();
        app.refresh_catalog().await;
        let mut manager = InventoryManager::new();
        manager.request_delete(ProductId::new(3));
        backend.set_offline(true);

        let err = manager.confirm_delete(&app).await.expect_err("offline");
        assert!(matches!(err, AdminError::Backend(_)));
        assert_eq!(manager.pending_delete(), Some(ProductId::new(3)));
        assert!(app.catalog().contains(ProductId::new(3)));
    }
}
