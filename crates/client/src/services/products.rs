//! Catalog endpoints with a short-lived read cache.

use std::path::PathBuf;
use std::time::Duration;

use moka::future::Cache;
use reqwest::multipart::{Form, Part};
use tracing::{debug, instrument};

use easy_gadget_core::{Price, ProductId};

use crate::api::conversions::{convert_product, convert_product_page};
use crate::api::wire::{WireMessage, WireProduct, WireProductPage};
use crate::api::{ApiClient, ApiError, Auth};
use crate::types::{Product, ProductFilters, ProductPage};

/// How long catalog reads are served from cache.
const CACHE_TTL: Duration = Duration::from_secs(300);

const CACHE_CAPACITY: u64 = 1024;

/// Cached catalog responses, keyed by request identity.
#[derive(Clone)]
enum CacheEntry {
    Page(ProductPage),
    Product(Box<Product>),
}

/// Typed wrapper over the `/products` endpoints.
///
/// Unfiltered list pages and single-product lookups are cached for five
/// minutes; filtered queries always go to the server. Any catalog mutation
/// drops the whole cache.
#[derive(Clone)]
pub struct ProductService {
    api: ApiClient,
    cache: Cache<String, CacheEntry>,
}

/// Fields for creating or updating a product. Sent as multipart form data
/// so image files ride along with the metadata.
#[derive(Debug, Clone, Default)]
pub struct ProductInput {
    pub name: String,
    pub brand: String,
    pub price: Price,
    pub category: String,
    pub description: String,
    pub stock: u32,
    pub is_new: bool,
    pub features: Vec<String>,
    /// Local paths of image files to attach.
    pub images: Vec<PathBuf>,
}

impl ProductInput {
    async fn to_form(&self) -> Result<Form, ApiError> {
        let mut form = Form::new()
            .text("name", self.name.clone())
            .text("brand", self.brand.clone())
            .text("price", self.price.amount().to_string())
            .text("category", self.category.clone())
            .text("description", self.description.clone())
            .text("stock", self.stock.to_string())
            .text("isNew", self.is_new.to_string())
            .text("features", serde_json::to_string(&self.features)?);

        for path in &self.images {
            let bytes = tokio::fs::read(path).await?;
            let file_name = path
                .file_name()
                .map_or_else(|| "image".to_owned(), |name| name.to_string_lossy().into_owned());
            form = form.part("images", Part::bytes(bytes).file_name(file_name));
        }
        Ok(form)
    }
}

impl ProductService {
    pub(crate) fn new(api: ApiClient) -> Self {
        let cache = Cache::builder()
            .max_capacity(CACHE_CAPACITY)
            .time_to_live(CACHE_TTL)
            .build();
        Self { api, cache }
    }

    fn page_key(filters: &ProductFilters) -> String {
        format!(
            "page:{}:{}",
            filters.page.unwrap_or(1),
            filters.limit.map_or_else(String::new, |limit| limit.to_string())
        )
    }

    /// List catalog products.
    ///
    /// Unfiltered queries (pagination only) are cached; anything with a
    /// search, category, brand, or price filter bypasses the cache so
    /// results stay exact.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] on a rejected query.
    #[instrument(skip(self, filters))]
    pub async fn list(&self, filters: &ProductFilters) -> Result<ProductPage, ApiError> {
        let cacheable = !filters.is_filtered();
        let key = Self::page_key(filters);

        if cacheable && let Some(CacheEntry::Page(page)) = self.cache.get(&key).await {
            debug!(%key, "catalog cache hit");
            return Ok(page);
        }

        let page: WireProductPage = self
            .api
            .get_with_query("/products", &filters.to_query(), Auth::None)
            .await?;
        let page = convert_product_page(page);

        if cacheable {
            self.cache.insert(key, CacheEntry::Page(page.clone())).await;
        }
        Ok(page)
    }

    /// Fetch a single product by ID, served from cache when fresh.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] with 404 for an unknown product.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get(&self, id: &ProductId) -> Result<Product, ApiError> {
        let key = format!("product:{id}");
        if let Some(CacheEntry::Product(product)) = self.cache.get(&key).await {
            debug!(%key, "catalog cache hit");
            return Ok(*product);
        }

        let product: WireProduct = self
            .api
            .get(&format!("/products/{id}"), Auth::None)
            .await?;
        let product = convert_product(product);

        self.cache
            .insert(key, CacheEntry::Product(Box::new(product.clone())))
            .await;
        Ok(product)
    }

    /// Create a product (admin). Drops the catalog cache.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Io`] if an image file cannot be read, or
    /// [`ApiError::Status`] if the server rejects the product.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: &ProductInput) -> Result<Product, ApiError> {
        let form = input.to_form().await?;
        let product: WireProduct = self.api.upload("/products", form).await?;
        self.cache.invalidate_all();
        Ok(convert_product(product))
    }

    /// Update a product (admin). Drops the catalog cache.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Io`] if an image file cannot be read, or
    /// [`ApiError::Status`] if the server rejects the update.
    #[instrument(skip(self, input), fields(product_id = %id))]
    pub async fn update(&self, id: &ProductId, input: &ProductInput) -> Result<Product, ApiError> {
        let form = input.to_form().await?;
        let product: WireProduct = self
            .api
            .upload_put(&format!("/products/{id}"), form)
            .await?;
        self.cache.invalidate_all();
        Ok(convert_product(product))
    }

    /// Delete a product (admin). Drops the catalog cache.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] with 404 for an unknown product.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn delete(&self, id: &ProductId) -> Result<String, ApiError> {
        let response: WireMessage = self
            .api
            .delete(&format!("/products/{id}"), Auth::Required)
            .await?;
        self.cache.invalidate_all();
        Ok(response.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_key_ignores_filter_fields() {
        let plain = ProductFilters {
            page: Some(2),
            limit: Some(20),
            ..Default::default()
        };
        assert_eq!(ProductService::page_key(&plain), "page:2:20");
        assert_eq!(ProductService::page_key(&ProductFilters::default()), "page:1:");
    }
}
