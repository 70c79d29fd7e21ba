//! 产品内存存储
//!
//! 按插入顺序保存所有产品，`id` 唯一。本身不加锁，由 [`super::service::ProductService`]
//! 负责串行化访问。

use serde_json::Number;
use uuid::Uuid;

use super::model::{Product, ProductPayload};
use crate::core::error::CoreError;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    #[error("product {0} not found")]
    NotFound(String),
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => CoreError::product_not_found(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProductStore {
    products: Vec<Product>,
}

impl ProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 启动时的三条示例数据
    pub fn seeded() -> Self {
        let seed = |id: &str, name: &str, description: &str, price: u64, category: &str, in_stock| {
            Product {
                id: id.to_string(),
                name: name.to_string(),
                description: description.to_string(),
                price: Number::from(price),
                category: category.to_string(),
                in_stock,
            }
        };

        Self {
            products: vec![
                seed(
                    "1",
                    "Laptop",
                    "High-performance laptop with 16GB RAM",
                    1200,
                    "electronics",
                    true,
                ),
                seed(
                    "2",
                    "Smartphone",
                    "Latest model with 128GB storage",
                    800,
                    "electronics",
                    true,
                ),
                seed(
                    "3",
                    "Coffee Maker",
                    "Programmable coffee maker with timer",
                    50,
                    "kitchen",
                    false,
                ),
            ],
        }
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    /// 当前所有产品的快照
    pub fn list(&self) -> Vec<Product> {
        self.products.clone()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    pub fn get_by_id(&self, id: &str) -> Result<Product, StoreError> {
        self.products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    pub fn create(&mut self, payload: ProductPayload) -> Product {
        let mut id = Uuid::new_v4().to_string();
        while self.contains(&id) {
            id = Uuid::new_v4().to_string();
        }

        let product = Product::from_payload(id, payload);
        self.products.push(product.clone());
        product
    }

    pub fn update(&mut self, id: &str, payload: ProductPayload) -> Result<Product, StoreError> {
        let index = self
            .position(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        let product = &mut self.products[index];
        product.replace_fields(payload);
        Ok(product.clone())
    }

    pub fn delete(&mut self, id: &str) -> Result<Product, StoreError> {
        let index = self
            .position(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        Ok(self.products.remove(index))
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.products.iter().position(|p| p.id == id)
    }
}
