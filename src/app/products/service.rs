//! 产品业务服务
//!
//! 所有读写都在同一把互斥锁内完成：列表的过滤+分页看到的是一致快照，
//! 更新的"检查存在→校验→替换"不会与其他写操作交错。

use std::{
    collections::BTreeMap,
    ops::Range,
    sync::{Arc, Mutex, MutexGuard},
};

use super::{
    model::{ListQuery, Product, ProductPayload},
    store::ProductStore,
    validation::InvalidPayload,
};
use crate::core::{error::CoreError, extract::QueryValue, response::ListResponse};

const DEFAULT_PAGE: i64 = 1;
const DEFAULT_LIMIT: i64 = 10;

#[derive(Clone)]
pub struct ProductService {
    store: Arc<Mutex<ProductStore>>,
}

impl ProductService {
    pub fn new(store: ProductStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, ProductStore>, CoreError> {
        self.store
            .lock()
            .map_err(|e| CoreError::InternalServerError(format!("product store lock poisoned: {}", e)))
    }

    /// 按分类精确过滤后分页；`total` 为过滤后、分页前的数量
    pub fn list_products(&self, query: &ListQuery) -> Result<ListResponse<Product>, CoreError> {
        let store = self.lock()?;

        let filtered: Vec<&Product> = store
            .iter()
            .filter(|p| category_matches(&query.category, p))
            .collect();

        let window = page_window(&query.page, &query.limit, filtered.len());
        let results = filtered[window].iter().map(|p| (*p).clone()).collect();

        Ok(ListResponse::new(results, filtered.len()))
    }

    pub fn get_product(&self, id: &str) -> Result<Product, CoreError> {
        Ok(self.lock()?.get_by_id(id)?)
    }

    pub fn create_product(&self, payload: ProductPayload) -> Result<Product, CoreError> {
        Ok(self.lock()?.create(payload))
    }

    /// 先确认记录存在，再看校验结果：不存在的 id 总是 404，即使请求体也无效
    pub fn update_product(
        &self,
        id: &str,
        payload: Result<ProductPayload, InvalidPayload>,
    ) -> Result<Product, CoreError> {
        let mut store = self.lock()?;
        if !store.contains(id) {
            return Err(CoreError::product_not_found());
        }

        Ok(store.update(id, payload?)?)
    }

    pub fn delete_product(&self, id: &str) -> Result<Product, CoreError> {
        Ok(self.lock()?.delete(id)?)
    }

    /// 名称不区分大小写的子串匹配
    pub fn search_products(&self, name: &str) -> Result<ListResponse<Product>, CoreError> {
        let needle = name.to_lowercase();
        let matches: Vec<Product> = self
            .lock()?
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();

        Ok(matches.into())
    }

    /// 按分类计数
    pub fn stats(&self) -> Result<BTreeMap<String, usize>, CoreError> {
        let store = self.lock()?;
        let mut counts = BTreeMap::new();
        for product in store.iter() {
            *counts.entry(product.category.clone()).or_insert(0) += 1;
        }
        Ok(counts)
    }
}

/// 空值不过滤；重复给出的分类不匹配任何产品
fn category_matches(category: &QueryValue, product: &Product) -> bool {
    match category {
        QueryValue::Absent => true,
        QueryValue::One(c) => c.is_empty() || product.category == *c,
        QueryValue::Repeated(_) => false,
    }
}

/// 计算分页窗口 `[(page-1)*limit, (page-1)*limit+limit)`，截断到 `len`
///
/// 缺省 page=1、limit=10。无法解析、重复给出或小于 1 的值得到空窗口。
fn page_window(page: &QueryValue, limit: &QueryValue, len: usize) -> Range<usize> {
    let (Some(page), Some(limit)) = (
        parse_positive(page, DEFAULT_PAGE),
        parse_positive(limit, DEFAULT_LIMIT),
    ) else {
        return 0..0;
    };

    let start = (page - 1).saturating_mul(limit).min(len);
    let end = start.saturating_add(limit).min(len);
    start..end
}

fn parse_positive(raw: &QueryValue, default: i64) -> Option<usize> {
    let value = match raw {
        QueryValue::Absent => default,
        QueryValue::One(s) => s.trim().parse::<i64>().ok()?,
        QueryValue::Repeated(_) => return None,
    };

    if value < 1 {
        return None;
    }
    usize::try_from(value).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::products::validation::validate_product_payload;

    fn service() -> ProductService {
        ProductService::new(ProductStore::seeded())
    }

    fn query(category: Option<&str>, page: Option<&str>, limit: Option<&str>) -> ListQuery {
        ListQuery {
            category: category.into(),
            page: page.into(),
            limit: limit.into(),
        }
    }

    fn window(page: Option<&str>, limit: Option<&str>, len: usize) -> Range<usize> {
        page_window(&page.into(), &limit.into(), len)
    }

    fn ids(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_page_window() {
        assert_eq!(window(None, None, 3), 0..3);
        assert_eq!(window(Some("2"), Some("1"), 3), 1..2);
        assert_eq!(window(Some("5"), Some("10"), 3), 3..3);
        assert_eq!(window(Some("0"), None, 3), 0..0);
        assert_eq!(window(None, Some("-1"), 3), 0..0);
        assert_eq!(window(Some("abc"), None, 3), 0..0);
        assert_eq!(window(Some(""), None, 3), 0..0);
        assert_eq!(
            window(Some("9223372036854775807"), Some("9223372036854775807"), 3),
            3..3
        );
    }

    #[test]
    fn test_repeated_page_yields_empty_window() {
        let repeated = QueryValue::Repeated(vec!["1".to_string(), "2".to_string()]);
        assert_eq!(page_window(&repeated, &QueryValue::Absent, 3), 0..0);
        assert_eq!(page_window(&QueryValue::Absent, &repeated, 3), 0..0);
    }

    #[test]
    fn test_repeated_category_matches_nothing() {
        let list = ListQuery {
            category: QueryValue::Repeated(vec!["kitchen".to_string(), "electronics".to_string()]),
            ..ListQuery::default()
        };
        let page = service().list_products(&list).unwrap();
        assert_eq!(page.total, 0);
        assert!(page.results.is_empty());
    }

    #[test]
    fn test_list_defaults() {
        let page = service().list_products(&ListQuery::default()).unwrap();
        assert_eq!(page.total, 3);
        assert_eq!(ids(&page.results), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_list_filter_then_paginate() {
        let page = service()
            .list_products(&query(Some("electronics"), Some("2"), Some("1")))
            .unwrap();
        assert_eq!(page.total, 2);
        assert_eq!(ids(&page.results), vec!["2"]);
    }

    #[test]
    fn test_list_empty_category_means_no_filter() {
        let page = service().list_products(&query(Some(""), None, None)).unwrap();
        assert_eq!(page.total, 3);
    }

    #[test]
    fn test_list_bad_page_keeps_total() {
        let page = service()
            .list_products(&query(None, Some("nope"), None))
            .unwrap();
        assert!(page.results.is_empty());
        assert_eq!(page.total, 3);
    }

    #[test]
    fn test_search_case_insensitive() {
        let found = service().search_products("LAPTOP").unwrap();
        assert_eq!(found.total, 1);
        assert_eq!(found.results[0].name, "Laptop");

        let found = service().search_products("o").unwrap();
        assert_eq!(found.total, 3);
    }

    #[test]
    fn test_stats_for_seed_data() {
        let stats = service().stats().unwrap();
        let expected: BTreeMap<String, usize> =
            [("electronics".to_string(), 2), ("kitchen".to_string(), 1)].into();
        assert_eq!(stats, expected);
    }

    #[test]
    fn test_update_missing_id_wins_over_invalid_payload() {
        let err = service()
            .update_product("999", validate_product_payload(b"{}"))
            .unwrap_err();
        assert!(matches!(err, CoreError::NotFound(_)));

        let err = service()
            .update_product("1", validate_product_payload(b"{}"))
            .unwrap_err();
        assert!(matches!(err, CoreError::BadRequest(_)));
    }

    #[test]
    fn test_clones_share_store() {
        let a = service();
        let b = a.clone();
        a.delete_product("3").unwrap();
        assert!(matches!(b.get_product("3"), Err(CoreError::NotFound(_))));
    }
}
