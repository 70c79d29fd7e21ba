//! 请求提取器
//!
//! 提取失败一律转成 [`CoreError`]，响应体保持 JSON。

use axum::extract::{FromRequestParts, Path, Query};
use serde::Deserialize;

use super::error::CoreError;

/// 原始查询参数，保留重复的键
#[derive(Debug, Default, Deserialize, FromRequestParts)]
#[serde(transparent)]
#[from_request(via(Query), rejection(CoreError))]
pub struct QueryPairs(pub Vec<(String, String)>);

impl QueryPairs {
    pub fn value(&self, key: &str) -> QueryValue {
        let mut values: Vec<String> = self
            .0
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
            .collect();

        match values.len() {
            0 => QueryValue::Absent,
            1 => QueryValue::One(values.remove(0)),
            _ => QueryValue::Repeated(values),
        }
    }
}

/// 单个查询参数的取值
#[derive(Debug, Clone, Default, PartialEq)]
pub enum QueryValue {
    #[default]
    Absent,
    One(String),
    /// 同一个键出现多次
    Repeated(Vec<String>),
}

impl QueryValue {
    pub fn first(&self) -> Option<&str> {
        match self {
            QueryValue::Absent => None,
            QueryValue::One(v) => Some(v),
            QueryValue::Repeated(values) => values.first().map(String::as_str),
        }
    }
}

impl From<Option<&str>> for QueryValue {
    fn from(value: Option<&str>) -> Self {
        value.map_or(QueryValue::Absent, |v| QueryValue::One(v.to_string()))
    }
}

/// 路径中的资源 id；无法解码的 id 视为不存在
#[derive(Debug, Deserialize, FromRequestParts)]
#[from_request(via(Path), rejection(CoreError))]
pub struct ResourceId(pub String);
