//! 同步 Aidoku 源的类型筛选
//! 从 JSON 接口或筛选页获取类型列表, 写回 filters.json 中的 isGenre 筛选项

pub mod cli;
pub mod error;
pub mod filters;
pub mod genre_api;
pub mod genre_html;
pub mod http_client;
pub mod types;
pub mod updater;
