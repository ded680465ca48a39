//! 类型筛选更新器
//! 读取 filters.json -> 获取远程类型 -> 合并 -> 回写

use crate::error::UpdateError;
use crate::filters;
use crate::types::Genre;
use crate::{genre_api, genre_html};
use std::path::Path;
use tracing::{debug, info, warn};

/// 类型列表来源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenreSource {
    /// `{base}/api/genres` JSON 接口
    Api,
    /// `{base}/filter` 筛选页
    Html,
}

impl GenreSource {
    pub async fn fetch(self, base_url: &str) -> Result<Vec<Genre>, UpdateError> {
        match self {
            GenreSource::Api => genre_api::fetch_genres(base_url).await,
            GenreSource::Html => genre_html::fetch_genres(base_url).await,
        }
    }

    pub fn program_name(self) -> &'static str {
        match self {
            GenreSource::Api => "update-genres-api",
            GenreSource::Html => "update-genres-html",
        }
    }

    pub fn url_label(self) -> &'static str {
        match self {
            GenreSource::Api => "api_url",
            GenreSource::Html => "base_url",
        }
    }
}

/// 更新结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateResult {
    pub genres: usize,
    pub entries: usize,
}

/// 更新 filters.json 中的类型筛选项
///
/// 读取或获取任一步失败时不会写文件。
pub async fn update_filters(
    filters_path: &Path,
    base_url: &str,
    source: GenreSource,
) -> Result<UpdateResult, UpdateError> {
    let mut config = filters::load(filters_path)?;

    let genres = source.fetch(base_url).await?;
    info!("📡 获取到 {} 个类型 ({:?})", genres.len(), source);
    debug!(
        "类型列表: {}",
        serde_json::to_string(&genres).unwrap_or_default()
    );

    let entries = filters::apply_genres(&mut config, &genres);
    if entries == 0 {
        warn!("{} 中没有 isGenre 筛选项", filters_path.display());
    }

    filters::store(filters_path, &config)?;
    info!("✅ 已更新 {} 个类型筛选项: {}", entries, filters_path.display());

    Ok(UpdateResult {
        genres: genres.len(),
        entries,
    })
}
