//! filters.json 的读取 / 合并 / 回写
//! 只改动 isGenre 为真的筛选项的 options 与 ids, 其余内容原样保留

use crate::error::UpdateError;
use crate::types::{FilterConfig, Genre};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Serializer, Value};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const GENRE_FLAG: &str = "isGenre";
const OPTIONS_KEY: &str = "options";
const IDS_KEY: &str = "ids";

/// 读取并解析筛选配置
pub fn load(path: &Path) -> Result<FilterConfig, UpdateError> {
    let content = fs::read_to_string(path).map_err(|e| UpdateError::io(path, e))?;
    let value: Value = serde_json::from_str(&content).map_err(|e| UpdateError::Parse {
        what: path.display().to_string(),
        source: e,
    })?;

    match value {
        Value::Array(entries) => {
            debug!("读取 {} 个筛选项: {}", entries.len(), path.display());
            Ok(entries)
        }
        _ => Err(UpdateError::NotAnArray {
            path: path.to_path_buf(),
        }),
    }
}

/// 用类型列表覆盖所有类型筛选项, 返回被更新的筛选项数量
pub fn apply_genres(config: &mut FilterConfig, genres: &[Genre]) -> usize {
    let names: Vec<Value> = genres
        .iter()
        .map(|g| Value::String(g.name.clone()))
        .collect();
    let ids: Vec<Value> = genres.iter().map(|g| Value::String(g.id.clone())).collect();

    let mut updated = 0;
    for entry in config.iter_mut() {
        let Some(object) = entry.as_object_mut() else {
            continue;
        };
        if !object.get(GENRE_FLAG).is_some_and(is_truthy) {
            continue;
        }
        // 已有的键保持原位置
        object.insert(OPTIONS_KEY.to_string(), Value::Array(names.clone()));
        object.insert(IDS_KEY.to_string(), Value::Array(ids.clone()));
        updated += 1;
    }
    updated
}

/// 按 JSON 的自然真值判断 isGenre
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// 制表符缩进, 非 ASCII 字符不转义, 末尾换行
pub fn render(config: &FilterConfig) -> Result<Vec<u8>, serde_json::Error> {
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"\t"));
    config.serialize(&mut serializer)?;
    buf.push(b'\n');
    Ok(buf)
}

/// 整体回写: 先写临时文件再重命名覆盖
///
/// 符号链接写到链接目标, 原文件的权限保留到新文件上。
pub fn store(path: &Path, config: &FilterConfig) -> Result<(), UpdateError> {
    let bytes = render(config).map_err(|e| UpdateError::io(path, e.into()))?;
    let target = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let permissions = fs::metadata(&target).ok().map(|m| m.permissions());
    let tmp_path = temp_path_for(&target);

    fs::write(&tmp_path, &bytes).map_err(|e| UpdateError::io(&tmp_path, e))?;
    let replaced = match permissions {
        Some(permissions) => fs::set_permissions(&tmp_path, permissions),
        None => Ok(()),
    }
    .and_then(|()| fs::rename(&tmp_path, &target));
    if let Err(e) = replaced {
        let _ = fs::remove_file(&tmp_path);
        return Err(UpdateError::io(&target, e));
    }

    debug!("写入 {} 字节: {}", bytes.len(), target.display());
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}
