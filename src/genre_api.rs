//! 从 `{base}/api/genres` 接口获取类型列表

use crate::error::UpdateError;
use crate::http_client::{get_text, normalize_base_url};
use crate::types::Genre;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

const GENRES_PATH: &str = "/api/genres";

/// 接口返回的单项, 字段类型在转换时再校验
#[derive(Debug, Deserialize)]
struct ApiGenre {
    #[serde(default)]
    id: Value,
    #[serde(default)]
    name: Value,
}

/// 获取类型列表
pub async fn fetch_genres(base_url: &str) -> Result<Vec<Genre>, UpdateError> {
    let url = format!("{}{}", normalize_base_url(base_url)?, GENRES_PATH);
    debug!("类型接口: {}", url);

    let body = get_text(&url, None).await?;
    parse_genres(&body)
}

/// 解析接口响应
pub fn parse_genres(body: &str) -> Result<Vec<Genre>, UpdateError> {
    let value: Value = serde_json::from_str(body).map_err(|e| UpdateError::Parse {
        what: "类型接口响应".to_string(),
        source: e,
    })?;

    let Value::Array(items) = value else {
        return Err(UpdateError::Structure("响应不是数组".to_string()));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let raw: ApiGenre = serde_json::from_value(item)
                .map_err(|e| UpdateError::Structure(format!("第 {} 项: {}", index, e)))?;
            let id = coerce_id(&raw.id).ok_or_else(|| {
                UpdateError::Structure(format!("第 {} 项的 id 无效: {}", index, raw.id))
            })?;
            let name = raw.name.as_str().ok_or_else(|| {
                UpdateError::Structure(format!("第 {} 项的 name 无效: {}", index, raw.name))
            })?;
            Ok(Genre::new(id, name))
        })
        .collect()
}

/// 标量 id 转为字符串
fn coerce_id(id: &Value) -> Option<String> {
    match id {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(true) => Some("True".to_string()),
        Value::Bool(false) => Some("False".to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_genres() {
        let body = r#"[{"id": 1, "name": "Action "}, {"id": "drama", "name": "  Drama"}]"#;

        let genres = parse_genres(body).unwrap();

        assert_eq!(
            genres,
            vec![Genre::new("1", "Action"), Genre::new("drama", "Drama")]
        );
    }

    #[test]
    fn test_parse_genres_ignores_extra_fields() {
        let body = r#"[{"id": 7, "name": "Romance", "slug": "romance", "count": 120}]"#;

        let genres = parse_genres(body).unwrap();

        assert_eq!(genres, vec![Genre::new("7", "Romance")]);
    }

    #[test]
    fn test_parse_genres_empty() {
        assert!(parse_genres("[]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_genres_malformed_json() {
        assert!(matches!(
            parse_genres("<html>502 Bad Gateway</html>"),
            Err(UpdateError::Parse { .. })
        ));
    }

    #[test]
    fn test_parse_genres_bad_shape() {
        assert!(matches!(
            parse_genres(r#"{"genres": []}"#),
            Err(UpdateError::Structure(_))
        ));
        assert!(matches!(
            parse_genres(r#"[{"name": "Action"}]"#),
            Err(UpdateError::Structure(_))
        ));
        assert!(matches!(
            parse_genres(r#"[{"id": 1}]"#),
            Err(UpdateError::Structure(_))
        ));
        assert!(matches!(
            parse_genres(r#"[{"id": 1, "name": 2}]"#),
            Err(UpdateError::Structure(_))
        ));
        assert!(matches!(
            parse_genres(r#"["Action"]"#),
            Err(UpdateError::Structure(_))
        ));
    }

    #[test]
    fn test_coerce_id() {
        assert_eq!(coerce_id(&json!(12)).as_deref(), Some("12"));
        assert_eq!(coerce_id(&json!(2.5)).as_deref(), Some("2.5"));
        assert_eq!(coerce_id(&json!("abc")).as_deref(), Some("abc"));
        assert_eq!(coerce_id(&json!(true)).as_deref(), Some("True"));
        assert_eq!(coerce_id(&json!(false)).as_deref(), Some("False"));
        assert_eq!(
            coerce_id(&json!(123456789012345678901234567890u128)).as_deref(),
            Some("123456789012345678901234567890")
        );
        assert_eq!(coerce_id(&Value::Null), None);
        assert_eq!(coerce_id(&json!([1])), None);
    }
}
