use serde::Serialize;
use serde_json::Value;

/// 远程获取的一条类型, 名称已去除首尾空白, id 已转为字符串
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Genre {
    pub id: String,
    pub name: String,
}

impl Genre {
    pub fn new(id: impl Into<String>, name: impl AsRef<str>) -> Self {
        Self {
            id: id.into(),
            name: name.as_ref().trim().to_string(),
        }
    }
}

/// filters.json 的内容, 按原顺序保存的筛选项数组
pub type FilterConfig = Vec<Value>;
