//! 从 `{base}/filter` 页面抓取类型列表
//!
//! 页面结构:
//! ```html
//! <div class="advanced-genres">
//!     <div class="advance-item">
//!         <span data-genre="1"></span>
//!         <label>Action</label>
//!     </div>
//! </div>
//! ```
//! DOM 按文档顺序遍历成开标签 / 文本 / 闭标签事件, 交给 [`GenreMatcher`] 状态机处理。

use crate::error::UpdateError;
use crate::http_client::{get_text, normalize_base_url};
use crate::types::Genre;
use ego_tree::iter::Edge;
use scraper::node::Element;
use scraper::{Html, Node};
use tracing::{debug, warn};

const FILTER_PATH: &str = "/filter";

const CONTAINER_CLASS: &str = "advanced-genres";
const ITEM_CLASS: &str = "advance-item";
const ID_ATTR: &str = "data-genre";

/// 抓取筛选页并解析类型列表, 页面结构缺失时返回空列表
pub async fn fetch_genres(base_url: &str) -> Result<Vec<Genre>, UpdateError> {
    let base = normalize_base_url(base_url)?;
    let url = format!("{}{}", base, FILTER_PATH);
    let referer = format!("{}/", base);
    debug!("筛选页: {}", url);

    let html = get_text(&url, Some(&referer)).await?;
    let genres = parse_genres(&html);
    if genres.is_empty() {
        warn!("页面中未找到类型列表: {}", url);
    }
    Ok(genres)
}

/// 解析筛选页 HTML
pub fn parse_genres(html: &str) -> Vec<Genre> {
    let document = Html::parse_document(html);
    let mut matcher = GenreMatcher::default();
    for edge in document.tree.root().traverse() {
        match edge {
            Edge::Open(node) => match node.value() {
                Node::Element(element) => matcher.open(element),
                Node::Text(text) => matcher.text(text),
                _ => {}
            },
            Edge::Close(node) => {
                if let Node::Element(element) = node.value() {
                    matcher.close(element);
                }
            }
        }
    }
    matcher.finish()
}

/// 当前类型项已收集到的内容
#[derive(Debug)]
struct ItemScope {
    /// 进入类型项时容器内嵌套 div 的层数
    container_depth: usize,
    /// 类型项内部嵌套 div 的层数
    depth: usize,
    id: Option<String>,
    name: String,
}

impl ItemScope {
    fn new(container_depth: usize) -> Self {
        Self {
            container_depth,
            depth: 0,
            id: None,
            name: String::new(),
        }
    }

    fn observe(&mut self, element: &Element) {
        if let Some(id) = element.attr(ID_ATTR) {
            self.id = Some(id.to_string());
        }
        if element.name() == "div" {
            self.depth += 1;
        }
    }

    fn into_genre(self) -> Option<Genre> {
        let id = self.id.filter(|id| !id.is_empty())?;
        if self.name.trim().is_empty() {
            return None;
        }
        Some(Genre::new(id, &self.name))
    }
}

#[derive(Debug, Default)]
enum State {
    #[default]
    Outside,
    InContainer {
        depth: usize,
    },
    InItem(ItemScope),
    InLabel(ItemScope),
}

#[derive(Debug, Default)]
pub struct GenreMatcher {
    state: State,
    genres: Vec<Genre>,
    skipped: usize,
}

impl GenreMatcher {
    pub fn open(&mut self, element: &Element) {
        self.state = match std::mem::take(&mut self.state) {
            State::Outside if is_div_with_class(element, CONTAINER_CLASS) => {
                State::InContainer { depth: 0 }
            }
            State::Outside => State::Outside,
            State::InContainer { depth } if is_div_with_class(element, ITEM_CLASS) => {
                State::InItem(ItemScope::new(depth))
            }
            State::InContainer { depth } if element.name() == "div" => {
                State::InContainer { depth: depth + 1 }
            }
            state @ State::InContainer { .. } => state,
            State::InItem(mut scope) => {
                if element.name() == "label" {
                    if let Some(id) = element.attr(ID_ATTR) {
                        scope.id = Some(id.to_string());
                    }
                    State::InLabel(scope)
                } else {
                    scope.observe(element);
                    State::InItem(scope)
                }
            }
            State::InLabel(mut scope) => {
                scope.observe(element);
                State::InLabel(scope)
            }
        };
    }

    pub fn text(&mut self, text: &str) {
        if let State::InLabel(scope) = &mut self.state {
            scope.name.push_str(text);
        }
    }

    pub fn close(&mut self, element: &Element) {
        let is_div = element.name() == "div";
        self.state = match std::mem::take(&mut self.state) {
            State::InLabel(scope) if element.name() == "label" => State::InItem(scope),
            State::InItem(mut scope) if is_div && scope.depth > 0 => {
                scope.depth -= 1;
                State::InItem(scope)
            }
            State::InLabel(mut scope) if is_div && scope.depth > 0 => {
                scope.depth -= 1;
                State::InLabel(scope)
            }
            State::InItem(scope) | State::InLabel(scope) if is_div => {
                let depth = scope.container_depth;
                self.finish_item(scope);
                State::InContainer { depth }
            }
            State::InContainer { depth } if is_div && depth > 0 => {
                State::InContainer { depth: depth - 1 }
            }
            State::InContainer { .. } if is_div => State::Outside,
            state => state,
        };
    }

    fn finish_item(&mut self, scope: ItemScope) {
        match scope.into_genre() {
            Some(genre) => self.genres.push(genre),
            None => self.skipped += 1,
        }
    }

    pub fn finish(self) -> Vec<Genre> {
        if self.skipped > 0 {
            debug!("跳过 {} 个不完整的类型项", self.skipped);
        }
        self.genres
    }
}

fn is_div_with_class(element: &Element, class: &str) -> bool {
    element.name() == "div" && element.classes().any(|c| c == class)
}
