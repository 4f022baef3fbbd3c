// ==========================================
// 造船工单时间线引擎 - 采购描述拆分
// ==========================================
// 职责: 自由文本采购描述 → 结构化条目列表
// 规则:
// 1) 空/空白 → 空列表
// 2) 以 "(N) " 为分隔; 非空片段 ≥ 2 → 编号列表,否则整段为单条
// 3) 每段: TRIM → 去除时间类元注释句 → 去掉一个结尾句号
// 4) 冒号位于前 32 列且冒号前全为大写字母/空格 → 拆出标题
// 5) 可选: "— instalaci..." 安装备注单独抽出
// 说明: 无法识别的文本原样作为单条返回
// ==========================================

use crate::config::engine_config::DEFAULT_TITLE_MAX_COLUMN;
use crate::config::EngineConfig;
use crate::domain::view::ParsedItem;
use regex::Regex;
use std::sync::OnceLock;

fn item_delimiter() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s*\(\d+\)\s+").expect("item delimiter regex"))
}

/// 时间类元注释: "<冠词/指示词> <短主语> <系动词> a aprox. N <单位>..."
fn timing_noise() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)(^|[.;,])\s*(?:el|la|los|las|este|esta|estos|estas|ese|esa|esos|esas|dicho|dicha|the|this|that)\s+(?:[\p{L}\d-]+\s+){0,3}?(?:es|está|esta|están|estan|son|queda|quedan|is|are)\s+(?:a\s+|at\s+)?(?:aprox(?:imadamente|\.)?|approximately|approx\.?|unos|unas|~)\s*\d+\s*(?:d[ií]as?|semanas?|mes(?:es)?|days?|weeks?|months?)\b[^.]*\.?\s*$",
        )
        .expect("timing noise regex")
    })
}

fn installation_note() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\s*—\s*(instalaci[^.—]*)\.?").expect("installation note regex")
    })
}

// ==========================================
// DescriptionParser - 描述拆分器
// ==========================================
pub struct DescriptionParser {
    title_max_column: usize,
}

impl DescriptionParser {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            title_max_column: config.title_max_column,
        }
    }

    /// 拆分描述（不抽取安装备注）
    pub fn parse(&self, text: Option<&str>) -> Vec<ParsedItem> {
        self.segments(text)
            .into_iter()
            .filter_map(|segment| self.parse_segment(&segment))
            .collect()
    }

    /// 拆分描述并抽取安装备注到 nota
    pub fn parse_with_notes(&self, text: Option<&str>) -> Vec<ParsedItem> {
        self.parse(text)
            .into_iter()
            .map(extract_installation_note)
            .collect()
    }

    /// 切分条目片段
    fn segments(&self, text: Option<&str>) -> Vec<String> {
        let text = match text.map(str::trim) {
            Some(t) if !t.is_empty() => t,
            _ => return Vec::new(),
        };

        let pieces: Vec<&str> = item_delimiter()
            .split(text)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();

        if pieces.len() >= 2 {
            pieces.into_iter().map(str::to_string).collect()
        } else {
            vec![text.to_string()]
        }
    }

    /// 单段清洗 + 标题拆分
    fn parse_segment(&self, segment: &str) -> Option<ParsedItem> {
        let cleaned = clean_segment(segment);
        if cleaned.is_empty() {
            return None;
        }

        if let Some((title, body)) = self.split_title(&cleaned) {
            return Some(ParsedItem::new(Some(title), body));
        }
        Some(ParsedItem::new(None, cleaned))
    }

    /// 标题判定: 冒号列号 < 上限 且 冒号前全为大写字母/空格
    fn split_title(&self, text: &str) -> Option<(String, String)> {
        let colon = text.find(':')?;
        let before = &text[..colon];
        if before.chars().count() >= self.title_max_column {
            return None;
        }

        let title = before.trim();
        let has_letter = title.chars().any(char::is_alphabetic);
        let all_upper = title
            .chars()
            .all(|c| c == ' ' || (c.is_alphabetic() && c.is_uppercase()));
        if !has_letter || !all_upper {
            return None;
        }

        let body = text[colon + 1..].trim();
        Some((title.to_string(), body.to_string()))
    }
}

impl Default for DescriptionParser {
    fn default() -> Self {
        Self {
            title_max_column: DEFAULT_TITLE_MAX_COLUMN,
        }
    }
}

/// 便捷入口（默认配置）
pub fn parse_description(text: Option<&str>) -> Vec<ParsedItem> {
    DescriptionParser::default().parse(text)
}

/// 段落清洗
fn clean_segment(segment: &str) -> String {
    let mut current = segment.trim().to_string();

    // 元注释可能连续出现,循环剥离
    loop {
        let stripped = timing_noise().replace(&current, "$1").trim().to_string();
        if stripped == current {
            break;
        }
        current = stripped;
    }

    let current = current.trim_end_matches([',', ';']).trim_end();
    strip_one_period(current).to_string()
}

fn strip_one_period(text: &str) -> &str {
    text.strip_suffix('.').map(str::trim_end).unwrap_or(text)
}

fn extract_installation_note(mut item: ParsedItem) -> ParsedItem {
    let re = installation_note();
    let (nota, body) = match re.captures(&item.body) {
        Some(caps) => {
            let nota = caps
                .get(1)
                .map(|m| m.as_str().trim().to_string())
                .filter(|s| !s.is_empty());
            let body = re.replace(&item.body, "").trim().to_string();
            (nota, strip_one_period(&body).to_string())
        }
        None => return item,
    };
    item.nota = nota;
    item.body = body;
    item
}
