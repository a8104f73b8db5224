use crate::config::SearchConfig;
use crate::engine::MatchResult;
use crate::present::{answer_link, resolve_image, search_url};

/// 一行输入：识别文本，可选以制表符分隔的置信度
pub fn parse_line(line: &str) -> Option<(&str, Option<f32>)> {
    let (text, confidence) = match line.rsplit_once('\t') {
        Some((text, raw)) => match raw.trim().parse::<f32>() {
            Ok(c) => (text, Some(c)),
            Err(_) => (line, None),
        },
        None => (line, None),
    };
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some((text, confidence))
    }
}

/// 将匹配结果渲染为展示文本
pub fn render(result: &MatchResult, search: &SearchConfig) -> String {
    match result {
        MatchResult::Found {
            answer,
            source_url,
            image_url,
        } => {
            let mut out = format!("{answer}\n查看完整答案: {}", answer_link(source_url, answer));
            if let Some(image) = image_url {
                match resolve_image(search.image_base_url.as_deref(), image) {
                    Ok(src) => out.push_str(&format!("\n图片: {src}")),
                    Err(e) => log::warn!("图片地址无效 {image}: {e}"),
                }
            }
            out
        }
        MatchResult::NotFound { fallback_query } => {
            match search_url(&search.base_url, &search.query_param, fallback_query) {
                Ok(url) => format!("未匹配到问答，转为搜索: {url}"),
                Err(e) => {
                    log::error!("搜索地址无效 {}: {e}", search.base_url);
                    format!("未匹配到问答: {fallback_query}")
                }
            }
        }
    }
}
