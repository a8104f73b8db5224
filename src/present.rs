use url::Url;

/// 答案原文链接，带 `#:~:text=` 片段，浏览器打开后高亮答案文字
///
/// 无法解析的地址（如相对路径）直接拼接片段，链接总会给出。
pub fn answer_link(source_url: &str, answer: &str) -> String {
    let fragment = format!(":~:text={answer}");
    match Url::parse(source_url) {
        Ok(mut url) => {
            url.set_fragment(Some(&fragment));
            url.into()
        }
        Err(_) => format!("{source_url}#{}", fragment.replace(' ', "%20")),
    }
}

/// 未命中时的搜索链接
pub fn search_url(base_url: &str, query_param: &str, query: &str) -> Result<String, url::ParseError> {
    let url = Url::parse_with_params(base_url, &[(query_param, query)])?;
    Ok(url.into())
}

/// 条目图片地址，相对路径按 `base_url` 解析
pub fn resolve_image(base_url: Option<&str>, image: &str) -> Result<String, url::ParseError> {
    match Url::parse(image) {
        Ok(absolute) => Ok(absolute.into()),
        Err(url::ParseError::RelativeUrlWithoutBase) => match base_url {
            Some(base) => Ok(Url::parse(base)?.join(image)?.into()),
            None => Err(url::ParseError::RelativeUrlWithoutBase),
        },
        Err(e) => Err(e),
    }
}
