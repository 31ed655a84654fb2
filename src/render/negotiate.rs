// Accept 头的内容协商

use super::registry::renderers;

/// 解析 Accept 头，返回 (媒体类型, q 值) 列表，保持出现顺序
///
/// 缺省或无法解析的 q 按 1.0 处理
pub fn q_values(accept: &str) -> Vec<(String, f32)> {
    accept
        .split(',')
        .filter_map(|part| {
            let mut params = part.split(';');
            let media_type = params.next()?.trim();
            if media_type.is_empty() {
                return None;
            }

            let quality = params
                .filter_map(|param| {
                    let (key, value) = param.split_once('=')?;
                    (key.trim() == "q").then(|| value.trim().parse::<f32>().unwrap_or(1.0))
                })
                .last()
                .unwrap_or(1.0);

            Some((media_type.to_string(), quality))
        })
        .collect()
}

/// 在给定的 (格式名, Content-Type) 列表中选出最合适的格式
///
/// 按 q 值降序尝试 Accept 中的媒体类型，q 相同时保持它们在头中的顺序，
/// 返回第一个已注册的；q=0 表示不可接受
pub fn best_format_in(accept: &str, formats: &[(String, String)]) -> Option<String> {
    let mut accepted: Vec<(String, f32)> = q_values(accept)
        .into_iter()
        .filter(|(_, q)| *q > 0.0)
        .collect();

    // sort_by 是稳定排序
    accepted.sort_by(|a, b| b.1.total_cmp(&a.1));

    let best = accepted.iter().find_map(|(media_type, _)| {
        formats
            .iter()
            .find(|(_, content_type)| content_type.eq_ignore_ascii_case(media_type))
            .map(|(format, _)| format.clone())
    });
    log::trace!("negotiated {:?} for Accept {:?}", best, accept);
    best
}

/// 根据 Accept 头在全局注册表里选出格式，没有匹配时返回 None
pub fn best_format_for(accept: &str) -> Option<String> {
    let formats: Vec<(String, String)> = renderers()
        .iter()
        .map(|r| (r.format().to_string(), r.content_type().to_string()))
        .collect();
    best_format_in(accept, &formats)
}
