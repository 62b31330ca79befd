use std::path::Path;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: &str = "...";
const PATH_ELLIPSIS: &str = "/...";

/// 경로를 최대 너비에 맞춰 축약한다.
/// 홈 디렉토리는 `~`로 표시하고, 길면 `앞/.../뒤` 형태로 생략한다.
pub fn truncate_path(path: &Path, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }

    let text = shorten_home(path);
    if text.width() <= max_width {
        return text;
    }

    let parts: Vec<&str> = text.split('/').filter(|s| !s.is_empty()).collect();
    if parts.len() <= 2 {
        return truncate_from_start(&text, max_width);
    }

    let first = if text.starts_with('~') {
        "~".to_string()
    } else if text.starts_with('/') {
        format!("/{}", parts[0])
    } else {
        parts[0].to_string()
    };

    let first_width = first.width() + PATH_ELLIPSIS.width();
    if first_width >= max_width {
        return truncate_from_start(&text, max_width);
    }
    let available_width = max_width - first_width;

    let mut tail: Vec<&str> = Vec::new();
    let mut used = 0;
    for part in parts.iter().skip(1).rev() {
        let part_width = part.width() + 1;
        if used + part_width > available_width {
            break;
        }
        tail.insert(0, part);
        used += part_width;
    }

    if tail.is_empty() {
        return truncate_from_start(&text, max_width);
    }

    format!("{}{}/{}", first, PATH_ELLIPSIS, tail.join("/"))
}

/// 파일명을 최대 너비로 자른다 (확장자 보존).
///
/// `very_long_fi....txt`처럼 줄기 앞부분 + `...` + 확장자를 남긴다.
/// 확장자가 없거나 숨김 파일(`.bashrc`)은 끝에서 자른다.
pub fn truncate_name(name: &str, max_width: usize) -> String {
    if name.width() <= max_width {
        return name.to_string();
    }
    if max_width <= ELLIPSIS.width() {
        return take_prefix_by_width(name, max_width);
    }

    let (stem, ext) = match name.rfind('.') {
        Some(dot) if dot > 0 => (&name[..dot], &name[dot..]),
        _ => (name, ""),
    };

    if ext.is_empty() || ELLIPSIS.width() + ext.width() >= max_width {
        let prefix = take_prefix_by_width(name, max_width - ELLIPSIS.width());
        return format!("{}{}", prefix, ELLIPSIS);
    }

    let stem_width = max_width - ELLIPSIS.width() - ext.width();
    format!("{}{}{}", take_prefix_by_width(stem, stem_width), ELLIPSIS, ext)
}

fn shorten_home(path: &Path) -> String {
    let text = path.to_string_lossy().to_string();
    let Some(home) = dirs::home_dir() else {
        return text;
    };

    match path.strip_prefix(&home) {
        Ok(rest) if rest.as_os_str().is_empty() => "~".to_string(),
        Ok(rest) => format!("~/{}", rest.to_string_lossy()),
        Err(_) => text,
    }
}

fn truncate_from_start(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width <= ELLIPSIS.width() {
        return take_prefix_by_width(text, max_width);
    }
    let suffix_width = max_width - ELLIPSIS.width();
    format!("{}{}", ELLIPSIS, take_suffix_by_width(text, suffix_width))
}

fn take_prefix_by_width(text: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut width = 0;
    for ch in text.chars() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(1);
        if width + ch_width > max_width {
            break;
        }
        result.push(ch);
        width += ch_width;
    }
    result
}

fn take_suffix_by_width(text: &str, max_width: usize) -> String {
    let mut rev: Vec<char> = Vec::new();
    let mut width = 0;
    for ch in text.chars().rev() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(1);
        if width + ch_width > max_width {
            break;
        }
        rev.push(ch);
        width += ch_width;
    }
    rev.into_iter().rev().collect()
}
