// 표시용 포맷터 - 크기, 날짜, 개수

use chrono::{DateTime, Local};
use std::time::SystemTime;

const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];

/// 파일 크기를 사람이 읽기 쉬운 형식으로 변환 (1024 단위, 소수 한 자리)
pub fn format_file_size(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{} B", bytes);
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", value, UNITS[unit])
}

/// 패널 날짜 컬럼 형식: "YYYY-MM-DD HH:MM" (16자 고정)
pub fn format_date(time: SystemTime) -> String {
    let datetime: DateTime<Local> = time.into();
    datetime.format("%Y-%m-%d %H:%M").to_string()
}

/// 수정 시간이 없을 수 있는 엔트리용
pub fn format_optional_date(time: Option<SystemTime>) -> String {
    time.map(format_date).unwrap_or_default()
}

/// 개수에 따라 단수/복수형 반환
pub fn pluralize(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}
