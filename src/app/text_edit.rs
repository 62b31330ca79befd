//! 한 줄 입력 편집 (커서는 바이트 인덱스, 항상 문자 경계)

pub(super) struct LineEdit;

impl LineEdit {
    pub(super) fn insert_char(value: &mut String, cursor_pos: &mut usize, c: char) {
        if c.is_control() {
            return;
        }
        value.insert(*cursor_pos, c);
        *cursor_pos += c.len_utf8();
    }

    pub(super) fn backspace(value: &mut String, cursor_pos: &mut usize) {
        if let Some(prev) = Self::prev_boundary(value, *cursor_pos) {
            value.remove(prev);
            *cursor_pos = prev;
        }
    }

    pub(super) fn delete(value: &mut String, cursor_pos: &mut usize) {
        if *cursor_pos < value.len() {
            value.remove(*cursor_pos);
        }
    }

    pub(super) fn left(value: &str, cursor_pos: &mut usize) {
        if let Some(prev) = Self::prev_boundary(value, *cursor_pos) {
            *cursor_pos = prev;
        }
    }

    pub(super) fn right(value: &str, cursor_pos: &mut usize) {
        if let Some(c) = value[*cursor_pos..].chars().next() {
            *cursor_pos += c.len_utf8();
        }
    }

    pub(super) fn home(cursor_pos: &mut usize) {
        *cursor_pos = 0;
    }

    pub(super) fn end(value: &str, cursor_pos: &mut usize) {
        *cursor_pos = value.len();
    }

    /// Ctrl+W: 커서 앞 단어 삭제
    ///
    /// 파일 이름 기준이라 공백과 `.` `-` `_`를 단어 경계로 본다.
    pub(super) fn delete_prev_word(value: &mut String, cursor_pos: &mut usize) {
        let head = &value[..*cursor_pos];
        let trimmed = head.trim_end_matches(Self::is_word_delimiter);
        let start = trimmed
            .char_indices()
            .rev()
            .find(|(_, c)| Self::is_word_delimiter(*c))
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0);

        value.replace_range(start..*cursor_pos, "");
        *cursor_pos = start;
    }

    fn prev_boundary(value: &str, cursor_pos: usize) -> Option<usize> {
        value[..cursor_pos].char_indices().next_back().map(|(i, _)| i)
    }

    fn is_word_delimiter(c: char) -> bool {
        c.is_whitespace() || matches!(c, '.' | '-' | '_')
    }
}
