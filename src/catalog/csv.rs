//! `;` 区切りCSVの読み書き
//!
//! 引用符で囲まれたフィールドは `;` や改行を含んでよく、`""` は `"` を表す。
//! 読み込みはレコード単位で、閉じられていない引用符は不正レコードとして印を付ける。

use std::borrow::Cow;

pub const DELIMITER: char = ';';
const BOM: char = '\u{feff}';

/// 1レコード分のフィールド
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvRecord {
    /// レコード開始行（1始まり）
    pub line: usize,
    pub fields: Vec<String>,
    /// 引用符が閉じられないままファイル末尾に達した
    pub unterminated: bool,
}

impl CsvRecord {
    /// 空行（フィールド1つで空）か
    pub fn is_blank(&self) -> bool {
        self.fields.len() == 1 && self.fields[0].trim().is_empty()
    }
}

/// 文字列全体をレコードに分割する
pub fn parse_records(content: &str) -> Vec<CsvRecord> {
    let content = content.strip_prefix(BOM).unwrap_or(content);

    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut line = 1;
    let mut record_line = 1;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    field.push('"');
                    chars.next();
                }
                '"' => in_quotes = false,
                _ => {
                    if c == '\n' {
                        line += 1;
                    }
                    field.push(c);
                }
            }
            continue;
        }

        match c {
            '"' if field.trim().is_empty() => {
                field.clear();
                in_quotes = true;
            }
            DELIMITER => fields.push(std::mem::take(&mut field)),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' | '\r' => {
                fields.push(std::mem::take(&mut field));
                records.push(CsvRecord {
                    line: record_line,
                    fields: std::mem::take(&mut fields),
                    unterminated: false,
                });
                line += 1;
                record_line = line;
            }
            _ => field.push(c),
        }
    }

    if in_quotes || !field.is_empty() || !fields.is_empty() {
        fields.push(field);
        records.push(CsvRecord {
            line: record_line,
            fields,
            unterminated: in_quotes,
        });
    }

    records
}

/// 必要な場合だけ引用符で囲む
pub fn escape_field(value: &str) -> Cow<'_, str> {
    if value.contains(DELIMITER) || value.contains('"') || value.contains('\n') || value.contains('\r') {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

/// 1レコードを改行なしの行にする
pub fn format_record<S: AsRef<str>>(fields: &[S]) -> String {
    fields
        .iter()
        .map(|f| escape_field(f.as_ref()))
        .collect::<Vec<_>>()
        .join(";")
}

/// ヘッダーとレコードからファイル内容を作る（BOM付きUTF-8、CRLF）
pub fn to_csv_string<S: AsRef<str>>(header: &[&str], rows: &[Vec<S>]) -> String {
    let mut out = String::new();
    out.push(BOM);
    out.push_str(&format_record(header));
    for row in rows {
        out.push_str("\r\n");
        out.push_str(&format_record(row));
    }
    out.push_str("\r\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(records: &[CsvRecord]) -> Vec<Vec<&str>> {
        records
            .iter()
            .map(|r| r.fields.iter().map(String::as_str).collect())
            .collect()
    }

    #[test]
    fn test_parse_simple() {
        let records = parse_records("a;b;c\nd;;f\n");
        assert_eq!(fields(&records), vec![vec!["a", "b", "c"], vec!["d", "", "f"]]);
        assert_eq!(records[1].line, 2);
    }

    #[test]
    fn test_parse_quoted_fields() {
        let records = parse_records("\"a;b\";\"он сказал \"\"мох\"\"\";c\r\n");
        assert_eq!(fields(&records), vec![vec!["a;b", "он сказал \"мох\"", "c"]]);
    }

    #[test]
    fn test_parse_multiline_field() {
        let records = parse_records("x;\"строка1\nстрока2\";y\nz;w;v");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].fields[1], "строка1\nстрока2");
        assert_eq!(records[1].line, 3);
        assert_eq!(fields(&records[1..]), vec![vec!["z", "w", "v"]]);
    }

    #[test]
    fn test_parse_strips_bom() {
        let records = parse_records("\u{feff}Ссылка;Описание\n");
        assert_eq!(records[0].fields[0], "Ссылка");
    }

    #[test]
    fn test_parse_unterminated_quote() {
        let records = parse_records("a;b\n\"open;c\nd");
        assert_eq!(records.len(), 2);
        assert!(!records[0].unterminated);
        assert!(records[1].unterminated);
    }

    #[test]
    fn test_blank_record() {
        let records = parse_records("a\n\nb\n");
        assert_eq!(records.len(), 3);
        assert!(records[1].is_blank());
    }

    #[test]
    fn test_escape_field() {
        assert_eq!(escape_field("мох"), "мох");
        assert_eq!(escape_field("a;b"), "\"a;b\"");
        assert_eq!(escape_field("5\" вал"), "\"5\"\" вал\"");
        assert_eq!(escape_field("a\nb"), "\"a\nb\"");
    }

    #[test]
    fn test_write_then_parse() {
        let rows = vec![vec!["Evernyl; Givaudan", "Мох \"дубовый\"\nсухой"]];
        let content = to_csv_string(&["name", "description"], &rows);
        let records = parse_records(&content);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].fields, vec!["Evernyl; Givaudan", "Мох \"дубовый\"\nсухой"]);
    }
}
