//! カタログ入出力の統合テスト

use parfy::catalog::{self, Column};
use parfy_common::{Component, MatcherConfig};
use rust_xlsxwriter::Workbook;
use tempfile::tempdir;

fn component(original: &str, eng: &str, rus: &str, description: &str, url: &str) -> Component {
    Component {
        original_name: original.to_string(),
        name_eng: eng.to_string(),
        name_rus: rus.to_string(),
        description: description.to_string(),
        short_description: "Тип: синтетика; Стойкость: 400 ч".to_string(),
        url: url.to_string(),
    }
}

#[test]
fn test_write_and_read_catalog() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("parfy_source_1.csv");

    let components = vec![
        component(
            "Evernyl (Givaudan) / Эвернил",
            "evernyl",
            "эвернил",
            "Мшистый, \"дубовый\" аккорд;\nотлично с iso e super",
            "https://example.com/evernyl",
        ),
        component("", "iso e super", "", "", ""),
    ];

    catalog::write_catalog(&components, &path).expect("書き出し失敗");

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.starts_with('\u{feff}'));
    let header_line = content.trim_start_matches('\u{feff}').lines().next().unwrap();
    let titles: Vec<&str> = Column::ALL.iter().map(|c| c.title()).collect();
    assert_eq!(header_line, titles.join(";"));

    let load = catalog::read_catalog(&path).expect("読み込み失敗");
    assert!(load.warnings.is_empty());
    assert_eq!(load.components, components);
}

#[test]
fn test_read_xlsx_catalog() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("raw.xlsx");

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "Название вещества (ENG)").unwrap();
    sheet.write_string(0, 1, "Описание").unwrap();
    sheet.write_string(0, 2, "Ссылка").unwrap();
    sheet.write_string(1, 0, "evernyl").unwrap();
    sheet.write_string(1, 1, "Мох").unwrap();
    sheet.write_string(1, 2, "https://example.com/evernyl").unwrap();
    sheet.write_string(2, 0, "iso e super").unwrap();
    workbook.save(&path).unwrap();

    let load = catalog::read_catalog(&path).expect("読み込み失敗");
    assert_eq!(load.components.len(), 2);
    assert_eq!(load.components[0].description, "Мох");
    assert_eq!(load.components[1].name_eng, "iso e super");
    assert_eq!(load.components[1].url, "");
}

#[test]
fn test_find_latest_catalog() {
    let dir = tempdir().expect("Failed to create temp dir");
    std::fs::write(dir.path().join("parfy_source_20240101_000000.csv"), "nameEng\n").unwrap();
    std::fs::write(dir.path().join("parfy_analysis_20990101_000000.csv"), "x\n").unwrap();
    std::thread::sleep(std::time::Duration::from_millis(20));
    std::fs::write(dir.path().join("parfy_source_20250101_000000.csv"), "nameEng\n").unwrap();

    let sub = dir.path().join("old");
    std::fs::create_dir(&sub).unwrap();
    std::fs::write(sub.join("parfy_source_20990101_000000.csv"), "nameEng\n").unwrap();

    let latest = catalog::find_latest_catalog(dir.path()).expect("カタログが見つからない");
    assert_eq!(
        latest.file_name().unwrap().to_string_lossy(),
        "parfy_source_20250101_000000.csv"
    );
}

#[test]
fn test_import_catalog() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("raw.csv");
    std::fs::write(
        &input,
        "originalName;description;url\n\
Evernyl (Givaudan) — 10 ml / Эвернил;Мох;u1\n\
Флакон 10 мл;;u2\n\
Амбровая база;Тёплая;u3\n\
Iso E Super;Дерево;u4\n\
broken;\"unterminated\n",
    )
    .unwrap();

    let output = dir.path().join("out").join(catalog::source_file_name("20250101_000000"));
    let report = catalog::import_catalog(&input, &output, &MatcherConfig::default())
        .expect("取り込み失敗");

    assert_eq!(report.kept, 2);
    assert_eq!(report.dropped, 2);
    assert_eq!(report.warnings.len(), 1);
    assert!(output.exists());

    let load = catalog::read_catalog(&output).unwrap();
    let names: Vec<(&str, &str)> = load
        .components
        .iter()
        .map(|c| (c.name_eng.as_str(), c.name_rus.as_str()))
        .collect();
    assert_eq!(names, vec![("evernyl", "эвернил"), ("iso e super", "")]);
    assert_eq!(load.components[0].original_name, "Evernyl (Givaudan) — 10 ml / Эвернил");
}
