use worksheet_form::*;

fn ten_rows_config() -> LayoutConfig {
    let mut settings = LayoutSettings::default();
    settings.margins.bottom = 50.0;
    settings.row.row_height = 56.0;
    LayoutConfig::new(settings).unwrap()
}

#[test]
fn test_stats_no_items() {
    let stats = calculate_statistics(0, &ten_rows_config()).unwrap();

    assert_eq!(stats.items, 0);
    assert_eq!(stats.pages, 1);
    assert_eq!(stats.rows_on_last_page, 0);
    assert_eq!(stats.fields, 0);
}

#[test]
fn test_stats_partial_last_page() {
    let stats = calculate_statistics(23, &ten_rows_config()).unwrap();

    assert_eq!(stats.rows_per_page, 10);
    // 23 rows: 10 + 10 + 3
    assert_eq!(stats.pages, 3);
    assert_eq!(stats.rows_on_last_page, 3);
    // Note field plus two choice widgets per item
    assert_eq!(stats.fields, 69);
}

#[test]
fn test_stats_exactly_full_pages() {
    let stats = calculate_statistics(20, &ten_rows_config()).unwrap();

    assert_eq!(stats.pages, 2);
    assert_eq!(stats.rows_on_last_page, 10);
}

#[test]
fn test_stats_agree_with_layout() {
    let config = ten_rows_config();
    let sources: Vec<String> = (0..31).map(|i| format!("Form {}", i)).collect();
    let items = config.items(&sources).unwrap();
    let document = layout("Client", &items, &config).unwrap();
    let stats = calculate_statistics(items.len(), &config).unwrap();

    assert_eq!(stats.pages, document.page_count());
    assert_eq!(stats.fields, document.field_count());
}
