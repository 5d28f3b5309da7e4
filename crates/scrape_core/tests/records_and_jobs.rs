use pretty_assertions::assert_eq;
use scrape_core::{
    capitalize, distinct_fields, ExtractRule, MergeMode, PaginationPlan, ScrapeSession,
    ScrapedRecord,
};

#[test]
fn capitalize_uppercases_only_the_first_character() {
    assert_eq!(capitalize("span"), "Span");
    assert_eq!(capitalize("h1"), "H1");
    assert_eq!(capitalize("dIV"), "DIV");
    assert_eq!(capitalize(""), "");
    assert_eq!(capitalize("ärm"), "Ärm");
}

#[test]
fn field_name_defaults_to_capitalized_tag() {
    let rule = ExtractRule::new("span", "class", "price");
    assert_eq!(rule.field_name(), "Span");

    let rule = rule.with_field("price");
    assert_eq!(rule.field_name(), "price");
}

#[test]
fn pagination_builds_naive_page_urls() {
    let plan = PaginationPlan::new("https://shop.example/list").with_max_pages(3);
    let urls: Vec<String> = plan.pages().map(|p| p.url()).collect();
    assert_eq!(
        urls,
        vec![
            "https://shop.example/list?page=1",
            "https://shop.example/list?page=2",
            "https://shop.example/list?page=3",
        ]
    );

    // An existing query string is not merged.
    let plan = PaginationPlan::new("https://shop.example/list?sort=asc")
        .with_page_param("p")
        .with_max_pages(1);
    let urls: Vec<String> = plan.pages().map(|p| p.url()).collect();
    assert_eq!(urls, vec!["https://shop.example/list?sort=asc?p=1"]);
}

#[test]
fn pagination_defaults_to_five_pages() {
    let plan = PaginationPlan::new("https://shop.example/list");
    assert_eq!(plan.page_param, "page");
    assert_eq!(plan.pages().count(), 5);
}

#[test]
fn record_serializes_as_single_key_object() {
    let record = ScrapedRecord::new("Span", "$10");
    let json = serde_json::to_string(&record).unwrap();
    assert_eq!(json, r#"{"Span":"$10"}"#);

    let back: ScrapedRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(back, record);
}

#[test]
fn record_rejects_objects_without_exactly_one_key() {
    assert!(serde_json::from_str::<ScrapedRecord>("{}").is_err());
    assert!(serde_json::from_str::<ScrapedRecord>(r#"{"A":"1","B":"2"}"#).is_err());
}

#[test]
fn distinct_fields_keep_first_seen_order() {
    let records = vec![
        ScrapedRecord::new("Span", "a"),
        ScrapedRecord::new("H1", "b"),
        ScrapedRecord::new("Span", "c"),
    ];
    assert_eq!(distinct_fields(&records), vec!["Span", "H1"]);
}

#[test]
fn session_apply_respects_merge_mode() {
    let mut session = ScrapeSession::new();
    session.apply(vec![ScrapedRecord::new("Span", "a")], MergeMode::Append);
    session.apply(vec![ScrapedRecord::new("Span", "b")], MergeMode::Append);
    assert_eq!(session.len(), 2);

    session.apply(vec![ScrapedRecord::new("H1", "c")], MergeMode::Replace);
    assert_eq!(session.records(), &[ScrapedRecord::new("H1", "c")]);
}
