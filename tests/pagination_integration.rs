//! Integration tests for pagination links and metadata.

use lamina::prelude::*;
use pretty_assertions::assert_eq;

const URL: &str = "http://api.test/accounts?include=owner&page%5Bnumber%5D=3&page%5Bsize%5D=20";

#[test]
fn test_middle_page_links() {
    // 95 records at 20 per page: pages 1..=5
    let pager = PagerState::new(3, 20, 95);
    assert_eq!(pager.total_pages(), 5);

    let links = build_links(URL, &pager, "page[number]").unwrap();
    assert!(links.first.contains("page%5Bnumber%5D=1"));
    assert!(links.last.contains("page%5Bnumber%5D=5"));
    assert!(links.next.as_deref().unwrap().contains("page%5Bnumber%5D=4"));
    assert!(links.prev.as_deref().unwrap().contains("page%5Bnumber%5D=2"));
}

#[test]
fn test_first_page_has_null_prev() {
    let pager = PagerState::new(1, 20, 95);
    let links = build_links(URL, &pager, "page[number]").unwrap();
    assert!(links.prev.is_none());
    assert!(links.next.is_some());
}

#[test]
fn test_final_page_has_null_next() {
    let pager = PagerState::new(5, 20, 95);
    let links = build_links(URL, &pager, "page[number]").unwrap();
    assert!(links.next.is_none());
}

#[test]
fn test_zero_records_keeps_last_at_page_one() {
    let pager = PagerState::new(1, 20, 0);
    assert_eq!(pager.total_pages(), 0);

    let links = build_links(URL, &pager, "page[number]").unwrap();
    assert!(links.last.contains("page%5Bnumber%5D=1"));
    assert!(links.next.is_none());
    assert!(links.prev.is_none());
}

#[test]
fn test_links_only_touch_the_page_parameter() {
    let pager = PagerState::new(3, 20, 95);
    let links = build_links(URL, &pager, "page[number]").unwrap();

    for link in [
        links.first.as_str(),
        links.last.as_str(),
        links.next.as_deref().unwrap(),
        links.prev.as_deref().unwrap(),
    ] {
        assert!(link.contains("include=owner"));
        assert!(link.contains("page%5Bsize%5D=20"));
    }
}

#[test]
fn test_meta_carries_total_count() {
    let pager = PagerState::new(3, 20, 95);
    assert_eq!(build_meta(&pager).count, 95);
}

#[test]
fn test_page_request_clamps_size_to_ceiling() {
    let config = PageConfig::default();
    let request = PageRequest::from_params(
        [("page[number]", "2"), ("page[size]", "500")],
        &config,
    );
    assert_eq!(request.number, 2);
    assert_eq!(request.size, 50);

    let pager = request.pager(95);
    assert_eq!(pager.current_page, 2);
    assert_eq!(pager.total_pages(), 2);
}

#[test]
fn test_next_prev_render_as_null_keys() {
    let pager = PagerState::new(1, 20, 10);
    let links = build_links(URL, &pager, "page[number]").unwrap();
    let json = serde_json::to_value(&links).unwrap();

    let keys: Vec<&str> = json.as_object().unwrap().keys().map(|k| k.as_str()).collect();
    assert_eq!(keys, vec!["first", "last", "next", "prev"]);
    assert!(json["prev"].is_null());
}
