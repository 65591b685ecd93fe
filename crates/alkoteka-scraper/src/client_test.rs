use serde_json::json;

use super::*;

fn test_client() -> AlkotekaClient {
    AlkotekaClient::new("https://alkoteka.com", 5, "alkoteka-test/0.1")
        .expect("failed to build test client")
}

fn test_locality() -> LocalityRecord {
    serde_json::from_value(json!({
        "uuid": "985b3eea-46df-4d85-b1be-05e8e53a1e79",
        "slug": "krasnodar",
        "name": "Краснодар",
    }))
    .expect("failed to build test locality")
}

#[test]
fn listing_url_carries_fixed_page_and_size() {
    let client = test_client();
    let url = client.listing_url("u-1", "vino");
    assert_eq!(
        url,
        "https://alkoteka.com/web-api/v1/product?city_uuid=u-1&root_category_slug=vino&page=1&per_page=10000"
    );
}

#[test]
fn detail_url_embeds_slug_and_city() {
    let client = test_client();
    let url = client.detail_url("u-1", "cola-05");
    assert_eq!(
        url,
        "https://alkoteka.com/web-api/v1/product/cola-05?city_uuid=u-1"
    );
}

#[test]
fn base_url_trailing_slash_stripped() {
    let client = AlkotekaClient::new("https://alkoteka.com/", 5, "alkoteka-test/0.1").unwrap();
    let url = client.detail_url("u-1", "cola-05");
    assert!(url.starts_with("https://alkoteka.com/web-api/"));
}

#[test]
fn locality_cookie_names_both_cookies() {
    let cookie = locality_cookie(&test_locality()).unwrap();
    assert!(cookie.starts_with("alkoteka_locality="));
    assert!(cookie.ends_with("; alkoteka_age_confirm=true"));
}

#[test]
fn locality_cookie_value_has_no_raw_separators() {
    let cookie = locality_cookie(&test_locality()).unwrap();
    let value = cookie
        .strip_suffix("; alkoteka_age_confirm=true")
        .expect("age confirm suffix missing");
    // The serialized JSON contains quotes, commas, and Cyrillic text; all
    // of it must be percent-encoded inside the cookie value.
    assert!(!value.contains('"'));
    assert!(!value.contains(','));
    assert!(value.is_ascii());
}

#[test]
fn locality_cookie_roundtrips_the_record() {
    let locality = test_locality();
    let cookie = locality_cookie(&locality).unwrap();
    let encoded = cookie
        .strip_prefix("alkoteka_locality=")
        .and_then(|rest| rest.strip_suffix("; alkoteka_age_confirm=true"))
        .expect("unexpected cookie layout");
    let decoded = percent_encoding::percent_decode_str(encoded)
        .decode_utf8()
        .expect("cookie value is not valid percent-encoded UTF-8");
    let parsed: LocalityRecord = serde_json::from_str(&decoded).expect("cookie is not JSON");
    assert_eq!(parsed.uuid, locality.uuid);
    assert_eq!(parsed.slug, locality.slug);
    assert_eq!(parsed.extra, locality.extra);
}
