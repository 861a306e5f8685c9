//! Catalog payloads used across tests.

use serde_json::{json, Value};

/// A single complete record: "Widget", $5.00, `x.png`.
#[must_use]
pub fn widget_payload() -> Value {
    json!([{"fields": {"name": "Widget", "price": 500, "image": [{"url": "x.png"}]}}])
}

/// `count` complete records named "Product 1".."Product N", priced N dollars.
#[must_use]
pub fn numbered_payload(count: usize) -> Value {
    Value::Array(
        (1..=count)
            .map(|i| {
                json!({
                    "id": format!("rec{i}"),
                    "fields": {
                        "name": format!("Product {i}"),
                        "price": i * 100,
                        "image": [{"url": format!("https://img.test/{i}.png")}]
                    }
                })
            })
            .collect(),
    )
}

/// Records exercising every kind of missing or malformed field.
#[must_use]
pub fn sparse_payload() -> Value {
    json!([
        {},
        {"fields": null},
        {"fields": {}},
        {"fields": {"name": "Priceless", "image": []}},
        {"fields": {"name": 42, "price": "free", "image": [{"src": "wrong-key.png"}]}},
        {"fields": {"name": "Sixth", "price": 100}}
    ])
}
