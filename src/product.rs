//! Product records as served by the catalogue endpoint

use serde::{Deserialize, Serialize};

/// A single catalogue entry.
///
/// The endpoint sends more fields (category, image, rating); they are
/// ignored on decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub title: String,
    pub price: f64,
    pub description: String,
}

impl Product {
    pub fn new(id: u64, title: impl Into<String>, price: f64, description: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            price,
            description: description.into(),
        }
    }

    /// Price as it is displayed and searched
    pub fn price_text(&self) -> String {
        number_text(self.price)
    }
}

/// Render a number the way a browser prints it in a table cell.
///
/// Integral values drop the fraction, everything else uses the shortest
/// decimal that round-trips.
pub fn number_text(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        // covers -0.0
        return "0".to_string();
    }
    if value.fract() == 0.0 && value.abs() < 1e21 {
        return format!("{:.0}", value);
    }
    format!("{}", value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(109.95, "109.95")]
    #[case(10.0, "10")]
    #[case(22.3, "22.3")]
    #[case(0.1, "0.1")]
    #[case(-0.0, "0")]
    #[case(1.99, "1.99")]
    #[case(695.0, "695")]
    fn number_text_matches_browser_rendering(#[case] value: f64, #[case] expected: &str) {
        assert_eq!(number_text(value), expected);
    }

    #[test]
    fn decode_ignores_extra_fields() {
        let body = r#"{
            "id": 1,
            "title": "Fjallraven - Foldsack No. 1 Backpack, Fits 15 Laptops",
            "price": 109.95,
            "description": "Your perfect pack for everyday use",
            "category": "men's clothing",
            "image": "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg",
            "rating": { "rate": 3.9, "count": 120 }
        }"#;
        let product: Product = serde_json::from_str(body).unwrap();
        assert_eq!(product.id, 1);
        assert_eq!(product.price_text(), "109.95");
    }

    #[test]
    fn decode_accepts_integer_prices() {
        let product: Product =
            serde_json::from_str(r#"{"id":9,"title":"Drive","price":64,"description":"USB"}"#)
                .unwrap();
        assert_eq!(product.price, 64.0);
        assert_eq!(product.price_text(), "64");
    }
}
