//! Wire types for the MiniMart REST backend.
//!
//! These mirror the backend's JSON contract exactly, including its legacy
//! field names. Nothing outside the backend module and the catalog
//! ingestion boundary should touch them.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use minimart_core::{BackendOrderId, BranchId, Category, ProductId, UserId};

// =============================================================================
// Products
// =============================================================================

/// A product record as the backend (or any legacy producer) sends it.
///
/// Field names arrive in two conventions - camelCase (`tenMatHang`) and
/// snake_case (`ten_mat_hang`) - sometimes both on one record. Both are
/// captured here as separate optional fields; normalization into the
/// canonical [`Product`](crate::catalog::Product) shape happens once, in
/// [`crate::catalog::ingest`], and prefers the camelCase variant.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawProduct {
    pub id: i32,
    #[serde(rename = "tenMatHang")]
    pub ten_mat_hang: Option<String>,
    #[serde(rename = "ten_mat_hang")]
    pub ten_mat_hang_snake: Option<String>,
    #[serde(rename = "moTa")]
    pub mo_ta: Option<String>,
    #[serde(rename = "mo_ta")]
    pub mo_ta_snake: Option<String>,
    #[serde(rename = "donGia")]
    pub don_gia: Option<Decimal>,
    #[serde(rename = "don_gia")]
    pub don_gia_snake: Option<Decimal>,
    #[serde(rename = "soLuongTon")]
    pub so_luong_ton: Option<i64>,
    #[serde(rename = "so_luong_ton")]
    pub so_luong_ton_snake: Option<i64>,
    #[serde(rename = "donViTinh")]
    pub don_vi_tinh: Option<String>,
    #[serde(rename = "don_vi_tinh")]
    pub don_vi_tinh_snake: Option<String>,
    pub image_url: Option<String>,
    pub category: Option<Category>,
}

/// Payload for creating or updating a product.
///
/// The backend's product table keeps the legacy column names, so the
/// payload serializes with them.
#[derive(Debug, Clone, Serialize)]
pub struct ProductPayload {
    #[serde(rename = "tenMatHang")]
    pub name: String,
    #[serde(rename = "soLuongTon")]
    pub stock_quantity: u32,
    #[serde(rename = "donGia", with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    pub image_url: Option<String>,
    #[serde(rename = "moTa")]
    pub description: Option<String>,
}

/// Backend acknowledgement of a product insert.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedProduct {
    pub id: ProductId,
}

// =============================================================================
// Orders
// =============================================================================

/// One line of an order submission.
#[derive(Debug, Clone, Serialize)]
pub struct OrderItemPayload {
    pub product_id: ProductId,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

/// Checkout submission body.
#[derive(Debug, Clone, Serialize)]
pub struct OrderSubmission {
    pub full_name: String,
    pub address: String,
    pub phone: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price: Decimal,
    pub items: Vec<OrderItemPayload>,
}

/// An order row as the backend returns it (admin order list).
#[derive(Debug, Clone, Deserialize)]
pub struct OrderRecord {
    pub id: BackendOrderId,
    pub full_name: String,
    pub address: String,
    pub phone: String,
    #[serde(default)]
    pub total_price: Option<Decimal>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A line item of one backend order (admin order detail).
#[derive(Debug, Clone, Deserialize)]
pub struct OrderLineRecord {
    pub product_id: ProductId,
    pub quantity: u32,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(rename = "tenMatHang", default)]
    pub product_name: Option<String>,
}

// =============================================================================
// Auth
// =============================================================================

/// Login request credentials.
///
/// The password stays wrapped in [`SecretString`] until the request body is
/// built, so it never lands in debug output or logs.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

/// Registration request.
#[derive(Debug, Clone)]
pub struct Registration {
    pub username: String,
    pub password: SecretString,
    pub full_name: String,
    pub email: String,
}

/// The user object inside a successful login response.
#[derive(Debug, Clone, Deserialize)]
pub struct RawUser {
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// Successful login response body.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub user: RawUser,
}

// =============================================================================
// Branches
// =============================================================================

/// A branch (physical store location) record.
#[derive(Debug, Clone, Deserialize)]
pub struct Branch {
    pub id: BranchId,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Error message body the backend attaches to non-success responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiMessage {
    pub msg: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_product_accepts_both_conventions() {
        let json = r#"{
            "id": 3,
            "ten_mat_hang": "Gạo ST25",
            "don_gia": 200000,
            "so_luong_ton": 100,
            "category": "thucpham"
        }"#;
        let raw: RawProduct = serde_json::from_str(json).expect("snake_case record");
        assert_eq!(raw.ten_mat_hang_snake.as_deref(), Some("Gạo ST25"));
        assert!(raw.ten_mat_hang.is_none());
        assert_eq!(raw.category, Some(Category::Food));
    }

    #[test]
    fn product_payload_uses_legacy_column_names() {
        let payload = ProductPayload {
            name: "Coca Cola".to_string(),
            stock_quantity: 200,
            unit_price: rust_decimal::dec!(10_000),
            image_url: None,
            description: None,
        };
        let json = serde_json::to_value(&payload).expect("serialize");
        assert_eq!(json["tenMatHang"], "Coca Cola");
        assert_eq!(json["soLuongTon"], 200);
        assert_eq!(json["donGia"], 10_000.0);
    }
}
