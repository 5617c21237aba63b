//! Catalog ingestion boundary.
//!
//! Different producers send product records with camelCase or snake_case
//! field names (sometimes both on the same record). This module collapses
//! them into the canonical [`Product`] shape exactly once, on fetch;
//! consumers never see the dual-named shape.

use rust_decimal::Decimal;

use minimart_core::{Price, ProductId};

use crate::backend::RawProduct;

use super::Product;

/// Normalize one raw record into a canonical product.
///
/// The camelCase variant wins when both conventions are present. Prices
/// and stock counts that are missing or negative clamp to zero.
#[must_use]
pub fn normalize(raw: RawProduct) -> Product {
    let amount = raw
        .don_gia
        .or(raw.don_gia_snake)
        .unwrap_or(Decimal::ZERO)
        .max(Decimal::ZERO);
    let stock_quantity = raw
        .so_luong_ton
        .or(raw.so_luong_ton_snake)
        .and_then(|n| u32::try_from(n).ok())
        .unwrap_or(0);

    Product {
        id: ProductId::new(raw.id),
        name: raw
            .ten_mat_hang
            .or(raw.ten_mat_hang_snake)
            .unwrap_or_default(),
        description: raw.mo_ta.or(raw.mo_ta_snake),
        unit_price: Price::new(amount, minimart_core::CurrencyCode::VND),
        stock_quantity,
        image: raw.image_url,
        category: raw.category,
        unit: raw.don_vi_tinh.or(raw.don_vi_tinh_snake),
    }
}

/// Normalize a full fetch result, preserving the incoming order.
#[must_use]
pub fn normalize_all(raw: Vec<RawProduct>) -> Vec<Product> {
    raw.into_iter().map(normalize).collect()
}
