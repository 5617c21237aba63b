//! Built-in fallback catalog.
//!
//! When the backend cannot be reached the storefront serves this fixed
//! product list instead of an error page; the shop stays browsable.

use rust_decimal::dec;

use minimart_core::{Category, CurrencyCode, Price, ProductId};

use super::Product;

fn product(
    id: i32,
    name: &str,
    amount: rust_decimal::Decimal,
    category: Category,
    description: &str,
    stock: u32,
    unit: &str,
    image: &str,
) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        description: Some(description.to_string()),
        unit_price: Price::new(amount, CurrencyCode::VND),
        stock_quantity: stock,
        image: Some(image.to_string()),
        category: Some(category),
        unit: Some(unit.to_string()),
    }
}

/// The seed product list, in catalog (ID) order.
#[must_use]
pub fn seed_products() -> Vec<Product> {
    vec![
        product(
            1,
            "Sharp rice cooker",
            dec!(1_500_000),
            Category::Household,
            "High-quality 1.8L rice cooker",
            10,
            "piece",
            "rice-cooker.jpg",
        ),
        product(
            2,
            "Dell XPS 13 laptop",
            dec!(25_000_000),
            Category::Electronics,
            "Thin, light, high-performance laptop",
            5,
            "piece",
            "xps-13.jpg",
        ),
        product(
            3,
            "ST25 rice",
            dec!(200_000),
            Category::Food,
            "Award-winning fragrant rice",
            100,
            "5kg bag",
            "st25-rice.jpg",
        ),
        product(
            4,
            "Coca Cola",
            dec!(10_000),
            Category::Beverage,
            "Carbonated soft drink",
            200,
            "can",
            "coca-cola.jpg",
        ),
        product(
            5,
            "Panasonic blender",
            dec!(800_000),
            Category::Household,
            "Multi-purpose blender",
            15,
            "piece",
            "blender.jpg",
        ),
        product(
            6,
            "Hao Hao instant noodles",
            dec!(4_500),
            Category::Food,
            "Hot & sour shrimp instant noodles",
            500,
            "pack",
            "hao-hao.jpg",
        ),
        product(
            7,
            "Neptune Light cooking oil 1L",
            dec!(65_000),
            Category::Food,
            "Premium vegetable cooking oil",
            50,
            "bottle",
            "neptune-oil.jpg",
        ),
        product(
            8,
            "Pepsi Cola",
            dec!(10_000),
            Category::Beverage,
            "Carbonated Pepsi soft drink",
            200,
            "can",
            "pepsi.jpg",
        ),
        product(
            9,
            "Tiger beer",
            dec!(16_000),
            Category::Beverage,
            "Tiger lager, 330ml can",
            100,
            "can",
            "tiger-beer.jpg",
        ),
        product(
            10,
            "Sunhouse non-stick pan 24cm",
            dec!(150_000),
            Category::Household,
            "Durable non-stick frying pan",
            30,
            "piece",
            "sunhouse-pan.jpg",
        ),
        product(
            11,
            "Logitech M331 wireless mouse",
            dec!(350_000),
            Category::Electronics,
            "Silent wireless mouse",
            20,
            "piece",
            "logitech-m331.jpg",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_list_has_eleven_products_in_id_order() {
        let products = seed_products();
        assert_eq!(products.len(), 11);
        let ids: Vec<i32> = products.iter().map(|p| p.id.as_i32()).collect();
        assert_eq!(ids, (1..=11).collect::<Vec<_>>());
    }

    #[test]
    fn every_seed_product_is_categorized_and_priced() {
        for product in seed_products() {
            assert!(product.category.is_some(), "{} has no category", product.name);
            assert!(!product.unit_price.is_zero(), "{} has no price", product.name);
        }
    }
}
