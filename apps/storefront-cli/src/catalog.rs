//! # Demo Catalog
//!
//! The fixed product list of the demo storefront. There is no product
//! backend: these twelve products are the whole catalog.
//!
//! ## Categories
//! - Electronics (headphones, watch, speaker, mouse, fitness tracker)
//! - Sports (running shoes, yoga mat)
//! - Home & Kitchen (coffee maker, desk lamp)
//! - Accessories (backpack, water bottle, phone case)

use storefront_core::{CoreError, CoreResult, Product};

/// (id, name, description, price_cents, image id, category, in_stock, rating, reviews)
type Row = (&'static str, &'static str, &'static str, i64, &'static str, &'static str, bool, f32, u32);

const DEMO_PRODUCTS: &[Row] = &[
    ("1", "Wireless Headphones", "High-quality wireless headphones with noise cancellation and 30-hour battery life.", 19999, "1505740420928-5e560c06d30e", "Electronics", true, 4.5, 128),
    ("2", "Smart Watch", "Advanced smartwatch with health monitoring, GPS, and water resistance.", 29999, "1523275335684-37898b6baf30", "Electronics", true, 4.8, 89),
    ("3", "Running Shoes", "Comfortable running shoes with excellent cushioning and breathable material.", 12999, "1542291026-7eec264c27ff", "Sports", true, 4.3, 256),
    ("4", "Coffee Maker", "Programmable coffee maker with built-in grinder and thermal carafe.", 8999, "1559056199-641a0ac8b55e", "Home & Kitchen", false, 4.6, 67),
    ("5", "Laptop Backpack", "Durable laptop backpack with multiple compartments and USB charging port.", 7999, "1553062407-98eeb64c6a62", "Accessories", true, 4.4, 92),
    ("6", "Bluetooth Speaker", "Portable Bluetooth speaker with 360-degree sound and waterproof design.", 14999, "1608043152269-423dbba4e7e1", "Electronics", true, 4.7, 156),
    ("7", "Yoga Mat", "Premium non-slip yoga mat with excellent grip and cushioning.", 4999, "1544367567-0f2fcb009e0b", "Sports", true, 4.6, 203),
    ("8", "Desk Lamp", "Modern LED desk lamp with adjustable brightness and USB charging port.", 6999, "1507003211169-0a1dd7228f2d", "Home & Kitchen", true, 4.5, 87),
    ("9", "Wireless Mouse", "Ergonomic wireless mouse with precision tracking and long battery life.", 3999, "1527864550417-7fd91fc51a46", "Electronics", true, 4.4, 134),
    ("10", "Water Bottle", "Insulated stainless steel water bottle that keeps drinks cold for 24 hours.", 2499, "1602143407151-7111542de6e8", "Accessories", true, 4.7, 298),
    ("11", "Phone Case", "Protective phone case with shock absorption and wireless charging compatibility.", 1999, "1556656793-08538906a9f8", "Accessories", true, 4.2, 156),
    ("12", "Fitness Tracker", "Advanced fitness tracker with heart rate monitoring and sleep tracking.", 8999, "1575311373937-040b8e1fd5b6", "Electronics", true, 4.5, 187),
];

/// Read-only product catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// The built-in demo catalog.
    pub fn demo() -> Self {
        let products = DEMO_PRODUCTS
            .iter()
            .map(|&(id, name, description, price_cents, image, category, in_stock, rating, reviews)| Product {
                id: id.to_string(),
                name: name.to_string(),
                description: description.to_string(),
                price_cents,
                image: format!("https://images.unsplash.com/photo-{image}?w=400&h=400&fit=crop"),
                category: category.to_string(),
                in_stock,
                rating: Some(rating),
                reviews: Some(reviews),
            })
            .collect();

        Catalog { products }
    }

    /// Creates a catalog from an arbitrary product list.
    pub fn from_products(products: Vec<Product>) -> Self {
        Catalog { products }
    }

    /// All products in display order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Products in `category` (case-insensitive).
    pub fn in_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Product> + 'a {
        self.products
            .iter()
            .filter(move |p| p.category.eq_ignore_ascii_case(category))
    }

    /// Looks up a product by id.
    pub fn get(&self, id: &str) -> CoreResult<&Product> {
        self.products
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))
    }
}
