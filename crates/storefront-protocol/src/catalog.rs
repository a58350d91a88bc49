//! The fixed product catalog shown to signed-in users.

use std::fmt::Write;

use crate::{Product, ProtocolError};

static PRODUCTS: [Product; 5] = [
    Product { name: "Kayak", price: 279.0 },
    Product { name: "Life-Jacket", price: 49.95 },
    Product { name: "Soccer Ball", price: 19.50 },
    Product { name: "Hockey stick", price: 34.95 },
    Product { name: "Hockey puck", price: 12.0 },
];

/// Returns the catalog. It is read-only and lives for the whole process.
pub fn catalog() -> &'static [Product] {
    &PRODUCTS
}

/// Renders a product listing as `Products: [{Kayak 279} {Life-Jacket 49.95}]`.
///
/// # Errors
/// Returns [`ProtocolError::Render`] if formatting fails.
pub fn render_catalog(products: &[Product]) -> Result<String, ProtocolError> {
    let mut out = String::from("Products: [");
    for (i, product) in products.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        write!(out, "{product}")?;
    }
    out.push(']');
    Ok(out)
}
