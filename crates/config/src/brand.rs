//! Brand configuration
//!
//! The fixed product-description block embedded in every system prompt.
//! This is brand data, not user data; it never changes per session.

use serde::{Deserialize, Serialize};

/// One-line product description used in the persona prompt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductBlurb {
    /// Stable product code used for knowledge filtering (lowercase)
    pub code: String,
    /// Short pitch line
    pub summary: String,
}

impl ProductBlurb {
    pub fn new(code: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            summary: summary.into(),
        }
    }
}

/// Brand configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandProfile {
    /// Company name
    pub name: String,
    /// Company tagline
    pub tagline: String,
    /// Key products, in presentation order
    pub products: Vec<ProductBlurb>,
}

impl Default for BrandProfile {
    fn default() -> Self {
        Self {
            name: "CloudWalk".to_string(),
            tagline: "Creating the best payment network on Earth. Then other planets."
                .to_string(),
            products: vec![
                ProductBlurb::new(
                    "infinitepay",
                    "InfinitePay: Brazil's revolutionary payment platform (0% Pix!)",
                ),
                ProductBlurb::new(
                    "jim",
                    "JIM: Instant payments for the US (1.99% - lowest in market!)",
                ),
                ProductBlurb::new(
                    "stratus",
                    "STRATUS: Lightning-fast blockchain for global payments",
                ),
            ],
        }
    }
}

impl BrandProfile {
    /// Render the product block for the system prompt, one product per line.
    pub fn product_lines(&self) -> String {
        self.products
            .iter()
            .map(|p| format!("- {}", p.summary))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_brand() {
        let brand = BrandProfile::default();
        assert_eq!(brand.name, "CloudWalk");
        assert_eq!(brand.products.len(), 3);
    }

    #[test]
    fn test_product_lines() {
        let brand = BrandProfile::default();
        let lines = brand.product_lines();
        assert!(lines.contains("InfinitePay"));
        assert!(lines.contains("JIM"));
        assert!(lines.contains("STRATUS"));
        assert_eq!(lines.lines().count(), 3);
    }
}
