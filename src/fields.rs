//! Blur/change behaviors of the free-standing form fields

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::models::Catalog;

static INT_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"-?\d+").expect("hard-coded regular expression to be valid")
});

/// Whitespace trim applied when a text field loses focus
pub fn trim_value(text: &str) -> String {
    text.trim().to_string()
}

/// Integer coercion applied when the sort field loses focus.
///
/// Keeps the first optionally signed run of digits, or nothing when the
/// input has no digits at all.
pub fn int_value(text: &str) -> String {
    INT_TOKEN
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Adds `amount` to the integer found in `text` (0 when there is none)
pub fn inc_value(text: &str, amount: i64) -> String {
    let current = INT_TOKEN
        .find(text)
        .and_then(|m| m.as_str().parse::<i64>().ok())
        .unwrap_or(0);
    current.saturating_add(amount).to_string()
}

/// Product selector with a dependent component selector.
///
/// Component options are owned by the selector but populated from the
/// catalog, which stands in for whatever supplies the product's components.
#[derive(Debug, Clone)]
pub struct ProductSelector {
    catalog: Catalog,
    product: String,
    component: String,
    component_options: Vec<String>,
}

impl ProductSelector {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            product: String::new(),
            component: String::new(),
            component_options: Vec::new(),
        }
    }

    /// Product choices, led by the empty "no product" entry
    pub fn product_options(&self) -> Vec<String> {
        let mut options = vec![String::new()];
        options.extend(self.catalog.product_names());
        options
    }

    pub fn product(&self) -> &str {
        &self.product
    }

    pub fn component(&self) -> &str {
        &self.component
    }

    pub fn component_options(&self) -> &[String] {
        &self.component_options
    }

    /// Change handler of the product selector
    pub fn select_product(&mut self, product: &str) {
        self.product = product.to_string();
        self.component.clear();

        if product.is_empty() {
            self.component_options.clear();
            debug!("Product cleared, component options emptied");
            return;
        }

        // leading entry is "any component"
        let mut options = vec![String::new()];
        options.extend(self.catalog.components_of(product));
        debug!("Loaded {} component options for {}", options.len() - 1, product);
        self.component_options = options;
    }

    /// Change handler of the component selector, ignoring unknown components
    pub fn select_component(&mut self, component: &str) -> bool {
        if self.component_options.iter().any(|c| c == component) {
            self.component = component.to_string();
            true
        } else {
            false
        }
    }
}
