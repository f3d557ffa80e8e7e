use std::collections::HashMap;

use storefront_core::{DomainError, DomainResult, Entity, ProductId};
use storefront_products::Product;

use crate::order::{OrderLine, OrderReceipt, ReceiptLine};

/// Aggregate: Store.
///
/// Owns its products in insertion order. Products are identified by their
/// `ProductId`; two products with the same attributes are distinct entries.
#[derive(Debug, Clone, PartialEq)]
pub struct Store {
    products: Vec<Product>,
}

/// A validated order line, resolved to a position in `products`.
struct PlannedLine {
    index: usize,
    quantity: u64,
}

impl Store {
    /// Create a store from a non-empty set of products.
    pub fn new(products: Vec<Product>) -> DomainResult<Self> {
        if products.is_empty() {
            return Err(DomainError::validation("store needs at least one product"));
        }

        let mut store = Self {
            products: Vec::with_capacity(products.len()),
        };
        for product in products {
            store.ensure_not_present(product.id_typed())?;
            store.products.push(product);
        }
        Ok(store)
    }

    /// Append a product. Rejects a product whose identity is already held.
    pub fn add_product(&mut self, product: Product) -> DomainResult<()> {
        self.ensure_not_present(product.id_typed())?;
        tracing::debug!(product_id = %product.id(), product = %product.name(), "product added");
        self.products.push(product);
        Ok(())
    }

    /// Remove and return the product with this identity.
    pub fn remove_product(&mut self, id: &ProductId) -> DomainResult<Product> {
        let index = self.position(id)?;
        let product = self.products.remove(index);
        tracing::debug!(product_id = %id, product = %product.name(), "product removed");
        Ok(product)
    }

    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id() == id)
    }

    pub fn get_mut(&mut self, id: &ProductId) -> Option<&mut Product> {
        self.products.iter_mut().find(|p| p.id() == id)
    }

    /// Every product, active or not, in insertion order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Always false for a constructed store unless every product was removed.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Units in stock across all products, including inactive ones.
    pub fn total_quantity(&self) -> u64 {
        self.products.iter().map(Product::quantity).sum()
    }

    /// Active products in insertion order.
    pub fn active_products(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.is_active()).collect()
    }

    /// Descriptions of the active products, in insertion order.
    pub fn all_products(&self) -> Vec<String> {
        self.active_products()
            .into_iter()
            .map(Product::describe)
            .collect()
    }

    /// Price of a prospective order. Nothing is mutated.
    ///
    /// Each line is quoted on its own, so stock levels are not checked.
    pub fn calculate_subtotal(&self, lines: &[OrderLine]) -> DomainResult<f64> {
        let mut subtotal = 0.0;
        for line in lines {
            let product = self
                .get(&line.product_id)
                .ok_or(DomainError::not_found(line.product_id))?;
            subtotal += product.quote_price(line.quantity)?;
        }
        Ok(subtotal)
    }

    /// Buy every line and return the receipt.
    ///
    /// Two phases: all lines are validated against current stock first
    /// (quantities for a repeated product are combined), then every line is
    /// committed. If validation fails no product is touched.
    pub fn place_order(&mut self, lines: &[OrderLine]) -> DomainResult<OrderReceipt> {
        let plan = self.prepare_order(lines)?;

        let mut receipt = OrderReceipt::default();
        for planned in plan {
            let product = &mut self.products[planned.index];
            let charge = product.buy(planned.quantity)?;
            receipt.push(ReceiptLine {
                product_id: product.id_typed(),
                name: product.name().to_string(),
                quantity: planned.quantity,
                charge,
            });
        }

        tracing::info!(
            lines = receipt.lines().len(),
            total = receipt.total(),
            "order placed"
        );
        Ok(receipt)
    }

    fn prepare_order(&self, lines: &[OrderLine]) -> DomainResult<Vec<PlannedLine>> {
        let mut requested: HashMap<ProductId, u64> = HashMap::new();
        let mut plan = Vec::with_capacity(lines.len());

        for line in lines {
            let index = self.position(&line.product_id)?;
            let product = &self.products[index];
            product.quote_price(line.quantity)?;

            let total = requested.entry(line.product_id).or_insert(0);
            *total = total
                .checked_add(line.quantity)
                .ok_or_else(|| DomainError::validation("order quantity overflow"))?;
            product.ensure_available(*total)?;

            plan.push(PlannedLine {
                index,
                quantity: line.quantity,
            });
        }
        Ok(plan)
    }

    fn position(&self, id: &ProductId) -> DomainResult<usize> {
        self.products
            .iter()
            .position(|p| p.id() == id)
            .ok_or(DomainError::not_found(*id))
    }

    fn ensure_not_present(&self, id: ProductId) -> DomainResult<()> {
        if self.get(&id).is_some() {
            return Err(DomainError::validation(format!(
                "product {id} is already in the store"
            )));
        }
        Ok(())
    }
}
