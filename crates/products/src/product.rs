use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, DomainResult, Entity, ProductId};

use crate::price::Price;

/// Input for creating a product.
///
/// Quantity is signed so that a negative amount coming from user input or a
/// catalog file is reported as a validation failure instead of a parse error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    pub quantity: i64,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// Entity: Product.
///
/// Invariants:
/// - `name` is never blank and `price` is always positive.
/// - Any mutation that leaves `quantity` at zero also deactivates the product.
/// - `activate`/`deactivate` set the flag regardless of quantity.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    id: ProductId,
    name: String,
    price: Price,
    quantity: u64,
    active: bool,
}

impl Product {
    /// Create an active product with a freshly generated identity.
    pub fn new(name: impl Into<String>, price: f64, quantity: i64) -> DomainResult<Self> {
        Self::create(NewProduct {
            name: name.into(),
            price,
            quantity,
            active: true,
        })
    }

    /// Create a product from validated input, generating its identity.
    pub fn create(input: NewProduct) -> DomainResult<Self> {
        Self::create_with_id(ProductId::new(), input)
    }

    /// Create a product with an explicit identity.
    pub fn create_with_id(id: ProductId, input: NewProduct) -> DomainResult<Self> {
        if input.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        let price = Price::new(input.price)?;
        let quantity = non_negative(input.quantity)?;

        Ok(Self {
            id,
            name: input.name,
            price,
            quantity,
            active: input.active,
        })
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    /// Whether the product is available for sale.
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn activate(&mut self) {
        self.active = true;
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Overwrite the stock level.
    ///
    /// Setting zero deactivates the product; a positive value never reactivates it.
    pub fn set_quantity(&mut self, quantity: i64) -> DomainResult<()> {
        let quantity = non_negative(quantity)?;
        self.store_quantity(quantity);
        Ok(())
    }

    /// Move the stock level by `delta` units. Returns the new quantity.
    ///
    /// A delta that would take stock below zero is rejected, not clamped.
    pub fn adjust_quantity_by(&mut self, delta: i64) -> DomainResult<u64> {
        let adjusted = if delta >= 0 {
            self.quantity.checked_add(delta.unsigned_abs())
        } else {
            self.quantity.checked_sub(delta.unsigned_abs())
        };
        let quantity = adjusted.ok_or_else(|| {
            DomainError::validation(format!(
                "cannot adjust {} by {delta}: stock is {}",
                self.name, self.quantity
            ))
        })?;
        self.store_quantity(quantity);
        Ok(quantity)
    }

    /// One-line summary: name, price and quantity.
    pub fn describe(&self) -> String {
        format!(
            "{}, Price: {}, Quantity: {}",
            self.name, self.price, self.quantity
        )
    }

    /// Charge for `quantity` units without touching stock.
    ///
    /// Fails like [`Product::buy`] for a zero quantity or an inactive product;
    /// stock levels are not checked here.
    pub fn quote_price(&self, quantity: u64) -> DomainResult<f64> {
        ensure_positive(quantity)?;
        self.ensure_active()?;
        Ok(self.price.times(quantity))
    }

    /// Take `quantity` units out of stock and return the charge.
    ///
    /// All checks run before any field changes, so a failed purchase leaves the
    /// product untouched.
    pub fn buy(&mut self, quantity: u64) -> DomainResult<f64> {
        let charge = self.quote_price(quantity)?;
        self.ensure_available(quantity)?;

        self.store_quantity(self.quantity - quantity);
        tracing::debug!(
            product_id = %self.id,
            product = %self.name,
            quantity,
            remaining = self.quantity,
            charge,
            "product bought"
        );
        Ok(charge)
    }

    /// Fails with `InsufficientStock` unless `quantity` units are on hand.
    pub fn ensure_available(&self, quantity: u64) -> DomainResult<()> {
        if quantity > self.quantity {
            return Err(DomainError::insufficient_stock(
                self.name.clone(),
                quantity,
                self.quantity,
            ));
        }
        Ok(())
    }

    fn ensure_active(&self) -> DomainResult<()> {
        if !self.active {
            return Err(DomainError::out_of_stock(self.name.clone()));
        }
        Ok(())
    }

    fn store_quantity(&mut self, quantity: u64) {
        self.quantity = quantity;
        if quantity == 0 {
            self.active = false;
        }
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl core::fmt::Display for Product {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.describe())
    }
}

fn non_negative(quantity: i64) -> DomainResult<u64> {
    u64::try_from(quantity).map_err(|_| {
        DomainError::validation(format!("quantity cannot be negative (got {quantity})"))
    })
}

fn ensure_positive(quantity: u64) -> DomainResult<()> {
    if quantity == 0 {
        return Err(DomainError::validation("quantity must be greater than 0"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monitor() -> Product {
        Product::new("Monitor", 200.0, 10).unwrap()
    }

    #[test]
    fn new_product_is_active_with_given_quantity() {
        let p = Product::new("Laptop", 1200.50, 10).unwrap();
        assert_eq!(p.name(), "Laptop");
        assert_eq!(p.price().amount(), 1200.50);
        assert_eq!(p.quantity(), 10);
        assert!(p.is_active());
    }

    #[test]
    fn create_honours_inactive_flag() {
        let p = Product::create(NewProduct {
            name: "Out of Stock Item".to_string(),
            price: 100.0,
            quantity: 0,
            active: false,
        })
        .unwrap();
        assert!(!p.is_active());
        assert_eq!(p.quantity(), 0);
    }

    #[test]
    fn create_rejects_invalid_input() {
        let cases = [
            ("", 1200.50, 10),
            ("   ", 1200.50, 10),
            ("Laptop", -50.0, 10),
            ("Laptop", 0.0, 10),
            ("Laptop", 1200.50, -5),
        ];
        for (name, price, quantity) in cases {
            match Product::new(name, price, quantity) {
                Err(DomainError::Validation(_)) => {}
                other => panic!("expected Validation error for {name:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn products_with_equal_attributes_have_distinct_ids() {
        let a = Product::new("Mouse", 30.0, 10).unwrap();
        let b = Product::new("Mouse", 30.0, 10).unwrap();
        assert_ne!(a.id(), b.id());

        let id = ProductId::new();
        let c = Product::create_with_id(
            id,
            NewProduct {
                name: "Mouse".to_string(),
                price: 30.0,
                quantity: 10,
                active: true,
            },
        )
        .unwrap();
        assert_eq!(c.id_typed(), id);
    }

    #[test]
    fn set_quantity_overwrites_and_deactivates_at_zero() {
        let mut p = Product::new("Tablet", 300.0, 5).unwrap();

        p.set_quantity(10).unwrap();
        assert_eq!(p.quantity(), 10);
        assert!(p.is_active());

        p.set_quantity(0).unwrap();
        assert_eq!(p.quantity(), 0);
        assert!(!p.is_active());

        // Restocking does not reactivate.
        p.set_quantity(7).unwrap();
        assert!(!p.is_active());
    }

    #[test]
    fn set_quantity_rejects_negative() {
        let mut p = Product::new("Tablet", 300.0, 5).unwrap();
        let err = p.set_quantity(-1).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(p.quantity(), 5);
    }

    #[test]
    fn adjust_quantity_by_moves_stock_relatively() {
        let mut p = Product::new("Tablet", 300.0, 5).unwrap();
        assert_eq!(p.adjust_quantity_by(5).unwrap(), 10);
        assert_eq!(p.adjust_quantity_by(-3).unwrap(), 7);
        assert!(p.is_active());

        assert_eq!(p.adjust_quantity_by(-7).unwrap(), 0);
        assert!(!p.is_active());
    }

    #[test]
    fn adjust_quantity_by_rejects_going_negative() {
        let mut p = Product::new("Tablet", 300.0, 5).unwrap();
        let err = p.adjust_quantity_by(-6).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(p.quantity(), 5);
        assert!(p.is_active());
    }

    #[test]
    fn buy_returns_charge_and_decrements() {
        let mut p = monitor();
        assert_eq!(p.buy(2).unwrap(), 400.0);
        assert_eq!(p.quantity(), 8);
        assert!(p.is_active());
    }

    #[test]
    fn buy_rejects_more_than_available() {
        let mut p = monitor();
        let err = p.buy(20).unwrap_err();
        assert_eq!(err, DomainError::insufficient_stock("Monitor", 20, 10));
        assert_eq!(p.quantity(), 10);
    }

    #[test]
    fn buy_rejects_zero_quantity() {
        let mut p = monitor();
        assert!(matches!(p.buy(0), Err(DomainError::Validation(_))));
        assert_eq!(p.quantity(), 10);
    }

    #[test]
    fn buy_rejects_inactive_regardless_of_stock() {
        let mut p = monitor();
        p.deactivate();
        assert_eq!(p.buy(1).unwrap_err(), DomainError::out_of_stock("Monitor"));
        assert_eq!(p.quantity(), 10);

        let mut empty = Product::create(NewProduct {
            name: "Empty".to_string(),
            price: 5.0,
            quantity: 0,
            active: false,
        })
        .unwrap();
        assert!(matches!(empty.buy(1), Err(DomainError::OutOfStock(_))));
    }

    #[test]
    fn buying_last_unit_deactivates() {
        let mut p = Product::new("Keyboard", 50.0, 1).unwrap();
        assert!(p.is_active());
        p.buy(1).unwrap();
        assert!(!p.is_active());
        assert_eq!(p.quantity(), 0);
    }

    #[test]
    fn quote_price_does_not_mutate() {
        let mut p = monitor();
        let before = p.clone();
        assert_eq!(p.quote_price(3).unwrap(), 600.0);
        assert_eq!(p, before);

        // Quotes ignore stock levels.
        assert_eq!(p.quote_price(50).unwrap(), 10_000.0);

        p.deactivate();
        assert!(matches!(p.quote_price(1), Err(DomainError::OutOfStock(_))));
        assert!(matches!(p.quote_price(0), Err(DomainError::Validation(_))));
    }

    #[test]
    fn activation_is_unconditional() {
        let mut p = Product::new("Mouse", 30.0, 10).unwrap();
        p.deactivate();
        assert!(!p.is_active());
        assert_eq!(p.quantity(), 10);

        p.activate();
        assert!(p.is_active());

        p.set_quantity(0).unwrap();
        p.activate();
        assert!(p.is_active());
        assert_eq!(p.quantity(), 0);
    }

    #[test]
    fn describe_lists_name_price_quantity() {
        let p = Product::new("MacBook Air M2", 1450.0, 100).unwrap();
        assert_eq!(p.describe(), "MacBook Air M2, Price: 1450, Quantity: 100");
        assert_eq!(p.to_string(), p.describe());
    }

    #[test]
    fn new_product_deserializes_with_default_active() {
        let input: NewProduct =
            serde_json::from_str(r#"{"name":"Google Pixel 7","price":500,"quantity":250}"#).unwrap();
        assert!(input.active);
        let p = Product::create(input).unwrap();
        assert_eq!(p.quantity(), 250);
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 500,
                ..ProptestConfig::default()
            })]

            /// Property: a successful buy removes exactly the bought units and
            /// deactivates iff stock reaches zero.
            #[test]
            fn buy_conserves_stock(
                price in 0.01f64..10_000.0,
                stock in 1i64..1_000,
                wanted in 1u64..1_000,
            ) {
                let mut p = Product::new("Widget", price, stock).unwrap();
                let before = p.clone();

                match p.buy(wanted) {
                    Ok(charge) => {
                        prop_assert!(wanted <= stock as u64);
                        prop_assert_eq!(charge, price * wanted as f64);
                        prop_assert_eq!(p.quantity(), stock as u64 - wanted);
                        prop_assert_eq!(p.is_active(), p.quantity() > 0);
                    }
                    Err(err) => {
                        prop_assert!(wanted > stock as u64);
                        let is_insufficient = matches!(err, DomainError::InsufficientStock { .. });
                        prop_assert!(is_insufficient);
                        prop_assert_eq!(&p, &before);
                    }
                }
            }

            /// Property: quoting never changes the product.
            #[test]
            fn quote_is_pure(
                price in 0.01f64..10_000.0,
                stock in 0i64..1_000,
                wanted in 0u64..2_000,
                active in any::<bool>(),
            ) {
                let p = Product::create(NewProduct {
                    name: "Widget".to_string(),
                    price,
                    quantity: stock,
                    active,
                }).unwrap();
                let before = p.clone();
                let _ = p.quote_price(wanted);
                prop_assert_eq!(&p, &before);
            }

            /// Property: adjusting by `d` then by `-d` restores the quantity.
            #[test]
            fn adjust_round_trip(stock in 0i64..1_000, delta in 0i64..1_000) {
                let mut p = Product::new("Widget", 1.0, stock).unwrap();
                p.adjust_quantity_by(delta).unwrap();
                p.adjust_quantity_by(-delta).unwrap();
                prop_assert_eq!(p.quantity(), stock as u64);
            }
        }
    }
}
