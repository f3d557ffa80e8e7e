use storefront_core::ProductId;

/// Order line: which product, how many units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub quantity: u64,
}

impl OrderLine {
    pub fn new(product_id: ProductId, quantity: u64) -> Self {
        Self {
            product_id,
            quantity,
        }
    }
}

/// One committed line of a placed order.
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptLine {
    pub product_id: ProductId,
    pub name: String,
    pub quantity: u64,
    pub charge: f64,
}

/// Result of a successfully placed order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OrderReceipt {
    lines: Vec<ReceiptLine>,
    total: f64,
}

impl OrderReceipt {
    pub(crate) fn push(&mut self, line: ReceiptLine) {
        self.total += line.charge;
        self.lines.push(line);
    }

    pub fn lines(&self) -> &[ReceiptLine] {
        &self.lines
    }

    /// Sum of every line's charge.
    pub fn total(&self) -> f64 {
        self.total
    }
}
