//! Point-of-Sale Cart
//!
//! Totals and the checks that run before a bill is submitted. A request is
//! only built once every check passes.

use serde::Serialize;

use crate::error::ValidationError;
use crate::models::{BillItemRequest, CreateBillRequest, PayDueRequest, PaymentStatus, Product};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartLine {
    pub product_id: i64,
    pub name: String,
    pub unit_price: f64,
    pub quantity: u32,
    pub available_stock: i64,
}

impl CartLine {
    pub fn line_total(&self) -> f64 {
        self.unit_price * f64::from(self.quantity)
    }

    fn check_stock(&self, quantity: u32) -> Result<(), ValidationError> {
        if quantity == 0 {
            return Err(ValidationError::ZeroQuantity);
        }
        if i64::from(quantity) > self.available_stock {
            return Err(ValidationError::InsufficientStock {
                name: self.name.clone(),
                requested: quantity,
                available: self.available_stock,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PaymentSummary {
    pub total: f64,
    pub paid: f64,
    pub balance: f64,
    pub status: PaymentStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Cart {
    lines: Vec<CartLine>,
    discount: f64,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn discount(&self) -> f64 {
        self.discount
    }

    /// Add one unit of `product`, merging with an existing line.
    pub fn add(&mut self, product: &Product) -> Result<(), ValidationError> {
        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product.id) {
            let quantity = line.quantity + 1;
            line.available_stock = product.stock;
            line.check_stock(quantity)?;
            line.quantity = quantity;
            return Ok(());
        }

        let line = CartLine {
            product_id: product.id,
            name: product.name.clone(),
            unit_price: product.price,
            quantity: 1,
            available_stock: product.stock,
        };
        line.check_stock(1)?;
        self.lines.push(line);
        Ok(())
    }

    pub fn set_quantity(&mut self, product_id: i64, quantity: u32) -> Result<(), ValidationError> {
        let line = self
            .lines
            .iter_mut()
            .find(|l| l.product_id == product_id)
            .ok_or(ValidationError::NotInCart(product_id))?;
        line.check_stock(quantity)?;
        line.quantity = quantity;
        Ok(())
    }

    pub fn remove(&mut self, product_id: i64) {
        self.lines.retain(|l| l.product_id != product_id);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.discount = 0.0;
    }

    pub fn set_discount(&mut self, discount: f64) -> Result<(), ValidationError> {
        if discount < 0.0 {
            return Err(ValidationError::NegativeAmount);
        }
        let subtotal = self.subtotal();
        if discount > subtotal {
            return Err(ValidationError::DiscountExceedsSubtotal { discount, subtotal });
        }
        self.discount = discount;
        Ok(())
    }

    pub fn subtotal(&self) -> f64 {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Subtotal less discount, never negative
    pub fn grand_total(&self) -> f64 {
        (self.subtotal() - self.discount).max(0.0)
    }

    pub fn validate_payment(&self, paid: f64) -> Result<PaymentSummary, ValidationError> {
        if self.lines.is_empty() {
            return Err(ValidationError::EmptyCart);
        }
        if paid < 0.0 {
            return Err(ValidationError::NegativeAmount);
        }
        let total = self.grand_total();
        if paid > total {
            return Err(ValidationError::PaidExceedsTotal { paid, total });
        }
        for line in &self.lines {
            line.check_stock(line.quantity)?;
        }
        Ok(PaymentSummary {
            total,
            paid,
            balance: total - paid,
            status: PaymentStatus::from_amounts(total, paid),
        })
    }

    /// Body for `/billing/create`, or the first validation failure.
    pub fn to_request(&self, customer_id: Option<i64>, paid: f64) -> Result<CreateBillRequest, ValidationError> {
        let customer_id = customer_id.ok_or(ValidationError::MissingCustomer)?;
        let summary = self.validate_payment(paid)?;
        Ok(CreateBillRequest {
            customer_id,
            items: self
                .lines
                .iter()
                .map(|l| BillItemRequest {
                    product_id: l.product_id,
                    quantity: l.quantity,
                    price: l.unit_price,
                })
                .collect(),
            total_amount: self.subtotal(),
            discount: self.discount,
            final_amount: summary.total,
            paid_amount: summary.paid,
            balance: summary.balance,
            payment_status: summary.status,
        })
    }
}

/// Check a due payment against the bill's outstanding balance.
pub fn validate_due_payment(bill_id: i64, balance: f64, amount: f64) -> Result<PayDueRequest, ValidationError> {
    if amount <= 0.0 {
        return Err(ValidationError::NonPositivePayment);
    }
    if amount > balance {
        return Err(ValidationError::PaymentExceedsBalance { amount, balance });
    }
    Ok(PayDueRequest { bill_id, amount })
}
