use std::fmt;

use thiserror::Error;

use crate::model::tick::round2;

pub const DEFAULT_STARTING_CASH: f64 = 100_000.0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    #[error("Insufficient cash to buy {qty} shares")]
    InsufficientFunds { qty: u64, cost: f64, cash: f64 },

    #[error("You do not have {qty} shares to sell")]
    InsufficientShares { qty: u64, held: u64 },

    #[error("Cannot hold {qty} more shares")]
    HoldingsOverflow { qty: u64, held: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeSide {
    Buy,
    Sell,
}

/// An executed, fully applied trade.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trade {
    pub side: TradeSide,
    pub qty: u64,
    pub price: f64,
    pub amount: f64,
}

impl fmt::Display for Trade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self.side {
            TradeSide::Buy => "Bought",
            TradeSide::Sell => "Sold",
        };
        write!(f, "{} {} shares at ${:.2} each", verb, self.qty, self.price)
    }
}

/// Lenient quantity parsing: anything non-numeric, non-finite or below one
/// becomes 1; fractions are floored.
pub fn coerce_quantity(input: &str) -> u64 {
    match input.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 1.0 => v.floor().min(u64::MAX as f64) as u64,
        _ => 1,
    }
}

/// Paper cash/shares account priced off the latest tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Portfolio {
    cash: f64,
    shares: u64,
}

impl Default for Portfolio {
    fn default() -> Self {
        Self::new(DEFAULT_STARTING_CASH)
    }
}

impl Portfolio {
    pub fn new(cash: f64) -> Self {
        Self {
            cash: cash.max(0.0),
            shares: 0,
        }
    }

    pub fn with_holdings(cash: f64, shares: u64) -> Self {
        Self {
            cash: cash.max(0.0),
            shares,
        }
    }

    pub fn cash(&self) -> f64 {
        self.cash
    }

    pub fn shares(&self) -> u64 {
        self.shares
    }

    /// Debit `qty * price`; rejected without any change when cash is short or
    /// the share count would overflow.
    pub fn buy(&mut self, qty: u64, price: f64) -> Result<Trade, LedgerError> {
        let cost = qty as f64 * price;
        if cost > self.cash {
            return Err(LedgerError::InsufficientFunds {
                qty,
                cost,
                cash: self.cash,
            });
        }
        let Some(shares) = self.shares.checked_add(qty) else {
            return Err(LedgerError::HoldingsOverflow {
                qty,
                held: self.shares,
            });
        };
        self.cash -= cost;
        self.shares = shares;
        Ok(Trade {
            side: TradeSide::Buy,
            qty,
            price,
            amount: cost,
        })
    }

    /// Credit `qty * price`; rejected without any change when holdings are short.
    pub fn sell(&mut self, qty: u64, price: f64) -> Result<Trade, LedgerError> {
        if qty > self.shares {
            return Err(LedgerError::InsufficientShares {
                qty,
                held: self.shares,
            });
        }
        let proceeds = qty as f64 * price;
        self.shares -= qty;
        self.cash += proceeds;
        Ok(Trade {
            side: TradeSide::Sell,
            qty,
            price,
            amount: proceeds,
        })
    }

    pub fn holdings_value(&self, price: f64) -> f64 {
        round2(self.shares as f64 * price)
    }

    pub fn summary(&self, price: f64) -> String {
        format!(
            "Cash: ${:.2}\nHoldings: {} shares (${:.2})",
            self.cash,
            self.shares,
            self.holdings_value(price)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coerce_quantity_is_lenient() {
        assert_eq!(coerce_quantity("10"), 10);
        assert_eq!(coerce_quantity(" 3.9 "), 3);
        assert_eq!(coerce_quantity("0"), 1);
        assert_eq!(coerce_quantity("-4"), 1);
        assert_eq!(coerce_quantity("abc"), 1);
        assert_eq!(coerce_quantity(""), 1);
        assert_eq!(coerce_quantity("NaN"), 1);
    }

    #[test]
    fn error_messages_match_status_text() {
        let err = LedgerError::InsufficientFunds {
            qty: 5,
            cost: 10.0,
            cash: 1.0,
        };
        assert_eq!(err.to_string(), "Insufficient cash to buy 5 shares");
        let err = LedgerError::InsufficientShares { qty: 10, held: 5 };
        assert_eq!(err.to_string(), "You do not have 10 shares to sell");
    }
}
