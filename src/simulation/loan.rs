//! Loan amortization: the fixed-payment variant of the compounding loop
//!
//! Uses the nominal-rate convention for the periodic rate
//! (`annual_rate / payments_per_year`), the standard quoting convention for
//! installment loans, unlike the investment engine's geometric periodic
//! growth factor.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Inputs for a level-payment amortization schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanParameters {
    /// Amount borrowed, >= 0
    pub principal: f64,

    /// Nominal annual interest rate as a decimal, >= 0
    pub annual_rate: f64,

    /// Term in years
    pub years: f64,

    /// Payments per year (12 for monthly)
    pub payments_per_year: u32,
}

impl LoanParameters {
    /// Number of payments in the term: `round(years * payments_per_year)`.
    pub fn total_payments(&self) -> u32 {
        (self.years * self.payments_per_year as f64).round() as u32
    }

    fn periodic_rate(&self) -> f64 {
        self.annual_rate / self.payments_per_year as f64
    }

    fn validate(&self) -> Result<(), EngineError> {
        if !self.principal.is_finite() || self.principal < 0.0 {
            return Err(EngineError::InvalidParameters(format!(
                "principal must be finite and >= 0, got {}",
                self.principal
            )));
        }
        if !self.annual_rate.is_finite() || self.annual_rate < 0.0 {
            return Err(EngineError::InvalidParameters(format!(
                "annual rate must be finite and >= 0, got {}",
                self.annual_rate
            )));
        }
        if self.payments_per_year == 0 {
            return Err(EngineError::InvalidParameters(
                "payments per year must be >= 1".into(),
            ));
        }
        if !self.years.is_finite() || self.total_payments() < 1 {
            return Err(EngineError::InvalidParameters(format!(
                "term must cover at least one payment, got {} years at {} payments/year",
                self.years, self.payments_per_year
            )));
        }
        Ok(())
    }
}

/// One payment of an amortization schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRow {
    /// Payment number (1-indexed)
    pub period: u32,

    /// Total paid this period
    pub payment: f64,

    /// Interest portion
    pub interest: f64,

    /// Principal portion
    pub principal: f64,

    /// Remaining balance after this payment
    pub balance: f64,
}

/// Complete amortization schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanSchedule {
    /// Level periodic payment (the final payment may differ slightly to
    /// close the balance exactly)
    pub payment: f64,

    /// Per-payment breakdown
    pub rows: Vec<PaymentRow>,

    /// Sum of all payments
    pub total_paid: f64,

    /// Sum of all interest
    pub total_interest: f64,
}

/// Level payment for a principal at a periodic rate over `n` payments:
/// `P*i / (1 - (1+i)^-n)`, or exactly `P/n` at a zero rate.
pub fn level_payment(principal: f64, periodic_rate: f64, payments: u32) -> f64 {
    if periodic_rate == 0.0 {
        principal / payments as f64
    } else {
        principal * periodic_rate / (1.0 - (1.0 + periodic_rate).powi(-(payments as i32)))
    }
}

/// Build the full amortization schedule for a loan.
///
/// The final payment retires the remaining balance exactly, so the schedule
/// closes at 0 and the balance is non-increasing across every period.
pub fn amortize(params: &LoanParameters) -> Result<LoanSchedule, EngineError> {
    params.validate()?;

    let n = params.total_payments();
    let rate = params.periodic_rate();
    let payment = level_payment(params.principal, rate, n);

    let mut rows = Vec::with_capacity(n as usize);
    let mut balance = params.principal;
    let mut total_paid = 0.0;
    let mut total_interest = 0.0;

    for period in 1..=n {
        let interest = balance * rate;
        let (principal_part, paid) = if period == n {
            // Close the schedule exactly
            (balance, balance + interest)
        } else {
            let principal_part = (payment - interest).min(balance);
            (principal_part, principal_part + interest)
        };

        balance -= principal_part;
        total_paid += paid;
        total_interest += interest;

        rows.push(PaymentRow {
            period,
            payment: paid,
            interest,
            principal: principal_part,
            balance,
        });
    }

    Ok(LoanSchedule {
        payment,
        rows,
        total_paid,
        total_interest,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_zero_rate_amortization_closure() {
        let schedule = amortize(&LoanParameters {
            principal: 100_000.0,
            annual_rate: 0.0,
            years: 10.0,
            payments_per_year: 12,
        })
        .unwrap();

        assert_relative_eq!(schedule.payment, 100_000.0 / 120.0, max_relative = 1e-12);
        assert!((schedule.total_paid - 100_000.0).abs() < 0.01);
        assert_eq!(schedule.total_interest, 0.0);
        assert_eq!(schedule.rows.last().unwrap().balance, 0.0);

        let mut prev = 100_000.0;
        for row in &schedule.rows {
            assert!(row.balance <= prev, "balance must be non-increasing");
            prev = row.balance;
        }
    }

    #[test]
    fn test_level_payment_known_value() {
        // 30y monthly at 6%: the textbook 599.55 payment on 100k
        let payment = level_payment(100_000.0, 0.06 / 12.0, 360);
        assert!((payment - 599.55).abs() < 0.01);
    }

    #[test]
    fn test_positive_rate_schedule_closes() {
        let schedule = amortize(&LoanParameters {
            principal: 250_000.0,
            annual_rate: 0.045,
            years: 25.0,
            payments_per_year: 12,
        })
        .unwrap();

        let last = schedule.rows.last().unwrap();
        assert_eq!(last.balance, 0.0);
        // Final payment stays within a cent of the level payment
        assert!((last.payment - schedule.payment).abs() < 0.01);
        assert!(schedule.total_interest > 0.0);
        assert_relative_eq!(
            schedule.total_paid,
            250_000.0 + schedule.total_interest,
            max_relative = 1e-9
        );
    }

    #[test]
    fn test_interest_declines_over_schedule() {
        let schedule = amortize(&LoanParameters {
            principal: 100_000.0,
            annual_rate: 0.05,
            years: 10.0,
            payments_per_year: 12,
        })
        .unwrap();

        assert!(schedule.rows.first().unwrap().interest > schedule.rows.last().unwrap().interest);
    }

    #[test]
    fn test_rejects_malformed_loan() {
        let result = amortize(&LoanParameters {
            principal: -1.0,
            annual_rate: 0.05,
            years: 10.0,
            payments_per_year: 12,
        });
        assert!(result.is_err());

        let result = amortize(&LoanParameters {
            principal: 1.0,
            annual_rate: 0.05,
            years: 0.0,
            payments_per_year: 12,
        });
        assert!(result.is_err());
    }
}
