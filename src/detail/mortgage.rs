/// Interest rate the calculator starts with, in percent per year
pub const DEFAULT_RATE: &str = "6.5";
/// Loan term the calculator starts with, in years
pub const DEFAULT_TERM: &str = "30";

/// Fixed-rate monthly payment for `principal` at `annual_rate_percent` over
/// `term_years`.
///
/// `M = P * r(1+r)^n / ((1+r)^n - 1)` with `r` the monthly rate and `n` the
/// number of monthly payments. A zero rate reduces to `P / n`. Returns
/// `None` when the inputs do not describe a loan: no payments, a negative
/// rate at or below -100%, or non-finite values.
pub fn monthly_payment(principal: f64, annual_rate_percent: f64, term_years: f64) -> Option<f64> {
    if !principal.is_finite() || !annual_rate_percent.is_finite() || !term_years.is_finite() {
        return None;
    }

    let payments = term_years * 12.0;
    if payments <= 0.0 {
        return None;
    }

    let rate = annual_rate_percent / 100.0 / 12.0;
    if rate <= -1.0 {
        return None;
    }
    if rate == 0.0 {
        return Some(principal / payments);
    }

    let growth = (1.0 + rate).powf(payments);
    let payment = principal * (rate * growth) / (growth - 1.0);
    payment.is_finite().then_some(payment)
}

/// Raw text of the calculator inputs, as typed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MortgageForm {
    /// Blank means "use the listing price"
    pub loan_amount: String,
    pub interest_rate: String,
    pub loan_term: String,
}

impl Default for MortgageForm {
    fn default() -> Self {
        Self {
            loan_amount: String::new(),
            interest_rate: DEFAULT_RATE.to_string(),
            loan_term: DEFAULT_TERM.to_string(),
        }
    }
}

impl MortgageForm {
    /// Loan amount typed in, falling back to `listing_price` when it is
    /// blank, unparseable or zero
    pub fn principal(&self, listing_price: f64) -> f64 {
        parse_field(&self.loan_amount)
            .filter(|amount| *amount != 0.0)
            .unwrap_or(listing_price)
    }

    pub fn monthly_payment(&self, listing_price: f64) -> Option<f64> {
        let rate = parse_field(&self.interest_rate)?;
        let term = parse_field(&self.loan_term)?;
        monthly_payment(self.principal(listing_price), rate, term)
    }

    /// Payment rounded to cents for display, `"-"` when there is none
    pub fn display(&self, listing_price: f64) -> String {
        match self.monthly_payment(listing_price) {
            Some(payment) => format!("{:.2}", payment),
            None => "-".to_string(),
        }
    }
}

fn parse_field(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}
