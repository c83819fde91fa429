//! Loan helpers: EMI (equated monthly installment) and the indicative rate table.

/// Monthly EMI for `principal` at `annual_rate_pct` percent per year over `tenure_years`.
///
/// `EMI = P·r·(1+r)^n / ((1+r)^n − 1)` with `r = R / 1200` and `n = 12·T`.
/// A zero rate degenerates to `P / n`. Returns `None` for non-positive principal or tenure,
/// a negative rate, or non-finite inputs.
pub fn emi(principal: f64, annual_rate_pct: f64, tenure_years: f64) -> Option<f64> {
    if !principal.is_finite() || !annual_rate_pct.is_finite() || !tenure_years.is_finite() {
        return None;
    }
    if principal <= 0.0 || tenure_years <= 0.0 || annual_rate_pct < 0.0 {
        return None;
    }
    let n = tenure_years * 12.0;
    if annual_rate_pct == 0.0 {
        return Some(principal / n);
    }
    let r = annual_rate_pct / 1200.0;
    let growth = (1.0 + r).powf(n);
    Some(principal * r * growth / (growth - 1.0))
}

/// Formats an amount with two decimals and comma thousands separators, e.g. `10,258.27`.
pub fn format_inr(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, frac_part)
}

/// One row of the indicative interest-rate table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoanRate {
    pub loan_type: &'static str,
    pub rate_pct: f64,
}

pub const LOAN_RATES: [LoanRate; 4] = [
    LoanRate { loan_type: "Home Loan", rate_pct: 8.5 },
    LoanRate { loan_type: "Personal Loan", rate_pct: 12.5 },
    LoanRate { loan_type: "Car Loan", rate_pct: 9.0 },
    LoanRate { loan_type: "Education Loan", rate_pct: 10.5 },
];

pub const LOAN_HIGHLIGHTS: [(&str, &str); 4] = [
    ("Home Loan", "Low-interest rates starting from 8.5%"),
    ("Personal Loan", "Quick disbursal within 24 hours"),
    ("Car Loan", "Flexible tenure up to 7 years"),
    ("Education Loan", "Special student discounts"),
];
