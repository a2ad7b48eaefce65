use crate::error::ErrorCode;
use anchor_lang::prelude::*;

/// A fraction `numerator / denominator` used as a slippage tolerance.
#[derive(Copy, Clone, Debug, PartialEq, Eq, AnchorSerialize, AnchorDeserialize)]
pub struct Percentage {
    pub numerator: u64,
    pub denominator: u64,
}

impl Percentage {
    /// # Errors
    /// * `ErrorCode::InvalidSlippage` - zero denominator or a fraction above one.
    pub fn from_fraction(numerator: u64, denominator: u64) -> Result<Self> {
        let percentage = Self {
            numerator,
            denominator,
        };
        percentage.validate()?;
        Ok(percentage)
    }

    /// Whole percent, e.g. `from_percent(1)` is 1%.
    pub fn from_percent(percent: u64) -> Result<Self> {
        Self::from_fraction(percent, 100)
    }

    pub fn from_bps(bps: u64) -> Result<Self> {
        Self::from_fraction(bps, 10_000)
    }

    pub fn zero() -> Self {
        Self {
            numerator: 0,
            denominator: 1,
        }
    }

    pub fn validate(&self) -> Result<()> {
        require!(
            self.denominator > 0 && self.numerator <= self.denominator,
            ErrorCode::InvalidSlippage
        );
        Ok(())
    }

    /// `floor(amount * (denominator - numerator) / denominator)`
    pub fn adjust_down(&self, amount: u64) -> Result<u64> {
        self.validate()?;
        let den = u128::from(self.denominator);
        let factor = den - u128::from(self.numerator);
        // Bounded by `amount`, so the narrowing cannot fail
        Ok((u128::from(amount) * factor / den) as u64)
    }

    /// `ceil(amount * (denominator + numerator) / denominator)`
    ///
    /// # Errors
    /// * `ErrorCode::Overflow` - the widened amount does not fit in `u64`.
    pub fn adjust_up(&self, amount: u64) -> Result<u64> {
        self.validate()?;
        let den = u128::from(self.denominator);
        let factor = den + u128::from(self.numerator);
        let adjusted = (u128::from(amount) * factor).div_ceil(den);
        u64::try_from(adjusted).map_err(|_| error!(ErrorCode::Overflow))
    }
}
