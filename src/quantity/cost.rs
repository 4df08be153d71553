use std::fmt::{Debug, Display, Formatter};

use crate::{fmt::Accounting, quantity::Quantity};

/// Norwegian kroner.
pub type Cost = Quantity<0, 0, 1>;

impl Display for Cost {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} kr", Accounting(self.0.0))
    }
}

impl Debug for Cost {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}kr", self.0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Cost::from(23.25).to_string(), "23,25 kr");
        assert_eq!(Cost::from(1_234_567.5).to_string(), "1 234 567,50 kr");
    }
}
