use std::collections::HashSet;

use itertools::Itertools;

use crate::core::period::BillingPeriod;

const FORBIDDEN: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Make the name safe to use as a file name: `My/Home: Charger*` → `My_Home_Charger`.
#[must_use]
pub fn make_safe(name: &str) -> String {
    let replaced: String =
        name.chars().map(|c| if FORBIDDEN.contains(&c) || c == ' ' { '_' } else { c }).collect();
    let collapsed = replaced.split('_').filter(|part| !part.is_empty()).join("_");
    collapsed.trim_matches(['_', '.']).to_owned()
}

/// Invoice file name stem, without the extension.
#[must_use]
pub fn invoice_stem(period: &BillingPeriod, installation_name: &str) -> String {
    format!("{}_grunnlag_{}", period.file_prefix(), make_safe(installation_name))
}

/// Hands out file names that have not been used yet within the archive.
#[derive(Default)]
pub struct UniqueNames(HashSet<String>);

impl UniqueNames {
    /// Claim `{stem}.{extension}`, or `{stem}_2.{extension}` and so on when it is already taken.
    pub fn claim(&mut self, stem: &str, extension: &str) -> String {
        let mut name = format!("{stem}.{extension}");
        let mut n = 1;
        while self.0.contains(&name) {
            n += 1;
            name = format!("{stem}_{n}.{extension}");
        }
        self.0.insert(name.clone());
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{prelude::*, quantity::rate::KilowattHourRate};

    #[test]
    fn test_make_safe() {
        assert_eq!(make_safe("My/Home: Charger*"), "My_Home_Charger");
        assert_eq!(make_safe("Hytta"), "Hytta");
        assert_eq!(make_safe("  Borettslag A.  "), "Borettslag_A");
        assert_eq!(make_safe("a<b>c|d?e\"f\\g"), "a_b_c_d_e_f_g");
        assert_eq!(make_safe("Blåbærveien 12"), "Blåbærveien_12");
        assert_eq!(make_safe(""), "");
    }

    #[test]
    fn test_make_safe_trims_after_replacing() {
        assert_eq!(make_safe("Hytta.:"), "Hytta");
        assert_eq!(make_safe("A. "), "A");
        assert_eq!(make_safe("A.*"), "A");
        assert_eq!(make_safe("..Hytta._."), "Hytta");
        assert_eq!(make_safe("v1.2 Garasje"), "v1.2_Garasje");
    }

    #[test]
    fn test_invoice_stem() -> Result {
        let period = BillingPeriod::try_new(2024, 6, KilowattHourRate::from(1.5))?;
        assert_eq!(invoice_stem(&period, "My/Home: Charger*"), "2024_06_grunnlag_My_Home_Charger");
        Ok(())
    }

    #[test]
    fn test_unique_names() {
        let mut names = UniqueNames::default();
        assert_eq!(names.claim("2024_06_grunnlag_Hytta", "pdf"), "2024_06_grunnlag_Hytta.pdf");
        assert_eq!(names.claim("2024_06_grunnlag_Hytta", "pdf"), "2024_06_grunnlag_Hytta_2.pdf");
        assert_eq!(names.claim("2024_06_grunnlag_Hytta", "pdf"), "2024_06_grunnlag_Hytta_3.pdf");
        assert_eq!(names.claim("2024_06_grunnlag_Hytta", "csv"), "2024_06_grunnlag_Hytta.csv");
    }
}
