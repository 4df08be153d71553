use comfy_table::{Attribute, Cell, CellAlignment, Table, modifiers, presets};

use crate::{api::zaptec::Installation, export::summary::SummaryRow};

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.enforce_styling();
    table
}

pub fn build_installations_table(installations: &[Installation]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["ID", "Name"]);
    for installation in installations {
        table.add_row(vec![
            Cell::new(&installation.id).add_attribute(Attribute::Dim),
            Cell::new(installation.display_name()),
        ]);
    }
    table
}

pub fn build_summary_table(rows: &[SummaryRow]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Installation", "File", "Energy", "Amount"]);
    for row in rows {
        table.add_row(vec![
            Cell::new(&row.installation_name),
            Cell::new(&row.file_name).add_attribute(Attribute::Dim),
            Cell::new(row.energy).set_alignment(CellAlignment::Right),
            Cell::new(row.cost).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quantity::{cost::Cost, energy::KilowattHours};

    #[test]
    fn test_build_summary_table() {
        let rows = [SummaryRow::builder()
            .installation_name("Hytta")
            .installation_id("INST1")
            .file_name("2024_06_grunnlag_Hytta.pdf")
            .energy(KilowattHours::from(1234.5))
            .cost(Cost::from(1851.75))
            .build()];
        let rendered = build_summary_table(&rows).to_string();
        assert!(rendered.contains("2024_06_grunnlag_Hytta.pdf"));
        assert!(rendered.contains("1234.500 kWh"));
        assert!(rendered.contains("1 851,75 kr"));
    }

    #[test]
    fn test_build_installations_table() {
        let installations = [
            Installation { id: "INST1".to_owned(), name: Some("Hytta".to_owned()) },
            Installation { id: "INST2".to_owned(), name: None },
        ];
        let rendered = build_installations_table(&installations).to_string();
        assert!(rendered.contains("Hytta"));
        assert_eq!(rendered.matches("INST2").count(), 2);
    }
}
