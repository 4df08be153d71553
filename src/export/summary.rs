use bon::Builder;
use rust_xlsxwriter::{Format, Workbook};

use crate::{
    prelude::*,
    quantity::{cost::Cost, energy::KilowattHours},
};

pub const HEADER: [&str; 5] =
    ["Installasjon", "Installasjons-ID", "Filnavn", "Strømforbruk (kWh)", "Beløp (NOK)"];

/// One exported installation in the summary table.
#[derive(Clone, Debug, Builder)]
pub struct SummaryRow {
    #[builder(into)]
    pub installation_name: String,

    #[builder(into)]
    pub installation_id: String,

    #[builder(into)]
    pub file_name: String,

    pub energy: KilowattHours,
    pub cost: Cost,
}

/// Serialize the rows as comma-separated values, header included.
pub fn to_csv(rows: &[SummaryRow]) -> Result<Vec<u8>> {
    let mut writer =
        csv::WriterBuilder::new().terminator(csv::Terminator::Any(b'\n')).from_writer(Vec::new());
    writer.write_record(HEADER)?;
    for row in rows {
        let energy = format!("{:.3}", row.energy.into_inner());
        let cost = format!("{:.2}", row.cost.into_inner());
        writer.write_record([
            row.installation_name.as_str(),
            row.installation_id.as_str(),
            row.file_name.as_str(),
            energy.as_str(),
            cost.as_str(),
        ])?;
    }
    writer.flush()?;
    writer.into_inner().map_err(|error| error.into_error().into())
}

/// Serialize the rows into an Excel workbook with a single sheet.
pub fn to_xlsx(rows: &[SummaryRow]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();
    let energy_format = Format::new().set_num_format("0.000");
    let cost_format = Format::new().set_num_format("0.00");

    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Oppsummering")?;
    for (column, title) in (0..).zip(HEADER) {
        worksheet.write_string_with_format(0, column, title, &bold)?;
    }
    for (index, row) in (1..).zip(rows) {
        worksheet.write_string(index, 0, &row.installation_name)?;
        worksheet.write_string(index, 1, &row.installation_id)?;
        worksheet.write_string(index, 2, &row.file_name)?;
        worksheet.write_number_with_format(index, 3, row.energy.into_inner(), &energy_format)?;
        worksheet.write_number_with_format(index, 4, row.cost.into_inner(), &cost_format)?;
    }
    worksheet.autofit();

    Ok(workbook.save_to_buffer()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<SummaryRow> {
        vec![
            SummaryRow::builder()
                .installation_name("Hytta, nede")
                .installation_id("INST1")
                .file_name("2024_06_grunnlag_Hytta,_nede.pdf")
                .energy(KilowattHours::from(7.2))
                .cost(Cost::from(10.8))
                .build(),
        ]
    }

    #[test]
    fn test_to_csv() -> Result {
        let csv = String::from_utf8(to_csv(&rows())?)?;
        assert_eq!(
            csv,
            "Installasjon,Installasjons-ID,Filnavn,Strømforbruk (kWh),Beløp (NOK)\n\
             \"Hytta, nede\",INST1,\"2024_06_grunnlag_Hytta,_nede.pdf\",7.200,10.80\n",
        );
        Ok(())
    }

    #[test]
    fn test_to_csv_empty() -> Result {
        let csv = String::from_utf8(to_csv(&[])?)?;
        assert_eq!(csv.lines().count(), 1);
        Ok(())
    }

    #[test]
    fn test_to_xlsx() -> Result {
        let bytes = to_xlsx(&rows())?;
        // XLSX is a ZIP container.
        assert!(bytes.starts_with(b"PK"));
        Ok(())
    }
}
