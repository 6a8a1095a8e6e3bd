use super::domain::Product;

pub const INTEREST_CSV_COLUMNS: [&str; 3] = ["Product Name", "Size", "Brand"];

/// Interest-list export failure.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to encode interest list as csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("csv buffer was not valid utf-8")]
    Encoding,
}

/// Render the interest list as a three-column CSV table: plain header row
/// first, then one double-quoted row per item in list order.
pub fn interest_list_csv(items: &[&Product]) -> Result<String, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .from_writer(Vec::new());

    for product in items {
        writer.write_record([
            product.name.as_str(),
            product.size.as_str(),
            product.brand.as_str(),
        ])?;
    }
    writer.flush().map_err(csv::Error::from)?;

    let body = writer.into_inner().map_err(|_| ExportError::Encoding)?;
    let body = String::from_utf8(body).map_err(|_| ExportError::Encoding)?;

    Ok(format!("{}\n{}", INTEREST_CSV_COLUMNS.join(","), body))
}
