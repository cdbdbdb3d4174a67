//! SVG to PDF conversion for typeset output.

use crate::domain::MscgenError;
use std::path::Path;

/// Converts an SVG document to PDF and writes it to `path`.
#[cfg(feature = "pdf")]
pub fn svg_to_pdf(svg: &[u8], path: &Path) -> Result<(), MscgenError> {
    use std::sync::Arc;

    let mut opts = usvg::Options::default();
    let mut fontdb = fontdb::Database::new();
    fontdb.load_system_fonts();
    opts.fontdb = Arc::new(fontdb);

    let tree = usvg::Tree::from_data(svg, &opts)
        .map_err(|e| MscgenError::Conversion(format!("SVG parsing error: {e}")))?;

    let pdf = svg2pdf::to_pdf(
        &tree,
        svg2pdf::ConversionOptions::default(),
        svg2pdf::PageOptions::default(),
    )
    .map_err(|e| MscgenError::Conversion(e.to_string()))?;

    std::fs::write(path, pdf)?;
    Ok(())
}

/// PDF is never negotiated without the `pdf` feature.
#[cfg(not(feature = "pdf"))]
pub fn svg_to_pdf(_svg: &[u8], _path: &Path) -> Result<(), MscgenError> {
    Err(MscgenError::Conversion(
        "built without the `pdf` feature".to_string(),
    ))
}

#[cfg(all(test, feature = "pdf"))]
mod tests {
    use super::*;

    #[test]
    fn test_svg_to_pdf_writes_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.pdf");
        let svg = br#"<svg xmlns="http://www.w3.org/2000/svg" width="20" height="10"><rect width="20" height="10"/></svg>"#;

        svg_to_pdf(svg, &path).unwrap();
        let pdf = std::fs::read(&path).unwrap();
        assert!(pdf.starts_with(b"%PDF"));
    }

    #[test]
    fn test_invalid_svg_is_conversion_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = svg_to_pdf(b"not svg", &dir.path().join("x.pdf")).unwrap_err();
        assert!(matches!(err, MscgenError::Conversion(_)));
        assert!(!dir.path().join("x.pdf").exists());
    }
}
