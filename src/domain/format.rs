//! Image formats and the negotiation between builder support and renderer output.

/// Formats a rendered chart can be written as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Svg,
    Pdf,
    Png,
}

impl ImageFormat {
    pub fn mime_type(self) -> &'static str {
        match self {
            ImageFormat::Svg => "image/svg+xml",
            ImageFormat::Pdf => "application/pdf",
            ImageFormat::Png => "image/png",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Svg => "svg",
            ImageFormat::Pdf => "pdf",
            ImageFormat::Png => "png",
        }
    }

    /// What mscgen has to produce for this format. PDF is converted from SVG.
    pub fn output_type(self) -> OutputType {
        match self {
            ImageFormat::Png => OutputType::Png,
            ImageFormat::Svg | ImageFormat::Pdf => OutputType::Svg,
        }
    }
}

/// Output types understood by `mscgen -T`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputType {
    Svg,
    Png,
}

impl OutputType {
    pub fn as_arg(self) -> &'static str {
        match self {
            OutputType::Svg => "svg",
            OutputType::Png => "png",
        }
    }
}

/// Optional conversions compiled into this binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub pdf_conversion: bool,
}

impl Capabilities {
    pub fn detect() -> Self {
        Self {
            pdf_conversion: cfg!(feature = "pdf"),
        }
    }

    /// Formats in order of preference. PDF is only offered when it can be produced.
    pub fn preferred_formats(self) -> Vec<ImageFormat> {
        let mut formats = vec![ImageFormat::Svg];
        if self.pdf_conversion {
            formats.push(ImageFormat::Pdf);
        }
        formats.push(ImageFormat::Png);
        formats
    }
}

/// Picks the most preferred format that the builder also supports.
pub fn determine_format<S: AsRef<str>>(
    supported: &[S],
    capabilities: Capabilities,
) -> Option<ImageFormat> {
    capabilities
        .preferred_formats()
        .into_iter()
        .find(|format| supported.iter().any(|s| s.as_ref() == format.mime_type()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const WITH_PDF: Capabilities = Capabilities {
        pdf_conversion: true,
    };
    const WITHOUT_PDF: Capabilities = Capabilities {
        pdf_conversion: false,
    };

    #[test]
    fn svg_wins_regardless_of_order() {
        let orders = [
            vec!["image/svg+xml", "image/png"],
            vec!["image/png", "image/svg+xml"],
            vec!["application/pdf", "image/png", "image/svg+xml"],
            vec!["image/gif", "image/svg+xml", "image/jpeg"],
        ];
        for supported in orders {
            assert_eq!(
                determine_format(&supported, WITH_PDF),
                Some(ImageFormat::Svg),
                "supported: {supported:?}"
            );
            assert_eq!(
                determine_format(&supported, WITHOUT_PDF),
                Some(ImageFormat::Svg)
            );
        }
    }

    #[test]
    fn png_only_builder_gets_png() {
        assert_eq!(
            determine_format(&["image/png"], WITH_PDF),
            Some(ImageFormat::Png)
        );
    }

    #[test]
    fn pdf_requires_conversion_capability() {
        let latex = ["application/pdf", "image/png", "image/jpeg"];
        assert_eq!(determine_format(&latex, WITH_PDF), Some(ImageFormat::Pdf));
        assert_eq!(determine_format(&latex, WITHOUT_PDF), Some(ImageFormat::Png));
        assert_eq!(determine_format(&["application/pdf"], WITHOUT_PDF), None);
    }

    #[test]
    fn empty_or_disjoint_support_yields_none() {
        let empty: [&str; 0] = [];
        assert_eq!(determine_format(&empty, WITH_PDF), None);
        assert_eq!(determine_format(&["image/gif", "image/jpeg"], WITH_PDF), None);
    }

    #[test]
    fn pdf_renders_from_svg() {
        assert_eq!(ImageFormat::Pdf.output_type(), OutputType::Svg);
        assert_eq!(ImageFormat::Png.output_type().as_arg(), "png");
    }
}
