use super::CODE;
use super::render::MscgenRenderer;
use crate::domain::MscgenError;
use crate::host::{Element, Translator, Visit, VisitResult};
use std::path::Path;

/// Characters TeX reads as markup even inside a graphics file name.
const UNSAFE_PATH_CHARS: &[char] = &['%', '#', '{', '}', '$', '&', '^'];

pub(super) fn visit_mscgen(t: &mut Translator<'_>, node: &Element) -> VisitResult {
    let renderer = t
        .state::<MscgenRenderer>()
        .ok_or(MscgenError::NotInitialized)?;
    let code = node.get(CODE).unwrap_or_default();

    let builder = t.builder();
    // Validated before any image is written.
    let outdir = graphics_path(builder.outdir())?;
    let file = renderer.render_msc(code, builder.outdir(), builder.supported_image_types())?;

    // `{path}.ext` keeps graphicx from reading dots in the path as the extension.
    t.body.push(format!(
        "\n\\noindent\\sphinxincludegraphics{{{{{}/{}}}.{}}}\n",
        outdir.trim_end_matches('/'),
        file.basename,
        file.extension()
    ));
    Ok(Visit::SkipNode)
}

/// `path` with forward slashes, or an error if TeX cannot take it verbatim.
fn graphics_path(path: &Path) -> Result<String, MscgenError> {
    let text = path.to_string_lossy().replace('\\', "/");
    match text.chars().find(|ch| UNSAFE_PATH_CHARS.contains(ch)) {
        Some(ch) => Err(MscgenError::LatexPath {
            path: path.to_path_buf(),
            ch,
        }),
        None => Ok(text),
    }
}
