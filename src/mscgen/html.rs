use super::CODE;
use super::render::MscgenRenderer;
use crate::domain::MscgenError;
use crate::host::{Element, Translator, Visit, VisitResult};

pub(super) fn visit_mscgen(t: &mut Translator<'_>, node: &Element) -> VisitResult {
    let renderer = t
        .state::<MscgenRenderer>()
        .ok_or(MscgenError::NotInitialized)?;
    let code = node.get(CODE).unwrap_or_default();

    if renderer.config().js.is_some() {
        render_msc_html_js(t, code)
    } else {
        render_msc_html(t, renderer, code)
    }
}

fn render_msc_html(t: &mut Translator<'_>, renderer: &MscgenRenderer, code: &str) -> VisitResult {
    let builder = t.builder();
    let file = renderer.render_msc(code, &builder.image_dir(), builder.supported_image_types())?;
    let imgpath = builder.relative_imgpath(t.docname());
    let alt = t.encode(code);

    let starttag = t.starttag("p", &[("class", "mscgen")]);
    t.body.push(starttag);
    t.body.push(format!(
        "<img src=\"{}/{}.{}\" alt=\"{}\"/>\n",
        imgpath,
        file.basename,
        file.extension(),
        alt.trim()
    ));
    t.body.push("</p>\n".to_string());
    Ok(Visit::SkipNode)
}

/// The chart is left to the client-side renderer.
fn render_msc_html_js(t: &mut Translator<'_>, code: &str) -> VisitResult {
    let starttag = t.starttag(
        "script",
        &[("type", "text/x-mscgen"), ("data-named-style", "classic")],
    );
    let encoded = t.encode(code);
    t.body.push(starttag);
    t.body.push(encoded);
    t.body.push("</script>".to_string());
    Ok(Visit::SkipNode)
}
