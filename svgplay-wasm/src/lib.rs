use svgplay_core::document::{DocumentLoader, DocumentOptions, ElementError};
use svgplay_svg::{render_with_options, RenderOptions};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct ConvertOutput {
    svg: String,
    diagnostics: String,
    has_error: bool,
}

#[wasm_bindgen]
impl ConvertOutput {
    #[wasm_bindgen(getter)]
    pub fn svg(&self) -> String {
        self.svg.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn diagnostics(&self) -> String {
        self.diagnostics.clone()
    }

    #[wasm_bindgen(getter, js_name = hasError)]
    pub fn has_error(&self) -> bool {
        self.has_error
    }
}

#[wasm_bindgen]
pub fn flatten_svg(source: &str, segments: Option<u32>, holes: Option<bool>) -> ConvertOutput {
    convert_document(source, segments, holes)
}

fn convert_document(source: &str, segments: Option<u32>, holes: Option<bool>) -> ConvertOutput {
    let options = DocumentOptions {
        holes: holes.unwrap_or(true),
        curve_segments: segments.map(|n| n as usize),
    };
    let mut loader = DocumentLoader::new(options);

    match loader.load(source) {
        Ok(scene) => ConvertOutput {
            svg: render_with_options(&scene, &RenderOptions::default()).to_string(),
            diagnostics: collect_diagnostics(loader.errors()),
            has_error: false,
        },
        Err(e) => ConvertOutput {
            svg: String::new(),
            diagnostics: format!("fatal {e}"),
            has_error: true,
        },
    }
}

fn collect_diagnostics(errors: &[ElementError]) -> String {
    let lines: Vec<String> = errors.iter().map(|err| format!("warning {err}")).collect();
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::convert_document;

    #[test]
    fn converts_document_and_returns_svg() {
        let output = convert_document(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="20" height="10"><path d="M0,0 C0,10 10,10 10,0"/></svg>"#,
            Some(2),
            None,
        );

        assert!(
            !output.has_error,
            "unexpected diagnostics: {}",
            output.diagnostics
        );
        assert!(output.svg.contains("<svg"), "missing SVG root");
        assert!(
            output.svg.contains("viewBox=\"0 0 20 10\""),
            "missing declared viewport"
        );
        assert!(
            output.svg.contains("L5.0000,7.5000"),
            "curve was not flattened at the requested resolution: {}",
            output.svg
        );
    }

    #[test]
    fn reports_dropped_elements_as_warnings() {
        let output = convert_document(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10"><path d="M0,0 Q5,5"/><path d="M0,0 L4,4"/></svg>"#,
            None,
            None,
        );

        assert!(!output.has_error, "element failures are not fatal");
        assert!(
            output.diagnostics.contains("warning"),
            "expected a warning line, got: {}",
            output.diagnostics
        );
        assert!(
            output.svg.contains("L4.0000,4.0000"),
            "expected the good path to survive: {}",
            output.svg
        );
    }
}
