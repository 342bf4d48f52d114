//! Entry point for running the readout as a native window.

use eframe::egui;

use crate::config::ReadoutConfig;

use super::ReadoutApp;

/// Launch the readout in a native window.
///
/// Builds a [`ReadoutApp`] from `cfg`, sets the window icon and size, and
/// enters the eframe event loop. Blocks until the window is closed; the
/// running acquisition (if any) is stopped when the app is dropped.
pub fn run_readout(cfg: ReadoutConfig) -> eframe::Result<()> {
    let title = cfg.title.clone();
    let [w, h] = cfg.window_size;

    let mut viewport = egui::ViewportBuilder::default().with_inner_size(egui::vec2(w, h));
    if let Some(icon) = load_app_icon_svg() {
        viewport = viewport.with_icon(icon);
    }
    let opts = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    let app = ReadoutApp::new(cfg);
    eframe::run_native(
        &title,
        opts,
        Box::new(|cc| {
            // Install Phosphor icon font before creating the app.
            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);
            Ok(Box::new(app))
        }),
    )
}

/// Render the bundled `icon.svg` into an [`egui::IconData`].
///
/// Returns `None` if the SVG cannot be parsed or has no area.
fn load_app_icon_svg() -> Option<egui::IconData> {
    render_svg_icon(include_bytes!("../../icon.svg"))
}

fn render_svg_icon(data: &[u8]) -> Option<egui::IconData> {
    let opt = usvg::Options::default();
    let tree = usvg::Tree::from_data(data, &opt).ok()?;
    let size = tree.size().to_int_size();
    if size.width() == 0 || size.height() == 0 {
        return None;
    }
    let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height())?;
    let mut canvas = pixmap.as_mut();
    resvg::render(&tree, tiny_skia::Transform::default(), &mut canvas);
    let rgba = pixmap.take();
    Some(egui::IconData {
        rgba,
        width: size.width(),
        height: size.height(),
    })
}
