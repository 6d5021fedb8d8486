use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;

pub struct ThemeColors {
    pub face: Srgba<f64>,
    pub face_border: Srgba<f64>,
    pub hub: Srgba<f64>,
    pub hub_border: Srgba<f64>,
    /// Base colour for ticks, labels, the indicator and the dots. Alpha comes
    /// from the scene.
    pub ink: Srgba<f64>,
    pub indicator: Srgba<f64>,
    pub shadow: Srgba<f64>,
}

impl ThemeColors {
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        Self {
            face: Self::lookup_color(
                context,
                "dial_face_color",
                Srgba::new(0.0, 0.0, 0.0, 0.18),
                None,
            ),
            face_border: Self::lookup_color(
                context,
                "theme_fg_color",
                Srgba::new(1.0, 1.0, 1.0, 0.22),
                Some(0.22),
            ),
            hub: Self::lookup_color(
                context,
                "dial_hub_color",
                Srgba::new(0.0, 0.0, 0.0, 0.35),
                None,
            ),
            hub_border: Self::lookup_color(
                context,
                "theme_fg_color",
                Srgba::new(1.0, 1.0, 1.0, 0.12),
                Some(0.12),
            ),
            ink: Self::lookup_color(
                context,
                "theme_fg_color",
                Srgba::new(1.0, 1.0, 1.0, 1.0),
                Some(1.0),
            ),
            indicator: Self::lookup_color(
                context,
                "theme_fg_color",
                Srgba::new(1.0, 1.0, 1.0, 0.9),
                Some(0.9),
            ),
            shadow: Srgba::new(0.0, 0.0, 0.0, 0.25),
        }
    }

    pub fn ink_with_alpha(&self, alpha: f64) -> Srgba<f64> {
        Srgba::new(self.ink.red, self.ink.green, self.ink.blue, self.ink.alpha * alpha)
    }

    fn lookup_color(
        context: &gtk::StyleContext,
        name: &str,
        fallback: Srgba<f64>,
        alpha_override: Option<f64>,
    ) -> Srgba<f64> {
        context
            .lookup_color(name)
            .map(|c| {
                let (r, g, b, a) = (
                    c.red() as f64,
                    c.green() as f64,
                    c.blue() as f64,
                    c.alpha() as f64,
                );
                Srgba::new(r, g, b, alpha_override.unwrap_or(a))
            })
            .unwrap_or(fallback)
    }
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
@define-color dial_face_color rgba(0, 0, 0, 0.18);
@define-color dial_hub_color rgba(0, 0, 0, 0.35);

.dial-lock-window {
    background-image: linear-gradient(to bottom right,
        rgb(20, 51, 115), rgb(38, 107, 107), rgb(140, 102, 26));
    color: rgba(255, 255, 255, 0.92);
}
.dial-lock-area {
    background: none;
    background-color: transparent;
}
.dial-lock-title {
    font-size: 1.3em;
    font-weight: 600;
}
.dial-lock-caption {
    font-size: 0.85em;
    font-weight: 600;
    color: rgba(255, 255, 255, 0.75);
}
.dial-lock-button {
    min-width: 52px;
    min-height: 52px;
    border-radius: 26px;
    background: rgba(255, 255, 255, 0.12);
    color: rgba(255, 255, 255, 0.92);
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
