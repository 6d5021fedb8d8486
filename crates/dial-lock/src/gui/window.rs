use gtk::prelude::*;
use gtk4 as gtk;
use gtk4_layer_shell::{Edge, KeyboardMode, Layer, LayerShell};

pub fn init_layer_shell(window: &gtk::ApplicationWindow) {
    if !gtk4_layer_shell::is_supported() {
        log::info!("Layer shell unavailable, running as a regular window");
        return;
    }
    window.init_layer_shell();
    window.set_namespace(Some("dial-lock"));
    for edge in [Edge::Left, Edge::Right, Edge::Top, Edge::Bottom] {
        window.set_anchor(edge, true);
    }
    window.set_keyboard_mode(KeyboardMode::OnDemand);
}

/// Hiding the status bar puts the lock screen above panels; otherwise it
/// leaves their exclusive zones alone.
pub fn apply_status_bar(window: &gtk::ApplicationWindow, hidden: bool) {
    if window.is_layer_window() {
        if hidden {
            window.set_layer(Layer::Overlay);
            window.set_exclusive_zone(-1);
        } else {
            window.set_layer(Layer::Top);
            window.set_exclusive_zone(0);
        }
    } else if hidden {
        window.fullscreen();
    } else {
        window.unfullscreen();
    }
}
