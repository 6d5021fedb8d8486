use crate::config::{self, Feedback, Overrides};
use crate::events::AppEvent;
use crate::gui::dial::{self, DIAL_MAX_SIZE, DOTS_HEIGHT, State};
use crate::gui::theme::{self, ThemeColors};
use crate::gui::window;
use gdk4::Key;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use rotary::settings::{Preference, SettingsStore};
use rotary::{DialAction, Point};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

pub struct AppModel {
    pub state: Rc<RefCell<State>>,
    pub settings: Box<dyn SettingsStore>,
    pub overrides: Overrides,
    pub hide_status_bar: bool,
    pub caption: String,
    pub root: gtk::ApplicationWindow,
    pub dial_area: gtk::DrawingArea,
    pub dots_area: gtk::DrawingArea,
    /// Set while a tick callback is easing the face.
    pub animating: Rc<Cell<bool>>,
}

#[derive(Debug)]
pub enum AppMsg {
    DragBegin(Point),
    DragMove(Point),
    DragEnd,
    Delete,
    Reset,
    SetHideStatusBar(bool),
    ConfigReload,
    SettingsReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::ConfigReload => AppMsg::ConfigReload,
            AppEvent::SettingsReload => AppMsg::SettingsReload,
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (
        State,
        Box<dyn SettingsStore>,
        Overrides,
        async_channel::Receiver<AppEvent>,
    );
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Dial Lock"),
            set_default_size: (420, 720),
            add_css_class: "dial-lock-window",

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    match key {
                        Key::BackSpace => {
                            sender.input(AppMsg::Delete);
                            glib::Propagation::Stop
                        }
                        Key::Escape => {
                            sender.input(AppMsg::Reset);
                            glib::Propagation::Stop
                        }
                        _ => glib::Propagation::Proceed,
                    }
                }
            },

            gtk::Overlay {
                gtk::Box {
                    set_orientation: gtk::Orientation::Vertical,
                    set_spacing: 16,
                    set_margin_top: 42,
                    set_margin_bottom: 24,
                    set_margin_start: 24,
                    set_margin_end: 24,

                    gtk::Label {
                        set_label: "Enter Passcode",
                        add_css_class: "dial-lock-title",
                    },

                    #[name = "dots_area"]
                    gtk::DrawingArea {
                        set_content_height: DOTS_HEIGHT,
                        set_hexpand: true,
                        add_css_class: "dial-lock-area",
                    },

                    gtk::Label {
                        add_css_class: "dial-lock-caption",
                        #[watch]
                        set_label: &model.caption,
                    },

                    #[name = "dial_area"]
                    gtk::DrawingArea {
                        set_content_width: DIAL_MAX_SIZE,
                        set_content_height: DIAL_MAX_SIZE,
                        set_halign: gtk::Align::Center,
                        set_vexpand: true,
                        add_css_class: "dial-lock-area",

                        add_controller = gtk::GestureDrag {
                            connect_drag_begin[sender] => move |_, x, y| {
                                sender.input(AppMsg::DragBegin(Point::new(x, y)));
                            },
                            connect_drag_update[sender] => move |gesture, dx, dy| {
                                if let Some((x, y)) = gesture.start_point() {
                                    sender.input(AppMsg::DragMove(Point::new(x + dx, y + dy)));
                                }
                            },
                            connect_drag_end[sender] => move |_, _, _| {
                                sender.input(AppMsg::DragEnd);
                            },
                        },
                    },

                    gtk::Box {
                        set_orientation: gtk::Orientation::Horizontal,
                        set_spacing: 16,
                        set_halign: gtk::Align::Center,

                        gtk::Button {
                            set_icon_name: "edit-clear-symbolic",
                            set_tooltip_text: Some("Delete"),
                            add_css_class: "dial-lock-button",
                            connect_clicked => AppMsg::Delete,
                        },

                        gtk::Button {
                            set_label: "Reset",
                            add_css_class: "dial-lock-button",
                            connect_clicked => AppMsg::Reset,
                        },
                    },
                },

                add_overlay = &gtk::MenuButton {
                    set_icon_name: "emblem-system-symbolic",
                    set_halign: gtk::Align::End,
                    set_valign: gtk::Align::Start,
                    set_margin_top: 8,
                    set_margin_end: 8,

                    #[wrap(Some)]
                    set_popover = &gtk::Popover {
                        gtk::Box {
                            set_orientation: gtk::Orientation::Horizontal,
                            set_spacing: 12,

                            gtk::Label {
                                set_label: Preference::HideStatusBar.label(),
                            },

                            gtk::Switch {
                                #[watch]
                                #[block_signal(status_bar_handler)]
                                set_active: model.hide_status_bar,
                                connect_state_set[sender] => move |_, active| {
                                    sender.input(AppMsg::SetHideStatusBar(active));
                                    glib::Propagation::Proceed
                                } @status_bar_handler,
                            },
                        },
                    },
                },
            },
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (state, settings, overrides, rx) = init;

        theme::load_css();
        window::init_layer_shell(&root);

        let hide_status_bar = settings.get(Preference::HideStatusBar);
        let caption = state.caption();
        let state = Rc::new(RefCell::new(state));

        let mut model = AppModel {
            state,
            settings,
            overrides,
            hide_status_bar,
            caption,
            root: root.clone(),
            dial_area: gtk::DrawingArea::default(),
            dots_area: gtk::DrawingArea::default(),
            animating: Rc::new(Cell::new(false)),
        };

        let widgets = view_output!();

        model.dial_area = widgets.dial_area.clone();
        model.dots_area = widgets.dots_area.clone();
        window::apply_status_bar(&root, model.hide_status_bar);

        let state_resize = model.state.clone();
        widgets.dial_area.connect_resize(move |_, width, height| {
            state_resize
                .borrow_mut()
                .resize(width as f64, height as f64);
        });

        let state_draw = model.state.clone();
        widgets
            .dial_area
            .set_draw_func(move |drawing_area, cr, _, _| {
                let colors = ThemeColors::from_context(&drawing_area.style_context());
                if let Err(e) = dial::draw(cr, &state_draw.borrow().scene(), &colors) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let state_dots = model.state.clone();
        widgets
            .dots_area
            .set_draw_func(move |drawing_area, cr, width, height| {
                let colors = ThemeColors::from_context(&drawing_area.style_context());
                let origin = Point::new(width as f64 / 2.0, height as f64 / 2.0);
                let dots = state_dots.borrow().dots(origin);
                if let Err(e) = dial::draw_dots(cr, &dots, &colors) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::DragBegin(point) => {
                let action = self.state.borrow_mut().drag_begin(point);
                self.apply(action);
            }
            AppMsg::DragMove(point) => {
                let action = self.state.borrow_mut().drag_move(point);
                self.apply(action);
            }
            AppMsg::DragEnd => {
                let action = self.state.borrow_mut().drag_end();
                if let Some(value) = action.picked {
                    log::debug!("Picked {}", value);
                }
                self.apply(action);
            }
            AppMsg::Delete => {
                let action = self.state.borrow_mut().delete();
                self.apply(action);
            }
            AppMsg::Reset => {
                let action = self.state.borrow_mut().reset();
                self.apply(action);
            }
            AppMsg::SetHideStatusBar(hidden) => {
                if hidden == self.hide_status_bar {
                    return;
                }
                self.hide_status_bar = hidden;
                if let Err(e) = self.settings.set(Preference::HideStatusBar, hidden) {
                    log::error!("Failed to save settings: {}", e);
                }
                window::apply_status_bar(&self.root, hidden);
            }
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    let new_config = self.overrides.apply(new_config);
                    self.state.borrow_mut().reconfigure(&new_config);
                    self.refresh();
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
            AppMsg::SettingsReload => {
                if let Err(e) = self.settings.reload() {
                    log::error!("Failed to reload settings: {}", e);
                    return;
                }
                let hidden = self.settings.get(Preference::HideStatusBar);
                if hidden != self.hide_status_bar {
                    self.hide_status_bar = hidden;
                    window::apply_status_bar(&self.root, hidden);
                }
            }
        }
    }
}

impl AppModel {
    fn apply(&mut self, action: DialAction) {
        if action.changed.is_some() && self.state.borrow().feedback == Feedback::Bell {
            self.dial_area.error_bell();
        }
        if action.should_redraw || action.should_animate {
            self.refresh();
        }
        if action.should_animate {
            self.start_animation();
        }
    }

    /// Drives the snap spring from the frame clock until it settles.
    fn start_animation(&self) {
        if self.animating.replace(true) {
            return;
        }

        let state = self.state.clone();
        let animating = self.animating.clone();
        let last_frame = Cell::new(None::<i64>);
        let _ = self.dial_area.add_tick_callback(move |drawing_area, clock| {
            let now = clock.frame_time();
            let dt = last_frame
                .replace(Some(now))
                .map_or(Duration::ZERO, |prev| {
                    Duration::from_micros(now.saturating_sub(prev).max(0) as u64)
                });
            let moving = state.borrow_mut().tick(dt);
            drawing_area.queue_draw();
            if moving {
                glib::ControlFlow::Continue
            } else {
                animating.set(false);
                glib::ControlFlow::Break
            }
        });
    }

    fn refresh(&mut self) {
        self.caption = self.state.borrow().caption();
        self.dots_area.queue_draw();
        self.dial_area.queue_draw();
    }
}
