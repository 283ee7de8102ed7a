slint::include_modules!();

use std::cell::RefCell;
use std::rc::Rc;
use std::thread;

use hexo_picker::config;
use hexo_picker::sampler::ScreenSampler;
use hexo_picker::{
    hex_to_rgb, render_hue_ring, JsonFileStore, Picker, PickerError, Point, Rgb, SampleOutcome,
    SystemClipboard,
};
use log::{info, warn};
use slint::{Color, Image, ModelRc, Rgba8Pixel, SharedPixelBuffer, Timer, TimerMode, VecModel};

fn to_color(rgb: Rgb) -> Color {
    Color::from_rgb_u8(rgb.r, rgb.g, rgb.b)
}

fn swatches<'a>(hexes: impl IntoIterator<Item = &'a String>) -> ModelRc<Swatch> {
    let items: Vec<Swatch> = hexes
        .into_iter()
        .filter_map(|hex| {
            let rgb = hex_to_rgb(hex).ok()?;
            Some(Swatch {
                hex: hex.as_str().into(),
                swatch: to_color(rgb),
            })
        })
        .collect();
    ModelRc::from(Rc::new(VecModel::from(items)))
}

fn ring_image(picker: &Picker, size: u32) -> Image {
    let ring = render_hue_ring(picker.ring(), size);
    let buffer =
        SharedPixelBuffer::<Rgba8Pixel>::clone_from_slice(ring.as_raw(), ring.width(), ring.height());
    Image::from_rgba8(buffer)
}

fn sync_color(ui: &AppWindow, picker: &Picker) {
    let display = picker.display();
    let thumb = picker.thumb();
    ui.set_val_rgb(display.rgb.into());
    ui.set_val_hsl(display.hsl.into());
    ui.set_val_hex(display.hex.into());
    ui.set_accent(to_color(display.accent));
    ui.set_thumb_x(thumb.position.x as f32);
    ui.set_thumb_y(thumb.position.y as f32);
    ui.set_thumb_color(to_color(thumb.color));
    ui.set_thumb_value(thumb.value as i32);
}

fn sync_history(ui: &AppWindow, picker: &Picker) {
    ui.set_history_model(swatches(picker.recent()));
}

fn show_copied(ui: &AppWindow, picker: &Rc<RefCell<Picker>>, timer: &Timer, token: u64) {
    ui.set_status_text("".into());
    ui.set_copied_visible(true);
    let delay = picker.borrow().copy_notice().delay();
    let ui_weak = ui.as_weak();
    let picker = picker.clone();
    // restarting the single timer drops the previous copy's pending hide
    timer.start(TimerMode::SingleShot, delay, move || {
        if picker.borrow_mut().dismiss_copy_notice(token) {
            if let Some(ui) = ui_weak.upgrade() {
                ui.set_copied_visible(false);
            }
        }
    });
}

fn finish_sampling(
    ui: &AppWindow,
    picker: &RefCell<Picker>,
    outcome: Result<SampleOutcome, PickerError>,
    hide_while_sampling: bool,
) {
    ui.set_sampling(false);
    if hide_while_sampling {
        ui.window().show().ok();
    }
    let mut picker = picker.borrow_mut();
    match picker.finish_sampling(outcome) {
        Ok(true) => {
            sync_color(ui, &picker);
            sync_history(ui, &picker);
        }
        Ok(false) => {}
        Err(err) => {
            warn!("sampling: {err}");
            ui.set_status_text(err.to_string().into());
        }
    }
}

fn main() -> Result<(), slint::PlatformError> {
    env_logger::init();

    let settings = config::load_settings();
    let store = JsonFileStore::new(config::storage_path());
    info!("history store: {}", store.path().display());
    let sampler = ScreenSampler::detect();

    let ui = AppWindow::new()?;
    let ui_handle = ui.as_weak();

    let mut picker = Picker::new(
        &settings,
        Box::new(store),
        Box::new(SystemClipboard::new()),
        sampler,
    );
    picker.restore_history();

    ui.set_ring_size(settings.canvas_size as f32);
    ui.set_ring_image(ring_image(&picker, settings.canvas_size));
    ui.set_preset_model(swatches(&settings.presets));
    ui.set_sampler_available(picker.sampler_available());
    sync_color(&ui, &picker);
    sync_history(&ui, &picker);

    let picker = Rc::new(RefCell::new(picker));
    let copy_timer = Rc::new(Timer::default());

    let ui_weak = ui_handle.clone();
    let ring_picker = picker.clone();
    ui.on_ring_pressed(move |x, y| {
        let Some(ui) = ui_weak.upgrade() else { return };
        let mut picker = ring_picker.borrow_mut();
        if picker.pointer_down(Point::new(x as f64, y as f64)) {
            sync_color(&ui, &picker);
        }
    });

    let ui_weak = ui_handle.clone();
    let ring_picker = picker.clone();
    ui.on_ring_moved(move |x, y| {
        let Some(ui) = ui_weak.upgrade() else { return };
        let mut picker = ring_picker.borrow_mut();
        if picker.pointer_move(Point::new(x as f64, y as f64)) {
            sync_color(&ui, &picker);
        }
    });

    let ring_picker = picker.clone();
    ui.on_ring_released(move || {
        ring_picker.borrow_mut().pointer_up();
    });

    let ui_weak = ui_handle.clone();
    let copy_picker = picker.clone();
    let timer = copy_timer.clone();
    ui.on_copy_value(move |text| {
        let Some(ui) = ui_weak.upgrade() else { return };
        let result = copy_picker.borrow_mut().copy_text(&text);
        match result {
            Ok(token) => {
                sync_history(&ui, &copy_picker.borrow());
                show_copied(&ui, &copy_picker, &timer, token);
            }
            Err(err) => {
                warn!("copy failed: {err}");
                ui.set_status_text(err.to_string().into());
            }
        }
    });

    let ui_weak = ui_handle.clone();
    let history_picker = picker.clone();
    let timer = copy_timer.clone();
    ui.on_history_clicked(move |hex| {
        let Some(ui) = ui_weak.upgrade() else { return };
        let result = history_picker.borrow_mut().copy_history_entry(&hex);
        match result {
            Ok(token) => show_copied(&ui, &history_picker, &timer, token),
            Err(err) => {
                warn!("copy failed: {err}");
                ui.set_status_text(err.to_string().into());
            }
        }
    });

    let ui_weak = ui_handle.clone();
    let preset_picker = picker.clone();
    ui.on_preset_clicked(move |hex| {
        let Some(ui) = ui_weak.upgrade() else { return };
        let mut picker = preset_picker.borrow_mut();
        match picker.choose_preset(&hex) {
            Ok(()) => {
                sync_color(&ui, &picker);
                sync_history(&ui, &picker);
            }
            Err(err) => ui.set_status_text(err.to_string().into()),
        }
    });

    let hide_while_sampling = settings.hide_while_sampling;

    let ui_weak = ui_handle.clone();
    let pick_picker = picker.clone();
    ui.on_pick_color(move || {
        let Some(ui) = ui_weak.upgrade() else { return };
        let sampler = match pick_picker.borrow_mut().start_sampling() {
            Ok(sampler) => sampler,
            Err(err) => {
                warn!("{err}");
                ui.set_status_text(err.to_string().into());
                return;
            }
        };
        ui.set_status_text("".into());
        ui.set_sampling(true);
        if hide_while_sampling {
            ui.window().hide().ok();
        }

        let ui_weak = ui.as_weak();
        thread::spawn(move || {
            let outcome = sampler.open();
            let posted = ui_weak.upgrade_in_event_loop(move |ui| match outcome {
                Ok(SampleOutcome::Picked(hex)) => ui.invoke_sample_picked(hex.into()),
                Ok(SampleOutcome::Cancelled) => ui.invoke_sample_cancelled(),
                Err(PickerError::Sampler(msg)) => ui.invoke_sample_failed(msg.into()),
                Err(err) => ui.invoke_sample_failed(err.to_string().into()),
            });
            if let Err(err) = posted {
                warn!("sampling: could not reach the UI: {err:?}");
            }
        });
    });

    let ui_weak = ui_handle.clone();
    let finish_picker = picker.clone();
    ui.on_sample_picked(move |hex| {
        if let Some(ui) = ui_weak.upgrade() {
            let outcome = Ok(SampleOutcome::Picked(hex.to_string()));
            finish_sampling(&ui, &finish_picker, outcome, hide_while_sampling);
        }
    });

    let ui_weak = ui_handle.clone();
    let finish_picker = picker.clone();
    ui.on_sample_cancelled(move || {
        if let Some(ui) = ui_weak.upgrade() {
            finish_sampling(&ui, &finish_picker, Ok(SampleOutcome::Cancelled), hide_while_sampling);
        }
    });

    let ui_weak = ui_handle.clone();
    let finish_picker = picker.clone();
    ui.on_sample_failed(move |msg| {
        if let Some(ui) = ui_weak.upgrade() {
            let outcome = Err(PickerError::Sampler(msg.to_string()));
            finish_sampling(&ui, &finish_picker, outcome, hide_while_sampling);
        }
    });

    ui.window().on_close_requested(|| {
        slint::quit_event_loop().ok();
        slint::CloseRequestResponse::HideWindow
    });

    ui.show()?;
    slint::run_event_loop_until_quit()
}
