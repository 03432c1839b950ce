use eframe::egui;

use zipscope::app::ZipscopeApp;
use zipscope::data::loader;

fn main() -> eframe::Result {
    env_logger::init();

    // The session is useless without data: a missing source file is fatal.
    let dataset = match loader::load_default() {
        Ok(ds) => ds,
        Err(e) => {
            log::error!("failed to load dataset: {e}");
            eprintln!("Error: {e}");
            eprintln!("Place '{}' next to the executable or in the working directory.", loader::DATASET_FILE);
            std::process::exit(1);
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 840.0])
            .with_min_inner_size([700.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Zipscope – LA County Zip Code Analytics",
        options,
        Box::new(move |_cc| Ok(Box::new(ZipscopeApp::new(dataset)))),
    )
}
