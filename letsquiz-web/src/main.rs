use letsquiz_web::app::App;
use yew::Renderer;

fn main() {
    #[cfg(target_arch = "wasm32")]
    {
        console_error_panic_hook::set_once();
        if let Err(err) = console_log::init_with_level(log::Level::Debug) {
            web_sys::console::warn_1(&wasm_bindgen::JsValue::from_str(&format!(
                "console logger unavailable: {err}"
            )));
        }
    }

    log::info!("Starting LetsQuiz");

    Renderer::<App>::new().render();
}
