use dioxus::prelude::*;

use ui::views::Dashboard;

// Embedded shared theme (ui/assets/theme/main.css); no separate web stylesheet.
const THEME_CSS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
));

fn main() {
    // The server build loads both tables before serving anything; a loader
    // failure means the process never starts.
    #[cfg(feature = "server")]
    {
        dioxus::logger::initialize_default();
        let sources = api::loader::DataSources::from_env();
        if let Err(err) = api::loader::init(&sources) {
            tracing::error!(error = %err, "failed to load dashboard datasets");
            std::process::exit(1);
        }
    }

    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Title { "COVID-19 Pandemic Dashboard" }
        document::Style { "{THEME_CSS}" }

        Dashboard {}
    }
}
