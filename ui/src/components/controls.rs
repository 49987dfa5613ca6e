//! The fixed dashboard form: country dropdown, series checkboxes and the
//! scale radio group. Each control writes straight into a signal owned by the
//! dashboard view.

use dioxus::prelude::*;

use crate::core::chart::ScaleMode;

#[component]
pub fn CountrySelect(countries: Vec<String>, mut selected: Signal<String>) -> Element {
    let current = selected();

    rsx! {
        label { class: "controls__label", r#for: "select-country", "Country" }
        select {
            id: "select-country",
            class: "controls__select",
            value: "{current}",
            onchange: move |evt| selected.set(evt.value()),
            for country in countries.iter() {
                option {
                    value: "{country}",
                    selected: *country == current,
                    "{country}"
                }
            }
        }
    }
}

#[component]
pub fn SeriesToggle(label: &'static str, mut checked: Signal<bool>) -> Element {
    rsx! {
        label { class: "controls__toggle",
            input {
                r#type: "checkbox",
                checked: checked(),
                onchange: move |evt| checked.set(evt.checked()),
            }
            "{label}"
        }
    }
}

#[component]
pub fn ScaleRadio(mut scale: Signal<ScaleMode>) -> Element {
    let current = scale();

    rsx! {
        div { class: "controls__scale", role: "radiogroup",
            for mode in ScaleMode::ALL {
                label { class: "controls__radio",
                    input {
                        r#type: "radio",
                        name: "scale",
                        value: "{mode.label()}",
                        checked: mode == current,
                        onchange: move |evt| {
                            if let Some(picked) = ScaleMode::from_label(&evt.value()) {
                                scale.set(picked);
                            }
                        },
                    }
                    "{mode.label()}"
                }
            }
        }
    }
}
