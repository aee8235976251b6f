use std::cell::RefCell;
use std::rc::Rc;

use dioxus::prelude::*;
use dioxus_web::WebEventExt;
use note_core::{ControlId, DragController, NoteController, PanelId, Point, Surfaces, COPIED_LABEL};
use wasm_bindgen::JsCast;

use crate::config::page_config;
use crate::controls::{ButtonView, SignalControl, SignalPanel};
use crate::interop::{browser_ports, install_drag_listeners, install_unload_guard, next_animation_frame};

const DISMISS_IMAGE_ID: &str = "close-qr-button";

const IDLE_TRANSFORM: &str = "translate3d(0px, 0px, 0)";

/// Trailing glyph shown while a button carries the copy confirmation.
pub fn confirmation_glyph(label: &str) -> Option<&'static str> {
    (label == COPIED_LABEL).then_some("✓")
}

pub fn preview_style(visible: bool, transform: &str) -> String {
    let display = if visible { "flex" } else { "none" };
    format!("display: {display}; transform: {transform};")
}

fn target_is_dismiss_control(e: &MouseEvent) -> bool {
    e.data()
        .try_as_web_event()
        .and_then(|event| event.target())
        .and_then(|target| target.dyn_into::<web_sys::Element>().ok())
        .map(|element| {
            element
                .closest(&format!("#{DISMISS_IMAGE_ID}"))
                .ok()
                .flatten()
                .is_some()
        })
        .unwrap_or(false)
}

#[component]
pub fn NotePage() -> Element {
    let mut text = use_signal(String::new);
    let copy_text_button = use_signal(|| ButtonView::new("Copy text"));
    let copy_link_button = use_signal(|| ButtonView::new("Copy link"));
    let image_button = use_signal(|| ButtonView::new("Generate QR code"));
    let save_button = use_signal(|| ButtonView::new("Save as file"));
    let preview_open = use_signal(|| false);
    let banner_open = use_signal(|| false);
    let transform = use_signal(|| IDLE_TRANSFORM.to_string());

    let controller = use_hook(|| {
        let surfaces = Surfaces::new()
            .with_control(ControlId::CopyText, SignalControl(copy_text_button))
            .with_control(ControlId::CopyLink, SignalControl(copy_link_button))
            .with_control(ControlId::GenerateImage, SignalControl(image_button))
            .with_control(ControlId::SaveFile, SignalControl(save_button))
            .with_panel(PanelId::ImagePreview, SignalPanel(preview_open))
            .with_panel(PanelId::Banner, SignalPanel(banner_open));
        NoteController::new(page_config().clone(), browser_ports(), surfaces)
    });
    let drag = use_hook(|| Rc::new(RefCell::new(DragController::new())));

    let controller_for_boot = controller.clone();
    let drag_for_listeners = drag.clone();
    use_hook(move || {
        install_unload_guard(controller_for_boot.clone());
        install_drag_listeners(drag_for_listeners, transform);

        spawn(async move {
            let report = controller_for_boot.bootstrap();
            text.set(controller_for_boot.text());
            if report.hydrated {
                next_animation_frame().await;
                controller_for_boot.run_banner().await;
            }
        });
    });

    let controller_for_input = controller.clone();
    let on_input = move |e: FormEvent| {
        let value = e.value();
        text.set(value.clone());
        controller_for_input.on_input(value);
    };

    let controller_for_copy_text = controller.clone();
    let on_copy_text = move |_: MouseEvent| {
        let controller = controller_for_copy_text.clone();
        spawn(async move {
            controller.copy_text().await;
        });
    };

    let controller_for_copy_link = controller.clone();
    let on_copy_link = move |_: MouseEvent| {
        let controller = controller_for_copy_link.clone();
        spawn(async move {
            controller.copy_link().await;
        });
    };

    let controller_for_image = controller.clone();
    let on_generate_image = move |_: MouseEvent| {
        controller_for_image.generate_image();
    };

    let controller_for_save = controller.clone();
    let on_save = move |_: MouseEvent| {
        controller_for_save.save_file();
    };

    let controller_for_dismiss_image = controller.clone();
    let on_dismiss_image = move |_: MouseEvent| {
        controller_for_dismiss_image.dismiss_image();
    };

    let controller_for_banner = controller.clone();
    let on_dismiss_banner = move |_: MouseEvent| {
        controller_for_banner.dismiss_banner();
    };

    let drag_for_down = drag.clone();
    let on_preview_mousedown = move |e: MouseEvent| {
        let point = e.data().client_coordinates();
        drag_for_down.borrow_mut().pointer_down(
            Point::new(point.x as i32, point.y as i32),
            target_is_dismiss_control(&e),
        );
    };

    let preview = preview_style(preview_open(), &transform.read());

    rsx! {
        main {
            class: "note-page",
            style: "display: flex; flex-direction: column; gap: 0.75rem; max-width: 48rem; margin: 0 auto; padding: 1.5rem;",

            if banner_open() {
                div {
                    id: "shared-banner",
                    class: "shared-banner",
                    style: "display: flex; align-items: center; justify-content: space-between; padding: 0.75rem 1rem; background: var(--banner-bg, #1e3a8a); color: white; border-radius: 8px;",
                    span { "This note was opened from a shared link." }
                    button {
                        id: "close-banner-button",
                        style: "background: transparent; color: inherit; border: none; cursor: pointer; font-size: 1.25rem; line-height: 1;",
                        onclick: on_dismiss_banner,
                        "×"
                    }
                }
            }

            textarea {
                id: "main-textarea",
                style: "min-height: 16rem; padding: 0.75rem; font: inherit; resize: vertical;",
                placeholder: "Write a note to share...",
                value: "{text}",
                oninput: on_input,
            }

            div {
                class: "note-actions",
                style: "display: flex; flex-wrap: wrap; gap: 0.5rem;",
                ActionButton { id: "copy-button", view: copy_text_button(), onclick: on_copy_text }
                ActionButton { id: "copy-url-button", view: copy_link_button(), onclick: on_copy_link }
                ActionButton { id: "generate-qr-button", view: image_button(), onclick: on_generate_image }
                ActionButton { id: "save-file-button", view: save_button(), onclick: on_save }
            }

            div {
                id: "qr-code-container",
                class: "qr-code-container",
                style: "{preview}",
                onmousedown: on_preview_mousedown,
                ondragstart: move |e| e.prevent_default(),
                div {
                    style: "position: relative; padding: 1rem; background: white; border-radius: 8px; box-shadow: 0 10px 30px rgba(0, 0, 0, 0.25); cursor: move; user-select: none;",
                    button {
                        id: "{DISMISS_IMAGE_ID}",
                        style: "position: absolute; top: 0.25rem; right: 0.25rem; background: transparent; border: none; cursor: pointer; font-size: 1.25rem; line-height: 1;",
                        onclick: on_dismiss_image,
                        "×"
                    }
                    div { id: "qr-code-image" }
                }
            }
        }
    }
}

#[component]
fn ActionButton(id: &'static str, view: ButtonView, onclick: EventHandler<MouseEvent>) -> Element {
    let glyph = confirmation_glyph(&view.label);

    rsx! {
        button {
            id: "{id}",
            disabled: view.disabled,
            style: "padding: 0.5rem 1rem; border-radius: 6px; cursor: pointer;",
            onclick: move |e| onclick.call(e),
            "{view.label}"
            if let Some(glyph) = glyph {
                span { class: "confirmation-glyph", style: "margin-left: 0.35rem;", "{glyph}" }
            }
        }
    }
}
