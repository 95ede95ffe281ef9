use leptos::prelude::*;

/// Centralised dialog control.
///
/// Dialogs register their open flag through [`use_modal_state`]; the router
/// calls [`ModalService::close_all`] on every navigation so no dialog
/// survives a page change.
#[derive(Clone, Copy)]
pub struct ModalService {
    generation: RwSignal<u64>,
}

impl ModalService {
    pub fn new() -> Self {
        Self {
            generation: RwSignal::new(0),
        }
    }

    /// Close every open dialog
    pub fn close_all(&self) {
        self.generation.update(|g| *g = g.wrapping_add(1));
    }
}

impl Default for ModalService {
    fn default() -> Self {
        Self::new()
    }
}

/// Open flag for one dialog, reset whenever `close_all` fires.
pub fn use_modal_state() -> RwSignal<bool> {
    let open = RwSignal::new(false);
    if let Some(service) = use_context::<ModalService>() {
        Effect::new(move |prev: Option<u64>| {
            let generation = service.generation.get();
            if prev.is_some() {
                open.set(false);
            }
            generation
        });
    }
    open
}

/// Modal frame: overlay, header with close button, body.
/// Clicking the overlay closes the dialog.
#[component]
pub fn Modal(
    open: RwSignal<bool>,
    #[prop(into)] title: Signal<String>,
    children: ChildrenFn,
) -> impl IntoView {
    view! {
        <Show when=move || open.get()>
            <div class="modal-overlay" on:click=move |_| open.set(false)>
                <div class="modal-content" on:click=|e| e.stop_propagation()>
                    <div class="modal-header">
                        <h3>{move || title.get()}</h3>
                        <button class="btn-close" on:click=move |_| open.set(false)>"×"</button>
                    </div>
                    {children()}
                </div>
            </div>
        </Show>
    }
}
